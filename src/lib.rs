//! Testero Content API
//!
//! Domain-weighted question selection for the Testero exam platform:
//! - Blueprint-weighted selection for diagnostic exams
//! - Even-split selection across explicit domain lists for practice sessions
//! - Per-domain availability reporting for operators
//!
//! Content is read from PostgreSQL in production; a seeded in-memory store
//! backs development and tests.

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use api::state::{AppState, SelectionServiceTrait};
use domain::blueprint::PMLE_BLUEPRINT;
use domain::exam::{DomainId, ExamDomain};
use domain::question::{AnswerChoice, InMemoryQuestionRepository, Question, QuestionId};
use infrastructure::question::PostgresQuestionRepository;
use infrastructure::services::SelectionService;
use tracing::info;

/// Create the application state with default configuration
pub async fn create_app_state() -> anyhow::Result<AppState> {
    create_app_state_with_config(&AppConfig::default()).await
}

/// Create the application state with custom configuration
pub async fn create_app_state_with_config(config: &AppConfig) -> anyhow::Result<AppState> {
    let blueprint = PMLE_BLUEPRINT.clone();
    blueprint
        .validate()
        .map_err(|e| anyhow::anyhow!("Invalid blueprint configuration: {}", e))?;

    let use_postgres = config.storage.backend.eq_ignore_ascii_case("postgres");
    info!("Content store backend: {}", config.storage.backend);

    let selection_service: Arc<dyn SelectionServiceTrait> = if use_postgres {
        let database_url = std::env::var("DATABASE_URL").map_err(|_| {
            anyhow::anyhow!("DATABASE_URL environment variable is required for the postgres backend")
        })?;

        info!("Connecting to PostgreSQL...");
        let pool = sqlx::PgPool::connect(&database_url)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to connect to PostgreSQL: {}", e))?;
        info!("PostgreSQL connection established");

        Arc::new(SelectionService::new(
            Arc::new(PostgresQuestionRepository::new(pool)),
            blueprint,
        ))
    } else {
        info!("Using in-memory content store with seeded demo questions");
        Arc::new(SelectionService::new(
            Arc::new(demo_content_repository()),
            blueprint,
        ))
    };

    Ok(AppState::new(selection_service))
}

// ============================================================================
// Seeded demo content
// ============================================================================

const DEMO_QUESTIONS_PER_DOMAIN: usize = 12;

/// In-memory content store seeded with enough eligible questions per PMLE
/// domain to serve a full diagnostic without a database
fn demo_content_repository() -> InMemoryQuestionRepository {
    let mut repository = InMemoryQuestionRepository::new();

    for entry in PMLE_BLUEPRINT.entries() {
        let domain = ExamDomain::new(
            DomainId::generate(),
            entry.domain_code.clone(),
            entry.display_name.clone(),
        );
        repository = repository.with_domain(domain);

        for index in 0..DEMO_QUESTIONS_PER_DOMAIN {
            repository = repository.with_question(
                &entry.domain_code,
                demo_question(&entry.display_name, index),
            );
        }
    }

    repository
}

fn demo_question(domain_name: &str, index: usize) -> Question {
    let correct = index % 4;
    let answers = (0..4)
        .map(|choice| {
            AnswerChoice::new(
                ((b'A' + choice as u8) as char).to_string(),
                format!("Candidate approach {} for scenario {}", choice + 1, index + 1),
                choice == correct,
            )
        })
        .collect();

    Question::new(
        QuestionId::generate(),
        format!(
            "[{}] Scenario {}: which approach best satisfies the stated requirements?",
            domain_name,
            index + 1
        ),
        answers,
    )
    .with_difficulty(match index % 3 {
        0 => "EASY",
        1 => "MEDIUM",
        _ => "HARD",
    })
}
