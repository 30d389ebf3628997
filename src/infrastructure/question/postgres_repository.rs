//! PostgreSQL question repository implementation

use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::domain::exam::{DomainCode, DomainId, ExamDomain};
use crate::domain::question::{
    AnswerChoice, EligibilityFilter, Question, QuestionId, QuestionRepository,
};
use crate::domain::selection::DomainInventory;
use crate::domain::DomainError;

/// PostgreSQL implementation of QuestionRepository
#[derive(Debug, Clone)]
pub struct PostgresQuestionRepository {
    pool: PgPool,
}

impl PostgresQuestionRepository {
    /// Create a new repository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl QuestionRepository for PostgresQuestionRepository {
    async fn domain_inventory(
        &self,
        filter: &EligibilityFilter,
        allow_list: Option<&[DomainCode]>,
    ) -> Result<DomainInventory, DomainError> {
        let rows = match allow_list {
            None => {
                sqlx::query(
                    r#"
                    SELECT d.id AS domain_id, d.code AS domain_code, d.name AS domain_name,
                           COUNT(q.id) AS available
                    FROM questions q
                    JOIN exam_domains d ON d.id = q.domain_id
                    WHERE q.exam = $1
                      AND q.status = $2
                      AND q.review_status = $3
                      AND ($4 = FALSE OR EXISTS (
                          SELECT 1 FROM explanations e WHERE e.question_id = q.id
                      ))
                    GROUP BY d.id, d.code, d.name
                    "#,
                )
                .bind(filter.exam.content_key())
                .bind(filter.status.as_str())
                .bind(filter.review_status.as_str())
                .bind(filter.require_explanation)
                .fetch_all(&self.pool)
                .await
            }
            Some(codes) => {
                let code_values: Vec<String> =
                    codes.iter().map(|c| c.as_str().to_string()).collect();

                sqlx::query(
                    r#"
                    SELECT d.id AS domain_id, d.code AS domain_code, d.name AS domain_name,
                           COUNT(q.id) AS available
                    FROM exam_domains d
                    LEFT JOIN questions q ON q.domain_id = d.id
                      AND q.exam = $1
                      AND q.status = $2
                      AND q.review_status = $3
                      AND ($4 = FALSE OR EXISTS (
                          SELECT 1 FROM explanations e WHERE e.question_id = q.id
                      ))
                    WHERE d.code = ANY($5)
                    GROUP BY d.id, d.code, d.name
                    "#,
                )
                .bind(filter.exam.content_key())
                .bind(filter.status.as_str())
                .bind(filter.review_status.as_str())
                .bind(filter.require_explanation)
                .bind(&code_values)
                .fetch_all(&self.pool)
                .await
            }
        }
        .map_err(|e| {
            DomainError::inventory_fetch("domain availability", e.to_string())
        })?;

        let mut inventory = DomainInventory::new();

        for row in rows {
            let domain = row_to_domain(&row)?;
            let available: i64 = row.get("available");

            inventory.record_count(domain.code.clone(), available as usize);
            inventory.record_domain(domain);
        }

        Ok(inventory)
    }

    async fn eligible_questions(
        &self,
        filter: &EligibilityFilter,
        domain_id: &DomainId,
    ) -> Result<Vec<Question>, DomainError> {
        // No LIMIT here on purpose: the store's default order is stable, so
        // a small limit would resample the same leading rows session after
        // session. The full pool is fetched and sampled in memory.
        let question_rows = sqlx::query(
            r#"
            SELECT q.id, q.stem, q.difficulty
            FROM questions q
            WHERE q.exam = $1
              AND q.status = $2
              AND q.review_status = $3
              AND q.domain_id = $4
              AND ($5 = FALSE OR EXISTS (
                  SELECT 1 FROM explanations e WHERE e.question_id = q.id
              ))
            "#,
        )
        .bind(filter.exam.content_key())
        .bind(filter.status.as_str())
        .bind(filter.review_status.as_str())
        .bind(domain_id.as_uuid())
        .bind(filter.require_explanation)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to fetch domain pool: {}", e)))?;

        if question_rows.is_empty() {
            return Ok(Vec::new());
        }

        let question_ids: Vec<Uuid> = question_rows
            .iter()
            .map(|row| row.get::<Uuid, _>("id"))
            .collect();

        let answer_rows = sqlx::query(
            r#"
            SELECT a.question_id, a.choice_label, a.choice_text, a.is_correct
            FROM answers a
            WHERE a.question_id = ANY($1)
            ORDER BY a.question_id, a.choice_label
            "#,
        )
        .bind(&question_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to fetch answers: {}", e)))?;

        let mut answers_by_question: HashMap<Uuid, Vec<AnswerChoice>> = HashMap::new();

        for row in answer_rows {
            let question_id: Uuid = row.get("question_id");
            answers_by_question
                .entry(question_id)
                .or_default()
                .push(AnswerChoice::new(
                    row.get::<String, _>("choice_label"),
                    row.get::<String, _>("choice_text"),
                    row.get::<bool, _>("is_correct"),
                ));
        }

        let mut questions = Vec::with_capacity(question_rows.len());

        for row in question_rows {
            let id: Uuid = row.get("id");
            let stem: String = row.get("stem");
            let difficulty: Option<String> = row.get("difficulty");

            let mut question = Question::new(
                QuestionId::new(id),
                stem,
                answers_by_question.remove(&id).unwrap_or_default(),
            );
            if let Some(difficulty) = difficulty {
                question = question.with_difficulty(difficulty);
            }

            questions.push(question);
        }

        Ok(questions)
    }
}

fn row_to_domain(row: &sqlx::postgres::PgRow) -> Result<ExamDomain, DomainError> {
    let id: Uuid = row.get("domain_id");
    let code: String = row.get("domain_code");
    let name: String = row.get("domain_name");

    let code = DomainCode::new(&code)
        .map_err(|e| DomainError::storage(format!("Invalid domain code in database: {}", e)))?;

    Ok(ExamDomain::new(DomainId::new(id), code, name))
}
