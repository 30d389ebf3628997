//! Selection request and response types

use chrono::Utc;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::exam::{DomainCode, DomainId};
use crate::domain::question::{AnswerChoice, QuestionId, TaggedQuestion};
use crate::domain::selection::{
    DomainAvailabilityEntry, DomainDistribution, PracticeSelectionResult, SelectionResult,
};

/// Request body for a diagnostic (blueprint-weighted) selection
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosticSelectionRequest {
    #[validate(range(
        min = 1,
        max = 100,
        message = "questionCount must be between 1 and 100"
    ))]
    pub question_count: u32,
}

/// Request body for a practice (explicit-domain-list) selection
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PracticeSelectionRequest {
    #[serde(default = "default_exam_key")]
    pub exam_key: String,

    #[validate(length(min = 1, message = "at least one domain code is required"))]
    pub domain_codes: Vec<String>,

    #[validate(range(
        min = 1,
        max = 100,
        message = "questionCount must be between 1 and 100"
    ))]
    pub question_count: u32,
}

fn default_exam_key() -> String {
    "pmle".to_string()
}

/// An answer choice as returned to callers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiAnswer {
    pub choice_label: String,
    pub choice_text: String,
    pub is_correct: bool,
}

impl ApiAnswer {
    fn from_domain(answer: &AnswerChoice) -> Self {
        Self {
            choice_label: answer.label.clone(),
            choice_text: answer.text.clone(),
            is_correct: answer.is_correct,
        }
    }
}

/// A selected question with its domain tag
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiQuestion {
    pub id: QuestionId,
    pub stem: String,
    pub domain_id: DomainId,
    pub domain_code: DomainCode,
    pub domain_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<String>,
    pub answers: Vec<ApiAnswer>,
}

impl ApiQuestion {
    /// Create an API question from a domain-tagged question
    pub fn from_domain(tagged: &TaggedQuestion) -> Self {
        Self {
            id: tagged.question.id,
            stem: tagged.question.stem.clone(),
            domain_id: tagged.domain_id,
            domain_code: tagged.domain_code.clone(),
            domain_name: tagged.domain_name.clone(),
            difficulty: tagged.question.difficulty.clone(),
            answers: tagged
                .question
                .answers
                .iter()
                .map(ApiAnswer::from_domain)
                .collect(),
        }
    }
}

/// Response body for a diagnostic selection
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosticSelectionResponse {
    pub created: i64,
    pub questions: Vec<ApiQuestion>,
    pub domain_distribution: Vec<DomainDistribution>,
}

impl DiagnosticSelectionResponse {
    pub fn from_domain(result: &SelectionResult) -> Self {
        Self {
            created: Utc::now().timestamp(),
            questions: result.questions.iter().map(ApiQuestion::from_domain).collect(),
            domain_distribution: result.domain_distribution.clone(),
        }
    }
}

/// Response body for a practice selection
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PracticeSelectionResponse {
    pub created: i64,
    pub questions: Vec<ApiQuestion>,
    pub domain_distribution: Vec<DomainDistribution>,
    pub total_requested: usize,
    pub total_selected: usize,
}

impl PracticeSelectionResponse {
    pub fn from_domain(result: &PracticeSelectionResult) -> Self {
        Self {
            created: Utc::now().timestamp(),
            questions: result.questions.iter().map(ApiQuestion::from_domain).collect(),
            domain_distribution: result.domain_distribution.clone(),
            total_requested: result.total_requested,
            total_selected: result.total_selected,
        }
    }
}

/// Response body for the content availability report
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityResponse {
    pub created: i64,
    pub domains: Vec<DomainAvailabilityEntry>,
    pub total_available: usize,
    pub content_gaps: bool,
}

impl AvailabilityResponse {
    pub fn from_domain(report: Vec<DomainAvailabilityEntry>) -> Self {
        let total_available = report.iter().map(|e| e.available_count).sum();
        let content_gaps = report.iter().any(|e| e.below_threshold);

        Self {
            created: Utc::now().timestamp(),
            domains: report,
            total_available,
            content_gaps,
        }
    }
}
