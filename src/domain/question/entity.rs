//! Question entity and eligibility filters

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::exam::{DomainCode, DomainId, Exam};

/// Unique identifier for a question
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QuestionId(Uuid);

impl QuestionId {
    pub fn new(id: Uuid) -> Self {
        Self(id)
    }

    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl std::fmt::Display for QuestionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifecycle status of a question in the content store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QuestionStatus {
    Draft,
    Active,
    Retired,
}

impl QuestionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "DRAFT",
            Self::Active => "ACTIVE",
            Self::Retired => "RETIRED",
        }
    }
}

/// Editorial review status of a question
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReviewStatus {
    Pending,
    Good,
    Flagged,
}

impl ReviewStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Good => "GOOD",
            Self::Flagged => "FLAGGED",
        }
    }
}

/// A single answer choice attached to a question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerChoice {
    pub label: String,
    pub text: String,
    pub is_correct: bool,
}

impl AnswerChoice {
    pub fn new(label: impl Into<String>, text: impl Into<String>, is_correct: bool) -> Self {
        Self {
            label: label.into(),
            text: text.into(),
            is_correct,
        }
    }
}

/// An exam question as read from the content store
///
/// Immutable from this subsystem's perspective: selection only reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: QuestionId,
    pub stem: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<String>,
    pub answers: Vec<AnswerChoice>,
}

impl Question {
    pub fn new(id: QuestionId, stem: impl Into<String>, answers: Vec<AnswerChoice>) -> Self {
        Self {
            id,
            stem: stem.into(),
            difficulty: None,
            answers,
        }
    }

    pub fn with_difficulty(mut self, difficulty: impl Into<String>) -> Self {
        self.difficulty = Some(difficulty.into());
        self
    }
}

/// A selected question tagged with the domain it was drawn from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaggedQuestion {
    #[serde(flatten)]
    pub question: Question,
    pub domain_id: DomainId,
    pub domain_code: DomainCode,
    pub domain_name: String,
}

impl TaggedQuestion {
    pub fn new(
        question: Question,
        domain_id: DomainId,
        domain_code: DomainCode,
        domain_name: impl Into<String>,
    ) -> Self {
        Self {
            question,
            domain_id,
            domain_code,
            domain_name: domain_name.into(),
        }
    }
}

/// Content-quality filter applied to every selection query
///
/// Defaults to the eligible pool: ACTIVE status, GOOD review. The practice
/// flow additionally requires each question to carry an explanation record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EligibilityFilter {
    pub exam: Exam,
    pub status: QuestionStatus,
    pub review_status: ReviewStatus,
    pub require_explanation: bool,
}

impl EligibilityFilter {
    pub fn new(exam: Exam) -> Self {
        Self {
            exam,
            status: QuestionStatus::Active,
            review_status: ReviewStatus::Good,
            require_explanation: false,
        }
    }

    pub fn with_explanations(mut self) -> Self {
        self.require_explanation = true;
        self
    }
}
