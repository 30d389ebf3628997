//! Domain layer - Core business logic and entities

pub mod blueprint;
pub mod error;
pub mod exam;
pub mod question;
pub mod selection;

pub use blueprint::{Blueprint, BlueprintEntry, PMLE_BLUEPRINT};
pub use error::DomainError;
pub use exam::{
    validate_domain_code, DomainCode, DomainId, Exam, ExamDomain, ExamValidationError,
};
pub use question::{
    AnswerChoice, EligibilityFilter, InMemoryQuestionRepository, Question, QuestionId,
    QuestionRepository, QuestionStatus, ReviewStatus, TaggedQuestion,
};
pub use selection::{
    blueprint_targets, even_split_targets, DomainDistribution, DomainInventory, DomainTargets,
    PracticeSelectionResult, SelectionResult, MIN_POOL_THRESHOLD,
};
