//! Question domain - exam content entities and storage access

mod entity;
mod repository;

pub use entity::{
    AnswerChoice, EligibilityFilter, Question, QuestionId, QuestionStatus, ReviewStatus,
    TaggedQuestion,
};
pub use repository::in_memory::InMemoryQuestionRepository;
pub use repository::QuestionRepository;

#[cfg(test)]
pub use repository::mock::MockQuestionRepository;
