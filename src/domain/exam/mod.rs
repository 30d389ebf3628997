//! Exam and knowledge-domain reference data

mod entity;
mod validation;

pub use entity::{DomainCode, DomainId, Exam, ExamDomain};
pub use validation::{validate_domain_code, ExamValidationError, MAX_DOMAIN_CODE_LENGTH};
