//! Exam and domain reference entities

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::validation::{validate_domain_code, ExamValidationError};
use crate::domain::DomainError;

/// Supported exams
///
/// The public exam key (used in API requests) is distinct from the content
/// store identifier the question rows are tagged with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Exam {
    /// Google Professional Machine Learning Engineer
    Pmle,
}

impl Exam {
    /// Resolve an exam from its public key
    pub fn from_key(key: &str) -> Result<Self, DomainError> {
        match key {
            "pmle" => Ok(Self::Pmle),
            other => Err(DomainError::configuration(format!(
                "Unsupported exam key: '{}'. Only 'pmle' is currently supported.",
                other
            ))),
        }
    }

    /// Public exam key
    pub fn key(&self) -> &'static str {
        match self {
            Self::Pmle => "pmle",
        }
    }

    /// Identifier used by the content store for this exam's questions
    pub fn content_key(&self) -> &'static str {
        match self {
            Self::Pmle => "GCP_PM_ML_ENG",
        }
    }
}

impl std::fmt::Display for Exam {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// Domain code - stable short identifier for a knowledge area
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DomainCode(String);

impl DomainCode {
    /// Create a new DomainCode after validation
    pub fn new(code: impl Into<String>) -> Result<Self, ExamValidationError> {
        let code = code.into();
        validate_domain_code(&code)?;
        Ok(Self(code))
    }

    /// Get the inner string value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for DomainCode {
    type Error = ExamValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<DomainCode> for String {
    fn from(code: DomainCode) -> Self {
        code.0
    }
}

impl std::fmt::Display for DomainCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Storage key for an exam domain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DomainId(Uuid);

impl DomainId {
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

impl std::fmt::Display for DomainId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A knowledge-area classification for exam content
///
/// Domains are static reference data; this subsystem only reads them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExamDomain {
    pub id: DomainId,
    pub code: DomainCode,
    pub name: String,
}

impl ExamDomain {
    pub fn new(id: DomainId, code: DomainCode, name: impl Into<String>) -> Self {
        Self {
            id,
            code,
            name: name.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exam_from_key() {
        let exam = Exam::from_key("pmle").unwrap();
        assert_eq!(exam, Exam::Pmle);
        assert_eq!(exam.key(), "pmle");
        assert_eq!(exam.content_key(), "GCP_PM_ML_ENG");
    }

    #[test]
    fn test_exam_from_unknown_key() {
        let result = Exam::from_key("pcde");
        assert!(matches!(result, Err(DomainError::Configuration { .. })));
        assert!(result.unwrap_err().to_string().contains("pcde"));
    }

    #[test]
    fn test_domain_code_valid() {
        let code = DomainCode::new("SCALING_PROTOTYPES_INTO_ML_MODELS").unwrap();
        assert_eq!(code.as_str(), "SCALING_PROTOTYPES_INTO_ML_MODELS");
    }

    #[test]
    fn test_domain_code_invalid() {
        assert!(DomainCode::new("scaling-prototypes").is_err());
        assert!(DomainCode::new("").is_err());
    }

    #[test]
    fn test_domain_code_serde_round_trip() {
        let code = DomainCode::new("MONITORING_ML_SOLUTIONS").unwrap();
        let json = serde_json::to_string(&code).unwrap();
        assert_eq!(json, "\"MONITORING_ML_SOLUTIONS\"");

        let parsed: DomainCode = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, code);
    }

    #[test]
    fn test_domain_code_serde_rejects_invalid() {
        let result: Result<DomainCode, _> = serde_json::from_str("\"not a code\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_exam_domain_creation() {
        let domain = ExamDomain::new(
            DomainId::generate(),
            DomainCode::new("SERVING_AND_SCALING_MODELS").unwrap(),
            "Serving & Scaling Models",
        );

        assert_eq!(domain.code.as_str(), "SERVING_AND_SCALING_MODELS");
        assert_eq!(domain.name, "Serving & Scaling Models");
    }
}
