//! Domain code validation utilities

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

/// Maximum length for domain codes
pub const MAX_DOMAIN_CODE_LENGTH: usize = 64;

/// Regex pattern for valid domain codes (uppercase, digits, underscores)
static DOMAIN_CODE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z][A-Z0-9_]*$").unwrap());

/// Exam validation errors
#[derive(Debug, Clone, PartialEq)]
pub enum ExamValidationError {
    /// Domain code is empty
    EmptyDomainCode,
    /// Domain code exceeds maximum length
    DomainCodeTooLong { length: usize, max: usize },
    /// Domain code contains invalid characters
    InvalidDomainCodeFormat { code: String },
}

impl fmt::Display for ExamValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyDomainCode => write!(f, "Domain code cannot be empty"),
            Self::DomainCodeTooLong { length, max } => {
                write!(f, "Domain code too long: {} characters (max {})", length, max)
            }
            Self::InvalidDomainCodeFormat { code } => {
                write!(
                    f,
                    "Invalid domain code format '{}': must be uppercase letters, digits and \
                     underscores, starting with a letter",
                    code
                )
            }
        }
    }
}

impl std::error::Error for ExamValidationError {}

/// Validate a domain code
pub fn validate_domain_code(code: &str) -> Result<(), ExamValidationError> {
    if code.is_empty() {
        return Err(ExamValidationError::EmptyDomainCode);
    }

    if code.len() > MAX_DOMAIN_CODE_LENGTH {
        return Err(ExamValidationError::DomainCodeTooLong {
            length: code.len(),
            max: MAX_DOMAIN_CODE_LENGTH,
        });
    }

    if !DOMAIN_CODE_PATTERN.is_match(code) {
        return Err(ExamValidationError::InvalidDomainCodeFormat {
            code: code.to_string(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_domain_codes() {
        assert!(validate_domain_code("MONITORING_ML_SOLUTIONS").is_ok());
        assert!(validate_domain_code("SERVING_AND_SCALING_MODELS").is_ok());
        assert!(validate_domain_code("A").is_ok());
        assert!(validate_domain_code("DOMAIN_2").is_ok());
    }

    #[test]
    fn test_invalid_domain_codes() {
        assert!(matches!(
            validate_domain_code(""),
            Err(ExamValidationError::EmptyDomainCode)
        ));

        let long_code = "A".repeat(65);
        assert!(matches!(
            validate_domain_code(&long_code),
            Err(ExamValidationError::DomainCodeTooLong { .. })
        ));

        assert!(matches!(
            validate_domain_code("lowercase_code"),
            Err(ExamValidationError::InvalidDomainCodeFormat { .. })
        ));
        assert!(matches!(
            validate_domain_code("DOMAIN-CODE"),
            Err(ExamValidationError::InvalidDomainCodeFormat { .. })
        ));
        assert!(matches!(
            validate_domain_code("2_DOMAIN"),
            Err(ExamValidationError::InvalidDomainCodeFormat { .. })
        ));
        assert!(matches!(
            validate_domain_code("DOMAIN CODE"),
            Err(ExamValidationError::InvalidDomainCodeFormat { .. })
        ));
    }

    #[test]
    fn test_max_length_domain_code() {
        let max_code = "A".repeat(64);
        assert!(validate_domain_code(&max_code).is_ok());
    }
}
