//! Exam blueprint - target domain weighting

use serde::{Deserialize, Serialize};

use crate::domain::exam::{DomainCode, Exam};
use crate::domain::DomainError;

/// Allowed deviation of the weight sum from 1.0
pub const WEIGHT_SUM_TOLERANCE: f64 = 0.05;

/// One blueprint entry: a domain and its share of the exam
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlueprintEntry {
    pub domain_code: DomainCode,
    pub display_name: String,
    /// Weight (0-1) approximating this domain's official blueprint percentage
    pub weight: f64,
}

impl BlueprintEntry {
    pub fn new(domain_code: DomainCode, display_name: impl Into<String>, weight: f64) -> Self {
        Self {
            domain_code,
            display_name: display_name.into(),
            weight,
        }
    }
}

/// The target proportional weighting of exam domains
///
/// Static per-exam configuration, loaded once at process start and passed
/// explicitly into the allocator to keep the allocation math pure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Blueprint {
    exam: Exam,
    entries: Vec<BlueprintEntry>,
}

impl Blueprint {
    pub fn new(exam: Exam, entries: Vec<BlueprintEntry>) -> Self {
        Self { exam, entries }
    }

    /// The official PMLE domain weighting
    pub fn pmle() -> Self {
        let entry = |code: &str, name: &str, weight: f64| {
            BlueprintEntry::new(
                DomainCode::new(code).expect("static blueprint code"),
                name,
                weight,
            )
        };

        Self::new(
            Exam::Pmle,
            vec![
                entry(
                    "ARCHITECTING_LOW_CODE_ML_SOLUTIONS",
                    "Architecting Low-Code ML Solutions",
                    0.125,
                ),
                entry(
                    "COLLABORATING_TO_MANAGE_DATA_AND_MODELS",
                    "Collaborating to Manage Data & Models",
                    0.155,
                ),
                entry(
                    "SCALING_PROTOTYPES_INTO_ML_MODELS",
                    "Scaling Prototypes into ML Models",
                    0.18,
                ),
                entry(
                    "SERVING_AND_SCALING_MODELS",
                    "Serving & Scaling Models",
                    0.195,
                ),
                entry(
                    "AUTOMATING_AND_ORCHESTRATING_ML_PIPELINES",
                    "Automating & Orchestrating ML Pipelines",
                    0.215,
                ),
                entry(
                    "MONITORING_ML_SOLUTIONS",
                    "Monitoring ML Solutions",
                    0.135,
                ),
            ],
        )
    }

    pub fn exam(&self) -> Exam {
        self.exam
    }

    pub fn entries(&self) -> &[BlueprintEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Weight for a domain, zero when the domain is not in the blueprint
    pub fn weight_for(&self, code: &DomainCode) -> f64 {
        self.entries
            .iter()
            .find(|e| &e.domain_code == code)
            .map(|e| e.weight)
            .unwrap_or(0.0)
    }

    /// Validate that weights are non-negative and sum to 1.0 within tolerance
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.entries.is_empty() {
            return Err(DomainError::configuration(format!(
                "Blueprint for exam '{}' has no domains",
                self.exam
            )));
        }

        if let Some(entry) = self.entries.iter().find(|e| e.weight < 0.0) {
            return Err(DomainError::configuration(format!(
                "Blueprint weight for domain '{}' is negative: {}",
                entry.domain_code, entry.weight
            )));
        }

        let total: f64 = self.entries.iter().map(|e| e.weight).sum();
        if (total - 1.0).abs() >= WEIGHT_SUM_TOLERANCE {
            return Err(DomainError::configuration(format!(
                "Blueprint weights for exam '{}' sum to {:.3}, expected 1.0 +/- {}",
                self.exam, total, WEIGHT_SUM_TOLERANCE
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code(value: &str) -> DomainCode {
        DomainCode::new(value).unwrap()
    }

    #[test]
    fn test_pmle_blueprint_is_valid() {
        let blueprint = Blueprint::pmle();
        assert!(blueprint.validate().is_ok());
        assert_eq!(blueprint.len(), 6);
        assert_eq!(blueprint.exam(), Exam::Pmle);
    }

    #[test]
    fn test_pmle_weights() {
        let blueprint = Blueprint::pmle();
        assert_eq!(
            blueprint.weight_for(&code("AUTOMATING_AND_ORCHESTRATING_ML_PIPELINES")),
            0.215
        );
        assert_eq!(blueprint.weight_for(&code("MONITORING_ML_SOLUTIONS")), 0.135);
        assert_eq!(blueprint.weight_for(&code("NOT_IN_BLUEPRINT")), 0.0);
    }

    #[test]
    fn test_validate_rejects_bad_weight_sum() {
        let blueprint = Blueprint::new(
            Exam::Pmle,
            vec![
                BlueprintEntry::new(code("FIRST_DOMAIN"), "First", 0.5),
                BlueprintEntry::new(code("SECOND_DOMAIN"), "Second", 0.3),
            ],
        );

        let result = blueprint.validate();
        assert!(matches!(result, Err(DomainError::Configuration { .. })));
    }

    #[test]
    fn test_validate_rejects_negative_weight() {
        let blueprint = Blueprint::new(
            Exam::Pmle,
            vec![
                BlueprintEntry::new(code("FIRST_DOMAIN"), "First", 1.2),
                BlueprintEntry::new(code("SECOND_DOMAIN"), "Second", -0.2),
            ],
        );

        assert!(blueprint.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_empty_blueprint() {
        let blueprint = Blueprint::new(Exam::Pmle, vec![]);
        assert!(blueprint.validate().is_err());
    }

    #[test]
    fn test_validate_accepts_within_tolerance() {
        let blueprint = Blueprint::new(
            Exam::Pmle,
            vec![
                BlueprintEntry::new(code("FIRST_DOMAIN"), "First", 0.52),
                BlueprintEntry::new(code("SECOND_DOMAIN"), "Second", 0.50),
            ],
        );

        assert!(blueprint.validate().is_ok());
    }
}
