//! Selection results and per-domain distribution manifests

use serde::{Deserialize, Serialize};

use crate::domain::exam::DomainCode;
use crate::domain::question::TaggedQuestion;

/// Per-domain accounting for one selection: what was asked for, what the
/// store had, and what was actually drawn
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainDistribution {
    pub domain_code: DomainCode,
    pub target_count: usize,
    pub available_count: usize,
    pub selected_count: usize,
}

impl DomainDistribution {
    pub fn new(
        domain_code: DomainCode,
        target_count: usize,
        available_count: usize,
        selected_count: usize,
    ) -> Self {
        Self {
            domain_code,
            target_count,
            available_count,
            selected_count,
        }
    }

    /// True when the domain delivered its full target
    pub fn is_fulfilled(&self) -> bool {
        self.selected_count == self.target_count
    }
}

/// Result of a blueprint-weighted (diagnostic) selection
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionResult {
    pub questions: Vec<TaggedQuestion>,
    pub domain_distribution: Vec<DomainDistribution>,
}

impl SelectionResult {
    /// Sum of per-domain selected counts; always equals `questions.len()`
    pub fn selected_total(&self) -> usize {
        self.domain_distribution
            .iter()
            .map(|d| d.selected_count)
            .sum()
    }
}

/// One row of the operator-facing availability report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainAvailabilityEntry {
    pub domain_code: DomainCode,
    pub domain_name: String,
    pub available_count: usize,
    /// True when the eligible pool is under the minimum pool threshold
    pub below_threshold: bool,
}

/// Result of an explicit-domain-list (practice) selection
///
/// Practice sessions are allowed to under-deliver, so the requested and
/// selected totals are reported alongside the questions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PracticeSelectionResult {
    pub questions: Vec<TaggedQuestion>,
    pub domain_distribution: Vec<DomainDistribution>,
    pub total_requested: usize,
    pub total_selected: usize,
}
