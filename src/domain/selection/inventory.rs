//! Per-request domain availability snapshot

use std::collections::HashMap;

use crate::domain::exam::{DomainCode, ExamDomain};

/// Transient availability snapshot: eligible question counts per domain plus
/// domain lookups, rebuilt from the content store on every allocation call.
///
/// Domains with zero eligible questions may be absent from the count map;
/// `available()` defaults to zero so callers never special-case that.
#[derive(Debug, Clone, Default)]
pub struct DomainInventory {
    counts: HashMap<DomainCode, usize>,
    domains: HashMap<DomainCode, ExamDomain>,
}

impl DomainInventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a domain lookup entry without touching its count
    pub fn record_domain(&mut self, domain: ExamDomain) {
        self.domains.insert(domain.code.clone(), domain);
    }

    /// Set the eligible count for a domain
    pub fn record_count(&mut self, code: DomainCode, count: usize) {
        self.counts.insert(code, count);
    }

    /// Increment the eligible count for a domain by one
    pub fn increment(&mut self, code: &DomainCode) {
        *self.counts.entry(code.clone()).or_insert(0) += 1;
    }

    /// Eligible question count for a domain, zero if unknown
    pub fn available(&self, code: &DomainCode) -> usize {
        self.counts.get(code).copied().unwrap_or(0)
    }

    /// Total eligible questions across all known domains
    pub fn total_available(&self) -> usize {
        self.counts.values().sum()
    }

    /// Domain lookup by code
    pub fn domain(&self, code: &DomainCode) -> Option<&ExamDomain> {
        self.domains.get(code)
    }

    /// True when no domain metadata was found at all
    pub fn is_empty(&self) -> bool {
        self.domains.is_empty()
    }

    /// Iterate over all known domain lookups
    pub fn domains(&self) -> impl Iterator<Item = &ExamDomain> {
        self.domains.values()
    }

    /// Iterate over (code, count) pairs
    pub fn counts(&self) -> impl Iterator<Item = (&DomainCode, usize)> {
        self.counts.iter().map(|(code, count)| (code, *count))
    }
}
