//! Selection domain - target allocation, sampling and result manifests
//!
//! The pure pieces of the domain-weighted question allocator: availability
//! snapshots, the two target allocation strategies, uniform sampling, and
//! the distribution manifest returned to callers. Orchestration (fetching,
//! assembly, flow-specific failure policy) lives in the selection service.

pub mod allocator;
mod inventory;
mod manifest;
pub mod sampler;

pub use allocator::{blueprint_targets, even_split_targets, DomainTargets};
pub use inventory::DomainInventory;
pub use manifest::{
    DomainAvailabilityEntry, DomainDistribution, PracticeSelectionResult, SelectionResult,
};

/// Domains whose eligible pool is positive but below this count trigger an
/// advisory warning: the content team should author more questions there.
pub const MIN_POOL_THRESHOLD: usize = 5;
