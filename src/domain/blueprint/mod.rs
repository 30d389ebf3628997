//! Blueprint domain - static per-exam weight tables

mod entity;

use once_cell::sync::Lazy;

pub use entity::{Blueprint, BlueprintEntry, WEIGHT_SUM_TOLERANCE};

/// Process-wide PMLE blueprint, loaded once
///
/// Callers clone this into the selection service at startup; the allocator
/// itself always receives the blueprint as an explicit parameter.
pub static PMLE_BLUEPRINT: Lazy<Blueprint> = Lazy::new(Blueprint::pmle);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_blueprint_matches_constructor() {
        assert_eq!(*PMLE_BLUEPRINT, Blueprint::pmle());
    }
}
