//! Target allocation - distributing a question budget across domains
//!
//! Two allocation strategies share one invariant contract: no domain's
//! target ever exceeds its availability, and targets sum to
//! min(requested total, total availability across the requested domains).

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::domain::blueprint::Blueprint;
use crate::domain::exam::DomainCode;
use crate::domain::selection::DomainInventory;

/// Integer question targets per domain for one allocation request
#[derive(Debug, Clone, Default)]
pub struct DomainTargets {
    targets: HashMap<DomainCode, usize>,
}

impl DomainTargets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Target for a domain, zero if the domain was never allocated
    pub fn get(&self, code: &DomainCode) -> usize {
        self.targets.get(code).copied().unwrap_or(0)
    }

    /// Sum of all targets
    pub fn total(&self) -> usize {
        self.targets.values().sum()
    }

    fn set(&mut self, code: DomainCode, target: usize) {
        self.targets.insert(code, target);
    }

    fn award(&mut self, code: &DomainCode) {
        *self.targets.entry(code.clone()).or_insert(0) += 1;
    }

    fn reduce(&mut self, code: &DomainCode) {
        if let Some(target) = self.targets.get_mut(code) {
            *target = target.saturating_sub(1);
        }
    }
}

/// Compute domain targets from blueprint weights using the largest-remainder
/// method.
///
/// Each domain starts at floor(weight x total), capped by availability.
/// Leftover units go first to the domains with the largest fractional
/// remainder that still have spare capacity, then (when a single remainder
/// round cannot place everything) to spare-capacity domains ordered by spare
/// capacity descending and blueprint weight descending, one unit per domain
/// per round until the request is filled or capacity is exhausted.
pub fn blueprint_targets(
    total_questions: usize,
    blueprint: &Blueprint,
    inventory: &DomainInventory,
) -> DomainTargets {
    let mut targets = DomainTargets::new();
    let mut remainders: Vec<(DomainCode, f64)> = Vec::new();
    let mut total_allocated = 0usize;

    for entry in blueprint.entries() {
        let raw = entry.weight * total_questions as f64;
        let floor = raw.floor() as usize;
        let remainder = raw - raw.floor();

        let available = inventory.available(&entry.domain_code);
        let capped = floor.min(available);

        targets.set(entry.domain_code.clone(), capped);
        total_allocated += capped;

        if remainder > 0.0 && capped < available {
            remainders.push((entry.domain_code.clone(), remainder));
        }
    }

    // Weights may sum slightly above 1.0, so floors alone can overshoot the
    // request. Trim by ascending fractional remainder until the sum fits.
    if total_allocated > total_questions {
        let mut ascending: Vec<(DomainCode, f64)> = blueprint
            .entries()
            .iter()
            .map(|e| {
                let raw = e.weight * total_questions as f64;
                (e.domain_code.clone(), raw - raw.floor())
            })
            .collect();
        ascending.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(Ordering::Equal));

        'trim: while total_allocated > total_questions {
            let before = total_allocated;
            for (code, _) in &ascending {
                if total_allocated == total_questions {
                    break 'trim;
                }
                if targets.get(code) > 0 {
                    targets.reduce(code);
                    total_allocated -= 1;
                }
            }
            if total_allocated == before {
                break;
            }
        }
    }

    let mut remaining = total_questions.saturating_sub(total_allocated);
    if remaining == 0 {
        return targets;
    }

    // Largest remainder first: the domains most under-allocated by flooring
    remainders.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));

    for (code, _) in &remainders {
        if remaining == 0 {
            break;
        }
        if targets.get(code) < inventory.available(code) {
            targets.award(code);
            remaining -= 1;
        }
    }

    // Fallback for the pathological case where remainder distribution could
    // not place everything: award by spare capacity, then weight.
    while remaining > 0 {
        let mut spare: Vec<(DomainCode, usize)> = blueprint
            .entries()
            .iter()
            .map(|e| {
                let capacity = inventory
                    .available(&e.domain_code)
                    .saturating_sub(targets.get(&e.domain_code));
                (e.domain_code.clone(), capacity)
            })
            .filter(|(_, capacity)| *capacity > 0)
            .collect();

        if spare.is_empty() {
            break;
        }

        spare.sort_by(|a, b| {
            b.1.cmp(&a.1).then_with(|| {
                blueprint
                    .weight_for(&b.0)
                    .partial_cmp(&blueprint.weight_for(&a.0))
                    .unwrap_or(Ordering::Equal)
            })
        });

        for (code, _) in spare {
            if remaining == 0 {
                break;
            }
            targets.award(&code);
            remaining -= 1;
        }
    }

    targets
}

/// Distribute a question budget evenly across an explicit domain list.
///
/// Every domain gets floor(total / n) capped by availability; the modulo
/// remainder is distributed round-robin from index 0, skipping domains at
/// full availability, bounded at 2n iterations. Any residue (including
/// shortfall from capacity-capped base allocations) goes to spare-capacity
/// domains, largest spare first, one unit per domain per round.
pub fn even_split_targets(
    total_questions: usize,
    domain_codes: &[DomainCode],
    inventory: &DomainInventory,
) -> DomainTargets {
    let mut targets = DomainTargets::new();

    if domain_codes.is_empty() {
        return targets;
    }

    let base_per_domain = total_questions / domain_codes.len();
    let remainder = total_questions % domain_codes.len();

    for code in domain_codes {
        targets.set(code.clone(), base_per_domain.min(inventory.available(code)));
    }

    let mut remaining_slots = remainder;
    let mut index = 0;

    while remaining_slots > 0 && index < domain_codes.len() * 2 {
        let code = &domain_codes[index % domain_codes.len()];

        if targets.get(code) < inventory.available(code) {
            targets.award(code);
            remaining_slots -= 1;
        }

        index += 1;
    }

    let mut remaining = total_questions.saturating_sub(targets.total());

    while remaining > 0 {
        let mut spare: Vec<(DomainCode, usize)> = domain_codes
            .iter()
            .map(|code| {
                let capacity = inventory.available(code).saturating_sub(targets.get(code));
                (code.clone(), capacity)
            })
            .filter(|(_, capacity)| *capacity > 0)
            .collect();

        if spare.is_empty() {
            break;
        }

        spare.sort_by(|a, b| b.1.cmp(&a.1));

        for (code, _) in spare {
            if remaining == 0 {
                break;
            }
            targets.award(&code);
            remaining -= 1;
        }
    }

    targets
}
