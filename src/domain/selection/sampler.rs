//! Uniform random sampling over eligible question pools

use rand::seq::SliceRandom;
use rand::Rng;

/// Draw a uniform random subset of `target` items from `pool`.
///
/// Shuffle-then-truncate over the full pool: the whole pool is fetched
/// upstream precisely so every eligible question has an equal chance of
/// appearing, session after session. Pools are small (hundreds), so the
/// full Fisher-Yates pass is cheap.
pub fn draw<T, R>(mut pool: Vec<T>, target: usize, rng: &mut R) -> Vec<T>
where
    R: Rng + ?Sized,
{
    pool.shuffle(rng);
    pool.truncate(target.min(pool.len()));
    pool
}

/// Shuffle a selection in place.
///
/// Used for the final cross-domain shuffle so one domain's questions never
/// cluster contiguously in the output order.
pub fn shuffle<T, R>(items: &mut [T], rng: &mut R)
where
    R: Rng + ?Sized,
{
    items.shuffle(rng);
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn test_draw_respects_target() {
        let mut rng = StdRng::seed_from_u64(7);
        let pool: Vec<u32> = (0..50).collect();

        let drawn = draw(pool, 10, &mut rng);
        assert_eq!(drawn.len(), 10);
    }

    #[test]
    fn test_draw_caps_at_pool_size() {
        let mut rng = StdRng::seed_from_u64(7);
        let pool: Vec<u32> = (0..3).collect();

        let drawn = draw(pool, 10, &mut rng);
        assert_eq!(drawn.len(), 3);
    }

    #[test]
    fn test_draw_returns_subset_without_duplicates() {
        let mut rng = StdRng::seed_from_u64(42);
        let pool: Vec<u32> = (0..100).collect();

        let drawn = draw(pool, 25, &mut rng);
        let unique: HashSet<u32> = drawn.iter().copied().collect();

        assert_eq!(unique.len(), 25);
        assert!(drawn.iter().all(|v| *v < 100));
    }

    #[test]
    fn test_draw_from_empty_pool() {
        let mut rng = StdRng::seed_from_u64(1);
        let drawn: Vec<u32> = draw(Vec::new(), 5, &mut rng);
        assert!(drawn.is_empty());
    }

    #[test]
    fn test_draws_vary_across_calls() {
        // Statistical, not exact: 20 draws of 10 from 100 all coming out
        // identical would mean the sampler is not actually randomizing
        let pool: Vec<u32> = (0..100).collect();
        let mut rng = StdRng::seed_from_u64(99);

        let distinct: HashSet<Vec<u32>> = (0..20)
            .map(|_| draw(pool.clone(), 10, &mut rng))
            .collect();

        assert!(distinct.len() > 1);
    }

    #[test]
    fn test_shuffle_preserves_elements() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut items: Vec<u32> = (0..30).collect();

        shuffle(&mut items, &mut rng);

        let mut sorted = items.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..30).collect::<Vec<u32>>());
    }
}
