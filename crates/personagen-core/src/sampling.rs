//! Shared sampling helpers used by every domain generator.
//!
//! Weighted selection is cumulative-weight comparison with first match
//! winning; ties resolve to stable input order.

use rand::Rng;

/// Picks one item from `(item, weight)` pairs proportionally to weight.
///
/// Negative weights count as zero. When all weights are zero the first
/// item wins, so callers never need a fallback branch.
pub fn weighted_choice<'a, T, R: Rng + ?Sized>(
    rng: &mut R,
    items: &'a [(T, f64)],
) -> Option<&'a T> {
    if items.is_empty() {
        return None;
    }
    let total: f64 = items.iter().map(|(_, weight)| weight.max(0.0)).sum();
    if total <= 0.0 {
        return items.first().map(|(item, _)| item);
    }
    let draw = rng.random_range(0.0..total);
    let mut cumulative = 0.0;
    for (item, weight) in items {
        cumulative += weight.max(0.0);
        if draw < cumulative {
            return Some(item);
        }
    }
    items.last().map(|(item, _)| item)
}

/// Uniform pick from a slice.
pub fn pick<'a, T, R: Rng + ?Sized>(rng: &mut R, items: &'a [T]) -> Option<&'a T> {
    if items.is_empty() {
        None
    } else {
        Some(&items[rng.random_range(0..items.len())])
    }
}

/// Samples up to `count` distinct items, preserving input order.
pub fn sample_distinct<'a, T, R: Rng + ?Sized>(
    rng: &mut R,
    items: &'a [T],
    count: usize,
) -> Vec<&'a T> {
    let count = count.min(items.len());
    let mut indexes: Vec<usize> = (0..items.len()).collect();
    // Partial Fisher-Yates: only the first `count` positions matter.
    for i in 0..count {
        let j = rng.random_range(i..indexes.len());
        indexes.swap(i, j);
    }
    let mut chosen: Vec<usize> = indexes[..count].to_vec();
    chosen.sort_unstable();
    chosen.into_iter().map(|i| &items[i]).collect()
}

/// Clamps an integer score into `[min, max]`.
pub fn clamp_i64(value: i64, min: i64, max: i64) -> i64 {
    value.max(min).min(max)
}

/// Clamps a float into `[min, max]`.
pub fn clamp_f64(value: f64, min: f64, max: f64) -> f64 {
    value.max(min).min(max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn weighted_choice_respects_weights() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let items = [("common", 0.95), ("rare", 0.05)];
        let mut common = 0;
        for _ in 0..1000 {
            if let Some(choice) = weighted_choice(&mut rng, &items) {
                if *choice == "common" {
                    common += 1;
                }
            }
        }
        assert!(common > 850, "expected the heavy item to dominate, got {common}");
    }

    #[test]
    fn weighted_choice_zero_weights_fall_back_to_first() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let items = [("a", 0.0), ("b", 0.0)];
        assert_eq!(weighted_choice(&mut rng, &items), Some(&"a"));
    }

    #[test]
    fn weighted_choice_empty_is_none() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let items: [(&str, f64); 0] = [];
        assert_eq!(weighted_choice(&mut rng, &items), None);
    }

    #[test]
    fn sample_distinct_has_no_repeats() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let items = [1, 2, 3, 4, 5, 6, 7, 8];
        let sampled = sample_distinct(&mut rng, &items, 5);
        assert_eq!(sampled.len(), 5);
        let mut seen = sampled.clone();
        seen.dedup();
        assert_eq!(seen.len(), 5);
    }

    #[test]
    fn sample_distinct_caps_at_len() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let items = [1, 2];
        assert_eq!(sample_distinct(&mut rng, &items, 10).len(), 2);
    }

    #[test]
    fn clamps() {
        assert_eq!(clamp_i64(900, 300, 850), 850);
        assert_eq!(clamp_i64(100, 300, 850), 300);
        assert_eq!(clamp_f64(1.5, 0.0, 1.0), 1.0);
    }
}
