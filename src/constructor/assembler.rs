//! Quota-based random plate assembly.

use std::collections::HashSet;

use super::dataset::ConstructorDataset;
use crate::config::FAVORITE_SHARE;
use crate::model::Plate;
use crate::random::{shuffle, RandomSource};

/// Number of favorite-category cheeses aimed for on a plate of `cheese_count`.
pub fn favorite_target(cheese_count: usize) -> usize {
    let share = (cheese_count as f64 * FAVORITE_SHARE).round() as usize;
    share.min(cheese_count).max(1)
}

/// Split `remaining` slots between groups by weight (largest remainder).
///
/// Negative weights count as zero. If every weight is zero the split is
/// uniform. The counts always sum to `remaining` when `weights` is non-empty;
/// ties on the fractional part go to the earlier group.
pub fn apportion(remaining: usize, weights: &[f64]) -> Vec<usize> {
    if weights.is_empty() {
        return Vec::new();
    }

    let mut weights: Vec<f64> = weights.iter().map(|w| w.max(0.0)).collect();
    let mut sum: f64 = weights.iter().sum();
    if sum <= 0.0 {
        weights = vec![1.0; weights.len()];
        sum = weights.len() as f64;
    }

    let raw: Vec<f64> = weights.iter().map(|w| remaining as f64 * w / sum).collect();
    let mut counts: Vec<usize> = raw.iter().map(|x| x.floor() as usize).collect();
    let assigned: usize = counts.iter().sum();
    let mut left = remaining.saturating_sub(assigned);

    if left > 0 {
        let mut order: Vec<usize> = (0..raw.len()).collect();
        // stable: equal fractions keep group order
        order.sort_by(|&a, &b| {
            let fa = raw[a] - counts[a] as f64;
            let fb = raw[b] - counts[b] as f64;
            fb.total_cmp(&fa)
        });
        for idx in order {
            if left == 0 {
                break;
            }
            counts[idx] += 1;
            left -= 1;
        }
    }

    counts
}

/// Running selection: pick order plus a membership set.
struct Picks {
    order: Vec<usize>,
    used: HashSet<usize>,
}

impl Picks {
    fn new() -> Self {
        Self {
            order: Vec::new(),
            used: HashSet::new(),
        }
    }

    fn len(&self) -> usize {
        self.order.len()
    }

    fn contains(&self, idx: usize) -> bool {
        self.used.contains(&idx)
    }

    /// Shuffle `pool` and take up to `count` unpicked entries.
    fn take_random<R: RandomSource + ?Sized>(
        &mut self,
        pool: &[usize],
        count: usize,
        rng: &mut R,
    ) {
        let available: Vec<usize> = pool
            .iter()
            .copied()
            .filter(|i| !self.contains(*i))
            .collect();
        if available.is_empty() || count == 0 {
            return;
        }
        for idx in shuffle(&available, rng).into_iter().take(count) {
            self.used.insert(idx);
            self.order.push(idx);
        }
    }
}

/// Assemble one random plate of up to `cheese_count` distinct cheeses.
///
/// Favorite-category cheeses are picked first, then the remaining slots are
/// split between groups by weight, then any shortfall is topped up from the
/// whole dataset. Returns `None` when nothing could be picked.
pub fn build_random_plate<R: RandomSource + ?Sized>(
    dataset: &ConstructorDataset,
    cheese_count: usize,
    favorite_category_id: Option<&str>,
    rng: &mut R,
) -> Option<Plate> {
    if dataset.is_empty() {
        return None;
    }

    let mut picks = Picks::new();

    // Favorite category
    if let Some(category_id) = favorite_category_id {
        let pool = dataset.candidates_in_category(category_id);
        if !pool.is_empty() {
            picks.take_random(pool, favorite_target(cheese_count), rng);
        }
    }

    // Group quotas
    let remaining = cheese_count.saturating_sub(picks.len());
    if remaining > 0 {
        let active: Vec<_> = dataset
            .groups()
            .iter()
            .filter(|g| g.candidates.iter().any(|&i| !picks.contains(i)))
            .collect();

        if !active.is_empty() {
            let weights: Vec<f64> = active.iter().map(|g| g.base_percent).collect();
            let quotas = apportion(remaining, &weights);
            tracing::trace!("Group quotas for {} slot(s): {:?}", remaining, quotas);

            for (group, quota) in active.iter().zip(quotas) {
                // a short pool loses the rest of its quota
                picks.take_random(&group.candidates, quota, rng);
            }
        }
    }

    // Top-up from everything left
    let short = cheese_count.saturating_sub(picks.len());
    if short > 0 {
        let all: Vec<usize> = (0..dataset.candidates().len()).collect();
        picks.take_random(&all, short, rng);
    }

    if picks.order.is_empty() {
        return None;
    }

    let items = picks
        .order
        .iter()
        .map(|&idx| dataset.candidate(idx).to_item())
        .collect();
    Some(Plate::new(items))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Catalog, Category, Product, ProductGroup};
    use crate::random::{SeededRandom, SequenceRandom};
    use pretty_assertions::assert_eq;

    fn dataset(groups: Vec<ProductGroup>, products: Vec<Product>) -> ConstructorDataset {
        let catalog = Catalog {
            categories: vec![
                Category::new("hard", "Hard"),
                Category::new("soft", "Soft"),
                Category::new("blue", "Blue").mold(),
            ],
            products,
            groups,
        };
        crate::constructor::load_dataset(&catalog, false).unwrap()
    }

    fn products(prefix: &str, category: &str, n: usize, price: i64) -> Vec<Product> {
        (0..n)
            .map(|i| {
                let id = format!("{}{}", prefix, i);
                Product::new(id.clone(), id, category, price)
            })
            .collect()
    }

    fn ids(products: &[Product]) -> Vec<String> {
        products.iter().map(|p| p.id.clone()).collect()
    }

    fn three_groups() -> ConstructorDataset {
        let hard = products("h", "hard", 10, 900);
        let soft = products("s", "soft", 5, 1200);
        let blue = products("b", "blue", 4, 2000);
        let groups = vec![
            ProductGroup::new("g_hard", "A Hard", 50.0).with_products(ids(&hard)),
            ProductGroup::new("g_soft", "B Soft", 30.0).with_products(ids(&soft)),
            ProductGroup::new("g_blue", "C Blue", 20.0).with_products(ids(&blue)),
        ];
        dataset(groups, [hard, soft, blue].concat())
    }

    // ==================== apportion tests ====================

    #[test]
    fn test_apportion_largest_remainder() {
        assert_eq!(apportion(7, &[60.0, 30.0, 10.0]), vec![4, 2, 1]);
    }

    #[test]
    fn test_apportion_exact() {
        assert_eq!(apportion(5, &[60.0, 40.0]), vec![3, 2]);
    }

    #[test]
    fn test_apportion_tie_keeps_group_order() {
        assert_eq!(apportion(1, &[50.0, 50.0]), vec![1, 0]);
        assert_eq!(apportion(2, &[1.0, 1.0, 1.0]), vec![1, 1, 0]);
    }

    #[test]
    fn test_apportion_zero_weights_uniform() {
        assert_eq!(apportion(4, &[0.0, 0.0, 0.0]), vec![2, 1, 1]);
        assert_eq!(apportion(3, &[-5.0, 0.0]), vec![2, 1]);
    }

    #[test]
    fn test_apportion_sums_to_remaining() {
        let weights = [13.0, 27.0, 5.0, 0.0, 55.0];
        for remaining in 0..=12 {
            let counts = apportion(remaining, &weights);
            assert_eq!(counts.iter().sum::<usize>(), remaining);
            assert_eq!(counts[3], 0);
        }
    }

    #[test]
    fn test_apportion_empty() {
        assert!(apportion(3, &[]).is_empty());
    }

    // ==================== favorite_target tests ====================

    #[test]
    fn test_favorite_target() {
        assert_eq!(favorite_target(3), 2);
        assert_eq!(favorite_target(4), 2);
        assert_eq!(favorite_target(5), 3);
        assert_eq!(favorite_target(6), 4);
        assert_eq!(favorite_target(7), 4);
        assert_eq!(favorite_target(1), 1);
        assert_eq!(favorite_target(0), 1);
    }

    // ==================== build_random_plate tests ====================

    #[test]
    fn test_plate_has_distinct_items() {
        let dataset = three_groups();
        let mut rng = SeededRandom::new(1);
        for count in 3..=7 {
            for _ in 0..50 {
                let plate = build_random_plate(&dataset, count, None, &mut rng).unwrap();
                assert_eq!(plate.len(), count);
                let unique: HashSet<&str> = plate.items().iter().map(|i| i.id.as_str()).collect();
                assert_eq!(unique.len(), count);
            }
        }
    }

    #[test]
    fn test_quota_split_by_group() {
        // 5 slots over weights 50/30/20: 2.5, 1.5, 1.0 -> 2 + 1 + 1, +1 to the first .5
        let dataset = three_groups();
        let mut rng = SeededRandom::new(3);
        let plate = build_random_plate(&dataset, 5, None, &mut rng).unwrap();
        let items = plate.items();
        let count = |prefix: char| items.iter().filter(|i| i.id.starts_with(prefix)).count();
        assert_eq!(count('h'), 3);
        assert_eq!(count('s'), 1);
        assert_eq!(count('b'), 1);
    }

    #[test]
    fn test_deterministic_with_fixed_source() {
        let dataset = three_groups();
        let mut rng = SequenceRandom::zeros();
        let plate = build_random_plate(&dataset, 5, None, &mut rng).unwrap();
        let ids: Vec<&str> = plate.items().iter().map(|i| i.id.as_str()).collect();
        // zeros rotate each pool left by one
        assert_eq!(ids, vec!["h1", "h2", "h3", "s1", "b1"]);
        assert_eq!(plate.approx_total_price(), 3 * 180 + 240 + 400);
    }

    #[test]
    fn test_favorite_category_first() {
        let dataset = three_groups();
        let mut rng = SeededRandom::new(11);
        for _ in 0..50 {
            let plate = build_random_plate(&dataset, 5, Some("soft"), &mut rng).unwrap();
            let leading = &plate.items()[..3];
            assert!(leading.iter().all(|i| i.category_id == "soft"));
            let soft = plate
                .items()
                .iter()
                .filter(|i| i.category_id == "soft")
                .count();
            assert!(soft >= 3);
        }
    }

    #[test]
    fn test_unknown_favorite_ignored() {
        let dataset = three_groups();
        let mut rng = SeededRandom::new(5);
        let plate = build_random_plate(&dataset, 4, Some("nope"), &mut rng).unwrap();
        assert_eq!(plate.len(), 4);
    }

    #[test]
    fn test_short_group_topped_up() {
        // group b wants most slots but has one cheese; top-up fills from anywhere
        let a = products("a", "hard", 6, 900);
        let b = products("b", "soft", 1, 900);
        let groups = vec![
            ProductGroup::new("ga", "A", 10.0).with_products(ids(&a)),
            ProductGroup::new("gb", "B", 90.0).with_products(ids(&b)),
        ];
        let dataset = dataset(groups, [a, b].concat());
        let mut rng = SeededRandom::new(9);
        let plate = build_random_plate(&dataset, 5, None, &mut rng).unwrap();
        assert_eq!(plate.len(), 5);
        assert_eq!(plate.items().iter().filter(|i| i.id == "b0").count(), 1);
    }

    #[test]
    fn test_small_catalog_partial_plate() {
        let a = products("a", "hard", 2, 900);
        let groups = vec![ProductGroup::new("ga", "A", 100.0).with_products(ids(&a))];
        let dataset = dataset(groups, a);
        let mut rng = SeededRandom::new(2);
        let plate = build_random_plate(&dataset, 7, None, &mut rng).unwrap();
        assert_eq!(plate.len(), 2);
    }

    #[test]
    fn test_empty_dataset() {
        let dataset = ConstructorDataset::default();
        let mut rng = SeededRandom::new(0);
        assert!(build_random_plate(&dataset, 5, None, &mut rng).is_none());
    }

    #[test]
    fn test_zero_weights_still_assemble() {
        let a = products("a", "hard", 3, 900);
        let b = products("b", "soft", 3, 900);
        let groups = vec![
            ProductGroup::new("ga", "A", 0.0).with_products(ids(&a)),
            ProductGroup::new("gb", "B", 0.0).with_products(ids(&b)),
        ];
        let dataset = dataset(groups, [a, b].concat());
        let mut rng = SeededRandom::new(4);
        let plate = build_random_plate(&dataset, 4, None, &mut rng).unwrap();
        let from_a = plate
            .items()
            .iter()
            .filter(|i| i.id.starts_with('a'))
            .count();
        assert_eq!(from_a, 2);
        assert_eq!(plate.len(), 4);
    }
}
