//! Injectable random sources used by the constructor.

use rand::rngs::{StdRng, ThreadRng};
use rand::{Rng, SeedableRng};

/// Source of uniform floats in `[0, 1)`.
pub trait RandomSource {
    /// Next uniform float in `[0, 1)`.
    fn next_unit(&mut self) -> f64;

    /// Uniform index in `[0, bound)`. `bound` must be positive.
    fn next_index(&mut self, bound: usize) -> usize {
        let idx = (self.next_unit() * bound as f64).floor() as usize;
        idx.min(bound - 1)
    }

    /// Fair coin.
    fn coin_flip(&mut self) -> bool {
        self.next_unit() < 0.5
    }
}

/// Return a uniformly permuted copy of `items` (Fisher-Yates).
pub fn shuffle<T: Clone, R: RandomSource + ?Sized>(items: &[T], rng: &mut R) -> Vec<T> {
    let mut out = items.to_vec();
    for i in (1..out.len()).rev() {
        let j = rng.next_index(i + 1);
        out.swap(i, j);
    }
    out
}

/// Thread-local, non-deterministic generator.
pub struct ThreadRandom(ThreadRng);

impl ThreadRandom {
    pub fn new() -> Self {
        Self(rand::thread_rng())
    }
}

impl Default for ThreadRandom {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomSource for ThreadRandom {
    fn next_unit(&mut self) -> f64 {
        self.0.gen::<f64>()
    }
}

/// Seeded generator for reproducible runs.
pub struct SeededRandom(StdRng);

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }
}

impl RandomSource for SeededRandom {
    fn next_unit(&mut self) -> f64 {
        self.0.gen::<f64>()
    }
}

/// Replays a fixed list of values, cycling when exhausted.
///
/// Values are clamped into `[0, 1)`. An empty list always yields `0.0`.
#[derive(Debug, Clone)]
pub struct SequenceRandom {
    values: Vec<f64>,
    pos: usize,
}

impl SequenceRandom {
    pub fn new(values: Vec<f64>) -> Self {
        let values = values
            .into_iter()
            .map(|v| v.clamp(0.0, 1.0 - f64::EPSILON))
            .collect();
        Self { values, pos: 0 }
    }

    /// A source that always returns `0.0`.
    pub fn zeros() -> Self {
        Self::new(Vec::new())
    }
}

impl RandomSource for SequenceRandom {
    fn next_unit(&mut self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        let v = self.values[self.pos % self.values.len()];
        self.pos += 1;
        v
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shuffle_is_permutation() {
        let mut rng = SeededRandom::new(7);
        let items: Vec<u32> = (0..20).collect();
        let mut shuffled = shuffle(&items, &mut rng);
        assert_eq!(shuffled.len(), items.len());
        shuffled.sort_unstable();
        assert_eq!(shuffled, items);
    }

    #[test]
    fn test_shuffle_with_zeros() {
        // j is always 0: each step swaps position i with the head
        let mut rng = SequenceRandom::zeros();
        let shuffled = shuffle(&[1, 2, 3, 4], &mut rng);
        assert_eq!(shuffled, vec![2, 3, 4, 1]);
    }

    #[test]
    fn test_shuffle_identity_near_one() {
        // j is always i: nothing moves
        let mut rng = SequenceRandom::new(vec![0.999]);
        let shuffled = shuffle(&[1, 2, 3, 4], &mut rng);
        assert_eq!(shuffled, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_shuffle_empty_and_single() {
        let mut rng = SequenceRandom::zeros();
        assert!(shuffle::<u8, _>(&[], &mut rng).is_empty());
        assert_eq!(shuffle(&["a"], &mut rng), vec!["a"]);
    }

    #[test]
    fn test_next_index_in_range() {
        let mut rng = SequenceRandom::new(vec![1.0, 0.5, 0.0]);
        assert_eq!(rng.next_index(3), 2);
        assert_eq!(rng.next_index(3), 1);
        assert_eq!(rng.next_index(3), 0);
    }

    #[test]
    fn test_seeded_is_reproducible() {
        let mut a = SeededRandom::new(42);
        let mut b = SeededRandom::new(42);
        for _ in 0..10 {
            assert_eq!(a.next_unit(), b.next_unit());
        }
    }
}
