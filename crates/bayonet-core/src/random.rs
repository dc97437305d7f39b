//! Injectable random source.
//!
//! Every probabilistic function in the core draws from a `&mut dyn
//! RandomSource` instead of a global generator, so tests can replay exact
//! sequences with [`ScriptedRandom`] and the driver can run seeded
//! [`StdRng`] encounters side by side.

use rand::Rng;
use rand::rngs::StdRng;

/// A source of uniform values in `[0, 1)`.
pub trait RandomSource {
    /// Next uniform value in `[0, 1)`.
    fn next_f64(&mut self) -> f64;

    /// Returns true with probability `p`.
    fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }

    /// Uniform integer in `lo..=hi`. Returns `lo` when the range is empty.
    fn range_inclusive(&mut self, lo: i32, hi: i32) -> i32 {
        if hi <= lo {
            return lo;
        }
        let span = (hi - lo + 1) as f64;
        let offset = (self.next_f64() * span).floor() as i32;
        lo + offset.min(hi - lo)
    }

    /// Uniform index in `0..len`. `len` must be non-zero.
    fn pick(&mut self, len: usize) -> usize {
        debug_assert!(len > 0, "pick from empty range");
        let idx = (self.next_f64() * len as f64).floor() as usize;
        idx.min(len.saturating_sub(1))
    }
}

impl RandomSource for StdRng {
    fn next_f64(&mut self) -> f64 {
        self.random::<f64>()
    }
}

/// Draw from a weighted table. Weights need not sum to one.
///
/// Falls back to the last entry if rounding leaves the draw past the end.
pub fn weighted<T: Copy>(rng: &mut dyn RandomSource, table: &[(T, f64)]) -> T {
    debug_assert!(!table.is_empty(), "weighted draw from empty table");
    let total: f64 = table.iter().map(|(_, w)| w).sum();
    let mut roll = rng.next_f64() * total;
    for (item, weight) in table {
        if roll < *weight {
            return *item;
        }
        roll -= weight;
    }
    table[table.len() - 1].0
}

/// Replays a fixed sequence of draws, cycling when exhausted.
#[derive(Debug, Clone)]
pub struct ScriptedRandom {
    values: Vec<f64>,
    cursor: usize,
}

impl ScriptedRandom {
    /// Create a source that yields `values` in order, then starts over.
    ///
    /// An empty script behaves like a constant `0.0`.
    pub fn new(values: impl Into<Vec<f64>>) -> Self {
        Self {
            values: values.into(),
            cursor: 0,
        }
    }

    /// A source that always returns the same value.
    pub fn constant(value: f64) -> Self {
        Self::new(vec![value])
    }

    /// How many draws have been taken so far.
    pub fn draws(&self) -> usize {
        self.cursor
    }
}

impl RandomSource for ScriptedRandom {
    fn next_f64(&mut self) -> f64 {
        if self.values.is_empty() {
            self.cursor += 1;
            return 0.0;
        }
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        value.clamp(0.0, 1.0 - f64::EPSILON)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn scripted_cycles() {
        let mut rng = ScriptedRandom::new(vec![0.1, 0.9]);
        assert!((rng.next_f64() - 0.1).abs() < f64::EPSILON);
        assert!((rng.next_f64() - 0.9).abs() < f64::EPSILON);
        assert!((rng.next_f64() - 0.1).abs() < f64::EPSILON);
        assert_eq!(rng.draws(), 3);
    }

    #[test]
    fn scripted_one_is_clamped_below_one() {
        let mut rng = ScriptedRandom::constant(1.0);
        assert!(rng.next_f64() < 1.0);
        assert_eq!(rng.range_inclusive(10, 15), 15);
        assert_eq!(rng.pick(4), 3);
    }

    #[test]
    fn range_inclusive_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..500 {
            let v = rng.range_inclusive(25, 35);
            assert!((25..=35).contains(&v));
        }
        assert_eq!(rng.range_inclusive(5, 5), 5);
        assert_eq!(rng.range_inclusive(9, 3), 9);
    }

    #[test]
    fn chance_edges() {
        let mut low = ScriptedRandom::constant(0.0);
        assert!(low.chance(0.01));
        assert!(!low.chance(0.0));
        let mut high = ScriptedRandom::constant(0.99);
        assert!(!high.chance(0.95));
    }

    #[test]
    fn weighted_follows_table() {
        let table = [('a', 0.6), ('b', 0.3), ('c', 0.1)];
        assert_eq!(weighted(&mut ScriptedRandom::constant(0.0), &table), 'a');
        assert_eq!(weighted(&mut ScriptedRandom::constant(0.65), &table), 'b');
        assert_eq!(weighted(&mut ScriptedRandom::constant(0.95), &table), 'c');
    }

    #[test]
    fn weighted_distribution_roughly_matches() {
        let mut rng = StdRng::seed_from_u64(3);
        let table = [(0u8, 0.7), (1u8, 0.3)];
        let hits = (0..2000).filter(|_| weighted(&mut rng, &table) == 0).count();
        assert!((1250..1550).contains(&hits), "got {hits}");
    }
}
