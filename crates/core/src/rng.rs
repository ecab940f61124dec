//! RNG module - seeded randomness for terrain generation
//!
//! Wraps a ChaCha8 stream so every pass draws from one deterministic source:
//! the same seed always yields the same world, on every platform.

use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Deterministic world RNG.
#[derive(Debug, Clone)]
pub struct WorldRng {
    inner: ChaCha8Rng,
}

impl WorldRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Generate next random u64
    pub fn next_u64(&mut self) -> u64 {
        self.inner.next_u64()
    }

    /// Random value in `[lo, hi)`. Returns `lo` when the range is empty.
    pub fn range(&mut self, lo: i32, hi: i32) -> i32 {
        if hi <= lo {
            return lo;
        }
        self.inner.gen_range(lo..hi)
    }

    /// Roll `0..100`.
    pub fn percent(&mut self) -> u32 {
        self.inner.gen_range(0..100)
    }

    /// True with probability `percent / 100`.
    pub fn chance(&mut self, percent: u32) -> bool {
        self.percent() < percent
    }

    /// One of `-1`, `0`, `+1`, uniformly.
    pub fn step(&mut self) -> i32 {
        self.inner.gen_range(-1..=1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rng_deterministic() {
        let mut rng1 = WorldRng::new(12345);
        let mut rng2 = WorldRng::new(12345);

        // Same seed should produce same sequence
        for _ in 0..100 {
            assert_eq!(rng1.next_u64(), rng2.next_u64());
        }
    }

    #[test]
    fn test_rng_different_seeds() {
        let mut rng1 = WorldRng::new(12345);
        let mut rng2 = WorldRng::new(54321);

        assert_ne!(rng1.next_u64(), rng2.next_u64());
    }

    #[test]
    fn test_range_bounds() {
        let mut rng = WorldRng::new(7);
        for _ in 0..1000 {
            let v = rng.range(5, 10);
            assert!((5..10).contains(&v));
        }
    }

    #[test]
    fn test_empty_range_returns_lo() {
        let mut rng = WorldRng::new(7);
        assert_eq!(rng.range(4, 4), 4);
        assert_eq!(rng.range(9, 3), 9);
    }

    #[test]
    fn test_step_covers_all_offsets() {
        let mut rng = WorldRng::new(99);
        let mut seen = [false; 3];
        for _ in 0..300 {
            let s = rng.step();
            assert!((-1..=1).contains(&s));
            seen[(s + 1) as usize] = true;
        }
        assert_eq!(seen, [true, true, true]);
    }

    #[test]
    fn test_chance_extremes() {
        let mut rng = WorldRng::new(3);
        for _ in 0..100 {
            assert!(!rng.chance(0));
            assert!(rng.chance(100));
        }
    }
}
