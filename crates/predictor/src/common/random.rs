//! Seedable Random Source.
//!
//! Eviction tie-breaks in the footprint table need uniform sampling over a
//! small range of ways. Each predictor owns its own generator so that runs are
//! reproducible and independent instances never interfere with each other.

use rand::distributions::uniform::SampleUniform;
use rand::distributions::{Distribution, Standard};
use rand::{Rng, SeedableRng};
use rand_xorshift::XorShiftRng;

use super::constants::DEFAULT_SEED;

/// Owned uniform random source.
#[derive(Clone, Debug)]
pub struct RandomSource {
    seed: u64,
    rng: XorShiftRng,
}

impl Default for RandomSource {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomSource {
    /// Creates a source seeded with the default seed (5489).
    pub fn new() -> Self {
        Self::with_seed(DEFAULT_SEED)
    }

    /// Creates a source with an explicit seed.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed,
            rng: XorShiftRng::seed_from_u64(seed),
        }
    }

    /// Restarts the sequence from `seed`.
    pub fn reseed(&mut self, seed: u64) {
        *self = Self::with_seed(seed);
    }

    /// Returns the seed this sequence started from.
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Samples the whole range of `T` for integers, `[0, 1)` for floats.
    pub fn random<T>(&mut self) -> T
    where
        Standard: Distribution<T>,
    {
        self.rng.r#gen()
    }

    /// Samples uniformly from `[min, max]` (both inclusive).
    ///
    /// # Panics
    ///
    /// Panics if `min > max`; callers pass ranges derived from validated geometry.
    pub fn random_range<T>(&mut self, min: T, max: T) -> T
    where
        T: SampleUniform + PartialOrd,
    {
        self.rng.gen_range(min..=max)
    }
}
