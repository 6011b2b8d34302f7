//! Not-Most-Recently-Used (nMRU) Replacement Policy.
//!
//! The owning table keeps each set ordered with the most recently used entry
//! in way 0. This policy therefore needs no per-way state: it picks a victim
//! uniformly among ways `1..ways`, never the MRU slot. A direct-mapped table
//! has no choice and always returns way 0.

use super::ReplacementPolicy;
use crate::common::RandomSource;

/// nMRU Policy state.
#[derive(Debug)]
pub struct NmruPolicy {
    /// Number of ways per set.
    ways: usize,
    /// Source for the uniform victim draw.
    rng: RandomSource,
}

impl NmruPolicy {
    /// Creates a new nMRU policy instance.
    ///
    /// # Arguments
    ///
    /// * `ways` - The associativity of the table (at least 1).
    /// * `rng` - Owned random source for victim selection.
    pub const fn new(ways: usize, rng: RandomSource) -> Self {
        Self { ways, rng }
    }
}

impl ReplacementPolicy for NmruPolicy {
    /// Recency lives in the table's way ordering; nothing to record here.
    fn update(&mut self, _set: usize, _way: usize) {}

    fn get_victim(&mut self, _set: usize) -> usize {
        if self.ways <= 1 {
            0
        } else {
            self.rng.random_range(1, self.ways - 1)
        }
    }
}
