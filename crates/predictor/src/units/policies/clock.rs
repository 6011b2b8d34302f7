//! CLOCK (Second-Chance) Replacement Policy.
//!
//! Each slot carries one reference bit, set whenever the slot is hit. To find
//! a victim, a hand sweeps the slots: a set bit is cleared and the slot is
//! skipped, the first clear bit is evicted and the hand moves past it.
//!
//! # Performance
//!
//! - **Time Complexity:**
//!   - `update()`: O(1)
//!   - `get_victim()`: O(N) worst case, bounded by two sweeps
//! - **Space Complexity:** O(N) bits plus one hand index

use super::ReplacementPolicy;

/// CLOCK Policy state.
#[derive(Debug, Clone)]
pub struct ClockPolicy {
    /// Reference ("recently used") bit per slot.
    referenced: Vec<bool>,
    /// Next slot the hand inspects.
    hand: usize,
}

impl ClockPolicy {
    /// Creates a new CLOCK policy over `slots` slots, all bits clear and the hand at 0.
    pub fn new(slots: usize) -> Self {
        Self {
            referenced: vec![false; slots],
            hand: 0,
        }
    }

    /// Current hand position.
    pub const fn hand(&self) -> usize {
        self.hand
    }

    /// Whether `slot` has its reference bit set.
    pub fn is_referenced(&self, slot: usize) -> bool {
        self.referenced.get(slot).copied().unwrap_or(false)
    }

    fn advance(&mut self) {
        self.hand = (self.hand + 1) % self.referenced.len();
    }
}

impl ReplacementPolicy for ClockPolicy {
    /// Sets the reference bit of the hit slot.
    fn update(&mut self, _set: usize, way: usize) {
        self.referenced[way] = true;
    }

    /// Newly installed slots start without a second chance.
    fn fill(&mut self, _set: usize, way: usize) {
        self.referenced[way] = false;
    }

    /// Sweeps from the hand, clearing set bits, until a clear bit is found.
    ///
    /// # Panics
    ///
    /// The first sweep clears every bit it passes, so the second sweep always
    /// stops on its first slot. Running past two sweeps is an invariant
    /// violation and panics. An empty table also panics; capacity is validated
    /// to be at least one slot at construction.
    fn get_victim(&mut self, _set: usize) -> usize {
        for _ in 0..2 * self.referenced.len() {
            let slot = self.hand;
            self.advance();
            if self.referenced[slot] {
                self.referenced[slot] = false;
            } else {
                return slot;
            }
        }
        unreachable!("CLOCK found no victim within two sweeps of {} slots", self.referenced.len());
    }
}
