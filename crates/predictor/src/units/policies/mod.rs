//! Replacement Policies.
//!
//! Implements the victim-selection algorithms used by the predictor tables.
//!
//! # Policies
//!
//! - `Nmru`: not-most-recently-used; a random way other than the MRU slot.
//! - `Clock`: second-chance sweep over one reference bit per slot.

/// CLOCK (second-chance) replacement policy.
pub mod clock;

/// Not-most-recently-used replacement policy.
pub mod nmru;

pub use clock::ClockPolicy;
pub use nmru::NmruPolicy;

/// Victim selection shared by the footprint and residency tables.
///
/// The owning table calls `update` when a lookup hits, `fill` when it installs
/// a new entry, and `get_victim` only when no free slot is left. The
/// fully-associative residency table passes set `0` throughout.
pub trait ReplacementPolicy: Send + Sync {
    /// Records a lookup hit on `way` of `set`.
    fn update(&mut self, set: usize, way: usize);

    /// Records that `way` of `set` now holds a freshly installed entry.
    ///
    /// No-op unless the policy keeps per-slot state.
    fn fill(&mut self, set: usize, way: usize) {
        let _ = (set, way);
    }

    /// Picks the way of a full `set` to overwrite.
    fn get_victim(&mut self, set: usize) -> usize;
}
