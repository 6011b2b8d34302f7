//! Predictor tables and their replacement policies.
//!
//! This module contains the two hardware-style structures the predictor is
//! built from: the set-associative footprint table that counts touched
//! sub-pages per huge page, and the fully-associative residency table that
//! records which huge pages occupy fast memory.

/// Set-associative footprint-tracking table with nMRU replacement.
pub mod footprint;

/// Victim-selection policies (nMRU, CLOCK).
pub mod policies;

/// Fully-associative fast-memory residency table with CLOCK eviction.
pub mod residency;

pub use footprint::{FootprintEntry, FootprintOutcome, FootprintTable};
pub use residency::{MigrationRecord, ResidencyTable};
