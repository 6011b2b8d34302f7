//! Footprint-based huge-page migration predictor.
//!
//! This crate decides whether an address currently lives in the fast tier of a
//! two-tier (fast/slow) memory system and when a huge page should be migrated
//! into it. It is organised as follows:
//! 1. **Common:** Address decomposition, constants, error types, and the seedable random source.
//! 2. **Units:** The set-associative footprint table, the fully-associative residency
//!    table, and the nMRU/CLOCK replacement policies behind them.
//! 3. **Predictor:** Query orchestration and the two migration drivers (footprint, hot/cold).
//! 4. **Simulation:** Trace replay and the canonical synthetic workloads.
//! 5. **Configuration and statistics:** Validated geometry and observational counters.

/// Common types and constants (address codec, errors, random source).
pub mod common;
/// Predictor configuration (required parameters, defaults, geometry validation).
pub mod config;
/// Top-level predictor and migration drivers.
pub mod predictor;
/// Trace replay and synthetic workloads.
pub mod sim;
/// Predictor statistics collection and reporting.
pub mod stats;
/// Hardware-style tables (footprint, residency) and their replacement policies.
pub mod units;

/// Predictor configuration; build with `PredictorConfig::new` or deserialize from JSON.
pub use crate::config::{MigrationPolicy, PredictorConfig};
/// Main predictor type; owns both tables, the migration driver, and stats.
pub use crate::predictor::FootprintPredictor;
