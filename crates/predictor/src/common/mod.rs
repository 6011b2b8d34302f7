//! Common utilities and types shared by every part of the predictor.
//!
//! This module provides the building blocks the tables and the predictor are
//! assembled from:
//! 1. **Address Codec:** Bit-field extraction of huge-page tags, set indices and sub-page offsets.
//! 2. **Constants:** Page geometry and policy defaults.
//! 3. **Error Handling:** Configuration and trace errors.
//! 4. **Randomness:** An owned, seedable random source for eviction tie-breaks.

/// Address decomposition (tags, indices, offsets).
pub mod addr;

/// Common constants used throughout the predictor.
pub mod constants;

/// Error types.
pub mod error;

/// Seedable uniform random source.
pub mod random;

pub use addr::AddressLayout;
pub use constants::{ADDR_BITS, SMALL_PAGE_SHIFT};
pub use error::{ConfigError, TraceError};
pub use random::RandomSource;
