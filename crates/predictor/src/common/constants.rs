//! Global Constants.
//!
//! This module defines the fixed geometry and policy defaults used across the
//! predictor. It includes:
//! 1. **Address Constants:** Address width and the small (4 KiB) page shift.
//! 2. **Unit Constants:** KiB-to-byte shift used to derive huge-page bit widths.
//! 3. **Policy Constants:** Default hot/cold period and random seed.

/// Width of an address in bits.
pub const ADDR_BITS: u32 = u64::BITS;

/// Number of bits to shift to convert between bytes and small pages (4 KiB).
pub const SMALL_PAGE_SHIFT: u32 = 12;

/// Small page size in bytes (4 KiB).
pub const SMALL_PAGE_SIZE: u64 = 1 << SMALL_PAGE_SHIFT;

/// Smallest legal huge page, in KiB (one small page).
pub const MIN_HUGE_PAGE_KB: u64 = SMALL_PAGE_SIZE >> KB_SHIFT;

/// Number of bits to shift to convert between KiB and bytes.
pub const KB_SHIFT: u32 = 10;

/// Queries between forced migrations under the hot/cold policy.
pub const DEFAULT_HOTCOLD_PERIOD: u64 = 10_000;

/// Seed used when none is configured.
pub const DEFAULT_SEED: u64 = 5489;
