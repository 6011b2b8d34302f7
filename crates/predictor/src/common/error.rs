//! Error definitions.
//!
//! Queries against a constructed predictor cannot fail. Errors only arise at
//! the edges:
//! 1. **Configuration:** A geometry that would make address decomposition ill-defined.
//! 2. **Traces:** Address traces that cannot be read or parsed.

use thiserror::Error;

/// Reasons a [`PredictorConfig`](crate::config::PredictorConfig) is rejected.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The footprint table must hold a non-zero, power-of-two number of entries.
    #[error("footprint table entries must be a non-zero power of two (got {0})")]
    FootprintEntries(usize),

    /// The associativity must be non-zero and divide the entry count.
    #[error("footprint associativity {assoc} must be non-zero and divide {entries} entries")]
    FootprintAssoc {
        /// Configured associativity.
        assoc: usize,
        /// Configured total entries.
        entries: usize,
    },

    /// Huge pages must be a power of two of at least one small page.
    #[error("huge page size must be a power of two of at least 4 KiB (got {0} KiB)")]
    HugePageSize(u64),

    /// Fast memory must hold a whole, non-zero number of huge pages.
    #[error("fast memory size {fast_mem_kb} KiB must be a non-zero multiple of the {huge_page_kb} KiB huge page")]
    FastMemSize {
        /// Configured fast-memory capacity in KiB.
        fast_mem_kb: u64,
        /// Configured huge-page size in KiB.
        huge_page_kb: u64,
    },

    /// The migration threshold is a fraction in `(0, 1]`.
    #[error("migration threshold must be in (0, 1] (got {0})")]
    Threshold(f64),

    /// The hot/cold period must be non-zero.
    #[error("hot/cold period must be non-zero")]
    HotColdPeriod,

    /// Huge-page offset and footprint index do not fit in an address.
    #[error("huge page offset ({huge_page_bits} bits) plus footprint index ({index_bits} bits) exceed 64 address bits")]
    AddressBits {
        /// Huge-page offset width.
        huge_page_bits: u32,
        /// Footprint-table index width.
        index_bits: u32,
    },

    /// A table's storage would exceed the largest possible allocation.
    #[error("{table} table of {slots} slots is too large to allocate")]
    TableTooLarge {
        /// Which table (`"footprint"` or `"residency"`).
        table: &'static str,
        /// Requested slot count.
        slots: u64,
    },

    /// Migration policy name not recognised.
    #[error("unknown migration policy {0:?} (expected \"footprint\" or \"hotcold\")")]
    UnknownPolicy(String),

    /// Malformed JSON configuration.
    #[error("invalid configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Failures while reading an address trace.
#[derive(Debug, Error)]
pub enum TraceError {
    /// Underlying I/O failure.
    #[error("failed to read trace: {0}")]
    Io(#[from] std::io::Error),

    /// A line that is neither blank, a comment, nor an address.
    #[error("line {line}: cannot parse address {text:?}")]
    Parse {
        /// 1-based line number.
        line: usize,
        /// Offending text (trimmed).
        text: String,
    },
}
