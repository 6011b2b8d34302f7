//! Configuration for the footprint predictor.
//!
//! This module defines the configuration structure and policy enum used to
//! parameterize a predictor. It provides:
//! 1. **Defaults:** Optional parameters (hot/cold period, random seed).
//! 2. **Structures:** The required geometry parameters and the derived [`Geometry`].
//! 3. **Enums:** The closed set of migration policies.
//! 4. **Validation:** Rejection of geometries that would make address decomposition ill-defined.
//!
//! Configuration is supplied via JSON (`PredictorConfig::from_json`) or built
//! directly with `PredictorConfig::new`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::common::constants::{ADDR_BITS, KB_SHIFT, MIN_HUGE_PAGE_KB, SMALL_PAGE_SHIFT};
use crate::common::{AddressLayout, ConfigError};
use crate::units::{footprint, residency};

/// Default configuration constants for the optional parameters.
mod defaults {
    use crate::common::constants;

    /// Queries between forced hot/cold migrations.
    pub const HOTCOLD_PERIOD: u64 = constants::DEFAULT_HOTCOLD_PERIOD;

    /// Seed of the predictor's random source.
    pub const SEED: u64 = constants::DEFAULT_SEED;
}

/// Migration policy, fixed for the lifetime of a predictor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MigrationPolicy {
    /// Migrate a huge page once the fraction of its touched small pages
    /// rises above the threshold.
    #[serde(alias = "Footprint")]
    Footprint,
    /// Every `hotcold_period` queries, migrate the huge page of the most
    /// recently queried address.
    #[serde(alias = "HotCold", alias = "hot_cold")]
    HotCold,
}

impl FromStr for MigrationPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "footprint" | "Footprint" => Ok(Self::Footprint),
            "hotcold" | "HotCold" | "hot_cold" => Ok(Self::HotCold),
            other => Err(ConfigError::UnknownPolicy(other.to_owned())),
        }
    }
}

impl fmt::Display for MigrationPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Footprint => f.write_str("footprint"),
            Self::HotCold => f.write_str("hotcold"),
        }
    }
}

/// Predictor configuration.
///
/// The six geometry and policy parameters are required; only the hot/cold
/// period and the random seed have defaults.
///
/// # Example
///
/// ```
/// use footprint_predictor::config::{MigrationPolicy, PredictorConfig};
///
/// let json = r#"{
///     "footprint_entries": 2048,
///     "footprint_assoc": 1,
///     "huge_page_kb": 4096,
///     "fast_mem_kb": 1048576,
///     "migration_threshold": 0.5,
///     "policy": "footprint"
/// }"#;
/// let config = PredictorConfig::from_json(json).unwrap();
/// assert_eq!(config.policy, MigrationPolicy::Footprint);
/// assert_eq!(config.validate().unwrap().fast_mem_pages, 256);
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PredictorConfig {
    /// Total footprint-table entries (sets × ways).
    pub footprint_entries: usize,

    /// Footprint-table associativity.
    pub footprint_assoc: usize,

    /// Huge page size in KiB.
    pub huge_page_kb: u64,

    /// Fast memory capacity in KiB.
    pub fast_mem_kb: u64,

    /// Fraction of small pages touched before migration, in `(0, 1]`.
    pub migration_threshold: f64,

    /// Migration policy.
    pub policy: MigrationPolicy,

    /// Queries between forced migrations (hot/cold policy only).
    #[serde(default = "PredictorConfig::default_hotcold_period")]
    pub hotcold_period: u64,

    /// Seed of the owned random source.
    #[serde(default = "PredictorConfig::default_seed")]
    pub seed: u64,
}

impl PredictorConfig {
    /// Creates a configuration from the required parameters.
    ///
    /// # Arguments
    ///
    /// * `footprint_entries` - Total footprint-table entries.
    /// * `footprint_assoc` - Footprint-table associativity.
    /// * `huge_page_kb` - Huge page size in KiB.
    /// * `fast_mem_kb` - Fast memory capacity in KiB.
    /// * `migration_threshold` - Fraction of small pages touched before migration.
    /// * `policy` - Migration policy.
    pub const fn new(
        footprint_entries: usize,
        footprint_assoc: usize,
        huge_page_kb: u64,
        fast_mem_kb: u64,
        migration_threshold: f64,
        policy: MigrationPolicy,
    ) -> Self {
        Self {
            footprint_entries,
            footprint_assoc,
            huge_page_kb,
            fast_mem_kb,
            migration_threshold,
            policy,
            hotcold_period: defaults::HOTCOLD_PERIOD,
            seed: defaults::SEED,
        }
    }

    /// Overrides the hot/cold period.
    #[must_use]
    pub const fn with_hotcold_period(mut self, period: u64) -> Self {
        self.hotcold_period = period;
        self
    }

    /// Overrides the random seed.
    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Parses a configuration from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] on malformed JSON, missing required
    /// fields, or an unknown policy name. Geometry is not checked here; see
    /// [`validate`](Self::validate).
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Returns the default hot/cold period.
    const fn default_hotcold_period() -> u64 {
        defaults::HOTCOLD_PERIOD
    }

    /// Returns the default seed.
    const fn default_seed() -> u64 {
        defaults::SEED
    }

    /// Checks the configuration and derives the table geometry.
    ///
    /// # Errors
    ///
    /// Returns the [`ConfigError`] for the first rule violated:
    /// - entries a non-zero power of two, associativity dividing it;
    /// - huge page a power of two of at least 4 KiB;
    /// - fast memory a non-zero multiple of the huge page;
    /// - threshold in `(0, 1]`;
    /// - non-zero hot/cold period;
    /// - huge-page offset plus footprint index fitting in 64 bits;
    /// - every table the policy needs fitting in a single allocation.
    pub fn validate(&self) -> Result<Geometry, ConfigError> {
        let entries = self.footprint_entries;
        if entries == 0 || !entries.is_power_of_two() {
            return Err(ConfigError::FootprintEntries(entries));
        }

        let assoc = self.footprint_assoc;
        if assoc == 0 || entries % assoc != 0 {
            return Err(ConfigError::FootprintAssoc { assoc, entries });
        }

        let huge_kb = self.huge_page_kb;
        if huge_kb < MIN_HUGE_PAGE_KB || !huge_kb.is_power_of_two() {
            return Err(ConfigError::HugePageSize(huge_kb));
        }

        if self.fast_mem_kb == 0 || self.fast_mem_kb % huge_kb != 0 {
            return Err(ConfigError::FastMemSize {
                fast_mem_kb: self.fast_mem_kb,
                huge_page_kb: huge_kb,
            });
        }

        let threshold = self.migration_threshold;
        if threshold.is_nan() || threshold <= 0.0 || threshold > 1.0 {
            return Err(ConfigError::Threshold(threshold));
        }

        if self.hotcold_period == 0 {
            return Err(ConfigError::HotColdPeriod);
        }

        // Power-of-two entries divided by a divisor stays a power of two.
        let sets = entries / assoc;
        let huge_page_bits = huge_kb.trailing_zeros() + KB_SHIFT;
        let index_bits = sets.trailing_zeros();
        if huge_page_bits + index_bits > ADDR_BITS {
            return Err(ConfigError::AddressBits {
                huge_page_bits,
                index_bits,
            });
        }

        let fast_mem_pages = self.fast_mem_kb / huge_kb;
        let fast_mem_pages = allocatable(fast_mem_pages, residency::SLOT_BYTES).ok_or(
            ConfigError::TableTooLarge {
                table: "residency",
                slots: fast_mem_pages,
            },
        )?;

        let footprint_too_large = || ConfigError::TableTooLarge {
            table: "footprint",
            slots: entries as u64,
        };
        let sub_pages = 1usize
            .checked_shl(huge_page_bits - SMALL_PAGE_SHIFT)
            .ok_or_else(footprint_too_large)?;
        // The footprint table only exists under the footprint policy.
        if self.policy == MigrationPolicy::Footprint
            && allocatable(entries as u64, footprint::entry_bytes(sub_pages)).is_none()
        {
            return Err(footprint_too_large());
        }

        // An integer count exceeds `threshold * sub_pages` iff it exceeds its floor.
        let migrate_above = (threshold * sub_pages as f64).floor() as usize;

        Ok(Geometry {
            sets,
            ways: assoc,
            huge_page_bits,
            index_bits,
            sub_pages,
            fast_mem_pages,
            migrate_above,
        })
    }
}

/// `slots` as a `usize` if `slots × slot_bytes` fits in one allocation.
fn allocatable(slots: u64, slot_bytes: usize) -> Option<usize> {
    let slots = usize::try_from(slots).ok()?;
    slots
        .checked_mul(slot_bytes)
        .filter(|&bytes| bytes <= isize::MAX.unsigned_abs())
        .map(|_| slots)
}

/// Table geometry derived from a validated [`PredictorConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Geometry {
    /// Footprint-table sets.
    pub sets: usize,
    /// Footprint-table ways per set.
    pub ways: usize,
    /// Huge-page offset width in bits (`H`).
    pub huge_page_bits: u32,
    /// Footprint-table index width in bits (`I`).
    pub index_bits: u32,
    /// Small pages per huge page.
    pub sub_pages: usize,
    /// Fast-memory capacity in huge pages (residency-table slots).
    pub fast_mem_pages: usize,
    /// Touched counts strictly above this value trigger migration.
    pub migrate_above: usize,
}

impl Geometry {
    /// Address layout for this geometry.
    pub const fn layout(&self) -> AddressLayout {
        AddressLayout::new(self.huge_page_bits, self.index_bits)
    }
}
