//! Synthetic Workloads.
//!
//! Canonical access patterns that exercise each part of the predictor, each
//! paired with the configuration it is meant to run under:
//!
//! | Workload            | Geometry (entries/assoc, huge page, fast mem) | Exercises                          |
//! |---------------------|-----------------------------------------------|------------------------------------|
//! | `SequentialStride`  | 2048/1, 4 MiB, 1 GiB                          | threshold-triggered migration      |
//! | `FootprintConflict` | 32/4, 4 MiB, 1 GiB                            | nMRU eviction in one footprint set |
//! | `ResidencyFill`     | 2048/1, 4 MiB, 1 GiB (256 slots)              | CLOCK eviction on a full table     |
//! | `UniformRandom`     | 32/4, 4 MiB, 1 GiB                            | footprint churn under random load  |
//! | `HotColdRandom`     | 32/4, 4 MiB, 1 GiB, hot/cold                  | periodic migration                 |

use std::fmt;

use super::{TraceReport, replay};
use crate::common::constants::SMALL_PAGE_SIZE;
use crate::common::{ConfigError, RandomSource};
use crate::config::{MigrationPolicy, PredictorConfig};
use crate::predictor::FootprintPredictor;

const MIB: u64 = 1024 * 1024;
const HUGE_PAGE_KB: u64 = 4096;
const FAST_MEM_KB: u64 = 1024 * 1024;
const THRESHOLD: f64 = 0.5;
const RANDOM_QUERIES: usize = 100_000;

/// A canonical synthetic workload.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Workload {
    /// 4 KiB strides through 2048 small pages (two 4 MiB huge pages).
    SequentialStride,
    /// Five huge pages that all map to the same footprint set.
    FootprintConflict,
    /// 257 huge pages each touched past the threshold, one more than fast memory holds.
    ResidencyFill,
    /// 100K uniformly random addresses under the footprint policy.
    UniformRandom,
    /// 100K uniformly random addresses under the hot/cold policy.
    HotColdRandom,
}

impl Workload {
    /// Every workload, in canonical order.
    pub const ALL: [Self; 5] = [
        Self::SequentialStride,
        Self::FootprintConflict,
        Self::ResidencyFill,
        Self::UniformRandom,
        Self::HotColdRandom,
    ];

    /// Kebab-case name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::SequentialStride => "sequential-stride",
            Self::FootprintConflict => "footprint-conflict",
            Self::ResidencyFill => "residency-fill",
            Self::UniformRandom => "uniform-random",
            Self::HotColdRandom => "hotcold-random",
        }
    }

    /// Looks a workload up by its kebab-case name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|w| w.name() == name)
    }

    /// Configuration the workload is designed for, seeded with `seed`.
    pub const fn config(self, seed: u64) -> PredictorConfig {
        let (entries, assoc, policy) = match self {
            Self::SequentialStride | Self::ResidencyFill => (2048, 1, MigrationPolicy::Footprint),
            Self::FootprintConflict | Self::UniformRandom => (32, 4, MigrationPolicy::Footprint),
            Self::HotColdRandom => (32, 4, MigrationPolicy::HotCold),
        };
        PredictorConfig::new(entries, assoc, HUGE_PAGE_KB, FAST_MEM_KB, THRESHOLD, policy)
            .with_seed(seed)
    }

    /// Address stream of the workload. Random streams are drawn from `seed`.
    pub fn addresses(self, seed: u64) -> Vec<u64> {
        match self {
            Self::SequentialStride => (0..2048).map(|page| page * SMALL_PAGE_SIZE).collect(),
            Self::FootprintConflict => (0..5).map(|i| 4 * MIB + i * 32 * MIB).collect(),
            Self::ResidencyFill => (0..257)
                .flat_map(|huge| {
                    (0..515).map(move |page| huge * HUGE_PAGE_KB * 1024 + page * SMALL_PAGE_SIZE)
                })
                .collect(),
            Self::UniformRandom | Self::HotColdRandom => {
                let mut rng = RandomSource::with_seed(seed);
                (0..RANDOM_QUERIES).map(|_| rng.random::<u64>()).collect()
            }
        }
    }
}

impl fmt::Display for Workload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Builds the workload's predictor and replays its address stream.
///
/// # Errors
///
/// Only if the canonical configuration were invalid, which it is not; the
/// error path exists because construction is fallible in general.
pub fn run_workload(workload: Workload, seed: u64) -> Result<TraceReport, ConfigError> {
    let mut predictor = FootprintPredictor::new(&workload.config(seed))?;
    Ok(replay(&mut predictor, workload.addresses(seed)))
}
