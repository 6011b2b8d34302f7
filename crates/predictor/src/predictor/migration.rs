//! Migration drivers.
//!
//! Exactly one driver exists per predictor, chosen by its [`MigrationPolicy`]:
//! the footprint driver owns the footprint table and requests migration when
//! a huge page's touched count crosses the bar; the hot/cold driver owns only
//! a free-running query clock and requests migration of the current address
//! once per period.
//!
//! [`MigrationPolicy`]: crate::config::MigrationPolicy

use crate::stats::PredictorStats;
use crate::units::{FootprintOutcome, FootprintTable};

/// What triggered a migration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MigrationCause {
    /// Footprint count rose above the migration bar.
    FootprintThreshold,
    /// The hot/cold period elapsed.
    HotColdPeriod,
}

/// Free-running query counter of the hot/cold policy.
#[derive(Clone, Copy, Debug)]
pub struct HotColdClock {
    count: u64,
    period: u64,
}

impl HotColdClock {
    /// Creates a clock that fires every `period` ticks.
    pub const fn new(period: u64) -> Self {
        Self { count: 0, period }
    }

    /// Counts one query; returns `true` and restarts when the period is reached.
    pub const fn tick(&mut self) -> bool {
        self.count += 1;
        if self.count >= self.period {
            self.count = 0;
            true
        } else {
            false
        }
    }

    /// Queries counted since the last firing.
    pub const fn count(&self) -> u64 {
        self.count
    }

    /// Firing period.
    pub const fn period(&self) -> u64 {
        self.period
    }
}

/// Policy-specific predictive state.
#[derive(Debug)]
pub enum MigrationDriver {
    /// Footprint-threshold migration.
    Footprint(FootprintTable),
    /// Periodic hot/cold migration.
    HotCold(HotColdClock),
}

impl MigrationDriver {
    /// Feeds one query to the driver.
    ///
    /// # Arguments
    ///
    /// * `addr` - The queried address.
    /// * `hit` - Whether its huge page was resident when queried.
    /// * `stats` - Counters to update.
    ///
    /// # Returns
    ///
    /// The cause if the huge page of `addr` must now be migrated.
    pub fn observe(
        &mut self,
        addr: u64,
        hit: bool,
        stats: &mut PredictorStats,
    ) -> Option<MigrationCause> {
        match self {
            Self::Footprint(table) => {
                if hit {
                    return None;
                }
                match table.record_access(addr) {
                    FootprintOutcome::Allocated { evicted_tag } => {
                        stats.footprint_misses += 1;
                        if evicted_tag.is_some() {
                            stats.footprint_evictions += 1;
                        }
                        None
                    }
                    FootprintOutcome::Touched { .. } => {
                        stats.footprint_hits += 1;
                        None
                    }
                    FootprintOutcome::ThresholdCrossed { .. } => {
                        stats.footprint_hits += 1;
                        Some(MigrationCause::FootprintThreshold)
                    }
                }
            }
            Self::HotCold(clock) => clock.tick().then_some(MigrationCause::HotColdPeriod),
        }
    }
}
