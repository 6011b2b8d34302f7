//! Footprint Predictor.
//!
//! The top-level decision engine. Each query:
//! 1. **Lookup:** Checks the residency table (refreshing the CLOCK bit on a hit).
//! 2. **Observe:** Feeds the query to the migration driver (footprint table or hot/cold clock).
//! 3. **Migrate:** Installs the huge page in fast memory if the driver asks for it.
//!
//! The answer is the residency state *before* any migration performed by the
//! same query: a page migrated by an access becomes a hit on its next query.

/// Migration drivers (footprint threshold, hot/cold period).
pub mod migration;

use tracing::{debug, info, trace};

use self::migration::{HotColdClock, MigrationCause, MigrationDriver};
use crate::common::{AddressLayout, ConfigError, RandomSource};
use crate::config::{Geometry, MigrationPolicy, PredictorConfig};
use crate::stats::PredictorStats;
use crate::units::{FootprintTable, MigrationRecord, ResidencyTable};

/// Predicts fast-memory residency and drives huge-page migration.
///
/// Owns all mutable state exclusively; share between threads only behind
/// external synchronization.
#[derive(Debug)]
pub struct FootprintPredictor {
    geometry: Geometry,
    layout: AddressLayout,
    policy: MigrationPolicy,
    residency: ResidencyTable,
    driver: MigrationDriver,
    /// Most recently queried address.
    mru: u64,
    last_migration: Option<MigrationRecord>,
    stats: PredictorStats,
}

impl FootprintPredictor {
    /// Creates a predictor from a configuration.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the configuration fails validation.
    pub fn new(config: &PredictorConfig) -> Result<Self, ConfigError> {
        let geometry = config.validate()?;
        let layout = geometry.layout();

        let driver = match config.policy {
            MigrationPolicy::Footprint => MigrationDriver::Footprint(FootprintTable::new(
                geometry.sets,
                geometry.ways,
                layout,
                geometry.migrate_above,
                RandomSource::with_seed(config.seed),
            )),
            MigrationPolicy::HotCold => {
                MigrationDriver::HotCold(HotColdClock::new(config.hotcold_period))
            }
        };

        info!(
            policy = %config.policy,
            sets = geometry.sets,
            ways = geometry.ways,
            huge_page_bits = geometry.huge_page_bits,
            sub_pages = geometry.sub_pages,
            fast_mem_pages = geometry.fast_mem_pages,
            migrate_above = geometry.migrate_above,
            "footprint predictor configured"
        );

        Ok(Self {
            geometry,
            layout,
            policy: config.policy,
            residency: ResidencyTable::new(geometry.fast_mem_pages, layout),
            driver,
            mru: 0,
            last_migration: None,
            stats: PredictorStats::default(),
        })
    }

    /// Answers whether `addr` is currently in fast memory, updating predictive state.
    ///
    /// Under the footprint policy a miss is recorded in the footprint table and
    /// may migrate the huge page. Under the hot/cold policy every
    /// `hotcold_period`-th query migrates the huge page of `addr`. Either way
    /// the returned value reflects residency before that migration.
    pub fn is_in_fast_memory(&mut self, addr: u64) -> bool {
        self.mru = addr;
        self.stats.queries += 1;

        let hit = self.residency.lookup(addr);
        if hit {
            self.stats.fast_mem_hits += 1;
        } else {
            self.stats.fast_mem_misses += 1;
        }
        trace!(addr, hit, "query");

        if let Some(cause) = self.driver.observe(addr, hit, &mut self.stats) {
            self.migrate(self.mru, cause);
        }

        hit
    }

    fn migrate(&mut self, addr: u64, cause: MigrationCause) {
        let record = self.residency.migrate(addr);

        self.stats.migrations += 1;
        match cause {
            MigrationCause::FootprintThreshold => self.stats.footprint_migrations += 1,
            MigrationCause::HotColdPeriod => self.stats.hotcold_migrations += 1,
        }
        if record.evicted_tag.is_some() {
            self.stats.residency_evictions += 1;
        }

        debug!(
            addr,
            huge_page = self.layout.huge_page_base(record.tag),
            slot = record.slot,
            evicted = ?record.evicted_tag,
            already_resident = record.already_resident,
            ?cause,
            "migrated huge page"
        );
        self.last_migration = Some(record);
    }

    /// Whether `addr`'s huge page is resident, without updating any state.
    pub fn contains(&self, addr: u64) -> bool {
        self.residency.contains(addr)
    }

    /// Most recently queried address (0 before the first query).
    pub const fn mru(&self) -> u64 {
        self.mru
    }

    /// Migration policy in force.
    pub const fn policy(&self) -> MigrationPolicy {
        self.policy
    }

    /// Derived table geometry.
    pub const fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    /// Address layout used for all tag/index/offset extraction.
    pub const fn layout(&self) -> &AddressLayout {
        &self.layout
    }

    /// Footprint table, present only under the footprint policy.
    pub const fn footprint_table(&self) -> Option<&FootprintTable> {
        match &self.driver {
            MigrationDriver::Footprint(table) => Some(table),
            MigrationDriver::HotCold(_) => None,
        }
    }

    /// Hot/cold clock, present only under the hot/cold policy.
    pub const fn hotcold_clock(&self) -> Option<&HotColdClock> {
        match &self.driver {
            MigrationDriver::HotCold(clock) => Some(clock),
            MigrationDriver::Footprint(_) => None,
        }
    }

    /// Fast-memory residency table.
    pub const fn residency_table(&self) -> &ResidencyTable {
        &self.residency
    }

    /// The most recent migration, if any.
    pub const fn last_migration(&self) -> Option<&MigrationRecord> {
        self.last_migration.as_ref()
    }

    /// Accumulated statistics.
    pub const fn stats(&self) -> &PredictorStats {
        &self.stats
    }
}
