//! Simulation drivers.
//!
//! Feeds address streams through a predictor and summarises the outcome:
//! 1. **Trace:** Replays an address trace read from text.
//! 2. **Workloads:** Canonical synthetic access patterns with their configurations.

/// Address-trace parsing and replay.
pub mod trace;

/// Synthetic workloads.
pub mod workloads;

use serde::Serialize;

use crate::predictor::FootprintPredictor;
use crate::stats::PredictorStats;

/// Summary of one replayed address stream.
#[derive(Clone, Debug, Serialize)]
pub struct TraceReport {
    /// Addresses replayed.
    pub queries: u64,
    /// Queries answered as resident.
    pub hits: u64,
    /// Query indices (0-based) whose answer flipped from miss to hit relative
    /// to the previous query.
    pub hit_transitions: Vec<u64>,
    /// Final predictor statistics.
    pub stats: PredictorStats,
}

/// Running tally of answers, folded into a [`TraceReport`] at the end.
#[derive(Debug, Default)]
struct Tally {
    queries: u64,
    hits: u64,
    hit_transitions: Vec<u64>,
    prev: bool,
}

impl Tally {
    fn record(&mut self, hit: bool) {
        if hit {
            self.hits += 1;
            if !self.prev {
                self.hit_transitions.push(self.queries);
            }
        }
        self.prev = hit;
        self.queries += 1;
    }

    fn finish(self, predictor: &FootprintPredictor) -> TraceReport {
        TraceReport {
            queries: self.queries,
            hits: self.hits,
            hit_transitions: self.hit_transitions,
            stats: predictor.stats().clone(),
        }
    }
}

/// Replays `addrs` through `predictor`.
pub fn replay<I>(predictor: &mut FootprintPredictor, addrs: I) -> TraceReport
where
    I: IntoIterator<Item = u64>,
{
    let mut tally = Tally::default();
    for addr in addrs {
        tally.record(predictor.is_in_fast_memory(addr));
    }
    tally.finish(predictor)
}

/// Replays a fallible address stream, stopping at the first error.
///
/// Addresses before the error have already been applied to `predictor`.
fn try_replay<I, E>(predictor: &mut FootprintPredictor, addrs: I) -> Result<TraceReport, E>
where
    I: IntoIterator<Item = Result<u64, E>>,
{
    let mut tally = Tally::default();
    for addr in addrs {
        tally.record(predictor.is_in_fast_memory(addr?));
    }
    Ok(tally.finish(predictor))
}
