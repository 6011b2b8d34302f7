//! Predictor statistics collection and reporting.
//!
//! This module tracks the counters a predictor exposes for observability. It provides:
//! 1. **Summary:** Queries and fast-memory hit/miss counts.
//! 2. **Footprint:** Footprint-table hits, misses, and evictions.
//! 3. **Residency:** Migrations by cause and residency-table evictions.
//!
//! Counters never influence predictions.

use serde::Serialize;

/// Predictor statistics.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct PredictorStats {
    /// Total queries answered.
    pub queries: u64,
    /// Queries whose huge page was resident in fast memory.
    pub fast_mem_hits: u64,
    /// Queries whose huge page was not resident.
    pub fast_mem_misses: u64,

    /// Fast-memory misses that found their huge page in the footprint table.
    pub footprint_hits: u64,
    /// Fast-memory misses that had to allocate a footprint-table entry.
    pub footprint_misses: u64,
    /// Valid footprint entries displaced by allocation.
    pub footprint_evictions: u64,

    /// Migrations into fast memory, all causes.
    pub migrations: u64,
    /// Migrations triggered by a footprint threshold crossing.
    pub footprint_migrations: u64,
    /// Migrations triggered by the hot/cold period.
    pub hotcold_migrations: u64,
    /// Resident huge pages displaced by CLOCK.
    pub residency_evictions: u64,
}

/// Section names for selective stats output.
///
/// Valid section identifiers: `"summary"`, `"footprint"`, `"residency"`.
/// Pass an empty slice to `print_sections` to print all sections.
pub const STATS_SECTIONS: &[&str] = &["summary", "footprint", "residency"];

/// Ratio as a percentage, 0 when the denominator is 0.
fn percent(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}

impl PredictorStats {
    /// Fast-memory hit rate in percent.
    pub fn fast_mem_hit_rate(&self) -> f64 {
        percent(self.fast_mem_hits, self.fast_mem_hits + self.fast_mem_misses)
    }

    /// Footprint-table hit rate in percent.
    pub fn footprint_hit_rate(&self) -> f64 {
        percent(self.footprint_hits, self.footprint_hits + self.footprint_misses)
    }

    /// Renders the requested sections as text.
    ///
    /// Each element of `sections` should be one of `"summary"`, `"footprint"`,
    /// or `"residency"`. An empty slice renders every section.
    pub fn render_sections(&self, sections: &[String]) -> String {
        let want = |s: &str| sections.is_empty() || sections.iter().any(|x| x == s);
        let mut out = String::new();

        if want("summary") {
            out.push_str("==========================================================\n");
            out.push_str("FOOTPRINT PREDICTOR STATISTICS\n");
            out.push_str("==========================================================\n");
            out.push_str(&format!("queries                  : {}\n", self.queries));
            out.push_str(&format!(
                "fast_mem.hits            : {} ({:.2}%)\n",
                self.fast_mem_hits,
                self.fast_mem_hit_rate()
            ));
            out.push_str(&format!("fast_mem.misses          : {}\n", self.fast_mem_misses));
        }

        if want("footprint") {
            out.push_str("----------------------------------------------------------\n");
            out.push_str("FOOTPRINT TABLE\n");
            out.push_str(&format!(
                "  hits                   : {} ({:.2}%)\n",
                self.footprint_hits,
                self.footprint_hit_rate()
            ));
            out.push_str(&format!("  misses                 : {}\n", self.footprint_misses));
            out.push_str(&format!("  evictions              : {}\n", self.footprint_evictions));
        }

        if want("residency") {
            out.push_str("----------------------------------------------------------\n");
            out.push_str("MIGRATION\n");
            out.push_str(&format!("  migrations             : {}\n", self.migrations));
            out.push_str(&format!("    footprint            : {}\n", self.footprint_migrations));
            out.push_str(&format!("    hotcold              : {}\n", self.hotcold_migrations));
            out.push_str(&format!("  residency_evictions    : {}\n", self.residency_evictions));
        }

        out
    }

    /// Prints only the requested statistics sections to stdout.
    pub fn print_sections(&self, sections: &[String]) {
        print!("{}", self.render_sections(sections));
    }

    /// Prints every section to stdout.
    pub fn print(&self) {
        self.print_sections(&[]);
    }
}
