//! # Simulation Tests
//!
//! Trace parsing and replay, and the canonical synthetic workloads.

use std::io::Cursor;

use footprint_predictor::common::TraceError;
use footprint_predictor::sim::replay;
use footprint_predictor::sim::trace::{TraceAddresses, read_trace, replay_trace};
use footprint_predictor::sim::workloads::{Workload, run_workload};
use pretty_assertions::assert_eq;
use rstest::rstest;

use crate::common::{ONE_GIB_KB, footprint_config, predictor};

// ══════════════════════════════════════════════════════════
// 1. Trace files
// ══════════════════════════════════════════════════════════

#[test]
fn test_read_trace_mixed_formats() {
    let text = "# header\n4096\n\n0x2000  # second page\n0X3_000\n   12288\n";
    let addrs = read_trace(Cursor::new(text)).expect("valid trace");
    assert_eq!(addrs, vec![4096, 0x2000, 0x3000, 12288]);
}

#[test]
fn test_read_trace_reports_bad_line() {
    let text = "0x1000\nnot-an-address\n0x2000\n";
    match read_trace(Cursor::new(text)) {
        Err(TraceError::Parse { line, text }) => {
            assert_eq!(line, 2);
            assert_eq!(text, "not-an-address");
        }
        other => panic!("expected a parse error, got {other:?}"),
    }
}

#[test]
fn test_replay_trace_counts_hits() {
    let mut p = predictor(&footprint_config(2048, 1, 1024, ONE_GIB_KB));
    let text: String = (0..256).map(|sub| format!("{:#x}\n", sub * 4096)).collect();

    let report = replay_trace(&mut p, Cursor::new(text)).expect("valid trace");
    assert_eq!(report.queries, 256);
    assert_eq!(report.hits, 127);
    assert_eq!(report.hit_transitions, vec![129]);
    assert_eq!(report.stats.migrations, 1);
}

/// Lines are consumed one at a time; an error ends the stream.
#[test]
fn test_trace_addresses_stream_until_error() {
    let mut addrs = TraceAddresses::new(Cursor::new("0x1000\n# skip\n8192\nbogus\n0x4000\n"));
    assert_eq!(addrs.next().map(Result::ok), Some(Some(0x1000)));
    assert_eq!(addrs.next().map(Result::ok), Some(Some(8192)));
    assert!(matches!(addrs.next(), Some(Err(TraceError::Parse { line: 4, .. }))));
    assert!(addrs.next().is_none());
}

/// A malformed line stops replay; earlier lines have already been queried.
#[test]
fn test_replay_trace_stops_at_bad_line() {
    let mut p = predictor(&footprint_config(2048, 1, 1024, ONE_GIB_KB));
    let result = replay_trace(&mut p, Cursor::new("0x1000\n0x2000\nbogus\n0x3000\n"));

    assert!(matches!(result, Err(TraceError::Parse { line: 3, .. })));
    assert_eq!(p.stats().queries, 2);
    assert_eq!(p.mru(), 0x2000);
}

#[test]
fn test_replay_empty_stream() {
    let mut p = predictor(&footprint_config(2048, 1, 1024, ONE_GIB_KB));
    let report = replay(&mut p, std::iter::empty());
    assert_eq!(report.queries, 0);
    assert_eq!(report.hits, 0);
    assert!(report.hit_transitions.is_empty());
}

// ══════════════════════════════════════════════════════════
// 2. Workloads
// ══════════════════════════════════════════════════════════

#[test]
fn test_sequential_stride_workload() {
    let report = run_workload(Workload::SequentialStride, 5489).expect("valid workload");
    assert_eq!(report.queries, 2048);
    assert_eq!(report.hit_transitions, vec![513, 1537]);
    assert_eq!(report.hits, 1022);
    assert_eq!(report.stats.migrations, 2);
}

#[test]
fn test_footprint_conflict_workload() {
    let report = run_workload(Workload::FootprintConflict, 5489).expect("valid workload");
    assert_eq!(report.stats.footprint_evictions, 1);
    assert_eq!(report.hits, 0);
}

#[test]
fn test_residency_fill_workload() {
    let report = run_workload(Workload::ResidencyFill, 5489).expect("valid workload");
    assert_eq!(report.stats.migrations, 257);
    assert_eq!(report.stats.residency_evictions, 1);
    assert_eq!(report.hits, 514);
}

#[test]
fn test_hotcold_random_workload() {
    let report = run_workload(Workload::HotColdRandom, 5489).expect("valid workload");
    assert_eq!(report.queries, 100_000);
    assert_eq!(report.stats.hotcold_migrations, 10);
}

/// Random 64-bit addresses essentially never repeat a huge page, so every
/// query past the first 32 displaces a footprint entry.
#[test]
fn test_uniform_random_workload_churns_footprint_table() {
    let report = run_workload(Workload::UniformRandom, 5489).expect("valid workload");
    assert_eq!(report.stats.footprint_misses, 100_000);
    assert_eq!(report.stats.footprint_evictions, 100_000 - 32);
    assert_eq!(report.stats.migrations, 0);
}

#[rstest]
#[case(Workload::UniformRandom)]
#[case(Workload::HotColdRandom)]
fn test_random_workloads_are_seeded(#[case] workload: Workload) {
    assert_eq!(workload.addresses(11), workload.addresses(11));
    assert_ne!(workload.addresses(11), workload.addresses(12));

    let a = run_workload(workload, 11).expect("valid workload");
    let b = run_workload(workload, 11).expect("valid workload");
    assert_eq!(a.stats, b.stats);
}

#[test]
fn test_workload_names_round_trip() {
    for workload in Workload::ALL {
        assert_eq!(Workload::from_name(workload.name()), Some(workload));
        assert_eq!(workload.to_string(), workload.name());
    }
    assert_eq!(Workload::from_name("no-such-workload"), None);
}

#[test]
fn test_workload_configs_validate() {
    for workload in Workload::ALL {
        assert!(workload.config(1).validate().is_ok(), "{workload}");
    }
}
