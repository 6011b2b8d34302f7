//! # Configuration Tests
//!
//! Tests for configuration construction, JSON deserialization, defaults,
//! geometry derivation and rejection of invalid geometries.

use footprint_predictor::common::ConfigError;
use footprint_predictor::config::*;
use pretty_assertions::assert_eq;
use rstest::rstest;

fn base() -> PredictorConfig {
    PredictorConfig::new(2048, 1, 4096, 1024 * 1024, 0.5, MigrationPolicy::Footprint)
}

// ══════════════════════════════════════════════════════════
// 1. Defaults and builders
// ══════════════════════════════════════════════════════════

#[test]
fn test_new_applies_optional_defaults() {
    let config = base();
    assert_eq!(config.hotcold_period, 10_000);
    assert_eq!(config.seed, 5489);
}

#[test]
fn test_builders_override_optionals() {
    let config = base().with_hotcold_period(7).with_seed(42);
    assert_eq!(config.hotcold_period, 7);
    assert_eq!(config.seed, 42);
    assert_eq!(config.footprint_entries, 2048);
}

// ══════════════════════════════════════════════════════════
// 2. Geometry derivation
// ══════════════════════════════════════════════════════════

/// 2048 direct-mapped entries, 4 MiB huge pages, 1 GiB of fast memory.
#[test]
fn test_geometry_direct_mapped() {
    let geometry = base().validate().unwrap();
    assert_eq!(
        geometry,
        Geometry {
            sets: 2048,
            ways: 1,
            huge_page_bits: 22,
            index_bits: 11,
            sub_pages: 1024,
            fast_mem_pages: 256,
            migrate_above: 512,
        }
    );
}

#[test]
fn test_geometry_set_associative() {
    let config = PredictorConfig::new(32, 4, 4096, 1024 * 1024, 0.5, MigrationPolicy::HotCold);
    let geometry = config.validate().unwrap();
    assert_eq!(geometry.sets, 8);
    assert_eq!(geometry.ways, 4);
    assert_eq!(geometry.index_bits, 3);
}

#[rstest]
#[case(1024, 0.5, 128)]
#[case(1024, 1.0, 256)]
#[case(1024, 0.25, 64)]
#[case(4096, 0.5, 512)]
#[case(4, 0.5, 0)]
#[case(4, 1.0, 1)]
fn test_migrate_above_is_floor_of_fraction(
    #[case] huge_page_kb: u64,
    #[case] threshold: f64,
    #[case] expected: usize,
) {
    let config = PredictorConfig::new(
        16,
        2,
        huge_page_kb,
        huge_page_kb * 4,
        threshold,
        MigrationPolicy::Footprint,
    );
    assert_eq!(config.validate().unwrap().migrate_above, expected);
}

/// Non-integral products round down: 0.3 × 256 = 76.8, so 77 touches migrate.
#[test]
fn test_migrate_above_fractional_product() {
    let mut config = base();
    config.huge_page_kb = 1024;
    config.migration_threshold = 0.3;
    assert_eq!(config.validate().unwrap().migrate_above, 76);
}

#[test]
fn test_geometry_layout_matches_bits() {
    let layout = base().validate().unwrap().layout();
    assert_eq!(layout.huge_page_bits(), 22);
    assert_eq!(layout.index_bits(), 11);
    assert_eq!(layout.sub_pages(), 1024);
}

// ══════════════════════════════════════════════════════════
// 3. Validation
// ══════════════════════════════════════════════════════════

#[rstest]
#[case(0)]
#[case(3)]
#[case(48)]
fn test_rejects_non_power_of_two_entries(#[case] entries: usize) {
    let mut config = base();
    config.footprint_entries = entries;
    assert!(matches!(config.validate(), Err(ConfigError::FootprintEntries(e)) if e == entries));
}

#[rstest]
#[case(0)]
#[case(3)]
#[case(4096)]
fn test_rejects_assoc_not_dividing_entries(#[case] assoc: usize) {
    let mut config = base();
    config.footprint_assoc = assoc;
    assert!(matches!(
        config.validate(),
        Err(ConfigError::FootprintAssoc { assoc: a, entries: 2048 }) if a == assoc
    ));
}

#[test]
fn test_accepts_fully_associative_footprint_table() {
    let mut config = base();
    config.footprint_assoc = 2048;
    let geometry = config.validate().unwrap();
    assert_eq!(geometry.sets, 1);
    assert_eq!(geometry.index_bits, 0);
}

#[rstest]
#[case(0)]
#[case(2)]
#[case(6)]
#[case(3000)]
fn test_rejects_bad_huge_page_size(#[case] kb: u64) {
    let mut config = base();
    config.huge_page_kb = kb;
    assert!(matches!(config.validate(), Err(ConfigError::HugePageSize(k)) if k == kb));
}

#[rstest]
#[case(0)]
#[case(4095)]
#[case(4096 * 3 + 1)]
fn test_rejects_bad_fast_mem_size(#[case] kb: u64) {
    let mut config = base();
    config.fast_mem_kb = kb;
    assert!(matches!(config.validate(), Err(ConfigError::FastMemSize { .. })));
}

#[rstest]
#[case(0.0)]
#[case(-0.25)]
#[case(1.0001)]
#[case(f64::NAN)]
#[case(f64::INFINITY)]
fn test_rejects_threshold_outside_unit_interval(#[case] threshold: f64) {
    let mut config = base();
    config.migration_threshold = threshold;
    assert!(matches!(config.validate(), Err(ConfigError::Threshold(_))));
}

#[test]
fn test_rejects_zero_hotcold_period() {
    let config = base().with_hotcold_period(0);
    assert!(matches!(config.validate(), Err(ConfigError::HotColdPeriod)));
}

/// 2^54 KiB huge pages need 64 offset bits, leaving none for a 2-set index.
#[test]
fn test_rejects_fields_wider_than_address() {
    let huge = 1u64 << 54;
    let config = PredictorConfig::new(2, 1, huge, huge, 0.5, MigrationPolicy::Footprint);
    assert!(matches!(
        config.validate(),
        Err(ConfigError::AddressBits {
            huge_page_bits: 64,
            index_bits: 1
        })
    ));
}

#[test]
fn test_error_messages_name_the_value() {
    let mut config = base();
    config.footprint_entries = 48;
    let msg = config.validate().unwrap_err().to_string();
    assert!(msg.contains("48"), "{msg}");
}

// ══════════════════════════════════════════════════════════
// 4. Policy names and JSON
// ══════════════════════════════════════════════════════════

#[rstest]
#[case("footprint", MigrationPolicy::Footprint)]
#[case("Footprint", MigrationPolicy::Footprint)]
#[case("hotcold", MigrationPolicy::HotCold)]
#[case("HotCold", MigrationPolicy::HotCold)]
#[case("hot_cold", MigrationPolicy::HotCold)]
fn test_policy_from_str(#[case] name: &str, #[case] expected: MigrationPolicy) {
    assert_eq!(name.parse::<MigrationPolicy>().unwrap(), expected);
}

/// Unknown names are rejected rather than falling back to hot/cold.
#[test]
fn test_policy_from_str_rejects_unknown() {
    let err = "lru".parse::<MigrationPolicy>().unwrap_err();
    assert!(matches!(err, ConfigError::UnknownPolicy(ref s) if s == "lru"));
}

#[test]
fn test_policy_display() {
    assert_eq!(MigrationPolicy::Footprint.to_string(), "footprint");
    assert_eq!(MigrationPolicy::HotCold.to_string(), "hotcold");
}

#[test]
fn test_json_required_fields_only() {
    let json = r#"{
        "footprint_entries": 32,
        "footprint_assoc": 4,
        "huge_page_kb": 1024,
        "fast_mem_kb": 4096,
        "migration_threshold": 0.5,
        "policy": "hotcold"
    }"#;
    let config = PredictorConfig::from_json(json).unwrap();
    assert_eq!(config.policy, MigrationPolicy::HotCold);
    assert_eq!(config.hotcold_period, 10_000);
    assert_eq!(config.seed, 5489);
    assert_eq!(config.validate().unwrap().fast_mem_pages, 4);
}

#[test]
fn test_json_with_optionals_and_alias() {
    let json = r#"{
        "footprint_entries": 32,
        "footprint_assoc": 4,
        "huge_page_kb": 1024,
        "fast_mem_kb": 4096,
        "migration_threshold": 0.25,
        "policy": "Footprint",
        "hotcold_period": 50,
        "seed": 1
    }"#;
    let config = PredictorConfig::from_json(json).unwrap();
    assert_eq!(config.policy, MigrationPolicy::Footprint);
    assert_eq!(config.hotcold_period, 50);
    assert_eq!(config.seed, 1);
}

#[test]
fn test_json_missing_required_field() {
    let json = r#"{ "footprint_entries": 32, "footprint_assoc": 4 }"#;
    assert!(matches!(PredictorConfig::from_json(json), Err(ConfigError::Parse(_))));
}

#[test]
fn test_json_unknown_policy() {
    let json = r#"{
        "footprint_entries": 32,
        "footprint_assoc": 4,
        "huge_page_kb": 1024,
        "fast_mem_kb": 4096,
        "migration_threshold": 0.5,
        "policy": "random"
    }"#;
    assert!(matches!(PredictorConfig::from_json(json), Err(ConfigError::Parse(_))));
}

// ══════════════════════════════════════════════════════════
// 4. Table sizes
// ══════════════════════════════════════════════════════════

/// 2^62 KiB of fast memory in 4 KiB huge pages is 2^60 residency slots.
#[test]
fn test_rejects_unallocatable_residency_table() {
    let config = PredictorConfig::new(32, 4, 4, 1 << 62, 0.5, MigrationPolicy::HotCold);
    assert!(matches!(
        config.validate(),
        Err(ConfigError::TableTooLarge {
            table: "residency",
            slots
        }) if slots == 1 << 60
    ));
}

/// 2^30 fully associative entries, each with a 2^40-bit footprint.
#[test]
fn test_rejects_unallocatable_footprint_table() {
    let huge = 1u64 << 42;
    let entries = 1usize << 30;
    let config =
        PredictorConfig::new(entries, entries, huge, huge, 0.5, MigrationPolicy::Footprint);
    assert!(matches!(
        config.validate(),
        Err(ConfigError::TableTooLarge {
            table: "footprint",
            slots
        }) if slots == 1 << 30
    ));

    // Hot/cold never builds the footprint table.
    let hotcold = PredictorConfig {
        policy: MigrationPolicy::HotCold,
        ..config
    };
    assert_eq!(hotcold.validate().unwrap().fast_mem_pages, 1);
}
