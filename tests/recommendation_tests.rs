// Recommendation Engine Tests
//
// Purpose: Demo scenarios, band boundaries, palette, balance-only shifts and
// determinism through the public API.
// Run with: cargo test --test recommendation_tests

use agrisight::recommendation::{classify_balance, select_rule, BalanceTier, ColorToken, RuleId};
use agrisight::{
    classify_vegetation_health, color_for_severity, color_for_vegetation_index,
    derive_recommendation, derive_recommendation_at, DemoScenario, FarmSnapshot, Severity,
    VegetationHealth,
};
use approx::assert_relative_eq;
use chrono::{TimeZone, Utc};
use proptest::prelude::*;

// =========================================================================
// Section 1: Demo Scenarios
// =========================================================================

#[test]
fn test_critical_scenario() {
    let rec = derive_recommendation(0.28, -18.0, 150.0);

    assert_eq!(rec.severity, Severity::High);
    assert!(rec.confidence >= 0.8);
    assert_relative_eq!(rec.confidence, 0.8525, epsilon = 0.0001);
    assert!(rec.action.to_lowercase().contains("immediately"));
    // Reasoning cites both signals
    assert!(rec.reasoning.contains("stressed vegetation"));
    assert!(rec.reasoning.contains("18.0mm below average"));
}

#[test]
fn test_moderate_scenario() {
    let rec = derive_recommendation(0.45, -12.5, 1250.50);

    assert_eq!(rec.severity, Severity::Medium);
    assert_relative_eq!(rec.confidence, 0.675, epsilon = 0.0001);
    assert!(rec.reasoning.contains("0.45"));
}

#[test]
fn test_healthy_scenario() {
    let rec = derive_recommendation(0.68, 5.0, 5000.0);

    assert_eq!(rec.severity, Severity::Low);
    assert_relative_eq!(rec.confidence, 0.78, epsilon = 0.0001);
    assert!(rec.action.contains("expanding"));
}

#[test]
fn test_scenario_snapshots_match_engine() {
    let expected = [
        (DemoScenario::Healthy, Severity::Low),
        (DemoScenario::Moderate, Severity::Medium),
        (DemoScenario::Critical, Severity::High),
    ];

    for (scenario, severity) in expected {
        let s = scenario.snapshot();
        let rec = derive_recommendation(s.ndvi, s.rainfall_deficit_mm, s.balance);
        assert_eq!(rec.severity, severity, "{}", scenario);
    }
}

// =========================================================================
// Section 2: Band Boundaries
// =========================================================================

#[test]
fn test_vegetation_band_edges() {
    assert_eq!(classify_vegetation_health(0.61), VegetationHealth::Healthy);
    assert_eq!(classify_vegetation_health(0.6), VegetationHealth::Moderate);
    assert_eq!(classify_vegetation_health(0.41), VegetationHealth::Moderate);
    assert_eq!(classify_vegetation_health(0.4), VegetationHealth::Stressed);
    assert_eq!(classify_vegetation_health(-1.0), VegetationHealth::Stressed);
}

#[test]
fn test_drought_edge() {
    // Exactly -10 is not drought; stressed vegetation alone is medium
    assert_eq!(derive_recommendation(0.3, -10.0, 5000.0).severity, Severity::Medium);
    assert_eq!(derive_recommendation(0.3, -10.01, 5000.0).severity, Severity::High);
}

#[test]
fn test_shortfall_edge() {
    assert_eq!(derive_recommendation(0.8, -5.0, 5000.0).severity, Severity::Low);
    assert_eq!(derive_recommendation(0.8, -5.5, 5000.0).severity, Severity::Medium);
}

#[test]
fn test_balance_tiers() {
    assert_eq!(classify_balance(3000.0), BalanceTier::Strong);
    assert_eq!(classify_balance(2999.99), BalanceTier::Moderate);
    assert_eq!(classify_balance(1000.0), BalanceTier::Moderate);
    assert_eq!(classify_balance(999.99), BalanceTier::Low);
    assert_eq!(classify_balance(0.0), BalanceTier::Low);
    assert_eq!(classify_balance(-0.01), BalanceTier::Overdrawn);
}

// =========================================================================
// Section 3: Palette
// =========================================================================

#[test]
fn test_palette_hex_values() {
    assert_eq!(ColorToken::Green.hex(), "#00FF41");
    assert_eq!(ColorToken::Amber.hex(), "#FFB800");
    assert_eq!(ColorToken::Red.hex(), "#FF3864");
}

#[test]
fn test_vegetation_and_severity_palettes_agree() {
    assert_eq!(color_for_vegetation_index(0.7), color_for_severity(Severity::Low));
    assert_eq!(color_for_vegetation_index(0.5), color_for_severity(Severity::Medium));
    assert_eq!(color_for_vegetation_index(0.2), color_for_severity(Severity::High));
}

// =========================================================================
// Section 4: Balance Modulates Action Only
// =========================================================================

#[test]
fn test_balance_only_shift_in_healthy_band() {
    let rich = derive_recommendation(0.7, 2.0, 8000.0);
    let modest = derive_recommendation(0.7, 2.0, 1500.0);
    let poor = derive_recommendation(0.7, 2.0, 50.0);
    let overdrawn = derive_recommendation(0.7, 2.0, -400.0);

    for rec in [&rich, &modest, &poor, &overdrawn] {
        assert_eq!(rec.severity, Severity::Low);
    }
    assert!(rich.action.contains("expanding"));
    assert!(poor.action.contains("build savings"));
    assert_ne!(rich.action, modest.action);
    assert_ne!(modest.action, poor.action);
    assert_ne!(poor.action, overdrawn.action);
}

#[test]
fn test_balance_never_escalates_severity() {
    for balance in [100_000.0, 3000.0, 999.0, 0.0, -5000.0] {
        assert_eq!(derive_recommendation(0.28, -18.0, balance).severity, Severity::High);
        assert_eq!(derive_recommendation(0.45, 0.0, balance).severity, Severity::Medium);
        assert_eq!(derive_recommendation(0.9, 10.0, balance).severity, Severity::Low);
    }
}

// =========================================================================
// Section 5: Determinism and Degenerate Input
// =========================================================================

#[test]
fn test_timestamp_is_the_only_difference() {
    let t1 = Utc.with_ymd_and_hms(2025, 10, 18, 9, 0, 0).unwrap();
    let t2 = Utc.with_ymd_and_hms(2025, 10, 19, 17, 30, 0).unwrap();

    let a = derive_recommendation_at(0.45, -12.5, 1250.50, t1);
    let b = derive_recommendation_at(0.45, -12.5, 1250.50, t2);

    assert!(a.same_advice(&b));
    assert_ne!(a, b);
    assert_eq!(a.timestamp, t1);
}

#[test]
fn test_non_finite_inputs() {
    for (ndvi, deficit, balance) in [
        (f64::NAN, -5.0, 100.0),
        (0.5, f64::NEG_INFINITY, 100.0),
        (0.5, -5.0, f64::INFINITY),
    ] {
        let rec = derive_recommendation(ndvi, deficit, balance);
        assert_eq!(rec.severity, Severity::High);
        assert_relative_eq!(rec.confidence, 0.25);
        assert!(!rec.action.is_empty());
        assert!(!rec.reasoning.is_empty());
        let snapshot = FarmSnapshot::new(ndvi, deficit, balance);
        assert_eq!(select_rule(&snapshot).id, RuleId::DegenerateInput);
    }
}

#[test]
fn test_json_shape() {
    let rec = derive_recommendation(0.68, 5.0, 5000.0);
    let json = serde_json::to_value(&rec).unwrap();

    assert_eq!(json["severity"], "low");
    assert!(json["action"].is_string());
    assert!(json["reasoning"].is_string());
    assert!(json["confidence"].is_f64());
    assert!(json["timestamp"].is_string());
}

// =========================================================================
// Section 6: Properties
// =========================================================================

proptest! {
    #[test]
    fn prop_output_well_formed(
        ndvi in -1.0f64..1.0,
        deficit in -100.0f64..100.0,
        balance in -10_000.0f64..100_000.0,
    ) {
        let rec = derive_recommendation(ndvi, deficit, balance);
        prop_assert!((0.0..=1.0).contains(&rec.confidence));
        prop_assert!(!rec.action.is_empty());
        prop_assert!(!rec.reasoning.is_empty());
    }

    #[test]
    fn prop_deterministic(
        ndvi in -1.0f64..1.0,
        deficit in -100.0f64..100.0,
        balance in -10_000.0f64..100_000.0,
    ) {
        let at = Utc::now();
        let a = derive_recommendation_at(ndvi, deficit, balance, at);
        let b = derive_recommendation_at(ndvi, deficit, balance, at);
        prop_assert_eq!(a, b);
    }

    #[test]
    fn prop_balance_does_not_change_severity(
        ndvi in -1.0f64..1.0,
        deficit in -100.0f64..100.0,
        b1 in -10_000.0f64..100_000.0,
        b2 in -10_000.0f64..100_000.0,
    ) {
        prop_assert_eq!(
            derive_recommendation(ndvi, deficit, b1).severity,
            derive_recommendation(ndvi, deficit, b2).severity
        );
    }

    #[test]
    fn prop_any_f64_is_well_formed(
        ndvi in any::<f64>(),
        deficit in any::<f64>(),
        balance in any::<f64>(),
    ) {
        let rec = derive_recommendation(ndvi, deficit, balance);
        prop_assert!((0.0..=1.0).contains(&rec.confidence));
        prop_assert!(!rec.action.is_empty());
        prop_assert!(!rec.reasoning.is_empty());
    }

    #[test]
    fn prop_huge_healthy_signal_stays_at_top_of_band(
        ndvi in prop::num::f64::NORMAL.prop_map(|x| x.abs().max(1e3)),
        deficit in prop::num::f64::NORMAL.prop_map(f64::abs),
        balance in prop::num::f64::NORMAL,
    ) {
        let rec = derive_recommendation(ndvi, deficit, balance);
        prop_assert_eq!(rec.severity, Severity::Low);
        prop_assert!((rec.confidence - 0.90).abs() < 1e-9);
    }

    #[test]
    fn prop_huge_stress_and_drought_stays_at_top_of_band(
        ndvi in prop::num::f64::NORMAL.prop_map(|x| -x.abs().max(1e3)),
        deficit in prop::num::f64::NORMAL.prop_map(|x| -x.abs().max(1e3)),
        balance in prop::num::f64::NORMAL,
    ) {
        let rec = derive_recommendation(ndvi, deficit, balance);
        prop_assert_eq!(rec.severity, Severity::High);
        prop_assert!((rec.confidence - 0.95).abs() < 1e-9);
    }
}
