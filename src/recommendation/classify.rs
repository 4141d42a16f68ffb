//! Classification helpers for the recommendation engine.
//!
//! All helpers are pure. The color helpers go through the same band
//! classification so the dashboard never shows a red badge next to a
//! "healthy" label.

use super::thresholds::*;
use super::types::{BalanceTier, ColorToken, Severity, VegetationHealth};

// ============================================================================
// Vegetation Health
// ============================================================================

/// Classify NDVI into a health band.
/// Upper bound of each band is inclusive:
/// - ndvi > 0.6: Healthy
/// - 0.4 < ndvi <= 0.6: Moderate
/// - ndvi <= 0.4: Stressed
///
/// NaN compares false against both edges and lands in Stressed.
pub fn classify_vegetation_health(ndvi: f64) -> VegetationHealth {
    if ndvi > NDVI_HEALTHY_ABOVE {
        VegetationHealth::Healthy
    } else if ndvi > NDVI_STRESSED_AT_OR_BELOW {
        VegetationHealth::Moderate
    } else {
        VegetationHealth::Stressed
    }
}

/// Display color for an NDVI value (green / amber / red)
pub fn color_for_vegetation_index(ndvi: f64) -> ColorToken {
    classify_vegetation_health(ndvi).color()
}

// ============================================================================
// Severity
// ============================================================================

/// Display color for a severity tier. High severity is always the alarm color.
pub fn color_for_severity(severity: Severity) -> ColorToken {
    severity.color()
}

// ============================================================================
// Finances
// ============================================================================

/// Classify account balance.
/// - >= 3000: Strong
/// - 1000..3000: Moderate
/// - 0..1000: Low
/// - < 0 (or NaN): Overdrawn
pub fn classify_balance(balance: f64) -> BalanceTier {
    if balance >= BALANCE_STRONG_AT_LEAST {
        BalanceTier::Strong
    } else if balance >= BALANCE_LOW_BELOW {
        BalanceTier::Moderate
    } else if balance >= 0.0 {
        BalanceTier::Low
    } else {
        BalanceTier::Overdrawn
    }
}

// ============================================================================
// Rainfall
// ============================================================================

pub fn is_drought(rainfall_deficit_mm: f64) -> bool {
    rainfall_deficit_mm < DROUGHT_DEFICIT_MM
}

pub fn is_shortfall(rainfall_deficit_mm: f64) -> bool {
    rainfall_deficit_mm < SHORTFALL_DEFICIT_MM
}

/// Alert line shown on the weather card for a 7-day deficit
pub fn rainfall_alert(rainfall_deficit_mm: f64) -> &'static str {
    if is_drought(rainfall_deficit_mm) {
        "Low rainfall expected next 7 days"
    } else {
        "Normal rainfall expected"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vegetation_bands() {
        assert_eq!(classify_vegetation_health(0.85), VegetationHealth::Healthy);
        assert_eq!(classify_vegetation_health(0.61), VegetationHealth::Healthy);
        assert_eq!(classify_vegetation_health(0.6), VegetationHealth::Moderate);
        assert_eq!(classify_vegetation_health(0.45), VegetationHealth::Moderate);
        assert_eq!(classify_vegetation_health(0.4), VegetationHealth::Stressed);
        assert_eq!(classify_vegetation_health(0.0), VegetationHealth::Stressed);
        assert_eq!(classify_vegetation_health(-0.3), VegetationHealth::Stressed);
    }

    #[test]
    fn test_nan_ndvi_is_stressed() {
        assert_eq!(classify_vegetation_health(f64::NAN), VegetationHealth::Stressed);
        assert_eq!(color_for_vegetation_index(f64::NAN), ColorToken::Red);
    }

    #[test]
    fn test_palette_consistency() {
        assert_eq!(color_for_severity(Severity::High), color_for_vegetation_index(0.2));
        assert_eq!(color_for_severity(Severity::Medium), color_for_vegetation_index(0.5));
        assert_eq!(color_for_severity(Severity::Low), color_for_vegetation_index(0.8));
    }

    #[test]
    fn test_balance_tiers() {
        assert_eq!(classify_balance(5000.0), BalanceTier::Strong);
        assert_eq!(classify_balance(3000.0), BalanceTier::Strong);
        assert_eq!(classify_balance(1250.50), BalanceTier::Moderate);
        assert_eq!(classify_balance(1000.0), BalanceTier::Moderate);
        assert_eq!(classify_balance(150.0), BalanceTier::Low);
        assert_eq!(classify_balance(0.0), BalanceTier::Low);
        assert_eq!(classify_balance(-20.0), BalanceTier::Overdrawn);
    }

    #[test]
    fn test_rainfall_alert() {
        assert_eq!(rainfall_alert(-12.5), "Low rainfall expected next 7 days");
        assert_eq!(rainfall_alert(-10.0), "Normal rainfall expected");
        assert_eq!(rainfall_alert(4.0), "Normal rainfall expected");
    }
}
