//! Decision thresholds
//!
//! Band edges shared by the classifiers and the rule table. The three demo
//! scenarios (healthy 0.68/+5/5000, moderate 0.45/-12.5/1250.50,
//! critical 0.28/-18/150) must keep landing in low/medium/high.

/// ndvi strictly above this is healthy
pub const NDVI_HEALTHY_ABOVE: f64 = 0.6;

/// ndvi at or below this is stressed
pub const NDVI_STRESSED_AT_OR_BELOW: f64 = 0.4;

/// Rainfall deficit (mm) strictly below this is a drought
pub const DROUGHT_DEFICIT_MM: f64 = -10.0;

/// Rainfall deficit (mm) strictly below this is a shortfall
pub const SHORTFALL_DEFICIT_MM: f64 = -5.0;

/// Expected weekly rainfall used to turn a forecast total into a deficit
pub const WEEKLY_AVERAGE_RAINFALL_MM: f64 = 30.0;

pub const BALANCE_STRONG_AT_LEAST: f64 = 3000.0;

/// Non-negative balances below this are low; negative balances are overdrawn
pub const BALANCE_LOW_BELOW: f64 = 1000.0;

// Confidence bases and spans per band. Final confidence = base + span * margin,
// margin in [0, 1].
pub const CONFIDENCE_HIGH_BASE: f64 = 0.80;
pub const CONFIDENCE_MEDIUM_BASE: f64 = 0.60;
pub const CONFIDENCE_LOW_BASE: f64 = 0.75;
pub const CONFIDENCE_SPAN: f64 = 0.15;

/// Confidence reported when the input triple is not finite
pub const CONFIDENCE_DEGENERATE: f64 = 0.25;

/// Deficit (mm) beyond the drought line at which corroboration saturates
pub const DEFICIT_SATURATION_MM: f64 = 20.0;
