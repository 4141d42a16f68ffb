//! Recommendation Decision Engine
//!
//! Turns a farm's vegetation index, rainfall deficit and account balance into
//! a single prioritized financial recommendation.
//!
//! ## Architecture
//! - `types.rs` - Severity, VegetationHealth, BalanceTier, ColorToken, Recommendation
//! - `thresholds.rs` - Band edges and confidence constants
//! - `classify.rs` - Pure band classifiers and display colors
//! - `rules.rs` - Ordered (predicate, outcome) rule table
//! - `engine.rs` - `derive_recommendation`

pub mod types;
pub mod thresholds;
pub mod classify;
pub mod rules;
pub mod engine;

// Re-export public API
pub use types::{BalanceTier, ColorToken, FarmSnapshot, Recommendation, Severity, VegetationHealth};
pub use classify::{
    classify_balance, classify_vegetation_health, color_for_severity, color_for_vegetation_index,
    rainfall_alert,
};
pub use rules::{select_rule, Rule, RuleId, RULES};
pub use engine::{derive_recommendation, derive_recommendation_at, evaluate};
