//! Recommendation Engine
//!
//! Maps (ndvi, rainfall deficit, balance) to a `Recommendation` by selecting
//! the first matching entry of the rule table. Pure and synchronous; safe to
//! call from any number of tasks at once.

use chrono::{DateTime, Utc};

use super::rules::select_rule;
use super::types::{FarmSnapshot, Recommendation};

/// Derive a recommendation stamped with the current time.
///
/// Never fails. Non-finite inputs resolve to the degenerate-input rule
/// (high severity, confidence 0.25).
pub fn derive_recommendation(ndvi: f64, rainfall_deficit_mm: f64, balance: f64) -> Recommendation {
    derive_recommendation_at(ndvi, rainfall_deficit_mm, balance, Utc::now())
}

/// Same as `derive_recommendation` with an explicit timestamp
pub fn derive_recommendation_at(
    ndvi: f64,
    rainfall_deficit_mm: f64,
    balance: f64,
    at: DateTime<Utc>,
) -> Recommendation {
    evaluate(&FarmSnapshot::new(ndvi, rainfall_deficit_mm, balance), at)
}

pub fn evaluate(snapshot: &FarmSnapshot, at: DateTime<Utc>) -> Recommendation {
    let rule = select_rule(snapshot);

    Recommendation {
        severity: rule.severity,
        action: rule.action(snapshot).to_string(),
        reasoning: rule.reasoning(snapshot),
        confidence: rule.confidence(snapshot),
        timestamp: at,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recommendation::types::Severity;

    #[test]
    fn test_timestamp_is_passed_through() {
        let at = Utc::now();
        let rec = derive_recommendation_at(0.7, 0.0, 2000.0, at);
        assert_eq!(rec.timestamp, at);
    }

    #[test]
    fn test_fields_populated() {
        let rec = derive_recommendation(0.52, -12.5, 1250.50);
        assert_eq!(rec.severity, Severity::Medium);
        assert!(!rec.action.is_empty());
        assert!(rec.reasoning.contains("0.52"));
    }

    #[test]
    fn test_serializes_lowercase_severity() {
        let rec = derive_recommendation(0.28, -18.0, 150.0);
        let json = serde_json::to_value(&rec).unwrap();
        assert_eq!(json["severity"], "high");
        assert!(json["timestamp"].is_string());
    }
}
