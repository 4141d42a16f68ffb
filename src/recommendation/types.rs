//! Recommendation Types
//!
//! Value objects produced and consumed by the decision engine. Everything here
//! is `Copy` or owned data; the engine holds no state between calls.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Urgency tier of a recommendation
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
        }
    }

    pub fn color(&self) -> ColorToken {
        match self {
            Severity::Low => ColorToken::Green,
            Severity::Medium => ColorToken::Amber,
            Severity::High => ColorToken::Red,
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Vegetation health band derived from NDVI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VegetationHealth {
    /// ndvi > 0.6
    Healthy,
    /// 0.4 < ndvi <= 0.6
    Moderate,
    /// ndvi <= 0.4 (and NaN)
    Stressed,
}

impl VegetationHealth {
    pub fn as_str(&self) -> &'static str {
        match self {
            VegetationHealth::Healthy => "healthy",
            VegetationHealth::Moderate => "moderate",
            VegetationHealth::Stressed => "stressed",
        }
    }

    pub fn color(&self) -> ColorToken {
        match self {
            VegetationHealth::Healthy => ColorToken::Green,
            VegetationHealth::Moderate => ColorToken::Amber,
            VegetationHealth::Stressed => ColorToken::Red,
        }
    }
}

/// Financial band used to pick the action text inside a severity band.
/// Never affects severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BalanceTier {
    Strong,
    Moderate,
    Low,
    Overdrawn,
}

impl BalanceTier {
    pub fn display_text(&self) -> &'static str {
        match self {
            BalanceTier::Strong => "strong",
            BalanceTier::Moderate => "moderate",
            BalanceTier::Low => "low",
            BalanceTier::Overdrawn => "overdrawn",
        }
    }
}

/// Three-color display palette shared by severity and vegetation health
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorToken {
    Green,
    Amber,
    Red,
}

impl ColorToken {
    pub fn hex(&self) -> &'static str {
        match self {
            ColorToken::Green => "#00FF41",
            ColorToken::Amber => "#FFB800",
            ColorToken::Red => "#FF3864",
        }
    }
}

/// The input triple, treated as one atomic observation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FarmSnapshot {
    pub ndvi: f64,
    pub rainfall_deficit_mm: f64,
    pub balance: f64,
}

impl FarmSnapshot {
    pub fn new(ndvi: f64, rainfall_deficit_mm: f64, balance: f64) -> Self {
        Self {
            ndvi,
            rainfall_deficit_mm,
            balance,
        }
    }

    pub fn is_finite(&self) -> bool {
        self.ndvi.is_finite() && self.rainfall_deficit_mm.is_finite() && self.balance.is_finite()
    }
}

/// Engine output. Created fresh on every evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub severity: Severity,
    pub action: String,
    pub reasoning: String,
    /// Always within [0, 1]
    pub confidence: f64,
    pub timestamp: DateTime<Utc>,
}

impl Recommendation {
    /// Compare everything except the timestamp
    pub fn same_advice(&self, other: &Recommendation) -> bool {
        self.severity == other.severity
            && self.action == other.action
            && self.reasoning == other.reasoning
            && self.confidence == other.confidence
    }
}
