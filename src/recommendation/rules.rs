//! Ordered Rule Table
//!
//! The decision list is a static, ordered table of (predicate, outcome)
//! entries. Evaluation walks the table top to bottom and the first matching
//! rule wins; rules never combine or vote. Vegetation and rainfall decide which
//! rule fires (and so the severity); the balance only picks the action text
//! inside that rule via its `ActionLadder`.

use super::classify::{classify_balance, classify_vegetation_health, is_drought, is_shortfall};
use super::thresholds::*;
use super::types::{BalanceTier, FarmSnapshot, Severity, VegetationHealth};

/// Stable identifier for a rule table entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleId {
    DegenerateInput,
    StressAndDrought,
    VegetationStress,
    ModerateVegetation,
    RainfallShortfall,
    HealthyConditions,
}

impl RuleId {
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleId::DegenerateInput => "degenerate_input",
            RuleId::StressAndDrought => "stress_and_drought",
            RuleId::VegetationStress => "vegetation_stress",
            RuleId::ModerateVegetation => "moderate_vegetation",
            RuleId::RainfallShortfall => "rainfall_shortfall",
            RuleId::HealthyConditions => "healthy_conditions",
        }
    }
}

/// One action per balance tier
#[derive(Debug, Clone, Copy)]
pub struct ActionLadder {
    pub strong: &'static str,
    pub moderate: &'static str,
    pub low: &'static str,
    pub overdrawn: &'static str,
}

impl ActionLadder {
    pub fn pick(&self, tier: BalanceTier) -> &'static str {
        match tier {
            BalanceTier::Strong => self.strong,
            BalanceTier::Moderate => self.moderate,
            BalanceTier::Low => self.low,
            BalanceTier::Overdrawn => self.overdrawn,
        }
    }
}

/// A single entry of the decision list
pub struct Rule {
    pub id: RuleId,
    pub severity: Severity,
    pub actions: ActionLadder,
    /// Confidence when `margin` is 0; the rule reports base + CONFIDENCE_SPAN * margin
    pub base_confidence: f64,
    matches: fn(&FarmSnapshot) -> bool,
    margin: fn(&FarmSnapshot) -> f64,
    reasoning: fn(&FarmSnapshot) -> String,
}

impl Rule {
    pub fn matches(&self, snapshot: &FarmSnapshot) -> bool {
        (self.matches)(snapshot)
    }

    /// Confidence for this rule, clamped to [0, 1]
    pub fn confidence(&self, snapshot: &FarmSnapshot) -> f64 {
        let margin = (self.margin)(snapshot);
        // Overflow to +inf saturates like any other large margin
        let margin = if margin.is_nan() { 0.0 } else { margin.clamp(0.0, 1.0) };
        (self.base_confidence + CONFIDENCE_SPAN * margin).clamp(0.0, 1.0)
    }

    pub fn action(&self, snapshot: &FarmSnapshot) -> &'static str {
        self.actions.pick(classify_balance(snapshot.balance))
    }

    pub fn reasoning(&self, snapshot: &FarmSnapshot) -> String {
        (self.reasoning)(snapshot)
    }
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule")
            .field("id", &self.id)
            .field("severity", &self.severity)
            .field("base_confidence", &self.base_confidence)
            .finish()
    }
}

// ============================================================================
// Rule Table (priority order)
// ============================================================================

pub static RULES: [Rule; 6] = [
    Rule {
        id: RuleId::DegenerateInput,
        severity: Severity::High,
        actions: ActionLadder {
            strong: "Re-check feed data before committing any funds",
            moderate: "Re-check feed data before committing any funds",
            low: "Re-check feed data before committing any funds",
            overdrawn: "Re-check feed data before committing any funds",
        },
        base_confidence: CONFIDENCE_DEGENERATE,
        matches: |s: &FarmSnapshot| !s.is_finite(),
        margin: |_: &FarmSnapshot| 0.0,
        reasoning: reason_degenerate,
    },
    Rule {
        id: RuleId::StressAndDrought,
        severity: Severity::High,
        actions: ActionLadder {
            strong: "Fund emergency irrigation immediately from cash reserves",
            moderate:
                "Release reserves for emergency irrigation and apply for drought relief funding",
            low: "Apply for an emergency irrigation loan immediately",
            overdrawn:
                "Seek emergency drought financing immediately and pause non-essential spending",
        },
        base_confidence: CONFIDENCE_HIGH_BASE,
        matches: |s: &FarmSnapshot| {
            classify_vegetation_health(s.ndvi) == VegetationHealth::Stressed
                && is_drought(s.rainfall_deficit_mm)
        },
        margin: |s: &FarmSnapshot| {
            (stress_depth(s.ndvi) + drought_depth(s.rainfall_deficit_mm)) / 2.0
        },
        reasoning: reason_stress_and_drought,
    },
    Rule {
        id: RuleId::VegetationStress,
        severity: Severity::Medium,
        actions: ActionLadder {
            strong: "Investigate crop stress and budget for soil and pest treatment",
            moderate: "Reallocate budget toward crop treatment and scouting",
            low: "Reallocate spending toward crop treatment and build a cash reserve",
            overdrawn: "Prioritize low-cost crop treatment and restructure outstanding debt",
        },
        base_confidence: CONFIDENCE_MEDIUM_BASE,
        matches: |s: &FarmSnapshot| {
            classify_vegetation_health(s.ndvi) == VegetationHealth::Stressed
        },
        margin: |s: &FarmSnapshot| stress_depth(s.ndvi),
        reasoning: reason_vegetation_stress,
    },
    Rule {
        id: RuleId::ModerateVegetation,
        severity: Severity::Medium,
        actions: ActionLadder {
            strong: "Invest in supplemental irrigation to protect yield",
            moderate: "Reallocate budget toward irrigation and monitor crop health weekly",
            low: "Build an irrigation reserve and monitor crop health weekly",
            overdrawn: "Limit discretionary spending and arrange an irrigation credit line",
        },
        base_confidence: CONFIDENCE_MEDIUM_BASE,
        matches: |s: &FarmSnapshot| {
            classify_vegetation_health(s.ndvi) == VegetationHealth::Moderate
        },
        margin: |s: &FarmSnapshot| {
            let to_edge = (s.ndvi - NDVI_STRESSED_AT_OR_BELOW).min(NDVI_HEALTHY_ABOVE - s.ndvi);
            to_edge / ((NDVI_HEALTHY_ABOVE - NDVI_STRESSED_AT_OR_BELOW) / 2.0)
        },
        reasoning: reason_moderate_vegetation,
    },
    Rule {
        id: RuleId::RainfallShortfall,
        severity: Severity::Medium,
        actions: ActionLadder {
            strong: "Schedule supplemental irrigation for the dry spell",
            moderate: "Set aside funds for supplemental irrigation",
            low: "Build a water-cost reserve before the dry spell deepens",
            overdrawn: "Arrange short-term credit for irrigation costs",
        },
        base_confidence: CONFIDENCE_MEDIUM_BASE,
        matches: |s: &FarmSnapshot| is_shortfall(s.rainfall_deficit_mm),
        margin: |s: &FarmSnapshot| {
            (SHORTFALL_DEFICIT_MM - s.rainfall_deficit_mm) / DEFICIT_SATURATION_MM
        },
        reasoning: reason_rainfall_shortfall,
    },
    Rule {
        id: RuleId::HealthyConditions,
        severity: Severity::Low,
        actions: ActionLadder {
            strong: "Consider expanding acreage or investing in yield upgrades",
            moderate: "Maintain current practices and grow your operating reserve",
            low: "Maintain current practices and build savings",
            overdrawn: "Maintain current practices and pay down outstanding debt",
        },
        base_confidence: CONFIDENCE_LOW_BASE,
        matches: |_: &FarmSnapshot| true,
        margin: |s: &FarmSnapshot| (s.ndvi - NDVI_HEALTHY_ABOVE) / (1.0 - NDVI_HEALTHY_ABOVE),
        reasoning: reason_healthy,
    },
];

/// First matching rule. The last entry matches everything.
pub fn select_rule(snapshot: &FarmSnapshot) -> &'static Rule {
    RULES
        .iter()
        .find(|rule| rule.matches(snapshot))
        .unwrap_or(&RULES[RULES.len() - 1])
}

// ============================================================================
// Margins
// ============================================================================

/// 0 at the stress line, 1 at ndvi = 0
fn stress_depth(ndvi: f64) -> f64 {
    ((NDVI_STRESSED_AT_OR_BELOW - ndvi) / NDVI_STRESSED_AT_OR_BELOW).clamp(0.0, 1.0)
}

/// 0 at the drought line, 1 at DEFICIT_SATURATION_MM past it
fn drought_depth(deficit_mm: f64) -> f64 {
    ((DROUGHT_DEFICIT_MM - deficit_mm) / DEFICIT_SATURATION_MM).clamp(0.0, 1.0)
}

// ============================================================================
// Reasoning text
// ============================================================================

fn describe_rainfall(deficit_mm: f64) -> String {
    if deficit_mm < 0.0 {
        format!("{:.1}mm below average", -deficit_mm)
    } else if deficit_mm > 0.0 {
        format!("{:.1}mm above average", deficit_mm)
    } else {
        "at the weekly average".to_string()
    }
}

fn finance_note(balance: f64) -> String {
    match classify_balance(balance) {
        BalanceTier::Overdrawn => format!("The account is overdrawn by ${:.2}.", -balance),
        tier => format!("Account balance of ${:.2} is {}.", balance, tier.display_text()),
    }
}

fn reason_degenerate(s: &FarmSnapshot) -> String {
    format!(
        "Inputs are not all finite numbers (NDVI {}, rainfall deficit {}, balance {}), \
         so field conditions cannot be assessed. \
         Treating the farm as high risk until the data is re-checked.",
        s.ndvi, s.rainfall_deficit_mm, s.balance
    )
}

fn reason_stress_and_drought(s: &FarmSnapshot) -> String {
    format!(
        "NDVI of {:.2} indicates stressed vegetation and rainfall is {} for the next 7 days. \
         Both signals point to crop loss without irrigation. {}",
        s.ndvi,
        describe_rainfall(s.rainfall_deficit_mm),
        finance_note(s.balance)
    )
}

fn reason_vegetation_stress(s: &FarmSnapshot) -> String {
    format!(
        "NDVI of {:.2} indicates stressed vegetation even though rainfall is {}. {}",
        s.ndvi,
        describe_rainfall(s.rainfall_deficit_mm),
        finance_note(s.balance)
    )
}

fn reason_moderate_vegetation(s: &FarmSnapshot) -> String {
    format!(
        "NDVI of {:.2} indicates moderate crop stress. {}",
        s.ndvi,
        finance_note(s.balance)
    )
}

fn reason_rainfall_shortfall(s: &FarmSnapshot) -> String {
    format!(
        "Rainfall is {} for the next 7 days while vegetation is still holding up (NDVI {:.2}). {}",
        describe_rainfall(s.rainfall_deficit_mm),
        s.ndvi,
        finance_note(s.balance)
    )
}

fn reason_healthy(s: &FarmSnapshot) -> String {
    format!(
        "NDVI of {:.2} shows healthy vegetation and rainfall is {}. {}",
        s.ndvi,
        describe_rainfall(s.rainfall_deficit_mm),
        finance_note(s.balance)
    )
}
