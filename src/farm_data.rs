//! Feed Records
//!
//! Serializable records for the three upstream feeds (vegetation, weather,
//! finance). Field names match the JSON the dashboard consumes.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::recommendation::thresholds::WEEKLY_AVERAGE_RAINFALL_MM;
use crate::recommendation::{classify_vegetation_health, rainfall_alert, VegetationHealth};

// ============================================================================
// Vegetation
// ============================================================================

/// GeoJSON-style polygon; each ring is a list of [lon, lat] pairs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FarmGeometry {
    #[serde(rename = "type")]
    pub kind: String,
    pub coordinates: Vec<Vec<[f64; 2]>>,
}

impl FarmGeometry {
    pub fn polygon(ring: Vec<[f64; 2]>) -> Self {
        Self {
            kind: "Polygon".to_string(),
            coordinates: vec![ring],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NdviReading {
    #[serde(rename = "farmId")]
    pub farm_id: String,
    pub ndvi: f64,
    pub health: VegetationHealth,
    pub timestamp: DateTime<Utc>,
    pub geometry: FarmGeometry,
    pub area_hectares: f64,
}

impl NdviReading {
    /// Build a reading with `health` derived from `ndvi`
    pub fn new(farm_id: &str, ndvi: f64, geometry: FarmGeometry, area_hectares: f64) -> Self {
        Self {
            farm_id: farm_id.to_string(),
            ndvi,
            health: classify_vegetation_health(ndvi),
            timestamp: Utc::now(),
            geometry,
            area_hectares,
        }
    }
}

// ============================================================================
// Weather
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherCondition {
    pub main: String,
    pub icon: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyForecast {
    pub date: NaiveDate,
    /// Daytime temperature (°F)
    pub temp: f64,
    pub weather: WeatherCondition,
    /// Rain (mm)
    pub rain: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    pub location: String,
    pub forecast: Vec<DailyForecast>,
    pub rainfall_total: f64,
    pub rainfall_deficit: f64,
    pub alert: String,
    pub timestamp: DateTime<Utc>,
}

impl WeatherReport {
    /// Total the forecast rain and derive the deficit against the weekly average
    pub fn from_forecast(location: &str, forecast: Vec<DailyForecast>) -> Self {
        let rainfall_total: f64 = forecast.iter().map(|d| d.rain).sum();
        let rainfall_deficit = rainfall_total - WEEKLY_AVERAGE_RAINFALL_MM;

        Self {
            location: location.to_string(),
            forecast,
            rainfall_total,
            rainfall_deficit,
            alert: rainfall_alert(rainfall_deficit).to_string(),
            timestamp: Utc::now(),
        }
    }
}

// ============================================================================
// Finance
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub date: String,
    pub description: String,
    /// Negative for purchases
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialSummary {
    #[serde(rename = "customerId")]
    pub customer_id: String,
    #[serde(rename = "accountId")]
    pub account_id: String,
    pub nickname: String,
    pub balance: f64,
    pub transactions: Vec<Transaction>,
    pub timestamp: DateTime<Utc>,
}
