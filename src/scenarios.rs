//! Demo Scenarios
//!
//! Canned input triples for the dashboard's scenario switcher, plus feed
//! records synthesized to match each triple.

use std::str::FromStr;

use chrono::{Days, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::farm_data::{
    DailyForecast, FarmGeometry, FinancialSummary, NdviReading, Transaction, WeatherCondition,
    WeatherReport,
};
use crate::recommendation::classify::is_drought;
use crate::recommendation::thresholds::{DROUGHT_DEFICIT_MM, WEEKLY_AVERAGE_RAINFALL_MM};
use crate::recommendation::{rainfall_alert, FarmSnapshot};

pub const DEMO_LOCATION: &str = "Austin, TX";
pub const DEMO_AREA_HECTARES: f64 = 12.5;

/// Past this the synthesized forecast drops its last cloudy day
const VERY_DRY_DEFICIT_MM: f64 = DROUGHT_DEFICIT_MM - 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DemoScenario {
    Healthy,
    Moderate,
    Critical,
}

impl DemoScenario {
    pub const ALL: [DemoScenario; 3] =
        [DemoScenario::Healthy, DemoScenario::Moderate, DemoScenario::Critical];

    pub fn as_str(&self) -> &'static str {
        match self {
            DemoScenario::Healthy => "healthy",
            DemoScenario::Moderate => "moderate",
            DemoScenario::Critical => "critical",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            DemoScenario::Healthy => "Healthy Farm",
            DemoScenario::Moderate => "Moderate Stress",
            DemoScenario::Critical => "Critical Condition",
        }
    }

    pub fn snapshot(&self) -> FarmSnapshot {
        match self {
            DemoScenario::Healthy => FarmSnapshot::new(0.68, 5.0, 5000.0),
            DemoScenario::Moderate => FarmSnapshot::new(0.45, -12.5, 1250.50),
            DemoScenario::Critical => FarmSnapshot::new(0.28, -18.0, 150.0),
        }
    }

    pub fn ndvi_reading(&self, farm_id: &str) -> NdviReading {
        NdviReading::new(farm_id, self.snapshot().ndvi, demo_geometry(), DEMO_AREA_HECTARES)
    }

    /// Forecast shaped by the deficit. The reported total is 30mm + deficit
    /// (floored at 0) rather than the sum of the synthetic days.
    pub fn weather_report(&self) -> WeatherReport {
        let deficit = self.snapshot().rainfall_deficit_mm;
        let dry = is_drought(deficit);
        let very_dry = deficit < VERY_DRY_DEFICIT_MM;
        let clear_if = |flag: bool| if flag { cond("Clear", "01d") } else { cond("Clouds", "02d") };

        let days = [
            (78.0, cond("Rain", "10d"), if very_dry { 0.5 } else { 2.5 }),
            (82.0, clear_if(dry), if dry { 0.0 } else { 1.2 }),
            (85.0, cond("Clear", "01d"), 0.0),
            (79.0, clear_if(very_dry), if very_dry { 0.0 } else { 0.5 }),
            (77.0, cond("Rain", "10d"), if dry { 1.0 } else { 3.2 }),
            (80.0, cond("Clear", "01d"), 0.0),
            (83.0, cond("Clear", "01d"), 0.0),
        ];

        let start = Utc::now().date_naive();
        let forecast = days
            .into_iter()
            .enumerate()
            .map(|(i, (temp, weather, rain))| DailyForecast {
                date: offset_date(start, i as u64),
                temp,
                weather,
                rain,
            })
            .collect();

        WeatherReport {
            location: DEMO_LOCATION.to_string(),
            forecast,
            rainfall_total: (WEEKLY_AVERAGE_RAINFALL_MM + deficit).max(0.0),
            rainfall_deficit: deficit,
            alert: rainfall_alert(deficit).to_string(),
            timestamp: Utc::now(),
        }
    }

    pub fn financial_summary(&self, customer_id: &str) -> FinancialSummary {
        FinancialSummary {
            customer_id: customer_id.to_string(),
            account_id: "67890".to_string(),
            nickname: "Farm Savings Account".to_string(),
            balance: self.snapshot().balance,
            transactions: demo_transactions(),
            timestamp: Utc::now(),
        }
    }
}

impl std::fmt::Display for DemoScenario {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DemoScenario {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "healthy" => Ok(DemoScenario::Healthy),
            "moderate" => Ok(DemoScenario::Moderate),
            "critical" => Ok(DemoScenario::Critical),
            other => Err(format!(
                "Unknown scenario '{}' (expected healthy, moderate or critical)",
                other
            )),
        }
    }
}

fn cond(main: &str, icon: &str) -> WeatherCondition {
    WeatherCondition {
        main: main.to_string(),
        icon: icon.to_string(),
    }
}

fn offset_date(start: NaiveDate, days: u64) -> NaiveDate {
    start.checked_add_days(Days::new(days)).unwrap_or(start)
}

/// Demo field boundary near Austin, TX
pub fn demo_geometry() -> FarmGeometry {
    FarmGeometry::polygon(vec![
        [-97.75, 30.25],
        [-97.74, 30.25],
        [-97.74, 30.24],
        [-97.75, 30.24],
        [-97.75, 30.25],
    ])
}

pub fn demo_transactions() -> Vec<Transaction> {
    vec![
        Transaction {
            date: "2025-10-15".to_string(),
            description: "Fertilizer Supply Co".to_string(),
            amount: -45.00,
        },
        Transaction {
            date: "2025-10-14".to_string(),
            description: "Equipment Rental".to_string(),
            amount: -120.00,
        },
        Transaction {
            date: "2025-10-13".to_string(),
            description: "Seed Purchase".to_string(),
            amount: -230.00,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recommendation::VegetationHealth;

    #[test]
    fn test_parse_names() {
        assert_eq!("critical".parse::<DemoScenario>(), Ok(DemoScenario::Critical));
        assert_eq!(" Healthy ".parse::<DemoScenario>(), Ok(DemoScenario::Healthy));
        assert!("flooded".parse::<DemoScenario>().is_err());
    }

    #[test]
    fn test_synthesized_feeds_match_snapshot() {
        for scenario in DemoScenario::ALL {
            let snap = scenario.snapshot();
            assert_eq!(scenario.ndvi_reading("demo1").ndvi, snap.ndvi);
            assert_eq!(scenario.weather_report().rainfall_deficit, snap.rainfall_deficit_mm);
            assert_eq!(scenario.financial_summary("demo123").balance, snap.balance);
            assert_eq!(scenario.weather_report().forecast.len(), 7);
        }
    }

    #[test]
    fn test_critical_weather() {
        let report = DemoScenario::Critical.weather_report();
        assert_eq!(report.rainfall_total, 12.0);
        assert_eq!(report.alert, "Low rainfall expected next 7 days");
        assert_eq!(report.forecast[0].rain, 0.5);
        assert_eq!(report.forecast[3].weather.main, "Clear");
        assert_eq!(
            DemoScenario::Critical.ndvi_reading("demo1").health,
            VegetationHealth::Stressed
        );
    }

    #[test]
    fn test_healthy_weather() {
        let report = DemoScenario::Healthy.weather_report();
        assert_eq!(report.rainfall_total, 35.0);
        assert_eq!(report.alert, "Normal rainfall expected");
        assert_eq!(report.forecast[1].weather.main, "Clouds");
    }

    #[test]
    fn test_forecast_shape_follows_drought_line() {
        for scenario in DemoScenario::ALL {
            let report = scenario.weather_report();
            let dry_day = &report.forecast[1];
            let drought = is_drought(report.rainfall_deficit);

            assert_eq!(dry_day.weather.main == "Clear", drought, "{}", scenario);
            assert_eq!(dry_day.rain == 0.0, drought, "{}", scenario);
            assert_eq!(report.alert == "Low rainfall expected next 7 days", drought);
        }
    }
}
