use async_trait::async_trait;
use chrono::{Days, Utc};

use super::FarmDataProvider;
use crate::error::ProviderResult;
use crate::farm_data::{
    DailyForecast, FinancialSummary, NdviReading, WeatherCondition, WeatherReport,
};
use crate::scenarios::{
    demo_geometry, demo_transactions, DemoScenario, DEMO_AREA_HECTARES, DEMO_LOCATION,
};

/// Offline provider. Without a scenario it serves the default demo farm:
/// NDVI 0.52, 17.5mm of rain forecast (-12.5mm deficit), balance 1250.50.
#[derive(Debug, Clone, Default)]
pub struct MockFarmData {
    scenario: Option<DemoScenario>,
}

impl MockFarmData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn for_scenario(scenario: DemoScenario) -> Self {
        Self {
            scenario: Some(scenario),
        }
    }

    pub fn ndvi(&self, farm_id: &str) -> NdviReading {
        match self.scenario {
            Some(s) => s.ndvi_reading(farm_id),
            None => NdviReading::new(farm_id, 0.52, demo_geometry(), DEMO_AREA_HECTARES),
        }
    }

    pub fn weather(&self) -> WeatherReport {
        match self.scenario {
            Some(s) => s.weather_report(),
            None => default_weather(),
        }
    }

    pub fn financial(&self, customer_id: &str) -> FinancialSummary {
        match self.scenario {
            Some(s) => s.financial_summary(customer_id),
            None => FinancialSummary {
                customer_id: customer_id.to_string(),
                account_id: "67890".to_string(),
                nickname: "Farm Savings Account".to_string(),
                balance: 1250.50,
                transactions: demo_transactions(),
                timestamp: Utc::now(),
            },
        }
    }
}

#[async_trait]
impl FarmDataProvider for MockFarmData {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn fetch_ndvi(&self, farm_id: &str) -> ProviderResult<NdviReading> {
        Ok(self.ndvi(farm_id))
    }

    async fn fetch_weather(&self, _lat: f64, _lon: f64) -> ProviderResult<WeatherReport> {
        Ok(self.weather())
    }

    async fn fetch_financial(&self, customer_id: &str) -> ProviderResult<FinancialSummary> {
        Ok(self.financial(customer_id))
    }
}

fn default_weather() -> WeatherReport {
    let start = Utc::now().date_naive();
    let days = [
        (81.0, "Clouds", "02d", 4.2),
        (84.0, "Clear", "01d", 0.0),
        (86.0, "Clear", "01d", 0.0),
        (79.0, "Rain", "10d", 1.8),
        (76.0, "Rain", "10d", 6.5),
        (78.0, "Clouds", "03d", 2.0),
        (80.0, "Rain", "09d", 3.0),
    ];

    let forecast = days
        .iter()
        .enumerate()
        .map(|(i, (temp, main, icon, rain))| DailyForecast {
            date: start.checked_add_days(Days::new(i as u64)).unwrap_or(start),
            temp: *temp,
            weather: WeatherCondition {
                main: main.to_string(),
                icon: icon.to_string(),
            },
            rain: *rain,
        })
        .collect();

    WeatherReport::from_forecast(DEMO_LOCATION, forecast)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[tokio::test]
    async fn test_default_dataset() {
        let mock = MockFarmData::new();
        let ndvi = mock.fetch_ndvi("demo1").await.unwrap();
        let weather = mock.fetch_weather(30.2, -97.7).await.unwrap();
        let financial = mock.fetch_financial("demo").await.unwrap();

        assert_eq!(ndvi.ndvi, 0.52);
        assert_relative_eq!(weather.rainfall_total, 17.5, epsilon = 1e-9);
        assert_relative_eq!(weather.rainfall_deficit, -12.5, epsilon = 1e-9);
        assert_eq!(financial.balance, 1250.50);
        assert_eq!(financial.transactions.len(), 3);
    }

    #[tokio::test]
    async fn test_scenario_dataset() {
        let mock = MockFarmData::for_scenario(DemoScenario::Critical);
        assert_eq!(mock.fetch_ndvi("demo1").await.unwrap().ndvi, 0.28);
        assert_eq!(mock.fetch_financial("demo").await.unwrap().balance, 150.0);
    }
}
