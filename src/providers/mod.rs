//! Farm Data Providers
//!
//! The engine never knows where its three numbers come from. Callers inject a
//! `FarmDataProvider`:
//! - `MockFarmData` - built-in demo dataset or a demo scenario
//! - `LiveFarmData` - OpenWeatherMap + Nessie, falling back to mock (`live` feature)

use async_trait::async_trait;

use crate::error::ProviderResult;
use crate::farm_data::{FinancialSummary, NdviReading, WeatherReport};

pub mod mock;
#[cfg(feature = "live")]
pub mod live;

pub use mock::MockFarmData;
#[cfg(feature = "live")]
pub use live::LiveFarmData;

#[async_trait]
pub trait FarmDataProvider: Send + Sync {
    /// Short name for logs and the status endpoint
    fn name(&self) -> &'static str;

    async fn fetch_ndvi(&self, farm_id: &str) -> ProviderResult<NdviReading>;

    async fn fetch_weather(&self, lat: f64, lon: f64) -> ProviderResult<WeatherReport>;

    async fn fetch_financial(&self, customer_id: &str) -> ProviderResult<FinancialSummary>;
}
