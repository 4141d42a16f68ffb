//! Dashboard Session
//!
//! Gathers the three feeds, hands the (ndvi, deficit, balance) triple to the
//! engine once all three are in, and keeps the latest view. A failed refresh
//! leaves the previous view in place.

use std::sync::Arc;

use serde::Serialize;

use crate::config::FarmLocation;
use crate::error::ProviderResult;
use crate::farm_data::{FinancialSummary, NdviReading, WeatherReport};
use crate::providers::FarmDataProvider;
use crate::recommendation::{derive_recommendation, FarmSnapshot, Recommendation};
use crate::scenarios::DemoScenario;

/// Everything the dashboard renders for one evaluation
#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub ndvi: NdviReading,
    pub weather: WeatherReport,
    pub financial: FinancialSummary,
    pub recommendation: Recommendation,
    /// Set when the view came from a demo scenario
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scenario: Option<DemoScenario>,
}

impl DashboardView {
    /// Derive the recommendation from three complete feeds
    pub fn assemble(
        ndvi: NdviReading,
        weather: WeatherReport,
        financial: FinancialSummary,
        scenario: Option<DemoScenario>,
    ) -> Self {
        let recommendation =
            derive_recommendation(ndvi.ndvi, weather.rainfall_deficit, financial.balance);

        Self {
            ndvi,
            weather,
            financial,
            recommendation,
            scenario,
        }
    }

    pub fn snapshot(&self) -> FarmSnapshot {
        FarmSnapshot::new(self.ndvi.ndvi, self.weather.rainfall_deficit, self.financial.balance)
    }

    pub fn for_scenario(scenario: DemoScenario, farm: &FarmLocation) -> Self {
        Self::assemble(
            scenario.ndvi_reading(&farm.farm_id),
            scenario.weather_report(),
            scenario.financial_summary(&farm.customer_id),
            Some(scenario),
        )
    }
}

/// Fetch all three feeds concurrently and build a view
pub async fn load_view(
    provider: &dyn FarmDataProvider,
    farm: &FarmLocation,
) -> ProviderResult<DashboardView> {
    let (ndvi, weather, financial) = tokio::join!(
        provider.fetch_ndvi(&farm.farm_id),
        provider.fetch_weather(farm.lat, farm.lon),
        provider.fetch_financial(&farm.customer_id),
    );

    Ok(DashboardView::assemble(ndvi?, weather?, financial?, None))
}

pub struct Dashboard {
    provider: Arc<dyn FarmDataProvider>,
    farm: FarmLocation,
    current: Option<DashboardView>,
}

impl Dashboard {
    pub fn new(provider: Arc<dyn FarmDataProvider>, farm: FarmLocation) -> Self {
        Self {
            provider,
            farm,
            current: None,
        }
    }

    pub fn current(&self) -> Option<&DashboardView> {
        self.current.as_ref()
    }

    pub fn farm(&self) -> &FarmLocation {
        &self.farm
    }

    /// Re-fetch every feed and replace the current view
    pub async fn refresh(&mut self) -> ProviderResult<&DashboardView> {
        tracing::debug!("Refreshing dashboard via {} provider", self.provider.name());

        match load_view(self.provider.as_ref(), &self.farm).await {
            Ok(view) => {
                tracing::info!(
                    "Recommendation: {} ({:.0}% confidence)",
                    view.recommendation.severity,
                    view.recommendation.confidence * 100.0
                );
                Ok(&*self.current.insert(view))
            }
            Err(e) => {
                tracing::warn!("Dashboard refresh failed, keeping previous view: {}", e);
                Err(e)
            }
        }
    }

    /// Swap in a demo scenario's canned feeds
    pub fn apply_scenario(&mut self, scenario: DemoScenario) -> &DashboardView {
        tracing::info!("Switching to {} scenario", scenario);
        self.current.insert(DashboardView::for_scenario(scenario, &self.farm))
    }

    /// Re-run the engine on the current feeds (new timestamp, same advice)
    pub fn rederive(&mut self) -> Option<&DashboardView> {
        let view = self.current.as_mut()?;
        let snap = view.snapshot();
        view.recommendation =
            derive_recommendation(snap.ndvi, snap.rainfall_deficit_mm, snap.balance);
        Some(&*view)
    }
}
