//! AgriSight
//!
//! Farm-level agronomic advice from three signals: vegetation index (NDVI),
//! forecast rainfall deficit, and the farm account balance.
//!
//! Structure:
//! - `recommendation/`: Thresholds, rule table and the pure decision engine
//! - `farm_data`: Feed records (NDVI, weather, financial)
//! - `providers/`: Mock and live feed providers behind one trait
//! - `scenarios`: Canned healthy / moderate / critical demo states
//! - `dashboard`: Fetch-then-derive session state
//! - `api_server`: Axum REST boundary (`api` feature)

pub mod recommendation;
pub mod farm_data;
pub mod providers;
pub mod scenarios;
pub mod dashboard;
pub mod config;
pub mod error;

#[cfg(feature = "api")]
pub mod api_server;

// Re-export commonly used types
pub use recommendation::{
    classify_vegetation_health, color_for_severity, color_for_vegetation_index,
    derive_recommendation, derive_recommendation_at, FarmSnapshot, Recommendation, Severity,
    VegetationHealth,
};
pub use scenarios::DemoScenario;
pub use dashboard::{Dashboard, DashboardView};
pub use providers::{FarmDataProvider, MockFarmData};
pub use config::{FarmLocation, ServerConfig};
pub use error::{ProviderError, ProviderResult};

#[cfg(feature = "api")]
pub use api_server::{create_router, AppState};
