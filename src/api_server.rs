// Axum API Server Module
//
// Purpose: REST boundary over the feed providers and the recommendation engine.
// Every response uses the {success, data|error, timestamp} envelope.

use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use moka::future::Cache;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};

use crate::config::ServerConfig;
use crate::dashboard::{load_view, DashboardView};
use crate::error::ProviderError;
use crate::providers::{FarmDataProvider, LiveFarmData};
use crate::recommendation::derive_recommendation;
use crate::scenarios::DemoScenario;

// Used when GET /api/recommendation omits a parameter
const DEFAULT_NDVI: f64 = 0.52;
const DEFAULT_RAINFALL_DEFICIT: f64 = -12.5;
const DEFAULT_BALANCE: f64 = 1250.50;

const INVALID_INPUT_MESSAGE: &str =
    "Invalid input parameters. Expected: ndvi (number), rainfallDeficit (number), balance (number)";

// ============================================================================
// Application State
// ============================================================================

#[derive(Clone)]
pub struct AppState {
    pub provider: Arc<dyn FarmDataProvider>,
    /// Feed responses only; recommendations are never cached
    pub cache: Cache<String, serde_json::Value>,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    /// Live provider with mock fallback
    pub fn new(config: ServerConfig) -> Self {
        let provider = Arc::new(LiveFarmData::from_config(&config));
        Self::with_provider(config, provider)
    }

    pub fn with_provider(config: ServerConfig, provider: Arc<dyn FarmDataProvider>) -> Self {
        tracing::info!("Initializing Moka cache (TTL {:?})...", config.cache_ttl);
        let cache = Cache::builder()
            .max_capacity(1_000)
            .time_to_live(config.cache_ttl)
            .build();

        tracing::info!("Using {} data provider", provider.name());

        Self {
            provider,
            cache,
            config: Arc::new(config),
        }
    }
}

// ============================================================================
// Router
// ============================================================================

pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health_check))
        .route("/api/status", get(get_status))

        // Feed endpoints (cached)
        .route("/api/ndvi", get(get_ndvi))
        .route("/api/weather", get(get_weather))
        .route("/api/financial", get(get_financial))

        // Recommendation endpoints
        .route("/api/recommendation", get(recommend_from_query).post(recommend_from_body))
        .route("/api/dashboard", get(get_dashboard))
        .route("/api/scenarios/:name", get(get_scenario))

        // Middleware (applied in reverse order)
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// ============================================================================
// Endpoint Handlers
// ============================================================================

async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

async fn get_status(State(state): State<AppState>) -> Json<ApiResponse<serde_json::Value>> {
    let configured = |key: &Option<String>| {
        if key.is_some() { "configured" } else { "not_configured" }
    };

    ApiResponse::ok(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "services": {
            "api": "operational",
            "provider": state.provider.name(),
            "external_apis": {
                "openweather": configured(&state.config.openweather_api_key),
                "nessie": configured(&state.config.nessie_api_key),
            }
        },
        "version": env!("CARGO_PKG_VERSION"),
        "environment": state.config.environment,
    }))
}

async fn get_ndvi(
    State(state): State<AppState>,
    Query(params): Query<NdviQuery>,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    let farm_id = params
        .farm_id
        .filter(|id| !id.trim().is_empty())
        .unwrap_or_else(|| state.config.farm.farm_id.clone());
    let cache_key = format!("ndvi:{}", farm_id);

    if let Some(cached) = state.cache.get(&cache_key).await {
        tracing::debug!("Cache hit for NDVI {}", farm_id);
        return Ok(ApiResponse::ok(cached));
    }

    let reading = state.provider.fetch_ndvi(&farm_id).await?;
    let result = to_value(&reading)?;
    state.cache.insert(cache_key, result.clone()).await;

    Ok(ApiResponse::ok(result))
}

async fn get_weather(
    State(state): State<AppState>,
    Query(params): Query<WeatherQuery>,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    let lat = parse_number("lat", params.lat.as_deref(), state.config.farm.lat)?;
    let lon = parse_number("lon", params.lon.as_deref(), state.config.farm.lon)?;
    let cache_key = format!("weather:{}:{}", lat, lon);

    if let Some(cached) = state.cache.get(&cache_key).await {
        tracing::debug!("Cache hit for weather ({}, {})", lat, lon);
        return Ok(ApiResponse::ok(cached));
    }

    let report = state.provider.fetch_weather(lat, lon).await?;
    let result = to_value(&report)?;
    state.cache.insert(cache_key, result.clone()).await;

    Ok(ApiResponse::ok(result))
}

async fn get_financial(
    State(state): State<AppState>,
    Query(params): Query<FinancialQuery>,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    let customer_id = params
        .customer_id
        .filter(|id| !id.trim().is_empty())
        .unwrap_or_else(|| state.config.farm.customer_id.clone());
    let cache_key = format!("financial:{}", customer_id);

    if let Some(cached) = state.cache.get(&cache_key).await {
        tracing::debug!("Cache hit for financial {}", customer_id);
        return Ok(ApiResponse::ok(cached));
    }

    let summary = state.provider.fetch_financial(&customer_id).await?;
    let result = to_value(&summary)?;
    state.cache.insert(cache_key, result.clone()).await;

    Ok(ApiResponse::ok(result))
}

/// GET /api/recommendation?ndvi=&rainfallDeficit=&balance=
///
/// Missing or empty parameters take the demo defaults; malformed ones are rejected.
async fn recommend_from_query(
    Query(params): Query<RecommendationQuery>,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    let ndvi = parse_number("ndvi", params.ndvi.as_deref(), DEFAULT_NDVI)?;
    let deficit = parse_number(
        "rainfallDeficit",
        params.rainfall_deficit.as_deref(),
        DEFAULT_RAINFALL_DEFICIT,
    )?;
    let balance = parse_number("balance", params.balance.as_deref(), DEFAULT_BALANCE)?;

    let recommendation = derive_recommendation(ndvi, deficit, balance);
    tracing::debug!(
        "GET recommendation ({}, {}, {}) -> {}",
        ndvi,
        deficit,
        balance,
        recommendation.severity
    );

    Ok(ApiResponse::ok(to_value(&recommendation)?))
}

/// POST /api/recommendation with {"ndvi", "rainfallDeficit", "balance"}; all three must be numbers
async fn recommend_from_body(
    body: Bytes,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    let payload: serde_json::Value = serde_json::from_slice(&body)
        .map_err(|_| AppError::BadRequest(INVALID_INPUT_MESSAGE.to_string()))?;

    let field = |name: &str| payload.get(name).and_then(serde_json::Value::as_f64);
    let (ndvi, deficit, balance) =
        match (field("ndvi"), field("rainfallDeficit"), field("balance")) {
            (Some(n), Some(d), Some(b)) => (n, d, b),
            _ => return Err(AppError::BadRequest(INVALID_INPUT_MESSAGE.to_string())),
        };

    let recommendation = derive_recommendation(ndvi, deficit, balance);
    tracing::info!(
        "Recommendation for ndvi={} deficit={} balance={}: {}",
        ndvi,
        deficit,
        balance,
        recommendation.severity
    );

    Ok(ApiResponse::ok(to_value(&recommendation)?))
}

/// Fetch all three feeds through the provider and derive the recommendation
async fn get_dashboard(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<DashboardView>>, AppError> {
    let view = load_view(state.provider.as_ref(), &state.config.farm).await?;
    Ok(ApiResponse::ok(view))
}

async fn get_scenario(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<ApiResponse<DashboardView>>, AppError> {
    let scenario: DemoScenario = name.parse().map_err(AppError::NotFound)?;
    Ok(ApiResponse::ok(DashboardView::for_scenario(scenario, &state.config.farm)))
}

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Deserialize, Debug)]
struct NdviQuery {
    #[serde(rename = "farmId")]
    farm_id: Option<String>,
}

#[derive(Deserialize, Debug)]
struct WeatherQuery {
    lat: Option<String>,
    lon: Option<String>,
}

#[derive(Deserialize, Debug)]
struct FinancialQuery {
    #[serde(rename = "customerId")]
    customer_id: Option<String>,
}

#[derive(Deserialize, Debug)]
struct RecommendationQuery {
    ndvi: Option<String>,
    #[serde(rename = "rainfallDeficit")]
    rainfall_deficit: Option<String>,
    balance: Option<String>,
}

/// Success/failure envelope shared by every /api route
#[derive(Serialize, Debug)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub timestamp: String,
}

impl<T: Serialize> ApiResponse<T> {
    fn ok(data: T) -> Json<Self> {
        Json(Self {
            success: true,
            data: Some(data),
            error: None,
            timestamp: chrono::Utc::now().to_rfc3339(),
        })
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Absent or blank → default; otherwise must be a finite number
fn parse_number(name: &str, raw: Option<&str>, default: f64) -> Result<f64, AppError> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(default),
        Some(s) => match s.parse::<f64>() {
            Ok(v) if v.is_finite() => Ok(v),
            _ => Err(AppError::BadRequest(format!(
                "Invalid parameter {}: expected a finite number, got {:?}",
                name, s
            ))),
        },
    }
}

fn to_value<T: Serialize>(data: &T) -> Result<serde_json::Value, AppError> {
    serde_json::to_value(data)
        .map_err(|e| AppError::Internal(format!("JSON serialization error: {}", e)))
}

// ============================================================================
// Error Handling
// ============================================================================

#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
    NotFound(String),
    Upstream(String),
    Internal(String),
}

impl From<ProviderError> for AppError {
    fn from(e: ProviderError) -> Self {
        AppError::Upstream(e.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Upstream(msg) => {
                tracing::error!("Upstream feed error: {}", msg);
                (StatusCode::BAD_GATEWAY, msg)
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
        };

        let body = Json(ApiResponse::<()> {
            success: false,
            data: None,
            error: Some(message),
            timestamp: chrono::Utc::now().to_rfc3339(),
        });

        (status, body).into_response()
    }
}
