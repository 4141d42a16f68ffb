// API Server Binary Entry Point
//
// Purpose: Serve the recommendation engine and farm feeds over HTTP
// Usage: cargo run --features api --bin api_server

use agrisight::{create_router, AppState, ServerConfig};
use std::net::SocketAddr;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing (structured logging)
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| {
                    // Default log level: info for our crate, warn for others
                    "agrisight=info,tower_http=debug,axum=debug,warn".into()
                }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting AgriSight API server...");

    let config = ServerConfig::from_env();
    let port = config.port;

    tracing::info!("Configuration:");
    tracing::info!("  PORT: {}", port);
    tracing::info!("  APP_ENV: {}", config.environment);
    tracing::info!("  FARM: {} ({}, {})", config.farm.farm_id, config.farm.lat, config.farm.lon);
    tracing::info!("  CUSTOMER_ID: {}", config.farm.customer_id);
    tracing::info!(
        "  OpenWeatherMap: {}",
        if config.openweather_api_key.is_some() { "configured" } else { "mock data" }
    );
    tracing::info!(
        "  Nessie: {}",
        if config.nessie_api_key.is_some() { "configured" } else { "mock data" }
    );

    let state = AppState::new(config);
    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
