use std::net::SocketAddr;

use tracing_subscriber::EnvFilter;

use transfer_server::cache::{CacheConfig, CachedMbtaClient};
use transfer_server::mbta::{MbtaClient, MbtaConfig};
use transfer_server::planner::{PlannerClient, PlannerConfig};
use transfer_server::web::{AppState, create_router};

/// Default bind port (the port the frontend expects the backend on).
const DEFAULT_PORT: u16 = 8000;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug")),
        )
        .init();

    // API key is optional: the MBTA API works without one at a much
    // lower rate limit.
    let api_key = std::env::var("MBTA_API_KEY").ok();
    if api_key.is_none() {
        tracing::warn!("MBTA_API_KEY not set; using the anonymous rate limit");
    }

    // Create MBTA client
    let mbta_config = MbtaConfig::new(api_key);
    let mbta_client = MbtaClient::new(mbta_config).expect("Failed to create MBTA client");

    // Create cached client
    let cache_config = CacheConfig::default();
    let cached_mbta = CachedMbtaClient::new(mbta_client, &cache_config);

    // Create planner client
    let planner_config = match std::env::var("PLANNER_BASE_URL") {
        Ok(url) => PlannerConfig::new(url),
        Err(_) => PlannerConfig::default(),
    };
    let planner_client =
        PlannerClient::new(planner_config).expect("Failed to create planner client");

    // Build app state
    let state = AppState::new(cached_mbta, planner_client);

    // Create router
    let app = create_router(state);

    // Bind and serve
    let port = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(DEFAULT_PORT);
    let addr = SocketAddr::from(([127, 0, 0, 1], port));

    tracing::info!("Transfer server listening on http://{addr}");
    tracing::info!("API Endpoints:");
    tracing::info!("  GET /health           - Health check");
    tracing::info!("  GET /mbta/stops       - Stops near a coordinate");
    tracing::info!("  GET /mbta/stops_search - Search stops by name");
    tracing::info!("  GET /mbta/predictions - Live predictions at a stop");
    tracing::info!("  GET /mbta/shapes      - Map polyline for a route");
    tracing::info!("  GET /transfer_status  - Classify a transfer");
    tracing::info!("  GET /route_options    - Candidate routes with verdicts");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind");
    axum::serve(listener, app).await.expect("Server error");
}
