//! REST API over the inventory store
//!
//! This module provides the read-only HTTP surface: passthrough listings of
//! inventory documents and the aggregate statistics endpoints.
//!
//! ## Architecture
//!
//! - **Axum** web framework with Tower middleware
//! - **Shared store handle** in [`ApiState`], built once at startup
//! - **OpenAPI** documentation via utoipa
//!
//! ## Endpoints
//!
//! - `GET /health` - Health check
//! - `GET /hosts` - List hosts
//! - `GET /hosts/statistics` - Host counts per CPU manufacturer
//! - `GET /hosts/{host_id}` - Single host (or `null`)
//! - `GET /vms` - List VMs
//! - `GET /clusters?hosts=&vms=` - List clusters with minimum counts
//! - `GET /datacenters` - List datacenters
//! - `GET /templates` - List templates
//! - `GET /statistics/setups` - List setups
//! - `GET /statistics/general?stats_for=` - Statistics bundle
//! - `GET /api-docs/openapi.json` - OpenAPI document

pub mod error;
pub mod extract;
pub mod openapi;
pub mod routes;
pub mod state;
pub mod types;

pub use error::{ApiError, ApiResult};
pub use state::ApiState;
pub use types::{ClusterQuery, ErrorResponse, HealthResponse, StatisticsQuery, StoreStatus};

use std::future::Future;
use std::net::SocketAddr;

use axum::{Router, http::Method, routing::get};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::Config;

/// API server configuration
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Bind address (e.g., "0.0.0.0:5000")
    pub bind_addr: SocketAddr,

    /// Allow cross-origin GET requests
    pub enable_cors: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        let config = Config::default();
        Self {
            bind_addr: config.bind_addr,
            enable_cors: config.enable_cors,
        }
    }
}

impl From<&Config> for ApiConfig {
    fn from(config: &Config) -> Self {
        Self {
            bind_addr: config.bind_addr,
            enable_cors: config.enable_cors,
        }
    }
}

/// Build the router with every route and middleware layer
pub fn router(config: &ApiConfig, state: ApiState) -> Router {
    let mut app = Router::new()
        .route("/health", get(routes::health::health_check))
        .route("/hosts", get(routes::hosts::list_hosts))
        .route("/hosts/statistics", get(routes::hosts::host_statistics))
        .route("/hosts/:host_id", get(routes::hosts::get_host))
        .route("/vms", get(routes::inventory::list_vms))
        .route("/clusters", get(routes::inventory::list_clusters))
        .route("/datacenters", get(routes::inventory::list_datacenters))
        .route("/templates", get(routes::inventory::list_templates))
        .route("/statistics/setups", get(routes::statistics::list_setups))
        .route(
            "/statistics/general",
            get(routes::statistics::general_statistics),
        )
        .route("/api-docs/openapi.json", get(openapi::openapi_json))
        .with_state(state)
        .layer(TraceLayer::new_for_http());

    // Preflight requests are answered by the CORS layer itself
    if config.enable_cors {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET])
            .allow_headers(Any);
        app = app.layer(cors);
    }

    app
}

/// Spawn the API server
///
/// This starts an Axum HTTP server in a background task.
/// Returns the server's local address.
pub async fn spawn_api_server(config: ApiConfig, state: ApiState) -> anyhow::Result<SocketAddr> {
    let app = router(&config, state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    let addr = listener.local_addr()?;

    info!("API server listening on {}", addr);

    // Spawn server in background
    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            tracing::error!("API server error: {}", e);
        }
    });

    Ok(addr)
}

/// Run the API server until `shutdown` resolves
pub async fn serve_api(
    config: ApiConfig,
    state: ApiState,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> anyhow::Result<()> {
    let app = router(&config, state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!("API server listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    info!("API server stopped");
    Ok(())
}
