//! Health check endpoint

use axum::{Json, extract::State, http::StatusCode};

use crate::api::{
    state::ApiState,
    types::{HealthResponse, StoreStatus},
};

/// GET /health
///
/// Reports whether the inventory store is reachable. Answers `503` with the
/// same body when it is not.
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service and store are healthy", body = HealthResponse),
        (status = 503, description = "Store unreachable", body = HealthResponse),
    ),
    tag = "system"
)]
pub async fn health_check(State(state): State<ApiState>) -> (StatusCode, Json<HealthResponse>) {
    let store = match state.store.health_check().await {
        Ok(health) => StoreStatus {
            healthy: health.healthy,
            message: health.message,
        },
        Err(e) => StoreStatus {
            healthy: false,
            message: e.to_string(),
        },
    };

    let (status, label) = if store.healthy {
        (StatusCode::OK, "ok")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "degraded")
    };

    (
        status,
        Json(HealthResponse {
            status: label.to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            store,
        }),
    )
}
