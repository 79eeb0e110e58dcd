//! Host endpoints

use axum::{
    Json,
    extract::{Path, State},
};
use tracing::debug;

use crate::{
    api::{error::ApiResult, state::ApiState},
    stats::{HostVendorCounts, host_vendor_counts},
    store::{Collection, Document},
};

/// GET /hosts
///
/// List every host document
#[utoipa::path(
    get,
    path = "/hosts",
    responses(
        (status = 200, description = "All host documents"),
        (status = 500, description = "Store failure"),
    ),
    tag = "hosts"
)]
pub async fn list_hosts(State(state): State<ApiState>) -> ApiResult<Json<Vec<Document>>> {
    Ok(Json(state.store.find_all(Collection::Host).await?))
}

/// GET /hosts/:host_id
///
/// Look up a single host. An unknown id answers `null`, not `404`.
#[utoipa::path(
    get,
    path = "/hosts/{host_id}",
    params(("host_id" = String, Path, description = "Host document `_id`")),
    responses(
        (status = 200, description = "Host document, or null when no host has this id"),
        (status = 500, description = "Store failure"),
    ),
    tag = "hosts"
)]
pub async fn get_host(
    State(state): State<ApiState>,
    Path(host_id): Path<String>,
) -> ApiResult<Json<Option<Document>>> {
    let host = state.store.find_by_id(Collection::Host, &host_id).await?;

    if host.is_none() {
        debug!("no host with id {host_id}");
    }

    Ok(Json(host))
}

/// GET /hosts/statistics
///
/// Raw host counts for the Intel, AMD and IBM CPU manufacturers
#[utoipa::path(
    get,
    path = "/hosts/statistics",
    responses(
        (status = 200, description = "Host counts per CPU manufacturer", body = HostVendorCounts),
        (status = 500, description = "Store failure"),
    ),
    tag = "hosts"
)]
pub async fn host_statistics(State(state): State<ApiState>) -> ApiResult<Json<HostVendorCounts>> {
    Ok(Json(host_vendor_counts(state.store.as_ref()).await?))
}
