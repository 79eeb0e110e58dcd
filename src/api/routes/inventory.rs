//! Passthrough listings for VMs, clusters, datacenters and templates

use axum::{Json, extract::State};

use crate::{
    api::{
        error::ApiResult,
        extract::ValidatedQuery,
        state::ApiState,
        types::{ClusterQuery, ErrorResponse},
    },
    store::{ClusterFilter, Collection, Document},
};

/// GET /vms
#[utoipa::path(
    get,
    path = "/vms",
    responses(
        (status = 200, description = "All VM documents"),
        (status = 500, description = "Store failure"),
    ),
    tag = "inventory"
)]
pub async fn list_vms(State(state): State<ApiState>) -> ApiResult<Json<Vec<Document>>> {
    Ok(Json(state.store.find_all(Collection::Vm).await?))
}

/// GET /clusters
///
/// List clusters, optionally keeping only those with at least `hosts` hosts
/// and/or at least `vms` VMs. Both thresholds combine with AND.
#[utoipa::path(
    get,
    path = "/clusters",
    params(ClusterQuery),
    responses(
        (status = 200, description = "Cluster documents passing the filter"),
        (status = 400, description = "Non-integer threshold", body = ErrorResponse),
        (status = 500, description = "Store failure"),
    ),
    tag = "inventory"
)]
pub async fn list_clusters(
    State(state): State<ApiState>,
    ValidatedQuery(query): ValidatedQuery<ClusterQuery>,
) -> ApiResult<Json<Vec<Document>>> {
    let filter = ClusterFilter::from(query);
    Ok(Json(state.store.find_clusters(filter).await?))
}

/// GET /datacenters
#[utoipa::path(
    get,
    path = "/datacenters",
    responses(
        (status = 200, description = "All datacenter documents"),
        (status = 500, description = "Store failure"),
    ),
    tag = "inventory"
)]
pub async fn list_datacenters(State(state): State<ApiState>) -> ApiResult<Json<Vec<Document>>> {
    Ok(Json(state.store.find_all(Collection::Datacenter).await?))
}

/// GET /templates
#[utoipa::path(
    get,
    path = "/templates",
    responses(
        (status = 200, description = "All template documents"),
        (status = 500, description = "Store failure"),
    ),
    tag = "inventory"
)]
pub async fn list_templates(State(state): State<ApiState>) -> ApiResult<Json<Vec<Document>>> {
    Ok(Json(state.store.find_all(Collection::Template).await?))
}
