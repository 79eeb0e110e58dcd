//! OpenAPI documentation

use axum::Json;
use utoipa::OpenApi;

use crate::api::routes::{health, hosts, inventory, statistics};
use crate::api::types::{ErrorResponse, HealthResponse, StoreStatus};
use crate::stats::{HostVendorCounts, ResourceType};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Inventory Statistics API",
        description = "Read-only reporting over the virtualization inventory: \
                       hosts, VMs, clusters, datacenters, storage domains, templates and setups."
    ),
    paths(
        health::health_check,
        hosts::list_hosts,
        hosts::get_host,
        hosts::host_statistics,
        inventory::list_vms,
        inventory::list_clusters,
        inventory::list_datacenters,
        inventory::list_templates,
        statistics::list_setups,
        statistics::general_statistics,
    ),
    components(schemas(
        HealthResponse,
        StoreStatus,
        ErrorResponse,
        HostVendorCounts,
        ResourceType,
    )),
    tags(
        (name = "system", description = "Service health"),
        (name = "hosts", description = "Host documents and counts"),
        (name = "inventory", description = "Passthrough inventory listings"),
        (name = "statistics", description = "Aggregate statistics bundles"),
    )
)]
pub struct ApiDoc;

/// GET /api-docs/openapi.json
pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
