//! API request and response types
//!
//! Inventory documents are returned as stored, so only the envelopes that
//! this service builds itself are typed here.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::stats::ResourceType;
use crate::store::ClusterFilter;

// ============================================================================
// Query Parameters
// ============================================================================

/// Query parameters for GET /statistics/general
#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct StatisticsQuery {
    /// Resource type to compute the statistics bundle for
    pub stats_for: ResourceType,
}

/// Query parameters for GET /clusters
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ClusterQuery {
    /// Minimum number of VMs in the cluster (inclusive)
    pub vms: Option<i64>,

    /// Minimum number of hosts in the cluster (inclusive)
    pub hosts: Option<i64>,
}

impl From<ClusterQuery> for ClusterFilter {
    fn from(query: ClusterQuery) -> Self {
        ClusterFilter {
            min_hosts: query.hosts,
            min_vms: query.vms,
        }
    }
}

// ============================================================================
// Responses
// ============================================================================

/// Response for GET /health
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// "ok" or "degraded"
    pub status: String,
    pub timestamp: String,
    pub store: StoreStatus,
}

/// Reachability of the inventory store
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StoreStatus {
    pub healthy: bool,
    pub message: String,
}

/// JSON body of every error response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}
