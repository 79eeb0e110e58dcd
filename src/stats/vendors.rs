//! Raw host counts per CPU manufacturer

use serde::{Deserialize, Serialize};
use tracing::instrument;

use super::error::StatsResult;
use crate::store::{Collection, InventoryStore};

const MANUFACTURER_FIELD: &str = "cpu_manufacturer";

/// Response of `/hosts/statistics`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "api", derive(utoipa::ToSchema))]
pub struct HostVendorCounts {
    pub intel_hosts: u64,
    pub amd_hosts: u64,
    pub ibm_hosts: u64,
}

/// Count hosts by CPU manufacturer
///
/// Manufacturer names match exactly (`Intel`, `AMD`, `IBM`); hosts from any
/// other vendor are not reported.
#[instrument(skip(store))]
pub async fn host_vendor_counts(store: &dyn InventoryStore) -> StatsResult<HostVendorCounts> {
    let groups = store
        .group_counts(Collection::Host, MANUFACTURER_FIELD)
        .await?;

    Ok(HostVendorCounts {
        intel_hosts: groups.get("Intel"),
        amd_hosts: groups.get("AMD"),
        ibm_hosts: groups.get("IBM"),
    })
}
