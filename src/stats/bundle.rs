//! Per-resource statistics bundles
//!
//! A bundle is the flat object returned by `/statistics/general` for one
//! resource type. Every bundle is described by a [`BundleSpec`] in the table
//! below and computed by the same routine, [`compute_bundle`].
//!
//! ## Key naming
//!
//! - document count → `<count_key>` (e.g. `hosts_count`)
//! - summary → `average_<field>` and, when enabled, `max_<field>`
//! - breakdown → the key from the table (e.g. `cpus`, `os_types`)
//!
//! ## Missing data
//!
//! - Empty collection → `{"<count_key>": 0, "empty": true}`
//! - A summarized field without numeric values → its keys are omitted
//! - Breakdowns over a non-empty collection are always present (maybe `{}`)

use std::collections::BTreeMap;
use std::fmt;

use futures::future::try_join_all;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use super::aggregate::{Breakdown, Rounding, Summary, breakdown, summarize_accumulator};
use super::error::{StatsError, StatsResult};
use crate::store::{Collection, InventoryStore};

/// The `stats_for` discriminator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "api", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum ResourceType {
    Setups,
    Hosts,
    Datacenters,
    Clusters,
    Vms,
    Storage,
}

impl ResourceType {
    pub const ALL: [ResourceType; 6] = [
        ResourceType::Setups,
        ResourceType::Hosts,
        ResourceType::Datacenters,
        ResourceType::Clusters,
        ResourceType::Vms,
        ResourceType::Storage,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceType::Setups => "setups",
            ResourceType::Hosts => "hosts",
            ResourceType::Datacenters => "datacenters",
            ResourceType::Clusters => "clusters",
            ResourceType::Vms => "vms",
            ResourceType::Storage => "storage",
        }
    }

    /// The bundle layout for this resource type
    pub fn spec(&self) -> &'static BundleSpec {
        match self {
            ResourceType::Setups => &SETUPS,
            ResourceType::Hosts => &HOSTS,
            ResourceType::Datacenters => &DATACENTERS,
            ResourceType::Clusters => &CLUSTERS,
            ResourceType::Vms => &VMS,
            ResourceType::Storage => &STORAGE,
        }
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A scalar summary in a bundle
#[derive(Debug, Clone, Copy)]
pub struct SummarySpec {
    pub field: &'static str,
    pub rounding: Rounding,
    pub with_max: bool,
}

/// A percentage breakdown in a bundle
#[derive(Debug, Clone, Copy)]
pub struct BreakdownSpec {
    /// Key in the bundle
    pub key: &'static str,

    /// Document field to group by
    pub field: &'static str,
}

/// Layout of one statistics bundle
#[derive(Debug, Clone, Copy)]
pub struct BundleSpec {
    pub collection: Collection,
    pub count_key: &'static str,
    pub summaries: &'static [SummarySpec],
    pub breakdowns: &'static [BreakdownSpec],
}

const fn count(field: &'static str) -> SummarySpec {
    SummarySpec {
        field,
        rounding: Rounding::Integer,
        with_max: true,
    }
}

const fn usage(field: &'static str) -> SummarySpec {
    SummarySpec {
        field,
        rounding: Rounding::Hundredths,
        with_max: false,
    }
}

const fn grouped(key: &'static str, field: &'static str) -> BreakdownSpec {
    BreakdownSpec { key, field }
}

static SETUPS: BundleSpec = BundleSpec {
    collection: Collection::Setup,
    count_key: "setups_count",
    summaries: &[
        count("dcs_count"),
        count("clusters_count"),
        count("hosts_count"),
        count("vms_count"),
    ],
    breakdowns: &[],
};

static HOSTS: BundleSpec = BundleSpec {
    collection: Collection::Host,
    count_key: "hosts_count",
    summaries: &[
        count("mem_size"),
        usage("mem_usage"),
        usage("cpu_usage"),
        count("running_vms_count"),
        count("nics_count"),
    ],
    breakdowns: &[
        grouped("cpus", "cpu_manufacturer"),
        grouped("cpu_cores", "cpu_cores"),
        grouped("os_types", "os"),
    ],
};

static DATACENTERS: BundleSpec = BundleSpec {
    collection: Collection::Datacenter,
    count_key: "datacenters_count",
    summaries: &[
        count("clusters_count"),
        count("storage_count"),
        count("networks_count"),
    ],
    breakdowns: &[],
};

static CLUSTERS: BundleSpec = BundleSpec {
    collection: Collection::Cluster,
    count_key: "clusters_count",
    summaries: &[count("hosts_count"), count("vms_count")],
    breakdowns: &[
        grouped("cpu_families", "cpu_family"),
        grouped("compatibility_versions", "ovirt_compatibility_version"),
    ],
};

static VMS: BundleSpec = BundleSpec {
    collection: Collection::Vm,
    count_key: "vms_count",
    summaries: &[
        count("mem_size"),
        usage("mem_usage"),
        usage("cpu_usage"),
        count("num_of_cpus"),
        count("nics_count"),
        count("disks_count"),
    ],
    breakdowns: &[
        grouped("os_types", "os_type"),
        grouped("display_types", "display_type"),
    ],
};

static STORAGE: BundleSpec = BundleSpec {
    collection: Collection::Storage,
    count_key: "storage_count",
    summaries: &[count("used_disk")],
    breakdowns: &[grouped("storage_types", "storage_type")],
};

/// A single value in a bundle
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MetricValue {
    Integer(i64),
    Number(f64),
    Breakdown(Breakdown),
}

impl MetricValue {
    /// Emit an already-rounded average
    fn average(value: f64, rounding: Rounding) -> Self {
        match rounding {
            Rounding::Integer => MetricValue::Integer(value as i64),
            Rounding::Hundredths => MetricValue::Number(value),
        }
    }

    /// Emit a maximum, as an integer when the field counts things and the
    /// value is whole
    fn max(value: f64, rounding: Rounding) -> Self {
        if rounding == Rounding::Integer && value.fract() == 0.0 {
            MetricValue::Integer(value as i64)
        } else {
            MetricValue::Number(value)
        }
    }
}

/// The composed statistics for one resource type
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatisticsBundle {
    /// `true` when the collection holds no documents
    pub empty: bool,

    #[serde(flatten)]
    pub metrics: BTreeMap<String, MetricValue>,
}

impl StatisticsBundle {
    /// The explicit marker returned for an empty collection
    pub fn empty(spec: &BundleSpec) -> Self {
        Self {
            empty: true,
            metrics: BTreeMap::from([(spec.count_key.to_string(), MetricValue::Integer(0))]),
        }
    }

    pub fn get(&self, key: &str) -> Option<&MetricValue> {
        self.metrics.get(key)
    }

    fn insert(&mut self, key: impl Into<String>, value: MetricValue) {
        self.metrics.insert(key.into(), value);
    }
}

/// Compute the statistics bundle for a resource type
///
/// Store failures abort the whole bundle. Undefined aggregates follow the
/// missing data rules in the module documentation.
#[instrument(skip(store))]
pub async fn compute_bundle(
    store: &dyn InventoryStore,
    resource: ResourceType,
) -> StatsResult<StatisticsBundle> {
    let spec = resource.spec();
    let total = store.count(spec.collection).await?;

    if total == 0 {
        debug!("{} is empty, returning empty bundle", spec.collection);
        return Ok(StatisticsBundle::empty(spec));
    }

    let summaries = try_join_all(spec.summaries.iter().map(|s| async move {
        let accumulator = store.accumulate(spec.collection, s.field).await?;
        StatsResult::Ok((s, summarize_accumulator(&accumulator, s.field, s.rounding)))
    }));

    let breakdowns = try_join_all(spec.breakdowns.iter().map(|b| async move {
        let groups = store.group_counts(spec.collection, b.field).await?;
        StatsResult::Ok((b, breakdown(&groups, total)))
    }));

    let (summaries, breakdowns) = futures::try_join!(summaries, breakdowns)?;

    let mut bundle = StatisticsBundle {
        empty: false,
        metrics: BTreeMap::new(),
    };
    bundle.insert(spec.count_key, MetricValue::Integer(total as i64));

    for (summary_spec, summary) in summaries {
        match summary {
            Ok(Summary { average, max }) => {
                let field = summary_spec.field;
                bundle.insert(
                    format!("average_{field}"),
                    MetricValue::average(average, summary_spec.rounding),
                );
                if summary_spec.with_max {
                    bundle.insert(
                        format!("max_{field}"),
                        MetricValue::max(max, summary_spec.rounding),
                    );
                }
            }
            Err(StatsError::InsufficientData { field }) => {
                warn!("{}: no numeric values for {field}, omitting", spec.collection);
            }
            Err(e) => return Err(e),
        }
    }

    for (breakdown_spec, percentages) in breakdowns {
        bundle.insert(breakdown_spec.key, MetricValue::Breakdown(percentages?));
    }

    Ok(bundle)
}
