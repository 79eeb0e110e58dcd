//! Statistics over the inventory collections
//!
//! Everything behind the `/statistics/*` and `/hosts/statistics` endpoints:
//!
//! - [`aggregate`]: breakdowns and scalar summaries (pure functions)
//! - [`bundle`]: the per-resource bundle table and its composition
//! - [`vendors`]: raw host counts per CPU manufacturer

pub mod aggregate;
pub mod bundle;
pub mod error;
pub mod vendors;

pub use aggregate::{
    Breakdown, Rounding, Summary, breakdown, breakdown_documents, round_to, summarize,
    summarize_accumulator,
};
pub use bundle::{MetricValue, ResourceType, StatisticsBundle, compute_bundle};
pub use error::{StatsError, StatsResult};
pub use vendors::{HostVendorCounts, host_vendor_counts};
