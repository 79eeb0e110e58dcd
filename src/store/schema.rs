//! Inventory collections and the raw aggregates read from them
//!
//! ## Documents
//!
//! Inventory records are produced by an external collector and stored
//! denormalized, one document per host/VM/cluster/etc. This service never
//! writes them, and the field set differs between collectors, so documents are
//! kept schemaless as JSON objects. Field access goes through the helpers in
//! this module, which define what "present" means for aggregation:
//!
//! - a **numeric** field is one holding a JSON number
//! - a **group key** is any present, non-null value, rendered as a string
//!
//! ## Raw aggregates
//!
//! Backends only report raw numbers ([`GroupCounts`], [`FieldAccumulator`]).
//! Every rounding and percentage step lives in [`crate::stats`], so both
//! backends produce identical statistics.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

/// A schemaless inventory document
pub type Document = serde_json::Map<String, Value>;

/// The document collections making up the inventory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Collection {
    Host,
    Vm,
    Cluster,
    Datacenter,
    Storage,
    Template,
    Setup,
}

impl Collection {
    pub const ALL: [Collection; 7] = [
        Collection::Host,
        Collection::Vm,
        Collection::Cluster,
        Collection::Datacenter,
        Collection::Storage,
        Collection::Template,
        Collection::Setup,
    ];

    /// Collection name in the document database
    pub fn name(&self) -> &'static str {
        match self {
            Collection::Host => "host",
            Collection::Vm => "vm",
            Collection::Cluster => "cluster",
            Collection::Datacenter => "datacenter",
            Collection::Storage => "storage",
            Collection::Template => "template",
            Collection::Setup => "setup",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Minimum-count filter for the cluster listing
///
/// Both thresholds are inclusive and combine with AND.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClusterFilter {
    /// Keep clusters with `hosts_count >= min_hosts`
    pub min_hosts: Option<i64>,

    /// Keep clusters with `vms_count >= min_vms`
    pub min_vms: Option<i64>,
}

impl ClusterFilter {
    pub const HOSTS_FIELD: &'static str = "hosts_count";
    pub const VMS_FIELD: &'static str = "vms_count";

    /// The `(field, minimum)` pairs this filter enforces
    pub fn thresholds(&self) -> Vec<(&'static str, i64)> {
        let mut thresholds = Vec::with_capacity(2);
        if let Some(min) = self.min_hosts {
            thresholds.push((Self::HOSTS_FIELD, min));
        }
        if let Some(min) = self.min_vms {
            thresholds.push((Self::VMS_FIELD, min));
        }
        thresholds
    }

    /// Whether a document passes every threshold
    ///
    /// A document lacking a filtered field, or holding a non-number there,
    /// never matches.
    pub fn matches(&self, document: &Document) -> bool {
        self.thresholds()
            .into_iter()
            .all(|(field, min)| numeric_field(document, field).is_some_and(|v| v >= min as f64))
    }
}

/// Read a numeric field, `None` if absent, null or not a number
pub fn numeric_field(document: &Document, field: &str) -> Option<f64> {
    document.get(field).and_then(Value::as_f64)
}

/// Render the group key of a field, `None` if absent or null
pub fn group_key(document: &Document, field: &str) -> Option<String> {
    render_key(document.get(field)?)
}

/// Render a group value as a key, `None` for null
///
/// Strings are used verbatim; numbers, booleans and nested values use their
/// JSON text. Whole floats render like integers, so `8` and `8.0` share a
/// group the way they do in a database `$group`.
pub fn render_key(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) if n.is_f64() => match n.as_f64() {
            Some(f) if f.fract() == 0.0 && f.abs() < MAX_SAFE_INTEGER => {
                Some((f as i64).to_string())
            }
            _ => Some(n.to_string()),
        },
        other => Some(other.to_string()),
    }
}

/// Largest float below which every whole value is an exact integer
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Number of documents per distinct value of a field
///
/// Documents whose key is absent or null are not counted here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupCounts(BTreeMap<String, u64>);

impl GroupCounts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Group a set of documents by `field`
    pub fn from_documents<'a>(
        documents: impl IntoIterator<Item = &'a Document>,
        field: &str,
    ) -> Self {
        let mut counts = Self::new();
        for key in documents.into_iter().filter_map(|d| group_key(d, field)) {
            counts.add(key, 1);
        }
        counts
    }

    /// Add `count` documents to the group `key`
    pub fn add(&mut self, key: impl Into<String>, count: u64) {
        *self.0.entry(key.into()).or_default() += count;
    }

    /// Count for a single group, 0 when the group is absent
    pub fn get(&self, key: &str) -> u64 {
        self.0.get(key).copied().unwrap_or(0)
    }

    /// Documents counted across all groups
    pub fn grouped_total(&self) -> u64 {
        self.0.values().sum()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

impl<K: Into<String>> FromIterator<(K, u64)> for GroupCounts {
    fn from_iter<I: IntoIterator<Item = (K, u64)>>(iter: I) -> Self {
        let mut counts = Self::new();
        for (key, count) in iter {
            counts.add(key, count);
        }
        counts
    }
}

/// Running count/sum/max of a numeric field
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FieldAccumulator {
    /// Documents holding a numeric value for the field
    pub count: u64,

    /// Sum of those values
    pub sum: f64,

    /// Largest of those values, `None` when `count == 0`
    pub max: Option<f64>,
}

impl FieldAccumulator {
    /// Accumulate `field` over a set of documents, skipping non-numeric values
    pub fn from_documents<'a>(
        documents: impl IntoIterator<Item = &'a Document>,
        field: &str,
    ) -> Self {
        let mut acc = Self::default();
        let mut skipped = 0usize;

        for document in documents {
            match document.get(field) {
                None | Some(Value::Null) => {}
                Some(value) => match value.as_f64() {
                    Some(value) => acc.push(value),
                    None => skipped += 1,
                },
            }
        }

        if skipped > 0 {
            debug!("skipped {skipped} non-numeric values of {field}");
        }

        acc
    }

    pub fn push(&mut self, value: f64) {
        self.count += 1;
        self.sum += value;
        self.max = Some(self.max.map_or(value, |max| max.max(value)));
    }
}
