//! Breakdowns and scalar summaries
//!
//! These are the two shapes every statistics endpoint is built from:
//!
//! - **Breakdown**: share of documents per distinct value of a field, as a
//!   percentage of *all* documents in the collection. Documents without a
//!   value are left out of the groups but stay in the base, so the
//!   percentages of a collection with unset keys sum to less than 100.
//! - **Summary**: mean and maximum of a numeric field.
//!
//! Functions here are pure. Inputs come either from a document slice or
//! from the raw aggregates a store backend computed.

use std::collections::BTreeMap;

use serde::Serialize;

use super::error::{StatsError, StatsResult};
use crate::store::{Document, FieldAccumulator, GroupCounts};

/// Percentage of documents per group value
pub type Breakdown = BTreeMap<String, f64>;

/// Round to a fixed number of decimal places, half away from zero
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// How the average of a field is rounded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rounding {
    /// Counts and sizes: nearest integer
    Integer,

    /// Utilization percentages: two decimals
    Hundredths,
}

impl Rounding {
    /// Default policy for a field name
    ///
    /// Utilization fields (`mem_usage`, `cpu_usage`, `disk_usage`, ...) keep
    /// two decimals, everything else is a count or a size.
    pub fn for_field(field: &str) -> Self {
        if field.ends_with("_usage") {
            Rounding::Hundredths
        } else {
            Rounding::Integer
        }
    }

    pub fn apply(self, value: f64) -> f64 {
        match self {
            Rounding::Integer => value.round(),
            Rounding::Hundredths => round_to(value, 2),
        }
    }
}

/// Turn group counts into percentages of `total`
///
/// `total` is the document count of the whole collection, including
/// documents that have no value for the grouped field.
pub fn breakdown(groups: &GroupCounts, total: u64) -> StatsResult<Breakdown> {
    if total == 0 {
        return Err(StatsError::EmptyCollection);
    }

    Ok(groups
        .iter()
        .map(|(key, count)| {
            let percentage = round_to(count as f64 * 100.0 / total as f64, 2);
            (key.to_string(), percentage)
        })
        .collect())
}

/// Group `documents` by `field` and compute the breakdown against `total`
pub fn breakdown_documents(
    documents: &[Document],
    field: &str,
    total: u64,
) -> StatsResult<Breakdown> {
    breakdown(&GroupCounts::from_documents(documents, field), total)
}

/// Average and maximum of a numeric field
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Summary {
    /// Mean, rounded per the field's policy
    pub average: f64,

    /// Largest observed value, unrounded
    pub max: f64,
}

/// Summarize pre-accumulated values of `field`
pub fn summarize_accumulator(
    accumulator: &FieldAccumulator,
    field: &str,
    rounding: Rounding,
) -> StatsResult<Summary> {
    match accumulator.max {
        Some(max) if accumulator.count > 0 => Ok(Summary {
            average: rounding.apply(accumulator.sum / accumulator.count as f64),
            max,
        }),
        _ => Err(StatsError::InsufficientData {
            field: field.to_string(),
        }),
    }
}

/// Summarize `field` over `documents` using the field's default rounding
///
/// Documents without a numeric value for the field are ignored.
pub fn summarize(documents: &[Document], field: &str) -> StatsResult<Summary> {
    summarize_accumulator(
        &FieldAccumulator::from_documents(documents, field),
        field,
        Rounding::for_field(field),
    )
}
