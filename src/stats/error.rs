//! Error types for statistics computation

use thiserror::Error;

use crate::store::StoreError;

/// Result type alias for statistics operations
pub type StatsResult<T> = Result<T, StatsError>;

/// Errors raised while computing statistics
///
/// The first two variants describe aggregates that are undefined for the
/// data at hand. They are expected conditions; bundle composition turns them
/// into an empty marker or omitted keys instead of failing the request.
#[derive(Debug, Error)]
pub enum StatsError {
    /// A percentage was requested against a zero document total
    #[error("cannot compute percentages over an empty collection")]
    EmptyCollection,

    /// No document holds a numeric value for the field
    #[error("insufficient data: no numeric values for {field}")]
    InsufficientData { field: String },

    /// The underlying store query failed
    #[error(transparent)]
    Store(#[from] StoreError),
}
