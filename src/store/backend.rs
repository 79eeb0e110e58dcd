//! Inventory store trait definition
//!
//! This module defines the core `InventoryStore` trait that all
//! store implementations must implement.

use std::collections::HashMap;

use async_trait::async_trait;

use super::error::StoreResult;
use super::schema::{ClusterFilter, Collection, Document, FieldAccumulator, GroupCounts};

/// Health status of the store
#[derive(Debug, Clone)]
pub struct HealthStatus {
    /// Is the store operational?
    pub healthy: bool,

    /// Human-readable status message
    pub message: String,

    /// Additional backend-specific metadata
    pub metadata: HashMap<String, String>,
}

/// Read-only access to the inventory collections
///
/// The trait is designed to be:
///
/// - **Async**: All methods are async for compatibility with Tokio
/// - **Read-only**: The inventory is owned by an external producer
/// - **Aggregation-friendly**: Group counts and field accumulators can be
///   computed where the data lives (e.g. as database pipelines)
///
/// ## Thread Safety
///
/// Implementations must be `Send + Sync` as one instance is shared by all
/// request handlers.
///
/// ## Error Handling
///
/// Methods return `StoreResult<T>` which wraps `StoreError`. A failing query
/// is never retried.
#[async_trait]
pub trait InventoryStore: Send + Sync {
    /// Return every document of a collection
    async fn find_all(&self, collection: Collection) -> StoreResult<Vec<Document>>;

    /// Look up a single document by its `_id`
    ///
    /// A miss is `Ok(None)`, not an error.
    async fn find_by_id(&self, collection: Collection, id: &str) -> StoreResult<Option<Document>>;

    /// Return the clusters passing a minimum-count filter
    async fn find_clusters(&self, filter: ClusterFilter) -> StoreResult<Vec<Document>>;

    /// Number of documents in a collection
    async fn count(&self, collection: Collection) -> StoreResult<u64>;

    /// Count documents per distinct value of `field`
    ///
    /// Documents where `field` is absent or null are left out.
    async fn group_counts(&self, collection: Collection, field: &str) -> StoreResult<GroupCounts>;

    /// Count, sum and maximum of the numeric values of `field`
    ///
    /// Documents where `field` is not a number are left out.
    async fn accumulate(&self, collection: Collection, field: &str)
    -> StoreResult<FieldAccumulator>;

    /// Check store health
    ///
    /// Performs a lightweight operation to verify the store is reachable.
    async fn health_check(&self) -> StoreResult<HealthStatus>;
}
