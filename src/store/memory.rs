//! In-memory inventory store
//!
//! Holds every collection as a vector of documents. It's useful for:
//! - Testing without a running database
//! - Local demos from a JSON fixture file
//!
//! Aggregates are computed with the same helpers the statistics engine
//! expects from any backend, so results match the MongoDB store.
//!
//! ## Fixture format
//!
//! ```json
//! {
//!     "host": [{"_id": "h1", "cpu_manufacturer": "Intel"}],
//!     "vm": []
//! }
//! ```
//!
//! Collections missing from the file are empty.

use std::collections::HashMap;
use std::path::Path;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, info, instrument};

use super::backend::{HealthStatus, InventoryStore};
use super::error::{StoreError, StoreResult};
use super::schema::{ClusterFilter, Collection, Document, FieldAccumulator, GroupCounts};

/// In-memory inventory store
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    collections: HashMap<Collection, Vec<Document>>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Add documents to a collection (builder style)
    pub fn with_documents(
        mut self,
        collection: Collection,
        documents: impl IntoIterator<Item = Document>,
    ) -> Self {
        self.insert(collection, documents);
        self
    }

    /// Add documents to a collection
    pub fn insert(&mut self, collection: Collection, documents: impl IntoIterator<Item = Document>) {
        self.collections
            .entry(collection)
            .or_default()
            .extend(documents);
    }

    /// Load a store from a JSON fixture file
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn from_fixture_file(path: impl AsRef<Path>) -> StoreResult<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let store = Self::from_fixture_str(&content)?;

        info!(
            "loaded {} documents from fixture file",
            store.collections.values().map(Vec::len).sum::<usize>()
        );

        Ok(store)
    }

    /// Parse a fixture from its JSON text
    pub fn from_fixture_str(content: &str) -> StoreResult<Self> {
        let fixture: HashMap<Collection, Vec<Value>> = serde_json::from_str(content)?;

        let mut store = Self::new();
        for (collection, values) in fixture {
            store.insert(collection, to_documents(collection, values)?);
        }
        Ok(store)
    }

    fn documents(&self, collection: Collection) -> &[Document] {
        self.collections
            .get(&collection)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

fn to_documents(
    collection: Collection,
    values: impl IntoIterator<Item = Value>,
) -> StoreResult<Vec<Document>> {
    values
        .into_iter()
        .map(|value| match value {
            Value::Object(document) => Ok(document),
            other => Err(StoreError::SerializationError(format!(
                "{collection} entries must be JSON objects, got {other}"
            ))),
        })
        .collect()
}

#[async_trait]
impl InventoryStore for MemoryStore {
    async fn find_all(&self, collection: Collection) -> StoreResult<Vec<Document>> {
        debug!("listing in-memory collection {collection}");
        Ok(self.documents(collection).to_vec())
    }

    async fn find_by_id(&self, collection: Collection, id: &str) -> StoreResult<Option<Document>> {
        debug!("looking up {id} in in-memory collection {collection}");

        let found = self
            .documents(collection)
            .iter()
            .find(|d| match d.get("_id") {
                Some(Value::String(s)) => s == id,
                Some(Value::Object(oid)) => oid.get("$oid").and_then(Value::as_str) == Some(id),
                _ => false,
            })
            .cloned();

        Ok(found)
    }

    async fn find_clusters(&self, filter: ClusterFilter) -> StoreResult<Vec<Document>> {
        debug!("filtering in-memory clusters with {filter:?}");

        Ok(self
            .documents(Collection::Cluster)
            .iter()
            .filter(|d| filter.matches(d))
            .cloned()
            .collect())
    }

    async fn count(&self, collection: Collection) -> StoreResult<u64> {
        Ok(self.documents(collection).len() as u64)
    }

    async fn group_counts(&self, collection: Collection, field: &str) -> StoreResult<GroupCounts> {
        Ok(GroupCounts::from_documents(self.documents(collection), field))
    }

    async fn accumulate(
        &self,
        collection: Collection,
        field: &str,
    ) -> StoreResult<FieldAccumulator> {
        Ok(FieldAccumulator::from_documents(
            self.documents(collection),
            field,
        ))
    }

    async fn health_check(&self) -> StoreResult<HealthStatus> {
        let total: usize = self.collections.values().map(Vec::len).sum();

        Ok(HealthStatus {
            healthy: true,
            message: "In-memory store operational".to_string(),
            metadata: HashMap::from([
                ("backend".to_string(), "memory".to_string()),
                ("total_documents".to_string(), total.to_string()),
            ]),
        })
    }
}
