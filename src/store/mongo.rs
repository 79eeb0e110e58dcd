//! MongoDB inventory store
//!
//! This module provides the production implementation of the
//! `InventoryStore` trait on top of the official `mongodb` driver.
//!
//! ## Aggregation
//!
//! Group counts and field accumulators run as aggregation pipelines, so only
//! a handful of result documents cross the wire:
//!
//! - group counts: `$match {field: {$ne: null}}` → `$group {_id: $field, count: {$sum: 1}}`
//! - accumulators: `$match {field: {$type: "number", $not: {$type: "array"}}}`
//!   → `$group {_id: null, count, sum, max}`
//!
//! Both filters mirror the presence rules in [`super::schema`]. Arrays are
//! excluded explicitly since `$type` also matches an array holding a number.
//!
//! ## Identifiers
//!
//! `ObjectId` values are returned as their hex string. Lookups by id accept
//! either a string `_id` or the hex form of an `ObjectId`.

use std::collections::HashMap;

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{Bson, Document as BsonDocument, doc, oid::ObjectId};
use mongodb::{Client, Collection as MongoCollection, Database};
use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use super::backend::{HealthStatus, InventoryStore};
use super::error::{StoreError, StoreResult};
use super::schema::{
    ClusterFilter, Collection, Document, FieldAccumulator, GroupCounts, render_key,
};

/// MongoDB-backed inventory store
#[derive(Debug, Clone)]
pub struct MongoStore {
    database: Database,
}

impl MongoStore {
    /// Connect to a MongoDB deployment and select the inventory database
    ///
    /// The connection is verified with a `ping` so that a wrong URI fails at
    /// startup instead of on the first request.
    ///
    /// ## Example
    ///
    /// ```no_run
    /// # use inventory_stats::store::mongo::MongoStore;
    /// # async fn example() -> anyhow::Result<()> {
    /// let store = MongoStore::connect("mongodb://localhost:27017", "dallas").await?;
    /// # Ok(())
    /// # }
    /// ```
    #[instrument(skip(uri))]
    pub async fn connect(uri: &str, database: &str) -> StoreResult<Self> {
        info!("connecting to MongoDB database {database}");

        let client = Client::with_uri_str(uri)
            .await
            .map_err(|e| StoreError::ConnectionFailed(e.to_string()))?;
        let database = client.database(database);

        database
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|e| StoreError::ConnectionFailed(e.to_string()))?;

        info!("MongoDB connection established");

        Ok(Self { database })
    }

    fn collection(&self, collection: Collection) -> MongoCollection<BsonDocument> {
        self.database.collection(collection.name())
    }

    async fn find(
        &self,
        collection: Collection,
        filter: BsonDocument,
    ) -> StoreResult<Vec<Document>> {
        let documents: Vec<BsonDocument> = self
            .collection(collection)
            .find(filter)
            .await?
            .try_collect()
            .await?;

        debug!("fetched {} documents from {collection}", documents.len());

        Ok(documents.into_iter().map(to_document).collect())
    }

    async fn aggregate(
        &self,
        collection: Collection,
        pipeline: Vec<BsonDocument>,
    ) -> StoreResult<Vec<BsonDocument>> {
        let results = self
            .collection(collection)
            .aggregate(pipeline)
            .await?
            .try_collect()
            .await?;
        Ok(results)
    }
}

/// Convert a BSON document into its JSON form, flattening `ObjectId`s
fn to_document(document: BsonDocument) -> Document {
    document
        .into_iter()
        .map(|(key, value)| {
            let value = match value {
                Bson::ObjectId(oid) => Value::String(oid.to_hex()),
                other => other.into_relaxed_extjson(),
            };
            (key, value)
        })
        .collect()
}

/// Render a `$group` key the same way [`super::schema::group_key`] does
fn bson_group_key(key: Bson) -> Option<String> {
    match key {
        Bson::Null | Bson::Undefined => None,
        Bson::String(s) => Some(s),
        Bson::ObjectId(oid) => Some(oid.to_hex()),
        other => render_key(&other.into_relaxed_extjson()),
    }
}

fn bson_number(value: Option<&Bson>) -> Option<f64> {
    match value? {
        Bson::Int32(v) => Some(f64::from(*v)),
        Bson::Int64(v) => Some(*v as f64),
        Bson::Double(v) => Some(*v),
        _ => None,
    }
}

fn id_filter(id: &str) -> BsonDocument {
    match ObjectId::parse_str(id) {
        Ok(oid) => doc! { "$or": [{ "_id": id }, { "_id": oid }] },
        Err(_) => doc! { "_id": id },
    }
}

fn field_condition(field: &str, condition: BsonDocument) -> BsonDocument {
    let mut stage = BsonDocument::new();
    stage.insert(field, condition);
    stage
}

fn group_counts_pipeline(field: &str) -> Vec<BsonDocument> {
    vec![
        doc! { "$match": field_condition(field, doc! { "$ne": Bson::Null }) },
        doc! { "$group": { "_id": format!("${field}"), "count": { "$sum": 1 } } },
    ]
}

fn accumulate_pipeline(field: &str) -> Vec<BsonDocument> {
    let value = format!("${field}");
    let numeric = doc! { "$type": "number", "$not": { "$type": "array" } };
    vec![
        doc! { "$match": field_condition(field, numeric) },
        doc! {
            "$group": {
                "_id": Bson::Null,
                "count": { "$sum": 1 },
                "sum": { "$sum": value.as_str() },
                "max": { "$max": value.as_str() },
            }
        },
    ]
}

fn cluster_query(filter: &ClusterFilter) -> BsonDocument {
    let mut query = BsonDocument::new();
    for (field, min) in filter.thresholds() {
        query.insert(field, doc! { "$gte": min });
    }
    query
}

#[async_trait]
impl InventoryStore for MongoStore {
    #[instrument(skip(self))]
    async fn find_all(&self, collection: Collection) -> StoreResult<Vec<Document>> {
        self.find(collection, doc! {}).await
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, collection: Collection, id: &str) -> StoreResult<Option<Document>> {
        Ok(self
            .collection(collection)
            .find_one(id_filter(id))
            .await?
            .map(to_document))
    }

    #[instrument(skip(self))]
    async fn find_clusters(&self, filter: ClusterFilter) -> StoreResult<Vec<Document>> {
        self.find(Collection::Cluster, cluster_query(&filter)).await
    }

    #[instrument(skip(self))]
    async fn count(&self, collection: Collection) -> StoreResult<u64> {
        Ok(self.collection(collection).count_documents(doc! {}).await?)
    }

    #[instrument(skip(self))]
    async fn group_counts(&self, collection: Collection, field: &str) -> StoreResult<GroupCounts> {
        let pipeline = group_counts_pipeline(field);

        let mut counts = GroupCounts::new();
        for mut group in self.aggregate(collection, pipeline).await? {
            let count = bson_number(group.get("count")).unwrap_or(0.0) as u64;
            match group.remove("_id").and_then(bson_group_key) {
                Some(key) => counts.add(key, count),
                None => warn!("dropping group without key in {collection}.{field}"),
            }
        }

        debug!("{collection}.{field}: {} groups", counts.len());
        Ok(counts)
    }

    #[instrument(skip(self))]
    async fn accumulate(
        &self,
        collection: Collection,
        field: &str,
    ) -> StoreResult<FieldAccumulator> {
        let pipeline = accumulate_pipeline(field);

        let Some(result) = self.aggregate(collection, pipeline).await?.into_iter().next() else {
            return Ok(FieldAccumulator::default());
        };

        Ok(FieldAccumulator {
            count: bson_number(result.get("count")).unwrap_or(0.0) as u64,
            sum: bson_number(result.get("sum")).unwrap_or(0.0),
            max: bson_number(result.get("max")),
        })
    }

    async fn health_check(&self) -> StoreResult<HealthStatus> {
        let mut metadata = HashMap::from([
            ("backend".to_string(), "mongodb".to_string()),
            ("database".to_string(), self.database.name().to_string()),
        ]);

        match self.database.run_command(doc! { "ping": 1 }).await {
            Ok(_) => Ok(HealthStatus {
                healthy: true,
                message: "MongoDB reachable".to_string(),
                metadata,
            }),
            Err(e) => {
                metadata.insert("error".to_string(), e.to_string());
                Ok(HealthStatus {
                    healthy: false,
                    message: format!("MongoDB ping failed: {e}"),
                    metadata,
                })
            }
        }
    }
}
