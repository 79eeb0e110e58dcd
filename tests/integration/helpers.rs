//! Helper functions for integration tests

use std::net::SocketAddr;
use std::sync::Arc;

use async_trait::async_trait;
use inventory_stats::{
    api::{ApiConfig, ApiState, spawn_api_server},
    store::{
        ClusterFilter, Collection, Document, FieldAccumulator, GroupCounts, HealthStatus,
        InventoryStore, MemoryStore, StoreError, StoreResult,
    },
};
use serde_json::{Value, json};

/// Spawn the API on a random local port
pub async fn spawn_test_api(store: Arc<dyn InventoryStore>) -> SocketAddr {
    let config = ApiConfig {
        bind_addr: "127.0.0.1:0".parse().unwrap(), // Random port
        enable_cors: true,
    };

    spawn_api_server(config, ApiState::new(store)).await.unwrap()
}

pub fn url(addr: SocketAddr, path: &str) -> String {
    format!("http://{addr}{path}")
}

pub fn doc(value: Value) -> Document {
    match value {
        Value::Object(map) => map,
        _ => panic!("test document must be an object"),
    }
}

pub fn create_test_host(id: &str, manufacturer: Option<&str>, mem_size: u64) -> Document {
    let mut host = doc(json!({
        "_id": id,
        "cpu_cores": 8,
        "os": "RHEL",
        "mem_size": mem_size,
        "mem_usage": 50.0,
        "cpu_usage": 25.0,
        "running_vms_count": 4,
        "nics_count": 2,
    }));
    if let Some(manufacturer) = manufacturer {
        host.insert("cpu_manufacturer".to_string(), json!(manufacturer));
    }
    host
}

pub fn create_test_cluster(name: &str, hosts_count: u64, vms_count: u64) -> Document {
    doc(json!({
        "_id": name,
        "name": name,
        "hosts_count": hosts_count,
        "vms_count": vms_count,
        "cpu_family": "Intel Skylake Family",
        "ovirt_compatibility_version": "4.2",
    }))
}

/// A small but complete inventory
pub fn create_test_inventory() -> MemoryStore {
    MemoryStore::new()
        .with_documents(
            Collection::Host,
            vec![
                create_test_host("host-1", Some("Intel"), 16),
                create_test_host("host-2", Some("Intel"), 32),
                create_test_host("host-3", Some("AMD"), 64),
                create_test_host("host-4", Some("IBM"), 128),
            ],
        )
        .with_documents(
            Collection::Cluster,
            vec![
                create_test_cluster("small", 2, 4),
                create_test_cluster("wide", 8, 6),
                create_test_cluster("dense", 3, 40),
                create_test_cluster("large", 10, 50),
            ],
        )
        .with_documents(
            Collection::Datacenter,
            vec![doc(json!({
                "_id": "dc-1",
                "clusters_count": 4,
                "storage_count": 2,
                "networks_count": 3,
            }))],
        )
        .with_documents(
            Collection::Template,
            vec![doc(json!({"_id": "blank", "name": "Blank"}))],
        )
        .with_documents(
            Collection::Setup,
            vec![
                doc(json!({"_id": "s1", "dcs_count": 1, "clusters_count": 2, "hosts_count": 4, "vms_count": 10})),
                doc(json!({"_id": "s2", "dcs_count": 3, "clusters_count": 6, "hosts_count": 20, "vms_count": 100})),
            ],
        )
}

/// A store whose every query fails, as if the database went away
pub struct FailingStore;

#[async_trait]
impl InventoryStore for FailingStore {
    async fn find_all(&self, _collection: Collection) -> StoreResult<Vec<Document>> {
        Err(StoreError::ConnectionFailed("connection refused".to_string()))
    }

    async fn find_by_id(&self, _collection: Collection, _id: &str) -> StoreResult<Option<Document>> {
        Err(StoreError::ConnectionFailed("connection refused".to_string()))
    }

    async fn find_clusters(&self, _filter: ClusterFilter) -> StoreResult<Vec<Document>> {
        Err(StoreError::ConnectionFailed("connection refused".to_string()))
    }

    async fn count(&self, _collection: Collection) -> StoreResult<u64> {
        Err(StoreError::ConnectionFailed("connection refused".to_string()))
    }

    async fn group_counts(&self, _collection: Collection, _field: &str) -> StoreResult<GroupCounts> {
        Err(StoreError::ConnectionFailed("connection refused".to_string()))
    }

    async fn accumulate(
        &self,
        _collection: Collection,
        _field: &str,
    ) -> StoreResult<FieldAccumulator> {
        Err(StoreError::ConnectionFailed("connection refused".to_string()))
    }

    async fn health_check(&self) -> StoreResult<HealthStatus> {
        Ok(HealthStatus {
            healthy: false,
            message: "connection refused".to_string(),
            metadata: Default::default(),
        })
    }
}
