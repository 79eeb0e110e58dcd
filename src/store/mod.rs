//! Read-only access to the inventory collections
//!
//! This module provides a trait-based abstraction over the document store
//! holding the inventory (hosts, VMs, clusters, datacenters, storage domains,
//! templates and setups).
//!
//! ## Design
//!
//! - **Trait-based**: `InventoryStore` allows swapping implementations
//! - **Async**: All operations are async for compatibility with Tokio
//! - **Read-only**: The inventory is produced elsewhere, this service never writes
//!
//! ## Backends
//!
//! - **MongoDB** (default): The production document database
//! - **In-Memory**: Fixture-backed, for tests and local demos
//!
//! ## Usage
//!
//! ```no_run
//! use inventory_stats::{config::StoreConfig, store};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let store = store::open(&StoreConfig::default()).await?;
//!     let hosts = store.count(store::Collection::Host).await?;
//!     println!("{hosts} hosts");
//!     Ok(())
//! }
//! ```

pub mod backend;
pub mod error;
pub mod memory;
#[cfg(feature = "store-mongodb")]
pub mod mongo;
pub mod schema;

use std::sync::Arc;

use tracing::info;

pub use backend::{HealthStatus, InventoryStore};
pub use error::{StoreError, StoreResult};
pub use memory::MemoryStore;
pub use schema::{ClusterFilter, Collection, Document, FieldAccumulator, GroupCounts};

use crate::config::StoreConfig;

/// Open the store described by the configuration
pub async fn open(config: &StoreConfig) -> StoreResult<Arc<dyn InventoryStore>> {
    match config {
        StoreConfig::Memory { fixtures } => {
            let store = match fixtures {
                Some(path) => MemoryStore::from_fixture_file(path)?,
                None => {
                    info!("starting with an empty in-memory store");
                    MemoryStore::new()
                }
            };
            Ok(Arc::new(store))
        }

        #[cfg(feature = "store-mongodb")]
        StoreConfig::Mongodb { uri, database } => {
            let store = mongo::MongoStore::connect(uri, database).await?;
            Ok(Arc::new(store))
        }

        #[cfg(not(feature = "store-mongodb"))]
        StoreConfig::Mongodb { .. } => Err(StoreError::InvalidConfig(
            "MongoDB support not compiled in (enable the `store-mongodb` feature)".to_string(),
        )),
    }
}
