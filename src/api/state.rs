//! API shared state

use std::sync::Arc;

use crate::store::InventoryStore;

/// Shared state passed to all API handlers
///
/// Built once at startup. Handlers only read through the store, so no
/// locking is involved.
#[derive(Clone)]
pub struct ApiState {
    /// Inventory store for documents and aggregates
    pub store: Arc<dyn InventoryStore>,
}

impl ApiState {
    pub fn new(store: Arc<dyn InventoryStore>) -> Self {
        Self { store }
    }
}
