//! Read-only reporting API over a virtualization inventory
//!
//! The inventory (hosts, VMs, clusters, datacenters, storage domains,
//! templates and setups) lives in a document database and is produced by an
//! external collector. This crate serves it over HTTP and computes the
//! aggregate statistics behind the `/statistics/*` endpoints.
//!
//! - [`store`]: read access to the collections (MongoDB or in-memory)
//! - [`stats`]: breakdowns, summaries and per-resource statistics bundles
//! - [`api`]: the axum router and handlers
//! - [`config`]: file and environment configuration

#[cfg(feature = "api")]
pub mod api;
pub mod config;
pub mod stats;
pub mod store;
pub mod util;
