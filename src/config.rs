use std::net::SocketAddr;
use std::path::PathBuf;

use tracing::trace;

use crate::util::EnvOverrides;

/// Document store configuration
#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
#[serde(tag = "backend", rename_all = "lowercase")]
pub enum StoreConfig {
    /// In-memory store, optionally seeded from a JSON fixture file
    Memory {
        #[serde(default)]
        fixtures: Option<PathBuf>,
    },

    /// MongoDB deployment (default)
    Mongodb {
        /// Connection string
        #[serde(default = "default_mongo_uri")]
        uri: String,

        /// Database holding the inventory collections
        #[serde(default = "default_database")]
        database: String,
    },
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig::Mongodb {
            uri: default_mongo_uri(),
            database: default_database(),
        }
    }
}

fn default_mongo_uri() -> String {
    String::from("mongodb://localhost:27017")
}

fn default_database() -> String {
    String::from("dallas")
}

fn default_bind_addr() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 5000))
}

fn default_enable_cors() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
pub struct Config {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: SocketAddr,

    /// Allow cross-origin GET requests from any origin
    #[serde(default = "default_enable_cors")]
    pub enable_cors: bool,

    #[serde(default)]
    pub store: StoreConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            enable_cors: default_enable_cors(),
            store: StoreConfig::default(),
        }
    }
}

impl Config {
    /// Apply environment overrides on top of the file configuration
    ///
    /// MongoDB overrides only touch a MongoDB store; an in-memory store is
    /// left as configured.
    pub fn with_overrides(mut self, overrides: EnvOverrides) -> Self {
        if let Some(addr) = overrides.bind_addr {
            self.bind_addr = addr;
        }

        if let StoreConfig::Mongodb { uri, database } = &mut self.store {
            if let Some(mongo_uri) = overrides.mongo_uri {
                *uri = mongo_uri;
            }
            if let Some(mongo_database) = overrides.mongo_database {
                *database = mongo_database;
            }
        }

        self
    }
}

pub fn read_config_file(path: &str) -> anyhow::Result<Config> {
    let file_content = std::fs::read_to_string(path)?;
    parse_config(&file_content).inspect(|config| trace!("loaded config: {config:?}"))
}

pub fn parse_config(content: &str) -> anyhow::Result<Config> {
    serde_json::from_str(content)
        .map_err(|e| anyhow::anyhow!("Invalid configuration file provided: {e}"))
}
