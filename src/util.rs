use std::net::SocketAddr;

const INVENTORY_ADDR: &str = "INVENTORY_ADDR";

const MONGO_URI: &str = "MONGO_URI";

const MONGO_DBNAME: &str = "MONGO_DBNAME";

/// Settings that may be overridden from the environment
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EnvOverrides {
    pub bind_addr: Option<SocketAddr>,
    pub mongo_uri: Option<String>,
    pub mongo_database: Option<String>,
}

impl EnvOverrides {
    pub fn from_env() -> Self {
        Self {
            bind_addr: get_addr(),
            mongo_uri: std::env::var(MONGO_URI).ok(),
            mongo_database: std::env::var(MONGO_DBNAME).ok(),
        }
    }
}

/// Bind address from the environment, ignored when unparsable
pub fn get_addr() -> Option<SocketAddr> {
    let addr_from_env = std::env::var(INVENTORY_ADDR);
    addr_from_env.ok().and_then(|res| res.parse().ok())
}
