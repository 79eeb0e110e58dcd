//! Error types for store operations

use thiserror::Error;

/// Result type alias for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur while reading from the inventory store
#[derive(Debug, Error)]
pub enum StoreError {
    /// Database connection failed
    #[error("failed to connect to inventory store: {0}")]
    ConnectionFailed(String),

    /// Database query failed
    #[error("inventory query failed: {0}")]
    QueryFailed(String),

    /// Invalid configuration
    #[error("invalid store configuration: {0}")]
    InvalidConfig(String),

    /// Document could not be converted to or from its wire format
    #[error("document serialization error: {0}")]
    SerializationError(String),

    /// I/O error (fixture file access, etc.)
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::SerializationError(err.to_string())
    }
}

#[cfg(feature = "store-mongodb")]
impl From<mongodb::error::Error> for StoreError {
    fn from(err: mongodb::error::Error) -> Self {
        use mongodb::error::ErrorKind;

        match err.kind.as_ref() {
            ErrorKind::ServerSelection { .. } | ErrorKind::Io(_) => {
                StoreError::ConnectionFailed(err.to_string())
            }
            ErrorKind::InvalidArgument { .. } => StoreError::InvalidConfig(err.to_string()),
            ErrorKind::BsonDeserialization(_) | ErrorKind::BsonSerialization(_) => {
                StoreError::SerializationError(err.to_string())
            }
            _ => StoreError::QueryFailed(err.to_string()),
        }
    }
}
