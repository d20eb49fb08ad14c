//! Error types for sluice

use thiserror::Error;

/// Core error type for sluice operations
#[derive(Error, Debug)]
pub enum SluiceError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Query error: {0}")]
    Query(String),

    #[error("Driver error: {0}")]
    Driver(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Pool is closed")]
    Closed,

    #[error("Not supported: {0}")]
    NotSupported(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl SluiceError {
    /// Check whether this error is the pool-closed error
    pub fn is_closed(&self) -> bool {
        matches!(self, SluiceError::Closed)
    }
}

/// Result type alias for sluice operations
pub type Result<T> = std::result::Result<T, SluiceError>;
