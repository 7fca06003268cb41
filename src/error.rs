//! Error types for ip2region-rs
//!
//! This module defines custom error types using thiserror for better error handling.

use thiserror::Error;

/// Main error type for ip2region-rs
#[derive(Error, Debug)]
pub enum RegionError {
    /// Address string does not split into four dotted components
    #[error("Invalid IP address: {0}")]
    InvalidAddress(String),

    /// No index block covers the address
    #[error("Not found: {0}")]
    NotFound(String),

    /// Database file missing at startup
    #[error("Database not found: {0}")]
    DatabaseNotFound(String),

    /// Database corrupted
    #[error("Database corrupted: {0}")]
    DatabaseCorrupted(String),

    /// Handle was closed before the image was loaded
    #[error("Database closed: {0}")]
    DatabaseClosed(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Query server error
    #[error("Server error: {0}")]
    ServerError(String),

    /// File I/O error
    #[error("File I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// YAML parsing error
    #[error("YAML parse error: {0}")]
    YamlError(String),

    /// JSON parsing error
    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Index out of bounds
    #[error("Index out of bounds: offset={0}, size={1}")]
    IndexOutOfBounds(usize, usize),

    /// Other error
    #[error("Other error: {0}")]
    Other(String),
}

/// Result type alias for ip2region-rs
pub type Result<T> = std::result::Result<T, RegionError>;

impl RegionError {
    /// Create a corrupted-database error
    pub fn corrupted<S: Into<String>>(msg: S) -> Self {
        RegionError::DatabaseCorrupted(msg.into())
    }

    /// Create a config error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        RegionError::ConfigError(msg.into())
    }

    /// Create a server error
    pub fn server<S: Into<String>>(msg: S) -> Self {
        RegionError::ServerError(msg.into())
    }

    /// True when the lookup itself found nothing, as opposed to a load or format failure
    pub fn is_not_found(&self) -> bool {
        matches!(self, RegionError::NotFound(_))
    }
}

/// Convert from anyhow::Error
impl From<anyhow::Error> for RegionError {
    fn from(err: anyhow::Error) -> Self {
        RegionError::Other(err.to_string())
    }
}

/// Convert from TryFromSliceError
impl From<std::array::TryFromSliceError> for RegionError {
    fn from(err: std::array::TryFromSliceError) -> Self {
        RegionError::DatabaseCorrupted(format!("Failed to convert byte slice: {}", err))
    }
}
