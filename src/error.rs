//! Error types for the ELIZA simple plugin
//!
//! Generating a response never fails. Errors only surface while loading a
//! script or reading configuration.

use thiserror::Error;

/// Result type alias for plugin operations
pub type Result<T> = std::result::Result<T, ElizaSimpleError>;

/// ELIZA simple plugin error types
#[derive(Debug, Error)]
pub enum ElizaSimpleError {
    /// The script failed validation
    #[error("Invalid script: {0}")]
    InvalidScript(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Failed to read a script file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for ElizaSimpleError {
    fn from(err: serde_json::Error) -> Self {
        ElizaSimpleError::SerializationError(err.to_string())
    }
}
