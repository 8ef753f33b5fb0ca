//! Core error types for tomato-core.
//!
//! Storage failures are kept apart from configuration failures so the panel
//! can recover from a missing document without matching on strings.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for tomato-core, and what the `tomato` commands return.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Document storage errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO errors outside the vault (terminal, runtime)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors raised by a [`DocumentStore`](crate::storage::DocumentStore).
#[derive(Error, Debug)]
pub enum StorageError {
    /// The document does not exist
    #[error("no such file: {0}")]
    NotFound(String),

    /// `create` was asked to overwrite an existing document
    #[error("document already exists: {0}")]
    AlreadyExists(String),

    /// The path escapes the vault or is otherwise unusable
    #[error("invalid document path '{path}': {reason}")]
    InvalidPath { path: String, reason: String },

    /// Underlying filesystem failure
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl StorageError {
    /// Whether this error means the document is simply absent.
    pub fn is_not_found(&self) -> bool {
        matches!(self, StorageError::NotFound(_))
    }

    pub(crate) fn io(path: &str, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::NotFound {
            return StorageError::NotFound(path.to_string());
        }
        StorageError::Io {
            path: path.to_string(),
            source,
        }
    }
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Key does not exist in the configuration tree
    #[error("unknown config key: {0}")]
    UnknownKey(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// The configuration directory could not be determined or created
    #[error("Cannot prepare data directory: {0}")]
    DataDir(String),
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
