//! Document storage and configuration.
//!
//! The panel never touches the filesystem directly: every read and write goes
//! through a [`DocumentStore`], addressed by vault-relative paths such as
//! `journals/2026-10-19.md`.

mod config;
pub mod memory;
pub mod vault;

pub use config::{Config, JournalConfig, NotificationsConfig, TimerConfig};
pub use memory::MemoryStore;
pub use vault::VaultStore;

use std::path::PathBuf;
use std::sync::Arc;

use crate::error::{ConfigError, StorageError};

/// Path-addressed text storage provided by the host.
///
/// `read` reports a missing document as [`StorageError::NotFound`]; callers
/// rely on that to decide when to create a document lazily.
pub trait DocumentStore: Send + Sync {
    /// Full text of the document.
    fn read(&self, path: &str) -> Result<String, StorageError>;

    /// Replace the document, creating it if needed.
    fn write(&self, path: &str, text: &str) -> Result<(), StorageError>;

    /// Append to the document, creating it if needed.
    fn append(&self, path: &str, text: &str) -> Result<(), StorageError>;

    /// Delete the document.
    fn remove(&self, path: &str) -> Result<(), StorageError>;

    /// Create a new document. Fails with `AlreadyExists` if one is present.
    fn create(&self, path: &str, text: &str) -> Result<(), StorageError>;

    fn exists(&self, path: &str) -> bool {
        self.read(path).is_ok()
    }
}

impl<S: DocumentStore + ?Sized> DocumentStore for Arc<S> {
    fn read(&self, path: &str) -> Result<String, StorageError> {
        (**self).read(path)
    }

    fn write(&self, path: &str, text: &str) -> Result<(), StorageError> {
        (**self).write(path, text)
    }

    fn append(&self, path: &str, text: &str) -> Result<(), StorageError> {
        (**self).append(path, text)
    }

    fn remove(&self, path: &str) -> Result<(), StorageError> {
        (**self).remove(path)
    }

    fn create(&self, path: &str, text: &str) -> Result<(), StorageError> {
        (**self).create(path, text)
    }

    fn exists(&self, path: &str) -> bool {
        (**self).exists(path)
    }
}

/// Returns `~/.config/tomato[-dev]/` based on TOMATO_ENV.
///
/// Set TOMATO_ENV=dev to use development data directory.
///
/// # Errors
/// Returns an error if creating the config directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("TOMATO_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("tomato-dev")
    } else {
        base_dir.join("tomato")
    };

    std::fs::create_dir_all(&dir).map_err(|e| ConfigError::DataDir(e.to_string()))?;
    Ok(dir)
}
