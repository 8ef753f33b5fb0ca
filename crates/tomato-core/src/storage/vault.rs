//! Filesystem-backed document store rooted at a vault directory.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Component, Path, PathBuf};

use super::DocumentStore;
use crate::error::StorageError;

/// Markdown vault on disk. Document paths are relative to `root`.
#[derive(Debug, Clone)]
pub struct VaultStore {
    root: PathBuf,
}

impl VaultStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Map a vault-relative path to a filesystem path.
    ///
    /// Absolute paths and `..` components are rejected so a document path can
    /// never leave the vault.
    pub fn resolve(&self, path: &str) -> Result<PathBuf, StorageError> {
        let rel = Path::new(path);
        if path.is_empty() {
            return Err(invalid(path, "empty path"));
        }
        for component in rel.components() {
            match component {
                Component::Normal(_) | Component::CurDir => {}
                Component::ParentDir => return Err(invalid(path, "parent directory reference")),
                Component::RootDir | Component::Prefix(_) => {
                    return Err(invalid(path, "absolute path"))
                }
            }
        }
        Ok(self.root.join(rel))
    }

    fn ensure_parent(&self, path: &str, full: &Path) -> Result<(), StorageError> {
        if let Some(parent) = full.parent() {
            fs::create_dir_all(parent).map_err(|e| StorageError::io(path, e))?;
        }
        Ok(())
    }
}

fn invalid(path: &str, reason: &str) -> StorageError {
    StorageError::InvalidPath {
        path: path.to_string(),
        reason: reason.to_string(),
    }
}

impl DocumentStore for VaultStore {
    fn read(&self, path: &str) -> Result<String, StorageError> {
        let full = self.resolve(path)?;
        fs::read_to_string(&full).map_err(|e| StorageError::io(path, e))
    }

    fn write(&self, path: &str, text: &str) -> Result<(), StorageError> {
        let full = self.resolve(path)?;
        self.ensure_parent(path, &full)?;
        fs::write(&full, text).map_err(|e| StorageError::io(path, e))
    }

    fn append(&self, path: &str, text: &str) -> Result<(), StorageError> {
        let full = self.resolve(path)?;
        self.ensure_parent(path, &full)?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&full)
            .map_err(|e| StorageError::io(path, e))?;
        file.write_all(text.as_bytes())
            .map_err(|e| StorageError::io(path, e))
    }

    fn remove(&self, path: &str) -> Result<(), StorageError> {
        let full = self.resolve(path)?;
        fs::remove_file(&full).map_err(|e| StorageError::io(path, e))
    }

    fn create(&self, path: &str, text: &str) -> Result<(), StorageError> {
        let full = self.resolve(path)?;
        self.ensure_parent(path, &full)?;
        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&full)
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::AlreadyExists => StorageError::AlreadyExists(path.to_string()),
                _ => StorageError::io(path, e),
            })?;
        file.write_all(text.as_bytes())
            .map_err(|e| StorageError::io(path, e))
    }

    fn exists(&self, path: &str) -> bool {
        self.resolve(path).map(|p| p.is_file()).unwrap_or(false)
    }
}
