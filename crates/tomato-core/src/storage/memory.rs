//! In-memory document store.
//!
//! Used by tests and by hosts that keep documents in their own buffers.

use std::collections::BTreeMap;
use std::sync::Mutex;

use super::DocumentStore;
use crate::error::StorageError;

#[derive(Debug, Default)]
pub struct MemoryStore {
    docs: Mutex<BTreeMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a store with documents.
    pub fn with_documents<I, K, V>(docs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let map = docs
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self {
            docs: Mutex::new(map),
        }
    }

    /// Sorted list of document paths.
    pub fn paths(&self) -> Vec<String> {
        self.lock().keys().cloned().collect()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, BTreeMap<String, String>> {
        // A poisoned map is still a consistent map: every mutation is a single insert/remove.
        self.docs.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl DocumentStore for MemoryStore {
    fn read(&self, path: &str) -> Result<String, StorageError> {
        self.lock()
            .get(path)
            .cloned()
            .ok_or_else(|| StorageError::NotFound(path.to_string()))
    }

    fn write(&self, path: &str, text: &str) -> Result<(), StorageError> {
        self.lock().insert(path.to_string(), text.to_string());
        Ok(())
    }

    fn append(&self, path: &str, text: &str) -> Result<(), StorageError> {
        self.lock().entry(path.to_string()).or_default().push_str(text);
        Ok(())
    }

    fn remove(&self, path: &str) -> Result<(), StorageError> {
        self.lock()
            .remove(path)
            .map(|_| ())
            .ok_or_else(|| StorageError::NotFound(path.to_string()))
    }

    fn create(&self, path: &str, text: &str) -> Result<(), StorageError> {
        let mut docs = self.lock();
        if docs.contains_key(path) {
            return Err(StorageError::AlreadyExists(path.to_string()));
        }
        docs.insert(path.to_string(), text.to_string());
        Ok(())
    }

    fn exists(&self, path: &str) -> bool {
        self.lock().contains_key(path)
    }
}
