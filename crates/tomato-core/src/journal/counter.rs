use chrono::NaiveDate;

use super::frontmatter::{read_counter, write_counter};
use super::JournalLayout;
use crate::error::StorageError;
use crate::storage::DocumentStore;

/// Completed-session count kept in the front matter of each day's journal.
///
/// Every call is a plain read-modify-write against the store; there is no
/// guard against a second writer touching the same document.
#[derive(Debug, Clone)]
pub struct DailyCounter<S> {
    store: S,
    layout: JournalLayout,
}

impl<S: DocumentStore> DailyCounter<S> {
    pub fn new(store: S, layout: JournalLayout) -> Self {
        Self { store, layout }
    }

    pub fn layout(&self) -> &JournalLayout {
        &self.layout
    }

    /// Count for `day`.
    ///
    /// A missing document is created from the template and counts as 0. An
    /// existing document without the counter also counts as 0 and is left
    /// untouched.
    pub fn get(&self, day: NaiveDate) -> Result<u32, StorageError> {
        let path = self.layout.day_path(day);
        match self.store.read(&path) {
            Ok(text) => Ok(read_counter(&text, &self.layout.counter_key).unwrap_or(0)),
            Err(e) if e.is_not_found() => {
                tracing::debug!(%path, "creating journal document");
                match self.store.create(&path, &self.layout.template()) {
                    Ok(()) | Err(StorageError::AlreadyExists(_)) => Ok(0),
                    Err(e) => Err(e),
                }
            }
            Err(e) => Err(e),
        }
    }

    /// Store `count` for `day`, preserving the rest of the document.
    pub fn set(&self, day: NaiveDate, count: u32) -> Result<(), StorageError> {
        let path = self.layout.day_path(day);
        let text = match self.store.read(&path) {
            Ok(text) => text,
            Err(e) if e.is_not_found() => self.layout.template(),
            Err(e) => return Err(e),
        };
        let updated = write_counter(&text, &self.layout.counter_key, count);
        self.store.write(&path, &updated)
    }

    /// Add one completed session to `day` and return the new count.
    pub fn increment(&self, day: NaiveDate) -> Result<u32, StorageError> {
        let next = self.get(day)?.saturating_add(1);
        self.set(day, next)?;
        Ok(next)
    }
}
