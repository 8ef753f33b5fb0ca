use chrono::{NaiveDate, NaiveDateTime};

use super::JournalLayout;
use crate::error::StorageError;
use crate::storage::DocumentStore;

/// Scratch document holding notes for the session in progress.
///
/// If the process dies between [`Staging::stage_start`] and
/// [`Staging::stage_merge`] the document stays behind; the next start
/// overwrites it.
#[derive(Debug, Clone)]
pub struct Staging<S> {
    store: S,
    layout: JournalLayout,
}

impl<S: DocumentStore> Staging<S> {
    pub fn new(store: S, layout: JournalLayout) -> Self {
        Self { store, layout }
    }

    pub fn path(&self) -> &str {
        &self.layout.staging_path
    }

    /// Open a fresh staging document headed with the start time.
    pub fn stage_start(&self, at: NaiveDateTime) -> Result<(), StorageError> {
        self.store
            .write(&self.layout.staging_path, &self.layout.staging_header(at))
    }

    /// Add a line of notes to the staging document.
    pub fn jot(&self, note: &str) -> Result<(), StorageError> {
        let line = format!("{}\n", note.trim_end());
        self.store.append(&self.layout.staging_path, &line)
    }

    /// Current staged notes, if any.
    pub fn contents(&self) -> Result<Option<String>, StorageError> {
        match self.store.read(&self.layout.staging_path) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Append the staged notes to `day`'s journal, separated by a blank line,
    /// then delete the staging document.
    ///
    /// The journal is appended to before the staging document is removed, so a
    /// failed append leaves the notes where they were.
    pub fn stage_merge(&self, day: NaiveDate) -> Result<(), StorageError> {
        let data = self.store.read(&self.layout.staging_path)?;
        let journal = self.layout.day_path(day);
        self.store.append(&journal, &format!("\n\n{data}"))?;
        self.store.remove(&self.layout.staging_path)?;
        tracing::debug!(%journal, bytes = data.len(), "merged staging document");
        Ok(())
    }
}
