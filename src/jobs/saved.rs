//! Saved (bookmarked) jobs.

use crate::domain::error::Result;
use crate::domain::JobId;
use crate::storage::{keys, read_json, write_json, KeyValueStore};

/// Bookmarked job ids, stored as a JSON array of numbers and strings.
///
/// Unreadable data counts as an empty list. Ids keep the order in which they
/// were saved.
#[derive(Debug)]
pub struct SavedJobs<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> SavedJobs<S> {
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    #[must_use]
    pub fn list(&self) -> Vec<JobId> {
        read_json(&self.store, keys::SAVED_JOB_IDS).unwrap_or_default()
    }

    #[must_use]
    pub fn is_saved(&self, id: &JobId) -> bool {
        self.list().contains(id)
    }

    /// Saves `id` if it is not saved, removes it otherwise.
    ///
    /// Returns whether the job is saved afterwards.
    ///
    /// # Errors
    ///
    /// Returns an error if the list cannot be persisted.
    pub fn toggle(&mut self, id: &JobId) -> Result<bool> {
        let _span = tracing::debug_span!("toggle_saved_job", id = %id).entered();
        let mut ids = self.list();
        let now_saved = if let Some(pos) = ids.iter().position(|existing| existing == id) {
            ids.remove(pos);
            false
        } else {
            ids.push(id.clone());
            true
        };
        write_json(&mut self.store, keys::SAVED_JOB_IDS, &ids)?;
        tracing::debug!(saved = now_saved, total = ids.len(), "saved jobs updated");
        Ok(now_saved)
    }

    pub const fn store(&self) -> &S {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn test_toggle_round_trip() {
        let mut saved = SavedJobs::new(MemoryStore::new());
        let id = JobId::from("1");
        assert!(saved.toggle(&id).unwrap());
        assert!(saved.is_saved(&id));
        assert!(!saved.toggle(&id).unwrap());
        assert!(!saved.is_saved(&id));
        assert!(saved.list().is_empty());
    }

    #[test]
    fn test_numeric_and_string_ids_are_distinct() {
        let mut saved = SavedJobs::new(MemoryStore::new());
        saved.toggle(&JobId::from(7)).unwrap();
        assert!(saved.is_saved(&JobId::from(7)));
        assert!(!saved.is_saved(&JobId::from("7")));
        assert_eq!(saved.store().get(keys::SAVED_JOB_IDS).as_deref(), Some("[7]"));
    }

    #[test]
    fn test_corrupt_list_reads_as_empty() {
        let mut store = MemoryStore::new();
        store.set(keys::SAVED_JOB_IDS, "{\"not\": \"a list\"}").unwrap();
        let mut saved = SavedJobs::new(store);
        assert!(saved.list().is_empty());
        assert!(saved.toggle(&JobId::from(1)).unwrap());
    }
}
