//! JSON file-based storage backend.
//!
//! Persists every key-value pair in a single human-readable JSON document. Writes
//! go to a temporary file that is then renamed over the target, so a reader never
//! observes a partially written document.
//!
//! # File Format
//!
//! ```json
//! {
//!   "version": 1,
//!   "entries": {
//!     "a11y:text-to-speech": "1",
//!     "learning:state": "{\"totalPoints\":15,\"skills\":{...}}"
//!   }
//! }
//! ```

use crate::domain::error::{BoardError, Result};
use crate::storage::backend::KeyValueStore;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

const FORMAT_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoreDocument {
    version: u32,

    #[serde(default)]
    entries: BTreeMap<String, String>,
}

impl Default for StoreDocument {
    fn default() -> Self {
        Self {
            version: FORMAT_VERSION,
            entries: BTreeMap::new(),
        }
    }
}

/// JSON file storage backend.
///
/// The whole document is held in memory. Every write first re-reads the file
/// and then changes only its own key, so several handles on one path (one per
/// open view) never erase each other's entries. Reads are served from memory
/// until [`reload`](KeyValueStore::reload) is called.
/// `Send` but not `Sync`; owned by the single interaction thread.
#[derive(Debug)]
pub struct JsonFileStore {
    file_path: PathBuf,
    document: StoreDocument,
    dirty: bool,
}

impl JsonFileStore {
    /// Opens the store at `file_path`, creating parent directories as needed.
    ///
    /// A file that exists but cannot be parsed is moved aside to
    /// `<name>.corrupt` and the store starts empty.
    ///
    /// # Errors
    ///
    /// Returns an error if the parent directory cannot be created or the file
    /// exists but cannot be read.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use inclusive_board::storage::{JsonFileStore, KeyValueStore};
    /// use std::path::PathBuf;
    ///
    /// let mut store = JsonFileStore::open(PathBuf::from("/tmp/inclusive-board/store.json"))?;
    /// store.set("a11y:text-to-speech", "1")?;
    /// # Ok::<(), inclusive_board::BoardError>(())
    /// ```
    pub fn open(file_path: PathBuf) -> Result<Self> {
        let _span = tracing::debug_span!("json_store_open", path = ?file_path).entered();

        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let document = if file_path.exists() {
            Self::load_from_file(&file_path)?
        } else {
            tracing::debug!("initializing new empty store");
            StoreDocument::default()
        };

        tracing::debug!(entries = document.entries.len(), "store opened");

        Ok(Self {
            file_path,
            document,
            dirty: false,
        })
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.file_path
    }

    fn load_from_file(path: &Path) -> Result<StoreDocument> {
        let contents = std::fs::read_to_string(path)?;
        match serde_json::from_str::<StoreDocument>(&contents) {
            Ok(document) => {
                tracing::debug!(version = document.version, "loaded store document");
                Ok(document)
            }
            Err(e) => {
                let aside = path.with_extension("corrupt");
                tracing::warn!(error = %e, aside = ?aside, "store file unreadable, starting empty");
                if let Err(rename_err) = std::fs::rename(path, &aside) {
                    tracing::warn!(error = %rename_err, "failed to move corrupt store aside");
                }
                Ok(StoreDocument::default())
            }
        }
    }

    /// Replaces the in-memory document with the file's current content, so a
    /// write only ever changes its own key. A missing file keeps the document.
    fn refresh(&mut self) -> Result<()> {
        if self.dirty {
            // Unsaved edits would be lost; the next save writes them out.
            return Ok(());
        }
        if self.file_path.exists() {
            self.document = Self::load_from_file(&self.file_path)?;
        }
        Ok(())
    }

    fn save_to_file(&mut self) -> Result<()> {
        if !self.dirty {
            return Ok(());
        }

        let json = serde_json::to_string_pretty(&self.document)
            .map_err(|e| BoardError::Storage(format!("failed to serialize store: {e}")))?;

        let tmp_path = self.file_path.with_extension("tmp");
        std::fs::write(&tmp_path, json)?;
        std::fs::rename(&tmp_path, &self.file_path)?;

        self.dirty = false;
        tracing::trace!(path = ?self.file_path, "store saved");
        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.document.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let _span = tracing::debug_span!("json_store_set", key = %key, len = value.len()).entered();

        self.refresh()?;
        if self.document.entries.get(key).map(String::as_str) == Some(value) {
            return Ok(());
        }
        self.document.entries.insert(key.to_string(), value.to_string());
        self.dirty = true;
        self.save_to_file()
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        let _span = tracing::debug_span!("json_store_remove", key = %key).entered();

        self.refresh()?;
        if self.document.entries.remove(key).is_some() {
            self.dirty = true;
            self.save_to_file()?;
        }
        Ok(())
    }

    fn reload(&mut self) -> Result<()> {
        let _span = tracing::debug_span!("json_store_reload", path = ?self.file_path).entered();
        self.refresh()
    }
}

impl Drop for JsonFileStore {
    fn drop(&mut self) {
        if self.dirty {
            if let Err(e) = self.save_to_file() {
                tracing::error!(error = %e, "failed to save store on drop");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_values_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("store.json");

        {
            let mut store = JsonFileStore::open(path.clone()).unwrap();
            store.set("a11y:read-on-hover", "1").unwrap();
            store.set("saved_jobs_ids", "[1,\"x\"]").unwrap();
            store.remove("a11y:read-on-hover").unwrap();
        }

        let store = JsonFileStore::open(path).unwrap();
        assert_eq!(store.get("a11y:read-on-hover"), None);
        assert_eq!(store.get("saved_jobs_ids").as_deref(), Some("[1,\"x\"]"));
    }

    #[test]
    fn test_corrupt_file_is_moved_aside() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        std::fs::write(&path, "{ definitely not json").unwrap();

        let store = JsonFileStore::open(path.clone()).unwrap();
        assert_eq!(store.get("anything"), None);
        assert!(path.with_extension("corrupt").exists());
    }

    #[test]
    fn test_two_handles_on_one_path_keep_each_others_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        let mut first = JsonFileStore::open(path.clone()).unwrap();
        let mut second = JsonFileStore::open(path.clone()).unwrap();

        first.set("learning:state", "{\"totalPoints\":25}").unwrap();
        assert_eq!(second.get("learning:state"), None);
        second.reload().unwrap();
        assert_eq!(second.get("learning:state").as_deref(), Some("{\"totalPoints\":25}"));

        let mut third = JsonFileStore::open(path.clone()).unwrap();
        first.set("a11y:readease", "0").unwrap();
        third.set("saved_jobs_ids", "[1]").unwrap();
        third.remove("missing").unwrap();
        drop((first, second, third));

        let reopened = JsonFileStore::open(path).unwrap();
        assert_eq!(reopened.get("learning:state").as_deref(), Some("{\"totalPoints\":25}"));
        assert_eq!(reopened.get("a11y:readease").as_deref(), Some("0"));
        assert_eq!(reopened.get("saved_jobs_ids").as_deref(), Some("[1]"));
    }

    #[test]
    fn test_no_temporary_file_left_behind() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        let mut store = JsonFileStore::open(path.clone()).unwrap();
        store.set("k", "v").unwrap();

        assert!(path.exists());
        assert!(!path.with_extension("tmp").exists());
    }
}
