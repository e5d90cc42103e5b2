//! Key-value storage abstraction.
//!
//! This module defines the [`KeyValueStore`] trait every persisted component is
//! generic over. It mirrors the browser's local storage: string keys, string
//! values, synchronous access. Reads never fail; a missing or unreadable value is
//! simply absent and callers apply their documented defaults.

use crate::domain::error::Result;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::cell::RefCell;
use std::rc::Rc;

/// A store shared by several components of the same page session.
///
/// All components run on the single interaction thread, so a `RefCell` borrow is
/// never contended: each mutation runs to completion before the next handler.
pub type Shared<S> = Rc<RefCell<S>>;

/// Wraps a store so several components can hold it at once.
pub fn shared<S: KeyValueStore>(store: S) -> Shared<S> {
    Rc::new(RefCell::new(store))
}

/// Abstraction over local persistence backends.
///
/// # Implementations
///
/// - [`MemoryStore`](crate::storage::MemoryStore): process-local map (tests, no persistence)
/// - [`JsonFileStore`](crate::storage::JsonFileStore): JSON file with atomic writes
pub trait KeyValueStore {
    /// Returns the raw value stored under `key`, if any.
    fn get(&self, key: &str) -> Option<String>;

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot persist the change.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// Removes `key`. Removing an absent key is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot persist the change.
    fn remove(&mut self, key: &str) -> Result<()>;

    /// Picks up changes another handle made to the same backing data.
    ///
    /// Backends without an external copy have nothing to do.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing data exists but cannot be read.
    fn reload(&mut self) -> Result<()> {
        Ok(())
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        (**self).remove(key)
    }

    fn reload(&mut self) -> Result<()> {
        (**self).reload()
    }
}

impl<S: KeyValueStore> KeyValueStore for Shared<S> {
    fn get(&self, key: &str) -> Option<String> {
        self.borrow().get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.borrow_mut().set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.borrow_mut().remove(key)
    }

    fn reload(&mut self) -> Result<()> {
        self.borrow_mut().reload()
    }
}

/// Reads and parses a JSON value, treating malformed data as absent.
pub fn read_json<T: DeserializeOwned>(store: &impl KeyValueStore, key: &str) -> Option<T> {
    let raw = store.get(key)?;
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::debug!(key = %key, error = %e, "ignoring malformed stored value");
            None
        }
    }
}

/// Serializes `value` as JSON and stores it under `key`.
///
/// # Errors
///
/// Returns an error if serialization or the backend write fails.
pub fn write_json<T: Serialize + ?Sized>(
    store: &mut impl KeyValueStore,
    key: &str,
    value: &T,
) -> Result<()> {
    let json = serde_json::to_string(value)?;
    store.set(key, &json)
}

/// Reads a `"1"` / `"0"` flag. `"true"` / `"false"` are accepted too; anything
/// else counts as absent.
pub fn read_flag(store: &impl KeyValueStore, key: &str) -> Option<bool> {
    match store.get(key)?.trim() {
        "1" | "true" => Some(true),
        "0" | "false" => Some(false),
        other => {
            tracing::debug!(key = %key, value = %other, "ignoring unrecognised flag value");
            None
        }
    }
}

/// Stores a flag as `"1"` or `"0"`.
///
/// # Errors
///
/// Returns an error if the backend write fails.
pub fn write_flag(store: &mut impl KeyValueStore, key: &str, value: bool) -> Result<()> {
    store.set(key, if value { "1" } else { "0" })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn test_read_json_ignores_garbage() {
        let mut store = MemoryStore::new();
        store.set("k", "{not json").unwrap();
        assert_eq!(read_json::<Vec<u32>>(&store, "k"), None);

        write_json(&mut store, "k", &vec![1u32, 2]).unwrap();
        assert_eq!(read_json::<Vec<u32>>(&store, "k"), Some(vec![1, 2]));
    }

    #[test]
    fn test_flags_round_through_one_and_zero() {
        let mut store = MemoryStore::new();
        write_flag(&mut store, "f", true).unwrap();
        assert_eq!(store.get("f").as_deref(), Some("1"));
        assert_eq!(read_flag(&store, "f"), Some(true));

        store.set("f", "maybe").unwrap();
        assert_eq!(read_flag(&store, "f"), None);
        assert_eq!(read_flag(&store, "missing"), None);
    }

    #[test]
    fn test_shared_store_sees_writes_from_all_handles() {
        let store = shared(MemoryStore::new());
        let mut a = Rc::clone(&store);
        let b = Rc::clone(&store);
        a.set("x", "1").unwrap();
        assert_eq!(b.get("x").as_deref(), Some("1"));
    }
}
