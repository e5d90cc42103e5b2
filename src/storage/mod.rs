//! Storage layer for locally persisted settings and progress.
//!
//! Every persisted component is generic over [`KeyValueStore`], so the same code
//! runs against a JSON file on disk, an in-memory map in tests, or a host-provided
//! store (for instance browser local storage behind a wasm binding).
//!
//! # Modules
//!
//! - `backend`: the [`KeyValueStore`] trait, sharing and JSON/flag helpers
//! - `json`: JSON file backend with atomic writes
//! - `memory`: in-memory backend
//! - `keys`: stable key names

pub mod backend;
pub mod json;
pub mod keys;
pub mod memory;

pub use backend::{read_flag, read_json, shared, write_flag, write_json, KeyValueStore, Shared};
pub use json::JsonFileStore;
pub use memory::MemoryStore;
