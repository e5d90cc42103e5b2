//! Local chat fallback, used when no hosted messaging backend is configured.

pub mod local;

pub use local::LocalChat;
