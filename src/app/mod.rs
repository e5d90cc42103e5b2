//! Event wiring for the accessibility layer.
//!
//! This module sits between the host page and the effectors in [`crate::a11y`].
//! Events flow one way:
//!
//! ```text
//! Page event → Event → handle_event → HoverState update → Vec<Action> → effectors
//!                                                              ↑
//!                                         settings changes ────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effects the layer can perform
//! - [`handler`]: Focus and hover decision table
//! - [`state`]: The tracked hover target
//! - [`announcer`]: Per-view announcements with duplicate suppression
//! - [`layer`]: Runtime owning page, settings and effectors

pub mod actions;
pub mod announcer;
pub mod handler;
pub mod layer;
pub mod state;

pub use actions::Action;
pub use announcer::PageAnnouncer;
pub use handler::{handle_event, Event};
pub use layer::{apply_typography, AccessibilityLayer};
pub use state::HoverState;
