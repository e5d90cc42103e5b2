//! Accessibility interaction layer.
//!
//! The pieces here are deliberately small and host-agnostic:
//!
//! - [`extract`]: which text an element should be read as
//! - [`settings`]: the persisted toggles and their implied actions
//! - [`speech`]: cancel-then-speak wrapper over a platform speech engine
//! - [`sign`]: fingerspelling overlay layout and lifecycle
//! - [`announcer`]: live-region writes and per-channel duplicate suppression
//!
//! The event wiring that ties them together lives in [`crate::app`].

pub mod announcer;
pub mod extract;
pub mod settings;
pub mod sign;
pub mod speech;

pub use announcer::{announce, announce_status, compose_announcement, AnnouncementChannel};
pub use extract::{extract_speakable_text, is_page_container, is_readable};
pub use settings::SettingsStore;
pub use sign::{OverlaySurface, SignLayout, SignOverlay};
pub use speech::{SpeechBackend, SpeechEffector, Utterance};
