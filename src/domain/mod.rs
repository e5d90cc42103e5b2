//! Domain layer for the inclusive board core.
//!
//! This module contains the plain data types shared by the accessibility layer,
//! the progress tracker and the local stores, independent of any host page or
//! storage backend.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`settings`]: Accessibility toggles and ReadEasy typography
//! - [`progress`]: Learning state, quiz results and badges
//! - [`job`]: Job postings and their ids
//! - [`chat`]: Local chat profile, conversations and messages

pub mod chat;
pub mod error;
pub mod job;
pub mod progress;
pub mod settings;

pub use chat::{ChatRole, ChatRow, MessageRow, SelfProfile};
pub use error::{BoardError, Result};
pub use job::{JobId, JobRow};
pub use progress::{Badge, LearningState, QuizResult, SkillProgress};
pub use settings::{AccessibilitySettings, ReadEasyParams, ReadEasyPatch, Typography};
