//! Inclusive board: the accessibility and learning core of an inclusive job board.
//!
//! The crate provides:
//! - An accessibility interaction layer: speak-on-focus and speak-on-hover,
//!   a fingerspelling sign overlay, ReadEasy typography and live-region
//!   announcements, all driven by persisted user toggles
//! - A learning progress tracker with points, badges, completed resources and
//!   quiz results, observable by several subscribers at once
//! - Skill quizzes, a timed typing test and curated learning resources
//! - Saved jobs, job list filtering and a local chat fallback

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Host page (browser binding, native UI, tests)      │  ← implements dom::Page
//! └─────────────────────────────────────────────────────┘
//!                        │ events
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │
//! │  - Event → Action state machine                     │
//! │  - AccessibilityLayer lifecycle + executor          │
//! │  - Page announcer                                   │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ a11y/         │   │ progress/     │   │ resources/    │
//! │ - Extraction  │   │ - Tracker     │   │ jobs/ chat/   │
//! │ - Speech      │   │ - Levels      │   │ - Catalog     │
//! │ - Sign overlay│   │ - Quiz/typing │   │ - Saved/filter│
//! └───────────────┘   └───────────────┘   └───────────────┘
//!         │                    │                    │
//! ┌─────────────────────────────────────────────────────┐
//! │  Storage (storage/) over domain types (domain/)     │
//! │  - KeyValueStore trait, JSON file + memory backends │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │  ← Optional
//! │  - tracing + OpenTelemetry file export              │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`a11y`]: text extraction, speech, sign overlay, settings, live regions
//! - [`app`]: event handling, actions and the [`AccessibilityLayer`]
//! - [`dom`]: host page traits and the in-memory [`dom::Document`]
//! - [`domain`]: plain data types and [`BoardError`]
//! - [`progress`]: progress tracking, levels, quizzes and typing tests
//! - [`resources`]: learning resource links and skill selection
//! - [`jobs`]: saved jobs and job filtering
//! - [`chat`]: local direct messaging
//! - [`storage`]: key-value persistence
//! - [`infrastructure`]: data directory resolution
//! - [`observability`]: tracing setup
//!
//! # Example
//!
//! ```no_run
//! use inclusive_board::progress::{ProgressTracker, QuizLevel};
//! use inclusive_board::{initialize, Config};
//!
//! let store = initialize(&Config::default())?;
//! let mut tracker = ProgressTracker::new(store);
//! tracker.subscribe(|state| println!("{} points", state.total_points));
//! tracker.record_quiz_pass("Web Development", QuizLevel::Basic)?;
//! # Ok::<(), inclusive_board::BoardError>(())
//! ```

pub mod a11y;
pub mod app;
pub mod chat;
pub mod dom;
pub mod domain;
pub mod infrastructure;
pub mod jobs;
pub mod progress;
pub mod resources;
pub mod storage;

pub mod observability;

pub use app::{handle_event, AccessibilityLayer, Action, Event, HoverState};
pub use domain::{AccessibilitySettings, BoardError, LearningState, Result};

use a11y::sign::DEFAULT_GLYPH_BASE_URL;
use a11y::{OverlaySurface, SignOverlay};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use storage::JsonFileStore;

/// Runtime configuration.
///
/// Hosts pass settings either as a flat string map (the same shape as
/// browser-provided options) or as a TOML file:
///
/// ```toml
/// data_dir = "~/.local/share/inclusive-board"
/// glyph_base_url = "https://cdn.example.org/signs/"
/// trace_level = "debug"
/// storage_file = "/var/lib/board/store.json"
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Directory for the store and trace files.
    pub data_dir: PathBuf,

    /// Prefix for sign glyph images; `Sign_language_<L>.svg` is appended.
    pub glyph_base_url: String,

    /// `EnvFilter` directive for tracing. Default: `"info"`.
    pub trace_level: Option<String>,

    /// Explicit store file. Default: `<data_dir>/store.json`.
    pub storage_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: infrastructure::get_data_dir(),
            glyph_base_url: DEFAULT_GLYPH_BASE_URL.to_string(),
            trace_level: None,
            storage_file: None,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    data_dir: Option<String>,
    glyph_base_url: Option<String>,
    trace_level: Option<String>,
    storage_file: Option<String>,
}

impl Config {
    /// Parses configuration from a host-provided key/value map.
    ///
    /// Unknown keys are ignored; blank values fall back to defaults. Paths
    /// starting with `~` are expanded.
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use inclusive_board::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("data_dir".to_string(), "/tmp/board".to_string());
    /// map.insert("trace_level".to_string(), "debug".to_string());
    ///
    /// let config = Config::from_map(&map);
    /// assert_eq!(config.store_path(), std::path::PathBuf::from("/tmp/board/store.json"));
    /// assert_eq!(config.trace_level.as_deref(), Some("debug"));
    /// ```
    #[must_use]
    pub fn from_map(map: &BTreeMap<String, String>) -> Self {
        let value = |key: &str| {
            map.get(key)
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
                .map(String::from)
        };
        Self::from_values(ConfigFile {
            data_dir: value("data_dir"),
            glyph_base_url: value("glyph_base_url"),
            trace_level: value("trace_level"),
            storage_file: value("storage_file"),
        })
    }

    /// Reads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::Config`] if the file cannot be read, is not valid
    /// TOML or contains unknown keys.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|e| BoardError::Config(format!("{}: {e}", path.display())))?;
        let file: ConfigFile =
            toml::from_str(&raw).map_err(|e| BoardError::Config(format!("{}: {e}", path.display())))?;
        Ok(Self::from_values(file))
    }

    fn from_values(file: ConfigFile) -> Self {
        let defaults = Self::default();
        let path = |p: String| PathBuf::from(infrastructure::expand_tilde(&p));
        Self {
            data_dir: file.data_dir.map_or(defaults.data_dir, path),
            glyph_base_url: file.glyph_base_url.unwrap_or(defaults.glyph_base_url),
            trace_level: file.trace_level,
            storage_file: file.storage_file.map(path),
        }
    }

    /// Path of the JSON store file.
    #[must_use]
    pub fn store_path(&self) -> PathBuf {
        self.storage_file
            .clone()
            .unwrap_or_else(|| self.data_dir.join(infrastructure::STORE_FILE_NAME))
    }

    /// Sign overlay drawing on `surface` with the configured glyph location.
    #[must_use]
    pub fn sign_overlay(&self, surface: Box<dyn OverlaySurface>) -> SignOverlay {
        SignOverlay::new(surface, self.glyph_base_url.clone())
    }
}

/// Sets up tracing and opens the persistent store.
///
/// Tracing failures are not fatal; only the store must open.
///
/// # Errors
///
/// Returns an error if the store file's directory cannot be created or the
/// file exists but cannot be read.
pub fn initialize(config: &Config) -> Result<JsonFileStore> {
    let trace_file = observability::init_tracing(config);
    let store_path = config.store_path();
    tracing::debug!(store = ?store_path, traces = ?trace_file, "initializing inclusive board");
    JsonFileStore::open(store_path)
}
