//! Side effects produced by the accessibility layer.
//!
//! The event handler and the settings store never touch an effector directly.
//! They return a `Vec<Action>`, which the
//! [`AccessibilityLayer`](crate::app::AccessibilityLayer) executes in order
//! against the speech engine, the sign overlay, the live regions and the root
//! styling hooks.
//!
//! # Example
//!
//! ```rust
//! use inclusive_board::app::Action;
//!
//! let actions = vec![Action::StopSpeech, Action::Speak("Apply now".to_string())];
//! assert_eq!(actions.len(), 2);
//! ```

use crate::domain::Typography;

/// Commands executed by the accessibility layer.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Cancels current speech and speaks the text.
    Speak(String),

    /// Cancels current speech.
    StopSpeech,

    /// Replaces any visible sign overlay with one for the text.
    ShowSign(String),

    /// Removes the sign overlay if visible.
    HideSign,

    /// Toggles the ReadEasy root class and pushes the typography variables.
    ApplyTypography(Typography),

    /// Writes `title` (and `description`) to the assertive live region.
    Announce {
        title: String,
        description: Option<String>,
    },

    /// Writes low-urgency text to the polite live region.
    Status(String),
}
