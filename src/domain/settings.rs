//! Accessibility settings model.
//!
//! [`AccessibilitySettings`] is the in-memory view of every accessibility toggle
//! plus the ReadEasy typography parameters. Each numeric parameter has a fixed
//! valid range; values outside it are clamped, never rejected.

use serde::{Deserialize, Serialize};

/// Valid range for the ReadEasy font size, in percent of the base size.
pub const FONT_SIZE_PERCENT_RANGE: (f64, f64) = (80.0, 150.0);

/// Valid range for the ReadEasy line height (unitless multiplier).
pub const LINE_HEIGHT_RANGE: (f64, f64) = (1.2, 2.0);

/// Valid range for the ReadEasy letter spacing, in `em`.
pub const LETTER_SPACING_EM_RANGE: (f64, f64) = (0.0, 0.3);

/// Valid range for the ReadEasy word spacing, in `em`.
pub const WORD_SPACING_EM_RANGE: (f64, f64) = (0.0, 0.15);

/// Root class toggled while ReadEasy mode is active.
pub const READ_EASY_ROOT_CLASS: &str = "a11y-dyslexic";

/// Clamps `value` into `range`, substituting `fallback` for non-finite input.
fn clamp_to(value: f64, range: (f64, f64), fallback: f64) -> f64 {
    if value.is_finite() {
        value.clamp(range.0, range.1)
    } else {
        fallback
    }
}

/// Dyslexia-friendly typography overrides.
///
/// Serialized with the field names the stored bundle has always used
/// (`fontSize`, `lineHeight`, `letterSpacing`, `wordSpacing`). Missing fields
/// deserialize to their defaults so partial bundles still load.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReadEasyParams {
    #[serde(rename = "fontSize")]
    pub font_size_percent: f64,

    #[serde(rename = "lineHeight")]
    pub line_height: f64,

    #[serde(rename = "letterSpacing")]
    pub letter_spacing_em: f64,

    #[serde(rename = "wordSpacing")]
    pub word_spacing_em: f64,
}

impl Default for ReadEasyParams {
    fn default() -> Self {
        Self {
            font_size_percent: 100.0,
            line_height: 1.65,
            letter_spacing_em: 0.02,
            word_spacing_em: 0.08,
        }
    }
}

impl ReadEasyParams {
    /// Returns a copy with every field forced into its documented range.
    ///
    /// Non-finite values (NaN, infinities) are replaced by the field default.
    ///
    /// # Examples
    ///
    /// ```
    /// use inclusive_board::domain::ReadEasyParams;
    ///
    /// let params = ReadEasyParams { font_size_percent: 999.0, ..Default::default() };
    /// assert_eq!(params.clamped().font_size_percent, 150.0);
    /// ```
    #[must_use]
    pub fn clamped(self) -> Self {
        let defaults = Self::default();
        Self {
            font_size_percent: clamp_to(
                self.font_size_percent,
                FONT_SIZE_PERCENT_RANGE,
                defaults.font_size_percent,
            ),
            line_height: clamp_to(self.line_height, LINE_HEIGHT_RANGE, defaults.line_height),
            letter_spacing_em: clamp_to(
                self.letter_spacing_em,
                LETTER_SPACING_EM_RANGE,
                defaults.letter_spacing_em,
            ),
            word_spacing_em: clamp_to(
                self.word_spacing_em,
                WORD_SPACING_EM_RANGE,
                defaults.word_spacing_em,
            ),
        }
    }

    /// Merges a partial update, clamping only the fields the patch sets.
    #[must_use]
    pub fn merged(self, patch: &ReadEasyPatch) -> Self {
        let mut next = self;
        if let Some(v) = patch.font_size_percent {
            next.font_size_percent = clamp_to(v, FONT_SIZE_PERCENT_RANGE, self.font_size_percent);
        }
        if let Some(v) = patch.line_height {
            next.line_height = clamp_to(v, LINE_HEIGHT_RANGE, self.line_height);
        }
        if let Some(v) = patch.letter_spacing_em {
            next.letter_spacing_em = clamp_to(v, LETTER_SPACING_EM_RANGE, self.letter_spacing_em);
        }
        if let Some(v) = patch.word_spacing_em {
            next.word_spacing_em = clamp_to(v, WORD_SPACING_EM_RANGE, self.word_spacing_em);
        }
        next
    }

    /// CSS custom properties carrying these parameters to the stylesheet.
    #[must_use]
    pub fn css_variables(&self) -> [(&'static str, String); 4] {
        [
            ("--readease-font-size", format!("{}%", self.font_size_percent)),
            ("--readease-line-height", format!("{}", self.line_height)),
            ("--readease-letter-spacing", format!("{}em", self.letter_spacing_em)),
            ("--readease-word-spacing", format!("{}em", self.word_spacing_em)),
        ]
    }
}

/// Partial update for [`ReadEasyParams`]; `None` leaves a field untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ReadEasyPatch {
    pub font_size_percent: Option<f64>,
    pub line_height: Option<f64>,
    pub letter_spacing_em: Option<f64>,
    pub word_spacing_em: Option<f64>,
}

/// Process-wide accessibility toggles.
///
/// `speak_on_hover_enabled` is only effective while `speech_enabled` is also on.
/// `sign_on_hover_enabled` is independent of both speech toggles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AccessibilitySettings {
    pub read_easy_mode: bool,
    pub read_easy_params: ReadEasyParams,
    pub speech_enabled: bool,
    pub speak_on_hover_enabled: bool,
    pub sign_on_hover_enabled: bool,
}

impl Default for AccessibilitySettings {
    fn default() -> Self {
        Self {
            read_easy_mode: true,
            read_easy_params: ReadEasyParams::default(),
            speech_enabled: false,
            speak_on_hover_enabled: false,
            sign_on_hover_enabled: false,
        }
    }
}

impl AccessibilitySettings {
    /// Whether hovering an element should speak it (gated by the master toggle).
    #[must_use]
    pub const fn hover_speech_active(&self) -> bool {
        self.speech_enabled && self.speak_on_hover_enabled
    }

    /// Typography snapshot to push to the presentation layer.
    #[must_use]
    pub const fn typography(&self) -> Typography {
        Typography {
            enabled: self.read_easy_mode,
            params: self.read_easy_params,
        }
    }
}

/// Typography state applied to the document root.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Typography {
    pub enabled: bool,
    pub params: ReadEasyParams,
}
