//! Sign-language overlay effector.
//!
//! Renders a simulated fingerspelling panel for hovered text: one row per word,
//! one glyph image per letter. The layout is computed here; drawing it is the
//! job of the host's [`OverlaySurface`].
//!
//! # Layout Rules
//!
//! - Whitespace is collapsed and only the first 8 words are considered
//! - Each word is decomposed (NFD) so accented letters keep their base letter,
//!   then uppercased, stripped of everything outside `A`–`Z` and capped at 20
//!   letters
//! - Words left with no letters produce no row
//! - No rows at all means no overlay

use unicode_normalization::UnicodeNormalization;

/// Maximum number of words considered per overlay.
pub const MAX_WORDS: usize = 8;

/// Maximum number of glyphs rendered for a single word.
pub const MAX_LETTERS_PER_WORD: usize = 20;

/// Default location of the per-letter glyph images.
pub const DEFAULT_GLYPH_BASE_URL: &str = "https://commons.wikimedia.org/wiki/Special:FilePath/";

/// One fingerspelling glyph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Glyph {
    pub letter: char,
    pub src: String,
    pub alt: String,
}

impl Glyph {
    fn new(letter: char, base_url: &str) -> Self {
        Self {
            letter,
            src: format!("{base_url}Sign_language_{letter}.svg"),
            alt: format!("Sign language letter {letter}"),
        }
    }
}

/// Screen corner the panel is pinned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

/// Presentation constants of the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlayStyle {
    pub corner: Corner,
    pub inset_px: u32,
    pub z_index: i32,
    pub padding_px: u32,
    pub row_gap_px: u32,
    pub glyph_gap_px: u32,
    pub glyph_size_px: u32,
    pub max_width_vw: u32,
    /// Always `false`; the panel never captures the pointer.
    pub pointer_events: bool,
    /// Always `true`; the glyphs are hidden from assistive technology.
    pub aria_hidden: bool,
}

impl Default for OverlayStyle {
    fn default() -> Self {
        Self {
            corner: Corner::BottomRight,
            inset_px: 24,
            z_index: 9999,
            padding_px: 16,
            row_gap_px: 12,
            glyph_gap_px: 6,
            glyph_size_px: 38,
            max_width_vw: 75,
            pointer_events: false,
            aria_hidden: true,
        }
    }
}

/// A computed overlay, ready to be mounted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignLayout {
    pub rows: Vec<Vec<Glyph>>,
    pub style: OverlayStyle,
}

impl SignLayout {
    /// Builds the layout for `text`, or `None` when it yields no rows.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use inclusive_board::a11y::sign::{SignLayout, DEFAULT_GLYPH_BASE_URL};
    ///
    /// let layout = SignLayout::build("Apply now to this role", DEFAULT_GLYPH_BASE_URL).unwrap();
    /// let lengths: Vec<usize> = layout.rows.iter().map(Vec::len).collect();
    /// assert_eq!(lengths, vec![5, 3, 2, 4, 4]);
    ///
    /// assert!(SignLayout::build("   ", DEFAULT_GLYPH_BASE_URL).is_none());
    /// ```
    #[must_use]
    pub fn build(text: &str, glyph_base_url: &str) -> Option<Self> {
        let rows: Vec<Vec<Glyph>> = text
            .split_whitespace()
            .take(MAX_WORDS)
            .map(|word| {
                word.nfd()
                    .flat_map(char::to_uppercase)
                    .filter(char::is_ascii_uppercase)
                    .take(MAX_LETTERS_PER_WORD)
                    .map(|letter| Glyph::new(letter, glyph_base_url))
                    .collect::<Vec<_>>()
            })
            .filter(|row| !row.is_empty())
            .collect();

        if rows.is_empty() {
            return None;
        }

        Some(Self {
            rows,
            style: OverlayStyle::default(),
        })
    }

    #[must_use]
    pub fn glyph_count(&self) -> usize {
        self.rows.iter().map(Vec::len).sum()
    }
}

/// Host surface that draws and removes the panel.
pub trait OverlaySurface {
    fn mount(&mut self, layout: &SignLayout);

    fn unmount(&mut self);
}

/// Sign overlay effector. Holds at most one mounted panel.
pub struct SignOverlay {
    surface: Option<Box<dyn OverlaySurface>>,
    glyph_base_url: String,
    current: Option<SignLayout>,
}

impl Default for SignOverlay {
    fn default() -> Self {
        Self {
            surface: None,
            glyph_base_url: DEFAULT_GLYPH_BASE_URL.to_string(),
            current: None,
        }
    }
}

impl SignOverlay {
    pub fn new(surface: Box<dyn OverlaySurface>, glyph_base_url: impl Into<String>) -> Self {
        Self {
            surface: Some(surface),
            glyph_base_url: glyph_base_url.into(),
            current: None,
        }
    }

    /// Replaces any visible panel with one for `text`.
    ///
    /// Returns `true` if a panel is now visible.
    pub fn show(&mut self, text: &str) -> bool {
        self.hide();

        let Some(layout) = SignLayout::build(text, &self.glyph_base_url) else {
            tracing::trace!("no displayable letters, overlay stays hidden");
            return false;
        };

        tracing::debug!(rows = layout.rows.len(), glyphs = layout.glyph_count(), "showing sign overlay");
        if let Some(surface) = self.surface.as_mut() {
            surface.mount(&layout);
        }
        self.current = Some(layout);
        true
    }

    /// Removes the panel if present. Idempotent.
    pub fn hide(&mut self) {
        if self.current.take().is_some() {
            if let Some(surface) = self.surface.as_mut() {
                surface.unmount();
            }
        }
    }

    #[must_use]
    pub const fn is_visible(&self) -> bool {
        self.current.is_some()
    }

    #[must_use]
    pub const fn current(&self) -> Option<&SignLayout> {
        self.current.as_ref()
    }
}

impl std::fmt::Debug for SignOverlay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignOverlay")
            .field("glyph_base_url", &self.glyph_base_url)
            .field("visible", &self.is_visible())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Default)]
    struct Counts {
        mounted: usize,
        unmounted: usize,
    }

    struct CountingSurface(Rc<RefCell<Counts>>);

    impl OverlaySurface for CountingSurface {
        fn mount(&mut self, _layout: &SignLayout) {
            self.0.borrow_mut().mounted += 1;
        }

        fn unmount(&mut self) {
            self.0.borrow_mut().unmounted += 1;
        }
    }

    #[test]
    fn test_one_row_per_word_with_letter_counts() {
        let layout = SignLayout::build("Apply now to this role", DEFAULT_GLYPH_BASE_URL).unwrap();
        assert_eq!(layout.rows.len(), 5);
        for (row, word) in layout.rows.iter().zip(["Apply", "now", "to", "this", "role"]) {
            assert_eq!(row.len(), word.chars().filter(char::is_ascii_alphabetic).count());
        }
    }

    #[test]
    fn test_letters_uppercased_and_stripped() {
        let layout = SignLayout::build("c++ 2nd-try!", "https://glyphs/").unwrap();
        let letters: Vec<Vec<char>> = layout
            .rows
            .iter()
            .map(|row| row.iter().map(|g| g.letter).collect())
            .collect();
        assert_eq!(letters, vec![vec!['C'], vec!['N', 'D', 'T', 'R', 'Y']]);
        assert_eq!(layout.rows[0][0].src, "https://glyphs/Sign_language_C.svg");
        assert_eq!(layout.rows[0][0].alt, "Sign language letter C");
    }

    #[test]
    fn test_accented_letters_keep_their_base_letter() {
        let layout = SignLayout::build("Café résumé", DEFAULT_GLYPH_BASE_URL).unwrap();
        let words: Vec<String> = layout
            .rows
            .iter()
            .map(|row| row.iter().map(|g| g.letter).collect())
            .collect();
        assert_eq!(words, vec!["CAFE", "RESUME"]);
    }

    #[test]
    fn test_word_and_letter_caps() {
        let text = "a b c d e f g h i j";
        let layout = SignLayout::build(text, DEFAULT_GLYPH_BASE_URL).unwrap();
        assert_eq!(layout.rows.len(), MAX_WORDS);

        let long = "x".repeat(50);
        let layout = SignLayout::build(&long, DEFAULT_GLYPH_BASE_URL).unwrap();
        assert_eq!(layout.rows[0].len(), MAX_LETTERS_PER_WORD);
    }

    #[test]
    fn test_blank_text_shows_nothing() {
        let counts = Rc::new(RefCell::new(Counts::default()));
        let mut overlay = SignOverlay::new(Box::new(CountingSurface(Rc::clone(&counts))), DEFAULT_GLYPH_BASE_URL);

        assert!(!overlay.show(""));
        assert!(!overlay.show("   "));
        assert!(!overlay.show("123 !!"));
        assert!(!overlay.is_visible());
        assert_eq!(counts.borrow().mounted, 0);
    }

    #[test]
    fn test_show_replaces_and_hide_is_idempotent() {
        let counts = Rc::new(RefCell::new(Counts::default()));
        let mut overlay = SignOverlay::new(Box::new(CountingSurface(Rc::clone(&counts))), DEFAULT_GLYPH_BASE_URL);

        assert!(overlay.show("Jobs"));
        assert!(overlay.show("Resources"));
        overlay.hide();
        overlay.hide();

        let counts = counts.borrow();
        assert_eq!(counts.mounted, 2);
        assert_eq!(counts.unmounted, 2);
        assert!(!overlay.is_visible());
    }

    #[test]
    fn test_panel_never_interactive() {
        let style = OverlayStyle::default();
        assert!(!style.pointer_events);
        assert!(style.aria_hidden);
        assert_eq!(style.corner, Corner::BottomRight);
    }
}
