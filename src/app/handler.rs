//! Event handling for focus and hover.
//!
//! [`handle_event`] is the whole decision table of the accessibility layer. It
//! reads the settings snapshot and the page, updates the [`HoverState`], and
//! returns the actions to run. It performs no side effects itself.
//!
//! # Rules
//!
//! - **Focus**: speaks the element when speech is on and it is readable.
//! - **Pointer over**: unreadable elements are ignored. Re-entering the tracked
//!   element is a no-op. Otherwise the element becomes the tracked one; its
//!   text is spoken when hover speech is active and fingerspelled when the sign
//!   overlay is on.
//! - **Pointer out**: leaving the tracked element for somewhere outside its
//!   subtree clears tracking and hides the overlay.
//!
//! # Example
//!
//! ```rust
//! use inclusive_board::app::{handle_event, Action, Event, HoverState};
//! use inclusive_board::dom::Document;
//! use inclusive_board::domain::AccessibilitySettings;
//!
//! let mut doc = Document::new();
//! let button = doc.element(doc.body(), "button");
//! doc.text(button, "Apply now");
//!
//! let settings = AccessibilitySettings { speech_enabled: true, ..Default::default() };
//! let mut hover = HoverState::new();
//! let actions = handle_event(&mut hover, &settings, &doc, &Event::FocusIn { target: button });
//! assert_eq!(actions, vec![Action::Speak("Apply now".to_string())]);
//! ```

use crate::a11y::{extract_speakable_text, is_readable};
use crate::app::{Action, HoverState};
use crate::dom::{ElementTree, NodeId};
use crate::domain::AccessibilitySettings;

/// Page events the layer reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// An element received focus (bubbling `focusin`).
    FocusIn { target: NodeId },

    /// The pointer entered an element.
    PointerOver { target: NodeId },

    /// The pointer left `target` for `related` (`None` when it left the page).
    PointerOut {
        target: NodeId,
        related: Option<NodeId>,
    },
}

/// Decides the actions for `event`, updating `hover`.
pub fn handle_event<T: ElementTree + ?Sized>(
    hover: &mut HoverState,
    settings: &AccessibilitySettings,
    tree: &T,
    event: &Event,
) -> Vec<Action> {
    let _span = tracing::debug_span!("handle_event", event_type = ?event).entered();

    match *event {
        Event::FocusIn { target } => {
            if !settings.speech_enabled || !is_readable(tree, target) {
                return vec![];
            }
            extract_speakable_text(tree, target)
                .map(Action::Speak)
                .into_iter()
                .collect()
        }
        Event::PointerOver { target } => {
            if !is_readable(tree, target) {
                return vec![];
            }
            if hover.is_tracking(target) {
                tracing::trace!("pointer still on tracked element");
                return vec![];
            }
            hover.track(target);

            let Some(text) = extract_speakable_text(tree, target) else {
                tracing::debug!(node = target.0, "hovered element has no speakable text");
                return vec![];
            };

            let mut actions = Vec::with_capacity(2);
            if settings.hover_speech_active() {
                actions.push(Action::Speak(text.clone()));
            }
            if settings.sign_on_hover_enabled {
                actions.push(Action::ShowSign(text));
            }
            actions
        }
        Event::PointerOut { target, related } => {
            let Some(tracked) = hover.target() else {
                return vec![];
            };
            if related.is_some_and(|node| tree.contains(tracked, node)) {
                tracing::trace!(node = target.0, "pointer moved within tracked element");
                return vec![];
            }
            hover.clear();
            vec![Action::HideSign]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Document;

    fn page() -> (Document, NodeId, NodeId) {
        let mut doc = Document::new();
        let card = doc.element(doc.body(), "div");
        doc.set_attribute(card, "aria-label", "Customer Support Associate");
        let inner = doc.element(card, "span");
        doc.text(inner, "Remote");
        (doc, card, inner)
    }

    fn all_on() -> AccessibilitySettings {
        AccessibilitySettings {
            speech_enabled: true,
            speak_on_hover_enabled: true,
            sign_on_hover_enabled: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_focus_requires_speech() {
        let (doc, card, _) = page();
        let mut hover = HoverState::new();
        let off = AccessibilitySettings::default();
        assert!(handle_event(&mut hover, &off, &doc, &Event::FocusIn { target: card }).is_empty());

        let on = all_on();
        assert_eq!(
            handle_event(&mut hover, &on, &doc, &Event::FocusIn { target: card }),
            vec![Action::Speak("Customer Support Associate".to_string())]
        );
    }

    #[test]
    fn test_hover_speech_toggle_alone_never_speaks_on_focus() {
        let (doc, card, _) = page();
        let mut hover = HoverState::new();
        let settings = AccessibilitySettings {
            speech_enabled: false,
            speak_on_hover_enabled: true,
            ..Default::default()
        };
        assert!(handle_event(&mut hover, &settings, &doc, &Event::FocusIn { target: card }).is_empty());
        assert!(handle_event(&mut hover, &settings, &doc, &Event::PointerOver { target: card })
            .iter()
            .all(|action| !matches!(action, Action::Speak(_))));
    }

    #[test]
    fn test_focus_on_body_is_silent() {
        let (doc, _, _) = page();
        let mut hover = HoverState::new();
        let actions = handle_event(&mut hover, &all_on(), &doc, &Event::FocusIn { target: doc.body() });
        assert!(actions.is_empty());
    }

    #[test]
    fn test_hover_speaks_and_signs_once() {
        let (doc, card, _) = page();
        let mut hover = HoverState::new();
        let settings = all_on();

        let first = handle_event(&mut hover, &settings, &doc, &Event::PointerOver { target: card });
        assert_eq!(
            first,
            vec![
                Action::Speak("Customer Support Associate".to_string()),
                Action::ShowSign("Customer Support Associate".to_string()),
            ]
        );
        let again = handle_event(&mut hover, &settings, &doc, &Event::PointerOver { target: card });
        assert!(again.is_empty());
    }

    #[test]
    fn test_hover_speech_gated_by_master_toggle() {
        let (doc, card, _) = page();
        let mut hover = HoverState::new();
        let settings = AccessibilitySettings {
            speak_on_hover_enabled: true,
            sign_on_hover_enabled: true,
            ..Default::default()
        };
        let actions = handle_event(&mut hover, &settings, &doc, &Event::PointerOver { target: card });
        assert_eq!(actions, vec![Action::ShowSign("Customer Support Associate".to_string())]);
    }

    #[test]
    fn test_unreadable_hover_keeps_previous_target() {
        let (mut doc, card, _) = page();
        let dot = doc.element(doc.body(), "span");
        doc.text(dot, "·");
        let mut hover = HoverState::new();
        let settings = all_on();

        handle_event(&mut hover, &settings, &doc, &Event::PointerOver { target: card });
        assert!(handle_event(&mut hover, &settings, &doc, &Event::PointerOver { target: dot }).is_empty());
        assert_eq!(hover.target(), Some(card));
    }

    #[test]
    fn test_pointer_out_into_child_keeps_tracking() {
        let (doc, card, inner) = page();
        let mut hover = HoverState::new();
        let settings = all_on();
        handle_event(&mut hover, &settings, &doc, &Event::PointerOver { target: card });

        let inside = Event::PointerOut {
            target: card,
            related: Some(inner),
        };
        assert!(handle_event(&mut hover, &settings, &doc, &inside).is_empty());
        assert_eq!(hover.target(), Some(card));

        let outside = Event::PointerOut {
            target: card,
            related: Some(doc.body()),
        };
        assert_eq!(handle_event(&mut hover, &settings, &doc, &outside), vec![Action::HideSign]);
        assert_eq!(hover.target(), None);
    }

    #[test]
    fn test_pointer_out_without_tracking_is_noop() {
        let (doc, card, _) = page();
        let mut hover = HoverState::new();
        let event = Event::PointerOut {
            target: card,
            related: None,
        };
        assert!(handle_event(&mut hover, &all_on(), &doc, &event).is_empty());
    }
}
