//! The accessibility layer runtime.
//!
//! [`AccessibilityLayer`] owns the page, the settings store and the effectors.
//! The host forwards page events to [`dispatch`](AccessibilityLayer::dispatch);
//! the layer runs [`handle_event`] and executes the resulting actions at once.
//!
//! # Lifecycle
//!
//! ```text
//! new ──▶ activate ──▶ dispatch* ──▶ deactivate
//!           │                           │
//!           └ listeners registered,     └ listeners removed, hover cleared,
//!             typography applied          overlay hidden, speech cancelled
//! ```
//!
//! Events dispatched while inactive are dropped.

use crate::a11y::{announce, announce_status, AnnouncementChannel, SettingsStore, SignOverlay, SpeechEffector};
use crate::app::{handle_event, Action, Event, HoverState};
use crate::dom::{EventKind, ListenerId, NodeId, Page, Presentation};
use crate::domain::error::Result;
use crate::domain::settings::READ_EASY_ROOT_CLASS;
use crate::domain::{AccessibilitySettings, ReadEasyPatch, Typography};
use crate::storage::KeyValueStore;

const LISTENED_EVENTS: [EventKind; 3] = [EventKind::FocusIn, EventKind::PointerOver, EventKind::PointerOut];

/// Pushes `typography` to the page root.
///
/// The root class always follows `enabled`; the CSS variables are only written
/// while ReadEasy is on.
pub fn apply_typography<P: Presentation + ?Sized>(page: &mut P, typography: &Typography) {
    page.toggle_root_class(READ_EASY_ROOT_CLASS, typography.enabled);
    if typography.enabled {
        for (name, value) in typography.params.css_variables() {
            page.set_root_style_property(name, &value);
        }
    }
}

/// Settings, effectors and event wiring for one page.
pub struct AccessibilityLayer<S: KeyValueStore, P: Page> {
    settings: SettingsStore<S>,
    page: P,
    speech: SpeechEffector,
    overlay: SignOverlay,
    hover: HoverState,
    listeners: Vec<ListenerId>,
    status: AnnouncementChannel,
}

impl<S: KeyValueStore, P: Page> AccessibilityLayer<S, P> {
    pub fn new(store: S, page: P, speech: SpeechEffector, overlay: SignOverlay) -> Self {
        Self {
            settings: SettingsStore::new(store),
            page,
            speech,
            overlay,
            hover: HoverState::new(),
            listeners: Vec::new(),
            status: AnnouncementChannel::new(),
        }
    }

    /// Registers the page listeners and applies the stored typography.
    /// Calling it on an active layer does nothing.
    pub fn activate(&mut self) {
        if self.is_active() {
            return;
        }
        let _span = tracing::debug_span!("activate").entered();

        for kind in LISTENED_EVENTS {
            let id = self.page.add_listener(kind);
            tracing::trace!(event = kind.dom_name(), listener = id.0, "listener registered");
            self.listeners.push(id);
        }
        let typography = self.settings.get().typography();
        self.execute([Action::ApplyTypography(typography)]);
        tracing::info!("accessibility layer active");
    }

    /// Single teardown: removes every listener, clears hover tracking, hides the
    /// overlay and cancels speech.
    pub fn deactivate(&mut self) {
        let _span = tracing::debug_span!("deactivate", listeners = self.listeners.len()).entered();

        for id in self.listeners.drain(..) {
            if !self.page.remove_listener(id) {
                tracing::debug!(listener = id.0, "listener already gone");
            }
        }
        self.hover.clear();
        self.overlay.hide();
        self.speech.stop();
        tracing::info!("accessibility layer inactive");
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.listeners.is_empty()
    }

    /// Handles one page event. Ignored while inactive.
    pub fn dispatch(&mut self, event: &Event) {
        if !self.is_active() {
            tracing::trace!(event_type = ?event, "layer inactive, event dropped");
            return;
        }
        let settings = self.settings.get();
        let actions = handle_event(&mut self.hover, &settings, &self.page, event);
        self.execute(actions);
    }

    /// Runs `actions` in order.
    pub fn execute(&mut self, actions: impl IntoIterator<Item = Action>) {
        for action in actions {
            tracing::trace!(action = ?action, "executing");
            match action {
                Action::Speak(text) => self.speech.speak(&text),
                Action::StopSpeech => self.speech.stop(),
                Action::ShowSign(text) => {
                    self.overlay.show(&text);
                }
                Action::HideSign => self.overlay.hide(),
                Action::ApplyTypography(typography) => apply_typography(&mut self.page, &typography),
                Action::Announce { title, description } => {
                    announce(&mut self.page, &title, description.as_deref());
                }
                Action::Status(text) => {
                    announce_status(&mut self.page, &text);
                }
            }
        }
    }

    /// Current settings, hydrating them on first use.
    pub fn settings(&mut self) -> AccessibilitySettings {
        self.settings.get()
    }

    pub fn set_read_easy_mode(&mut self, enabled: bool) {
        let result = self.settings.set_read_easy_mode(enabled);
        self.apply_setting("read_easy_mode", result);
    }

    pub fn set_speech_enabled(&mut self, enabled: bool) {
        let result = self.settings.set_speech_enabled(enabled);
        self.apply_setting("speech_enabled", result);
    }

    pub fn set_speak_on_hover_enabled(&mut self, enabled: bool) {
        let result = self.settings.set_speak_on_hover_enabled(enabled);
        self.apply_setting("speak_on_hover_enabled", result);
    }

    pub fn set_sign_on_hover_enabled(&mut self, enabled: bool) {
        let result = self.settings.set_sign_on_hover_enabled(enabled);
        self.apply_setting("sign_on_hover_enabled", result);
    }

    pub fn update_read_easy_params(&mut self, patch: &ReadEasyPatch) {
        let result = self.settings.update_read_easy_params(patch);
        self.apply_setting("read_easy_params", result);
    }

    pub fn reset_read_easy_params(&mut self) {
        let result = self.settings.reset_read_easy_params();
        self.apply_setting("read_easy_params", result);
    }

    /// Announces a page or section through the assertive region.
    pub fn announce_section(&mut self, title: &str, description: Option<&str>) {
        self.execute([Action::Announce {
            title: title.to_string(),
            description: description.map(str::to_string),
        }]);
    }

    /// Writes status text to the polite region unless it repeats the last status.
    pub fn announce_status(&mut self, text: &str) {
        if self.status.admit(text) {
            self.execute([Action::Status(text.to_string())]);
        }
    }

    /// Speaks `text` if speech is enabled. Used by in-page "read aloud" controls.
    pub fn speak(&mut self, text: &str) {
        if self.settings.get().speech_enabled {
            self.execute([Action::Speak(text.to_string())]);
        }
    }

    #[must_use]
    pub const fn hover_target(&self) -> Option<NodeId> {
        self.hover.target()
    }

    #[must_use]
    pub const fn overlay(&self) -> &SignOverlay {
        &self.overlay
    }

    #[must_use]
    pub const fn page(&self) -> &P {
        &self.page
    }

    pub fn page_mut(&mut self) -> &mut P {
        &mut self.page
    }

    pub fn settings_store(&self) -> &SettingsStore<S> {
        &self.settings
    }

    fn apply_setting(&mut self, setting: &'static str, result: Result<Vec<Action>>) {
        match result {
            Ok(actions) => self.execute(actions),
            Err(e) => {
                tracing::warn!(setting, error = %e, "failed to persist setting");
                self.resync();
            }
        }
    }

    /// Brings the effectors in line with the in-memory settings after a failed write.
    fn resync(&mut self) {
        let settings = self.settings.get();
        let mut actions = vec![Action::ApplyTypography(settings.typography())];
        if !settings.hover_speech_active() {
            actions.push(Action::StopSpeech);
        }
        if !settings.sign_on_hover_enabled {
            actions.push(Action::HideSign);
        }
        self.execute(actions);
    }
}

impl<S: KeyValueStore, P: Page> std::fmt::Debug for AccessibilityLayer<S, P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessibilityLayer")
            .field("active", &self.is_active())
            .field("hover", &self.hover)
            .field("speech", &self.speech)
            .field("overlay", &self.overlay)
            .finish_non_exhaustive()
    }
}
