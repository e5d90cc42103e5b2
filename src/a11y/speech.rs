//! Speech effector.
//!
//! Wraps a platform text-to-speech engine behind [`SpeechBackend`]. At most one
//! utterance is in flight: every new request cancels the previous one first, and
//! nothing is ever queued. Without a backend every call is a silent no-op.

/// A single request to the speech engine.
#[derive(Debug, Clone, PartialEq)]
pub struct Utterance {
    pub text: String,
    pub rate: f32,
    pub pitch: f32,
    pub volume: f32,
}

impl Utterance {
    /// Utterance at the engine's default rate, pitch and volume.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            rate: 1.0,
            pitch: 1.0,
            volume: 1.0,
        }
    }
}

/// Platform text-to-speech capability.
pub trait SpeechBackend {
    /// Starts speaking. Playback is fire-and-forget.
    fn speak(&mut self, utterance: &Utterance);

    /// Cancels whatever is playing. Must be harmless when idle.
    fn cancel(&mut self);
}

/// Speech front-end used by the accessibility layer.
#[derive(Default)]
pub struct SpeechEffector {
    backend: Option<Box<dyn SpeechBackend>>,
}

impl SpeechEffector {
    pub fn new(backend: Box<dyn SpeechBackend>) -> Self {
        Self {
            backend: Some(backend),
        }
    }

    /// Effector for hosts without a speech engine.
    #[must_use]
    pub fn unavailable() -> Self {
        Self { backend: None }
    }

    #[must_use]
    pub fn is_available(&self) -> bool {
        self.backend.is_some()
    }

    /// Cancels any current utterance and speaks `text` immediately.
    pub fn speak(&mut self, text: &str) {
        let Some(backend) = self.backend.as_mut() else {
            tracing::trace!("speech unavailable, dropping request");
            return;
        };
        tracing::debug!(chars = text.chars().count(), "speaking");
        backend.cancel();
        backend.speak(&Utterance::new(text));
    }

    /// Cancels speech without starting anything new.
    pub fn stop(&mut self) {
        if let Some(backend) = self.backend.as_mut() {
            backend.cancel();
        }
    }
}

impl std::fmt::Debug for SpeechEffector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpeechEffector")
            .field("available", &self.is_available())
            .finish()
    }
}
