//! Persisted accessibility settings.
//!
//! [`SettingsStore`] owns the in-memory copy of [`AccessibilitySettings`] and
//! writes every mutation straight back to its [`KeyValueStore`]. The copy is
//! hydrated on the first [`get`](SettingsStore::get), never at construction.
//!
//! Each setter returns the [`Action`]s the change implies: disabling either speech
//! toggle cancels speech, and anything touching ReadEasy re-applies typography.
//! On a failed write the in-memory copy still holds the new value; the error is
//! returned so the caller can log it.

use crate::app::Action;
use crate::domain::error::Result;
use crate::domain::{AccessibilitySettings, ReadEasyParams, ReadEasyPatch};
use crate::storage::{keys, read_flag, read_json, write_flag, write_json, KeyValueStore};

/// Reads every setting, substituting the default for anything missing or malformed.
fn load(store: &impl KeyValueStore) -> AccessibilitySettings {
    let _span = tracing::debug_span!("load_settings").entered();
    let defaults = AccessibilitySettings::default();

    let settings = AccessibilitySettings {
        read_easy_mode: read_flag(store, keys::READ_EASY_ENABLED).unwrap_or(defaults.read_easy_mode),
        read_easy_params: read_json::<ReadEasyParams>(store, keys::READ_EASY_PARAMS)
            .map_or(defaults.read_easy_params, ReadEasyParams::clamped),
        speech_enabled: read_flag(store, keys::SPEECH_ENABLED).unwrap_or(defaults.speech_enabled),
        speak_on_hover_enabled: read_flag(store, keys::SPEAK_ON_HOVER)
            .unwrap_or(defaults.speak_on_hover_enabled),
        sign_on_hover_enabled: read_flag(store, keys::SIGN_ON_HOVER)
            .unwrap_or(defaults.sign_on_hover_enabled),
    };

    tracing::debug!(
        read_easy = settings.read_easy_mode,
        speech = settings.speech_enabled,
        hover_speech = settings.speak_on_hover_enabled,
        sign = settings.sign_on_hover_enabled,
        "settings hydrated"
    );
    settings
}

/// Lazily hydrated, write-through accessibility settings.
#[derive(Debug)]
pub struct SettingsStore<S: KeyValueStore> {
    store: S,
    cached: Option<AccessibilitySettings>,
}

impl<S: KeyValueStore> SettingsStore<S> {
    pub const fn new(store: S) -> Self {
        Self { store, cached: None }
    }

    /// Current settings, reading them from storage on first use.
    pub fn get(&mut self) -> AccessibilitySettings {
        *self.current()
    }

    /// Whether the first read has happened yet.
    #[must_use]
    pub const fn is_hydrated(&self) -> bool {
        self.cached.is_some()
    }

    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Turns ReadEasy mode on or off.
    ///
    /// # Errors
    ///
    /// Returns an error if the new value cannot be persisted.
    pub fn set_read_easy_mode(&mut self, enabled: bool) -> Result<Vec<Action>> {
        let _span = tracing::debug_span!("set_read_easy_mode", enabled).entered();
        let current = self.current();
        current.read_easy_mode = enabled;
        let actions = vec![Action::ApplyTypography(current.typography())];
        write_flag(&mut self.store, keys::READ_EASY_ENABLED, enabled)?;
        Ok(actions)
    }

    /// Turns the speech master toggle on or off. Disabling cancels speech.
    ///
    /// # Errors
    ///
    /// Returns an error if the new value cannot be persisted.
    pub fn set_speech_enabled(&mut self, enabled: bool) -> Result<Vec<Action>> {
        let _span = tracing::debug_span!("set_speech_enabled", enabled).entered();
        self.current().speech_enabled = enabled;
        write_flag(&mut self.store, keys::SPEECH_ENABLED, enabled)?;
        Ok(stop_unless(enabled))
    }

    /// Turns hover speech on or off. Disabling cancels speech.
    ///
    /// # Errors
    ///
    /// Returns an error if the new value cannot be persisted.
    pub fn set_speak_on_hover_enabled(&mut self, enabled: bool) -> Result<Vec<Action>> {
        let _span = tracing::debug_span!("set_speak_on_hover_enabled", enabled).entered();
        self.current().speak_on_hover_enabled = enabled;
        write_flag(&mut self.store, keys::SPEAK_ON_HOVER, enabled)?;
        Ok(stop_unless(enabled))
    }

    /// Turns the hover sign overlay on or off. Disabling hides any visible panel.
    ///
    /// # Errors
    ///
    /// Returns an error if the new value cannot be persisted.
    pub fn set_sign_on_hover_enabled(&mut self, enabled: bool) -> Result<Vec<Action>> {
        let _span = tracing::debug_span!("set_sign_on_hover_enabled", enabled).entered();
        self.current().sign_on_hover_enabled = enabled;
        write_flag(&mut self.store, keys::SIGN_ON_HOVER, enabled)?;
        Ok(if enabled { vec![] } else { vec![Action::HideSign] })
    }

    /// Merges `patch` into the ReadEasy parameters, clamping the patched fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the merged parameters cannot be persisted.
    pub fn update_read_easy_params(&mut self, patch: &ReadEasyPatch) -> Result<Vec<Action>> {
        let _span = tracing::debug_span!("update_read_easy_params", ?patch).entered();
        let current = self.current();
        current.read_easy_params = current.read_easy_params.merged(patch);
        self.persist_params()
    }

    /// Restores the default ReadEasy parameters.
    ///
    /// # Errors
    ///
    /// Returns an error if the defaults cannot be persisted.
    pub fn reset_read_easy_params(&mut self) -> Result<Vec<Action>> {
        let _span = tracing::debug_span!("reset_read_easy_params").entered();
        self.current().read_easy_params = ReadEasyParams::default();
        self.persist_params()
    }

    fn persist_params(&mut self) -> Result<Vec<Action>> {
        let settings = *self.current();
        let actions = vec![Action::ApplyTypography(settings.typography())];
        write_json(&mut self.store, keys::READ_EASY_PARAMS, &settings.read_easy_params)?;
        Ok(actions)
    }

    fn current(&mut self) -> &mut AccessibilitySettings {
        let store = &self.store;
        self.cached.get_or_insert_with(|| load(store))
    }
}

fn stop_unless(enabled: bool) -> Vec<Action> {
    if enabled {
        vec![]
    } else {
        vec![Action::StopSpeech]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn test_missing_values_use_defaults() {
        let mut settings = SettingsStore::new(MemoryStore::new());
        assert!(!settings.is_hydrated());
        assert_eq!(settings.get(), AccessibilitySettings::default());
        assert!(settings.is_hydrated());
    }

    #[test]
    fn test_reads_stored_values_once() {
        let mut store = MemoryStore::new();
        store.set(keys::SPEECH_ENABLED, "1").unwrap();
        store.set(keys::READ_EASY_ENABLED, "false").unwrap();
        store.set(keys::SIGN_ON_HOVER, "yes please").unwrap();
        store
            .set(keys::READ_EASY_PARAMS, r#"{"fontSize": 500, "lineHeight": 1.8}"#)
            .unwrap();

        let mut settings = SettingsStore::new(store);
        let loaded = settings.get();
        assert!(loaded.speech_enabled);
        assert!(!loaded.read_easy_mode);
        assert!(!loaded.sign_on_hover_enabled);
        assert_eq!(loaded.read_easy_params.font_size_percent, 150.0);
        assert_eq!(loaded.read_easy_params.line_height, 1.8);
    }

    #[test]
    fn test_corrupt_params_fall_back_to_defaults() {
        let mut store = MemoryStore::new();
        store.set(keys::READ_EASY_PARAMS, "{{{").unwrap();
        let mut settings = SettingsStore::new(store);
        assert_eq!(settings.get().read_easy_params, ReadEasyParams::default());
    }

    #[test]
    fn test_disabling_speech_toggles_stops_speech() {
        let mut settings = SettingsStore::new(MemoryStore::new());
        assert_eq!(settings.set_speech_enabled(true).unwrap(), vec![]);
        assert_eq!(settings.set_speech_enabled(false).unwrap(), vec![Action::StopSpeech]);
        assert_eq!(
            settings.set_speak_on_hover_enabled(false).unwrap(),
            vec![Action::StopSpeech]
        );
        assert_eq!(settings.store().get(keys::SPEECH_ENABLED).as_deref(), Some("0"));
    }

    #[test]
    fn test_param_updates_persist_and_reapply() {
        let mut settings = SettingsStore::new(MemoryStore::new());
        let patch = ReadEasyPatch {
            letter_spacing_em: Some(0.5),
            ..Default::default()
        };
        let actions = settings.update_read_easy_params(&patch).unwrap();

        let expected = ReadEasyParams {
            letter_spacing_em: 0.3,
            ..Default::default()
        };
        match actions.as_slice() {
            [Action::ApplyTypography(t)] => assert_eq!(t.params, expected),
            other => panic!("unexpected actions: {other:?}"),
        }

        let stored: ReadEasyParams = read_json(settings.store(), keys::READ_EASY_PARAMS).unwrap();
        assert_eq!(stored, expected);

        settings.reset_read_easy_params().unwrap();
        assert_eq!(settings.get().read_easy_params, ReadEasyParams::default());
    }

    #[test]
    fn test_read_easy_toggle_reapplies_typography() {
        let mut settings = SettingsStore::new(MemoryStore::new());
        let actions = settings.set_read_easy_mode(false).unwrap();
        match actions.as_slice() {
            [Action::ApplyTypography(t)] => assert!(!t.enabled),
            other => panic!("unexpected actions: {other:?}"),
        }
        assert_eq!(settings.store().get(keys::READ_EASY_ENABLED).as_deref(), Some("0"));
    }
}
