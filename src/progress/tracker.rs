//! Persistent learning progress with change broadcast.
//!
//! [`ProgressTracker`] keeps no state of its own besides its observers: every
//! read goes to the store, every mutation is read-modify-write followed by one
//! broadcast of the new state. Two trackers over the same store therefore never
//! disagree for longer than one [`handle_storage_change`] call.
//!
//! [`handle_storage_change`]: ProgressTracker::handle_storage_change

use crate::domain::error::Result;
use crate::domain::LearningState;
use crate::storage::{keys, read_json, write_json, KeyValueStore};
use std::collections::BTreeMap;

/// Handle returned by [`ProgressTracker::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

type Observer = Box<dyn FnMut(&LearningState)>;

/// Points, completions and quiz results for every skill.
pub struct ProgressTracker<S: KeyValueStore> {
    store: S,
    observers: BTreeMap<SubscriptionId, Observer>,
    next_id: u64,
}

impl<S: KeyValueStore> ProgressTracker<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            observers: BTreeMap::new(),
            next_id: 1,
        }
    }

    /// Registers `observer`; it receives the full state after every change.
    pub fn subscribe(&mut self, observer: impl FnMut(&LearningState) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.observers.insert(id, Box::new(observer));
        tracing::debug!(subscription = id.0, observers = self.observers.len(), "observer subscribed");
        id
    }

    /// Returns `false` if `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.remove(&id).is_some()
    }

    #[must_use]
    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    /// Current state. Missing or unreadable data yields the empty state.
    ///
    /// `total_points` is recomputed from the per-skill points on every read.
    #[must_use]
    pub fn get_state(&self) -> LearningState {
        read_json::<LearningState>(&self.store, keys::LEARNING_STATE)
            .map(LearningState::recounted)
            .unwrap_or_default()
    }

    /// Adds `points` to `skill`, creating the skill if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the new state cannot be persisted.
    pub fn add_points(&mut self, skill: &str, points: u32) -> Result<LearningState> {
        let _span = tracing::debug_span!("add_points", skill = %skill, points).entered();
        self.update(|state| state.award(skill, points))?;
        Ok(self.get_state())
    }

    /// Records whether `resource_url` has been completed within `skill`.
    ///
    /// # Errors
    ///
    /// Returns an error if the new state cannot be persisted.
    pub fn set_resource_completed(&mut self, skill: &str, resource_url: &str, done: bool) -> Result<()> {
        let _span = tracing::debug_span!("set_resource_completed", skill = %skill, done).entered();
        self.update(|state| {
            state
                .skill_mut(skill)
                .completed_resources
                .insert(resource_url.to_string(), done);
        })
    }

    #[must_use]
    pub fn is_completed(&self, skill: &str, resource_url: &str) -> bool {
        self.get_state().is_completed(skill, resource_url)
    }

    /// Records one attempt at `quiz_id`.
    ///
    /// The attempt counter always increases and the timestamp moves to now.
    /// `passed` only ever flips from `false` to `true`.
    ///
    /// # Errors
    ///
    /// Returns an error if the new state cannot be persisted.
    pub fn mark_quiz_passed(&mut self, skill: &str, quiz_id: &str, passed: bool) -> Result<()> {
        let _span = tracing::debug_span!("mark_quiz_passed", skill = %skill, quiz_id = %quiz_id, passed).entered();
        let now = chrono::Utc::now().timestamp_millis();
        self.update(|state| record_attempt(state, skill, quiz_id, passed, now))
    }

    #[must_use]
    pub fn quiz_passed(&self, skill: &str, quiz_id: &str) -> bool {
        self.get_state().quiz_passed(skill, quiz_id)
    }

    /// Removes all learning progress and broadcasts the empty state.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored state cannot be removed.
    pub fn reset_all(&mut self) -> Result<()> {
        let _span = tracing::debug_span!("reset_all").entered();
        self.store.remove(keys::LEARNING_STATE)?;
        tracing::info!("learning progress reset");
        self.notify(&LearningState::default());
        Ok(())
    }

    /// Reacts to a storage change made elsewhere (another view or window).
    ///
    /// `key` is the changed key, or `None` when the whole store was cleared.
    /// The store is re-read before observers are notified.
    /// Returns `true` if observers were notified.
    pub fn handle_storage_change(&mut self, key: Option<&str>) -> bool {
        if key.is_some_and(|k| k != keys::LEARNING_STATE) {
            return false;
        }
        tracing::debug!(key = ?key, "learning state changed externally");
        if let Err(e) = self.store.reload() {
            tracing::warn!(error = %e, "failed to reload store, using cached state");
        }
        let state = self.get_state();
        self.notify(&state);
        true
    }

    /// Pretty-printed JSON snapshot, suitable for a download.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn export_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.get_state())?)
    }

    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Applies `mutate` to a fresh copy of the state, persists it and broadcasts it.
    pub(crate) fn update<R>(&mut self, mutate: impl FnOnce(&mut LearningState) -> R) -> Result<R> {
        let mut state = self.get_state();
        let result = mutate(&mut state);
        write_json(&mut self.store, keys::LEARNING_STATE, &state)?;
        tracing::debug!(total_points = state.total_points, skills = state.skills.len(), "learning state saved");
        self.notify(&state);
        Ok(result)
    }

    fn notify(&mut self, state: &LearningState) {
        for observer in self.observers.values_mut() {
            observer(state);
        }
    }
}

pub(crate) fn record_attempt(state: &mut LearningState, skill: &str, quiz_id: &str, passed: bool, now_ms: i64) {
    let result = state
        .skill_mut(skill)
        .quiz_results
        .entry(quiz_id.to_string())
        .or_insert(crate::domain::QuizResult {
            passed: false,
            attempts: 0,
            last_attempt_ms: now_ms,
        });
    result.attempts = result.attempts.saturating_add(1);
    result.last_attempt_ms = now_ms;
    result.passed |= passed;
}

impl<S: KeyValueStore + std::fmt::Debug> std::fmt::Debug for ProgressTracker<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProgressTracker")
            .field("store", &self.store)
            .field("observers", &self.observers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_empty_store_gives_empty_state() {
        let tracker = ProgressTracker::new(MemoryStore::new());
        assert_eq!(tracker.get_state(), LearningState::default());
    }

    #[test]
    fn test_corrupt_state_treated_as_empty() {
        let mut store = MemoryStore::new();
        store.set(keys::LEARNING_STATE, "not json").unwrap();
        let tracker = ProgressTracker::new(store);
        assert_eq!(tracker.get_state(), LearningState::default());
    }

    #[test]
    fn test_every_mutation_broadcasts_new_state() {
        let mut tracker = ProgressTracker::new(MemoryStore::new());
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        tracker.subscribe(move |state| sink.borrow_mut().push(state.total_points));

        tracker.add_points("SEO", 15).unwrap();
        tracker.set_resource_completed("SEO", "https://example.com", true).unwrap();
        tracker.add_points("Typing", 25).unwrap();

        assert_eq!(*seen.borrow(), vec![15, 15, 40]);
    }

    #[test]
    fn test_quiz_pass_is_sticky_and_attempts_count() {
        let mut tracker = ProgressTracker::new(MemoryStore::new());
        tracker.mark_quiz_passed("Design", "basic", false).unwrap();
        tracker.mark_quiz_passed("Design", "basic", true).unwrap();
        tracker.mark_quiz_passed("Design", "basic", false).unwrap();

        let state = tracker.get_state();
        let result = state.skills["Design"].quiz_results["basic"];
        assert!(result.passed);
        assert_eq!(result.attempts, 3);
        assert!(result.last_attempt_ms > 0);
    }

    #[test]
    fn test_unsubscribed_observer_not_called() {
        let mut tracker = ProgressTracker::new(MemoryStore::new());
        let calls = Rc::new(RefCell::new(0));
        let sink = Rc::clone(&calls);
        let id = tracker.subscribe(move |_| *sink.borrow_mut() += 1);

        tracker.add_points("SEO", 5).unwrap();
        assert!(tracker.unsubscribe(id));
        assert!(!tracker.unsubscribe(id));
        tracker.add_points("SEO", 5).unwrap();
        assert_eq!(*calls.borrow(), 1);
    }

    #[test]
    fn test_reset_all_notifies_own_observers_with_empty_state() {
        let mut tracker = ProgressTracker::new(MemoryStore::new());
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        tracker.subscribe(move |state: &LearningState| sink.borrow_mut().push(state.clone()));

        tracker.add_points("Typing", 25).unwrap();
        tracker.reset_all().unwrap();

        let seen = seen.borrow();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0].total_points, 25);
        assert_eq!(seen[1], LearningState::default());
        assert_eq!(tracker.get_state(), LearningState::default());
    }

    #[test]
    fn test_storage_change_filtering() {
        let mut tracker = ProgressTracker::new(MemoryStore::new());
        let calls = Rc::new(RefCell::new(0));
        let sink = Rc::clone(&calls);
        tracker.subscribe(move |_| *sink.borrow_mut() += 1);

        assert!(!tracker.handle_storage_change(Some(keys::SAVED_JOB_IDS)));
        assert!(tracker.handle_storage_change(Some(keys::LEARNING_STATE)));
        assert!(tracker.handle_storage_change(None));
        assert_eq!(*calls.borrow(), 2);
    }

    #[test]
    fn test_export_is_pretty_json_in_stored_shape() {
        let mut tracker = ProgressTracker::new(MemoryStore::new());
        tracker.add_points("Typing", 25).unwrap();
        let exported = tracker.export_json().unwrap();
        assert!(exported.contains("\"totalPoints\": 25"));
        assert!(exported.contains('\n'));
    }
}
