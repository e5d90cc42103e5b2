//! Timed typing tests.
//!
//! [`compute_stats`] is the scoring rule; [`TypingTest`] is the session state
//! machine around it. Time is passed in explicitly as milliseconds so the host
//! decides where it comes from.

use crate::progress::TypingLevel;
use rand::seq::SliceRandom;
use rand::Rng;

/// Minimum accuracy, in percent, for any typing level.
pub const MIN_ACCURACY: u32 = 85;

/// Built-in practice passages.
pub const PASSAGES: [&str; 5] = [
    "Practice makes progress. Keep your fingers light and your eyes on the screen.",
    "Typing is a skill built with patience. Accuracy first, then speed will follow.",
    "Stay relaxed, sit upright, and use the home row keys to improve your typing.",
    "Short sentences help measure typing speed fairly and consistently over time.",
    "Focus on steady rhythm. Correct mistakes with backspace and continue typing.",
];

/// Picks one of the built-in passages.
pub fn sample_passage<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    PASSAGES.choose(rng).copied().unwrap_or(PASSAGES[0])
}

/// Live scoring of a typing attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypingStats {
    /// Positions where the typed character matches the target.
    pub correct: usize,
    pub errors: usize,
    pub wpm: u32,
    /// 0 to 100; 100 before anything is typed.
    pub accuracy: u32,
    /// The typed text covers the whole target.
    pub done: bool,
}

/// Scores `typed` against `target` after `elapsed_ms`.
///
/// A word is five correct characters. Elapsed time below one second counts as
/// one second.
///
/// # Examples
///
/// ```rust
/// use inclusive_board::progress::compute_stats;
///
/// let stats = compute_stats("hello world", "hellx", 60_000);
/// assert_eq!(stats.correct, 4);
/// assert_eq!(stats.errors, 1);
/// assert_eq!(stats.accuracy, 80);
/// assert!(!stats.done);
/// ```
#[must_use]
pub fn compute_stats(target: &str, typed: &str, elapsed_ms: u64) -> TypingStats {
    let target: Vec<char> = target.chars().collect();
    let typed: Vec<char> = typed.chars().collect();

    let overlap = typed.len().min(target.len());
    let correct = typed.iter().zip(&target).filter(|(a, b)| a == b).count();
    let errors = typed.len() - correct;

    #[allow(clippy::cast_precision_loss)]
    let minutes = (elapsed_ms as f64 / 60_000.0).max(1.0 / 60.0);
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let wpm = ((correct as f64 / 5.0) / minutes).round().max(0.0) as u32;

    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let accuracy = if typed.is_empty() {
        100
    } else {
        ((correct as f64 / typed.len() as f64) * 100.0).round() as u32
    };

    TypingStats {
        correct,
        errors,
        wpm,
        accuracy,
        done: overlap == target.len() && typed.len() >= target.len(),
    }
}

/// Keys a typing session reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Backspace,
    /// Any other key. It still starts the clock.
    Other,
}

/// Final result of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypingOutcome {
    pub stats: TypingStats,
    pub passed: bool,
}

/// One timed attempt at a passage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypingTest {
    target: Vec<char>,
    typed: Vec<char>,
    pass_wpm: u32,
    duration_ms: u64,
    started_at_ms: Option<u64>,
    outcome: Option<TypingOutcome>,
}

impl TypingTest {
    #[must_use]
    pub fn new(target: &str, level: TypingLevel) -> Self {
        Self {
            target: target.chars().collect(),
            typed: Vec::new(),
            pass_wpm: level.pass_wpm(),
            duration_ms: TypingLevel::DURATION_SECS * 1000,
            started_at_ms: None,
            outcome: None,
        }
    }

    /// A session on a randomly chosen built-in passage.
    #[must_use]
    pub fn with_random_passage(level: TypingLevel) -> Self {
        Self::new(sample_passage(&mut rand::thread_rng()), level)
    }

    #[must_use]
    pub fn target(&self) -> String {
        self.target.iter().collect()
    }

    #[must_use]
    pub fn typed(&self) -> String {
        self.typed.iter().collect()
    }

    #[must_use]
    pub const fn outcome(&self) -> Option<TypingOutcome> {
        self.outcome
    }

    #[must_use]
    pub const fn is_finished(&self) -> bool {
        self.outcome.is_some()
    }

    /// Handles a key press at `now_ms`.
    ///
    /// The first key starts the clock. Keys after the session finished are
    /// ignored. Returns the outcome if this key finished the session.
    pub fn key(&mut self, key: Key, now_ms: u64) -> Option<TypingOutcome> {
        let started = *self.started_at_ms.get_or_insert(now_ms);
        if self.is_finished() {
            return None;
        }

        match key {
            Key::Char(c) => {
                if self.typed.len() < self.target.len() {
                    self.typed.push(c);
                }
            }
            Key::Backspace => {
                self.typed.pop();
            }
            Key::Other => {}
        }
        self.check_finished(now_ms.saturating_sub(started))
    }

    /// Advances the clock without input; finishes the session when time is up.
    pub fn tick(&mut self, now_ms: u64) -> Option<TypingOutcome> {
        let started = self.started_at_ms?;
        if self.is_finished() {
            return None;
        }
        self.check_finished(now_ms.saturating_sub(started))
    }

    /// Stats as of `now_ms`, or the final stats once finished.
    #[must_use]
    pub fn stats(&self, now_ms: u64) -> TypingStats {
        if let Some(outcome) = self.outcome {
            return outcome.stats;
        }
        compute_stats(&self.target(), &self.typed(), self.elapsed_ms(now_ms))
    }

    /// Whole seconds left on the clock.
    #[must_use]
    pub fn time_left_secs(&self, now_ms: u64) -> u64 {
        (self.duration_ms / 1000).saturating_sub(self.elapsed_ms(now_ms) / 1000)
    }

    /// Starts over on `target`.
    pub fn reset(&mut self, target: &str) {
        self.target = target.chars().collect();
        self.typed.clear();
        self.started_at_ms = None;
        self.outcome = None;
    }

    fn elapsed_ms(&self, now_ms: u64) -> u64 {
        self.started_at_ms.map_or(0, |start| now_ms.saturating_sub(start))
    }

    fn check_finished(&mut self, elapsed_ms: u64) -> Option<TypingOutcome> {
        let stats = compute_stats(&self.target(), &self.typed(), elapsed_ms);
        if !stats.done && elapsed_ms < self.duration_ms {
            return None;
        }
        let outcome = TypingOutcome {
            stats,
            passed: stats.wpm >= self.pass_wpm && stats.accuracy >= MIN_ACCURACY,
        };
        tracing::debug!(
            wpm = stats.wpm,
            accuracy = stats.accuracy,
            passed = outcome.passed,
            "typing test finished"
        );
        self.outcome = Some(outcome);
        Some(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_str(test: &mut TypingTest, text: &str, now_ms: u64) -> Option<TypingOutcome> {
        let mut last = None;
        for c in text.chars() {
            last = test.key(Key::Char(c), now_ms);
        }
        last
    }

    #[test]
    fn test_stats_before_typing() {
        let stats = compute_stats("abc", "", 0);
        assert_eq!(stats.accuracy, 100);
        assert_eq!(stats.wpm, 0);
        assert!(!stats.done);
    }

    #[test]
    fn test_wpm_uses_minimum_of_one_second() {
        let stats = compute_stats("hello", "hello", 10);
        assert_eq!(stats.wpm, 60);
        assert!(stats.done);
    }

    #[test]
    fn test_wpm_over_a_minute() {
        let target = "a".repeat(150);
        let stats = compute_stats(&target, &target, 60_000);
        assert_eq!(stats.wpm, 30);
        assert_eq!(stats.accuracy, 100);
    }

    #[test]
    fn test_typed_text_capped_and_backspace_removes() {
        let mut test = TypingTest::new("abcd", TypingLevel::Beginner);
        test.key(Key::Char('a'), 0);
        test.key(Key::Char('x'), 100);
        test.key(Key::Backspace, 200);
        assert_eq!(test.typed(), "a");
    }

    #[test]
    fn test_finishes_when_text_complete() {
        let target = "a".repeat(150);
        let mut test = TypingTest::new(&target, TypingLevel::Beginner);
        test.key(Key::Other, 0);
        let outcome = type_str(&mut test, &target, 30_000).unwrap();
        assert!(outcome.passed);
        assert_eq!(outcome.stats.wpm, 60);

        assert!(test.key(Key::Char('a'), 61_000).is_none());
        assert_eq!(test.typed().len(), 150);
    }

    #[test]
    fn test_finishes_when_time_runs_out() {
        let mut test = TypingTest::new(PASSAGES[0], TypingLevel::Expert);
        test.key(Key::Char('P'), 0);
        assert!(test.tick(59_999).is_none());
        assert_eq!(test.time_left_secs(59_999), 1);

        let outcome = test.tick(60_000).unwrap();
        assert!(!outcome.passed);
        assert!(test.is_finished());
        assert_eq!(test.time_left_secs(90_000), 0);
    }

    #[test]
    fn test_low_accuracy_fails() {
        let mut test = TypingTest::new("abcdefghij", TypingLevel::Beginner);
        let outcome = type_str(&mut test, "abcdefgxyz", 1_000).unwrap();
        assert_eq!(outcome.stats.accuracy, 70);
        assert!(!outcome.passed);
    }

    #[test]
    fn test_sample_passage_from_bank() {
        let passage = sample_passage(&mut rand::thread_rng());
        assert!(PASSAGES.contains(&passage));
    }
}
