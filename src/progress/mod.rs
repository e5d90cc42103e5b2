//! Learning progress tracking.
//!
//! - [`tracker`]: persisted state, observers and storage-change handling
//! - [`levels`]: badges, thresholds, level unlocking and point rewards
//! - [`quiz`]: question banks and grading
//! - [`typing`]: WPM and accuracy scoring, timed sessions

pub mod levels;
pub mod quiz;
pub mod tracker;
pub mod typing;

pub use levels::{
    badge_for_points, highest_level_for, is_typing_skill, to_next_threshold, unlocked_quiz_levels,
    unlocked_typing_levels, QuizLevel, ThresholdProgress, TypingLevel, LEVEL_THRESHOLDS,
    RESOURCE_COMPLETION_POINTS,
};
pub use quiz::{question_bank, Question, Quiz, QuizOutcome};
pub use tracker::{ProgressTracker, SubscriptionId};
pub use typing::{compute_stats, sample_passage, Key, TypingOutcome, TypingStats, TypingTest, PASSAGES};
