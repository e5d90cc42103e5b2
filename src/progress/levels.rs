//! Levels, rewards and badges.
//!
//! Each skill has three quiz levels, or three typing-test levels for the
//! "Typing" skill. A level is unlocked once the level below it has been passed,
//! and awards its points only on the first pass.
//!
//! | Level        | Quiz id        | Points | Pass ratio | Questions |
//! |--------------|----------------|--------|------------|-----------|
//! | Beginner     | `basic`        | 15     | 66 %       | ≤ 3       |
//! | Intermediate | `intermediate` | 25     | 70 %       | ≤ 5       |
//! | Expert       | `expert`       | 35     | 80 %       | ≤ 7       |
//!
//! | Level        | Test id               | Points | Pass WPM |
//! |--------------|-----------------------|--------|----------|
//! | Beginner     | `typing-beginner`     | 25     | 25       |
//! | Intermediate | `typing-intermediate` | 35     | 35       |
//! | Expert       | `typing-expert`       | 50     | 45       |

use crate::domain::error::Result;
use crate::domain::{Badge, LearningState};
use crate::progress::tracker::record_attempt;
use crate::progress::ProgressTracker;
use crate::storage::KeyValueStore;

/// Points for completing a resource for the first time.
pub const RESOURCE_COMPLETION_POINTS: u32 = 5;

/// Skill-point thresholds of the Beginner, Intermediate and Expert badges.
pub const LEVEL_THRESHOLDS: [u32; 3] = [20, 60, 120];

/// Badge earned by `points` within one skill, if any.
///
/// # Examples
///
/// ```rust
/// use inclusive_board::domain::Badge;
/// use inclusive_board::progress::badge_for_points;
///
/// assert_eq!(badge_for_points(19), None);
/// assert_eq!(badge_for_points(20), Some(Badge::Beginner));
/// assert_eq!(badge_for_points(60), Some(Badge::Intermediate));
/// assert_eq!(badge_for_points(500), Some(Badge::Expert));
/// ```
#[must_use]
pub const fn badge_for_points(points: u32) -> Option<Badge> {
    if points >= LEVEL_THRESHOLDS[2] {
        Some(Badge::Expert)
    } else if points >= LEVEL_THRESHOLDS[1] {
        Some(Badge::Intermediate)
    } else if points >= LEVEL_THRESHOLDS[0] {
        Some(Badge::Beginner)
    } else {
        None
    }
}

/// Whether `skill` is levelled through typing tests instead of quizzes.
#[must_use]
pub fn is_typing_skill(skill: &str) -> bool {
    skill.eq_ignore_ascii_case("typing")
}

/// Quiz difficulty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum QuizLevel {
    Basic,
    Intermediate,
    Expert,
}

impl QuizLevel {
    pub const ALL: [Self; 3] = [Self::Basic, Self::Intermediate, Self::Expert];

    /// Key under which results are stored.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Intermediate => "intermediate",
            Self::Expert => "expert",
        }
    }

    #[must_use]
    pub const fn points(self) -> u32 {
        match self {
            Self::Basic => 15,
            Self::Intermediate => 25,
            Self::Expert => 35,
        }
    }

    /// Share of correct answers needed, in percent.
    #[must_use]
    pub const fn pass_percent(self) -> usize {
        match self {
            Self::Basic => 66,
            Self::Intermediate => 70,
            Self::Expert => 80,
        }
    }

    #[must_use]
    pub const fn max_questions(self) -> usize {
        match self {
            Self::Basic => 3,
            Self::Intermediate => 5,
            Self::Expert => 7,
        }
    }

    #[must_use]
    pub const fn badge(self) -> Badge {
        match self {
            Self::Basic => Badge::Beginner,
            Self::Intermediate => Badge::Intermediate,
            Self::Expert => Badge::Expert,
        }
    }

    /// The level that must be passed before this one unlocks.
    #[must_use]
    pub const fn prerequisite(self) -> Option<Self> {
        match self {
            Self::Basic => None,
            Self::Intermediate => Some(Self::Basic),
            Self::Expert => Some(Self::Intermediate),
        }
    }
}

/// Typing-test difficulty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TypingLevel {
    Beginner,
    Intermediate,
    Expert,
}

impl TypingLevel {
    pub const ALL: [Self; 3] = [Self::Beginner, Self::Intermediate, Self::Expert];

    /// Every typing test runs for one minute.
    pub const DURATION_SECS: u64 = 60;

    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::Beginner => "typing-beginner",
            Self::Intermediate => "typing-intermediate",
            Self::Expert => "typing-expert",
        }
    }

    #[must_use]
    pub const fn points(self) -> u32 {
        match self {
            Self::Beginner => 25,
            Self::Intermediate => 35,
            Self::Expert => 50,
        }
    }

    #[must_use]
    pub const fn pass_wpm(self) -> u32 {
        match self {
            Self::Beginner => 25,
            Self::Intermediate => 35,
            Self::Expert => 45,
        }
    }

    #[must_use]
    pub const fn badge(self) -> Badge {
        match self {
            Self::Beginner => Badge::Beginner,
            Self::Intermediate => Badge::Intermediate,
            Self::Expert => Badge::Expert,
        }
    }

    #[must_use]
    pub const fn prerequisite(self) -> Option<Self> {
        match self {
            Self::Beginner => None,
            Self::Intermediate => Some(Self::Beginner),
            Self::Expert => Some(Self::Intermediate),
        }
    }
}

/// Quiz levels of `skill` the learner may take right now.
#[must_use]
pub fn unlocked_quiz_levels(state: &LearningState, skill: &str) -> Vec<QuizLevel> {
    QuizLevel::ALL
        .into_iter()
        .filter(|level| level.prerequisite().map_or(true, |p| state.quiz_passed(skill, p.id())))
        .collect()
}

/// Typing levels of `skill` the learner may take right now.
#[must_use]
pub fn unlocked_typing_levels(state: &LearningState, skill: &str) -> Vec<TypingLevel> {
    TypingLevel::ALL
        .into_iter()
        .filter(|level| level.prerequisite().map_or(true, |p| state.quiz_passed(skill, p.id())))
        .collect()
}

/// Highest passed level of `skill`, falling back to its points badge.
///
/// # Examples
///
/// ```rust
/// use inclusive_board::domain::{Badge, LearningState};
/// use inclusive_board::progress::highest_level_for;
///
/// let mut state = LearningState::default();
/// state.award("SEO", 25);
/// assert_eq!(highest_level_for("SEO", &state), Some(Badge::Beginner));
/// assert_eq!(highest_level_for("Design", &state), None);
/// ```
#[must_use]
pub fn highest_level_for(skill: &str, state: &LearningState) -> Option<Badge> {
    let passed = if is_typing_skill(skill) {
        TypingLevel::ALL
            .into_iter()
            .rev()
            .find(|level| state.quiz_passed(skill, level.id()))
            .map(TypingLevel::badge)
    } else {
        QuizLevel::ALL
            .into_iter()
            .rev()
            .find(|level| state.quiz_passed(skill, level.id()))
            .map(QuizLevel::badge)
    };
    passed.or_else(|| badge_for_points(state.points_for(skill)))
}

/// Progress towards the next badge threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThresholdProgress {
    pub current: u32,
    pub next: u32,
    /// 0 to 100.
    pub percent: u32,
}

/// Next threshold above `points` and how far along the learner is.
///
/// Past the last threshold the target stays at 120 and progress is 100 %.
#[must_use]
pub fn to_next_threshold(points: u32) -> ThresholdProgress {
    LEVEL_THRESHOLDS
        .into_iter()
        .find(|threshold| points < *threshold)
        .map_or(
            ThresholdProgress {
                current: points,
                next: LEVEL_THRESHOLDS[2],
                percent: 100,
            },
            |next| ThresholdProgress {
                current: points,
                next,
                percent: ((f64::from(points) / f64::from(next)) * 100.0).round().min(100.0) as u32,
            },
        )
}

impl<S: KeyValueStore> ProgressTracker<S> {
    /// Marks a resource done or not done, awarding points on first completion.
    ///
    /// Returns the points awarded.
    ///
    /// # Errors
    ///
    /// Returns an error if the new state cannot be persisted.
    pub fn complete_resource(&mut self, skill: &str, resource_url: &str, done: bool) -> Result<u32> {
        let _span = tracing::debug_span!("complete_resource", skill = %skill, done).entered();
        self.update(|state| {
            let was_done = state.is_completed(skill, resource_url);
            state
                .skill_mut(skill)
                .completed_resources
                .insert(resource_url.to_string(), done);
            if done && !was_done {
                state.award(skill, RESOURCE_COMPLETION_POINTS);
                RESOURCE_COMPLETION_POINTS
            } else {
                0
            }
        })
    }

    /// Records a passed quiz, awarding the level's points the first time.
    ///
    /// Returns the points awarded; a repeated pass changes nothing.
    ///
    /// # Errors
    ///
    /// Returns an error if the new state cannot be persisted.
    pub fn record_quiz_pass(&mut self, skill: &str, level: QuizLevel) -> Result<u32> {
        self.record_level_pass(skill, level.id(), level.points())
    }

    /// Records a passed typing test, awarding the level's points the first time.
    ///
    /// # Errors
    ///
    /// Returns an error if the new state cannot be persisted.
    pub fn record_typing_pass(&mut self, skill: &str, level: TypingLevel) -> Result<u32> {
        self.record_level_pass(skill, level.id(), level.points())
    }

    fn record_level_pass(&mut self, skill: &str, level_id: &str, points: u32) -> Result<u32> {
        let _span = tracing::debug_span!("record_level_pass", skill = %skill, level = %level_id).entered();
        if self.quiz_passed(skill, level_id) {
            tracing::debug!("level already passed, no reward");
            return Ok(0);
        }
        let now = chrono::Utc::now().timestamp_millis();
        self.update(|state| {
            record_attempt(state, skill, level_id, true, now);
            state.award(skill, points);
        })?;
        tracing::info!(skill = %skill, level = %level_id, points, "level passed");
        Ok(points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn test_threshold_progress() {
        assert_eq!(
            to_next_threshold(10),
            ThresholdProgress {
                current: 10,
                next: 20,
                percent: 50
            }
        );
        assert_eq!(to_next_threshold(20).next, 60);
        assert_eq!(to_next_threshold(45).percent, 75);
        assert_eq!(
            to_next_threshold(200),
            ThresholdProgress {
                current: 200,
                next: 120,
                percent: 100
            }
        );
    }

    #[test]
    fn test_levels_unlock_in_order() {
        let mut state = LearningState::default();
        assert_eq!(unlocked_quiz_levels(&state, "SEO"), vec![QuizLevel::Basic]);

        record_attempt(&mut state, "SEO", "basic", true, 1);
        assert_eq!(
            unlocked_quiz_levels(&state, "SEO"),
            vec![QuizLevel::Basic, QuizLevel::Intermediate]
        );

        record_attempt(&mut state, "Typing", "typing-beginner", true, 1);
        record_attempt(&mut state, "Typing", "typing-intermediate", true, 1);
        assert_eq!(unlocked_typing_levels(&state, "Typing").len(), 3);
    }

    #[test]
    fn test_highest_level_prefers_passed_levels() {
        let mut state = LearningState::default();
        record_attempt(&mut state, "typing", "typing-intermediate", true, 1);
        assert_eq!(highest_level_for("typing", &state), Some(Badge::Intermediate));

        record_attempt(&mut state, "Web Development", "typing-expert", true, 1);
        assert_eq!(highest_level_for("Web Development", &state), None);
    }

    #[test]
    fn test_resource_points_only_on_first_completion() {
        let mut tracker = ProgressTracker::new(MemoryStore::new());
        assert_eq!(tracker.complete_resource("SEO", "https://a", true).unwrap(), 5);
        assert_eq!(tracker.complete_resource("SEO", "https://a", true).unwrap(), 0);
        assert_eq!(tracker.complete_resource("SEO", "https://a", false).unwrap(), 0);
        assert_eq!(tracker.complete_resource("SEO", "https://a", true).unwrap(), 5);
        assert_eq!(tracker.get_state().points_for("SEO"), 10);
    }

    #[test]
    fn test_level_points_awarded_once() {
        let mut tracker = ProgressTracker::new(MemoryStore::new());
        assert_eq!(tracker.record_quiz_pass("Design", QuizLevel::Expert).unwrap(), 35);
        assert_eq!(tracker.record_quiz_pass("Design", QuizLevel::Expert).unwrap(), 0);
        assert_eq!(tracker.record_typing_pass("Typing", TypingLevel::Expert).unwrap(), 50);

        let state = tracker.get_state();
        assert_eq!(state.total_points, 85);
        assert_eq!(state.skills["Design"].quiz_results["expert"].attempts, 1);
    }
}
