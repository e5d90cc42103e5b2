//! Learning progress model.
//!
//! [`LearningState`] records points, completed resources and quiz results per
//! skill. The serialized shape matches the bundle stored under `learning:state`:
//!
//! ```json
//! {
//!   "totalPoints": 20,
//!   "skills": {
//!     "Typing": {
//!       "points": 20,
//!       "completed": { "https://www.typing.com/student/lessons": true },
//!       "quizzes": { "typing-beginner": { "passed": true, "attempts": 1, "last": 1700000000000 } }
//!     }
//!   }
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Outcome history of one quiz or typing test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizResult {
    /// Monotonic: once `true` it never reverts.
    pub passed: bool,
    pub attempts: u32,
    /// Unix timestamp in milliseconds of the latest attempt.
    #[serde(rename = "last")]
    pub last_attempt_ms: i64,
}

/// Progress within a single skill.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillProgress {
    #[serde(default)]
    pub points: u32,

    /// Resource URL → completion flag.
    #[serde(default, rename = "completed")]
    pub completed_resources: BTreeMap<String, bool>,

    /// Quiz id → result.
    #[serde(default, rename = "quizzes")]
    pub quiz_results: BTreeMap<String, QuizResult>,
}

/// Learning progress across every skill.
///
/// `total_points` always equals the sum of `skills[*].points`; every
/// point-awarding operation updates both in one step.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LearningState {
    #[serde(default, rename = "totalPoints")]
    pub total_points: u32,

    #[serde(default)]
    pub skills: BTreeMap<String, SkillProgress>,
}

impl LearningState {
    /// Returns the skill entry, creating it at zero points if absent.
    pub fn skill_mut(&mut self, skill: &str) -> &mut SkillProgress {
        self.skills.entry(skill.to_string()).or_default()
    }

    /// Adds `amount` to the skill and the global total together.
    pub fn award(&mut self, skill: &str, amount: u32) {
        let entry = self.skill_mut(skill);
        entry.points = entry.points.saturating_add(amount);
        self.total_points = self.total_points.saturating_add(amount);
    }

    /// Sum of the per-skill points.
    #[must_use]
    pub fn skill_points_sum(&self) -> u32 {
        self.skills
            .values()
            .fold(0u32, |acc, s| acc.saturating_add(s.points))
    }

    /// Re-derives `total_points` from the per-skill points.
    ///
    /// Applied to bundles read back from storage, which another context may
    /// have written.
    #[must_use]
    pub fn recounted(mut self) -> Self {
        self.total_points = self.skill_points_sum();
        self
    }

    /// Points recorded for `skill`, zero if it has never been touched.
    #[must_use]
    pub fn points_for(&self, skill: &str) -> u32 {
        self.skills.get(skill).map_or(0, |s| s.points)
    }

    #[must_use]
    pub fn is_completed(&self, skill: &str, resource_url: &str) -> bool {
        self.skills
            .get(skill)
            .and_then(|s| s.completed_resources.get(resource_url))
            .copied()
            .unwrap_or(false)
    }

    #[must_use]
    pub fn quiz_passed(&self, skill: &str, quiz_id: &str) -> bool {
        self.skills
            .get(skill)
            .and_then(|s| s.quiz_results.get(quiz_id))
            .is_some_and(|q| q.passed)
    }
}

/// Coarse skill level shown next to a skill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Badge {
    Beginner,
    Intermediate,
    Expert,
}

impl Badge {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Beginner => "Beginner",
            Self::Intermediate => "Intermediate",
            Self::Expert => "Expert",
        }
    }
}

impl fmt::Display for Badge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_award_keeps_total_in_sync() {
        let mut state = LearningState::default();
        state.award("Web Development", 15);
        state.award("Typing", 25);
        state.award("Web Development", 5);

        assert_eq!(state.points_for("Web Development"), 20);
        assert_eq!(state.total_points, 45);
        assert_eq!(state.total_points, state.skill_points_sum());
    }

    #[test]
    fn test_deserialize_stored_bundle() {
        let raw = r#"{
            "totalPoints": 15,
            "skills": {
                "SEO": {
                    "points": 15,
                    "completed": {"https://example.com": true},
                    "quizzes": {"basic": {"passed": true, "attempts": 2, "last": 1700000000000}}
                }
            }
        }"#;
        let state: LearningState = serde_json::from_str(raw).unwrap();
        assert_eq!(state.total_points, 15);
        assert!(state.is_completed("SEO", "https://example.com"));
        assert!(state.quiz_passed("SEO", "basic"));
        assert_eq!(state.skills["SEO"].quiz_results["basic"].attempts, 2);
    }

    #[test]
    fn test_recounted_repairs_total() {
        let raw = r#"{"totalPoints": 999, "skills": {"A": {"points": 3}, "B": {"points": 4}}}"#;
        let state: LearningState = serde_json::from_str(raw).unwrap();
        assert_eq!(state.recounted().total_points, 7);
    }

    #[test]
    fn test_badge_ordering() {
        assert!(Badge::Expert > Badge::Intermediate);
        assert!(Badge::Intermediate > Badge::Beginner);
        assert_eq!(Badge::Expert.to_string(), "Expert");
    }
}
