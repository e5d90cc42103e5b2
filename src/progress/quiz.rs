//! Skill quizzes.
//!
//! Questions come from a small bank per skill family. The family is picked by
//! looking for keywords in the lowercased skill name, first match wins:
//! web development, then marketing, then design, then typing. Anything else gets
//! generic questions that mention the skill by name.

use crate::progress::QuizLevel;

/// One multiple-choice question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub prompt: String,
    pub options: Vec<String>,
    /// Index into `options`.
    pub correct: usize,
}

impl Question {
    fn new(prompt: impl Into<String>, options: [&str; 3], correct: usize) -> Self {
        Self {
            prompt: prompt.into(),
            options: options.iter().map(|o| (*o).to_string()).collect(),
            correct,
        }
    }
}

const WEB_KEYWORDS: &[&str] = &["web", "frontend", "html", "css", "javascript", "ui", "ux", "development"];
const MARKETING_KEYWORDS: &[&str] = &["seo", "marketing", "digital", "social"];
const DESIGN_KEYWORDS: &[&str] = &["graphic", "design", "figma", "ui"];
const TYPING_KEYWORDS: &[&str] = &["typing"];

fn mentions_any(haystack: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| haystack.contains(k))
}

/// Full question bank for `skill`, before the level cut.
#[must_use]
pub fn question_bank(skill: &str) -> Vec<Question> {
    let lower = skill.to_lowercase();

    if mentions_any(&lower, WEB_KEYWORDS) {
        return vec![
            Question::new("What does HTML provide?", ["Styling", "Structure", "Database"], 1),
            Question::new("Which CSS property changes text color?", ["font-style", "color", "display"], 1),
            Question::new("Where should alt text be placed?", ["<video>", "<img>", "<div>"], 1),
            Question::new("What does aria-label help with?", ["Accessibility", "Fonts", "Caching"], 0),
            Question::new(
                "CSS Flexbox main axis is controlled by?",
                ["justify-content", "align-items", "z-index"],
                0,
            ),
            Question::new("Semantic tag for navigation?", ["<div>", "<nav>", "<span>"], 1),
        ];
    }
    if mentions_any(&lower, MARKETING_KEYWORDS) {
        return vec![
            Question::new(
                "What does SEO stand for?",
                ["Search Engine Optimization", "Social Engagement Outreach", "Site Email Output"],
                0,
            ),
            Question::new("Which is a ranking factor?", ["Keyword stuffing", "Helpful content", "Hidden text"], 1),
            Question::new("What is meta description?", ["A page summary", "A CSS file", "A backlink"], 0),
            Question::new(
                "Which helps accessibility & SEO?",
                ["Descriptive alt text", "Invisible text", "Link farms"],
                0,
            ),
            Question::new("Core web vital?", ["LCP", "FTP", "CRT"], 0),
            Question::new("Robots.txt controls?", ["Crawling", "CSS colors", "Screen size"], 0),
        ];
    }
    if mentions_any(&lower, DESIGN_KEYWORDS) {
        return vec![
            Question::new("What improves readability?", ["Low contrast", "Good hierarchy", "Tiny text"], 1),
            Question::new("What is a wireframe?", ["High-fidelity design", "Basic layout", "Code snippet"], 1),
            Question::new("Which format is vector?", ["SVG", "JPG", "PNG"], 0),
            Question::new("Which grid aids layout?", ["8pt grid", "Random", "No grid"], 0),
            Question::new("What is spacing between letters?", ["Kerning", "Leading", "Tracking"], 2),
        ];
    }
    if mentions_any(&lower, TYPING_KEYWORDS) {
        return vec![
            Question::new(
                "Which fingers rest on home row keys?",
                ["Thumbs only", "Index to pinky", "No fixed position"],
                1,
            ),
            Question::new(
                "What helps speed?",
                ["Looking at keyboard", "Proper posture", "Randomly pressing keys"],
                1,
            ),
            Question::new(
                "Best measure of typing skill?",
                ["Words per minute & accuracy", "Total keys", "Keyboard color"],
                0,
            ),
            Question::new("Which is a home row key?", ["F", "P", ";"], 0),
        ];
    }

    vec![
        Question::new(
            format!("What is {skill} mainly about?"),
            ["Time travel", "Core concepts and practice", "Only memorization"],
            1,
        ),
        Question::new(
            format!("How to begin learning {skill}?"),
            ["Ignore basics", "Follow beginner guide & practice", "Buy expensive gear first"],
            1,
        ),
        Question::new(
            format!("Best way to progress in {skill}?"),
            ["Consistent practice", "Never get feedback", "Avoid projects"],
            0,
        ),
        Question::new("What helps accessibility?", ["Meaningful labels", "Hidden controls", "Tiny text"], 0),
    ]
}

/// Result of grading a quiz.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizOutcome {
    pub score: usize,
    pub total: usize,
    pub passed: bool,
}

/// A quiz for one skill at one level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quiz {
    pub skill: String,
    pub level: QuizLevel,
    pub questions: Vec<Question>,
}

impl Quiz {
    /// Builds the quiz: the first questions of the skill's bank, up to the
    /// level's question count.
    #[must_use]
    pub fn for_skill(skill: &str, level: QuizLevel) -> Self {
        let mut questions = question_bank(skill);
        questions.truncate(level.max_questions());
        Self {
            skill: skill.to_string(),
            level,
            questions,
        }
    }

    /// Minimum score to pass: the level's share of the questions, rounded up.
    #[must_use]
    pub fn pass_mark(&self) -> usize {
        (self.questions.len() * self.level.pass_percent() + 99) / 100
    }

    /// Grades `answers`, indexed like `questions`. Missing answers are wrong.
    #[must_use]
    pub fn grade(&self, answers: &[Option<usize>]) -> QuizOutcome {
        let score = self
            .questions
            .iter()
            .zip(answers.iter().chain(std::iter::repeat(&None)))
            .filter(|(question, answer)| **answer == Some(question.correct))
            .count();
        let outcome = QuizOutcome {
            score,
            total: self.questions.len(),
            passed: score >= self.pass_mark(),
        };
        tracing::debug!(
            skill = %self.skill,
            level = self.level.id(),
            score = outcome.score,
            total = outcome.total,
            passed = outcome.passed,
            "quiz graded"
        );
        outcome
    }
}
