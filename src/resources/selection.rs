//! Skill selection and search.

use crate::domain::error::Result;
use crate::storage::{keys, read_json, write_json, KeyValueStore};
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;

/// Skills offered by the resources hub.
pub const SKILL_CATALOG: &[&str] = &[
    "Accounting",
    "Content Writing",
    "Customer Support",
    "Data Entry",
    "Digital Marketing",
    "Graphic Design",
    "Project Management",
    "SEO",
    "Social Media",
    "Typing",
    "UI/UX Design",
    "Web Development",
];

/// Skills of `catalog` matching `query`.
///
/// An empty query keeps everything. Otherwise every whitespace-separated token
/// must fuzzy-match the lowercased skill name: the token's letters have to
/// appear in order but not next to each other, so matching is wider than a
/// substring search and `"dsgn"` finds both design skills.
///
/// # Examples
///
/// ```rust
/// use inclusive_board::resources::{filter_skills, SKILL_CATALOG};
///
/// assert_eq!(filter_skills(SKILL_CATALOG, "web dev"), vec!["Web Development"]);
/// assert_eq!(filter_skills(SKILL_CATALOG, "dsgn"), vec!["Graphic Design", "UI/UX Design"]);
/// assert_eq!(filter_skills(SKILL_CATALOG, "  ").len(), SKILL_CATALOG.len());
/// ```
#[must_use]
pub fn filter_skills<'a>(catalog: &[&'a str], query: &str) -> Vec<&'a str> {
    let _span = tracing::debug_span!("filter_skills", catalog = catalog.len(), query_len = query.len()).entered();

    let tokens: Vec<String> = query.split_whitespace().map(str::to_lowercase).collect();
    if tokens.is_empty() {
        return catalog.to_vec();
    }

    let matcher = SkimMatcherV2::default();
    let matched: Vec<&str> = catalog
        .iter()
        .copied()
        .filter(|skill| {
            let lower = skill.to_lowercase();
            tokens.iter().all(|token| matcher.fuzzy_match(&lower, token).is_some())
        })
        .collect();

    tracing::debug!(matched = matched.len(), "skills filtered");
    matched
}

/// Skills picked on the resources page, persisted across visits.
///
/// Order of selection is preserved and each skill appears once.
#[derive(Debug)]
pub struct SkillSelection<S: KeyValueStore> {
    store: S,
    selected: Vec<String>,
}

impl<S: KeyValueStore> SkillSelection<S> {
    /// Loads the selection. A non-empty `from_link` (skills passed in the page
    /// link) replaces the stored selection.
    pub fn load(store: S, from_link: &[String]) -> Self {
        let requested: Vec<String> = from_link
            .iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let initial = if requested.is_empty() {
            read_json::<Vec<String>>(&store, keys::SELECTED_SKILLS).unwrap_or_default()
        } else {
            tracing::debug!(count = requested.len(), "selection taken from link");
            requested
        };

        let mut selected: Vec<String> = Vec::with_capacity(initial.len());
        for skill in initial {
            if !selected.contains(&skill) {
                selected.push(skill);
            }
        }
        Self { store, selected }
    }

    /// Parses the comma-separated `skills` value of a page link.
    #[must_use]
    pub fn parse_link_value(value: &str) -> Vec<String> {
        value
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }

    #[must_use]
    pub fn selected(&self) -> &[String] {
        &self.selected
    }

    #[must_use]
    pub fn is_selected(&self, skill: &str) -> bool {
        self.selected.iter().any(|s| s == skill)
    }

    /// Adds or removes `skill` and persists the selection.
    ///
    /// # Errors
    ///
    /// Returns an error if the selection cannot be persisted.
    pub fn set_selected(&mut self, skill: &str, selected: bool) -> Result<()> {
        let _span = tracing::debug_span!("set_selected", skill = %skill, selected).entered();
        if selected {
            if !self.is_selected(skill) {
                self.selected.push(skill.to_string());
            }
        } else {
            self.selected.retain(|s| s != skill);
        }
        self.persist()
    }

    /// Writes the current selection to the store.
    ///
    /// # Errors
    ///
    /// Returns an error if the selection cannot be persisted.
    pub fn persist(&mut self) -> Result<()> {
        write_json(&mut self.store, keys::SELECTED_SKILLS, &self.selected)
    }

    pub const fn store(&self) -> &S {
        &self.store
    }
}
