//! Live-region announcer.
//!
//! Writes page and section announcements into the assertive live region and
//! lower-urgency status text into the polite one. The two regions are written
//! independently; a missing region is a silent no-op.
//!
//! Duplicate suppression is scoped to an [`AnnouncementChannel`]: each call site
//! owns one and only drops a message identical to its own previous message.

use crate::dom::{LiveRegions, Politeness};

/// Joins a title and optional description the way screen readers expect.
///
/// # Examples
///
/// ```rust
/// use inclusive_board::a11y::compose_announcement;
///
/// assert_eq!(compose_announcement("Jobs", Some("Browse openings")), "Jobs. Browse openings");
/// assert_eq!(compose_announcement("Jobs", None), "Jobs");
/// ```
#[must_use]
pub fn compose_announcement(title: &str, description: Option<&str>) -> String {
    match description {
        Some(desc) if !desc.is_empty() => format!("{title}. {desc}"),
        _ => title.to_string(),
    }
}

/// Writes `title` (and `description`) to the assertive region.
///
/// Returns `false` if the page has no assertive region.
pub fn announce<R: LiveRegions + ?Sized>(regions: &mut R, title: &str, description: Option<&str>) -> bool {
    let text = compose_announcement(title, description);
    let written = regions.write_region(Politeness::Assertive, &text);
    if !written {
        tracing::trace!("assertive live region missing");
    }
    written
}

/// Writes status text to the polite region.
///
/// Returns `false` if the page has no polite region.
pub fn announce_status<R: LiveRegions + ?Sized>(regions: &mut R, text: &str) -> bool {
    let written = regions.write_region(Politeness::Polite, text);
    if !written {
        tracing::trace!("polite live region missing");
    }
    written
}

/// Per-call-site memory of the last dispatched message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnnouncementChannel {
    last: Option<String>,
}

impl AnnouncementChannel {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `message` and returns `true` unless it repeats the previous one.
    pub fn admit(&mut self, message: &str) -> bool {
        if self.last.as_deref() == Some(message) {
            return false;
        }
        self.last = Some(message.to_string());
        true
    }

    #[must_use]
    pub fn last(&self) -> Option<&str> {
        self.last.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Document;

    #[test]
    fn test_channel_drops_only_immediate_repeats() {
        let mut channel = AnnouncementChannel::new();
        assert!(channel.admit("2 jobs match your filters"));
        assert!(!channel.admit("2 jobs match your filters"));
        assert!(channel.admit("1 jobs match your filters"));
        assert!(channel.admit("2 jobs match your filters"));
    }

    #[test]
    fn test_channels_are_independent() {
        let mut jobs = AnnouncementChannel::new();
        let mut chat = AnnouncementChannel::new();
        assert!(jobs.admit("Loaded"));
        assert!(chat.admit("Loaded"));
    }

    #[test]
    fn test_announce_and_status_use_separate_regions() {
        let mut doc = Document::with_live_regions();
        assert!(announce(&mut doc, "Resources", Some("Learn new skills")));
        assert!(announce_status(&mut doc, "3 skills selected"));

        assert_eq!(
            doc.live_region_text(Politeness::Assertive).as_deref(),
            Some("Resources. Learn new skills")
        );
        assert_eq!(
            doc.live_region_text(Politeness::Polite).as_deref(),
            Some("3 skills selected")
        );
    }

    #[test]
    fn test_missing_regions_are_no_ops() {
        let mut doc = Document::new();
        assert!(!announce(&mut doc, "Jobs", None));
        assert!(!announce_status(&mut doc, "ignored"));
    }
}
