//! Section-level announcements.

use crate::a11y::AnnouncementChannel;
use crate::app::Action;

/// Announces a view when it mounts and each new message it reports afterwards.
///
/// Messages go through the announcer's own [`AnnouncementChannel`]: a message
/// equal to the previous one is dropped, and an empty message is ignored.
#[derive(Debug, Clone, Default)]
pub struct PageAnnouncer {
    channel: AnnouncementChannel,
}

impl PageAnnouncer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Actions announcing the view's title and optional description.
    #[must_use]
    pub fn mount(&self, title: &str, description: Option<&str>) -> Vec<Action> {
        vec![Action::Announce {
            title: title.to_string(),
            description: description.map(str::to_string),
        }]
    }

    /// Actions for a new message; also spoken when speech is enabled.
    pub fn message(&mut self, message: &str, speech_enabled: bool) -> Vec<Action> {
        if message.is_empty() || !self.channel.admit(message) {
            return vec![];
        }
        tracing::debug!(message = %message, speak = speech_enabled, "page message");

        let mut actions = vec![Action::Announce {
            title: message.to_string(),
            description: None,
        }];
        if speech_enabled {
            actions.push(Action::Speak(message.to_string()));
        }
        actions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mount_announces_title_and_description() {
        let announcer = PageAnnouncer::new();
        assert_eq!(
            announcer.mount("Resources", Some("Pick a skill")),
            vec![Action::Announce {
                title: "Resources".to_string(),
                description: Some("Pick a skill".to_string()),
            }]
        );
    }

    #[test]
    fn test_repeated_message_dropped() {
        let mut announcer = PageAnnouncer::new();
        assert_eq!(announcer.message("Saved", true).len(), 2);
        assert!(announcer.message("Saved", true).is_empty());
        assert_eq!(announcer.message("Removed", false).len(), 1);
        assert!(announcer.message("", true).is_empty());
    }
}
