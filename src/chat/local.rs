//! Direct messaging without a hosted backend.
//!
//! Conversations and messages live in the key-value store:
//!
//! | Key                    | Value                                   |
//! |------------------------|-----------------------------------------|
//! | `chat:self`            | the local [`SelfProfile`]               |
//! | `chat:chats`           | every [`ChatRow`], newest first         |
//! | `chat:messages:<id>`   | the [`MessageRow`]s of one chat, in order |
//!
//! Ids are random UUIDs; timestamps are RFC 3339 UTC strings.

use crate::domain::error::{BoardError, Result};
use crate::domain::{ChatRole, ChatRow, MessageRow, SelfProfile};
use crate::storage::{keys, read_json, write_json, KeyValueStore};
use chrono::{SecondsFormat, Utc};
use uuid::Uuid;

fn now_rfc3339() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Local chat store.
#[derive(Debug)]
pub struct LocalChat<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> LocalChat<S> {
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    /// The saved profile, if any.
    #[must_use]
    pub fn self_profile(&self) -> Option<SelfProfile> {
        read_json(&self.store, keys::CHAT_SELF)
    }

    /// Validates and saves the local profile. Name and email are trimmed.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::Validation`] if name or email is empty, or a
    /// storage error if the profile cannot be persisted.
    pub fn save_self_profile(&mut self, name: &str, email: &str, role: ChatRole) -> Result<SelfProfile> {
        let profile = SelfProfile {
            name: name.trim().to_string(),
            email: email.trim().to_string(),
            role,
        };
        if profile.name.is_empty() || profile.email.is_empty() {
            return Err(BoardError::Validation("Enter name and email".to_string()));
        }
        write_json(&mut self.store, keys::CHAT_SELF, &profile)?;
        tracing::debug!(role = ?profile.role, "chat profile saved");
        Ok(profile)
    }

    /// Every stored chat, newest first.
    #[must_use]
    pub fn all_chats(&self) -> Vec<ChatRow> {
        read_json(&self.store, keys::CHAT_LIST).unwrap_or_default()
    }

    /// Chats the saved profile takes part in. Empty without a profile.
    #[must_use]
    pub fn chats_for_self(&self) -> Vec<ChatRow> {
        let Some(profile) = self.self_profile() else {
            return Vec::new();
        };
        self.all_chats()
            .into_iter()
            .filter(|chat| chat.involves(&profile.email))
            .collect()
    }

    /// Opens a conversation with `peer_email`.
    ///
    /// The local user's role decides which side they are on; the peer takes the
    /// other. The peer email is trimmed and lowercased.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::Validation`] without a saved profile or with an
    /// empty peer email, or a storage error if the chat cannot be persisted.
    pub fn start_chat(&mut self, peer_email: &str) -> Result<ChatRow> {
        let _span = tracing::debug_span!("start_chat").entered();
        let profile = self
            .self_profile()
            .ok_or_else(|| BoardError::Validation("Save your profile first".to_string()))?;
        let other = peer_email.trim().to_lowercase();
        if other.is_empty() {
            return Err(BoardError::Validation("Enter the other party's email".to_string()));
        }

        let (candidate_email, employer_email) = match profile.role {
            ChatRole::Candidate => (profile.email, other),
            ChatRole::Employer => (other, profile.email),
        };
        let row = ChatRow {
            id: Uuid::new_v4().to_string(),
            candidate_email,
            employer_email,
            last_message: None,
            last_at: Some(now_rfc3339()),
        };

        let mut chats = self.all_chats();
        chats.insert(0, row.clone());
        write_json(&mut self.store, keys::CHAT_LIST, &chats)?;
        tracing::debug!(chat_id = %row.id, "chat started");
        Ok(row)
    }

    /// Messages of `chat_id`, oldest first.
    #[must_use]
    pub fn messages(&self, chat_id: &str) -> Vec<MessageRow> {
        read_json(&self.store, &keys::chat_messages(chat_id)).unwrap_or_default()
    }

    /// Appends a message from the local user and updates the chat summary.
    ///
    /// Returns `None` when the trimmed body is empty.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::Validation`] without a saved profile, or a storage
    /// error if the message cannot be persisted.
    pub fn send(&mut self, chat_id: &str, body: &str) -> Result<Option<MessageRow>> {
        let _span = tracing::debug_span!("send_message", chat_id = %chat_id).entered();
        let text = body.trim();
        if text.is_empty() {
            return Ok(None);
        }
        let profile = self
            .self_profile()
            .ok_or_else(|| BoardError::Validation("Save your profile first".to_string()))?;

        let now = now_rfc3339();
        let message = MessageRow {
            id: Uuid::new_v4().to_string(),
            chat_id: chat_id.to_string(),
            sender: profile.email,
            body: text.to_string(),
            created_at: Some(now.clone()),
        };

        let key = keys::chat_messages(chat_id);
        let mut messages = self.messages(chat_id);
        messages.push(message.clone());
        write_json(&mut self.store, &key, &messages)?;

        let mut chats = self.all_chats();
        if let Some(chat) = chats.iter_mut().find(|c| c.id == chat_id) {
            chat.last_message = Some(text.to_string());
            chat.last_at = Some(now);
            write_json(&mut self.store, keys::CHAT_LIST, &chats)?;
        } else {
            tracing::debug!("message sent to unknown chat, summary not updated");
        }

        Ok(Some(message))
    }

    pub const fn store(&self) -> &S {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn with_profile(role: ChatRole) -> LocalChat<MemoryStore> {
        let mut chat = LocalChat::new(MemoryStore::new());
        chat.save_self_profile(" Asha ", "asha@example.com", role).unwrap();
        chat
    }

    #[test]
    fn test_profile_requires_name_and_email() {
        let mut chat = LocalChat::new(MemoryStore::new());
        assert!(matches!(
            chat.save_self_profile("  ", "a@b.c", ChatRole::Candidate),
            Err(BoardError::Validation(_))
        ));
        assert!(chat.self_profile().is_none());

        let saved = chat.save_self_profile(" Asha ", "asha@example.com", ChatRole::Candidate).unwrap();
        assert_eq!(saved.name, "Asha");
        assert_eq!(chat.self_profile(), Some(saved));
    }

    #[test]
    fn test_role_decides_sides_and_newest_first() {
        let mut chat = with_profile(ChatRole::Employer);
        let first = chat.start_chat(" Dev@Example.com ").unwrap();
        assert_eq!(first.candidate_email, "dev@example.com");
        assert_eq!(first.employer_email, "asha@example.com");

        let second = chat.start_chat("other@example.com").unwrap();
        let ids: Vec<String> = chat.chats_for_self().into_iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![second.id, first.id]);
    }

    #[test]
    fn test_send_appends_and_updates_summary() {
        let mut chat = with_profile(ChatRole::Candidate);
        let row = chat.start_chat("hr@example.com").unwrap();

        assert!(chat.send(&row.id, "   ").unwrap().is_none());
        let sent = chat.send(&row.id, "  Hello there ").unwrap().unwrap();
        assert_eq!(sent.body, "Hello there");
        assert_eq!(sent.sender, "asha@example.com");

        chat.send(&row.id, "Second").unwrap();
        let bodies: Vec<String> = chat.messages(&row.id).into_iter().map(|m| m.body).collect();
        assert_eq!(bodies, vec!["Hello there", "Second"]);
        assert_eq!(chat.all_chats()[0].last_message.as_deref(), Some("Second"));
    }

    #[test]
    fn test_chats_hidden_from_other_profiles() {
        let mut chat = with_profile(ChatRole::Candidate);
        chat.start_chat("hr@example.com").unwrap();
        chat.save_self_profile("Someone", "someone@example.com", ChatRole::Candidate)
            .unwrap();
        assert!(chat.chats_for_self().is_empty());
        assert_eq!(chat.all_chats().len(), 1);
    }
}
