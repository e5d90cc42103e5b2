//! Direct-messaging records used by the local chat fallback.
//!
//! Field names follow the remote `chats` / `messages` collections so records
//! written locally look the same as the hosted ones.

use serde::{Deserialize, Serialize};

/// Which side of a conversation the local user is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    Candidate,
    Employer,
}

/// Identity the local user chats under. No sign-in is involved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelfProfile {
    pub name: String,
    pub email: String,
    pub role: ChatRole,
}

/// A conversation between one candidate and one employer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRow {
    pub id: String,
    pub candidate_email: String,
    pub employer_email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_at: Option<String>,
}

impl ChatRow {
    /// Whether `email` is one of the two participants.
    #[must_use]
    pub fn involves(&self, email: &str) -> bool {
        self.candidate_email == email || self.employer_email == email
    }
}

/// One message inside a chat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageRow {
    pub id: String,
    pub chat_id: String,
    pub sender: String,
    pub body: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}
