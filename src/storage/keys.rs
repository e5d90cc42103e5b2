//! Persisted key names.
//!
//! These are the stable identifiers every read and write goes through. They match
//! the keys the web client has always used, so existing browser data can be
//! imported verbatim.

pub const READ_EASY_ENABLED: &str = "a11y:readease";
pub const READ_EASY_PARAMS: &str = "a11y:readease-settings";
pub const SPEECH_ENABLED: &str = "a11y:text-to-speech";
pub const SPEAK_ON_HOVER: &str = "a11y:read-on-hover";
pub const SIGN_ON_HOVER: &str = "a11y:sign-on-hover";

pub const LEARNING_STATE: &str = "learning:state";
pub const SAVED_JOB_IDS: &str = "saved_jobs_ids";
pub const SELECTED_SKILLS: &str = "resources:selectedSkills";

pub const CHAT_SELF: &str = "chat:self";
pub const CHAT_LIST: &str = "chat:chats";

/// Key holding the message list of one chat (local fallback only).
#[must_use]
pub fn chat_messages(chat_id: &str) -> String {
    format!("chat:messages:{chat_id}")
}
