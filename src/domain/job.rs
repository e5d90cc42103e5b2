//! Job posting model.
//!
//! Postings come from the hosted `jobs` collection (or the built-in samples when
//! no backend is configured). Ids are numeric on the hosted store and strings in
//! the samples, so [`JobId`] accepts both.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a job posting: either a number or a string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum JobId {
    Number(i64),
    Text(String),
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for JobId {
    fn from(value: i64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for JobId {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

/// A job posting as listed on the jobs page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobRow {
    pub id: JobId,
    pub company_name: String,
    pub role_title: String,
    #[serde(default)]
    pub job_description: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub yoe_required: Option<u32>,
    #[serde(default)]
    pub required_skills: Vec<String>,
    #[serde(default)]
    pub disability_types: Vec<String>,
    /// Unix timestamp (seconds) the posting was created, when known.
    #[serde(default)]
    pub created_at: Option<i64>,
}

impl JobRow {
    /// Minimal posting with only the mandatory fields set.
    pub fn new(id: impl Into<JobId>, company_name: impl Into<String>, role_title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            company_name: company_name.into(),
            role_title: role_title.into(),
            job_description: None,
            location: None,
            yoe_required: None,
            required_skills: Vec::new(),
            disability_types: Vec::new(),
            created_at: None,
        }
    }

    /// Postings shown when no hosted data store is configured.
    #[must_use]
    pub fn samples() -> Vec<Self> {
        vec![
            Self {
                job_description: Some("Assist users via chat and email.".to_string()),
                location: Some("Remote".to_string()),
                yoe_required: Some(0),
                ..Self::new("1", "Inclusive Tech", "Customer Support Associate")
            },
            Self {
                job_description: Some("Create social graphics.".to_string()),
                location: Some("Delhi (Hybrid)".to_string()),
                yoe_required: Some(1),
                ..Self::new("2", "Bright Design", "Junior Graphic Designer")
            },
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_id_accepts_numbers_and_strings() {
        let ids: Vec<JobId> = serde_json::from_str(r#"[3, "abc"]"#).unwrap();
        assert_eq!(ids, vec![JobId::Number(3), JobId::Text("abc".to_string())]);
        assert_eq!(serde_json::to_string(&ids).unwrap(), r#"[3,"abc"]"#);
    }

    #[test]
    fn test_number_and_text_ids_differ() {
        assert_ne!(JobId::from(1), JobId::from("1"));
    }
}
