//! Submission records
//!
//! A claim or URL a user asked the team to verify.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::factcheck::FactCheckRef;

/// Review status of a submission
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionStatus {
    New,
    InReview,
    Completed,
}

impl SubmissionStatus {
    pub fn all() -> &'static [SubmissionStatus] {
        &[
            SubmissionStatus::New,
            SubmissionStatus::InReview,
            SubmissionStatus::Completed,
        ]
    }

    /// Wire value, as used in query strings and select boxes
    pub fn as_str(&self) -> &'static str {
        match self {
            SubmissionStatus::New => "new",
            SubmissionStatus::InReview => "in_review",
            SubmissionStatus::Completed => "completed",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SubmissionStatus::New => "New",
            SubmissionStatus::InReview => "In Review",
            SubmissionStatus::Completed => "Completed",
        }
    }
}

impl std::fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SubmissionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "new" => Ok(SubmissionStatus::New),
            "in_review" => Ok(SubmissionStatus::InReview),
            "completed" => Ok(SubmissionStatus::Completed),
            other => Err(format!("unknown submission status '{}'", other)),
        }
    }
}

/// What a submission carries, derived from `has_url` / `has_text`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionType {
    Url,
    Text,
}

/// A submission as seen from the admin back office
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Submission {
    pub id: i64,
    #[serde(default)]
    pub claim_text: Option<String>,
    #[serde(default)]
    pub context: Option<String>,
    #[serde(default)]
    pub url_submitted: Option<String>,
    pub status: SubmissionStatus,
    #[serde(default)]
    pub status_display: Option<String>,
    #[serde(default)]
    pub submitter_name: Option<String>,
    #[serde(default)]
    pub submitter_email: Option<String>,
    pub date_submitted: DateTime<Utc>,
    #[serde(default)]
    pub is_recent: bool,
    #[serde(default)]
    pub has_url: bool,
    #[serde(default)]
    pub has_text: bool,
    /// Fact-checks the server has linked to this submission
    #[serde(default)]
    pub fact_checks: Vec<FactCheckRef>,
}

impl Submission {
    /// Claim text if present, otherwise the submitted URL
    pub fn headline(&self) -> &str {
        non_blank(self.claim_text.as_deref())
            .or_else(|| non_blank(self.url_submitted.as_deref()))
            .unwrap_or("")
    }

    /// Badge text for the submission type column
    pub fn type_label(&self) -> &'static str {
        match (self.has_url, self.has_text) {
            (true, true) => "URL + Text",
            (true, false) => "URL",
            (false, true) => "Text",
            (false, false) => "Unknown",
        }
    }

    pub fn is_type(&self, kind: SubmissionType) -> bool {
        match kind {
            SubmissionType::Url => self.has_url,
            SubmissionType::Text => self.has_text,
        }
    }

    pub fn submitter_label(&self) -> &str {
        non_blank(self.submitter_name.as_deref()).unwrap_or("Anonymous")
    }
}

pub(crate) fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
