//! User dashboard payload

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::factcheck::FactCheck;
use super::submission::{non_blank, SubmissionStatus};

/// Aggregate returned by `GET /api/user/dashboard/`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DashboardData {
    pub user: DashboardUser,
    #[serde(default)]
    pub stats: DashboardStats,
    #[serde(default)]
    pub recent_submissions: Vec<UserSubmission>,
    #[serde(default)]
    pub recent_fact_checks: Vec<FactCheck>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DashboardUser {
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub date_joined: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DashboardStats {
    #[serde(default)]
    pub total_submissions: u64,
    #[serde(default)]
    pub submissions_in_review: u64,
    #[serde(default)]
    pub submissions_completed: u64,
    #[serde(default)]
    pub submissions_published: u64,
}

impl DashboardStats {
    /// Completed share of all submissions, in percent
    pub fn completion_rate(&self) -> f64 {
        if self.total_submissions == 0 {
            return 0.0;
        }
        self.submissions_completed as f64 / self.total_submissions as f64 * 100.0
    }
}

/// A submission as seen by the user who sent it
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserSubmission {
    pub id: i64,
    #[serde(default)]
    pub claim_text: Option<String>,
    #[serde(default)]
    pub url_submitted: Option<String>,
    pub status: SubmissionStatus,
    #[serde(default)]
    pub status_display: Option<String>,
    pub date_submitted: DateTime<Utc>,
    #[serde(default)]
    pub days_since_submission: Option<i64>,
    #[serde(default)]
    pub has_related_factcheck: bool,
    #[serde(default)]
    pub related_factcheck_id: Option<i64>,
    #[serde(default)]
    pub related_factcheck_title: Option<String>,
    #[serde(default)]
    pub user_notified: bool,
}

impl UserSubmission {
    pub fn headline(&self) -> &str {
        non_blank(self.claim_text.as_deref())
            .or_else(|| non_blank(self.url_submitted.as_deref()))
            .unwrap_or("")
    }

    pub fn status_label(&self) -> &str {
        self.status_display
            .as_deref()
            .unwrap_or_else(|| self.status.label())
    }

    /// Status-dependent guidance shown under each entry
    pub fn guidance(&self) -> Option<String> {
        match self.status {
            SubmissionStatus::Completed if self.has_related_factcheck => Some(
                "Your submission has been processed. The fact-check has been published."
                    .to_string(),
            ),
            SubmissionStatus::InReview => Some(
                "Our team is currently reviewing your submission. This usually takes 3-5 business days."
                    .to_string(),
            ),
            SubmissionStatus::New => Some(
                "We've received your submission and it's in our queue for review.".to_string(),
            ),
            SubmissionStatus::Completed => None,
        }
    }

    pub fn status_icon(&self) -> &'static str {
        match self.status {
            SubmissionStatus::Completed => "✅",
            SubmissionStatus::InReview => "⏳",
            SubmissionStatus::New => "📋",
        }
    }
}
