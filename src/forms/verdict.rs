//! Verdict form
//!
//! Drafts a fact-check straight from a submission in the admin back office.

use crate::api::{ApiClient, ApiResult, VerdictRequest};
use crate::models::{Submission, Verdict};

use super::ValidationError;

/// Characters of the claim quoted in the default title
const TITLE_QUOTE_CHARS: usize = 50;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerdictDraft {
    pub submission_id: i64,
    pub title: String,
    pub verdict: Verdict,
    pub summary: String,
    pub use_submission_data: bool,
}

impl VerdictDraft {
    /// Prefilled draft: quoted title, verdict `True`, empty summary
    pub fn from_submission(submission: &Submission) -> Self {
        let title = match submission.claim_text.as_deref().filter(|c| !c.is_empty()) {
            Some(claim) => {
                let quoted: String = claim.chars().take(TITLE_QUOTE_CHARS).collect();
                format!("Fact-Check: {}...", quoted)
            }
            None => "Fact-Check".to_string(),
        };

        Self {
            submission_id: submission.id,
            title,
            verdict: Verdict::True,
            summary: String::new(),
            use_submission_data: true,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::Required("Title"));
        }
        if self.summary.trim().is_empty() {
            return Err(ValidationError::Required("Summary"));
        }
        Ok(())
    }

    pub fn to_request(&self) -> VerdictRequest {
        VerdictRequest {
            title: self.title.trim().to_string(),
            verdict: self.verdict,
            summary: self.summary.trim().to_string(),
            use_submission_data: self.use_submission_data,
        }
    }

    /// `POST /api/admin/submissions/{id}/create-factcheck/`
    pub async fn submit(&self, api: &ApiClient) -> ApiResult<()> {
        api.create_fact_check_from_submission(self.submission_id, &self.to_request())
            .await
    }
}
