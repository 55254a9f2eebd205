//! Claim submission form
//!
//! Signed-in users submit a claim description, a URL, or both. Nothing is
//! sent for anonymous users or for a form with neither field filled in.

use tracing::{info, warn};

use crate::api::{ClaimRequest, ErrorKind};
use crate::session::Session;

use super::{AuthMode, ValidationError};

pub const LOGIN_TO_SUBMIT: &str = "Please log in to submit a claim for fact-checking.";
pub const SUBMITTED: &str = "Thank you! Your submission has been received and will be reviewed.";
pub const SESSION_EXPIRED: &str = "Please log in to submit a claim.";
pub const REJECTED: &str =
    "There was a problem with your submission. Please check the information and try again.";
pub const NETWORK_ERROR: &str = "Network error. Please ensure the backend server is running.";

/// What happened to a submission attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The caller should open the auth modal in the given mode
    AuthRequired { mode: AuthMode, message: String },
    /// Rejected locally, no request was made
    Invalid { message: String },
    Submitted { message: String },
    Failed { message: String },
}

impl SubmitOutcome {
    pub fn message(&self) -> &str {
        match self {
            SubmitOutcome::AuthRequired { message, .. }
            | SubmitOutcome::Invalid { message }
            | SubmitOutcome::Submitted { message }
            | SubmitOutcome::Failed { message } => message,
        }
    }

    pub fn is_error(&self) -> bool {
        !matches!(self, SubmitOutcome::Submitted { .. })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmissionForm {
    pub claim_text: String,
    pub context: String,
    pub url_submitted: String,
}

impl SubmissionForm {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.claim_text.trim().is_empty() && self.url_submitted.trim().is_empty() {
            return Err(ValidationError::ClaimOrUrlRequired);
        }
        Ok(())
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Submit the form; clears it on success
    pub async fn submit(&mut self, session: &Session) -> SubmitOutcome {
        if !session.is_authenticated() {
            return SubmitOutcome::AuthRequired {
                mode: AuthMode::Login,
                message: LOGIN_TO_SUBMIT.to_string(),
            };
        }

        if let Err(e) = self.validate() {
            return SubmitOutcome::Invalid { message: e.to_string() };
        }

        let body = ClaimRequest {
            claim_text: self.claim_text.trim().to_string(),
            context: self.context.trim().to_string(),
            url_submitted: self.url_submitted.trim().to_string(),
        };

        match session.api().submit_claim(&body).await {
            Ok(()) => {
                info!("Claim submitted");
                self.clear();
                SubmitOutcome::Submitted {
                    message: SUBMITTED.to_string(),
                }
            }
            Err(e) => {
                warn!(error = %e, "Submission error");
                match e.kind() {
                    ErrorKind::Unauthorized => SubmitOutcome::AuthRequired {
                        mode: AuthMode::Login,
                        message: SESSION_EXPIRED.to_string(),
                    },
                    _ if e.status().is_some() => SubmitOutcome::Failed {
                        message: REJECTED.to_string(),
                    },
                    _ => SubmitOutcome::Failed {
                        message: NETWORK_ERROR.to_string(),
                    },
                }
            }
        }
    }
}
