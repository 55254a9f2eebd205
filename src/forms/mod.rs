//! Forms
//!
//! Client-side form state and the checks that run before any network call.

pub mod auth;
pub mod submission;
pub mod verdict;

pub use auth::{AuthMode, LoginForm, RegisterForm};
pub use submission::{SubmissionForm, SubmitOutcome};
pub use verdict::VerdictDraft;

use thiserror::Error;

/// A form was not filled in well enough to send
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} is required.")]
    Required(&'static str),

    #[error("Please provide either a claim description or a URL to verify.")]
    ClaimOrUrlRequired,

    #[error("Passwords do not match")]
    PasswordMismatch,
}
