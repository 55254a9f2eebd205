//! Domain Records
//!
//! Server-defined records consumed by the client. The server owns every
//! invariant; these types only give the JSON a shape. Unknown fields are
//! ignored and optional fields default so older or newer servers still parse.

mod analysis;
mod content;
mod dashboard;
mod factcheck;
mod submission;
mod user;

pub use analysis::AiAnalysis;
pub use content::{ContentCategory, ImageUpload, PositiveContent, PositiveContentDraft, PublishFilter};
pub use dashboard::{DashboardData, DashboardStats, DashboardUser, UserSubmission};
pub use factcheck::{FactCheck, FactCheckDraft, FactCheckRef, Tone, Verdict};
pub use submission::{Submission, SubmissionStatus, SubmissionType};
pub use user::{AdminUser, Profile, UserDraft, UserUpdate};

/// Case-insensitive containment used by every client-side search box.
///
/// An empty needle matches everything.
pub(crate) fn contains_ci(haystack: &str, needle_lower: &str) -> bool {
    needle_lower.is_empty() || haystack.to_lowercase().contains(needle_lower)
}

/// Same as [`contains_ci`] for optional fields; a missing field never matches
/// a non-empty needle.
pub(crate) fn opt_contains_ci(haystack: Option<&str>, needle_lower: &str) -> bool {
    match haystack {
        Some(h) => contains_ci(h, needle_lower),
        None => needle_lower.is_empty(),
    }
}
