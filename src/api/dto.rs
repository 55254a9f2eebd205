//! Data Transfer Objects
//!
//! Request and response bodies that exist only on the wire. Records the
//! client keeps around live in [`crate::models`].

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::models::{Profile, SubmissionStatus, Verdict};
use crate::session::Tokens;

use super::error::ApiError;

/// Message used when a list endpoint returns something that is not a list
pub const UNEXPECTED_FORMAT: &str = "Unexpected data format received from server";

// ============================================
// AUTH DTOs
// ============================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub password2: String,
}

/// Body returned by login and register
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub user: Profile,
    pub tokens: Tokens,
}

/// Body returned by `GET /api/auth/profile/`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileResponse {
    pub user: Profile,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogoutRequest {
    pub refresh: String,
}

// ============================================
// SUBMISSION DTOs
// ============================================

/// Public claim submission
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClaimRequest {
    pub claim_text: String,
    pub context: String,
    pub url_submitted: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusUpdate {
    pub status: SubmissionStatus,
}

/// Fact-check authored directly from a submission
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerdictRequest {
    pub title: String,
    pub verdict: Verdict,
    pub summary: String,
    /// Copy claim text and URL from the submission into the fact-check
    pub use_submission_data: bool,
}

// ============================================
// ADMIN DTOs
// ============================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublishUpdate {
    pub is_published: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivationUpdate {
    pub is_active: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaffUpdate {
    pub is_staff: bool,
}

/// Server-side filter for the user list; `None` means "all"
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserQuery {
    pub search: String,
    pub is_staff: Option<bool>,
    pub is_active: Option<bool>,
}

impl UserQuery {
    /// Query-string pairs, with empty filters omitted
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if !self.search.trim().is_empty() {
            pairs.push(("search", self.search.trim().to_string()));
        }
        if let Some(staff) = self.is_staff {
            pairs.push(("is_staff", staff.to_string()));
        }
        if let Some(active) = self.is_active {
            pairs.push(("is_active", active.to_string()));
        }
        pairs
    }
}

// ============================================
// LIST ENVELOPES
// ============================================

/// Decode a list body that may be a bare array, a `{results: [...]}` page or
/// a `{data: [...]}` envelope.
///
/// Records that fail to decode are skipped with a warning. The call only
/// fails if no record in a non-empty list decodes.
pub fn decode_list<T: DeserializeOwned>(value: serde_json::Value) -> Result<Vec<T>, ApiError> {
    let items = match value {
        serde_json::Value::Array(items) => items,
        serde_json::Value::Object(mut map) => {
            match map.remove("results").or_else(|| map.remove("data")) {
                Some(serde_json::Value::Array(items)) => items,
                _ => return Err(ApiError::Decode(UNEXPECTED_FORMAT.to_string())),
            }
        }
        _ => return Err(ApiError::Decode(UNEXPECTED_FORMAT.to_string())),
    };

    let total = items.len();
    let mut decoded = Vec::with_capacity(total);
    let mut first_error = None;
    for (index, item) in items.into_iter().enumerate() {
        match serde_json::from_value(item) {
            Ok(record) => decoded.push(record),
            Err(e) => {
                warn!(index, error = %e, "Skipping undecodable list record");
                first_error.get_or_insert(e);
            }
        }
    }

    match first_error {
        Some(e) if decoded.is_empty() => Err(ApiError::Decode(e.to_string())),
        _ => Ok(decoded),
    }
}
