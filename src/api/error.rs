//! API Error Types
//!
//! Every failed call is reduced to an [`ApiError`] carrying a structured
//! [`ErrorKind`]. Callers pick user-facing messages by switching on the kind;
//! nothing above this module looks at server error text to decide what
//! happened.

use serde::Deserialize;
use thiserror::Error;

/// Coarse classification of a failed request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// 400/422: the server rejected the payload
    Validation,
    /// 401: missing, expired or invalid bearer token
    Unauthorized,
    /// 403: authenticated but not allowed
    Forbidden,
    /// 404
    NotFound,
    /// Upstream AI quota exhausted or rate limited
    QuotaExceeded,
    /// Upstream AI model missing
    ModelUnavailable,
    /// 503 or an upstream dependency reported as down
    ServiceUnavailable,
    /// Transport timeout, 408/504 or an upstream timeout
    Timeout,
    /// Any other server-side failure
    Server,
    /// The request never produced a response
    Network,
    /// The response body did not have the expected shape
    Decode,
}

/// Errors returned by [`crate::api::ApiClient`]
#[derive(Error, Debug)]
pub enum ApiError {
    /// Transport-level failure (connection refused, DNS, timeout, ...)
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The server answered with a non-success status
    #[error("API error {status}: {}", .message.as_deref().unwrap_or("no details"))]
    Status {
        status: u16,
        kind: ErrorKind,
        /// `error`, `message` or `detail` field of the body
        message: Option<String>,
        /// Raw JSON body when the server sent one (field errors, etc.)
        body: Option<serde_json::Value>,
    },

    /// A success response could not be decoded
    #[error("Failed to decode response: {0}")]
    Decode(String),

    /// The request could not be built (bad URL, multipart mime, ...)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiError::Request(e) if e.is_timeout() => ErrorKind::Timeout,
            ApiError::Request(e) if e.is_decode() => ErrorKind::Decode,
            ApiError::Request(_) => ErrorKind::Network,
            ApiError::Status { kind, .. } => *kind,
            ApiError::Decode(_) => ErrorKind::Decode,
            ApiError::InvalidRequest(_) => ErrorKind::Validation,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Request(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// The `error` (or `message`/`detail`) field the server sent, if any
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Status { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.kind() == ErrorKind::Unauthorized
    }

    /// Server-reported message or a caller-supplied fallback
    pub fn message_or(&self, fallback: &str) -> String {
        self.server_message()
            .map(str::to_string)
            .unwrap_or_else(|| fallback.to_string())
    }

    /// Build a status error from a response body
    pub(crate) fn from_body(status: u16, text: &str) -> Self {
        let body: Option<serde_json::Value> = serde_json::from_str(text).ok();
        let parsed = body
            .as_ref()
            .and_then(|v| ErrorBody::deserialize(v).ok())
            .unwrap_or_default();

        let message = parsed
            .error
            .or(parsed.message)
            .or(parsed.detail)
            .filter(|m| !m.trim().is_empty());

        let kind = classify(status, parsed.code.as_deref(), message.as_deref().unwrap_or(""));

        ApiError::Status {
            status,
            kind,
            message,
            body,
        }
    }
}

/// Error envelope shapes the backend uses
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default, deserialize_with = "lenient_string")]
    error: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    message: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    detail: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    code: Option<String>,
}

/// Accept strings and ignore anything else (field-error maps, lists)
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value.as_str().map(str::to_string))
}

/// Map a failed response to an [`ErrorKind`]
///
/// Order: authentication statuses, then the machine-readable `code`, then the
/// upstream error identifiers the AI backend embeds in its message, then the
/// status code alone.
pub fn classify(status: u16, code: Option<&str>, message: &str) -> ErrorKind {
    match status {
        401 => return ErrorKind::Unauthorized,
        403 => return ErrorKind::Forbidden,
        _ => {}
    }

    if let Some(kind) = code.and_then(kind_from_code) {
        return kind;
    }

    let lower = message.to_lowercase();
    if let Some(kind) = kind_from_upstream_identifier(&lower) {
        return kind;
    }

    match status {
        400 | 422 => ErrorKind::Validation,
        404 => ErrorKind::NotFound,
        408 | 504 => ErrorKind::Timeout,
        429 => ErrorKind::QuotaExceeded,
        503 => ErrorKind::ServiceUnavailable,
        _ => ErrorKind::Server,
    }
}

fn kind_from_code(code: &str) -> Option<ErrorKind> {
    match code.to_ascii_lowercase().as_str() {
        "insufficient_quota" | "quota_exceeded" | "rate_limited" => Some(ErrorKind::QuotaExceeded),
        "model_not_found" | "model_unavailable" => Some(ErrorKind::ModelUnavailable),
        "service_unavailable" => Some(ErrorKind::ServiceUnavailable),
        "timeout" | "upstream_timeout" => Some(ErrorKind::Timeout),
        "not_found" => Some(ErrorKind::NotFound),
        "validation_error" | "invalid" => Some(ErrorKind::Validation),
        _ => None,
    }
}

fn kind_from_upstream_identifier(lower: &str) -> Option<ErrorKind> {
    if lower.contains("insufficient_quota") || lower.contains("quota exceeded") {
        Some(ErrorKind::QuotaExceeded)
    } else if lower.contains("model_not_found") {
        Some(ErrorKind::ModelUnavailable)
    } else if lower.contains("service unavailable") {
        Some(ErrorKind::ServiceUnavailable)
    } else if lower.contains("timeout") || lower.contains("timed out") {
        Some(ErrorKind::Timeout)
    } else {
        None
    }
}
