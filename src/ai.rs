//! AI Analysis Panel
//!
//! Requests a server-side AI assessment of one submission and keeps the
//! result for display.

use parking_lot::RwLock;
use std::sync::Arc;
use tracing::{debug, error};

use crate::api::{ApiClient, ApiError, ErrorKind};
use crate::feedback::Notifier;
use crate::models::AiAnalysis;

/// User-facing message for a failed analysis
pub fn failure_message(kind: ErrorKind) -> &'static str {
    match kind {
        ErrorKind::QuotaExceeded => "AI service quota exceeded. Please contact the administrator.",
        ErrorKind::ModelUnavailable => "AI model not available. Please contact the administrator.",
        ErrorKind::ServiceUnavailable => {
            "AI service is temporarily unavailable. Please try again later."
        }
        ErrorKind::Timeout => "AI analysis timed out. Please try again.",
        _ => "Failed to process with AI. Please try again.",
    }
}

#[derive(Debug, Default)]
struct PanelState {
    result: Option<AiAnalysis>,
    error: Option<String>,
    loading: bool,
}

/// Panel state for one submission
pub struct AiPanel {
    api: ApiClient,
    notifier: Arc<dyn Notifier>,
    submission_id: i64,
    state: RwLock<PanelState>,
}

impl AiPanel {
    pub fn new(api: ApiClient, notifier: Arc<dyn Notifier>, submission_id: i64) -> Self {
        Self {
            api,
            notifier,
            submission_id,
            state: RwLock::new(PanelState::default()),
        }
    }

    pub fn submission_id(&self) -> i64 {
        self.submission_id
    }

    pub fn result(&self) -> Option<AiAnalysis> {
        self.state.read().result.clone()
    }

    pub fn error(&self) -> Option<String> {
        self.state.read().error.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.state.read().loading
    }

    /// Show a stored analysis if the server has one
    ///
    /// A missing analysis is the normal case; failures are only logged.
    pub async fn load_existing(&self) -> Option<AiAnalysis> {
        match self.api.ai_analysis(self.submission_id).await {
            Ok(analysis) => {
                self.state.write().result = Some(analysis.clone());
                Some(analysis)
            }
            Err(e) => {
                debug!(submission = self.submission_id, error = %e, "No existing AI analysis found");
                None
            }
        }
    }

    /// Run a fresh analysis
    pub async fn analyze(&self) -> Result<AiAnalysis, String> {
        {
            let mut state = self.state.write();
            state.loading = true;
            state.error = None;
        }

        let result = self.api.process_submission_ai(self.submission_id).await;

        let mut state = self.state.write();
        state.loading = false;
        match result {
            Ok(analysis) => {
                state.result = Some(analysis.clone());
                Ok(analysis)
            }
            Err(e) => {
                let message = Self::describe(&e);
                error!(submission = self.submission_id, error = %e, "AI Analysis error");
                state.error = Some(message.to_string());
                drop(state);
                self.notifier.error(message);
                Err(message.to_string())
            }
        }
    }

    fn describe(err: &ApiError) -> &'static str {
        failure_message(err.kind())
    }

    /// Drop the current result so the panel offers a re-analysis
    pub fn reset(&self) {
        let mut state = self.state.write();
        state.result = None;
        state.error = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_messages() {
        assert_eq!(
            failure_message(ErrorKind::QuotaExceeded),
            "AI service quota exceeded. Please contact the administrator."
        );
        assert_eq!(failure_message(ErrorKind::Timeout), "AI analysis timed out. Please try again.");
        assert_eq!(
            failure_message(ErrorKind::Forbidden),
            "Failed to process with AI. Please try again."
        );
    }

    #[test]
    fn test_classified_body_maps_to_message() {
        let err = ApiError::from_body(500, r#"{"error": "Error code: 429 - insufficient_quota"}"#);
        assert_eq!(
            AiPanel::describe(&err),
            "AI service quota exceeded. Please contact the administrator."
        );
    }
}
