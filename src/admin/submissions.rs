//! Submissions manager
//!
//! Review queue for user submissions: filtering, status changes, deletes,
//! bulk actions over a selection, and verdict creation.

use parking_lot::RwLock;
use std::collections::BTreeSet;
use tracing::info;

use crate::forms::VerdictDraft;
use crate::models::{opt_contains_ci, Submission, SubmissionStatus, SubmissionType};

use super::{fan_out, AdminContext, BulkOutcome, Collection};

/// Client-side filter over the fetched submissions; `None` means "all"
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmissionFilter {
    pub status: Option<SubmissionStatus>,
    pub kind: Option<SubmissionType>,
    pub search: String,
}

impl SubmissionFilter {
    pub fn matches(&self, submission: &Submission) -> bool {
        let status_ok = self.status.map_or(true, |s| submission.status == s);
        let kind_ok = self.kind.map_or(true, |k| submission.is_type(k));

        let needle = self.search.trim().to_lowercase();
        let search_ok = needle.is_empty()
            || opt_contains_ci(submission.claim_text.as_deref(), &needle)
            || opt_contains_ci(submission.url_submitted.as_deref(), &needle)
            || opt_contains_ci(submission.submitter_name.as_deref(), &needle)
            || opt_contains_ci(submission.submitter_email.as_deref(), &needle);

        status_ok && kind_ok && search_ok
    }
}

/// Per-status totals for the summary cards
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusCounts {
    pub total: usize,
    pub new: usize,
    pub in_review: usize,
    pub completed: usize,
}

pub struct SubmissionsManager {
    ctx: AdminContext,
    items: Collection<Submission>,
    selection: RwLock<BTreeSet<i64>>,
}

impl SubmissionsManager {
    pub fn new(ctx: AdminContext) -> Self {
        Self {
            ctx,
            items: Collection::new(),
            selection: RwLock::new(BTreeSet::new()),
        }
    }

    pub async fn refresh(&self) -> bool {
        self.items.begin_load();
        let result = self.ctx.api.admin_submissions().await;
        self.items
            .finish_load(result, self.ctx.notifier.as_ref(), "Failed to load submissions")
    }

    pub fn is_loading(&self) -> bool {
        self.items.is_loading()
    }

    pub fn submissions(&self) -> Vec<Submission> {
        self.items.snapshot()
    }

    pub fn get(&self, id: i64) -> Option<Submission> {
        self.items.find(|s| s.id == id)
    }

    pub fn filtered(&self, filter: &SubmissionFilter) -> Vec<Submission> {
        self.items.filtered(|s| filter.matches(s))
    }

    pub fn status_counts(&self) -> StatusCounts {
        StatusCounts {
            total: self.items.len(),
            new: self.items.count(|s| s.status == SubmissionStatus::New),
            in_review: self.items.count(|s| s.status == SubmissionStatus::InReview),
            completed: self.items.count(|s| s.status == SubmissionStatus::Completed),
        }
    }

    // ============================================
    // Single-item actions
    // ============================================

    pub async fn update_status(&self, id: i64, status: SubmissionStatus) -> bool {
        let result = self.ctx.api.update_submission_status(id, status).await;
        let ok = self.ctx.report(
            result,
            "Submission status updated",
            "Failed to update submission status",
        );
        if ok {
            self.refresh().await;
        }
        ok
    }

    pub async fn delete(&self, id: i64) -> bool {
        if !self
            .ctx
            .confirm
            .confirm("Are you sure you want to delete this submission?")
        {
            return false;
        }

        let result = self.ctx.api.delete_submission(id).await;
        let ok = self.ctx.report(
            result,
            "Submission deleted successfully",
            "Failed to delete submission",
        );
        if ok {
            self.selection.write().remove(&id);
            self.refresh().await;
        }
        ok
    }

    /// Validate and post a verdict drafted from a submission
    pub async fn create_verdict(&self, draft: &VerdictDraft) -> bool {
        if let Err(e) = draft.validate() {
            self.ctx.notifier.error(&e.to_string());
            return false;
        }

        let result = draft.submit(&self.ctx.api).await;
        let ok = self.ctx.report_server_message(
            result,
            "Verdict created and submission marked as completed!",
            "Failed to create fact-check",
        );
        if ok {
            self.refresh().await;
        }
        ok
    }

    // ============================================
    // Selection
    // ============================================

    pub fn selected(&self) -> Vec<i64> {
        self.selection.read().iter().copied().collect()
    }

    pub fn is_selected(&self, id: i64) -> bool {
        self.selection.read().contains(&id)
    }

    pub fn toggle_selected(&self, id: i64) {
        let mut selection = self.selection.write();
        if !selection.remove(&id) {
            selection.insert(id);
        }
    }

    /// Select every submission the filter shows; if all of them already are
    /// selected, clear the selection instead
    pub fn toggle_select_visible(&self, filter: &SubmissionFilter) {
        let visible: BTreeSet<i64> = self.filtered(filter).iter().map(|s| s.id).collect();
        let mut selection = self.selection.write();
        if !visible.is_empty() && *selection == visible {
            selection.clear();
        } else {
            *selection = visible;
        }
    }

    pub fn clear_selection(&self) {
        self.selection.write().clear();
    }

    // ============================================
    // Bulk actions
    // ============================================

    /// Set the status of every selected submission
    ///
    /// Requests run concurrently. Successes that landed before a failure are
    /// not rolled back; the selection is kept so the admin can retry.
    pub async fn bulk_update_status(&self, status: SubmissionStatus) -> Option<BulkOutcome> {
        let ids = self.selected();
        if ids.is_empty() {
            return None;
        }

        let api = &self.ctx.api;
        let outcome = fan_out(&ids, |id| api.update_submission_status(id, status)).await;

        if outcome.succeeded() {
            info!(count = ids.len(), status = %status, "Bulk status update");
            self.ctx
                .notifier
                .success(&format!("Updated {} submissions", outcome.attempted));
            self.clear_selection();
            self.refresh().await;
        } else {
            self.ctx.notifier.error("Failed to update submissions");
        }
        Some(outcome)
    }

    pub async fn bulk_delete(&self) -> Option<BulkOutcome> {
        let ids = self.selected();
        if ids.is_empty() {
            return None;
        }

        let prompt = format!("Are you sure you want to delete {} submissions?", ids.len());
        if !self.ctx.confirm.confirm(&prompt) {
            return None;
        }

        let api = &self.ctx.api;
        let outcome = fan_out(&ids, |id| api.delete_submission(id)).await;

        if outcome.succeeded() {
            info!(count = ids.len(), "Bulk delete");
            self.ctx
                .notifier
                .success(&format!("Deleted {} submissions", outcome.attempted));
            self.clear_selection();
            self.refresh().await;
        } else {
            self.ctx.notifier.error("Failed to delete submissions");
        }
        Some(outcome)
    }
}
