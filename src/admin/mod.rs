//! Admin Back Office
//!
//! One manager per collection. Every manager:
//!
//! - fetches its whole collection on `refresh()` (no pagination)
//! - filters client side over what it fetched
//! - refetches after every successful mutation, never patches locally
//! - asks a [`Confirm`] before deleting
//! - reports each outcome as exactly one toast
//!
//! State sits behind short `parking_lot` locks that are never held across an
//! `.await`, so managers can be shared by reference between UI callbacks.

mod content;
mod factchecks;
mod stats;
mod submissions;
mod users;

pub use content::{ContentCounts, ContentFilter, PositiveContentManager};
pub use factchecks::{FactCheckFilter, FactChecksManager};
pub use stats::AdminStats;
pub use submissions::{StatusCounts, SubmissionFilter, SubmissionsManager};
pub use users::{UserCounts, UserFilter, UsersManager};

use futures_util::future::join_all;
use parking_lot::RwLock;
use std::future::Future;
use std::sync::Arc;
use tracing::{error, warn};

use crate::api::{ApiClient, ApiError, ApiResult};
use crate::feedback::{Confirm, Notifier};

/// Everything a manager needs from its surroundings
#[derive(Clone)]
pub struct AdminContext {
    pub api: ApiClient,
    pub notifier: Arc<dyn Notifier>,
    pub confirm: Arc<dyn Confirm>,
}

impl AdminContext {
    pub fn new(api: ApiClient, notifier: Arc<dyn Notifier>, confirm: Arc<dyn Confirm>) -> Self {
        Self {
            api,
            notifier,
            confirm,
        }
    }

    /// Toast the outcome of a mutation; `true` when it succeeded
    pub(crate) fn report(&self, result: ApiResult<()>, success: &str, failure: &str) -> bool {
        match result {
            Ok(()) => {
                self.notifier.success(success);
                true
            }
            Err(e) => {
                error!(error = %e, "{}", failure);
                self.notifier.error(failure);
                false
            }
        }
    }

    /// Like [`AdminContext::report`], preferring the server's own message
    pub(crate) fn report_server_message(&self, result: ApiResult<()>, success: &str, failure: &str) -> bool {
        match result {
            Ok(()) => {
                self.notifier.success(success);
                true
            }
            Err(e) => {
                error!(error = %e, "{}", failure);
                self.notifier.error(&e.message_or(failure));
                false
            }
        }
    }
}

/// A fetched collection and its loading flag
#[derive(Debug)]
pub struct Collection<T> {
    items: RwLock<Vec<T>>,
    loading: RwLock<bool>,
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self {
            items: RwLock::new(Vec::new()),
            loading: RwLock::new(true),
        }
    }
}

impl<T: Clone> Collection<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> Vec<T> {
        self.items.read().clone()
    }

    pub fn is_loading(&self) -> bool {
        *self.loading.read()
    }

    pub fn len(&self) -> usize {
        self.items.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.read().is_empty()
    }

    pub fn find(&self, pred: impl Fn(&T) -> bool) -> Option<T> {
        self.items.read().iter().find(|item| pred(item)).cloned()
    }

    pub fn filtered(&self, pred: impl Fn(&T) -> bool) -> Vec<T> {
        self.items.read().iter().filter(|item| pred(item)).cloned().collect()
    }

    pub fn count(&self, pred: impl Fn(&T) -> bool) -> usize {
        self.items.read().iter().filter(|item| pred(item)).count()
    }

    pub(crate) fn begin_load(&self) {
        *self.loading.write() = true;
    }

    /// Store a fetch result; failures keep the previous items
    pub(crate) fn finish_load(
        &self,
        result: ApiResult<Vec<T>>,
        notifier: &dyn Notifier,
        failure: &str,
    ) -> bool {
        let ok = match result {
            Ok(items) => {
                *self.items.write() = items;
                true
            }
            Err(e) => {
                error!(error = %e, "{}", failure);
                notifier.error(failure);
                false
            }
        };
        *self.loading.write() = false;
        ok
    }
}

/// Result of a concurrent bulk operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkOutcome {
    pub attempted: usize,
    /// Ids whose request failed; their changes are not rolled back
    pub failed: Vec<i64>,
}

impl BulkOutcome {
    pub fn succeeded(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Issue one request per id concurrently and wait for all of them to settle
pub(crate) async fn fan_out<F, Fut>(ids: &[i64], op: F) -> BulkOutcome
where
    F: Fn(i64) -> Fut,
    Fut: Future<Output = Result<(), ApiError>>,
{
    let results = join_all(ids.iter().map(|&id| op(id))).await;

    let failed = ids
        .iter()
        .zip(results)
        .filter_map(|(&id, result)| match result {
            Ok(()) => None,
            Err(e) => {
                warn!(id, error = %e, "Bulk item failed");
                Some(id)
            }
        })
        .collect();

    BulkOutcome {
        attempted: ids.len(),
        failed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feedback::{RecordingNotifier, Toast};

    #[test]
    fn test_collection_keeps_items_on_failure() {
        let collection: Collection<i64> = Collection::new();
        let notifier = RecordingNotifier::new();
        assert!(collection.is_loading());

        assert!(collection.finish_load(Ok(vec![1, 2, 3]), &notifier, "Failed to load"));
        assert!(!collection.is_loading());

        collection.begin_load();
        let failed = collection.finish_load(
            Err(ApiError::Decode("bad".into())),
            &notifier,
            "Failed to load",
        );
        assert!(!failed);
        assert_eq!(collection.snapshot(), vec![1, 2, 3]);
        assert_eq!(notifier.toasts(), vec![Toast::error("Failed to load")]);
        assert_eq!(collection.count(|n| n % 2 == 1), 2);
    }

    #[test]
    fn test_fan_out_collects_failures() {
        let outcome = futures_util::FutureExt::now_or_never(fan_out(&[1, 2, 3], |id| async move {
            if id == 2 {
                Err(ApiError::Decode("boom".into()))
            } else {
                Ok(())
            }
        }))
        .unwrap();
        assert_eq!(outcome.attempted, 3);
        assert_eq!(outcome.failed, vec![2]);
        assert!(!outcome.succeeded());
    }
}
