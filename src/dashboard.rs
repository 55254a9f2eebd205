//! User Dashboard
//!
//! The signed-in user's own submissions and the fact-checks they led to.
//! The aggregate is fetched once per load; switching tabs is local state.

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::error;

use crate::admin::Collection;
use crate::api::ApiClient;
use crate::feedback::Notifier;
use crate::models::{DashboardData, DashboardStats, FactCheck, UserSubmission};

/// Entries shown in the compact activity list
pub const RECENT_ACTIVITY_LIMIT: usize = 5;
/// Entries shown on the full activity tab
pub const FULL_ACTIVITY_LIMIT: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DashboardTab {
    #[default]
    Overview,
    Submissions,
    Activity,
}

impl DashboardTab {
    pub fn all() -> &'static [DashboardTab] {
        &[
            DashboardTab::Overview,
            DashboardTab::Submissions,
            DashboardTab::Activity,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            DashboardTab::Overview => "Overview",
            DashboardTab::Submissions => "My Submissions",
            DashboardTab::Activity => "Recent Activity",
        }
    }
}

impl std::str::FromStr for DashboardTab {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "overview" => Ok(DashboardTab::Overview),
            "submissions" => Ok(DashboardTab::Submissions),
            "activity" => Ok(DashboardTab::Activity),
            other => Err(format!("unknown tab '{}'", other)),
        }
    }
}

// ============================================
// Activity feed
// ============================================

/// One line of the activity feed
#[derive(Debug, Clone, PartialEq)]
pub enum ActivityEntry {
    Submitted(UserSubmission),
    Published(FactCheck),
}

impl ActivityEntry {
    pub fn date(&self) -> DateTime<Utc> {
        match self {
            ActivityEntry::Submitted(s) => s.date_submitted,
            ActivityEntry::Published(f) => f.date_created,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ActivityEntry::Submitted(_) => "You submitted a claim for verification",
            ActivityEntry::Published(_) => "A fact-check related to your submission was published",
        }
    }

    pub fn headline(&self) -> &str {
        match self {
            ActivityEntry::Submitted(s) => s.headline(),
            ActivityEntry::Published(f) => &f.title,
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            ActivityEntry::Submitted(_) => "📋",
            ActivityEntry::Published(_) => "📰",
        }
    }
}

/// Submissions and fact-checks merged newest first, truncated to `limit`
pub fn recent_activity(data: &DashboardData, limit: usize) -> Vec<ActivityEntry> {
    let mut entries: Vec<ActivityEntry> = data
        .recent_submissions
        .iter()
        .cloned()
        .map(ActivityEntry::Submitted)
        .chain(data.recent_fact_checks.iter().cloned().map(ActivityEntry::Published))
        .collect();

    // Stable sort keeps server order for equal timestamps
    entries.sort_by(|a, b| b.date().cmp(&a.date()));
    entries.truncate(limit);
    entries
}

/// Label and value of each stat card
pub fn stat_cards(stats: &DashboardStats) -> Vec<(&'static str, u64)> {
    vec![
        ("Total Submissions", stats.total_submissions),
        ("In Review", stats.submissions_in_review),
        ("Completed", stats.submissions_completed),
        ("Published", stats.submissions_published),
    ]
}

// ============================================
// Dashboard state
// ============================================

pub struct UserDashboard {
    api: ApiClient,
    notifier: Arc<dyn Notifier>,
    data: RwLock<Option<DashboardData>>,
    loading: RwLock<bool>,
    tab: RwLock<DashboardTab>,
    submissions: Collection<UserSubmission>,
}

impl UserDashboard {
    pub fn new(api: ApiClient, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            api,
            notifier,
            data: RwLock::new(None),
            loading: RwLock::new(true),
            tab: RwLock::new(DashboardTab::default()),
            submissions: Collection::new(),
        }
    }

    /// Fetch the dashboard aggregate
    pub async fn load(&self) -> bool {
        *self.loading.write() = true;
        let result = self.api.dashboard().await;
        let ok = match result {
            Ok(data) => {
                *self.data.write() = Some(data);
                true
            }
            Err(e) => {
                error!(error = %e, "Error fetching dashboard");
                self.notifier.error("Failed to load dashboard data");
                false
            }
        };
        *self.loading.write() = false;
        ok
    }

    /// Fetch the full list for the "My Submissions" tab
    pub async fn load_submissions(&self) -> bool {
        self.submissions.begin_load();
        let result = self.api.user_submissions().await;
        self.submissions
            .finish_load(result, self.notifier.as_ref(), "Failed to load submissions")
    }

    pub fn is_loading(&self) -> bool {
        *self.loading.read()
    }

    pub fn data(&self) -> Option<DashboardData> {
        self.data.read().clone()
    }

    pub fn tab(&self) -> DashboardTab {
        *self.tab.read()
    }

    pub fn set_tab(&self, tab: DashboardTab) {
        *self.tab.write() = tab;
    }

    pub fn submissions(&self) -> Vec<UserSubmission> {
        self.submissions.snapshot()
    }

    pub fn submissions_loading(&self) -> bool {
        self.submissions.is_loading()
    }

    pub fn recent_activity(&self, show_all: bool) -> Vec<ActivityEntry> {
        let limit = if show_all {
            FULL_ACTIVITY_LIMIT
        } else {
            RECENT_ACTIVITY_LIMIT
        };
        self.data
            .read()
            .as_ref()
            .map(|data| recent_activity(data, limit))
            .unwrap_or_default()
    }
}
