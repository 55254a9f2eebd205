//! Back-office counters from `GET /api/admin/stats/`

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Overview numbers for the admin landing tab
///
/// Counters the client does not know about are kept in `extra` so they can
/// still be listed.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AdminStats {
    #[serde(default)]
    pub total_submissions: u64,
    #[serde(default)]
    pub pending_submissions: u64,
    #[serde(default)]
    pub total_fact_checks: u64,
    #[serde(default)]
    pub total_positive_content: u64,
    #[serde(default)]
    pub total_users: u64,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl AdminStats {
    /// Labelled counters in display order
    pub fn cards(&self) -> Vec<(&'static str, u64)> {
        vec![
            ("Submissions", self.total_submissions),
            ("Pending Review", self.pending_submissions),
            ("Fact-Checks", self.total_fact_checks),
            ("Positive Stories", self.total_positive_content),
            ("Users", self.total_users),
        ]
    }
}
