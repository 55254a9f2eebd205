//! Fact-checks manager

use crate::models::{contains_ci, FactCheck, FactCheckDraft, Verdict};

use super::{AdminContext, Collection};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FactCheckFilter {
    pub search: String,
    pub verdict: Option<Verdict>,
}

impl FactCheckFilter {
    pub fn matches(&self, fact_check: &FactCheck) -> bool {
        let needle = self.search.trim().to_lowercase();
        let search_ok = contains_ci(&fact_check.title, &needle)
            || (!needle.is_empty() && contains_ci(&fact_check.summary, &needle));
        let verdict_ok = self.verdict.map_or(true, |v| fact_check.verdict == v);
        search_ok && verdict_ok
    }
}

pub struct FactChecksManager {
    ctx: AdminContext,
    items: Collection<FactCheck>,
}

impl FactChecksManager {
    pub fn new(ctx: AdminContext) -> Self {
        Self {
            ctx,
            items: Collection::new(),
        }
    }

    pub async fn refresh(&self) -> bool {
        self.items.begin_load();
        let result = self.ctx.api.admin_fact_checks().await;
        self.items
            .finish_load(result, self.ctx.notifier.as_ref(), "Failed to load fact-checks")
    }

    pub fn is_loading(&self) -> bool {
        self.items.is_loading()
    }

    pub fn fact_checks(&self) -> Vec<FactCheck> {
        self.items.snapshot()
    }

    pub fn get(&self, id: i64) -> Option<FactCheck> {
        self.items.find(|f| f.id == id)
    }

    pub fn filtered(&self, filter: &FactCheckFilter) -> Vec<FactCheck> {
        self.items.filtered(|f| filter.matches(f))
    }

    pub async fn create(&self, draft: &FactCheckDraft) -> bool {
        if let Err(e) = draft.validate() {
            self.ctx.notifier.error(&e.to_string());
            return false;
        }

        let result = self.ctx.api.create_fact_check(draft).await;
        let ok = self.ctx.report(
            result,
            "Fact-check created successfully",
            "Failed to create fact-check",
        );
        if ok {
            self.refresh().await;
        }
        ok
    }

    /// Replace a fact-check with the full draft
    pub async fn update(&self, id: i64, draft: &FactCheckDraft) -> bool {
        if let Err(e) = draft.validate() {
            self.ctx.notifier.error(&e.to_string());
            return false;
        }

        let result = self.ctx.api.update_fact_check(id, draft).await;
        let ok = self.ctx.report(
            result,
            "Fact-check updated successfully",
            "Failed to update fact-check",
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
            .confirm("Are you sure you want to delete this fact-check?")
        {
            return false;
        }

        let result = self.ctx.api.delete_fact_check(id).await;
        let ok = self.ctx.report(
            result,
            "Fact-check deleted successfully",
            "Failed to delete fact-check",
        );
        if ok {
            self.refresh().await;
        }
        ok
    }
}
