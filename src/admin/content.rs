//! Positive content manager
//!
//! Stories are created and replaced as multipart forms so an image file can
//! ride along with the text fields.

use crate::models::{contains_ci, ContentCategory, PositiveContent, PositiveContentDraft, PublishFilter};

use super::{AdminContext, Collection};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentFilter {
    pub category: Option<ContentCategory>,
    pub publish: PublishFilter,
    pub search: String,
}

impl ContentFilter {
    pub fn matches(&self, item: &PositiveContent) -> bool {
        let needle = self.search.trim().to_lowercase();
        let search_ok = contains_ci(&item.title, &needle)
            || (!needle.is_empty() && contains_ci(&item.description, &needle));
        let category_ok = self.category.map_or(true, |c| item.content_type == c);
        search_ok && category_ok && self.publish.matches(item.is_published)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ContentCounts {
    pub total: usize,
    pub published: usize,
    pub with_image: usize,
}

pub struct PositiveContentManager {
    ctx: AdminContext,
    items: Collection<PositiveContent>,
}

impl PositiveContentManager {
    pub fn new(ctx: AdminContext) -> Self {
        Self {
            ctx,
            items: Collection::new(),
        }
    }

    pub async fn refresh(&self) -> bool {
        self.items.begin_load();
        let result = self.ctx.api.admin_positive_content().await;
        self.items
            .finish_load(result, self.ctx.notifier.as_ref(), "Failed to load positive content")
    }

    pub fn is_loading(&self) -> bool {
        self.items.is_loading()
    }

    pub fn items(&self) -> Vec<PositiveContent> {
        self.items.snapshot()
    }

    pub fn get(&self, id: i64) -> Option<PositiveContent> {
        self.items.find(|c| c.id == id)
    }

    pub fn filtered(&self, filter: &ContentFilter) -> Vec<PositiveContent> {
        self.items.filtered(|c| filter.matches(c))
    }

    pub fn counts(&self) -> ContentCounts {
        ContentCounts {
            total: self.items.len(),
            published: self.items.count(|c| c.is_published),
            with_image: self.items.count(|c| c.has_image),
        }
    }

    pub async fn create(&self, draft: &PositiveContentDraft) -> bool {
        if let Err(e) = draft.validate() {
            self.ctx.notifier.error(&e.to_string());
            return false;
        }

        let result = self.ctx.api.create_positive_content(draft).await;
        let ok = self
            .ctx
            .report(result, "Content created successfully", "Failed to create content");
        if ok {
            self.refresh().await;
        }
        ok
    }

    pub async fn update(&self, id: i64, draft: &PositiveContentDraft) -> bool {
        if let Err(e) = draft.validate() {
            self.ctx.notifier.error(&e.to_string());
            return false;
        }

        let result = self.ctx.api.update_positive_content(id, draft).await;
        let ok = self
            .ctx
            .report(result, "Content updated successfully", "Failed to update content");
        if ok {
            self.refresh().await;
        }
        ok
    }

    /// Flip the published flag of a story from its last fetched value
    pub async fn toggle_publish(&self, id: i64) -> bool {
        let Some(current) = self.get(id).map(|c| c.is_published) else {
            self.ctx.notifier.error("Failed to update publication status");
            return false;
        };

        let result = self.ctx.api.set_content_published(id, !current).await;
        let success = if current {
            "Content unpublished"
        } else {
            "Content published"
        };
        let ok = self
            .ctx
            .report(result, success, "Failed to update publication status");
        if ok {
            self.refresh().await;
        }
        ok
    }

    pub async fn delete(&self, id: i64) -> bool {
        if !self
            .ctx
            .confirm
            .confirm("Are you sure you want to delete this content?")
        {
            return false;
        }

        let result = self.ctx.api.delete_positive_content(id).await;
        let ok = self
            .ctx
            .report(result, "Content deleted successfully", "Failed to delete content");
        if ok {
            self.refresh().await;
        }
        ok
    }
}
