//! Positive content records
//!
//! Curated "Haiti Unveiled" stories.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::forms::ValidationError;

/// Story category
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ContentCategory {
    Culture,
    Innovation,
    Community,
    Nature,
    Achievement,
}

impl ContentCategory {
    pub fn all() -> &'static [ContentCategory] {
        &[
            ContentCategory::Culture,
            ContentCategory::Innovation,
            ContentCategory::Community,
            ContentCategory::Nature,
            ContentCategory::Achievement,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ContentCategory::Culture => "culture",
            ContentCategory::Innovation => "innovation",
            ContentCategory::Community => "community",
            ContentCategory::Nature => "nature",
            ContentCategory::Achievement => "achievement",
        }
    }

    /// Label used by the public category filter
    pub fn label(&self) -> &'static str {
        match self {
            ContentCategory::Culture => "Culture & Arts",
            ContentCategory::Innovation => "Innovation & Technology",
            ContentCategory::Community => "Community Initiatives",
            ContentCategory::Nature => "Nature & Tourism",
            ContentCategory::Achievement => "Achievements & Success",
        }
    }
}

impl std::fmt::Display for ContentCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ContentCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ContentCategory::all()
            .iter()
            .copied()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| format!("unknown category '{}'", s))
    }
}

/// Publication filter in the admin content view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PublishFilter {
    #[default]
    All,
    Published,
    Unpublished,
}

impl PublishFilter {
    pub fn matches(&self, is_published: bool) -> bool {
        match self {
            PublishFilter::All => true,
            PublishFilter::Published => is_published,
            PublishFilter::Unpublished => !is_published,
        }
    }
}

/// A positive-content story
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PositiveContent {
    pub id: i64,
    pub title: String,
    pub content_type: ContentCategory,
    #[serde(default)]
    pub content_type_display: Option<String>,
    #[serde(default)]
    pub description: String,
    /// Absolute image URL, either the uploaded file or the linked image
    #[serde(default)]
    pub image_url_full: Option<String>,
    #[serde(default)]
    pub source_url: Option<String>,
    #[serde(default)]
    pub is_published: bool,
    #[serde(default)]
    pub has_image: bool,
    #[serde(default)]
    pub is_recent: bool,
    #[serde(default)]
    pub date_created: Option<DateTime<Utc>>,
}

impl PositiveContent {
    pub fn category_label(&self) -> &str {
        self.content_type_display
            .as_deref()
            .unwrap_or_else(|| self.content_type.label())
    }

    /// Editable copy with the current image URL as fallback
    pub fn to_draft(&self) -> PositiveContentDraft {
        PositiveContentDraft {
            title: self.title.clone(),
            content_type: self.content_type,
            description: self.description.clone(),
            image: None,
            image_url: self.image_url_full.clone().unwrap_or_default(),
            source_url: self.source_url.clone().unwrap_or_default(),
            is_published: self.is_published,
        }
    }
}

/// An image file attached to a story
#[derive(Debug, Clone, PartialEq)]
pub struct ImageUpload {
    pub file_name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

/// Form state for creating or updating a story
///
/// Sent as `multipart/form-data`; see [`crate::api::ApiClient::create_positive_content`].
#[derive(Debug, Clone, PartialEq)]
pub struct PositiveContentDraft {
    pub title: String,
    pub content_type: ContentCategory,
    pub description: String,
    pub image: Option<ImageUpload>,
    /// Used when no file is uploaded
    pub image_url: String,
    pub source_url: String,
    pub is_published: bool,
}

impl Default for PositiveContentDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            content_type: ContentCategory::Culture,
            description: String::new(),
            image: None,
            image_url: String::new(),
            source_url: String::new(),
            is_published: true,
        }
    }
}

impl PositiveContentDraft {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::Required("Title"));
        }
        if self.description.trim().is_empty() {
            return Err(ValidationError::Required("Description"));
        }
        Ok(())
    }

    /// Text parts of the multipart body, empty values omitted
    pub fn text_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![
            ("title", self.title.clone()),
            ("content_type", self.content_type.as_str().to_string()),
            ("description", self.description.clone()),
        ];
        // An uploaded file wins over the linked image
        if self.image.is_none() && !self.image_url.trim().is_empty() {
            fields.push(("image_url", self.image_url.clone()));
        }
        if !self.source_url.trim().is_empty() {
            fields.push(("source_url", self.source_url.clone()));
        }
        fields.push(("is_published", self.is_published.to_string()));
        fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_fields_skip_empty_values() {
        let draft = PositiveContentDraft {
            title: "Jacmel carnival".into(),
            description: "Papier-mâché masks".into(),
            ..Default::default()
        };
        let names: Vec<_> = draft.text_fields().into_iter().map(|(k, _)| k).collect();
        assert_eq!(names, vec!["title", "content_type", "description", "is_published"]);
    }

    #[test]
    fn test_upload_replaces_image_url() {
        let draft = PositiveContentDraft {
            title: "t".into(),
            description: "d".into(),
            image_url: "https://cdn.example/a.jpg".into(),
            image: Some(ImageUpload {
                file_name: "a.jpg".into(),
                mime: "image/jpeg".into(),
                bytes: vec![1, 2, 3],
            }),
            ..Default::default()
        };
        assert!(draft.text_fields().iter().all(|(k, _)| *k != "image_url"));
    }

    #[test]
    fn test_publish_filter() {
        assert!(PublishFilter::All.matches(false));
        assert!(PublishFilter::Unpublished.matches(false));
        assert!(!PublishFilter::Published.matches(false));
    }

    #[test]
    fn test_category_label_fallback() {
        let item: PositiveContent = serde_json::from_value(serde_json::json!({
            "id": 3, "title": "Citadelle", "content_type": "nature"
        }))
        .unwrap();
        assert_eq!(item.category_label(), "Nature & Tourism");
    }
}
