//! Blog article records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A persisted blog post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    /// Store-assigned identity.
    pub id: i64,

    pub title: String,

    /// Derived from the title at creation time, never recomputed.
    pub slug: String,

    /// Rich text body (HTML).
    pub content: String,

    /// Serialized JSON blob carrying at least a `description` field.
    pub metadata: String,

    pub category: String,

    #[serde(default)]
    pub subcategory: Option<String>,

    /// Comma-delimited tag list.
    #[serde(default)]
    pub tags: String,

    /// Visibility gate for every public listing and lookup.
    pub published: bool,

    #[serde(default)]
    pub image_url: Option<String>,

    #[serde(default)]
    pub alt_text: Option<String>,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

/// Decoded form of [`Article::metadata`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArticleMetadata {
    #[serde(default)]
    pub description: String,
}

impl ArticleMetadata {
    /// Wrap a meta description.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }

    /// Serialize into the stored JSON string.
    pub fn to_json(&self) -> String {
        serde_json::json!({ "description": self.description }).to_string()
    }
}

impl Article {
    /// Decode the metadata blob; malformed JSON yields an empty description.
    pub fn meta(&self) -> ArticleMetadata {
        serde_json::from_str(&self.metadata).unwrap_or_else(|e| {
            tracing::warn!(slug = %self.slug, error = %e, "unreadable article metadata");
            ArticleMetadata::default()
        })
    }

    /// Meta description, if one was written.
    pub fn description(&self) -> Option<String> {
        let description = self.meta().description;
        let trimmed = description.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    }

    /// Tags split on commas, trimmed, empties dropped.
    pub fn tag_list(&self) -> Vec<&str> {
        self.tags
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .collect()
    }

    /// Public path of the article page.
    pub fn path(&self) -> String {
        format!("/blog/{}", self.slug)
    }
}
