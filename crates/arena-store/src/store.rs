//! The article store boundary.

use arena_core::Article;
use async_trait::async_trait;

use crate::error::Result;

/// Fields of an article about to be created.
#[derive(Debug, Clone, Default)]
pub struct NewArticle {
    pub title: String,
    pub slug: String,
    pub content: String,
    pub metadata: String,
    pub category: String,
    pub subcategory: Option<String>,
    pub tags: String,
    pub published: bool,
    pub image_url: Option<String>,
    pub alt_text: Option<String>,
}

/// Replacement values for an existing article. The slug is not editable.
#[derive(Debug, Clone, Default)]
pub struct ArticleChanges {
    pub title: String,
    pub content: String,
    pub metadata: String,
    pub category: String,
    pub subcategory: Option<String>,
    pub tags: String,
    pub published: bool,
    pub image_url: Option<String>,
    pub alt_text: Option<String>,
}

/// Sort order for listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Most recently updated first.
    #[default]
    UpdatedDesc,
    /// Least recently updated first.
    UpdatedAsc,
    /// Newest first by creation time.
    CreatedDesc,
}

/// Listing filter.
#[derive(Debug, Clone, Default)]
pub struct ListQuery {
    pub published_only: bool,
    pub exclude_slug: Option<String>,
    pub order: SortOrder,
    pub limit: Option<usize>,
}

impl ListQuery {
    /// Every article, published or not.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Only publicly visible articles.
    #[must_use]
    pub fn published() -> Self {
        Self {
            published_only: true,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn excluding(mut self, slug: impl Into<String>) -> Self {
        self.exclude_slug = Some(slug.into());
        self
    }

    #[must_use]
    pub fn order(mut self, order: SortOrder) -> Self {
        self.order = order;
        self
    }

    #[must_use]
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Whether an article passes the filter (ordering and limit aside).
    pub fn matches(&self, article: &Article) -> bool {
        if self.published_only && !article.published {
            return false;
        }
        self.exclude_slug
            .as_deref()
            .is_none_or(|slug| article.slug != slug)
    }
}

/// Persistent CRUD store for blog articles.
///
/// Timestamps are assigned by the store. Each call is atomic on its own;
/// concurrent edits are last-writer-wins.
#[async_trait]
pub trait ArticleStore: Send + Sync {
    /// Persist a new article and return it with id and timestamps.
    async fn insert(&self, article: NewArticle) -> Result<Article>;

    /// Overwrite an article's editable fields and bump `updated_at`.
    async fn update(&self, id: i64, changes: ArticleChanges) -> Result<Article>;

    /// Hard-delete an article.
    async fn delete(&self, id: i64) -> Result<()>;

    /// Direct lookup by id, regardless of publication.
    async fn get(&self, id: i64) -> Result<Option<Article>>;

    /// Point lookup by unique slug, regardless of publication.
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Article>>;

    /// Filtered, ordered listing.
    async fn list(&self, query: &ListQuery) -> Result<Vec<Article>>;
}
