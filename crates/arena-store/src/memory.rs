//! In-process article store, used for `serve --memory` and in tests.

use arena_core::Article;
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use tokio::sync::RwLock;
use tracing::debug;

use crate::{
    error::{Result, StoreError},
    store::{ArticleChanges, ArticleStore, ListQuery, NewArticle, SortOrder},
};

#[derive(Debug, Default)]
struct State {
    next_id: i64,
    last_stamp: Option<DateTime<Utc>>,
    articles: Vec<Article>,
}

impl State {
    /// Strictly increasing timestamps so updated-order listings are stable.
    fn stamp(&mut self) -> DateTime<Utc> {
        let now = Utc::now();
        let stamp = match self.last_stamp {
            Some(last) if now <= last => last + Duration::microseconds(1),
            _ => now,
        };
        self.last_stamp = Some(stamp);
        stamp
    }
}

/// Article store backed by a vector behind an async lock.
#[derive(Debug, Default)]
pub struct MemoryArticleStore {
    state: RwLock<State>,
}

impl MemoryArticleStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn sort_articles(articles: &mut [Article], order: SortOrder) {
    match order {
        SortOrder::UpdatedDesc => {
            articles.sort_by(|a, b| b.updated_at.cmp(&a.updated_at).then(b.id.cmp(&a.id)));
        }
        SortOrder::UpdatedAsc => {
            articles.sort_by(|a, b| a.updated_at.cmp(&b.updated_at).then(a.id.cmp(&b.id)));
        }
        SortOrder::CreatedDesc => {
            articles.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        }
    }
}

#[async_trait]
impl ArticleStore for MemoryArticleStore {
    async fn insert(&self, article: NewArticle) -> Result<Article> {
        let mut state = self.state.write().await;
        if state.articles.iter().any(|a| a.slug == article.slug) {
            return Err(StoreError::Conflict(article.slug));
        }

        state.next_id += 1;
        let id = state.next_id;
        let now = state.stamp();
        let record = Article {
            id,
            title: article.title,
            slug: article.slug,
            content: article.content,
            metadata: article.metadata,
            category: article.category,
            subcategory: article.subcategory,
            tags: article.tags,
            published: article.published,
            image_url: article.image_url,
            alt_text: article.alt_text,
            created_at: now,
            updated_at: now,
        };
        state.articles.push(record.clone());
        debug!(id, slug = %record.slug, "inserted article");
        Ok(record)
    }

    async fn update(&self, id: i64, changes: ArticleChanges) -> Result<Article> {
        let mut state = self.state.write().await;
        let now = state.stamp();
        let record = state
            .articles
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or(StoreError::NotFound(id))?;

        record.title = changes.title;
        record.content = changes.content;
        record.metadata = changes.metadata;
        record.category = changes.category;
        record.subcategory = changes.subcategory;
        record.tags = changes.tags;
        record.published = changes.published;
        record.image_url = changes.image_url;
        record.alt_text = changes.alt_text;
        record.updated_at = now;
        Ok(record.clone())
    }

    async fn delete(&self, id: i64) -> Result<()> {
        let mut state = self.state.write().await;
        let before = state.articles.len();
        state.articles.retain(|a| a.id != id);
        if state.articles.len() == before {
            return Err(StoreError::NotFound(id));
        }
        Ok(())
    }

    async fn get(&self, id: i64) -> Result<Option<Article>> {
        let state = self.state.read().await;
        Ok(state.articles.iter().find(|a| a.id == id).cloned())
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Article>> {
        let state = self.state.read().await;
        Ok(state.articles.iter().find(|a| a.slug == slug).cloned())
    }

    async fn list(&self, query: &ListQuery) -> Result<Vec<Article>> {
        let state = self.state.read().await;
        let mut articles: Vec<Article> = state
            .articles
            .iter()
            .filter(|a| query.matches(a))
            .cloned()
            .collect();
        sort_articles(&mut articles, query.order);
        if let Some(limit) = query.limit {
            articles.truncate(limit);
        }
        Ok(articles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_article(slug: &str, published: bool) -> NewArticle {
        NewArticle {
            title: slug.to_uppercase(),
            slug: slug.to_string(),
            metadata: "{}".to_string(),
            published,
            ..NewArticle::default()
        }
    }

    #[tokio::test]
    async fn test_insert_assigns_ids_and_timestamps() {
        let store = MemoryArticleStore::new();
        let a = store.insert(new_article("a", true)).await.unwrap();
        let b = store.insert(new_article("b", true)).await.unwrap();
        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);
        assert_eq!(a.created_at, a.updated_at);
        assert!(b.created_at > a.created_at);
    }

    #[tokio::test]
    async fn test_duplicate_slug_conflicts() {
        let store = MemoryArticleStore::new();
        store.insert(new_article("a", true)).await.unwrap();
        let err = store.insert(new_article("a", false)).await.unwrap_err();
        assert!(matches!(err, StoreError::Conflict(slug) if slug == "a"));
    }

    #[tokio::test]
    async fn test_update_bumps_updated_at_only() {
        let store = MemoryArticleStore::new();
        let a = store.insert(new_article("a", false)).await.unwrap();
        let changed = store
            .update(
                a.id,
                ArticleChanges {
                    title: "Renamed".to_string(),
                    published: true,
                    ..ArticleChanges::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(changed.slug, "a");
        assert_eq!(changed.created_at, a.created_at);
        assert!(changed.updated_at > a.updated_at);
        assert!(changed.published);
    }

    #[tokio::test]
    async fn test_update_missing() {
        let store = MemoryArticleStore::new();
        let err = store.update(9, ArticleChanges::default()).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound(9)));
    }

    #[tokio::test]
    async fn test_list_filters_and_orders() {
        let store = MemoryArticleStore::new();
        let a = store.insert(new_article("a", true)).await.unwrap();
        store.insert(new_article("b", false)).await.unwrap();
        store.insert(new_article("c", true)).await.unwrap();
        store.insert(new_article("d", true)).await.unwrap();
        store
            .update(
                a.id,
                ArticleChanges {
                    published: true,
                    ..ArticleChanges::default()
                },
            )
            .await
            .unwrap();

        let recent = store
            .list(&ListQuery::published().excluding("d").limit(3))
            .await
            .unwrap();
        let slugs: Vec<_> = recent.iter().map(|a| a.slug.as_str()).collect();
        assert_eq!(slugs, vec!["a", "c"]);

        let oldest = store
            .list(&ListQuery::published().order(SortOrder::UpdatedAsc))
            .await
            .unwrap();
        let slugs: Vec<_> = oldest.iter().map(|a| a.slug.as_str()).collect();
        assert_eq!(slugs, vec!["c", "d", "a"]);

        let newest = store
            .list(&ListQuery::all().order(SortOrder::CreatedDesc))
            .await
            .unwrap();
        assert_eq!(newest.first().map(|a| a.slug.as_str()), Some("d"));
        assert_eq!(newest.len(), 4);
    }

    #[tokio::test]
    async fn test_delete() {
        let store = MemoryArticleStore::new();
        let a = store.insert(new_article("a", true)).await.unwrap();
        store.delete(a.id).await.unwrap();
        assert!(store.get(a.id).await.unwrap().is_none());
        assert!(matches!(
            store.delete(a.id).await.unwrap_err(),
            StoreError::NotFound(_)
        ));
    }
}
