//! Slug resolution against the catalogs and the article store.

use std::sync::Arc;

use arena_core::{Activity, Article, Catalog, Event, Park, slug};
use arena_store::ArticleStore;
use tracing::{debug, warn};

/// Outcome of a slug lookup.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution<T> {
    Found(T),
    NotFound,
}

impl<T> Resolution<T> {
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    pub fn found(self) -> Option<T> {
        match self {
            Self::Found(value) => Some(value),
            Self::NotFound => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Resolution<U> {
        match self {
            Self::Found(value) => Resolution::Found(f(value)),
            Self::NotFound => Resolution::NotFound,
        }
    }
}

impl<T> From<Option<T>> for Resolution<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::NotFound, Self::Found)
    }
}

/// Maps public URL slugs to records. Lookups are case-insensitive.
#[derive(Clone)]
pub struct SlugResolver {
    catalog: Arc<Catalog>,
    store: Arc<dyn ArticleStore>,
}

impl SlugResolver {
    pub fn new(catalog: Arc<Catalog>, store: Arc<dyn ArticleStore>) -> Self {
        Self { catalog, store }
    }

    pub fn activity(&self, raw: &str) -> Resolution<&Activity> {
        let key = slug::normalize(raw);
        debug!(slug = %key, "resolving activity");
        self.catalog.activity(&key).into()
    }

    pub fn event(&self, raw: &str) -> Resolution<&Event> {
        let key = slug::normalize(raw);
        debug!(slug = %key, "resolving event");
        self.catalog.event(&key).into()
    }

    /// Every park grouped under the city slug; an empty set is not found.
    pub fn location(&self, raw: &str) -> Resolution<Vec<&Park>> {
        let key = slug::normalize(raw);
        debug!(slug = %key, "resolving location");
        let parks = self.catalog.parks_in(&key);
        if parks.is_empty() {
            Resolution::NotFound
        } else {
            Resolution::Found(parks)
        }
    }

    /// Published article by slug. Unpublished records and store failures
    /// resolve as not found.
    pub async fn article(&self, raw: &str) -> Resolution<Article> {
        let key = slug::normalize(raw);
        debug!(slug = %key, "resolving article");
        match self.store.find_by_slug(&key).await {
            Ok(found) => found.filter(|a| a.published).into(),
            Err(e) => {
                warn!(slug = %key, error = %e, "article lookup failed");
                Resolution::NotFound
            }
        }
    }
}
