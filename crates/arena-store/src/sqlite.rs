//! SQLite-backed article store.

use std::str::FromStr;

use arena_core::Article;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{
    QueryBuilder, Sqlite,
    sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions},
};
use tracing::{debug, info};

use crate::{
    error::{Result, StoreError},
    store::{ArticleChanges, ArticleStore, ListQuery, NewArticle, SortOrder},
};

const SCHEMA: &str = r"
CREATE TABLE IF NOT EXISTS articles (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    slug TEXT NOT NULL UNIQUE,
    content TEXT NOT NULL DEFAULT '',
    metadata TEXT NOT NULL DEFAULT '{}',
    category TEXT NOT NULL DEFAULT '',
    subcategory TEXT,
    tags TEXT NOT NULL DEFAULT '',
    published INTEGER NOT NULL DEFAULT 0,
    image_url TEXT,
    alt_text TEXT,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
)";

const COLUMNS: &str = "id, title, slug, content, metadata, category, subcategory, tags, \
                       published, image_url, alt_text, created_at, updated_at";

#[derive(Debug, sqlx::FromRow)]
struct ArticleRow {
    id: i64,
    title: String,
    slug: String,
    content: String,
    metadata: String,
    category: String,
    subcategory: Option<String>,
    tags: String,
    published: bool,
    image_url: Option<String>,
    alt_text: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ArticleRow> for Article {
    fn from(row: ArticleRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            slug: row.slug,
            content: row.content,
            metadata: row.metadata,
            category: row.category,
            subcategory: row.subcategory,
            tags: row.tags,
            published: row.published,
            image_url: row.image_url,
            alt_text: row.alt_text,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Article store on a SQLite connection pool.
#[derive(Debug, Clone)]
pub struct SqliteArticleStore {
    pool: SqlitePool,
}

impl SqliteArticleStore {
    /// Open (creating if missing) the database at `url` and apply the schema.
    pub async fn connect(url: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;
        let store = Self { pool };
        store.migrate().await?;
        info!(url, "article store ready");
        Ok(store)
    }

    /// Private in-memory database, one connection so every query sees it.
    pub async fn in_memory() -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await?;
        let store = Self { pool };
        store.migrate().await?;
        Ok(store)
    }

    /// Create the articles table if it does not exist.
    pub async fn migrate(&self) -> Result<()> {
        sqlx::query(SCHEMA).execute(&self.pool).await?;
        Ok(())
    }

    async fn fetch_one_by_id(&self, id: i64) -> Result<Option<Article>> {
        let row: Option<ArticleRow> =
            sqlx::query_as(&format!("SELECT {COLUMNS} FROM articles WHERE id = ?"))
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(row.map(Article::from))
    }
}

fn conflict_or(err: sqlx::Error, slug: &str) -> StoreError {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            StoreError::Conflict(slug.to_string())
        }
        _ => StoreError::Database(err),
    }
}

#[async_trait]
impl ArticleStore for SqliteArticleStore {
    async fn insert(&self, article: NewArticle) -> Result<Article> {
        let now = Utc::now();
        let result = sqlx::query(
            "INSERT INTO articles (title, slug, content, metadata, category, subcategory, tags, \
             published, image_url, alt_text, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&article.title)
        .bind(&article.slug)
        .bind(&article.content)
        .bind(&article.metadata)
        .bind(&article.category)
        .bind(&article.subcategory)
        .bind(&article.tags)
        .bind(article.published)
        .bind(&article.image_url)
        .bind(&article.alt_text)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| conflict_or(e, &article.slug))?;

        let id = result.last_insert_rowid();
        debug!(id, slug = %article.slug, "inserted article");
        self.fetch_one_by_id(id)
            .await?
            .ok_or(StoreError::NotFound(id))
    }

    async fn update(&self, id: i64, changes: ArticleChanges) -> Result<Article> {
        let result = sqlx::query(
            "UPDATE articles SET title = ?, content = ?, metadata = ?, category = ?, \
             subcategory = ?, tags = ?, published = ?, image_url = ?, alt_text = ?, \
             updated_at = ? WHERE id = ?",
        )
        .bind(&changes.title)
        .bind(&changes.content)
        .bind(&changes.metadata)
        .bind(&changes.category)
        .bind(&changes.subcategory)
        .bind(&changes.tags)
        .bind(changes.published)
        .bind(&changes.image_url)
        .bind(&changes.alt_text)
        .bind(Utc::now())
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(id));
        }
        self.fetch_one_by_id(id)
            .await?
            .ok_or(StoreError::NotFound(id))
    }

    async fn delete(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM articles WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(id));
        }
        debug!(id, "deleted article");
        Ok(())
    }

    async fn get(&self, id: i64) -> Result<Option<Article>> {
        self.fetch_one_by_id(id).await
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Article>> {
        let row: Option<ArticleRow> =
            sqlx::query_as(&format!("SELECT {COLUMNS} FROM articles WHERE slug = ?"))
                .bind(slug)
                .fetch_optional(&self.pool)
                .await?;
        Ok(row.map(Article::from))
    }

    async fn list(&self, query: &ListQuery) -> Result<Vec<Article>> {
        let mut qb: QueryBuilder<'_, Sqlite> =
            QueryBuilder::new(format!("SELECT {COLUMNS} FROM articles WHERE 1 = 1"));
        if query.published_only {
            qb.push(" AND published = 1");
        }
        if let Some(slug) = &query.exclude_slug {
            qb.push(" AND slug <> ").push_bind(slug.clone());
        }
        qb.push(match query.order {
            SortOrder::UpdatedDesc => " ORDER BY updated_at DESC, id DESC",
            SortOrder::UpdatedAsc => " ORDER BY updated_at ASC, id ASC",
            SortOrder::CreatedDesc => " ORDER BY created_at DESC, id DESC",
        });
        if let Some(limit) = query.limit {
            qb.push(" LIMIT ")
                .push_bind(i64::try_from(limit).unwrap_or(i64::MAX));
        }

        let rows: Vec<ArticleRow> = qb.build_query_as().fetch_all(&self.pool).await?;
        Ok(rows.into_iter().map(Article::from).collect())
    }
}
