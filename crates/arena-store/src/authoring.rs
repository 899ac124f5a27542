//! Create, update and delete articles from the editor form.

use std::sync::Arc;

use arena_core::{Article, ArticleMetadata, slug};
use tracing::{info, warn};

use crate::{
    error::{Result, StoreError},
    store::{ArticleChanges, ArticleStore, ListQuery, NewArticle, SortOrder},
    uploads::UploadArea,
};

/// How many suffixed slugs to try before giving up.
const MAX_SLUG_ATTEMPTS: u32 = 100;

/// Editor path segment that opens the creation form; never given to an article.
pub const NEW_RECORD_SLUG: &str = "new";

/// An image attached to an editor submission.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    /// A browser submits an empty file part when nothing was chosen.
    fn is_present(&self) -> bool {
        let name = self.file_name.trim();
        !name.is_empty() && name != "undefined" && !self.bytes.is_empty()
    }
}

/// Fields submitted by the editor form.
#[derive(Debug, Clone, Default)]
pub struct ArticleForm {
    pub title: String,
    pub content: String,
    pub meta_description: String,
    pub category: String,
    pub subcategory: Option<String>,
    pub tags: String,
    pub alt_text: Option<String>,
    pub published: bool,
    pub image: Option<ImageUpload>,
}

impl ArticleForm {
    fn validated_title(&self) -> Result<String> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(StoreError::validation("Title is required"));
        }
        Ok(title.to_string())
    }
}

fn optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// The editor's contract against the article store.
#[derive(Clone)]
pub struct AuthoringWorkflow {
    store: Arc<dyn ArticleStore>,
    uploads: UploadArea,
}

impl AuthoringWorkflow {
    pub fn new(store: Arc<dyn ArticleStore>, uploads: UploadArea) -> Self {
        Self { store, uploads }
    }

    /// Validate, derive a free slug, store any image, then insert the record.
    /// Returns the new slug.
    pub async fn create_record(&self, form: ArticleForm) -> Result<String> {
        let title = form.validated_title()?;
        let base = slug::slugify(&title);
        let image_url = self.store_image(form.image.as_ref()).await?;

        let mut attempt = 1;
        let mut candidate = self.free_slug(&base).await?;
        loop {
            let new = NewArticle {
                title: title.clone(),
                slug: candidate.clone(),
                content: form.content.clone(),
                metadata: ArticleMetadata::new(form.meta_description.trim()).to_json(),
                category: form.category.trim().to_string(),
                subcategory: optional(form.subcategory.clone()),
                tags: form.tags.trim().to_string(),
                published: form.published,
                image_url: image_url.clone(),
                alt_text: optional(form.alt_text.clone()),
            };
            match self.store.insert(new).await {
                Ok(article) => {
                    info!(id = article.id, slug = %article.slug, "created article");
                    return Ok(article.slug);
                }
                // Lost a race for the slug between lookup and insert.
                Err(StoreError::Conflict(_)) if attempt < MAX_SLUG_ATTEMPTS => {
                    attempt += 1;
                    candidate = self.free_slug(&base).await?;
                }
                Err(e) => {
                    if let Some(url) = &image_url {
                        warn!(%url, error = %e, "article insert failed after upload; file left for sweep");
                    }
                    return Err(e);
                }
            }
        }
    }

    /// Overwrite an article's fields. The slug never changes and the existing
    /// image is kept unless a new one is attached.
    pub async fn update_record(&self, id: i64, form: ArticleForm) -> Result<Article> {
        let title = form.validated_title()?;
        let existing = self
            .store
            .get(id)
            .await?
            .ok_or(StoreError::NotFound(id))?;

        let uploaded = self.store_image(form.image.as_ref()).await?;
        let image_url = uploaded.clone().or(existing.image_url);

        let changes = ArticleChanges {
            title,
            content: form.content,
            metadata: ArticleMetadata::new(form.meta_description.trim()).to_json(),
            category: form.category.trim().to_string(),
            subcategory: optional(form.subcategory),
            tags: form.tags.trim().to_string(),
            published: form.published,
            image_url,
            alt_text: optional(form.alt_text),
        };
        match self.store.update(id, changes).await {
            Ok(article) => {
                info!(id, slug = %article.slug, "updated article");
                Ok(article)
            }
            Err(e) => {
                if let Some(url) = &uploaded {
                    warn!(%url, error = %e, "article update failed after upload; file left for sweep");
                }
                Err(e)
            }
        }
    }

    /// Hard delete.
    pub async fn delete_record(&self, id: i64) -> Result<()> {
        self.store.delete(id).await?;
        info!(id, "deleted article");
        Ok(())
    }

    /// Direct lookup by id, published or not.
    pub async fn get_record(&self, id: i64) -> Result<Option<Article>> {
        self.store.get(id).await
    }

    /// Lookup by slug for the editor form, published or not.
    pub async fn find_record(&self, slug: &str) -> Result<Option<Article>> {
        self.store.find_by_slug(slug).await
    }

    /// Every article, most recently updated first.
    pub async fn list_records(&self) -> Result<Vec<Article>> {
        self.store
            .list(&ListQuery::all().order(SortOrder::UpdatedDesc))
            .await
    }

    async fn store_image(&self, image: Option<&ImageUpload>) -> Result<Option<String>> {
        match image.filter(|i| i.is_present()) {
            Some(image) => Ok(Some(self.uploads.save(&image.file_name, &image.bytes).await?)),
            None => Ok(None),
        }
    }

    async fn free_slug(&self, base: &str) -> Result<String> {
        if base != NEW_RECORD_SLUG && self.store.find_by_slug(base).await?.is_none() {
            return Ok(base.to_string());
        }
        for n in 2..=MAX_SLUG_ATTEMPTS + 1 {
            let candidate = slug::with_suffix(base, n);
            if self.store.find_by_slug(&candidate).await?.is_none() {
                return Ok(candidate);
            }
        }
        Err(StoreError::Conflict(base.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryArticleStore;

    fn workflow(dir: &std::path::Path) -> AuthoringWorkflow {
        AuthoringWorkflow::new(
            Arc::new(MemoryArticleStore::new()),
            UploadArea::new(dir.join("uploads"), "/uploads"),
        )
    }

    fn form(title: &str) -> ArticleForm {
        ArticleForm {
            title: title.to_string(),
            content: "<p>Body</p>".to_string(),
            meta_description: "A description".to_string(),
            category: "News".to_string(),
            tags: "fitness, kids".to_string(),
            published: true,
            ..ArticleForm::default()
        }
    }

    #[tokio::test]
    async fn test_create_derives_slug() {
        let dir = tempfile::tempdir().unwrap();
        let wf = workflow(dir.path());
        let slug = wf.create_record(form("My First Post!")).await.unwrap();
        assert_eq!(slug, "my-first-post");

        let article = wf.find_record(&slug).await.unwrap().unwrap();
        assert_eq!(article.title, "My First Post!");
        assert_eq!(article.description().as_deref(), Some("A description"));
        assert!(article.image_url.is_none());
    }

    #[tokio::test]
    async fn test_create_rejects_blank_title() {
        let dir = tempfile::tempdir().unwrap();
        let wf = workflow(dir.path());
        for title in ["", "   "] {
            let err = wf.create_record(form(title)).await.unwrap_err();
            assert!(matches!(err, StoreError::Validation(ref m) if m == "Title is required"));
        }
        assert!(wf.list_records().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_colliding_titles_get_suffixes() {
        let dir = tempfile::tempdir().unwrap();
        let wf = workflow(dir.path());
        assert_eq!(wf.create_record(form("Party Time")).await.unwrap(), "party-time");
        assert_eq!(wf.create_record(form("Party time!")).await.unwrap(), "party-time-2");
        assert_eq!(wf.create_record(form("PARTY TIME")).await.unwrap(), "party-time-3");
    }

    #[tokio::test]
    async fn test_editor_sentinel_slug_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let wf = workflow(dir.path());
        assert_eq!(wf.create_record(form("New!")).await.unwrap(), "new-2");
        assert_eq!(wf.create_record(form("New")).await.unwrap(), "new-3");
        assert!(wf.find_record(NEW_RECORD_SLUG).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_keeps_slug_and_image() {
        let dir = tempfile::tempdir().unwrap();
        let wf = workflow(dir.path());
        let mut with_image = form("Original");
        with_image.image = Some(ImageUpload {
            file_name: "cover shot.jpg".to_string(),
            bytes: vec![1, 2, 3],
        });
        let slug = wf.create_record(with_image).await.unwrap();
        let created = wf.find_record(&slug).await.unwrap().unwrap();
        let image = created.image_url.clone().unwrap();
        assert!(image.ends_with("-cover-shot.jpg"));

        let mut edit = form("Completely Different");
        edit.published = false;
        let updated = wf.update_record(created.id, edit).await.unwrap();
        assert_eq!(updated.slug, "original");
        assert_eq!(updated.title, "Completely Different");
        assert_eq!(updated.image_url.as_deref(), Some(image.as_str()));
        assert!(!updated.published);
    }

    #[tokio::test]
    async fn test_empty_file_part_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let wf = workflow(dir.path());
        let mut f = form("No Image");
        f.image = Some(ImageUpload {
            file_name: "undefined".to_string(),
            bytes: Vec::new(),
        });
        let slug = wf.create_record(f).await.unwrap();
        let article = wf.find_record(&slug).await.unwrap().unwrap();
        assert!(article.image_url.is_none());
        assert!(!dir.path().join("uploads").exists());
    }

    #[tokio::test]
    async fn test_update_blank_title_leaves_record() {
        let dir = tempfile::tempdir().unwrap();
        let wf = workflow(dir.path());
        let slug = wf.create_record(form("Keep Me")).await.unwrap();
        let id = wf.find_record(&slug).await.unwrap().unwrap().id;

        assert!(wf.update_record(id, form(" ")).await.is_err());
        let article = wf.get_record(id).await.unwrap().unwrap();
        assert_eq!(article.title, "Keep Me");
    }

    #[tokio::test]
    async fn test_unpublished_visible_to_editor_and_delete() {
        let dir = tempfile::tempdir().unwrap();
        let wf = workflow(dir.path());
        let mut draft = form("Draft");
        draft.published = false;
        let slug = wf.create_record(draft).await.unwrap();
        let article = wf.find_record(&slug).await.unwrap().unwrap();
        assert!(!article.published);
        assert_eq!(wf.list_records().await.unwrap().len(), 1);

        wf.delete_record(article.id).await.unwrap();
        assert!(wf.get_record(article.id).await.unwrap().is_none());
    }
}
