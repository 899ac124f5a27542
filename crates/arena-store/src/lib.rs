//! Arena Store
//!
//! Persistence for blog articles (SQLite or in-memory), the public upload
//! area, and the authoring workflow the editor drives.

pub mod authoring;
pub mod error;
pub mod memory;
pub mod sqlite;
pub mod store;
pub mod uploads;

pub use authoring::{ArticleForm, AuthoringWorkflow, ImageUpload, NEW_RECORD_SLUG};
pub use error::{Result, StoreError};
pub use memory::MemoryArticleStore;
pub use sqlite::SqliteArticleStore;
pub use store::{ArticleChanges, ArticleStore, ListQuery, NewArticle, SortOrder};
pub use uploads::UploadArea;
