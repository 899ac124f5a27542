//! Arena Core Library
//!
//! Core types, catalogs, configuration and error handling shared by the
//! article store, the page pipeline and the server.

pub mod article;
pub mod catalog;
pub mod config;
pub mod content;
pub mod error;
pub mod slug;

pub use article::{Article, ArticleMetadata};
pub use catalog::{Activity, Catalog, Event, EventMeta, Park};
pub use config::{Config, SiteConfig};
pub use content::{ContentKind, Linkable};
pub use error::{CoreError, Result};
