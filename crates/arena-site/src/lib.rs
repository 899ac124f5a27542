//! Public site assembly for JumpArena.
//!
//! Slugs are resolved against the catalogs and the article store, composed
//! into page models with SEO metadata and JSON-LD, and rendered to HTML.
//! Sitemap, robots.txt and the blog RSS feed are generated from the same
//! sources.

pub mod composer;
pub mod error;
pub mod html;
pub mod metadata;
pub mod pages;
pub mod redirects;
pub mod resolver;
pub mod robots;
pub mod rss;
pub mod schema;
pub mod sitemap;
pub mod template;

pub use composer::{Block, LinkCard, LinkSection, PageComposer, PageModel, PageStatus};
pub use error::{Result, SiteError};
pub use html::HtmlRenderer;
pub use metadata::{MetadataBuilder, OgType, PageMeta};
pub use resolver::{Resolution, SlugResolver};
pub use robots::RobotsGenerator;
pub use rss::RssGenerator;
pub use sitemap::SitemapGenerator;
