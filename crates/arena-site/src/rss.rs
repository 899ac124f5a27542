//! RSS feed for the blog.

use arena_core::{Article, SiteConfig};
use chrono::Utc;
use rss::{ChannelBuilder, GuidBuilder, Item, ItemBuilder};
use tracing::debug;

/// Blog RSS 2.0 feed generator.
#[derive(Debug)]
pub struct RssGenerator {
    site: SiteConfig,
    limit: usize,
}

impl RssGenerator {
    #[must_use]
    pub fn new(site: SiteConfig, limit: usize) -> Self {
        Self { site, limit }
    }

    /// Feed XML for the published articles, in the order given.
    pub fn generate(&self, articles: &[Article]) -> String {
        let items: Vec<Item> = articles
            .iter()
            .filter(|a| a.published)
            .take(self.limit)
            .map(|a| self.article_to_item(a))
            .collect();
        debug!(count = items.len(), limit = self.limit, "generating RSS feed");

        let fallback = format!("News and stories from {}", self.site.name);
        let channel = ChannelBuilder::default()
            .title(format!("{} Blog", self.site.name))
            .link(self.site.url_for("/blog"))
            .description(self.site.description.as_deref().unwrap_or(&fallback))
            .language(Some(self.site.language.replace('_', "-").to_lowercase()))
            .last_build_date(Some(Utc::now().to_rfc2822()))
            .items(items)
            .build();

        channel.to_string()
    }

    fn article_to_item(&self, article: &Article) -> Item {
        let url = self.site.url_for(&article.path());
        let guid = GuidBuilder::default().value(&url).permalink(true).build();

        let mut builder = ItemBuilder::default();
        builder.title(Some(article.title.clone()));
        builder.link(Some(url));
        builder.guid(Some(guid));
        builder.pub_date(Some(article.created_at.to_rfc2822()));
        builder.description(article.description());

        let mut categories: Vec<_> = article
            .tag_list()
            .into_iter()
            .map(|tag| rss::Category {
                name: tag.to_string(),
                domain: None,
            })
            .collect();
        if !article.category.trim().is_empty() {
            categories.insert(
                0,
                rss::Category {
                    name: article.category.clone(),
                    domain: None,
                },
            );
        }
        if !categories.is_empty() {
            builder.categories(categories);
        }

        builder.build()
    }
}
