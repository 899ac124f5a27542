//! Sitemap generation.
//!
//! Lists every indexable route: fixed pages, catalog records and published
//! articles.

use std::io::Write;

use arena_core::{Article, Catalog, Linkable, SiteConfig};
use chrono::{DateTime, Utc};
use tracing::debug;

use crate::{error::Result, pages::STATIC_PAGES};

/// Listing routes that are not part of the fixed page table.
pub const LISTING_ROUTES: &[&str] = &["/activities", "/event", "/location", "/blog"];

/// Change frequency for sitemap entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeFreq {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl ChangeFreq {
    fn as_str(&self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
        }
    }
}

/// A sitemap URL entry.
#[derive(Debug, Clone, PartialEq)]
pub struct SitemapUrl {
    pub loc: String,
    pub lastmod: DateTime<Utc>,
    pub changefreq: ChangeFreq,
    pub priority: f32,
}

/// Sitemap generator.
#[derive(Debug)]
pub struct SitemapGenerator {
    site: SiteConfig,
}

impl SitemapGenerator {
    #[must_use]
    pub fn new(site: SiteConfig) -> Self {
        Self { site }
    }

    fn url(&self, path: &str, lastmod: DateTime<Utc>, changefreq: ChangeFreq, priority: f32) -> SitemapUrl {
        SitemapUrl {
            loc: self.site.url_for(path),
            lastmod,
            changefreq,
            priority,
        }
    }

    /// Every entry, in route order. `now` stamps entries without a date of
    /// their own.
    pub fn entries(&self, catalog: &Catalog, articles: &[Article], now: DateTime<Utc>) -> Vec<SitemapUrl> {
        let mut urls = Vec::new();

        for page in STATIC_PAGES.iter().filter(|p| p.indexed) {
            let (freq, priority) = if page.path == "/" {
                (ChangeFreq::Daily, 1.0)
            } else {
                (ChangeFreq::Monthly, 0.6)
            };
            urls.push(self.url(page.path, now, freq, priority));
        }
        for path in LISTING_ROUTES {
            urls.push(self.url(path, now, ChangeFreq::Weekly, 0.8));
        }

        for activity in catalog.activities() {
            urls.push(self.url(&activity.path(), now, ChangeFreq::Monthly, 0.7));
        }
        for event in catalog.events() {
            let lastmod = event.starts_at().unwrap_or(now);
            urls.push(self.url(&event.path(), lastmod, ChangeFreq::Weekly, 0.7));
        }
        for park in catalog.cities() {
            urls.push(self.url(&park.path(), now, ChangeFreq::Monthly, 0.7));
        }
        for article in articles.iter().filter(|a| a.published) {
            urls.push(self.url(&article.path(), article.updated_at, ChangeFreq::Monthly, 0.6));
        }

        urls
    }

    /// Generate sitemap XML.
    pub fn generate(&self, catalog: &Catalog, articles: &[Article], now: DateTime<Utc>) -> String {
        let urls = self.entries(catalog, articles, now);
        debug!(count = urls.len(), "generating sitemap");

        let mut xml = String::from(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        xml.push('\n');
        xml.push_str(r#"<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">"#);
        xml.push('\n');
        for url in &urls {
            xml.push_str(&url_to_xml(url));
        }
        xml.push_str("</urlset>\n");
        xml
    }

    pub fn write_to<W: Write>(
        &self,
        catalog: &Catalog,
        articles: &[Article],
        now: DateTime<Utc>,
        writer: &mut W,
    ) -> Result<()> {
        writer.write_all(self.generate(catalog, articles, now).as_bytes())?;
        Ok(())
    }
}

fn url_to_xml(url: &SitemapUrl) -> String {
    let mut xml = String::from("  <url>\n");
    xml.push_str(&format!("    <loc>{}</loc>\n", escape_xml(&url.loc)));
    xml.push_str(&format!(
        "    <lastmod>{}</lastmod>\n",
        url.lastmod.format("%Y-%m-%d")
    ));
    xml.push_str(&format!(
        "    <changefreq>{}</changefreq>\n",
        url.changefreq.as_str()
    ));
    xml.push_str(&format!("    <priority>{:.1}</priority>\n", url.priority));
    xml.push_str("  </url>\n");
    xml
}

/// Escape special XML characters.
pub(crate) fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use arena_core::{Activity, Config, Event, EventMeta, Park};
    use chrono::TimeZone;

    use super::*;

    fn site() -> SiteConfig {
        Config::from_toml(
            r#"
[site]
name = "JumpArena"
domain = "https://jumparena.co.uk"
"#,
        )
        .unwrap()
        .site
    }

    fn park(id: &str, slug: &str) -> Park {
        Park {
            park_id: id.to_string(),
            park_name: format!("Park {id}"),
            slug: slug.to_string(),
            city: slug.to_string(),
            chain: None,
            address_street: String::new(),
            address_city: String::new(),
            address_postcode: String::new(),
            description: String::new(),
            photo_url: None,
        }
    }

    fn catalog() -> Catalog {
        Catalog::new(
            vec![Activity {
                slug: "dodgeball".to_string(),
                title: "Dodgeball".to_string(),
                description: String::new(),
                image: None,
            }],
            vec![Event {
                slug: "halloween".to_string(),
                title: "Halloween".to_string(),
                date: "2025-10-31".to_string(),
                content: String::new(),
                image: None,
                meta: EventMeta::default(),
            }],
            vec![park("1", "leeds"), park("2", "leeds"), park("3", "york")],
        )
    }

    fn article(slug: &str, published: bool) -> Article {
        let ts = Utc.with_ymd_and_hms(2025, 3, 14, 9, 0, 0).unwrap();
        Article {
            id: 1,
            title: slug.to_string(),
            slug: slug.to_string(),
            content: String::new(),
            metadata: "{}".to_string(),
            category: String::new(),
            subcategory: None,
            tags: String::new(),
            published,
            image_url: None,
            alt_text: None,
            created_at: ts,
            updated_at: ts,
        }
    }

    #[test]
    fn test_generate_sitemap() {
        let now = Utc.with_ymd_and_hms(2026, 1, 2, 0, 0, 0).unwrap();
        let xml = SitemapGenerator::new(site()).generate(
            &catalog(),
            &[article("spring-news", true), article("draft", false)],
            now,
        );

        assert!(xml.contains(r#"<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">"#));
        assert!(xml.contains("<loc>https://jumparena.co.uk/</loc>"));
        assert!(xml.contains("<loc>https://jumparena.co.uk/blog</loc>"));
        assert!(xml.contains("<loc>https://jumparena.co.uk/activities/dodgeball</loc>"));
        assert!(xml.contains("<loc>https://jumparena.co.uk/blog/spring-news</loc>"));
        assert!(!xml.contains("/blog/draft"));
        assert!(!xml.contains("/legal/"));
        assert!(!xml.contains("/editeur"));
    }

    #[test]
    fn test_lastmod_sources() {
        let now = Utc.with_ymd_and_hms(2026, 1, 2, 0, 0, 0).unwrap();
        let entries = SitemapGenerator::new(site()).entries(
            &catalog(),
            &[article("spring-news", true)],
            now,
        );
        let lastmod = |suffix: &str| {
            entries
                .iter()
                .find(|u| u.loc.ends_with(suffix))
                .map(|u| u.lastmod.format("%Y-%m-%d").to_string())
        };

        assert_eq!(lastmod("/event/halloween").as_deref(), Some("2025-10-31"));
        assert_eq!(lastmod("/blog/spring-news").as_deref(), Some("2025-03-14"));
        assert_eq!(lastmod("/activities/dodgeball").as_deref(), Some("2026-01-02"));
    }

    #[test]
    fn test_locations_deduplicated() {
        let entries = SitemapGenerator::new(site()).entries(&catalog(), &[], Utc::now());
        let leeds = entries
            .iter()
            .filter(|u| u.loc.ends_with("/location/leeds"))
            .count();
        assert_eq!(leeds, 1);
        assert!(entries.iter().any(|u| u.loc.ends_with("/location/york")));
    }

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("a & b"), "a &amp; b");
        assert_eq!(escape_xml("<tag>"), "&lt;tag&gt;");
    }
}
