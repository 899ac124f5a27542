//! Page titles, descriptions, social cards, canonical URLs and JSON-LD.

use arena_core::{Activity, Article, ContentKind, Event, Park, SiteConfig};
use serde_json::Value;

use crate::{
    pages::{self, StaticPage},
    schema,
};

/// Social-share image dimensions.
pub const OG_IMAGE_WIDTH: u32 = 1200;
pub const OG_IMAGE_HEIGHT: u32 = 630;

pub const ROBOTS: &str = "index, follow";
pub const TWITTER_CARD: &str = "summary_large_image";

/// Open Graph object type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OgType {
    Website,
    Article,
}

impl OgType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Website => "website",
            Self::Article => "article",
        }
    }
}

/// Share image with its alt text.
#[derive(Debug, Clone, PartialEq)]
pub struct OgImage {
    pub url: String,
    pub width: u32,
    pub height: u32,
    pub alt: String,
}

/// Everything a page head needs.
#[derive(Debug, Clone)]
pub struct PageMeta {
    pub title: String,
    pub description: String,
    pub keywords: Vec<String>,
    pub canonical_url: String,
    pub image: OgImage,
    pub og_type: OgType,
    pub site_name: String,
    pub locale: String,
    pub robots: &'static str,
    pub twitter_card: &'static str,
    pub published_time: Option<String>,
    pub modified_time: Option<String>,
    /// JSON-LD documents, usually exactly one.
    pub structured_data: Vec<Value>,
}

fn keywords(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(str::to_string)
        .collect()
}

/// Derives [`PageMeta`] for every content type from the site configuration.
#[derive(Debug, Clone, Copy)]
pub struct MetadataBuilder<'a> {
    site: &'a SiteConfig,
}

impl<'a> MetadataBuilder<'a> {
    pub fn new(site: &'a SiteConfig) -> Self {
        Self { site }
    }

    fn base(&self, title: &str, description: String, path: &str, image: Option<&str>) -> PageMeta {
        let title = self.site.title(title);
        PageMeta {
            image: OgImage {
                url: self.site.asset_url(image.unwrap_or(&self.site.og_image)),
                width: OG_IMAGE_WIDTH,
                height: OG_IMAGE_HEIGHT,
                alt: title.clone(),
            },
            title,
            description,
            keywords: Vec::new(),
            canonical_url: self.site.url_for(path),
            og_type: OgType::Website,
            site_name: self.site.name.clone(),
            locale: self.site.language.clone(),
            robots: ROBOTS,
            twitter_card: TWITTER_CARD,
            published_time: None,
            modified_time: None,
            structured_data: Vec::new(),
        }
    }

    pub fn activity(&self, activity: &Activity) -> PageMeta {
        let site = &self.site.name;
        let description = match activity.description.trim() {
            "" => format!(
                "Explore {} at {site}, featuring thrilling trampoline fun across the UK.",
                activity.title
            ),
            d => d.to_string(),
        };
        let mut meta = self.base(
            &activity.title,
            description,
            &format!("/activities/{}", activity.slug),
            activity.image.as_deref().filter(|i| !i.trim().is_empty()),
        );
        meta.image.alt = format!("{} at {site}", activity.title);
        meta.keywords = keywords(&format!(
            "{}, trampoline activity, {} uk, bounce fun",
            activity.title.to_lowercase(),
            site.to_lowercase()
        ));
        meta.og_type = OgType::Article;
        meta.structured_data = vec![schema::activity(self.site, activity)];
        meta
    }

    pub fn event(&self, event: &Event, park: Option<&Park>) -> PageMeta {
        let description = match event.meta.description.trim() {
            "" => format!(
                "Join {} at {}, a trampoline event not to miss.",
                event.title, self.site.name
            ),
            d => d.to_string(),
        };
        let mut meta = self.base(
            &event.title,
            description,
            &format!("/event/{}", event.slug),
            event.image.as_deref().filter(|i| !i.trim().is_empty()),
        );
        meta.image.alt = format!("{} at {}", event.title, self.site.name);
        meta.keywords = keywords(&event.meta.keywords);
        meta.og_type = OgType::Article;
        meta.structured_data = vec![schema::event(self.site, event, park)];
        meta
    }

    /// City page over the parks sharing one city slug.
    pub fn location(&self, parks: &[&Park]) -> PageMeta {
        let Some(first) = parks.first() else {
            return self.not_found(Some(ContentKind::Location));
        };
        let city = &first.city;
        let site = &self.site.name;
        let description = parks
            .iter()
            .map(|p| p.description.trim())
            .find(|d| !d.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| {
                format!(
                    "Explore {site} trampoline parks in {city}, offering thrilling bounce experiences across the UK."
                )
            });
        let mut meta = self.base(
            &format!("{city} Locations"),
            description,
            &format!("/location/{}", first.slug),
            first.photo_url.as_deref().filter(|i| !i.trim().is_empty()),
        );
        meta.image.alt = format!("{site} {city}");
        meta.keywords = keywords(&format!(
            "{} trampoline park, {} {city}, uk bounce locations",
            city.to_lowercase(),
            site.to_lowercase()
        ));
        meta.structured_data = parks
            .iter()
            .map(|p| schema::local_business(self.site, p))
            .collect();
        meta
    }

    pub fn article(&self, article: &Article) -> PageMeta {
        let description = article.description().unwrap_or_else(|| {
            format!("Read {} on the {} blog.", article.title, self.site.name)
        });
        let mut meta = self.base(
            &article.title,
            description,
            &article.path(),
            article.image_url.as_deref().filter(|i| !i.trim().is_empty()),
        );
        if let Some(alt) = article.alt_text.as_deref().filter(|a| !a.trim().is_empty()) {
            meta.image.alt = alt.to_string();
        }
        meta.keywords = article.tag_list().into_iter().map(str::to_string).collect();
        meta.og_type = OgType::Article;
        meta.published_time = Some(schema::iso8601(&article.created_at));
        meta.modified_time = Some(schema::iso8601(&article.updated_at));
        meta.structured_data = vec![schema::blog_posting(self.site, article)];
        meta
    }

    pub fn activities_listing(&self, activities: &[Activity]) -> PageMeta {
        let site = &self.site.name;
        let mut meta = self.base(
            "Activities",
            format!(
                "Discover thrilling trampoline activities at {site}, from freestyle jumps to dodgeball, across the UK."
            ),
            "/activities",
            None,
        );
        meta.keywords = keywords(&format!(
            "trampoline activities, {} uk, dodgeball, freestyle jump, trampoline park",
            site.to_lowercase()
        ));
        meta.structured_data = vec![schema::activity_list(self.site, activities)];
        meta
    }

    pub fn events_listing(&self, events: &[Event]) -> PageMeta {
        let site = &self.site.name;
        let mut meta = self.base(
            &format!("{site} Events"),
            format!(
                "Discover upcoming trampoline events at {site}, featuring bounce-a-thons, themed weekends, and more across the UK."
            ),
            "/event",
            None,
        );
        meta.keywords = keywords(&format!(
            "trampoline events, {} events, uk trampoline parks, bounce-a-thon, themed events",
            site.to_lowercase()
        ));
        meta.structured_data = vec![schema::event_list(self.site, events)];
        meta
    }

    pub fn locations_listing(&self, cities: &[&Park]) -> PageMeta {
        let site = &self.site.name;
        let mut meta = self.base(
            "Locations",
            format!(
                "Find {site} trampoline park locations across the UK, offering thrilling bounce experiences."
            ),
            "/location",
            None,
        );
        meta.keywords = keywords(&format!(
            "{} locations, trampoline parks uk, bounce locations, uk trampoline spots",
            site.to_lowercase()
        ));
        meta.structured_data = vec![schema::location_collection(self.site, cities)];
        meta
    }

    pub fn blog_listing(&self, articles: &[Article]) -> PageMeta {
        let site = &self.site.name;
        let description = format!(
            "Discover the latest insights and stories from the {site} blog, covering trampoline park adventures, tips, and more."
        );
        let mut meta = self.base("Latest Articles", description.clone(), "/blog", None);
        meta.keywords = keywords(&format!(
            "{}, blog, trampoline parks, activities, uk",
            site.to_lowercase()
        ));
        meta.structured_data = vec![schema::blog(self.site, &description, articles)];
        meta
    }

    pub fn static_page(&self, page: &StaticPage) -> PageMeta {
        let site = &self.site.name;
        let mut meta = self.base(
            &pages::brand(page.title, site),
            pages::brand(page.description, site),
            page.path,
            None,
        );
        meta.keywords = page
            .keyword_list()
            .iter()
            .map(|k| pages::brand(k, &site.to_lowercase()))
            .collect();
        meta.structured_data = vec![schema::static_page(self.site, page)];
        if page.schema == pages::PageSchema::Home {
            meta.structured_data.push(serde_json::json!({
                "@context": "https://schema.org",
                "@type": "Organization",
                "name": site,
                "url": self.site.base_url(),
            }));
        }
        meta
    }

    /// Neutral metadata for a miss. Never fails.
    pub fn not_found(&self, kind: Option<ContentKind>) -> PageMeta {
        let (label, noun) = match kind {
            Some(kind) => (kind.label(), kind.label().to_lowercase()),
            None => ("Page", "page".to_string()),
        };
        let mut meta = self.base(
            &format!("{label} Not Found"),
            format!(
                "The requested {noun} could not be found at {}.",
                self.site.name
            ),
            kind.map_or("/", |k| k.route_prefix()),
            None,
        );
        meta.robots = "noindex, follow";
        meta
    }

    /// Metadata for the authoring screens, which crawlers must skip.
    pub fn editor(&self, heading: &str, path: &str) -> PageMeta {
        let mut meta = self.base(
            heading,
            format!("Manage {} blog articles.", self.site.name),
            path,
            None,
        );
        meta.robots = "noindex, nofollow";
        meta
    }
}

#[cfg(test)]
mod tests {
    use arena_core::Config;

    use super::*;

    fn site() -> SiteConfig {
        Config::from_toml(
            r#"
[site]
name = "JumpArena"
domain = "https://jumparena.co.uk/"
og_image = "/og.jpg"
title_suffix = " | JumpArena UK"
"#,
        )
        .unwrap()
        .site
    }

    fn dodgeball(image: Option<&str>) -> Activity {
        Activity {
            slug: "dodgeball".to_string(),
            title: "Dodgeball".to_string(),
            description: "Throw and dodge.".to_string(),
            image: image.map(str::to_string),
        }
    }

    #[test]
    fn test_activity_meta() {
        let site = site();
        let meta = MetadataBuilder::new(&site).activity(&dodgeball(None));
        assert_eq!(meta.title, "Dodgeball | JumpArena UK");
        assert_eq!(
            meta.canonical_url,
            "https://jumparena.co.uk/activities/dodgeball"
        );
        assert_eq!(meta.image.url, "https://jumparena.co.uk/og.jpg");
        assert_eq!(meta.image.width, 1200);
        assert_eq!(meta.og_type, OgType::Article);
        assert_eq!(meta.robots, "index, follow");
        assert_eq!(meta.twitter_card, "summary_large_image");
        assert_eq!(meta.description, "Throw and dodge.");
        assert_eq!(meta.keywords.first().map(String::as_str), Some("dodgeball"));
        assert_eq!(meta.structured_data[0]["@type"], "CreativeWork");
    }

    #[test]
    fn test_activity_description_falls_back() {
        let site = site();
        let mut activity = dodgeball(None);
        activity.description = "  ".to_string();
        let meta = MetadataBuilder::new(&site).activity(&activity);
        assert_eq!(
            meta.description,
            "Explore Dodgeball at JumpArena, featuring thrilling trampoline fun across the UK."
        );
    }

    #[test]
    fn test_own_image_wins() {
        let site = site();
        let meta = MetadataBuilder::new(&site).activity(&dodgeball(Some("/img/d.jpg")));
        assert_eq!(meta.image.url, "https://jumparena.co.uk/img/d.jpg");
        let blank = MetadataBuilder::new(&site).activity(&dodgeball(Some(" ")));
        assert_eq!(blank.image.url, "https://jumparena.co.uk/og.jpg");
    }

    #[test]
    fn test_not_found_meta() {
        let site = site();
        let meta = MetadataBuilder::new(&site).not_found(Some(ContentKind::Activity));
        assert_eq!(meta.title, "Activity Not Found | JumpArena UK");
        assert!(meta.description.contains("could not be found"));
        assert!(meta.structured_data.is_empty());

        let generic = MetadataBuilder::new(&site).not_found(None);
        assert!(generic.title.starts_with("Page Not Found"));
    }

    #[test]
    fn test_location_meta_one_doc_per_park() {
        let site = site();
        let park = |id: &str| Park {
            park_id: id.to_string(),
            park_name: format!("Park {id}"),
            slug: "leeds".to_string(),
            city: "Leeds".to_string(),
            chain: None,
            address_street: String::new(),
            address_city: "Leeds".to_string(),
            address_postcode: String::new(),
            description: String::new(),
            photo_url: None,
        };
        let (a, mut b) = (park("1"), park("2"));
        let meta = MetadataBuilder::new(&site).location(&[&a, &b]);
        assert_eq!(meta.title, "Leeds Locations | JumpArena UK");
        assert_eq!(meta.canonical_url, "https://jumparena.co.uk/location/leeds");
        assert_eq!(meta.structured_data.len(), 2);
        assert!(meta.description.starts_with("Explore JumpArena trampoline parks in Leeds"));

        b.description = "Our biggest park with 40 trampolines.".to_string();
        let described = MetadataBuilder::new(&site).location(&[&a, &b]);
        assert_eq!(described.description, "Our biggest park with 40 trampolines.");
    }

    #[test]
    fn test_static_page_home() {
        let site = site();
        let meta = MetadataBuilder::new(&site).static_page(&pages::HOME);
        assert_eq!(meta.title, "JumpArena | JumpArena UK");
        assert_eq!(meta.canonical_url, "https://jumparena.co.uk/");
        assert_eq!(meta.keywords.first().map(String::as_str), Some("jumparena"));
        assert_eq!(meta.structured_data.len(), 2);
    }
}
