//! Page models assembled from resolved records.

use std::sync::Arc;

use arena_core::{
    Article, Catalog, Config, ContentKind, Linkable,
    content::{strip_html, truncate_at_word_boundary},
};
use arena_store::{ArticleStore, ListQuery, SortOrder};
use rand::{Rng, seq::SliceRandom};
use tracing::{debug, warn};

use crate::{
    metadata::{MetadataBuilder, PageMeta},
    pages::{self, PageSchema, StaticPage},
    resolver::{Resolution, SlugResolver},
};

const CARD_SUMMARY_CHARS: usize = 140;

pub const NO_RELATED_ACTIVITIES: &str = "No other activities to show right now.";
pub const NO_RELATED_EVENTS: &str = "No other events coming up right now.";
pub const NO_RECENT_ARTICLES: &str = "No other articles available.";
pub const NO_RELATED_ARTICLES: &str = "No more articles available.";
pub const NO_ARTICLES: &str = "No articles found. Check back later for new stories!";

/// A cross-link card.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkCard {
    pub title: String,
    pub href: String,
    pub summary: Option<String>,
    pub image: Option<String>,
}

impl LinkCard {
    pub fn from_record(record: &impl Linkable) -> Self {
        Self {
            title: record.title().to_string(),
            href: record.path(),
            summary: record
                .summary()
                .map(|s| truncate_at_word_boundary(&strip_html(s), CARD_SUMMARY_CHARS)),
            image: record.image().map(str::to_string),
        }
    }

    fn from_article(article: &Article) -> Self {
        let mut card = Self::from_record(article);
        card.summary = article.description();
        card
    }
}

/// A titled group of cards with the text shown when it is empty.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkSection {
    pub heading: String,
    pub cards: Vec<LinkCard>,
    pub empty_message: String,
}

impl LinkSection {
    pub fn new(heading: impl Into<String>, cards: Vec<LinkCard>, empty: &str) -> Self {
        Self {
            heading: heading.into(),
            cards,
            empty_message: empty.to_string(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

/// One piece of page body.
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    /// Plain text paragraph.
    Text(String),
    /// Trusted HTML (article bodies written in the editor).
    Markup(String),
    /// Label/value facts such as dates and addresses.
    Facts(Vec<(String, String)>),
    Links(LinkSection),
    Questions(Vec<(String, String)>),
}

/// Whether the page resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageStatus {
    Found,
    NotFound,
}

/// A fully composed page, ready for rendering.
#[derive(Debug, Clone)]
pub struct PageModel {
    pub status: PageStatus,
    pub path: String,
    pub heading: String,
    pub tagline: Option<String>,
    pub hero_image: Option<String>,
    pub blocks: Vec<Block>,
    pub meta: PageMeta,
}

impl PageModel {
    pub fn is_found(&self) -> bool {
        self.status == PageStatus::Found
    }

    /// Every link section on the page.
    pub fn sections(&self) -> impl Iterator<Item = &LinkSection> {
        self.blocks.iter().filter_map(|b| match b {
            Block::Links(section) => Some(section),
            _ => None,
        })
    }

    /// The link section with this heading.
    pub fn section(&self, heading: &str) -> Option<&LinkSection> {
        self.sections().find(|s| s.heading == heading)
    }
}

/// Siblings of `current` in random order, capped at `cap`.
pub fn sample_related<'a, T, R>(items: &'a [T], current: &str, cap: usize, rng: &mut R) -> Vec<&'a T>
where
    T: Linkable,
    R: Rng + ?Sized,
{
    let mut others: Vec<&T> = items.iter().filter(|i| i.slug() != current).collect();
    others.shuffle(rng);
    others.truncate(cap);
    others
}

/// Builds page models from the catalogs, the article store and site config.
#[derive(Clone)]
pub struct PageComposer {
    config: Arc<Config>,
    catalog: Arc<Catalog>,
    store: Arc<dyn ArticleStore>,
    resolver: SlugResolver,
}

impl PageComposer {
    pub fn new(config: Arc<Config>, catalog: Arc<Catalog>, store: Arc<dyn ArticleStore>) -> Self {
        let resolver = SlugResolver::new(Arc::clone(&catalog), Arc::clone(&store));
        Self {
            config,
            catalog,
            store,
            resolver,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn resolver(&self) -> &SlugResolver {
        &self.resolver
    }

    fn meta(&self) -> MetadataBuilder<'_> {
        MetadataBuilder::new(&self.config.site)
    }

    fn brand(&self, text: &str) -> String {
        pages::brand(text, &self.config.site.name)
    }

    /// Not-found page for a content kind, or a generic one.
    pub fn not_found(&self, kind: Option<ContentKind>, path: &str) -> PageModel {
        let meta = self.meta().not_found(kind);
        let noun = kind.map_or("page", |k| k.label());
        let back = match kind {
            Some(kind) => {
                let href = kind.route_prefix().to_string();
                vec![LinkCard {
                    title: format!("Browse all {}", listing_label(kind)),
                    href,
                    summary: None,
                    image: None,
                }]
            }
            None => Vec::new(),
        };
        PageModel {
            status: PageStatus::NotFound,
            path: path.to_string(),
            heading: format!("{noun} not found"),
            tagline: None,
            hero_image: None,
            blocks: vec![
                Block::Text(meta.description.clone()),
                Block::Links(LinkSection::new("Keep bouncing", back, "")),
            ],
            meta,
        }
    }

    /// A fixed informational page.
    pub fn static_page(&self, page: &StaticPage) -> PageModel {
        let mut blocks: Vec<Block> = page.body.iter().map(|p| Block::Text(self.brand(p))).collect();
        match page.schema {
            PageSchema::Faq => blocks.push(Block::Questions(
                pages::FAQS
                    .iter()
                    .map(|f| (f.question.to_string(), f.answer.to_string()))
                    .collect(),
            )),
            PageSchema::Offers => blocks.push(Block::Facts(
                pages::OFFERS
                    .iter()
                    .map(|o| (o.name.to_string(), o.description.to_string()))
                    .collect(),
            )),
            PageSchema::Home => {
                let activities = self
                    .catalog
                    .activities()
                    .iter()
                    .map(LinkCard::from_record)
                    .collect();
                let cities = self
                    .catalog
                    .cities()
                    .into_iter()
                    .map(city_card)
                    .collect();
                blocks.push(Block::Links(LinkSection::new(
                    "Activities",
                    activities,
                    NO_RELATED_ACTIVITIES,
                )));
                blocks.push(Block::Links(LinkSection::new(
                    "Find a park",
                    cities,
                    "No parks listed yet.",
                )));
            }
            _ => {}
        }

        PageModel {
            status: PageStatus::Found,
            path: page.path.to_string(),
            heading: self.brand(page.heading),
            tagline: (!page.tagline.is_empty()).then(|| self.brand(page.tagline)),
            hero_image: None,
            blocks,
            meta: self.meta().static_page(page),
        }
    }

    pub fn activities_listing(&self) -> PageModel {
        let activities = self.catalog.activities();
        let cards = activities.iter().map(LinkCard::from_record).collect();
        PageModel {
            status: PageStatus::Found,
            path: "/activities".to_string(),
            heading: "Activities".to_string(),
            tagline: Some("Defy gravity, your way.".to_string()),
            hero_image: None,
            blocks: vec![Block::Links(LinkSection::new(
                "All activities",
                cards,
                "No activities listed yet.",
            ))],
            meta: self.meta().activities_listing(activities),
        }
    }

    /// Activity page with a shuffled selection of sibling activities.
    pub fn activity<R: Rng + ?Sized>(&self, raw_slug: &str, rng: &mut R) -> PageModel {
        let path = ContentKind::Activity.path_for(raw_slug);
        let Resolution::Found(activity) = self.resolver.activity(raw_slug) else {
            return self.not_found(Some(ContentKind::Activity), &path);
        };

        let related = sample_related(
            self.catalog.activities(),
            &activity.slug,
            self.config.related.activities,
            rng,
        );
        debug!(slug = %activity.slug, related = related.len(), "composed activity page");

        PageModel {
            status: PageStatus::Found,
            path: activity.path(),
            heading: activity.title.clone(),
            tagline: Some("Defy gravity, your way!".to_string()),
            hero_image: activity.image().map(str::to_string),
            blocks: vec![
                Block::Text(activity.description.clone()),
                Block::Links(LinkSection::new(
                    "More Epic Bounces Await!",
                    related.into_iter().map(LinkCard::from_record).collect(),
                    NO_RELATED_ACTIVITIES,
                )),
            ],
            meta: self.meta().activity(activity),
        }
    }

    pub fn events_listing(&self) -> PageModel {
        let events = self.catalog.events();
        let cards = events.iter().map(LinkCard::from_record).collect();
        PageModel {
            status: PageStatus::Found,
            path: "/event".to_string(),
            heading: "Events".to_string(),
            tagline: Some("Themed nights, bounce-a-thons and more.".to_string()),
            hero_image: None,
            blocks: vec![Block::Links(LinkSection::new(
                "Upcoming events",
                cards,
                "No events scheduled right now.",
            ))],
            meta: self.meta().events_listing(events),
        }
    }

    pub fn event<R: Rng + ?Sized>(&self, raw_slug: &str, rng: &mut R) -> PageModel {
        let path = ContentKind::Event.path_for(raw_slug);
        let Resolution::Found(event) = self.resolver.event(raw_slug) else {
            return self.not_found(Some(ContentKind::Event), &path);
        };
        let park = self.catalog.park_for_event(event);

        let mut facts = vec![(
            "Date".to_string(),
            event
                .starts_at()
                .map_or_else(|| event.date.clone(), |d| d.format("%-d %B %Y").to_string()),
        )];
        if let Some(park) = park {
            facts.push(("Location suggestion".to_string(), park.city.clone()));
        }

        let mut blocks = vec![Block::Facts(facts), Block::Text(event.content.clone())];
        if let Some(park) = park {
            blocks.push(Block::Links(LinkSection::new(
                "Where to jump",
                vec![city_card(park)],
                "",
            )));
        }
        let related = sample_related(
            self.catalog.events(),
            &event.slug,
            self.config.related.events,
            rng,
        );
        blocks.push(Block::Links(LinkSection::new(
            "More events",
            related.into_iter().map(LinkCard::from_record).collect(),
            NO_RELATED_EVENTS,
        )));
        debug!(slug = %event.slug, park = park.is_some(), "composed event page");

        PageModel {
            status: PageStatus::Found,
            path: event.path(),
            heading: event.title.clone(),
            tagline: None,
            hero_image: event.image().map(str::to_string),
            blocks,
            meta: self.meta().event(event, park),
        }
    }

    pub fn locations_listing(&self) -> PageModel {
        let cities = self.catalog.cities();
        let cards = cities.iter().map(|p| city_card(p)).collect();
        PageModel {
            status: PageStatus::Found,
            path: "/location".to_string(),
            heading: "Locations".to_string(),
            tagline: Some("Find your nearest park.".to_string()),
            hero_image: None,
            blocks: vec![Block::Links(LinkSection::new(
                "Our cities",
                cards,
                "No parks listed yet.",
            ))],
            meta: self.meta().locations_listing(&cities),
        }
    }

    /// City page listing every park grouped under the slug.
    pub fn location(&self, raw_slug: &str) -> PageModel {
        let path = ContentKind::Location.path_for(raw_slug);
        let Resolution::Found(parks) = self.resolver.location(raw_slug) else {
            return self.not_found(Some(ContentKind::Location), &path);
        };
        let first = parks[0];

        let mut blocks = Vec::with_capacity(parks.len());
        for park in &parks {
            blocks.push(Block::Facts(vec![
                ("Park".to_string(), park.park_name.clone()),
                (
                    "Address".to_string(),
                    format!(
                        "{}, {}, {}",
                        park.address_street, park.address_city, park.address_postcode
                    ),
                ),
            ]));
            if !park.description.trim().is_empty() {
                blocks.push(Block::Text(park.description.clone()));
            }
        }
        debug!(slug = %first.slug, parks = parks.len(), "composed location page");

        PageModel {
            status: PageStatus::Found,
            path: first.path(),
            heading: format!("{} Locations", first.city),
            tagline: None,
            hero_image: first.image().map(str::to_string),
            blocks,
            meta: self.meta().location(&parks),
        }
    }

    async fn list_or_empty(&self, query: &ListQuery, feed: &str) -> Vec<Article> {
        match self.store.list(query).await {
            Ok(articles) => articles,
            Err(e) => {
                warn!(feed, error = %e, "article listing failed");
                Vec::new()
            }
        }
    }

    /// Most recently updated published articles other than `current`.
    pub async fn recent_articles(&self, current: &str) -> Vec<Article> {
        let query = ListQuery::published()
            .excluding(current)
            .order(SortOrder::UpdatedDesc)
            .limit(self.config.related.articles);
        self.list_or_empty(&query, "recent").await
    }

    /// Least recently updated published articles other than `current`.
    pub async fn related_articles(&self, current: &str) -> Vec<Article> {
        let query = ListQuery::published()
            .excluding(current)
            .order(SortOrder::UpdatedAsc)
            .limit(self.config.related.articles);
        self.list_or_empty(&query, "related").await
    }

    /// Published articles, newest first.
    pub async fn blog_articles(&self, limit: usize) -> Vec<Article> {
        let query = ListQuery::published()
            .order(SortOrder::CreatedDesc)
            .limit(limit);
        self.list_or_empty(&query, "listing").await
    }

    /// Every published article, for the sitemap.
    pub async fn published_articles(&self) -> Vec<Article> {
        let query = ListQuery::published().order(SortOrder::UpdatedDesc);
        self.list_or_empty(&query, "sitemap").await
    }

    pub async fn blog_listing(&self) -> PageModel {
        let articles = self.blog_articles(self.config.blog.listing_limit).await;
        let cards = articles.iter().map(LinkCard::from_article).collect();
        PageModel {
            status: PageStatus::Found,
            path: "/blog".to_string(),
            heading: "Latest Articles".to_string(),
            tagline: None,
            hero_image: None,
            blocks: vec![Block::Links(LinkSection::new("Articles", cards, NO_ARTICLES))],
            meta: self.meta().blog_listing(&articles),
        }
    }

    /// Published article with the recent and related sidebars.
    pub async fn article(&self, raw_slug: &str) -> PageModel {
        let path = ContentKind::Article.path_for(raw_slug);
        let Resolution::Found(article) = self.resolver.article(raw_slug).await else {
            return self.not_found(Some(ContentKind::Article), &path);
        };

        let recent = self.recent_articles(&article.slug).await;
        let related = self.related_articles(&article.slug).await;

        let mut facts = vec![(
            "Published".to_string(),
            article.created_at.format("%-d %B %Y").to_string(),
        )];
        if !article.category.trim().is_empty() {
            facts.push(("Category".to_string(), article.category.clone()));
        }
        let tags = article.tag_list();
        if !tags.is_empty() {
            facts.push(("Tags".to_string(), tags.join(", ")));
        }

        PageModel {
            status: PageStatus::Found,
            path: article.path(),
            heading: article.title.clone(),
            tagline: article.description(),
            hero_image: article.image().map(str::to_string),
            blocks: vec![
                Block::Facts(facts),
                Block::Markup(article.content.clone()),
                Block::Links(LinkSection::new(
                    "Recent Articles",
                    recent.iter().map(LinkCard::from_article).collect(),
                    NO_RECENT_ARTICLES,
                )),
                Block::Links(LinkSection::new(
                    "Related Articles",
                    related.iter().map(LinkCard::from_article).collect(),
                    NO_RELATED_ARTICLES,
                )),
            ],
            meta: self.meta().article(&article),
        }
    }
}

fn listing_label(kind: ContentKind) -> &'static str {
    match kind {
        ContentKind::Activity => "activities",
        ContentKind::Event => "events",
        ContentKind::Location => "locations",
        ContentKind::Article => "articles",
    }
}

fn city_card(park: &arena_core::Park) -> LinkCard {
    LinkCard {
        title: park.city.clone(),
        href: park.path(),
        summary: None,
        image: park.image().map(str::to_string),
    }
}
