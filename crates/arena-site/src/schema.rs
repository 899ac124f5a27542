//! schema.org JSON-LD documents.
//!
//! Every builder reads the same fields the visible page renders, so the
//! structured data never diverges from the page.

use arena_core::{Activity, Article, Event, Park, SiteConfig, content::excerpt};
use chrono::{DateTime, Duration, SecondsFormat, Utc};
use serde_json::{Value, json};

use crate::pages::{self, Faq, Offer, PageSchema, StaticPage};

const CONTEXT: &str = "https://schema.org";

/// Assumed event length for `endDate`.
const EVENT_DURATION_HOURS: i64 = 2;

/// Event description length in listings.
const LISTING_EXCERPT_CHARS: usize = 150;

/// ISO-8601 timestamp with millisecond precision.
pub fn iso8601(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// The brand as an `Organization` node.
pub fn organization(site: &SiteConfig) -> Value {
    json!({
        "@type": "Organization",
        "name": site.name,
        "url": site.base_url(),
        "logo": site.asset_url(&site.og_image),
    })
}

fn postal_address(site: &SiteConfig, park: &Park) -> Value {
    json!({
        "@type": "PostalAddress",
        "streetAddress": park.address_street,
        "addressLocality": park.address_city,
        "postalCode": park.address_postcode,
        "addressCountry": site.country,
    })
}

fn image_or_default(site: &SiteConfig, image: Option<&str>) -> String {
    site.asset_url(image.unwrap_or(&site.og_image))
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

pub fn activity(site: &SiteConfig, activity: &Activity) -> Value {
    json!({
        "@context": CONTEXT,
        "@type": "CreativeWork",
        "name": activity.title,
        "url": site.url_for(&format!("/activities/{}", activity.slug)),
        "description": activity.description,
        "image": image_or_default(site, non_blank(&activity.image)),
        "provider": organization(site),
        "audience": {
            "@type": "Audience",
            "audienceType": "General Public",
        },
    })
}

/// `Event` node; the venue is the related park when one is known.
pub fn event(site: &SiteConfig, event: &Event, park: Option<&Park>) -> Value {
    let url = site.url_for(&format!("/event/{}", event.slug));
    let (start, end) = match event.starts_at() {
        Some(start) => (
            iso8601(&start),
            Some(iso8601(&(start + Duration::hours(EVENT_DURATION_HOURS)))),
        ),
        None => (event.date.clone(), None),
    };
    let location = match park {
        Some(park) => json!({
            "@type": "Place",
            "name": park.park_name,
            "address": postal_address(site, park),
        }),
        None => json!({ "@type": "VirtualLocation", "url": url }),
    };

    let mut doc = json!({
        "@context": CONTEXT,
        "@type": "Event",
        "name": event.title,
        "startDate": start,
        "description": event.content,
        "image": image_or_default(site, non_blank(&event.image)),
        "url": url,
        "location": location,
        "organizer": organization(site),
        "offers": {
            "@type": "Offer",
            "price": "varies",
            "priceCurrency": site.currency,
            "availability": "https://schema.org/InStock",
            "url": url,
            "validFrom": event.date,
        },
    });
    if let Some(end) = end {
        doc["endDate"] = Value::String(end);
    }
    doc
}

fn opening_hours() -> Value {
    json!([
        {
            "@type": "OpeningHoursSpecification",
            "dayOfWeek": ["Monday", "Tuesday", "Wednesday", "Thursday", "Friday"],
            "opens": "10:00",
            "closes": "20:00",
        },
        {
            "@type": "OpeningHoursSpecification",
            "dayOfWeek": ["Saturday", "Sunday"],
            "opens": "09:00",
            "closes": "21:00",
        },
    ])
}

/// One `LocalBusiness` per park.
pub fn local_business(site: &SiteConfig, park: &Park) -> Value {
    json!({
        "@context": CONTEXT,
        "@type": "LocalBusiness",
        "name": park.park_name,
        "description": park.description,
        "url": site.url_for(&format!("/location/{}", park.slug)),
        "image": image_or_default(site, non_blank(&park.photo_url)),
        "address": postal_address(site, park),
        "openingHoursSpecification": opening_hours(),
    })
}

fn posting(site: &SiteConfig, article: &Article) -> Value {
    json!({
        "@type": "BlogPosting",
        "headline": article.title,
        "image": image_or_default(site, non_blank(&article.image_url)),
        "description": article.description().unwrap_or_default(),
        "url": site.url_for(&article.path()),
        "datePublished": iso8601(&article.created_at),
        "dateModified": iso8601(&article.updated_at),
        "author": {
            "@type": "Organization",
            "name": site.name,
        },
    })
}

pub fn blog_posting(site: &SiteConfig, article: &Article) -> Value {
    let mut doc = posting(site, article);
    doc["@context"] = Value::String(CONTEXT.to_string());
    doc
}

pub fn activity_list(site: &SiteConfig, activities: &[Activity]) -> Value {
    let items: Vec<Value> = activities
        .iter()
        .enumerate()
        .map(|(i, a)| {
            json!({
                "@type": "ListItem",
                "position": i + 1,
                "item": {
                    "@type": "CreativeWork",
                    "name": a.title,
                    "description": a.description,
                    "url": site.url_for(&format!("/activities/{}", a.slug)),
                },
            })
        })
        .collect();
    json!({
        "@context": CONTEXT,
        "@type": "ItemList",
        "name": format!("{} Activities", site.name),
        "itemListElement": items,
    })
}

pub fn event_list(site: &SiteConfig, events: &[Event]) -> Value {
    let items: Vec<Value> = events
        .iter()
        .enumerate()
        .map(|(i, e)| {
            json!({
                "@type": "ListItem",
                "position": i + 1,
                "item": {
                    "@type": "Event",
                    "name": e.title,
                    "startDate": e.date,
                    "description": excerpt(&e.content, LISTING_EXCERPT_CHARS),
                    "url": site.url_for(&format!("/event/{}", e.slug)),
                    "organizer": organization(site),
                },
            })
        })
        .collect();
    json!({
        "@context": CONTEXT,
        "@type": "ItemList",
        "name": format!("{} Events", site.name),
        "itemListElement": items,
    })
}

/// `CollectionPage` with one `WebPage` per city.
pub fn location_collection(site: &SiteConfig, cities: &[&Park]) -> Value {
    let parts: Vec<Value> = cities
        .iter()
        .map(|p| {
            json!({
                "@type": "WebPage",
                "name": format!("{} Locations", p.city),
                "url": site.url_for(&format!("/location/{}", p.slug)),
            })
        })
        .collect();
    json!({
        "@context": CONTEXT,
        "@type": "CollectionPage",
        "name": format!("{} Locations", site.name),
        "url": site.url_for("/location"),
        "publisher": organization(site),
        "hasPart": parts,
    })
}

pub fn blog(site: &SiteConfig, description: &str, articles: &[Article]) -> Value {
    let posts: Vec<Value> = articles.iter().map(|a| posting(site, a)).collect();
    json!({
        "@context": CONTEXT,
        "@type": "Blog",
        "name": format!("{} Blog", site.name),
        "description": description,
        "url": site.url_for("/blog"),
        "publisher": organization(site),
        "blogPost": posts,
    })
}

fn faq_page(faqs: &[Faq]) -> Value {
    let entities: Vec<Value> = faqs
        .iter()
        .map(|f| {
            json!({
                "@type": "Question",
                "name": f.question,
                "acceptedAnswer": { "@type": "Answer", "text": f.answer },
            })
        })
        .collect();
    json!({
        "@context": CONTEXT,
        "@type": "FAQPage",
        "mainEntity": entities,
    })
}

fn offer_catalog(site: &SiteConfig, offers: &[Offer], description: &str) -> Value {
    let items: Vec<Value> = offers
        .iter()
        .map(|o| {
            json!({
                "@type": "Offer",
                "name": o.name,
                "description": o.description,
                "price": o.price,
                "priceCurrency": site.currency,
                "url": site.url_for("/offers"),
            })
        })
        .collect();
    json!({
        "@context": CONTEXT,
        "@type": "OfferCatalog",
        "name": format!("{} Special Offers", site.name),
        "description": description,
        "itemListElement": items,
        "provider": organization(site),
    })
}

/// Structured data for a fixed page.
pub fn static_page(site: &SiteConfig, page: &StaticPage) -> Value {
    let url = site.url_for(page.path);
    let name = pages::brand(page.title, &site.name);
    let description = pages::brand(page.description, &site.name);

    let node = |kind: &str| {
        json!({
            "@context": CONTEXT,
            "@type": kind,
            "name": name,
            "description": description,
            "url": url,
        })
    };

    match page.schema {
        PageSchema::Home => json!({
            "@context": CONTEXT,
            "@type": "WebSite",
            "name": site.name,
            "url": site.url_for("/"),
            "description": description,
            "publisher": organization(site),
        }),
        PageSchema::About => node("AboutPage"),
        PageSchema::Faq => faq_page(pages::FAQS),
        PageSchema::Offers => offer_catalog(site, pages::OFFERS, &description),
        PageSchema::Contact => {
            let mut doc = node("ContactPage");
            doc["mainEntity"] = organization(site);
            doc
        }
        PageSchema::Gallery => node("ImageGallery"),
        PageSchema::Franchise => {
            let mut doc = node("BusinessOpportunity");
            doc["provider"] = organization(site);
            doc
        }
        PageSchema::Landlords => node("RealEstateAgent"),
        PageSchema::Schools => node("EducationalOrganization"),
        PageSchema::VipParty => json!({
            "@context": CONTEXT,
            "@type": "Event",
            "name": name,
            "description": description,
            "url": url,
            "location": { "@type": "VirtualLocation", "url": url },
            "organizer": organization(site),
            "offers": {
                "@type": "Offer",
                "price": "12.50",
                "priceCurrency": site.currency,
                "url": url,
            },
        }),
        PageSchema::Booking => json!({
            "@context": CONTEXT,
            "@type": "WebSite",
            "name": name,
            "url": url,
            "potentialAction": {
                "@type": "ReserveAction",
                "target": { "@type": "EntryPoint", "urlTemplate": url },
                "result": { "@type": "Reservation", "name": "Trampoline session" },
            },
        }),
        PageSchema::Rules => json!({
            "@context": CONTEXT,
            "@type": "WebSite",
            "name": name,
            "url": url,
            "potentialAction": {
                "@type": "ReadAction",
                "target": url,
            },
        }),
        PageSchema::Legal => node("WebPage"),
    }
}
