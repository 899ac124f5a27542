//! Read-only catalogs of activities, events and park locations.
//!
//! Catalogs ship with the deployment as JSON fixtures and never change while
//! the process runs.

use std::{
    collections::{BTreeMap, HashSet},
    fs,
    path::Path,
};

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use tracing::info;

use crate::error::{CoreError, Result};

/// Fixture file names inside the catalog data directory.
pub const ACTIVITIES_FILE: &str = "activities.json";
pub const EVENTS_FILE: &str = "events.json";
pub const LOCATIONS_FILE: &str = "locations.json";

/// A bookable trampoline activity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    /// Lookup key, taken from the fixture's object key.
    #[serde(default)]
    pub slug: String,

    pub title: String,

    pub description: String,

    #[serde(default)]
    pub image: Option<String>,
}

/// SEO block carried by each event.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventMeta {
    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub keywords: String,
}

/// A dated event at one or more parks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub slug: String,

    pub title: String,

    /// Start date as written in the fixture (ISO-8601).
    pub date: String,

    /// Body text.
    #[serde(default)]
    pub content: String,

    #[serde(default)]
    pub image: Option<String>,

    #[serde(default)]
    pub meta: EventMeta,
}

impl Event {
    /// Parse the start date; date-only and naive values are read as UTC.
    pub fn starts_at(&self) -> Option<DateTime<Utc>> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(&self.date) {
            return Some(dt.with_timezone(&Utc));
        }
        if let Ok(naive) = NaiveDateTime::parse_from_str(&self.date, "%Y-%m-%dT%H:%M:%S") {
            return Some(naive.and_utc());
        }
        NaiveDate::parse_from_str(&self.date, "%Y-%m-%d")
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|naive| naive.and_utc())
    }
}

/// A single trampoline park. Several parks may share one city slug.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Park {
    pub park_id: String,

    pub park_name: String,

    /// City grouping slug used in `/location/{slug}`.
    pub slug: String,

    pub city: String,

    #[serde(default)]
    pub chain: Option<String>,

    pub address_street: String,

    pub address_city: String,

    pub address_postcode: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub photo_url: Option<String>,
}

#[derive(Deserialize)]
struct EventsFile {
    events: Vec<Event>,
}

/// All static catalogs of the deployment.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    activities: Vec<Activity>,
    events: Vec<Event>,
    parks: Vec<Park>,
}

impl Catalog {
    /// Build a catalog from already-decoded records.
    #[must_use]
    pub fn new(activities: Vec<Activity>, events: Vec<Event>, parks: Vec<Park>) -> Self {
        Self {
            activities,
            events,
            parks,
        }
    }

    /// Load all three fixtures from a data directory.
    pub fn load(dir: &Path) -> Result<Self> {
        let by_slug: BTreeMap<String, Activity> = read_json(&dir.join(ACTIVITIES_FILE))?;
        let activities = by_slug
            .into_iter()
            .map(|(slug, mut activity)| {
                activity.slug = slug;
                activity
            })
            .collect();

        let events = read_json::<EventsFile>(&dir.join(EVENTS_FILE))?.events;
        let parks: Vec<Park> = read_json(&dir.join(LOCATIONS_FILE))?;

        let catalog = Self::new(activities, events, parks);
        info!(
            activities = catalog.activities.len(),
            events = catalog.events.len(),
            parks = catalog.parks.len(),
            "catalog loaded"
        );
        Ok(catalog)
    }

    pub fn activities(&self) -> &[Activity] {
        &self.activities
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn parks(&self) -> &[Park] {
        &self.parks
    }

    /// Exact-match activity lookup.
    pub fn activity(&self, slug: &str) -> Option<&Activity> {
        self.activities.iter().find(|a| a.slug == slug)
    }

    /// Exact-match event lookup.
    pub fn event(&self, slug: &str) -> Option<&Event> {
        self.events.iter().find(|e| e.slug == slug)
    }

    /// All parks grouped under a city slug, in fixture order.
    pub fn parks_in(&self, city_slug: &str) -> Vec<&Park> {
        self.parks.iter().filter(|p| p.slug == city_slug).collect()
    }

    /// First park of each distinct city slug, in fixture order.
    pub fn cities(&self) -> Vec<&Park> {
        let mut seen = HashSet::new();
        self.parks
            .iter()
            .filter(|p| seen.insert(p.slug.as_str()))
            .collect()
    }

    /// The park an event is held at, if its title names a park city.
    ///
    /// Matches the first `-`-separated segment of the lowercased title
    /// against each park's lowercased city.
    pub fn park_for_event(&self, event: &Event) -> Option<&Park> {
        let title = event.title.to_lowercase();
        let needle = title.split('-').next().unwrap_or_default().trim();
        if needle.is_empty() {
            return None;
        }
        self.parks
            .iter()
            .find(|p| p.city.to_lowercase().contains(needle))
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = fs::read_to_string(path)
        .map_err(|e| CoreError::catalog(path, format!("cannot read file: {e}")))?;
    serde_json::from_str(&content).map_err(|e| CoreError::catalog(path, e.to_string()))
}
