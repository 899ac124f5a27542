//! Content kinds and the capability shared by every linkable record.

use serde::{Deserialize, Serialize};

use crate::{
    article::Article,
    catalog::{Activity, Event, Park},
};

/// Kind of routable content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    Activity,
    Event,
    Location,
    Article,
}

impl ContentKind {
    /// Route prefix for detail pages of this kind.
    pub fn route_prefix(&self) -> &'static str {
        match self {
            Self::Activity => "/activities",
            Self::Event => "/event",
            Self::Location => "/location",
            Self::Article => "/blog",
        }
    }

    /// Public path for a slug of this kind.
    pub fn path_for(&self, slug: &str) -> String {
        format!("{}/{}", self.route_prefix(), slug)
    }

    /// Human label used in not-found titles.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Activity => "Activity",
            Self::Event => "Event",
            Self::Location => "Location",
            Self::Article => "Article",
        }
    }
}

/// A record that can be resolved by slug, described and linked to.
pub trait Linkable {
    /// Kind of content, which fixes the route pattern.
    fn kind(&self) -> ContentKind;

    /// Slug the record is addressed by.
    fn slug(&self) -> &str;

    /// Display title.
    fn title(&self) -> &str;

    /// Short plain description, if the record carries one.
    fn summary(&self) -> Option<&str>;

    /// Own image reference, if any.
    fn image(&self) -> Option<&str>;

    /// Public path derived from the route pattern.
    fn path(&self) -> String {
        self.kind().path_for(self.slug())
    }
}

impl Linkable for Activity {
    fn kind(&self) -> ContentKind {
        ContentKind::Activity
    }

    fn slug(&self) -> &str {
        &self.slug
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn summary(&self) -> Option<&str> {
        non_empty(&self.description)
    }

    fn image(&self) -> Option<&str> {
        self.image.as_deref().and_then(non_empty)
    }
}

impl Linkable for Event {
    fn kind(&self) -> ContentKind {
        ContentKind::Event
    }

    fn slug(&self) -> &str {
        &self.slug
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn summary(&self) -> Option<&str> {
        non_empty(&self.meta.description).or_else(|| non_empty(&self.content))
    }

    fn image(&self) -> Option<&str> {
        self.image.as_deref().and_then(non_empty)
    }
}

impl Linkable for Park {
    fn kind(&self) -> ContentKind {
        ContentKind::Location
    }

    fn slug(&self) -> &str {
        &self.slug
    }

    fn title(&self) -> &str {
        &self.park_name
    }

    fn summary(&self) -> Option<&str> {
        non_empty(&self.description)
    }

    fn image(&self) -> Option<&str> {
        self.photo_url.as_deref().and_then(non_empty)
    }
}

impl Linkable for Article {
    fn kind(&self) -> ContentKind {
        ContentKind::Article
    }

    fn slug(&self) -> &str {
        &self.slug
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn summary(&self) -> Option<&str> {
        None
    }

    fn image(&self) -> Option<&str> {
        self.image_url.as_deref().and_then(non_empty)
    }
}

fn non_empty(s: &str) -> Option<&str> {
    let trimmed = s.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

/// Strip HTML tags from content.
pub fn strip_html(html: &str) -> String {
    let mut result = String::new();
    let mut in_tag = false;

    for c in html.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => result.push(c),
            _ => {}
        }
    }

    result
}

/// Truncate text at word boundary, respecting UTF-8 character boundaries.
pub fn truncate_at_word_boundary(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }

    let truncate_byte_idx = text
        .char_indices()
        .nth(max_chars)
        .map(|(idx, _)| idx)
        .unwrap_or(text.len());

    let truncated = &text[..truncate_byte_idx];

    if let Some(last_space_byte) = truncated.rfind(' ') {
        format!("{}...", &truncated[..last_space_byte])
    } else {
        format!("{truncated}...")
    }
}

/// Cut text at a fixed character count and mark the cut with `...`.
pub fn excerpt(text: &str, max_chars: usize) -> String {
    let cut: String = text.chars().take(max_chars).collect();
    format!("{cut}...")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn activity(image: Option<&str>) -> Activity {
        Activity {
            slug: "dodgeball".to_string(),
            title: "Dodgeball".to_string(),
            description: "Throw, dodge, bounce.".to_string(),
            image: image.map(str::to_string),
        }
    }

    #[test]
    fn test_route_paths() {
        assert_eq!(activity(None).path(), "/activities/dodgeball");
        assert_eq!(ContentKind::Event.path_for("halloween"), "/event/halloween");
        assert_eq!(ContentKind::Location.path_for("leeds"), "/location/leeds");
        assert_eq!(ContentKind::Article.path_for("hi"), "/blog/hi");
    }

    #[test]
    fn test_blank_image_is_absent() {
        assert!(activity(Some("  ")).image().is_none());
        assert_eq!(activity(Some("/a.jpg")).image(), Some("/a.jpg"));
    }

    #[test]
    fn test_strip_html() {
        assert_eq!(
            strip_html("<p>Hello <strong>World</strong></p>"),
            "Hello World"
        );
        assert_eq!(strip_html("No tags here"), "No tags here");
    }

    #[test]
    fn test_truncate_at_word_boundary() {
        let text = "Hello world this is a test";
        assert_eq!(truncate_at_word_boundary(text, 100), text);
        assert_eq!(truncate_at_word_boundary(text, 11), "Hello...");
        assert_eq!(truncate_at_word_boundary(text, 12), "Hello world...");
    }

    #[test]
    fn test_excerpt() {
        assert_eq!(excerpt("abcdef", 3), "abc...");
    }
}
