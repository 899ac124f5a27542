//! Site configuration management.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// Main configuration structure.
///
/// Loaded once at startup and handed to every component that renders or
/// links pages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Site-wide settings.
    pub site: SiteConfig,

    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Article store settings.
    #[serde(default)]
    pub store: StoreConfig,

    /// Static catalog settings.
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Cross-link caps.
    #[serde(default)]
    pub related: RelatedConfig,

    /// Blog listing and feed settings.
    #[serde(default)]
    pub blog: BlogConfig,
}

/// Global values injected into every page render.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Brand name used in titles and organization schema.
    pub name: String,

    /// Canonical origin (e.g., "https://jumparena.co.uk").
    pub domain: String,

    /// Default social-share image path.
    #[serde(default = "default_og_image")]
    pub og_image: String,

    /// Suffix appended to every page title.
    #[serde(default)]
    pub title_suffix: String,

    /// Open Graph locale.
    #[serde(default = "default_language")]
    pub language: String,

    /// Site description for the home page and fallbacks.
    #[serde(default)]
    pub description: Option<String>,

    /// Country code used in postal addresses.
    #[serde(default = "default_country")]
    pub country: String,

    /// Currency code used in offers.
    #[serde(default = "default_currency")]
    pub currency: String,
}

/// HTTP server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

/// Article store configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Database connection string.
    #[serde(default = "default_database_url")]
    pub database_url: String,

    /// Directory receiving uploaded images.
    #[serde(default = "default_upload_dir")]
    pub upload_dir: String,

    /// Public URL prefix for uploaded images.
    #[serde(default = "default_upload_url_prefix")]
    pub upload_url_prefix: String,
}

/// Static catalog configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Directory holding `activities.json`, `events.json` and `locations.json`.
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
}

/// Caps for related-content selection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelatedConfig {
    #[serde(default = "default_related_catalog")]
    pub activities: usize,

    #[serde(default = "default_related_catalog")]
    pub events: usize,

    #[serde(default = "default_related_articles")]
    pub articles: usize,
}

/// Blog configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlogConfig {
    /// Maximum number of articles on `/blog`.
    #[serde(default = "default_listing_limit")]
    pub listing_limit: usize,

    /// Maximum number of items in the RSS feed.
    #[serde(default = "default_feed_limit")]
    pub feed_limit: usize,
}

// Default value functions
fn default_og_image() -> String {
    "/og-image.jpg".to_string()
}

fn default_language() -> String {
    "en_GB".to_string()
}

fn default_country() -> String {
    "GB".to_string()
}

fn default_currency() -> String {
    "GBP".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_database_url() -> String {
    "sqlite://arena.db".to_string()
}

fn default_upload_dir() -> String {
    "public/uploads".to_string()
}

fn default_upload_url_prefix() -> String {
    "/uploads".to_string()
}

fn default_data_dir() -> String {
    "data".to_string()
}

fn default_related_catalog() -> usize {
    4
}

fn default_related_articles() -> usize {
    3
}

fn default_listing_limit() -> usize {
    10
}

fn default_feed_limit() -> usize {
    20
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            database_url: default_database_url(),
            upload_dir: default_upload_dir(),
            upload_url_prefix: default_upload_url_prefix(),
        }
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

impl Default for RelatedConfig {
    fn default() -> Self {
        Self {
            activities: default_related_catalog(),
            events: default_related_catalog(),
            articles: default_related_articles(),
        }
    }
}

impl Default for BlogConfig {
    fn default() -> Self {
        Self {
            listing_limit: default_listing_limit(),
            feed_limit: default_feed_limit(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(CoreError::config(format!(
                "Configuration file not found: {}",
                path.display()
            )));
        }

        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content).map_err(|e| match e {
            CoreError::Toml(e) => CoreError::config_with_source(
                format!("Failed to parse config file: {}", path.display()),
                e,
            ),
            other => other,
        })
    }

    /// Parse and validate configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration with `ARENA__SECTION__KEY` environment overrides.
    pub fn load_with_env(path: &Path) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::from(path))
            .add_source(config::Environment::with_prefix("ARENA").separator("__"))
            .build()?;

        let config: Config = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    fn validate(&self) -> Result<()> {
        if self.site.name.trim().is_empty() {
            return Err(CoreError::config("site.name cannot be empty"));
        }

        if self.site.domain.is_empty() {
            return Err(CoreError::config("site.domain cannot be empty"));
        }

        if !self.site.domain.starts_with("http://") && !self.site.domain.starts_with("https://") {
            return Err(CoreError::config(
                "site.domain must start with http:// or https://",
            ));
        }

        if self.site.domain.ends_with('/') {
            tracing::warn!("site.domain should not have a trailing slash");
        }

        Ok(())
    }
}

impl SiteConfig {
    /// Domain without a trailing slash.
    pub fn base_url(&self) -> &str {
        self.domain.trim_end_matches('/')
    }

    /// Get the full URL for a path.
    pub fn url_for(&self, path: &str) -> String {
        let path = path.trim_start_matches('/');
        format!("{}/{path}", self.base_url())
    }

    /// Absolute URL for an image reference; absolute inputs pass through.
    pub fn asset_url(&self, reference: &str) -> String {
        if reference.starts_with("http://") || reference.starts_with("https://") {
            reference.to_string()
        } else {
            self.url_for(reference)
        }
    }

    /// Append the configured suffix to a page title.
    pub fn title(&self, title: &str) -> String {
        format!("{title}{}", self.title_suffix)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn create_test_config() -> String {
        r#"
[site]
name = "JumpArena"
domain = "https://jumparena.co.uk"
og_image = "/images/og.jpg"
title_suffix = " | JumpArena UK"
language = "en_GB"

[server]
port = 8080

[store]
database_url = "sqlite://test.db"

[related]
activities = 3

[blog]
listing_limit = 5
"#
        .to_string()
    }

    #[test]
    fn test_load_config() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let config_path = dir.path().join("config.toml");
        let mut file = std::fs::File::create(&config_path).expect("create file");
        file.write_all(create_test_config().as_bytes())
            .expect("write");

        let config = Config::load(&config_path).expect("load config");

        assert_eq!(config.site.name, "JumpArena");
        assert_eq!(config.site.domain, "https://jumparena.co.uk");
        assert_eq!(config.site.og_image, "/images/og.jpg");
        assert_eq!(config.site.title_suffix, " | JumpArena UK");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.store.database_url, "sqlite://test.db");
        assert_eq!(config.related.activities, 3);
        assert_eq!(config.related.events, 4);
        assert_eq!(config.blog.listing_limit, 5);
    }

    #[test]
    fn test_config_defaults() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let config_path = dir.path().join("config.toml");
        let minimal_config = r#"
[site]
name = "Minimal"
domain = "https://example.com"
"#;
        std::fs::write(&config_path, minimal_config).expect("write");

        let config = Config::load(&config_path).expect("load config");

        assert_eq!(config.site.language, "en_GB");
        assert_eq!(config.site.country, "GB");
        assert_eq!(config.site.currency, "GBP");
        assert_eq!(config.site.title_suffix, "");
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.store.upload_url_prefix, "/uploads");
        assert_eq!(config.catalog.data_dir, "data");
        assert_eq!(config.related.articles, 3);
        assert_eq!(config.blog.feed_limit, 20);
    }

    #[test]
    fn test_url_for() {
        let site = SiteConfig {
            name: "Test".to_string(),
            domain: "https://example.com/".to_string(),
            og_image: default_og_image(),
            title_suffix: String::new(),
            language: default_language(),
            description: None,
            country: default_country(),
            currency: default_currency(),
        };

        assert_eq!(site.url_for("/activities/dodgeball"), "https://example.com/activities/dodgeball");
        assert_eq!(site.url_for("activities"), "https://example.com/activities");
        assert_eq!(site.url_for("/"), "https://example.com/");
        assert_eq!(site.asset_url("/img/a.jpg"), "https://example.com/img/a.jpg");
        assert_eq!(site.asset_url("https://cdn.example.com/a.jpg"), "https://cdn.example.com/a.jpg");
    }

    #[test]
    fn test_config_validation_empty_name() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let config_path = dir.path().join("config.toml");
        let config_content = r#"
[site]
name = ""
domain = "https://example.com"
"#;
        std::fs::write(&config_path, config_content).expect("write");

        let result = Config::load(&config_path);
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("name cannot be empty")
        );
    }

    #[test]
    fn test_config_validation_bad_domain() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let config_path = dir.path().join("config.toml");
        let config_content = r#"
[site]
name = "Test"
domain = "example.com"
"#;
        std::fs::write(&config_path, config_content).expect("write");

        let result = Config::load(&config_path);
        assert!(result.unwrap_err().to_string().contains("http"));
    }

    #[test]
    fn test_config_not_found() {
        let result = Config::load(Path::new("/nonexistent/config.toml"));
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("not found"));
    }
}
