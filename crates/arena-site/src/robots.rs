//! robots.txt generation.

use std::{fs, path::Path};

use arena_core::SiteConfig;
use tracing::info;

use crate::error::Result;

/// Paths crawlers are asked to skip.
pub const DISALLOW: &[&str] = &["/editeur"];

/// robots.txt generator.
#[derive(Debug)]
pub struct RobotsGenerator {
    site: SiteConfig,
}

impl RobotsGenerator {
    #[must_use]
    pub fn new(site: SiteConfig) -> Self {
        Self { site }
    }

    pub fn generate(&self) -> String {
        let mut out = String::from("User-agent: *\n");
        for path in DISALLOW {
            out.push_str(&format!("Disallow: {path}\n"));
        }
        out.push_str("Allow: /\n");
        out.push_str(&format!("Sitemap: {}\n", self.site.url_for("/sitemap.xml")));
        out
    }

    /// Write `robots.txt` into `output_dir`.
    pub fn write(&self, output_dir: &Path) -> Result<()> {
        info!("generating robots.txt");
        fs::write(output_dir.join("robots.txt"), self.generate())?;
        Ok(())
    }
}
