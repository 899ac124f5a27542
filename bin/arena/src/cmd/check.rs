//! Check command - validate configuration and catalog files

use std::{collections::HashSet, path::Path};

use arena_core::{Catalog, Config};
use color_eyre::eyre::{Result, bail};

/// Validation result.
#[derive(Debug, Default)]
struct ValidationResult {
    errors: Vec<String>,
    warnings: Vec<String>,
}

impl ValidationResult {
    fn add_error(&mut self, msg: impl Into<String>) {
        self.errors.push(msg.into());
    }

    fn add_warning(&mut self, msg: impl Into<String>) {
        self.warnings.push(msg.into());
    }

    fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Run the check command.
pub fn run(config_path: &Path, strict: bool) -> Result<()> {
    tracing::info!(?config_path, strict, "Checking configuration and catalog");

    let mut result = ValidationResult::default();

    println!("Checking configuration...");
    let config = match Config::load(config_path) {
        Ok(c) => {
            println!("  ✓ Configuration valid");
            Some(c)
        }
        Err(e) => {
            result.add_error(format!("Configuration error: {e}"));
            println!("  ✗ Configuration invalid: {e}");
            None
        }
    };

    if let Some(ref cfg) = config {
        println!("\nChecking configuration values...");
        check_config_values(cfg, &mut result);

        println!("\nChecking catalog...");
        match Catalog::load(Path::new(&cfg.catalog.data_dir)) {
            Ok(catalog) => {
                println!(
                    "  ✓ Loaded {} activities, {} events, {} parks",
                    catalog.activities().len(),
                    catalog.events().len(),
                    catalog.parks().len()
                );
                check_catalog(&catalog, &mut result);
            }
            Err(e) => {
                result.add_error(format!("Catalog error: {e}"));
                println!("  ✗ Catalog invalid: {e}");
            }
        }
    }

    println!();
    println!("Summary:");
    println!("  Errors:   {}", result.errors.len());
    println!("  Warnings: {}", result.warnings.len());

    if result.has_errors() {
        println!();
        println!("Errors:");
        for err in &result.errors {
            println!("  ✗ {err}");
        }
    }

    if result.has_warnings() {
        println!();
        println!("Warnings:");
        for warn in &result.warnings {
            println!("  ⚠ {warn}");
        }
    }

    if result.has_errors() {
        bail!("Validation failed with {} error(s)", result.errors.len());
    }

    if strict && result.has_warnings() {
        bail!(
            "Validation failed with {} warning(s) (strict mode)",
            result.warnings.len()
        );
    }

    println!();
    println!("✓ All checks passed");

    Ok(())
}

fn check_config_values(config: &Config, result: &mut ValidationResult) {
    if config.site.domain.ends_with('/') {
        result.add_warning("site.domain has a trailing slash");
    }

    if config.site.title_suffix.is_empty() {
        result.add_warning("site.title_suffix is empty; page titles will carry no brand");
    }

    if config.related.activities == 0 || config.related.events == 0 || config.related.articles == 0 {
        result.add_warning("a [related] cap is 0; cross-link sections will always be empty");
    }

    let uploads = Path::new(&config.store.upload_dir);
    if uploads.exists() && !uploads.is_dir() {
        result.add_error(format!(
            "Upload path exists but is not a directory: {}",
            config.store.upload_dir
        ));
    }

    println!("  ✓ Configuration values checked");
}

/// Duplicate slugs and ids are errors; missing photos and bad dates are
/// warnings.
fn check_catalog(catalog: &Catalog, result: &mut ValidationResult) {
    let mut seen = HashSet::new();
    for activity in catalog.activities() {
        if !seen.insert(activity.slug.as_str()) {
            result.add_error(format!("Duplicate activity slug: {}", activity.slug));
        }
    }

    let mut seen = HashSet::new();
    for event in catalog.events() {
        if !seen.insert(event.slug.as_str()) {
            result.add_error(format!("Duplicate event slug: {}", event.slug));
        }
        if event.starts_at().is_none() {
            result.add_warning(format!(
                "Event {} has an unreadable date: {}",
                event.slug, event.date
            ));
        }
    }

    let mut seen = HashSet::new();
    for park in catalog.parks() {
        if !seen.insert(park.park_id.as_str()) {
            result.add_error(format!("Duplicate park id: {}", park.park_id));
        }
        if park.photo_url.as_deref().is_none_or(|p| p.trim().is_empty()) {
            result.add_warning(format!("Park {} has no photo", park.park_id));
        }
    }
}
