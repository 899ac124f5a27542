//! Sitemap command - write sitemap.xml and robots.txt

use std::{fs::File, io::BufWriter, path::Path, sync::Arc};

use arena_core::{Catalog, Config};
use arena_site::{PageComposer, RobotsGenerator, SitemapGenerator};
use chrono::Utc;
use color_eyre::eyre::{Result, WrapErr};

use super::serve::open_store;

/// Run the sitemap command.
pub async fn run(config_path: &Path, output: &Path, memory: bool) -> Result<()> {
    tracing::info!(?config_path, ?output, "Generating sitemap");

    let config = Config::load_with_env(config_path).wrap_err("Failed to load configuration")?;
    let catalog =
        Catalog::load(Path::new(&config.catalog.data_dir)).wrap_err("Failed to load catalog")?;
    let store = open_store(&config, memory).await?;

    let site = config.site.clone();
    let composer = PageComposer::new(Arc::new(config), Arc::new(catalog), store);
    let articles = composer.published_articles().await;

    std::fs::create_dir_all(output)
        .wrap_err_with(|| format!("Failed to create output dir {}", output.display()))?;

    let path = output.join("sitemap.xml");
    let mut writer = BufWriter::new(
        File::create(&path).wrap_err_with(|| format!("Failed to create {}", path.display()))?,
    );
    SitemapGenerator::new(site.clone())
        .write_to(composer.catalog(), &articles, Utc::now(), &mut writer)
        .wrap_err("Failed to write sitemap")?;

    RobotsGenerator::new(site)
        .write(output)
        .wrap_err("Failed to write robots.txt")?;

    println!("  ✓ Wrote {} and robots.txt", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_writes_both_files() {
        let dir = tempfile::tempdir().unwrap();
        let data = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../data");
        let config_path = dir.path().join("config.toml");
        std::fs::write(
            &config_path,
            format!(
                r#"
[site]
name = "JumpArena"
domain = "https://jumparena.co.uk"

[catalog]
data_dir = "{}"
"#,
                data.display()
            ),
        )
        .unwrap();
        let out = dir.path().join("public");

        run(&config_path, &out, true).await.unwrap();

        let sitemap = std::fs::read_to_string(out.join("sitemap.xml")).unwrap();
        assert!(sitemap.contains("<loc>https://jumparena.co.uk/location/leeds</loc>"));
        assert_eq!(sitemap.matches("/location/leeds<").count(), 1);
        let robots = std::fs::read_to_string(out.join("robots.txt")).unwrap();
        assert!(robots.contains("Sitemap: https://jumparena.co.uk/sitemap.xml"));
    }
}
