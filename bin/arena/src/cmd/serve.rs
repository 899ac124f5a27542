//! Serve command - run the HTTP server

use std::{path::Path, sync::Arc};

use arena_core::{Catalog, Config};
use arena_store::{ArticleStore, MemoryArticleStore, SqliteArticleStore};
use color_eyre::eyre::{Result, WrapErr};
use tokio::net::TcpListener;

use crate::server::{AppState, create_router};

/// Where articles are kept.
pub async fn open_store(config: &Config, memory: bool) -> Result<Arc<dyn ArticleStore>> {
    if memory {
        tracing::warn!("using the in-memory article store; articles are lost on exit");
        return Ok(Arc::new(MemoryArticleStore::new()));
    }
    let store = SqliteArticleStore::connect(&config.store.database_url)
        .await
        .wrap_err_with(|| format!("Failed to open article store {}", config.store.database_url))?;
    Ok(Arc::new(store))
}

/// Run the serve command.
pub async fn run(
    config_path: &Path,
    host: Option<&str>,
    port: Option<u16>,
    memory: bool,
) -> Result<()> {
    tracing::info!(?config_path, ?host, ?port, memory, "Starting server");

    let mut config = Config::load_with_env(config_path).wrap_err("Failed to load configuration")?;
    if let Some(host) = host {
        config.server.host = host.to_string();
    }
    if let Some(port) = port {
        config.server.port = port;
    }

    let catalog =
        Catalog::load(Path::new(&config.catalog.data_dir)).wrap_err("Failed to load catalog")?;
    let store = open_store(&config, memory).await?;

    tokio::fs::create_dir_all(&config.store.upload_dir)
        .await
        .wrap_err_with(|| format!("Failed to create upload dir {}", config.store.upload_dir))?;

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let app = create_router(AppState::new(config, catalog, store));

    let listener = TcpListener::bind(&addr)
        .await
        .wrap_err_with(|| format!("Failed to bind to {addr}"))?;

    println!();
    println!("  Server running at http://{addr}");
    println!("  Press Ctrl+C to stop");
    println!();

    axum::serve(listener, app).await.wrap_err("Server error")?;

    Ok(())
}
