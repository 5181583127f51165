//! HTTP API for a showreel site and the client the suggestion box uses.
//!
//! Serves the flat record list the search box loads and the admin endpoint
//! that writes new posts into the content collection.

pub mod client;
mod handlers;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};

use crate::config::Config;

/// Shared application state for HTTP handlers
pub struct AppState {
    pub site_root: PathBuf,
    pub config: Config,
}

impl AppState {
    pub fn content_dir(&self) -> PathBuf {
        self.config.content_path(&self.site_root)
    }
}

/// Build the router for a site (used by `serve` and by tests)
pub fn app(site_root: PathBuf, config: Config) -> axum::Router {
    handlers::router(Arc::new(AppState { site_root, config }))
}

/// Run the HTTP server on the given port
pub async fn run_server(site_root: PathBuf, port: Option<u16>) -> Result<()> {
    let config_path = Config::config_path(&site_root);
    if !config_path.exists() {
        anyhow::bail!(
            "Showreel not initialized in {}. Run `showreel init` first.",
            site_root.display()
        );
    }

    let config = Config::load(&config_path).context("Failed to load config")?;
    let port = port.unwrap_or(config.server.port);
    let app = app(site_root, config);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Showreel HTTP server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    axum::serve(listener, app)
        .await
        .context("HTTP server error")?;

    Ok(())
}
