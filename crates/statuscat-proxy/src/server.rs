//! HTTP server wiring
//!
//! Every request goes through [`routes::dispatch`], which validates the key
//! before looking at the method.

use crate::config::Config;
use crate::error::Result;
use crate::routes;
use axum::{extract::DefaultBodyLimit, Router};
use file_image_cache::ImageCache;
use status_image_fetcher::ImageFetcher;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Shared state for the HTTP server
pub struct ServerState {
    pub cache: ImageCache,
    pub fetcher: ImageFetcher,
}

impl ServerState {
    pub fn new(cache: ImageCache, fetcher: ImageFetcher) -> Self {
        Self { cache, fetcher }
    }

    /// Build the cache and fetcher described by `config`
    pub fn from_config(config: &Config) -> Result<Self> {
        let cache = ImageCache::new(&config.cache_dir);
        let fetcher =
            ImageFetcher::with_timeout(config.upstream_url.as_str(), config.upstream_timeout())?;
        Ok(Self::new(cache, fetcher))
    }
}

pub type SharedState = Arc<ServerState>;

/// Create the HTTP router
pub fn create_router(state: SharedState) -> Router {
    Router::new()
        .fallback(routes::dispatch)
        .layer(DefaultBodyLimit::disable())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the HTTP server and run until a shutdown signal arrives.
///
/// The cache directory must already exist.
pub async fn start_server(state: SharedState, host: &str, port: u16) -> std::io::Result<()> {
    let router = create_router(state);

    let listener = tokio::net::TcpListener::bind((host, port)).await?;
    info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
