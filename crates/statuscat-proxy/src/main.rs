//! statuscat proxy - write-through cache for status-code images
//!
//! Serves `/<code>` from the local cache, filling it from the upstream on a
//! miss. PUT and DELETE manage entries directly.

use clap::Parser;
use statuscat_proxy::{start_server, Config, Result, ServerState, SharedState};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let env_filter = EnvFilter::from_default_env().add_directive("statuscat_proxy=info".parse()?);

    // Use JSON format for GCP Cloud Logging when LOG_FORMAT=json
    if std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false)
    {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_stackdriver::layer())
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    };

    // Invalid flags exit here with clap's usage message
    let config = Config::parse();

    info!("Starting statuscat proxy...");
    info!("Listen: {}", config.listen_addr());
    info!("Cache dir: {:?}", config.cache_dir);
    info!("Upstream: {}", config.upstream_url);

    let state = ServerState::from_config(&config)?;

    // The cache root must exist before the first request is accepted
    state.cache.init().await?;

    let state: SharedState = Arc::new(state);

    start_server(state, &config.host, config.port).await?;

    Ok(())
}
