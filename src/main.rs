// prompt2img - Caching URL-to-image gateway for Chutes AI backends

use anyhow::{bail, Result};
use clap::Parser;
use prompt2img::cache::ImageCache;
use prompt2img::chutes::ChutesClient;
use prompt2img::cli::{self, Args};
use prompt2img::config::{self, AppConfig};
use prompt2img::providers::ProviderRegistry;
use prompt2img::server::create_router;
use prompt2img::utils::logging;
use std::net::SocketAddr;
use tokio::signal;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Phase 1: Load configuration
    let config = AppConfig::load()?;

    // Phase 2: Initialize logging
    logging::init(&config.logging)?;

    // Phase 3: Management subcommands run and exit
    if let Some(command) = args.command {
        cli::run(command, config)?;
        return Ok(());
    }

    info!("Starting prompt2img v{}", env!("CARGO_PKG_VERSION"));

    // Phase 4: Validate the binding before serving
    if config.chutes.api_key.is_empty() {
        bail!("no API key configured; run `prompt2img set-key <key>` first");
    }
    if !config::is_valid_api_key(&config.chutes.api_key) {
        bail!("configured API key has an unrecognized format (expected cpk_/sk_ prefix, >= 20 chars)");
    }
    if config.chutes.model.is_empty() {
        bail!("no model configured; run `prompt2img set-model <model>` first");
    }

    let registry = ProviderRegistry::new(config.profiles.clone());
    match registry.lookup(&config.chutes.model) {
        Some(profile) => info!(
            "Serving model {} ({:?} profile)",
            config.chutes.model, profile.kind
        ),
        // Not fatal: the profile is resolved per request, so registering
        // it later fixes the gateway without a restart of this check.
        None => warn!(
            "Model {} has no provider profile; requests will fail until one is registered",
            config.chutes.model
        ),
    }

    // Phase 5: Prepare the cache directory and upstream client
    let cache = ImageCache::new(&config.cache.dir);
    cache.ensure_dir()?;
    info!(
        "Cache at {} ({} images)",
        config.cache.dir,
        cache.entry_count()
    );

    let client = ChutesClient::new(&config.chutes)?;

    // Phase 6: Build and start the HTTP server
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    let app = create_router(config, registry, cache, client);

    info!("Starting server on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    // Phase 7: Run server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down gracefully");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal");
        },
        _ = terminate => {
            info!("Received SIGTERM signal");
        },
    }
}
