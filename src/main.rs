//! gigatile - Tile addressing service for Gigapan image pyramids.
//!
//! This binary starts the HTTP server and configures all components.

use clap::Parser;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use gigatile::{
    config::Config,
    server::{create_router, RouterConfig},
    TileAddressor,
};

#[tokio::main]
async fn main() -> ExitCode {
    let config = Config::parse();

    // Initialize logging
    init_logging(config.verbose);

    // Validate configuration
    if let Err(e) = config.validate() {
        error!("Configuration error: {}", e);
        return ExitCode::FAILURE;
    }

    // Build the addressor; a bad dimension is fatal before we bind anything
    let addressor = match TileAddressor::new(
        config.normalized_base_url(),
        config.width,
        config.height,
        config.tile_size,
        config.tolerance,
    ) {
        Ok(addressor) => addressor,
        Err(e) => {
            error!("Failed to build tile pyramid: {}", e);
            return ExitCode::FAILURE;
        }
    };

    info!("Configuration:");
    info!("  Tile tree: {}", addressor.base_url());
    info!(
        "  Image: {}x{} px, {} px tiles",
        config.width, config.height, config.tile_size
    );
    info!(
        "  Pyramid: {} levels (max zoom {})",
        addressor.pyramid().level_count(),
        addressor.max_zoom()
    );
    info!("  Best-fit tolerance: {}", config.tolerance);

    // Build router
    let router_config = build_router_config(&config);
    let router = create_router(addressor, router_config);

    // Bind and serve
    let addr = config.bind_address();

    info!("");
    info!("Server listening on: http://{}", addr);
    info!("");
    info!("Try these endpoints:");
    info!("  curl http://{}/health", addr);
    info!("  curl http://{}/metadata", addr);
    info!("  curl http://{}/fit?width=1280&height=800", addr);
    info!("  curl -i http://{}/tiles/0/0/0.jpg", addr);
    info!("");

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Failed to bind to {}: {}", addr, e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = axum::serve(listener, router).await {
        error!("Server error: {}", e);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

/// Initialize the tracing/logging subsystem.
fn init_logging(verbose: bool) {
    let env_filter = if verbose {
        "gigatile=debug,tower_http=debug"
    } else {
        "gigatile=info,tower_http=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| env_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Build RouterConfig from the application Config.
fn build_router_config(config: &Config) -> RouterConfig {
    let mut router_config =
        RouterConfig::default().with_cache_max_age(config.cache_max_age);

    if let Some(ref origins) = config.cors_origins {
        router_config = router_config.with_cors_origins(origins.clone());
    }

    router_config.with_tracing(!config.no_tracing)
}
