//! Router configuration for gigatile.
//!
//! This module defines the HTTP routes and applies the CORS and tracing
//! layers.
//!
//! # Route Structure
//!
//! ```text
//! /health                      - Health check
//! /metadata                    - Image and pyramid metadata
//! /tiles/{zoom}/{x}/{y}.jpg    - Tile redirect into the Gigapan tree
//! /fit?width=&height=          - Best-fit zoom for a viewport
//! ```
//!
//! # Example
//!
//! ```ignore
//! use gigatile::addressor::TileAddressor;
//! use gigatile::server::routes::{create_router, RouterConfig};
//!
//! let addressor = TileAddressor::new("http://host/tiles/", 46920, 33600, 256, 0.8)?;
//! let router = create_router(addressor, RouterConfig::default());
//!
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await?;
//! axum::serve(listener, router).await?;
//! ```

use std::time::Duration;

use axum::{routing::get, Router};
use http::header::CONTENT_TYPE;
use http::Method;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::handlers::{fit_handler, health_handler, metadata_handler, tile_handler, AppState};
use crate::addressor::TileAddressor;

// =============================================================================
// Router Configuration
// =============================================================================

/// Configuration for the HTTP router.
#[derive(Debug, Clone)]
pub struct RouterConfig {
    /// Allowed CORS origins (None = allow any origin)
    pub cors_origins: Option<Vec<String>>,

    /// Cache-Control max-age in seconds for tile redirects
    pub cache_max_age: u32,

    /// Whether to enable request tracing
    pub enable_tracing: bool,
}

impl Default for RouterConfig {
    /// Defaults: CORS allows any origin, cache max-age is 1 hour, tracing
    /// is enabled.
    fn default() -> Self {
        Self {
            cors_origins: None,
            cache_max_age: 3600,
            enable_tracing: true,
        }
    }
}

impl RouterConfig {
    /// Set specific allowed CORS origins.
    ///
    /// Pass an empty vec to disallow all cross-origin requests.
    pub fn with_cors_origins(mut self, origins: Vec<String>) -> Self {
        self.cors_origins = Some(origins);
        self
    }

    /// Set the Cache-Control max-age in seconds.
    pub fn with_cache_max_age(mut self, seconds: u32) -> Self {
        self.cache_max_age = seconds;
        self
    }

    /// Enable or disable request tracing.
    pub fn with_tracing(mut self, enabled: bool) -> Self {
        self.enable_tracing = enabled;
        self
    }
}

// =============================================================================
// Router Builder
// =============================================================================

/// Create the main application router.
///
/// This function builds the complete Axum router with the addressing
/// endpoints, CORS configuration, and optional request tracing.
pub fn create_router(addressor: TileAddressor, config: RouterConfig) -> Router {
    let app_state = AppState::with_cache_max_age(addressor, config.cache_max_age);

    let cors = build_cors_layer(&config);

    // Uses {filename} to capture both "{y}" and "{y}.jpg" formats
    let router = Router::new()
        .route("/health", get(health_handler))
        .route("/metadata", get(metadata_handler))
        .route("/tiles/{zoom}/{x}/{filename}", get(tile_handler))
        .route("/fit", get(fit_handler))
        .with_state(app_state)
        .layer(cors);

    if config.enable_tracing {
        router.layer(TraceLayer::new_for_http())
    } else {
        router
    }
}

/// Build the CORS layer based on configuration.
fn build_cors_layer(config: &RouterConfig) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::HEAD, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(86400)); // 24 hours

    match &config.cors_origins {
        None => cors.allow_origin(Any),
        Some(origins) if origins.is_empty() => {
            // No origins allowed - this effectively disables CORS
            cors
        }
        Some(origins) => {
            let parsed_origins: Vec<_> = origins.iter().filter_map(|o| o.parse().ok()).collect();
            cors.allow_origin(parsed_origins)
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
