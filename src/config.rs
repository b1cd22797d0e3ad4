//! Configuration management for gigatile.
//!
//! Command-line arguments via clap, environment variables with the
//! `GIGATILE_` prefix, and defaults for everything optional.
//!
//! # Example
//!
//! ```ignore
//! use gigatile::config::Config;
//!
//! let config = Config::parse();
//! println!("Listening on {}:{}", config.host, config.port);
//! println!("Image: {}x{}", config.width, config.height);
//! ```
//!
//! # Environment Variables
//!
//! - `GIGATILE_HOST` - Server bind address (default: 0.0.0.0)
//! - `GIGATILE_PORT` - Server port (default: 3000)
//! - `GIGATILE_BASE_URL` - Base URL of the Gigapan tile tree (required)
//! - `GIGATILE_WIDTH` - Full-resolution image width in pixels (required)
//! - `GIGATILE_HEIGHT` - Full-resolution image height in pixels (required)
//! - `GIGATILE_TILE_SIZE` - Tile edge in pixels (default: 256)
//! - `GIGATILE_TOLERANCE` - Best-fit zoom tolerance (default: 0.8)
//! - `GIGATILE_CACHE_MAX_AGE` - HTTP cache max-age seconds (default: 3600)
//! - `GIGATILE_CORS_ORIGINS` - Allowed CORS origins, comma-separated

use clap::Parser;
use url::Url;

use crate::pyramid::{DEFAULT_TILE_SIZE, DEFAULT_TOLERANCE};

// =============================================================================
// Default Values
// =============================================================================

/// Default server host.
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default server port.
pub const DEFAULT_PORT: u16 = 3000;

/// Default HTTP cache max-age in seconds (1 hour).
pub const DEFAULT_CACHE_MAX_AGE: u32 = 3600;

// =============================================================================
// CLI Arguments
// =============================================================================

/// gigatile - Tile addressing service for Gigapan image pyramids.
///
/// Computes the zoom pyramid of a quadkey-tiled gigapixel image and serves
/// tile-path resolution, grid metadata, and best-fit zoom selection over a
/// small HTTP API. The tile JPEGs themselves are fetched by the viewer
/// directly from the tree under --base-url.
#[derive(Parser, Debug, Clone)]
#[command(name = "gigatile")]
#[command(author, version, about, long_about = None)]
pub struct Config {
    // =========================================================================
    // Server Configuration
    // =========================================================================
    /// Host address to bind the server to.
    #[arg(long, default_value = DEFAULT_HOST, env = "GIGATILE_HOST")]
    pub host: String,

    /// Port to listen on.
    #[arg(short, long, default_value_t = DEFAULT_PORT, env = "GIGATILE_PORT")]
    pub port: u16,

    // =========================================================================
    // Image Configuration
    // =========================================================================
    /// Base URL of the Gigapan Stitch tile tree (e.g. "http://host/tiles/").
    #[arg(long, env = "GIGATILE_BASE_URL")]
    pub base_url: String,

    /// Width of the full-resolution image in pixels.
    #[arg(long, env = "GIGATILE_WIDTH")]
    pub width: u32,

    /// Height of the full-resolution image in pixels.
    #[arg(long, env = "GIGATILE_HEIGHT")]
    pub height: u32,

    /// Tile edge in pixels.
    #[arg(long, default_value_t = DEFAULT_TILE_SIZE, env = "GIGATILE_TILE_SIZE")]
    pub tile_size: u32,

    /// Best-fit zoom tolerance, a fraction in (0, 1].
    ///
    /// The candidate level's image size is multiplied by this before being
    /// compared against the viewport, biasing the initial zoom toward a
    /// level that fits with margin.
    #[arg(long, default_value_t = DEFAULT_TOLERANCE, env = "GIGATILE_TOLERANCE")]
    pub tolerance: f64,

    // =========================================================================
    // HTTP Configuration
    // =========================================================================
    /// HTTP Cache-Control max-age in seconds for tile redirects.
    #[arg(long, default_value_t = DEFAULT_CACHE_MAX_AGE, env = "GIGATILE_CACHE_MAX_AGE")]
    pub cache_max_age: u32,

    /// Allowed CORS origins (comma-separated).
    ///
    /// If not specified, allows any origin.
    #[arg(long, env = "GIGATILE_CORS_ORIGINS", value_delimiter = ',')]
    pub cors_origins: Option<Vec<String>>,

    // =========================================================================
    // Logging Configuration
    // =========================================================================
    /// Enable verbose logging (debug level).
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,

    /// Disable request tracing.
    #[arg(long, default_value_t = false)]
    pub no_tracing: bool,
}

impl Config {
    /// Validate the configuration and return an error message if invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.width == 0 {
            return Err("width must be a positive number of pixels".to_string());
        }
        if self.height == 0 {
            return Err("height must be a positive number of pixels".to_string());
        }
        if self.tile_size == 0 {
            return Err("tile_size must be a positive number of pixels".to_string());
        }

        if !(self.tolerance > 0.0 && self.tolerance <= 1.0) {
            return Err(format!(
                "tolerance must be in (0, 1], got {}",
                self.tolerance
            ));
        }

        if let Err(e) = Url::parse(&self.base_url) {
            return Err(format!("base_url is not a valid URL: {}", e));
        }

        Ok(())
    }

    /// The base URL with a trailing slash guaranteed.
    ///
    /// Tile paths are appended directly to this string, so a missing slash
    /// would silently corrupt every resolved URL.
    pub fn normalized_base_url(&self) -> String {
        if self.base_url.ends_with('/') {
            self.base_url.clone()
        } else {
            format!("{}/", self.base_url)
        }
    }

    /// Get the server bind address as "host:port".
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

// =============================================================================
// Tests
// =============================================================================
