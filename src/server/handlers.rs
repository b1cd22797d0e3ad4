//! HTTP request handlers for the gigatile addressing API.
//!
//! This module contains the Axum handlers for pyramid metadata, tile-path
//! resolution, best-fit zoom selection, and health checks.
//!
//! # Endpoints
//!
//! - `GET /metadata` - Image and pyramid metadata
//! - `GET /tiles/{zoom}/{x}/{y}.jpg` - Redirect to the tile's storage URL
//! - `GET /fit?width=&height=` - Best-fit zoom and center for a viewport
//! - `GET /health` - Health check endpoint

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::addressor::TileAddressor;

// =============================================================================
// Application State
// =============================================================================

/// Shared application state containing the tile addressor.
///
/// This is passed to all handlers via Axum's State extractor. The addressor
/// is built once at startup and read-only afterwards, so sharing is a plain
/// `Arc` with no locking.
#[derive(Clone)]
pub struct AppState {
    /// The addressing component for the configured image
    pub addressor: Arc<TileAddressor>,

    /// Cache-Control max-age in seconds for tile redirects
    pub cache_max_age: u32,
}

impl AppState {
    /// Create a new application state with the given addressor.
    pub fn new(addressor: TileAddressor) -> Self {
        Self {
            addressor: Arc::new(addressor),
            cache_max_age: 3600, // 1 hour default
        }
    }

    /// Create a new application state with custom cache max-age.
    pub fn with_cache_max_age(addressor: TileAddressor, cache_max_age: u32) -> Self {
        Self {
            addressor: Arc::new(addressor),
            cache_max_age,
        }
    }
}

// =============================================================================
// Request Parameters
// =============================================================================

/// Path parameters for tile requests.
///
/// Extracted from: `/tiles/{zoom}/{x}/{filename}`
/// where filename is `{y}` or `{y}.jpg`
#[derive(Debug, Deserialize)]
pub struct TilePathParams {
    /// Zoom level (0 = coarsest)
    pub zoom: u8,

    /// Tile column (0-indexed from left)
    pub x: u32,

    /// Tile row with optional .jpg extension (e.g. "0" or "0.jpg")
    pub filename: String,
}

impl TilePathParams {
    /// Parse the Y coordinate from the filename, stripping any .jpg extension.
    pub fn y(&self) -> Result<u32, std::num::ParseIntError> {
        let y_str = self.filename.strip_suffix(".jpg").unwrap_or(&self.filename);
        y_str.parse()
    }
}

/// Query parameters for the best-fit endpoint.
#[derive(Debug, Deserialize)]
pub struct FitQueryParams {
    /// Viewport width in pixels
    pub width: u32,

    /// Viewport height in pixels
    pub height: u32,
}

// =============================================================================
// Response Types
// =============================================================================

/// JSON error response returned for all error conditions.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error type identifier (e.g., "tile_out_of_bounds")
    pub error: String,

    /// Human-readable error message
    pub message: String,

    /// HTTP status code (included for convenience)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
}

impl ErrorResponse {
    /// Create a new error response.
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            status: None,
        }
    }

    /// Create a new error response with status code.
    pub fn with_status(
        error: impl Into<String>,
        message: impl Into<String>,
        status: StatusCode,
    ) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            status: Some(status.as_u16()),
        }
    }
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,

    /// Service version
    pub version: String,
}

/// Metadata for a single pyramid level.
#[derive(Debug, Serialize)]
pub struct LevelMetadataResponse {
    /// Zoom level (0 = coarsest)
    pub zoom: u8,

    /// Width of this level in pixels
    pub width: u32,

    /// Height of this level in pixels
    pub height: u32,

    /// Number of tile columns at this level
    pub columns: u32,

    /// Number of tile rows at this level
    pub rows: u32,
}

/// Response from the metadata endpoint.
#[derive(Debug, Serialize)]
pub struct MetadataResponse {
    /// Base URL of the Gigapan tile tree
    pub base_url: String,

    /// Width of the full-resolution image in pixels
    pub width: u32,

    /// Height of the full-resolution image in pixels
    pub height: u32,

    /// Tile edge in pixels
    pub tile_size: u32,

    /// Finest zoom level (level count is max_zoom + 1)
    pub max_zoom: u8,

    /// Metadata for each pyramid level, coarsest first
    pub levels: Vec<LevelMetadataResponse>,
}

/// Response from the best-fit endpoint.
#[derive(Debug, Serialize)]
pub struct FitResponse {
    /// Best-fit zoom level for the viewport
    pub zoom: u8,

    /// Horizontal image midpoint at that zoom, in pixels
    pub center_x: f64,

    /// Vertical image midpoint at that zoom, in pixels
    pub center_y: f64,
}

// =============================================================================
// Error Mapping
// =============================================================================

/// Request-level failures of the tile endpoint.
///
/// The addressing core treats out-of-range coordinates as filterable, not as
/// errors; at the HTTP boundary they surface as 404 so viewers that probe
/// past the grid edge get a cacheable miss instead of a bogus redirect.
#[derive(Debug)]
pub enum TileRequestError {
    /// Zoom level past the pyramid
    InvalidZoom { zoom: u8, max_zoom: u8 },

    /// Coordinates outside the grid at this zoom
    TileOutOfBounds {
        zoom: u8,
        x: u32,
        y: u32,
        columns: u32,
        rows: u32,
    },

    /// Row filename that does not parse as a number
    InvalidCoordinate { filename: String },
}

impl IntoResponse for TileRequestError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match &self {
            TileRequestError::InvalidZoom { zoom, max_zoom } => (
                StatusCode::NOT_FOUND,
                "invalid_zoom",
                format!("Invalid zoom: {} (valid range: 0-{})", zoom, max_zoom),
            ),

            TileRequestError::TileOutOfBounds {
                zoom,
                x,
                y,
                columns,
                rows,
            } => (
                StatusCode::NOT_FOUND,
                "tile_out_of_bounds",
                format!(
                    "Tile ({}, {}) at zoom {} is out of bounds (max: {}, {})",
                    x,
                    y,
                    zoom,
                    columns.saturating_sub(1),
                    rows.saturating_sub(1)
                ),
            ),

            TileRequestError::InvalidCoordinate { filename } => (
                StatusCode::BAD_REQUEST,
                "invalid_coordinate",
                format!("Invalid tile row: {:?}", filename),
            ),
        };

        // Edge probes are routine while panning; log at debug only
        debug!(
            error_type = error_type,
            status = status.as_u16(),
            "Tile request rejected: {}",
            message
        );

        let error_response = ErrorResponse::with_status(error_type, message, status);
        (status, Json(error_response)).into_response()
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// Handle tile requests.
///
/// # Endpoint
///
/// `GET /tiles/{zoom}/{x}/{y}.jpg` (the `.jpg` extension is optional)
///
/// # Response
///
/// - `302 Found`: `Location` set to the tile's URL in the Gigapan tree
/// - `404 Not Found`: zoom past the pyramid or coordinates outside the grid
/// - `400 Bad Request`: row segment that is not a number
///
/// # Headers
///
/// - `Location: {resolved tile URL}`
/// - `Cache-Control: public, max-age={cache_max_age}`
/// - `X-Tile-Render-Width` / `X-Tile-Render-Height`: pixel size the tile
///   renders at (smaller than the tile edge in the last column/row)
pub async fn tile_handler(
    State(state): State<AppState>,
    Path(params): Path<TilePathParams>,
) -> Result<Response, TileRequestError> {
    // Parse Y coordinate from filename (handles both "0" and "0.jpg")
    let y = params.y().map_err(|_| TileRequestError::InvalidCoordinate {
        filename: params.filename.clone(),
    })?;

    let addressor = &state.addressor;

    let grid = addressor
        .pyramid()
        .grid_size(params.zoom)
        .ok_or(TileRequestError::InvalidZoom {
            zoom: params.zoom,
            max_zoom: addressor.max_zoom(),
        })?;

    if !addressor.is_tile_in_bounds(params.x, y, params.zoom) {
        return Err(TileRequestError::TileOutOfBounds {
            zoom: params.zoom,
            x: params.x,
            y,
            columns: grid.columns,
            rows: grid.rows,
        });
    }

    let url = addressor.tile_url(params.x, y, params.zoom);
    let (render_width, render_height) = addressor
        .tile_render_size(params.x, y, params.zoom)
        .expect("in-bounds tile has a render size");

    let response = Response::builder()
        .status(StatusCode::FOUND)
        .header(header::LOCATION, url)
        .header(
            header::CACHE_CONTROL,
            format!("public, max-age={}", state.cache_max_age),
        )
        .header("X-Tile-Render-Width", render_width.to_string())
        .header("X-Tile-Render-Height", render_height.to_string())
        .body(axum::body::Body::empty())
        .unwrap();

    Ok(response)
}

/// Handle health check requests.
///
/// # Endpoint
///
/// `GET /health`
///
/// Always returns `200 OK` with the service status and version.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Handle metadata requests.
///
/// # Endpoint
///
/// `GET /metadata`
///
/// Returns the configured image geometry and the full level pyramid: per
/// level, the image size and the tile grid covering it. This is everything a
/// viewer needs to drive the tile endpoint.
pub async fn metadata_handler(State(state): State<AppState>) -> Json<MetadataResponse> {
    let addressor = &state.addressor;
    let pyramid = addressor.pyramid();

    let levels = (0..pyramid.level_count())
        .map(|z| {
            let zoom = z as u8;
            // Levels up to level_count always exist
            let image = pyramid.image_size(zoom).expect("level within pyramid");
            let grid = pyramid.grid_size(zoom).expect("level within pyramid");
            LevelMetadataResponse {
                zoom,
                width: image.width,
                height: image.height,
                columns: grid.columns,
                rows: grid.rows,
            }
        })
        .collect();

    let native = pyramid
        .image_size(pyramid.max_zoom())
        .expect("pyramid has a native level");

    Json(MetadataResponse {
        base_url: addressor.base_url().to_string(),
        width: native.width,
        height: native.height,
        tile_size: pyramid.tile_size(),
        max_zoom: pyramid.max_zoom(),
        levels,
    })
}

/// Handle best-fit requests.
///
/// # Endpoint
///
/// `GET /fit?width={viewport_width}&height={viewport_height}`
///
/// Returns the zoom level whose image best fits the viewport (with the
/// configured tolerance margin) and the pixel midpoint of that level, for
/// centering the initial view.
pub async fn fit_handler(
    State(state): State<AppState>,
    Query(query): Query<FitQueryParams>,
) -> Json<FitResponse> {
    let view = state.addressor.initial_view(query.width, query.height);

    Json(FitResponse {
        zoom: view.zoom,
        center_x: view.center_x,
        center_y: view.center_y,
    })
}

// =============================================================================
// Tests
// =============================================================================
