//! HTTP server layer for gigatile.
//!
//! This module exposes the addressing core over a small HTTP API: image and
//! pyramid metadata as JSON, tile-coordinate resolution as redirects into the
//! Gigapan tile tree, and best-fit zoom selection for a viewport.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │                     HTTP Layer                       │
//! │   GET /metadata     GET /tiles/{z}/{x}/{y}.jpg       │
//! │                                                      │
//! │  ┌──────────────┐        ┌─────────────────────────┐ │
//! │  │   handlers   │        │         routes          │ │
//! │  │  (requests)  │        │    (router config)      │ │
//! │  └──────────────┘        └─────────────────────────┘ │
//! └──────────────────────────────────────────────────────┘
//! ```

pub mod handlers;
pub mod routes;

pub use handlers::{
    fit_handler, health_handler, metadata_handler, tile_handler, AppState, ErrorResponse,
    FitQueryParams, FitResponse, HealthResponse, LevelMetadataResponse, MetadataResponse,
    TilePathParams,
};
pub use routes::{create_router, RouterConfig};
