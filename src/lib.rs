//! # gigatile
//!
//! Tile addressing for quadtree-tiled gigapixel images, plus a small HTTP
//! service exposing it.
//!
//! Gigapan Stitch cuts a gigapixel panorama into a pyramid of 256-pixel JPEG
//! tiles named by quadkey and sharded into folders derived from the file
//! name. This library computes that addressing from nothing but the image's
//! pixel dimensions and the tile size: the zoom-level pyramid, the tile grid
//! per level, the best-fit zoom for a viewport, edge-tile render sizes, and
//! the storage URL of any tile coordinate. It never fetches a tile byte -
//! rendering, panning, and tile lifecycle belong to the map viewer consuming
//! the addressing.
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`pyramid`] - Zoom-level pyramid and tile-grid geometry
//! - [`quadkey`] - Base-4 quadkey encoding/decoding
//! - [`gigapan`] - Gigapan Stitch storage-path resolution
//! - [`addressor`] - Facade combining pyramid, base URL, and tolerance
//! - [`server`] - Axum-based HTTP API
//! - [`config`] - CLI and configuration types
//! - [`error`] - Error types
//!
//! ## Example
//!
//! ```rust
//! use gigatile::TileAddressor;
//!
//! let addressor = TileAddressor::new("http://host/tiles/", 2000, 1500, 256, 0.8).unwrap();
//!
//! assert_eq!(addressor.max_zoom(), 3);
//! assert!(addressor.is_tile_in_bounds(7, 5, 3));
//! assert_eq!(addressor.tile_url(5, 2, 3), "http://host/tiles/r12/r121.jpg");
//! ```

pub mod addressor;
pub mod config;
pub mod error;
pub mod gigapan;
pub mod pyramid;
pub mod quadkey;
pub mod server;

// Re-export commonly used types
pub use addressor::{InitialView, TileAddressor};
pub use config::Config;
pub use error::{PyramidError, QuadKeyError};
pub use pyramid::{GridSize, ImageSize, TilePyramid, DEFAULT_TILE_SIZE, DEFAULT_TOLERANCE};
pub use server::{create_router, AppState, RouterConfig};
