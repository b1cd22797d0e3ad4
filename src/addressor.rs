//! Tile addressing facade for viewer integrations.
//!
//! [`TileAddressor`] bundles the level pyramid, the tile-tree base URL, and
//! the configured best-fit tolerance into the one object a map-viewer
//! integration holds. The viewer calls its pure functions (by composition,
//! not by subclassing a tile-layer type): resolve a tile URL, check grid
//! membership, size edge tiles, and pick the initial zoom and center for a
//! viewport. The addressor never touches the network and owns no tile
//! handles; tracking live tile elements stays with the viewer.

use crate::error::PyramidError;
use crate::gigapan;
use crate::pyramid::TilePyramid;

/// Initial placement of the view: the best-fit zoom for a viewport and the
/// pixel midpoint of that level's image. The viewer maps the midpoint into
/// its own coordinate system to center itself at startup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InitialView {
    /// Zoom level to open at
    pub zoom: u8,

    /// Horizontal image midpoint at that zoom, in pixels
    pub center_x: f64,

    /// Vertical image midpoint at that zoom, in pixels
    pub center_y: f64,
}

/// Addressing component for one quadkey-tiled gigapixel image.
///
/// Built once from the image geometry and immutable afterwards; every method
/// is synchronous, allocation is limited to the returned URL strings, and
/// identical inputs always produce identical outputs.
#[derive(Debug, Clone)]
pub struct TileAddressor {
    pyramid: TilePyramid,
    base_url: String,
    tolerance: f64,
}

impl TileAddressor {
    /// Create an addressor for an image of `width` x `height` pixels tiled
    /// at `tile_size`, stored under `base_url`.
    ///
    /// `base_url` is expected to end with `/`; `tolerance` is the best-fit
    /// fraction in (0, 1] described at [`TilePyramid::best_fit_zoom`].
    ///
    /// # Errors
    ///
    /// Returns [`PyramidError::InvalidDimension`] when any of the pixel
    /// inputs is zero. Construction is the only fallible operation; callers
    /// should treat a failure here as fatal setup misconfiguration.
    pub fn new(
        base_url: impl Into<String>,
        width: u32,
        height: u32,
        tile_size: u32,
        tolerance: f64,
    ) -> Result<Self, PyramidError> {
        let pyramid = TilePyramid::build(width, height, tile_size)?;
        Ok(Self {
            pyramid,
            base_url: base_url.into(),
            tolerance,
        })
    }

    /// The underlying level pyramid.
    pub fn pyramid(&self) -> &TilePyramid {
        &self.pyramid
    }

    /// Base URL the tile tree is stored under.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Configured best-fit tolerance.
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// The finest zoom level.
    pub fn max_zoom(&self) -> u8 {
        self.pyramid.max_zoom()
    }

    /// Storage URL of the tile at `(col, row, zoom)`.
    ///
    /// Total over all coordinates; callers filter with
    /// [`is_tile_in_bounds`](Self::is_tile_in_bounds) before requesting.
    pub fn tile_url(&self, col: u32, row: u32, zoom: u8) -> String {
        gigapan::tile_url(&self.base_url, col, row, zoom)
    }

    /// True iff the coordinate addresses a tile inside the grid at `zoom`.
    pub fn is_tile_in_bounds(&self, col: u32, row: u32, zoom: u8) -> bool {
        self.pyramid.contains(col, row, zoom)
    }

    /// Pixel dimensions the tile renders at, or `None` out of bounds.
    pub fn tile_render_size(&self, col: u32, row: u32, zoom: u8) -> Option<(u32, u32)> {
        self.pyramid.tile_render_size(col, row, zoom)
    }

    /// Best-fit zoom for a viewport, using the configured tolerance.
    pub fn best_fit_zoom(&self, viewport_width: u32, viewport_height: u32) -> u8 {
        self.pyramid
            .best_fit_zoom(viewport_width, viewport_height, self.tolerance)
    }

    /// Initial zoom and center for a viewport.
    pub fn initial_view(&self, viewport_width: u32, viewport_height: u32) -> InitialView {
        let zoom = self.best_fit_zoom(viewport_width, viewport_height);
        // best_fit_zoom only returns levels the pyramid has
        let image = self.pyramid.image_size(zoom).expect("zoom within pyramid");

        InitialView {
            zoom,
            center_x: image.width as f64 / 2.0,
            center_y: image.height as f64 / 2.0,
        }
    }
}
