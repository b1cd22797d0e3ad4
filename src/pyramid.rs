//! Zoom pyramid geometry for a quadtree-tiled image.
//!
//! A gigapixel image is served as a stack of resolution levels, each half the
//! linear size of the next finer one, down to a level that fits inside a
//! single tile. This module derives that stack from the full-resolution pixel
//! dimensions and a fixed tile edge, and answers the geometric questions a
//! viewer asks while driving it:
//!
//! - How many zoom levels are there, and how big is each?
//! - How many tile columns/rows cover a level?
//! - Is a requested tile coordinate inside the grid?
//! - What size does an edge tile render at?
//! - Which zoom best fits a given viewport?
//!
//! Everything here is computed once at construction and read-only afterwards.

use crate::error::PyramidError;

// =============================================================================
// Constants
// =============================================================================

/// Default tile edge in pixels.
pub const DEFAULT_TILE_SIZE: u32 = 256;

/// Default best-fit tolerance.
///
/// The candidate image size is multiplied by this fraction before being
/// compared against the viewport, so the initial view lands on a level that
/// fits with some margin rather than one that exactly overflows.
pub const DEFAULT_TOLERANCE: f64 = 0.8;

// =============================================================================
// ImageSize / GridSize
// =============================================================================

/// Pixel dimensions of the image at one pyramid level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageSize {
    /// Width in pixels
    pub width: u32,

    /// Height in pixels
    pub height: u32,
}

impl ImageSize {
    /// Create a new size.
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// The next-coarser level's size: both axes halved and floored.
    ///
    /// Each axis is clamped to a minimum of 1 pixel so extreme aspect ratios
    /// cannot degenerate to a zero dimension.
    fn halved(self) -> Self {
        Self {
            width: (self.width / 2).max(1),
            height: (self.height / 2).max(1),
        }
    }

    /// Tile-count dimensions covering this size: `ceil(dim / tile_size)`
    /// per axis.
    fn grid(self, tile_size: u32) -> GridSize {
        GridSize {
            columns: self.width.div_ceil(tile_size),
            rows: self.height.div_ceil(tile_size),
        }
    }

    /// True when both axes fit within a single tile.
    fn fits_in_tile(self, tile_size: u32) -> bool {
        self.width <= tile_size && self.height <= tile_size
    }
}

/// Tile-count dimensions (columns x rows) of one pyramid level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridSize {
    /// Number of tile columns
    pub columns: u32,

    /// Number of tile rows
    pub rows: u32,
}

// =============================================================================
// TilePyramid
// =============================================================================

/// The level pyramid of a quadtree-tiled image.
///
/// Level 0 is the coarsest (whole image inside one tile), `max_zoom` is the
/// native full resolution. Image and grid sizes are precomputed per level at
/// construction and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TilePyramid {
    tile_size: u32,
    image_sizes: Vec<ImageSize>,
    grid_sizes: Vec<GridSize>,
}

impl TilePyramid {
    /// Build the pyramid for an image of `width` x `height` pixels cut into
    /// `tile_size`-pixel tiles.
    ///
    /// Starts at full resolution and repeatedly halves (flooring) until both
    /// axes fit inside one tile; the levels are then ordered coarsest-first.
    /// An image that already fits in a single tile yields exactly one level.
    ///
    /// # Errors
    ///
    /// Returns [`PyramidError::InvalidDimension`] when `width`, `height`, or
    /// `tile_size` is zero.
    pub fn build(width: u32, height: u32, tile_size: u32) -> Result<Self, PyramidError> {
        if width == 0 {
            return Err(PyramidError::InvalidDimension {
                name: "width",
                value: width,
            });
        }
        if height == 0 {
            return Err(PyramidError::InvalidDimension {
                name: "height",
                value: height,
            });
        }
        if tile_size == 0 {
            return Err(PyramidError::InvalidDimension {
                name: "tile_size",
                value: tile_size,
            });
        }

        let mut size = ImageSize::new(width, height);
        let mut image_sizes = vec![size];

        while !size.fits_in_tile(tile_size) {
            size = size.halved();
            image_sizes.push(size);
        }

        // Finest level was pushed first; the pyramid is indexed coarsest-first.
        image_sizes.reverse();

        let grid_sizes = image_sizes.iter().map(|s| s.grid(tile_size)).collect();

        Ok(Self {
            tile_size,
            image_sizes,
            grid_sizes,
        })
    }

    /// Tile edge in pixels.
    pub fn tile_size(&self) -> u32 {
        self.tile_size
    }

    /// Number of levels in the pyramid.
    pub fn level_count(&self) -> usize {
        self.image_sizes.len()
    }

    /// The finest zoom level (native resolution). Level count is
    /// `max_zoom + 1`.
    pub fn max_zoom(&self) -> u8 {
        (self.image_sizes.len() - 1) as u8
    }

    /// Image dimensions at `zoom`, or `None` above `max_zoom`.
    pub fn image_size(&self, zoom: u8) -> Option<ImageSize> {
        self.image_sizes.get(zoom as usize).copied()
    }

    /// Grid dimensions at `zoom`, or `None` above `max_zoom`.
    pub fn grid_size(&self, zoom: u8) -> Option<GridSize> {
        self.grid_sizes.get(zoom as usize).copied()
    }

    /// True iff `(col, row)` addresses a tile inside the grid at `zoom`.
    ///
    /// Viewers routinely ask for coordinates past the grid edge while
    /// panning; those requests are filtered with this predicate rather than
    /// treated as errors.
    pub fn contains(&self, col: u32, row: u32, zoom: u8) -> bool {
        match self.grid_size(zoom) {
            Some(grid) => col < grid.columns && row < grid.rows,
            None => false,
        }
    }

    /// Pixel dimensions the tile at `(col, row, zoom)` renders at.
    ///
    /// Interior tiles are `tile_size` square. The last column renders at the
    /// horizontal remainder `width - tile_size * (columns - 1)` and the last
    /// row at the vertical remainder, so partial edge tiles are neither
    /// stretched nor leave gaps; the bottom-right corner tile gets both
    /// adjustments. Returns `None` for out-of-bounds coordinates.
    pub fn tile_render_size(&self, col: u32, row: u32, zoom: u8) -> Option<(u32, u32)> {
        if !self.contains(col, row, zoom) {
            return None;
        }

        let image = self.image_sizes[zoom as usize];
        let grid = self.grid_sizes[zoom as usize];

        let width = if col == grid.columns - 1 {
            image.width - self.tile_size * (grid.columns - 1)
        } else {
            self.tile_size
        };

        let height = if row == grid.rows - 1 {
            image.height - self.tile_size * (grid.rows - 1)
        } else {
            self.tile_size
        };

        Some((width, height))
    }

    /// The best zoom level for an initial view of the whole image inside a
    /// viewport of `viewport_width` x `viewport_height` pixels.
    ///
    /// Scans from `max_zoom` downward and returns the first (i.e. finest)
    /// level whose image, shrunk by `tolerance`, fits strictly inside the
    /// viewport on both axes. Falls back to level 0 when even the coarsest
    /// non-zero level overflows, so the whole image is visible on load
    /// whenever possible while preferring detail when it fits.
    pub fn best_fit_zoom(&self, viewport_width: u32, viewport_height: u32, tolerance: f64) -> u8 {
        let mut zoom = self.max_zoom();

        while zoom > 0 {
            let image = self.image_sizes[zoom as usize];
            if image.width as f64 * tolerance < viewport_width as f64
                && image.height as f64 * tolerance < viewport_height as f64
            {
                return zoom;
            }
            zoom -= 1;
        }

        zoom
    }
}

// =============================================================================
// Tests
// =============================================================================
