//! End-to-end addressing tests against the library API.
//!
//! These exercise the documented properties of the addressing core across
//! whole pyramids rather than single calls: pyramid shape, grid coverage,
//! quadkey round-trips, and storage-path structure.

use gigatile::{gigapan, quadkey, TileAddressor, TilePyramid};

// =============================================================================
// Pyramid Properties
// =============================================================================

#[test]
fn test_pyramid_shape_properties() {
    let cases = [
        (2000u32, 1500u32, 256u32),
        (46920, 33600, 256),
        (1024, 1024, 512),
        (300, 5000, 256),
        (257, 257, 256),
        (1, 1, 256),
    ];

    for (width, height, tile_size) in cases {
        let pyramid = TilePyramid::build(width, height, tile_size).unwrap();

        // Native level is the input size
        let native = pyramid.image_size(pyramid.max_zoom()).unwrap();
        assert_eq!((native.width, native.height), (width, height));

        // Level count is max_zoom + 1
        assert_eq!(pyramid.level_count(), pyramid.max_zoom() as usize + 1);

        for z in 0..pyramid.level_count() {
            let zoom = z as u8;
            let image = pyramid.image_size(zoom).unwrap();
            let grid = pyramid.grid_size(zoom).unwrap();

            // Dimensions never collapse to zero
            assert!(image.width >= 1 && image.height >= 1);

            // Grid is the ceil cover of the image
            assert_eq!(grid.columns, image.width.div_ceil(tile_size));
            assert_eq!(grid.rows, image.height.div_ceil(tile_size));
        }

        // Only the coarsest level fits in a single tile
        let coarsest = pyramid.image_size(0).unwrap();
        assert!(coarsest.width <= tile_size && coarsest.height <= tile_size);
    }
}

#[test]
fn test_each_level_halves_the_next() {
    let pyramid = TilePyramid::build(46920, 33600, 256).unwrap();

    for z in 0..pyramid.max_zoom() {
        let coarser = pyramid.image_size(z).unwrap();
        let finer = pyramid.image_size(z + 1).unwrap();

        assert_eq!(coarser.width, (finer.width / 2).max(1));
        assert_eq!(coarser.height, (finer.height / 2).max(1));
    }
}

#[test]
fn test_best_fit_zoom_fits_unless_forced_to_zero() {
    let pyramid = TilePyramid::build(46920, 33600, 256).unwrap();
    let tolerance = 0.8;

    for (vw, vh) in [(320, 240), (800, 600), (1920, 1080), (8000, 8000)] {
        let zoom = pyramid.best_fit_zoom(vw, vh, tolerance);
        if zoom > 0 {
            let image = pyramid.image_size(zoom).unwrap();
            assert!(image.width as f64 * tolerance < vw as f64);
            assert!(image.height as f64 * tolerance < vh as f64);
        }
    }
}

// =============================================================================
// QuadKey Properties
// =============================================================================

#[test]
fn test_quadkey_shape_over_grid() {
    let pyramid = TilePyramid::build(2000, 1500, 256).unwrap();

    for z in 0..pyramid.level_count() {
        let zoom = z as u8;
        let grid = pyramid.grid_size(zoom).unwrap();

        for col in 0..grid.columns {
            for row in 0..grid.rows {
                let key = quadkey::encode(col, row, zoom);

                assert_eq!(key.len(), zoom as usize + 1);
                assert!(key.chars().all(|c| ('0'..='3').contains(&c)));

                // In-bounds tiles always have a zero top-level digit
                assert!(key.starts_with('0'));

                // Decoding recovers the coordinate exactly
                assert_eq!(quadkey::decode(&key).unwrap(), (col, row, zoom));
            }
        }
    }
}

// =============================================================================
// Storage Paths
// =============================================================================

#[test]
fn test_tile_url_structure_over_grid() {
    let addressor =
        TileAddressor::new("http://host/panorama/", 46920, 33600, 256, 0.8).unwrap();

    for zoom in 0..=addressor.max_zoom() {
        let grid = addressor.pyramid().grid_size(zoom).unwrap();

        // Walk the grid corners plus the center tile
        let probes = [
            (0, 0),
            (grid.columns - 1, 0),
            (0, grid.rows - 1),
            (grid.columns - 1, grid.rows - 1),
            (grid.columns / 2, grid.rows / 2),
        ];

        for (col, row) in probes {
            let url = addressor.tile_url(col, row, zoom);

            let rest = url
                .strip_prefix("http://host/panorama/")
                .expect("url starts with the base");
            let rest = rest.strip_suffix(".jpg").expect("url ends with .jpg");

            // The path decomposes as folders + "r" + name, where the name is
            // the quadkey minus its leading digit and the folders are derived
            // from the name
            let name = &quadkey::encode(col, row, zoom)[1..];
            assert_eq!(
                rest,
                format!("{}r{}", gigapan::enclosing_folders(name), name)
            );
        }
    }
}

#[test]
fn test_tile_url_reference_examples() {
    let addressor = TileAddressor::new("http://host/", 2000, 1500, 256, 0.8).unwrap();

    assert_eq!(addressor.tile_url(5, 2, 3), "http://host/r12/r121.jpg");
    assert_eq!(addressor.tile_url(0, 0, 0), "http://host/r.jpg");
}

#[test]
fn test_distinct_tiles_get_distinct_urls() {
    let addressor = TileAddressor::new("http://host/", 46920, 33600, 256, 0.8).unwrap();
    let zoom = addressor.max_zoom();
    let grid = addressor.pyramid().grid_size(zoom).unwrap();

    let mut seen = std::collections::HashSet::new();
    for col in 0..grid.columns.min(16) {
        for row in 0..grid.rows.min(16) {
            assert!(seen.insert(addressor.tile_url(col, row, zoom)));
        }
    }
}

// =============================================================================
// Viewer Interface
// =============================================================================

#[test]
fn test_render_sizes_tile_the_level_exactly() {
    let addressor = TileAddressor::new("http://host/", 2000, 1500, 256, 0.8).unwrap();

    for zoom in 0..=addressor.max_zoom() {
        let image = addressor.pyramid().image_size(zoom).unwrap();
        let grid = addressor.pyramid().grid_size(zoom).unwrap();

        // Row of widths along the top edge sums to the image width
        let width_sum: u32 = (0..grid.columns)
            .map(|col| addressor.tile_render_size(col, 0, zoom).unwrap().0)
            .sum();
        assert_eq!(width_sum, image.width);

        // Column of heights along the left edge sums to the image height
        let height_sum: u32 = (0..grid.rows)
            .map(|row| addressor.tile_render_size(0, row, zoom).unwrap().1)
            .sum();
        assert_eq!(height_sum, image.height);
    }
}

#[test]
fn test_out_of_bounds_is_filtered_not_fatal() {
    let addressor = TileAddressor::new("http://host/", 2000, 1500, 256, 0.8).unwrap();

    // Coordinates a panning viewer would probe past the edges
    assert!(!addressor.is_tile_in_bounds(8, 0, 3));
    assert!(!addressor.is_tile_in_bounds(0, 6, 3));
    assert!(!addressor.is_tile_in_bounds(0, 0, 200));

    // The URL resolver stays total even for filtered coordinates
    let url = addressor.tile_url(8, 6, 3);
    assert!(url.ends_with(".jpg"));
}
