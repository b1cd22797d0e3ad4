//! Gigapan Stitch storage-path resolution.
//!
//! Gigapan Stitch writes each tile pyramid as a quadkey-named JPEG tree. The
//! tile at `(col, row, zoom)` is named after its quadkey with the leading
//! digit dropped (that digit is the always-zero top-level bit, which the
//! stitcher omits), prefixed with `r`:
//!
//! - zoom 0 has a 0-digit name (`r.jpg`), zoom 1 a 1-digit name, and so on.
//!
//! Deep trees are sharded into folders derived from the file name. The first
//! folder takes the first two digits behind an `r` prefix; every later folder
//! is a 3-digit window whose start is pulled back one digit relative to
//! fixed-width chunking:
//!
//! ```text
//! rABCDEFG.jpg  ->  rAB/CDE/rABCDEFG.jpg
//! ```
//!
//! The pulled-back window is how the stitcher actually names folders, and an
//! existing tile tree can only be addressed by reproducing it digit-for-digit,
//! so it must not be normalized to plain 3-digit chunks.

use crate::quadkey;

/// File extension of every tile in a Gigapan tree.
pub const TILE_EXTENSION: &str = "jpg";

/// Resolve the storage URL of the tile at `(col, row, zoom)` under
/// `base_url`.
///
/// `base_url` is used verbatim and is expected to end with `/`. The function
/// is total: every coordinate yields a well-formed path, and identical inputs
/// always yield identical strings.
///
/// # Example
///
/// ```
/// use gigatile::gigapan;
///
/// assert_eq!(
///     gigapan::tile_url("http://host/", 5, 2, 3),
///     "http://host/r12/r121.jpg"
/// );
/// assert_eq!(gigapan::tile_url("http://host/", 0, 0, 0), "http://host/r.jpg");
/// ```
pub fn tile_url(base_url: &str, col: u32, row: u32, zoom: u8) -> String {
    let key = quadkey::encode(col, row, zoom);
    let base_name = &key[1..];
    format!(
        "{}{}r{}.{}",
        base_url,
        enclosing_folders(base_name),
        base_name,
        TILE_EXTENSION
    )
}

/// Compute the folder segments enclosing a tile file name.
///
/// One folder per complete 3-digit group of the name: group 0 is
/// `"r" + name[0..2] + "/"`, group `i > 0` is `name[i*3-1 .. i*3+2] + "/"`.
/// Names shorter than 3 digits have no folders.
pub fn enclosing_folders(base_name: &str) -> String {
    let mut folders = String::new();

    for i in 0..base_name.len() / 3 {
        if i == 0 {
            folders.push('r');
            folders.push_str(&base_name[0..2]);
        } else {
            folders.push_str(&base_name[i * 3 - 1..i * 3 + 2]);
        }
        folders.push('/');
    }

    folders
}
