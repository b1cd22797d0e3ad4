use thiserror::Error;

/// Errors that can occur when building a tile pyramid
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PyramidError {
    /// Width, height, or tile size is not a positive integer
    #[error("Invalid {name}: must be a positive integer, got {value}")]
    InvalidDimension { name: &'static str, value: u32 },
}

/// Errors that can occur when decoding a quadkey string
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuadKeyError {
    /// Quadkeys always carry at least the level-0 digit
    #[error("Empty quadkey: expected at least one base-4 digit")]
    Empty,

    /// Longer keys would overflow 32-bit tile coordinates
    #[error("Quadkey too long: {length} digits (maximum is 32)")]
    TooLong { length: usize },

    /// Character outside '0'..'3'
    #[error("Invalid quadkey digit '{digit}' at position {position}")]
    InvalidDigit { digit: char, position: usize },
}
