//! Error types for region growing.

use thiserror::Error;

/// Result type for region growing operations.
pub type GrowResult<T> = Result<T, GrowError>;

/// Caller contract violations.
///
/// All of these are detected before the label grid is touched, so a failed
/// call never yields a partially grown grid.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GrowError {
    /// Mean and dispersion grids differ in shape.
    #[error("shape mismatch: mean is {mean:?}, dispersion is {dispersion:?}")]
    ShapeMismatch {
        /// (height, width) of the mean grid.
        mean: (usize, usize),
        /// (height, width) of the dispersion grid.
        dispersion: (usize, usize),
    },

    /// Label grid and mean grid differ in shape.
    #[error("shape mismatch: labels are {labels:?}, mean is {mean:?}")]
    LabelShapeMismatch {
        /// (height, width) of the label grid.
        labels: (usize, usize),
        /// (height, width) of the mean grid.
        mean: (usize, usize),
    },

    /// A seed lies outside the grid.
    #[error("seed {index} at ({row}, {col}) is outside the {height}x{width} grid")]
    SeedOutOfBounds {
        /// Position of the seed in the input list (0-based).
        index: usize,
        /// Seed row.
        row: usize,
        /// Seed column.
        col: usize,
        /// Grid height.
        height: usize,
        /// Grid width.
        width: usize,
    },

    /// Overwrite limit supplied as a negative number.
    #[error("overwrite limit must be non-negative, got {0}")]
    NegativeOverwriteLimit(i64),

    /// Tolerance is negative or NaN.
    #[error("tolerance must be a non-negative number, got {0}")]
    InvalidTolerance(f64),

    /// More seeds than a `u32` label can address.
    #[error("too many seeds: {count} exceeds the u32 label range")]
    TooManySeeds {
        /// Number of seeds supplied.
        count: usize,
    },

    /// Flat buffer length does not match the stated grid size (binding layers).
    #[error("{name} buffer has {actual} values, expected {expected}")]
    InvalidBuffer {
        /// Which buffer was malformed.
        name: &'static str,
        /// Values implied by width and height.
        expected: usize,
        /// Values actually supplied.
        actual: usize,
    },

    /// Width times height does not fit in `usize` (binding layers).
    #[error("grid of {width}x{height} cells is too large")]
    GridTooLarge {
        /// Stated grid width.
        width: usize,
        /// Stated grid height.
        height: usize,
    },

    /// Seed coordinates could not be decoded (binding layers).
    #[error("invalid seed array: {0}")]
    InvalidSeedArray(String),
}
