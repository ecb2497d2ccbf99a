//! Error types for grid configuration and direct grid access.
//!
//! Carving never produces an error: out-of-range carve requests are clipped.

use thiserror::Error;

/// Minimum number of cells along each grid axis.
pub const MIN_GRID_DIMENSION: usize = 2;

#[derive(Debug, Error)]
pub enum TerrainError {
    #[error("grid dimensions {width}x{height} are invalid (each axis needs at least {MIN_GRID_DIMENSION} cells)")]
    InvalidDimension { width: usize, height: usize },

    #[error("cell ({x}, {z}) is outside the {width}x{height} grid")]
    OutOfBounds {
        x: i32,
        z: i32,
        width: usize,
        height: usize,
    },

    #[error("failed to parse terrain config: {0}")]
    Config(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, TerrainError>;
