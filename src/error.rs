//! Error types for grid construction and search setup.

use thiserror::Error;

/// Errors raised before a search starts. An exhausted search is not an error,
/// it is reported as `Ok(None)`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PathError {
    #[error("invalid collision map: {0}")]
    InvalidMap(String),

    #[error("({x}, {y}) is outside the {width}x{height} grid")]
    OutOfBounds {
        x: i32,
        y: i32,
        width: usize,
        height: usize,
    },
}

pub type Result<T> = std::result::Result<T, PathError>;
