//! Crate-wide error type.
//!
//! Traversal never fails; errors only come from configuring the grid,
//! placing obstacles and reading or writing map files.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SweepError {
    #[error("invalid grid dimension {rows}x{cols} (each side must be between 1 and {max})")]
    InvalidDimension { rows: i64, cols: i64, max: usize },

    #[error("cell ({x}, {y}) is outside the {rows}x{cols} grid")]
    OutOfBounds { x: usize, y: usize, rows: usize, cols: usize },

    #[error("obstacle ({x}, {y}) is outside the {rows}x{cols} grid")]
    OutOfRange { x: usize, y: usize, rows: usize, cols: usize },

    #[error("cannot access map file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("map file {path} is malformed: {reason}")]
    MalformedMap { path: PathBuf, reason: String },

    #[error("cannot serialize run report: {0}")]
    Report(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SweepError>;
