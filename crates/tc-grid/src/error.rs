//! Grid-subsystem error type.

use thiserror::Error;

use tc_core::TileId;

/// Errors produced by `tc-grid`.
#[derive(Debug, Error)]
pub enum GridError {
    #[error("tile {0} not found in grid")]
    TileNotFound(TileId),

    /// The grid has no walkable tile to place an agent on.
    #[error("no walkable tile found after {attempts} attempts")]
    NoWalkableTile { attempts: u32 },

    #[error("invalid grid layout: {0}")]
    Layout(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type GridResult<T> = Result<T, GridError>;
