//! Error type shared by the layout domain.

use serde::Serialize;
use thiserror::Error;

/// Reasons a layout request cannot be satisfied exactly.
///
/// Only [`LayoutError::InvalidViewport`] is ever returned as an `Err`.  The
/// other variants describe why the grid scorer had to fall back to a
/// best-effort layout and are carried inside [`crate::GridFit::BestEffort`].
#[derive(Debug, Clone, Error, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LayoutError {
    /// Width or height is zero, negative, or not a finite number.
    #[error("invalid viewport {width}x{height}: dimensions must be positive and finite")]
    InvalidViewport { width: f64, height: f64 },

    /// Padding, header and footer leave no room for the grid.
    #[error("no space for the grid: available area is {available_width}x{available_height}")]
    NoAvailableSpace {
        available_width: f64,
        available_height: f64,
    },

    /// Every candidate grid produces cells below the minimum tile size.
    #[error("no grid keeps tiles at or above {min_cell_width}x{min_cell_height}")]
    CellsBelowMinimum {
        min_cell_width: f64,
        min_cell_height: f64,
    },
}
