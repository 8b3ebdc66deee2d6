//! # Procedural Error Types
//!
//! All errors that can occur while building a heightfield.

use thiserror::Error;

/// Errors that can occur in heightfield generation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProceduralError {
    /// Grid width or depth is zero, or the cell count overflows.
    #[error("invalid grid dimensions {width}x{depth}: both must be positive and the cell count must fit in usize")]
    InvalidDimensions {
        /// Requested width.
        width: usize,
        /// Requested depth.
        depth: usize,
    },

    /// Height data does not match the grid dimensions.
    #[error("grid size mismatch: expected {expected} cells, got {actual}")]
    GridSizeMismatch {
        /// `width * depth`.
        expected: usize,
        /// Length of the supplied data.
        actual: usize,
    },
}

/// Result type for procedural operations.
pub type ProceduralResult<T> = Result<T, ProceduralError>;
