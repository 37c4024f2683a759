//! Error types for volumap.

use thiserror::Error;

use crate::surface::SurfaceId;

/// The main error type for volumap operations.
#[derive(Error, Debug)]
pub enum VolumapError {
    /// Scalar data length does not match the grid dimensions.
    #[error("data size mismatch: expected {expected}, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },

    /// No scalar field exists at the given index.
    #[error("scalar field {0} not found")]
    FieldNotFound(usize),

    /// No surface is registered under the given id.
    #[error("surface {0} not found")]
    SurfaceNotFound(SurfaceId),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// A specialized Result type for volumap operations.
pub type Result<T> = std::result::Result<T, VolumapError>;
