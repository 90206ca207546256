//! Error types for alphagrow-morph

use thiserror::Error;

/// Errors that can occur during dilation
#[derive(Debug, Error)]
pub enum MorphError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] alphagrow_core::Error),

    /// Raster substrate error
    #[error("substrate error: {0}")]
    Layer(#[from] alphagrow_layer::LayerError),

    /// Invalid structuring element
    #[error("invalid structuring element: {0}")]
    InvalidSel(String),
}

/// Result type for dilation operations
pub type MorphResult<T> = Result<T, MorphError>;
