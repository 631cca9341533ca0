//! Error types for pixseg-region

use thiserror::Error;

/// Errors that can occur during region segmentation
#[derive(Debug, Error)]
pub enum RegionError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] pixseg_core::Error),

    /// Image dimensions cannot be turned into a pixel graph
    #[error("invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    /// Invalid parameters
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),

    /// Interactive merge was requested with nothing selected
    #[error("empty selection: select at least one region to merge")]
    EmptySelection,

    /// A selected coordinate lies outside the image
    #[error("selection out of bounds: ({x}, {y})")]
    SelectionOutOfBounds { x: u32, y: u32 },

    /// Report output failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for region operations
pub type RegionResult<T> = Result<T, RegionError>;
