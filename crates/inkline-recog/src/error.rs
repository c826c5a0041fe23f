//! Error types for inkline-recog

use inkline_core::Box;
use thiserror::Error;

/// Errors that can occur during recognition operations
#[derive(Debug, Error)]
pub enum RecogError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] inkline_core::Error),

    /// Grayscale conversion or binarization error
    #[error("color error: {0}")]
    Color(#[from] inkline_color::ColorError),

    /// A cell rectangle handed to feature extraction is degenerate or
    /// lies outside the raster
    #[error("invalid geometry: cell {bounds} on {width}x{height} raster: {reason}")]
    InvalidGeometry {
        bounds: Box,
        width: u32,
        height: u32,
        reason: &'static str,
    },

    /// A feature vector does not match the classifier's schema
    #[error("invalid feature vector: expected {expected} values, got {actual}")]
    InvalidFeatureVector { expected: usize, actual: usize },

    /// A feature vector entry is not a finite, non-negative real
    #[error("invalid feature value at index {index}: {value}")]
    InvalidFeatureValue { index: usize, value: f64 },

    /// Unsupported pixel depth for this operation
    #[error("unsupported depth: expected {expected}, got {actual}")]
    UnsupportedDepth { expected: &'static str, actual: u32 },

    /// Invalid parameter provided
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// The external reference recognizer failed
    #[error("reference recognizer failed: {0}")]
    ReferenceFailed(String),
}

/// Result type for recognition operations
pub type RecogResult<T> = Result<T, RecogError>;
