//! Per-cell feature extraction
//!
//! The feature vector has a fixed schema shared with the classifier:
//!
//! | index | feature |
//! |-------|---------|
//! | 0 | aspect ratio, `width / height` |
//! | 1 | ink pixel count inside the cell |

use crate::{RecogError, RecogResult};
use inkline_core::{Box, Pix, PixelDepth};
use tracing::debug;

/// Number of values in a feature vector
pub const FEATURE_COUNT: usize = 2;

/// Features of one character cell
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellFeatures {
    /// Cell width divided by cell height
    pub aspect_ratio: f64,
    /// Number of ink pixels inside the cell
    pub ink_count: u64,
}

impl CellFeatures {
    /// The features as a vector in schema order
    pub fn as_array(&self) -> [f64; FEATURE_COUNT] {
        [self.aspect_ratio, self.ink_count as f64]
    }
}

/// Check a raw vector against the schema and return it unchanged
///
/// Values are kept as given; a fractional ink count is compared as is.
///
/// # Errors
///
/// Returns [`RecogError::InvalidFeatureVector`] if `values` does not hold
/// exactly [`FEATURE_COUNT`] entries and [`RecogError::InvalidFeatureValue`]
/// for an entry that is negative or not finite.
pub fn feature_vector(values: &[f64]) -> RecogResult<[f64; FEATURE_COUNT]> {
    let vector: [f64; FEATURE_COUNT] =
        values.try_into().map_err(|_| RecogError::InvalidFeatureVector {
            expected: FEATURE_COUNT,
            actual: values.len(),
        })?;
    if let Some((index, &value)) = vector
        .iter()
        .enumerate()
        .find(|(_, v)| !v.is_finite() || **v < 0.0)
    {
        return Err(RecogError::InvalidFeatureValue { index, value });
    }
    Ok(vector)
}

/// Extract the feature vector of one cell
///
/// Every pixel of the cell is visited to count ink.
///
/// # Errors
///
/// Returns [`RecogError::InvalidGeometry`] when the cell has a
/// non-positive width or height or is not contained in the image, and
/// [`RecogError::UnsupportedDepth`] unless the image is 1 bpp.
pub fn extract_features(pix: &Pix, cell: &Box) -> RecogResult<CellFeatures> {
    let invalid = |reason| RecogError::InvalidGeometry {
        bounds: *cell,
        width: pix.width(),
        height: pix.height(),
        reason,
    };
    if cell.w <= 0 || cell.h <= 0 {
        return Err(invalid("non-positive extent"));
    }
    if !pix.bounds().contains_box(cell) {
        return Err(invalid("outside raster"));
    }
    if pix.depth() != PixelDepth::Bit1 {
        return Err(RecogError::UnsupportedDepth {
            expected: "1 bpp binary",
            actual: pix.depth().bits(),
        });
    }

    let features = CellFeatures {
        aspect_ratio: cell.w as f64 / cell.h as f64,
        ink_count: pix.count_pixels_in_rect(cell)?,
    };
    debug!(
        cell = %cell,
        aspect_ratio = features.aspect_ratio,
        ink_count = features.ink_count,
        "extracted cell features"
    );
    Ok(features)
}
