//! inkline-color - Luminance and binarization stages
//!
//! - **Grayscale conversion** ([`colorspace`]): any raster to 8 bpp luminance
//! - **Thresholding** ([`threshold`]): 8 bpp luminance to a 1 bpp ink/background raster

pub mod colorspace;
pub mod error;
pub mod threshold;

// Re-export core types
pub use inkline_core;

pub use colorspace::{pix_convert_to_gray, rgb_to_gray};
pub use error::{ColorError, ColorResult};
pub use threshold::{DEFAULT_THRESHOLD, pix_convert_to_binary, threshold_to_binary};
