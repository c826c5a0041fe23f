//! inkline - Rudimentary self-contained optical character recognition
//!
//! A single raster goes through five stages:
//!
//! 1. grayscale conversion ([`color::pix_convert_to_gray`])
//! 2. fixed-threshold binarization ([`color::threshold_to_binary`])
//! 3. line segmentation ([`recog::segment_lines`])
//! 4. cell segmentation and feature extraction ([`recog::segment_cells`],
//!    [`recog::extract_features`])
//! 5. decision list classification ([`recog::Classifier`])
//!
//! [`recog::recognize`] runs all of them.
//!
//! # Example
//!
//! ```
//! use inkline::recog::{OcrOptions, recognize};
//! use inkline::{Box, PixMut, PixelDepth};
//!
//! // A white page with one black band
//! let mut page = PixMut::new(200, 40, PixelDepth::Bit8).unwrap();
//! page.set_all_arbitrary(255);
//! page.set_in_rect_arbitrary(&Box::new_unchecked(0, 10, 200, 8), 0).unwrap();
//!
//! let result = recognize(&page.into(), &OcrOptions::default()).unwrap();
//! assert_eq!(result.lines.len(), 1);
//! assert_eq!(result.text, format!("{} ", "Unknown".repeat(20)));
//! ```

// Re-export core types (primary data structures used everywhere)
pub use inkline_core::*;

// Re-export domain crates as modules to avoid name conflicts
pub use inkline_color as color;
pub use inkline_io as io;
pub use inkline_recog as recog;
