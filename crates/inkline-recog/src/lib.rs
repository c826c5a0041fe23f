//! inkline-recog - Line segmentation and rule-based character recognition
//!
//! This crate turns a raster into recognized text:
//!
//! - **Line segmentation**: Find horizontal runs of ink-containing rows
//! - **Cell segmentation**: Tile each line with fixed-size character cells
//! - **Feature extraction**: Aspect ratio and ink count per cell
//! - **Classification**: Ordered decision list over the features
//!
//! # Quick Start
//!
//! ```no_run
//! use inkline_recog::{recognize, OcrOptions};
//! use inkline_core::{Pix, PixelDepth};
//!
//! let pix = Pix::new(200, 40, PixelDepth::Bit8).unwrap();
//! let result = recognize(&pix, &OcrOptions::default()).unwrap();
//! println!("{} lines: {:?}", result.lines.len(), result.text);
//! ```
//!
//! # Modules
//!
//! - [`lineseg`]: Text line segmentation
//! - [`cellseg`]: Character cell segmentation
//! - [`features`]: Per-cell feature extraction
//! - [`classify`]: Decision list classifier
//! - [`pipeline`]: End-to-end recognition
//! - [`reference`]: External OCR engine for reference text

pub mod cellseg;
pub mod classify;
mod error;
pub mod features;
pub mod lineseg;
pub mod pipeline;
pub mod reference;

pub use error::{RecogError, RecogResult};

// Re-export commonly used types
pub use cellseg::{CellSize, segment_cells};
pub use classify::{Classifier, Comparison, Condition, Feature, Label, Rule};
pub use features::{CellFeatures, FEATURE_COUNT, extract_features, feature_vector};
pub use lineseg::{LineSegOptions, TrailingLinePolicy, segment_lines};
pub use pipeline::{CellRecord, LineRecognition, OcrOptions, Recognition, recognize};
pub use reference::{ReferenceRecognizer, TesseractCli};

// Re-export core for convenience
pub use inkline_core;
