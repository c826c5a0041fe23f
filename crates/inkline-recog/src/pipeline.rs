//! End-to-end recognition
//!
//! Runs grayscale conversion, binarization, line segmentation, cell
//! segmentation, feature extraction and classification in order. Each
//! stage consumes the previous stage's output and allocates its own; no
//! input is modified.

use crate::cellseg::{CellSize, segment_cells};
use crate::classify::{Classifier, Label};
use crate::features::{CellFeatures, extract_features};
use crate::lineseg::{LineSegOptions, segment_lines};
use crate::RecogResult;
use inkline_color::{DEFAULT_THRESHOLD, pix_convert_to_binary};
use inkline_core::{Box, Boxa, Pix};
use tracing::{debug, info};

/// Separator appended after every recognized line
pub const LINE_SEPARATOR: char = ' ';

/// Options for the full pipeline
#[derive(Debug, Clone, PartialEq)]
pub struct OcrOptions {
    /// Binarization threshold; luminance `<= threshold` is ink (default: 128)
    pub threshold: u8,
    /// Line segmentation options
    pub line: LineSegOptions,
    /// Character cell size
    pub cell: CellSize,
    /// Cell classifier
    pub classifier: Classifier,
}

impl Default for OcrOptions {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            line: LineSegOptions::default(),
            cell: CellSize::default(),
            classifier: Classifier::default(),
        }
    }
}

impl OcrOptions {
    /// Set the binarization threshold
    pub fn with_threshold(mut self, threshold: u8) -> Self {
        self.threshold = threshold;
        self
    }

    /// Set the line segmentation options
    pub fn with_line_options(mut self, line: LineSegOptions) -> Self {
        self.line = line;
        self
    }

    /// Set the cell size
    pub fn with_cell_size(mut self, cell: CellSize) -> Self {
        self.cell = cell;
        self
    }

    /// Set the classifier
    pub fn with_classifier(mut self, classifier: Classifier) -> Self {
        self.classifier = classifier;
        self
    }

    /// Validate all options
    pub fn validate(&self) -> RecogResult<()> {
        self.line.validate()?;
        self.cell.validate()
    }
}

/// Diagnostic record of one classified cell
#[derive(Debug, Clone, PartialEq)]
pub struct CellRecord {
    pub bounds: Box,
    pub features: CellFeatures,
    pub label: Label,
}

/// Cells of one text line, left to right
#[derive(Debug, Clone, PartialEq)]
pub struct LineRecognition {
    pub bounds: Box,
    pub cells: Vec<CellRecord>,
}

impl LineRecognition {
    /// The line's labels concatenated without separators
    pub fn text(&self) -> String {
        self.cells.iter().map(|c| c.label.as_str()).collect()
    }
}

/// Result of running the pipeline on one image
#[derive(Debug, Clone)]
pub struct Recognition {
    /// The binarized image (1 bpp, 1 = ink)
    pub binary: Pix,
    /// Line rectangles, top to bottom
    pub lines: Boxa,
    /// Per-line cell records, in the same order as `lines`
    pub line_results: Vec<LineRecognition>,
    /// Recognized text: each line's labels followed by [`LINE_SEPARATOR`]
    pub text: String,
}

impl Recognition {
    /// All labels in reading order
    pub fn labels(&self) -> impl Iterator<Item = &Label> {
        self.line_results
            .iter()
            .flat_map(|l| l.cells.iter().map(|c| &c.label))
    }

    /// All cell records in reading order
    pub fn cells(&self) -> impl Iterator<Item = &CellRecord> {
        self.line_results.iter().flat_map(|l| l.cells.iter())
    }

    /// Total number of cells
    pub fn cell_count(&self) -> usize {
        self.line_results.iter().map(|l| l.cells.len()).sum()
    }
}

/// Classify every cell of one line
pub fn recognize_line(
    binary: &Pix,
    line: &Box,
    options: &OcrOptions,
) -> RecogResult<LineRecognition> {
    let cells = segment_cells(line, options.cell)?;
    let mut records = Vec::with_capacity(cells.len());
    for cell in cells {
        let features = extract_features(binary, &cell)?;
        let label = options.classifier.classify(&features);
        debug!(
            cell = %cell,
            aspect_ratio = features.aspect_ratio,
            ink_count = features.ink_count,
            label = %label,
            "classified cell"
        );
        records.push(CellRecord {
            bounds: cell,
            features,
            label,
        });
    }
    Ok(LineRecognition {
        bounds: *line,
        cells: records,
    })
}

/// Join line results into the recognized text
pub fn join_lines(lines: &[LineRecognition]) -> String {
    lines
        .iter()
        .map(|line| format!("{}{}", line.text(), LINE_SEPARATOR))
        .collect()
}

/// Run the full pipeline on an image of any supported depth
///
/// # Errors
///
/// Returns [`crate::RecogError::InvalidParameter`] for invalid options
/// and [`crate::RecogError::InvalidGeometry`] if a cell falls outside the
/// image. An image without ink is not an error: it yields no lines and an
/// empty text.
pub fn recognize(pix: &Pix, options: &OcrOptions) -> RecogResult<Recognition> {
    options.validate()?;

    let binary = pix_convert_to_binary(pix, options.threshold)?;
    let lines = segment_lines(&binary, &options.line)?;

    let line_results = lines
        .iter()
        .map(|line| recognize_line(&binary, line, options))
        .collect::<RecogResult<Vec<_>>>()?;
    let text = join_lines(&line_results);

    let recognition = Recognition {
        binary,
        lines,
        line_results,
        text,
    };
    info!(
        width = pix.width(),
        height = pix.height(),
        lines = recognition.lines.len(),
        cells = recognition.cell_count(),
        "recognition complete"
    );
    Ok(recognition)
}
