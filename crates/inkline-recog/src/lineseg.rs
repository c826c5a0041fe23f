//! Text line segmentation
//!
//! Finds horizontal text lines in a binary image by scanning rows top to
//! bottom. A row is ink-containing when at least one of its pixels is ink.
//! Each maximal run of ink-containing rows that is at least
//! `min_line_height` rows tall becomes one line rectangle spanning the full
//! image width.

use crate::{RecogError, RecogResult};
use inkline_core::{Box, Boxa, Pix, PixelDepth};

/// What to do with a run of ink rows that is still open at the last row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrailingLinePolicy {
    /// Discard the open run (baseline behaviour)
    #[default]
    Drop,
    /// Close the run at the bottom edge and emit it like any other line
    Flush,
}

/// Options for line segmentation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineSegOptions {
    /// Minimum line height in rows (default: 5)
    pub min_line_height: u32,
    /// Handling of a line that touches the bottom edge (default: Drop)
    pub trailing_line: TrailingLinePolicy,
}

impl Default for LineSegOptions {
    fn default() -> Self {
        Self {
            min_line_height: 5,
            trailing_line: TrailingLinePolicy::Drop,
        }
    }
}

impl LineSegOptions {
    /// Set the minimum line height
    pub fn with_min_line_height(mut self, height: u32) -> Self {
        self.min_line_height = height;
        self
    }

    /// Set the trailing line policy
    pub fn with_trailing_line(mut self, policy: TrailingLinePolicy) -> Self {
        self.trailing_line = policy;
        self
    }

    /// Validate the options
    pub fn validate(&self) -> RecogResult<()> {
        if self.min_line_height == 0 {
            return Err(RecogError::InvalidParameter(
                "min_line_height must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Scanner state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    Outside,
    InLine { start: u32 },
}

/// Segment a binary image into text lines
///
/// Returns the line rectangles ordered top to bottom. Rectangles are
/// disjoint, span the full image width and are each at least
/// `min_line_height` rows tall. An all-background image yields an empty
/// `Boxa`.
///
/// # Errors
///
/// Returns [`RecogError::UnsupportedDepth`] unless the image is 1 bpp, and
/// [`RecogError::InvalidParameter`] for a zero minimum line height.
pub fn segment_lines(pix: &Pix, options: &LineSegOptions) -> RecogResult<Boxa> {
    options.validate()?;
    if pix.depth() != PixelDepth::Bit1 {
        return Err(RecogError::UnsupportedDepth {
            expected: "1 bpp binary",
            actual: pix.depth().bits(),
        });
    }

    let width = pix.width() as i32;
    let min_height = options.min_line_height;
    let mut lines = Boxa::new();
    let mut state = ScanState::Outside;

    let close = |start: u32, end: u32, lines: &mut Boxa| {
        if end - start >= min_height {
            lines.push(Box::new_unchecked(
                0,
                start as i32,
                width,
                (end - start) as i32,
            ));
        }
    };

    for y in 0..pix.height() {
        let has_ink = pix.row_has_foreground(y);
        state = match (state, has_ink) {
            (ScanState::Outside, true) => ScanState::InLine { start: y },
            (ScanState::InLine { start }, false) => {
                close(start, y, &mut lines);
                ScanState::Outside
            }
            (s, _) => s,
        };
    }

    if let (ScanState::InLine { start }, TrailingLinePolicy::Flush) =
        (state, options.trailing_line)
    {
        close(start, pix.height(), &mut lines);
    }

    Ok(lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use inkline_core::PixMut;

    fn binary_with_bands(width: u32, height: u32, bands: &[(i32, i32)]) -> Pix {
        let mut pm = PixMut::new(width, height, PixelDepth::Bit1).unwrap();
        for &(y0, y1) in bands {
            pm.set_in_rect_arbitrary(&Box::new_unchecked(3, y0, 4, y1 - y0), 1)
                .unwrap();
        }
        pm.into()
    }

    #[test]
    fn test_options_default() {
        let opts = LineSegOptions::default();
        assert_eq!(opts.min_line_height, 5);
        assert_eq!(opts.trailing_line, TrailingLinePolicy::Drop);
        assert!(LineSegOptions::default().with_min_line_height(0).validate().is_err());
    }

    #[test]
    fn test_blank_image_has_no_lines() {
        let pix = Pix::new(100, 60, PixelDepth::Bit1).unwrap();
        let lines = segment_lines(&pix, &LineSegOptions::default()).unwrap();
        assert!(lines.is_empty());
    }

    #[test]
    fn test_single_band() {
        let pix = binary_with_bands(200, 40, &[(10, 18)]);
        let lines = segment_lines(&pix, &LineSegOptions::default()).unwrap();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines.get(0), Some(&Box::new_unchecked(0, 10, 200, 8)));
    }

    #[test]
    fn test_short_runs_are_discarded() {
        // 4-row run is noise, 5-row run is exactly the minimum
        let pix = binary_with_bands(50, 40, &[(2, 6), (10, 15), (20, 30)]);
        let lines = segment_lines(&pix, &LineSegOptions::default()).unwrap();
        let boxes: Vec<_> = lines.iter().map(|b| (b.y, b.h)).collect();
        assert_eq!(boxes, vec![(10, 5), (20, 10)]);
    }

    #[test]
    fn test_trailing_line_policy() {
        let pix = binary_with_bands(50, 30, &[(5, 12), (22, 30)]);

        let dropped = segment_lines(&pix, &LineSegOptions::default()).unwrap();
        assert_eq!(dropped.len(), 1);

        let opts = LineSegOptions::default().with_trailing_line(TrailingLinePolicy::Flush);
        let flushed = segment_lines(&pix, &opts).unwrap();
        assert_eq!(flushed.len(), 2);
        assert_eq!(flushed.get(1), Some(&Box::new_unchecked(0, 22, 50, 8)));

        // A trailing run shorter than the minimum is discarded even when flushed
        let pix = binary_with_bands(50, 30, &[(27, 30)]);
        assert!(segment_lines(&pix, &opts).unwrap().is_empty());
    }

    #[test]
    fn test_lines_disjoint_and_ordered() {
        let pix = binary_with_bands(64, 100, &[(0, 7), (7, 8), (9, 20), (40, 46), (60, 99)]);
        let lines = segment_lines(&pix, &LineSegOptions::default()).unwrap();
        assert_eq!(lines.len(), 4);
        for pair in lines.boxes().windows(2) {
            assert!(pair[0].bottom() < pair[1].y);
        }
        assert!(lines.iter().all(|b| b.h >= 5 && b.x == 0 && b.w == 64));
    }

    #[test]
    fn test_requires_binary() {
        let pix = Pix::new(10, 10, PixelDepth::Bit8).unwrap();
        assert!(matches!(
            segment_lines(&pix, &LineSegOptions::default()),
            Err(RecogError::UnsupportedDepth { actual: 8, .. })
        ));
    }
}
