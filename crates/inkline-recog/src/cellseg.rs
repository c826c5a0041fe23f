//! Character cell segmentation
//!
//! Tiles a line rectangle left to right with fixed-size cells. Cells never
//! overlap, leave no gaps, and are clipped to the line so the last cell
//! may be narrower and every cell is at most as tall as the line.

use crate::{RecogError, RecogResult};
use inkline_core::{Box, Boxa};

/// Fixed cell dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellSize {
    /// Cell width in pixels (default: 10)
    pub width: u32,
    /// Cell height in pixels (default: 20)
    pub height: u32,
}

impl Default for CellSize {
    fn default() -> Self {
        Self {
            width: 10,
            height: 20,
        }
    }
}

impl CellSize {
    /// Create a cell size
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Validate the cell size
    pub fn validate(&self) -> RecogResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(RecogError::InvalidParameter(format!(
                "cell size must be positive: {}x{}",
                self.width, self.height
            )));
        }
        Ok(())
    }
}

/// Segment a line into character cells
///
/// Cells start at the line's left edge and step right by `size.width`.
/// A line narrower than one cell still yields exactly one clipped cell; an
/// empty line yields none.
///
/// # Errors
///
/// Returns [`RecogError::InvalidParameter`] for a zero cell dimension.
pub fn segment_cells(line: &Box, size: CellSize) -> RecogResult<Boxa> {
    size.validate()?;
    if line.is_empty() {
        return Ok(Boxa::new());
    }

    let step = size.width as i32;
    let h = line.h.min(size.height as i32);
    let count = (line.w as u32).div_ceil(size.width) as usize;

    let mut cells = Boxa::with_capacity(count);
    let mut x = line.x;
    while x < line.right() {
        let w = step.min(line.right() - x);
        cells.push(Box::new_unchecked(x, line.y, w, h));
        x += step;
    }
    Ok(cells)
}
