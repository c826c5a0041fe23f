//! inkline-test - Regression test harness for the inkline OCR pipeline
//!
//! Every `tests/*_reg.rs` file drives a [`RegParams`] through a sequence
//! of numbered checks. Three modes are supported:
//!
//! - **Generate**: Write golden files under `tests/golden`
//! - **Compare**: Compare results with golden files (default)
//! - **Display**: Run the checks without touching golden files
//!
//! # Usage
//!
//! ```ignore
//! use inkline_test::RegParams;
//!
//! let mut rp = RegParams::new("lineseg");
//! rp.compare_values(1.0, lines.len() as f64, 0.0);
//! assert!(rp.cleanup());
//! ```
//!
//! # Environment Variables
//!
//! - `REGTEST_MODE`: Set to "generate", "compare", or "display"
//!
//! All fixtures are built in code; there is no checked-in image corpus.

mod error;
mod params;

pub use error::{TestError, TestResult};
pub use params::{RegParams, RegTestMode};

use inkline_core::{Box, Pix, PixMut, PixelDepth};

/// Get the path to the workspace root
fn workspace_root() -> String {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    // inkline-test is at crates/inkline-test, so go up two directories
    format!("{}/../..", manifest_dir)
}

/// Get the path to the golden files directory
pub fn golden_dir() -> String {
    format!("{}/tests/golden", workspace_root())
}

/// Get the path to the regout (regression output) directory
pub fn regout_dir() -> String {
    format!("{}/tests/regout", workspace_root())
}

/// Build a white 32 bpp page with the given rectangles painted black
///
/// Rectangles are clipped to the page; one lying entirely outside it is
/// an error.
pub fn synthetic_page(width: u32, height: u32, ink: &[Box]) -> TestResult<Pix> {
    let mut pm = PixMut::new(width, height, PixelDepth::Bit32)?;
    pm.set_all_arbitrary(0xffffffff);
    for b in ink {
        pm.set_in_rect_arbitrary(b, 0x000000ff)?;
    }
    Ok(pm.into())
}

/// Build a 1 bpp raster with the given rectangles set to ink
pub fn synthetic_binary(width: u32, height: u32, ink: &[Box]) -> TestResult<Pix> {
    let mut pm = PixMut::new(width, height, PixelDepth::Bit1)?;
    for b in ink {
        pm.set_in_rect_arbitrary(b, 1)?;
    }
    Ok(pm.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_synthetic_page() {
        let pix = synthetic_page(20, 10, &[Box::new_unchecked(2, 2, 3, 3)]).unwrap();
        assert_eq!(pix.depth(), PixelDepth::Bit32);
        assert_eq!(pix.get_rgb(0, 0), Some((255, 255, 255)));
        assert_eq!(pix.get_rgb(3, 3), Some((0, 0, 0)));
    }

    #[test]
    fn test_synthetic_binary() {
        let pix = synthetic_binary(20, 10, &[Box::new_unchecked(15, 5, 10, 10)]).unwrap();
        assert_eq!(pix.count_pixels().unwrap(), 25);
        assert!(synthetic_binary(20, 10, &[Box::new_unchecked(40, 40, 2, 2)]).is_err());
    }
}
