//! Fixed-threshold binarization
//!
//! Turns an 8 bpp luminance raster into a 1 bpp raster where `1` is ink
//! and `0` is background. A pixel is background when its luminance is
//! strictly greater than the threshold, ink otherwise.

use crate::colorspace::pix_convert_to_gray;
use crate::{ColorError, ColorResult};
use inkline_core::{Pix, PixMut, PixelDepth};

/// Baseline binarization threshold.
pub const DEFAULT_THRESHOLD: u8 = 128;

/// Convert a grayscale image to binary using a fixed threshold
///
/// Pixels `> threshold` become background (0), pixels `<= threshold`
/// become ink (1). The output is freshly allocated with the same
/// dimensions as the input.
///
/// # Errors
///
/// Returns [`ColorError::UnsupportedDepth`] unless the input is 8 bpp.
pub fn threshold_to_binary(pix: &Pix, threshold: u8) -> ColorResult<Pix> {
    if pix.depth() != PixelDepth::Bit8 {
        return Err(ColorError::UnsupportedDepth {
            expected: "8 bpp grayscale",
            actual: pix.depth().bits(),
        });
    }

    let (w, h) = (pix.width(), pix.height());
    let threshold = u32::from(threshold);
    let mut out = PixMut::new(w, h, PixelDepth::Bit1)?;
    for y in 0..h {
        for x in 0..w {
            if pix.get_pixel_unchecked(x, y) <= threshold {
                out.set_pixel_unchecked(x, y, 1);
            }
        }
    }
    Ok(out.into())
}

/// Convert an image of any depth to binary
///
/// Runs [`pix_convert_to_gray`] followed by [`threshold_to_binary`].
pub fn pix_convert_to_binary(pix: &Pix, threshold: u8) -> ColorResult<Pix> {
    let gray = pix_convert_to_gray(pix)?;
    threshold_to_binary(&gray, threshold)
}
