//! Grayscale conversion
//!
//! Maps a raster of any supported depth to an 8 bpp luminance raster of
//! the same dimensions. Color pixels use the ITU-R BT.601 weights in
//! 16.16 fixed point; the weights sum to exactly 1.0 so a neutral pixel
//! keeps its value and the conversion is idempotent.

use crate::ColorResult;
use inkline_core::{Pix, PixMut, PixelDepth, color};

/// Fixed-point weights (scaled by 65536) for 0.299 R + 0.587 G + 0.114 B.
const RED_WEIGHT: u32 = 19595;
const GREEN_WEIGHT: u32 = 38470;
const BLUE_WEIGHT: u32 = 7471;

/// Convert RGB to grayscale using ITU-R BT.601 coefficients
///
/// Formula: gray = 0.299*R + 0.587*G + 0.114*B, rounded to nearest.
#[inline]
pub fn rgb_to_gray(r: u8, g: u8, b: u8) -> u8 {
    let y = RED_WEIGHT * r as u32 + GREEN_WEIGHT * g as u32 + BLUE_WEIGHT * b as u32;
    ((y + (1 << 15)) >> 16) as u8
}

/// Convert an image of any depth to 8-bit grayscale
///
/// | input | mapping |
/// |-------|---------|
/// | 1 bpp | ink (1) to 0, background (0) to 255 |
/// | 2 / 4 bpp | scaled linearly onto 0..=255 |
/// | 8 bpp | copied |
/// | 16 bpp | most significant byte |
/// | 32 bpp | [`rgb_to_gray`]; alpha is ignored |
///
/// Always allocates a new raster; the input is untouched.
pub fn pix_convert_to_gray(pix: &Pix) -> ColorResult<Pix> {
    let (w, h) = (pix.width(), pix.height());
    let depth = pix.depth();

    if depth == PixelDepth::Bit8 {
        return Ok(pix.to_mut().into());
    }

    let mut out = PixMut::new(w, h, PixelDepth::Bit8)?;
    for y in 0..h {
        for x in 0..w {
            let val = pix.get_pixel_unchecked(x, y);
            let gray = match depth {
                PixelDepth::Bit1 => {
                    if val == 1 {
                        0
                    } else {
                        255
                    }
                }
                PixelDepth::Bit2 => val * 85,
                PixelDepth::Bit4 => val * 17,
                PixelDepth::Bit8 => val,
                PixelDepth::Bit16 => val >> 8,
                PixelDepth::Bit32 => {
                    let (r, g, b) = color::extract_rgb(val);
                    rgb_to_gray(r, g, b) as u32
                }
            };
            out.set_pixel_unchecked(x, y, gray);
        }
    }
    Ok(out.into())
}
