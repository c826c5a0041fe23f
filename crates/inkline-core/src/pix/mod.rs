//! PIX - The raster container
//!
//! The `Pix` structure is the raster type every pipeline stage reads.
//! It supports 1, 2, 4, 8, 16 and 32 bits per pixel.
//!
//! # Pixel layout
//!
//! - Image data is stored in 32-bit words
//! - Every row starts on a 32-bit boundary
//! - Pixels are packed MSB to LSB within each word
//! - For 32-bit images, color order is RGBA (red in MSB)
//!
//! # Ownership model
//!
//! `Pix` uses `Arc` for cheap cloning (shared ownership) and is never
//! written through. A stage allocates a [`PixMut`], fills it, and hands
//! it back as a `Pix` via `Into<Pix>`.

mod access;
mod statistics;

pub use access::*;

use crate::error::{Error, Result};
use std::sync::Arc;

/// Pixel depth (bits per pixel)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum PixelDepth {
    /// 1-bit binary image
    Bit1 = 1,
    /// 2-bit image (4 levels)
    Bit2 = 2,
    /// 4-bit image (16 levels)
    Bit4 = 4,
    /// 8-bit grayscale
    Bit8 = 8,
    /// 16-bit grayscale
    Bit16 = 16,
    /// 32-bit RGB or RGBA
    Bit32 = 32,
}

impl PixelDepth {
    /// Create `PixelDepth` from a raw bit count.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDepth`] if `bits` is not 1, 2, 4, 8, 16, or 32.
    pub fn from_bits(bits: u32) -> Result<Self> {
        match bits {
            1 => Ok(PixelDepth::Bit1),
            2 => Ok(PixelDepth::Bit2),
            4 => Ok(PixelDepth::Bit4),
            8 => Ok(PixelDepth::Bit8),
            16 => Ok(PixelDepth::Bit16),
            32 => Ok(PixelDepth::Bit32),
            _ => Err(Error::InvalidDepth(bits)),
        }
    }

    /// Get the number of bits per pixel.
    pub fn bits(self) -> u32 {
        self as u32
    }

    /// Get the maximum pixel value representable at this depth.
    pub fn max_value(self) -> u32 {
        match self {
            PixelDepth::Bit32 => u32::MAX,
            _ => (1u32 << self.bits()) - 1,
        }
    }
}

/// Image file format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ImageFormat {
    /// Unknown format
    #[default]
    Unknown,
    /// JFIF JPEG format
    Jpeg,
    /// PNG format
    Png,
    /// PNM format
    Pnm,
}

impl ImageFormat {
    /// Get the file extension for this format.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Unknown => "dat",
            Self::Jpeg => "jpg",
            Self::Png => "png",
            Self::Pnm => "pnm",
        }
    }

    /// Guess the format from a file extension (case-insensitive).
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_ascii_lowercase().as_str() {
            "jpg" | "jpeg" => Self::Jpeg,
            "png" => Self::Png,
            "pnm" | "pbm" | "pgm" | "ppm" => Self::Pnm,
            _ => Self::Unknown,
        }
    }
}

/// Internal PIX data
#[derive(Debug, Clone)]
struct PixData {
    /// Width in pixels
    width: u32,
    /// Height in pixels
    height: u32,
    /// Depth in bits per pixel
    depth: PixelDepth,
    /// Samples per pixel (1 for grayscale, 3 for RGB, 4 for RGBA)
    spp: u32,
    /// 32-bit words per line
    wpl: u32,
    /// Input file format
    informat: ImageFormat,
    /// The image data (packed 32-bit words)
    data: Vec<u32>,
}

/// PIX - Raster container
///
/// # Examples
///
/// ```
/// use inkline_core::{Pix, PixelDepth};
///
/// let pix = Pix::new(640, 480, PixelDepth::Bit8).unwrap();
/// assert_eq!(pix.width(), 640);
/// assert_eq!(pix.height(), 480);
/// ```
#[derive(Debug, Clone)]
pub struct Pix {
    inner: Arc<PixData>,
}

impl Pix {
    /// Create a new PIX with the specified dimensions and depth.
    ///
    /// The image data is initialized to zero.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if width or height is 0.
    pub fn new(width: u32, height: u32, depth: PixelDepth) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }

        let wpl = Self::compute_wpl(width, depth)?;
        let data = vec![0u32; (wpl as usize) * (height as usize)];

        let spp = match depth {
            PixelDepth::Bit32 => 3, // Default to RGB
            _ => 1,
        };

        Ok(Pix {
            inner: Arc::new(PixData {
                width,
                height,
                depth,
                spp,
                wpl,
                informat: ImageFormat::Unknown,
                data,
            }),
        })
    }

    /// Compute words per line for given width and depth.
    ///
    /// Uses u64 arithmetic to prevent overflow for large widths.
    #[inline]
    fn compute_wpl(width: u32, depth: PixelDepth) -> Result<u32> {
        let bits_per_line = u64::from(width) * u64::from(depth.bits());
        u32::try_from(bits_per_line.div_ceil(32))
            .map_err(|_| Error::InvalidDimension { width, height: 0 })
    }

    /// Get the image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Get the pixel depth.
    #[inline]
    pub fn depth(&self) -> PixelDepth {
        self.inner.depth
    }

    /// Get the samples per pixel.
    #[inline]
    pub fn spp(&self) -> u32 {
        self.inner.spp
    }

    /// Get the words per line.
    #[inline]
    pub fn wpl(&self) -> u32 {
        self.inner.wpl
    }

    /// Get the input file format.
    #[inline]
    pub fn informat(&self) -> ImageFormat {
        self.inner.informat
    }

    /// Get raw access to the image data.
    #[inline]
    pub fn data(&self) -> &[u32] {
        &self.inner.data
    }

    /// The rectangle covering the whole raster.
    pub fn bounds(&self) -> crate::Box {
        crate::Box::new_unchecked(0, 0, self.inner.width as i32, self.inner.height as i32)
    }

    /// Get the words of a specific row.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row_data(&self, y: u32) -> &[u32] {
        let start = (y * self.inner.wpl) as usize;
        let end = start + self.inner.wpl as usize;
        &self.inner.data[start..end]
    }

    /// Try to get mutable access to the image data.
    ///
    /// Succeeds only if there is exactly one reference to the data.
    pub fn try_into_mut(self) -> std::result::Result<PixMut, Self> {
        match Arc::try_unwrap(self.inner) {
            Ok(data) => Ok(PixMut { inner: data }),
            Err(arc) => Err(Pix { inner: arc }),
        }
    }

    /// Create a mutable copy of this PIX.
    pub fn to_mut(&self) -> PixMut {
        PixMut {
            inner: (*self.inner).clone(),
        }
    }
}

/// Mutable PIX
///
/// Allows modification of image data. Convert back to an immutable
/// [`Pix`] using `Into<Pix>`.
#[derive(Debug)]
pub struct PixMut {
    inner: PixData,
}

impl PixMut {
    /// Allocate a zeroed mutable raster.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if width or height is 0.
    pub fn new(width: u32, height: u32, depth: PixelDepth) -> Result<Self> {
        Ok(Pix::new(width, height, depth)?.to_mut())
    }

    /// Get the image width.
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the image height.
    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Get the pixel depth.
    #[inline]
    pub fn depth(&self) -> PixelDepth {
        self.inner.depth
    }

    /// Get samples per pixel.
    #[inline]
    pub fn spp(&self) -> u32 {
        self.inner.spp
    }

    /// Get words per line.
    #[inline]
    pub fn wpl(&self) -> u32 {
        self.inner.wpl
    }

    /// Set the input format.
    pub fn set_informat(&mut self, format: ImageFormat) {
        self.inner.informat = format;
    }

    /// Set samples per pixel.
    pub fn set_spp(&mut self, spp: u32) {
        self.inner.spp = spp;
    }

    /// Get raw access to the image data.
    #[inline]
    pub fn data(&self) -> &[u32] {
        &self.inner.data
    }

    /// Get read access to a specific row.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row_data(&self, y: u32) -> &[u32] {
        let start = (y * self.inner.wpl) as usize;
        let end = start + self.inner.wpl as usize;
        &self.inner.data[start..end]
    }

    /// Get mutable access to a specific row.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row_data_mut(&mut self, y: u32) -> &mut [u32] {
        let start = (y * self.inner.wpl) as usize;
        let end = start + self.inner.wpl as usize;
        &mut self.inner.data[start..end]
    }

    /// Set all pixels to an arbitrary value.
    ///
    /// The value is masked to the depth: 0-1 at 1 bpp, 0-255 at 8 bpp,
    /// the full word at 32 bpp.
    pub fn set_all_arbitrary(&mut self, val: u32) {
        let (w, h) = (self.inner.width, self.inner.height);
        for y in 0..h {
            for x in 0..w {
                self.set_pixel_unchecked(x, y, val);
            }
        }
    }

    /// Set pixels in a rectangular region to an arbitrary value.
    ///
    /// The region is clipped to the raster.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if the region does not
    /// intersect the raster.
    pub fn set_in_rect_arbitrary(&mut self, rect: &crate::Box, val: u32) -> Result<()> {
        let clipped = rect
            .clip(self.inner.width as i32, self.inner.height as i32)
            .ok_or_else(|| {
                Error::InvalidParameter(format!(
                    "rect {:?} does not intersect {}x{} raster",
                    rect, self.inner.width, self.inner.height
                ))
            })?;
        for y in clipped.y..clipped.bottom() {
            for x in clipped.x..clipped.right() {
                self.set_pixel_unchecked(x as u32, y as u32, val);
            }
        }
        Ok(())
    }
}

impl From<PixMut> for Pix {
    fn from(pix_mut: PixMut) -> Self {
        Pix {
            inner: Arc::new(pix_mut.inner),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pix_creation() {
        let pix = Pix::new(100, 200, PixelDepth::Bit8).unwrap();
        assert_eq!(pix.width(), 100);
        assert_eq!(pix.height(), 200);
        assert_eq!(pix.depth(), PixelDepth::Bit8);
        assert_eq!(pix.spp(), 1);
        assert_eq!(pix.wpl(), 25);
    }

    #[test]
    fn test_pix_invalid_dimensions() {
        assert!(Pix::new(0, 10, PixelDepth::Bit8).is_err());
        assert!(Pix::new(10, 0, PixelDepth::Bit1).is_err());
    }

    #[test]
    fn test_wpl_binary() {
        // 33 one-bit pixels need two words per line
        let pix = Pix::new(33, 1, PixelDepth::Bit1).unwrap();
        assert_eq!(pix.wpl(), 2);
    }

    #[test]
    fn test_depth_from_bits() {
        assert_eq!(PixelDepth::from_bits(32).unwrap(), PixelDepth::Bit32);
        assert!(PixelDepth::from_bits(3).is_err());
        assert_eq!(PixelDepth::Bit8.max_value(), 255);
        assert_eq!(PixelDepth::Bit1.max_value(), 1);
    }

    #[test]
    fn test_clone_shares_data() {
        let pix = Pix::new(10, 10, PixelDepth::Bit8).unwrap();
        let other = pix.clone();
        // Shared data cannot be taken exclusively
        let back = pix.try_into_mut().unwrap_err();
        drop(other);
        assert!(back.try_into_mut().is_ok());
    }

    #[test]
    fn test_set_in_rect_arbitrary() {
        let mut pm = PixMut::new(20, 20, PixelDepth::Bit8).unwrap();
        pm.set_in_rect_arbitrary(&crate::Box::new_unchecked(5, 5, 10, 10), 42)
            .unwrap();
        assert_eq!(pm.get_pixel(10, 10), Some(42));
        assert_eq!(pm.get_pixel(0, 0), Some(0));
        assert_eq!(pm.get_pixel(15, 15), Some(0));
    }

    #[test]
    fn test_set_in_rect_clipped() {
        let mut pm = PixMut::new(10, 10, PixelDepth::Bit1).unwrap();
        pm.set_in_rect_arbitrary(&crate::Box::new_unchecked(8, 8, 5, 5), 1)
            .unwrap();
        assert_eq!(pm.get_pixel(9, 9), Some(1));
        assert!(
            pm.set_in_rect_arbitrary(&crate::Box::new_unchecked(20, 20, 2, 2), 1)
                .is_err()
        );
    }

    #[test]
    fn test_format_extension() {
        assert_eq!(ImageFormat::Png.extension(), "png");
        assert_eq!(ImageFormat::from_extension("JPEG"), ImageFormat::Jpeg);
        assert_eq!(ImageFormat::from_extension("pbm"), ImageFormat::Pnm);
        assert_eq!(ImageFormat::from_extension("gif"), ImageFormat::Unknown);
    }
}
