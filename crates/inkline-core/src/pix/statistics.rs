//! Pixel counting on binary images

use super::{Pix, PixelDepth};
use crate::Box;
use crate::error::{Error, Result};

impl Pix {
    /// Count the number of ON (ink) pixels in a binary image.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedDepth`] unless the image is 1 bpp.
    pub fn count_pixels(&self) -> Result<u64> {
        self.count_pixels_in_rect(&self.bounds())
    }

    /// Count ON pixels inside `region` of a binary image.
    ///
    /// Every pixel of the region is visited; the region must lie entirely
    /// within the raster.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedDepth`] unless the image is 1 bpp, and
    /// [`Error::InvalidParameter`] if `region` is not contained in the raster.
    pub fn count_pixels_in_rect(&self, region: &Box) -> Result<u64> {
        if self.depth() != PixelDepth::Bit1 {
            return Err(Error::UnsupportedDepth(self.depth().bits()));
        }
        if !region.is_valid() || !self.bounds().contains_box(region) {
            return Err(Error::InvalidParameter(format!(
                "region {:?} not within {}x{} raster",
                region,
                self.width(),
                self.height()
            )));
        }

        let mut count = 0u64;
        for y in region.y..region.bottom() {
            let line = self.row_data(y as u32);
            for x in region.x..region.right() {
                count += u64::from(super::get_data_bit(line, x as u32));
            }
        }
        Ok(count)
    }

    /// Check whether row `y` of a binary image holds at least one ON pixel.
    ///
    /// Scans left to right and stops at the first ON pixel. Returns `false`
    /// for rows outside the raster or non-binary images.
    pub fn row_has_foreground(&self, y: u32) -> bool {
        if self.depth() != PixelDepth::Bit1 || y >= self.height() {
            return false;
        }
        let line = self.row_data(y);
        (0..self.width()).any(|x| super::get_data_bit(line, x) == 1)
    }
}
