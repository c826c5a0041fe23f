//! Fixed-threshold binarization regression test
//!
//! Checks the ink polarity (luminance at or below the threshold is ink),
//! that only the two binary values occur, and the binary debug image.

use inkline_color::{DEFAULT_THRESHOLD, pix_convert_to_binary, threshold_to_binary};
use inkline_core::{Box, Pix, PixMut, PixelDepth};
use inkline_io::ImageFormat;
use inkline_test::{RegParams, synthetic_page};

/// 256 columns, column x has luminance x
fn gray_ramp(height: u32) -> Pix {
    let mut pm = PixMut::new(256, height, PixelDepth::Bit8).expect("create");
    for y in 0..height {
        for x in 0..256 {
            pm.set_pixel(x, y, x).expect("set");
        }
    }
    pm.into()
}

#[test]
fn binarize_reg() {
    let mut rp = RegParams::new("binarize");

    let ramp = gray_ramp(4);
    for threshold in [0u8, 1, 64, 127, 128, 200, 254, 255] {
        let bin = threshold_to_binary(&ramp, threshold).expect("threshold");
        rp.compare_values(1.0, bin.depth().bits() as f64, 0.0);
        // Columns 0..=threshold are ink
        let expected = (threshold as f64 + 1.0) * 4.0;
        rp.compare_values(expected, bin.count_pixels().expect("count") as f64, 0.0);
        let only_two_values = (0..4).all(|y| {
            (0..256).all(|x| matches!(bin.get_pixel(x, y), Some(0) | Some(1)))
        });
        rp.compare_values(1.0, if only_two_values { 1.0 } else { 0.0 }, 0.0);
    }

    // Boundary at the baseline threshold
    let bin = threshold_to_binary(&ramp, DEFAULT_THRESHOLD).expect("threshold 128");
    rp.compare_values(1.0, bin.get_pixel(128, 0).unwrap_or(9) as f64, 0.0);
    rp.compare_values(0.0, bin.get_pixel(129, 0).unwrap_or(9) as f64, 0.0);

    // Color page with one black band, written as the debug artifact
    let page = synthetic_page(200, 40, &[Box::new_unchecked(0, 10, 200, 8)]).expect("page");
    let bin = pix_convert_to_binary(&page, DEFAULT_THRESHOLD).expect("binarize page");
    rp.compare_values(1600.0, bin.count_pixels().expect("count") as f64, 0.0);
    rp.write_pix_and_check(&bin, ImageFormat::Png)
        .expect("write binary png");

    assert!(rp.cleanup(), "binarize regression test failed");
}
