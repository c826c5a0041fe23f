//! Grayscale conversion regression test
//!
//! Checks the BT.601 luminance weights, idempotence on the converted
//! output and the depth mappings of `pix_convert_to_gray`.

use inkline_color::{pix_convert_to_gray, rgb_to_gray};
use inkline_core::{Pix, PixMut, PixelDepth};
use inkline_test::RegParams;

/// A 32 bpp image sweeping through many colors
fn color_sweep() -> Pix {
    let mut pm = PixMut::new(64, 48, PixelDepth::Bit32).expect("create");
    for y in 0..48u32 {
        for x in 0..64u32 {
            let r = (x * 4) as u8;
            let g = (y * 5) as u8;
            let b = ((x * 7 + y * 3) % 256) as u8;
            pm.set_rgb(x, y, r, g, b).expect("set rgb");
        }
    }
    pm.into()
}

#[test]
fn colorspace_reg() {
    let mut rp = RegParams::new("colorspace");

    // --- Weights ---
    rp.compare_values(76.0, rgb_to_gray(255, 0, 0) as f64, 0.0);
    rp.compare_values(150.0, rgb_to_gray(0, 255, 0) as f64, 0.0);
    rp.compare_values(29.0, rgb_to_gray(0, 0, 255) as f64, 0.0);
    rp.compare_values(128.0, rgb_to_gray(128, 128, 128) as f64, 0.0);

    // --- Idempotence ---
    let pixs = color_sweep();
    let gray1 = pix_convert_to_gray(&pixs).expect("gray");
    rp.compare_values(8.0, gray1.depth().bits() as f64, 0.0);
    rp.compare_values(64.0, gray1.width() as f64, 0.0);
    rp.compare_values(48.0, gray1.height() as f64, 0.0);
    let gray2 = pix_convert_to_gray(&gray1).expect("gray of gray");
    rp.compare_pix(&gray1, &gray2);

    // Gray rendered back as neutral RGB converts to the same luminance
    let mut neutral = PixMut::new(64, 48, PixelDepth::Bit32).expect("create");
    for y in 0..48 {
        for x in 0..64 {
            let v = gray1.get_pixel_unchecked(x, y) as u8;
            neutral.set_rgb(x, y, v, v, v).expect("set rgb");
        }
    }
    let gray3 = pix_convert_to_gray(&neutral.into()).expect("gray of neutral");
    rp.compare_pix(&gray1, &gray3);

    // --- Input untouched ---
    let before = pixs.data().to_vec();
    let _ = pix_convert_to_gray(&pixs).expect("gray again");
    rp.compare_values(1.0, if pixs.data() == &before[..] { 1.0 } else { 0.0 }, 0.0);

    assert!(rp.cleanup(), "colorspace regression test failed");
}
