//! PNG I/O regression test
//!
//! Roundtrips synthetic rasters through PNG at 1, 8 and 32 bpp. A 1 bpp
//! raster must come back with the same ink pixels, since the debug image
//! of the pipeline is a 1-bit PNG.

use inkline_core::{Box, Pix, PixMut, PixelDepth};
use inkline_io::{
    ImageFormat, detect_format, read_image, read_image_mem, write_image, write_image_mem,
};
use inkline_test::{RegParams, regout_dir, synthetic_binary, synthetic_page};

fn gray_gradient() -> Pix {
    let mut pm = PixMut::new(37, 19, PixelDepth::Bit8).expect("create");
    for y in 0..19 {
        for x in 0..37 {
            pm.set_pixel(x, y, (x * 7 + y * 3) % 256).expect("set");
        }
    }
    pm.into()
}

#[test]
fn pngio_reg() {
    let mut rp = RegParams::new("pngio");

    // --- 1 bpp through a file ---
    let bin = synthetic_binary(
        45,
        20,
        &[Box::new_unchecked(3, 2, 9, 5), Box::new_unchecked(30, 10, 15, 10)],
    )
    .expect("binary");
    let path = format!("{}/pngio_1bpp.png", regout_dir());
    write_image(&bin, &path, ImageFormat::Png).expect("write 1bpp png");
    rp.compare_values(
        1.0,
        if detect_format(&path).expect("detect") == ImageFormat::Png {
            1.0
        } else {
            0.0
        },
        0.0,
    );
    let back = read_image(&path).expect("read 1bpp png");
    rp.compare_pix(&bin, &back);
    rp.compare_values(195.0, back.count_pixels().expect("count") as f64, 0.0);

    // --- 8 bpp in memory ---
    let gray = gray_gradient();
    let data = write_image_mem(&gray, ImageFormat::Png).expect("encode 8bpp");
    let back = read_image_mem(&data).expect("decode 8bpp");
    rp.compare_pix(&gray, &back);

    // --- 32 bpp in memory ---
    let page = synthetic_page(30, 12, &[Box::new_unchecked(5, 5, 10, 3)]).expect("page");
    let data = write_image_mem(&page, ImageFormat::Png).expect("encode rgb");
    let back = read_image_mem(&data).expect("decode rgb");
    rp.compare_values(32.0, back.depth().bits() as f64, 0.0);
    let same_rgb = (0..12).all(|y| (0..30).all(|x| page.get_rgb(x, y) == back.get_rgb(x, y)));
    rp.compare_values(1.0, if same_rgb { 1.0 } else { 0.0 }, 0.0);

    // --- golden ---
    rp.write_pix_and_check(&bin, ImageFormat::Png)
        .expect("write_pix_and_check");

    assert!(rp.cleanup(), "pngio regression test failed");
}
