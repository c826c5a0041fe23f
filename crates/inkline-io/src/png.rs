//! PNG image format support
//!
//! 1-bit grayscale PNG maps to a 1 bpp raster with ink as `1`; since PNG
//! stores black as `0`, the bit is inverted on both read and write.
//! Indexed images are expanded through their palette to 32 bpp RGB.

use crate::{IoError, IoResult};
use inkline_core::{ImageFormat, Pix, PixMut, PixelDepth, color};
use png::{BitDepth, ColorType, Decoder, Encoder};
use std::io::{BufRead, Seek, Write};

/// Read a PNG image
pub fn read_png<R: BufRead + Seek>(reader: R) -> IoResult<Pix> {
    let decoder = Decoder::new(reader);
    let mut reader = decoder
        .read_info()
        .map_err(|e| IoError::DecodeError(format!("PNG decode error: {}", e)))?;

    let info = reader.info();
    let width = info.width;
    let height = info.height;
    let color_type = info.color_type;
    let bit_depth = info.bit_depth;
    let palette: Option<Vec<u8>> = info.palette.as_ref().map(|p| p.to_vec());

    // Determine pixel depth
    let (pix_depth, spp) = match (color_type, bit_depth) {
        (ColorType::Grayscale, BitDepth::One) => (PixelDepth::Bit1, 1),
        (ColorType::Grayscale, BitDepth::Two) => (PixelDepth::Bit2, 1),
        (ColorType::Grayscale, BitDepth::Four) => (PixelDepth::Bit4, 1),
        (ColorType::Grayscale, BitDepth::Eight) => (PixelDepth::Bit8, 1),
        (ColorType::Grayscale, BitDepth::Sixteen) => (PixelDepth::Bit16, 1),
        (ColorType::GrayscaleAlpha, _) => (PixelDepth::Bit32, 4),
        (ColorType::Rgb, _) => (PixelDepth::Bit32, 3),
        (ColorType::Rgba, _) => (PixelDepth::Bit32, 4),
        (ColorType::Indexed, _) => (PixelDepth::Bit32, 3),
    };

    let buf_size = reader
        .output_buffer_size()
        .ok_or_else(|| IoError::DecodeError("failed to get output buffer size".to_string()))?;
    let mut buf = vec![0; buf_size];
    let output_info = reader
        .next_frame(&mut buf)
        .map_err(|e| IoError::DecodeError(format!("PNG frame error: {}", e)))?;

    let mut pix_mut = PixMut::new(width, height, pix_depth)?;
    pix_mut.set_spp(spp);
    pix_mut.set_informat(ImageFormat::Png);

    let bytes_per_row = output_info.line_size;
    let data = &buf[..output_info.buffer_size()];

    match (color_type, bit_depth) {
        (ColorType::Indexed, _) => {
            let palette = palette.ok_or_else(|| {
                IoError::InvalidData("indexed PNG without palette".to_string())
            })?;
            let bits = bit_depth as u32;
            let per_byte = 8 / bits;
            let mask = (1u32 << bits) - 1;
            for y in 0..height {
                let row_start = y as usize * bytes_per_row;
                for x in 0..width {
                    let byte = data[row_start + (x / per_byte) as usize] as u32;
                    let shift = 8 - bits * (x % per_byte + 1);
                    let index = ((byte >> shift) & mask) as usize;
                    let entry = palette.get(index * 3..index * 3 + 3).ok_or_else(|| {
                        IoError::InvalidData(format!("palette index {} out of range", index))
                    })?;
                    pix_mut.set_pixel_unchecked(
                        x,
                        y,
                        color::compose_rgb(entry[0], entry[1], entry[2]),
                    );
                }
            }
        }
        (ColorType::Grayscale, BitDepth::One) => {
            for y in 0..height {
                let row_start = y as usize * bytes_per_row;
                for x in 0..width {
                    let byte_idx = row_start + (x / 8) as usize;
                    let bit_idx = 7 - (x % 8);
                    let val = (data[byte_idx] >> bit_idx) & 1;
                    pix_mut.set_pixel_unchecked(x, y, (val ^ 1) as u32);
                }
            }
        }
        (ColorType::Grayscale, BitDepth::Two) => {
            for y in 0..height {
                let row_start = y as usize * bytes_per_row;
                for x in 0..width {
                    let byte_idx = row_start + (x / 4) as usize;
                    let shift = 6 - ((x % 4) * 2);
                    let val = (data[byte_idx] >> shift) & 3;
                    pix_mut.set_pixel_unchecked(x, y, val as u32);
                }
            }
        }
        (ColorType::Grayscale, BitDepth::Four) => {
            for y in 0..height {
                let row_start = y as usize * bytes_per_row;
                for x in 0..width {
                    let byte_idx = row_start + (x / 2) as usize;
                    let val = if x % 2 == 0 {
                        (data[byte_idx] >> 4) & 0xF
                    } else {
                        data[byte_idx] & 0xF
                    };
                    pix_mut.set_pixel_unchecked(x, y, val as u32);
                }
            }
        }
        (ColorType::Grayscale, BitDepth::Eight) => {
            for y in 0..height {
                let row_start = y as usize * bytes_per_row;
                for x in 0..width {
                    let val = data[row_start + x as usize];
                    pix_mut.set_pixel_unchecked(x, y, val as u32);
                }
            }
        }
        (ColorType::Grayscale, BitDepth::Sixteen) => {
            for y in 0..height {
                let row_start = y as usize * bytes_per_row;
                for x in 0..width {
                    let idx = row_start + (x as usize * 2);
                    let val = ((data[idx] as u32) << 8) | (data[idx + 1] as u32);
                    pix_mut.set_pixel_unchecked(x, y, val);
                }
            }
        }
        (ColorType::GrayscaleAlpha, _) => {
            let samples = if bit_depth == BitDepth::Sixteen { 4 } else { 2 };
            for y in 0..height {
                let row_start = y as usize * bytes_per_row;
                for x in 0..width {
                    let idx = row_start + (x as usize * samples);
                    let (g, a) = if bit_depth == BitDepth::Sixteen {
                        (data[idx], data[idx + 2])
                    } else {
                        (data[idx], data[idx + 1])
                    };
                    pix_mut.set_pixel_unchecked(x, y, color::compose_rgba(g, g, g, a));
                }
            }
        }
        (ColorType::Rgb, _) => {
            let samples = if bit_depth == BitDepth::Sixteen { 6 } else { 3 };
            for y in 0..height {
                let row_start = y as usize * bytes_per_row;
                for x in 0..width {
                    let idx = row_start + (x as usize * samples);
                    let (r, g, b) = if bit_depth == BitDepth::Sixteen {
                        (data[idx], data[idx + 2], data[idx + 4])
                    } else {
                        (data[idx], data[idx + 1], data[idx + 2])
                    };
                    pix_mut.set_pixel_unchecked(x, y, color::compose_rgb(r, g, b));
                }
            }
        }
        (ColorType::Rgba, _) => {
            let samples = if bit_depth == BitDepth::Sixteen { 8 } else { 4 };
            for y in 0..height {
                let row_start = y as usize * bytes_per_row;
                for x in 0..width {
                    let idx = row_start + (x as usize * samples);
                    let (r, g, b, a) = if bit_depth == BitDepth::Sixteen {
                        (data[idx], data[idx + 2], data[idx + 4], data[idx + 6])
                    } else {
                        (data[idx], data[idx + 1], data[idx + 2], data[idx + 3])
                    };
                    pix_mut.set_pixel_unchecked(x, y, color::compose_rgba(r, g, b, a));
                }
            }
        }
    }

    Ok(pix_mut.into())
}

/// Write a PNG image
pub fn write_png<W: Write>(pix: &Pix, writer: W) -> IoResult<()> {
    let width = pix.width();
    let height = pix.height();

    let (color_type, bit_depth) = match pix.depth() {
        PixelDepth::Bit1 => (ColorType::Grayscale, BitDepth::One),
        PixelDepth::Bit2 => (ColorType::Grayscale, BitDepth::Two),
        PixelDepth::Bit4 => (ColorType::Grayscale, BitDepth::Four),
        PixelDepth::Bit8 => (ColorType::Grayscale, BitDepth::Eight),
        PixelDepth::Bit16 => (ColorType::Grayscale, BitDepth::Sixteen),
        PixelDepth::Bit32 => {
            if pix.spp() == 4 {
                (ColorType::Rgba, BitDepth::Eight)
            } else {
                (ColorType::Rgb, BitDepth::Eight)
            }
        }
    };

    let mut encoder = Encoder::new(writer, width, height);
    encoder.set_color(color_type);
    encoder.set_depth(bit_depth);

    let mut writer = encoder
        .write_header()
        .map_err(|e| IoError::EncodeError(format!("PNG header error: {}", e)))?;

    let bytes_per_row = match (color_type, bit_depth) {
        (ColorType::Grayscale, BitDepth::One) => width.div_ceil(8),
        (ColorType::Grayscale, BitDepth::Two) => width.div_ceil(4),
        (ColorType::Grayscale, BitDepth::Four) => width.div_ceil(2),
        (ColorType::Grayscale, BitDepth::Eight) => width,
        (ColorType::Grayscale, BitDepth::Sixteen) => width * 2,
        (ColorType::Rgba, _) => width * 4,
        _ => width * 3,
    } as usize;

    let mut data = vec![0u8; bytes_per_row * height as usize];

    for y in 0..height {
        let row_start = y as usize * bytes_per_row;

        match (color_type, bit_depth) {
            (ColorType::Grayscale, BitDepth::One) => {
                // Background pixels are the set (white) bits
                for x in 0..width {
                    if pix.get_pixel_unchecked(x, y) == 0 {
                        let byte_idx = row_start + (x / 8) as usize;
                        let bit_idx = 7 - (x % 8);
                        data[byte_idx] |= 1 << bit_idx;
                    }
                }
            }
            (ColorType::Grayscale, BitDepth::Two) => {
                for x in 0..width {
                    let val = pix.get_pixel_unchecked(x, y);
                    let byte_idx = row_start + (x / 4) as usize;
                    let shift = 6 - ((x % 4) * 2);
                    data[byte_idx] |= ((val & 3) as u8) << shift;
                }
            }
            (ColorType::Grayscale, BitDepth::Four) => {
                for x in 0..width {
                    let val = pix.get_pixel_unchecked(x, y);
                    let byte_idx = row_start + (x / 2) as usize;
                    if x % 2 == 0 {
                        data[byte_idx] |= ((val & 0xF) as u8) << 4;
                    } else {
                        data[byte_idx] |= (val & 0xF) as u8;
                    }
                }
            }
            (ColorType::Grayscale, BitDepth::Eight) => {
                for x in 0..width {
                    data[row_start + x as usize] = pix.get_pixel_unchecked(x, y) as u8;
                }
            }
            (ColorType::Grayscale, BitDepth::Sixteen) => {
                for x in 0..width {
                    let val = pix.get_pixel_unchecked(x, y);
                    let idx = row_start + (x as usize * 2);
                    data[idx] = (val >> 8) as u8;
                    data[idx + 1] = val as u8;
                }
            }
            (ColorType::Rgba, _) => {
                for x in 0..width {
                    let (r, g, b, a) = color::extract_rgba(pix.get_pixel_unchecked(x, y));
                    let idx = row_start + (x as usize * 4);
                    data[idx..idx + 4].copy_from_slice(&[r, g, b, a]);
                }
            }
            _ => {
                for x in 0..width {
                    let (r, g, b) = color::extract_rgb(pix.get_pixel_unchecked(x, y));
                    let idx = row_start + (x as usize * 3);
                    data[idx..idx + 3].copy_from_slice(&[r, g, b]);
                }
            }
        }
    }

    writer
        .write_image_data(&data)
        .map_err(|e| IoError::EncodeError(format!("PNG write error: {}", e)))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_png_roundtrip_grayscale() {
        let mut pix_mut = PixMut::new(10, 10, PixelDepth::Bit8).unwrap();
        for y in 0..10 {
            for x in 0..10 {
                pix_mut.set_pixel(x, y, (x + y) * 10).unwrap();
            }
        }
        let pix: Pix = pix_mut.into();

        let mut buffer = Vec::new();
        write_png(&pix, &mut buffer).unwrap();
        let pix2 = read_png(Cursor::new(buffer)).unwrap();

        assert_eq!(pix2.width(), 10);
        assert_eq!(pix2.height(), 10);
        assert_eq!(pix2.informat(), ImageFormat::Png);
        for y in 0..10 {
            for x in 0..10 {
                assert_eq!(pix2.get_pixel(x, y), pix.get_pixel(x, y));
            }
        }
    }

    #[test]
    fn test_png_roundtrip_rgb() {
        let mut pix_mut = PixMut::new(5, 5, PixelDepth::Bit32).unwrap();
        pix_mut.set_rgb(0, 0, 255, 0, 0).unwrap();
        pix_mut.set_rgb(1, 1, 0, 255, 0).unwrap();
        pix_mut.set_rgb(2, 2, 0, 0, 255).unwrap();
        let pix: Pix = pix_mut.into();

        let mut buffer = Vec::new();
        write_png(&pix, &mut buffer).unwrap();
        let pix2 = read_png(Cursor::new(buffer)).unwrap();

        assert_eq!(pix2.get_rgb(0, 0), Some((255, 0, 0)));
        assert_eq!(pix2.get_rgb(1, 1), Some((0, 255, 0)));
        assert_eq!(pix2.get_rgb(2, 2), Some((0, 0, 255)));
    }

    #[test]
    fn test_png_binary_ink_is_black() {
        let mut pix_mut = PixMut::new(9, 2, PixelDepth::Bit1).unwrap();
        pix_mut.set_pixel(0, 0, 1).unwrap();
        pix_mut.set_pixel(8, 1, 1).unwrap();
        let pix: Pix = pix_mut.into();

        let mut buffer = Vec::new();
        write_png(&pix, &mut buffer).unwrap();

        // Decode the raw PNG samples: ink must be stored as 0 (black)
        let mut raw = Decoder::new(Cursor::new(buffer.clone())).read_info().unwrap();
        let mut samples = vec![0; raw.output_buffer_size().unwrap()];
        raw.next_frame(&mut samples).unwrap();
        assert_eq!(samples[0] & 0x80, 0);
        assert_eq!(samples[0] & 0x40, 0x40);

        let pix2 = read_png(Cursor::new(buffer)).unwrap();
        assert_eq!(pix2.depth(), PixelDepth::Bit1);
        assert_eq!(pix2.get_pixel(0, 0), Some(1));
        assert_eq!(pix2.get_pixel(1, 0), Some(0));
        assert_eq!(pix2.get_pixel(8, 1), Some(1));
    }
}
