//! JPEG image format support
//!
//! Reads JPEG images using the `jpeg-decoder` crate and writes them with
//! the `jpeg-encoder` crate. Rasters below 8 bpp are expanded to 8-bit
//! grayscale on write, with binary ink rendered black.

use crate::{IoError, IoResult};
use inkline_core::{ImageFormat, Pix, PixMut, PixelDepth, color};
use jpeg_decoder::{Decoder, PixelFormat};
use std::io::{Read, Write};

/// Default JPEG quality used by `write_image`
pub const DEFAULT_QUALITY: u8 = 75;

/// Read a JPEG image from a reader.
///
/// Returns a `Pix` at 8 bpp (grayscale), 16 bpp (16-bit grayscale), or
/// 32 bpp (RGB and CMYK, the latter converted to RGB).
pub fn read_jpeg<R: Read>(reader: R) -> IoResult<Pix> {
    let mut decoder = Decoder::new(reader);
    let pixels = decoder
        .decode()
        .map_err(|e| IoError::DecodeError(format!("JPEG decode error: {}", e)))?;
    let info = decoder
        .info()
        .ok_or_else(|| IoError::DecodeError("missing JPEG image info".to_string()))?;

    let width = info.width as u32;
    let height = info.height as u32;

    let depth = match info.pixel_format {
        PixelFormat::L8 => PixelDepth::Bit8,
        PixelFormat::L16 => PixelDepth::Bit16,
        PixelFormat::RGB24 | PixelFormat::CMYK32 => PixelDepth::Bit32,
    };
    let mut pix_mut = PixMut::new(width, height, depth)?;
    pix_mut.set_informat(ImageFormat::Jpeg);

    let samples = match info.pixel_format {
        PixelFormat::L8 => 1,
        PixelFormat::L16 => 2,
        PixelFormat::RGB24 => 3,
        PixelFormat::CMYK32 => 4,
    };
    let expected = width as usize * height as usize * samples;
    if pixels.len() < expected {
        return Err(IoError::DecodeError(format!(
            "JPEG data too short: {} < {}",
            pixels.len(),
            expected
        )));
    }

    for y in 0..height {
        for x in 0..width {
            let i = (y as usize * width as usize + x as usize) * samples;
            let val = match info.pixel_format {
                PixelFormat::L8 => pixels[i] as u32,
                PixelFormat::L16 => ((pixels[i] as u32) << 8) | pixels[i + 1] as u32,
                PixelFormat::RGB24 => color::compose_rgb(pixels[i], pixels[i + 1], pixels[i + 2]),
                PixelFormat::CMYK32 => {
                    // Decoded CMYK is stored inverted (Adobe convention)
                    let k = pixels[i + 3] as u32;
                    let channel = |c: u8| (c as u32 * k / 255) as u8;
                    color::compose_rgb(
                        channel(pixels[i]),
                        channel(pixels[i + 1]),
                        channel(pixels[i + 2]),
                    )
                }
            };
            pix_mut.set_pixel_unchecked(x, y, val);
        }
    }

    Ok(pix_mut.into())
}

/// Write a `Pix` as baseline JPEG.
///
/// 32 bpp rasters are written as RGB (alpha dropped), everything else as
/// 8-bit grayscale.
pub fn write_jpeg<W: Write>(pix: &Pix, writer: W, quality: u8) -> IoResult<()> {
    let width = pix.width();
    let height = pix.height();
    if width > u16::MAX as u32 || height > u16::MAX as u32 {
        return Err(IoError::EncodeError(format!(
            "image too large for JPEG: {}x{}",
            width, height
        )));
    }

    let depth = pix.depth();
    let (color_type, samples) = match depth {
        PixelDepth::Bit32 => (jpeg_encoder::ColorType::Rgb, 3),
        _ => (jpeg_encoder::ColorType::Luma, 1),
    };

    let mut data = Vec::with_capacity(width as usize * height as usize * samples);
    for y in 0..height {
        for x in 0..width {
            let val = pix.get_pixel_unchecked(x, y);
            match depth {
                PixelDepth::Bit1 => data.push(if val == 1 { 0 } else { 255 }),
                PixelDepth::Bit2 => data.push((val * 85) as u8),
                PixelDepth::Bit4 => data.push((val * 17) as u8),
                PixelDepth::Bit8 => data.push(val as u8),
                PixelDepth::Bit16 => data.push((val >> 8) as u8),
                PixelDepth::Bit32 => {
                    let (r, g, b) = color::extract_rgb(val);
                    data.extend_from_slice(&[r, g, b]);
                }
            }
        }
    }

    let encoder = jpeg_encoder::Encoder::new(writer, quality);
    encoder
        .encode(&data, width as u16, height as u16, color_type)
        .map_err(|e| IoError::EncodeError(format!("JPEG encode error: {}", e)))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_jpeg_roundtrip_gray() {
        let mut pm = PixMut::new(16, 16, PixelDepth::Bit8).unwrap();
        pm.set_all_arbitrary(200);
        let pix: Pix = pm.into();

        let mut buf = Vec::new();
        write_jpeg(&pix, &mut buf, 90).unwrap();
        let back = read_jpeg(Cursor::new(buf)).unwrap();
        assert_eq!(back.depth(), PixelDepth::Bit8);
        assert_eq!(back.informat(), ImageFormat::Jpeg);
        // Lossy, but a flat image stays close
        let v = back.get_pixel(8, 8).unwrap() as i32;
        assert!((v - 200).abs() <= 2);
    }

    #[test]
    fn test_jpeg_roundtrip_binary_is_gray() {
        let mut pm = PixMut::new(8, 8, PixelDepth::Bit1).unwrap();
        pm.set_all_arbitrary(1);
        let pix: Pix = pm.into();

        let mut buf = Vec::new();
        write_jpeg(&pix, &mut buf, DEFAULT_QUALITY).unwrap();
        let back = read_jpeg(Cursor::new(buf)).unwrap();
        assert_eq!(back.depth(), PixelDepth::Bit8);
        assert!(back.get_pixel(4, 4).unwrap() < 8);
    }

    #[test]
    fn test_jpeg_garbage_is_decode_error() {
        let data = [0xFF, 0xD8, 0xFF, 0x00, 0x01, 0x02];
        assert!(matches!(
            read_jpeg(Cursor::new(&data[..])),
            Err(IoError::DecodeError(_))
        ));
    }
}
