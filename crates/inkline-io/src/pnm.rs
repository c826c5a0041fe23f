//! PNM (Portable Any Map) format support
//!
//! Reads and writes PBM (P4 binary), PGM (P5 binary), and
//! PPM (P6 binary) formats. PBM stores ink as a set bit, which matches
//! the binary raster convention, so no inversion is needed.

use crate::{IoError, IoResult};
use inkline_core::{ImageFormat, Pix, PixMut, PixelDepth, color};
use std::io::{BufRead, Read, Write};

/// Header fields shared by P4/P5/P6.
#[derive(Debug, Clone, Copy)]
struct PnmHeader {
    kind: u8,
    width: u32,
    height: u32,
    maxval: u32,
}

/// Read one whitespace-delimited header token, skipping `#` comments.
fn read_token<R: BufRead>(reader: &mut R) -> IoResult<String> {
    let mut token = String::new();
    let mut byte = [0u8; 1];
    loop {
        if reader.read(&mut byte)? == 0 {
            if token.is_empty() {
                return Err(IoError::DecodeError("PNM header truncated".to_string()));
            }
            return Ok(token);
        }
        match byte[0] {
            b'#' if token.is_empty() => {
                let mut comment = Vec::new();
                reader.read_until(b'\n', &mut comment)?;
            }
            b if b.is_ascii_whitespace() => {
                if !token.is_empty() {
                    return Ok(token);
                }
            }
            b => token.push(b as char),
        }
    }
}

fn read_number<R: BufRead>(reader: &mut R, what: &str) -> IoResult<u32> {
    let token = read_token(reader)?;
    token
        .parse::<u32>()
        .map_err(|_| IoError::DecodeError(format!("invalid PNM {}: {:?}", what, token)))
}

fn read_header<R: BufRead>(reader: &mut R) -> IoResult<PnmHeader> {
    let magic = read_token(reader)?;
    let kind = match magic.as_bytes() {
        [b'P', k @ (b'4' | b'5' | b'6')] => *k,
        [b'P', b'1'..=b'3'] => {
            return Err(IoError::UnsupportedFormat(format!(
                "ASCII PNM variant {} is not supported",
                magic
            )));
        }
        _ => {
            return Err(IoError::DecodeError(format!(
                "invalid PNM magic: {:?}",
                magic
            )));
        }
    };

    let width = read_number(reader, "width")?;
    let height = read_number(reader, "height")?;
    let maxval = if kind == b'4' {
        1
    } else {
        read_number(reader, "maxval")?
    };
    if maxval == 0 || maxval > 65535 {
        return Err(IoError::DecodeError(format!(
            "invalid PNM maxval: {}",
            maxval
        )));
    }

    Ok(PnmHeader {
        kind,
        width,
        height,
        maxval,
    })
}

/// Read a PNM image (P4/P5/P6) from a reader.
///
/// Returns a `Pix` at 1 bpp (PBM), 8 or 16 bpp (PGM, depending on
/// maxval), or 32 bpp (PPM).
pub fn read_pnm<R: BufRead>(mut reader: R) -> IoResult<Pix> {
    let header = read_header(&mut reader)?;
    let PnmHeader {
        kind,
        width,
        height,
        maxval,
    } = header;
    let wide = maxval > 255;

    let depth = match kind {
        b'4' => PixelDepth::Bit1,
        b'5' if wide => PixelDepth::Bit16,
        b'5' => PixelDepth::Bit8,
        _ => PixelDepth::Bit32,
    };
    let mut pix_mut = PixMut::new(width, height, depth)?;
    pix_mut.set_informat(ImageFormat::Pnm);

    let sample_bytes = if wide { 2 } else { 1 };
    let row_bytes = match kind {
        b'4' => width.div_ceil(8) as usize,
        b'5' => width as usize * sample_bytes,
        _ => width as usize * 3 * sample_bytes,
    };

    let mut row = vec![0u8; row_bytes];
    for y in 0..height {
        reader
            .read_exact(&mut row)
            .map_err(|e| IoError::DecodeError(format!("PNM raster truncated: {}", e)))?;

        match kind {
            b'4' => {
                for x in 0..width {
                    let bit = (row[(x / 8) as usize] >> (7 - (x % 8))) & 1;
                    pix_mut.set_pixel_unchecked(x, y, bit as u32);
                }
            }
            b'5' => {
                for x in 0..width {
                    let val = if wide {
                        let i = x as usize * 2;
                        ((row[i] as u32) << 8) | row[i + 1] as u32
                    } else {
                        row[x as usize] as u32
                    };
                    pix_mut.set_pixel_unchecked(x, y, val);
                }
            }
            _ => {
                for x in 0..width {
                    let i = x as usize * 3 * sample_bytes;
                    let rgb = if wide {
                        (row[i], row[i + 2], row[i + 4])
                    } else {
                        (row[i], row[i + 1], row[i + 2])
                    };
                    pix_mut.set_pixel_unchecked(x, y, color::compose_rgb(rgb.0, rgb.1, rgb.2));
                }
            }
        }
    }

    Ok(pix_mut.into())
}

/// Write a `Pix` as binary PNM to a writer.
///
/// Chooses P4 (1 bpp), P5 (8 or 16 bpp grayscale), or P6 (32 bpp RGB)
/// based on the pixel depth. 2 and 4 bpp rasters are written as P5 with
/// a matching maxval.
pub fn write_pnm<W: Write>(pix: &Pix, mut writer: W) -> IoResult<()> {
    let width = pix.width();
    let height = pix.height();
    let depth = pix.depth();

    match depth {
        PixelDepth::Bit1 => writeln!(writer, "P4\n{} {}", width, height)?,
        PixelDepth::Bit32 => writeln!(writer, "P6\n{} {}\n255", width, height)?,
        _ => writeln!(writer, "P5\n{} {}\n{}", width, height, depth.max_value())?,
    }

    let row_bytes = match depth {
        PixelDepth::Bit1 => width.div_ceil(8) as usize,
        PixelDepth::Bit16 => width as usize * 2,
        PixelDepth::Bit32 => width as usize * 3,
        _ => width as usize,
    };
    let mut row = vec![0u8; row_bytes];

    for y in 0..height {
        row.fill(0);
        for x in 0..width {
            let val = pix.get_pixel_unchecked(x, y);
            match depth {
                PixelDepth::Bit1 => {
                    if val != 0 {
                        row[(x / 8) as usize] |= 1 << (7 - (x % 8));
                    }
                }
                PixelDepth::Bit16 => {
                    let i = x as usize * 2;
                    row[i] = (val >> 8) as u8;
                    row[i + 1] = val as u8;
                }
                PixelDepth::Bit32 => {
                    let (r, g, b) = color::extract_rgb(val);
                    let i = x as usize * 3;
                    row[i..i + 3].copy_from_slice(&[r, g, b]);
                }
                _ => row[x as usize] = val as u8,
            }
        }
        writer.write_all(&row)?;
    }

    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_pnm_pbm_roundtrip() {
        let mut pm = PixMut::new(11, 3, PixelDepth::Bit1).unwrap();
        pm.set_pixel(0, 0, 1).unwrap();
        pm.set_pixel(10, 2, 1).unwrap();
        let pix: Pix = pm.into();

        let mut buf = Vec::new();
        write_pnm(&pix, &mut buf).unwrap();
        assert!(buf.starts_with(b"P4\n11 3\n"));

        let pix2 = read_pnm(Cursor::new(buf)).unwrap();
        assert_eq!(pix2.depth(), PixelDepth::Bit1);
        assert_eq!(pix2.informat(), ImageFormat::Pnm);
        assert_eq!(pix2.get_pixel(0, 0), Some(1));
        assert_eq!(pix2.get_pixel(10, 2), Some(1));
        assert_eq!(pix2.count_pixels().unwrap(), 2);
    }

    #[test]
    fn test_pnm_header_comments() {
        let data = b"P5\n# created by hand\n2 1\n# max\n255\n\x10\xf0";
        let pix = read_pnm(Cursor::new(&data[..])).unwrap();
        assert_eq!(pix.depth(), PixelDepth::Bit8);
        assert_eq!(pix.get_pixel(0, 0), Some(0x10));
        assert_eq!(pix.get_pixel(1, 0), Some(0xf0));
    }

    #[test]
    fn test_pnm_wide_pgm() {
        let data = b"P5 1 1 65535\n\xab\xcd";
        let pix = read_pnm(Cursor::new(&data[..])).unwrap();
        assert_eq!(pix.depth(), PixelDepth::Bit16);
        assert_eq!(pix.get_pixel(0, 0), Some(0xabcd));
    }

    #[test]
    fn test_pnm_ppm_roundtrip() {
        let mut pm = PixMut::new(2, 2, PixelDepth::Bit32).unwrap();
        pm.set_rgb(1, 1, 10, 20, 30).unwrap();
        let pix: Pix = pm.into();
        let mut buf = Vec::new();
        write_pnm(&pix, &mut buf).unwrap();
        let pix2 = read_pnm(Cursor::new(buf)).unwrap();
        assert_eq!(pix2.get_rgb(1, 1), Some((10, 20, 30)));
    }

    #[test]
    fn test_pnm_malformed() {
        assert!(matches!(
            read_pnm(Cursor::new(&b"P5\n4 4\n255\n\x00"[..])),
            Err(IoError::DecodeError(_))
        ));
        assert!(matches!(
            read_pnm(Cursor::new(&b"P2\n1 1\n255\n0"[..])),
            Err(IoError::UnsupportedFormat(_))
        ));
        assert!(read_pnm(Cursor::new(&b"P5\nx 1\n"[..])).is_err());
    }
}
