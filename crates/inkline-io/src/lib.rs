//! inkline-io - Image I/O for the inkline OCR pipeline
//!
//! Decodes image files into [`Pix`] rasters and encodes rasters back to
//! disk. Supported formats:
//!
//! | format | read | write | feature |
//! |--------|------|-------|---------|
//! | PNM (P4/P5/P6) | yes | yes | `pnm` |
//! | PNG | yes | yes | `png-format` |
//! | JPEG | yes | yes | `jpeg` |
//!
//! The format of an input is always detected from its magic bytes, never
//! from the file extension.

mod error;
mod format;
#[cfg(feature = "jpeg")]
pub mod jpeg;
#[cfg(feature = "png-format")]
pub mod png;
#[cfg(feature = "pnm")]
pub mod pnm;

pub use error::{IoError, IoResult};
pub use format::{detect_format, detect_format_from_bytes};
pub use inkline_core::ImageFormat;

use inkline_core::Pix;
use std::fs::File;
use std::io::{BufWriter, Cursor, Write};
use std::path::Path;

/// Read an image from a file path
///
/// # Errors
///
/// Returns [`IoError::Io`] when the file cannot be opened,
/// [`IoError::UnsupportedFormat`] for an unrecognized or disabled format,
/// and [`IoError::DecodeError`] for malformed data.
pub fn read_image<P: AsRef<Path>>(path: P) -> IoResult<Pix> {
    let data = std::fs::read(path)?;
    read_image_mem(&data)
}

/// Read an image from an in-memory buffer
pub fn read_image_mem(data: &[u8]) -> IoResult<Pix> {
    let format = detect_format_from_bytes(data)?;
    let cursor = Cursor::new(data);

    match format {
        #[cfg(feature = "png-format")]
        ImageFormat::Png => png::read_png(cursor),
        #[cfg(feature = "jpeg")]
        ImageFormat::Jpeg => jpeg::read_jpeg(cursor),
        #[cfg(feature = "pnm")]
        ImageFormat::Pnm => pnm::read_pnm(cursor),
        #[allow(unreachable_patterns)]
        other => {
            let _ = cursor;
            Err(IoError::UnsupportedFormat(format!(
                "{:?} support is not enabled",
                other
            )))
        }
    }
}

/// Write an image to a file path
///
/// When `format` is [`ImageFormat::Unknown`] the format is chosen from the
/// path's extension.
pub fn write_image<P: AsRef<Path>>(pix: &Pix, path: P, format: ImageFormat) -> IoResult<()> {
    let path = path.as_ref();
    let format = match format {
        ImageFormat::Unknown => path
            .extension()
            .and_then(|e| e.to_str())
            .map(ImageFormat::from_extension)
            .unwrap_or(ImageFormat::Unknown),
        f => f,
    };

    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_image_to(pix, &mut writer, format)?;
    writer.flush()?;
    Ok(())
}

/// Encode an image into an in-memory buffer
pub fn write_image_mem(pix: &Pix, format: ImageFormat) -> IoResult<Vec<u8>> {
    let mut buf = Vec::new();
    write_image_to(pix, &mut buf, format)?;
    Ok(buf)
}

fn write_image_to<W: Write>(pix: &Pix, writer: W, format: ImageFormat) -> IoResult<()> {
    match format {
        #[cfg(feature = "png-format")]
        ImageFormat::Png => png::write_png(pix, writer),
        #[cfg(feature = "pnm")]
        ImageFormat::Pnm => pnm::write_pnm(pix, writer),
        #[cfg(feature = "jpeg")]
        ImageFormat::Jpeg => jpeg::write_jpeg(pix, writer, jpeg::DEFAULT_QUALITY),
        #[allow(unreachable_patterns)]
        other => {
            let _ = writer;
            Err(IoError::UnsupportedFormat(format!(
                "cannot write {:?} images",
                other
            )))
        }
    }
}
