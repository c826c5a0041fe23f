//! `inkline` CLI - Recognize text in an image with the rule-based pipeline

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use inkline::io::{ImageFormat, read_image, write_image};
use inkline::recog::{
    CellSize, LineSegOptions, OcrOptions, ReferenceRecognizer, TesseractCli, TrailingLinePolicy,
    recognize,
};

#[derive(Parser)]
#[command(name = "inkline")]
#[command(about = "Rudimentary OCR: binarize, segment lines and cells, classify")]
#[command(version)]
struct Cli {
    /// Image to recognize (PNG, JPEG or binary PNM)
    image: PathBuf,

    /// Binarization threshold; luminance at or below is ink
    #[arg(short, long, default_value_t = 128)]
    threshold: u8,

    /// Minimum text line height in pixels
    #[arg(long, default_value_t = 5)]
    min_line_height: u32,

    /// Character cell width in pixels
    #[arg(long, default_value_t = 10)]
    cell_width: u32,

    /// Character cell height in pixels
    #[arg(long, default_value_t = 20)]
    cell_height: u32,

    /// Keep a text line that runs into the bottom edge
    #[arg(long)]
    flush_trailing_line: bool,

    /// Where to write the binarized image
    #[arg(short, long, default_value = "binaryImage.png")]
    binary_out: PathBuf,

    /// Also run tesseract on the binarized image and print its text
    #[arg(short, long)]
    reference: bool,

    /// Language for the reference recognizer
    #[arg(short, long, requires = "reference")]
    lang: Option<String>,

    /// Log every classified cell
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn ocr_options(&self) -> OcrOptions {
        let trailing = if self.flush_trailing_line {
            TrailingLinePolicy::Flush
        } else {
            TrailingLinePolicy::Drop
        };
        OcrOptions::default()
            .with_threshold(self.threshold)
            .with_line_options(
                LineSegOptions::default()
                    .with_min_line_height(self.min_line_height)
                    .with_trailing_line(trailing),
            )
            .with_cell_size(CellSize::new(self.cell_width, self.cell_height))
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging; RUST_LOG overrides the default level
    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();

    let pix = read_image(&cli.image)
        .with_context(|| format!("failed to read {}", cli.image.display()))?;
    info!(
        width = pix.width(),
        height = pix.height(),
        depth = pix.depth().bits(),
        "loaded {}",
        cli.image.display()
    );

    let options = cli.ocr_options();
    options.validate().context("invalid options")?;
    let result = recognize(&pix, &options).context("recognition failed")?;

    write_image(&result.binary, &cli.binary_out, ImageFormat::Png)
        .with_context(|| format!("failed to write {}", cli.binary_out.display()))?;
    info!("binary image written to {}", cli.binary_out.display());

    if cli.reference {
        let mut tesseract = TesseractCli::default();
        if let Some(lang) = &cli.lang {
            tesseract = tesseract.with_language(lang.as_str());
        }
        match tesseract.recognize_file(&cli.binary_out) {
            Ok(text) => println!("Extracted Text:\n{}", text),
            Err(e) => warn!("reference recognition unavailable: {}", e),
        }
    }

    for cell in result.cells() {
        println!(
            "{} [{:.2}, {}] -> {}",
            cell.bounds, cell.features.aspect_ratio, cell.features.ink_count, cell.label
        );
    }
    println!("Complete: {}", result.text);

    Ok(())
}
