//! scandoc CLI - scanned-PDF to OCR-JSON converter
//!
//! Converts image-based PDF documents (or raster images, normalized to a
//! one-page PDF first) into a normalized `{"pages": [...]}` JSON document.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use scandoc_backend::{image_to_pdf, ScannedPdfConverter};
use scandoc_ocr::TextDetector;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

/// File extensions treated as raster images and normalized before
/// conversion
const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "tif", "tiff", "bmp", "webp"];

#[derive(Parser)]
#[command(
    name = "scandoc",
    version,
    about = "Convert scanned PDF documents to structured OCR text"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Convert a scanned PDF or image to normalized OCR JSON
    Convert {
        /// Input document (PDF, or an image to normalize first)
        input: PathBuf,

        /// Output JSON path (defaults to the input stem + .json)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Comma-separated 1-based page numbers to process
        #[arg(long, value_delimiter = ',')]
        pages: Vec<usize>,

        /// OCR language passed to the Tesseract engine
        #[arg(long, default_value = "eng")]
        lang: String,
    },

    /// Normalize an image into a deterministic single-page PDF
    Normalize {
        /// Input image
        input: PathBuf,

        /// Output PDF path (defaults to the input stem + .pdf)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .target(env_logger::Target::Stderr)
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("{} {e:#}", "error:".red().bold());
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Convert {
            input,
            output,
            pages,
            lang,
        } => convert(&input, output, &pages, &lang),
        Command::Normalize { input, output } => normalize(&input, output),
    }
}

fn is_image_input(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
}

fn default_output(input: &Path, extension: &str) -> PathBuf {
    input.with_extension(extension)
}

#[cfg(feature = "tesseract")]
fn build_detector(lang: &str) -> Result<Box<dyn TextDetector>> {
    let detector = scandoc_ocr::TesseractDetector::new(lang)
        .with_context(|| format!("failed to start Tesseract for language '{lang}'"))?;
    Ok(Box::new(detector))
}

#[cfg(not(feature = "tesseract"))]
fn build_detector(_lang: &str) -> Result<Box<dyn TextDetector>> {
    anyhow::bail!("this build does not include an OCR engine; rebuild with --features tesseract")
}

fn convert(input: &Path, output: Option<PathBuf>, pages: &[usize], lang: &str) -> Result<()> {
    let mut detector = build_detector(lang)?;

    let raw = fs::read(input).with_context(|| format!("failed to read {}", input.display()))?;
    let pdf_bytes = if is_image_input(input) {
        log::info!("Normalizing image input {}", input.display());
        image_to_pdf(&raw)?
    } else {
        raw
    };

    let selected: Option<BTreeSet<usize>> = if pages.is_empty() {
        None
    } else {
        Some(pages.iter().copied().collect())
    };

    let converter = ScannedPdfConverter::new()?;
    let document = converter.convert(&pdf_bytes, selected.as_ref(), detector.as_mut())?;

    let output = output.unwrap_or_else(|| default_output(input, "json"));
    fs::write(&output, document.to_json()?)
        .with_context(|| format!("failed to write {}", output.display()))?;

    println!(
        "{} {} page(s) -> {}",
        "converted".green().bold(),
        document.page_count(),
        output.display()
    );
    Ok(())
}

fn normalize(input: &Path, output: Option<PathBuf>) -> Result<()> {
    let raw = fs::read(input).with_context(|| format!("failed to read {}", input.display()))?;
    let pdf = image_to_pdf(&raw)?;

    let output = output.unwrap_or_else(|| default_output(input, "pdf"));
    fs::write(&output, pdf)
        .with_context(|| format!("failed to write {}", output.display()))?;

    println!(
        "{} {} -> {}",
        "normalized".green().bold(),
        input.display(),
        output.display()
    );
    Ok(())
}
