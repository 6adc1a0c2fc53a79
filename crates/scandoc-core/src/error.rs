//! Error types for scanned-document conversion operations.

use thiserror::Error;

/// Error types that can occur while converting a scanned document.
///
/// Conversion never retries or recovers: the first failure aborts the whole
/// run and is surfaced to the caller unchanged.
///
/// # Examples
///
/// ```rust,ignore
/// use scandoc_backend::ScannedPdfConverter;
/// use scandoc_core::ScandocError;
///
/// let converter = ScannedPdfConverter::new()?;
///
/// match converter.convert(&pdf_bytes, None, &mut detector) {
///     Ok(document) => println!("Converted {} pages", document.pages.len()),
///     Err(ScandocError::DocumentOpen(msg)) => eprintln!("Unreadable document: {msg}"),
///     Err(e) => eprintln!("Conversion failed: {e}"),
/// }
/// # Ok::<(), ScandocError>(())
/// ```
#[derive(Error, Debug)]
pub enum ScandocError {
    /// The input bytes are not a recognizable raster image format.
    #[error("Image decode error: {0}")]
    ImageDecode(String),

    /// The input bytes cannot be parsed as a PDF document.
    #[error("Document open error: {0}")]
    DocumentOpen(String),

    /// The text-detection adapter failed. Adapter errors are opaque and
    /// propagate uncaught; this conversion is fatal for the whole run.
    #[error("OCR error: {0}")]
    Ocr(#[from] anyhow::Error),

    /// Backend-specific error (pdfium binding, page rendering, PDF writing).
    #[error("Backend error: {0}")]
    Backend(String),

    /// File I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Type alias for [`Result<T, ScandocError>`].
pub type Result<T> = std::result::Result<T, ScandocError>;
