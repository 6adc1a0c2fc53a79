//! # scandoc-backend - Scanned-PDF conversion pipeline
//!
//! Turns an image-based PDF into a normalized text document:
//!
//! ```text
//! image bytes ──▶ normalize ──▶ single-page PDF
//!                                    │
//! pdf bytes ───────────────────────▶ │
//!                                    ▼
//!                  classify pages (image blocks?)
//!                                    │
//!                                    ▼
//!                  render ──▶ detect text ──▶ transform
//!                                    │
//!                                    ▼
//!                            {"pages": [...]}
//! ```
//!
//! - [`image_to_pdf`] normalizes raster input (alpha flattening, EXIF
//!   orientation correction) into a deterministic one-page PDF.
//! - [`ScannedPdfConverter`] orchestrates the per-page pipeline over a
//!   [`TextDetector`](scandoc_ocr::TextDetector) implementation.
//! - [`ResultTransformer`] / [`PixelResultTransformer`] reshape raw OCR
//!   responses into the output schema.
//!
//! Rendering and document parsing are delegated to pdfium, which must be
//! available as a shared library at runtime.

pub mod converter;
pub mod normalize;
mod pdf;
pub mod transform;

pub use converter::{ScannedPdfConverter, DEFAULT_RENDER_DPI};
pub use normalize::image_to_pdf;
pub use transform::{PixelResultTransformer, ResultTransformer};
