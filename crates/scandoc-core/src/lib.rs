//! # scandoc-core - Document types for scanned-PDF conversion
//!
//! Core data model shared across the scandoc workspace:
//!
//! - [`BoundingBox`] - corner-coordinate boxes, serialized as flat arrays
//! - [`Block`] / [`BlockKind`] / [`BlockCounts`] - layout blocks extracted
//!   from a page's native object metadata, used to decide which pages are
//!   scanned content worth OCR'ing
//! - [`SpanRecord`] / [`PageRecord`] / [`NormalizedDocument`] - the
//!   normalized output schema (`{"pages": [...]}`)
//! - [`ScandocError`] / [`Result`] - workspace error type
//!
//! All records are plain serde types; nothing here touches pdfium, image
//! decoding, or OCR engines. Those live in `scandoc-backend` and
//! `scandoc-ocr`.

pub mod block;
pub mod document;
pub mod error;
pub mod geometry;

pub use block::{Block, BlockCounts, BlockKind};
pub use document::{NormalizedDocument, PageRecord, SpanRecord};
pub use error::{Result, ScandocError};
pub use geometry::BoundingBox;
