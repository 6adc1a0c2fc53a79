//! Pipeline orchestration: scanned-PDF bytes in, normalized document out.
//!
//! The converter walks pages strictly in order, classifies each one from
//! its layout blocks, and OCRs only the pages that plausibly hold scanned
//! content (at least one image block). Everything is synchronous and
//! single-threaded; page resources live for one loop iteration.

use crate::pdf;
use crate::transform::{PixelResultTransformer, ResultTransformer};
use image::GenericImageView;
use pdfium_render::prelude::*;
use scandoc_core::{BlockCounts, BoundingBox, NormalizedDocument, Result, ScandocError};
use scandoc_ocr::TextDetector;
use std::collections::BTreeSet;

/// Default rendering DPI.
///
/// 72 dpi makes one rendered pixel per PDF point, so a page produced by
/// [`image_to_pdf`](crate::image_to_pdf) renders back at its original pixel
/// dimensions.
pub const DEFAULT_RENDER_DPI: f32 = 72.0;

/// Placeholder used for the source and target identifiers in page records.
/// Per-file naming is the caller's concern, not the pipeline's.
const PLACEHOLDER_NAME: &str = "-";

/// Scanned-PDF to normalized-document converter.
///
/// Binds the pdfium library once at construction; each [`convert`] call
/// opens its own document and releases it on return.
///
/// [`convert`]: ScannedPdfConverter::convert
pub struct ScannedPdfConverter {
    pdfium: Pdfium,
    dpi: f32,
}

impl ScannedPdfConverter {
    /// Create a converter rendering at [`DEFAULT_RENDER_DPI`].
    ///
    /// # Errors
    ///
    /// Returns an error if the pdfium library cannot be bound.
    pub fn new() -> Result<Self> {
        Self::with_dpi(DEFAULT_RENDER_DPI)
    }

    /// Create a converter with a custom rendering DPI.
    ///
    /// # Errors
    ///
    /// Returns an error if the pdfium library cannot be bound.
    pub fn with_dpi(dpi: f32) -> Result<Self> {
        let bindings = Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path("./"))
            .or_else(|_| Pdfium::bind_to_system_library())
            .map_err(|e| ScandocError::Backend(format!("Failed to bind pdfium library: {e}")))?;

        Ok(Self {
            pdfium: Pdfium::new(bindings),
            dpi,
        })
    }

    /// Convert a scanned PDF into its normalized document representation.
    ///
    /// `selected_pages`, when given, restricts processing to those 1-based
    /// page numbers; other pages are skipped before any classification.
    /// Pages without image blocks are excluded from the output entirely.
    ///
    /// # Errors
    ///
    /// Returns [`ScandocError::DocumentOpen`] when the bytes cannot be
    /// parsed as a PDF; rendering and OCR errors propagate unchanged and
    /// abort the whole conversion.
    pub fn convert(
        &self,
        pdf_bytes: &[u8],
        selected_pages: Option<&BTreeSet<usize>>,
        detector: &mut dyn TextDetector,
    ) -> Result<NormalizedDocument> {
        let document = self
            .pdfium
            .load_pdf_from_byte_slice(pdf_bytes, None)
            .map_err(|e| ScandocError::DocumentOpen(e.to_string()))?;

        let page_count = document.pages().len();
        log::debug!("Converting document with {page_count} pages");

        let mut pages = Vec::new();
        for (index, page) in document.pages().iter().enumerate() {
            let page_number = index + 1;

            if let Some(selected) = selected_pages {
                if !selected.contains(&page_number) {
                    continue;
                }
            }

            let blocks = pdf::extract_page_blocks(&page);
            let counts = BlockCounts::tally(&blocks);
            if !counts.has_images() {
                log::debug!(
                    "Skipping page {page_number}: {} text blocks, no image blocks",
                    counts.text
                );
                continue;
            }

            pages.push(self.convert_page(&page, page_number, counts, detector)?);
        }

        Ok(NormalizedDocument { pages })
    }

    /// Render one retained page, run OCR, and build its normalized record.
    fn convert_page(
        &self,
        page: &PdfPage<'_>,
        page_number: usize,
        counts: BlockCounts,
        detector: &mut dyn TextDetector,
    ) -> Result<scandoc_core::PageRecord> {
        let image = pdf::render_page(page, self.dpi)?;
        let (width, height) = image.dimensions();
        log::debug!("Rendered page {page_number} at {width}x{height}");

        let lines = detector.detect_text(&image)?;

        let transformer = PixelResultTransformer::new(width, height);
        let mut spans = transformer.spans(&lines);
        if transformer.supports_normalized_bbox() {
            transformer.add_normalized_bbox(&mut spans);
        }

        let mut record = transformer.transform(
            PLACEHOLDER_NAME,
            PLACEHOLDER_NAME,
            page_number,
            counts,
            spans,
        );
        record.bbox = BoundingBox::full_page(width, height);
        Ok(record)
    }
}
