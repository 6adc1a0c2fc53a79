//! Result transformation: raw OCR responses into normalized page records.
//!
//! The transformer turns the adapter's pixel-space text lines into the
//! output schema: corner-coordinate boxes, optional normalized `[0, 1]`
//! boxes, NFC-normalized text, and the final per-page record with
//! placeholder source/target identifiers.

use scandoc_core::{BlockCounts, BoundingBox, PageRecord, SpanRecord};
use scandoc_ocr::TextLine;
use unicode_normalization::UnicodeNormalization;

/// Transforms per-page OCR output into [`PageRecord`]s.
///
/// Normalized-box support is a capability, not an assumption: callers probe
/// [`supports_normalized_bbox`](ResultTransformer::supports_normalized_bbox)
/// and skip the enrichment when a transformer lacks it, rather than failing.
pub trait ResultTransformer {
    /// Convert raw detector lines into span records.
    fn spans(&self, lines: &[TextLine]) -> Vec<SpanRecord>;

    /// Whether this transformer can attach normalized bounding boxes.
    fn supports_normalized_bbox(&self) -> bool {
        false
    }

    /// Attach normalized bounding boxes to the given spans.
    ///
    /// The default implementation does nothing; only call it after a
    /// positive capability probe.
    fn add_normalized_bbox(&self, _spans: &mut [SpanRecord]) {}

    /// Assemble the final page record.
    fn transform(
        &self,
        source: &str,
        target: &str,
        page_number: usize,
        blocks: BlockCounts,
        spans: Vec<SpanRecord>,
    ) -> PageRecord;
}

/// Transformer for pages rendered to a known pixel size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelResultTransformer {
    width: u32,
    height: u32,
}

impl PixelResultTransformer {
    /// Create a transformer for a page rendered at `width` x `height`
    /// pixels.
    #[inline]
    #[must_use = "transformer is created but not used"]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// NFC-normalize recognized text and trim stray edge whitespace.
fn normalize_text(text: &str) -> String {
    text.trim().nfc().collect()
}

impl ResultTransformer for PixelResultTransformer {
    fn spans(&self, lines: &[TextLine]) -> Vec<SpanRecord> {
        lines
            .iter()
            .map(|line| SpanRecord {
                text: normalize_text(&line.text),
                bbox: BoundingBox::new(
                    f64::from(line.bbox.x),
                    f64::from(line.bbox.y),
                    f64::from(line.bbox.right()),
                    f64::from(line.bbox.bottom()),
                ),
                normalized_bbox: None,
                confidence: line.confidence,
            })
            .collect()
    }

    fn supports_normalized_bbox(&self) -> bool {
        true
    }

    fn add_normalized_bbox(&self, spans: &mut [SpanRecord]) {
        for span in spans {
            span.normalized_bbox = Some(span.bbox.normalized(self.width, self.height));
        }
    }

    fn transform(
        &self,
        source: &str,
        target: &str,
        page_number: usize,
        blocks: BlockCounts,
        spans: Vec<SpanRecord>,
    ) -> PageRecord {
        let text = spans
            .iter()
            .map(|span| span.text.as_str())
            .collect::<Vec<_>>()
            .join("\n");

        PageRecord {
            page: page_number,
            source: source.to_string(),
            target: target.to_string(),
            blocks,
            responses: spans,
            text,
            bbox: BoundingBox::default(),
        }
    }
}
