//! Normalized output document schema.
//!
//! The conversion output is a single JSON-serializable record with the shape
//! `{"pages": [...]}`. Pages are listed in document order but are not
//! necessarily contiguous: pages that were deselected or carried no image
//! blocks are omitted entirely.

use crate::block::BlockCounts;
use crate::geometry::BoundingBox;
use serde::{Deserialize, Serialize};

/// One recognized-text response after transformation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpanRecord {
    /// Recognized text content (NFC-normalized)
    pub text: String,
    /// Bounding box in pixel coordinates `[x0, y0, x1, y1]`
    pub bbox: BoundingBox,
    /// Bounding box in normalized `[0, 1]` page coordinates; present only
    /// when the transformer supports the enrichment
    #[serde(skip_serializing_if = "Option::is_none")]
    pub normalized_bbox: Option<BoundingBox>,
    /// Recognition confidence (0.0 to 1.0)
    pub confidence: f32,
}

/// Normalized record for one processed page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageRecord {
    /// 1-based page number in the source document
    pub page: usize,
    /// Placeholder source identifier; this pipeline does not track per-file
    /// naming
    pub source: String,
    /// Placeholder target identifier
    pub target: String,
    /// Layout block counts that drove the page classification
    pub blocks: BlockCounts,
    /// Recognized-text responses for the page
    pub responses: Vec<SpanRecord>,
    /// All recognized text joined with newlines
    pub text: String,
    /// Full-page extent `[0, 0, width, height]` in pixels
    pub bbox: BoundingBox,
}

/// Final conversion output: the ordered list of processed page records.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NormalizedDocument {
    /// Processed pages in document order (skipped pages omitted)
    pub pages: Vec<PageRecord>,
}

impl NormalizedDocument {
    /// Serialize the document to pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Number of processed pages in the output.
    #[inline]
    #[must_use = "page count is returned but not used"]
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_page() -> PageRecord {
        PageRecord {
            page: 3,
            source: "-".to_string(),
            target: "-".to_string(),
            blocks: BlockCounts { text: 0, image: 1 },
            responses: vec![SpanRecord {
                text: "INVOICE".to_string(),
                bbox: BoundingBox::new(40.0, 30.0, 180.0, 55.0),
                normalized_bbox: Some(BoundingBox::new(0.1, 0.05, 0.45, 0.11)),
                confidence: 0.93,
            }],
            text: "INVOICE".to_string(),
            bbox: BoundingBox::full_page(400, 500),
        }
    }

    #[test]
    fn test_root_shape_is_pages_list() {
        let document = NormalizedDocument {
            pages: vec![sample_page()],
        };

        let value: serde_json::Value =
            serde_json::from_str(&document.to_json().unwrap()).unwrap();
        let pages = value.get("pages").unwrap().as_array().unwrap();
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0]["page"], 3);
        assert_eq!(pages[0]["source"], "-");
        assert_eq!(pages[0]["bbox"], serde_json::json!([0.0, 0.0, 400.0, 500.0]));
    }

    #[test]
    fn test_empty_document_serializes_to_empty_pages() {
        let document = NormalizedDocument::default();
        let value: serde_json::Value =
            serde_json::from_str(&document.to_json().unwrap()).unwrap();
        assert_eq!(value, serde_json::json!({ "pages": [] }));
    }

    #[test]
    fn test_normalized_bbox_omitted_when_unsupported() {
        let mut page = sample_page();
        page.responses[0].normalized_bbox = None;

        let json = serde_json::to_string(&page).unwrap();
        assert!(!json.contains("normalized_bbox"));
    }

    #[test]
    fn test_document_round_trip() {
        let document = NormalizedDocument {
            pages: vec![sample_page()],
        };
        let json = document.to_json().unwrap();
        let back: NormalizedDocument = serde_json::from_str(&json).unwrap();
        assert_eq!(document, back);
    }
}
