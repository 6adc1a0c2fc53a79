//! Text-detection adapter for scandoc
//!
//! This crate defines the synchronous request/response boundary between the
//! conversion pipeline and an external text-detection engine: hand the
//! adapter a rasterized page, get back recognized text lines with pixel
//! bounding geometry. The engine itself is a black box; its errors propagate
//! to the caller uncaught.
//!
//! # Engines
//!
//! - [`TesseractDetector`] (feature `tesseract`): backed by `leptess`.
//!   Requires the Tesseract runtime and language data to be installed.
//!
//! Pipelines take `&mut dyn TextDetector`, so tests and embedders can plug
//! in their own engine without the feature.

use anyhow::Result;
use image::DynamicImage;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[cfg(feature = "tesseract")]
mod tesseract;

#[cfg(feature = "tesseract")]
pub use tesseract::TesseractDetector;

/// Adapter-specific errors
#[derive(Error, Debug)]
pub enum OcrError {
    /// The engine could not be initialized (missing runtime, bad language)
    #[error("Failed to initialize OCR engine: {0}")]
    EngineInit(String),

    /// Error while detecting text in an image
    #[error("Text detection failed: {0}")]
    Detection(String),
}

/// Bounding box for a detected text region, in pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Left coordinate (x)
    pub x: f32,
    /// Top coordinate (y)
    pub y: f32,
    /// Width
    pub width: f32,
    /// Height
    pub height: f32,
}

impl BoundingBox {
    /// Create a new bounding box
    #[inline]
    #[must_use = "bounding box is created but not used"]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Get the right edge coordinate
    #[inline]
    #[must_use = "right coordinate is computed but not used"]
    pub const fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Get the bottom edge coordinate
    #[inline]
    #[must_use = "bottom coordinate is computed but not used"]
    pub const fn bottom(&self) -> f32 {
        self.y + self.height
    }
}

/// A single line of recognized text with its bounding box
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextLine {
    /// The recognized text content
    pub text: String,
    /// Bounding box of the text region
    pub bbox: BoundingBox,
    /// Recognition confidence score (0.0 to 1.0)
    pub confidence: f32,
}

impl TextLine {
    /// Create a new text line
    #[inline]
    #[must_use = "text line is created but not used"]
    pub const fn new(text: String, bbox: BoundingBox, confidence: f32) -> Self {
        Self {
            text,
            bbox,
            confidence,
        }
    }
}

/// Synchronous text-detection service boundary.
///
/// One call per page image; responses come back in reading order as far as
/// the engine provides one. Implementations take `&mut self` because most
/// engines keep per-request state.
pub trait TextDetector {
    /// Detect text in a rasterized page image.
    ///
    /// # Errors
    ///
    /// Engine errors are opaque to the pipeline and abort the conversion.
    fn detect_text(&mut self, image: &DynamicImage) -> Result<Vec<TextLine>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[allow(clippy::float_cmp)]
    fn test_bounding_box_edges() {
        let bbox = BoundingBox::new(10.0, 20.0, 100.0, 50.0);
        assert_eq!(bbox.right(), 110.0);
        assert_eq!(bbox.bottom(), 70.0);
    }

    #[test]
    #[allow(clippy::float_cmp)]
    fn test_text_line_creation() {
        let bbox = BoundingBox::new(0.0, 0.0, 100.0, 20.0);
        let line = TextLine::new("Hello World".to_string(), bbox, 0.92);
        assert_eq!(line.text, "Hello World");
        assert_eq!(line.confidence, 0.92);
    }

    #[test]
    fn test_detector_is_object_safe() {
        struct Fixed(Vec<TextLine>);

        impl TextDetector for Fixed {
            fn detect_text(&mut self, _image: &DynamicImage) -> Result<Vec<TextLine>> {
                Ok(self.0.clone())
            }
        }

        let mut detector: Box<dyn TextDetector> = Box::new(Fixed(vec![TextLine::new(
            "x".to_string(),
            BoundingBox::new(0.0, 0.0, 1.0, 1.0),
            1.0,
        )]));

        let image = DynamicImage::new_rgb8(4, 4);
        let lines = detector.detect_text(&image).unwrap();
        assert_eq!(lines.len(), 1);
    }
}
