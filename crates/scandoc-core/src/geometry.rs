//! Geometric primitives for page layout.
//!
//! Bounding boxes use a top-left origin with corner coordinates
//! `(x0, y0)`-`(x1, y1)`. They serialize as a flat 4-element array, which is
//! the shape the output document uses for `bbox` fields.

use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box with corner coordinates.
///
/// Invariant: all coordinates are non-negative, `x1 >= x0` and `y1 >= y0`.
/// The invariant is enforced on deserialization; constructors in this
/// workspace only produce boxes that satisfy it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(into = "[f64; 4]", try_from = "[f64; 4]")]
pub struct BoundingBox {
    /// Left edge
    pub x0: f64,
    /// Top edge
    pub y0: f64,
    /// Right edge
    pub x1: f64,
    /// Bottom edge
    pub y1: f64,
}

impl BoundingBox {
    /// Create a new bounding box from corner coordinates.
    #[inline]
    #[must_use = "bounding box is created but not used"]
    pub const fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Full-page extent `[0, 0, width, height]` for a rendered page.
    #[inline]
    #[must_use = "bounding box is created but not used"]
    pub fn full_page(width: u32, height: u32) -> Self {
        Self::new(0.0, 0.0, f64::from(width), f64::from(height))
    }

    /// Width of the box.
    #[inline]
    #[must_use = "box width is computed but not used"]
    pub fn width(&self) -> f64 {
        self.x1 - self.x0
    }

    /// Height of the box.
    #[inline]
    #[must_use = "box height is computed but not used"]
    pub fn height(&self) -> f64 {
        self.y1 - self.y0
    }

    /// Check the box invariant: non-negative coordinates, `x1 >= x0`,
    /// `y1 >= y0`.
    #[inline]
    #[must_use = "validity check result is returned but not used"]
    pub fn is_valid(&self) -> bool {
        self.x0 >= 0.0 && self.y0 >= 0.0 && self.x1 >= self.x0 && self.y1 >= self.y0
    }

    /// Express this pixel-space box in normalized `[0, 1]` coordinates
    /// relative to the given page dimensions.
    ///
    /// Components are clamped into the unit interval, so boxes that slightly
    /// overflow the page (common with detector output) still normalize to
    /// valid coordinates.
    #[inline]
    #[must_use = "normalized box is returned but not used"]
    pub fn normalized(&self, page_width: u32, page_height: u32) -> Self {
        let w = f64::from(page_width.max(1));
        let h = f64::from(page_height.max(1));
        Self {
            x0: (self.x0 / w).clamp(0.0, 1.0),
            y0: (self.y0 / h).clamp(0.0, 1.0),
            x1: (self.x1 / w).clamp(0.0, 1.0),
            y1: (self.y1 / h).clamp(0.0, 1.0),
        }
    }

    /// Corner coordinates as a flat array `[x0, y0, x1, y1]`.
    #[inline]
    #[must_use = "corner array is returned but not used"]
    pub const fn to_array(&self) -> [f64; 4] {
        [self.x0, self.y0, self.x1, self.y1]
    }
}

impl From<BoundingBox> for [f64; 4] {
    #[inline]
    fn from(bbox: BoundingBox) -> Self {
        bbox.to_array()
    }
}

impl TryFrom<[f64; 4]> for BoundingBox {
    type Error = String;

    fn try_from(values: [f64; 4]) -> std::result::Result<Self, Self::Error> {
        let bbox = Self::new(values[0], values[1], values[2], values[3]);
        if bbox.is_valid() {
            Ok(bbox)
        } else {
            Err(format!("invalid bounding box: {values:?}"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounding_box_dimensions() {
        let bbox = BoundingBox::new(10.0, 20.0, 110.0, 70.0);
        assert_eq!(bbox.width(), 100.0);
        assert_eq!(bbox.height(), 50.0);
        assert!(bbox.is_valid());
    }

    #[test]
    fn test_full_page_extent() {
        let bbox = BoundingBox::full_page(612, 792);
        assert_eq!(bbox.to_array(), [0.0, 0.0, 612.0, 792.0]);
    }

    #[test]
    fn test_invalid_boxes() {
        // Inverted corners
        assert!(!BoundingBox::new(10.0, 0.0, 5.0, 10.0).is_valid());
        assert!(!BoundingBox::new(0.0, 10.0, 10.0, 5.0).is_valid());
        // Negative coordinates
        assert!(!BoundingBox::new(-1.0, 0.0, 10.0, 10.0).is_valid());
    }

    #[test]
    fn test_normalized_within_unit_interval() {
        let bbox = BoundingBox::new(100.0, 50.0, 300.0, 250.0);
        let norm = bbox.normalized(400, 500);

        assert_eq!(norm, BoundingBox::new(0.25, 0.1, 0.75, 0.5));
        for v in norm.to_array() {
            assert!((0.0..=1.0).contains(&v));
        }
    }

    #[test]
    fn test_normalized_clamps_overflow() {
        // Detector boxes can poke past the page edge
        let bbox = BoundingBox::new(0.0, 0.0, 450.0, 520.0);
        let norm = bbox.normalized(400, 500);

        assert_eq!(norm.x1, 1.0);
        assert_eq!(norm.y1, 1.0);
        assert!(norm.is_valid());
    }

    #[test]
    fn test_serializes_as_array() {
        let bbox = BoundingBox::new(0.0, 0.0, 612.0, 792.0);
        let json = serde_json::to_string(&bbox).unwrap();
        assert_eq!(json, "[0.0,0.0,612.0,792.0]");
    }

    #[test]
    fn test_deserialize_rejects_invalid() {
        let result: Result<BoundingBox, _> = serde_json::from_str("[10.0,0.0,5.0,10.0]");
        assert!(result.is_err());
    }

    #[test]
    fn test_deserialize_round_trip() {
        let bbox = BoundingBox::new(1.5, 2.5, 3.5, 4.5);
        let json = serde_json::to_string(&bbox).unwrap();
        let back: BoundingBox = serde_json::from_str(&json).unwrap();
        assert_eq!(bbox, back);
    }
}
