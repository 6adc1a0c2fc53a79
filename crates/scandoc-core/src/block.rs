//! Layout blocks extracted from a document page.
//!
//! Blocks come from the document's native page-object metadata, before any
//! OCR runs. The block kinds carry the fixed native type codes used by the
//! page classifier (0 = text, 1 = image).

use crate::geometry::BoundingBox;
use serde::{Deserialize, Serialize};

/// Kind of a layout block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockKind {
    /// Native text content
    Text,
    /// Embedded raster image
    Image,
}

impl BlockKind {
    /// Fixed native type code (0 = text, 1 = image).
    #[inline]
    #[must_use = "type code is returned but not used"]
    pub const fn code(self) -> u32 {
        match self {
            Self::Text => 0,
            Self::Image => 1,
        }
    }

    /// Map a native type code back to a block kind.
    #[inline]
    #[must_use = "mapped block kind is returned but not used"]
    pub const fn from_code(code: u32) -> Option<Self> {
        match code {
            0 => Some(Self::Text),
            1 => Some(Self::Image),
            _ => None,
        }
    }
}

impl std::fmt::Display for BlockKind {
    #[inline]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Text => "text",
            Self::Image => "image",
        };
        write!(f, "{s}")
    }
}

impl std::str::FromStr for BlockKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "image" => Ok(Self::Image),
            _ => Err(format!("unknown block kind: '{s}'")),
        }
    }
}

/// A geometric layout block with its kind tag.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Block {
    /// Block extent on the page
    pub bbox: BoundingBox,
    /// Text or image
    pub kind: BlockKind,
}

impl Block {
    /// Create a new block.
    #[inline]
    #[must_use = "block is created but not used"]
    pub const fn new(bbox: BoundingBox, kind: BlockKind) -> Self {
        Self { bbox, kind }
    }
}

/// Per-kind block counts for one page.
///
/// The page classifier keys off `image`: pages with zero image blocks are
/// not OCR'd at all.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockCounts {
    /// Number of text blocks on the page
    pub text: usize,
    /// Number of image blocks on the page
    pub image: usize,
}

impl BlockCounts {
    /// Group blocks by kind and count each group.
    #[must_use = "block counts are computed but not used"]
    pub fn tally(blocks: &[Block]) -> Self {
        let mut counts = Self::default();
        for block in blocks {
            match block.kind {
                BlockKind::Text => counts.text += 1,
                BlockKind::Image => counts.image += 1,
            }
        }
        counts
    }

    /// Whether the page holds any image block and is worth OCR'ing.
    #[inline]
    #[must_use = "classification result is returned but not used"]
    pub const fn has_images(&self) -> bool {
        self.image > 0
    }
}
