//! Page-level PDF access: layout block extraction and rasterization.
//!
//! Built on `pdfium-render`. Block extraction is purely structural, reading
//! the page's native object metadata; no OCR happens here. Coordinates are
//! converted from pdfium's bottom-left origin to the top-left origin the
//! rest of the workspace uses.

// Casts are intentional when converting between pdfium point values (f32)
// and pixel/page coordinates
#![allow(clippy::cast_possible_truncation)]

use image::DynamicImage;
use pdfium_render::prelude::*;
use scandoc_core::{Block, BlockKind, BoundingBox, Result, ScandocError};

/// Points per inch in PDF user space
pub(crate) const PDF_POINTS_PER_INCH: f32 = 72.0;

/// Extract every text/image layout block from a parsed page.
///
/// Other object kinds (paths, shading, form fragments) are not layout
/// blocks and are skipped. Objects whose bounds cannot be read are skipped
/// as well rather than failing the page.
pub(crate) fn extract_page_blocks(page: &PdfPage<'_>) -> Vec<Block> {
    let page_height = f64::from(page.height().value);

    page.objects()
        .iter()
        .filter_map(|object| {
            let kind = match object.object_type() {
                PdfPageObjectType::Text => BlockKind::Text,
                PdfPageObjectType::Image => BlockKind::Image,
                _ => return None,
            };

            let bounds = object.bounds().ok()?;
            let xs = [
                bounds.x1.value,
                bounds.x2.value,
                bounds.x3.value,
                bounds.x4.value,
            ];
            let ys = [
                bounds.y1.value,
                bounds.y2.value,
                bounds.y3.value,
                bounds.y4.value,
            ];
            let left = f64::from(xs.iter().copied().fold(f32::INFINITY, f32::min));
            let right = f64::from(xs.iter().copied().fold(f32::NEG_INFINITY, f32::max));
            let bottom = f64::from(ys.iter().copied().fold(f32::INFINITY, f32::min));
            let top = f64::from(ys.iter().copied().fold(f32::NEG_INFINITY, f32::max));

            // Flip to top-left origin; clamp away tiny negative overshoots
            let bbox = BoundingBox::new(
                left.max(0.0),
                (page_height - top).max(0.0),
                right.max(0.0),
                (page_height - bottom).max(0.0),
            );

            Some(Block::new(bbox, kind))
        })
        .collect()
}

/// Rasterize a page to an in-memory RGB pixel buffer at the given DPI.
///
/// At 72 dpi the pixel dimensions equal the page dimensions in points.
pub(crate) fn render_page(page: &PdfPage<'_>, dpi: f32) -> Result<DynamicImage> {
    let scale = dpi / PDF_POINTS_PER_INCH;
    let pixel_width = (page.width().value * scale).round() as i32;
    let pixel_height = (page.height().value * scale).round() as i32;

    let bitmap = page
        .render_with_config(
            &PdfRenderConfig::new()
                .set_target_width(pixel_width)
                .set_target_height(pixel_height),
        )
        .map_err(|e| ScandocError::Backend(format!("Failed to render page: {e}")))?;

    Ok(bitmap.as_image())
}
