//! Image normalization: raster bytes in, single-page PDF out.
//!
//! Camera and scanner output often stores the raster "sideways" and records
//! the real orientation in an EXIF tag. Before a page can be rendered and
//! OCR'd, the raster is decoded, flattened to opaque RGB, rotated/mirrored
//! into upright orientation, and re-encoded as a one-page PDF whose page
//! size matches the pixel dimensions at 72 dpi.
//!
//! The produced PDF carries no creation or modification timestamps, so the
//! output bytes are deterministic for a given input.

use image::codecs::jpeg::JpegEncoder;
use image::DynamicImage;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};
use scandoc_core::{Result, ScandocError};
use std::io::Cursor;

/// JPEG quality for the page image embedded in the PDF
const JPEG_QUALITY: u8 = 95;

/// Convert raw image bytes into a deterministic single-page PDF.
///
/// # Errors
///
/// Returns [`ScandocError::ImageDecode`] when the bytes are not a
/// recognizable image format, or [`ScandocError::Backend`] when PDF
/// assembly fails.
pub fn image_to_pdf(image_bytes: &[u8]) -> Result<Vec<u8>> {
    let image = image::load_from_memory(image_bytes)
        .map_err(|e| ScandocError::ImageDecode(e.to_string()))?;

    let orientation = exif_orientation(image_bytes).unwrap_or(1);
    log::debug!("Normalizing image with EXIF orientation {orientation}");

    let image = flatten_alpha(image);
    let image = apply_orientation(image, orientation);

    let rgb = image.to_rgb8();
    let (width, height) = rgb.dimensions();

    let mut jpeg = Vec::new();
    rgb.write_with_encoder(JpegEncoder::new_with_quality(
        &mut Cursor::new(&mut jpeg),
        JPEG_QUALITY,
    ))
    .map_err(|e| ScandocError::Backend(format!("Failed to encode page image: {e}")))?;

    encode_pdf(jpeg, width, height)
}

/// Drop the alpha channel, if any, by converting to plain RGB.
///
/// Downstream rendering assumes opaque RGB; palette images with
/// transparency decode to RGBA and are flattened here too.
fn flatten_alpha(image: DynamicImage) -> DynamicImage {
    if image.color().has_alpha() {
        DynamicImage::ImageRgb8(image.to_rgb8())
    } else {
        image
    }
}

/// Read the EXIF orientation tag (1-8) from the raw image bytes.
fn exif_orientation(image_bytes: &[u8]) -> Option<u32> {
    let mut cursor = Cursor::new(image_bytes);
    let exif = exif::Reader::new()
        .read_from_container(&mut cursor)
        .ok()?;
    exif.get_field(exif::Tag::Orientation, exif::In::PRIMARY)
        .and_then(|field| field.value.get_uint(0))
}

/// Apply the fixed transform for an EXIF orientation value.
///
/// Rotations are clockwise. Unrecognized or missing orientation values map
/// to the identity transform.
fn apply_orientation(image: DynamicImage, orientation: u32) -> DynamicImage {
    match orientation {
        // Mirrored left to right
        2 => image.fliph(),
        // Rotated 180 degrees
        3 => image.rotate180(),
        // Mirrored top to bottom
        4 => image.rotate180().fliph(),
        // Mirrored along top-left diagonal
        5 => image.rotate90().fliph(),
        // Rotated 90 degrees
        6 => image.rotate90(),
        // Mirrored along top-right diagonal
        7 => image.rotate270().fliph(),
        // Rotated 270 degrees
        8 => image.rotate270(),
        // Normal image, or unrecognized value
        _ => image,
    }
}

/// Wrap a JPEG-encoded raster into a one-page PDF.
///
/// The page MediaBox equals the pixel dimensions (72 dpi), and no Info
/// dictionary is written, keeping the output byte-identical across runs.
fn encode_pdf(jpeg: Vec<u8>, width: u32, height: u32) -> Result<Vec<u8>> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let image_id = doc.add_object(Stream::new(
        dictionary! {
            "Type" => "XObject",
            "Subtype" => "Image",
            "Width" => i64::from(width),
            "Height" => i64::from(height),
            "ColorSpace" => "DeviceRGB",
            "BitsPerComponent" => 8,
            "Filter" => "DCTDecode",
        },
        jpeg,
    ));

    // Scale the unit image square up to the full page
    let content = Content {
        operations: vec![
            Operation::new("q", vec![]),
            Operation::new(
                "cm",
                vec![
                    i64::from(width).into(),
                    0.into(),
                    0.into(),
                    i64::from(height).into(),
                    0.into(),
                    0.into(),
                ],
            ),
            Operation::new("Do", vec!["Im0".into()]),
            Operation::new("Q", vec![]),
        ],
    };
    let encoded = content
        .encode()
        .map_err(|e| ScandocError::Backend(format!("Failed to encode page content: {e}")))?;
    let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));

    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
        "Resources" => dictionary! {
            "XObject" => dictionary! { "Im0" => image_id },
        },
        "MediaBox" => vec![
            0.into(),
            0.into(),
            i64::from(width).into(),
            i64::from(height).into(),
        ],
    });

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![page_id.into()],
            "Count" => 1,
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut out = Vec::new();
    doc.save_to(&mut out)
        .map_err(|e| ScandocError::Backend(format!("Failed to write PDF: {e}")))?;
    Ok(out)
}
