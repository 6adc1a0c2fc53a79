//! Tesseract-backed text detection via `leptess`.
//!
//! The engine is fed the page image as in-memory PNG bytes and queried for
//! TSV output, which carries one row per detected word with pixel geometry
//! and confidence. Words are regrouped into lines here because the pipeline
//! consumes line-level responses.

use crate::{BoundingBox, OcrError, TextDetector, TextLine};
use anyhow::Result;
use image::DynamicImage;
use leptess::LepTess;
use std::io::Cursor;

/// TSV row level for word entries (page=1, block=2, para=3, line=4, word=5)
const TSV_LEVEL_WORD: u32 = 5;

/// Source resolution reported to Tesseract for images without DPI metadata
const SOURCE_RESOLUTION_PPI: i32 = 72;

/// Text detector backed by a local Tesseract engine.
pub struct TesseractDetector {
    engine: LepTess,
}

impl TesseractDetector {
    /// Create a detector for the given language (e.g. `"eng"`).
    ///
    /// Language data is resolved from the standard Tesseract data path.
    ///
    /// # Errors
    ///
    /// Returns [`OcrError::EngineInit`] if the engine or language data
    /// cannot be loaded.
    pub fn new(lang: &str) -> std::result::Result<Self, OcrError> {
        let engine =
            LepTess::new(None, lang).map_err(|e| OcrError::EngineInit(e.to_string()))?;
        Ok(Self { engine })
    }
}

impl TextDetector for TesseractDetector {
    fn detect_text(&mut self, image: &DynamicImage) -> Result<Vec<TextLine>> {
        let mut png = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut png), image::ImageFormat::Png)
            .map_err(|e| OcrError::Detection(e.to_string()))?;

        self.engine
            .set_image_from_mem(&png)
            .map_err(|e| OcrError::Detection(e.to_string()))?;
        self.engine.set_source_resolution(SOURCE_RESOLUTION_PPI);

        let tsv = self
            .engine
            .get_tsv_text(0)
            .map_err(|e| OcrError::Detection(e.to_string()))?;

        let lines = parse_tsv(&tsv);
        log::debug!("Tesseract detected {} text lines", lines.len());
        Ok(lines)
    }
}

/// One word row from Tesseract TSV output.
struct TsvWord {
    block: u32,
    par: u32,
    line: u32,
    left: f32,
    top: f32,
    width: f32,
    height: f32,
    conf: f32,
    text: String,
}

fn parse_tsv_row(row: &str) -> Option<TsvWord> {
    let mut fields = row.split('\t');
    let level: u32 = fields.next()?.parse().ok()?;
    if level != TSV_LEVEL_WORD {
        return None;
    }
    let _page: u32 = fields.next()?.parse().ok()?;
    let block: u32 = fields.next()?.parse().ok()?;
    let par: u32 = fields.next()?.parse().ok()?;
    let line: u32 = fields.next()?.parse().ok()?;
    let _word: u32 = fields.next()?.parse().ok()?;
    let left: f32 = fields.next()?.parse().ok()?;
    let top: f32 = fields.next()?.parse().ok()?;
    let width: f32 = fields.next()?.parse().ok()?;
    let height: f32 = fields.next()?.parse().ok()?;
    let conf: f32 = fields.next()?.parse().ok()?;
    let text = fields.next()?.trim().to_string();

    // Tesseract marks non-text rows with conf -1
    if conf < 0.0 || text.is_empty() {
        return None;
    }

    Some(TsvWord {
        block,
        par,
        line,
        left,
        top,
        width,
        height,
        conf,
        text,
    })
}

/// Collapse one line's accumulated words into a [`TextLine`].
fn flush_line(words: &mut Vec<TsvWord>, lines: &mut Vec<TextLine>) {
    if words.is_empty() {
        return;
    }
    let x0 = words.iter().map(|w| w.left).fold(f32::INFINITY, f32::min);
    let y0 = words.iter().map(|w| w.top).fold(f32::INFINITY, f32::min);
    let x1 = words
        .iter()
        .map(|w| w.left + w.width)
        .fold(f32::NEG_INFINITY, f32::max);
    let y1 = words
        .iter()
        .map(|w| w.top + w.height)
        .fold(f32::NEG_INFINITY, f32::max);

    // Precision loss acceptable: word counts per line are tiny
    #[allow(clippy::cast_precision_loss)]
    let confidence = words.iter().map(|w| w.conf).sum::<f32>() / (words.len() as f32 * 100.0);

    let text = words
        .iter()
        .map(|w| w.text.as_str())
        .collect::<Vec<_>>()
        .join(" ");

    lines.push(TextLine::new(
        text,
        BoundingBox::new(x0, y0, x1 - x0, y1 - y0),
        confidence,
    ));
    words.clear();
}

/// Regroup TSV word rows into line-level responses.
///
/// Words are grouped by their (block, paragraph, line) key; the line box is
/// the union of its word boxes and the confidence is the word mean, scaled
/// from Tesseract's 0-100 range to 0-1.
fn parse_tsv(tsv: &str) -> Vec<TextLine> {
    let mut lines: Vec<TextLine> = Vec::new();
    let mut current_key: Option<(u32, u32, u32)> = None;
    let mut words: Vec<TsvWord> = Vec::new();

    for row in tsv.lines() {
        let Some(word) = parse_tsv_row(row) else {
            continue;
        };
        let key = (word.block, word.par, word.line);
        if current_key != Some(key) {
            flush_line(&mut words, &mut lines);
            current_key = Some(key);
        }
        words.push(word);
    }
    flush_line(&mut words, &mut lines);

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_TSV: &str = "\
level\tpage_num\tblock_num\tpar_num\tline_num\tword_num\tleft\ttop\twidth\theight\tconf\ttext
1\t1\t0\t0\t0\t0\t0\t0\t400\t500\t-1\t
5\t1\t1\t1\t1\t1\t40\t30\t60\t25\t96.0\tHello
5\t1\t1\t1\t1\t2\t110\t30\t70\t25\t90.0\tWorld
5\t1\t1\t1\t2\t1\t40\t70\t55\t22\t88.5\tSecond";

    #[test]
    fn test_parse_tsv_groups_words_into_lines() {
        let lines = parse_tsv(SAMPLE_TSV);
        assert_eq!(lines.len(), 2);

        assert_eq!(lines[0].text, "Hello World");
        assert_eq!(lines[0].bbox, BoundingBox::new(40.0, 30.0, 140.0, 25.0));
        assert!((lines[0].confidence - 0.93).abs() < 1e-6);

        assert_eq!(lines[1].text, "Second");
        assert_eq!(lines[1].bbox, BoundingBox::new(40.0, 70.0, 55.0, 22.0));
    }

    #[test]
    fn test_parse_tsv_skips_non_word_rows() {
        let lines = parse_tsv("4\t1\t1\t1\t1\t0\t40\t30\t130\t25\t-1\t\n");
        assert!(lines.is_empty());
    }

    #[test]
    fn test_parse_tsv_empty_input() {
        assert!(parse_tsv("").is_empty());
    }

    #[test]
    fn test_parse_tsv_ignores_malformed_rows() {
        let lines = parse_tsv("garbage line without tabs\n5\t1\tnot-a-number\n");
        assert!(lines.is_empty());
    }
}
