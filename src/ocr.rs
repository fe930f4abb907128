//! OCR engine output → [`OcrPage`].
//!
//! Accepts the JSON shapes the common engines dump:
//! - EasyOCR `readtext`: `[[box, "text", confidence], ...]`
//! - PaddleOCR `ocr`: `[[box, ["text", confidence]], ...]`, optionally wrapped
//!   per image as `[[...], ...]` (with `null` for images without text)
//! - this crate's own token records: `[{"bbox": ..., "text": ..., "confidence": ...}]`
//!
//! `box` is four `[x, y]` points, clockwise from the top-left corner.

use std::path::Path;

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::types::{BoundingBox, OcrPage, OcrToken};

type RawBox = [[f64; 2]; 4];

#[derive(Deserialize)]
#[serde(untagged)]
enum RawItem {
    Easy(RawBox, String, f64),
    Paddle(RawBox, (String, f64)),
    Native(OcrToken),
}

impl From<RawItem> for OcrToken {
    fn from(item: RawItem) -> Self {
        match item {
            RawItem::Easy(bbox, text, confidence) | RawItem::Paddle(bbox, (text, confidence)) => {
                Self { bbox: BoundingBox::from(bbox), text, confidence }
            }
            RawItem::Native(token) => token,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawDocument {
    Flat(Vec<RawItem>),
    Wrapped(Vec<Option<Vec<RawItem>>>),
}

/// Parse OCR JSON into a page, keeping the engine's token order.
///
/// Wrapped multi-image output is flattened into one page.
pub fn parse_ocr_json(json: &str) -> Result<OcrPage> {
    parse_inner(json, None)
}

/// Read and parse an OCR JSON file.
pub fn load_ocr_file(path: &Path) -> Result<OcrPage> {
    let json = fs_err::read_to_string(path).map_err(|e| Error::io(e, path.to_path_buf()))?;
    parse_inner(&json, Some(path))
}

fn parse_inner(json: &str, path: Option<&Path>) -> Result<OcrPage> {
    let document: RawDocument = serde_json::from_str(json).map_err(|e| {
        Error::parse(
            format!("not a recognized OCR result ({e})"),
            path.map(Path::to_path_buf),
        )
    })?;

    let page: OcrPage = match document {
        RawDocument::Flat(items) => items.into_iter().map(OcrToken::from).collect(),
        RawDocument::Wrapped(pages) => {
            if pages.len() > 1 {
                tracing::warn!("OCR result holds {} images; merging them into one page", pages.len());
            }
            pages.into_iter().flatten().flatten().map(OcrToken::from).collect()
        }
    };

    tracing::debug!("Parsed {} OCR tokens", page.len());
    Ok(page)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;
    use std::io::Write;

    #[test]
    fn easyocr_shape() {
        let json = r#"[[[[10, 0], [30, 0], [30, 20], [10, 20]], "G", 0.98],
                       [[[0, 40], [140, 40], [140, 60], [0, 60]], "Amazing", 0.91]]"#;
        let page = parse_ocr_json(json).unwrap();
        assert_eq!(page.len(), 2);
        let (_, first) = page.iter().next().unwrap();
        assert_eq!(first.text, "G");
        assert!((first.bbox.center_x() - 20.0).abs() < f64::EPSILON);
    }

    #[test]
    fn paddleocr_wrapped_shape() {
        let json = r#"[[
            [[[10.0, 0.0], [30.0, 0.0], [30.0, 20.0], [10.0, 20.0]], ["Em", 0.97]],
            [[[0.0, 40.0], [140.0, 40.0], [140.0, 60.0], [0.0, 60.0]], ["grace", 0.93]]
        ]]"#;
        let page = parse_ocr_json(json).unwrap();
        let texts: Vec<_> = page.iter().map(|(_, t)| t.text.as_str()).collect();
        assert_eq!(texts, vec!["Em", "grace"]);
    }

    #[test]
    fn paddleocr_empty_image() {
        let page = parse_ocr_json("[null]").unwrap();
        assert!(page.is_empty());
    }

    #[test]
    fn native_records() {
        let token = OcrToken::new(BoundingBox::from_edges(0.0, 0.0, 10.0, 10.0), "C", 0.5);
        let json = serde_json::to_string(&vec![token.clone()]).unwrap();
        let page = parse_ocr_json(&json).unwrap();
        assert_eq!(page.iter().next().map(|(_, t)| t.clone()), Some(token));
    }

    #[test]
    fn rejects_other_json() {
        let err = parse_ocr_json(r#"{"text": "G"}"#).unwrap_err();
        assert!(matches!(err, Error::Parse { .. }));
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"[[[[0, 0], [10, 0], [10, 10], [0, 10]], "D", 0.9]]"#).unwrap();
        assert_eq!(load_ocr_file(file.path()).unwrap().len(), 1);
    }
}
