//! # Fragment Module
//!
//! Text fragments detected by the OCR engine and the loader that turns a
//! serialized annotation record set into them.
//!
//! The record set schema, as the annotation pipeline writes it:
//!
//! ```yaml
//! ocr_results:
//! - bbox:
//!   - [10.0, 0.0]
//!   - [30.0, 0.0]
//!   - [30.0, 20.0]
//!   - [10.0, 20.0]
//!   confidence: 0.98
//!   text: 12 AB
//! ```
//!
//! The same schema is accepted as JSON.
//!
//! A record that does not follow it fails the whole load. Records are never
//! skipped.

use crate::formats::DocumentFormat;
use crate::geometry::{BoundingBox, Point};
use crate::reader_errors::{ReaderError, ReaderResult};
use serde::Deserialize;
use std::io::Read;
use tracing::{debug, trace};

/// Number of corners in an OCR polygon
pub const POLYGON_POINTS: usize = 4;

/// One OCR-detected text region
#[derive(Debug, Clone, PartialEq)]
pub struct Fragment {
    bbox: BoundingBox,
    confidence: f64,
    text: String,
}

impl Fragment {
    pub fn new(bbox: BoundingBox, confidence: f64, text: impl Into<String>) -> Self {
        Self {
            bbox,
            confidence,
            text: text.into(),
        }
    }

    pub fn bbox(&self) -> &BoundingBox {
        &self.bbox
    }

    /// Recognition confidence reported by the OCR engine
    pub fn confidence(&self) -> f64 {
        self.confidence
    }

    /// Text exactly as recognized
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Text with every space removed; the OCR engine often splits the
    /// identifier groups with spaces
    pub fn stripped_text(&self) -> String {
        self.text.replace(' ', "")
    }
}

#[derive(Debug, Deserialize)]
struct RecordSet {
    ocr_results: Vec<Record>,
}

#[derive(Debug, Deserialize)]
struct Record {
    bbox: Vec<Vec<f64>>,
    confidence: f64,
    text: String,
}

impl Record {
    fn into_fragment(self, index: usize) -> ReaderResult<Fragment> {
        if self.bbox.len() != POLYGON_POINTS {
            return Err(ReaderError::MalformedInput(format!(
                "record {} has {} polygon points, expected {}",
                index,
                self.bbox.len(),
                POLYGON_POINTS
            )));
        }

        let mut points = [Point::new(0.0, 0.0); POLYGON_POINTS];
        for (slot, coords) in points.iter_mut().zip(&self.bbox) {
            match coords.as_slice() {
                [x, y] => *slot = Point::new(*x, *y),
                _ => {
                    return Err(ReaderError::MalformedInput(format!(
                        "record {} has a point with {} coordinates, expected 2",
                        index,
                        coords.len()
                    )))
                }
            }
        }

        let [tl, tr, br, bl] = points;
        trace!(index, text = %self.text, "Parsed fragment record");
        Ok(Fragment::new(
            BoundingBox::new(tl, tr, br, bl),
            self.confidence,
            self.text,
        ))
    }
}

fn convert(records: RecordSet) -> ReaderResult<Vec<Fragment>> {
    let fragments = records
        .ocr_results
        .into_iter()
        .enumerate()
        .map(|(index, record)| record.into_fragment(index))
        .collect::<ReaderResult<Vec<_>>>()?;

    debug!(fragment_count = fragments.len(), "Fragment record set parsed");
    Ok(fragments)
}

/// Parse a record set in the given format
pub fn parse_fragments_as(source: &str, format: DocumentFormat) -> ReaderResult<Vec<Fragment>> {
    let records: RecordSet = format
        .parse(source)
        .map_err(|e| ReaderError::MalformedInput(e.to_string()))?;
    convert(records)
}

/// Parse a record set from a string, JSON or YAML
pub fn parse_fragments(source: &str) -> ReaderResult<Vec<Fragment>> {
    parse_fragments_as(source, DocumentFormat::detect(source))
}

/// Parse a record set from any reader, JSON or YAML
pub fn read_fragments<R: Read>(mut reader: R) -> ReaderResult<Vec<Fragment>> {
    let mut source = String::new();
    reader.read_to_string(&mut source)?;
    parse_fragments(&source)
}
