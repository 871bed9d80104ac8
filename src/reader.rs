//! # Passport Identifier Reader
//!
//! The reader owns the fragment set of one document and searches it for a
//! vehicle passport identifier.
//!
//! Search order matters: fragments are scanned by increasing distance from the
//! top-right corner of the canvas and the first identifier found wins. A
//! fragment that does not match on its own but starts with digits is
//! treated as the beginning of an identifier split by the OCR engine, and the
//! fragments to its right on the same text line are appended to it one by one.

use crate::errors::error_logging;
use crate::formats::DocumentFormat;
use crate::fragments::{self, Fragment};
use crate::id_correction::{IdCorrector, ID_LENGTH};
use crate::observability::reader_span;
use crate::reader_config::ReaderConfig;
use crate::reader_errors::{ReaderError, ReaderResult};
use std::fs;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info, trace};

/// Identifier reader for a single document at a time
#[derive(Debug, Clone)]
pub struct PassportIdReader {
    config: ReaderConfig,
    corrector: IdCorrector,
    fragments: Option<Vec<Fragment>>,
}

impl PassportIdReader {
    /// Create a reader with no fragments loaded
    pub fn new(config: ReaderConfig) -> Self {
        let corrector = IdCorrector::with_config(config.correction.clone());
        Self {
            config,
            corrector,
            fragments: None,
        }
    }

    pub fn config(&self) -> &ReaderConfig {
        &self.config
    }

    /// Replace the loaded fragment set with already-built fragments
    pub fn load_fragments(&mut self, fragments: Vec<Fragment>) -> usize {
        let count = fragments.len();
        self.fragments = Some(fragments);
        info!(fragment_count = count, "Fragments loaded");
        count
    }

    /// Parse a record set from a string and load it
    pub fn load_str(&mut self, source: &str) -> ReaderResult<usize> {
        let parsed = fragments::parse_fragments(source).inspect_err(|e| {
            error_logging::log_load_error(e, "load_str", None, None);
        })?;
        Ok(self.load_fragments(parsed))
    }

    /// Parse a record set from a reader and load it
    pub fn load_reader<R: Read>(&mut self, reader: R) -> ReaderResult<usize> {
        let parsed = fragments::read_fragments(reader).inspect_err(|e| {
            error_logging::log_load_error(e, "load_reader", None, None);
        })?;
        Ok(self.load_fragments(parsed))
    }

    /// Parse an annotation file and load it.
    ///
    /// `.yaml`/`.yml` files are read as YAML and `.json` files as JSON; other
    /// files are decoded by content.
    pub fn load_path<P: AsRef<Path>>(&mut self, path: P) -> ReaderResult<usize> {
        let path = path.as_ref();
        let source_name = path.display().to_string();

        let parsed = fs::read_to_string(path)
            .map_err(ReaderError::from)
            .and_then(|source| {
                let format = DocumentFormat::for_document(path, &source);
                fragments::parse_fragments_as(&source, format)
            })
            .inspect_err(|e| {
                error_logging::log_load_error(e, "load_path", Some(source_name.as_str()), None);
            })?;

        debug!(path = %source_name, "Annotation file parsed");
        Ok(self.load_fragments(parsed))
    }

    pub fn is_loaded(&self) -> bool {
        self.fragments.is_some()
    }

    /// The loaded fragments in their current order
    pub fn fragments(&self) -> ReaderResult<&[Fragment]> {
        self.fragments
            .as_deref()
            .ok_or(ReaderError::UnloadedState)
    }

    /// Reorder the loaded fragments by centroid distance to the top-right
    /// canvas corner, nearest first. Ties keep their current relative order.
    pub fn sort_by_vicinity_to_reference_corner(&mut self) -> ReaderResult<()> {
        let loaded = self.fragments.take().ok_or(ReaderError::UnloadedState)?;
        let corner = self.config.reference_corner();

        let mut keyed: Vec<(f64, Fragment)> = loaded
            .into_iter()
            .map(|fragment| (fragment.bbox().centroid().distance(&corner), fragment))
            .collect();
        keyed.sort_by(|a, b| a.0.total_cmp(&b.0));

        self.fragments = Some(keyed.into_iter().map(|(_, fragment)| fragment).collect());
        Ok(())
    }

    /// Search the loaded fragments for a vehicle passport identifier.
    ///
    /// Returns `Ok(None)` when no identifier can be read. Fails only when no
    /// fragments have been loaded.
    pub fn read_identifier(&mut self) -> ReaderResult<Option<String>> {
        let _span = reader_span("read_identifier").entered();

        if !self.is_loaded() {
            return Err(ReaderError::UnloadedState);
        }
        self.sort_by_vicinity_to_reference_corner()?;

        let fragments = self.fragments()?;
        for (index, fragment) in fragments.iter().enumerate() {
            let text = fragment.stripped_text();

            if let Some(id) = self.corrector.match_identifier(&text) {
                info!(identifier = %id, fragment = index, "Identifier read from a single fragment");
                return Ok(Some(id));
            }

            if starts_with_digits(&text) {
                if let Some(id) = self.try_build_full_id(index, fragments) {
                    info!(identifier = %id, fragment = index, "Identifier stitched from fragments");
                    return Ok(Some(id));
                }
            }
        }

        debug!(fragment_count = fragments.len(), "No identifier found");
        Ok(None)
    }

    /// Append the fragments to the right of `start` on the same text line,
    /// nearest first, until the concatenation matches or grows past the
    /// identifier length.
    fn try_build_full_id(&self, start: usize, fragments: &[Fragment]) -> Option<String> {
        self.stitch(start, fragments).identifier
    }

    fn stitch(&self, start: usize, fragments: &[Fragment]) -> Stitch {
        let start_fragment = &fragments[start];
        let (y_min, y_max) = start_fragment.bbox().y_range();
        let cx = start_fragment.bbox().centroid().x;

        let mut neighbors: Vec<(f64, &Fragment)> = fragments
            .iter()
            .enumerate()
            .filter(|(index, _)| *index != start)
            .filter_map(|(_, fragment)| {
                let center = fragment.bbox().centroid();
                (center.x > cx && y_min <= center.y && center.y <= y_max)
                    .then_some((center.x - cx, fragment))
            })
            .collect();
        neighbors.sort_by(|a, b| a.0.total_cmp(&b.0));

        trace!(
            start,
            neighbor_count = neighbors.len(),
            "Collected same-line neighbors"
        );

        let mut candidate = start_fragment.stripped_text();
        let mut consumed = 0;
        for (offset, neighbor) in neighbors {
            candidate.push_str(&neighbor.stripped_text());
            consumed += 1;
            trace!(candidate = %candidate, offset, "Trying stitched candidate");

            if let Some(id) = self.corrector.match_identifier(&candidate) {
                return Stitch {
                    identifier: Some(id),
                    consumed,
                };
            }
            if candidate.chars().count() > ID_LENGTH {
                break;
            }
        }

        Stitch {
            identifier: None,
            consumed,
        }
    }
}

/// Result of stitching from one start fragment
#[derive(Debug, PartialEq)]
struct Stitch {
    identifier: Option<String>,
    /// Neighbors appended before the search stopped
    consumed: usize,
}

impl Default for PassportIdReader {
    fn default() -> Self {
        Self::new(ReaderConfig::default())
    }
}

/// Whether the first two characters (or the only one) are digits.
///
/// A single digit counts: OCR often detects the leading digit of an
/// identifier as its own fragment.
fn starts_with_digits(text: &str) -> bool {
    let mut prefix = text.chars().take(2).peekable();
    prefix.peek().is_some() && prefix.all(|c| c.is_ascii_digit())
}
