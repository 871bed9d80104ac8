//! # Evaluation Module
//!
//! Accuracy evaluation of the identifier reader against a ground-truth file.
//!
//! The predictions directory holds one annotation record set per document
//! (`sample_0.yaml`, `sample_1.yaml`, ...). The ground truth maps document
//! names to their identifier:
//!
//! ```yaml
//! sample_0.jpg:
//!   id: 12 AB 123456
//! ```
//!
//! JSON encodings of both files are accepted as well.
//!
//! Identifiers are compared in their display form, with spaces between the
//! digit and letter groups.

use crate::config::EvaluationConfig;
use crate::errors::{error_logging, AppError, AppResult};
use crate::formats::DocumentFormat;
use crate::id_correction::ID_LENGTH;
use crate::observability::evaluation_span;
use crate::reader::PassportIdReader;
use crate::reader_config::ReaderConfig;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Render an identifier as `12 AB 123456`.
///
/// Strings that are not exactly ten characters are returned unchanged.
pub fn format_identifier(id: &str) -> String {
    let chars: Vec<char> = id.chars().collect();
    if chars.len() != ID_LENGTH {
        return id.to_string();
    }

    let digits: String = chars[..2].iter().collect();
    let letters: String = chars[2..4].iter().collect();
    let number: String = chars[4..].iter().collect();
    format!("{} {} {}", digits, letters, number)
}

#[derive(Debug, Deserialize)]
struct GroundTruthEntry {
    id: String,
}

/// Expected identifiers keyed by document name
#[derive(Debug, Clone, Default)]
pub struct GroundTruth {
    entries: HashMap<String, String>,
}

impl GroundTruth {
    /// Parse a ground-truth document, JSON or YAML
    pub fn parse(source: &str) -> AppResult<Self> {
        Self::parse_as(source, DocumentFormat::detect(source))
    }

    /// Parse a ground-truth document in the given format
    pub fn parse_as(source: &str, format: DocumentFormat) -> AppResult<Self> {
        let raw: HashMap<String, GroundTruthEntry> = format
            .parse(source)
            .map_err(|e| AppError::Validation(format!("Invalid ground truth: {}", e)))?;

        Ok(Self {
            entries: raw.into_iter().map(|(name, entry)| (name, entry.id)).collect(),
        })
    }

    /// Read and parse a ground-truth file
    pub fn load<P: AsRef<Path>>(path: P) -> AppResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            AppError::FileSystem(format!(
                "Failed to read ground truth {}: {}",
                path.display(),
                e
            ))
        })?;
        let truth = Self::parse_as(&content, DocumentFormat::for_document(path, &content))?;
        info!(path = %path.display(), entries = truth.len(), "Ground truth loaded");
        Ok(truth)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Expected identifier for a document.
    ///
    /// Exact key first, then any key whose file stem equals the document
    /// (so `sample_3.jpg` answers for `sample_3`).
    pub fn expected_for(&self, document: &str) -> Option<&str> {
        if let Some(id) = self.entries.get(document) {
            return Some(id.as_str());
        }

        // Smallest key wins if several extensions share a stem
        self.entries
            .iter()
            .filter(|(name, _)| {
                Path::new(name.as_str()).file_stem().and_then(|s| s.to_str()) == Some(document)
            })
            .min_by(|a, b| a.0.cmp(b.0))
            .map(|(_, id)| id.as_str())
    }
}

/// Result of reading one document
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentOutcome {
    /// Annotation file stem
    pub document: String,
    /// Formatted identifier read from the document, if any
    pub predicted: Option<String>,
    /// Formatted identifier from the ground truth, if any
    pub expected: Option<String>,
    pub matched: bool,
}

/// Outcome of a full evaluation run
#[derive(Debug, Clone, Default)]
pub struct EvaluationReport {
    pub outcomes: Vec<DocumentOutcome>,
}

impl EvaluationReport {
    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    pub fn correct(&self) -> usize {
        self.outcomes.iter().filter(|o| o.matched).count()
    }

    /// Share of correctly read documents, in percent
    pub fn accuracy(&self) -> f64 {
        if self.outcomes.is_empty() {
            return 0.0;
        }
        100.0 * self.correct() as f64 / self.total() as f64
    }
}

/// Numeric suffix after the last `_` of a file stem (`sample_12` -> 12)
fn sample_index(path: &Path) -> Option<u64> {
    path.file_stem()?
        .to_str()?
        .rsplit_once('_')
        .and_then(|(_, index)| index.parse().ok())
}

/// List the annotation files of a directory in sample order.
///
/// `exclude` is skipped so that a ground-truth file stored next to the
/// annotations is not read as one.
pub fn discover_annotations(dir: &Path, exclude: Option<&Path>) -> AppResult<Vec<PathBuf>> {
    let excluded = exclude.and_then(|p| fs::canonicalize(p).ok());

    let entries = fs::read_dir(dir).map_err(|e| {
        AppError::FileSystem(format!(
            "Failed to read predictions directory {}: {}",
            dir.display(),
            e
        ))
    })?;

    let mut files: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .filter(|path| DocumentFormat::from_path(path).is_some())
        .filter(|path| match &excluded {
            Some(excluded) => fs::canonicalize(path).ok().as_ref() != Some(excluded),
            None => true,
        })
        .collect();

    files.sort_by_key(|path| {
        (
            sample_index(path).unwrap_or(u64::MAX),
            path.file_name().map(|n| n.to_os_string()),
        )
    });

    debug!(dir = %dir.display(), count = files.len(), "Annotation files discovered");
    Ok(files)
}

/// Read every document of the predictions directory and compare with the
/// ground truth. A malformed annotation file aborts the run.
pub fn evaluate(
    reader_config: &ReaderConfig,
    config: &EvaluationConfig,
) -> AppResult<EvaluationReport> {
    let truth = GroundTruth::load(&config.ground_truth_path)?;
    let files = discover_annotations(
        &config.predictions_dir,
        Some(config.ground_truth_path.as_path()),
    )?;

    let mut report = EvaluationReport::default();
    for path in files {
        let document = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .to_string();
        let _span = evaluation_span(&document).entered();

        // One reader per document: nothing is shared between documents
        let mut reader = PassportIdReader::new(reader_config.clone());
        let predicted = reader
            .load_path(&path)
            .and_then(|_| reader.read_identifier())
            .map_err(|e| {
                error_logging::log_evaluation_error(&e, "read_document", Some(document.as_str()));
                AppError::from(e)
            })?
            .map(|id| format_identifier(&id));

        let expected = truth.expected_for(&document).map(str::to_string);
        if expected.is_none() {
            warn!(document = %document, "No ground truth entry for document");
        }

        let matched = predicted.is_some() && predicted == expected;
        debug!(
            document = %document,
            predicted = ?predicted,
            expected = ?expected,
            matched,
            "Document evaluated"
        );

        report.outcomes.push(DocumentOutcome {
            document,
            predicted,
            expected,
            matched,
        });
    }

    info!(
        total = report.total(),
        correct = report.correct(),
        accuracy = report.accuracy(),
        "Evaluation finished"
    );
    Ok(report)
}
