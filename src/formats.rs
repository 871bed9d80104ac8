//! # Document Formats
//!
//! Annotation record sets and ground-truth files come either as block-style
//! YAML, which is what the annotation pipeline writes, or as JSON.

use anyhow::Result;
use serde::de::DeserializeOwned;
use std::path::Path;

/// Serialization format of an annotation or ground-truth document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Yaml,
}

impl DocumentFormat {
    /// Format implied by a file extension, if it is a known one
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Some(DocumentFormat::Json),
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                Some(DocumentFormat::Yaml)
            }
            _ => None,
        }
    }

    /// Guess the format of a document body.
    ///
    /// A JSON object starts with `{`; anything else is read as YAML.
    pub fn detect(source: &str) -> Self {
        match source.trim_start().chars().next() {
            Some('{') => DocumentFormat::Json,
            _ => DocumentFormat::Yaml,
        }
    }

    /// Extension-implied format, falling back to the document body
    pub fn for_document(path: &Path, source: &str) -> Self {
        Self::from_path(path).unwrap_or_else(|| Self::detect(source))
    }

    /// Deserialize a document body in this format
    pub fn parse<T: DeserializeOwned>(self, source: &str) -> Result<T> {
        let value = match self {
            DocumentFormat::Json => serde_json::from_str(source)?,
            DocumentFormat::Yaml => serde_yaml::from_str(source)?,
        };
        Ok(value)
    }
}
