//! # Vehicle Passport OCR
//!
//! Reads vehicle passport identifiers (`12 AB 123456`) from the text
//! fragments an OCR engine detected on a document image. Fragments are
//! scanned from the most legible corner of the document, known letter
//! misreads are corrected, and identifiers split across several fragments of
//! the same line are stitched back together.

pub mod config;
pub mod errors;
pub mod evaluation;
pub mod formats;
pub mod fragments;
pub mod geometry;
pub mod id_correction;
pub mod observability;
pub mod observability_config;
pub mod reader;
pub mod reader_config;
pub mod reader_errors;

// Re-export types for easier access
pub use reader::PassportIdReader;
pub use reader_config::ReaderConfig;
pub use reader_errors::{ReaderError, ReaderResult};
