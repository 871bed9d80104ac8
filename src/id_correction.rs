//! # Identifier Correction Module
//!
//! This module corrects OCR confusions in vehicle passport identifiers.
//!
//! An identifier is ten characters: two digits, two letters, six digits
//! (`12AB123456`). Misreads concentrate on the two letter positions, where
//! letters are mistaken for digits or for other letters, so corrections are
//! only attempted there:
//!
//! - Confusable letters are replaced by the letter the grammar can hold
//!   (`V` is never valid, it is always a misread `Y`)
//! - `O` and `0` are tried in both forms
//! - The observed character is kept as the last option otherwise
//!
//! Every combination of the per-slot options is a variant; the first variant
//! matching the grammar wins.

use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashMap;
use tracing::{debug, trace};

/// Length of a vehicle passport identifier
pub const ID_LENGTH: usize = 10;

/// 0-indexed positions of the two letters in the identifier grammar
pub const LETTER_POSITIONS: [usize; 2] = [2, 3];

lazy_static! {
    /// Two digits, two letters, six digits
    pub static ref ID_PATTERN: Regex =
        Regex::new(r"^\d{2}[A-Za-z]{2}\d{6}$").expect("Invalid identifier regex pattern");
}

/// Configuration for identifier correction
#[derive(Debug, Clone)]
pub struct IdCorrectionConfig {
    /// Whether confusable letters are replaced (V -> Y)
    pub enable_letter_corrections: bool,
    /// Whether `O` and `0` are tried in both forms
    pub enable_zero_o_ambiguity: bool,
}

impl Default for IdCorrectionConfig {
    fn default() -> Self {
        Self {
            enable_letter_corrections: true,
            enable_zero_o_ambiguity: true,
        }
    }
}

/// Identifier correction engine
#[derive(Debug, Clone)]
pub struct IdCorrector {
    config: IdCorrectionConfig,
    letter_corrections: HashMap<char, char>,
}

impl IdCorrector {
    /// Create a new corrector with default configuration
    pub fn new() -> Self {
        Self::with_config(IdCorrectionConfig::default())
    }

    /// Create a new corrector with custom configuration
    pub fn with_config(config: IdCorrectionConfig) -> Self {
        let mut corrector = Self {
            config,
            letter_corrections: HashMap::new(),
        };

        corrector.initialize_letter_corrections();
        corrector
    }

    fn initialize_letter_corrections(&mut self) {
        let corrections = [
            ('V', 'Y'), // "Y" is read as "V", and "V" never appears in an identifier
            ('v', 'Y'), // unreachable from generate_variants, which upper-cases first
        ];

        for (from, to) in corrections {
            self.letter_corrections.insert(from, to);
        }
    }

    /// Ordered substitution options for one letter slot
    fn slot_options(&self, observed: char) -> Vec<char> {
        let mut options = Vec::with_capacity(3);

        if self.config.enable_letter_corrections {
            if let Some(&corrected) = self.letter_corrections.get(&observed) {
                options.push(corrected);
            }
        }

        if self.config.enable_zero_o_ambiguity && (observed == 'O' || observed == '0') {
            options.extend(['O', '0']);
        } else {
            options.push(observed);
        }

        options
    }

    /// Generate every corrected variant of a candidate.
    ///
    /// The candidate is upper-cased first. Candidates that are not exactly
    /// [`ID_LENGTH`] characters long yield no variants. Variants are ordered
    /// with the first letter slot varying slowest and are not de-duplicated.
    pub fn generate_variants(&self, candidate: &str) -> Vec<String> {
        let chars: Vec<char> = candidate.to_uppercase().chars().collect();
        if chars.len() != ID_LENGTH {
            return Vec::new();
        }

        let [first, second] = LETTER_POSITIONS;
        let first_options = self.slot_options(chars[first]);
        let second_options = self.slot_options(chars[second]);

        let mut variants = Vec::with_capacity(first_options.len() * second_options.len());
        for &a in &first_options {
            for &b in &second_options {
                let mut variant = chars.clone();
                variant[first] = a;
                variant[second] = b;
                variants.push(variant.into_iter().collect());
            }
        }

        trace!(
            candidate = %candidate,
            variant_count = variants.len(),
            "Generated identifier variants"
        );
        variants
    }

    /// Return the first variant that fully matches the identifier grammar
    pub fn match_identifier(&self, candidate: &str) -> Option<String> {
        let matched = self
            .generate_variants(candidate)
            .into_iter()
            .find(|variant| ID_PATTERN.is_match(variant));

        if let Some(id) = &matched {
            debug!(candidate = %candidate, identifier = %id, "Identifier matched");
        }
        matched
    }
}

impl Default for IdCorrector {
    fn default() -> Self {
        Self::new()
    }
}
