//! # Reader Configuration Module
//!
//! This module defines configuration for the identifier reader: the canvas
//! the source images were standardized to and the correction settings.

use crate::errors::{AppError, AppResult};
use crate::geometry::Point;
use crate::id_correction::IdCorrectionConfig;

// Constants for reader configuration
pub const DEFAULT_TARGET_SIZE: u32 = 1024;
pub const MAX_TARGET_SIZE: u32 = 16384;

/// Configuration structure for identifier reading
#[derive(Debug, Clone)]
pub struct ReaderConfig {
    /// Side length of the square canvas every document image was padded onto
    pub target_size: u32,
    /// Identifier correction settings
    pub correction: IdCorrectionConfig,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            target_size: DEFAULT_TARGET_SIZE,
            correction: IdCorrectionConfig::default(),
        }
    }
}

impl ReaderConfig {
    pub fn with_target_size(target_size: u32) -> Self {
        Self {
            target_size,
            ..Default::default()
        }
    }

    /// Top-right corner of the canvas.
    ///
    /// The right-hand side of the documents is the most legible one, so the
    /// search starts from the fragments closest to this point.
    pub fn reference_corner(&self) -> Point {
        Point::new(f64::from(self.target_size), 0.0)
    }

    /// Validate reader configuration parameters
    pub fn validate(&self) -> AppResult<()> {
        if self.target_size == 0 {
            return Err(AppError::Config(
                "target_size must be greater than 0".to_string(),
            ));
        }
        if self.target_size > MAX_TARGET_SIZE {
            return Err(AppError::Config(format!(
                "target_size ({}) cannot exceed {}",
                self.target_size, MAX_TARGET_SIZE
            )));
        }
        Ok(())
    }
}
