//! # Unified Application Configuration
//!
//! This module consolidates all application settings into a single,
//! structured configuration object. It supports loading from environment
//! variables and validation.

use crate::errors::{AppError, AppResult};
use crate::formats::DocumentFormat;
use crate::observability_config::ObservabilityConfig;
use crate::reader_config::{ReaderConfig, DEFAULT_TARGET_SIZE};
use std::env;
use std::path::PathBuf;

pub const DEFAULT_PREDICTIONS_DIR: &str = "dataset/en";
pub const DEFAULT_GROUND_TRUTH_PATH: &str = "dataset/gt_annotations.yaml";

/// Evaluation run settings
#[derive(Debug, Clone)]
pub struct EvaluationConfig {
    /// Directory holding one annotation record set per document
    pub predictions_dir: PathBuf,
    /// YAML or JSON file mapping document names to their expected identifier
    pub ground_truth_path: PathBuf,
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            predictions_dir: PathBuf::from(DEFAULT_PREDICTIONS_DIR),
            ground_truth_path: PathBuf::from(DEFAULT_GROUND_TRUTH_PATH),
        }
    }
}

impl EvaluationConfig {
    /// Validate evaluation configuration
    pub fn validate(&self) -> AppResult<()> {
        if self.predictions_dir.as_os_str().is_empty() {
            return Err(AppError::Config(
                "Predictions directory cannot be empty".to_string(),
            ));
        }
        if self.ground_truth_path.as_os_str().is_empty() {
            return Err(AppError::Config(
                "Ground truth path cannot be empty".to_string(),
            ));
        }
        if DocumentFormat::from_path(&self.ground_truth_path).is_none() {
            return Err(AppError::Config(format!(
                "Ground truth file must be a .yaml, .yml or .json file, got {}",
                self.ground_truth_path.display()
            )));
        }
        Ok(())
    }
}

/// Unified application configuration
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    /// Identifier reader configuration
    pub reader: ReaderConfig,
    /// Evaluation run configuration
    pub evaluation: EvaluationConfig,
    /// Observability configuration
    pub observability: ObservabilityConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> AppResult<Self> {
        let mut config = Self::default();

        config.reader.target_size = env::var("TARGET_SIZE")
            .unwrap_or_else(|_| DEFAULT_TARGET_SIZE.to_string())
            .parse()
            .map_err(|_| AppError::Config("TARGET_SIZE must be a valid number".to_string()))?;

        if let Ok(dir) = env::var("PREDICTIONS_DIR") {
            config.evaluation.predictions_dir = PathBuf::from(dir);
        }
        if let Ok(path) = env::var("GROUND_TRUTH_PATH") {
            config.evaluation.ground_truth_path = PathBuf::from(path);
        }

        config.observability = ObservabilityConfig::from_env();

        Ok(config)
    }

    /// Validate all configuration sections
    pub fn validate(&self) -> AppResult<()> {
        self.reader.validate()?;
        self.evaluation.validate()?;
        self.observability.validate().map_err(AppError::Config)?;
        Ok(())
    }

    /// Get a summary of the current configuration for logging
    pub fn summary(&self) -> String {
        format!(
            "Configuration: target_size={}, predictions_dir={}, ground_truth_path={}, environment={}",
            self.reader.target_size,
            self.evaluation.predictions_dir.display(),
            self.evaluation.ground_truth_path.display(),
            self.observability.environment
        )
    }
}
