//! # Application Error Types
//!
//! This module defines common error types used throughout the application.
//! It provides structured error handling for configuration, evaluation runs
//! and the identifier reader.

use std::fmt;

/// General application error type for consistent error handling
#[derive(Debug, Clone, PartialEq)]
pub enum AppError {
    /// Configuration validation errors
    Config(String),
    /// Validation errors (ground truth entries, inputs, etc.)
    Validation(String),
    /// Identifier reader errors
    Reader(String),
    /// File system errors
    FileSystem(String),
    /// Internal application errors
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(msg) => write!(f, "[CONFIG] {}", msg),
            AppError::Validation(msg) => write!(f, "[VALIDATION] {}", msg),
            AppError::Reader(msg) => write!(f, "[READER] {}", msg),
            AppError::FileSystem(msg) => write!(f, "[FILESYSTEM] {}", msg),
            AppError::Internal(msg) => write!(f, "[INTERNAL] {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl From<crate::reader_errors::ReaderError> for AppError {
    fn from(err: crate::reader_errors::ReaderError) -> Self {
        AppError::Reader(err.to_string())
    }
}

/// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;

/// Standardized error logging utilities for consistent error reporting across the application
pub mod error_logging {
    use tracing::error;

    /// Log fragment loading errors with source context
    pub fn log_load_error(
        error: &impl std::fmt::Display,
        operation: &str,
        source: Option<&str>,
        fragment_count: Option<usize>,
    ) {
        error!(
            error = %error,
            operation = %operation,
            source = ?source,
            fragment_count = ?fragment_count,
            "Fragment loading failed"
        );
    }

    /// Log evaluation errors with document context
    pub fn log_evaluation_error(
        error: &impl std::fmt::Display,
        operation: &str,
        document: Option<&str>,
    ) {
        error!(
            error = %error,
            operation = %operation,
            document = ?document,
            "Evaluation failed"
        );
    }

    /// Log configuration errors during startup/initialization
    pub fn log_config_error(error: &impl std::fmt::Display, config_key: &str, operation: &str) {
        error!(
            error = %error,
            config_key = %config_key,
            operation = %operation,
            "Configuration error"
        );
    }
}
