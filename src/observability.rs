//! Observability module for tracing and logging setup.
//!
//! This module provides:
//! - Structured logging with configurable levels
//! - JSON output for production, pretty output for development
//! - Span helpers for reader and evaluation operations

use anyhow::Result;
use tracing_subscriber::prelude::*;

use crate::observability_config::ObservabilityConfig;

/// Initialize structured logging with tracing and configuration
pub fn init_tracing_with_config(config: &ObservabilityConfig) -> Result<()> {
    config
        .validate()
        .map_err(|e| anyhow::anyhow!("Observability configuration is invalid: {}", e))?;

    let filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(format!("vehicle_passport_ocr={}", config.log_level.to_lowercase()).parse()?);

    if config.use_pretty_format() {
        // Pretty formatting for development
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .pretty()
                    .with_target(true)
                    .with_thread_ids(false)
                    .with_thread_names(false),
            )
            .try_init()?;
    } else {
        // JSON formatting for production (default)
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_thread_names(true),
            )
            .try_init()?;
    }

    tracing::info!(
        environment = %config.environment,
        log_level = %config.log_level,
        "Tracing initialized with structured logging"
    );
    Ok(())
}

/// Create a span for identifier reader operations
pub fn reader_span(operation: &str) -> tracing::Span {
    tracing::info_span!("reader_operation", operation = operation, component = "reader")
}

/// Create a span for one document of an evaluation run
pub fn evaluation_span(document: &str) -> tracing::Span {
    tracing::info_span!(
        "evaluation_document",
        document = document,
        component = "evaluation"
    )
}
