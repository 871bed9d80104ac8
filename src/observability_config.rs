//! # Observability Configuration
//!
//! Environment-specific logging configuration.

use std::env;

/// Observability configuration for different environments
#[derive(Debug, Clone)]
pub struct ObservabilityConfig {
    /// Environment name (development, staging, production)
    pub environment: String,
    /// Log level for the crate's own events
    pub log_level: String,
    /// Log output format override ("json" or "pretty")
    pub log_format: Option<String>,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            log_level: "info".to_string(),
            log_format: None,
        }
    }
}

impl ObservabilityConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            log_format: env::var("LOG_FORMAT").ok(),
        }
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Check if running in development environment
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Whether log lines should be human-readable rather than JSON
    pub fn use_pretty_format(&self) -> bool {
        match self.log_format.as_deref() {
            Some(format) => format == "pretty",
            None => self.is_development(),
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        const LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];
        if !LEVELS.contains(&self.log_level.to_lowercase().as_str()) {
            return Err(format!("Invalid log level: {}", self.log_level));
        }

        if let Some(format) = &self.log_format {
            if format != "json" && format != "pretty" {
                return Err(format!("Invalid log format: {}", format));
            }
        }

        Ok(())
    }
}
