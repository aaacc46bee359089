//! Structured logging infrastructure for the classification service.
//!
//! This module provides:
//! - [`LoggingConfig`]: Configuration for the logging system
//! - [`init_logging`]: Initialize tracing with JSON or text formatting
//!
//! # Environment Variables
//!
//! - `LOG_FORMAT`: Output format, either `json` (default) or `text`
//! - `RUST_LOG`: Log level filter (default: `info`)
//! - `SERVICE_NAME`: Service name recorded at startup (optional)
//!
//! # Example
//!
//! ```no_run
//! use numclass_service_shared::logging::{LoggingConfig, init_logging};
//!
//! // Initialize logging at startup (reads LOG_FORMAT from environment)
//! let config = LoggingConfig::from_env();
//! init_logging(&config);
//! ```

use serde::{Deserialize, Serialize};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// JSON structured logging (default, production).
    #[default]
    Json,
    /// Human-readable text logging (development).
    Text,
}

impl LogFormat {
    /// Parse log format from string.
    ///
    /// Accepts "json", "text", or "pretty" (alias for text).
    /// Returns `Json` for any other value.
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "text" | "pretty" => LogFormat::Text,
            _ => LogFormat::Json,
        }
    }
}

/// Configuration for the logging system.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Output format (json or text).
    pub format: LogFormat,
    /// Log level filter (e.g., "info", "debug", "warn").
    pub level: String,
    /// Service name to include in the startup entry.
    pub service: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::Json,
            level: "info".to_string(),
            service: None,
        }
    }
}

impl LoggingConfig {
    /// Create configuration from environment variables.
    pub fn from_env() -> Self {
        let format = std::env::var("LOG_FORMAT")
            .map(|v| LogFormat::parse(&v))
            .unwrap_or(LogFormat::Json);

        let level = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        let service = std::env::var("SERVICE_NAME").ok();

        Self {
            format,
            level,
            service,
        }
    }

    /// Set the service name unless one was already configured.
    pub fn with_service(mut self, service: impl Into<String>) -> Self {
        if self.service.is_none() {
            self.service = Some(service.into());
        }
        self
    }
}

/// Initialize the tracing subscriber with the given configuration.
///
/// Must be called once at application startup.
///
/// # JSON Format (default)
///
/// ```json
/// {"timestamp":"2026-01-10T10:00:00Z","level":"INFO","target":"numclass_service","fields":{"message":"..."}}
/// ```
///
/// # Text Format (development)
///
/// ```text
/// 2026-01-10T10:00:00Z  INFO numclass_service: listening
/// ```
pub fn init_logging(config: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    let registry = tracing_subscriber::registry().with(filter);

    match config.format {
        LogFormat::Text => {
            registry.with(fmt::layer().pretty()).init();
        }
        LogFormat::Json => {
            let json_layer = fmt::layer()
                .json()
                .with_current_span(false)
                .with_span_list(false);

            registry.with(json_layer).init();
        }
    }

    tracing::info!(
        service = config.service.as_deref().unwrap_or("-"),
        format = ?config.format,
        "logging initialized"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_format_parse() {
        assert_eq!(LogFormat::parse("json"), LogFormat::Json);
        assert_eq!(LogFormat::parse("JSON"), LogFormat::Json);
        assert_eq!(LogFormat::parse("text"), LogFormat::Text);
        assert_eq!(LogFormat::parse("pretty"), LogFormat::Text);
        assert_eq!(LogFormat::parse("PRETTY"), LogFormat::Text);
        assert_eq!(LogFormat::parse("unknown"), LogFormat::Json);
    }

    #[test]
    fn test_logging_config_default() {
        let config = LoggingConfig::default();
        assert_eq!(config.format, LogFormat::Json);
        assert_eq!(config.level, "info");
        assert!(config.service.is_none());
    }

    #[test]
    fn test_with_service_keeps_explicit_name() {
        let config = LoggingConfig::default().with_service("numclass");
        assert_eq!(config.service.as_deref(), Some("numclass"));

        let config = config.with_service("other");
        assert_eq!(config.service.as_deref(), Some("numclass"));
    }
}
