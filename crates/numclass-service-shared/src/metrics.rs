//! Prometheus metrics infrastructure for the classification service.
//!
//! This module provides:
//! - [`MetricsConfig`]: Configuration for the metrics system
//! - [`init_metrics`]: Initialize the Prometheus metrics recorder
//! - [`metrics_handler`]: Axum handler for `/metrics` endpoint
//! - Business metric helpers for classifications and fact lookups
//!
//! # Example
//!
//! ```no_run
//! use numclass_service_shared::metrics::{MetricsConfig, init_metrics, metrics_handler};
//! use axum::{Router, routing::get};
//!
//! // Initialize metrics at startup
//! let config = MetricsConfig::default();
//! init_metrics(&config).expect("failed to initialize metrics");
//!
//! // Add metrics endpoint to router
//! let app: Router = Router::new()
//!     .route(&config.path, get(metrics_handler));
//! ```

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use numclass_lib::FactOutcome;
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};

/// Global Prometheus handle for rendering metrics.
static PROMETHEUS_HANDLE: OnceCell<PrometheusHandle> = OnceCell::new();

/// Configuration for the metrics system.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsConfig {
    /// Whether metrics collection is enabled.
    pub enabled: bool,
    /// Path for the metrics endpoint (e.g., "/metrics").
    pub path: String,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: "/metrics".to_string(),
        }
    }
}

impl MetricsConfig {
    /// Create configuration from environment variables.
    ///
    /// - `METRICS_ENABLED`: "true" or "false" (default: true)
    /// - `METRICS_PATH`: Path for metrics endpoint (default: "/metrics")
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    ///
    /// A path without a leading `/` gets one; an empty path falls back to
    /// `/metrics`.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let enabled = lookup("METRICS_ENABLED")
            .map(|v| v.to_lowercase() != "false")
            .unwrap_or(true);

        let path = match lookup("METRICS_PATH") {
            Some(path) if !path.trim().is_empty() => {
                let path = path.trim();
                if path.starts_with('/') {
                    path.to_string()
                } else {
                    format!("/{path}")
                }
            }
            _ => "/metrics".to_string(),
        };

        Self { enabled, path }
    }
}

/// Initialize the Prometheus metrics recorder.
///
/// This must be called once at application startup before any metrics are recorded.
///
/// # Errors
///
/// Returns an error if:
/// - Metrics are disabled in configuration
/// - The recorder has already been installed
/// - The Prometheus builder fails to install
pub fn init_metrics(config: &MetricsConfig) -> Result<(), MetricsError> {
    if !config.enabled {
        return Err(MetricsError::Disabled);
    }

    if PROMETHEUS_HANDLE.get().is_some() {
        return Err(MetricsError::AlreadyInitialized);
    }

    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| MetricsError::InstallFailed(e.to_string()))?;

    PROMETHEUS_HANDLE
        .set(handle)
        .map_err(|_| MetricsError::AlreadyInitialized)?;

    Ok(())
}

/// Axum handler for the `/metrics` endpoint.
///
/// Returns Prometheus exposition format text.
pub async fn metrics_handler() -> String {
    PROMETHEUS_HANDLE
        .get()
        .map(|h| h.render())
        .unwrap_or_else(|| "# Metrics not initialized\n".to_string())
}

/// Errors that can occur during metrics initialization.
#[derive(Debug, Clone)]
pub enum MetricsError {
    /// Metrics are disabled in configuration.
    Disabled,
    /// The recorder has already been installed.
    AlreadyInitialized,
    /// The Prometheus builder failed to install.
    InstallFailed(String),
}

impl std::fmt::Display for MetricsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MetricsError::Disabled => write!(f, "metrics are disabled"),
            MetricsError::AlreadyInitialized => write!(f, "metrics recorder already initialized"),
            MetricsError::InstallFailed(e) => {
                write!(f, "failed to install metrics recorder: {}", e)
            }
        }
    }
}

impl std::error::Error for MetricsError {}

// =============================================================================
// Business Metrics Helpers
// =============================================================================

/// Record a successful classification.
///
/// Increments `numclass_numbers_classified_total`, labelled by parity and
/// primality.
pub fn record_number_classified(is_even: bool, is_prime: bool) {
    metrics::counter!(
        "numclass_numbers_classified_total",
        "parity" => if is_even { "even" } else { "odd" },
        "prime" => if is_prime { "true" } else { "false" }
    )
    .increment(1);
}

/// Record a rejected `number` parameter.
///
/// Increments `numclass_validation_failures_total`.
///
/// # Arguments
///
/// * `reason` - Why the input was rejected (e.g., "missing", "not_an_integer")
pub fn record_validation_failure(reason: &'static str) {
    metrics::counter!(
        "numclass_validation_failures_total",
        "reason" => reason
    )
    .increment(1);
}

/// Record how a fact lookup ended.
///
/// Increments `numclass_fact_lookups_total`.
pub fn record_fact_lookup(outcome: FactOutcome) {
    metrics::counter!(
        "numclass_fact_lookups_total",
        "outcome" => outcome.as_str()
    )
    .increment(1);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_config_default() {
        let config = MetricsConfig::default();
        assert!(config.enabled);
        assert_eq!(config.path, "/metrics");
    }

    #[test]
    fn test_metrics_config_from_lookup() {
        let config = MetricsConfig::from_lookup(|key| match key {
            "METRICS_ENABLED" => Some("FALSE".to_string()),
            "METRICS_PATH" => Some("internal/prom".to_string()),
            _ => None,
        });
        assert!(!config.enabled);
        assert_eq!(config.path, "/internal/prom");

        let blank = MetricsConfig::from_lookup(|key| {
            (key == "METRICS_PATH").then(|| "  ".to_string())
        });
        assert!(blank.enabled);
        assert_eq!(blank.path, "/metrics");
    }

    #[test]
    fn test_init_metrics_disabled() {
        let config = MetricsConfig {
            enabled: false,
            path: "/metrics".to_string(),
        };
        assert!(matches!(init_metrics(&config), Err(MetricsError::Disabled)));
    }

    #[test]
    fn test_metrics_handler_returns_prometheus_format() {
        let rt = tokio::runtime::Runtime::new().unwrap();
        let output = rt.block_on(async { metrics_handler().await });

        assert!(
            output.contains('#') || output.is_empty(),
            "Metrics output should be Prometheus format or indicate not initialized"
        );
    }

    // Without an installed recorder these are no-ops; they must not panic.
    #[test]
    fn test_business_metric_helpers() {
        record_number_classified(true, false);
        record_number_classified(false, true);
        record_validation_failure("missing");
        record_validation_failure("not_an_integer");
        record_fact_lookup(FactOutcome::Found);
        record_fact_lookup(FactOutcome::Unreachable);
    }

    #[test]
    fn test_metrics_error_display() {
        assert_eq!(MetricsError::Disabled.to_string(), "metrics are disabled");
        assert_eq!(
            MetricsError::AlreadyInitialized.to_string(),
            "metrics recorder already initialized"
        );

        let failed = MetricsError::InstallFailed("test error".to_string());
        assert!(failed.to_string().contains("test error"));
    }
}
