//! Service configuration from environment variables.
//!
//! # Environment Variables
//!
//! - `SERVICE_PORT` (falls back to `PORT`): HTTP port (default: 8080)
//! - `NUMBERS_API_BASE_URL`: Fact provider base URL (default: `http://numbersapi.com`)
//! - `FACT_TIMEOUT_MS`: Upstream request timeout in milliseconds (default: 3000)
//! - `FACT_RETRIES`: Extra attempts on transport errors and 5xx (default: 0)
//! - `FACT_CACHE_ENABLED`: "false" disables fact memoization (default: true)
//! - `FACT_CACHE_CAPACITY`: Maximum cached facts (default: unbounded)

use std::str::FromStr;
use std::time::Duration;

use numclass_lib::FactClientConfig;

/// Default HTTP port.
pub const DEFAULT_PORT: u16 = 8080;

/// Runtime configuration for the classification service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    /// Port to listen on.
    pub port: u16,
    /// Numbers API client settings.
    pub fact: FactClientConfig,
    /// Whether successful facts are memoized per number.
    pub cache_enabled: bool,
    /// Upper bound on memoized facts, if any.
    pub cache_capacity: Option<usize>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            fact: FactClientConfig::default(),
            cache_enabled: true,
            cache_capacity: None,
        }
    }
}

impl ServiceConfig {
    /// Create configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create configuration from an arbitrary key lookup.
    ///
    /// Unset keys take their defaults; unparseable values are logged and
    /// replaced by the default.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let port = match lookup("SERVICE_PORT") {
            Some(_) => parse_or(&lookup, "SERVICE_PORT", defaults.port),
            None => parse_or(&lookup, "PORT", defaults.port),
        };

        let base_url = lookup("NUMBERS_API_BASE_URL")
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or(defaults.fact.base_url);

        let timeout_ms = parse_or(
            &lookup,
            "FACT_TIMEOUT_MS",
            defaults.fact.timeout.as_millis() as u64,
        );
        let retries = parse_or(&lookup, "FACT_RETRIES", defaults.fact.retries);

        let cache_enabled = lookup("FACT_CACHE_ENABLED")
            .map(|v| v.trim().to_lowercase() != "false")
            .unwrap_or(defaults.cache_enabled);

        let cache_capacity = lookup("FACT_CACHE_CAPACITY").and_then(|v| {
            v.trim()
                .parse::<usize>()
                .map_err(|e| {
                    tracing::warn!(key = "FACT_CACHE_CAPACITY", value = %v, error = %e, "ignoring invalid value");
                })
                .ok()
        });

        Self {
            port,
            fact: FactClientConfig {
                base_url,
                timeout: Duration::from_millis(timeout_ms),
                retries,
                retry_backoff: defaults.fact.retry_backoff,
            },
            cache_enabled,
            cache_capacity,
        }
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => match raw.trim().parse() {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(key, value = %raw, error = %e, "ignoring invalid value, using default");
                default
            }
        },
        None => default,
    }
}
