//! Application state for the HTTP service.
//!
//! This module provides the shared state structure that axum handlers use to
//! reach the fact provider.

use std::sync::Arc;

use numclass_lib::{CachedFactProvider, Error as LibError, FactProvider, NumbersApiClient};

use crate::config::ServiceConfig;

/// Error during application state initialization.
#[derive(Debug)]
pub enum AppStateError {
    /// Failed to build the numbers API client.
    FactClient(LibError),
}

impl std::fmt::Display for AppStateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FactClient(e) => write!(f, "failed to build fact client: {}", e),
        }
    }
}

impl std::error::Error for AppStateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::FactClient(e) => Some(e),
        }
    }
}

impl From<LibError> for AppStateError {
    fn from(err: LibError) -> Self {
        Self::FactClient(err)
    }
}

/// Shared application state for all axum handlers.
///
/// Cheaply cloneable (`Arc` internally); share it via axum's `State` extractor.
///
/// # Example
///
/// ```ignore
/// use axum::{Router, routing::get, extract::State};
/// use numclass_service_shared::{AppState, ServiceConfig};
///
/// async fn handler(State(state): State<AppState>) {
///     let fact = state.fact_provider().fetch_fact(6).await;
/// }
///
/// let state = AppState::from_config(&ServiceConfig::default()).unwrap();
/// let app = Router::new()
///     .route("/api/classify-number", get(handler))
///     .with_state(state);
/// ```
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    facts: Arc<dyn FactProvider>,
    upstream: String,
}

impl AppState {
    /// Build state from service configuration.
    ///
    /// Creates the numbers API client and, unless disabled, wraps it in a
    /// per-number fact cache.
    pub fn from_config(config: &ServiceConfig) -> Result<Self, AppStateError> {
        let client = NumbersApiClient::new(config.fact.clone())?;
        let upstream = config.fact.base_url.clone();

        let facts: Arc<dyn FactProvider> = match (config.cache_enabled, config.cache_capacity) {
            (false, _) => Arc::new(client),
            (true, Some(capacity)) => {
                Arc::new(CachedFactProvider::with_capacity_limit(client, capacity))
            }
            (true, None) => Arc::new(CachedFactProvider::new(client)),
        };

        tracing::info!(
            upstream = %upstream,
            timeout_ms = config.fact.timeout.as_millis() as u64,
            retries = config.fact.retries,
            cache_enabled = config.cache_enabled,
            "fact provider configured"
        );

        Ok(Self::from_shared_provider(facts, upstream))
    }

    /// Create state around an existing provider.
    ///
    /// This is useful for testing or for alternative fact sources.
    pub fn from_provider<P>(provider: P, upstream: impl Into<String>) -> Self
    where
        P: FactProvider + 'static,
    {
        Self::from_shared_provider(Arc::new(provider), upstream)
    }

    pub fn from_shared_provider(facts: Arc<dyn FactProvider>, upstream: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                facts,
                upstream: upstream.into(),
            }),
        }
    }

    /// Access the fact provider.
    pub fn fact_provider(&self) -> &dyn FactProvider {
        self.inner.facts.as_ref()
    }

    /// Description of where facts come from (base URL for the HTTP client).
    pub fn upstream(&self) -> &str {
        &self.inner.upstream
    }

    /// Number of memoized facts, when caching is enabled.
    pub fn cached_facts(&self) -> Option<usize> {
        self.inner.facts.cached_entries()
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("upstream", &self.inner.upstream)
            .field("cached_facts", &self.cached_facts())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{StubFactProvider, test_state_with};

    #[test]
    fn test_app_state_from_config_caches_by_default() {
        let state = AppState::from_config(&ServiceConfig::default()).unwrap();
        assert_eq!(state.upstream(), "http://numbersapi.com");
        assert_eq!(state.cached_facts(), Some(0));
    }

    #[test]
    fn test_app_state_from_config_without_cache() {
        let config = ServiceConfig {
            cache_enabled: false,
            ..ServiceConfig::default()
        };
        let state = AppState::from_config(&config).unwrap();
        assert!(state.cached_facts().is_none());
    }

    #[tokio::test]
    async fn test_app_state_clone_shares_provider() {
        let (state1, stub) = test_state_with(StubFactProvider::found("fact"));
        let state2 = state1.clone();

        state1.fact_provider().fetch_fact(1).await;
        state2.fact_provider().fetch_fact(2).await;

        assert_eq!(stub.calls(), 2);
    }

    #[test]
    fn test_app_state_debug() {
        let state = AppState::from_provider(StubFactProvider::found("fact"), "stub");
        let debug = format!("{:?}", state);

        assert!(debug.contains("AppState"));
        assert!(debug.contains("upstream"));
        assert!(debug.contains("stub"));
    }

    #[test]
    fn test_app_state_error_display() {
        let err = AppStateError::from(LibError::UpstreamStatus { status: 500 });
        assert!(err.to_string().contains("fact client"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
