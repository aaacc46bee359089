//! Trivia facts for classified numbers.
//!
//! The service depends on facts only through [`FactProvider`]. Providers never
//! fail: any upstream problem degrades to one of two sentinel strings so that a
//! classification can always be returned.
//!
//! - [`NumbersApiClient`]: HTTP adapter for the public numbers API
//! - [`CachedFactProvider`]: memoizes successful lookups keyed by the number

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use dashmap::DashMap;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Base URL of the public numbers API.
pub const DEFAULT_NUMBERS_API_BASE_URL: &str = "http://numbersapi.com";

/// Sentinel used when the upstream answered but had no usable fact.
pub const NO_FACT_AVAILABLE: &str = "No fun fact available";

/// Sentinel used when the upstream could not be reached at all.
pub const FACT_FETCH_ERROR: &str = "Error fetching fun fact";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(3);
const DEFAULT_RETRY_BACKOFF: Duration = Duration::from_millis(100);

/// How a fact lookup ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FactOutcome {
    /// The upstream returned a fact.
    Found,
    /// The upstream responded without usable data.
    Unavailable,
    /// The upstream could not be reached or timed out.
    Unreachable,
}

impl FactOutcome {
    /// Label used in logs and metrics.
    pub fn as_str(self) -> &'static str {
        match self {
            FactOutcome::Found => "found",
            FactOutcome::Unavailable => "unavailable",
            FactOutcome::Unreachable => "unreachable",
        }
    }
}

/// A fact, or the sentinel text standing in for one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunFact {
    pub text: String,
    pub outcome: FactOutcome,
}

impl FunFact {
    pub fn found(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            outcome: FactOutcome::Found,
        }
    }

    pub fn unavailable() -> Self {
        Self {
            text: NO_FACT_AVAILABLE.to_string(),
            outcome: FactOutcome::Unavailable,
        }
    }

    pub fn unreachable() -> Self {
        Self {
            text: FACT_FETCH_ERROR.to_string(),
            outcome: FactOutcome::Unreachable,
        }
    }

    /// Degrade a lookup error to the matching sentinel.
    pub fn from_error(error: &Error) -> Self {
        if error.is_transport() {
            Self::unreachable()
        } else {
            Self::unavailable()
        }
    }

    /// `true` only when the text is a real fact rather than a sentinel.
    pub fn is_available(&self) -> bool {
        self.outcome == FactOutcome::Found
    }
}

/// Source of trivia facts about integers.
#[async_trait]
pub trait FactProvider: Send + Sync {
    /// Fetch a fact about `number`. Never fails; see [`FunFact`].
    async fn fetch_fact(&self, number: i64) -> FunFact;

    /// Number of memoized facts, for providers that cache.
    fn cached_entries(&self) -> Option<usize> {
        None
    }
}

#[async_trait]
impl<P: FactProvider + ?Sized> FactProvider for Arc<P> {
    async fn fetch_fact(&self, number: i64) -> FunFact {
        (**self).fetch_fact(number).await
    }

    fn cached_entries(&self) -> Option<usize> {
        (**self).cached_entries()
    }
}

/// Settings for [`NumbersApiClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FactClientConfig {
    /// Base URL; requests go to `{base_url}/{n}/math?json`.
    pub base_url: String,
    /// Upper bound on a single request, including reading the body.
    pub timeout: Duration,
    /// Extra attempts after a transport error or 5xx status.
    pub retries: u32,
    /// Delay before retry `k` is `k * retry_backoff`.
    pub retry_backoff: Duration,
}

impl Default for FactClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_NUMBERS_API_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            retries: 0,
            retry_backoff: DEFAULT_RETRY_BACKOFF,
        }
    }
}

#[derive(Debug, Deserialize)]
struct FactPayload {
    #[serde(default)]
    text: Option<String>,
}

/// [`FactProvider`] backed by the numbers API over HTTP.
#[derive(Debug, Clone)]
pub struct NumbersApiClient {
    client: Client,
    config: FactClientConfig,
}

impl NumbersApiClient {
    /// Build a client with its own connection pool.
    pub fn new(config: FactClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(user_agent())
            .build()
            .map_err(Error::Http)?;
        Ok(Self { client, config })
    }

    /// URL of the math fact for `number`.
    pub fn fact_url(&self, number: i64) -> String {
        format!(
            "{}/{}/math?json",
            self.config.base_url.trim_end_matches('/'),
            number
        )
    }

    /// Fetch the fact text, surfacing the reason for any failure.
    pub async fn try_fetch(&self, number: i64) -> Result<String> {
        let mut attempt = 0;
        loop {
            match self.fetch_once(number).await {
                Ok(text) => return Ok(text),
                Err(err) if attempt < self.config.retries && err.is_retryable() => {
                    attempt += 1;
                    tracing::debug!(number, attempt, error = %err, "retrying numbers API request");
                    tokio::time::sleep(self.config.retry_backoff * attempt).await;
                }
                Err(err) => return Err(err),
            }
        }
    }

    async fn fetch_once(&self, number: i64) -> Result<String> {
        let response = self.client.get(self.fact_url(number)).send().await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(Error::UpstreamStatus {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        let payload: FactPayload = serde_json::from_str(&body)?;
        payload.text.ok_or(Error::MissingFactText { number })
    }
}

#[async_trait]
impl FactProvider for NumbersApiClient {
    async fn fetch_fact(&self, number: i64) -> FunFact {
        match self.try_fetch(number).await {
            Ok(text) => FunFact::found(text),
            Err(err) => {
                let fact = FunFact::from_error(&err);
                tracing::warn!(
                    number,
                    error = %err,
                    outcome = fact.outcome.as_str(),
                    "numbers API lookup failed"
                );
                fact
            }
        }
    }
}

fn user_agent() -> String {
    format!("numclass-lib/{version}", version = env!("CARGO_PKG_VERSION"))
}

/// Memoizing wrapper around another provider.
///
/// Only real facts are stored, so a failed lookup is retried by the next
/// request for the same number. With a capacity limit, inserts stop once the
/// map is full; existing entries are kept.
#[derive(Debug)]
pub struct CachedFactProvider<P> {
    inner: P,
    cache: DashMap<i64, String>,
    capacity: Option<usize>,
}

impl<P> CachedFactProvider<P> {
    /// Unbounded cache.
    pub fn new(inner: P) -> Self {
        Self {
            inner,
            cache: DashMap::new(),
            capacity: None,
        }
    }

    /// Cache holding at most `capacity` facts.
    pub fn with_capacity_limit(inner: P, capacity: usize) -> Self {
        Self {
            inner,
            cache: DashMap::with_capacity(capacity),
            capacity: Some(capacity),
        }
    }

    pub fn inner(&self) -> &P {
        &self.inner
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    fn has_room(&self) -> bool {
        match self.capacity {
            Some(capacity) => self.cache.len() < capacity,
            None => true,
        }
    }
}

#[async_trait]
impl<P: FactProvider> FactProvider for CachedFactProvider<P> {
    async fn fetch_fact(&self, number: i64) -> FunFact {
        let cached = self.cache.get(&number).map(|entry| entry.value().clone());
        if let Some(text) = cached {
            tracing::debug!(number, "fact cache hit");
            return FunFact::found(text);
        }

        let fact = self.inner.fetch_fact(number).await;
        if fact.is_available() && self.has_room() {
            self.cache.insert(number, fact.text.clone());
        }
        fact
    }

    fn cached_entries(&self) -> Option<usize> {
        Some(self.cache.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Answers from a fixed script and counts calls.
    struct ScriptedProvider {
        fact: FunFact,
        calls: AtomicUsize,
    }

    impl ScriptedProvider {
        fn new(fact: FunFact) -> Self {
            Self {
                fact,
                calls: AtomicUsize::new(0),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl FactProvider for ScriptedProvider {
        async fn fetch_fact(&self, _number: i64) -> FunFact {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.fact.clone()
        }
    }

    #[test]
    fn sentinels_are_distinct() {
        assert_ne!(NO_FACT_AVAILABLE, FACT_FETCH_ERROR);
        assert_eq!(FunFact::unavailable().text, NO_FACT_AVAILABLE);
        assert_eq!(FunFact::unreachable().text, FACT_FETCH_ERROR);
        assert!(!FunFact::unavailable().is_available());
        assert!(!FunFact::unreachable().is_available());
        assert!(FunFact::found("6 is perfect.").is_available());
    }

    #[test]
    fn errors_degrade_to_matching_sentinel() {
        let status = Error::UpstreamStatus { status: 404 };
        assert_eq!(FunFact::from_error(&status).outcome, FactOutcome::Unavailable);

        let missing = Error::MissingFactText { number: 1 };
        assert_eq!(FunFact::from_error(&missing).text, NO_FACT_AVAILABLE);
    }

    #[test]
    fn fact_url_appends_number_and_math_path() {
        let client = NumbersApiClient::new(FactClientConfig {
            base_url: "http://facts.local/".to_string(),
            ..FactClientConfig::default()
        })
        .unwrap();
        assert_eq!(client.fact_url(371), "http://facts.local/371/math?json");
        assert_eq!(client.fact_url(-7), "http://facts.local/-7/math?json");
    }

    #[test]
    fn default_config_targets_public_api() {
        let config = FactClientConfig::default();
        assert_eq!(config.base_url, DEFAULT_NUMBERS_API_BASE_URL);
        assert_eq!(config.timeout, Duration::from_secs(3));
        assert_eq!(config.retries, 0);
    }

    #[tokio::test]
    async fn cache_serves_repeat_lookups_without_upstream() {
        let cached = CachedFactProvider::new(ScriptedProvider::new(FunFact::found("fact")));

        let first = cached.fetch_fact(6).await;
        let second = cached.fetch_fact(6).await;

        assert_eq!(first, second);
        assert_eq!(cached.inner().calls(), 1);
        assert_eq!(cached.cached_entries(), Some(1));
    }

    #[tokio::test]
    async fn cache_keys_on_number_only() {
        let cached = CachedFactProvider::new(ScriptedProvider::new(FunFact::found("fact")));

        cached.fetch_fact(6).await;
        cached.fetch_fact(28).await;

        assert_eq!(cached.inner().calls(), 2);
        assert_eq!(cached.len(), 2);
    }

    #[tokio::test]
    async fn cache_skips_sentinels() {
        let cached = CachedFactProvider::new(ScriptedProvider::new(FunFact::unreachable()));

        let fact = cached.fetch_fact(6).await;
        cached.fetch_fact(6).await;

        assert_eq!(fact.text, FACT_FETCH_ERROR);
        assert!(cached.is_empty());
        assert_eq!(cached.inner().calls(), 2);
    }

    #[tokio::test]
    async fn capacity_limit_stops_inserts() {
        let cached =
            CachedFactProvider::with_capacity_limit(ScriptedProvider::new(FunFact::found("f")), 1);

        cached.fetch_fact(1).await;
        cached.fetch_fact(2).await;
        cached.fetch_fact(2).await;

        assert_eq!(cached.len(), 1);
        assert_eq!(cached.inner().calls(), 3);
    }

    #[tokio::test]
    async fn arc_forwards_to_inner_provider() {
        let provider: Arc<dyn FactProvider> =
            Arc::new(CachedFactProvider::new(ScriptedProvider::new(FunFact::found("f"))));

        provider.fetch_fact(3).await;
        assert_eq!(provider.cached_entries(), Some(1));
    }
}
