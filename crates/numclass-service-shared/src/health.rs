//! Health check handlers for liveness and readiness probes.
//!
//! Provides `/health/live` and `/health/ready` endpoints that return JSON
//! status responses.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::AppState;

/// Health status response for liveness and readiness probes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    /// Status indicator, "ok" when healthy.
    pub status: String,

    /// Service name for identification.
    pub service: String,

    /// Service version from build-time.
    pub version: String,

    /// RFC 3339 time the probe was answered.
    pub checked_at: String,

    /// Where facts are fetched from (readiness only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fact_upstream: Option<String>,

    /// Memoized fact count when caching is enabled (readiness only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cached_facts: Option<usize>,
}

impl HealthStatus {
    /// Create a healthy liveness status.
    pub fn alive(service: &str, version: &str) -> Self {
        Self {
            status: "ok".to_string(),
            service: service.to_string(),
            version: version.to_string(),
            checked_at: now_rfc3339(),
            fact_upstream: None,
            cached_facts: None,
        }
    }

    /// Create a ready status with fact provider information.
    pub fn ready(service: &str, version: &str, upstream: &str, cached: Option<usize>) -> Self {
        Self {
            fact_upstream: Some(upstream.to_string()),
            cached_facts: cached,
            ..Self::alive(service, version)
        }
    }
}

fn now_rfc3339() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Liveness probe handler.
///
/// ```text
/// GET /health/live
/// {"status":"ok","service":"numclass-service-shared","version":"0.1.0","checked_at":"..."}
/// ```
pub async fn health_live() -> impl IntoResponse {
    let status = HealthStatus::alive(env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
    (StatusCode::OK, Json(status))
}

/// Readiness probe handler.
///
/// The service holds no data that must be loaded first, so readiness only adds
/// the fact provider details. Upstream availability is not probed: the
/// classification endpoint degrades gracefully without it.
pub async fn health_ready(State(state): State<AppState>) -> impl IntoResponse {
    let status = HealthStatus::ready(
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        state.upstream(),
        state.cached_facts(),
    );
    (StatusCode::OK, Json(status))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_status_alive() {
        let status = HealthStatus::alive("test-service", "1.0.0");
        assert_eq!(status.status, "ok");
        assert_eq!(status.service, "test-service");
        assert_eq!(status.version, "1.0.0");
        assert!(status.checked_at.ends_with('Z'));
        assert!(status.fact_upstream.is_none());
    }

    #[test]
    fn test_health_status_ready() {
        let status = HealthStatus::ready("svc", "1.0.0", "http://numbersapi.com", Some(3));
        assert_eq!(status.status, "ok");
        assert_eq!(status.fact_upstream.as_deref(), Some("http://numbersapi.com"));
        assert_eq!(status.cached_facts, Some(3));
    }

    #[test]
    fn test_health_status_serialization() {
        let status = HealthStatus::alive("numclass", "0.1.0");
        let json = serde_json::to_string(&status).unwrap();
        assert!(json.contains("\"status\":\"ok\""));
        assert!(json.contains("\"service\":\"numclass\""));
        assert!(!json.contains("cached_facts"));
    }
}
