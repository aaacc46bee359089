//! Shared infrastructure for the number classification HTTP service.
//!
//! This crate provides the HTTP glue around `numclass-lib`:
//!
//! - [`AppState`]: Shared fact provider and upstream settings for all handlers
//! - [`ServiceConfig`]: Environment-driven service configuration
//! - [`health`]: Health check handlers for liveness/readiness probes
//! - [`InvalidNumber`]: 400 body for rejected `number` parameters
//! - [`ClassificationResponse`]: 200 body for a classified number
//! - [`metrics`]: Prometheus metrics infrastructure
//! - [`logging`]: Structured JSON logging setup
//! - [`middleware`]: Request tracking, metrics, and CORS layers
//! - [`ClassifyQuery`]: Query parameter parsing and validation
//!
//! # Architecture
//!
//! The service follows a thin-handler pattern where all business logic resides
//! in `numclass-lib`. This crate provides only HTTP glue:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  axum Handler                                               │
//! │  - Parse query string                                       │
//! │  - Validate the number parameter                            │
//! │  - Classify + fetch fact via numclass-lib                   │
//! │  - Format response                                          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Testing Support
//!
//! The [`test_utils`] module provides a stub fact provider and state for
//! handler testing. Enable the `test-utils` feature to access it from dependent
//! crates.

#![deny(warnings)]

pub mod config;
mod health;
pub mod logging;
pub mod metrics;
pub mod middleware;
mod rejection;
mod request;
mod response;
mod state;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use config::ServiceConfig;
pub use health::{health_live, health_ready, HealthStatus};
pub use logging::{init_logging, LogFormat, LoggingConfig};
pub use metrics::{
    init_metrics, metrics_handler, record_fact_lookup, record_number_classified,
    record_validation_failure, MetricsConfig, MetricsError,
};
pub use middleware::{cors_layer, extract_or_generate_request_id, MetricsLayer, RequestId};
pub use rejection::{InvalidNumber, RejectionReason};
pub use request::{parse_number, ClassifyQuery, Validate};
pub use response::ClassificationResponse;
pub use state::{AppState, AppStateError};
