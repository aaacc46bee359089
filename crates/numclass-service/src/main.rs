//! Number classification HTTP microservice binary.
//!
//! # Configuration
//!
//! - `SERVICE_PORT` / `PORT` - HTTP port (default: 8080)
//! - `NUMBERS_API_BASE_URL` - Fact provider base URL (default: http://numbersapi.com)
//! - `FACT_TIMEOUT_MS` - Fact lookup timeout (default: 3000)
//! - `FACT_RETRIES` - Extra fact lookup attempts (default: 0)
//! - `FACT_CACHE_ENABLED` / `FACT_CACHE_CAPACITY` - Fact memoization
//! - `RUST_LOG` - Log level (default: info)
//! - `LOG_FORMAT` - Log format: json (default) or text
//! - `METRICS_ENABLED` - Prometheus recorder and endpoint (default: true)
//! - `METRICS_PATH` - Metrics endpoint path (default: /metrics)

use std::net::SocketAddr;

use tracing::{error, info};

use numclass_service::build_router_with;
use numclass_service_shared::{
    AppState, LoggingConfig, MetricsConfig, ServiceConfig, init_logging, init_metrics,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging (reads LOG_FORMAT from environment)
    let logging_config = LoggingConfig::from_env().with_service("numclass");
    init_logging(&logging_config);

    let metrics_config = MetricsConfig::from_env();
    if let Err(e) = init_metrics(&metrics_config) {
        // Metrics are optional
        tracing::warn!(error = %e, "failed to initialize metrics, continuing without metrics");
    }

    let config = ServiceConfig::from_env();
    info!(port = config.port, upstream = %config.fact.base_url, "starting classification service");

    let state = AppState::from_config(&config).map_err(|e| {
        error!(error = %e, "failed to build application state");
        e
    })?;

    let app = build_router_with(state, &metrics_config);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!(addr = %addr, "listening on");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
