//! Number classification HTTP microservice.
//!
//! # Endpoints
//!
//! - `GET /api/classify-number?number=<n>` - Classify an integer and attach a fun fact
//! - `GET /api?number=<n>` - Alias of the above
//! - `GET /metrics` - Prometheus metrics endpoint (path set by `METRICS_PATH`)
//! - `GET /health/live` - Liveness probe
//! - `GET /health/ready` - Readiness probe
//!
//! Every response carries `Access-Control-Allow-Origin: *` and an
//! `X-Request-ID` header.

use axum::{
    Extension, Router,
    extract::{Query, State, rejection::QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use tracing::{error, info, warn};

use numclass_lib::Classification;
use numclass_service_shared::{
    AppState, ClassificationResponse, ClassifyQuery, InvalidNumber, MetricsConfig, MetricsLayer,
    RejectionReason, RequestId, Validate, cors_layer, health_live, health_ready, metrics_handler,
    record_fact_lookup, record_number_classified, record_validation_failure,
};

/// Canonical classification route.
pub const CLASSIFY_PATH: &str = "/api/classify-number";

/// Short alias accepted for the classification route.
pub const CLASSIFY_ALIAS_PATH: &str = "/api";

/// Build the service router with every route and layer registered, exposing
/// metrics at the default `/metrics` path.
pub fn build_router(state: AppState) -> Router {
    build_router_with(state, &MetricsConfig::default())
}

/// Build the service router, serving metrics at `metrics.path`.
///
/// The metrics route is left out entirely when `metrics.enabled` is false.
pub fn build_router_with(state: AppState, metrics: &MetricsConfig) -> Router {
    let mut router = Router::new()
        .route(CLASSIFY_PATH, get(classify_handler))
        .route(CLASSIFY_ALIAS_PATH, get(classify_handler))
        .route("/health/live", get(health_live))
        .route("/health/ready", get(health_ready));

    if metrics.enabled {
        router = router.route(&metrics.path, get(metrics_handler));
    }

    router
        .layer(MetricsLayer)
        .layer(cors_layer())
        .with_state(state)
}

/// Handle `GET /api/classify-number` requests.
///
/// When `number` is repeated, the first occurrence is classified.
///
/// Rejections answer 400 with the raw input echoed back. Once the number is
/// valid the answer is always 200; a failed fact lookup only changes the
/// `fun_fact` text.
async fn classify_handler(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Response {
    let query = match query {
        Ok(Query(pairs)) => ClassifyQuery::from_pairs(pairs),
        Err(rejection) => {
            info!(request_id = %request_id, error = %rejection, "unparseable query string");
            return reject(InvalidNumber::new(None, RejectionReason::NotAnInteger));
        }
    };

    let number = match query.validate() {
        Ok(number) => number,
        Err(rejection) => {
            info!(
                request_id = %request_id,
                raw = ?rejection.number,
                reason = rejection.reason().as_str(),
                "rejected number parameter"
            );
            return reject(rejection);
        }
    };

    // Trial division is CPU-bound for large inputs; keep it off the reactor
    // while the fact lookup is in flight.
    let (classification, fact) = tokio::join!(
        tokio::task::spawn_blocking(move || Classification::of(number)),
        state.fact_provider().fetch_fact(number),
    );

    let classification = match classification {
        Ok(classification) => classification,
        Err(e) => {
            error!(request_id = %request_id, number, error = %e, "classification task failed");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    record_fact_lookup(fact.outcome);
    if !fact.is_available() {
        warn!(
            request_id = %request_id,
            number,
            outcome = fact.outcome.as_str(),
            "responding with fallback fun fact"
        );
    }

    record_number_classified(classification.is_even(), classification.is_prime);

    info!(
        request_id = %request_id,
        number,
        is_prime = classification.is_prime,
        is_perfect = classification.is_perfect,
        digit_sum = classification.digit_sum,
        "number classified"
    );

    ClassificationResponse::new(classification, fact).into_response()
}

fn reject(rejection: InvalidNumber) -> Response {
    record_validation_failure(rejection.reason().as_str());
    rejection.into_response()
}
