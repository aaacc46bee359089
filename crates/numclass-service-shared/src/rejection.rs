//! Error body for rejected `number` parameters.

use axum::{
    response::{IntoResponse, Response},
    Json,
};
use http::StatusCode;
use serde::{Deserialize, Serialize};

/// Why a `number` parameter was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectionReason {
    /// The parameter was not supplied.
    Missing,
    /// The text is not a base-10 integer.
    NotAnInteger,
    /// The integer does not fit in 64 bits.
    OutOfRange,
}

impl RejectionReason {
    /// Label used in logs and metrics.
    pub fn as_str(self) -> &'static str {
        match self {
            RejectionReason::Missing => "missing",
            RejectionReason::NotAnInteger => "not_an_integer",
            RejectionReason::OutOfRange => "out_of_range",
        }
    }
}

/// 400 response echoing the raw input.
///
/// Serializes as `{"number": <raw text or null>, "error": true}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvalidNumber {
    /// The raw parameter text, `None` when it was absent.
    pub number: Option<String>,
    /// Always `true`.
    pub error: bool,
    #[serde(skip)]
    reason: Option<RejectionReason>,
}

impl InvalidNumber {
    pub fn new(raw: Option<String>, reason: RejectionReason) -> Self {
        Self {
            number: raw,
            error: true,
            reason: Some(reason),
        }
    }

    pub fn missing() -> Self {
        Self::new(None, RejectionReason::Missing)
    }

    pub fn reason(&self) -> RejectionReason {
        self.reason.unwrap_or(RejectionReason::NotAnInteger)
    }
}

impl std::fmt::Display for InvalidNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.number {
            Some(raw) => write!(f, "invalid number {:?}: {}", raw, self.reason().as_str()),
            None => write!(f, "number parameter is required"),
        }
    }
}

impl std::error::Error for InvalidNumber {}

impl IntoResponse for InvalidNumber {
    fn into_response(self) -> Response {
        (StatusCode::BAD_REQUEST, Json(self)).into_response()
    }
}
