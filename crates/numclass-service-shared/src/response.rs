//! Response body for a classified number.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use numclass_lib::{Classification, FunFact};
use serde::{Deserialize, Serialize};

/// 200 response for `GET /api/classify-number`.
///
/// The classification fields are flattened so the body reads:
///
/// ```text
/// {"number":371,"is_prime":false,"is_perfect":false,
///  "properties":["armstrong","odd"],"digit_sum":11,"fun_fact":"..."}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationResponse {
    #[serde(flatten)]
    pub classification: Classification,

    /// Trivia about the number, or a sentinel when none could be fetched.
    pub fun_fact: String,
}

impl ClassificationResponse {
    pub fn new(classification: Classification, fact: FunFact) -> Self {
        Self {
            classification,
            fun_fact: fact.text,
        }
    }
}

impl IntoResponse for ClassificationResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use numclass_lib::NO_FACT_AVAILABLE;

    #[test]
    fn test_serializes_flat_in_field_order() {
        let response = ClassificationResponse::new(
            Classification::of(371),
            FunFact::found("371 is narcissistic."),
        );
        let json = serde_json::to_string(&response).unwrap();
        assert_eq!(
            json,
            r#"{"number":371,"is_prime":false,"is_perfect":false,"properties":["armstrong","odd"],"digit_sum":11,"fun_fact":"371 is narcissistic."}"#
        );
    }

    #[test]
    fn test_sentinel_fact_is_carried_verbatim() {
        let response = ClassificationResponse::new(Classification::of(-7), FunFact::unavailable());
        assert_eq!(response.fun_fact, NO_FACT_AVAILABLE);
        assert!(!response.classification.is_prime);
    }

    #[test]
    fn test_deserialization_round_trip() {
        let json = r#"{"number":6,"is_prime":false,"is_perfect":true,"properties":["even"],"digit_sum":6,"fun_fact":"f"}"#;
        let response: ClassificationResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.classification, Classification::of(6));
        assert_eq!(response.fun_fact, "f");
    }

    #[test]
    fn test_into_response_is_ok() {
        let response =
            ClassificationResponse::new(Classification::of(2), FunFact::unreachable()).into_response();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
