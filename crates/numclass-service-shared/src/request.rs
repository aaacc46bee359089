//! Request types and validation for HTTP endpoints.

use std::num::IntErrorKind;

use serde::{Deserialize, Serialize};

use crate::rejection::{InvalidNumber, RejectionReason};

/// Validation trait for request types.
///
/// Implementations check every field and either return the validated value
/// the handler works with, or the rejection to send back.
pub trait Validate {
    /// The validated form of the request.
    type Output;

    /// Validate the request, returning the rejection body if invalid.
    fn validate(&self) -> Result<Self::Output, InvalidNumber>;
}

/// Query string of `GET /api/classify-number`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClassifyQuery {
    /// Raw `number` parameter exactly as received.
    #[serde(default)]
    pub number: Option<String>,
}

impl ClassifyQuery {
    pub fn new(number: impl Into<String>) -> Self {
        Self {
            number: Some(number.into()),
        }
    }

    /// Build from decoded query-string pairs.
    ///
    /// The first `number` pair wins; repeats and unrelated keys are ignored.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let number = pairs
            .into_iter()
            .find(|(key, _)| key == "number")
            .map(|(_, value)| value);
        Self { number }
    }
}

impl Validate for ClassifyQuery {
    type Output = i64;

    fn validate(&self) -> Result<i64, InvalidNumber> {
        let raw = self.number.as_deref().ok_or_else(InvalidNumber::missing)?;
        parse_number(raw).map_err(|reason| InvalidNumber::new(Some(raw.to_string()), reason))
    }
}

/// Parse a base-10 integer with an optional sign.
///
/// Surrounding whitespace is ignored. Anything else (decimal points, exponents,
/// digit separators, hex prefixes) is rejected.
pub fn parse_number(raw: &str) -> Result<i64, RejectionReason> {
    let trimmed = raw.trim();
    let digits = trimmed
        .strip_prefix(|c: char| c == '+' || c == '-')
        .unwrap_or(trimmed);

    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(RejectionReason::NotAnInteger);
    }

    trimmed.parse::<i64>().map_err(|e| match e.kind() {
        IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => RejectionReason::OutOfRange,
        _ => RejectionReason::NotAnInteger,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_signed_integers() {
        assert_eq!(parse_number("371"), Ok(371));
        assert_eq!(parse_number("-7"), Ok(-7));
        assert_eq!(parse_number("+42"), Ok(42));
        assert_eq!(parse_number("0"), Ok(0));
        assert_eq!(parse_number("  15 "), Ok(15));
        assert_eq!(parse_number("007"), Ok(7));
    }

    #[test]
    fn test_accepts_range_extremes() {
        assert_eq!(parse_number("9223372036854775807"), Ok(i64::MAX));
        assert_eq!(parse_number("-9223372036854775808"), Ok(i64::MIN));
    }

    #[test]
    fn test_rejects_non_integers() {
        for raw in ["abc", "", " ", "-", "+", "1.5", "1e3", "0x10", "1_000", "--1", "12a"] {
            assert_eq!(
                parse_number(raw),
                Err(RejectionReason::NotAnInteger),
                "{raw:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_rejects_overflow() {
        assert_eq!(
            parse_number("9223372036854775808"),
            Err(RejectionReason::OutOfRange)
        );
        assert_eq!(
            parse_number("-99999999999999999999"),
            Err(RejectionReason::OutOfRange)
        );
    }

    #[test]
    fn test_validate_echoes_raw_text() {
        let err = ClassifyQuery::new("abc").validate().unwrap_err();
        assert_eq!(err.number.as_deref(), Some("abc"));
        assert!(err.error);
        assert_eq!(err.reason(), RejectionReason::NotAnInteger);
    }

    #[test]
    fn test_validate_missing_parameter() {
        let err = ClassifyQuery::default().validate().unwrap_err();
        assert!(err.number.is_none());
        assert_eq!(err.reason(), RejectionReason::Missing);
    }

    #[test]
    fn test_from_pairs_takes_first_number() {
        let pairs = vec![
            ("callback".to_string(), "x".to_string()),
            ("number".to_string(), "12".to_string()),
            ("number".to_string(), "x".to_string()),
        ];
        let query = ClassifyQuery::from_pairs(pairs);
        assert_eq!(query.number.as_deref(), Some("12"));
        assert_eq!(query.validate(), Ok(12));
    }

    #[test]
    fn test_from_pairs_without_number_is_missing() {
        let query = ClassifyQuery::from_pairs(vec![("n".to_string(), "5".to_string())]);
        let err = query.validate().unwrap_err();
        assert_eq!(err.reason(), RejectionReason::Missing);
    }

    #[test]
    fn test_query_deserialization_defaults() {
        let query: ClassifyQuery = serde_json::from_str("{}").unwrap();
        assert!(query.number.is_none());
        assert_eq!(ClassifyQuery::new("-7").validate(), Ok(-7));
    }
}
