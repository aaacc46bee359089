use thiserror::Error;

/// Convenient result alias for the number classification library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// The numbers API answered with a non-success status code.
    #[error("numbers API returned status {status}")]
    UpstreamStatus { status: u16 },

    /// The numbers API payload decoded but carried no `text` field.
    #[error("numbers API response for {number} has no fact text")]
    MissingFactText { number: i64 },

    /// The numbers API payload was not valid JSON of the expected shape.
    #[error("malformed numbers API payload: {0}")]
    MalformedPayload(#[from] serde_json::Error),

    /// Wrapper for HTTP client errors (connect failures, timeouts, body reads).
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

impl Error {
    /// Whether the failure happened before the upstream produced a usable answer.
    ///
    /// Transport failures degrade to a different sentinel than "answered
    /// without data" so callers can tell the two apart.
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Http(_))
    }

    /// Whether a second attempt could plausibly succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::Http(_) => true,
            Error::UpstreamStatus { status } => *status >= 500,
            Error::MissingFactText { .. } | Error::MalformedPayload(_) => false,
        }
    }
}
