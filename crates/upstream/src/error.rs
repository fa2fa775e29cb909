use crate::source::Shape;

/// Why a fetch produced no data.
///
/// Every variant means "unavailable" to callers; the distinction exists
/// for logging and tests.
#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    /// Still rate limited (HTTP 429) after the last permitted attempt.
    #[error("rate limited after {attempts} attempts")]
    Throttled { attempts: u32 },

    /// The request never produced a response (timeout, DNS, connection).
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// A non-2xx status other than 429.
    #[error("upstream returned HTTP {status}")]
    Status { status: u16 },

    /// The body was not valid JSON.
    #[error("malformed response body: {0}")]
    Decode(String),

    /// Valid JSON, but not the expected top-level shape.
    #[error("unexpected response shape, expected {expected}")]
    UnexpectedShape { expected: Shape },
}

/// Errors from the transport layer.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("request timed out: {0}")]
    Timeout(String),

    #[error("request failed: {0}")]
    Request(String),

    #[error("invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),
}

impl From<reqwest::Error> for TransportError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            TransportError::Timeout(e.to_string())
        } else {
            TransportError::Request(e.to_string())
        }
    }
}
