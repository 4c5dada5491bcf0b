//! # Lookup Error Types Module
//!
//! Errors raised by the outbound clients (recipe directory and recipe proxy).
//! The suggestion scorer swallows them per lookup; direct callers see them.

/// Custom error types for outbound lookups
#[derive(Debug, Clone, PartialEq)]
pub enum LookupError {
    /// Connection or transport failure
    Request(String),
    /// Non-success HTTP status, with any message the service returned
    Status { status: u16, message: String },
    /// Response body was not the expected JSON
    Decode(String),
    /// Request exceeded the configured timeout
    Timeout(String),
    /// Circuit breaker is open; the request was not sent
    CircuitOpen,
    /// The service answered but had nothing for the request
    NotFound(String),
    /// The request target was rejected before sending
    InvalidUrl(String),
}

impl LookupError {
    /// Whether retrying the same request could succeed
    pub fn is_transient(&self) -> bool {
        match self {
            LookupError::Request(_) | LookupError::Timeout(_) => true,
            LookupError::Status { status, .. } => *status >= 500 || *status == 429,
            LookupError::Decode(_)
            | LookupError::CircuitOpen
            | LookupError::NotFound(_)
            | LookupError::InvalidUrl(_) => false,
        }
    }
}

impl std::fmt::Display for LookupError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LookupError::Request(msg) => write!(f, "Request error: {msg}"),
            LookupError::Status { status, message } => write!(f, "HTTP {status}: {message}"),
            LookupError::Decode(msg) => write!(f, "Decode error: {msg}"),
            LookupError::Timeout(msg) => write!(f, "Timeout error: {msg}"),
            LookupError::CircuitOpen => write!(f, "Circuit breaker is open"),
            LookupError::NotFound(msg) => write!(f, "Not found: {msg}"),
            LookupError::InvalidUrl(msg) => write!(f, "Invalid URL: {msg}"),
        }
    }
}

impl std::error::Error for LookupError {}

impl From<reqwest::Error> for LookupError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            LookupError::Timeout(err.to_string())
        } else if err.is_decode() {
            LookupError::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            LookupError::Status {
                status: status.as_u16(),
                message: err.to_string(),
            }
        } else {
            LookupError::Request(err.to_string())
        }
    }
}
