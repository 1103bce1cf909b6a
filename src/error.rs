//!
//! # Client Error Handling
//!
//! This module defines the custom error type `ApiError` used throughout the crate.
//! It centralizes error management, providing a consistent way to represent the
//! failure modes of talking to the remote API: transport problems, non-success
//! responses, undecodable bodies, and a missing local session.
//!
//! Every failure ultimately surfaces to the presentation layer as a single
//! human-readable string via `Display`; view-models store that string in their
//! `Error` state and nothing more structured crosses the boundary. `From` trait
//! implementations for `reqwest::Error` and `serde_json::Error` allow easy
//! conversion using the `?` operator.

use std::fmt;

/// Represents all possible errors that can occur while driving the remote API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The connection to the server timed out.
    /// Always rendered as the fixed message "Connection timed out".
    ConnectionTimeout,
    /// The server answered with a non-success status and an `error` field in
    /// the response body. Carries that message verbatim.
    Server(String),
    /// Any other transport-level failure (DNS, refused connection, ...).
    /// Carries the underlying message, or "Unknown error" if there was none.
    Transport(String),
    /// No session token is stored locally. Detected before any network call
    /// is made.
    MissingToken,
    /// A response body (success or error) could not be decoded into the
    /// expected shape. Carries the raw decode message.
    Decode(String),
}

impl ApiError {
    /// Builds a `Transport` error, substituting "Unknown error" for an empty
    /// message.
    pub fn transport(message: impl Into<String>) -> Self {
        let message = message.into();
        if message.is_empty() {
            ApiError::Transport("Unknown error".into())
        } else {
            ApiError::Transport(message)
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ApiError::ConnectionTimeout => write!(f, "Connection timed out"),
            ApiError::Server(msg) => write!(f, "{}", msg),
            ApiError::Transport(msg) => write!(f, "{}", msg),
            ApiError::MissingToken => write!(f, "Token not found"),
            ApiError::Decode(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

/// Converts `reqwest::Error` into `ApiError`.
///
/// Timeouts map to the fixed `ConnectionTimeout` variant, body-decoding
/// failures to `Decode`, and everything else to `Transport` with the
/// underlying message.
impl From<reqwest::Error> for ApiError {
    fn from(error: reqwest::Error) -> ApiError {
        if error.is_timeout() {
            ApiError::ConnectionTimeout
        } else if error.is_decode() {
            ApiError::Decode(error.to_string())
        } else {
            ApiError::transport(error.to_string())
        }
    }
}

/// Converts `serde_json::Error` into `ApiError::Decode`.
///
/// Used when a response body is read as text and parsed separately.
impl From<serde_json::Error> for ApiError {
    fn from(error: serde_json::Error) -> ApiError {
        ApiError::Decode(error.to_string())
    }
}
