//! Error types for the TrophyCalc session client.
//!
//! A single error type with explicit variants for transport, protocol,
//! storage and input validation failures. A rejected credential is a
//! protocol error; see [`ProtocolError::is_auth_error`].

use std::fmt;
use thiserror::Error;

/// The unified error type for session operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Network transport errors (DNS, TLS, connection, timeout).
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// Protocol errors (error statuses, unexpected response bodies).
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// Credential slot errors (storage unreadable or unwritable).
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// Input validation errors (bad token, URL or redirect).
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),
}

impl Error {
    /// Short category name, used when logging a failure without its payload.
    pub fn kind(&self) -> &'static str {
        match self {
            Error::Transport(_) => "transport",
            Error::Protocol(e) if e.is_auth_error() => "auth",
            Error::Protocol(_) => "protocol",
            Error::Storage(_) => "storage",
            Error::InvalidInput(_) => "invalid_input",
        }
    }
}

/// Transport-level errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network connection failed.
    #[error("connection failed: {message}")]
    Connection { message: String },

    /// Request timed out.
    #[error("request timed out")]
    Timeout,

    /// Generic HTTP error.
    #[error("HTTP error: {message}")]
    Http { message: String },
}

/// Protocol-level errors from API responses.
#[derive(Debug)]
pub struct ProtocolError {
    /// HTTP status code.
    pub status: u16,
    /// Error code from the response body (if present).
    pub error: Option<String>,
    /// Error message from the server.
    pub message: Option<String>,
}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP {}", self.status)?;
        if let Some(ref error) = self.error {
            write!(f, " [{}]", error)?;
        }
        if let Some(ref message) = self.message {
            write!(f, ": {}", message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ProtocolError {}

impl ProtocolError {
    /// Create a new protocol error.
    pub fn new(status: u16, error: Option<String>, message: Option<String>) -> Self {
        Self {
            status,
            error,
            message,
        }
    }

    /// A 2xx response whose body did not match the expected shape.
    pub fn malformed(status: u16, reason: impl Into<String>) -> Self {
        Self::new(status, Some("MalformedBody".to_string()), Some(reason.into()))
    }

    /// Check if this is an authentication error.
    ///
    /// 419 is the backend's "session expired" status.
    pub fn is_auth_error(&self) -> bool {
        self.status == 401
            || self.status == 419
            || self.error.as_deref() == Some("Unauthenticated")
            || self.error.as_deref() == Some("InvalidToken")
    }
}

/// Credential slot errors.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backing store could not be read or written.
    #[error("{operation} failed for key '{key}': {message}")]
    Io {
        operation: &'static str,
        key: String,
        message: String,
    },

    /// The backing store exists but its contents are unreadable.
    #[error("corrupt credential store: {message}")]
    Corrupt { message: String },
}

/// Input validation errors.
#[derive(Debug, Error)]
pub enum InvalidInputError {
    /// Invalid bearer token.
    #[error("invalid token: {reason}")]
    Token { reason: String },

    /// Invalid API base URL.
    #[error("invalid API URL '{value}': {reason}")]
    ApiUrl { value: String, reason: String },

    /// Invalid sign-in redirect.
    #[error("invalid callback redirect '{value}': {reason}")]
    Callback { value: String, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn protocol_error_display_includes_all_parts() {
        let err = ProtocolError::new(
            401,
            Some("Unauthenticated".to_string()),
            Some("Token expired".to_string()),
        );
        assert_eq!(err.to_string(), "HTTP 401 [Unauthenticated]: Token expired");
    }

    #[test]
    fn auth_statuses_are_recognized() {
        assert!(ProtocolError::new(401, None, None).is_auth_error());
        assert!(ProtocolError::new(419, None, None).is_auth_error());
        assert!(!ProtocolError::new(500, None, None).is_auth_error());
        assert!(!ProtocolError::malformed(200, "missing field `id`").is_auth_error());
    }

    #[test]
    fn kind_separates_auth_from_other_protocol_errors() {
        let auth: Error = ProtocolError::new(401, None, None).into();
        let server: Error = ProtocolError::new(503, None, None).into();
        let net: Error = TransportError::Timeout.into();
        assert_eq!(auth.kind(), "auth");
        assert_eq!(server.kind(), "protocol");
        assert_eq!(net.kind(), "transport");
    }
}
