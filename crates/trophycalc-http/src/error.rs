//! Mapping of HTTP client failures onto the session error type.

use serde::Deserialize;

use trophycalc_core::Error;
use trophycalc_core::error::{ProtocolError, TransportError};

/// Error body returned by the API on non-2xx responses.
#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorResponse {
    pub error: Option<String>,
    pub message: Option<String>,
}

/// Classify a reqwest failure as a transport error.
pub(crate) fn transport(err: reqwest::Error) -> Error {
    let err = if err.is_timeout() {
        TransportError::Timeout
    } else if err.is_connect() {
        TransportError::Connection {
            message: err.to_string(),
        }
    } else {
        TransportError::Http {
            message: err.to_string(),
        }
    };
    Error::Transport(err)
}

/// Build a protocol error from a non-2xx status and its raw body.
pub(crate) fn from_status(status: u16, body: &[u8]) -> Error {
    // Not every error body is JSON (proxies, HTML error pages)
    let error = match serde_json::from_slice::<ApiErrorResponse>(body) {
        Ok(body) => ProtocolError::new(status, body.error, body.message),
        Err(_) => ProtocolError::new(status, None, None),
    };
    Error::Protocol(error)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_error_body_is_kept() {
        let err = from_status(401, br#"{"message":"Unauthenticated."}"#);
        match err {
            Error::Protocol(e) => {
                assert_eq!(e.status, 401);
                assert_eq!(e.message.as_deref(), Some("Unauthenticated."));
                assert!(e.is_auth_error());
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn html_error_body_is_dropped() {
        let err = from_status(502, b"<html>Bad Gateway</html>");
        assert_eq!(err.to_string(), "protocol error: HTTP 502");
    }

    #[test]
    fn rejected_credential_is_reported_as_auth() {
        assert_eq!(from_status(401, b"").kind(), "auth");
        assert_eq!(from_status(419, b"").kind(), "auth");
        assert_eq!(from_status(403, b"").kind(), "protocol");
    }
}
