//! Bearer token type.

use std::fmt;

use crate::error::{Error, InvalidInputError};

/// A bearer token for authenticated API requests.
///
/// Issued by the backend at the end of the sign-in redirect and sent back in
/// the `Authorization` header of every authenticated request.
///
/// # Security
///
/// - Never logged or displayed in Debug output
/// - Treat as opaque; do not parse or inspect
#[derive(Clone, PartialEq, Eq)]
pub struct Token(String);

impl Token {
    /// Create a new token, checking that it can travel in an HTTP header.
    ///
    /// # Errors
    ///
    /// Returns an error if the token is empty or contains whitespace or
    /// control characters.
    pub fn new(token: impl Into<String>) -> Result<Self, Error> {
        let token = token.into();

        if token.is_empty() {
            return Err(InvalidInputError::Token {
                reason: "token is empty".to_string(),
            }
            .into());
        }

        if !token.bytes().all(|b| b.is_ascii_graphic()) {
            return Err(InvalidInputError::Token {
                reason: "token contains whitespace or non-printable characters".to_string(),
            }
            .into());
        }

        Ok(Self(token))
    }

    /// Returns the token value.
    ///
    /// # Security
    ///
    /// Use only when building authorization headers or persisting the token.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Hide token value in Debug output
impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Token").field(&"[REDACTED]").finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_hides_value_in_debug() {
        let token = Token::new("42|sWz8kq0bT6Yv1aGp").unwrap();
        let debug = format!("{:?}", token);
        assert!(!debug.contains("sWz8"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn laravel_style_token_is_accepted() {
        let token = Token::new("42|sWz8kq0bT6Yv1aGp").unwrap();
        assert_eq!(token.as_str(), "42|sWz8kq0bT6Yv1aGp");
    }

    #[test]
    fn empty_token_rejected() {
        assert!(Token::new("").is_err());
    }

    #[test]
    fn header_breaking_characters_rejected() {
        assert!(Token::new("abc def").is_err());
        assert!(Token::new("abc\r\nX-Injected: 1").is_err());
        assert!(Token::new("tök").is_err());
    }
}
