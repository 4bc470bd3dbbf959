//! Completion of the sign-in redirect.

use tracing::{info, instrument};
use url::Url;

use trophycalc_core::error::InvalidInputError;
use trophycalc_core::{Result, Route, Token};

use crate::store::SessionStore;

/// Query parameter carrying the issued token on the callback redirect.
const TOKEN_PARAM: &str = "token";

/// Extract the issued token from a sign-in redirect.
///
/// Accepts an absolute URL or a path with a query string, e.g.
/// `/auth/callback?token=...`. The path must resolve to the auth-callback
/// route.
///
/// # Errors
///
/// Returns an invalid input error if the redirect cannot be parsed, points
/// elsewhere, or carries no usable token.
pub fn token_from_redirect(redirect: &str) -> Result<Token> {
    // Never echo the query string back: it holds the token
    let redacted = redirect.split('?').next().unwrap_or_default().to_string();
    let invalid = |reason: &str| InvalidInputError::Callback {
        value: redacted.clone(),
        reason: reason.to_string(),
    };

    let absolute = if redirect.starts_with('/') {
        format!("http://localhost{}", redirect)
    } else {
        redirect.to_string()
    };
    let url = Url::parse(&absolute).map_err(|e| invalid(&e.to_string()))?;

    if Route::resolve(url.path()) != Route::AuthCallback {
        return Err(invalid("not the sign-in callback route").into());
    }

    let token = url
        .query_pairs()
        .find(|(key, _)| key == TOKEN_PARAM)
        .map(|(_, value)| value.into_owned())
        .filter(|value| !value.is_empty())
        .ok_or_else(|| invalid("missing token parameter"))?;

    Token::new(token)
}

/// Hand the token from a sign-in redirect to the session.
///
/// Calls [`SessionStore::set_token`] exactly once on success and not at all
/// on error.
///
/// # Errors
///
/// Returns an invalid input error for a bad redirect, or a storage error if
/// the token cannot be persisted.
#[instrument(skip_all)]
pub fn complete_callback(store: &SessionStore, redirect: &str) -> Result<()> {
    let token = token_from_redirect(redirect)?;
    info!("Sign-in callback carried a token");
    store.set_token(Some(token))
}
