//! TrophyCalc API HTTP client.

use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, trace};

use trophycalc_core::error::{InvalidInputError, ProtocolError, TransportError};
use trophycalc_core::{ApiUrl, Error, Result, Token, User, UserSource};

use crate::USER_ENDPOINT;
use crate::error::{from_status, transport};

/// HTTP client for the TrophyCalc API.
///
/// No timeout is configured: a request that never completes keeps its
/// caller waiting.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    api: ApiUrl,
}

impl ApiClient {
    /// Create a new client for the given API base URL.
    ///
    /// # Errors
    ///
    /// Returns a transport error if the TLS backend cannot be initialized.
    pub fn new(api: ApiUrl) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("trophycalc/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| TransportError::Http {
                message: format!("failed to build HTTP client: {}", e),
            })?;

        Ok(Self::with_client(client, api))
    }

    /// Create a client around an existing reqwest client.
    pub fn with_client(client: reqwest::Client, api: ApiUrl) -> Self {
        Self { client, api }
    }

    /// Returns the API base URL this client talks to.
    pub fn api(&self) -> &ApiUrl {
        &self.api
    }

    /// Make an authenticated GET request and decode the JSON body.
    #[instrument(skip(self, token), fields(api = %self.api))]
    pub async fn get_authed<R>(&self, path: &str, token: &Token) -> Result<R>
    where
        R: DeserializeOwned,
    {
        let url = self.api.endpoint(path);
        debug!(%url, "Authenticated GET");

        let response = self
            .client
            .get(&url)
            .headers(auth_headers(token)?)
            .send()
            .await
            .map_err(transport)?;

        handle_response(response).await
    }

    /// Fetch the user the token belongs to.
    pub async fn current_user(&self, token: &Token) -> Result<User> {
        self.get_authed(USER_ENDPOINT, token).await
    }
}

#[async_trait]
impl UserSource for ApiClient {
    async fn current_user(&self, token: &Token) -> Result<User> {
        ApiClient::current_user(self, token).await
    }
}

/// Headers for authenticated JSON requests.
fn auth_headers(token: &Token) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    let mut auth_value = HeaderValue::from_str(&format!("Bearer {}", token.as_str()))
        .map_err(|_| InvalidInputError::Token {
            reason: "not a valid header value".to_string(),
        })?;
    auth_value.set_sensitive(true);
    headers.insert(AUTHORIZATION, auth_value);
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    Ok(headers)
}

/// Decode a response, mapping error statuses and bad bodies to errors.
async fn handle_response<R: DeserializeOwned>(response: reqwest::Response) -> Result<R> {
    let status = response.status();
    trace!(status = %status, "API response");

    let body = response.bytes().await.map_err(transport)?;

    if !status.is_success() {
        return Err(from_status(status.as_u16(), &body));
    }

    serde_json::from_slice(&body)
        .map_err(|e| Error::Protocol(ProtocolError::malformed(status.as_u16(), e.to_string())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_creation() {
        let api = ApiUrl::new("https://trophycalc.app/api").unwrap();
        let client = ApiClient::new(api.clone()).unwrap();
        assert_eq!(client.api().as_str(), api.as_str());
    }

    #[test]
    fn auth_headers_are_sensitive() {
        let token = Token::new("42|abc").unwrap();
        let headers = auth_headers(&token).unwrap();
        let auth = headers.get(AUTHORIZATION).unwrap();
        assert_eq!(auth.to_str().unwrap(), "Bearer 42|abc");
        assert!(auth.is_sensitive());
        assert_eq!(headers.get(ACCEPT).unwrap(), "application/json");
    }
}
