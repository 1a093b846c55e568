// SPDX-FileCopyrightText: 2026 Hearth Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the Hearth platform API.
//!
//! Provides [`ApiClient`] which handles request construction, bearer token
//! injection, and error normalization. Every failure from this layer is a
//! [`HearthError::Api`]: server-supplied message plus status, or the
//! canonical network error with status 0 when no response arrived.
//!
//! Requests carry both the bearer token and session cookies. The dual-auth
//! scheme is a compatibility requirement of the current server deployment,
//! which still issues cookie sessions alongside tokens.

use std::sync::Arc;
use std::time::Duration;

use hearth_config::model::ApiConfig;
use hearth_core::HearthError;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::{Method, StatusCode};
use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

use crate::token::TokenStore;

/// Standard `{ "status": ..., "data": { ... } }` response envelope.
#[derive(Debug, Deserialize)]
pub(crate) struct Envelope<T> {
    pub data: T,
}

/// Error body shape the server uses for non-2xx responses.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// HTTP client for platform API communication.
///
/// Stateless beyond the connection pool and cookie jar: this layer never
/// mutates session or cache state, and never retries -- all retries are
/// user-initiated.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    tokens: Arc<TokenStore>,
}

impl ApiClient {
    /// Creates a new API client against the configured base URL.
    pub fn new(config: &ApiConfig, tokens: Arc<TokenStore>) -> Result<Self, HearthError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .cookie_store(true)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| {
                HearthError::Internal(format!("failed to build HTTP client: {e}"))
            })?;

        Ok(Self {
            http,
            base_url: config.base_url.clone(),
            tokens,
        })
    }

    /// The token store this client injects credentials from.
    pub fn tokens(&self) -> &Arc<TokenStore> {
        &self.tokens
    }

    /// Sends a request and parses the JSON response body.
    ///
    /// Returns `Ok(None)` for HTTP 204 (no body to parse). The bearer token
    /// is attached to every request except authentication entry points
    /// (login/signup), where a stale token must not ride along with the
    /// credential exchange.
    pub async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<serde_json::Value>,
    ) -> Result<Option<T>, HearthError> {
        let url = format!("{}{}", self.base_url, endpoint);
        let mut req = self.http.request(method.clone(), &url);

        if !is_auth_endpoint(endpoint)
            && let Some(token) = self.tokens.current()
        {
            req = req.bearer_auth(token.expose_secret());
        }

        if let Some(body) = body {
            req = req.json(&body);
        }

        let response = req.send().await.map_err(|e| {
            debug!(method = %method, endpoint, error = %e, "request failed without response");
            HearthError::network()
        })?;

        let status = response.status();
        debug!(method = %method, endpoint, status = %status, "response received");

        if status == StatusCode::NO_CONTENT {
            return Ok(None);
        }

        let text = response.text().await.map_err(|e| {
            debug!(endpoint, error = %e, "failed to read response body");
            HearthError::network()
        })?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorBody>(&text)
                .ok()
                .and_then(|b| b.message)
                .unwrap_or_else(|| format!("Error {}", status.as_u16()));
            return Err(HearthError::api(message, status.as_u16()));
        }

        let parsed: T = serde_json::from_str(&text).map_err(|e| {
            HearthError::Internal(format!("failed to parse API response: {e}"))
        })?;
        Ok(Some(parsed))
    }

    /// GET a body-bearing endpoint.
    pub async fn get<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, HearthError> {
        self.expect_body(self.request(Method::GET, endpoint, None).await?)
    }

    /// POST with a JSON body, expecting a response body.
    pub async fn post<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        body: serde_json::Value,
    ) -> Result<T, HearthError> {
        self.expect_body(self.request(Method::POST, endpoint, Some(body)).await?)
    }

    /// PATCH with an optional JSON body, expecting a response body.
    pub async fn patch<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        body: Option<serde_json::Value>,
    ) -> Result<T, HearthError> {
        self.expect_body(self.request(Method::PATCH, endpoint, body).await?)
    }

    /// DELETE, tolerating a 204 response.
    pub async fn delete(&self, endpoint: &str) -> Result<(), HearthError> {
        self.request::<serde_json::Value>(Method::DELETE, endpoint, None)
            .await?;
        Ok(())
    }

    fn expect_body<T>(&self, parsed: Option<T>) -> Result<T, HearthError> {
        parsed.ok_or_else(|| {
            HearthError::Internal("server returned no content where a body was expected".into())
        })
    }
}

/// Authentication entry points exchange credentials for a fresh token;
/// sending a stored (possibly stale) token there is never correct.
fn is_auth_endpoint(endpoint: &str) -> bool {
    endpoint.contains("/login") || endpoint.contains("/signup")
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, header_exists, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_client(base_url: &str, token: Option<&str>) -> ApiClient {
        let dir = tempfile::tempdir().unwrap();
        let store = TokenStore::at(dir.path().join("token"));
        if let Some(token) = token {
            store.save(token).unwrap();
        }
        // Leak the tempdir so the token file survives the test body.
        std::mem::forget(dir);
        let config = ApiConfig {
            base_url: base_url.to_string(),
            timeout_secs: 5,
        };
        ApiClient::new(&config, Arc::new(store)).unwrap()
    }

    #[tokio::test]
    async fn attaches_bearer_token_to_data_requests() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/bookings"))
            .and(header("authorization", "Bearer tok-123"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"ok": true})))
            .mount(&server)
            .await;

        let client = test_client(&server.uri(), Some("tok-123"));
        let result: Option<serde_json::Value> =
            client.request(Method::GET, "/bookings", None).await.unwrap();
        assert!(result.is_some());
    }

    #[tokio::test]
    async fn never_sends_token_to_auth_endpoints() {
        let server = MockServer::start().await;
        // Reject any request carrying an Authorization header.
        Mock::given(method("POST"))
            .and(path("/users/login"))
            .and(header_exists("authorization"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/users/login"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"token": "t"})))
            .mount(&server)
            .await;

        let client = test_client(&server.uri(), Some("stale-token"));
        let result: Option<serde_json::Value> = client
            .request(
                Method::POST,
                "/users/login",
                Some(serde_json::json!({"email": "a@b.c", "password": "pw"})),
            )
            .await
            .unwrap();
        assert!(result.is_some());
    }

    #[tokio::test]
    async fn no_content_returns_none_without_parsing() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/wishlist/clear"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let client = test_client(&server.uri(), None);
        let result: Option<serde_json::Value> = client
            .request(Method::DELETE, "/wishlist/clear", None)
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn non_2xx_uses_server_message() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/bookings/missing"))
            .respond_with(
                ResponseTemplate::new(404)
                    .set_body_json(serde_json::json!({"status": "fail", "message": "No booking found with that ID"})),
            )
            .mount(&server)
            .await;

        let client = test_client(&server.uri(), None);
        let err = client
            .request::<serde_json::Value>(Method::GET, "/bookings/missing", None)
            .await
            .unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "No booking found with that ID");
    }

    #[tokio::test]
    async fn non_2xx_without_message_gets_generic_text() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/bookings"))
            .respond_with(ResponseTemplate::new(500).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let client = test_client(&server.uri(), None);
        let err = client
            .request::<serde_json::Value>(Method::GET, "/bookings", None)
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(500));
        assert_eq!(err.to_string(), "Error 500");
    }

    #[tokio::test]
    async fn connection_failure_is_network_error_with_status_zero() {
        // Nothing is listening on this port.
        let config = ApiConfig {
            base_url: "http://127.0.0.1:1".to_string(),
            timeout_secs: 1,
        };
        let dir = tempfile::tempdir().unwrap();
        let client =
            ApiClient::new(&config, Arc::new(TokenStore::at(dir.path().join("token")))).unwrap();

        let err = client
            .request::<serde_json::Value>(Method::GET, "/bookings", None)
            .await
            .unwrap_err();
        assert!(err.is_network());
        assert_eq!(err.status(), Some(0));
    }
}
