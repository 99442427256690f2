//! Authenticator implementation
//!
//! Handles applying authentication to requests and fetching the
//! application-only bearer token.

use super::types::{AuthConfig, CachedToken};
use crate::error::{Error, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, RequestBuilder};
use serde::Deserialize;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;
use url::form_urlencoded::byte_serialize;

/// Authenticator handles applying authentication to HTTP requests
pub struct Authenticator {
    /// Auth configuration
    config: AuthConfig,
    /// Token endpoint for the application-only flow
    token_url: String,
    /// Cached token for application-only auth
    cached_token: Arc<RwLock<Option<CachedToken>>>,
    /// HTTP client for token requests
    http_client: Client,
}

impl Authenticator {
    /// Create an authenticator sharing the given HTTP client
    pub fn with_client(config: AuthConfig, token_url: impl Into<String>, http_client: Client) -> Self {
        Self {
            config,
            token_url: token_url.into(),
            cached_token: Arc::new(RwLock::new(None)),
            http_client,
        }
    }

    /// Apply authentication to a request builder
    pub async fn apply(&self, req: RequestBuilder) -> Result<RequestBuilder> {
        match &self.config {
            AuthConfig::None => Ok(req),
            AuthConfig::Bearer { token } => Ok(req.bearer_auth(token)),
            AuthConfig::AppOnly { .. } => {
                let token = self.get_or_fetch_token().await?;
                Ok(req.bearer_auth(token))
            }
        }
    }

    /// Drop the cached token so the next request fetches a fresh one
    pub async fn invalidate(&self) {
        *self.cached_token.write().await = None;
    }

    /// Get the cached token, fetching it on first use
    async fn get_or_fetch_token(&self) -> Result<String> {
        {
            let cached = self.cached_token.read().await;
            if let Some(token) = cached.as_ref() {
                return Ok(token.token.clone());
            }
        }

        let mut cached = self.cached_token.write().await;

        // Another task may have fetched while we waited for the write lock
        if let Some(token) = cached.as_ref() {
            return Ok(token.token.clone());
        }

        let new_token = self.fetch_app_only_token().await?;
        let token_str = new_token.token.clone();
        *cached = Some(new_token);

        Ok(token_str)
    }

    /// Exchange consumer credentials for a bearer token
    async fn fetch_app_only_token(&self) -> Result<CachedToken> {
        let AuthConfig::AppOnly {
            consumer_key,
            consumer_secret,
        } = &self.config
        else {
            return Err(Error::auth("Token fetch not supported for this auth type"));
        };

        debug!("Requesting application-only bearer token from {}", self.token_url);

        let response = self
            .http_client
            .post(&self.token_url)
            .header(
                AUTHORIZATION,
                basic_credentials(consumer_key, consumer_secret),
            )
            .header(
                CONTENT_TYPE,
                "application/x-www-form-urlencoded;charset=UTF-8",
            )
            .body("grant_type=client_credentials")
            .send()
            .await
            .map_err(Error::Http)?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::auth_status(
                status,
                format!("Token request failed with status {status}: {body}"),
            ));
        }

        let token_response: TokenResponse = response.json().await.map_err(Error::Http)?;
        token_response.into_cached_token()
    }
}

impl std::fmt::Debug for Authenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Authenticator")
            .field("config", &self.config)
            .field("token_url", &self.token_url)
            .finish_non_exhaustive()
    }
}

/// `Basic` header value for the token endpoint.
///
/// Key and secret are percent-encoded before being joined and base64 encoded.
pub(crate) fn basic_credentials(consumer_key: &str, consumer_secret: &str) -> String {
    let key: String = byte_serialize(consumer_key.as_bytes()).collect();
    let secret: String = byte_serialize(consumer_secret.as_bytes()).collect();
    format!("Basic {}", STANDARD.encode(format!("{key}:{secret}")))
}

/// Token endpoint response
#[derive(Debug, Deserialize)]
struct TokenResponse {
    token_type: String,
    access_token: String,
}

impl TokenResponse {
    fn into_cached_token(self) -> Result<CachedToken> {
        if !self.token_type.eq_ignore_ascii_case("bearer") {
            return Err(Error::auth(format!(
                "Unexpected token type '{}'",
                self.token_type
            )));
        }
        Ok(CachedToken::new(self.access_token))
    }
}
