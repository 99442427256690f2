//! HTTP client for the Twitter REST API
//!
//! Handles:
//! - Building versioned resource URLs
//! - Rate limiting to stay inside the per-window budget
//! - Decoding responses and classifying failures by status
//!
//! There is no retry loop here; the pager decides what to re-request.

use super::rate_limit::RateLimiter;
use super::response::{ApiResponse, Quota};
use crate::auth::Authenticator;
use crate::client::ApiClient;
use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::types::{ApiVersion, JsonValue, RequestParams};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::debug;
use url::Url;

/// HTTP client for one API generation
pub struct TwitterClient {
    client: Client,
    config: ClientConfig,
    authenticator: Authenticator,
    rate_limiter: Option<RateLimiter>,
}

impl TwitterClient {
    /// Create a client from configuration
    pub fn new(config: ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(&config.user_agent)
            .build()?;

        let token_url = format!("{}/oauth2/token", config.base_url.trim_end_matches('/'));
        let authenticator = Authenticator::with_client(config.auth_config()?, token_url, client.clone());
        let rate_limiter = config.rate_limit.as_ref().map(RateLimiter::new);

        Ok(Self {
            client,
            config,
            authenticator,
            rate_limiter,
        })
    }

    /// The configuration this client was built from
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Check if rate limiting is enabled
    pub fn has_rate_limiter(&self) -> bool {
        self.rate_limiter.is_some()
    }

    /// GET one resource
    pub async fn get(&self, resource: &str, params: &RequestParams) -> Result<ApiResponse> {
        let url = build_url(&self.config.base_url, self.config.api_version, resource)?;

        if let Some(ref limiter) = self.rate_limiter {
            if !limiter.try_acquire() {
                debug!("Rate limit budget spent, waiting before GET {}", resource);
                limiter.wait().await;
            }
        }

        let mut req = self.client.get(url.clone());
        if !params.is_empty() {
            req = req.query(params);
        }
        req = self.authenticator.apply(req).await?;

        debug!("GET {} {:?}", url, params);
        let response = req.send().await?;

        let status = response.status();
        let quota = Quota::from_headers(response.headers());
        let text = response.text().await?;

        if !status.is_success() {
            if status == StatusCode::UNAUTHORIZED {
                self.authenticator.invalidate().await;
            }
            debug!("GET {} failed with {}", url, status.as_u16());
            return Err(Error::request(status.as_u16(), error_message(&text)));
        }

        let body = if text.trim().is_empty() {
            JsonValue::Null
        } else {
            serde_json::from_str(&text)?
        };

        Ok(ApiResponse::new(status.as_u16(), body).with_quota(quota))
    }
}

#[async_trait]
impl ApiClient for TwitterClient {
    fn version(&self) -> ApiVersion {
        self.config.api_version
    }

    async fn request(&self, resource: &str, params: &RequestParams) -> Result<ApiResponse> {
        self.get(resource, params).await
    }
}

impl std::fmt::Debug for TwitterClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TwitterClient")
            .field("base_url", &self.config.base_url)
            .field("api_version", &self.config.api_version)
            .field("has_rate_limiter", &self.rate_limiter.is_some())
            .finish_non_exhaustive()
    }
}

/// Build the URL of a resource.
///
/// v1.1 resources get a `.json` suffix. Path segments written as `:value`
/// are substituted with `value`.
pub fn build_url(base_url: &str, version: ApiVersion, resource: &str) -> Result<Url> {
    let path = resource
        .trim_matches('/')
        .split('/')
        .map(|segment| segment.strip_prefix(':').unwrap_or(segment))
        .collect::<Vec<_>>()
        .join("/");

    if path.is_empty() {
        return Err(Error::config("resource path is empty"));
    }

    let base = base_url.trim_end_matches('/');
    let url = match version {
        ApiVersion::V1_1 => format!("{base}/1.1/{path}.json"),
        ApiVersion::V2 => format!("{base}/2/{path}"),
    };

    Ok(Url::parse(&url)?)
}

/// Pull a readable message out of an error body
fn error_message(body: &str) -> String {
    let Ok(json) = serde_json::from_str::<JsonValue>(body) else {
        return body.trim().to_string();
    };

    let first_error = json
        .get("errors")
        .and_then(|e| e.get(0))
        .and_then(|e| e.get("message"))
        .and_then(JsonValue::as_str);

    first_error
        .or_else(|| json.get("detail").and_then(JsonValue::as_str))
        .or_else(|| json.get("title").and_then(JsonValue::as_str))
        .map_or_else(|| body.trim().to_string(), ToString::to_string)
}
