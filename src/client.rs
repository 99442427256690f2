//! API client trait
//!
//! The pager only needs two things from a client: the API generation it
//! talks to, and a way to fetch one page. [`crate::http::TwitterClient`] is
//! the HTTP implementation; tests and embedders can supply their own.

use crate::error::Result;
use crate::http::ApiResponse;
use crate::types::{ApiVersion, RequestParams};
use async_trait::async_trait;
use std::sync::Arc;

/// An authenticated REST client
#[async_trait]
pub trait ApiClient: Send + Sync {
    /// API generation, fixed at construction
    fn version(&self) -> ApiVersion;

    /// Fetch one page of `resource` with the given query parameters.
    ///
    /// Failures carrying an HTTP status are reported through
    /// [`crate::Error::status`].
    async fn request(&self, resource: &str, params: &RequestParams) -> Result<ApiResponse>;
}

#[async_trait]
impl<C: ApiClient + ?Sized> ApiClient for Arc<C> {
    fn version(&self) -> ApiVersion {
        (**self).version()
    }

    async fn request(&self, resource: &str, params: &RequestParams) -> Result<ApiResponse> {
        (**self).request(resource, params).await
    }
}

#[async_trait]
impl<'a, C: ApiClient + ?Sized> ApiClient for &'a C {
    fn version(&self) -> ApiVersion {
        (**self).version()
    }

    async fn request(&self, resource: &str, params: &RequestParams) -> Result<ApiResponse> {
        (**self).request(resource, params).await
    }
}
