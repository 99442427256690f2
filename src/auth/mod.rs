//! Authentication module
//!
//! Supports: Bearer token, application-only OAuth2 (consumer key/secret)
//!
//! The `Authenticator` applies credentials to requests and caches the
//! bearer token obtained by the application-only flow.

mod authenticator;
mod types;

pub use authenticator::Authenticator;
pub use types::{AuthConfig, CachedToken};
