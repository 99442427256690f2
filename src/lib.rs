// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::needless_pass_by_value)]

//! # twitter-pager
//!
//! Continuous pagination over the Twitter REST API, v1.1 and v2.
//!
//! Given a client, a resource path and query parameters, a [`Pager`] keeps
//! requesting pages and hands back one flat stream of items. It follows
//! whatever continuation the server offers (cursors, `next` tokens, item
//! ids, v2 `meta` tokens), paces requests, and re-requests after transient
//! failures.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use futures::StreamExt;
//! use twitter_pager::{ClientConfig, Pager, Result, TwitterClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let mut config = ClientConfig::default();
//!     config.apply_env()?;
//!     let client = TwitterClient::new(config)?;
//!
//!     let params = [("query".to_string(), "rustlang".to_string())].into();
//!     let mut pager = Pager::new(client, "tweets/search/recent", Some(params));
//!
//!     let mut items = pager.get_iterator(5.0, false);
//!     while let Some(item) = items.next().await {
//!         println!("{}", item?);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                            Pager                             │
//! │  get_iterator(wait, new_tweets) → Stream<Result<Value>>      │
//! │  classify items · pick strategy · advance params · pace      │
//! └──────────────────────────────────────────────────────────────┘
//!                               │ ApiClient
//! ┌───────────────┬─────────────┴────────┬───────────────────────┐
//! │     Auth      │         HTTP         │        Config         │
//! ├───────────────┼──────────────────────┼───────────────────────┤
//! │ Bearer        │ URL building         │ YAML / JSON file      │
//! │ App-only      │ Rate limit (governor)│ Environment overrides │
//! │ OAuth2 token  │ Error mapping        │                       │
//! └───────────────┴──────────────────────┴───────────────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Authentication
pub mod auth;

/// HTTP client with rate limiting
pub mod http;

/// The client seam the pager requests through
pub mod client;

/// Pagination over cursors, ids and v2 tokens
pub mod pagination;

/// Client configuration
pub mod config;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use client::ApiClient;
pub use config::ClientConfig;
pub use error::{Error, Result};
pub use http::{ApiResponse, TwitterClient};
pub use pagination::{IteratorOptions, ItemStream, Pager};
pub use types::*;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
