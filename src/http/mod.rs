//! HTTP client module
//!
//! Provides the reqwest-backed [`TwitterClient`].
//!
//! # Features
//!
//! - **Versioned URLs**: v1.1 `.json` resources and v2 paths
//! - **Path parameters**: `tweets/:123` becomes `tweets/123`
//! - **Rate Limiting**: Token bucket rate limiter using governor
//! - **Authentication**: Integration with auth module

mod client;
mod rate_limit;
mod response;

pub use client::{build_url, TwitterClient};
pub use rate_limit::{RateLimiter, RateLimiterConfig, RATE_LIMIT_WINDOW};
pub use response::{extract_items, ApiResponse, Quota};
