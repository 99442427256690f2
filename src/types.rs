//! Common types used throughout twitter-pager
//!
//! This module contains shared type definitions and type aliases
//! used across multiple modules.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// JSON object type
pub type JsonObject = serde_json::Map<String, JsonValue>;

/// Query parameters sent with each request.
///
/// Pagination keys (`cursor`, `next`, `since_id`, `max_id`,
/// `pagination_token`) are written here between pages.
pub type RequestParams = HashMap<String, String>;

// ============================================================================
// API Version
// ============================================================================

/// Twitter REST API generation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ApiVersion {
    /// Standard v1.1 endpoints (cursors and ids)
    #[serde(rename = "1.1")]
    V1_1,
    /// v2 endpoints (`meta` tokens)
    #[default]
    #[serde(rename = "2")]
    V2,
}

impl ApiVersion {
    /// Version segment used in request URLs
    pub fn as_str(&self) -> &'static str {
        match self {
            ApiVersion::V1_1 => "1.1",
            ApiVersion::V2 => "2",
        }
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ApiVersion {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1.1" => Ok(ApiVersion::V1_1),
            "2" | "2.0" => Ok(ApiVersion::V2),
            other => Err(crate::Error::config(format!(
                "unsupported API version '{other}' (expected '1.1' or '2')"
            ))),
        }
    }
}

// ============================================================================
// Direction
// ============================================================================

/// Which way through the timeline a pager walks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    /// Backward toward older, already existing results
    #[default]
    Older,
    /// Forward, polling for results newer than those already seen
    Newer,
}

impl Direction {
    /// Map the `new_tweets` flag onto a direction
    pub fn from_new_tweets(new_tweets: bool) -> Self {
        if new_tweets {
            Direction::Newer
        } else {
            Direction::Older
        }
    }

    pub fn is_newer(&self) -> bool {
        matches!(self, Direction::Newer)
    }
}
