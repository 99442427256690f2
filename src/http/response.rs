//! Decoded API responses
//!
//! An [`ApiResponse`] holds one page: its status, its decoded JSON body and
//! the rate limit quota reported in the response headers.

use crate::types::JsonValue;
use chrono::{DateTime, TimeZone, Utc};
use reqwest::header::HeaderMap;

/// Body keys that hold the result items of a page, in lookup order
const ITEM_KEYS: [&str; 5] = ["statuses", "users", "ids", "results", "data"];

/// Rate limit quota for the resource that served a response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quota {
    /// Requests allowed in the current window
    pub limit: Option<u32>,
    /// Requests left in the current window
    pub remaining: Option<u32>,
    /// When the current window resets
    pub reset: Option<DateTime<Utc>>,
}

impl Quota {
    /// Parse the `x-rate-limit-*` headers
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let number = |name: &str| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.trim().parse::<i64>().ok())
        };

        Self {
            limit: number("x-rate-limit-limit").and_then(|n| u32::try_from(n).ok()),
            remaining: number("x-rate-limit-remaining").and_then(|n| u32::try_from(n).ok()),
            reset: number("x-rate-limit-reset").and_then(|ts| Utc.timestamp_opt(ts, 0).single()),
        }
    }
}

/// One page returned by the API
#[derive(Debug, Clone)]
pub struct ApiResponse {
    status: u16,
    body: JsonValue,
    quota: Option<Quota>,
}

impl ApiResponse {
    /// Create a response from a status and decoded body
    pub fn new(status: u16, body: JsonValue) -> Self {
        Self {
            status,
            body,
            quota: None,
        }
    }

    /// Attach the quota parsed from response headers
    #[must_use]
    pub fn with_quota(mut self, quota: Quota) -> Self {
        self.quota = Some(quota);
        self
    }

    /// HTTP status code
    pub fn status(&self) -> u16 {
        self.status
    }

    /// The decoded body, including pagination metadata
    pub fn json(&self) -> &JsonValue {
        &self.body
    }

    /// Rate limit quota, when the server reported one
    pub fn quota(&self) -> Option<Quota> {
        self.quota
    }

    /// Result items of this page, in server order
    pub fn items(&self) -> Vec<JsonValue> {
        extract_items(&self.body)
    }
}

/// Split a response body into result items.
///
/// Arrays yield their elements. Objects yield the entries of the first
/// known item key, followed by any `errors` entries. An object with neither
/// is a single item, unless it only carries v2 `meta`. Object-valued `data`
/// is a single item.
pub fn extract_items(body: &JsonValue) -> Vec<JsonValue> {
    let JsonValue::Object(map) = body else {
        return match body {
            JsonValue::Array(items) => items.clone(),
            JsonValue::Null => Vec::new(),
            other => vec![other.clone()],
        };
    };

    let mut items = Vec::new();
    let mut found = false;

    if let Some(value) = ITEM_KEYS.iter().find_map(|key| map.get(*key)) {
        found = true;
        match value {
            JsonValue::Array(list) => items.extend(list.iter().cloned()),
            JsonValue::Null => {}
            single => items.push(single.clone()),
        }
    }

    if let Some(errors) = map.get("errors") {
        found = true;
        match errors {
            JsonValue::Array(list) => items.extend(list.iter().cloned()),
            single => items.push(single.clone()),
        }
    }

    if !found && !map.contains_key("meta") {
        items.push(body.clone());
    }

    items
}

#[cfg(test)]
mod response_tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use reqwest::header::HeaderValue;
    use serde_json::json;

    #[test]
    fn test_items_from_array_body() {
        let body = json!([{"id": 1}, {"id": 2}]);
        assert_eq!(extract_items(&body), vec![json!({"id": 1}), json!({"id": 2})]);
    }

    #[test]
    fn test_items_from_statuses() {
        let body = json!({
            "statuses": [{"id": 10}, {"id": 9}],
            "search_metadata": {"count": 2}
        });
        assert_eq!(extract_items(&body), vec![json!({"id": 10}), json!({"id": 9})]);
    }

    #[test]
    fn test_items_from_ids_with_cursor() {
        let body = json!({"ids": [111, 222], "next_cursor": 1234, "previous_cursor": 0});
        assert_eq!(extract_items(&body), vec![json!(111), json!(222)]);
    }

    #[test]
    fn test_items_from_v2_data() {
        let body = json!({
            "data": [{"id": "1", "text": "a"}],
            "meta": {"result_count": 1}
        });
        assert_eq!(extract_items(&body), vec![json!({"id": "1", "text": "a"})]);

        let single = json!({"data": {"id": "7", "text": "one"}});
        assert_eq!(extract_items(&single), vec![json!({"id": "7", "text": "one"})]);
    }

    #[test]
    fn test_errors_are_appended() {
        let body = json!({
            "data": [{"id": "1"}],
            "errors": [{"code": 130, "message": "Over capacity"}]
        });
        assert_eq!(
            extract_items(&body),
            vec![json!({"id": "1"}), json!({"code": 130, "message": "Over capacity"})]
        );
    }

    #[test]
    fn test_meta_only_v2_body_has_no_items() {
        let body = json!({"data": null, "meta": {"result_count": 0}});
        assert!(extract_items(&body).is_empty());

        let body = json!({"meta": {"result_count": 0}});
        assert!(extract_items(&body).is_empty());
    }

    #[test]
    fn test_unknown_object_is_single_item() {
        let body = json!({"screen_name": "twitterapi"});
        assert_eq!(extract_items(&body), vec![body.clone()]);
    }

    #[test]
    fn test_quota_from_headers() {
        let mut headers = HeaderMap::new();
        headers.insert("x-rate-limit-limit", HeaderValue::from_static("180"));
        headers.insert("x-rate-limit-remaining", HeaderValue::from_static("179"));
        headers.insert("x-rate-limit-reset", HeaderValue::from_static("1700000000"));

        let quota = Quota::from_headers(&headers);
        assert_eq!(quota.limit, Some(180));
        assert_eq!(quota.remaining, Some(179));
        assert_eq!(quota.reset.map(|t| t.timestamp()), Some(1_700_000_000));
    }

    #[test]
    fn test_quota_missing_headers() {
        let quota = Quota::from_headers(&HeaderMap::new());
        assert_eq!(
            quota,
            Quota {
                limit: None,
                remaining: None,
                reset: None
            }
        );
    }
}
