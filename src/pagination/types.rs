//! Pagination types
//!
//! Defines what a page tells the pager: how each item is classified, what
//! was seen on the page, and how request parameters advance afterwards.

use crate::types::{Direction, JsonValue, RequestParams};
use std::time::Duration;

/// In-band error codes that mean "try the same request again"
pub const SERVICE_ERROR_CODES: [i64; 2] = [130, 131];

/// Default pause between page requests
pub const DEFAULT_WAIT: Duration = Duration::from_secs(5);

// ============================================================================
// Item Classification
// ============================================================================

/// What an item on a page represents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    /// A result to hand to the caller
    Record,
    /// A service error delivered as page content (over capacity, internal error)
    ServiceError(i64),
}

/// Classify one item.
///
/// Only mappings with a `code` of 130 or 131 are service errors; anything
/// that is not a mapping is an opaque record.
pub fn classify_item(item: &JsonValue) -> ItemKind {
    let code = item
        .as_object()
        .and_then(|map| map.get("code"))
        .and_then(JsonValue::as_i64);

    match code {
        Some(code) if SERVICE_ERROR_CODES.contains(&code) => ItemKind::ServiceError(code),
        _ => ItemKind::Record,
    }
}

// ============================================================================
// Page Tracking
// ============================================================================

/// What the pager saw while walking one page
#[derive(Debug, Clone, Default)]
pub struct PageTracker {
    /// Items observed on the page
    pub count: usize,
    /// `id` of the last mapping that had one
    pub last_id: Option<JsonValue>,
}

impl PageTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an item and classify it
    pub fn observe(&mut self, item: &JsonValue) -> ItemKind {
        self.count += 1;
        if let Some(id) = item.as_object().and_then(|map| map.get("id")) {
            self.last_id = Some(id.clone());
        }
        classify_item(item)
    }

    /// Last seen id, ignoring an explicit `null`
    pub fn id(&self) -> Option<&JsonValue> {
        self.last_id.as_ref().filter(|id| !id.is_null())
    }
}

// ============================================================================
// Advancing
// ============================================================================

/// How request parameters change before the next request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advance {
    /// v1.1 `cursor=<next_cursor|previous_cursor>`
    Cursor(String),
    /// v1.1 premium search `next=<next>`
    Next(String),
    /// `since_id`: v1.1 newest item id, or v2 `meta.newest_id`
    SinceId(String),
    /// v1.1 `max_id`: one below the oldest item id
    MaxId(String),
    /// v2 `pagination_token=<meta.next_token>`
    PaginationToken(String),
    /// Nothing to advance with; re-request with the same parameters
    Repeat,
}

impl Advance {
    /// Parameter key this advance writes, if any
    pub fn param(&self) -> Option<&'static str> {
        match self {
            Advance::Cursor(_) => Some("cursor"),
            Advance::Next(_) => Some("next"),
            Advance::SinceId(_) => Some("since_id"),
            Advance::MaxId(_) => Some("max_id"),
            Advance::PaginationToken(_) => Some("pagination_token"),
            Advance::Repeat => None,
        }
    }

    /// Check whether this advance leaves parameters untouched
    pub fn is_repeat(&self) -> bool {
        matches!(self, Advance::Repeat)
    }

    /// Write this advance into the request parameters
    pub fn apply(&self, params: &mut RequestParams) {
        let value = match self {
            Advance::Cursor(v)
            | Advance::Next(v)
            | Advance::SinceId(v)
            | Advance::MaxId(v)
            | Advance::PaginationToken(v) => v,
            Advance::Repeat => return,
        };
        if let Some(key) = self.param() {
            params.insert(key.to_string(), value.clone());
        }
    }
}

/// Result of inspecting a page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NextPage {
    /// Request another page after applying the advance
    Continue(Advance),
    /// The server has no further results
    Done,
}

// ============================================================================
// Options
// ============================================================================

/// Options for one pagination session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IteratorOptions {
    /// Minimum time between the start of consecutive page requests
    pub wait: Duration,
    /// Walk toward older or newer results
    pub direction: Direction,
    /// Cap on consecutive retries and no-progress re-requests; `None` is unbounded
    pub max_retries: Option<u32>,
}

impl Default for IteratorOptions {
    fn default() -> Self {
        Self {
            wait: DEFAULT_WAIT,
            direction: Direction::Older,
            max_retries: None,
        }
    }
}

impl IteratorOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the pause from a number of seconds; negative or NaN means no pause
    #[must_use]
    pub fn wait_secs(mut self, secs: f64) -> Self {
        self.wait = Duration::try_from_secs_f64(secs).unwrap_or(Duration::ZERO);
        self
    }

    #[must_use]
    pub fn wait(mut self, wait: Duration) -> Self {
        self.wait = wait;
        self
    }

    #[must_use]
    pub fn direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    /// Walk forward, polling for new results
    #[must_use]
    pub fn new_tweets(mut self, new_tweets: bool) -> Self {
        self.direction = Direction::from_new_tweets(new_tweets);
        self
    }

    #[must_use]
    pub fn max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = Some(max_retries);
        self
    }
}

/// Sleep needed so that requests start at least `wait` apart
pub fn pause_for(wait: Duration, elapsed: Duration) -> Duration {
    wait.saturating_sub(elapsed)
}
