//! Pagination strategy implementations
//!
//! Each page is matched to exactly one strategy, chosen from the API version
//! and the metadata fields present in the body. The strategy then decides
//! whether to stop and how to advance.

use super::types::{Advance, NextPage, PageTracker};
use crate::types::{ApiVersion, Direction, JsonObject, JsonValue, RequestParams};

/// Parameter whose presence marks a v1.1 premium search request
const PREMIUM_SEARCH_PARAM: &str = "query";

/// Everything a strategy needs besides the body
#[derive(Debug, Clone, Copy)]
pub struct PageContext<'a> {
    pub direction: Direction,
    /// v1.1 premium search: cursor `-1` ends pagination instead of falling back to ids
    pub premium_search: bool,
    pub tracker: &'a PageTracker,
}

impl<'a> PageContext<'a> {
    pub fn new(
        version: ApiVersion,
        direction: Direction,
        params: &RequestParams,
        tracker: &'a PageTracker,
    ) -> Self {
        Self {
            direction,
            premium_search: is_premium_search(version, params),
            tracker,
        }
    }
}

/// Check if a request is a v1.1 premium search
pub fn is_premium_search(version: ApiVersion, params: &RequestParams) -> bool {
    version == ApiVersion::V1_1 && params.contains_key(PREMIUM_SEARCH_PARAM)
}

// ============================================================================
// Strategy Selection
// ============================================================================

/// The continuation strategy for one page
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PageStrategy<'a> {
    /// v1.1 `next_cursor` (older) or `previous_cursor` (newer)
    Cursor(&'a JsonValue),
    /// v1.1 premium search `next`
    Next(&'a JsonValue),
    /// v1.1 body without cursor fields: continue from item ids
    ById,
    /// v2 `meta` block, if present
    Meta(Option<&'a JsonObject>),
}

impl<'a> PageStrategy<'a> {
    /// Pick the strategy for a response body
    pub fn select(version: ApiVersion, direction: Direction, body: &'a JsonValue) -> Self {
        // `Value::get` is `None` for bodies that are not objects
        match version {
            ApiVersion::V2 => Self::Meta(body.get("meta").and_then(JsonValue::as_object)),
            ApiVersion::V1_1 => match direction {
                Direction::Newer => body.get("previous_cursor").map_or(Self::ById, Self::Cursor),
                Direction::Older => body
                    .get("next_cursor")
                    .map(Self::Cursor)
                    .or_else(|| body.get("next").map(Self::Next))
                    .unwrap_or(Self::ById),
            },
        }
    }

    /// Decide whether to continue and how
    pub fn next_page(&self, ctx: &PageContext<'_>) -> NextPage {
        match self {
            Self::Cursor(value) => cursor_next_page(value, ctx, Advance::Cursor),
            Self::Next(value) => cursor_next_page(value, ctx, Advance::Next),
            Self::ById => id_next_page(ctx),
            Self::Meta(meta) => meta_next_page(*meta, ctx.direction),
        }
    }
}

/// Select a strategy for `body` and evaluate it
pub fn next_page(version: ApiVersion, body: &JsonValue, ctx: &PageContext<'_>) -> NextPage {
    PageStrategy::select(version, ctx.direction, body).next_page(ctx)
}

// ============================================================================
// v1.1 Cursors
// ============================================================================

/// Meaning of a v1.1 cursor value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CursorValue {
    /// `0`, empty or null: no more results
    Exhausted,
    /// `-1`: no cursor, continue from item ids
    UseId,
    /// Opaque position to send back
    Token(String),
}

impl CursorValue {
    pub fn parse(value: &JsonValue) -> Self {
        match value {
            JsonValue::Null | JsonValue::Bool(false) => Self::Exhausted,
            JsonValue::Number(n) if n.as_i64() == Some(0) => Self::Exhausted,
            JsonValue::Number(n) if n.as_i64() == Some(-1) => Self::UseId,
            JsonValue::String(s) if s.is_empty() => Self::Exhausted,
            JsonValue::Array(a) if a.is_empty() => Self::Exhausted,
            JsonValue::Object(o) if o.is_empty() => Self::Exhausted,
            other => Self::Token(param_value(other)),
        }
    }
}

fn cursor_next_page(
    value: &JsonValue,
    ctx: &PageContext<'_>,
    advance: fn(String) -> Advance,
) -> NextPage {
    match CursorValue::parse(value) {
        CursorValue::Exhausted => NextPage::Done,
        CursorValue::UseId => id_next_page(ctx),
        CursorValue::Token(_) if is_empty_older_page(ctx) => NextPage::Done,
        CursorValue::Token(token) => NextPage::Continue(advance(token)),
    }
}

fn id_next_page(ctx: &PageContext<'_>) -> NextPage {
    if ctx.premium_search || is_empty_older_page(ctx) {
        return NextPage::Done;
    }

    let Some(id) = ctx.tracker.id() else {
        return NextPage::Continue(Advance::Repeat);
    };

    let advance = match ctx.direction {
        Direction::Newer => Advance::SinceId(param_value(id)),
        Direction::Older => id_as_i64(id)
            .and_then(|id| id.checked_sub(1))
            .map_or(Advance::Repeat, |max_id| Advance::MaxId(max_id.to_string())),
    };
    NextPage::Continue(advance)
}

fn is_empty_older_page(ctx: &PageContext<'_>) -> bool {
    ctx.direction == Direction::Older && ctx.tracker.count == 0
}

fn id_as_i64(id: &JsonValue) -> Option<i64> {
    match id {
        JsonValue::Number(n) => n.as_i64(),
        JsonValue::String(s) => s.parse().ok(),
        _ => None,
    }
}

// ============================================================================
// v2 Meta
// ============================================================================

fn meta_next_page(meta: Option<&JsonObject>, direction: Direction) -> NextPage {
    let Some(meta) = meta else {
        return NextPage::Done;
    };

    let present = |key: &str| meta.get(key).filter(|v| !v.is_null());
    let no_results = meta
        .get("result_count")
        .and_then(JsonValue::as_i64)
        .is_some_and(|count| count == 0);

    match direction {
        _ if no_results => NextPage::Done,
        Direction::Older => present("next_token").map_or(NextPage::Done, |token| {
            NextPage::Continue(Advance::PaginationToken(param_value(token)))
        }),
        Direction::Newer => NextPage::Continue(
            present("newest_id").map_or(Advance::Repeat, |id| Advance::SinceId(param_value(id))),
        ),
    }
}

/// Render a JSON value as a query parameter value
fn param_value(value: &JsonValue) -> String {
    match value {
        JsonValue::String(s) => s.clone(),
        other => other.to_string(),
    }
}
