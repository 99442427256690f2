//! Pagination module
//!
//! Supports: v1.1 cursors (`next_cursor`, `previous_cursor`, premium `next`),
//! v1.1 id windows (`max_id`, `since_id`), v2 `meta` tokens
//!
//! # Overview
//!
//! A [`Pager`] requests a resource page after page and yields the items of
//! every page as one stream. After each page a [`PageStrategy`] picked from
//! the API version and the response metadata decides whether to stop and
//! which [`Advance`] to write into the request parameters.

mod pager;
mod strategies;
mod types;

pub use pager::{ItemStream, Pager};
pub use strategies::{is_premium_search, next_page, CursorValue, PageContext, PageStrategy};
pub use types::{
    classify_item, pause_for, Advance, ItemKind, IteratorOptions, NextPage, PageTracker,
    DEFAULT_WAIT, SERVICE_ERROR_CODES,
};
