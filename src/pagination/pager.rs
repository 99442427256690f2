//! The pager: one continuous stream of items over many pages.

use super::strategies::{next_page, PageContext};
use super::types::{pause_for, IteratorOptions, ItemKind, NextPage, PageTracker};
use crate::client::ApiClient;
use crate::error::Error;
use crate::types::{JsonValue, RequestParams};
use crate::Result;
use async_stream::stream;
use futures::Stream;
use std::pin::Pin;
use tokio::time::Instant;
use tracing::{debug, trace};

/// Stream of result items produced by a [`Pager`]
pub type ItemStream<'a> = Pin<Box<dyn Stream<Item = Result<JsonValue>> + Send + 'a>>;

/// Continuous pagination over one REST resource.
///
/// The pager owns the request parameters. Pagination keys written while a
/// stream runs stay in place afterwards, so a new stream picks up where the
/// previous one stopped.
///
/// ```rust,ignore
/// use futures::StreamExt;
/// use twitter_pager::{ClientConfig, Pager, TwitterClient};
///
/// let client = TwitterClient::new(ClientConfig::default())?;
/// let params = [("query".to_string(), "rustlang".to_string())].into();
/// let mut pager = Pager::new(client, "tweets/search/recent", Some(params));
///
/// let mut items = pager.get_iterator(5.0, false);
/// while let Some(item) = items.next().await {
///     println!("{}", item?);
/// }
/// ```
#[derive(Debug)]
pub struct Pager<C> {
    client: C,
    resource: String,
    params: RequestParams,
}

impl<C: ApiClient> Pager<C> {
    /// Create a pager for `resource`
    pub fn new(client: C, resource: impl Into<String>, params: Option<RequestParams>) -> Self {
        Self {
            client,
            resource: resource.into(),
            params: params.unwrap_or_default(),
        }
    }

    /// The client pages are requested through
    pub fn client(&self) -> &C {
        &self.client
    }

    /// Resource path, as given at construction
    pub fn resource(&self) -> &str {
        &self.resource
    }

    /// Current request parameters, including pagination keys
    pub fn params(&self) -> &RequestParams {
        &self.params
    }

    /// Stream items, waiting at least `wait` seconds between requests.
    ///
    /// `new_tweets = false` walks back through older results;
    /// `true` polls forward for newer ones.
    pub fn get_iterator(&mut self, wait: f64, new_tweets: bool) -> ItemStream<'_> {
        self.iter_with(
            IteratorOptions::new()
                .wait_secs(wait)
                .new_tweets(new_tweets),
        )
    }

    /// Stream items with explicit options.
    ///
    /// The stream ends when the server reports no further results, or
    /// after yielding a non-transient error.
    pub fn iter_with(&mut self, options: IteratorOptions) -> ItemStream<'_> {
        let client = &self.client;
        let resource = self.resource.as_str();
        let params = &mut self.params;
        let version = client.version();

        Box::pin(stream! {
            let mut retries: u32 = 0;
            let mut last_error: Option<Error> = None;

            loop {
                if let Some(max_retries) = options.max_retries {
                    if retries > max_retries {
                        yield Err(Error::max_retries(max_retries, last_error.take()));
                        return;
                    }
                }

                let started = Instant::now();
                let mut tracker = PageTracker::new();
                let page = match client.request(resource, &*params).await {
                    Ok(response) => {
                        let mut items = response.items();
                        if options.direction.is_newer() {
                            items.reverse();
                        }

                        let mut service_error = None;
                        for item in items {
                            match tracker.observe(&item) {
                                ItemKind::Record => {
                                    yield Ok(item);
                                }
                                ItemKind::ServiceError(code) => {
                                    service_error = Some(Error::service(code, service_message(&item)));
                                    break;
                                }
                            }
                        }
                        service_error.map_or(Ok(response), Err)
                    }
                    Err(e) => Err(e),
                };

                let response = match page {
                    Ok(response) => response,
                    Err(e) if e.is_transient() => {
                        debug!("Transient failure on {}, re-requesting: {}", resource, e);
                        retries += 1;
                        last_error = Some(e);
                        continue;
                    }
                    Err(e) => {
                        yield Err(e);
                        return;
                    }
                };

                let ctx = PageContext::new(version, options.direction, params, &tracker);
                let advance = match next_page(version, response.json(), &ctx) {
                    NextPage::Continue(advance) => advance,
                    NextPage::Done => {
                        debug!("No more results for {} after {} items on last page", resource, tracker.count);
                        return;
                    }
                };

                let pause = pause_for(options.wait, started.elapsed());
                if !pause.is_zero() {
                    tokio::time::sleep(pause).await;
                }

                if advance.is_repeat() {
                    retries += 1;
                } else {
                    retries = 0;
                }
                last_error = None;
                trace!("Advancing {}: {:?}", resource, advance);
                advance.apply(params);
            }
        })
    }
}

/// Message of an in-band error item
fn service_message(item: &JsonValue) -> String {
    item.get("message")
        .and_then(JsonValue::as_str)
        .unwrap_or_default()
        .to_string()
}
