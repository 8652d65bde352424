//! Lazy page-by-page iteration over list endpoints.
//!
//! List endpoints return one [`Page`] at a time. A [`Paginator`] turns a
//! "fetch page N" function into a forward-only sequence of items: it starts
//! at page 1, fetches a page only when its buffer runs dry, and never
//! fetches the same page twice. A new sequence always starts over at page 1.

use crate::error::{WebshareError, WebshareResult};
use futures::Stream;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::future::Future;
use tracing::debug;

/// One page of a paginated list endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    /// Total number of items across all pages
    pub count: u64,
    /// URL of the next page, if there is one
    pub next: Option<String>,
    /// URL of the previous page, if there is one
    #[serde(default)]
    pub previous: Option<String>,
    /// Items on this page
    pub results: Vec<T>,
}

impl<T> Page<T> {
    /// Whether the server reports a further page.
    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.next.is_some()
    }
}

/// Page-number pagination parameters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PaginationParams {
    /// 1-based page number
    pub page: Option<u32>,
    /// Items per page
    pub page_size: Option<u32>,
}

impl PaginationParams {
    /// Request a specific page.
    #[must_use]
    pub const fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    /// Request a page size.
    #[must_use]
    pub const fn page_size(mut self, page_size: u32) -> Self {
        self.page_size = Some(page_size);
        self
    }
}

/// Pull-based iterator over the items of a paginated endpoint.
///
/// A page with no items ends the sequence even if the server claims a
/// further page exists.
pub struct Paginator<T, F> {
    fetch: F,
    next_page: u32,
    buffer: VecDeque<T>,
    exhausted: bool,
}

impl<T, F, Fut> Paginator<T, F>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = WebshareResult<Page<T>>>,
{
    /// Create a paginator that starts at page 1.
    #[must_use]
    pub const fn new(fetch: F) -> Self {
        Self {
            fetch,
            next_page: 1,
            buffer: VecDeque::new(),
            exhausted: false,
        }
    }

    /// Next item, fetching the next page if the buffer is empty.
    ///
    /// Returns `Ok(None)` once the sequence has ended.
    ///
    /// # Errors
    ///
    /// Returns the page fetch error. The sequence ends after an error.
    pub async fn try_next(&mut self) -> WebshareResult<Option<T>> {
        while self.buffer.is_empty() {
            if self.exhausted {
                return Ok(None);
            }

            debug!(page = self.next_page, "Fetching page");
            let page = match (self.fetch)(self.next_page).await {
                Ok(page) => page,
                Err(err) => {
                    self.exhausted = true;
                    return Err(err);
                }
            };

            if page.has_next() {
                self.next_page += 1;
            } else {
                self.exhausted = true;
            }
            self.buffer = page.results.into();

            if self.buffer.is_empty() {
                self.exhausted = true;
                return Ok(None);
            }
        }

        Ok(self.buffer.pop_front())
    }

    /// Page number the next fetch will request.
    #[must_use]
    pub const fn next_page(&self) -> u32 {
        self.next_page
    }

    /// Convert into a [`Stream`] of items.
    pub fn into_stream(self) -> impl Stream<Item = WebshareResult<T>> {
        futures::stream::try_unfold(self, |mut paginator| async move {
            let item = paginator.try_next().await?;
            Ok::<_, WebshareError>(item.map(|item| (item, paginator)))
        })
    }
}

/// Lazily stream every item from a paginated endpoint.
///
/// `fetch` receives 1-based page numbers in ascending order and is called
/// once per page consumed.
pub fn paginate<T, F, Fut>(fetch: F) -> impl Stream<Item = WebshareResult<T>>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = WebshareResult<Page<T>>>,
{
    Paginator::new(fetch).into_stream()
}
