//! Paginated catalog search
//!
//! A [`SearchPager`] owns the offset cursor for one query. Each fetch asks
//! the provider for the next page, merges it into the accumulated results
//! (first occurrence of a volume id wins, coverless entries are dropped) and
//! advances the cursor by the number of raw items received.
//!
//! Paging stops once the cursor reaches the total reported by the first
//! page, or when a page comes back empty.

use super::{CatalogProvider, CatalogResult};
use crate::dedupe::VolumeKeyed;
use crate::text::sanitize;
use crate::types::BookSummary;
use serde::Serialize;
use std::collections::HashSet;

/// Accumulated results of a search
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SearchResults {
    pub items: Vec<BookSummary>,

    /// Total reported by the first page (0 for an empty query)
    pub total_items: u64,
}

/// Offset-cursor pagination over a [`CatalogProvider`]
pub struct SearchPager<'a> {
    provider: &'a dyn CatalogProvider,
    query: String,
    page_size: u32,
    offset: u64,
    total: Option<u64>,
    exhausted: bool,
    seen: HashSet<String>,
    results: Vec<BookSummary>,
}

impl<'a> SearchPager<'a> {
    /// Start a search. The text is sanitized here; an empty query never
    /// reaches the provider.
    pub fn new(provider: &'a dyn CatalogProvider, text: &str, page_size: u32) -> Self {
        let query = sanitize(text);
        let exhausted = query.is_empty();
        Self {
            provider,
            query,
            page_size: crate::config::clamp_page_size(page_size),
            offset: 0,
            total: if exhausted { Some(0) } else { None },
            exhausted,
            seen: HashSet::new(),
            results: Vec::new(),
        }
    }

    /// Sanitized query string
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Number of raw items received so far; the next page starts here
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Total reported by the first page, once it has been fetched
    pub fn total(&self) -> Option<u64> {
        self.total
    }

    /// De-duplicated results with covers, in arrival order
    pub fn results(&self) -> &[BookSummary] {
        &self.results
    }

    pub fn has_more(&self) -> bool {
        !self.exhausted
    }

    /// Fetch the next page and return the entries it added.
    ///
    /// Returns an empty list without a request once paging has finished.
    /// On error the cursor does not move, so the same page can be asked
    /// for again.
    pub async fn try_fetch_more(&mut self) -> CatalogResult<Vec<BookSummary>> {
        if self.exhausted {
            return Ok(Vec::new());
        }

        tracing::debug!(
            "Fetching '{}' at offset {} (page size {})",
            self.query,
            self.offset,
            self.page_size
        );

        let page = self
            .provider
            .search(&self.query, self.offset, self.page_size)
            .await?;

        let total = *self.total.get_or_insert(page.total_items);
        let received = page.items.len() as u64;
        self.offset += received;

        let start = self.results.len();
        for book in page.items {
            if !self.seen.insert(book.volume_id.clone()) {
                continue;
            }
            if book.cover().is_some_and(|c| !c.is_empty()) {
                self.results.push(book.summary());
            }
        }

        if received == 0 || self.offset >= total {
            self.exhausted = true;
        }

        Ok(self.results[start..].to_vec())
    }

    /// Like [`try_fetch_more`](Self::try_fetch_more), but upstream failures
    /// are logged and yield an empty page instead of an error
    pub async fn fetch_more(&mut self) -> Vec<BookSummary> {
        match self.try_fetch_more().await {
            Ok(added) => added,
            Err(e) => {
                tracing::warn!("Catalog search for '{}' failed: {}", self.query, e);
                Vec::new()
            }
        }
    }

    /// Fetch up to `max_pages` pages leniently and return everything gathered
    pub async fn collect(mut self, max_pages: usize) -> SearchResults {
        for _ in 0..max_pages {
            if !self.has_more() {
                break;
            }
            self.fetch_more().await;
        }
        self.into_results()
    }

    pub fn into_results(self) -> SearchResults {
        SearchResults {
            items: self.results,
            total_items: self.total.unwrap_or(0),
        }
    }
}
