//! In-memory catalog (for testing and offline use)

use super::{CatalogPage, CatalogProvider, CatalogResult};
use crate::error::CatalogError;
use crate::types::CatalogBook;
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// A fixed list of volumes searched by case-insensitive word match on title
/// and authors. Records every request so callers can assert on traffic.
#[derive(Default)]
pub struct MemoryCatalog {
    books: Vec<CatalogBook>,
    /// Overrides the reported total, to mimic the provider's estimates
    reported_total: Option<u64>,
    fail_with_quota: AtomicBool,
    requests: AtomicUsize,
}

impl MemoryCatalog {
    pub fn new(books: Vec<CatalogBook>) -> Self {
        Self {
            books,
            ..Self::default()
        }
    }

    pub fn with_reported_total(mut self, total: u64) -> Self {
        self.reported_total = Some(total);
        self
    }

    /// Make every following request fail as if the quota were exhausted
    pub fn set_quota_exhausted(&self, exhausted: bool) {
        self.fail_with_quota.store(exhausted, Ordering::Relaxed);
    }

    /// Number of requests served so far
    pub fn request_count(&self) -> usize {
        self.requests.load(Ordering::Relaxed)
    }

    fn check_quota(&self) -> CatalogResult<()> {
        self.requests.fetch_add(1, Ordering::Relaxed);
        if self.fail_with_quota.load(Ordering::Relaxed) {
            Err(CatalogError::QuotaExhausted)
        } else {
            Ok(())
        }
    }

    fn matches(book: &CatalogBook, words: &[String]) -> bool {
        let haystack = format!("{} {}", book.title, book.authors.join(" ")).to_lowercase();
        words.iter().all(|w| haystack.contains(w.as_str()))
    }
}

#[async_trait]
impl CatalogProvider for MemoryCatalog {
    async fn search(
        &self,
        query: &str,
        start_index: u64,
        max_results: u32,
    ) -> CatalogResult<CatalogPage> {
        self.check_quota()?;

        let words: Vec<String> = query
            .split('+')
            .filter(|w| !w.is_empty())
            .map(str::to_lowercase)
            .collect();

        let matching: Vec<&CatalogBook> = self
            .books
            .iter()
            .filter(|b| Self::matches(b, &words))
            .collect();

        let items = matching
            .iter()
            .skip(start_index as usize)
            .take(max_results as usize)
            .map(|b| (*b).clone())
            .collect();

        Ok(CatalogPage {
            items,
            total_items: self.reported_total.unwrap_or(matching.len() as u64),
        })
    }

    async fn volume(&self, volume_id: &str) -> CatalogResult<CatalogBook> {
        self.check_quota()?;
        self.books
            .iter()
            .find(|b| b.volume_id == volume_id)
            .cloned()
            .ok_or_else(|| CatalogError::NotFound(volume_id.to_string()))
    }
}
