//! Book catalog access: the provider trait, Google Books, and paginated search

pub mod genre;
mod google;
mod memory;
mod pager;

pub use google::GoogleBooks;
pub use memory::MemoryCatalog;
pub use pager::{SearchPager, SearchResults};

use crate::error::CatalogError;
use crate::types::CatalogBook;
use async_trait::async_trait;

/// Result type for catalog operations
pub type CatalogResult<T> = std::result::Result<T, CatalogError>;

/// One page of raw search results
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogPage {
    /// Items in provider order, duplicates and coverless entries included
    pub items: Vec<CatalogBook>,

    /// Total matches as estimated by the provider
    pub total_items: u64,
}

/// A searchable book catalog
#[async_trait]
pub trait CatalogProvider: Send + Sync {
    /// Fetch `max_results` items starting at `start_index`.
    ///
    /// `query` is a sanitized query string (see [`crate::text::sanitize`]).
    async fn search(
        &self,
        query: &str,
        start_index: u64,
        max_results: u32,
    ) -> CatalogResult<CatalogPage>;

    /// Fetch a single volume by catalog identifier
    async fn volume(&self, volume_id: &str) -> CatalogResult<CatalogBook>;
}
