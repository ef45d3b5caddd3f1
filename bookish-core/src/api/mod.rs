//! Client for the Bookish backend
//!
//! The backend is reached through the [`BookishApi`] trait so that callers
//! get the client and the [`Session`] passed in explicitly.

mod http;

pub use http::HttpBookishApi;

use crate::error::ApiError;
use crate::session::Session;
use crate::types::{
    BookSummary, Credentials, DateRange, LibraryBook, PublicReview, ReadingActivity, Shelf,
    Signup, User, UserBook, UserUpdate,
};
use async_trait::async_trait;
use serde::Serialize;

/// Result type for backend calls
pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// One page of a backend listing. Pages are numbered from 1.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Paginated<T> {
    pub items: Vec<T>,

    /// Total entries across all pages, when the backend reports it
    pub total: Option<u64>,

    /// Number of the following page; `None` on the last page
    pub next_page: Option<u32>,
}

/// Cursor over page-numbered backend listings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageCursor {
    next: Option<u32>,
    total: Option<u64>,
}

impl Default for PageCursor {
    fn default() -> Self {
        Self::new()
    }
}

impl PageCursor {
    pub fn new() -> Self {
        Self {
            next: Some(1),
            total: None,
        }
    }

    /// Page to request next, if any
    pub fn next_page(&self) -> Option<u32> {
        self.next
    }

    /// Total reported by the first page
    pub fn total(&self) -> Option<u64> {
        self.total
    }

    pub fn has_more(&self) -> bool {
        self.next.is_some()
    }

    /// Move past a received page. An empty page, or a `nextPage` that does
    /// not move forward, ends the listing.
    pub fn advance<T>(&mut self, page: &Paginated<T>) {
        if self.total.is_none() {
            self.total = page.total;
        }
        let current = self.next.unwrap_or(0);
        self.next = match page.next_page {
            Some(next) if next > current && !page.items.is_empty() => Some(next),
            _ => None,
        };
    }
}

/// Operations offered by the Bookish backend
#[async_trait]
pub trait BookishApi: Send + Sync {
    /// Create an account and return its token
    async fn signup(&self, signup: &Signup) -> ApiResult<String>;

    /// Exchange credentials for a token
    async fn login(&self, credentials: &Credentials) -> ApiResult<String>;

    /// Resolve a token to the id of the user it belongs to
    async fn verify_token(&self, token: &str) -> ApiResult<String>;

    async fn user(&self, session: &Session) -> ApiResult<User>;

    async fn update_user(&self, session: &Session, update: &UserUpdate) -> ApiResult<User>;

    async fn delete_user(&self, session: &Session) -> ApiResult<()>;

    async fn reading_activity(
        &self,
        session: &Session,
        range: DateRange,
    ) -> ApiResult<ReadingActivity>;

    async fn recommended_books(
        &self,
        session: &Session,
        genre: &str,
    ) -> ApiResult<Vec<BookSummary>>;

    /// The user's record for a volume; `None` if the user never attached one
    async fn user_book(&self, session: &Session, volume_id: &str) -> ApiResult<Option<UserBook>>;

    async fn create_user_book(&self, session: &Session, book: &UserBook) -> ApiResult<UserBook>;

    async fn update_user_book(&self, session: &Session, book: &UserBook) -> ApiResult<UserBook>;

    async fn delete_user_book(&self, session: &Session, volume_id: &str) -> ApiResult<()>;

    async fn shelf_page(
        &self,
        session: &Session,
        shelf: Shelf,
        page: u32,
    ) -> ApiResult<Paginated<LibraryBook>>;

    /// Public reviews of a volume; needs no session
    async fn reviews_page(&self, volume_id: &str, page: u32) -> ApiResult<Paginated<PublicReview>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(items: usize, total: Option<u64>, next: Option<u32>) -> Paginated<u8> {
        Paginated {
            items: vec![0; items],
            total,
            next_page: next,
        }
    }

    #[test]
    fn test_cursor_follows_next_page() {
        let mut cursor = PageCursor::new();
        assert_eq!(cursor.next_page(), Some(1));

        cursor.advance(&page(10, Some(25), Some(2)));
        assert_eq!(cursor.next_page(), Some(2));
        assert_eq!(cursor.total(), Some(25));

        cursor.advance(&page(10, Some(99), Some(3)));
        assert_eq!(cursor.total(), Some(25));

        cursor.advance(&page(5, None, None));
        assert!(!cursor.has_more());
    }

    #[test]
    fn test_cursor_stops_on_stuck_or_empty_pages() {
        let mut cursor = PageCursor::new();
        cursor.advance(&page(10, None, Some(1)));
        assert!(!cursor.has_more());

        let mut cursor = PageCursor::new();
        cursor.advance(&page(0, None, Some(2)));
        assert!(!cursor.has_more());
    }
}
