//! Bookish Core Library
//!
//! This crate provides the data model and client logic for Bookish, a personal
//! book tracker. Books are found through an external catalog (Google Books)
//! and kept on shelves stored by the Bookish backend.
//!
//! Callers pass the catalog, the backend client and the [`Session`] in
//! explicitly; nothing here holds global state.

pub mod account;
pub mod api;
pub mod catalog;
pub mod config;
pub mod dedupe;
pub mod error;
pub mod library;
pub mod session;
pub mod text;
pub mod types;
pub mod validation;

pub use api::{BookishApi, HttpBookishApi, PageCursor, Paginated};
pub use catalog::{CatalogProvider, GoogleBooks, MemoryCatalog, SearchPager, SearchResults};
pub use config::Config;
pub use error::{
    ApiError, BookishError, CatalogError, ConfigError, Result, SessionError, ValidationError,
};
pub use session::{FileTokenStore, MemoryTokenStore, Session, TokenStore};
pub use text::sanitize;
pub use types::{
    BookSummary, CatalogBook, Credentials, DateRange, LibraryBook, PublicReview,
    ReadingActivity, Review, Shelf, Signup, User, UserBook, UserUpdate,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_book_creation() {
        let book = UserBook::new("abc123").with_rating(4);
        assert_eq!(book.shelf, Some(Shelf::Read));
        assert!(validation::validate_user_book(&book).is_ok());
    }
}
