//! Core record types: catalog books, user-owned books, accounts and aggregates

mod activity;
mod book;
mod shelf;
mod user;

pub use activity::{DateRange, PublicReview, ReadingActivity, Reviewer};
pub use book::{BookSummary, CatalogBook};
pub use shelf::{LibraryBook, Review, Shelf, UserBook};
pub use user::{Credentials, Signup, User, UserUpdate};
