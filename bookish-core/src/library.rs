//! A user's library: shelf listings, book records and profile statistics

use crate::api::{ApiResult, BookishApi, PageCursor, Paginated};
use crate::catalog::CatalogProvider;
use crate::dedupe::{dedupe_by_id, dedupe_with_covers};
use crate::error::Result;
use crate::session::Session;
use crate::types::{BookSummary, CatalogBook, LibraryBook, PublicReview, Shelf, User, UserBook};
use crate::validation::validate_user_book;
use futures::future::join_all;
use serde::Serialize;
use std::future::Future;

/// Number of books per shelf, plus owned books
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ShelfCounts {
    pub owned: usize,
    pub want_to_read: usize,
    pub currently_reading: usize,
    pub read: usize,
}

impl ShelfCounts {
    pub fn from_books(books: &[UserBook]) -> Self {
        books.iter().fold(Self::default(), |mut counts, book| {
            if book.owned {
                counts.owned += 1;
            }
            match book.shelf {
                Some(Shelf::WantToRead) => counts.want_to_read += 1,
                Some(Shelf::CurrentlyReading) => counts.currently_reading += 1,
                Some(Shelf::Read) => counts.read += 1,
                None => {}
            }
            counts
        })
    }

    pub fn for_user(user: &User) -> Self {
        Self::from_books(&user.books)
    }

    pub fn on_shelf(&self, shelf: Shelf) -> usize {
        match shelf {
            Shelf::WantToRead => self.want_to_read,
            Shelf::CurrentlyReading => self.currently_reading,
            Shelf::Read => self.read,
        }
    }
}

/// Items gathered from a page-numbered listing
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Listing<T> {
    pub items: Vec<T>,

    /// Total reported by the first page
    pub total: Option<u64>,

    /// Whether the last page was reached
    pub complete: bool,
}

/// Catalog detail for one volume, with the user's record when logged in
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BookDetails {
    pub book: CatalogBook,
    pub record: Option<UserBook>,
}

/// Follow a listing from page 1 for at most `max_pages` pages (`None` for all)
pub async fn collect_pages<T, F, Fut>(
    max_pages: Option<usize>,
    mut fetch: F,
) -> ApiResult<Listing<T>>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = ApiResult<Paginated<T>>>,
{
    let mut cursor = PageCursor::new();
    let mut items = Vec::new();
    let mut fetched = 0;

    while let Some(page_number) = cursor.next_page() {
        if max_pages.is_some_and(|max| fetched >= max) {
            break;
        }
        tracing::debug!("Fetching listing page {}", page_number);
        let page = fetch(page_number).await?;
        cursor.advance(&page);
        items.extend(page.items);
        fetched += 1;
    }

    Ok(Listing {
        items,
        total: cursor.total(),
        complete: !cursor.has_more(),
    })
}

/// List the books on one shelf
pub async fn list_shelf(
    api: &dyn BookishApi,
    session: &Session,
    shelf: Shelf,
    max_pages: Option<usize>,
) -> Result<Listing<LibraryBook>> {
    let mut listing = collect_pages(max_pages, |page| api.shelf_page(session, shelf, page)).await?;
    listing.items = dedupe_by_id(listing.items);
    Ok(listing)
}

/// List public reviews of a volume
pub async fn reviews(
    api: &dyn BookishApi,
    volume_id: &str,
    max_pages: Option<usize>,
) -> Result<Listing<PublicReview>> {
    Ok(collect_pages(max_pages, |page| api.reviews_page(volume_id, page)).await?)
}

/// Backend recommendations for a genre, de-duplicated and with covers only
pub async fn recommendations(
    api: &dyn BookishApi,
    session: &Session,
    genre: &str,
) -> Result<Vec<BookSummary>> {
    let books = api.recommended_books(session, genre.trim()).await?;
    Ok(dedupe_with_covers(books))
}

/// Create or update a user book record.
///
/// Records without a backend id are created; the rest are updated in place.
pub async fn save_book(
    api: &dyn BookishApi,
    session: &Session,
    book: &UserBook,
) -> Result<UserBook> {
    validate_user_book(book)?;
    let saved = if book.id.is_some() {
        api.update_user_book(session, book).await?
    } else {
        api.create_user_book(session, book).await?
    };
    tracing::info!(
        "Saved {} ({})",
        saved.volume_id,
        saved.shelf.map(|s| s.label()).unwrap_or("no shelf")
    );
    Ok(saved)
}

/// Delete a user book record
pub async fn remove_book(api: &dyn BookishApi, session: &Session, volume_id: &str) -> Result<()> {
    api.delete_user_book(session, volume_id).await?;
    tracing::info!("Removed {}", volume_id);
    Ok(())
}

/// Catalog detail for a volume, merged with the user's record if a session
/// is given.
///
/// Catalog failures are errors. A backend failure while loading the record
/// is logged and leaves `record` empty.
pub async fn book_details(
    catalog: &dyn CatalogProvider,
    api: &dyn BookishApi,
    session: Option<&Session>,
    volume_id: &str,
) -> Result<BookDetails> {
    let book = catalog.volume(volume_id).await?;
    let record = match session {
        Some(session) => match api.user_book(session, volume_id).await {
            Ok(record) => record,
            Err(e) => {
                tracing::warn!("Could not load library record of {}: {}", volume_id, e);
                None
            }
        },
        None => None,
    };
    Ok(BookDetails { book, record })
}

/// Catalog details of every book on "Currently reading".
///
/// Lookups run concurrently; results keep shelf order. Failed lookups are
/// logged and left out.
pub async fn currently_reading(catalog: &dyn CatalogProvider, user: &User) -> Vec<CatalogBook> {
    let ids: Vec<&str> = dedupe_by_id(
        user.books
            .iter()
            .filter(|b| b.shelf == Some(Shelf::CurrentlyReading))
            .collect::<Vec<_>>(),
    )
    .into_iter()
    .map(|b| b.volume_id.as_str())
    .collect();

    tracing::debug!("Looking up {} currently-reading books", ids.len());

    let lookups = ids.iter().copied().map(|id| catalog.volume(id));
    join_all(lookups)
        .await
        .into_iter()
        .zip(ids)
        .filter_map(|(result, id)| match result {
            Ok(book) => Some(book),
            Err(e) => {
                tracing::warn!("Could not load {}: {}", id, e);
                None
            }
        })
        .collect()
}
