//! Single-book commands: details, library changes and reviews

use super::{spinner, Context};
use crate::BookChanges;
use anyhow::{bail, Context as _, Result};
use bookish_core::api::BookishApi;
use bookish_core::library::{self, BookDetails};
use bookish_core::text::format_thousands;
use bookish_core::{session, Review, Shelf, UserBook};

/// Show catalog details, plus the user's record when logged in
pub async fn book(ctx: &Context, volume_id: &str, json: bool) -> Result<()> {
    let catalog = ctx.catalog()?;
    let api = ctx.api()?;

    // Details are public; a stale or unreachable session only hides the record
    let session = match session::restore(&api, &ctx.token_store()).await {
        Ok(session) => session,
        Err(e) => {
            tracing::warn!("Continuing without session: {}", e);
            None
        }
    };

    let pb = spinner("Loading book");
    let result = library::book_details(&catalog, &api, session.as_ref(), volume_id).await;
    pb.finish_and_clear();

    let details = result.with_context(|| format!("Failed to load book {}", volume_id))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&details)?);
    } else {
        print_details(&details);
    }
    Ok(())
}

fn print_details(details: &BookDetails) {
    let book = &details.book;
    match &book.subtitle {
        Some(subtitle) => println!("{}: {}", book.title, subtitle),
        None => println!("{}", book.title),
    }
    if !book.authors.is_empty() {
        println!("Authors:    {}", book.authors.join(", "));
    }
    if let Some(publisher) = &book.publisher {
        println!("Publisher:  {}", publisher);
    }
    if let Some(date) = &book.published_date {
        println!("Published:  {}", date);
    }
    if let Some(pages) = book.page_count {
        println!("Pages:      {}", pages);
    }
    if let Some(genres) = book.genres() {
        println!("Genres:     {}", genres);
    }
    if let Some(rating) = book.average_rating {
        let count = book.ratings_count.unwrap_or(0) as u64;
        println!("Rating:     {:.1} ({} ratings)", rating, format_thousands(count));
    }

    if let Some(record) = &details.record {
        println!();
        match record.shelf {
            Some(shelf) => println!("Shelf:      {}", shelf),
            None => println!("Shelf:      -"),
        }
        println!("Owned:      {}", if record.owned { "yes" } else { "no" });
        if let Some(rating) = record.rating {
            println!("Your rating: {}", "★".repeat(rating as usize));
        }
        if let Some(date) = record.date_read {
            println!("Finished:   {}", date.format("%Y-%m-%d"));
        }
        if let Some(review) = &record.review {
            println!("Your review: {}", review.text);
        }
    }

    if let Some(description) = &book.description {
        println!();
        println!("{}", description);
    }
}

/// Apply command-line changes to a record. Shelf moves come first so that
/// details given alongside a non-Read `--shelf` are caught by validation.
/// Without `--shelf`, giving any read detail moves the book to "Read".
fn apply_changes(mut book: UserBook, changes: &BookChanges) -> UserBook {
    let read_details =
        changes.rating.is_some() || changes.review.is_some() || changes.date_read.is_some();
    match changes.shelf {
        Some(shelf) => book.move_to_shelf(shelf),
        None if read_details => book.move_to_shelf(Shelf::Read),
        None => {}
    }
    if changes.owned {
        book.owned = true;
    }
    if let Some(rating) = changes.rating {
        book = book.with_rating(rating);
    }
    if let Some(text) = &changes.review {
        book = book.with_review(Review::new(text.trim()));
    }
    if let Some(date) = changes.date_read {
        book = book.with_date_read(date);
    }
    book
}

/// Add a book to the library
pub async fn add(ctx: &Context, volume_id: &str, changes: &BookChanges) -> Result<()> {
    let api = ctx.api()?;
    let session = ctx.session(&api).await?;

    if api.user_book(&session, volume_id).await?.is_some() {
        bail!("{} is already in your library; use `bookish update`", volume_id);
    }

    let book = apply_changes(UserBook::new(volume_id), changes);
    let saved = library::save_book(&api, &session, &book)
        .await
        .context("Failed to add book")?;

    print_saved(&saved);
    Ok(())
}

/// Change a book already in the library
pub async fn update(
    ctx: &Context,
    volume_id: &str,
    changes: &BookChanges,
    not_owned: bool,
) -> Result<()> {
    let api = ctx.api()?;
    let session = ctx.session(&api).await?;

    let existing = api
        .user_book(&session, volume_id)
        .await?
        .with_context(|| format!("{} is not in your library; use `bookish add`", volume_id))?;

    let mut book = apply_changes(existing, changes);
    if not_owned {
        book.owned = false;
    }

    let saved = library::save_book(&api, &session, &book)
        .await
        .context("Failed to update book")?;

    print_saved(&saved);
    Ok(())
}

pub async fn remove(ctx: &Context, volume_id: &str) -> Result<()> {
    let api = ctx.api()?;
    let session = ctx.session(&api).await?;
    library::remove_book(&api, &session, volume_id)
        .await
        .with_context(|| format!("Failed to remove {}", volume_id))?;
    println!("Removed {}", volume_id);
    Ok(())
}

fn print_saved(book: &UserBook) {
    let shelf = book.shelf.map(|s| s.label()).unwrap_or("no shelf");
    let owned = if book.owned { ", owned" } else { "" };
    println!("Saved {} ({}{})", book.volume_id, shelf, owned);
}

/// List public reviews of a book
pub async fn reviews(ctx: &Context, volume_id: &str, all: bool) -> Result<()> {
    let api = ctx.api()?;

    let pb = spinner("Loading reviews");
    let result = library::reviews(&api, volume_id, if all { None } else { Some(1) }).await;
    pb.finish_and_clear();

    let listing = result.with_context(|| format!("Failed to load reviews of {}", volume_id))?;
    if listing.items.is_empty() {
        println!("No reviews yet");
        return Ok(());
    }

    for review in &listing.items {
        println!("{} {}", review.stars(), review.reviewer_name());
        if let Some(body) = &review.review {
            println!("  {}", body.text);
            println!("  {}", body.date.format("%Y-%m-%d"));
        }
    }
    if !listing.complete {
        println!("More reviews available; use --all to list them");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use bookish_core::validation::validate_user_book;

    #[test]
    fn test_rating_alone_moves_to_read() {
        let changes = BookChanges {
            rating: Some(4),
            ..BookChanges::default()
        };
        let book = apply_changes(UserBook::new("v1"), &changes);
        assert_eq!(book.shelf, Some(Shelf::Read));
        assert!(validate_user_book(&book).is_ok());
    }

    #[test]
    fn test_details_move_stored_shelf_to_read() {
        let reading = UserBook::new("v1").with_shelf(Shelf::CurrentlyReading);
        let changes = BookChanges {
            rating: Some(5),
            ..BookChanges::default()
        };
        let book = apply_changes(reading, &changes);
        assert_eq!(book.shelf, Some(Shelf::Read));
        assert_eq!(book.rating, Some(5));
        assert!(validate_user_book(&book).is_ok());

        let wanted = UserBook::new("v2").with_shelf(Shelf::WantToRead);
        let changes = BookChanges {
            review: Some("  Slow start, great ending.  ".to_string()),
            ..BookChanges::default()
        };
        let book = apply_changes(wanted, &changes);
        assert_eq!(book.shelf, Some(Shelf::Read));
        assert_eq!(book.review.map(|r| r.text).as_deref(), Some("Slow start, great ending."));
    }

    #[test]
    fn test_owned_only_keeps_shelf() {
        let wanted = UserBook::new("v1").with_shelf(Shelf::WantToRead);
        let changes = BookChanges {
            owned: true,
            ..BookChanges::default()
        };
        let book = apply_changes(wanted, &changes);
        assert_eq!(book.shelf, Some(Shelf::WantToRead));
        assert!(book.owned);
    }

    #[test]
    fn test_rating_with_other_shelf_is_rejected() {
        let changes = BookChanges {
            shelf: Some(Shelf::WantToRead),
            rating: Some(4),
            ..BookChanges::default()
        };
        let book = apply_changes(UserBook::new("v1"), &changes);
        assert!(validate_user_book(&book).is_err());
    }

    #[test]
    fn test_leaving_read_clears_details() {
        let read = UserBook::new("v1").with_rating(5);
        let changes = BookChanges {
            shelf: Some(Shelf::CurrentlyReading),
            ..BookChanges::default()
        };
        let book = apply_changes(read, &changes);
        assert_eq!(book.rating, None);
        assert!(validate_user_book(&book).is_ok());
    }
}
