//! Shelf listing command

use super::{spinner, Context};
use anyhow::{Context as _, Result};
use bookish_core::library::{self, Listing};
use bookish_core::{LibraryBook, Shelf};

pub async fn shelf(ctx: &Context, shelf: Shelf, all: bool, json: bool) -> Result<()> {
    let api = ctx.api()?;
    let session = ctx.session(&api).await?;

    let pb = spinner(format!("Loading '{}'", shelf));
    let result = library::list_shelf(&api, &session, shelf, if all { None } else { Some(1) }).await;
    pb.finish_and_clear();

    let listing = result.with_context(|| format!("Failed to load shelf '{}'", shelf))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&listing)?);
    } else {
        print_listing(shelf, &listing);
    }
    Ok(())
}

fn print_listing(shelf: Shelf, listing: &Listing<LibraryBook>) {
    if listing.items.is_empty() {
        println!("'{}' is empty", shelf);
        return;
    }

    match listing.total {
        Some(total) => println!("{} ({} of {})", shelf, listing.items.len(), total),
        None => println!("{} ({})", shelf, listing.items.len()),
    }

    for book in &listing.items {
        let title = book.title.as_deref().unwrap_or("Untitled");
        let mut line = format!("  {}", title);
        if let Some(author) = &book.author {
            line.push_str(&format!(" by {}", author));
        }
        if let Some(rating) = book.record.rating {
            line.push_str(&format!(" {}", "★".repeat(rating as usize)));
        }
        if book.record.owned {
            line.push_str(" (owned)");
        }
        println!("{} [{}]", line, book.record.volume_id);
    }

    if !listing.complete {
        println!("More books available; use --all to list them");
    }
}
