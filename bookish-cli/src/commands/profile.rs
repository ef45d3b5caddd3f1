//! Profile, reading activity and recommendations

use super::{print_summaries, spinner, Context};
use anyhow::{Context as _, Result};
use bookish_core::api::BookishApi;
use bookish_core::library::{self, ShelfCounts};
use bookish_core::text::format_compact;
use bookish_core::{DateRange, Shelf};

/// Reading statistics for the chosen range
pub async fn activity(ctx: &Context, range: DateRange, json: bool) -> Result<()> {
    let api = ctx.api()?;
    let session = ctx.session(&api).await?;

    let pb = spinner("Loading reading activity");
    let result = api.reading_activity(&session, range).await;
    pb.finish_and_clear();

    let activity = result.context("Failed to load reading activity")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&activity)?);
        return Ok(());
    }

    let heading = match range {
        DateRange::AllTime => "All time",
        DateRange::ThisYear => "This year",
    };
    println!("{}", heading);
    println!("Books read:    {}", activity.total_books);
    println!("Pages read:    {}", format_compact(activity.total_pages));
    if let Some(category) = &activity.top_category {
        println!("Top genre:     {}", category);
    }
    if let Some(author) = &activity.top_author {
        println!("Top author:    {}", author);
    }
    if !activity.recently_read.is_empty() {
        println!();
        println!("Recently read");
        print_summaries(&activity.recently_read);
    }
    Ok(())
}

/// Shelf counts and the current reads, looked up concurrently
pub async fn profile(ctx: &Context) -> Result<()> {
    let api = ctx.api()?;
    let catalog = ctx.catalog()?;
    let session = ctx.session(&api).await?;

    let pb = spinner("Loading profile");
    let user = match api.user(&session).await {
        Ok(user) => user,
        Err(e) => {
            pb.finish_and_clear();
            return Err(e).context("Failed to load user");
        }
    };
    let reading = library::currently_reading(&catalog, &user).await;
    pb.finish_and_clear();

    let counts = ShelfCounts::for_user(&user);
    println!("{} [{}]", user.full_name(), user.initials());
    println!("{:<19} {}", "Owned:", counts.owned);
    for shelf in Shelf::ALL {
        println!("{:<19} {}", format!("{}:", shelf), counts.on_shelf(shelf));
    }

    if !reading.is_empty() {
        println!();
        println!("Reading now");
        for book in &reading {
            match book.primary_author() {
                Some(author) => println!("  {} by {}", book.title, author),
                None => println!("  {}", book.title),
            }
        }
    }
    Ok(())
}

/// Backend recommendations for a genre
pub async fn recommend(ctx: &Context, genre: &str, json: bool) -> Result<()> {
    let api = ctx.api()?;
    let session = ctx.session(&api).await?;

    let pb = spinner(format!("Finding {} books", genre.trim()));
    let result = library::recommendations(&api, &session, genre).await;
    pb.finish_and_clear();

    let books = result.context("Failed to load recommendations")?;
    if json {
        println!("{}", serde_json::to_string_pretty(&books)?);
    } else if books.is_empty() {
        println!("No recommendations for {}", genre.trim());
    } else {
        print_summaries(&books);
    }
    Ok(())
}
