//! Catalog search commands

use super::{print_summaries, spinner, Context};
use anyhow::Result;
use bookish_core::catalog::genre::{genre_query, BROWSE_GENRES};
use bookish_core::text::format_thousands;
use bookish_core::{sanitize as sanitize_query, SearchPager, SearchResults};

/// Print the sanitized form of a query
pub fn sanitize(text: &str) -> Result<()> {
    println!("{}", sanitize_query(text));
    Ok(())
}

/// List browsable genres
pub fn genres() -> Result<()> {
    for genre in BROWSE_GENRES {
        println!("{}", genre);
    }
    Ok(())
}

/// Search the catalog, fetching up to `pages` pages
pub async fn search(ctx: &Context, query: &str, pages: usize, json: bool) -> Result<()> {
    let catalog = ctx.catalog()?;
    let mut pager = SearchPager::new(&catalog, query, ctx.config().page_size);

    if !pager.has_more() {
        tracing::debug!("Empty query, nothing to search");
    }

    let pb = spinner(format!("Searching for '{}'", query.trim()));
    for page in 1..=pages {
        if !pager.has_more() {
            break;
        }
        pb.set_message(format!("Fetching page {}", page));
        pager.fetch_more().await;
    }
    pb.finish_and_clear();

    print_results(&pager.into_results(), json)
}

/// Browse highly rated books in a genre
pub async fn genre(ctx: &Context, name: &str, pages: usize, json: bool) -> Result<()> {
    if !BROWSE_GENRES.iter().any(|g| g.eq_ignore_ascii_case(name.trim())) {
        tracing::info!("'{}' is not one of the listed genres, searching anyway", name);
    }
    search(ctx, &genre_query(name), pages, json).await
}

fn print_results(results: &SearchResults, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(results)?);
        return Ok(());
    }

    if results.items.is_empty() {
        println!("No results");
        return Ok(());
    }

    println!(
        "Showing {} of about {} results",
        results.items.len(),
        format_thousands(results.total_items)
    );
    print_summaries(&results.items);
    Ok(())
}
