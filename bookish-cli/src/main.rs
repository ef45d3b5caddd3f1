//! Bookish CLI - Command-line interface for tracking books

mod commands;

use anyhow::Result;
use bookish_core::{DateRange, Shelf};
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use clap::{Args, Parser, Subcommand};
use commands::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Parse and validate a page count (must be at least 1)
fn parse_pages(s: &str) -> Result<usize, String> {
    let n: usize = s.parse().map_err(|_| format!("'{}' is not a valid number", s))?;
    if n < 1 {
        Err("pages must be at least 1".to_string())
    } else {
        Ok(n)
    }
}

/// Parse a `YYYY-MM-DD` date as midnight UTC
fn parse_date(s: &str) -> Result<DateTime<Utc>, String> {
    let date = NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| format!("'{}' is not a date (expected YYYY-MM-DD)", s))?;
    let midnight = date
        .and_hms_opt(0, 0, 0)
        .ok_or_else(|| format!("'{}' is not a valid date", s))?;
    Ok(Utc.from_utc_datetime(&midnight))
}

#[derive(Parser)]
#[command(name = "bookish")]
#[command(
    author,
    version,
    about = "Track the books you read, want to read and own",
    long_about = None
)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Bookish backend URL (overrides BOOKISH_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Book catalog URL (overrides BOOKISH_CATALOG_URL)
    #[arg(long, global = true)]
    catalog_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

/// Shelf and metadata changes shared by `add` and `update`
#[derive(Args, Debug, Default)]
pub struct BookChanges {
    /// Shelf: want, reading or read
    #[arg(short, long)]
    shelf: Option<Shelf>,

    /// Mark the book as owned
    #[arg(long)]
    owned: bool,

    /// Rating from 1 to 5 (read books only)
    #[arg(short, long)]
    rating: Option<u8>,

    /// Review text (read books only)
    #[arg(long)]
    review: Option<String>,

    /// Date finished, YYYY-MM-DD (read books only)
    #[arg(long, value_parser = parse_date)]
    date_read: Option<DateTime<Utc>>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a query the way it is sent to the catalog
    Sanitize {
        /// Free text
        text: Vec<String>,
    },

    /// Search the book catalog
    Search {
        /// Search terms
        query: Vec<String>,

        /// Number of result pages to fetch
        #[arg(short, long, default_value = "1", value_parser = parse_pages)]
        pages: usize,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List genres available for browsing
    Genres,

    /// Browse highly rated books in a genre
    Genre {
        /// Genre name, e.g. "Sci-Fi"
        name: String,

        /// Number of result pages to fetch
        #[arg(short, long, default_value = "1", value_parser = parse_pages)]
        pages: usize,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show catalog details for a book
    Book {
        /// Catalog volume id
        volume_id: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Create an account and log in
    Signup {
        #[arg(long)]
        first_name: String,

        #[arg(long)]
        last_name: String,

        #[arg(long)]
        email: String,

        #[arg(long)]
        password: String,
    },

    /// Log in and store the session token
    Login {
        #[arg(long)]
        email: String,

        #[arg(long)]
        password: String,
    },

    /// Forget the stored session token
    Logout,

    /// Show the logged-in user
    Whoami,

    /// List the books on a shelf
    Shelf {
        /// Shelf: want, reading or read
        shelf: Shelf,

        /// Fetch every page instead of only the first
        #[arg(long)]
        all: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Add a book to your library
    Add {
        /// Catalog volume id
        volume_id: String,

        #[command(flatten)]
        changes: BookChanges,
    },

    /// Change a book in your library
    Update {
        /// Catalog volume id
        volume_id: String,

        #[command(flatten)]
        changes: BookChanges,

        /// Mark the book as not owned
        #[arg(long, conflicts_with = "owned")]
        not_owned: bool,
    },

    /// Remove a book from your library
    Remove {
        /// Catalog volume id
        volume_id: String,
    },

    /// Show public reviews of a book
    Reviews {
        /// Catalog volume id
        volume_id: String,

        /// Fetch every page instead of only the first
        #[arg(long)]
        all: bool,
    },

    /// Show reading statistics
    Activity {
        /// all-time or this-year
        #[arg(long, default_value = "all-time")]
        range: DateRange,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show shelf counts and what you are reading now
    Profile,

    /// Recommended books in a genre
    Recommend {
        /// Genre name
        genre: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Manage your account
    Account {
        #[command(subcommand)]
        command: AccountCommands,
    },
}

#[derive(Subcommand)]
enum AccountCommands {
    /// Update name, email or favourite genres
    Update {
        #[arg(long)]
        first_name: Option<String>,

        #[arg(long)]
        last_name: Option<String>,

        #[arg(long)]
        email: Option<String>,

        /// Comma-separated favourite genres
        #[arg(long, value_delimiter = ',')]
        genres: Option<Vec<String>>,
    },

    /// Change your password
    Password {
        #[arg(long)]
        current: String,

        #[arg(long)]
        new: String,
    },

    /// Delete your account
    Delete {
        /// Confirm deletion
        #[arg(long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose {
        "bookish_cli=debug,bookish_core=debug"
    } else {
        "bookish_cli=info"
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(filter))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Commands that need neither configuration nor network
    match &cli.command {
        Commands::Sanitize { text } => return commands::sanitize(&text.join(" ")),
        Commands::Genres => return commands::genres(),
        _ => {}
    }

    let ctx = Context::new(cli.api_url.as_deref(), cli.catalog_url.as_deref())?;

    match cli.command {
        Commands::Sanitize { .. } | Commands::Genres => Ok(()),

        Commands::Search { query, pages, json } => {
            commands::search(&ctx, &query.join(" "), pages, json).await
        }

        Commands::Genre { name, pages, json } => commands::genre(&ctx, &name, pages, json).await,

        Commands::Book { volume_id, json } => commands::book(&ctx, &volume_id, json).await,

        Commands::Signup {
            first_name,
            last_name,
            email,
            password,
        } => commands::signup(&ctx, first_name, last_name, email, password).await,

        Commands::Login { email, password } => commands::login(&ctx, email, password).await,

        Commands::Logout => commands::logout(&ctx).await,

        Commands::Whoami => commands::whoami(&ctx).await,

        Commands::Shelf { shelf, all, json } => commands::shelf(&ctx, shelf, all, json).await,

        Commands::Add { volume_id, changes } => commands::add(&ctx, &volume_id, &changes).await,

        Commands::Update {
            volume_id,
            changes,
            not_owned,
        } => commands::update(&ctx, &volume_id, &changes, not_owned).await,

        Commands::Remove { volume_id } => commands::remove(&ctx, &volume_id).await,

        Commands::Reviews { volume_id, all } => commands::reviews(&ctx, &volume_id, all).await,

        Commands::Activity { range, json } => commands::activity(&ctx, range, json).await,

        Commands::Profile => commands::profile(&ctx).await,

        Commands::Recommend { genre, json } => commands::recommend(&ctx, &genre, json).await,

        Commands::Account { command } => match command {
            AccountCommands::Update {
                first_name,
                last_name,
                email,
                genres,
            } => commands::account_update(&ctx, first_name, last_name, email, genres).await,

            AccountCommands::Password { current, new } => {
                commands::account_password(&ctx, &current, &new).await
            }

            AccountCommands::Delete { yes } => commands::account_delete(&ctx, yes).await,
        },
    }
}
