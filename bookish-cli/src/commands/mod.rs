//! CLI command implementations

mod account;
mod auth;
mod book;
mod profile;
mod search;
mod shelf;

pub use account::{account_delete, account_password, account_update};
pub use auth::{login, logout, signup, whoami};
pub use book::{add, book, remove, reviews, update};
pub use profile::{activity, profile, recommend};
pub use search::{genre, genres, sanitize, search};
pub use shelf::shelf;

use anyhow::{Context as _, Result};
use bookish_core::api::BookishApi;
use bookish_core::{
    session, BookSummary, Config, FileTokenStore, GoogleBooks, HttpBookishApi, Session,
};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Configuration plus the clients built from it
pub struct Context {
    config: Config,
}

impl Context {
    pub fn new(api_url: Option<&str>, catalog_url: Option<&str>) -> Result<Self> {
        let mut config = Config::from_env().context("Failed to read configuration")?;
        if let Some(url) = api_url {
            config = config.with_api_url(url)?;
        }
        if let Some(url) = catalog_url {
            config = config.with_catalog_url(url)?;
        }
        tracing::debug!("Using backend {} and catalog {}", config.api_url, config.catalog_url);
        Ok(Self { config })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn catalog(&self) -> Result<GoogleBooks> {
        GoogleBooks::new(&self.config).context("Failed to create catalog client")
    }

    pub fn api(&self) -> Result<HttpBookishApi> {
        HttpBookishApi::new(&self.config).context("Failed to create backend client")
    }

    pub fn token_store(&self) -> FileTokenStore {
        FileTokenStore::new(&self.config.token_path)
    }

    /// The stored session, or an error telling the user to log in
    pub async fn session(&self, api: &dyn BookishApi) -> Result<Session> {
        session::require(api, &self.token_store())
            .await
            .context("Not logged in; run `bookish login` first")
    }
}

/// Spinner shown on stderr while waiting for the network
pub(crate) fn spinner(message: impl Into<String>) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(message.into());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// One line per book: `title by author (rating) [volumeId]`
pub(crate) fn print_summaries(books: &[BookSummary]) {
    for (i, book) in books.iter().enumerate() {
        let mut line = format!("{:>3}. {}", i + 1, book.title);
        if let Some(author) = &book.author {
            line.push_str(&format!(" by {}", author));
        }
        if let Some(rating) = book.average_rating {
            line.push_str(&format!(" ({:.1}★)", rating));
        }
        println!("{} [{}]", line, book.volume_id);
    }
}
