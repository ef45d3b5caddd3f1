//! Runtime configuration read from `BOOKISH_*` environment variables

use crate::error::ConfigError;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

pub const DEFAULT_API_URL: &str = "http://localhost:8080/api";
pub const DEFAULT_CATALOG_URL: &str = "https://www.googleapis.com/books/v1";
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Google Books refuses `maxResults` above 40
pub const MAX_PAGE_SIZE: u32 = 40;

const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Client configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the Bookish backend
    pub api_url: Url,

    /// Base URL of the book catalog (Google Books `v1`)
    pub catalog_url: Url,

    /// Results requested per catalog page
    pub page_size: u32,

    /// Where the authentication token is stored
    pub token_path: PathBuf,

    /// Per-request timeout
    pub timeout: Duration,
}

impl Config {
    /// Build a configuration from the environment, falling back to defaults
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a configuration from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_url = parse_url(
            "BOOKISH_API_URL",
            lookup("BOOKISH_API_URL").as_deref().unwrap_or(DEFAULT_API_URL),
        )?;
        let catalog_url = parse_url(
            "BOOKISH_CATALOG_URL",
            lookup("BOOKISH_CATALOG_URL")
                .as_deref()
                .unwrap_or(DEFAULT_CATALOG_URL),
        )?;

        let page_size = match lookup("BOOKISH_PAGE_SIZE") {
            Some(value) => parse_number::<u32>("BOOKISH_PAGE_SIZE", &value)?,
            None => DEFAULT_PAGE_SIZE,
        };

        let timeout_secs = match lookup("BOOKISH_TIMEOUT_SECS") {
            Some(value) => parse_number::<u64>("BOOKISH_TIMEOUT_SECS", &value)?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        let token_path = match lookup("BOOKISH_TOKEN_PATH") {
            Some(path) => PathBuf::from(path),
            None => default_token_path()?,
        };

        Ok(Self {
            api_url,
            catalog_url,
            page_size: clamp_page_size(page_size),
            token_path,
            timeout: Duration::from_secs(timeout_secs),
        })
    }

    /// Override the backend URL
    pub fn with_api_url(mut self, url: &str) -> Result<Self, ConfigError> {
        self.api_url = parse_url("--api-url", url)?;
        Ok(self)
    }

    /// Override the catalog URL
    pub fn with_catalog_url(mut self, url: &str) -> Result<Self, ConfigError> {
        self.catalog_url = parse_url("--catalog-url", url)?;
        Ok(self)
    }
}

/// Keep page sizes within what the catalog accepts
pub fn clamp_page_size(size: u32) -> u32 {
    size.clamp(1, MAX_PAGE_SIZE)
}

fn default_token_path() -> Result<PathBuf, ConfigError> {
    directories::ProjectDirs::from("", "", "bookish")
        .map(|dirs| dirs.data_dir().join("token"))
        .ok_or(ConfigError::NoDataDir)
}

/// Parse a base URL. A trailing slash is forced so that `Url::join` appends
/// instead of replacing the last path segment.
pub(crate) fn parse_url(var: &'static str, value: &str) -> Result<Url, ConfigError> {
    let mut value = value.trim().to_string();
    if !value.ends_with('/') {
        value.push('/');
    }
    let url = Url::parse(&value).map_err(|e| ConfigError::InvalidUrl {
        var,
        reason: e.to_string(),
    })?;
    if url.cannot_be_a_base() {
        return Err(ConfigError::InvalidUrl {
            var,
            reason: "not a base URL".to_string(),
        });
    }
    Ok(url)
}

fn parse_number<T: std::str::FromStr>(var: &'static str, value: &str) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidNumber {
            var,
            value: value.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config =
            Config::from_lookup(lookup_from(&[("BOOKISH_TOKEN_PATH", "/tmp/token")])).unwrap();
        assert_eq!(config.api_url.as_str(), "http://localhost:8080/api/");
        assert_eq!(
            config.catalog_url.as_str(),
            "https://www.googleapis.com/books/v1/"
        );
        assert_eq!(config.page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert_eq!(config.token_path, PathBuf::from("/tmp/token"));
    }

    #[test]
    fn test_page_size_is_clamped() {
        let config = Config::from_lookup(lookup_from(&[
            ("BOOKISH_TOKEN_PATH", "/tmp/token"),
            ("BOOKISH_PAGE_SIZE", "100"),
        ]))
        .unwrap();
        assert_eq!(config.page_size, MAX_PAGE_SIZE);
        assert_eq!(clamp_page_size(0), 1);
    }

    #[test]
    fn test_invalid_values() {
        let err = Config::from_lookup(lookup_from(&[
            ("BOOKISH_TOKEN_PATH", "/tmp/token"),
            ("BOOKISH_PAGE_SIZE", "twenty"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidNumber { .. }));

        let err = Config::from_lookup(lookup_from(&[
            ("BOOKISH_TOKEN_PATH", "/tmp/token"),
            ("BOOKISH_API_URL", "not a url"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidUrl { .. }));
    }

    #[test]
    fn test_url_overrides() {
        let config = Config::from_lookup(lookup_from(&[("BOOKISH_TOKEN_PATH", "/tmp/token")]))
            .unwrap()
            .with_api_url("http://127.0.0.1:9999")
            .unwrap();
        assert_eq!(config.api_url.as_str(), "http://127.0.0.1:9999/");
    }
}
