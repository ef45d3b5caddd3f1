//! Error types for Bookish Core

use thiserror::Error;

/// Result type alias using BookishError
pub type Result<T> = std::result::Result<T, BookishError>;

/// Top-level error type for all Bookish operations
#[derive(Debug, Error)]
pub enum BookishError {
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("API error: {0}")]
    Api(#[from] ApiError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Errors from the external book catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Catalog returned status {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Catalog quota exhausted")]
    QuotaExhausted,

    #[error("Volume not found: {0}")]
    NotFound(String),

    #[error("Malformed catalog response: {0}")]
    Malformed(String),
}

/// Errors from the Bookish backend
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Backend returned status {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Malformed backend response: {0}")]
    Malformed(String),

    #[error("Invalid endpoint: {0}")]
    InvalidUrl(String),
}

impl ApiError {
    /// HTTP status code, when the backend answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

/// A rejected form or shelf change. Names the offending field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {reason}")]
pub struct ValidationError {
    pub field: &'static str,
    pub reason: String,
}

impl ValidationError {
    pub fn new(field: &'static str, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }
}

/// Errors around the stored authentication token
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Not logged in")]
    NotLoggedIn,

    #[error("Token rejected by the backend")]
    InvalidToken,

    #[error("Token storage error: {0}")]
    Storage(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors while reading configuration from the environment
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid URL in {var}: {reason}")]
    InvalidUrl { var: &'static str, reason: String },

    #[error("Invalid number in {var}: {value}")]
    InvalidNumber { var: &'static str, value: String },

    #[error("No data directory available; set BOOKISH_TOKEN_PATH")]
    NoDataDir,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_display() {
        let err = ValidationError::new("rating", "must be between 1 and 5");
        assert_eq!(err.to_string(), "rating: must be between 1 and 5");

        let top: BookishError = err.into();
        assert_eq!(
            top.to_string(),
            "Validation error: rating: must be between 1 and 5"
        );
    }

    #[test]
    fn test_api_error_status() {
        let err = ApiError::Status {
            status: 404,
            message: "Book not found".to_string(),
        };
        assert_eq!(err.status(), Some(404));
        assert!(err.is_not_found());
        assert!(!ApiError::Malformed("x".into()).is_not_found());
    }
}
