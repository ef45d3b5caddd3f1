//! Authentication token storage and session handling
//!
//! A single token is kept between runs. [`restore`] turns it back into a
//! [`Session`]; a token the backend no longer accepts is removed.

use crate::api::BookishApi;
use crate::error::{ApiError, Result, SessionError};
use crate::types::{Credentials, Signup};
use crate::validation::{validate_credentials, validate_signup};
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// Result type for token storage operations
pub type StoreResult<T> = std::result::Result<T, SessionError>;

/// An authenticated user: the token to send and the id it resolved to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub user_id: String,
}

impl Session {
    pub fn new(token: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            user_id: user_id.into(),
        }
    }
}

/// Persistent slot for the authentication token
#[async_trait]
pub trait TokenStore: Send + Sync {
    /// Load the stored token, if any
    async fn load(&self) -> StoreResult<Option<String>>;

    /// Replace the stored token
    async fn save(&self, token: &str) -> StoreResult<()>;

    /// Remove the stored token. Removing a missing token is not an error.
    async fn delete(&self) -> StoreResult<()>;
}

/// Token kept in a single file on disk
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl TokenStore for FileTokenStore {
    async fn load(&self) -> StoreResult<Option<String>> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => {
                let token = contents.trim();
                Ok((!token.is_empty()).then(|| token.to_string()))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn save(&self, token: &str) -> StoreResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        tokio::fs::write(&self.path, token).await?;
        tracing::debug!("Stored token at {}", self.path.display());
        Ok(())
    }

    async fn delete(&self) -> StoreResult<()> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-memory token store (for testing)
#[derive(Default)]
pub struct MemoryTokenStore {
    token: std::sync::RwLock<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that already holds `token`
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: std::sync::RwLock::new(Some(token.into())),
        }
    }
}

#[async_trait]
impl TokenStore for MemoryTokenStore {
    async fn load(&self) -> StoreResult<Option<String>> {
        let token = self
            .token
            .read()
            .map_err(|e| SessionError::Storage(e.to_string()))?;
        Ok(token.clone())
    }

    async fn save(&self, token: &str) -> StoreResult<()> {
        let mut slot = self
            .token
            .write()
            .map_err(|e| SessionError::Storage(e.to_string()))?;
        *slot = Some(token.to_string());
        Ok(())
    }

    async fn delete(&self) -> StoreResult<()> {
        let mut slot = self
            .token
            .write()
            .map_err(|e| SessionError::Storage(e.to_string()))?;
        *slot = None;
        Ok(())
    }
}

/// Resolve a freshly issued token into a session, then store it.
/// A token the backend does not verify is never stored.
async fn establish(api: &dyn BookishApi, store: &dyn TokenStore, token: String) -> Result<Session> {
    let user_id = api.verify_token(&token).await?;
    store.save(&token).await?;
    tracing::info!("Logged in as user {}", user_id);
    Ok(Session::new(token, user_id))
}

/// Log in with email and password
pub async fn login(
    api: &dyn BookishApi,
    store: &dyn TokenStore,
    credentials: &Credentials,
) -> Result<Session> {
    validate_credentials(credentials)?;
    let token = api.login(credentials).await?;
    establish(api, store, token).await
}

/// Create an account and log into it
pub async fn signup(
    api: &dyn BookishApi,
    store: &dyn TokenStore,
    signup: &Signup,
) -> Result<Session> {
    validate_signup(signup)?;
    let token = api.signup(signup).await?;
    establish(api, store, token).await
}

/// Resume the stored session.
///
/// Returns `Ok(None)` when no token is stored, or when the backend rejects
/// the stored one; a rejected token is deleted. Transport failures are
/// returned as errors and leave the token in place.
pub async fn restore(api: &dyn BookishApi, store: &dyn TokenStore) -> Result<Option<Session>> {
    let Some(token) = store.load().await? else {
        return Ok(None);
    };

    match api.verify_token(&token).await {
        Ok(user_id) => Ok(Some(Session::new(token, user_id))),
        Err(ApiError::Status { status, message }) => {
            tracing::warn!("Stored token rejected ({}): {}", status, message);
            store.delete().await?;
            Ok(None)
        }
        Err(e) => Err(e.into()),
    }
}

/// Like [`restore`], but a missing session is an error
pub async fn require(api: &dyn BookishApi, store: &dyn TokenStore) -> Result<Session> {
    restore(api, store)
        .await?
        .ok_or_else(|| SessionError::NotLoggedIn.into())
}

/// Forget the stored token
pub async fn logout(store: &dyn TokenStore) -> Result<()> {
    store.delete().await?;
    tracing::info!("Logged out");
    Ok(())
}
