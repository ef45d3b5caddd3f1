//! Account management for the logged-in user

use crate::api::BookishApi;
use crate::catalog::genre::canonical_fave_genre;
use crate::error::Result;
use crate::session::{Session, TokenStore};
use crate::types::{User, UserUpdate};
use crate::validation::validate_user_update;

/// Apply a partial profile update
pub async fn update_profile(
    api: &dyn BookishApi,
    session: &Session,
    update: &UserUpdate,
) -> Result<User> {
    validate_user_update(update)?;
    let user = api.update_user(session, update).await?;
    tracing::info!("Updated profile of {}", user.id);
    Ok(user)
}

pub async fn change_password(
    api: &dyn BookishApi,
    session: &Session,
    current: &str,
    new: &str,
) -> Result<()> {
    update_profile(api, session, &UserUpdate::password(current, new)).await?;
    Ok(())
}

/// Replace the favourite genres. Names are matched case-insensitively and
/// stored in their canonical spelling; duplicates are dropped.
pub async fn set_fave_genres(
    api: &dyn BookishApi,
    session: &Session,
    genres: &[String],
) -> Result<User> {
    let mut canonical: Vec<String> = Vec::with_capacity(genres.len());
    for genre in genres {
        let name = canonical_fave_genre(genre)
            .map(str::to_string)
            .unwrap_or_else(|| genre.trim().to_string());
        if !canonical.contains(&name) {
            canonical.push(name);
        }
    }
    update_profile(api, session, &UserUpdate::fave_genres(canonical)).await
}

/// Delete the account and forget its token
pub async fn delete_account(
    api: &dyn BookishApi,
    session: &Session,
    store: &dyn TokenStore,
) -> Result<()> {
    api.delete_user(session).await?;
    store.delete().await?;
    tracing::info!("Deleted account {}", session.user_id);
    Ok(())
}
