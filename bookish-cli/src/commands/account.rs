//! Account management commands

use super::Context;
use anyhow::{bail, Context as _, Result};
use bookish_core::{account, UserUpdate};

pub async fn account_update(
    ctx: &Context,
    first_name: Option<String>,
    last_name: Option<String>,
    email: Option<String>,
    genres: Option<Vec<String>>,
) -> Result<()> {
    let api = ctx.api()?;
    let session = ctx.session(&api).await?;

    let update = UserUpdate {
        first_name,
        last_name,
        email,
        ..UserUpdate::default()
    };

    let mut user = None;
    if !update.is_empty() {
        user = Some(
            account::update_profile(&api, &session, &update)
                .await
                .context("Failed to update profile")?,
        );
    }
    if let Some(genres) = genres {
        user = Some(
            account::set_fave_genres(&api, &session, &genres)
                .await
                .context("Failed to update favourite genres")?,
        );
    }

    match user {
        Some(user) => {
            println!("Updated {} ({})", user.full_name(), user.email);
            if !user.fave_genres.is_empty() {
                println!("Genres: {}", user.fave_genres.join(", "));
            }
            Ok(())
        }
        None => bail!("Nothing to update; pass --first-name, --last-name, --email or --genres"),
    }
}

pub async fn account_password(ctx: &Context, current: &str, new: &str) -> Result<()> {
    let api = ctx.api()?;
    let session = ctx.session(&api).await?;
    account::change_password(&api, &session, current, new)
        .await
        .context("Failed to change password")?;
    println!("Password changed");
    Ok(())
}

pub async fn account_delete(ctx: &Context, yes: bool) -> Result<()> {
    if !yes {
        bail!("Refusing to delete the account without --yes");
    }
    let api = ctx.api()?;
    let session = ctx.session(&api).await?;
    account::delete_account(&api, &session, &ctx.token_store())
        .await
        .context("Failed to delete account")?;
    println!("Account deleted");
    Ok(())
}
