//! Login, signup and session commands

use super::{spinner, Context};
use anyhow::{Context as _, Result};
use bookish_core::api::BookishApi;
use bookish_core::{session, Credentials, Signup};

pub async fn signup(
    ctx: &Context,
    first_name: String,
    last_name: String,
    email: String,
    password: String,
) -> Result<()> {
    let api = ctx.api()?;
    let form = Signup {
        first_name,
        last_name,
        email,
        password,
    };

    let pb = spinner("Creating account");
    let result = session::signup(&api, &ctx.token_store(), &form).await;
    pb.finish_and_clear();

    let session = result.context("Signup failed")?;
    println!("Welcome! Logged in as {}", session.user_id);
    Ok(())
}

pub async fn login(ctx: &Context, email: String, password: String) -> Result<()> {
    let api = ctx.api()?;
    let credentials = Credentials { email, password };

    let pb = spinner("Logging in");
    let result = session::login(&api, &ctx.token_store(), &credentials).await;
    pb.finish_and_clear();

    let session = result.context("Login failed")?;
    println!("Logged in as {}", session.user_id);
    Ok(())
}

pub async fn logout(ctx: &Context) -> Result<()> {
    session::logout(&ctx.token_store())
        .await
        .context("Failed to remove stored token")?;
    println!("Logged out");
    Ok(())
}

/// Show the logged-in user
pub async fn whoami(ctx: &Context) -> Result<()> {
    let api = ctx.api()?;
    let session = ctx.session(&api).await?;
    let user = api.user(&session).await.context("Failed to load user")?;

    println!("{} ({})", user.full_name(), user.email);
    if let Some(joined) = user.joined {
        println!("Joined:  {}", joined.format("%B %Y"));
    }
    if !user.fave_genres.is_empty() {
        println!("Genres:  {}", user.fave_genres.join(", "));
    }
    Ok(())
}
