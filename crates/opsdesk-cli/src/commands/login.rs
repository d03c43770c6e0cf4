//! Login command implementation.

use anyhow::{Context, Result};
use clap::Args;

use opsdesk_core::Credentials;

use crate::output;
use crate::session::App;
use crate::session::storage::{self, StoredSession};

#[derive(Args, Debug)]
pub struct LoginArgs {
    /// Admin username
    #[arg(long, short = 'u')]
    pub username: String,

    /// Admin password
    #[arg(long, env = "OPSDESK_PASSWORD", hide_env_values = true)]
    pub password: String,
}

pub async fn run(args: LoginArgs, app: &App) -> Result<()> {
    let credentials = Credentials::new(&args.username, &args.password);

    output::hint("Logging in...");

    let login = app
        .client
        .login(&*app.session, &credentials)
        .await
        .context("Failed to login")?;

    let username = login
        .user
        .as_ref()
        .map(|user| user.username.clone())
        .filter(|name| !name.is_empty())
        .unwrap_or(args.username);

    storage::save_session(&StoredSession {
        token: login.token.as_str().to_string(),
        api: Some(app.client.api().as_str().to_string()),
        username: Some(username.clone()),
    })
    .context("Failed to save session")?;

    if app.json {
        return output::json(&login.user);
    }

    output::success("Logged in successfully");
    println!();
    output::field("User", &username);
    output::field("API", app.client.api().as_str());
    if let Some(user) = &login.user {
        if let Some(name) = &user.name {
            output::field("Name", name);
        }
        if user.is_super_admin {
            output::field("Role", "super admin");
        }
    }

    Ok(())
}
