//! Logout command implementation.

use anyhow::Result;
use clap::Args;

use opsdesk_core::SessionStore;

use crate::output;
use crate::session::App;
use crate::session::storage;

#[derive(Args, Debug)]
pub struct LogoutArgs {}

pub async fn run(_args: LogoutArgs, app: &App) -> Result<()> {
    if !app.session.is_active() {
        storage::clear_session()?;
        output::hint("Not logged in.");
        return Ok(());
    }

    // The local session ends whatever the server says.
    let result = app.client.logout(&*app.session).await;
    storage::clear_session()?;

    if let Err(err) = result {
        output::notice(&format!("Server-side logout failed: {}", err.user_message()));
    }
    output::success("Logged out");
    Ok(())
}
