//! Session status command implementation.

use anyhow::{Context, Result};
use clap::Args;
use serde_json::json;

use crate::commands::Globals;
use crate::output;
use crate::session::storage;

#[derive(Args, Debug)]
pub struct SessionArgs {}

pub fn run(_args: SessionArgs, globals: &Globals) -> Result<()> {
    let stored = storage::load_session().context("Failed to load session")?;

    if globals.json {
        let status = match &stored {
            Some(s) => json!({"active": true, "username": s.username, "api": s.api}),
            None => json!({"active": false}),
        };
        return output::json(&status);
    }

    let Some(stored) = stored else {
        output::hint("No active session. Run 'opsdesk login' first.");
        return Ok(());
    };

    output::field("User", stored.username.as_deref().unwrap_or("unknown"));
    output::field("API", stored.api.as_deref().unwrap_or(&globals.api));
    Ok(())
}
