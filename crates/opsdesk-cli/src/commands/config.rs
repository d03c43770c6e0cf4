//! Game configuration commands.

use anyhow::{Context, Result};
use clap::Args;

use crate::output;
use crate::session::App;

#[derive(Args, Debug)]
pub struct ConfigSyncArgs {}

pub async fn sync(_args: ConfigSyncArgs, app: &App) -> Result<()> {
    let receipt = app
        .client
        .sync_game_configs()
        .await
        .context("Failed to sync game configuration")?;

    if app.json {
        return output::json(&receipt);
    }

    output::success("Game configuration pushed");
    output::field("Synced at", &receipt.timestamp.to_local_string());
    Ok(())
}

#[derive(Args, Debug)]
pub struct ConfigCategoriesArgs {}

pub async fn categories(_args: ConfigCategoriesArgs, app: &App) -> Result<()> {
    let options = app
        .client
        .config_category_options()
        .await
        .context("Failed to load categories")?;

    if app.json {
        return output::json(&options);
    }

    for option in &options {
        let label = if option.display_name.is_empty() {
            &option.name
        } else {
            &option.display_name
        };
        output::field(&option.id.to_string(), label);
    }
    Ok(())
}
