//! Email commands beyond the generic list/create/delete.

use anyhow::{Context, Result};
use clap::Args;

use crate::output;
use crate::session::App;

#[derive(Args, Debug)]
pub struct EmailSendArgs {
    /// Id of a saved draft
    pub id: i64,
}

pub async fn send(args: EmailSendArgs, app: &App) -> Result<()> {
    app.client
        .send_email(args.id)
        .await
        .context("Failed to send email")?;

    output::success(&format!("Sent email {}", args.id));
    Ok(())
}

#[derive(Args, Debug)]
pub struct EmailGoodsArgs {}

pub async fn goods(_args: EmailGoodsArgs, app: &App) -> Result<()> {
    let goods = app
        .client
        .email_goods()
        .await
        .context("Failed to load attachable items")?;

    if app.json {
        return output::json(&goods);
    }

    for good in &goods {
        output::field(&format!("{}:{}", good.category, good.item_id), &good.name);
    }
    output::hint(r#"Attach with goodsList=[{"itemId":..,"category":..,"quantity":..,"name":..}]"#);
    Ok(())
}
