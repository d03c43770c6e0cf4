//! Password commands.

use anyhow::{Context, Result};
use clap::Args;

use opsdesk_core::PasswordChange;

use crate::output;
use crate::session::App;

#[derive(Args, Debug)]
pub struct ResetPasswordArgs {
    /// Admin account id
    pub id: i64,

    /// The new password
    #[arg(long, env = "OPSDESK_NEW_PASSWORD", hide_env_values = true)]
    pub password: String,
}

pub async fn reset_password(args: ResetPasswordArgs, app: &App) -> Result<()> {
    app.client
        .reset_admin_password(args.id, &args.password)
        .await
        .context("Failed to reset password")?;

    output::success(&format!("Password reset for admin {}", args.id));
    Ok(())
}

#[derive(Args, Debug)]
pub struct ChangePasswordArgs {
    /// Your current password
    #[arg(long)]
    pub current: String,

    /// The new password
    #[arg(long)]
    pub new: String,

    /// The new password again
    #[arg(long)]
    pub confirm: String,
}

pub async fn change_password(args: ChangePasswordArgs, app: &App) -> Result<()> {
    let change = PasswordChange::new(args.current, args.new, args.confirm);

    app.client
        .change_password(&change)
        .await
        .context("Failed to change password")?;

    output::success("Password changed");
    Ok(())
}
