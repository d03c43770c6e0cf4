//! Role permission commands.

use anyhow::{Context, Result, bail};
use clap::Args;
use colored::Colorize;

use opsdesk_core::resources::Permission;

use crate::output;
use crate::session::App;

#[derive(Args, Debug)]
pub struct PermissionsArgs {
    /// Show (or assign) the permissions of this role
    #[arg(long)]
    pub role: Option<i64>,

    /// Replace the role's permissions with these codes (comma-separated)
    #[arg(long, value_delimiter = ',', requires = "role")]
    pub assign: Option<Vec<String>>,
}

pub async fn run(args: PermissionsArgs, app: &App) -> Result<()> {
    match (args.role, args.assign) {
        (Some(role), Some(codes)) => {
            app.client
                .assign_permissions(role, &codes)
                .await
                .context("Failed to assign permissions")?;
            output::success(&format!(
                "Assigned {} permission(s) to role {}",
                codes.len(),
                role
            ));
            Ok(())
        }
        (Some(role), None) => {
            let permissions = app
                .client
                .role_permissions(role)
                .await
                .context("Failed to load role permissions")?;

            if app.json {
                return output::json(&permissions);
            }
            if permissions.is_empty() {
                output::hint("Role has no permissions.");
            }
            for permission in &permissions {
                print_permission(permission);
            }
            Ok(())
        }
        (None, None) => {
            let catalog = app
                .client
                .permissions()
                .await
                .context("Failed to load permissions")?;

            if app.json {
                return output::json(&catalog);
            }
            for (category, permissions) in &catalog.grouped {
                println!("{}", category.bold());
                for permission in permissions {
                    print!("  ");
                    print_permission(permission);
                }
            }
            Ok(())
        }
        (None, Some(_)) => bail!("--assign needs --role"),
    }
}

fn print_permission(permission: &Permission) {
    println!("{} {}", permission.code.cyan(), permission.name);
}
