//! Delete command implementation.

use std::io::{self, Write};

use anyhow::{Context, Result, bail};
use clap::Args;

use opsdesk_core::resource::Operation;
use opsdesk_core::{Reconcile, Resource, ResourcePage};

use crate::commands::{parse_id, report};
use crate::output;
use crate::resources::{ResourceKind, with_resource};
use crate::session::App;

#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Resource the record belongs to
    pub resource: ResourceKind,

    /// Record id
    pub id: String,

    /// Skip confirmation prompt
    #[arg(long, short = 'f')]
    pub force: bool,
}

pub async fn run(args: DeleteArgs, app: &App) -> Result<()> {
    with_resource!(args.resource, run_typed(&args, app))
}

async fn run_typed<R: Resource>(args: &DeleteArgs, app: &App) -> Result<()> {
    if !R::DESCRIPTOR.supports(Operation::Delete) {
        bail!("{} cannot be deleted", R::DESCRIPTOR.name);
    }

    let id = parse_id::<R>(&args.id)?;

    if !args.force {
        eprint!("Delete {} {}? [y/N] ", R::DESCRIPTOR.name, id);
        io::stderr().flush()?;

        let mut input = String::new();
        io::stdin().read_line(&mut input)?;

        if !input.trim().eq_ignore_ascii_case("y") {
            eprintln!("Aborted.");
            return Ok(());
        }
    }

    // Nothing is displayed, so the list is patched rather than refetched.
    let mut page = ResourcePage::<R, _>::new(app.client.clone(), Reconcile::Optimistic);
    page.delete(&id)
        .await
        .map_err(report)
        .context("Failed to delete record")?;

    output::success(&format!("Deleted {} {}", R::DESCRIPTOR.name, id));
    Ok(())
}
