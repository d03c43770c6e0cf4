//! Get command implementation.

use anyhow::Result;
use clap::Args;

use opsdesk_core::Resource;

use crate::commands::{find_record, parse_id};
use crate::output;
use crate::resources::{ResourceKind, with_resource};
use crate::session::App;

#[derive(Args, Debug)]
pub struct GetArgs {
    /// Resource the record belongs to
    pub resource: ResourceKind,

    /// Record id
    pub id: String,
}

pub async fn run(args: GetArgs, app: &App) -> Result<()> {
    with_resource!(args.resource, run_typed(&args, app))
}

async fn run_typed<R: Resource>(args: &GetArgs, app: &App) -> Result<()> {
    let id = parse_id::<R>(&args.id)?;
    let record = find_record::<R>(app, &id).await?;

    if app.json {
        output::json(&record)
    } else {
        output::json_pretty(&record)
    }
}
