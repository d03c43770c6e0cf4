//! Status toggle command implementation.

use anyhow::{Context, Result, anyhow, bail};
use clap::Args;
use serde_json::Value;

use opsdesk_core::resource::Operation;
use opsdesk_core::{Reconcile, Resource, ResourcePage};

use crate::commands::{parse_id, report};
use crate::output;
use crate::resources::{ResourceKind, with_resource};
use crate::session::App;

#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Resource the record belongs to
    pub resource: ResourceKind,

    /// Record id
    pub id: String,

    /// New status as the API spells it (for example 0 or 1)
    pub value: String,
}

pub async fn run(args: StatusArgs, app: &App) -> Result<()> {
    with_resource!(args.resource, run_typed(&args, app))
}

/// Read a status value as JSON first, then as a bare string.
fn parse_status<R: Resource>(raw: &str) -> Result<R::Status> {
    serde_json::from_str(raw)
        .or_else(|_| serde_json::from_value(Value::String(raw.to_string())))
        .map_err(|_| anyhow!("invalid status '{}' for {}", raw, R::DESCRIPTOR.name))
}

async fn run_typed<R: Resource>(args: &StatusArgs, app: &App) -> Result<()> {
    if !R::DESCRIPTOR.supports(Operation::SetStatus) {
        bail!("{} has no status toggle", R::DESCRIPTOR.name);
    }

    let id = parse_id::<R>(&args.id)?;
    let status = parse_status::<R>(&args.value)?;

    let mut page = ResourcePage::<R, _>::new(app.client.clone(), Reconcile::Optimistic);
    page.set_status(&id, status)
        .await
        .map_err(report)
        .context("Failed to set status")?;

    output::success(&format!(
        "Set {} {} status to {}",
        R::DESCRIPTOR.name,
        id,
        args.value
    ));
    Ok(())
}
