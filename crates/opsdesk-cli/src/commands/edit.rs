//! Edit command implementation.

use anyhow::{Context, Result, bail};
use clap::Args;

use opsdesk_core::resource::Operation;
use opsdesk_core::{FormController, Mutation, Resource};

use crate::commands::{find_record, parse_id, parse_key_value, report};
use crate::output;
use crate::resources::{ResourceKind, with_resource};
use crate::session::App;

#[derive(Args, Debug)]
pub struct EditArgs {
    /// Resource the record belongs to
    pub resource: ResourceKind,

    /// Record id
    pub id: String,

    /// Field as KEY=VALUE; repeatable
    #[arg(long = "set", value_name = "KEY=VALUE", value_parser = parse_key_value, required = true)]
    pub fields: Vec<(String, String)>,
}

pub async fn run(args: EditArgs, app: &App) -> Result<()> {
    with_resource!(args.resource, run_typed(&args, app))
}

async fn run_typed<R: Resource>(args: &EditArgs, app: &App) -> Result<()> {
    if !R::DESCRIPTOR.supports(Operation::Update) {
        bail!("{} cannot be edited", R::DESCRIPTOR.name);
    }

    let id = parse_id::<R>(&args.id)?;
    let mut record = find_record::<R>(app, &id).await?;

    let mut form = FormController::<R>::new();
    form.open_edit(&record);
    for (key, value) in &args.fields {
        form.set_field(key, value)
            .with_context(|| format!("Cannot set '{}'", key))?;
    }

    let mutation = form
        .submit(&app.client)
        .await
        .map_err(report)
        .context("Failed to update record")?;

    // Show the server's copy when it echoes one, else the local merge.
    if let Mutation::Updated {
        draft,
        record: echoed,
        ..
    } = mutation
    {
        match echoed {
            Some(echoed) => record = echoed,
            None => R::apply_draft(&mut record, &draft),
        }
    }

    if app.json {
        return output::json(&record);
    }

    output::success(&format!("Updated {} {}", R::DESCRIPTOR.name, id));
    output::json_pretty(&record)
}
