//! Create command implementation.

use anyhow::{Context, Result, bail};
use clap::Args;

use opsdesk_core::resource::Operation;
use opsdesk_core::{FormController, Mutation, Resource};

use crate::commands::{parse_key_value, report};
use crate::output;
use crate::resources::{ResourceKind, with_resource};
use crate::session::App;

#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Resource to create a record in
    pub resource: ResourceKind,

    /// Field as KEY=VALUE; repeatable, applied after --data
    #[arg(long = "set", value_name = "KEY=VALUE", value_parser = parse_key_value)]
    pub fields: Vec<(String, String)>,

    /// Whole draft as a JSON object
    #[arg(long)]
    pub data: Option<String>,
}

pub async fn run(args: CreateArgs, app: &App) -> Result<()> {
    with_resource!(args.resource, run_typed(&args, app))
}

async fn run_typed<R: Resource>(args: &CreateArgs, app: &App) -> Result<()> {
    if !R::DESCRIPTOR.supports(Operation::Create) {
        bail!("{} cannot be created", R::DESCRIPTOR.name);
    }

    let mut form = FormController::<R>::new();
    form.open_create();

    if let Some(data) = &args.data {
        let draft: R::Draft = serde_json::from_str(data).context("Invalid --data JSON")?;
        if let Some(slot) = form.draft_mut() {
            *slot = draft;
        }
    }

    for (key, value) in &args.fields {
        form.set_field(key, value)
            .with_context(|| format!("Cannot set '{}'", key))?;
    }

    let mutation = form
        .submit(&app.client)
        .await
        .map_err(report)
        .context("Failed to create record")?;

    let Mutation::Created(record) = mutation else {
        bail!("unexpected result from create");
    };

    if app.json {
        return output::json(&record);
    }

    output::success(&format!("Created {} {}", R::DESCRIPTOR.name, R::id(&record)));
    output::json_pretty(&record)
}
