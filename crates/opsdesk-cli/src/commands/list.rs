//! List command implementation.

use anyhow::{Context, Result};
use clap::Args;

use opsdesk_core::controller::FetchOutcome;
use opsdesk_core::{ListController, Resource};

use crate::commands::{parse_key_value, report};
use crate::output;
use crate::resources::{ResourceKind, with_resource};
use crate::session::App;

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Resource to list
    pub resource: ResourceKind,

    /// Page number, starting at 1
    #[arg(long, default_value_t = 1)]
    pub page: u32,

    /// Records per page (defaults to the resource's page size)
    #[arg(long)]
    pub page_size: Option<u32>,

    /// Filter as KEY=VALUE; repeatable
    #[arg(long = "filter", value_name = "KEY=VALUE", value_parser = parse_key_value)]
    pub filters: Vec<(String, String)>,
}

pub async fn run(args: ListArgs, app: &App) -> Result<()> {
    with_resource!(args.resource, run_typed(&args, app))
}

async fn run_typed<R: Resource>(args: &ListArgs, app: &App) -> Result<()> {
    let mut list = ListController::<R, _>::new(app.client.clone());

    for (key, value) in &args.filters {
        list.set_filter(key, value)
            .with_context(|| format!("Invalid filter '{}={}'", key, value))?;
    }

    let page_size = args.page_size.unwrap_or(list.query().page_size());
    if let FetchOutcome::Failed(feedback) = list.set_page(args.page, page_size).await {
        return Err(report(feedback)).context("Failed to list records");
    }

    let snapshot = list.snapshot();
    if app.json {
        return output::json(snapshot);
    }

    if snapshot.is_empty() {
        output::hint("No records found.");
        return Ok(());
    }

    for record in &snapshot.items {
        output::json(record)?;
    }

    output::hint(&format!(
        "Page {} of {}, {} total",
        snapshot.page, snapshot.total_pages, snapshot.total
    ));
    Ok(())
}
