//! Mute commands beyond the generic list/create/delete.

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use colored::Colorize;

use opsdesk_core::resources::MuteLogKind;

use crate::output;
use crate::session::App;

#[derive(Args, Debug)]
pub struct UnmuteArgs {
    /// Player ids to unmute
    #[arg(required = true)]
    pub user_ids: Vec<String>,
}

pub async fn unmute(args: UnmuteArgs, app: &App) -> Result<()> {
    let report = app
        .client
        .batch_unmute(&args.user_ids)
        .await
        .context("Failed to unmute")?;

    if app.json {
        return output::json(&report);
    }

    for result in &report.results {
        if result.success {
            output::success(&format!("Unmuted {}", result.user_id));
        } else {
            output::notice(&format!(
                "{} {}",
                result.user_id,
                result.message.as_deref().unwrap_or("was not unmuted")
            ));
        }
    }
    output::hint(&format!("{} of {} unmuted", report.success_count, report.total));
    Ok(())
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogKind {
    Mute,
    Unmute,
    All,
}

impl From<LogKind> for MuteLogKind {
    fn from(kind: LogKind) -> Self {
        match kind {
            LogKind::Mute => MuteLogKind::Mute,
            LogKind::Unmute => MuteLogKind::Unmute,
            LogKind::All => MuteLogKind::All,
        }
    }
}

#[derive(Args, Debug)]
pub struct MuteLogsArgs {
    /// Which entries to show or clear
    #[arg(long = "type", value_enum, default_value_t = LogKind::All)]
    pub kind: LogKind,

    /// Most recent entries to show
    #[arg(long, default_value_t = 100)]
    pub limit: u32,

    /// Delete the selected entries instead of showing them
    #[arg(long)]
    pub clear: bool,
}

pub async fn logs(args: MuteLogsArgs, app: &App) -> Result<()> {
    let kind = MuteLogKind::from(args.kind);

    if args.clear {
        let deleted = app
            .client
            .clear_mute_logs(kind)
            .await
            .context("Failed to clear mute logs")?;
        output::success(&format!("Removed {} {} log entries", deleted, kind));
        return Ok(());
    }

    let log = app
        .client
        .mute_logs(kind, args.limit)
        .await
        .context("Failed to load mute logs")?;

    if app.json {
        return output::json(&log);
    }

    if log.list.is_empty() {
        output::hint("No log entries.");
        return Ok(());
    }

    for entry in &log.list {
        println!(
            "{} {} {} {}",
            entry.timestamp.dimmed(),
            entry.user_id.bold(),
            entry.duration.as_deref().unwrap_or("-"),
            entry.reason.as_deref().unwrap_or("").dimmed(),
        );
    }
    output::hint(&format!("{} total", log.total));
    Ok(())
}
