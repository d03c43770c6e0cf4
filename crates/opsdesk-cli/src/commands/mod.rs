//! Subcommand implementations.

mod account;
mod config;
mod create;
mod delete;
mod detect;
mod edit;
mod email;
mod get;
mod list;
mod login;
mod logout;
mod mute;
mod permissions;
mod recharge;
mod session;
mod stats;
mod status;

use anyhow::{Result, anyhow};
use clap::Subcommand;

use opsdesk_core::controller::FetchOutcome;
use opsdesk_core::resource::{Operation, ResourceId};
use opsdesk_core::{Feedback, ListController, Resource, ResourceClient};

use crate::output;
use crate::session::App;

/// Options shared by every command.
#[derive(Debug, Clone)]
pub struct Globals {
    pub api: String,
    pub json: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Log in and store the session token
    Login(login::LoginArgs),

    /// End the session
    Logout(logout::LogoutArgs),

    /// Display the stored session
    Session(session::SessionArgs),

    /// List one page of a resource
    List(list::ListArgs),

    /// Fetch a single record
    Get(get::GetArgs),

    /// Create a record
    Create(create::CreateArgs),

    /// Edit a record
    Edit(edit::EditArgs),

    /// Delete a record
    Delete(delete::DeleteArgs),

    /// Set a record's status
    Status(status::StatusArgs),

    /// Reset another admin's password
    ResetPassword(account::ResetPasswordArgs),

    /// Change your own password
    ChangePassword(account::ChangePasswordArgs),

    /// Show or assign role permissions
    Permissions(permissions::PermissionsArgs),

    /// Push game configuration to the game servers
    ConfigSync(config::ConfigSyncArgs),

    /// List game configuration categories for selection
    ConfigCategories(config::ConfigCategoriesArgs),

    /// Run text through the sensitive-word filter
    Detect(detect::DetectArgs),

    /// Rebuild the server's sensitive-word cache
    RefreshWords(detect::RefreshWordsArgs),

    /// Add sensitive words from a JSON file
    WordsImport(detect::ImportWordsArgs),

    /// Download the sensitive-word dictionary
    WordsExport(detect::ExportWordsArgs),

    /// Show sensitive-word dictionary and log counts
    WordStats(detect::WordStatsArgs),

    /// Lift several mutes at once
    Unmute(mute::UnmuteArgs),

    /// Show or clear the mute log
    MuteLogs(mute::MuteLogsArgs),

    /// Send a saved draft email
    EmailSend(email::EmailSendArgs),

    /// List items that can be attached to an email
    EmailGoods(email::EmailGoodsArgs),

    /// Charge a recharge package to a player
    Charge(recharge::ChargeArgs),

    /// Request a refund for a recharge order
    Refund(recharge::RefundArgs),

    /// Show player and sect totals and rankings
    Stats(stats::StatsArgs),
}

pub async fn handle(command: Command, globals: Globals) -> Result<()> {
    if let Command::Session(args) = command {
        return session::run(args, &globals);
    }

    let app = App::connect(&globals.api, globals.json)?;

    match command {
        Command::Login(args) => login::run(args, &app).await,
        Command::Logout(args) => logout::run(args, &app).await,
        Command::Session(_) => Ok(()),
        Command::List(args) => list::run(args, &app).await,
        Command::Get(args) => get::run(args, &app).await,
        Command::Create(args) => create::run(args, &app).await,
        Command::Edit(args) => edit::run(args, &app).await,
        Command::Delete(args) => delete::run(args, &app).await,
        Command::Status(args) => status::run(args, &app).await,
        Command::ResetPassword(args) => account::reset_password(args, &app).await,
        Command::ChangePassword(args) => account::change_password(args, &app).await,
        Command::Permissions(args) => permissions::run(args, &app).await,
        Command::ConfigSync(args) => config::sync(args, &app).await,
        Command::ConfigCategories(args) => config::categories(args, &app).await,
        Command::Detect(args) => detect::run(args, &app).await,
        Command::RefreshWords(args) => detect::refresh(args, &app).await,
        Command::WordsImport(args) => detect::import(args, &app).await,
        Command::WordsExport(args) => detect::export(args, &app).await,
        Command::WordStats(args) => detect::stats(args, &app).await,
        Command::Unmute(args) => mute::unmute(args, &app).await,
        Command::MuteLogs(args) => mute::logs(args, &app).await,
        Command::EmailSend(args) => email::send(args, &app).await,
        Command::EmailGoods(args) => email::goods(args, &app).await,
        Command::Charge(args) => recharge::charge(args, &app).await,
        Command::Refund(args) => recharge::refund(args, &app).await,
        Command::Stats(args) => stats::run(args, &app).await,
    }
}

/// Parse a `key=value` argument.
pub fn parse_key_value(s: &str) -> std::result::Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{}'", s))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("missing key in '{}'", s));
    }
    Ok((key.to_string(), value.to_string()))
}

/// Show a failure the way the dashboard would and turn it into an error.
pub fn report(feedback: Feedback) -> anyhow::Error {
    match feedback {
        Feedback::Inline(errors) => {
            output::field_errors(&errors);
            anyhow!("validation failed")
        }
        Feedback::PermissionDenied(message) => anyhow!("permission denied: {}", message),
        other => anyhow!(other.message()),
    }
}

/// Parse a record id typed on the command line.
pub fn parse_id<R: Resource>(raw: &str) -> Result<R::Id> {
    <R::Id as ResourceId>::parse(raw).map_err(|e| anyhow!(e.user_message()))
}

/// Find a record by id.
///
/// Uses the resource's detail endpoint when it has one, otherwise walks the
/// list pages until the record turns up.
pub async fn find_record<R: Resource>(app: &App, id: &R::Id) -> Result<R::Record> {
    if R::DESCRIPTOR.supports(Operation::Get) {
        return ResourceClient::<R>::get(&app.client, id)
            .await
            .map_err(|e| report(Feedback::from_error(&e, &R::DESCRIPTOR)));
    }

    let mut list = ListController::<R, _>::new(app.client.clone());
    let page_size = list.query().page_size();
    let mut page = 1;
    loop {
        if let FetchOutcome::Failed(feedback) = list.set_page(page, page_size).await {
            return Err(report(feedback));
        }
        if let Some(record) = list.find(id) {
            return Ok(record.clone());
        }
        let snapshot = list.snapshot();
        if snapshot.is_empty() || page >= snapshot.total_pages {
            return Err(anyhow!("{} {} not found", R::DESCRIPTOR.name, id));
        }
        page += 1;
    }
}
