//! Sensitive-word commands.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use opsdesk_core::resources::SensitiveWordDraft;

use crate::output;
use crate::session::App;

#[derive(Args, Debug)]
pub struct DetectArgs {
    /// Text to check
    pub text: String,
}

pub async fn run(args: DetectArgs, app: &App) -> Result<()> {
    let report = app
        .client
        .detect_sensitive_words(&args.text)
        .await
        .context("Failed to run detection")?;

    if app.json {
        return output::json(&report);
    }

    let detection = &report.detection;
    if !detection.has_sensitive_word {
        output::success("No sensitive words found");
        return Ok(());
    }

    for word in &detection.matched_words {
        println!(
            "{} {} level {} {}",
            word.word.red(),
            format!("{:?}", word.word_type).to_lowercase().dimmed(),
            u8::from(word.level),
            word.action.to_string().dimmed(),
        );
    }
    output::field("Filtered", &report.filter_result.filtered_text);
    if detection.should_reject {
        output::notice("This text would be rejected");
    }
    Ok(())
}

#[derive(Args, Debug)]
pub struct RefreshWordsArgs {}

pub async fn refresh(_args: RefreshWordsArgs, app: &App) -> Result<()> {
    app.client
        .refresh_sensitive_word_cache()
        .await
        .context("Failed to refresh the word cache")?;

    output::success("Sensitive-word cache refreshed");
    Ok(())
}

#[derive(Args, Debug)]
pub struct ImportWordsArgs {
    /// JSON file holding an array of word drafts
    pub file: PathBuf,
}

/// Read word drafts from a JSON array.
fn read_drafts(json: &str) -> Result<Vec<SensitiveWordDraft>> {
    serde_json::from_str(json).context("Expected a JSON array of words")
}

pub async fn import(args: ImportWordsArgs, app: &App) -> Result<()> {
    let json = std::fs::read_to_string(&args.file)
        .with_context(|| format!("Failed to read {}", args.file.display()))?;
    let words = read_drafts(&json)?;

    let report = app
        .client
        .import_sensitive_words(&words)
        .await
        .context("Failed to import words")?;

    if app.json {
        return output::json(&report);
    }

    output::success(&format!("Imported {} words", report.success));
    if report.duplicate > 0 {
        output::notice(&format!("{} already in the dictionary", report.duplicate));
    }
    if report.failed > 0 {
        output::notice(&format!("{} rejected by the server", report.failed));
    }
    Ok(())
}

#[derive(Args, Debug)]
pub struct ExportWordsArgs {
    /// Write to this file instead of stdout
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,
}

pub async fn export(args: ExportWordsArgs, app: &App) -> Result<()> {
    let file = app
        .client
        .export_sensitive_words()
        .await
        .context("Failed to export words")?;

    match &args.output {
        Some(path) => {
            std::fs::write(path, &file)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            output::success(&format!("Wrote {} bytes to {}", file.len(), path.display()));
        }
        None => std::io::stdout()
            .write_all(&file)
            .context("Failed to write to stdout")?,
    }
    Ok(())
}

#[derive(Args, Debug)]
pub struct WordStatsArgs {}

pub async fn stats(_args: WordStatsArgs, app: &App) -> Result<()> {
    let stats = app
        .client
        .sensitive_word_statistics()
        .await
        .context("Failed to load word statistics")?;

    if app.json {
        return output::json(&stats);
    }

    output::field("Words", &stats.total_words.to_string());
    output::field("Enabled", &stats.enabled_words.to_string());
    output::field("Disabled", &stats.disabled_words.to_string());
    output::field("Log entries", &stats.total_logs.to_string());
    output::field("Recent entries", &stats.recent_logs.to_string());
    Ok(())
}
