//! CLI argument definitions.

use clap::Parser;

use crate::commands::Command;

/// Game-operations admin console.
#[derive(Parser, Debug)]
#[command(name = "opsdesk")]
#[command(author, version = env!("OPSDESK_VERSION"), about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// Admin API base URL (the /api prefix is added automatically)
    #[arg(
        long,
        global = true,
        env = "OPSDESK_API",
        default_value = "http://localhost:3000"
    )]
    pub api: String,

    /// Print results as JSON instead of human-readable lines
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}
