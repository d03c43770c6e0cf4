//! Dashboard figures.

use anyhow::{Context, Result, anyhow};
use clap::Args;
use colored::Colorize;
use serde::Serialize;

use opsdesk_core::resources::{PlayerRank, RankLimit, SectRank, StatSummary};

use crate::output;
use crate::session::App;

#[derive(Args, Debug)]
pub struct StatsArgs {
    /// Entries per ranking, 1 to 1000
    #[arg(long, default_value_t = 30)]
    pub limit: u32,
}

#[derive(Serialize)]
struct Board {
    summary: StatSummary,
    players: Vec<PlayerRank>,
    sects: Vec<SectRank>,
}

pub async fn run(args: StatsArgs, app: &App) -> Result<()> {
    let limit = RankLimit::new(args.limit).map_err(|e| anyhow!(e.user_message()))?;

    let (summary, players, sects) = tokio::try_join!(
        app.client.stat_summary(),
        app.client.player_rank(limit),
        app.client.sect_rank(limit),
    )
    .context("Failed to load statistics")?;

    if app.json {
        return output::json(&Board {
            summary,
            players,
            sects,
        });
    }

    output::field("Players", &summary.player_total.to_string());
    output::field("Advanced", &summary.advanced_player_total.to_string());
    output::field("Sects", &summary.sect_total.to_string());

    println!();
    println!("{}", "Players by realm".bold());
    for p in &players {
        println!("{:>4}  {}  {}", p.rank, p.name, p.realm.dimmed());
    }

    println!();
    println!("{}", "Sects by level".bold());
    for s in &sects {
        println!("{:>4}  {}  {}", s.rank, s.name, s.level.dimmed());
    }
    Ok(())
}
