//! Standings and show commands - read-only reports

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use tourney_core::{Standings, Tournament};

use crate::round_cmd::display_name;

#[derive(Args)]
pub struct StandingsArgs {
    /// Tournament JSON file
    #[arg(long, value_name = "FILE")]
    pub file: PathBuf,

    /// Only show the top N players
    #[arg(long)]
    pub top: Option<usize>,

    /// Output standings as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct ShowArgs {
    /// Tournament JSON file
    #[arg(long, value_name = "FILE")]
    pub file: PathBuf,
}

pub fn run_standings(args: StandingsArgs) -> Result<()> {
    let tournament = Tournament::load(&args.file)?;
    let mut standings = tournament.standings();
    if let Some(n) = args.top {
        standings.entries.truncate(n);
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&standings)?);
    } else {
        print!("{}", format_standings(&standings));
    }
    Ok(())
}

pub fn run_show(args: ShowArgs) -> Result<()> {
    let tournament = Tournament::load(&args.file)?;

    println!("{}", tournament);
    if !tournament.description().is_empty() {
        println!("{}", tournament.description());
    }

    println!("\nPlayers:");
    for player in tournament.players() {
        println!("  {}", player);
    }

    for round in tournament.rounds() {
        println!("\n{}:", round.name());
        for game in round.matches() {
            let result = game
                .outcome()
                .map(|o| o.to_string())
                .unwrap_or_else(|| "pending".to_string());
            println!(
                "  {} vs {}  {}",
                display_name(&tournament, game.white()),
                display_name(&tournament, game.black()),
                result
            );
        }
        for bye in round.byes() {
            println!("  bye: {}", display_name(&tournament, bye));
        }
    }
    Ok(())
}

fn format_standings(standings: &Standings) -> String {
    let mut report = String::new();
    report.push_str(&format!(
        "Standings after {} round(s)\n\n",
        standings.rounds_played
    ));
    report.push_str(&format!(
        "{:>3}  {:<10} {:<24} {:>5} {:>3} {:>3} {:>3} {:>3}\n",
        "#", "ID", "Name", "Pts", "W", "D", "L", "Bye"
    ));
    report.push_str(&"-".repeat(64));
    report.push('\n');

    for (rank, s) in standings.entries.iter().enumerate() {
        report.push_str(&format!(
            "{:>3}  {:<10} {:<24} {:>5.1} {:>3} {:>3} {:>3} {:>3}\n",
            rank + 1,
            s.chess_id.as_str(),
            s.name,
            s.score,
            s.wins,
            s.draws,
            s.losses,
            s.byes
        ));
    }
    report
}
