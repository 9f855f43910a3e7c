//! Round command - generate the next round, or correct a result
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run(), run_correct() - orchestration
//! - Level 2: choose_assigner(), print_round()
//! - Level 4: command arguments

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use tourney_core::{
    Outcome, PlayerId, RandomResults, ResultAssigner, Round, ScriptedResults, Tournament,
};

use crate::create_rng;

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct RoundArgs {
    /// Tournament JSON file
    #[arg(long, value_name = "FILE")]
    pub file: PathBuf,

    /// Results in match order (white, black, draw or 1-0, 0-1, 1/2-1/2),
    /// comma separated; random results when omitted
    #[arg(long, value_delimiter = ',')]
    pub results: Vec<Outcome>,

    /// Output the round as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct CorrectArgs {
    /// Tournament JSON file
    #[arg(long, value_name = "FILE")]
    pub file: PathBuf,

    /// Round number (1-based)
    #[arg(long)]
    pub round: usize,

    /// Match number within the round (1-based)
    #[arg(long)]
    pub game: usize,

    /// New outcome (white, black, draw)
    #[arg(long)]
    pub outcome: Outcome,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run round command
///
/// 1. Load the tournament
/// 2. Generate and score the next round
/// 3. Save and print it
pub fn run(args: RoundArgs, seed: Option<u64>) -> Result<()> {
    let mut tournament = Tournament::load(&args.file)?;
    let mut rng = create_rng(seed);
    let mut assigner = choose_assigner(&args, seed);

    let round = tournament
        .generate_round(&mut rng, assigner.as_mut())
        .context("Cannot generate round")?
        .clone();

    tournament.save(&args.file)?;
    print_round(&tournament, &round, args.json)
}

/// Run correct command
pub fn run_correct(args: CorrectArgs) -> Result<()> {
    let mut tournament = Tournament::load(&args.file)?;
    let index = args
        .game
        .checked_sub(1)
        .context("Match numbers start at 1")?;

    let previous = tournament.correct_result(args.round, index, args.outcome)?;
    tournament.save(&args.file)?;

    match previous {
        Some(old) => println!(
            "Round {} match {}: {} -> {}",
            args.round, args.game, old, args.outcome
        ),
        None => println!("Round {} match {}: {}", args.round, args.game, args.outcome),
    }
    Ok(())
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Scripted results when given, seeded random results otherwise
fn choose_assigner(args: &RoundArgs, seed: Option<u64>) -> Box<dyn ResultAssigner> {
    if args.results.is_empty() {
        let results_seed = seed.map(|s| s.wrapping_add(1));
        Box::new(RandomResults::new(create_rng(results_seed)))
    } else {
        Box::new(ScriptedResults::new(args.results.iter().copied()))
    }
}

fn print_round(tournament: &Tournament, round: &Round, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(round)?);
        return Ok(());
    }

    println!("{}", round.name());
    for (i, game) in round.matches().iter().enumerate() {
        let result = game
            .outcome()
            .map(|o| o.to_string())
            .unwrap_or_else(|| "pending".to_string());
        println!(
            "  {}. {} vs {}  {}",
            i + 1,
            display_name(tournament, game.white()),
            display_name(tournament, game.black()),
            result
        );
    }
    for bye in round.byes() {
        println!("  bye: {}", display_name(tournament, bye));
    }
    Ok(())
}

pub(crate) fn display_name(tournament: &Tournament, id: &PlayerId) -> String {
    tournament
        .player(id)
        .map(|p| format!("{} ({})", p.full_name(), id))
        .unwrap_or_else(|| id.to_string())
}
