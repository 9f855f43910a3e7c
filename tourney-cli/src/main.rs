//! TOURNEY CLI - Command-line interface
//!
//! Commands:
//! - new: Create a tournament file
//! - add-player: Register a player
//! - round: Generate the next round
//! - correct: Fix a recorded result
//! - standings: Print the ranking table
//! - show: Print the tournament and its rounds

mod create;
mod players;
mod report;
mod round_cmd;

use anyhow::Result;
use clap::{Parser, Subcommand};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "tourney")]
#[command(about = "Round-based tournament manager with no-repeat pairings")]
struct Cli {
    /// Random seed for reproducible pairings and results
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new tournament file
    New(create::NewArgs),
    /// Register a player
    AddPlayer(players::AddPlayerArgs),
    /// Generate and score the next round
    Round(round_cmd::RoundArgs),
    /// Correct the result of a match
    Correct(round_cmd::CorrectArgs),
    /// Print the standings
    Standings(report::StandingsArgs),
    /// Print the tournament, players and rounds
    Show(report::ShowArgs),
}

fn main() -> Result<()> {
    init_logging();

    let cli = Cli::parse();

    match cli.command {
        Commands::New(args) => create::run(args),
        Commands::AddPlayer(args) => players::run(args),
        Commands::Round(args) => round_cmd::run(args, cli.seed),
        Commands::Correct(args) => round_cmd::run_correct(args),
        Commands::Standings(args) => report::run_standings(args),
        Commands::Show(args) => report::run_show(args),
    }
}

/// Log to stderr, level from RUST_LOG (default: info)
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Seeded RNG when a seed is given, entropy otherwise
pub(crate) fn create_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => ChaCha8Rng::from_entropy(),
    }
}
