//! New command - create a tournament file
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: build_config(), write_tournament()
//! - Level 3: validate_dates()
//! - Level 4: command arguments

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Args;

use tourney_core::player::DATE_FORMAT;
use tourney_core::{Tournament, TournamentConfig, DEFAULT_ROUNDS_COUNT};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct NewArgs {
    /// Tournament JSON file to create
    #[arg(long, value_name = "FILE")]
    pub file: PathBuf,

    /// Tournament name
    #[arg(long)]
    pub name: String,

    /// Venue
    #[arg(long, default_value = "")]
    pub location: String,

    /// First day (YYYY-MM-DD)
    #[arg(long)]
    pub start_date: Option<String>,

    /// Last day (YYYY-MM-DD)
    #[arg(long)]
    pub end_date: Option<String>,

    /// Number of rounds
    #[arg(long, default_value_t = DEFAULT_ROUNDS_COUNT)]
    pub rounds: usize,

    /// Free-form description
    #[arg(long, default_value = "")]
    pub description: String,

    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run new command
///
/// 1. Validate arguments into a config
/// 2. Write the empty tournament
pub fn run(args: NewArgs) -> Result<()> {
    let config = build_config(&args)?;
    let tournament = Tournament::new(config);

    write_tournament(&tournament, &args)?;

    tracing::info!("Created {} at {}", tournament.name(), args.file.display());
    println!("{}", tournament);
    Ok(())
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

fn build_config(args: &NewArgs) -> Result<TournamentConfig> {
    let start = args.start_date.clone().unwrap_or_default();
    let end = args.end_date.clone().unwrap_or_else(|| start.clone());
    validate_dates(&start, &end)?;

    Ok(TournamentConfig::new(args.name.trim())
        .with_location(args.location.trim())
        .with_dates(start, end)
        .with_rounds(args.rounds)
        .with_description(args.description.trim()))
}

fn write_tournament(tournament: &Tournament, args: &NewArgs) -> Result<()> {
    if args.file.exists() && !args.force {
        anyhow::bail!(
            "{} already exists (use --force to overwrite)",
            args.file.display()
        );
    }
    tournament.save(&args.file)
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

/// Both dates empty, or both valid with start <= end
fn validate_dates(start: &str, end: &str) -> Result<()> {
    if start.is_empty() && end.is_empty() {
        return Ok(());
    }
    let start_day = NaiveDate::parse_from_str(start, DATE_FORMAT)
        .with_context(|| format!("Invalid start date '{}' (expected YYYY-MM-DD)", start))?;
    let end_day = NaiveDate::parse_from_str(end, DATE_FORMAT)
        .with_context(|| format!("Invalid end date '{}' (expected YYYY-MM-DD)", end))?;
    if end_day < start_day {
        anyhow::bail!("End date {} is before start date {}", end, start);
    }
    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================
