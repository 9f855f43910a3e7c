//! Add-player command - register a participant

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use tourney_core::{Player, Sex, Tournament};

#[derive(Args)]
pub struct AddPlayerArgs {
    /// Tournament JSON file
    #[arg(long, value_name = "FILE")]
    pub file: PathBuf,

    /// National chess ID (e.g. AB12345)
    #[arg(long)]
    pub id: String,

    #[arg(long)]
    pub first_name: String,

    #[arg(long)]
    pub last_name: String,

    /// Birth date (YYYY-MM-DD)
    #[arg(long)]
    pub birth_date: String,

    /// M or F
    #[arg(long)]
    pub sex: Sex,
}

pub fn run(args: AddPlayerArgs) -> Result<()> {
    let mut tournament = Tournament::load(&args.file)?;

    let player = Player::new(
        args.id.as_str(),
        args.first_name.as_str(),
        args.last_name.as_str(),
        args.birth_date.as_str(),
        args.sex,
    )?;
    let summary = player.to_string();
    tournament
        .add_player(player)
        .with_context(|| format!("Cannot register {}", args.id))?;

    tournament.save(&args.file)?;
    tracing::info!(
        "Registered {} ({} players)",
        args.id,
        tournament.players().len()
    );
    println!("{}", summary);
    Ok(())
}
