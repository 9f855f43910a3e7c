//! Persisted tournament record and JSON file storage

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::error::TournamentError;
use crate::history::PairingHistory;
use crate::player::Player;
use crate::round::Round;
use crate::tournament::Tournament;

/// On-disk shape of a tournament
///
/// `current_round_number` is written for readers of the file; on load it
/// must agree with the number of stored rounds.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TournamentRecord {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub end_date: String,
    pub rounds_count: usize,
    #[serde(default)]
    pub current_round_number: usize,
    #[serde(default)]
    pub rounds: Vec<Round>,
    #[serde(default)]
    pub players: Vec<Player>,
    #[serde(default)]
    pub description: String,
}

impl From<Tournament> for TournamentRecord {
    fn from(tournament: Tournament) -> Self {
        Self {
            current_round_number: tournament.current_round_number(),
            name: tournament.name,
            location: tournament.location,
            start_date: tournament.start_date,
            end_date: tournament.end_date,
            rounds_count: tournament.rounds_count,
            rounds: tournament.rounds,
            players: tournament.players,
            description: tournament.description,
        }
    }
}

impl TryFrom<TournamentRecord> for Tournament {
    type Error = TournamentError;

    /// Rebuild a tournament, replaying stored rounds into a fresh history
    ///
    /// Player points are taken as stored; they already include every
    /// result and correction.
    fn try_from(record: TournamentRecord) -> Result<Self, Self::Error> {
        let actual = record.rounds.len();
        if actual > record.rounds_count {
            return Err(TournamentError::TooManyRounds {
                rounds: actual,
                rounds_count: record.rounds_count,
            });
        }
        if record.current_round_number != actual {
            return Err(TournamentError::RoundCounterMismatch {
                stored: record.current_round_number,
                actual,
            });
        }

        let mut tournament = Tournament {
            name: record.name,
            location: record.location,
            start_date: record.start_date,
            end_date: record.end_date,
            description: record.description,
            rounds_count: record.rounds_count,
            rounds: Vec::with_capacity(actual),
            players: Vec::with_capacity(record.players.len()),
            history: PairingHistory::new(),
        };

        for player in record.players {
            player.validate()?;
            if tournament.player(player.id()).is_some() {
                return Err(TournamentError::DuplicateParticipant(player.id().clone()));
            }
            tournament.history.register(player.id());
            tournament.players.push(player);
        }

        for (index, round) in record.rounds.into_iter().enumerate() {
            if round.number() != index + 1 {
                return Err(TournamentError::UnexpectedRoundNumber {
                    expected: index + 1,
                    found: round.number(),
                });
            }
            tournament.validate_round(&round)?;
            for game in round.matches() {
                tournament.history.record(game.white(), game.black());
            }
            tournament.rounds.push(round);
        }

        Ok(tournament)
    }
}

impl Tournament {
    /// Snapshot of the persisted record
    pub fn to_record(&self) -> TournamentRecord {
        TournamentRecord::from(self.clone())
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> anyhow::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse from JSON, validating the stored state
    pub fn from_json(content: &str) -> anyhow::Result<Self> {
        let record: TournamentRecord =
            serde_json::from_str(content).context("Failed to parse tournament JSON")?;
        Ok(Tournament::try_from(record)?)
    }

    /// Save to JSON file
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let content = self.to_json()?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write tournament: {}", path.display()))?;
        tracing::debug!("Saved tournament to {}", path.display());
        Ok(())
    }

    /// Load from JSON file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read tournament: {}", path.display()))?;
        Self::from_json(&content)
            .with_context(|| format!("Invalid tournament file: {}", path.display()))
    }
}
