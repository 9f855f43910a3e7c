//! TOURNEY Core - Round-based tournament management
//!
//! This crate provides the tournament logic:
//! - Player registry with running scores
//! - Pairing history (who has already faced whom)
//! - Greedy no-repeat pairing engine with score seeding
//! - Matches, rounds and pluggable result assignment
//! - Tournament controller with a round ceiling
//! - Standings and JSON persistence
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: Tournament::generate_round (orchestration)
//! - Level 2: seed_order, pair_players, apply_round (phases)
//! - Level 3: Match scoring, history recording (steps)
//! - Level 4: configuration, errors, records

pub mod config;
pub mod error;
pub mod history;
pub mod matches;
pub mod pairing;
pub mod player;
pub mod record;
pub mod results;
pub mod round;
pub mod standings;
pub mod tournament;

// Re-exports for convenient access
pub use config::{TournamentConfig, DEFAULT_ROUNDS_COUNT};
pub use error::{Result, TournamentError};
pub use history::PairingHistory;
pub use matches::{Match, Outcome};
pub use pairing::{pair_players, seed_order, Pair, Pairing};
pub use player::{Player, PlayerId, Sex};
pub use record::TournamentRecord;
pub use results::{RandomResults, ResultAssigner, ScriptedResults};
pub use round::Round;
pub use standings::{compute_standings, Standing, Standings};
pub use tournament::Tournament;
