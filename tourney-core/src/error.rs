//! Error types for tournament operations
//!
//! Level 4 - Utilities and configuration

use crate::player::PlayerId;

/// Errors surfaced by the tournament core
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TournamentError {
    #[error("The maximum number of rounds has been reached ({rounds_count})")]
    OutOfRounds { rounds_count: usize },

    #[error("Invalid participant: {0}")]
    InvalidParticipant(String),

    #[error("Participant already registered: {0}")]
    DuplicateParticipant(PlayerId),

    #[error("Unknown participant: {0}")]
    UnknownParticipant(PlayerId),

    #[error("Players {0} and {1} have already faced each other")]
    RepeatPairing(PlayerId, PlayerId),

    #[error("Player {player} appears more than once in round {round}")]
    DoubleBooked { player: PlayerId, round: usize },

    #[error("Match {white} vs {black} already has a result")]
    AlreadyScored { white: PlayerId, black: PlayerId },

    #[error("Invalid outcome: {0}")]
    InvalidOutcome(String),

    #[error("Expected round {expected}, got round {found}")]
    UnexpectedRoundNumber { expected: usize, found: usize },

    #[error("Stored round counter {stored} does not match {actual} stored rounds")]
    RoundCounterMismatch { stored: usize, actual: usize },

    #[error("{rounds} rounds exceed the configured round count of {rounds_count}")]
    TooManyRounds { rounds: usize, rounds_count: usize },

    #[error("Round {0} not found")]
    RoundNotFound(usize),

    #[error("Match {index} not found in round {round}")]
    MatchNotFound { round: usize, index: usize },
}

/// Result alias for tournament operations
pub type Result<T> = std::result::Result<T, TournamentError>;
