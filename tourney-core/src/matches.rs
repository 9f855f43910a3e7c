//! Matches - a realized pairing plus its outcome

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TournamentError};
use crate::player::PlayerId;

/// Points for a win
pub const WIN_POINTS: f32 = 1.0;
/// Points for each side of a draw
pub const DRAW_POINTS: f32 = 0.5;
/// Points for a loss
pub const LOSS_POINTS: f32 = 0.0;

/// Outcome of a single game
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    WhiteWins,
    BlackWins,
    Draw,
}

impl Outcome {
    /// All outcomes, in a fixed order
    pub const ALL: [Outcome; 3] = [Outcome::WhiteWins, Outcome::BlackWins, Outcome::Draw];

    pub fn score_for_white(self) -> f32 {
        match self {
            Outcome::WhiteWins => WIN_POINTS,
            Outcome::BlackWins => LOSS_POINTS,
            Outcome::Draw => DRAW_POINTS,
        }
    }

    pub fn score_for_black(self) -> f32 {
        match self {
            Outcome::WhiteWins => LOSS_POINTS,
            Outcome::BlackWins => WIN_POINTS,
            Outcome::Draw => DRAW_POINTS,
        }
    }
}

impl FromStr for Outcome {
    type Err = TournamentError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "white" | "white_wins" | "1-0" => Ok(Outcome::WhiteWins),
            "black" | "black_wins" | "0-1" => Ok(Outcome::BlackWins),
            "draw" | "1/2-1/2" | "=" => Ok(Outcome::Draw),
            other => Err(TournamentError::InvalidOutcome(other.to_string())),
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::WhiteWins => f.write_str("1-0"),
            Outcome::BlackWins => f.write_str("0-1"),
            Outcome::Draw => f.write_str("1/2-1/2"),
        }
    }
}

/// A game between two players in a round
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Match {
    white: PlayerId,
    black: PlayerId,
    #[serde(default)]
    outcome: Option<Outcome>,
}

impl Match {
    /// Create an unscored match
    pub fn new(white: PlayerId, black: PlayerId) -> Self {
        Self {
            white,
            black,
            outcome: None,
        }
    }

    /// Create a match with a result already known
    pub fn scored(white: PlayerId, black: PlayerId, outcome: Outcome) -> Self {
        Self {
            white,
            black,
            outcome: Some(outcome),
        }
    }

    pub fn white(&self) -> &PlayerId {
        &self.white
    }

    pub fn black(&self) -> &PlayerId {
        &self.black
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    pub fn is_scored(&self) -> bool {
        self.outcome.is_some()
    }

    pub fn involves(&self, player: &PlayerId) -> bool {
        &self.white == player || &self.black == player
    }

    /// Opponent of `player`, if `player` is in this match
    pub fn opponent_of(&self, player: &PlayerId) -> Option<&PlayerId> {
        if &self.white == player {
            Some(&self.black)
        } else if &self.black == player {
            Some(&self.white)
        } else {
            None
        }
    }

    /// Record the result of an unscored match
    pub fn assign(&mut self, outcome: Outcome) -> Result<()> {
        if self.outcome.is_some() {
            return Err(TournamentError::AlreadyScored {
                white: self.white.clone(),
                black: self.black.clone(),
            });
        }
        self.outcome = Some(outcome);
        Ok(())
    }

    /// Replace the result, returning the previous one
    pub fn correct(&mut self, outcome: Outcome) -> Option<Outcome> {
        self.outcome.replace(outcome)
    }

    /// Points earned by (white, black); None while unscored
    pub fn score_deltas(&self) -> Option<(f32, f32)> {
        self.outcome
            .map(|outcome| (outcome.score_for_white(), outcome.score_for_black()))
    }

    /// Points earned by `player` in this match
    pub fn score_for(&self, player: &PlayerId) -> Option<f32> {
        let (white, black) = self.score_deltas()?;
        if &self.white == player {
            Some(white)
        } else if &self.black == player {
            Some(black)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game() -> Match {
        Match::new(PlayerId::from("A"), PlayerId::from("B"))
    }

    #[test]
    fn test_new_match_is_unscored() {
        let m = game();
        assert!(!m.is_scored());
        assert_eq!(m.score_deltas(), None);
    }

    #[test]
    fn test_assign_sets_deltas() {
        let mut m = game();
        m.assign(Outcome::WhiteWins).unwrap();
        assert_eq!(m.score_deltas(), Some((1.0, 0.0)));

        let mut m = game();
        m.assign(Outcome::Draw).unwrap();
        assert_eq!(m.score_deltas(), Some((0.5, 0.5)));
    }

    #[test]
    fn test_assign_twice_fails() {
        let mut m = game();
        m.assign(Outcome::BlackWins).unwrap();
        let err = m.assign(Outcome::WhiteWins).unwrap_err();
        assert!(matches!(err, TournamentError::AlreadyScored { .. }));
        assert_eq!(m.outcome(), Some(Outcome::BlackWins));
    }

    #[test]
    fn test_correct_replaces_outcome() {
        let mut m = Match::scored(PlayerId::from("A"), PlayerId::from("B"), Outcome::WhiteWins);
        let previous = m.correct(Outcome::Draw);
        assert_eq!(previous, Some(Outcome::WhiteWins));
        assert_eq!(m.outcome(), Some(Outcome::Draw));
    }

    #[test]
    fn test_opponent_and_score_for() {
        let m = Match::scored(PlayerId::from("A"), PlayerId::from("B"), Outcome::BlackWins);
        assert_eq!(m.opponent_of(&PlayerId::from("A")), Some(&PlayerId::from("B")));
        assert_eq!(m.opponent_of(&PlayerId::from("C")), None);
        assert_eq!(m.score_for(&PlayerId::from("B")), Some(1.0));
        assert_eq!(m.score_for(&PlayerId::from("A")), Some(0.0));
        assert_eq!(m.score_for(&PlayerId::from("C")), None);
    }

    #[test]
    fn test_outcome_from_str() {
        assert_eq!("1-0".parse::<Outcome>().unwrap(), Outcome::WhiteWins);
        assert_eq!("Black".parse::<Outcome>().unwrap(), Outcome::BlackWins);
        assert_eq!("draw".parse::<Outcome>().unwrap(), Outcome::Draw);
        assert!("2-0".parse::<Outcome>().is_err());
    }

    #[test]
    fn test_points_sum_to_one() {
        for outcome in Outcome::ALL {
            assert_eq!(outcome.score_for_white() + outcome.score_for_black(), 1.0);
        }
    }
}
