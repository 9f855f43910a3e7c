//! Rounds - one pairing phase of the tournament

use serde::{Deserialize, Serialize};

use crate::matches::Match;
use crate::player::PlayerId;

/// An ordered set of matches plus the players left without an opponent
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Round {
    name: String,
    number: usize,
    matches: Vec<Match>,
    #[serde(default)]
    byes: Vec<PlayerId>,
}

impl Round {
    /// Create an empty round named "Round N"
    pub fn new(number: usize) -> Self {
        Self::with_name(number, format!("Round {}", number))
    }

    pub fn with_name(number: usize, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            number,
            matches: Vec::new(),
            byes: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// 1-based sequence number
    pub fn number(&self) -> usize {
        self.number
    }

    pub fn add_match(&mut self, game: Match) {
        self.matches.push(game);
    }

    pub fn add_bye(&mut self, player: PlayerId) {
        self.byes.push(player);
    }

    pub fn matches(&self) -> &[Match] {
        &self.matches
    }

    pub(crate) fn match_mut(&mut self, index: usize) -> Option<&mut Match> {
        self.matches.get_mut(index)
    }

    pub fn byes(&self) -> &[PlayerId] {
        &self.byes
    }

    /// True once every match has a result
    pub fn is_complete(&self) -> bool {
        self.matches.iter().all(Match::is_scored)
    }

    /// Every player appearing in this round, matches first then byes
    pub fn participants(&self) -> impl Iterator<Item = &PlayerId> {
        self.matches
            .iter()
            .flat_map(|m| [m.white(), m.black()])
            .chain(self.byes.iter())
    }

    /// Match involving `player`, if any
    pub fn match_for(&self, player: &PlayerId) -> Option<&Match> {
        self.matches.iter().find(|m| m.involves(player))
    }
}
