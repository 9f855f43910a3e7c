//! Standings - ranking table computed from the registry and played rounds

use serde::Serialize;

use crate::player::{Player, PlayerId};
use crate::round::Round;

/// Standing of a player in the tournament
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Standing {
    /// Player identifier
    pub chess_id: PlayerId,
    /// Full name
    pub name: String,
    /// Total score (wins + 0.5 * draws, after corrections)
    pub score: f32,
    /// Total wins
    pub wins: u32,
    /// Total losses
    pub losses: u32,
    /// Total draws
    pub draws: u32,
    /// Rounds without an opponent
    pub byes: u32,
    /// Scored games played
    pub games_played: u32,
}

impl Standing {
    /// Win rate
    pub fn win_rate(&self) -> f32 {
        if self.games_played == 0 {
            0.0
        } else {
            self.wins as f32 / self.games_played as f32
        }
    }

    /// Normalized score (0.0 to 1.0)
    pub fn normalized_score(&self) -> f32 {
        if self.games_played == 0 {
            0.0
        } else {
            self.score / self.games_played as f32
        }
    }
}

/// Ranking table for a tournament
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Standings {
    /// Standings sorted by score (descending), ties by chess ID
    pub entries: Vec<Standing>,
    /// Number of rounds played
    pub rounds_played: usize,
}

impl Standings {
    /// Get leader (top standing)
    pub fn winner(&self) -> Option<&Standing> {
        self.entries.first()
    }

    /// Get top N players
    pub fn top_n(&self, n: usize) -> &[Standing] {
        let n = n.min(self.entries.len());
        &self.entries[..n]
    }

    /// Get standing for a specific player
    pub fn standing_for(&self, player: &PlayerId) -> Option<&Standing> {
        self.entries.iter().find(|s| &s.chess_id == player)
    }
}

/// Compute standings from the registry and played rounds
pub fn compute_standings(players: &[Player], rounds: &[Round]) -> Standings {
    let mut entries: Vec<Standing> = players
        .iter()
        .map(|player| compute_record(player, rounds))
        .collect();

    entries.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.chess_id.cmp(&b.chess_id))
    });

    Standings {
        entries,
        rounds_played: rounds.len(),
    }
}

/// Compute win/loss/draw record for a player
fn compute_record(player: &Player, rounds: &[Round]) -> Standing {
    let id = player.id();
    let mut standing = Standing {
        chess_id: id.clone(),
        name: player.full_name(),
        score: player.points(),
        wins: 0,
        losses: 0,
        draws: 0,
        byes: 0,
        games_played: 0,
    };

    for round in rounds {
        if round.byes().contains(id) {
            standing.byes += 1;
        }
        let Some(points) = round.match_for(id).and_then(|m| m.score_for(id)) else {
            continue;
        };
        standing.games_played += 1;
        if points > 0.5 {
            standing.wins += 1;
        } else if points < 0.5 {
            standing.losses += 1;
        } else {
            standing.draws += 1;
        }
    }

    standing
}
