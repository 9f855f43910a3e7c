//! Pairing engine - greedy no-repeat pairings with score seeding
//!
//! Level 2 - Phases

use rand::seq::SliceRandom;
use rand::Rng;

use crate::history::PairingHistory;
use crate::player::{Player, PlayerId};

/// One or two players selected for a round
///
/// `second` is None when the player could not be paired (a bye).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pair {
    pub first: PlayerId,
    pub second: Option<PlayerId>,
}

impl Pair {
    pub fn new(first: PlayerId, second: PlayerId) -> Self {
        Self {
            first,
            second: Some(second),
        }
    }

    pub fn bye(player: PlayerId) -> Self {
        Self {
            first: player,
            second: None,
        }
    }

    pub fn is_bye(&self) -> bool {
        self.second.is_none()
    }
}

/// Engine output for one round
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Pairing {
    /// Formed pairs in formation order, then one bye pair per unpaired player
    pub pairs: Vec<Pair>,
    /// History edges created by this pairing, one per formed pair
    pub edges: Vec<(PlayerId, PlayerId)>,
}

impl Pairing {
    /// Two-player pairs only
    pub fn matched(&self) -> impl Iterator<Item = (&PlayerId, &PlayerId)> {
        self.pairs
            .iter()
            .filter_map(|pair| pair.second.as_ref().map(|second| (&pair.first, second)))
    }

    /// Players left without an opponent
    pub fn byes(&self) -> impl Iterator<Item = &PlayerId> {
        self.pairs
            .iter()
            .filter(|pair| pair.is_bye())
            .map(|pair| &pair.first)
    }

    /// Apply the new edges to a history
    pub fn record_into(&self, history: &mut PairingHistory) {
        for (a, b) in &self.edges {
            history.record(a, b);
        }
    }
}

/// Order the registry before pairing
///
/// Before the first round the order is shuffled uniformly. Afterwards
/// players are sorted by descending score; the sort is stable, so tied
/// players keep their previous relative order.
pub fn seed_order<R: Rng + ?Sized>(players: &mut [Player], rounds_played: usize, rng: &mut R) {
    if rounds_played == 0 {
        players.shuffle(rng);
    } else {
        players.sort_by(|a, b| {
            b.points()
                .partial_cmp(&a.points())
                .unwrap_or(std::cmp::Ordering::Equal)
        });
    }
}

/// Pair an ordered list of players, never repeating a past matchup
///
/// Scans players in order; each unpaired player takes the first later
/// player who is still free and has not faced them. Players with no
/// eligible opponent get a bye. O(n^2) in the number of players.
pub fn pair_players(players: &[Player], history: &PairingHistory) -> Pairing {
    let n = players.len();
    let mut used = vec![false; n];
    let mut pairing = Pairing::default();
    let mut unpaired = Vec::new();

    for i in 0..n {
        if used[i] {
            continue;
        }

        let first = players[i].id();
        let opponent = ((i + 1)..n).find(|&j| !used[j] && !history.has_faced(first, players[j].id()));

        match opponent {
            Some(j) => {
                let second = players[j].id();
                used[i] = true;
                used[j] = true;
                tracing::debug!("Paired {} with {}", first, second);
                pairing.pairs.push(Pair::new(first.clone(), second.clone()));
                pairing.edges.push((first.clone(), second.clone()));
            }
            None => unpaired.push(first.clone()),
        }
    }

    for player in unpaired {
        tracing::debug!("No eligible opponent for {}", player);
        pairing.pairs.push(Pair::bye(player));
    }

    pairing
}
