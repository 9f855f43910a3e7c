//! Pairing history - who has already faced whom
//!
//! Level 3 - Step-level implementation

use rustc_hash::{FxHashMap, FxHashSet};

use crate::player::PlayerId;

/// Symmetric record of past opponents
///
/// Every `record(a, b)` inserts both directions, so `has_faced(a, b)`
/// always equals `has_faced(b, a)`. Entries are never removed.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PairingHistory {
    faced: FxHashMap<PlayerId, FxHashSet<PlayerId>>,
}

impl PairingHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty entry for a newly registered player
    pub fn register(&mut self, player: &PlayerId) {
        self.faced.entry(player.clone()).or_default();
    }

    /// Record that `a` and `b` faced each other (idempotent)
    pub fn record(&mut self, a: &PlayerId, b: &PlayerId) {
        self.faced.entry(a.clone()).or_default().insert(b.clone());
        self.faced.entry(b.clone()).or_default().insert(a.clone());
    }

    pub fn has_faced(&self, a: &PlayerId, b: &PlayerId) -> bool {
        self.faced.get(a).is_some_and(|opponents| opponents.contains(b))
    }

    pub fn is_registered(&self, player: &PlayerId) -> bool {
        self.faced.contains_key(player)
    }

    /// Opponents already faced by `player`
    pub fn opponents<'a>(&'a self, player: &PlayerId) -> impl Iterator<Item = &'a PlayerId> + 'a {
        self.faced.get(player).into_iter().flatten()
    }

    /// Number of opponents already faced by `player`
    pub fn games_played(&self, player: &PlayerId) -> usize {
        self.faced.get(player).map_or(0, |opponents| opponents.len())
    }

    /// Number of distinct pairings recorded
    pub fn pairing_count(&self) -> usize {
        self.faced.values().map(|opponents| opponents.len()).sum::<usize>() / 2
    }
}
