//! Result assignment - who decides the outcome of each match
//!
//! The controller hands every new match to a `ResultAssigner`. Real events
//! feed entered results through `ScriptedResults`; simulations use
//! `RandomResults`.

use std::collections::VecDeque;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::matches::{Match, Outcome};

/// Decides the outcome of a freshly paired match
pub trait ResultAssigner {
    fn assign(&mut self, game: &Match) -> Outcome;
}

impl<F> ResultAssigner for F
where
    F: FnMut(&Match) -> Outcome,
{
    fn assign(&mut self, game: &Match) -> Outcome {
        self(game)
    }
}

/// Uniformly random outcomes (white win, black win, draw)
#[derive(Clone, Debug)]
pub struct RandomResults<R: Rng> {
    rng: R,
}

impl<R: Rng> RandomResults<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RandomResults<ChaCha8Rng> {
    /// Reproducible random results
    pub fn seeded(seed: u64) -> Self {
        Self::new(ChaCha8Rng::seed_from_u64(seed))
    }
}

impl<R: Rng> ResultAssigner for RandomResults<R> {
    fn assign(&mut self, _game: &Match) -> Outcome {
        Outcome::ALL[self.rng.gen_range(0..Outcome::ALL.len())]
    }
}

/// Outcomes taken in order from a prepared list
///
/// Once the list runs out every further match gets the fallback outcome.
#[derive(Clone, Debug)]
pub struct ScriptedResults {
    outcomes: VecDeque<Outcome>,
    fallback: Outcome,
}

impl ScriptedResults {
    pub fn new(outcomes: impl IntoIterator<Item = Outcome>) -> Self {
        Self {
            outcomes: outcomes.into_iter().collect(),
            fallback: Outcome::Draw,
        }
    }

    pub fn with_fallback(mut self, fallback: Outcome) -> Self {
        self.fallback = fallback;
        self
    }

    /// Outcomes not yet handed out
    pub fn remaining(&self) -> usize {
        self.outcomes.len()
    }
}

impl ResultAssigner for ScriptedResults {
    fn assign(&mut self, game: &Match) -> Outcome {
        self.outcomes.pop_front().unwrap_or_else(|| {
            tracing::warn!(
                "No scripted result left for {} vs {}, using {}",
                game.white(),
                game.black(),
                self.fallback
            );
            self.fallback
        })
    }
}
