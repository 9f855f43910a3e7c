//! Tournament controller - registry, history and round generation
//!
//! Level 1 - Orchestration and Level 2 - Phases

use std::fmt;

use rand::Rng;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::config::TournamentConfig;
use crate::error::{Result, TournamentError};
use crate::history::PairingHistory;
use crate::matches::{Match, Outcome};
use crate::pairing::{pair_players, seed_order};
use crate::player::{Player, PlayerId};
use crate::record::TournamentRecord;
use crate::results::ResultAssigner;
use crate::round::Round;
use crate::standings::{compute_standings, Standings};

/// Aggregate root of a tournament
///
/// The current round number is always `rounds().len()`; it is only stored
/// separately in the persisted record. Mutating operations take `&mut self`,
/// so a tournament shared between threads needs a lock around it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "TournamentRecord", into = "TournamentRecord")]
pub struct Tournament {
    pub(crate) name: String,
    pub(crate) location: String,
    pub(crate) start_date: String,
    pub(crate) end_date: String,
    pub(crate) description: String,
    pub(crate) rounds_count: usize,
    pub(crate) rounds: Vec<Round>,
    pub(crate) players: Vec<Player>,
    pub(crate) history: PairingHistory,
}

impl Tournament {
    /// Create an empty tournament
    pub fn new(config: TournamentConfig) -> Self {
        Self {
            name: config.name,
            location: config.location,
            start_date: config.start_date,
            end_date: config.end_date,
            description: config.description,
            rounds_count: config.rounds_count,
            rounds: Vec::new(),
            players: Vec::new(),
            history: PairingHistory::new(),
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn start_date(&self) -> &str {
        &self.start_date
    }

    pub fn end_date(&self) -> &str {
        &self.end_date
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Configured number of rounds
    pub fn rounds_count(&self) -> usize {
        self.rounds_count
    }

    /// Number of rounds generated so far
    pub fn current_round_number(&self) -> usize {
        self.rounds.len()
    }

    pub fn rounds_remaining(&self) -> usize {
        self.rounds_count.saturating_sub(self.rounds.len())
    }

    pub fn is_finished(&self) -> bool {
        self.rounds.len() >= self.rounds_count
    }

    pub fn rounds(&self) -> &[Round] {
        &self.rounds
    }

    /// Round by 1-based number
    pub fn round(&self, number: usize) -> Option<&Round> {
        number.checked_sub(1).and_then(|i| self.rounds.get(i))
    }

    /// Players in registry order (the seeding order of the last round)
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, id: &PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id() == id)
    }

    pub fn history(&self) -> &PairingHistory {
        &self.history
    }

    pub fn standings(&self) -> Standings {
        compute_standings(&self.players, &self.rounds)
    }

    // ========================================================================
    // Setters
    // ========================================================================

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn set_location(&mut self, location: impl Into<String>) {
        self.location = location.into();
    }

    pub fn set_start_date(&mut self, start_date: impl Into<String>) {
        self.start_date = start_date.into();
    }

    pub fn set_end_date(&mut self, end_date: impl Into<String>) {
        self.end_date = end_date.into();
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    /// Change the round ceiling; cannot drop below rounds already played
    pub fn set_rounds_count(&mut self, rounds_count: usize) -> Result<()> {
        if rounds_count < self.rounds.len() {
            return Err(TournamentError::TooManyRounds {
                rounds: self.rounds.len(),
                rounds_count,
            });
        }
        self.rounds_count = rounds_count;
        Ok(())
    }

    // ========================================================================
    // Registry
    // ========================================================================

    /// Register a player with an empty pairing history
    ///
    /// Late entries are accepted: a player added after rounds were played
    /// has no history and may be paired with anyone.
    pub fn add_player(&mut self, player: Player) -> Result<()> {
        player.validate()?;
        if self.player(player.id()).is_some() {
            return Err(TournamentError::DuplicateParticipant(player.id().clone()));
        }

        if !self.rounds.is_empty() {
            tracing::warn!(
                "Player {} registered after {} round(s) were played",
                player.id(),
                self.rounds.len()
            );
        }

        self.history.register(player.id());
        self.players.push(player);
        Ok(())
    }

    // ========================================================================
    // Level 1 - Orchestration
    // ========================================================================

    /// Generate, score and append the next round
    ///
    /// 1. Check the round ceiling
    /// 2. Seed the registry (shuffle first, then by score)
    /// 3. Pair players without repeats
    /// 4. Let `assigner` decide each match, then apply the round
    ///
    /// Fails with `OutOfRounds` once `rounds_count` rounds exist, leaving
    /// the tournament untouched.
    pub fn generate_round<R, A>(&mut self, rng: &mut R, assigner: &mut A) -> Result<&Round>
    where
        R: Rng + ?Sized,
        A: ResultAssigner + ?Sized,
    {
        if self.is_finished() {
            return Err(TournamentError::OutOfRounds {
                rounds_count: self.rounds_count,
            });
        }

        let number = self.rounds.len() + 1;
        seed_order(&mut self.players, self.rounds.len(), rng);
        let pairing = pair_players(&self.players, &self.history);

        let mut round = Round::new(number);
        for pair in pairing.pairs {
            match pair.second {
                Some(black) => {
                    let mut game = Match::new(pair.first, black);
                    let outcome = assigner.assign(&game);
                    game.assign(outcome)?;
                    round.add_match(game);
                }
                None => {
                    tracing::warn!("{}: {} has no eligible opponent (bye)", round.name(), pair.first);
                    round.add_bye(pair.first);
                }
            }
        }

        tracing::info!(
            "{}: {} match(es), {} bye(s)",
            round.name(),
            round.matches().len(),
            round.byes().len()
        );

        self.apply_round(round);
        Ok(&self.rounds[number - 1])
    }

    /// Append an externally built round
    ///
    /// The round must be the next in sequence, reference registered players
    /// only, use each player once and repeat no earlier pairing. Scored
    /// matches update player points.
    pub fn add_round(&mut self, round: Round) -> Result<()> {
        if self.is_finished() {
            return Err(TournamentError::OutOfRounds {
                rounds_count: self.rounds_count,
            });
        }
        let expected = self.rounds.len() + 1;
        if round.number() != expected {
            return Err(TournamentError::UnexpectedRoundNumber {
                expected,
                found: round.number(),
            });
        }
        self.validate_round(&round)?;
        self.apply_round(round);
        Ok(())
    }

    /// Replace the result of a match, adjusting both players' points
    ///
    /// Returns the previous outcome (None if the match was unscored).
    pub fn correct_result(
        &mut self,
        round_number: usize,
        match_index: usize,
        outcome: Outcome,
    ) -> Result<Option<Outcome>> {
        let round = round_number
            .checked_sub(1)
            .and_then(|i| self.rounds.get_mut(i))
            .ok_or(TournamentError::RoundNotFound(round_number))?;
        let game = round
            .match_mut(match_index)
            .ok_or(TournamentError::MatchNotFound {
                round: round_number,
                index: match_index,
            })?;

        let before = game.score_deltas().unwrap_or((0.0, 0.0));
        let previous = game.correct(outcome);
        let after = (outcome.score_for_white(), outcome.score_for_black());
        let (white, black) = (game.white().clone(), game.black().clone());

        self.award(&white, after.0 - before.0);
        self.award(&black, after.1 - before.1);

        tracing::info!(
            "Round {} match {}: {} vs {} corrected to {}",
            round_number,
            match_index,
            white,
            black,
            outcome
        );
        Ok(previous)
    }

    // ========================================================================
    // Level 2 - Phases
    // ========================================================================

    /// Record history edges and points for a round, then append it
    fn apply_round(&mut self, round: Round) {
        for game in round.matches() {
            self.history.record(game.white(), game.black());
            if let Some((white, black)) = game.score_deltas() {
                self.award(game.white(), white);
                self.award(game.black(), black);
            }
        }
        self.rounds.push(round);
    }

    /// Check a round against the registry and the pairing history
    pub(crate) fn validate_round(&self, round: &Round) -> Result<()> {
        let mut seen: FxHashSet<&PlayerId> = FxHashSet::default();
        for id in round.participants() {
            if self.player(id).is_none() {
                return Err(TournamentError::UnknownParticipant(id.clone()));
            }
            if !seen.insert(id) {
                return Err(TournamentError::DoubleBooked {
                    player: id.clone(),
                    round: round.number(),
                });
            }
        }

        for game in round.matches() {
            if self.history.has_faced(game.white(), game.black()) {
                return Err(TournamentError::RepeatPairing(
                    game.white().clone(),
                    game.black().clone(),
                ));
            }
        }
        Ok(())
    }

    // ========================================================================
    // Level 3 - Steps
    // ========================================================================

    fn award(&mut self, id: &PlayerId, points: f32) {
        if let Some(player) = self.players.iter_mut().find(|p| p.id() == id) {
            player.add_points(points);
        }
    }
}

impl fmt::Display for Tournament {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Tournament: {} at {} from {} to {}, Rounds: {}, Current Round: {}, Players: {}",
            self.name,
            self.location,
            self.start_date,
            self.end_date,
            self.rounds_count,
            self.current_round_number(),
            self.players.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::Sex;
    use crate::results::{RandomResults, ScriptedResults};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn player(id: &str) -> Player {
        Player::new(id, id, "Test", "1995-03-04", Sex::Female).unwrap()
    }

    fn id(s: &str) -> PlayerId {
        PlayerId::from(s)
    }

    fn four_player_tournament(rounds: usize) -> Tournament {
        let mut tournament = Tournament::new(
            TournamentConfig::new("Echecs France")
                .with_location("Paris")
                .with_dates("2023-06-01", "2023-06-10")
                .with_rounds(rounds),
        );
        for p in ["AB12345", "KB67890", "EF11223", "VB44556"] {
            tournament.add_player(player(p)).unwrap();
        }
        tournament
    }

    fn played_pairs(tournament: &Tournament) -> Vec<(PlayerId, PlayerId)> {
        tournament
            .rounds()
            .iter()
            .flat_map(|r| r.matches())
            .map(|m| {
                let (a, b) = (m.white().clone(), m.black().clone());
                if a < b { (a, b) } else { (b, a) }
            })
            .collect()
    }

    #[test]
    fn test_new_tournament_is_empty() {
        let tournament = Tournament::new(TournamentConfig::default());
        assert_eq!(tournament.rounds_count(), 4);
        assert_eq!(tournament.current_round_number(), 0);
        assert!(tournament.players().is_empty());
        assert!(!tournament.is_finished());
    }

    #[test]
    fn test_add_player_registers_history() {
        let tournament = four_player_tournament(3);
        assert_eq!(tournament.players().len(), 4);
        assert!(tournament.history().is_registered(&id("AB12345")));
    }

    #[test]
    fn test_add_duplicate_player_fails() {
        let mut tournament = four_player_tournament(3);
        let err = tournament.add_player(player("AB12345")).unwrap_err();
        assert_eq!(err, TournamentError::DuplicateParticipant(id("AB12345")));
        assert_eq!(tournament.players().len(), 4);
    }

    #[test]
    fn test_three_rounds_then_out_of_rounds() {
        let mut tournament = four_player_tournament(3);
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let mut results = RandomResults::seeded(7);

        for number in 1..=3 {
            let round = tournament.generate_round(&mut rng, &mut results).unwrap();
            assert_eq!(round.number(), number);
            assert_eq!(round.name(), format!("Round {}", number));
            assert!(round.is_complete());
        }

        let before = tournament.clone();
        let err = tournament.generate_round(&mut rng, &mut results).unwrap_err();
        assert_eq!(err, TournamentError::OutOfRounds { rounds_count: 3 });
        assert_eq!(tournament.current_round_number(), 3);
        assert_eq!(tournament, before);
    }

    #[test]
    fn test_no_repeat_pairings() {
        let mut tournament = four_player_tournament(3);
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut results = RandomResults::seeded(3);
        for _ in 0..3 {
            tournament.generate_round(&mut rng, &mut results).unwrap();
        }

        let mut pairs = played_pairs(&tournament);
        let total = pairs.len();
        pairs.sort();
        pairs.dedup();
        assert_eq!(pairs.len(), total);
    }

    #[test]
    fn test_first_round_pairs_everyone() {
        let mut tournament = four_player_tournament(3);
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let round = tournament
            .generate_round(&mut rng, &mut RandomResults::seeded(1))
            .unwrap();
        assert_eq!(round.matches().len(), 2);
        assert!(round.byes().is_empty());
    }

    #[test]
    fn test_points_follow_results() {
        let mut tournament = four_player_tournament(1);
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let mut results = ScriptedResults::new([Outcome::WhiteWins, Outcome::Draw]);
        let round = tournament.generate_round(&mut rng, &mut results).unwrap().clone();

        let first = &round.matches()[0];
        let second = &round.matches()[1];
        assert_eq!(tournament.player(first.white()).unwrap().points(), 1.0);
        assert_eq!(tournament.player(first.black()).unwrap().points(), 0.0);
        assert_eq!(tournament.player(second.white()).unwrap().points(), 0.5);
        assert_eq!(tournament.player(second.black()).unwrap().points(), 0.5);
    }

    #[test]
    fn test_later_rounds_seeded_by_score() {
        let mut tournament = four_player_tournament(2);
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let mut white_always = |_: &Match| Outcome::WhiteWins;
        tournament.generate_round(&mut rng, &mut white_always).unwrap();
        tournament.generate_round(&mut rng, &mut white_always).unwrap();

        // Registry is sorted by descending score as of the start of round 2
        let round1 = tournament.round(1).unwrap();
        let winners: Vec<_> = round1.matches().iter().map(|m| m.white().clone()).collect();
        let round2 = tournament.round(2).unwrap();
        assert!(winners.contains(round2.matches()[0].white()));
        assert!(winners.contains(round2.matches()[0].black()));
    }

    #[test]
    fn test_odd_players_get_bye() {
        let mut tournament = four_player_tournament(1);
        tournament.add_player(player("ZZ99999")).unwrap();

        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let round = tournament
            .generate_round(&mut rng, &mut RandomResults::seeded(1))
            .unwrap();
        assert_eq!(round.matches().len(), 2);
        assert_eq!(round.byes().len(), 1);

        let bye = round.byes()[0].clone();
        assert_eq!(tournament.player(&bye).unwrap().points(), 0.0);
    }

    #[test]
    fn test_late_registration_has_empty_history() {
        let mut tournament = four_player_tournament(2);
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        tournament
            .generate_round(&mut rng, &mut RandomResults::seeded(2))
            .unwrap();

        tournament.add_player(player("LATE1")).unwrap();
        assert_eq!(tournament.history().games_played(&id("LATE1")), 0);
        assert_eq!(tournament.players().len(), 5);
    }

    #[test]
    fn test_zero_rounds_configured() {
        let mut tournament = four_player_tournament(0);
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let err = tournament
            .generate_round(&mut rng, &mut RandomResults::seeded(0))
            .unwrap_err();
        assert_eq!(err, TournamentError::OutOfRounds { rounds_count: 0 });
    }

    #[test]
    fn test_add_round_validates() {
        let mut tournament = four_player_tournament(3);

        let mut wrong_number = Round::new(2);
        wrong_number.add_match(Match::new(id("AB12345"), id("KB67890")));
        assert!(matches!(
            tournament.add_round(wrong_number),
            Err(TournamentError::UnexpectedRoundNumber { expected: 1, found: 2 })
        ));

        let mut unknown = Round::new(1);
        unknown.add_match(Match::new(id("AB12345"), id("NOPE1")));
        assert_eq!(
            tournament.add_round(unknown),
            Err(TournamentError::UnknownParticipant(id("NOPE1")))
        );

        let mut double = Round::new(1);
        double.add_match(Match::new(id("AB12345"), id("KB67890")));
        double.add_bye(id("AB12345"));
        assert!(matches!(
            tournament.add_round(double),
            Err(TournamentError::DoubleBooked { .. })
        ));
        assert_eq!(tournament.current_round_number(), 0);
    }

    #[test]
    fn test_add_round_rejects_repeat() {
        let mut tournament = four_player_tournament(3);

        let mut first = Round::new(1);
        first.add_match(Match::scored(id("AB12345"), id("KB67890"), Outcome::WhiteWins));
        tournament.add_round(first).unwrap();
        assert_eq!(tournament.player(&id("AB12345")).unwrap().points(), 1.0);

        let mut repeat = Round::new(2);
        repeat.add_match(Match::new(id("KB67890"), id("AB12345")));
        assert_eq!(
            tournament.add_round(repeat),
            Err(TournamentError::RepeatPairing(id("KB67890"), id("AB12345")))
        );
    }

    #[test]
    fn test_correct_result_adjusts_points() {
        let mut tournament = four_player_tournament(3);
        let mut round = Round::new(1);
        round.add_match(Match::scored(id("AB12345"), id("KB67890"), Outcome::WhiteWins));
        round.add_match(Match::new(id("EF11223"), id("VB44556")));
        tournament.add_round(round).unwrap();

        let previous = tournament.correct_result(1, 0, Outcome::BlackWins).unwrap();
        assert_eq!(previous, Some(Outcome::WhiteWins));
        assert_eq!(tournament.player(&id("AB12345")).unwrap().points(), 0.0);
        assert_eq!(tournament.player(&id("KB67890")).unwrap().points(), 1.0);

        let previous = tournament.correct_result(1, 1, Outcome::Draw).unwrap();
        assert_eq!(previous, None);
        assert_eq!(tournament.player(&id("EF11223")).unwrap().points(), 0.5);
        assert!(tournament.round(1).unwrap().is_complete());
    }

    #[test]
    fn test_correct_result_missing_targets() {
        let mut tournament = four_player_tournament(3);
        assert_eq!(
            tournament.correct_result(1, 0, Outcome::Draw),
            Err(TournamentError::RoundNotFound(1))
        );
        assert_eq!(
            tournament.correct_result(0, 0, Outcome::Draw),
            Err(TournamentError::RoundNotFound(0))
        );

        tournament.add_round(Round::new(1)).unwrap();
        assert_eq!(
            tournament.correct_result(1, 3, Outcome::Draw),
            Err(TournamentError::MatchNotFound { round: 1, index: 3 })
        );
    }

    #[test]
    fn test_set_rounds_count() {
        let mut tournament = four_player_tournament(3);
        tournament.add_round(Round::new(1)).unwrap();
        tournament.add_round(Round::new(2)).unwrap();

        assert!(tournament.set_rounds_count(1).is_err());
        tournament.set_rounds_count(2).unwrap();
        assert!(tournament.is_finished());
        assert_eq!(tournament.rounds_remaining(), 0);
    }

    #[test]
    fn test_setters_and_display() {
        let mut tournament = four_player_tournament(3);
        tournament.set_name("Open de Lyon");
        tournament.set_location("Lyon");
        tournament.set_start_date("2024-01-01");
        tournament.set_end_date("2024-01-03");
        tournament.set_description("Rapid");

        assert_eq!(tournament.description(), "Rapid");
        assert_eq!(
            tournament.to_string(),
            "Tournament: Open de Lyon at Lyon from 2024-01-01 to 2024-01-03, \
             Rounds: 3, Current Round: 0, Players: 4"
        );
    }
}
