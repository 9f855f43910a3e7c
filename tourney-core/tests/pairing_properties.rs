//! Property-based tests for the pairing engine and round generation
//!
//! These tests run whole tournaments with random sizes, seeds and round
//! counts and check the invariants that must hold for every run.

use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::collections::BTreeSet;
use tourney_core::{
    Player, PlayerId, RandomResults, Sex, Tournament, TournamentConfig, TournamentError,
};

fn tournament_with(players: usize, rounds: usize) -> Tournament {
    let mut tournament = Tournament::new(TournamentConfig::new("Property").with_rounds(rounds));
    for i in 0..players {
        let player = Player::new(format!("P{:04}", i), "Player", format!("{}", i), "2000-01-01", Sex::Male)
            .expect("valid player");
        tournament.add_player(player).expect("unique player");
    }
    tournament
}

fn play_all(tournament: &mut Tournament, seed: u64) {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut results = RandomResults::seeded(seed.wrapping_add(1));
    while !tournament.is_finished() {
        tournament
            .generate_round(&mut rng, &mut results)
            .expect("round below ceiling");
    }
}

fn unordered(a: &PlayerId, b: &PlayerId) -> (PlayerId, PlayerId) {
    if a < b {
        (a.clone(), b.clone())
    } else {
        (b.clone(), a.clone())
    }
}

proptest! {
    #[test]
    fn test_no_pairing_ever_repeats(players in 0usize..14, rounds in 1usize..10, seed in any::<u64>()) {
        let mut tournament = tournament_with(players, rounds);
        play_all(&mut tournament, seed);

        let mut seen = BTreeSet::new();
        for round in tournament.rounds() {
            for game in round.matches() {
                prop_assert!(game.white() != game.black());
                prop_assert!(
                    seen.insert(unordered(game.white(), game.black())),
                    "{} vs {} repeated in {}", game.white(), game.black(), round.name()
                );
            }
        }
    }

    #[test]
    fn test_history_is_symmetric(players in 2usize..12, rounds in 1usize..8, seed in any::<u64>()) {
        let mut tournament = tournament_with(players, rounds);
        play_all(&mut tournament, seed);

        let history = tournament.history();
        for a in tournament.players() {
            for b in tournament.players() {
                prop_assert_eq!(history.has_faced(a.id(), b.id()), history.has_faced(b.id(), a.id()));
            }
        }
    }

    #[test]
    fn test_every_player_used_once_per_round(players in 0usize..14, rounds in 1usize..6, seed in any::<u64>()) {
        let mut tournament = tournament_with(players, rounds);
        play_all(&mut tournament, seed);

        for round in tournament.rounds() {
            let ids: Vec<_> = round.participants().collect();
            let unique: BTreeSet<_> = ids.iter().collect();
            prop_assert_eq!(ids.len(), players);
            prop_assert_eq!(unique.len(), players);
        }
    }

    #[test]
    fn test_round_ceiling_holds(players in 2usize..10, rounds in 0usize..6, seed in any::<u64>()) {
        let mut tournament = tournament_with(players, rounds);
        play_all(&mut tournament, seed);
        prop_assert_eq!(tournament.current_round_number(), rounds);

        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut results = RandomResults::seeded(seed);
        let err = tournament.generate_round(&mut rng, &mut results).unwrap_err();
        prop_assert_eq!(err, TournamentError::OutOfRounds { rounds_count: rounds });
        prop_assert_eq!(tournament.current_round_number(), rounds);
    }

    #[test]
    fn test_points_match_games_played(players in 2usize..12, rounds in 1usize..6, seed in any::<u64>()) {
        let mut tournament = tournament_with(players, rounds);
        play_all(&mut tournament, seed);

        let total: f32 = tournament.players().iter().map(|p| p.points()).sum();
        let games: usize = tournament.rounds().iter().map(|r| r.matches().len()).sum();
        prop_assert!((total - games as f32).abs() < 1e-3);
    }

    #[test]
    fn test_serialization_round_trip(players in 0usize..10, rounds in 0usize..5, seed in any::<u64>()) {
        let mut tournament = tournament_with(players, rounds);
        play_all(&mut tournament, seed);

        let json = tournament.to_json().unwrap();
        let restored = Tournament::from_json(&json).unwrap();
        prop_assert_eq!(restored, tournament);
    }
}
