// Copyright 2020 Zachary Stewart
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Whole games played out through the session, with the human side driven by a second
//! targeting state machine.
use std::{
    collections::HashSet,
    time::{Duration, Instant},
};

use broadside::{
    Cell, Coordinate, GameConfig, Mode, Outcome, Phase, Session, Side, Targeting,
};
use rand::{rngs::StdRng, SeedableRng};

fn new_session(seed: u64) -> Session {
    let mut session = Session::new(
        GameConfig::default()
            .with_seed(seed)
            .with_opponent_delay(Duration::from_millis(250)),
    );
    session.randomize_remaining().unwrap();
    session.start().unwrap();
    session
}

#[test]
fn simulated_games_obey_the_rules() {
    for seed in 0..20 {
        let mut session = new_session(seed);
        let mut player_ai = Targeting::new();
        let mut rng = StdRng::seed_from_u64(seed ^ 0xdead_beef);
        let mut now = Instant::now();

        let mut opponent_shots = HashSet::new();
        let mut player_turns = 0;
        let mut opponent_turns = 0;
        let mut opponent_sunk = 0;
        let mut player_sunk = 0;

        while session.game().phase() == Phase::Playing {
            assert_eq!(session.game().current(), Side::Player);
            let coord = player_ai
                .choose_move(session.game().opponent_grid(), &mut rng)
                .unwrap();
            let report = session.player_attack(coord, now).unwrap();
            player_ai.record_result(coord, &report.result, session.game().opponent_grid());
            player_turns += 1;
            assert_ne!(report.result.outcome, Outcome::AlreadyAttacked);
            if report.result.sunk_ship.is_some() {
                player_sunk += 1;
            }
            if report.is_game_over() {
                assert_eq!(report.winner, Some(Side::Player));
                assert_eq!(session.pending(), None);
                break;
            }

            now = session.next_deadline().unwrap();
            let report = session.poll(now).unwrap().unwrap();
            opponent_turns += 1;
            assert_eq!(report.attacker, Side::Opponent);
            assert!(session.game().player_grid().contains(report.coord));
            assert!(
                opponent_shots.insert(report.coord),
                "opponent fired at {} twice",
                report.coord
            );
            if report.result.sunk_ship.is_some() {
                opponent_sunk += 1;
                let targeting = session.game().targeting();
                assert_eq!(targeting.mode(), Mode::Hunt);
                assert_eq!(targeting.queue().count(), 0);
                assert!(targeting.confirmed_hits().is_empty());
            }
            if report.is_game_over() {
                assert_eq!(report.winner, Some(Side::Opponent));
                break;
            }
        }

        let game = session.game();
        assert_eq!(game.phase(), Phase::GameOver);
        // Exactly one opponent move per non-final player move.
        match game.winner() {
            Some(Side::Player) => {
                assert_eq!(opponent_turns + 1, player_turns);
                assert_eq!(player_sunk, 5);
                assert!(game.opponent_fleet().is_destroyed());
                assert!(!game.player_fleet().is_destroyed());
            }
            Some(Side::Opponent) => {
                assert_eq!(opponent_turns, player_turns);
                assert_eq!(opponent_sunk, 5);
                assert!(game.player_fleet().is_destroyed());
                assert!(!game.opponent_fleet().is_destroyed());
            }
            None => panic!("game over without a winner"),
        }
        assert_eq!(
            game.player_grid().count(Cell::Hit) + game.player_grid().count(Cell::Miss),
            opponent_turns
        );
    }
}

#[test]
fn fleets_never_overlap_and_stay_in_bounds() {
    for seed in 0..20 {
        let session = new_session(seed);
        let game = session.game();
        for fleet in &[game.player_fleet(), game.opponent_fleet()] {
            assert_eq!(fleet.len(), 5);
            let mut seen = HashSet::new();
            for ship in fleet.iter() {
                for &coord in ship.cells() {
                    assert!(coord.row >= 0 && coord.row < 10);
                    assert!(coord.col >= 0 && coord.col < 10);
                    assert!(seen.insert(coord), "ships overlap at {}", coord);
                }
            }
        }
    }
}

#[test]
fn game_over_rejects_everything() {
    let mut session = new_session(42);
    let mut now = Instant::now();
    let targets: Vec<Coordinate> = session
        .game()
        .opponent_fleet()
        .iter()
        .flat_map(|ship| ship.cells().to_vec())
        .collect();
    for coord in targets {
        let report = session.player_attack(coord, now).unwrap();
        if report.is_game_over() {
            break;
        }
        now = session.next_deadline().unwrap();
        session.poll(now).unwrap();
    }
    assert_eq!(session.game().winner(), Some(Side::Player));
    assert!(session.player_attack(Coordinate::new(0, 0), now).is_err());
    assert!(session.start().is_err());
    assert!(session.clear_ships().is_err());

    let id = session.restart();
    assert_eq!(session.game().id(), id);
    assert_eq!(session.game().phase(), Phase::Setup);
    assert_eq!(session.game().winner(), None);
}
