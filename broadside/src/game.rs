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

//! Phase and turn controller for a single game between the human player and the
//! computer opponent.
//!
//! A [`Game`] moves strictly forward through [`Phase::Setup`], [`Phase::Playing`] and
//! [`Phase::GameOver`]. To play again, construct a new [`Game`].
use std::fmt;

use log::{debug, info};
use rand::rngs::StdRng;
use uuid::Uuid;

use crate::{
    attack::{resolve_attack, AttackResult, Outcome},
    board::{Cell, Coordinate, Grid},
    config::GameConfig,
    fleet::Fleet,
    placement::{self, PlacementLimits},
    ships::{Orientation, Ship, ShipClass},
    targeting::Targeting,
};

pub use self::errors::GameError;

mod errors;

/// Phase of a game.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Phase {
    /// The player is placing ships. No shots may be fired.
    Setup,
    /// Both fleets are placed and the sides take turns firing.
    Playing,
    /// One fleet has been destroyed. Nothing else may happen in this game.
    GameOver,
}

/// One of the two sides of the game.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Side {
    /// The human player.
    Player,
    /// The computer opponent.
    Opponent,
}

impl Side {
    /// Get the other side.
    pub fn opponent(self) -> Self {
        match self {
            Side::Player => Side::Opponent,
            Side::Opponent => Side::Player,
        }
    }
}

/// Unique identity of a [`Game`] instance.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct GameId(Uuid);

impl GameId {
    fn new() -> Self {
        GameId(Uuid::new_v4())
    }
}

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Everything that happened as a result of a single shot.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct TurnReport {
    /// The side that fired.
    pub attacker: Side,
    /// The cell that was fired at.
    pub coord: Coordinate,
    /// Result of the shot on the defender's grid.
    pub result: AttackResult,
    /// The winner, if this shot ended the game.
    pub winner: Option<Side>,
}

impl TurnReport {
    /// Whether this shot ended the game.
    pub fn is_game_over(&self) -> bool {
        self.winner.is_some()
    }
}

/// A single game between the human player and the computer opponent.
#[derive(Debug)]
pub struct Game {
    /// Identity of this instance.
    id: GameId,

    /// Source of randomness for the opponent's fleet and moves.
    rng: StdRng,

    /// Bounds on random fleet placement.
    limits: PlacementLimits,

    /// Current phase.
    phase: Phase,

    /// Side whose turn it is. Only meaningful while playing.
    turn: Side,

    /// Set when the game ends.
    winner: Option<Side>,

    /// The player's grid, fired at by the opponent.
    player_grid: Grid,

    /// Player's placements by index into [`ShipClass::ALL`].
    player_ships: Vec<Option<Ship>>,

    /// The player's fleet once play begins.
    player_fleet: Fleet,

    /// The opponent's grid, fired at by the player.
    opponent_grid: Grid,

    /// The opponent's fleet once play begins.
    opponent_fleet: Fleet,

    /// The opponent's targeting memory.
    targeting: Targeting,
}

impl Game {
    /// Construct a new game in the setup phase. Panics if `config.size` is 0.
    pub fn new(config: &GameConfig) -> Self {
        let id = GameId::new();
        debug!("new {}x{} game {}", config.size, config.size, id);
        Self {
            id,
            rng: config.rng(),
            limits: config.limits,
            phase: Phase::Setup,
            turn: Side::Player,
            winner: None,
            player_grid: Grid::new(config.size),
            player_ships: vec![None; ShipClass::ALL.len()],
            player_fleet: Fleet::new(),
            opponent_grid: Grid::new(config.size),
            opponent_fleet: Fleet::new(),
            targeting: Targeting::new(),
        }
    }

    /// Identity of this game instance.
    pub fn id(&self) -> GameId {
        self.id
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Side whose turn it is.
    pub fn current(&self) -> Side {
        self.turn
    }

    /// The winner once the game is over.
    pub fn winner(&self) -> Option<Side> {
        self.winner
    }

    /// Ships each side places, in catalog order. Ship indexes refer to this list.
    pub fn catalog(&self) -> &'static [ShipClass] {
        ShipClass::ALL
    }

    /// The player's grid.
    pub fn player_grid(&self) -> &Grid {
        &self.player_grid
    }

    /// The opponent's grid. Presentation must hide unhit ships itself.
    pub fn opponent_grid(&self) -> &Grid {
        &self.opponent_grid
    }

    /// The player's fleet. Empty until play begins.
    pub fn player_fleet(&self) -> &Fleet {
        &self.player_fleet
    }

    /// The opponent's fleet. Empty until play begins.
    pub fn opponent_fleet(&self) -> &Fleet {
        &self.opponent_fleet
    }

    /// The opponent's targeting memory.
    pub fn targeting(&self) -> &Targeting {
        &self.targeting
    }

    /// Where the player placed the ship with the given catalog index, if placed.
    pub fn placement(&self, index: usize) -> Option<&Ship> {
        self.player_ships.get(index).and_then(Option::as_ref)
    }

    /// Catalog indexes of ships the player has not placed yet.
    pub fn pending_ships(&self) -> impl '_ + Iterator<Item = usize> {
        self.player_ships
            .iter()
            .enumerate()
            .filter(|(_, ship)| ship.is_none())
            .map(|(idx, _)| idx)
    }

    /// Whether every ship in the catalog has been placed.
    pub fn is_fleet_placed(&self) -> bool {
        self.player_ships.iter().all(Option::is_some)
    }

    /// Check if placing the ship would succeed, without placing it. A ship that is
    /// already placed is checked as if it had been picked up first.
    pub fn check_placement(
        &self,
        index: usize,
        anchor: Coordinate,
        orientation: Orientation,
    ) -> Result<(), GameError> {
        self.ensure_phase(Phase::Setup)?;
        let class = Self::class(index)?;
        let mut grid = self.player_grid.clone();
        if let Some(ship) = self.placement(index) {
            placement::remove_from_grid(&mut grid, ship);
        }
        placement::check_placement(&grid, class.len(), anchor, orientation)?;
        Ok(())
    }

    /// Place (or move) the ship with the given catalog index. If the new position is
    /// invalid, the grid is left unchanged and a moved ship stays where it was.
    pub fn place_ship(
        &mut self,
        index: usize,
        anchor: Coordinate,
        orientation: Orientation,
    ) -> Result<&Ship, GameError> {
        self.ensure_phase(Phase::Setup)?;
        let class = Self::class(index)?;
        let previous = self.player_ships[index].take();
        if let Some(ship) = &previous {
            placement::remove_from_grid(&mut self.player_grid, ship);
        }
        if let Err(reason) =
            placement::check_placement(&self.player_grid, class.len(), anchor, orientation)
        {
            if let Some(ship) = previous {
                for &coord in ship.cells() {
                    self.player_grid.set(coord, Cell::Ship);
                }
                self.player_ships[index] = Some(ship);
            }
            debug!(
                "rejected {} at {} {:?}: {}",
                class.name(),
                anchor,
                orientation,
                reason
            );
            return Err(reason.into());
        }
        let ship = placement::place(
            &mut self.player_grid,
            class.len(),
            anchor.row,
            anchor.col,
            orientation,
        );
        let placed: &Ship = self.player_ships[index].get_or_insert(ship);
        Ok(placed)
    }

    /// Pick up the ship with the given catalog index, returning where it was.
    pub fn remove_ship(&mut self, index: usize) -> Result<Option<Ship>, GameError> {
        self.ensure_phase(Phase::Setup)?;
        Self::class(index)?;
        let removed = self.player_ships[index].take();
        if let Some(ship) = &removed {
            placement::remove_from_grid(&mut self.player_grid, ship);
        }
        Ok(removed)
    }

    /// Pick up every placed ship.
    pub fn clear_ships(&mut self) -> Result<(), GameError> {
        self.ensure_phase(Phase::Setup)?;
        for slot in self.player_ships.iter_mut() {
            *slot = None;
        }
        self.player_grid.clear();
        Ok(())
    }

    /// Place every ship the player has not placed yet at random, leaving placed ships
    /// where they are.
    pub fn randomize_remaining(&mut self) -> Result<(), GameError> {
        self.ensure_phase(Phase::Setup)?;
        let pending: Vec<usize> = self.pending_ships().collect();
        let lengths: Vec<usize> = pending
            .iter()
            .map(|&idx| ShipClass::ALL[idx].len())
            .collect();
        let ships = placement::place_ships_randomly(
            &mut self.player_grid,
            &lengths,
            &mut self.rng,
            self.limits,
        )?;
        for (idx, ship) in pending.into_iter().zip(ships) {
            self.player_ships[idx] = Some(ship);
        }
        Ok(())
    }

    /// Begin play. Requires every ship to be placed. Places the opponent's fleet and
    /// gives the first turn to the player.
    pub fn start(&mut self) -> Result<(), GameError> {
        self.ensure_phase(Phase::Setup)?;
        let missing = self.pending_ships().count();
        if missing > 0 {
            return Err(GameError::FleetIncomplete(missing));
        }
        self.opponent_fleet = placement::place_fleet_randomly(
            &mut self.opponent_grid,
            &ShipClass::catalog(),
            &mut self.rng,
            self.limits,
        )?;
        let ships: Vec<Ship> = self.player_ships.iter().flatten().cloned().collect();
        self.player_fleet = Fleet::from(ships);
        self.targeting.reset();
        self.turn = Side::Player;
        self.phase = Phase::Playing;
        info!("game {} started", self.id);
        Ok(())
    }

    /// Fire at the opponent's grid. Only allowed on the player's turn. Firing at a cell
    /// that was already attacked does not use up the turn.
    pub fn player_attack(&mut self, coord: Coordinate) -> Result<TurnReport, GameError> {
        self.ensure_turn(Side::Player)?;
        let result = resolve_attack(&mut self.opponent_grid, &mut self.opponent_fleet, coord)?;
        Ok(self.finish_attack(Side::Player, coord, result))
    }

    /// Let the opponent choose a cell and fire at the player's grid. Only allowed on the
    /// opponent's turn.
    pub fn opponent_attack(&mut self) -> Result<TurnReport, GameError> {
        self.ensure_turn(Side::Opponent)?;
        let coord = self
            .targeting
            .choose_move(&self.player_grid, &mut self.rng)
            .ok_or(GameError::NoMoveAvailable)?;
        let result = resolve_attack(&mut self.player_grid, &mut self.player_fleet, coord)?;
        self.targeting.record_result(coord, &result, &self.player_grid);
        Ok(self.finish_attack(Side::Opponent, coord, result))
    }

    /// Check for the end of the game and hand over the turn.
    fn finish_attack(
        &mut self,
        attacker: Side,
        coord: Coordinate,
        result: AttackResult,
    ) -> TurnReport {
        let defeated = match attacker {
            Side::Player => self.opponent_fleet.is_destroyed(),
            Side::Opponent => self.player_fleet.is_destroyed(),
        };
        debug!("{:?} fired at {}: {:?}", attacker, coord, result.outcome);
        if defeated {
            self.phase = Phase::GameOver;
            self.winner = Some(attacker);
            info!("game {} over, {:?} wins", self.id, attacker);
        } else if result.outcome != Outcome::AlreadyAttacked {
            self.turn = attacker.opponent();
        }
        TurnReport {
            attacker,
            coord,
            result,
            winner: self.winner,
        }
    }

    fn ensure_phase(&self, expected: Phase) -> Result<(), GameError> {
        if self.phase == expected {
            Ok(())
        } else {
            Err(GameError::WrongPhase {
                expected,
                actual: self.phase,
            })
        }
    }

    fn ensure_turn(&self, side: Side) -> Result<(), GameError> {
        self.ensure_phase(Phase::Playing)?;
        if self.turn == side {
            Ok(())
        } else {
            Err(GameError::OutOfTurn(self.turn))
        }
    }

    fn class(index: usize) -> Result<ShipClass, GameError> {
        ShipClass::ALL
            .get(index)
            .copied()
            .ok_or(GameError::UnknownShip(index))
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new(&GameConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded(seed: u64) -> Game {
        Game::new(&GameConfig::default().with_seed(seed))
    }

    /// Lay the standard fleet out in rows 0, 2, 4, 6 and 8, starting at column 0.
    fn place_in_rows(game: &mut Game) {
        for idx in 0..game.catalog().len() {
            game.place_ship(
                idx,
                Coordinate::new(2 * idx as isize, 0),
                Orientation::Horizontal,
            )
            .unwrap();
        }
    }

    fn started(seed: u64) -> Game {
        let mut game = seeded(seed);
        place_in_rows(&mut game);
        game.start().unwrap();
        game
    }

    #[test]
    fn cannot_start_until_fleet_placed() {
        let mut game = seeded(1);
        game.place_ship(0, Coordinate::new(0, 0), Orientation::Horizontal)
            .unwrap();
        assert_eq!(game.start(), Err(GameError::FleetIncomplete(4)));
        assert_eq!(game.phase(), Phase::Setup);
        assert!(game.opponent_fleet().is_empty());
    }

    #[test]
    fn invalid_placement_leaves_grid_unchanged() {
        let mut game = seeded(1);
        game.place_ship(0, Coordinate::new(0, 0), Orientation::Horizontal)
            .unwrap();
        let before = game.player_grid().clone();
        assert_eq!(
            game.place_ship(1, Coordinate::new(0, 2), Orientation::Vertical),
            Err(GameError::InvalidPlacement(
                crate::board::CannotPlaceReason::AlreadyOccupied
            ))
        );
        assert_eq!(
            game.place_ship(1, Coordinate::new(-1, 9), Orientation::Vertical),
            Err(GameError::InvalidPlacement(
                crate::board::CannotPlaceReason::OutOfBounds
            ))
        );
        assert_eq!(game.player_grid(), &before);
        assert!(game.placement(1).is_none());
    }

    #[test]
    fn rejected_move_keeps_previous_position() {
        let mut game = seeded(1);
        game.place_ship(0, Coordinate::new(0, 0), Orientation::Horizontal)
            .unwrap();
        game.place_ship(1, Coordinate::new(1, 0), Orientation::Horizontal)
            .unwrap();
        let before = game.player_grid().clone();
        assert!(game
            .place_ship(1, Coordinate::new(0, 4), Orientation::Vertical)
            .is_err());
        assert_eq!(game.player_grid(), &before);
        assert_eq!(
            game.placement(1).map(Ship::anchor),
            Some(Coordinate::new(1, 0))
        );
    }

    #[test]
    fn moving_a_ship_may_overlap_its_old_position() {
        let mut game = seeded(1);
        game.place_ship(0, Coordinate::new(0, 0), Orientation::Horizontal)
            .unwrap();
        assert_eq!(
            game.check_placement(0, Coordinate::new(0, 0), Orientation::Vertical),
            Ok(())
        );
        let ship = game
            .place_ship(0, Coordinate::new(0, 0), Orientation::Vertical)
            .unwrap()
            .clone();
        assert_eq!(ship.orientation(), Orientation::Vertical);
        assert_eq!(game.player_grid().count(Cell::Ship), 5);
        assert_eq!(game.player_grid()[Coordinate::new(0, 1)], Cell::Empty);
    }

    #[test]
    fn remove_and_clear() {
        let mut game = seeded(1);
        place_in_rows(&mut game);
        let removed = game.remove_ship(2).unwrap().unwrap();
        assert_eq!(removed.len(), 3);
        assert_eq!(game.pending_ships().collect::<Vec<_>>(), vec![2]);
        assert_eq!(game.remove_ship(2), Ok(None));
        assert_eq!(game.remove_ship(9), Err(GameError::UnknownShip(9)));
        game.clear_ships().unwrap();
        assert_eq!(game.pending_ships().count(), 5);
        assert_eq!(game.player_grid(), &Grid::new(10));
    }

    #[test]
    fn randomize_fills_only_pending_ships() {
        let mut game = seeded(5);
        game.place_ship(0, Coordinate::new(9, 0), Orientation::Horizontal)
            .unwrap();
        game.randomize_remaining().unwrap();
        assert!(game.is_fleet_placed());
        assert_eq!(
            game.placement(0).map(Ship::anchor),
            Some(Coordinate::new(9, 0))
        );
        assert_eq!(game.player_grid().count(Cell::Ship), 17);
        for (idx, class) in game.catalog().iter().enumerate() {
            assert_eq!(game.placement(idx).map(Ship::len), Some(class.len()));
        }
    }

    #[test]
    fn start_places_opponent_and_gives_player_first_turn() {
        let mut game = started(3);
        assert_eq!(game.phase(), Phase::Playing);
        assert_eq!(game.current(), Side::Player);
        assert_eq!(game.opponent_fleet().len(), 5);
        assert_eq!(game.player_fleet().len(), 5);
        assert_eq!(game.opponent_grid().count(Cell::Ship), 17);
        assert_eq!(
            game.place_ship(0, Coordinate::new(0, 0), Orientation::Horizontal),
            Err(GameError::WrongPhase {
                expected: Phase::Setup,
                actual: Phase::Playing
            })
        );
    }

    #[test]
    fn turns_alternate_one_for_one() {
        let mut game = started(3);
        assert_eq!(
            game.opponent_attack(),
            Err(GameError::OutOfTurn(Side::Player))
        );
        let report = game.player_attack(Coordinate::new(0, 0)).unwrap();
        assert_eq!(report.attacker, Side::Player);
        assert_eq!(game.current(), Side::Opponent);
        assert_eq!(
            game.player_attack(Coordinate::new(0, 1)),
            Err(GameError::OutOfTurn(Side::Opponent))
        );
        let report = game.opponent_attack().unwrap();
        assert_eq!(report.attacker, Side::Opponent);
        assert_eq!(game.current(), Side::Player);
    }

    #[test]
    fn repeated_shot_keeps_the_turn() {
        let mut game = started(3);
        game.player_attack(Coordinate::new(4, 4)).unwrap();
        game.opponent_attack().unwrap();
        let report = game.player_attack(Coordinate::new(4, 4)).unwrap();
        assert_eq!(report.result.outcome, Outcome::AlreadyAttacked);
        assert_eq!(game.current(), Side::Player);
    }

    #[test]
    fn out_of_bounds_shot_is_refused() {
        let mut game = started(3);
        assert!(matches!(
            game.player_attack(Coordinate::new(10, 0)),
            Err(GameError::Shot(_))
        ));
        assert_eq!(game.current(), Side::Player);
    }

    #[test]
    fn sinking_every_ship_ends_the_game() {
        let mut game = started(8);
        let targets: Vec<Coordinate> = game
            .opponent_fleet()
            .iter()
            .flat_map(|ship| ship.cells().to_vec())
            .collect();
        let mut sunk = 0;
        for (i, &coord) in targets.iter().enumerate() {
            let report = game.player_attack(coord).unwrap();
            if report.result.sunk_ship.is_some() {
                sunk += 1;
            }
            if i + 1 == targets.len() {
                assert_eq!(report.winner, Some(Side::Player));
            } else {
                assert!(!report.is_game_over());
                game.opponent_attack().unwrap();
            }
        }
        assert_eq!(sunk, 5);
        assert_eq!(game.phase(), Phase::GameOver);
        assert_eq!(game.winner(), Some(Side::Player));
        assert!(matches!(
            game.player_attack(Coordinate::new(9, 9)),
            Err(GameError::WrongPhase { .. })
        ));
        assert!(matches!(
            game.opponent_attack(),
            Err(GameError::WrongPhase { .. })
        ));
        assert!(matches!(
            game.randomize_remaining(),
            Err(GameError::WrongPhase { .. })
        ));
    }
}
