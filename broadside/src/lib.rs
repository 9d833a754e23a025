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

//! Engine for a single-player game of Battleship against a computer opponent.
//!
//! The engine is split into layers, leaves first:
//!
//! - [`board`]: the square [`Grid`][board::Grid] of cell states and its coordinates.
//! - [`ships`] and [`fleet`]: ship records and the per-side list of ships, including
//!   detection of a destroyed fleet.
//! - [`placement`]: checked manual placement and randomized fleet generation.
//! - [`attack`]: resolution of a single shot against one side's grid and fleet.
//! - [`targeting`]: the opponent's hunt/target state machine.
//! - [`game`]: the phase and turn controller for one game instance.
//! - [`session`]: owns the active game and the deferred opponent move.
//!
//! All coordinates are zero-based `(row, col)` pairs. Labelling cells for humans is
//! left to the presentation layer.

pub mod attack;
pub mod board;
pub mod config;
pub mod fleet;
pub mod game;
pub mod placement;
pub mod session;
pub mod ships;
pub mod targeting;

pub use crate::{
    attack::{resolve_attack, AttackResult, Outcome},
    board::{Cell, Coordinate, Grid},
    config::GameConfig,
    fleet::Fleet,
    game::{Game, GameError, GameId, Phase, Side, TurnReport},
    placement::{can_place, place, place_fleet_randomly, remove_from_grid},
    session::{PendingMove, Session},
    ships::{Orientation, Ship, ShipClass},
    targeting::{Mode, Targeting},
};
