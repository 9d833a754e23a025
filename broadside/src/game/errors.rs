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

use thiserror::Error;

use crate::{
    board::{CannotPlaceReason, FleetPlacementError, ShotError},
    game::{Phase, Side},
};

/// Reasons an action on a [`Game`][crate::game::Game] was refused.
#[derive(Debug, Error, Copy, Clone, Eq, PartialEq)]
pub enum GameError {
    /// The action belongs to a different phase of the game.
    #[error("action requires the {expected:?} phase but the game is in the {actual:?} phase")]
    WrongPhase { expected: Phase, actual: Phase },

    /// The action was taken by the side whose turn it is not.
    #[error("it is the {0:?}'s turn")]
    OutOfTurn(Side),

    /// There is no ship with that index in the fleet catalog.
    #[error("no ship with index {0} in the fleet")]
    UnknownShip(usize),

    /// The ship does not fit at the requested position.
    #[error("invalid placement: {0}")]
    InvalidPlacement(#[from] CannotPlaceReason),

    /// The game cannot start until every ship is placed.
    #[error("{0} ships still need to be placed")]
    FleetIncomplete(usize),

    /// Random placement could not build a complete fleet.
    #[error(transparent)]
    FleetPlacement(#[from] FleetPlacementError),

    /// The shot could not be fired.
    #[error(transparent)]
    Shot(#[from] ShotError),

    /// Every cell of the target grid has already been attacked.
    #[error("no cells left to attack")]
    NoMoveAvailable,
}
