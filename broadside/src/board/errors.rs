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

//! Errors used by placement and attack resolution on a [`Grid`][crate::board::Grid].

use thiserror::Error;

use crate::board::Coordinate;

/// Reason why a ship could not be placed at a given position.
#[derive(Debug, Error, Copy, Clone, Eq, PartialEq)]
pub enum CannotPlaceReason {
    /// Ships must occupy at least one cell.
    #[error("ship length must be nonzero")]
    ZeroLength,
    /// One or more cells of the ship would fall outside the grid.
    #[error("insufficient space for the ship at the specified position")]
    OutOfBounds,
    /// One or more of the cells is already occupied by another ship.
    #[error("the specified position was already occupied")]
    AlreadyOccupied,
}

/// Reason why a particular cell could not be shot.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum CannotShootReason {
    /// The cell selected was out of bounds on the grid.
    OutOfBounds,
}

/// Error returned when trying to shoot a cell.
#[derive(Debug, Error, Copy, Clone, Eq, PartialEq)]
#[error("could not shoot cell {coord}: {reason:?}")]
pub struct ShotError {
    /// Reason why the cell could not be shot.
    reason: CannotShootReason,

    /// The coordinates of the cell.
    coord: Coordinate,
}

impl ShotError {
    /// Construct a shot error with the given reason for the specified cell.
    pub(crate) fn new(reason: CannotShootReason, coord: Coordinate) -> Self {
        Self { reason, coord }
    }

    /// Get the reason the shot failed.
    pub fn reason(&self) -> CannotShootReason {
        self.reason
    }

    /// Get the coordinate of the shot cell.
    pub fn coord(&self) -> Coordinate {
        self.coord
    }
}

/// Error returned when random fleet placement gave up.
///
/// Only happens when every full-board restart left some ship without room, which means
/// the grid is too small for the requested ships.
#[derive(Debug, Error, Copy, Clone, Eq, PartialEq)]
#[error(
    "could not fit a ship of length {length} after {restarts} full-board restarts \
     of {attempts_per_ship} attempts per ship"
)]
pub struct FleetPlacementError {
    /// Length of the ship that could not be placed on the final restart.
    length: usize,
    /// Number of per-ship attempts made before each restart.
    attempts_per_ship: usize,
    /// Number of full-board restarts made.
    restarts: usize,
}

impl FleetPlacementError {
    pub(crate) fn new(length: usize, attempts_per_ship: usize, restarts: usize) -> Self {
        Self {
            length,
            attempts_per_ship,
            restarts,
        }
    }

    /// Length of the ship that could not be placed.
    pub fn length(&self) -> usize {
        self.length
    }

    /// Number of attempts made for each ship before restarting.
    pub fn attempts_per_ship(&self) -> usize {
        self.attempts_per_ship
    }

    /// Number of full-board restarts made before giving up.
    pub fn restarts(&self) -> usize {
        self.restarts
    }
}
