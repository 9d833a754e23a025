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

//! Resolution of a single shot against one side's grid and fleet. The same rules apply
//! to both sides.
use log::{trace, warn};

use crate::{
    board::{CannotShootReason, Cell, Coordinate, Grid, ShotError},
    fleet::Fleet,
    ships::Ship,
};

/// What a shot did to the targeted cell.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Outcome {
    /// The shot struck part of a ship.
    Hit,
    /// The shot landed in open water.
    Miss,
    /// The cell had already been shot. Nothing changed.
    AlreadyAttacked,
}

/// Result of a resolved shot.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct AttackResult {
    /// What happened to the targeted cell.
    pub outcome: Outcome,
    /// The ship sunk by this shot, if this shot hit its last remaining cell.
    pub sunk_ship: Option<Ship>,
}

impl AttackResult {
    fn new(outcome: Outcome) -> Self {
        Self {
            outcome,
            sunk_ship: None,
        }
    }

    /// Whether the shot hit a ship.
    pub fn is_hit(&self) -> bool {
        self.outcome == Outcome::Hit
    }
}

/// Fire at `coord` on `grid`, updating the owning ship in `fleet`.
///
/// Already-shot cells are reported as [`Outcome::AlreadyAttacked`] without modifying
/// anything. A ship is reported in [`AttackResult::sunk_ship`] exactly once: by the shot
/// that hits its last unhit cell.
pub fn resolve_attack(
    grid: &mut Grid,
    fleet: &mut Fleet,
    coord: Coordinate,
) -> Result<AttackResult, ShotError> {
    let cell = match grid.get_mut(coord) {
        None => return Err(ShotError::new(CannotShootReason::OutOfBounds, coord)),
        Some(cell) => cell,
    };
    match *cell {
        Cell::Hit | Cell::Miss => {
            trace!("{} was already attacked", coord);
            Ok(AttackResult::new(Outcome::AlreadyAttacked))
        }
        Cell::Empty => {
            *cell = Cell::Miss;
            trace!("miss at {}", coord);
            Ok(AttackResult::new(Outcome::Miss))
        }
        Cell::Ship => {
            *cell = Cell::Hit;
            trace!("hit at {}", coord);
            let mut result = AttackResult::new(Outcome::Hit);
            let owner = match fleet.ship_at(coord) {
                Some(idx) => idx,
                None => {
                    warn!("hit at {} does not belong to any ship in the fleet", coord);
                    return Ok(result);
                }
            };
            let all_hit = match fleet.get(owner) {
                Some(ship) if !ship.is_sunk() => {
                    ship.cells().iter().all(|&c| grid.get(c) == Some(Cell::Hit))
                }
                _ => false,
            };
            if all_hit {
                if let Some(ship) = fleet.get_mut(owner) {
                    ship.mark_sunk();
                    result.sunk_ship = Some(ship.clone());
                }
            }
            Ok(result)
        }
    }
}
