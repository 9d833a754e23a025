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

//! Placing ships onto a [`Grid`], either at a requested position or at random.
use log::{debug, trace};
use rand::Rng;

use crate::{
    board::{CannotPlaceReason, Cell, Coordinate, FleetPlacementError, Grid},
    fleet::Fleet,
    ships::{Orientation, Ship},
};

/// Bounds on the random placement search.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct PlacementLimits {
    /// Random positions tried for a single ship before the whole board is restarted.
    pub attempts_per_ship: usize,
    /// Full-board restarts allowed before giving up.
    pub max_restarts: usize,
}

impl Default for PlacementLimits {
    fn default() -> Self {
        Self {
            attempts_per_ship: 200,
            max_restarts: 10,
        }
    }
}

/// Check whether a ship of `len` cells can be placed starting at `anchor` and
/// extending along `orientation`, returning the reason if not.
pub fn check_placement(
    grid: &Grid,
    len: usize,
    anchor: Coordinate,
    orientation: Orientation,
) -> Result<(), CannotPlaceReason> {
    if len == 0 {
        return Err(CannotPlaceReason::ZeroLength);
    }
    for offset in 0..len as isize {
        match grid.get(anchor.step(orientation, offset)) {
            None => return Err(CannotPlaceReason::OutOfBounds),
            Some(Cell::Empty) => {}
            Some(_) => return Err(CannotPlaceReason::AlreadyOccupied),
        }
    }
    Ok(())
}

/// Returns true if every one of the `len` cells starting at `(row, col)` and extending
/// along `orientation` is inside the grid and empty.
pub fn can_place(
    grid: &Grid,
    len: usize,
    row: isize,
    col: isize,
    orientation: Orientation,
) -> bool {
    check_placement(grid, len, Coordinate::new(row, col), orientation).is_ok()
}

/// Place a ship of `len` cells at `(row, col)`, marking its cells on the grid.
///
/// The caller must have checked the position with [`can_place`]. Panics if the
/// placement is invalid rather than leaving a partially-written ship on the grid.
pub fn place(
    grid: &mut Grid,
    len: usize,
    row: isize,
    col: isize,
    orientation: Orientation,
) -> Ship {
    let anchor = Coordinate::new(row, col);
    if let Err(reason) = check_placement(grid, len, anchor, orientation) {
        panic!(
            "cannot place ship of length {} at {} {:?}: {}",
            len, anchor, orientation, reason
        );
    }
    let ship = Ship::new(len, anchor, orientation);
    for &coord in ship.cells() {
        grid.set(coord, Cell::Ship);
    }
    ship
}

/// Reset the cells occupied by `ship` back to empty.
pub fn remove_from_grid(grid: &mut Grid, ship: &Ship) {
    for &coord in ship.cells() {
        if let Some(cell) = grid.get_mut(coord) {
            *cell = Cell::Empty;
        }
    }
}

/// Clear `grid` and place one ship for every length in `catalog` at a random position.
///
/// Returns the complete fleet, or an error if the search gave up. On error the grid is
/// left empty; a partial fleet is never returned.
pub fn place_fleet_randomly<R: Rng + ?Sized>(
    grid: &mut Grid,
    catalog: &[usize],
    rng: &mut R,
    limits: PlacementLimits,
) -> Result<Fleet, FleetPlacementError> {
    grid.clear();
    place_ships_randomly(grid, catalog, rng, limits).map(Fleet::from)
}

/// Place one ship for every length in `lengths` at random positions, leaving any ships
/// already on the grid where they are.
///
/// Each ship gets `limits.attempts_per_ship` random tries. If any ship runs out, every
/// ship placed by this call is removed and the sequence starts over, up to
/// `limits.max_restarts` times. On error the grid is back in its original state.
pub fn place_ships_randomly<R: Rng + ?Sized>(
    grid: &mut Grid,
    lengths: &[usize],
    rng: &mut R,
    limits: PlacementLimits,
) -> Result<Vec<Ship>, FleetPlacementError> {
    let mut failed_len = 0;
    for restart in 0..=limits.max_restarts {
        let mut placed = Vec::with_capacity(lengths.len());
        for &len in lengths {
            match place_one_randomly(grid, len, rng, limits.attempts_per_ship) {
                Some(ship) => placed.push(ship),
                None => {
                    failed_len = len;
                    break;
                }
            }
        }
        if placed.len() == lengths.len() {
            trace!("placed {} ships after {} restarts", placed.len(), restart);
            return Ok(placed);
        }
        debug!(
            "no room for ship of length {} after {} attempts, restarting placement ({}/{})",
            failed_len, limits.attempts_per_ship, restart, limits.max_restarts
        );
        for ship in &placed {
            remove_from_grid(grid, ship);
        }
    }
    Err(FleetPlacementError::new(
        failed_len,
        limits.attempts_per_ship,
        limits.max_restarts,
    ))
}

/// Try random anchors and orientations for a single ship.
fn place_one_randomly<R: Rng + ?Sized>(
    grid: &mut Grid,
    len: usize,
    rng: &mut R,
    attempts: usize,
) -> Option<Ship> {
    let size = grid.size() as isize;
    for _ in 0..attempts {
        let orientation: Orientation = rng.gen();
        let row = rng.gen_range(0, size);
        let col = rng.gen_range(0, size);
        if can_place(grid, len, row, col, orientation) {
            return Some(place(grid, len, row, col, orientation));
        }
    }
    None
}
