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

//! Hunt/target move selection for the computer opponent.
//!
//! In [`Mode::Hunt`] the opponent fires at a uniformly random cell it has not shot yet.
//! A hit on a ship that does not sink it switches to [`Mode::Target`]: the neighbors of
//! every hit are queued, and once two hits line up the opponent extends the line past
//! either end before falling back to the queue. Sinking a ship clears everything and
//! returns to hunting.
use std::collections::VecDeque;

use log::debug;
use rand::{seq::SliceRandom, Rng};

use crate::{
    attack::{AttackResult, Outcome},
    board::{Coordinate, Grid},
    ships::Orientation,
};

/// Targeting mode of the opponent.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Mode {
    /// No wounded ship is known; fire at random.
    Hunt,
    /// Pursuing a ship that has been hit but not sunk.
    Target,
}

impl Default for Mode {
    fn default() -> Self {
        Mode::Hunt
    }
}

/// Memory of the opponent's targeting state machine.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct Targeting {
    /// Current mode.
    mode: Mode,

    /// Cells to try next while targeting, oldest first.
    queue: VecDeque<Coordinate>,

    /// Hits on the ship currently being pursued, in the order they were made.
    hits: Vec<Coordinate>,

    /// Most recent cell chosen by [`Targeting::choose_move`].
    last_move: Option<Coordinate>,
}

impl Targeting {
    /// Fresh targeting memory in hunt mode.
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget everything and return to hunting.
    pub fn reset(&mut self) {
        self.mode = Mode::Hunt;
        self.queue.clear();
        self.hits.clear();
        self.last_move = None;
    }

    /// Current targeting mode.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Candidate cells waiting to be tried, oldest first.
    pub fn queue(&self) -> impl Iterator<Item = &Coordinate> {
        self.queue.iter()
    }

    /// Hits on the ship currently being pursued.
    pub fn confirmed_hits(&self) -> &[Coordinate] {
        &self.hits
    }

    /// The last move this opponent chose.
    pub fn last_move(&self) -> Option<Coordinate> {
        self.last_move
    }

    /// Choose the next cell to fire at on `grid`. Only returns cells that are in bounds
    /// and not yet attacked. Returns `None` only if every cell has been attacked.
    pub fn choose_move<R: Rng + ?Sized>(
        &mut self,
        grid: &Grid,
        rng: &mut R,
    ) -> Option<Coordinate> {
        let choice = match self.mode {
            Mode::Hunt => hunt(grid, rng),
            Mode::Target => match self.directional_candidates(grid).first() {
                Some(&coord) => {
                    debug!("extending line of hits to {}", coord);
                    Some(coord)
                }
                None => match self.next_queued(grid) {
                    Some(coord) => {
                        debug!("trying queued neighbor {}", coord);
                        Some(coord)
                    }
                    None => {
                        debug!("no target candidates left, returning to hunt mode");
                        self.mode = Mode::Hunt;
                        self.hits.clear();
                        hunt(grid, rng)
                    }
                },
            },
        };
        if choice.is_some() {
            self.last_move = choice;
        }
        choice
    }

    /// Update memory with the result of firing at `coord` on `grid`. `grid` must already
    /// reflect the shot.
    pub fn record_result(&mut self, coord: Coordinate, result: &AttackResult, grid: &Grid) {
        match result.outcome {
            Outcome::Hit if result.sunk_ship.is_some() => {
                debug!("sank a ship at {}, returning to hunt mode", coord);
                self.mode = Mode::Hunt;
                self.queue.clear();
                self.hits.clear();
            }
            Outcome::Hit => {
                self.mode = Mode::Target;
                if !self.hits.contains(&coord) {
                    self.hits.push(coord);
                }
                for &neighbor in coord.neighbors().iter() {
                    if grid.contains(neighbor)
                        && !grid.is_attacked(neighbor)
                        && !self.queue.contains(&neighbor)
                    {
                        self.queue.push_back(neighbor);
                    }
                }
            }
            Outcome::Miss | Outcome::AlreadyAttacked => {}
        }
    }

    /// Cells one past each end of the line formed by the confirmed hits, filtered to
    /// those in bounds and not yet attacked. Empty with fewer than two hits.
    ///
    /// The line's orientation comes from the first two hits: same row means horizontal,
    /// anything else vertical.
    pub fn directional_candidates(&self, grid: &Grid) -> Vec<Coordinate> {
        let (first, second) = match self.hits.as_slice() {
            [first, second, ..] => (*first, *second),
            _ => return Vec::new(),
        };
        let orientation = if first.row == second.row {
            Orientation::Horizontal
        } else {
            Orientation::Vertical
        };
        let mut along: Vec<isize> = self
            .hits
            .iter()
            .map(|hit| match orientation {
                Orientation::Horizontal => hit.col,
                Orientation::Vertical => hit.row,
            })
            .collect();
        along.sort_unstable();
        let (low, high) = match (along.first(), along.last()) {
            (Some(&low), Some(&high)) => (low, high),
            _ => return Vec::new(),
        };
        let ends = match orientation {
            Orientation::Horizontal => [
                Coordinate::new(first.row, low - 1),
                Coordinate::new(first.row, high + 1),
            ],
            Orientation::Vertical => [
                Coordinate::new(low - 1, first.col),
                Coordinate::new(high + 1, first.col),
            ],
        };
        ends.iter()
            .copied()
            .filter(|&coord| grid.contains(coord) && !grid.is_attacked(coord))
            .collect()
    }

    /// Pop queued candidates until one is usable.
    fn next_queued(&mut self, grid: &Grid) -> Option<Coordinate> {
        while let Some(coord) = self.queue.pop_front() {
            if grid.contains(coord) && !grid.is_attacked(coord) {
                return Some(coord);
            }
        }
        None
    }
}

/// Pick a uniformly random cell that has not been attacked.
fn hunt<R: Rng + ?Sized>(grid: &Grid, rng: &mut R) -> Option<Coordinate> {
    let open: Vec<Coordinate> = grid.untargeted().collect();
    open.choose(rng).copied()
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;
    use crate::{
        attack::resolve_attack,
        fleet::Fleet,
        placement::place,
        ships::Ship,
    };

    fn hit() -> AttackResult {
        AttackResult {
            outcome: Outcome::Hit,
            sunk_ship: None,
        }
    }

    fn sunk() -> AttackResult {
        AttackResult {
            outcome: Outcome::Hit,
            sunk_ship: Some(Ship::new(2, Coordinate::new(0, 0), Orientation::Horizontal)),
        }
    }

    #[test]
    fn hit_enqueues_in_bounds_neighbors() {
        let grid = Grid::new(10);
        let mut targeting = Targeting::new();
        targeting.record_result(Coordinate::new(0, 0), &hit(), &grid);
        assert_eq!(targeting.mode(), Mode::Target);
        assert_eq!(targeting.confirmed_hits(), &[Coordinate::new(0, 0)]);
        let queued: Vec<_> = targeting.queue().copied().collect();
        assert_eq!(queued, vec![Coordinate::new(1, 0), Coordinate::new(0, 1)]);
    }

    #[test]
    fn queue_skips_duplicates_and_attacked_cells() {
        let mut grid = Grid::new(10);
        let mut fleet = Fleet::new();
        let mut targeting = Targeting::new();
        for &coord in &[Coordinate::new(4, 5), Coordinate::new(5, 5), Coordinate::new(5, 7)] {
            resolve_attack(&mut grid, &mut fleet, coord).unwrap();
        }
        targeting.record_result(Coordinate::new(5, 5), &hit(), &grid);
        targeting.record_result(Coordinate::new(5, 7), &hit(), &grid);
        let queued: Vec<_> = targeting.queue().copied().collect();
        // (5, 6) neighbors both hits but is only queued once.
        assert_eq!(
            queued,
            vec![
                Coordinate::new(6, 5),
                Coordinate::new(5, 4),
                Coordinate::new(5, 6),
                Coordinate::new(4, 7),
                Coordinate::new(6, 7),
                Coordinate::new(5, 8),
            ]
        );
    }

    #[test]
    fn directional_candidates_extend_the_line() {
        let grid = Grid::new(10);
        let mut targeting = Targeting::new();
        targeting.record_result(Coordinate::new(3, 5), &hit(), &grid);
        targeting.record_result(Coordinate::new(3, 4), &hit(), &grid);
        assert_eq!(
            targeting.directional_candidates(&grid),
            vec![Coordinate::new(3, 3), Coordinate::new(3, 6)]
        );
    }

    #[test]
    fn directional_candidates_vertical_and_filtered() {
        let mut grid = Grid::new(10);
        let mut fleet = Fleet::new();
        resolve_attack(&mut grid, &mut fleet, Coordinate::new(3, 0)).unwrap();
        let mut targeting = Targeting::new();
        targeting.record_result(Coordinate::new(0, 0), &hit(), &grid);
        targeting.record_result(Coordinate::new(1, 0), &hit(), &grid);
        targeting.record_result(Coordinate::new(2, 0), &hit(), &grid);
        // (-1, 0) is out of bounds and (3, 0) was already a miss.
        assert!(targeting.directional_candidates(&grid).is_empty());
    }

    #[test]
    fn target_mode_prefers_directional_candidates() {
        let grid = Grid::new(10);
        let mut rng = StdRng::seed_from_u64(0);
        let mut targeting = Targeting::new();
        targeting.record_result(Coordinate::new(3, 4), &hit(), &grid);
        targeting.record_result(Coordinate::new(3, 5), &hit(), &grid);
        assert_eq!(
            targeting.choose_move(&grid, &mut rng),
            Some(Coordinate::new(3, 3))
        );
        assert_eq!(targeting.last_move(), Some(Coordinate::new(3, 3)));
    }

    #[test]
    fn single_hit_drains_queue_in_order() {
        let mut grid = Grid::new(10);
        let mut fleet = Fleet::new();
        let mut rng = StdRng::seed_from_u64(0);
        let mut targeting = Targeting::new();
        targeting.record_result(Coordinate::new(5, 5), &hit(), &grid);
        // Up neighbor gets shot by someone else before the opponent tries it.
        resolve_attack(&mut grid, &mut fleet, Coordinate::new(4, 5)).unwrap();
        assert_eq!(
            targeting.choose_move(&grid, &mut rng),
            Some(Coordinate::new(6, 5))
        );
    }

    #[test]
    fn exhausted_queue_falls_back_to_random() {
        let mut grid = Grid::new(10);
        let mut fleet = Fleet::new();
        let mut rng = StdRng::seed_from_u64(1);
        let mut targeting = Targeting::new();
        targeting.record_result(Coordinate::new(0, 0), &hit(), &grid);
        for &coord in &[Coordinate::new(1, 0), Coordinate::new(0, 1)] {
            resolve_attack(&mut grid, &mut fleet, coord).unwrap();
        }
        let choice = targeting.choose_move(&grid, &mut rng).unwrap();
        assert!(grid.contains(choice));
        assert!(!grid.is_attacked(choice));
        assert_eq!(targeting.mode(), Mode::Hunt);
        assert!(targeting.confirmed_hits().is_empty());
    }

    #[test]
    fn sunk_resets_memory() {
        let grid = Grid::new(10);
        let mut targeting = Targeting::new();
        targeting.record_result(Coordinate::new(2, 2), &hit(), &grid);
        targeting.record_result(Coordinate::new(2, 3), &sunk(), &grid);
        assert_eq!(targeting.mode(), Mode::Hunt);
        assert_eq!(targeting.queue().count(), 0);
        assert!(targeting.confirmed_hits().is_empty());
    }

    #[test]
    fn misses_do_not_change_mode() {
        let grid = Grid::new(10);
        let mut targeting = Targeting::new();
        targeting.record_result(
            Coordinate::new(2, 2),
            &AttackResult {
                outcome: Outcome::Miss,
                sunk_ship: None,
            },
            &grid,
        );
        assert_eq!(targeting, Targeting::new());
    }

    #[test]
    fn no_move_on_full_grid() {
        let mut grid = Grid::new(2);
        let mut fleet = Fleet::new();
        for row in 0..2 {
            for col in 0..2 {
                resolve_attack(&mut grid, &mut fleet, Coordinate::new(row, col)).unwrap();
            }
        }
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(Targeting::new().choose_move(&grid, &mut rng), None);
    }

    #[test]
    fn hunts_down_a_single_ship() {
        let mut grid = Grid::new(10);
        let ship = place(&mut grid, 4, 6, 2, Orientation::Horizontal);
        let mut fleet = Fleet::from(vec![ship]);
        let mut rng = StdRng::seed_from_u64(11);
        let mut targeting = Targeting::new();
        let mut shots = 0;
        while !fleet.is_destroyed() {
            let coord = targeting.choose_move(&grid, &mut rng).unwrap();
            assert!(!grid.is_attacked(coord));
            let result = resolve_attack(&mut grid, &mut fleet, coord).unwrap();
            targeting.record_result(coord, &result, &grid);
            shots += 1;
        }
        assert!(shots <= 100);
        assert_eq!(targeting.mode(), Mode::Hunt);
        assert!(targeting.confirmed_hits().is_empty());
    }
}
