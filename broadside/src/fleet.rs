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

//! The list of ships belonging to one side.

use crate::{board::Coordinate, ships::Ship};

/// All of the ships for a single side.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct Fleet {
    ships: Vec<Ship>,
}

impl Fleet {
    /// Construct an empty fleet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of ships in the fleet.
    pub fn len(&self) -> usize {
        self.ships.len()
    }

    /// Whether the fleet has no ships at all.
    pub fn is_empty(&self) -> bool {
        self.ships.is_empty()
    }

    /// Get an iterator over all ships in the fleet.
    pub fn iter(&self) -> impl Iterator<Item = &Ship> {
        self.ships.iter()
    }

    /// Get the ship at the given index.
    pub fn get(&self, idx: usize) -> Option<&Ship> {
        self.ships.get(idx)
    }

    pub(crate) fn get_mut(&mut self, idx: usize) -> Option<&mut Ship> {
        self.ships.get_mut(idx)
    }

    /// Find the index of the ship occupying `coord`, if any.
    pub fn ship_at(&self, coord: Coordinate) -> Option<usize> {
        self.ships.iter().position(|ship| ship.occupies(coord))
    }

    /// Number of ships not yet sunk.
    pub fn remaining(&self) -> usize {
        self.ships.iter().filter(|ship| !ship.is_sunk()).count()
    }

    /// Returns true if the fleet has at least one ship and every ship is sunk. An empty
    /// fleet is never destroyed, so a side that has not finished placing cannot lose.
    pub fn is_destroyed(&self) -> bool {
        !self.ships.is_empty() && self.ships.iter().all(Ship::is_sunk)
    }
}

impl From<Vec<Ship>> for Fleet {
    fn from(ships: Vec<Ship>) -> Self {
        Self { ships }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ships::Orientation;

    fn two_ships() -> Fleet {
        Fleet::from(vec![
            Ship::new(2, Coordinate::new(0, 0), Orientation::Horizontal),
            Ship::new(3, Coordinate::new(2, 0), Orientation::Vertical),
        ])
    }

    #[test]
    fn empty_fleet_is_never_destroyed() {
        assert!(!Fleet::new().is_destroyed());
    }

    #[test]
    fn destroyed_only_when_every_ship_sunk() {
        let mut fleet = two_ships();
        assert!(!fleet.is_destroyed());
        fleet.get_mut(0).unwrap().mark_sunk();
        assert!(!fleet.is_destroyed());
        assert_eq!(fleet.remaining(), 1);
        fleet.get_mut(1).unwrap().mark_sunk();
        assert!(fleet.is_destroyed());
        assert_eq!(fleet.remaining(), 0);
    }

    #[test]
    fn ship_at_finds_owner() {
        let fleet = two_ships();
        assert_eq!(fleet.ship_at(Coordinate::new(0, 1)), Some(0));
        assert_eq!(fleet.ship_at(Coordinate::new(4, 0)), Some(1));
        assert_eq!(fleet.ship_at(Coordinate::new(1, 0)), None);
    }
}
