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

//! Types used for defining ships and their placement.
use rand::{
    distributions::{Distribution, Standard},
    Rng,
};

use crate::board::Coordinate;

/// Placement orientation of a ship.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Orientation {
    /// The ship extends to the right of its anchor.
    Horizontal,
    /// The ship extends downward from its anchor.
    Vertical,
}

impl Orientation {
    /// Get the other orientation.
    pub fn rotated(self) -> Self {
        match self {
            Orientation::Horizontal => Orientation::Vertical,
            Orientation::Vertical => Orientation::Horizontal,
        }
    }
}

impl Distribution<Orientation> for Standard {
    /// Both orientations are equally likely.
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Orientation {
        if rng.gen() {
            Orientation::Horizontal
        } else {
            Orientation::Vertical
        }
    }
}

/// Ship classes of the standard fleet.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ShipClass {
    /// Carrier: length 5.
    Carrier,
    /// Battleship: length 4.
    Battleship,
    /// Cruiser: length 3.
    Cruiser,
    /// Submarine: length 3.
    Submarine,
    /// Destroyer: length 2.
    Destroyer,
}

impl ShipClass {
    /// Every ship class in the order the fleet is placed.
    pub const ALL: &'static [ShipClass] = &[
        ShipClass::Carrier,
        ShipClass::Battleship,
        ShipClass::Cruiser,
        ShipClass::Submarine,
        ShipClass::Destroyer,
    ];

    /// Get the length of this ship class.
    pub fn len(self) -> usize {
        match self {
            ShipClass::Carrier => 5,
            ShipClass::Battleship => 4,
            ShipClass::Cruiser => 3,
            ShipClass::Submarine => 3,
            ShipClass::Destroyer => 2,
        }
    }

    /// Lowercase name of this ship class.
    pub fn name(self) -> &'static str {
        match self {
            ShipClass::Carrier => "carrier",
            ShipClass::Battleship => "battleship",
            ShipClass::Cruiser => "cruiser",
            ShipClass::Submarine => "submarine",
            ShipClass::Destroyer => "destroyer",
        }
    }

    /// Lengths of the standard fleet, in placement order.
    pub fn catalog() -> Vec<usize> {
        Self::ALL.iter().map(|class| class.len()).collect()
    }
}

/// A ship placed on a grid.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct Ship {
    /// Coordinates occupied by the ship, starting from the anchor.
    cells: Vec<Coordinate>,

    /// Direction the ship extends from the anchor.
    orientation: Orientation,

    /// Set once every cell has been hit. Never cleared.
    sunk: bool,
}

impl Ship {
    /// Build the record of a ship of `len` cells starting at `anchor`. Does not touch
    /// any grid; see [`place`][crate::placement::place].
    pub(crate) fn new(len: usize, anchor: Coordinate, orientation: Orientation) -> Self {
        Self {
            cells: (0..len as isize)
                .map(|offset| anchor.step(orientation, offset))
                .collect(),
            orientation,
            sunk: false,
        }
    }

    /// Number of cells this ship occupies.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// The coordinates this ship occupies, starting from its anchor.
    pub fn cells(&self) -> &[Coordinate] {
        &self.cells
    }

    /// The first cell of the ship.
    pub fn anchor(&self) -> Coordinate {
        // Placement rejects zero-length ships so there is always a first cell.
        self.cells[0]
    }

    /// Direction the ship extends from its anchor.
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Whether this ship has been sunk.
    pub fn is_sunk(&self) -> bool {
        self.sunk
    }

    /// Returns true if the ship occupies `coord`.
    pub fn occupies(&self, coord: Coordinate) -> bool {
        self.cells.contains(&coord)
    }

    /// Mark this ship as sunk.
    pub(crate) fn mark_sunk(&mut self) {
        self.sunk = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_catalog() {
        assert_eq!(ShipClass::catalog(), vec![5, 4, 3, 3, 2]);
    }

    #[test]
    fn ship_cells_follow_orientation() {
        let ship = Ship::new(3, Coordinate::new(1, 2), Orientation::Vertical);
        assert_eq!(
            ship.cells(),
            &[
                Coordinate::new(1, 2),
                Coordinate::new(2, 2),
                Coordinate::new(3, 2)
            ]
        );
        assert_eq!(ship.anchor(), Coordinate::new(1, 2));
        assert!(ship.occupies(Coordinate::new(3, 2)));
        assert!(!ship.occupies(Coordinate::new(1, 3)));
        assert!(!ship.is_sunk());
    }
}
