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

use std::fmt;

use crate::ships::Orientation;

/// The coordinates of a cell in a [`Grid`][crate::board::Grid].
///
/// Components are signed so that anchors computed relative to some other cell (for
/// example a ship picked up by its third segment near the top edge) can go negative
/// and still be rejected by bounds checks instead of wrapping around.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Coordinate {
    /// Vertical position of the cell, counting down from the top row.
    pub row: isize,
    /// Horizontal position of the cell, counting right from the left column.
    pub col: isize,
}

impl Coordinate {
    /// Construct a [`Coordinate`] from the given `row` and `col`.
    pub fn new(row: isize, col: isize) -> Self {
        Self { row, col }
    }

    /// Get the coordinate `dist` cells away from this one along `orientation`.
    /// Horizontal steps increase `col`, vertical steps increase `row`.
    pub fn step(self, orientation: Orientation, dist: isize) -> Self {
        match orientation {
            Orientation::Horizontal => Self::new(self.row, self.col + dist),
            Orientation::Vertical => Self::new(self.row + dist, self.col),
        }
    }

    /// The four orthogonal neighbors of this coordinate in the order up, down, left,
    /// right. Neighbors are not bounds-checked.
    pub fn neighbors(self) -> [Coordinate; 4] {
        [
            Self::new(self.row - 1, self.col),
            Self::new(self.row + 1, self.col),
            Self::new(self.row, self.col - 1),
            Self::new(self.row, self.col + 1),
        ]
    }
}

impl From<(isize, isize)> for Coordinate {
    /// Construct a [`Coordinate`] from the given `(row, col)` pair.
    fn from((row, col): (isize, isize)) -> Self {
        Self::new(row, col)
    }
}

impl From<Coordinate> for (isize, isize) {
    /// Convert the [`Coordinate`] into a `(row, col)` pair.
    fn from(coord: Coordinate) -> Self {
        (coord.row, coord.col)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}
