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

//! Defines the grid of cell states. Each side of the game owns one.

use std::ops::Index;

use crate::board::Coordinate;

/// State of a single cell in a player's grid.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Cell {
    /// Open water that has not been shot.
    Empty,
    /// Part of a ship that has not been shot.
    Ship,
    /// Part of a ship that has been shot.
    Hit,
    /// Open water that has been shot.
    Miss,
}

impl Cell {
    /// Whether this cell has been shot previously. Once true, stays true for the rest of
    /// the game.
    pub fn attacked(self) -> bool {
        match self {
            Cell::Hit | Cell::Miss => true,
            Cell::Empty | Cell::Ship => false,
        }
    }
}

impl Default for Cell {
    fn default() -> Self {
        Cell::Empty
    }
}

/// Square grid of [`Cell`]s.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Grid {
    /// Width and height of this grid.
    size: usize,
    /// Cells that make up this grid, in row-major order.
    cells: Box<[Cell]>,
}

impl Grid {
    /// Create a grid of `size * size` empty cells.
    /// Panics if `size` is 0 or `size * size` overflows.
    pub fn new(size: usize) -> Self {
        match Self::try_new(size) {
            Some(grid) => grid,
            None if size == 0 => panic!("Grid size must be nonzero"),
            None => panic!("Grid too large: {0} * {0} > {1}", size, isize::max_value()),
        }
    }

    /// Create a grid of `size * size` empty cells. Returns `None` if `size` is 0 or
    /// too large to address with signed coordinates.
    pub fn try_new(size: usize) -> Option<Self> {
        if size == 0 {
            return None;
        }
        size.checked_mul(size)
            .filter(|&total| total <= isize::max_value() as usize)
            .map(|total| Self {
                size,
                cells: vec![Cell::Empty; total].into_boxed_slice(),
            })
    }

    /// Width and height of this grid.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns true if `coord` lies within the grid. Both the lower and upper bounds of
    /// both axes are checked.
    pub fn contains(&self, coord: Coordinate) -> bool {
        self.try_linearize(coord).is_some()
    }

    /// Convert a coordinate to a linear index into `cells`, or `None` if it is out of
    /// bounds.
    #[inline]
    fn try_linearize(&self, coord: Coordinate) -> Option<usize> {
        let size = self.size as isize;
        if 0 <= coord.row && coord.row < size && 0 <= coord.col && coord.col < size {
            Some(coord.row as usize * self.size + coord.col as usize)
        } else {
            None
        }
    }

    /// Convert a linear index back into a [`Coordinate`].
    #[inline]
    fn un_linearize(&self, idx: usize) -> Coordinate {
        Coordinate::new((idx / self.size) as isize, (idx % self.size) as isize)
    }

    /// Get the state of the cell at `coord`, or `None` if it is out of bounds.
    pub fn get(&self, coord: Coordinate) -> Option<Cell> {
        self.try_linearize(coord).map(|i| self.cells[i])
    }

    /// Get a mutable reference to the cell at `coord`, or `None` if it is out of bounds.
    pub(crate) fn get_mut(&mut self, coord: Coordinate) -> Option<&mut Cell> {
        self.try_linearize(coord).map(move |i| &mut self.cells[i])
    }

    /// Overwrite the cell at `coord`. Panics if the coordinate is out of bounds.
    pub(crate) fn set(&mut self, coord: Coordinate, cell: Cell) {
        match self.get_mut(coord) {
            Some(slot) => *slot = cell,
            None => panic!("{} is out of bounds for a {}x{} grid", coord, self.size, self.size),
        }
    }

    /// Returns true if the cell at `coord` has already been shot. Out of bounds cells are
    /// never attacked.
    pub fn is_attacked(&self, coord: Coordinate) -> bool {
        self.get(coord).map_or(false, Cell::attacked)
    }

    /// Get an iterator over every coordinate that has not been shot yet, in row-major
    /// order.
    pub fn untargeted(&self) -> impl '_ + Iterator<Item = Coordinate> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| !cell.attacked())
            .map(move |(i, _)| self.un_linearize(i))
    }

    /// Count the cells in the given state.
    pub fn count(&self, state: Cell) -> usize {
        self.cells.iter().filter(|&&cell| cell == state).count()
    }

    /// Get an iterator over rows of this grid. Each row is an iterator over the
    /// coordinates and states of that row.
    pub fn iter_rows(
        &self,
    ) -> impl '_ + Iterator<Item = impl '_ + Iterator<Item = (Coordinate, Cell)>> {
        self.cells.chunks(self.size).enumerate().map(|(row, cells)| {
            cells
                .iter()
                .enumerate()
                .map(move |(col, &cell)| (Coordinate::new(row as isize, col as isize), cell))
        })
    }

    /// Reset every cell to [`Cell::Empty`].
    pub(crate) fn clear(&mut self) {
        for cell in self.cells.iter_mut() {
            *cell = Cell::Empty;
        }
    }
}

impl Index<Coordinate> for Grid {
    type Output = Cell;

    fn index(&self, coord: Coordinate) -> &Self::Output {
        match self.try_linearize(coord) {
            Some(i) => &self.cells[i],
            None => panic!("{} is out of bounds for a {}x{} grid", coord, self.size, self.size),
        }
    }
}
