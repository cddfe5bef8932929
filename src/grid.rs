//! Fixed-size cell grid and block rotation.
//!
//! The grid is a flat 17x17 array stored row-major, so cloning a grid is a
//! single 289-byte copy and two grids compare with one slice comparison.

use std::fmt;

use crate::config::QUADRANT_SIZE;
use crate::error::MazeError;

/// Rows and columns of every maze.
pub const GRID_DIM: usize = 17;

/// Number of cells in the grid.
pub const GRID_SIZE: usize = GRID_DIM * GRID_DIM;

/// A (row, col) position.
pub type Coord = (usize, usize);

/// Cells in one quadrant block.
const BLOCK_CELLS: usize = QUADRANT_SIZE * QUADRANT_SIZE;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Wall,
    Open,
    Start,
    Escape,
    Trap,
    /// Marker left by maze authors for an occupied cell; walkable.
    Occupied,
}

impl Cell {
    /// Parses a maze symbol. Both `' '` and `'.'` denote an open cell.
    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            'X' => Some(Cell::Wall),
            ' ' | '.' => Some(Cell::Open),
            'S' => Some(Cell::Start),
            'E' => Some(Cell::Escape),
            'H' => Some(Cell::Trap),
            'o' => Some(Cell::Occupied),
            _ => None,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Cell::Wall => 'X',
            Cell::Open => '.',
            Cell::Start => 'S',
            Cell::Escape => 'E',
            Cell::Trap => 'H',
            Cell::Occupied => 'o',
        }
    }
}

/// Quarter-turn direction. The numeric codes appear verbatim in move logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RotationDirection {
    /// Counter-clockwise.
    Left = 1,
    /// Clockwise.
    Right = 2,
}

impl RotationDirection {
    pub fn code(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for RotationDirection {
    type Error = MazeError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(RotationDirection::Left),
            2 => Ok(RotationDirection::Right),
            _ => Err(MazeError::InvalidDirection(code)),
        }
    }
}

/// Converts (row, col) to a linear cell index.
#[inline(always)]
pub const fn coord_to_idx((row, col): Coord) -> usize {
    row * GRID_DIM + col
}

/// Converts a linear cell index to (row, col).
#[inline(always)]
pub const fn idx_to_coord(cell_index: usize) -> Coord {
    (cell_index / GRID_DIM, cell_index % GRID_DIM)
}

/// Moves `from` by one unit offset, or `None` if that leaves the grid.
#[inline]
pub fn step(from: Coord, (d_row, d_col): (isize, isize)) -> Option<Coord> {
    let row = from.0.checked_add_signed(d_row)?;
    let col = from.1.checked_add_signed(d_col)?;
    (row < GRID_DIM && col < GRID_DIM).then_some((row, col))
}

#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    cells: [Cell; GRID_SIZE],
}

impl Grid {
    /// A grid with every cell set to `cell`.
    pub fn filled(cell: Cell) -> Self {
        Self {
            cells: [cell; GRID_SIZE],
        }
    }

    /// An open grid surrounded by a one-cell wall border.
    pub fn walled() -> Self {
        let mut grid = Self::filled(Cell::Open);
        for i in 0..GRID_DIM {
            grid.set((0, i), Cell::Wall);
            grid.set((GRID_DIM - 1, i), Cell::Wall);
            grid.set((i, 0), Cell::Wall);
            grid.set((i, GRID_DIM - 1), Cell::Wall);
        }
        grid
    }

    #[inline]
    pub fn get(&self, coord: Coord) -> Cell {
        self.cells[coord_to_idx(coord)]
    }

    #[inline]
    pub fn set(&mut self, coord: Coord, cell: Cell) {
        self.cells[coord_to_idx(coord)] = cell;
    }

    /// Copies out the 5x5 block at `anchor`, row-major.
    pub fn block(&self, (row, col): Coord) -> [Cell; BLOCK_CELLS] {
        let mut block = [Cell::Open; BLOCK_CELLS];
        for i in 0..QUADRANT_SIZE {
            for j in 0..QUADRANT_SIZE {
                block[i * QUADRANT_SIZE + j] = self.get((row + i, col + j));
            }
        }
        block
    }

    /// Rotates the 5x5 block at `anchor` a quarter turn in place.
    ///
    /// The caller guarantees the block lies inside the grid.
    pub fn rotate_block(&mut self, anchor: Coord, direction: RotationDirection) {
        const N: usize = QUADRANT_SIZE;
        let source = self.block(anchor);
        let mut rotated = [Cell::Open; BLOCK_CELLS];

        for i in 0..N {
            for j in 0..N {
                let (dest_row, dest_col) = match direction {
                    RotationDirection::Left => (N - 1 - j, i),
                    RotationDirection::Right => (j, N - 1 - i),
                };
                rotated[dest_row * N + dest_col] = source[i * N + j];
            }
        }

        for i in 0..N {
            for j in 0..N {
                self.set((anchor.0 + i, anchor.1 + j), rotated[i * N + j]);
            }
        }
    }
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(GRID_DIM) {
            let line: String = row.iter().map(|c| c.symbol()).collect();
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}
