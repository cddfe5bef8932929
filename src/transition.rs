//! Transitions between maze states: unit moves and quadrant rotations.
//!
//! Each transition checks legality with `is_applicable` and produces a fresh
//! state with `apply`; the source state is never touched. Applying an
//! inapplicable transition is a caller bug and comes back as an error.

use std::fmt;

use crate::error::MazeError;
use crate::grid::{step, Cell, RotationDirection};
use crate::state::GridState;

/// Lowest level at which quadrants may be rotated.
pub const ROTATION_LEVEL: u8 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Move {
    Left,
    Right,
    Up,
    Down,
}

impl Move {
    /// Expansion order of the search; determines which of several equally
    /// shallow solutions is found first.
    pub const ALL: [Move; 4] = [Move::Left, Move::Right, Move::Up, Move::Down];

    /// (row, col) offset.
    pub fn as_offset(self) -> (isize, isize) {
        match self {
            Move::Left => (0, -1),
            Move::Right => (0, 1),
            Move::Up => (-1, 0),
            Move::Down => (1, 0),
        }
    }

    /// Single-character log token.
    pub fn code(self) -> char {
        match self {
            Move::Left => '1',
            Move::Right => '2',
            Move::Up => '3',
            Move::Down => '4',
        }
    }

    pub fn from_code(code: char) -> Option<Self> {
        Move::ALL.into_iter().find(|m| m.code() == code)
    }

    /// A move is legal when the destination is inside the grid and neither a
    /// wall nor the start cell.
    ///
    /// Stepping onto a trap is additionally refused when the start cell has been
    /// rotated into a wall, since the traveler would be reset onto it.
    pub fn is_applicable(self, state: &GridState) -> bool {
        let Some(dest) = step(state.current, self.as_offset()) else {
            return false;
        };
        match state.grid.get(dest) {
            Cell::Wall | Cell::Start => false,
            Cell::Trap => state.grid.get(state.start) != Cell::Wall,
            _ => true,
        }
    }

    /// Moves the traveler one cell. Entering a trap disarms it in the new state
    /// and sends the traveler back to `start`.
    ///
    /// Fails with [`MazeError::IllegalMove`] unless [`Move::is_applicable`] holds.
    pub fn apply(self, state: &GridState) -> Result<GridState, MazeError> {
        let illegal = || MazeError::IllegalMove {
            direction: self,
            from: state.current,
        };
        if !self.is_applicable(state) {
            return Err(illegal());
        }
        let dest = step(state.current, self.as_offset()).ok_or_else(illegal)?;

        let mut next = state.clone();
        next.current = dest;

        if next.grid.get(dest) == Cell::Trap {
            next.disarm(dest);
            next.current = next.start;
        }

        next.log.push(self.code());
        next.log.push('\n');
        Ok(next)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match *self {
            Move::Left => "Left",
            Move::Right => "Right",
            Move::Up => "Up",
            Move::Down => "Down",
        };
        write!(f, "{}", s)
    }
}

/// Quarter turn of one quadrant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rotation {
    pub quadrant: u8,
    pub direction: RotationDirection,
}

impl Rotation {
    pub fn new(quadrant: u8, direction: RotationDirection) -> Self {
        Self { quadrant, direction }
    }

    /// Every rotation, quadrant-major, left before right.
    pub fn all() -> impl Iterator<Item = Rotation> {
        (1..=9u8).flat_map(|quadrant| {
            [RotationDirection::Left, RotationDirection::Right]
                .into_iter()
                .map(move |direction| Rotation::new(quadrant, direction))
        })
    }

    /// Rotations need level 3 and a traveler outside the target quadrant.
    pub fn is_applicable(self, state: &GridState) -> bool {
        state.level >= ROTATION_LEVEL && !state.layout.contains(self.quadrant, state.current)
    }

    pub fn apply(self, state: &GridState) -> Result<GridState, MazeError> {
        let mut next = state.clone();
        next.rotate_block(self.quadrant, self.direction)?;
        next.log.push_str(&format!("{self}\n"));
        Ok(next)
    }
}

/// Log token shape: `r <quadrant> <direction code>`.
impl fmt::Display for Rotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "r {} {}", self.quadrant, self.direction.code())
    }
}
