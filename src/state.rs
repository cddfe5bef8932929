//! Snapshot of a maze between moves.

use std::hash::{Hash, Hasher};

use crate::config::QuadrantLayout;
use crate::error::MazeError;
use crate::grid::{Cell, Coord, Grid, RotationDirection};

/// One maze configuration plus the log of how it was reached.
///
/// Every transition works on a clone, so states never alias each other.
/// Two states are equal when their grids and current positions match; level,
/// log and trap list are ignored. That equality is the loop-detection key.
#[derive(Debug, Clone)]
pub struct GridState {
    pub grid: Grid,
    pub level: u8,
    /// Live position of the traveler.
    pub current: Coord,
    /// Where the traveler began; traps send the traveler back here.
    pub start: Coord,
    pub escape: Coord,
    /// Traps still armed in this state's grid.
    pub traps: Vec<Coord>,
    /// Newline-terminated tokens of every accepted transition.
    pub log: String,
    pub layout: QuadrantLayout,
}

impl GridState {
    /// Creates the initial state with the traveler at `start` and an empty log.
    pub fn new(grid: Grid, level: u8, start: Coord, escape: Coord, traps: Vec<Coord>) -> Self {
        Self {
            grid,
            level,
            current: start,
            start,
            escape,
            traps,
            log: String::new(),
            layout: QuadrantLayout::default(),
        }
    }

    pub fn with_layout(mut self, layout: QuadrantLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Whether the traveler stands on the escape cell.
    ///
    /// Checks the cell symbol rather than `escape`, since rotations can carry
    /// the escape cell elsewhere.
    pub fn is_target(&self) -> bool {
        self.grid.get(self.current) == Cell::Escape
    }

    /// Rotates one quadrant of this state's grid a quarter turn in place.
    ///
    /// Fails if `quadrant` is outside 1..=9 or if the traveler stands inside it.
    pub fn rotate_block(&mut self, quadrant: u8, direction: RotationDirection) -> Result<(), MazeError> {
        let anchor = self.layout.anchor(quadrant)?;
        if self.layout.contains(quadrant, self.current) {
            return Err(MazeError::OccupiedQuadrant(quadrant));
        }
        self.grid.rotate_block(anchor, direction);
        Ok(())
    }

    /// Clears the trap at `cell` in this state only.
    pub(crate) fn disarm(&mut self, cell: Coord) {
        self.grid.set(cell, Cell::Open);
        self.traps.retain(|&trap| trap != cell);
    }
}

impl PartialEq for GridState {
    fn eq(&self, other: &Self) -> bool {
        self.current == other.current && self.grid == other.grid
    }
}

impl Eq for GridState {}

impl Hash for GridState {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.current.hash(state);
        self.grid.hash(state);
    }
}
