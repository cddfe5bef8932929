//! Tunable solver parameters.
//!
//! The quadrant anchor table and the time budget are plain values rather than
//! constants buried in the search code, so callers (and tests) can swap them.

use std::time::Duration;

use crate::error::MazeError;
use crate::grid::{Coord, GRID_DIM};

/// Number of rotatable quadrants.
pub const NUM_QUADRANTS: usize = 9;

/// Side length of a quadrant block.
pub const QUADRANT_SIZE: usize = 5;

/// Maps quadrant ids 1..=9 to the top-left cell of their 5x5 block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuadrantLayout {
    anchors: [Coord; NUM_QUADRANTS],
}

impl QuadrantLayout {
    /// Creates a layout from explicit anchors, indexed by `quadrant - 1`.
    ///
    /// Every block must fit inside the grid.
    pub const fn new(anchors: [Coord; NUM_QUADRANTS]) -> Self {
        let mut i = 0;
        while i < NUM_QUADRANTS {
            assert!(
                anchors[i].0 + QUADRANT_SIZE <= GRID_DIM && anchors[i].1 + QUADRANT_SIZE <= GRID_DIM,
                "quadrant block exceeds grid bounds"
            );
            i += 1;
        }
        Self { anchors }
    }

    /// Returns the anchor of `quadrant`, rejecting ids outside 1..=9.
    pub fn anchor(&self, quadrant: u8) -> Result<Coord, MazeError> {
        match quadrant {
            1..=9 => Ok(self.anchors[quadrant as usize - 1]),
            _ => Err(MazeError::InvalidQuadrant(quadrant)),
        }
    }

    /// Whether `cell` lies inside the block of `quadrant`. Unknown ids contain nothing.
    pub fn contains(&self, quadrant: u8, cell: Coord) -> bool {
        let Ok((row, col)) = self.anchor(quadrant) else {
            return false;
        };
        (row..row + QUADRANT_SIZE).contains(&cell.0) && (col..col + QUADRANT_SIZE).contains(&cell.1)
    }
}

impl Default for QuadrantLayout {
    fn default() -> Self {
        STANDARD_LAYOUT
    }
}

/// Nine contiguous blocks tiling the grid inside its one-cell border.
pub const STANDARD_LAYOUT: QuadrantLayout = QuadrantLayout::new([
    (1, 1),
    (1, 6),
    (1, 11),
    (6, 1),
    (6, 6),
    (6, 11),
    (11, 1),
    (11, 6),
    (11, 11),
]);

/// Parameters for one solve invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolverConfig {
    /// Initial depth bound; tightened as shallower goals are found.
    pub depth_limit: usize,
    /// Wall-clock budget shared by every starting-state run.
    pub time_budget: Duration,
    pub layout: QuadrantLayout,
}

impl SolverConfig {
    pub fn with_depth_limit(mut self, depth_limit: usize) -> Self {
        self.depth_limit = depth_limit;
        self
    }

    pub fn with_time_budget(mut self, time_budget: Duration) -> Self {
        self.time_budget = time_budget;
        self
    }

    pub fn with_layout(mut self, layout: QuadrantLayout) -> Self {
        self.layout = layout;
        self
    }
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            depth_limit: 128,
            time_budget: Duration::from_secs(60),
            layout: STANDARD_LAYOUT,
        }
    }
}
