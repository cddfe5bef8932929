//! Quadrant Maze Solver Library
//!
//! Finds short escape routes through 17x17 walled mazes with one-shot traps
//! and, from level 3 on, nine rotatable 5x5 quadrants.

pub mod config;
pub mod error;
pub mod grid;
pub mod maze;
pub mod node;
pub mod render;
pub mod replay;
pub mod solver;
pub mod state;
pub mod transition;

pub use config::{QuadrantLayout, SolverConfig};
pub use error::MazeError;
pub use solver::{solve, Solution, SolveReport, Solver};
pub use state::GridState;
