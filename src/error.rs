//! Error type shared by the maze model, loader and replay.

use thiserror::Error;

use crate::grid::Coord;
use crate::transition::Move;

#[derive(Debug, Error)]
pub enum MazeError {
    #[error("quadrant must be between 1 and 9, got {0}")]
    InvalidQuadrant(u8),
    #[error("rotation direction must be 1 (left) or 2 (right), got {0}")]
    InvalidDirection(u8),
    #[error("move {direction} from {from:?} is blocked or leaves the grid")]
    IllegalMove { direction: Move, from: Coord },
    #[error("cannot rotate quadrant {0} while standing inside it")]
    OccupiedQuadrant(u8),
    #[error("maze line {line}: {reason}")]
    Parse { line: usize, reason: String },
    #[error("move log line {line}: unrecognized token {token:?}")]
    InvalidToken { line: usize, token: String },
    #[error("move log step {step} ({token}) is not applicable")]
    IllegalStep { step: usize, token: String },
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
