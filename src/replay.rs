//! Parsing and re-applying move logs.
//!
//! A log holds one token per line: `1`-`4` for left/right/up/down and
//! `r <quadrant> <direction>` for a rotation. Replaying checks every step, so
//! it doubles as a validator for externally produced logs.

use crate::error::MazeError;
use crate::grid::RotationDirection;
use crate::state::GridState;
use crate::transition::{Move, Rotation};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Move(Move),
    Rotate(Rotation),
}

impl Step {
    fn is_applicable(self, state: &GridState) -> bool {
        match self {
            Step::Move(m) => m.is_applicable(state),
            Step::Rotate(r) => r.is_applicable(state),
        }
    }

    fn apply(self, state: &GridState) -> Result<GridState, MazeError> {
        match self {
            Step::Move(m) => m.apply(state),
            Step::Rotate(r) => r.apply(state),
        }
    }

    fn token(self) -> String {
        match self {
            Step::Move(m) => m.code().to_string(),
            Step::Rotate(r) => r.to_string(),
        }
    }
}

/// Parses a newline-delimited log. Blank lines are skipped.
pub fn parse_log(log: &str) -> Result<Vec<Step>, MazeError> {
    let mut steps = Vec::new();

    for (line_index, line) in log.lines().enumerate() {
        let token = line.trim();
        if token.is_empty() {
            continue;
        }
        let invalid = || MazeError::InvalidToken {
            line: line_index + 1,
            token: token.to_string(),
        };

        let mut chars = token.chars();
        if let (Some(code), None) = (chars.next(), chars.next()) {
            steps.push(Step::Move(Move::from_code(code).ok_or_else(invalid)?));
            continue;
        }

        let parts: Vec<&str> = token.split_whitespace().collect();
        let ["r", quadrant, direction] = parts[..] else {
            return Err(invalid());
        };
        let quadrant: u8 = quadrant.parse().map_err(|_| invalid())?;
        if !(1..=9).contains(&quadrant) {
            return Err(MazeError::InvalidQuadrant(quadrant));
        }
        let direction: u8 = direction.parse().map_err(|_| invalid())?;
        let direction = RotationDirection::try_from(direction)?;
        steps.push(Step::Rotate(Rotation::new(quadrant, direction)));
    }

    Ok(steps)
}

/// Applies `log` to `start`, returning every visited state including `start`.
pub fn replay(start: &GridState, log: &str) -> Result<Vec<GridState>, MazeError> {
    let steps = parse_log(log)?;
    let mut states = Vec::with_capacity(steps.len() + 1);
    states.push(start.clone());

    for (index, step) in steps.into_iter().enumerate() {
        let current = &states[states.len() - 1];
        if !step.is_applicable(current) {
            return Err(MazeError::IllegalStep {
                step: index + 1,
                token: step.token(),
            });
        }
        let next = step.apply(current)?;
        states.push(next);
    }

    Ok(states)
}
