//! Plain-text maze files.
//!
//! Format:
//! - optional first line `level <n>` (defaults to level 1)
//! - exactly 17 rows of exactly 17 symbols:
//!   `X` wall, `.` or space open, `S` start, `E` escape, `H` trap, `o` occupied
//!
//! Exactly one start and one escape are required. Trailing blank lines are
//! ignored.

use std::fs;
use std::path::Path;

use crate::error::MazeError;
use crate::grid::{Cell, Coord, Grid, GRID_DIM};
use crate::state::GridState;

/// Reads and parses a maze file.
pub fn load(path: impl AsRef<Path>) -> Result<GridState, MazeError> {
    let text = fs::read_to_string(path)?;
    parse(&text)
}

/// Parses maze text into the initial state.
pub fn parse(text: &str) -> Result<GridState, MazeError> {
    let mut lines: Vec<(usize, &str)> = text
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim_end_matches('\r')))
        .collect();
    while lines.last().is_some_and(|(_, line)| line.is_empty()) {
        lines.pop();
    }

    let mut level = 1;
    if let Some(&(line, header)) = lines.first() {
        if let Some(value) = header.strip_prefix("level") {
            level = value.trim().parse().map_err(|_| MazeError::Parse {
                line,
                reason: format!("invalid level {:?}", value.trim()),
            })?;
            lines.remove(0);
        }
    }

    if lines.len() != GRID_DIM {
        return Err(MazeError::Parse {
            line: lines.last().map_or(1, |&(line, _)| line),
            reason: format!("expected {GRID_DIM} rows, found {}", lines.len()),
        });
    }

    let mut grid = Grid::filled(Cell::Wall);
    let mut start: Option<Coord> = None;
    let mut escape: Option<Coord> = None;
    let mut traps = Vec::new();

    for (row, &(line, text)) in lines.iter().enumerate() {
        let symbols: Vec<char> = text.chars().collect();
        if symbols.len() != GRID_DIM {
            return Err(MazeError::Parse {
                line,
                reason: format!("expected {GRID_DIM} cells, found {}", symbols.len()),
            });
        }

        for (col, &symbol) in symbols.iter().enumerate() {
            let cell = Cell::from_symbol(symbol).ok_or_else(|| MazeError::Parse {
                line,
                reason: format!("unknown cell symbol {symbol:?} in column {}", col + 1),
            })?;
            let slot = match cell {
                Cell::Start => Some(&mut start),
                Cell::Escape => Some(&mut escape),
                _ => None,
            };
            if let Some(slot) = slot {
                if slot.replace((row, col)).is_some() {
                    return Err(MazeError::Parse {
                        line,
                        reason: format!("more than one {symbol:?} cell"),
                    });
                }
            }
            if cell == Cell::Trap {
                traps.push((row, col));
            }
            grid.set((row, col), cell);
        }
    }

    let last_line = lines[GRID_DIM - 1].0;
    let missing = |what: &str| MazeError::Parse {
        line: last_line,
        reason: format!("maze has no {what} cell"),
    };
    let start = start.ok_or_else(|| missing("start"))?;
    let escape = escape.ok_or_else(|| missing("escape"))?;

    Ok(GridState::new(grid, level, start, escape, traps))
}
