//! Text rendering of maze states and solution paths.

use crate::grid::{Cell, GRID_DIM};
use crate::solver::Solution;
use crate::state::GridState;

/// Formats a state as 17 rows of cell symbols.
///
/// The traveler shows as `o`, except on the start or escape cell, whose
/// symbols take precedence.
pub fn format_state(state: &GridState) -> String {
    let mut output = String::with_capacity(GRID_DIM * (GRID_DIM + 1));

    for row in 0..GRID_DIM {
        for col in 0..GRID_DIM {
            let cell = state.grid.get((row, col));
            let display_char = match cell {
                Cell::Start | Cell::Escape => cell.symbol(),
                _ if state.current == (row, col) => 'o',
                _ => cell.symbol(),
            };
            output.push(display_char);
        }
        output.push('\n');
    }

    output
}

/// Formats every state of a solution, root first, each under a depth header.
pub fn format_path(solution: &Solution) -> String {
    let mut output = String::new();
    for (depth, state) in solution.path.iter().enumerate() {
        if depth > 0 {
            output.push('\n');
        }
        output.push_str(&format!("Depth: {depth}\n"));
        output.push_str(&format_state(state));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SolverConfig;
    use crate::grid::Grid;
    use crate::solver::solve;

    fn small_maze() -> GridState {
        let mut grid = Grid::walled();
        grid.set((1, 1), Cell::Start);
        grid.set((1, 3), Cell::Escape);
        grid.set((2, 2), Cell::Trap);
        for col in 1..16 {
            grid.set((3, col), Cell::Wall);
        }
        GridState::new(grid, 1, (1, 1), (1, 3), vec![(2, 2)])
    }

    #[test]
    fn test_format_state_snapshot() {
        let mut state = small_maze();
        state.current = (2, 3);
        insta::assert_snapshot!(format_state(&state), @r"
        XXXXXXXXXXXXXXXXX
        XS.E............X
        X.Ho............X
        XXXXXXXXXXXXXXXXX
        X...............X
        X...............X
        X...............X
        X...............X
        X...............X
        X...............X
        X...............X
        X...............X
        X...............X
        X...............X
        X...............X
        X...............X
        XXXXXXXXXXXXXXXXX
        ");
    }

    #[test]
    fn test_traveler_on_start_shows_start() {
        let state = small_maze();
        let rendered = format_state(&state);
        assert_eq!(rendered.lines().nth(1), Some("XS.E............X"));
        assert_eq!(rendered.lines().count(), GRID_DIM);
    }

    #[test]
    fn test_format_path_lists_every_depth() {
        let solution = solve(&small_maze(), SolverConfig::default()).unwrap();
        assert_eq!(solution.log(), "2\n2\n");
        let rendered = format_path(&solution);
        let headers: Vec<&str> = rendered.lines().filter(|l| l.starts_with("Depth")).collect();
        assert_eq!(headers, ["Depth: 0", "Depth: 1", "Depth: 2"]);
        assert!(rendered.contains("XSoE"));
    }
}
