//! Depth-bounded backtracking solver.
//!
//! Runs an iterative depth-first search over [`SearchTree`] nodes, expanding
//! only unit moves. Every goal found tightens the depth bound to its own
//! depth, so later branches (and later runs) only look for strictly shallower
//! escapes. On rotation levels the search is repeated from a handful of
//! pre-rotated starting states. All runs share a single wall-clock deadline,
//! checked once per step; hitting it ends the solve with whatever was found.

use std::time::Instant;

use log::{debug, info, warn};
use rustc_hash::FxHashSet;

use crate::config::SolverConfig;
use crate::grid::RotationDirection;
use crate::node::{NodeId, SearchTree};
use crate::state::GridState;
use crate::transition::{Rotation, ROTATION_LEVEL};

/// The shallowest escape found, as every state from the starting state to the
/// escape cell.
#[derive(Debug, Clone)]
pub struct Solution {
    pub path: Vec<GridState>,
    depth: usize,
}

impl Solution {
    /// Number of moves; a pre-search rotation does not count.
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn leaf(&self) -> &GridState {
        // a solution always holds at least its root
        &self.path[self.path.len() - 1]
    }

    /// Newline-delimited move log, root to leaf.
    pub fn log(&self) -> &str {
        &self.leaf().log
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SearchStats {
    /// Starting states whose search began.
    pub runs: usize,
    /// Starting states never searched because the deadline had passed.
    pub runs_skipped: usize,
    /// Search steps across all runs.
    pub steps: u64,
    /// Rotated starting states dropped as duplicates of one already queued.
    pub starts_deduplicated: usize,
    /// Times any run stepped onto the escape, improving or not.
    pub escapes_found: usize,
    pub timed_out: bool,
}

#[derive(Debug, Clone)]
pub struct SolveReport {
    pub solution: Option<Solution>,
    pub stats: SearchStats,
}

pub struct Solver {
    config: SolverConfig,
    depth_limit: usize,
    best: Option<Solution>,
    stats: SearchStats,
}

impl Solver {
    pub fn new(config: SolverConfig) -> Self {
        Self {
            config,
            depth_limit: config.depth_limit,
            best: None,
            stats: SearchStats::default(),
        }
    }

    /// Current depth bound. Never grows during a solve.
    pub fn depth_limit(&self) -> usize {
        self.depth_limit
    }

    /// Solves within the configured time budget, starting now.
    pub fn solve(&mut self, start: &GridState) -> SolveReport {
        let deadline = Instant::now() + self.config.time_budget;
        self.solve_until(start, deadline)
    }

    /// Solves, giving up once `deadline` passes.
    pub fn solve_until(&mut self, start: &GridState, deadline: Instant) -> SolveReport {
        self.depth_limit = self.config.depth_limit;
        self.best = None;
        self.stats = SearchStats::default();

        let starts = self.starting_states(start);
        let total = starts.len();

        for (index, root) in starts.into_iter().enumerate() {
            if Instant::now() >= deadline {
                self.stats.timed_out = true;
                self.stats.runs_skipped = total - index;
                break;
            }
            debug!(
                "run {}/{}: prefix {:?}, depth limit {}",
                index + 1,
                total,
                root.log,
                self.depth_limit
            );
            self.stats.runs += 1;
            self.run(root, deadline);
        }

        info!(
            "solve finished: {} after {} runs ({} skipped), {} steps",
            match &self.best {
                Some(best) => format!("escape at depth {}", best.depth),
                None => "no escape".to_string(),
            },
            self.stats.runs,
            self.stats.runs_skipped,
            self.stats.steps
        );

        SolveReport {
            solution: self.best.take(),
            stats: self.stats,
        }
    }

    /// The initial state followed, on rotation levels, by every single-rotation
    /// variant: left once, left twice and right once per quadrant.
    fn starting_states(&mut self, start: &GridState) -> Vec<GridState> {
        let root = start.clone().with_layout(self.config.layout);

        let mut seen: FxHashSet<GridState> = FxHashSet::default();
        seen.insert(root.clone());
        let mut starts = vec![root.clone()];

        if root.level < ROTATION_LEVEL {
            return starts;
        }

        for quadrant in 1..=9u8 {
            let mut variants = Vec::with_capacity(3);

            let left = Rotation::new(quadrant, RotationDirection::Left);
            if left.is_applicable(&root) {
                if let Ok(once) = left.apply(&root) {
                    if let Ok(twice) = left.apply(&once) {
                        variants.push(once);
                        variants.push(twice);
                    }
                }
            }

            let right = Rotation::new(quadrant, RotationDirection::Right);
            if right.is_applicable(&root) {
                if let Ok(once) = right.apply(&root) {
                    variants.push(once);
                }
            }

            for variant in variants {
                // an identical grid and position cannot yield a strictly shallower escape
                if seen.insert(variant.clone()) {
                    starts.push(variant);
                } else {
                    self.stats.starts_deduplicated += 1;
                }
            }
        }

        starts
    }

    /// Searches from one starting state until it is exhausted or time runs out.
    fn run(&mut self, root: GridState, deadline: Instant) {
        let mut tree = SearchTree::new(root);
        let mut current = Some(SearchTree::ROOT);

        while let Some(id) = current {
            if Instant::now() >= deadline {
                debug!("deadline reached with {} nodes on the live path", tree.len());
                self.stats.timed_out = true;
                return;
            }
            self.stats.steps += 1;
            current = self.step(&mut tree, id);
        }
    }

    /// Expands `id` by its next applicable move and returns the node to
    /// continue from, or `None` when the run is exhausted.
    fn step(&mut self, tree: &mut SearchTree, id: NodeId) -> Option<NodeId> {
        let Some(next) = tree.next_move(id) else {
            return tree.discard(id);
        };

        let child_state = match next.apply(&tree.get(id).state) {
            Ok(state) => state,
            Err(err) => {
                // next_move only yields applicable moves
                warn!("skipping move: {err}");
                return Some(id);
            }
        };
        let child = tree.push_child(id, child_state);
        let depth = tree.get(child).depth;

        if tree.has_loop(child) {
            tree.discard(child)
        } else if tree.get(child).is_target() {
            self.stats.escapes_found += 1;
            let improves = self.best.as_ref().map_or(true, |best| depth < best.depth);
            if improves {
                debug!("escape at depth {depth}");
                self.best = Some(Solution {
                    path: tree.path_to(child),
                    depth,
                });
                self.depth_limit = depth;
            }
            tree.discard(child)
        } else if depth > self.depth_limit {
            tree.discard(child)
        } else {
            Some(child)
        }
    }
}

/// Solves `start` with `config`, returning only the best solution.
pub fn solve(start: &GridState, config: SolverConfig) -> Option<Solution> {
    Solver::new(config).solve(start).solution
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::grid::{Cell, Coord, Grid};
    use crate::replay::replay;

    fn open_maze(level: u8, start: Coord, escape: Coord) -> GridState {
        let mut grid = Grid::walled();
        grid.set(start, Cell::Start);
        grid.set(escape, Cell::Escape);
        GridState::new(grid, level, start, escape, Vec::new())
    }

    /// Corridor along row 1: S . H . E, everything else walled.
    fn trap_corridor() -> GridState {
        let mut grid = Grid::filled(Cell::Wall);
        grid.set((1, 1), Cell::Start);
        grid.set((1, 2), Cell::Open);
        grid.set((1, 3), Cell::Trap);
        grid.set((1, 4), Cell::Open);
        grid.set((1, 5), Cell::Escape);
        GridState::new(grid, 1, (1, 1), (1, 5), vec![(1, 3)])
    }

    /// Level-3 maze whose only escape needs quadrant 2 turned clockwise first.
    fn rotation_maze() -> GridState {
        let mut grid = Grid::filled(Cell::Wall);
        grid.set((0, 6), Cell::Start);
        grid.set((0, 10), Cell::Escape);
        for row in 1..=5 {
            grid.set((row, 6), Cell::Open);
        }
        GridState::new(grid, 3, (0, 6), (0, 10), Vec::new())
    }

    #[test]
    fn test_adjacent_escape_takes_one_right_move() {
        let state = open_maze(1, (1, 1), (1, 2));
        let solution = solve(&state, SolverConfig::default()).expect("escape is adjacent");
        assert_eq!(solution.depth(), 1);
        assert_eq!(solution.log(), "2\n");
        assert_eq!(solution.path.len(), 2);
    }

    #[test]
    fn test_depth_limit_tightens_to_best_depth() {
        let state = open_maze(1, (1, 1), (1, 2));
        let mut solver = Solver::new(SolverConfig::default());
        let report = solver.solve(&state);
        assert_eq!(report.solution.map(|s| s.depth()), Some(1));
        assert_eq!(solver.depth_limit(), 1);
        assert!(!report.stats.timed_out);
    }

    #[test]
    fn test_trap_resets_and_search_terminates() {
        let state = trap_corridor();
        let mut solver = Solver::new(SolverConfig::default());
        let report = solver.solve(&state);
        let solution = report.solution.expect("corridor is solvable");

        assert_eq!(solution.depth(), 6);
        assert_eq!(solution.log(), "2\n2\n2\n2\n2\n2\n");
        // second state is the post-trap reset
        let reset = &solution.path[2];
        assert_eq!(reset.current, (1, 1));
        assert_eq!(reset.grid.get((1, 3)), Cell::Open);
        assert!(reset.traps.is_empty());
        assert!(!report.stats.timed_out);
    }

    #[test]
    fn test_solution_replays_to_escape() {
        let state = trap_corridor();
        let solution = solve(&state, SolverConfig::default()).unwrap();
        let states = replay(&state, solution.log()).unwrap();
        assert!(states.last().unwrap().is_target());
        assert_eq!(states.len(), solution.path.len());
    }

    #[test]
    fn test_unreachable_escape_is_none() {
        let mut state = open_maze(1, (1, 1), (15, 15));
        state.grid.set((1, 2), Cell::Wall);
        state.grid.set((2, 1), Cell::Wall);
        let report = Solver::new(SolverConfig::default()).solve(&state);
        assert!(report.solution.is_none());
        assert_eq!(report.stats.runs, 1);
        assert!(!report.stats.timed_out);
    }

    #[test]
    fn test_elapsed_deadline_returns_without_searching() {
        let state = rotation_maze();
        let mut solver = Solver::new(SolverConfig::default());
        let report = solver.solve_until(&state, Instant::now());
        assert!(report.solution.is_none());
        assert_eq!(report.stats.steps, 0);
        assert_eq!(report.stats.runs, 0);
        assert_eq!(report.stats.runs_skipped, 4);
        assert!(report.stats.timed_out);
    }

    #[test]
    fn test_zero_budget_times_out() {
        let state = open_maze(1, (1, 1), (1, 2));
        let config = SolverConfig::default().with_time_budget(Duration::ZERO);
        let report = Solver::new(config).solve(&state);
        assert!(report.solution.is_none());
        assert_eq!(report.stats.steps, 0);
    }

    #[test]
    fn test_rotation_level_searches_rotated_starts() {
        let state = rotation_maze();
        let mut solver = Solver::new(SolverConfig::default());
        let report = solver.solve(&state);
        let solution = report.solution.expect("clockwise turn opens the path");

        assert_eq!(solution.log(), "r 2 2\n4\n2\n2\n2\n2\n3\n");
        assert_eq!(solution.depth(), 6);
        assert_eq!(solver.depth_limit(), 6);
        // unrotated start plus three distinct turns of quadrant 2; solid quadrants rotate to duplicates
        assert_eq!(report.stats.runs, 4);
        assert_eq!(report.stats.starts_deduplicated, 24);
    }

    /// Row-0 corridor S . E with an odd cell in quadrant 9 so its turns are distinct.
    fn corridor_with_asymmetric_quadrant() -> GridState {
        let mut grid = Grid::filled(Cell::Wall);
        grid.set((0, 6), Cell::Start);
        grid.set((0, 7), Cell::Open);
        grid.set((0, 8), Cell::Escape);
        grid.set((11, 11), Cell::Open);
        GridState::new(grid, 3, (0, 6), (0, 8), Vec::new())
    }

    /// Quadrant 2 holds a U: 14 moves unrotated, 6 after any single turn.
    fn u_turn_maze() -> GridState {
        let mut grid = Grid::filled(Cell::Wall);
        grid.set((0, 6), Cell::Start);
        grid.set((0, 10), Cell::Escape);
        for i in 1..=5 {
            grid.set((i, 6), Cell::Open);
            grid.set((i, 10), Cell::Open);
            grid.set((5, 5 + i), Cell::Open);
        }
        GridState::new(grid, 3, (0, 6), (0, 10), Vec::new())
    }

    #[test]
    fn test_equal_depth_rotated_escape_keeps_first_solution() {
        let state = corridor_with_asymmetric_quadrant();
        let mut solver = Solver::new(SolverConfig::default());
        let report = solver.solve(&state);
        let solution = report.solution.unwrap();

        assert_eq!(report.stats.runs, 4);
        // every run reached the escape at the same depth
        assert_eq!(report.stats.escapes_found, 4);
        assert_eq!(solution.log(), "2\n2\n");
        assert_eq!(solver.depth_limit(), 2);
    }

    #[test]
    fn test_shallower_rotated_escape_replaces_first_solution() {
        let mut unrotated = u_turn_maze();
        unrotated.level = 2;
        let alone = solve(&unrotated, SolverConfig::default()).unwrap();
        assert_eq!(alone.depth(), 14);

        let state = u_turn_maze();
        let mut solver = Solver::new(SolverConfig::default());
        let report = solver.solve(&state);
        let solution = report.solution.unwrap();

        assert_eq!(report.stats.runs, 4);
        assert_eq!(report.stats.escapes_found, 4);
        assert_eq!(solution.depth(), 6);
        assert_eq!(solution.log(), "r 2 1\n4\n2\n2\n2\n2\n3\n");
        assert_eq!(solver.depth_limit(), 6);
    }

    #[test]
    fn test_deadline_mid_run_keeps_best_so_far() {
        // snake-order search reaches (3,15) quickly, then faces a huge open space
        let state = open_maze(1, (1, 1), (3, 15));
        let config = SolverConfig::default().with_time_budget(Duration::from_millis(100));
        let mut solver = Solver::new(config);
        let report = solver.solve(&state);
        let solution = report.solution.expect("first escape is found early");

        assert!(report.stats.timed_out);
        assert_eq!(report.stats.runs, 1);
        assert!(solution.depth() <= 44);
        assert!(solution.leaf().is_target());
        assert_eq!(solver.depth_limit(), solution.depth());
        let states = replay(&state, solution.log()).unwrap();
        assert!(states.last().unwrap().is_target());
    }

    #[test]
    fn test_rotation_level_prefers_unrotated_when_not_shallower() {
        let state = open_maze(3, (1, 1), (1, 2));
        let solution = solve(&state, SolverConfig::default()).unwrap();
        assert_eq!(solution.log(), "2\n");
    }

    #[test]
    fn test_below_rotation_level_has_single_start() {
        let mut state = rotation_maze();
        state.level = 2;
        let report = Solver::new(SolverConfig::default()).solve(&state);
        assert!(report.solution.is_none());
        assert_eq!(report.stats.runs, 1);
        assert_eq!(report.stats.starts_deduplicated, 0);
    }

    #[test]
    fn test_depth_limit_prunes_deep_escapes() {
        let state = trap_corridor();
        let config = SolverConfig::default().with_depth_limit(4);
        assert!(solve(&state, config).is_none());
        let config = SolverConfig::default().with_depth_limit(5);
        // a goal one past the bound is still recorded as a leaf
        assert_eq!(solve(&state, config).map(|s| s.depth()), Some(6));
    }

    #[test]
    fn test_paths_never_repeat_a_state() {
        let state = open_maze(1, (3, 3), (5, 6));
        let solution = solve(&state, SolverConfig::default().with_depth_limit(8)).unwrap();
        for (i, a) in solution.path.iter().enumerate() {
            for b in &solution.path[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
