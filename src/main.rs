//! Quadrant Maze Solver
//!
//! Loads a 17x17 maze, searches for the shallowest escape within a depth bound
//! and time budget, and prints the resulting move log.

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use quadmaze::{maze, render, replay, Solver, SolverConfig};

/// Solves quadrant mazes and checks move logs against them.
#[derive(Parser)]
#[command(name = "quadmaze")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Solve a maze and print its move log.
    Solve {
        /// Maze file.
        maze: PathBuf,
        /// Print every state along the solution.
        #[arg(long)]
        visualize: bool,
        /// Initial depth bound.
        #[arg(long, default_value_t = 128)]
        depth_limit: usize,
        /// Wall-clock budget in seconds.
        #[arg(long, default_value_t = 60)]
        time_budget_secs: u64,
    },
    /// Replay a move log against a maze.
    Replay {
        /// Maze file.
        maze: PathBuf,
        /// Move log file.
        log: PathBuf,
    },
    /// Print a parsed maze.
    Show {
        /// Maze file.
        maze: PathBuf,
    },
}

fn main() -> Result<ExitCode> {
    let env = env_logger::Env::new()
        .filter("QUADMAZE_LOG")
        .write_style("QUADMAZE_LOG_STYLE");
    env_logger::init_from_env(env);

    let cli = Cli::parse();

    match cli.command {
        Command::Solve {
            maze,
            visualize,
            depth_limit,
            time_budget_secs,
        } => {
            let config = SolverConfig::default()
                .with_depth_limit(depth_limit)
                .with_time_budget(Duration::from_secs(time_budget_secs));
            run_solve(&maze, visualize, config)
        }
        Command::Replay { maze, log } => run_replay(&maze, &log),
        Command::Show { maze } => run_show(&maze),
    }
}

/// Solves the maze and prints the move log, or reports that none was found.
fn run_solve(path: &Path, visualize: bool, config: SolverConfig) -> Result<ExitCode> {
    let state = maze::load(path).with_context(|| format!("loading {}", path.display()))?;
    let report = Solver::new(config).solve(&state);

    if report.stats.timed_out {
        log::warn!("time budget of {:?} exhausted", config.time_budget);
    }

    match report.solution {
        Some(solution) => {
            if visualize {
                println!("{}", render::format_path(&solution));
            }
            print!("{}", solution.log());
            Ok(ExitCode::SUCCESS)
        }
        None => {
            eprintln!("No solution found!");
            Ok(ExitCode::FAILURE)
        }
    }
}

/// Replays a log and reports whether it ends on the escape cell.
fn run_replay(maze_path: &Path, log_path: &Path) -> Result<ExitCode> {
    let state =
        maze::load(maze_path).with_context(|| format!("loading {}", maze_path.display()))?;
    let log = std::fs::read_to_string(log_path)
        .with_context(|| format!("reading {}", log_path.display()))?;
    let states = replay::replay(&state, &log).context("replaying move log")?;

    let moves = states.len() - 1;
    if states.last().is_some_and(|s| s.is_target()) {
        println!("Escaped after {} steps", moves);
        Ok(ExitCode::SUCCESS)
    } else {
        println!("Log is legal but stops short of the escape after {} steps", moves);
        Ok(ExitCode::FAILURE)
    }
}

/// Prints the maze as parsed.
fn run_show(path: &Path) -> Result<ExitCode> {
    let state = maze::load(path).with_context(|| format!("loading {}", path.display()))?;
    println!("Level {}", state.level);
    print!("{}", render::format_state(&state));
    Ok(ExitCode::SUCCESS)
}
