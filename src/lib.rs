//! N×N sliding-tile puzzle solver: board model, solvability test, and a breadth-first search
//! over board states.

pub mod board;
pub mod loader;
mod pqueue;
pub mod scramble;
pub mod solver;
mod zobrist;

pub use board::{ALL_DIRECTIONS, Board, BoardError, Direction, EMPTY, MAX_SIZE, Moves};
pub use loader::{LoadError, board_from_file, board_from_text, parse_grid};
pub use scramble::scramble;
pub use solver::{DEFAULT_MAX_ITERATIONS, SolveResult, Solver, SolverConfig};
