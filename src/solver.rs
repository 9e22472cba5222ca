use crate::board::Board;
use crate::pqueue::PriorityQueue;
use log::{debug, info, trace, warn};
use std::collections::HashSet;

/// Default number of boards polled from the frontier before giving up.
pub const DEFAULT_MAX_ITERATIONS: usize = 300_000;

// Upper bound on the up-front visited-set allocation.
const VISITED_CAPACITY_HINT: usize = 1 << 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolverConfig {
    /// Maximum number of frontier polls per solve
    pub max_iterations: usize,
    /// Skip the successor that undoes the move which produced a board
    pub prune_backtracks: bool,
}

impl Default for SolverConfig {
    fn default() -> Self {
        SolverConfig {
            max_iterations: DEFAULT_MAX_ITERATIONS,
            prune_backtracks: true,
        }
    }
}

#[derive(Debug)]
pub enum SolveResult {
    /// A solved board carrying the full move history from the root
    Solved(Board),
    /// The iteration budget ran out first
    Cutoff,
    /// The frontier emptied without reaching the solved layout
    Impossible,
}

impl SolveResult {
    pub fn is_solved(&self) -> bool {
        matches!(self, SolveResult::Solved(_))
    }

    pub fn solved_board(self) -> Option<Board> {
        match self {
            SolveResult::Solved(board) => Some(board),
            _ => None,
        }
    }
}

/// Best-first search ordered by move count, which makes it a breadth-first search with
/// optimal (fewest-move) solutions.
pub struct Solver {
    config: SolverConfig,
    nodes_explored: usize,
    states_visited: usize,
}

impl Solver {
    pub fn new(config: SolverConfig) -> Self {
        Solver {
            config,
            nodes_explored: 0,
            states_visited: 0,
        }
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Boards polled from the frontier during the last solve.
    pub fn nodes_explored(&self) -> usize {
        self.nodes_explored
    }

    /// Distinct layouts expanded during the last solve.
    pub fn states_visited(&self) -> usize {
        self.states_visited
    }

    /// Search for the solved layout starting from `root`.
    pub fn solve(&mut self, root: Board) -> SolveResult {
        self.nodes_explored = 0;
        self.states_visited = 0;

        let mut frontier = PriorityQueue::new();
        let mut visited: HashSet<Board> =
            HashSet::with_capacity(self.config.max_iterations.min(VISITED_CAPACITY_HINT));

        debug!(
            "solving {}x{} board, max {} iterations",
            root.size(),
            root.size(),
            self.config.max_iterations
        );
        frontier.push(root.moves_made(), root);

        while let Some(board) = frontier.pop_min() {
            self.nodes_explored += 1;
            if self.nodes_explored > self.config.max_iterations {
                warn!(
                    "unable to find solution before max iterations ({}) reached",
                    self.config.max_iterations
                );
                self.states_visited = visited.len();
                return SolveResult::Cutoff;
            }

            if board.is_solved() {
                info!(
                    "solved in {} moves after {} iterations",
                    board.moves_made(),
                    self.nodes_explored
                );
                self.states_visited = visited.len();
                return SolveResult::Solved(board);
            }

            // Same layout reached by another path at the same or lower depth
            if visited.contains(&board) {
                continue;
            }

            let successors = self.generate_board_states(&board);
            visited.insert(board);
            for next in successors {
                if !visited.contains(&next) {
                    frontier.push(next.moves_made(), next);
                }
            }

            trace!(
                "iteration {}: frontier={}, visited={}",
                self.nodes_explored,
                frontier.len(),
                visited.len()
            );
        }

        debug_assert!(frontier.is_empty());
        self.states_visited = visited.len();
        debug!(
            "frontier exhausted after {} iterations without a solution",
            self.nodes_explored
        );
        SolveResult::Impossible
    }

    /// Successor boards for every legal move from `board`.
    ///
    /// When backtrack pruning is on, the move that would undo `board`'s last move is skipped.
    /// A root board (no history) gets every legal move.
    pub fn generate_board_states(&self, board: &Board) -> Vec<Board> {
        let backtrack = board
            .last_move()
            .filter(|_| self.config.prune_backtracks)
            .map(|last| last.opposite());

        let moves = board.available_moves();
        trace!("available moves: {:?}", moves.as_slice());

        moves
            .into_iter()
            .filter(|&direction| Some(direction) != backtrack)
            .filter_map(|direction| board.successor(direction).ok())
            .collect()
    }
}

impl Default for Solver {
    fn default() -> Self {
        Self::new(SolverConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Direction;

    const BOARD_3X3: [u32; 9] = [0, 3, 7, 1, 2, 5, 4, 6, 8];

    #[test]
    fn test_generate_board_states_from_root() {
        let board = Board::new(3, &BOARD_3X3).unwrap();
        let solver = Solver::default();

        let next = solver.generate_board_states(&board);
        assert_eq!(next.len(), 2);

        for board in &next {
            match board.last_move() {
                Some(Direction::Down) => assert_eq!(board.tiles(), &[1, 3, 7, 0, 2, 5, 4, 6, 8]),
                Some(Direction::Right) => assert_eq!(board.tiles(), &[3, 0, 7, 1, 2, 5, 4, 6, 8]),
                other => panic!("unexpected move {:?}", other),
            }
            assert_eq!(board.moves_made(), 1);
        }
    }

    #[test]
    fn test_generate_board_states_skips_backtrack() {
        let board = Board::new(3, &BOARD_3X3)
            .unwrap()
            .successor(Direction::Down)
            .unwrap();

        let solver = Solver::default();
        let moves: Vec<_> = solver
            .generate_board_states(&board)
            .iter()
            .filter_map(Board::last_move)
            .collect();
        assert_eq!(moves, vec![Direction::Down, Direction::Right]);

        let solver = Solver::new(SolverConfig {
            prune_backtracks: false,
            ..SolverConfig::default()
        });
        let moves: Vec<_> = solver
            .generate_board_states(&board)
            .iter()
            .filter_map(Board::last_move)
            .collect();
        assert_eq!(moves, vec![Direction::Up, Direction::Down, Direction::Right]);
    }

    #[test]
    fn test_solve_already_solved() {
        let board = Board::new(3, &[1, 2, 3, 4, 5, 6, 7, 8, 0]).unwrap();
        let mut solver = Solver::default();

        let solved = solver.solve(board).solved_board().unwrap();
        assert!(solved.history().is_empty());
        assert_eq!(solver.nodes_explored(), 1);
        assert_eq!(solver.states_visited(), 0);
    }

    #[test]
    fn test_solve_one_move() {
        let board = Board::new(2, &[1, 2, 0, 3]).unwrap();
        let mut solver = Solver::default();

        let solved = solver.solve(board).solved_board().unwrap();
        assert_eq!(solved.history(), &[Direction::Right]);
    }

    #[test]
    fn test_solve_3x3_board() {
        let root = Board::new(3, &BOARD_3X3).unwrap();
        let mut solver = Solver::default();

        let solved = solver.solve(root.clone()).solved_board().unwrap();
        assert!(solved.is_solved());
        assert_eq!(solved.tiles(), &[1, 2, 3, 4, 5, 6, 7, 8, 0]);
        assert_eq!(solved.moves_made(), 22);
        assert!(solver.nodes_explored() <= DEFAULT_MAX_ITERATIONS);

        // Replaying the history from the root reproduces the solved layout
        let replayed = root.apply_moves(solved.history()).unwrap();
        assert_eq!(replayed, solved);
    }

    #[test]
    fn test_solve_without_backtrack_pruning_is_still_optimal() {
        let root = Board::solved(3)
            .unwrap()
            .apply_moves(&[
                Direction::Up,
                Direction::Left,
                Direction::Down,
                Direction::Left,
                Direction::Up,
                Direction::Up,
            ])
            .unwrap();
        let root = Board::new(3, root.tiles()).unwrap();

        let mut pruned = Solver::default();
        let mut unpruned = Solver::new(SolverConfig {
            prune_backtracks: false,
            ..SolverConfig::default()
        });

        let a = pruned.solve(root.clone()).solved_board().unwrap();
        let b = unpruned.solve(root).solved_board().unwrap();
        assert_eq!(a.moves_made(), 6);
        assert_eq!(b.moves_made(), 6);
    }

    #[test]
    fn test_cutoff_when_budget_runs_out() {
        let board = Board::new(3, &BOARD_3X3).unwrap();
        let mut solver = Solver::new(SolverConfig {
            max_iterations: 50,
            ..SolverConfig::default()
        });

        assert!(matches!(solver.solve(board), SolveResult::Cutoff));
        assert_eq!(solver.nodes_explored(), 51);
    }

    #[test]
    fn test_zero_budget_cuts_off_immediately() {
        let board = Board::solved(3).unwrap();
        let mut solver = Solver::new(SolverConfig {
            max_iterations: 0,
            ..SolverConfig::default()
        });

        assert!(matches!(solver.solve(board), SolveResult::Cutoff));
    }

    #[test]
    fn test_solver_is_reusable() {
        let mut solver = Solver::default();
        let first = solver.solve(Board::new(2, &[1, 2, 0, 3]).unwrap());
        assert!(first.is_solved());
        let explored = solver.nodes_explored();

        let second = solver.solve(Board::new(2, &[1, 2, 0, 3]).unwrap());
        assert!(second.is_solved());
        assert_eq!(solver.nodes_explored(), explored);
    }
}
