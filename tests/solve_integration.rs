// End-to-end tests: text grid -> board -> search -> replayed solution

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use sliding_puzzle::*;

#[test]
fn test_solve_3x3_from_text() {
    let root = board_from_text("0, 3, 7\n1, 2, 5\n4, 6, 8\n").unwrap();
    let mut solver = Solver::default();

    let solved = match solver.solve(root.clone()) {
        SolveResult::Solved(board) => board,
        other => panic!("expected a solution, got {:?}", other),
    };

    assert_eq!(solved.tiles(), &[1, 2, 3, 4, 5, 6, 7, 8, 0]);
    assert_eq!(solved.moves_made(), 22);

    let replayed = root.apply_moves(solved.history()).unwrap();
    assert!(replayed.is_solved());
    assert_eq!(replayed.tiles(), solved.tiles());
}

#[test]
fn test_solve_4x4_within_default_budget() {
    let tiles = [2, 3, 8, 7, 1, 0, 6, 4, 5, 9, 10, 12, 13, 14, 11, 15];
    let root = Board::new(4, &tiles).unwrap();
    let mut solver = Solver::default();

    let solved = solver.solve(root.clone()).solved_board().unwrap();
    assert_eq!(solved.moves_made(), 14);
    assert!(solver.nodes_explored() <= DEFAULT_MAX_ITERATIONS);
    assert!(root.apply_moves(solved.history()).unwrap().is_solved());
}

#[test]
fn test_4x4_cutoff_is_not_a_verdict() {
    let tiles = [2, 3, 8, 7, 1, 0, 6, 4, 5, 9, 10, 12, 13, 14, 11, 15];
    let root = Board::new(4, &tiles).unwrap();
    let mut solver = Solver::new(SolverConfig {
        max_iterations: 1_000,
        ..SolverConfig::default()
    });

    assert!(matches!(solver.solve(root.clone()), SolveResult::Cutoff));

    // Same board, enough budget
    let mut solver = Solver::default();
    assert!(solver.solve(root).is_solved());
}

#[test]
fn test_scrambled_boards_solve_within_scramble_length() {
    let mut rng = ChaCha8Rng::seed_from_u64(2024);
    for size in [2, 3, 4] {
        let root = scramble(size, 10, &mut rng).unwrap();
        let mut solver = Solver::default();
        let solved = solver.solve(root.clone()).solved_board().unwrap();

        assert!(solved.moves_made() <= 10);
        assert_eq!(solved.tiles(), Board::solved(size).unwrap().tiles());
        assert!(root.apply_moves(solved.history()).unwrap().is_solved());
    }
}

#[test]
fn test_loader_and_board_errors_stay_distinct() {
    let unsolvable = "3 9 1 15\n14 11 4 6\n13 0 10 12\n2 7 8 5\n";
    assert!(matches!(
        board_from_text(unsolvable).unwrap_err(),
        LoadError::Board(BoardError::UnsolvableLayout)
    ));

    assert!(matches!(
        board_from_text("1 2 3\n4 5 6\n").unwrap_err(),
        LoadError::NotSquare { .. }
    ));
    assert!(matches!(
        board_from_text("1 2\nthree 0\n").unwrap_err(),
        LoadError::InvalidNumber { .. }
    ));
}

#[test]
fn test_every_2x2_layout_is_solved_optimally() {
    // All 12 reachable 2x2 layouts; the farthest is 6 moves out
    let cycle = [Direction::Up, Direction::Left, Direction::Down, Direction::Right];
    let mut board = Board::solved(2).unwrap();
    for step in 0..12 {
        board = board.successor(cycle[step % 4]).unwrap();
        let root = Board::new(2, board.tiles()).unwrap();

        let mut solver = Solver::default();
        let solved = solver.solve(root).solved_board().unwrap();
        assert!(solved.moves_made() <= 6);
        assert!(solved.is_solved());
    }
}
