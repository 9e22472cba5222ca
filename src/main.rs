use clap::Parser;
use log::info;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use sliding_puzzle::{
    Board, DEFAULT_MAX_ITERATIONS, Direction, SolveResult, Solver, SolverConfig, board_from_file,
    scramble,
};
use std::process;
use std::time::Instant;

fn print_solution(root: &Board, solution: &[Direction]) {
    println!("\nStarting position:\n{}", root);
    let mut board = root.clone();
    let total = solution.len();
    for (count, &direction) in solution.iter().enumerate() {
        board = match board.successor(direction) {
            Ok(next) => next,
            Err(e) => {
                eprintln!("Error replaying solution: {}", e);
                return;
            }
        };
        println!("Move {} ({}/{}):\n{}", direction, count + 1, total, board);
    }
}

fn load_board(args: &Args) -> Result<Board, String> {
    if let Some(size) = args.random {
        let seed = args.seed.unwrap_or_else(rand::random);
        info!("scrambling {}x{} board with seed {}", size, size, seed);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        return scramble(size, args.scramble_moves, &mut rng).map_err(|e| e.to_string());
    }

    match &args.board_file {
        Some(path) => board_from_file(path).map_err(|e| format!("{} ({})", e, path)),
        None => Err("no board file given".to_string()),
    }
}

#[derive(Parser)]
#[command(name = "sliding-puzzle")]
#[command(about = "An N x N sliding-tile puzzle solver", long_about = None)]
struct Args {
    /// Path to the board file (comma/semicolon/space delimited, one row per line, 0 = empty)
    #[arg(value_name = "FILE", required_unless_present = "random")]
    board_file: Option<String>,

    /// Solve a randomly scrambled board of this size instead of reading a file
    #[arg(short, long, value_name = "SIZE", conflicts_with = "board_file")]
    random: Option<usize>,

    /// Number of random slides used to scramble a random board
    #[arg(long, default_value = "40")]
    scramble_moves: usize,

    /// Seed for the random board
    #[arg(long)]
    seed: Option<u64>,

    /// Maximum number of boards to poll before giving up
    #[arg(short = 'n', long, default_value_t = DEFAULT_MAX_ITERATIONS)]
    max_iterations: usize,

    /// Expand the move that undoes the previous one too
    #[arg(long, default_value = "false")]
    no_backtrack_pruning: bool,

    /// Print the solution step-by-step
    #[arg(short, long)]
    print_solution: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let root = match load_board(&args) {
        Ok(board) => board,
        Err(e) => {
            eprintln!("Error loading board: {}", e);
            process::exit(1);
        }
    };
    info!("loaded initial board layout:\n{}", root);

    let mut solver = Solver::new(SolverConfig {
        max_iterations: args.max_iterations,
        prune_backtracks: !args.no_backtrack_pruning,
    });
    let start = Instant::now();
    let result = solver.solve(root.clone());
    let elapsed_ms = start.elapsed().as_millis();

    let (solved_char, solution_len) = match &result {
        SolveResult::Solved(board) => ('Y', board.moves_made()),
        SolveResult::Cutoff => ('N', 0),
        SolveResult::Impossible => ('X', 0),
    };

    println!(
        "size: {}x{}  solved: {}  moves: {:<4}  states: {:<8}  elapsed: {} ms",
        root.size(),
        root.size(),
        solved_char,
        solution_len,
        solver.nodes_explored(),
        elapsed_ms
    );

    match result {
        SolveResult::Solved(board) => {
            let moves: Vec<String> = board.history().iter().map(|d| d.to_string()).collect();
            println!("moves: {}", moves.join(" "));
            if args.print_solution {
                print_solution(&root, board.history());
            }
        }
        SolveResult::Cutoff | SolveResult::Impossible => process::exit(2),
    }
}
