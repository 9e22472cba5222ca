use crate::board::{Board, BoardError};
use rand::Rng;
use rand::seq::SliceRandom;

/// Random root board reached by `moves` slides from the solved layout.
///
/// The walk never immediately undoes its previous slide, so short walks do not collapse back
/// onto the solved board. The returned board has an empty history.
pub fn scramble<R: Rng + ?Sized>(
    size: usize,
    moves: usize,
    rng: &mut R,
) -> Result<Board, BoardError> {
    let mut board = Board::solved(size)?;
    for _ in 0..moves {
        let backtrack = board.last_move().map(|last| last.opposite());
        let candidates: Vec<_> = board
            .available_moves()
            .into_iter()
            .filter(|&direction| Some(direction) != backtrack)
            .collect();
        // Every cell has at least two neighbours, so one always survives the filter
        if let Some(&direction) = candidates.choose(rng) {
            board = board.successor(direction)?;
        }
    }
    Board::new(size, board.tiles())
}
