use crate::zobrist::Zobrist;
use arrayvec::ArrayVec;
use std::collections::HashSet;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Tile value of the empty slot.
pub const EMPTY: u32 = 0;

/// Largest supported board edge.
pub const MAX_SIZE: usize = 16;

/// Direction the empty slot travels in a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

pub const ALL_DIRECTIONS: [Direction; 4] = [
    Direction::Up,
    Direction::Down,
    Direction::Left,
    Direction::Right,
];

impl Direction {
    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Index offset from the empty slot to the tile it swaps with.
    fn offset(self, size: usize) -> isize {
        let size = size as isize;
        match self {
            Direction::Up => -size,
            Direction::Down => size,
            Direction::Left => -1,
            Direction::Right => 1,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Up => write!(f, "Up"),
            Direction::Down => write!(f, "Down"),
            Direction::Left => write!(f, "Left"),
            Direction::Right => write!(f, "Right"),
        }
    }
}

/// Legal directions for the current empty slot, in `ALL_DIRECTIONS` order.
pub type Moves = ArrayVec<Direction, 4>;

/// Error type for board construction and moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardError {
    /// Board edge is below 2 or above `MAX_SIZE`
    InvalidDimension(usize),
    /// Tile sequence is empty or its length is not `size * size`
    InvalidInput { size: usize, tiles: usize },
    /// Number of empty tiles found, when it is not exactly one
    MissingEmptyTile(usize),
    DuplicateTileValue(u32),
    TileOutOfRange { value: u32, max: u32 },
    /// Inversion parity says the solved layout cannot be reached
    UnsolvableLayout,
    IllegalMove(Direction),
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoardError::InvalidDimension(size) => write!(
                f,
                "board size {} is out of range (must be 2 to {})",
                size, MAX_SIZE
            ),
            BoardError::InvalidInput { size, tiles } => write!(
                f,
                "a {}x{} board needs {} tiles, got {}",
                size,
                size,
                size * size,
                tiles
            ),
            BoardError::MissingEmptyTile(count) => write!(
                f,
                "there must be exactly one empty tile on the board, found {}",
                count
            ),
            BoardError::DuplicateTileValue(value) => {
                write!(f, "tile value {} appears more than once", value)
            }
            BoardError::TileOutOfRange { value, max } => {
                write!(f, "tile value {} is out of range (must be 0 to {})", value, max)
            }
            BoardError::UnsolvableLayout => {
                write!(f, "there is no solution for the given board layout")
            }
            BoardError::IllegalMove(direction) => {
                write!(f, "cannot move the empty tile {}", direction)
            }
        }
    }
}

impl std::error::Error for BoardError {}

/// A sliding-tile layout plus the moves that produced it.
///
/// Boards compare and hash by tile layout only, so two paths to the same layout are the same
/// search node. The Zobrist key is kept up to date on every move; the key table itself is
/// shared with successors, tiles and history are not.
#[derive(Clone)]
pub struct Board {
    tiles: Vec<u32>,
    size: usize,
    empty: usize,
    history: Vec<Direction>,
    hash: u64,
    zobrist: Arc<Zobrist>,
}

impl Board {
    /// Build a root board from a row-major tile sequence.
    ///
    /// Checks, in order: size, tile count, exactly one empty tile, unique values, value range,
    /// and solvability. The first failing check is reported.
    pub fn new(size: usize, tiles: &[u32]) -> Result<Self, BoardError> {
        if !(2..=MAX_SIZE).contains(&size) {
            return Err(BoardError::InvalidDimension(size));
        }
        if tiles.is_empty() || tiles.len() != size * size {
            return Err(BoardError::InvalidInput {
                size,
                tiles: tiles.len(),
            });
        }

        let empty = Self::validate_tiles(tiles)?;
        let zobrist = Arc::new(Zobrist::new(tiles.len()));
        let board = Board {
            tiles: tiles.to_vec(),
            size,
            empty,
            history: Vec::new(),
            hash: zobrist.compute_hash(tiles),
            zobrist,
        };

        if !board.is_solvable() {
            return Err(BoardError::UnsolvableLayout);
        }
        Ok(board)
    }

    /// The canonical solved layout: `1..size*size` in order, empty slot last.
    pub fn solved(size: usize) -> Result<Self, BoardError> {
        if !(2..=MAX_SIZE).contains(&size) {
            return Err(BoardError::InvalidDimension(size));
        }
        let cells = (size * size) as u32;
        let tiles: Vec<u32> = (1..cells).chain([EMPTY]).collect();
        Self::new(size, &tiles)
    }

    /// Returns the index of the empty tile.
    fn validate_tiles(tiles: &[u32]) -> Result<usize, BoardError> {
        let empty_count = tiles.iter().filter(|&&tile| tile == EMPTY).count();
        if empty_count != 1 {
            return Err(BoardError::MissingEmptyTile(empty_count));
        }

        let mut seen = HashSet::with_capacity(tiles.len());
        if let Some(&value) = tiles.iter().find(|&&tile| !seen.insert(tile)) {
            return Err(BoardError::DuplicateTileValue(value));
        }

        let max = (tiles.len() - 1) as u32;
        if let Some(&value) = tiles.iter().find(|&&tile| tile > max) {
            return Err(BoardError::TileOutOfRange { value, max });
        }

        tiles
            .iter()
            .position(|&tile| tile == EMPTY)
            .ok_or(BoardError::MissingEmptyTile(0))
    }

    pub fn tiles(&self) -> &[u32] {
        &self.tiles
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn empty_position(&self) -> usize {
        self.empty
    }

    /// Moves taken from the root board to reach this one.
    pub fn history(&self) -> &[Direction] {
        &self.history
    }

    pub fn moves_made(&self) -> usize {
        self.history.len()
    }

    pub fn last_move(&self) -> Option<Direction> {
        self.history.last().copied()
    }

    /// Zobrist key of the tile layout.
    pub fn hash_key(&self) -> u64 {
        self.hash
    }

    pub fn available_moves(&self) -> Moves {
        let row = self.empty / self.size;
        let col = self.empty % self.size;
        ALL_DIRECTIONS
            .into_iter()
            .filter(|direction| match direction {
                Direction::Up => row > 0,
                Direction::Down => row < self.size - 1,
                Direction::Left => col != 0,
                Direction::Right => (self.empty + 1) % self.size != 0,
            })
            .collect()
    }

    /// Board reached by moving the empty slot one step in `direction`.
    pub fn successor(&self, direction: Direction) -> Result<Board, BoardError> {
        if !self.available_moves().contains(&direction) {
            return Err(BoardError::IllegalMove(direction));
        }
        let mut next = self.clone();
        next.slide(direction);
        Ok(next)
    }

    /// Replay a sequence of moves from this board.
    pub fn apply_moves(&self, moves: &[Direction]) -> Result<Board, BoardError> {
        let mut board = self.clone();
        for &direction in moves {
            if !board.available_moves().contains(&direction) {
                return Err(BoardError::IllegalMove(direction));
            }
            board.slide(direction);
        }
        Ok(board)
    }

    // Caller has checked that `direction` is legal.
    fn slide(&mut self, direction: Direction) {
        let target = self.empty.wrapping_add_signed(direction.offset(self.size));
        let value = self.tiles[target];
        self.hash = self
            .zobrist
            .swap_hash(self.hash, (self.empty, EMPTY), (target, value));
        self.tiles.swap(self.empty, target);
        self.empty = target;
        self.history.push(direction);
    }

    /// Number of out-of-order pairs among the numbered tiles. The empty slot is skipped.
    pub fn inversions(&self) -> usize {
        let numbered: Vec<u32> = self
            .tiles
            .iter()
            .copied()
            .filter(|&tile| tile != EMPTY)
            .collect();
        numbered
            .iter()
            .enumerate()
            .map(|(i, &value)| numbered[i + 1..].iter().filter(|&&next| next < value).count())
            .sum()
    }

    pub fn is_solvable(&self) -> bool {
        let inversions = self.inversions();
        if self.size % 2 == 1 {
            inversions % 2 == 0
        } else {
            // 1-indexed row of the empty slot, counted from the bottom
            let row_from_bottom = self.size - self.empty / self.size;
            row_from_bottom % 2 != inversions % 2
        }
    }

    /// True when the numbered tiles are in order with the empty slot last.
    pub fn is_solved(&self) -> bool {
        let cells = self.tiles.len();
        self.tiles
            .iter()
            .enumerate()
            .all(|(i, &tile)| tile as usize == (i + 1) % cells)
    }
}

impl PartialEq for Board {
    fn eq(&self, other: &Self) -> bool {
        self.tiles == other.tiles
    }
}

impl Eq for Board {}

impl Hash for Board {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.hash);
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Board")
            .field("size", &self.size)
            .field("tiles", &self.tiles)
            .field("empty", &self.empty)
            .field("history", &self.history)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = (self.tiles.len() - 1).to_string().len();
        for row in self.tiles.chunks(self.size) {
            for (col, &tile) in row.iter().enumerate() {
                if col > 0 {
                    write!(f, " ")?;
                }
                if tile == EMPTY {
                    write!(f, "{:>width$}", ".")?;
                } else {
                    write!(f, "{:>width$}", tile)?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
