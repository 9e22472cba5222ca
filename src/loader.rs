use crate::board::{Board, BoardError};
use log::debug;
use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

/// Error type for loading a board from text.
#[derive(Debug)]
pub enum LoadError {
    /// IO error when reading from file
    Io(io::Error),
    /// A token that is not a non-negative integer (line is 1-indexed)
    InvalidNumber { line: usize, token: String },
    /// No rows found
    Empty,
    /// Row `line` has `columns` values but the grid has `rows` rows
    NotSquare {
        rows: usize,
        line: usize,
        columns: usize,
    },
    /// The grid parsed but is not a valid board
    Board(BoardError),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Io(err) => write!(f, "unable to load puzzle board data: {}", err),
            LoadError::InvalidNumber { line, token } => write!(
                f,
                "invalid tile value '{}' on line {} (must be numeric)",
                token, line
            ),
            LoadError::Empty => write!(f, "puzzle board data is empty"),
            LoadError::NotSquare {
                rows,
                line,
                columns,
            } => write!(
                f,
                "game board must be square: line {} has {} values, expected {}",
                line, columns, rows
            ),
            LoadError::Board(err) => write!(f, "invalid board: {}", err),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Io(err) => Some(err),
            LoadError::Board(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for LoadError {
    fn from(err: io::Error) -> Self {
        LoadError::Io(err)
    }
}

impl From<BoardError> for LoadError {
    fn from(err: BoardError) -> Self {
        LoadError::Board(err)
    }
}

/// Parse a delimited grid of tile values.
///
/// Each non-blank line is one row. Values may be separated by commas, semicolons, or
/// whitespace, in any mix.
pub fn parse_grid(text: &str) -> Result<Vec<Vec<u32>>, LoadError> {
    let mut rows = Vec::new();
    let mut line_numbers = Vec::new();

    for (idx, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let row = line
            .split(|c: char| c == ',' || c == ';' || c.is_whitespace())
            .filter(|token| !token.is_empty())
            .map(|token| {
                token.parse::<u32>().map_err(|_| LoadError::InvalidNumber {
                    line: idx + 1,
                    token: token.to_string(),
                })
            })
            .collect::<Result<Vec<u32>, LoadError>>()?;
        rows.push(row);
        line_numbers.push(idx + 1);
    }

    if rows.is_empty() {
        return Err(LoadError::Empty);
    }
    if let Some((row, &line)) = rows
        .iter()
        .zip(&line_numbers)
        .find(|(row, _)| row.len() != rows.len())
    {
        return Err(LoadError::NotSquare {
            rows: rows.len(),
            line,
            columns: row.len(),
        });
    }

    Ok(rows)
}

/// Parse a square grid and build the root board from it, top-left to bottom-right.
pub fn board_from_text(text: &str) -> Result<Board, LoadError> {
    let grid = parse_grid(text)?;
    let size = grid.len();
    let tiles: Vec<u32> = grid.into_iter().flatten().collect();
    debug!("loaded {}x{} grid", size, size);
    Ok(Board::new(size, &tiles)?)
}

pub fn board_from_file<P: AsRef<Path>>(path: P) -> Result<Board, LoadError> {
    let contents = fs::read_to_string(path)?;
    board_from_text(&contents)
}
