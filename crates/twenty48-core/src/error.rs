//! Construction-time errors. Gameplay operations themselves never fail.

use thiserror::Error;

/// A board literal could not be turned into a [`Board`](crate::Board).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("a board needs at least one row and one column")]
    Empty,
    #[error("row {row} has {found} cells, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("{0} is not a tile value (tiles are powers of two, starting at 2)")]
    InvalidTile(u32),
}

/// A [`GameConfig`](crate::GameConfig) was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("board size {rows}x{cols} is out of range (each side must be {min}..={max})")]
    Dimensions {
        rows: usize,
        cols: usize,
        min: usize,
        max: usize,
    },
    #[error("target tile {0} must be a power of two of at least 4")]
    Target(u32),
    #[error("board is {found_rows}x{found_cols} but the config asks for {rows}x{cols}")]
    BoardMismatch {
        rows: usize,
        cols: usize,
        found_rows: usize,
        found_cols: usize,
    },
}
