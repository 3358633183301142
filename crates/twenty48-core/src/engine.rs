//! The move engine: sliding and merging tiles for one swipe.
//!
//! Every direction is handled by the same line routine, [`slide_line`]. A
//! [`Direction`] only decides which cells make up each line and in which
//! order they are read: always starting from the edge the tiles move
//! toward.

use std::fmt;

use crate::board::{Board, Pos, Tile};

// ---------------------------------------------------------------------------
// Direction
// ---------------------------------------------------------------------------

/// A swipe direction.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    /// The cells of every line on a `rows` x `cols` board, each line
    /// ordered from the far edge (the one tiles slide toward) to the near
    /// edge.
    pub fn lines(self, rows: usize, cols: usize) -> Vec<Vec<Pos>> {
        match self {
            Self::Left => (0..rows)
                .map(|r| (0..cols).map(|c| Pos::new(r, c)).collect())
                .collect(),
            Self::Right => (0..rows)
                .map(|r| (0..cols).rev().map(|c| Pos::new(r, c)).collect())
                .collect(),
            Self::Up => (0..cols)
                .map(|c| (0..rows).map(|r| Pos::new(r, c)).collect())
                .collect(),
            Self::Down => (0..cols)
                .map(|c| (0..rows).rev().map(|r| Pos::new(r, c)).collect())
                .collect(),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Left => "left",
            Self::Right => "right",
        })
    }
}

// ---------------------------------------------------------------------------
// MoveResult
// ---------------------------------------------------------------------------

/// Outcome of sliding a board in one direction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoveResult {
    pub board: Board,
    /// Sum of the values of every tile created by a merge.
    pub score_delta: u64,
    /// Whether any cell differs from the input board. When `false`, `board`
    /// equals the input and `score_delta` is zero.
    pub changed: bool,
}

// ---------------------------------------------------------------------------
// Line compaction
// ---------------------------------------------------------------------------

/// Compact and merge one line toward index 0.
///
/// Returns the new line (same length as the input) and the score gained.
/// A tile produced by a merge never merges again in the same call, so
/// `[2, 2, 2, _]` becomes `[4, 2, _, _]` and `[2, 2, 2, 2]` becomes
/// `[4, 4, _, _]`.
pub fn slide_line(line: &[Option<Tile>]) -> (Vec<Option<Tile>>, u64) {
    let mut packed: Vec<Tile> = Vec::with_capacity(line.len());
    let mut prev_merged = false;
    let mut score = 0;

    for tile in line.iter().flatten().copied() {
        let merged = match packed.last_mut() {
            Some(prev) if !prev_merged && *prev == tile => match prev.doubled() {
                Some(d) => {
                    *prev = d;
                    score += u64::from(d.value());
                    true
                }
                None => false,
            },
            _ => false,
        };
        if !merged {
            packed.push(tile);
        }
        prev_merged = merged;
    }

    let mut out: Vec<Option<Tile>> = packed.into_iter().map(Some).collect();
    out.resize(line.len(), None);
    (out, score)
}

/// Slide every line of `board` toward `dir`'s edge.
///
/// ```
/// use twenty48_core::{Board, Direction, slide};
///
/// let b = Board::from_rows([[8u32, 8, 4, 4]]).unwrap();
/// let r = slide(&b, Direction::Right);
/// assert_eq!(r.board.to_rows(), vec![vec![0, 0, 16, 8]]);
/// assert_eq!(r.score_delta, 24);
/// assert!(r.changed);
/// ```
pub fn slide(board: &Board, dir: Direction) -> MoveResult {
    let mut next = board.clone();
    let mut score_delta = 0;

    for line in dir.lines(board.rows(), board.cols()) {
        let cells: Vec<Option<Tile>> = line.iter().map(|&p| board.get(p)).collect();
        let (packed, gained) = slide_line(&cells);
        for (&p, cell) in line.iter().zip(packed) {
            next.set(p, cell);
        }
        score_delta += gained;
    }

    let changed = next != *board;
    MoveResult {
        board: next,
        score_delta,
        changed,
    }
}

/// Whether any direction would change `board`.
pub fn can_move(board: &Board) -> bool {
    Direction::ALL.iter().any(|&d| slide(board, d).changed)
}
