//! Board state: [`Tile`], [`Pos`] and the immutable [`Board`] value.
//!
//! Coordinates are `(row, col)` with row 0 at the top and column 0 on the
//! left. Cells are stored row-major.

use std::fmt;

use crate::error::BoardError;

// ---------------------------------------------------------------------------
// Tile
// ---------------------------------------------------------------------------

/// A tile value: always a power of two, at least 2.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "u32", into = "u32"))]
pub struct Tile(u32);

impl Tile {
    /// The tile every spawn produces.
    pub const TWO: Self = Self(2);

    /// Wrap `value` if it is a valid tile value.
    #[inline]
    pub const fn new(value: u32) -> Option<Self> {
        if value >= 2 && value.is_power_of_two() {
            Some(Self(value))
        } else {
            None
        }
    }

    #[inline]
    pub const fn value(self) -> u32 {
        self.0
    }

    /// Base-two logarithm of the value (1 for a 2, 11 for a 2048).
    #[inline]
    pub const fn exponent(self) -> u32 {
        self.0.trailing_zeros()
    }

    /// The tile two of these merge into, or `None` once `u32` is exhausted.
    #[inline]
    pub const fn doubled(self) -> Option<Self> {
        match self.0.checked_mul(2) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }
}

impl TryFrom<u32> for Tile {
    type Error = BoardError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value).ok_or(BoardError::InvalidTile(value))
    }
}

impl From<Tile> for u32 {
    #[inline]
    fn from(tile: Tile) -> u32 {
        tile.0
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

// ---------------------------------------------------------------------------
// Pos
// ---------------------------------------------------------------------------

/// A board coordinate.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pos {
    pub row: usize,
    pub col: usize,
}

impl Pos {
    #[inline]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

// ---------------------------------------------------------------------------
// Board
// ---------------------------------------------------------------------------

/// A fixed-size grid of optional tiles.
///
/// `Board` is a plain value: every modification goes through
/// [`with_tile`](Board::with_tile) (or the move engine) and yields a new
/// board. Equality compares every cell, which is how no-op moves are
/// detected.
#[derive(Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(try_from = "Vec<Vec<u32>>", into = "Vec<Vec<u32>>")
)]
pub struct Board {
    rows: usize,
    cols: usize,
    cells: Vec<Option<Tile>>,
}

impl Board {
    /// An empty board of the given dimensions.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![None; rows * cols],
        }
    }

    /// Build a board from literal rows, where `0` marks an empty cell.
    ///
    /// ```
    /// use twenty48_core::{Board, Pos};
    ///
    /// let b = Board::from_rows([[0u32, 2], [4, 0]]).unwrap();
    /// assert_eq!(b.get(Pos::new(1, 0)).map(|t| t.value()), Some(4));
    /// ```
    pub fn from_rows<I, R>(rows: I) -> Result<Self, BoardError>
    where
        I: IntoIterator<Item = R>,
        R: AsRef<[u32]>,
    {
        let mut cells = Vec::new();
        let mut cols = None;
        let mut n_rows = 0;
        for (row, values) in rows.into_iter().enumerate() {
            let values = values.as_ref();
            let expected = *cols.get_or_insert(values.len());
            if values.len() != expected {
                return Err(BoardError::Ragged {
                    row,
                    expected,
                    found: values.len(),
                });
            }
            for &v in values {
                cells.push(match v {
                    0 => None,
                    v => Some(Tile::try_from(v)?),
                });
            }
            n_rows += 1;
        }
        let cols = cols.unwrap_or(0);
        if n_rows == 0 || cols == 0 {
            return Err(BoardError::Empty);
        }
        Ok(Self {
            rows: n_rows,
            cols,
            cells,
        })
    }

    /// The board as literal rows (`0` for empty), the inverse of
    /// [`from_rows`](Board::from_rows).
    pub fn to_rows(&self) -> Vec<Vec<u32>> {
        self.cells
            .chunks(self.cols.max(1))
            .take(self.rows)
            .map(|row| row.iter().map(|c| c.map_or(0, Tile::value)).collect())
            .collect()
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn contains(&self, pos: Pos) -> bool {
        pos.row < self.rows && pos.col < self.cols
    }

    #[inline]
    fn index(&self, pos: Pos) -> Option<usize> {
        self.contains(pos).then(|| pos.row * self.cols + pos.col)
    }

    /// The tile at `pos`. Positions outside the board read as empty.
    #[inline]
    pub fn get(&self, pos: Pos) -> Option<Tile> {
        self.index(pos).and_then(|i| self.cells[i])
    }

    /// A copy of this board with `pos` set to `cell`. Out-of-bounds
    /// positions leave the copy unchanged.
    pub fn with_tile(&self, pos: Pos, cell: Option<Tile>) -> Board {
        let mut next = self.clone();
        next.set(pos, cell);
        next
    }

    /// In-place write, reserved for the engine and the controller which own
    /// the board they are building.
    pub(crate) fn set(&mut self, pos: Pos, cell: Option<Tile>) {
        if let Some(i) = self.index(pos) {
            self.cells[i] = cell;
        }
    }

    /// Row-major iterator over every `(Pos, cell)` pair.
    pub fn iter(&self) -> impl Iterator<Item = (Pos, Option<Tile>)> + '_ {
        let cols = self.cols.max(1);
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, &c)| (Pos::new(i / cols, i % cols), c))
    }

    /// Row-major iterator over the empty cells.
    pub fn empty_cells(&self) -> impl Iterator<Item = Pos> + '_ {
        self.iter().filter(|(_, c)| c.is_none()).map(|(p, _)| p)
    }

    pub fn count_empty(&self) -> usize {
        self.cells.iter().filter(|c| c.is_none()).count()
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(Option::is_none)
    }

    /// The largest tile on the board.
    pub fn max_tile(&self) -> Option<Tile> {
        self.cells.iter().flatten().copied().max()
    }

    /// Whether two horizontally or vertically adjacent cells hold equal
    /// tiles that can merge. Every row and every column is scanned up to its
    /// last cell. A pair of 2^31 tiles does not count: its sum overflows.
    pub fn has_adjacent_pair(&self) -> bool {
        self.iter().any(|(p, c)| {
            let Some(t) = c.filter(|t| t.doubled().is_some()) else {
                return false;
            };
            let right = Pos::new(p.row, p.col + 1);
            let below = Pos::new(p.row + 1, p.col);
            self.get(right) == Some(t) || self.get(below) == Some(t)
        })
    }
}

impl Default for Board {
    /// An empty 4x4 board.
    fn default() -> Self {
        Self::new(4, 4)
    }
}

impl TryFrom<Vec<Vec<u32>>> for Board {
    type Error = BoardError;

    fn try_from(rows: Vec<Vec<u32>>) -> Result<Self, Self::Error> {
        Self::from_rows(rows)
    }
}

impl From<Board> for Vec<Vec<u32>> {
    fn from(board: Board) -> Self {
        board.to_rows()
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Board")
            .field("rows", &self.rows)
            .field("cols", &self.cols)
            .field("cells", &self.to_rows())
            .finish()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sep = "+------".repeat(self.cols) + "+";
        writeln!(f, "{sep}")?;
        for row in self.to_rows() {
            write!(f, "|")?;
            for v in row {
                if v == 0 {
                    write!(f, "{:^6}|", ".")?;
                } else {
                    write!(f, "{v:^6}|")?;
                }
            }
            writeln!(f)?;
            writeln!(f, "{sep}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(v: u32) -> Option<Tile> {
        Tile::new(v)
    }

    fn board<const R: usize, const C: usize>(rows: [[u32; C]; R]) -> Board {
        Board::from_rows(rows).unwrap()
    }

    #[test]
    fn tile_rejects_non_powers() {
        assert!(Tile::new(0).is_none());
        assert!(Tile::new(1).is_none());
        assert!(Tile::new(6).is_none());
        assert_eq!(Tile::new(2048).map(Tile::exponent), Some(11));
        assert_eq!(Tile::TWO.doubled(), Tile::new(4));
        assert_eq!(Tile::new(1 << 31).and_then(Tile::doubled), None);
    }

    #[test]
    fn new_board_is_empty() {
        let b = Board::default();
        assert_eq!((b.rows(), b.cols()), (4, 4));
        assert!(b.is_empty());
        assert_eq!(b.count_empty(), 16);
        assert_eq!(b.max_tile(), None);
    }

    #[test]
    fn with_tile_copies() {
        let a = Board::new(3, 2);
        let b = a.with_tile(Pos::new(2, 1), t(8));
        assert!(a.is_empty());
        assert_eq!(b.get(Pos::new(2, 1)), t(8));
        assert_ne!(a, b);
        // out of bounds is ignored
        assert_eq!(b.with_tile(Pos::new(3, 0), t(2)), b);
        assert_eq!(b.get(Pos::new(9, 9)), None);
    }

    #[test]
    fn from_rows_validates() {
        assert_eq!(
            Board::from_rows([vec![2u32, 0], vec![4]]),
            Err(BoardError::Ragged {
                row: 1,
                expected: 2,
                found: 1
            })
        );
        assert_eq!(
            Board::from_rows([[2u32, 3]]),
            Err(BoardError::InvalidTile(3))
        );
        assert_eq!(
            Board::from_rows(Vec::<Vec<u32>>::new()),
            Err(BoardError::Empty)
        );
        let b = board([[0, 2, 0], [4, 0, 8]]);
        assert_eq!(b.to_rows(), vec![vec![0, 2, 0], vec![4, 0, 8]]);
    }

    #[test]
    fn empty_cells_row_major() {
        let b = board([[2, 0], [0, 4]]);
        let empty: Vec<Pos> = b.empty_cells().collect();
        assert_eq!(empty, vec![Pos::new(0, 1), Pos::new(1, 0)]);
        assert!(!b.is_full());
    }

    #[test]
    fn adjacent_pair_checks_last_row_and_column() {
        // Only pair is in the last row.
        let b = board([[2, 4, 8], [4, 8, 2], [8, 16, 16]]);
        assert!(b.has_adjacent_pair());
        // Only pair is in the last column.
        let b = board([[2, 4, 8], [4, 8, 2], [8, 16, 2]]);
        assert!(b.has_adjacent_pair());
        let b = board([[2, 4, 8], [4, 8, 2], [8, 16, 4]]);
        assert!(!b.has_adjacent_pair());
    }

    #[test]
    fn overflowing_pair_is_not_a_pair() {
        let top = 1 << 31;
        assert!(!board([[top, top], [2, 4]]).has_adjacent_pair());
        assert!(!board([[top, 2], [top, 4]]).has_adjacent_pair());
        assert!(board([[top, top], [4, 4]]).has_adjacent_pair());
    }

    #[test]
    fn display_renders_table() {
        let b = board([[2, 0]]);
        let s = b.to_string();
        assert!(s.starts_with("+------+------+"));
        assert!(s.contains("|  2   |  .   |"));
    }
}
