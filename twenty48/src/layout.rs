//! Screen geometry derived from the board dimensions.
//!
//! ```text
//! SCORE 1234               GOAL 2048    <- header, blank row
//!
//!   ##########################          <- board: TILE_W x TILE_H tiles
//!   #[  2  ] [     ] [  4  ]#             separated by one-cell gutters
//!   ##########################
//!
//! arrows/hjkl/wasd move  n new  q quit  <- blank row, footer
//! ```

use twenty48_core::Pos;
use twenty48_view::Rect;

pub const TILE_W: i32 = 7;
pub const TILE_H: i32 = 3;
pub const GUTTER: i32 = 1;
pub const HEADER_H: i32 = 2;
pub const FOOTER_H: i32 = 2;

/// Longest line drawn outside the board, plus a margin on both sides.
const MIN_WIDTH: i32 = HELP_TEXT.len() as i32 + 2;

pub const HELP_TEXT: &str = "arrows/hjkl/wasd move  n new  q quit";

/// Where everything goes on the canvas.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Layout {
    pub width: i32,
    pub height: i32,
    /// The board including its outer gutter.
    pub board: Rect,
}

impl Layout {
    pub fn new(rows: usize, cols: usize) -> Self {
        let board_w = cols as i32 * (TILE_W + GUTTER) + GUTTER;
        let board_h = rows as i32 * (TILE_H + GUTTER) + GUTTER;
        let width = board_w.max(MIN_WIDTH);
        Self {
            width,
            height: HEADER_H + board_h + FOOTER_H,
            board: Rect::new((width - board_w) / 2, HEADER_H, board_w, board_h),
        }
    }

    /// Canvas area of the tile at `pos`.
    pub fn tile_rect(&self, pos: Pos) -> Rect {
        Rect::new(
            self.board.min.x + GUTTER + pos.col as i32 * (TILE_W + GUTTER),
            self.board.min.y + GUTTER + pos.row as i32 * (TILE_H + GUTTER),
            TILE_W,
            TILE_H,
        )
    }

    pub fn score_row(&self) -> i32 {
        0
    }

    pub fn help_row(&self) -> i32 {
        self.height - 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classic_board() {
        let l = Layout::new(4, 4);
        assert_eq!(l.board.width(), 33);
        assert_eq!(l.board.height(), 17);
        assert_eq!(l.width, 38);
        assert_eq!(l.height, 21);
        assert_eq!(l.board.min.x, 2);
    }

    #[test]
    fn tiles_sit_inside_the_board() {
        let l = Layout::new(4, 4);
        let first = l.tile_rect(Pos::new(0, 0));
        assert_eq!((first.min.x, first.min.y), (3, 3));
        let last = l.tile_rect(Pos::new(3, 3));
        assert_eq!(last.max.x, l.board.max.x - GUTTER);
        assert_eq!(last.max.y, l.board.max.y - GUTTER);
    }

    #[test]
    fn wide_boards_set_the_width() {
        let l = Layout::new(2, 8);
        assert_eq!(l.width, 65);
        assert_eq!(l.board.min.x, 0);
        assert_eq!(l.help_row(), l.height - 1);
    }
}
