//! The [`Canvas`] a model draws into, and the [`Frame`] diff between two
//! canvases.
//!
//! Coordinates are screen cells: `x` grows right, `y` grows down. Writes
//! outside the canvas are silently clipped.

use std::ops::Add;

use crate::style::{Color, Style};

// ---------------------------------------------------------------------------
// Point / Rect
// ---------------------------------------------------------------------------

/// A cell position on the canvas.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const ZERO: Self = Self { x: 0, y: 0 };

    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Return a point shifted by (dx, dy).
    #[inline]
    pub const fn shift(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

impl Add for Point {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

/// A rectangle of cells: `min` inclusive, `max` exclusive.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rect {
    pub min: Point,
    pub max: Point,
}

impl Rect {
    /// The rectangle with top-left corner `(x, y)` and the given size.
    /// Negative sizes are treated as empty.
    #[inline]
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            min: Point::new(x, y),
            max: Point::new(x + width.max(0), y + height.max(0)),
        }
    }

    #[inline]
    pub fn width(self) -> i32 {
        self.max.x - self.min.x
    }

    #[inline]
    pub fn height(self) -> i32 {
        self.max.y - self.min.y
    }

    #[inline]
    pub fn contains(self, p: Point) -> bool {
        p.x >= self.min.x && p.x < self.max.x && p.y >= self.min.y && p.y < self.max.y
    }

    /// Row-major iterator over the points in the rectangle.
    pub fn iter(self) -> impl Iterator<Item = Point> {
        (self.min.y..self.max.y)
            .flat_map(move |y| (self.min.x..self.max.x).map(move |x| Point::new(x, y)))
    }
}

// ---------------------------------------------------------------------------
// Cell
// ---------------------------------------------------------------------------

/// A styled character cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Cell {
    pub ch: char,
    pub style: Style,
}

impl Cell {
    #[inline]
    pub const fn new(ch: char, style: Style) -> Self {
        Self { ch, style }
    }

    /// Set the character (builder).
    #[inline]
    pub const fn with_char(mut self, ch: char) -> Self {
        self.ch = ch;
        self
    }

    /// Set the style (builder).
    #[inline]
    pub const fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }
}

impl Default for Cell {
    #[inline]
    fn default() -> Self {
        Self {
            ch: ' ',
            style: Style::default(),
        }
    }
}

// ---------------------------------------------------------------------------
// Canvas
// ---------------------------------------------------------------------------

/// A fixed-size buffer of [`Cell`]s.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Canvas {
    width: i32,
    height: i32,
    cells: Vec<Cell>,
}

impl Canvas {
    /// A canvas of the given size filled with default cells.
    pub fn new(width: i32, height: i32) -> Self {
        let (width, height) = (width.max(0), height.max(0));
        Self {
            width,
            height,
            cells: vec![Cell::default(); (width * height) as usize],
        }
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    #[inline]
    pub fn bounds(&self) -> Rect {
        Rect::new(0, 0, self.width, self.height)
    }

    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        self.bounds().contains(p)
    }

    #[inline]
    fn index(&self, p: Point) -> Option<usize> {
        self.contains(p).then(|| (p.y * self.width + p.x) as usize)
    }

    /// The cell at `p`, or a default cell outside the canvas.
    pub fn at(&self, p: Point) -> Cell {
        self.index(p).map(|i| self.cells[i]).unwrap_or_default()
    }

    pub fn set(&mut self, p: Point, cell: Cell) {
        if let Some(i) = self.index(p) {
            self.cells[i] = cell;
        }
    }

    /// Fill every cell with `cell`.
    pub fn fill(&mut self, cell: Cell) {
        self.cells.fill(cell);
    }

    /// Fill the cells of `rect` that lie on the canvas.
    pub fn fill_rect(&mut self, rect: Rect, cell: Cell) {
        for p in rect.iter() {
            self.set(p, cell);
        }
    }

    /// Write `text` starting at `p`, one char per cell, keeping each
    /// cell's background unless `style` sets one. Returns the position
    /// just past the last char.
    pub fn print(&mut self, p: Point, text: &str, style: Style) -> Point {
        let mut at = p;
        for ch in text.chars() {
            let mut cell_style = style;
            if cell_style.bg == Color::DEFAULT {
                cell_style.bg = self.at(at).style.bg;
            }
            self.set(at, Cell::new(ch, cell_style));
            at = at.shift(1, 0);
        }
        at
    }

    /// Write `text` horizontally centred inside `rect` on row `y`.
    pub fn print_centered(&mut self, rect: Rect, y: i32, text: &str, style: Style) -> Point {
        let len = text.chars().count() as i32;
        let x = rect.min.x + (rect.width() - len).max(0) / 2;
        self.print(Point::new(x, y), text, style)
    }

    /// The characters of row `y` as a string (empty outside the canvas).
    pub fn row_text(&self, y: i32) -> String {
        if y < 0 || y >= self.height {
            return String::new();
        }
        (0..self.width).map(|x| self.at(Point::new(x, y)).ch).collect()
    }

    /// Row-major iterator over `(Point, Cell)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (Point, Cell)> + '_ {
        self.bounds().iter().map(move |p| (p, self.at(p)))
    }
}

// ---------------------------------------------------------------------------
// Frame / FrameCell / compute_frame
// ---------------------------------------------------------------------------

/// A single cell that changed between frames.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameCell {
    pub cell: Cell,
    pub pos: Point,
}

/// A set of cell changes (a diff frame).
#[derive(Clone, Debug, Default)]
pub struct Frame {
    pub cells: Vec<FrameCell>,
    pub width: i32,
    pub height: i32,
}

/// Compute the cells of `curr` that differ from `prev`.
///
/// When the two canvases have different sizes every cell of `curr` is
/// reported.
pub fn compute_frame(prev: &Canvas, curr: &Canvas) -> Frame {
    let same_size = prev.width == curr.width && prev.height == curr.height;
    let cells = curr
        .iter()
        .filter(|&(p, c)| !same_size || prev.at(p) != c)
        .map(|(pos, cell)| FrameCell { cell, pos })
        .collect();
    Frame {
        cells,
        width: curr.width,
        height: curr.height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canvas_new_and_at() {
        let c = Canvas::new(4, 3);
        assert_eq!((c.width(), c.height()), (4, 3));
        assert_eq!(c.at(Point::new(0, 0)), Cell::default());
        assert_eq!(c.at(Point::new(10, 10)), Cell::default());
    }

    #[test]
    fn set_clips_outside() {
        let mut c = Canvas::new(2, 2);
        c.set(Point::new(5, 0), Cell::default().with_char('X'));
        c.set(Point::new(-1, 0), Cell::default().with_char('X'));
        assert!(c.iter().all(|(_, cell)| cell.ch == ' '));
    }

    #[test]
    fn print_keeps_background() {
        let bg = Color::from_rgb(10, 20, 30);
        let mut c = Canvas::new(6, 1);
        c.fill(Cell::new(' ', Style::default().with_bg(bg)));
        let end = c.print(Point::new(1, 0), "hey", Style::default());
        assert_eq!(end, Point::new(4, 0));
        assert_eq!(c.row_text(0), " hey  ");
        assert_eq!(c.at(Point::new(2, 0)).style.bg, bg);
    }

    #[test]
    fn print_centered_in_rect() {
        let mut c = Canvas::new(9, 2);
        c.print_centered(c.bounds(), 1, "abc", Style::default());
        assert_eq!(c.row_text(1), "   abc   ");
    }

    #[test]
    fn fill_rect_is_clipped() {
        let mut c = Canvas::new(3, 3);
        c.fill_rect(Rect::new(1, 1, 5, 5), Cell::default().with_char('#'));
        assert_eq!(c.row_text(0), "   ");
        assert_eq!(c.row_text(2), " ##");
    }

    #[test]
    fn compute_frame_diff() {
        let a = Canvas::new(3, 2);
        let mut b = Canvas::new(3, 2);
        b.set(Point::new(1, 0), Cell::default().with_char('A'));
        let frame = compute_frame(&a, &b);
        assert_eq!(frame.cells.len(), 1);
        assert_eq!(frame.cells[0].pos, Point::new(1, 0));
        assert_eq!(frame.cells[0].cell.ch, 'A');
    }

    #[test]
    fn compute_frame_resized_reports_everything() {
        let a = Canvas::new(2, 2);
        let b = Canvas::new(3, 2);
        assert_eq!(compute_frame(&a, &b).cells.len(), 6);
    }
}
