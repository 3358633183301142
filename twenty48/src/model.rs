//! Elm-architecture Model implementation.

use twenty48_core::{Direction, Game, GameState};
use twenty48_view::{AttrMask, Canvas, Cell, Effect, Key, ModMask, Msg, Point, Rect, Style};

use crate::layout::{self, Layout, TILE_W};
use crate::palette::*;
use crate::tiles::TileLayer;

const WIN_LINES: &[&str] = &["PRESS ENTER TO PLAY MORE", "PRESS N TO START A NEW GAME"];
const LOSE_LINES: &[&str] = &["PRESS N TO START A NEW GAME"];

/// Map a key to a slide direction: arrows, vi keys or WASD.
pub fn direction_for(key: &Key) -> Option<Direction> {
    let dir = match key {
        Key::ArrowUp => Direction::Up,
        Key::ArrowDown => Direction::Down,
        Key::ArrowLeft => Direction::Left,
        Key::ArrowRight => Direction::Right,
        Key::Char(c) => match c.to_ascii_lowercase() {
            'k' | 'w' => Direction::Up,
            'j' | 's' => Direction::Down,
            'h' | 'a' => Direction::Left,
            'l' | 'd' => Direction::Right,
            _ => return None,
        },
        _ => return None,
    };
    Some(dir)
}

/// Tile label that fits in a tile, falling back to `2^n` for huge values.
fn tile_label(value: u32) -> String {
    let label = value.to_string();
    if label.len() as i32 <= TILE_W {
        label
    } else {
        format!("2^{}", value.trailing_zeros())
    }
}

/// The 2048 game model.
pub struct GameModel {
    game: Game,
    layer: TileLayer,
    layout: Layout,
}

impl GameModel {
    pub fn new(game: Game) -> Self {
        let config = game.config();
        let layout = Layout::new(config.rows, config.cols);
        let mut layer = TileLayer::new();
        layer.sync(game.board());
        Self {
            game,
            layer,
            layout,
        }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn tiles(&self) -> &TileLayer {
        &self.layer
    }

    // -------------------------------------------------------------------
    // Update
    // -------------------------------------------------------------------

    fn handle_key(&mut self, key: Key, modifiers: ModMask) -> Option<Effect> {
        if modifiers.contains(ModMask::CTRL) || modifiers.contains(ModMask::ALT) {
            return None;
        }
        if let Some(dir) = direction_for(&key) {
            self.game.apply_move(dir);
            return None;
        }
        match key {
            Key::Escape | Key::Char('q' | 'Q') => return Some(Effect::End),
            Key::Char('n' | 'N') => {
                self.game.reset();
                self.layer.clear();
            }
            Key::Enter => self.game.continue_after_win(),
            _ => {}
        }
        None
    }

    // -------------------------------------------------------------------
    // Drawing
    // -------------------------------------------------------------------

    fn draw_header(&self, canvas: &mut Canvas) {
        let style = Style::new(TEXT_DARK, PAGE_BG);
        let y = self.layout.score_row();
        let board = self.layout.board;
        canvas.print(
            Point::new(board.min.x, y),
            &format!("SCORE {}", self.game.score()),
            style,
        );
        let goal = format!("GOAL {}", self.game.config().target);
        let x = board.max.x - goal.len() as i32;
        canvas.print(Point::new(x, y), &goal, style);
    }

    fn draw_board(&self, canvas: &mut Canvas) {
        canvas.fill_rect(self.layout.board, Cell::new(' ', Style::new(BOARD_BG, BOARD_BG)));
        for (pos, _) in self.game.board().iter() {
            let rect = self.layout.tile_rect(pos);
            match self.layer.get(pos) {
                None => canvas.fill_rect(rect, Cell::new(' ', Style::new(TEXT_DARK, EMPTY_BG))),
                Some(sprite) => {
                    let style = tile_style(sprite.value, sprite.fresh);
                    canvas.fill_rect(rect, Cell::new(' ', style));
                    let mid = rect.min.y + rect.height() / 2;
                    canvas.print_centered(rect, mid, &tile_label(sprite.value), style);
                }
            }
        }
    }

    fn draw_overlay(&self, canvas: &mut Canvas) {
        let (title, lines, style): (&str, &[&str], Style) = match self.game.state() {
            GameState::Playing => return,
            GameState::Won => (
                "YOU WIN!",
                WIN_LINES,
                Style::new(TEXT_LIGHT, WIN_BG),
            ),
            GameState::Lost => (
                "YOU LOSE!",
                LOSE_LINES,
                Style::new(TEXT_DARK, LOSE_BG),
            ),
        };
        // Title, blank, instructions, with a blank row above and below.
        let height = lines.len() as i32 + 4;
        let board = self.layout.board;
        let top = board.min.y + (board.height() - height) / 2;
        let area = Rect::new(0, top, self.layout.width, height);
        canvas.fill_rect(area, Cell::new(' ', style));
        canvas.print_centered(area, top + 1, title, style.with_attrs(AttrMask::BOLD));
        for (i, line) in lines.iter().enumerate() {
            canvas.print_centered(area, top + 3 + i as i32, line, style);
        }
    }

    fn draw_help(&self, canvas: &mut Canvas) {
        let area = Rect::new(0, 0, self.layout.width, self.layout.height);
        canvas.print_centered(
            area,
            self.layout.help_row(),
            layout::HELP_TEXT,
            Style::new(TEXT_DARK, PAGE_BG),
        );
    }
}

impl twenty48_view::Model for GameModel {
    fn update(&mut self, msg: Msg) -> Option<Effect> {
        match msg {
            Msg::Init => {
                log::info!("starting with {:?}", self.game.state());
                None
            }
            Msg::Quit => Some(Effect::End),
            Msg::KeyDown { key, modifiers, .. } => {
                let effect = self.handle_key(key, modifiers);
                self.layer.sync(self.game.board());
                effect
            }
            Msg::Screen { .. } => None,
        }
    }

    fn draw(&self, canvas: &mut Canvas) {
        canvas.fill(Cell::new(' ', Style::new(TEXT_DARK, PAGE_BG)));
        self.draw_header(canvas);
        self.draw_board(canvas);
        self.draw_overlay(canvas);
        self.draw_help(canvas);
    }
}
