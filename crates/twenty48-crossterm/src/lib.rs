//! Crossterm terminal driver for twenty48.
//!
//! Provides a [`CrosstermDriver`] that implements [`twenty48_view::Driver`],
//! painting the canvas centred in the terminal via crossterm.

use std::io::{self, Stdout, Write};
use std::sync::mpsc::Sender;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute, queue,
    style::{self, Attribute, Color as CtColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, ClearType},
};

use twenty48_view::{AttrMask, Color, Driver, Frame, Key, ModMask, Msg, Point};

/// How long a single poll waits for input before returning to the loop.
const POLL_TIMEOUT: Duration = Duration::from_millis(250);

/// Maps a [`twenty48_view::Color`] to a [`crossterm::style::Color`].
fn to_ct_color(c: Color) -> CtColor {
    if c == Color::DEFAULT {
        CtColor::Reset
    } else {
        let (r, g, b) = (c.r(), c.g(), c.b());
        CtColor::Rgb { r, g, b }
    }
}

/// Maps crossterm key modifiers to a [`ModMask`].
fn to_mod_mask(mods: KeyModifiers) -> ModMask {
    let mut m = ModMask::NONE;
    if mods.contains(KeyModifiers::SHIFT) {
        m = m | ModMask::SHIFT;
    }
    if mods.contains(KeyModifiers::CONTROL) {
        m = m | ModMask::CTRL;
    }
    if mods.contains(KeyModifiers::ALT) {
        m = m | ModMask::ALT;
    }
    m
}

/// Maps a crossterm [`KeyCode`] to a [`Key`].
fn to_key(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::Char(' ') => Some(Key::Space),
        KeyCode::Char(c) => Some(Key::Char(c)),
        KeyCode::Enter => Some(Key::Enter),
        KeyCode::Esc => Some(Key::Escape),
        KeyCode::Up => Some(Key::ArrowUp),
        KeyCode::Down => Some(Key::ArrowDown),
        KeyCode::Left => Some(Key::ArrowLeft),
        KeyCode::Right => Some(Key::ArrowRight),
        _ => None,
    }
}

/// Translate a terminal event into a message.
///
/// Only key presses are reported (terminals with the kitty protocol also
/// send repeats and releases). Ctrl+C becomes [`Msg::Quit`] since raw mode
/// swallows the signal.
fn translate(ev: Event) -> Option<Msg> {
    match ev {
        Event::Key(KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            ..
        }) => {
            if code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
                return Some(Msg::Quit);
            }
            to_key(code).map(|key| Msg::KeyDown {
                key,
                modifiers: to_mod_mask(modifiers),
                time: Instant::now(),
            })
        }
        Event::Resize(w, h) => Some(Msg::Screen {
            width: w as i32,
            height: h as i32,
            time: Instant::now(),
        }),
        _ => None,
    }
}

/// Top-left corner that centres a `frame`-sized canvas in `term`.
fn origin(term: (u16, u16), frame: (i32, i32)) -> Point {
    Point::new(
        ((term.0 as i32 - frame.0) / 2).max(0),
        ((term.1 as i32 - frame.1) / 2).max(0),
    )
}

/// Whether `p` lies on a terminal of size `term`. Cells past the edge would
/// wrap onto the next row.
fn on_screen(term: (u16, u16), p: Point) -> bool {
    p.x >= 0 && p.y >= 0 && p.x < term.0 as i32 && p.y < term.1 as i32
}

/// A terminal back-end for twenty48 using crossterm.
pub struct CrosstermDriver {
    out: Stdout,
    term_size: (u16, u16),
}

impl CrosstermDriver {
    /// Create a new driver.
    pub fn new() -> Self {
        Self {
            out: io::stdout(),
            term_size: (0, 0),
        }
    }
}

impl Default for CrosstermDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl Driver for CrosstermDriver {
    fn init(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        self.term_size = terminal::size()?;
        log::debug!("terminal size {}x{}", self.term_size.0, self.term_size.1);
        terminal::enable_raw_mode()?;
        execute!(
            self.out,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::Clear(ClearType::All)
        )?;
        Ok(())
    }

    fn poll_msgs(&mut self, tx: &Sender<Msg>) -> Result<(), Box<dyn std::error::Error>> {
        if !event::poll(POLL_TIMEOUT)? {
            return Ok(());
        }

        while event::poll(Duration::ZERO)? {
            let ev = event::read()?;
            if let Event::Resize(w, h) = ev {
                self.term_size = (w, h);
                queue!(self.out, style::ResetColor, terminal::Clear(ClearType::All))?;
            }
            if let Some(msg) = translate(ev) {
                tx.send(msg)?;
            }
        }

        Ok(())
    }

    fn flush(&mut self, frame: Frame) -> Result<(), Box<dyn std::error::Error>> {
        let at = origin(self.term_size, (frame.width, frame.height));

        let mut clipped = 0;
        for fc in &frame.cells {
            let p = fc.pos + at;
            if !on_screen(self.term_size, p) {
                clipped += 1;
                continue;
            }
            let cell = &fc.cell;

            queue!(
                self.out,
                cursor::MoveTo(p.x as u16, p.y as u16),
                SetForegroundColor(to_ct_color(cell.style.fg)),
                SetBackgroundColor(to_ct_color(cell.style.bg))
            )?;

            let attrs = cell.style.attrs;
            if attrs.contains(AttrMask::BOLD) {
                queue!(self.out, style::SetAttribute(Attribute::Bold))?;
            }
            if attrs.contains(AttrMask::UNDERLINE) {
                queue!(self.out, style::SetAttribute(Attribute::Underlined))?;
            }
            if attrs.contains(AttrMask::REVERSE) {
                queue!(self.out, style::SetAttribute(Attribute::Reverse))?;
            }
            if attrs.contains(AttrMask::DIM) {
                queue!(self.out, style::SetAttribute(Attribute::Dim))?;
            }

            write!(self.out, "{}", cell.ch)?;

            if !attrs.is_empty() {
                queue!(self.out, style::SetAttribute(Attribute::Reset))?;
            }
        }

        if clipped > 0 {
            log::trace!("clipped {clipped} cells outside the terminal");
        }
        self.out.flush()?;
        Ok(())
    }

    fn close(&mut self) {
        let _ = execute!(
            self.out,
            style::ResetColor,
            cursor::Show,
            terminal::LeaveAlternateScreen
        );
        let _ = terminal::disable_raw_mode();
    }
}
