//! **twenty48-view**: the presentation framework shared by every twenty48
//! back-end.
//!
//! A [`Model`] draws into a [`Canvas`] of styled character cells. The
//! framework diffs successive canvases into [`Frame`]s and hands only the
//! changed cells to a back-end, either a polled [`Driver`] run by [`App`] or
//! an [`EventLoopDriver`] that owns its event loop and drives an
//! [`AppRunner`].

pub mod app;
pub mod canvas;
pub mod messages;
pub mod style;

pub use app::{App, AppConfig, AppRunner, Driver, Effect, EventLoopDriver, Model};
pub use canvas::{Canvas, Cell, Frame, FrameCell, Point, Rect, compute_frame};
pub use messages::{Key, ModMask, Msg};
pub use style::{AttrMask, Color, Style};
