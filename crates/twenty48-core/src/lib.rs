//! **twenty48-core**: the 2048 simulation, free of any rendering concern.
//!
//! This crate provides the value types ([`Tile`], [`Pos`], [`Board`]), the
//! pure move engine ([`slide`]) and the stateful [`Game`] controller that
//! spawns tiles and tracks score and win/lose state. Presentation back-ends
//! only ever read a [`Snapshot`] and feed [`Direction`]s back in.

pub mod board;
pub mod config;
pub mod engine;
pub mod error;
pub mod game;

pub use board::{Board, Pos, Tile};
pub use config::GameConfig;
pub use engine::{Direction, MoveResult, can_move, slide, slide_line};
pub use error::{BoardError, ConfigError};
pub use game::{Game, GameState, Snapshot};
