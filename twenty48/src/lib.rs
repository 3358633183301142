//! twenty48: the 2048 sliding-tile puzzle on top of the twenty48 crates.

pub mod cli;
pub mod layout;
pub mod model;
pub mod palette;
pub mod tiles;

pub use cli::{Cli, GameArgs, init_logging};
pub use layout::Layout;
pub use model::GameModel;
pub use tiles::{TileLayer, TileSprite};
