//! Command-line arguments and logging setup shared by both binaries.

use std::error::Error;
use std::fs::File;
use std::path::{Path, PathBuf};

use clap::{Args, Parser};
use env_logger::{Env, Target};
use twenty48_core::config::DEFAULT_TARGET;
use twenty48_core::{ConfigError, Game, GameConfig};

/// Game options.
#[derive(Args, Debug, Clone)]
pub struct GameArgs {
    /// Board rows (2 to 16).
    #[arg(long, default_value_t = 4)]
    pub rows: usize,
    /// Board columns (2 to 16).
    #[arg(long, default_value_t = 4)]
    pub cols: usize,
    /// Tile value that wins; a power of two, at least 4.
    #[arg(long, default_value_t = DEFAULT_TARGET)]
    pub target: u32,
    /// Seed for reproducible tile spawns.
    #[arg(long)]
    pub seed: Option<u64>,
    /// Write logs to this file. Filter with RUST_LOG (default "warn").
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl GameArgs {
    pub fn config(&self) -> GameConfig {
        GameConfig::default()
            .with_size(self.rows, self.cols)
            .with_target(self.target)
    }

    /// Start the session the arguments describe.
    pub fn new_game(&self) -> Result<Game, ConfigError> {
        match self.seed {
            Some(seed) => Game::with_seed(self.config(), seed),
            None => Game::new(self.config()),
        }
    }
}

/// Terminal version of the game.
#[derive(Parser, Debug)]
#[command(name = "twenty48", version, about)]
pub struct Cli {
    #[command(flatten)]
    pub game: GameArgs,
}

/// Install the global logger, writing to `path` when given and to stderr
/// otherwise.
pub fn init_logging(path: Option<&Path>) -> Result<(), Box<dyn Error>> {
    let mut builder = env_logger::Builder::from_env(Env::default().default_filter_or("warn"));
    if let Some(path) = path {
        let file = File::create(path)?;
        builder.target(Target::Pipe(Box::new(file)));
    }
    builder.try_init()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn defaults_are_classic() {
        let cli = Cli::parse_from(["twenty48"]);
        assert_eq!(cli.game.config(), GameConfig::default());
        assert!(cli.game.seed.is_none());
        assert!(cli.game.log_file.is_none());
    }

    #[test]
    fn options_build_the_config() {
        let cli = Cli::parse_from([
            "twenty48", "--rows", "3", "--cols", "5", "--target", "512", "--seed", "9",
        ]);
        let config = cli.game.config();
        assert_eq!((config.rows, config.cols, config.target), (3, 5, 512));
        let a = cli.game.new_game().expect("valid game");
        let b = cli.game.new_game().expect("valid game");
        assert_eq!(a.board(), b.board());
    }

    #[test]
    fn bad_options_surface_config_errors() {
        let cli = Cli::parse_from(["twenty48", "--target", "100"]);
        assert_eq!(cli.game.new_game().map(|_| ()), Err(ConfigError::Target(100)));
        assert!(Cli::try_parse_from(["twenty48", "--rows", "many"]).is_err());
    }
}
