//! twenty48 terminal entry point.

use clap::Parser;
use twenty48_crossterm::CrosstermDriver;
use twenty48_lib::{Cli, GameModel, init_logging};
use twenty48_view::{App, AppConfig};

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    // The terminal is the screen; only log when asked to log to a file.
    if let Some(path) = cli.game.log_file.as_deref() {
        init_logging(Some(path))?;
    }
    let model = GameModel::new(cli.game.new_game()?);
    let layout = *model.layout();
    let mut app = App::new(AppConfig {
        model,
        driver: CrosstermDriver::new(),
        width: layout.width,
        height: layout.height,
    });
    app.run()
}

fn main() {
    if let Err(e) = run(Cli::parse()) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
