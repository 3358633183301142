//! twenty48 graphical (winit + softbuffer) entry point.

use std::path::PathBuf;

use clap::Parser;
use twenty48_lib::{GameArgs, GameModel, init_logging};
use twenty48_view::{AppRunner, EventLoopDriver};
use twenty48_winit::{WinitConfig, WinitDriver};

/// Windowed version of the game.
#[derive(Parser, Debug)]
#[command(name = "twenty48-winit", version, about)]
struct WinitCli {
    #[command(flatten)]
    game: GameArgs,
    /// Monospace TTF/OTF font; common system fonts are tried otherwise.
    #[arg(long)]
    font: Option<PathBuf>,
    /// Font size in pixels.
    #[arg(long, default_value_t = 20.0)]
    font_size: f32,
}

fn run(cli: WinitCli) -> Result<(), Box<dyn std::error::Error>> {
    init_logging(cli.game.log_file.as_deref())?;
    let model = GameModel::new(cli.game.new_game()?);
    let layout = *model.layout();
    let driver = WinitDriver::new(WinitConfig {
        font_path: cli.font,
        font_size: cli.font_size,
        ..Default::default()
    });
    let runner = AppRunner::new(Box::new(model), layout.width, layout.height);
    driver.run(runner)
}

fn main() {
    if let Err(e) = run(WinitCli::parse()) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
