use std::fs::File;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;
use tracing_subscriber::EnvFilter;

use snake_canvas::input::{self, Command};
use snake_canvas::term::{self, TermSurface};
use snake_canvas::{Config, Game, Options};

/// How long to wait for input when no interval is installed.
const IDLE_POLL: Duration = Duration::from_millis(100);

fn main() -> Result<()> {
    let config = Config::from_options(Options::parse())?;
    init_logging(&config)?;

    let rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut surface = TermSurface::new(config.width, config.height, config.cell_width)?;
    surface.setup()?;

    // Dropping the game restores the terminal, including on the error paths below.
    let mut game = Game::new(&config, surface, rng)?;
    game.init(Instant::now());

    loop {
        let timeout = game.time_until_tick(Instant::now()).unwrap_or(IDLE_POLL);

        if let Some(key_ev) = term::poll_key(timeout)? {
            match input::command_for(&key_ev) {
                Some(Command::Quit) => break,
                Some(Command::Restart) => game.init(Instant::now()),
                Some(Command::Steer(direction)) => {
                    game.steer(direction);
                }
                None => {}
            }
        }

        game.run_due(Instant::now())?;
    }

    info!(score = game.score(), "quit");
    Ok(())
}

// The terminal is the render surface, so logs only go to a file.
fn init_logging(config: &Config) -> Result<()> {
    let path = match &config.log_file {
        Some(path) => path,
        None => return Ok(()),
    };

    let file = File::create(path)
        .with_context(|| format!("Error creating log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();

    Ok(())
}
