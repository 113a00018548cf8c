mod config;
mod game;
mod grid;
mod input;
mod render;
mod snake;
mod term;

#[cfg(test)]
mod testing;

use std::fs::File;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use simplelog::WriteLogger;

use config::Config;
use game::{SnakeGame, Timing};
use render::RenderAdapter;
use snake::GridSimulation;
use term::{KeyboardInput, TermManager};

fn main() -> Result<()> {
    let config = Config::parse();
    init_logging(&config)?;

    info!("starting on a {}x{} grid", config.width, config.height);

    let mut term = TermManager::new()?;
    term.setup()?;

    // The terminal is restored when `term` goes out of scope, errors included.
    let renderer = RenderAdapter::new(term, config.dimensions())?;
    let sim = GridSimulation::centered(config.dimensions())?;
    let mut game = SnakeGame::new(sim, renderer, KeyboardInput, config.rng(), Timing::default());

    game.run()?;
    info!("bye, final length {}", game.simulation().len());
    Ok(())
}

fn init_logging(config: &Config) -> Result<()> {
    let path = match &config.log_file {
        Some(path) => path,
        None => return Ok(()),
    };

    let file = File::create(path)
        .with_context(|| format!("cannot create log file {}", path.display()))?;
    WriteLogger::init(config.log_level, simplelog::Config::default(), file)?;
    Ok(())
}
