use std::path::PathBuf;

use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use simplelog::LevelFilter;

use crate::grid::Dimensions;

pub const DEFAULT_WIDTH: u16 = 70;
pub const DEFAULT_HEIGHT: u16 = 35;

/// Classic snake on a fixed grid, played in the terminal.
#[derive(Debug, Parser)]
#[command(name = "game-of-snakes", version)]
pub struct Config {
    /// Grid width in cells.
    #[arg(
        long,
        value_name = "CELLS",
        default_value_t = DEFAULT_WIDTH,
        value_parser = clap::value_parser!(u16).range(3..=500)
    )]
    pub width: u16,
    /// Grid height in cells.
    #[arg(
        long,
        value_name = "CELLS",
        default_value_t = DEFAULT_HEIGHT,
        value_parser = clap::value_parser!(u16).range(3..=500)
    )]
    pub height: u16,
    /// Seed for food placement. Games with the same seed and the same moves
    /// play out identically.
    #[arg(long)]
    pub seed: Option<u64>,
    /// Write logs to this file. The terminal belongs to the game, so nothing
    /// is logged without it.
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
    /// Minimum level written to the log file.
    #[arg(long, value_name = "LEVEL", default_value_t = LevelFilter::Info)]
    pub log_level: LevelFilter,
}

impl Config {
    pub fn dimensions(&self) -> Dimensions {
        Dimensions::new(self.width, self.height)
    }

    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}
