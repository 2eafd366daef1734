/// Command-line options and the resolved game configuration.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::scoreboard::DEFAULT_TICK_LIMIT;

pub const DEFAULT_FRAME_MS: u64 = 30;
pub const DEFAULT_SCALE: u16 = 5;

#[derive(Parser, Debug)]
#[command(name = "unhappy_reptiles")]
#[command(about = "Shoot the flying reptile before the round score runs out")]
pub struct Cli {
    /// Directory holding the sprite images
    #[arg(long, default_value = "assets")]
    pub assets: PathBuf,

    /// Milliseconds per game tick
    #[arg(long, default_value_t = DEFAULT_FRAME_MS)]
    pub frame_ms: u64,

    /// Ticks between round-score decrements
    #[arg(long, default_value_t = DEFAULT_TICK_LIMIT)]
    pub score_tick_limit: u32,

    /// Logical pixels per terminal half-cell
    #[arg(long, default_value_t = DEFAULT_SCALE, value_parser = clap::value_parser!(u16).range(1..))]
    pub scale: u16,

    /// Seed for a reproducible game
    #[arg(long)]
    pub seed: Option<u64>,

    /// Write logs to this file
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameConfig {
    pub asset_dir: PathBuf,
    pub frame: Duration,
    pub score_tick_limit: u32,
    pub scale: u16,
    pub seed: Option<u64>,
    pub log_file: Option<PathBuf>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            asset_dir: PathBuf::from("assets"),
            frame: Duration::from_millis(DEFAULT_FRAME_MS),
            score_tick_limit: DEFAULT_TICK_LIMIT,
            scale: DEFAULT_SCALE,
            seed: None,
            log_file: None,
        }
    }
}

impl From<Cli> for GameConfig {
    fn from(cli: Cli) -> Self {
        Self {
            asset_dir: cli.assets,
            frame: Duration::from_millis(cli.frame_ms.max(1)),
            score_tick_limit: cli.score_tick_limit.max(1),
            scale: cli.scale.max(1),
            seed: cli.seed,
            log_file: cli.log_file,
        }
    }
}
