use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use lights_out_core::{GameConfig, PlayEngine, RandomGridGenerator};

mod command;
mod play;

#[derive(Parser, Debug)]
#[command(version, about = "Lights Out in the terminal", long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// JSON game config, the flags below take precedence
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of rows
    #[arg(short, long)]
    rows: Option<u8>,

    /// Number of columns
    #[arg(short, long)]
    cols: Option<u8>,

    /// Chance that a cell starts lit, within [0, 1]
    #[arg(short = 'p', long)]
    chance: Option<f64>,

    /// Force a seed for the first board instead of random
    #[arg(short, long)]
    seed: Option<u64>,
}

impl Args {
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => GameConfig::default(),
        };
        if let Some(rows) = self.rows {
            config.size.0 = rows;
        }
        if let Some(cols) = self.cols {
            config.size.1 = cols;
        }
        if let Some(chance) = self.chance {
            config.chance_lit = chance;
        }
        config.validate().context("invalid game config")?;
        Ok(config)
    }
}

fn load_config(path: &Path) -> Result<GameConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("could not read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("could not parse {}", path.display()))
}

fn new_game(config: GameConfig, seed: Option<u64>) -> Result<PlayEngine> {
    let seed = seed.unwrap_or_else(rand::random);
    log::debug!("seed: {seed}");
    PlayEngine::generate(config, RandomGridGenerator::new(seed)).context("could not start a game")
}

fn main() -> Result<()> {
    let args = Args::parse();
    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .init();

    let config = args.game_config()?;
    log::debug!("config: {config:?}");

    let engine = new_game(config, args.seed)?;
    play::run(
        engine,
        || new_game(config, None),
        io::stdin().lock(),
        io::stdout().lock(),
    )
}
