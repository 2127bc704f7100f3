mod command;
mod config;
mod runner;

use std::io;
use std::path::PathBuf;

use clap::Parser;
use tictactoe_common::config::{ConfigError, Validate};
use tictactoe_common::games::SessionRng;
use tictactoe_common::games::tictactoe::{Difficulty, Mark};
use tictactoe_common::{log, logger};

use config::{CONFIG_FILE, Config, get_config_manager};
use runner::ConsoleRunner;

#[derive(Parser)]
#[command(name = "tictactoe_console", about = "Play tic-tac-toe against the computer")]
struct Args {
    /// YAML settings file, created with defaults when missing.
    #[arg(long, default_value = CONFIG_FILE)]
    config: PathBuf,
    /// Board side: 3, 4 or 5.
    #[arg(long)]
    size: Option<usize>,
    #[arg(long)]
    play_as: Option<Mark>,
    #[arg(long)]
    difficulty: Option<Difficulty>,
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long)]
    verbose: bool,
}

impl Args {
    fn apply_to(&self, config: &mut Config) {
        if let Some(size) = self.size {
            config.game.board_size = size;
        }
        if let Some(play_as) = self.play_as {
            config.game.play_as = play_as;
        }
        if let Some(difficulty) = self.difficulty {
            config.game.difficulty = difficulty;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut config = get_config_manager(&args.config).get_or_create_config()?;
    logger::init_logger(config.log_prefix.clone(), args.verbose);

    args.apply_to(&mut config);
    config.validate().map_err(ConfigError::Invalid)?;

    let rng = match config.seed {
        Some(seed) => SessionRng::new(seed),
        None => SessionRng::from_random(),
    };
    log!(
        "Config {}: {:?}, seed {}",
        args.config.display(),
        config.game,
        rng.seed()
    );

    let stdout = io::stdout();
    let mut runner = ConsoleRunner::new(config.game, rng, stdout.lock())?;
    runner.run(io::stdin().lock())?;

    Ok(())
}
