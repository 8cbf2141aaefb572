//! Almost command-line entry point.

use std::{io, path::PathBuf, process::ExitCode};

use almost_app::{app, config::GameConfig, error::AppError, game_factory};
use almost_core::Difficulty;
use almost_store::{MemoryTermStore, PuzzleSeed};
use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// JSON settings file.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Catalog JSON file. Defaults to the bundled English catalog.
    #[arg(long, global = true, value_name = "PATH")]
    catalog: Option<PathBuf>,
    /// Seed for reproducible puzzles, as 64 hex digits.
    #[arg(long, global = true, value_name = "HEX")]
    seed: Option<PuzzleSeed>,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Play rounds interactively (the default).
    Play {
        #[arg(long)]
        difficulty: Option<Difficulty>,
    },
    /// Print one generated puzzle as JSON.
    Generate {
        #[arg(long)]
        difficulty: Option<Difficulty>,
    },
    /// Answer one tiles request, e.g. `action=tiles numTags=3`.
    Request {
        #[arg(long, default_value = "GET")]
        method: String,
        #[arg(value_name = "KEY=VALUE")]
        params: Vec<String>,
    },
}

fn run(cli: Cli) -> Result<(), AppError> {
    let config = match &cli.config {
        Some(path) => GameConfig::from_path(path)?,
        None => GameConfig::default(),
    };
    let catalog = game_factory::load_catalog(cli.catalog.as_deref())?;
    let seed = cli.seed.unwrap_or_else(PuzzleSeed::random);
    log::info!("seed {seed}");
    let store = MemoryTermStore::with_seed(catalog, seed);

    let stdout = io::stdout().lock();
    match cli.command.unwrap_or(Command::Play { difficulty: None }) {
        Command::Play { difficulty } => app::run_play(
            &store,
            &config,
            seed,
            difficulty.unwrap_or(config.default_difficulty),
            io::stdin().lock(),
            stdout,
        ),
        Command::Generate { difficulty } => app::run_generate(
            &store,
            &config,
            difficulty.unwrap_or(config.default_difficulty),
            stdout,
        ),
        Command::Request { method, params } => {
            app::run_request(&store, &config, &method, &params, stdout)
        }
    }
}

fn main() -> ExitCode {
    better_panic::install();
    env_logger::init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err}");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
