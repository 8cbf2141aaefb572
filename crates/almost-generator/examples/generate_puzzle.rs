//! Example generating a puzzle from a term catalog.
//!
//! # Usage
//!
//! ```sh
//! cargo run --example generate_puzzle
//! ```
//!
//! Pick group sizes and difficulty:
//!
//! ```sh
//! cargo run --example generate_puzzle -- --groups 3,4,5 --difficulty hard
//! ```
//!
//! Replay a puzzle from its seed, or load another catalog:
//!
//! ```sh
//! cargo run --example generate_puzzle -- --seed <HEX> --catalog my-catalog.json
//! ```

use std::{path::PathBuf, process};

use almost_core::{Difficulty, GroupSpec};
use almost_generator::PuzzleGenerator;
use almost_store::{MemoryTermStore, PuzzleSeed, TermCatalog};
use clap::Parser;
use futures::executor::block_on;

const BUNDLED_CATALOG: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../../data/catalog.en.json"
));

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// JSON term catalog to draw from. Defaults to the bundled English catalog.
    #[arg(long, value_name = "PATH")]
    catalog: Option<PathBuf>,

    /// Group sizes, comma separated.
    #[arg(long, value_delimiter = ',', default_values_t = [2, 3, 4])]
    groups: Vec<usize>,

    /// Difficulty: easy, medium, or hard.
    #[arg(long, default_value_t = Difficulty::Easy)]
    difficulty: Difficulty,

    /// Seed in hex. A random seed is used when omitted.
    #[arg(long, value_name = "HEX")]
    seed: Option<PuzzleSeed>,

    /// Catalog language to sample from.
    #[arg(long, default_value = "en")]
    language: String,
}

fn main() {
    let args = Args::parse();

    let catalog = match &args.catalog {
        Some(path) => TermCatalog::from_path(path),
        None => TermCatalog::from_json_str(BUNDLED_CATALOG),
    };
    let catalog = catalog.unwrap_or_else(|e| {
        eprintln!("failed to load catalog: {e}");
        process::exit(1);
    });
    let spec = GroupSpec::new(args.groups).unwrap_or_else(|e| {
        eprintln!("invalid groups: {e}");
        process::exit(2);
    });

    let seed = args.seed.unwrap_or_else(PuzzleSeed::random);
    let store = MemoryTermStore::with_seed(catalog, seed);
    let generator = PuzzleGenerator::new(&store).with_language(&args.language);

    let puzzle = match block_on(generator.generate(&spec, args.difficulty)) {
        Ok(puzzle) => puzzle,
        Err(e) => {
            eprintln!("{e}");
            process::exit(1);
        }
    };

    println!("Seed: {seed}");
    println!("Attempts: {}", puzzle.attempts());
    for (group_index, size) in spec.groups().rev() {
        let group: Vec<_> = puzzle
            .tiles()
            .iter()
            .filter(|tile| tile.group_index == group_index)
            .collect();
        let category = group.first().map_or("?", |tile| tile.category.as_str());
        let terms: Vec<_> = group.iter().map(|tile| tile.term.as_str()).collect();
        println!("[{size}] {category}: {}", terms.join(", "));
    }
}
