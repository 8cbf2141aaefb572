//! Puzzle generation for Almost.
//!
//! A puzzle is a flat set of tiles: one group of tiles per configured group
//! size, each group backed by a distinct category, with no term repeated across
//! the whole board. [`PuzzleGenerator`] finds such an assignment by repeatedly
//! sampling tags, categories, and terms from a [`TermStore`] until one attempt
//! passes every check, or until its attempt budget runs out.
//!
//! # Examples
//!
//! ```
//! use almost_core::{Difficulty, GroupSpec};
//! use almost_generator::PuzzleGenerator;
//! use almost_store::testing::ScriptedTermStore;
//! use futures::executor::block_on;
//!
//! let store = ScriptedTermStore::new()
//!     .with_category("pets", &["home"], &["cat", "dog"])
//!     .with_category("tools", &["home"], &["saw", "awl", "vise"]);
//! let spec = GroupSpec::new(vec![2, 3])?;
//!
//! let puzzle = block_on(PuzzleGenerator::new(&store).generate(&spec, Difficulty::Easy))?;
//! assert_eq!(puzzle.tiles().len(), 5);
//! assert!(puzzle.verify(&spec).is_ok());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! [`TermStore`]: almost_store::TermStore

pub use self::{
    generator::{DEFAULT_LANGUAGE, DEFAULT_MAX_ATTEMPTS, GenerationError, PuzzleGenerator},
    puzzle::{GeneratedPuzzle, PuzzleDefect},
};

mod generator;
mod puzzle;
