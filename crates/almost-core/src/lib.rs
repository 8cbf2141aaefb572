//! Core data structures for the Almost word-group puzzle.
//!
//! This crate provides the small, shared vocabulary used by puzzle generation,
//! submission scoring, and the application front end.
//!
//! # Overview
//!
//! - [`tile`]: Tiles and the typed indices that address them ([`TileId`], [`GroupIndex`])
//! - [`group_spec`]: The validated list of group sizes configured for a round
//! - [`difficulty`]: The difficulty knob and its tag-count step function
//! - [`fingerprint`]: Order-independent keys for detecting repeated submissions
//!
//! # Examples
//!
//! ```
//! use almost_core::{Difficulty, Fingerprint, GroupSpec, TileId};
//!
//! let spec = GroupSpec::new(vec![4, 2, 3])?;
//! assert_eq!(spec.sizes(), &[2, 3, 4]);
//! assert_eq!(Difficulty::Easy.num_tags(spec.len()), 3);
//!
//! let a = Fingerprint::from_ids([TileId::new(3), TileId::new(1)]);
//! let b = Fingerprint::from_ids([TileId::new(1), TileId::new(3)]);
//! assert_eq!(a, b);
//! # Ok::<(), almost_core::GroupSpecError>(())
//! ```

pub mod difficulty;
pub mod fingerprint;
pub mod group_spec;
pub mod tile;

pub use self::{
    difficulty::{Difficulty, ParseDifficultyError},
    fingerprint::Fingerprint,
    group_spec::{GroupSpec, GroupSpecError},
    tile::{GroupIndex, Tile, TileId},
};
