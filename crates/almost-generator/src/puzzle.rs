use std::collections::HashSet;

use almost_core::{GroupIndex, GroupSpec, Tile, TileId};
use almost_store::CategoryId;

/// A generated puzzle instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedPuzzle {
    pub(crate) tiles: Vec<Tile>,
    pub(crate) categories: Vec<CategoryId>,
    pub(crate) attempts: usize,
}

/// A way in which a tile set fails to be a valid puzzle for a group spec.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum PuzzleDefect {
    /// The number of tiles differs from the sum of group sizes.
    #[display("expected {expected} tiles, found {actual}")]
    TileCount {
        /// Sum of the group sizes.
        expected: usize,
        /// Number of tiles present.
        actual: usize,
    },
    /// Tile ids are not sequential from zero.
    #[display("tile at position {position} has id {id}")]
    TileId {
        /// Position of the tile in the list.
        position: usize,
        /// The id found there.
        id: TileId,
    },
    /// A tile's group index or size disagrees with the group sizes.
    #[display("tile {id} claims group {group_index} of size {group_size}")]
    GroupMismatch {
        /// The offending tile.
        id: TileId,
        /// The group index on the tile.
        group_index: GroupIndex,
        /// The group size on the tile.
        group_size: usize,
    },
    /// A group does not hold exactly its size in tiles.
    #[display("group {group_index} has {actual} tiles, expected {expected}")]
    GroupSize {
        /// The group.
        group_index: GroupIndex,
        /// The size configured for the group.
        expected: usize,
        /// The number of tiles found.
        actual: usize,
    },
    /// Two groups are backed by the same category.
    #[display("category {category_id} backs more than one group")]
    DuplicateCategory {
        /// The repeated category.
        category_id: CategoryId,
    },
    /// Two tiles share a term.
    #[display("term {term:?} appears more than once")]
    DuplicateTerm {
        /// The repeated term.
        term: String,
    },
}

impl GeneratedPuzzle {
    /// Returns the tiles, ordered by id.
    #[must_use]
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Consumes the puzzle and returns its tiles.
    #[must_use]
    pub fn into_tiles(self) -> Vec<Tile> {
        self.tiles
    }

    /// Returns the category backing each group, by group index.
    #[must_use]
    pub fn categories(&self) -> &[CategoryId] {
        &self.categories
    }

    /// Returns how many attempts the generator needed.
    #[must_use]
    pub fn attempts(&self) -> usize {
        self.attempts
    }

    /// Builds a puzzle from parts, checking it against `spec`.
    ///
    /// # Errors
    ///
    /// Returns the first [`PuzzleDefect`] found.
    pub fn from_parts(
        spec: &GroupSpec,
        tiles: Vec<Tile>,
        categories: Vec<CategoryId>,
    ) -> Result<Self, PuzzleDefect> {
        let puzzle = Self {
            tiles,
            categories,
            attempts: 0,
        };
        puzzle.verify(spec)?;
        Ok(puzzle)
    }

    /// Checks that this puzzle is valid for `spec`.
    ///
    /// A valid puzzle has exactly `spec.total_tiles()` tiles with sequential ids,
    /// every group holds exactly its size in tiles, every group is backed by a
    /// distinct category, and no term appears twice.
    ///
    /// # Errors
    ///
    /// Returns the first [`PuzzleDefect`] found.
    pub fn verify(&self, spec: &GroupSpec) -> Result<(), PuzzleDefect> {
        if self.tiles.len() != spec.total_tiles() {
            return Err(PuzzleDefect::TileCount {
                expected: spec.total_tiles(),
                actual: self.tiles.len(),
            });
        }

        let mut counts = vec![0; spec.len()];
        let mut terms = HashSet::new();
        for (position, tile) in self.tiles.iter().enumerate() {
            if tile.id.index() != position {
                return Err(PuzzleDefect::TileId {
                    position,
                    id: tile.id,
                });
            }
            if spec.size_of(tile.group_index) != Some(tile.group_size) {
                return Err(PuzzleDefect::GroupMismatch {
                    id: tile.id,
                    group_index: tile.group_index,
                    group_size: tile.group_size,
                });
            }
            counts[tile.group_index.index()] += 1;
            if !terms.insert(tile.term.as_str()) {
                return Err(PuzzleDefect::DuplicateTerm {
                    term: tile.term.clone(),
                });
            }
        }

        for ((group_index, expected), actual) in spec.groups().zip(counts) {
            if actual != expected {
                return Err(PuzzleDefect::GroupSize {
                    group_index,
                    expected,
                    actual,
                });
            }
        }

        let mut seen = HashSet::new();
        for &category_id in &self.categories {
            if !seen.insert(category_id) {
                return Err(PuzzleDefect::DuplicateCategory { category_id });
            }
        }

        Ok(())
    }
}
