//! Tiles and their typed indices.

use serde::{Deserialize, Serialize};

/// Identifier of a tile within one puzzle instance.
///
/// Ids are sequential, starting at zero, in group order. They double as indices
/// into the tile arena held by a round, so a view can bind to an id and keep
/// pointing at the same slot across a reset.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::From,
)]
#[serde(transparent)]
pub struct TileId(usize);

impl TileId {
    /// Creates a tile id from a raw index.
    #[must_use]
    #[inline]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Returns the raw index.
    #[must_use]
    #[inline]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// Index of a group within the ascending [`GroupSpec`](crate::GroupSpec).
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::From,
)]
#[serde(transparent)]
pub struct GroupIndex(usize);

impl GroupIndex {
    /// Creates a group index from a raw index.
    #[must_use]
    #[inline]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Returns the raw index.
    #[must_use]
    #[inline]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// A word tile on the board.
///
/// Every tile secretly belongs to one group. The group is identified both by its
/// size (the only thing a submission is matched against) and by its index in the
/// ascending group list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tile {
    /// Sequential id, unique within the puzzle.
    pub id: TileId,
    /// The word shown on the tile.
    pub term: String,
    /// Display name of the category backing the tile's group.
    pub category: String,
    /// Number of tiles in the tile's group.
    pub group_size: usize,
    /// Index of the tile's group.
    pub group_index: GroupIndex,
}

impl Tile {
    /// Overwrites the puzzle contents of this tile with those of `other`.
    ///
    /// The id is kept, so anything bound to this tile's slot stays valid.
    pub fn replace_contents(&mut self, other: Tile) {
        let Tile {
            id: _,
            term,
            category,
            group_size,
            group_index,
        } = other;
        self.term = term;
        self.category = category;
        self.group_size = group_size;
        self.group_index = group_index;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tile(id: usize, term: &str, group_size: usize, group_index: usize) -> Tile {
        Tile {
            id: TileId::new(id),
            term: term.to_owned(),
            category: format!("category {group_index}"),
            group_size,
            group_index: GroupIndex::new(group_index),
        }
    }

    #[test]
    fn test_replace_contents_keeps_id() {
        let mut target = tile(5, "apple", 2, 0);
        target.replace_contents(tile(9, "violin", 4, 2));

        assert_eq!(target.id, TileId::new(5));
        assert_eq!(target.term, "violin");
        assert_eq!(target.category, "category 2");
        assert_eq!(target.group_size, 4);
        assert_eq!(target.group_index, GroupIndex::new(2));
    }
}
