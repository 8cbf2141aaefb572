//! The validated list of group sizes for a round.

use serde::{Deserialize, Serialize};

use crate::GroupIndex;

/// Errors raised when a list of group sizes cannot form a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum GroupSpecError {
    /// No group sizes were given.
    #[display("at least one group size is required")]
    Empty,
    /// A group of size zero was requested.
    #[display("group sizes must be positive")]
    ZeroSize,
    /// Two groups share the same size.
    #[display("duplicate group size: {size}")]
    Duplicate {
        /// The repeated size.
        size: usize,
    },
}

/// Ascending, duplicate-free group sizes.
///
/// The size of a selection is the only thing that ties a submission to a group,
/// so two groups of equal size are rejected at construction time.
///
/// # Examples
///
/// ```
/// use almost_core::{GroupIndex, GroupSpec, GroupSpecError};
///
/// let spec = GroupSpec::new(vec![3, 2, 4])?;
/// assert_eq!(spec.sizes(), &[2, 3, 4]);
/// assert_eq!(spec.min_size(), 2);
/// assert_eq!(spec.max_size(), 4);
/// assert_eq!(spec.total_tiles(), 9);
/// assert_eq!(spec.size_of(GroupIndex::new(1)), Some(3));
///
/// assert_eq!(
///     GroupSpec::new(vec![2, 2]),
///     Err(GroupSpecError::Duplicate { size: 2 })
/// );
/// # Ok::<(), GroupSpecError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<usize>", into = "Vec<usize>")]
pub struct GroupSpec {
    sizes: Vec<usize>,
}

impl GroupSpec {
    /// Creates a group spec from sizes in any order.
    ///
    /// # Errors
    ///
    /// Returns [`GroupSpecError::Empty`] for an empty list,
    /// [`GroupSpecError::ZeroSize`] if any size is zero, and
    /// [`GroupSpecError::Duplicate`] if two sizes are equal.
    pub fn new(mut sizes: Vec<usize>) -> Result<Self, GroupSpecError> {
        if sizes.is_empty() {
            return Err(GroupSpecError::Empty);
        }
        if sizes.contains(&0) {
            return Err(GroupSpecError::ZeroSize);
        }
        sizes.sort_unstable();
        if let Some(pair) = sizes.windows(2).find(|pair| pair[0] == pair[1]) {
            return Err(GroupSpecError::Duplicate { size: pair[0] });
        }
        Ok(Self { sizes })
    }

    /// Returns the sizes in ascending order.
    #[must_use]
    pub fn sizes(&self) -> &[usize] {
        &self.sizes
    }

    /// Returns the number of groups.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    /// Always `false`; kept for API symmetry with [`len`](Self::len).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }

    /// Returns the smallest group size.
    #[must_use]
    pub fn min_size(&self) -> usize {
        self.sizes[0]
    }

    /// Returns the largest group size.
    #[must_use]
    pub fn max_size(&self) -> usize {
        self.sizes[self.sizes.len() - 1]
    }

    /// Returns the number of tiles in a full puzzle.
    #[must_use]
    pub fn total_tiles(&self) -> usize {
        self.sizes.iter().sum()
    }

    /// Returns the size of the group at `index`.
    #[must_use]
    pub fn size_of(&self, index: GroupIndex) -> Option<usize> {
        self.sizes.get(index.index()).copied()
    }

    /// Returns the index of the group with the given size.
    #[must_use]
    pub fn index_of(&self, size: usize) -> Option<GroupIndex> {
        self.sizes.binary_search(&size).ok().map(GroupIndex::new)
    }

    /// Iterates `(index, size)` pairs in ascending size order.
    pub fn groups(&self) -> impl DoubleEndedIterator<Item = (GroupIndex, usize)> + '_ {
        self.sizes
            .iter()
            .enumerate()
            .map(|(i, &size)| (GroupIndex::new(i), size))
    }
}

impl Default for GroupSpec {
    /// Groups of 2, 3 and 4 tiles.
    fn default() -> Self {
        Self {
            sizes: vec![2, 3, 4],
        }
    }
}

impl TryFrom<Vec<usize>> for GroupSpec {
    type Error = GroupSpecError;

    fn try_from(sizes: Vec<usize>) -> Result<Self, Self::Error> {
        Self::new(sizes)
    }
}

impl From<GroupSpec> for Vec<usize> {
    fn from(spec: GroupSpec) -> Self {
        spec.sizes
    }
}
