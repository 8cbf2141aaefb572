use std::collections::HashSet;

use almost_core::{Fingerprint, GroupIndex, GroupSpec, Tile};

/// The classification of one submitted selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum Evaluation {
    /// Fewer tiles than the smallest group were selected.
    TooFew {
        /// The smallest group size.
        min: usize,
    },
    /// This exact set of tiles was submitted before.
    Duplicate,
    /// The selection is exactly one group.
    Correct {
        /// The group the selection completes.
        group_index: GroupIndex,
    },
    /// More than half of the selected tiles belong to a group of the selected size.
    Partial {
        /// Tiles whose group size equals the selection size.
        correct: usize,
        /// The selection size.
        group: usize,
    },
    /// Anything else.
    Incorrect,
}

impl Evaluation {
    /// Returns the group completed by this submission, if any.
    #[must_use]
    pub fn newly_completed_group(self) -> Option<GroupIndex> {
        match self {
            Self::Correct { group_index } => Some(group_index),
            _ => None,
        }
    }

    /// Returns `true` if this submission costs a mistake.
    #[must_use]
    pub fn is_mistake(self) -> bool {
        matches!(self, Self::Partial { .. } | Self::Incorrect)
    }
}

/// Classifies a selection of tiles.
///
/// Checks run in order and the first match wins:
///
/// 1. fewer tiles than [`GroupSpec::min_size`] is [`Evaluation::TooFew`];
/// 2. a fingerprint already in `history` is [`Evaluation::Duplicate`];
/// 3. otherwise the fingerprint is recorded, and the selection is scored by
///    counting tiles whose group size equals the selection size.
///
/// Only the third step touches `history`, so each distinct selection is recorded
/// exactly once.
///
/// # Examples
///
/// ```
/// use std::collections::HashSet;
///
/// use almost_core::{GroupIndex, GroupSpec, Tile, TileId};
/// use almost_game::{Evaluation, evaluate};
///
/// let spec = GroupSpec::new(vec![2, 3])?;
/// let tile = |id, group_size, group_index| Tile {
///     id: TileId::new(id),
///     term: format!("t{id}"),
///     category: format!("c{group_index}"),
///     group_size,
///     group_index: GroupIndex::new(group_index),
/// };
/// let (a, b) = (tile(0, 2, 0), tile(1, 2, 0));
///
/// let mut history = HashSet::new();
/// assert_eq!(
///     evaluate(&[&a, &b], &mut history, &spec),
///     Evaluation::Correct { group_index: GroupIndex::new(0) }
/// );
/// assert_eq!(evaluate(&[&b, &a], &mut history, &spec), Evaluation::Duplicate);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[must_use]
pub fn evaluate(
    selection: &[&Tile],
    history: &mut HashSet<Fingerprint>,
    spec: &GroupSpec,
) -> Evaluation {
    let min = spec.min_size();
    if selection.len() < min {
        return Evaluation::TooFew { min };
    }

    let fingerprint = Fingerprint::from_ids(selection.iter().map(|tile| tile.id));
    if history.contains(&fingerprint) {
        return Evaluation::Duplicate;
    }
    history.insert(fingerprint);

    let group = selection.len();
    let correct = selection
        .iter()
        .filter(|tile| tile.group_size == group)
        .count();

    match selection.first() {
        Some(first) if correct == group => Evaluation::Correct {
            group_index: first.group_index,
        },
        _ if 2 * correct > group => Evaluation::Partial { correct, group },
        _ => Evaluation::Incorrect,
    }
}
