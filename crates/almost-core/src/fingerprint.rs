//! Order-independent selection keys.

use std::fmt;

use crate::TileId;

/// Canonical key of a tile selection.
///
/// Two selections with the same set of tile ids produce equal fingerprints no
/// matter the order in which the tiles were picked. Repeated ids collapse.
/// The text form is the sorted ids joined with commas.
///
/// # Examples
///
/// ```
/// use almost_core::{Fingerprint, TileId};
///
/// let fp = Fingerprint::from_ids([5, 1, 3].map(TileId::new));
/// assert_eq!(fp.to_string(), "1,3,5");
/// assert_eq!(fp.len(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Fingerprint {
    ids: Vec<TileId>,
}

impl Fingerprint {
    /// Builds the fingerprint of the given tile ids.
    #[must_use]
    pub fn from_ids<I>(ids: I) -> Self
    where
        I: IntoIterator<Item = TileId>,
    {
        let mut ids: Vec<_> = ids.into_iter().collect();
        ids.sort_unstable();
        ids.dedup();
        Self { ids }
    }

    /// Returns the sorted tile ids.
    #[must_use]
    pub fn ids(&self) -> &[TileId] {
        &self.ids
    }

    /// Returns the number of distinct tiles in the selection.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Returns `true` for the fingerprint of an empty selection.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, id) in self.ids.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{id}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn ids(raw: &[usize]) -> Vec<TileId> {
        raw.iter().copied().map(TileId::new).collect()
    }

    #[test]
    fn test_empty_fingerprint() {
        let fp = Fingerprint::from_ids(Vec::<TileId>::new());
        assert!(fp.is_empty());
        assert_eq!(fp.to_string(), "");
    }

    #[test]
    fn test_text_form_is_sorted() {
        let fp = Fingerprint::from_ids(ids(&[10, 2, 7]));
        assert_eq!(fp.to_string(), "2,7,10");
        assert_eq!(fp.ids(), ids(&[2, 7, 10]).as_slice());
    }

    #[test]
    fn test_distinct_sets_differ() {
        let a = Fingerprint::from_ids(ids(&[1, 2, 3]));
        let b = Fingerprint::from_ids(ids(&[1, 2, 4]));
        let c = Fingerprint::from_ids(ids(&[1, 2]));
        assert_ne!(a, b);
        assert_ne!(a, c);
    }

    proptest! {
        #[test]
        fn prop_order_does_not_matter(
            (raw, perm) in prop::collection::vec(0usize..64, 0..12)
                .prop_flat_map(|raw| {
                    let shuffled = Just(raw.clone()).prop_shuffle();
                    (Just(raw), shuffled)
                })
        ) {
            let a = Fingerprint::from_ids(ids(&raw));
            let b = Fingerprint::from_ids(ids(&perm));
            prop_assert_eq!(&a, &b);
            prop_assert_eq!(a.to_string(), b.to_string());
        }

        #[test]
        fn prop_len_counts_distinct_ids(raw in prop::collection::vec(0usize..16, 0..24)) {
            let mut distinct = raw.clone();
            distinct.sort_unstable();
            distinct.dedup();
            prop_assert_eq!(Fingerprint::from_ids(ids(&raw)).len(), distinct.len());
        }
    }
}
