use std::{
    collections::BTreeSet,
    future::{self, Future},
    sync::{Mutex, PoisonError},
};

use rand::seq::SliceRandom as _;
use rand_pcg::Pcg64;

use crate::{
    CategoryCandidate, CategoryId, PuzzleSeed, StoreError, Tag, TermCatalog, TermStore,
};

/// An in-memory [`TermStore`] over a [`TermCatalog`].
///
/// All sampling goes through one seeded PCG generator, so the same seed and the
/// same sequence of calls always produce the same answers.
///
/// - Tags are the distinct tags of categories in the requested language, shuffled.
/// - Candidate categories carry at least one requested tag and enough terms.
///   They are shuffled, then stably ordered by matched tag count, most first.
/// - Terms are shuffled and truncated to the requested count.
#[derive(Debug)]
pub struct MemoryTermStore {
    catalog: TermCatalog,
    rng: Mutex<Pcg64>,
}

impl MemoryTermStore {
    /// Creates a store with a random seed.
    #[must_use]
    pub fn new(catalog: TermCatalog) -> Self {
        Self::with_seed(catalog, PuzzleSeed::random())
    }

    /// Creates a store whose sampling is driven by `seed`.
    #[must_use]
    pub fn with_seed(catalog: TermCatalog, seed: PuzzleSeed) -> Self {
        Self {
            catalog,
            rng: Mutex::new(seed.rng()),
        }
    }

    /// Returns the backing catalog.
    #[must_use]
    pub fn catalog(&self) -> &TermCatalog {
        &self.catalog
    }

    fn shuffle<T>(&self, items: &mut [T]) {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        items.shuffle(&mut *rng);
    }

    fn tags_now(&self, count: usize, language: &str) -> Vec<Tag> {
        let distinct: BTreeSet<&Tag> = self
            .catalog
            .iter()
            .filter(|(_, category)| category.language == language)
            .flat_map(|(_, category)| &category.tags)
            .collect();
        let mut tags: Vec<Tag> = distinct.into_iter().cloned().collect();
        self.shuffle(&mut tags);
        tags.truncate(count);
        tags
    }

    fn categories_now(&self, tags: &[Tag], min_terms: usize) -> Vec<CategoryCandidate> {
        let mut candidates: Vec<_> = self
            .catalog
            .iter()
            .filter(|(_, category)| category.terms.len() >= min_terms)
            .filter_map(|(category_id, category)| {
                let matched_tag_count = tags.iter().filter(|t| category.tags.contains(t)).count();
                (matched_tag_count > 0).then_some(CategoryCandidate {
                    category_id,
                    matched_tag_count,
                })
            })
            .collect();
        self.shuffle(&mut candidates);
        candidates.sort_by(|a, b| b.matched_tag_count.cmp(&a.matched_tag_count));
        candidates
    }

    fn name_now(&self, id: CategoryId) -> Result<String, StoreError> {
        self.catalog
            .get(id)
            .map(|category| category.name.clone())
            .ok_or(StoreError::UnknownCategory { id })
    }

    fn terms_now(&self, id: CategoryId, count: usize) -> Result<Vec<String>, StoreError> {
        let category = self
            .catalog
            .get(id)
            .ok_or(StoreError::UnknownCategory { id })?;
        let mut terms = category.terms.clone();
        self.shuffle(&mut terms);
        terms.truncate(count);
        Ok(terms)
    }
}

impl TermStore for MemoryTermStore {
    fn sample_tags(
        &self,
        count: usize,
        language: &str,
    ) -> impl Future<Output = Result<Vec<Tag>, StoreError>> {
        future::ready(Ok(self.tags_now(count, language)))
    }

    fn find_categories(
        &self,
        tags: &[Tag],
        min_terms: usize,
    ) -> impl Future<Output = Result<Vec<CategoryCandidate>, StoreError>> {
        future::ready(Ok(self.categories_now(tags, min_terms)))
    }

    fn category_name(&self, id: CategoryId) -> impl Future<Output = Result<String, StoreError>> {
        future::ready(self.name_now(id))
    }

    fn sample_terms(
        &self,
        id: CategoryId,
        count: usize,
    ) -> impl Future<Output = Result<Vec<String>, StoreError>> {
        future::ready(self.terms_now(id, count))
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;

    use super::*;

    const CATALOG: &str = r#"{
        "categories": [
            { "name": "trees", "language": "en", "tags": ["nature", "wood"],
              "terms": ["oak", "elm", "ash", "fir"] },
            { "name": "rivers", "language": "en", "tags": ["nature", "water"],
              "terms": ["nile", "po", "rhine"] },
            { "name": "boats", "language": "en", "tags": ["water"],
              "terms": ["canoe", "yacht"] },
            { "name": "arbres", "language": "fr", "tags": ["nature-fr"],
              "terms": ["chene", "orme"] }
        ]
    }"#;

    fn store(seed_byte: u8) -> MemoryTermStore {
        let catalog = TermCatalog::from_json_str(CATALOG).unwrap();
        MemoryTermStore::with_seed(catalog, PuzzleSeed::from_bytes([seed_byte; 32]))
    }

    #[test]
    fn test_sample_tags_filters_language_and_truncates() {
        let store = store(1);
        let mut tags = block_on(store.sample_tags(10, "en")).unwrap();
        tags.sort();
        assert_eq!(tags, vec![Tag::from("nature"), Tag::from("water"), Tag::from("wood")]);

        let two = block_on(store.sample_tags(2, "en")).unwrap();
        assert_eq!(two.len(), 2);
        assert_ne!(two[0], two[1]);

        let fr = block_on(store.sample_tags(5, "fr")).unwrap();
        assert_eq!(fr, vec![Tag::from("nature-fr")]);

        assert!(block_on(store.sample_tags(5, "de")).unwrap().is_empty());
    }

    #[test]
    fn test_find_categories_orders_by_matched_tags() {
        let store = store(2);
        let tags = [Tag::from("nature"), Tag::from("water")];

        let found = block_on(store.find_categories(&tags, 2)).unwrap();
        assert_eq!(found.len(), 3);
        assert_eq!(found[0].category_id, CategoryId::new(1));
        assert_eq!(found[0].matched_tag_count, 2);
        assert!(found[1..].iter().all(|c| c.matched_tag_count == 1));

        let big = block_on(store.find_categories(&tags, 4)).unwrap();
        assert_eq!(
            big,
            vec![CategoryCandidate {
                category_id: CategoryId::new(0),
                matched_tag_count: 1,
            }]
        );
    }

    #[test]
    fn test_repeated_terms_do_not_count_toward_min_terms() {
        let json = r#"{ "categories": [
            { "name": "dupes", "language": "en", "tags": ["x"], "terms": ["a", "a"] }
        ] }"#;
        let catalog = TermCatalog::from_json_str(json).unwrap();
        let store = MemoryTermStore::with_seed(catalog, PuzzleSeed::from_bytes([0; 32]));

        assert!(block_on(store.find_categories(&[Tag::from("x")], 2)).unwrap().is_empty());
        assert_eq!(
            block_on(store.sample_terms(CategoryId::new(0), 2)).unwrap(),
            vec!["a".to_owned()]
        );
    }

    #[test]
    fn test_sample_terms_and_names() {
        let store = store(3);
        let terms = block_on(store.sample_terms(CategoryId::new(0), 3)).unwrap();
        assert_eq!(terms.len(), 3);
        assert!(terms.iter().all(|t| ["oak", "elm", "ash", "fir"].contains(&t.as_str())));

        let short = block_on(store.sample_terms(CategoryId::new(2), 5)).unwrap();
        assert_eq!(short.len(), 2);

        assert_eq!(block_on(store.category_name(CategoryId::new(1))).unwrap(), "rivers");
        assert_eq!(
            block_on(store.category_name(CategoryId::new(9))),
            Err(StoreError::UnknownCategory {
                id: CategoryId::new(9)
            })
        );
    }

    #[test]
    fn test_same_seed_same_answers() {
        let a = store(4);
        let b = store(4);
        for _ in 0..5 {
            assert_eq!(
                block_on(a.sample_tags(2, "en")).unwrap(),
                block_on(b.sample_tags(2, "en")).unwrap()
            );
            assert_eq!(
                block_on(a.sample_terms(CategoryId::new(0), 2)).unwrap(),
                block_on(b.sample_terms(CategoryId::new(0), 2)).unwrap()
            );
        }
    }
}
