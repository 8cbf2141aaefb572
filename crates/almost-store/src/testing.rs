//! Test utilities for code that consumes a [`TermStore`].
//!
//! [`ScriptedTermStore`] answers deterministically, counts every call, and can
//! be told to fail specific lookups. It is meant for exercising the retry paths
//! of puzzle generation.
//!
//! # Example
//!
//! ```
//! use almost_store::{TermStore, testing::ScriptedTermStore};
//! use futures::executor::block_on;
//!
//! let store = ScriptedTermStore::new()
//!     .with_category("trees", &["nature"], &["oak", "elm", "ash"])
//!     .fail_find_categories_call(1);
//!
//! let tags = block_on(store.sample_tags(1, "en")).unwrap();
//! assert!(block_on(store.find_categories(&tags, 2)).is_err());
//! assert_eq!(block_on(store.find_categories(&tags, 2)).unwrap().len(), 1);
//! assert_eq!(store.sample_tags_calls(), 1);
//! assert_eq!(store.find_categories_calls(), 2);
//! ```

use std::{
    cell::{Cell, RefCell},
    collections::{BTreeSet, HashMap, VecDeque},
    future::{self, Future},
};

use crate::{CatalogCategory, CategoryCandidate, CategoryId, StoreError, Tag, TermStore};

/// A deterministic [`TermStore`] with call counters and scripted failures.
///
/// - Tags are returned in first-seen order across categories.
/// - Candidates are returned in definition order, most matched tags first.
/// - Terms are returned in definition order unless a scripted response is queued.
#[derive(Debug, Default)]
pub struct ScriptedTermStore {
    categories: Vec<CatalogCategory>,
    failing_find_calls: BTreeSet<usize>,
    failing_name_ids: BTreeSet<CategoryId>,
    fail_all_tags: bool,
    scripted_terms: RefCell<HashMap<CategoryId, VecDeque<Vec<String>>>>,
    sample_tags_calls: Cell<usize>,
    find_categories_calls: Cell<usize>,
    category_name_calls: Cell<usize>,
    sample_terms_calls: Cell<usize>,
}

impl ScriptedTermStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a category; its id is the number of categories added before it.
    ///
    /// Repeated terms are dropped, as in a loaded catalog.
    #[must_use]
    pub fn with_category(mut self, name: &str, tags: &[&str], terms: &[&str]) -> Self {
        let mut category = CatalogCategory {
            name: name.to_owned(),
            language: "en".to_owned(),
            tags: tags.iter().copied().map(Tag::from).collect(),
            terms: terms.iter().copied().map(str::to_owned).collect(),
        };
        category.dedup_terms();
        self.categories.push(category);
        self
    }

    /// Makes the `n`-th call (1-based) to `find_categories` fail.
    #[must_use]
    pub fn fail_find_categories_call(mut self, n: usize) -> Self {
        self.failing_find_calls.insert(n);
        self
    }

    /// Makes every `sample_tags` call fail.
    #[must_use]
    pub fn fail_sample_tags(mut self) -> Self {
        self.fail_all_tags = true;
        self
    }

    /// Makes every `category_name` lookup of `id` fail.
    #[must_use]
    pub fn fail_category_name(mut self, id: CategoryId) -> Self {
        self.failing_name_ids.insert(id);
        self
    }

    /// Queues a one-shot `sample_terms` answer for `id`.
    ///
    /// Queued answers are consumed in order; afterwards the defined terms are used.
    #[must_use]
    pub fn queue_terms(self, id: CategoryId, terms: &[&str]) -> Self {
        self.scripted_terms
            .borrow_mut()
            .entry(id)
            .or_default()
            .push_back(terms.iter().copied().map(str::to_owned).collect());
        self
    }

    /// Returns how many times `sample_tags` was called.
    #[must_use]
    pub fn sample_tags_calls(&self) -> usize {
        self.sample_tags_calls.get()
    }

    /// Returns how many times `find_categories` was called.
    #[must_use]
    pub fn find_categories_calls(&self) -> usize {
        self.find_categories_calls.get()
    }

    /// Returns how many times `category_name` was called.
    #[must_use]
    pub fn category_name_calls(&self) -> usize {
        self.category_name_calls.get()
    }

    /// Returns how many times `sample_terms` was called.
    #[must_use]
    pub fn sample_terms_calls(&self) -> usize {
        self.sample_terms_calls.get()
    }

    fn category(&self, id: CategoryId) -> Result<&CatalogCategory, StoreError> {
        usize::try_from(id.get())
            .ok()
            .and_then(|index| self.categories.get(index))
            .ok_or(StoreError::UnknownCategory { id })
    }

    fn bump(counter: &Cell<usize>) -> usize {
        let n = counter.get() + 1;
        counter.set(n);
        n
    }

    fn scripted_failure(call: &str) -> StoreError {
        StoreError::Unavailable {
            reason: format!("scripted {call} failure"),
        }
    }
}

impl TermStore for ScriptedTermStore {
    fn sample_tags(
        &self,
        count: usize,
        _language: &str,
    ) -> impl Future<Output = Result<Vec<Tag>, StoreError>> {
        Self::bump(&self.sample_tags_calls);
        if self.fail_all_tags {
            return future::ready(Err(Self::scripted_failure("sample_tags")));
        }
        let mut tags: Vec<Tag> = Vec::new();
        for tag in self.categories.iter().flat_map(|c| &c.tags) {
            if !tags.contains(tag) {
                tags.push(tag.clone());
            }
        }
        tags.truncate(count);
        future::ready(Ok(tags))
    }

    fn find_categories(
        &self,
        tags: &[Tag],
        min_terms: usize,
    ) -> impl Future<Output = Result<Vec<CategoryCandidate>, StoreError>> {
        let call = Self::bump(&self.find_categories_calls);
        if self.failing_find_calls.contains(&call) {
            return future::ready(Err(Self::scripted_failure("find_categories")));
        }
        let mut found: Vec<_> = (0..)
            .map(CategoryId::new)
            .zip(&self.categories)
            .filter(|(_, category)| category.terms.len() >= min_terms)
            .filter_map(|(category_id, category)| {
                let matched_tag_count = tags.iter().filter(|t| category.tags.contains(t)).count();
                (matched_tag_count > 0).then_some(CategoryCandidate {
                    category_id,
                    matched_tag_count,
                })
            })
            .collect();
        found.sort_by(|a, b| b.matched_tag_count.cmp(&a.matched_tag_count));
        future::ready(Ok(found))
    }

    fn category_name(&self, id: CategoryId) -> impl Future<Output = Result<String, StoreError>> {
        Self::bump(&self.category_name_calls);
        let result = if self.failing_name_ids.contains(&id) {
            Err(Self::scripted_failure("category_name"))
        } else {
            self.category(id).map(|category| category.name.clone())
        };
        future::ready(result)
    }

    fn sample_terms(
        &self,
        id: CategoryId,
        count: usize,
    ) -> impl Future<Output = Result<Vec<String>, StoreError>> {
        Self::bump(&self.sample_terms_calls);
        let scripted = self
            .scripted_terms
            .borrow_mut()
            .get_mut(&id)
            .and_then(VecDeque::pop_front);
        let result = match scripted {
            Some(terms) => Ok(terms),
            None => self.category(id).map(|category| {
                category.terms.iter().take(count).cloned().collect()
            }),
        };
        future::ready(result)
    }
}
