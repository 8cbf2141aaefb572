//! Term data access for Almost puzzle generation.
//!
//! Puzzle generation never talks to a database directly. It goes through the
//! [`TermStore`] trait, which exposes the four lookups the generator needs:
//!
//! - [`TermStore::sample_tags`]: random distinct tags for a language
//! - [`TermStore::find_categories`]: categories reachable from a tag set that
//!   hold at least a minimum number of terms
//! - [`TermStore::category_name`]: the display name of a category
//! - [`TermStore::sample_terms`]: random terms of a category
//!
//! Every lookup is asynchronous and may fail. Failures are reported as
//! [`StoreError`]; callers decide how to recover.
//!
//! Two implementations ship with the crate:
//!
//! - [`MemoryTermStore`]: a seeded, in-memory store backed by a JSON [`TermCatalog`]
//! - [`testing::ScriptedTermStore`]: a deterministic store with call counters
//!   and scripted failures for tests
//!
//! # Examples
//!
//! ```
//! use almost_store::{MemoryTermStore, PuzzleSeed, TermCatalog, TermStore};
//!
//! let catalog = TermCatalog::from_json_str(r#"{
//!     "categories": [
//!         { "name": "fruits", "language": "en", "tags": ["food"],
//!           "terms": ["apple", "pear", "plum"] }
//!     ]
//! }"#)?;
//! let store = MemoryTermStore::with_seed(catalog, PuzzleSeed::from_bytes([7; 32]));
//!
//! let tags = futures::executor::block_on(store.sample_tags(2, "en"))?;
//! assert_eq!(tags.len(), 1);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::future::Future;

use serde::{Deserialize, Serialize};

pub use self::{
    catalog::{CatalogCategory, CatalogError, TermCatalog},
    memory::MemoryTermStore,
    seed::{ParseSeedError, PuzzleSeed},
};

mod catalog;
mod memory;
mod seed;
pub mod testing;

/// A coarse label used to narrow the category search.
#[derive(
    Debug,
    Clone,
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
pub struct Tag(String);

impl From<&str> for Tag {
    fn from(tag: &str) -> Self {
        Self(tag.to_owned())
    }
}

impl Tag {
    /// Returns the tag text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Identifier of a category in a store.
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
pub struct CategoryId(u32);

impl CategoryId {
    /// Creates a category id from its raw value.
    #[must_use]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Returns the raw value.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

/// A category returned by [`TermStore::find_categories`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryCandidate {
    /// The category id.
    pub category_id: CategoryId,
    /// How many of the requested tags the category carries.
    pub matched_tag_count: usize,
}

/// A failed store lookup.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum StoreError {
    /// The category id is not known to the store.
    #[display("unknown category: {id}")]
    UnknownCategory {
        /// The id that was looked up.
        id: CategoryId,
    },
    /// The backing service could not answer.
    #[display("term store unavailable: {reason}")]
    Unavailable {
        /// Human-readable failure description.
        reason: String,
    },
}

/// Asynchronous access to tags, categories, and terms.
///
/// Implementations must not assume calls are serialized: the generator issues
/// [`category_name`](Self::category_name) and
/// [`sample_terms`](Self::sample_terms) lookups concurrently and joins them.
pub trait TermStore {
    /// Samples up to `count` distinct tags of the given language.
    ///
    /// May return fewer than `count` tags.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the store cannot answer.
    fn sample_tags(
        &self,
        count: usize,
        language: &str,
    ) -> impl Future<Output = Result<Vec<Tag>, StoreError>>;

    /// Finds categories carrying any of `tags` with at least `min_terms` terms.
    ///
    /// The order of the result is the store's preference; the generator claims
    /// candidates front to back.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the store cannot answer.
    fn find_categories(
        &self,
        tags: &[Tag],
        min_terms: usize,
    ) -> impl Future<Output = Result<Vec<CategoryCandidate>, StoreError>>;

    /// Returns the display name of a category.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the category is unknown or the store cannot answer.
    fn category_name(&self, id: CategoryId) -> impl Future<Output = Result<String, StoreError>>;

    /// Samples up to `count` terms of a category.
    ///
    /// May return fewer than `count` terms.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the category is unknown or the store cannot answer.
    fn sample_terms(
        &self,
        id: CategoryId,
        count: usize,
    ) -> impl Future<Output = Result<Vec<String>, StoreError>>;
}
