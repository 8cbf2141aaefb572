use std::{collections::HashSet, fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::{CategoryId, Tag};

/// Errors raised while loading a [`TermCatalog`].
#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum CatalogError {
    /// The catalog file could not be read.
    #[display("failed to read catalog: {_0}")]
    Io(std::io::Error),
    /// The catalog text is not valid catalog JSON.
    #[display("failed to parse catalog: {_0}")]
    Parse(serde_json::Error),
    /// A category has an empty name.
    #[display("category #{index} has an empty name")]
    #[from(ignore)]
    EmptyName {
        /// Position of the category in the catalog.
        index: usize,
    },
}

/// One category in a [`TermCatalog`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogCategory {
    /// Display name.
    pub name: String,
    /// Language code of the category's terms.
    pub language: String,
    /// Tags that reach this category.
    #[serde(default)]
    pub tags: Vec<Tag>,
    /// Terms of the category.
    pub terms: Vec<String>,
}

impl CatalogCategory {
    /// Drops repeated terms, keeping the first occurrence, and returns how many were dropped.
    pub(crate) fn dedup_terms(&mut self) -> usize {
        let before = self.terms.len();
        let mut seen = HashSet::new();
        self.terms.retain(|term| seen.insert(term.clone()));
        before - self.terms.len()
    }
}

/// A set of categories, their tags, and their terms.
///
/// The JSON form is:
///
/// ```json
/// { "categories": [
///     { "name": "trees", "language": "en", "tags": ["nature"], "terms": ["oak", "elm"] }
/// ] }
/// ```
///
/// A category's id is its position in the list. Repeated terms within a
/// category are dropped on load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermCatalog {
    categories: Vec<CatalogCategory>,
}

impl TermCatalog {
    /// Creates a catalog from categories.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::EmptyName`] if a category has an empty name.
    pub fn new(mut categories: Vec<CatalogCategory>) -> Result<Self, CatalogError> {
        if let Some(index) = categories.iter().position(|c| c.name.trim().is_empty()) {
            return Err(CatalogError::EmptyName { index });
        }
        for category in &mut categories {
            let dropped = category.dedup_terms();
            if dropped > 0 {
                log::debug!("dropped {dropped} repeated terms from `{}`", category.name);
            }
        }
        Ok(Self { categories })
    }

    /// Parses a catalog from JSON text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a valid catalog.
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let raw: Self = serde_json::from_str(json)?;
        Self::new(raw.categories)
    }

    /// Reads a catalog from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a valid catalog.
    pub fn from_path(path: &Path) -> Result<Self, CatalogError> {
        let json = fs::read_to_string(path)?;
        let catalog = Self::from_json_str(&json)?;
        log::debug!(
            "loaded {} categories from {}",
            catalog.len(),
            path.display()
        );
        Ok(catalog)
    }

    /// Returns the number of categories.
    #[must_use]
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    /// Returns `true` if the catalog has no categories.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Returns the category with the given id.
    #[must_use]
    pub fn get(&self, id: CategoryId) -> Option<&CatalogCategory> {
        usize::try_from(id.get())
            .ok()
            .and_then(|index| self.categories.get(index))
    }

    /// Iterates categories together with their ids.
    pub fn iter(&self) -> impl Iterator<Item = (CategoryId, &CatalogCategory)> {
        (0..).map(CategoryId::new).zip(&self.categories)
    }
}
