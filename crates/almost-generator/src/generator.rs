use std::{collections::HashSet, fmt, num::NonZero};

use almost_core::{Difficulty, GroupSpec, Tile, TileId};
use almost_store::{CategoryId, StoreError, Tag, TermStore};
use futures::future;

use crate::GeneratedPuzzle;

/// Attempt budget used when none is configured.
pub const DEFAULT_MAX_ATTEMPTS: NonZero<usize> = NonZero::new(30).unwrap();

/// Language used when none is configured.
pub const DEFAULT_LANGUAGE: &str = "en";

/// Puzzle generation gave up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum GenerationError {
    /// Every attempt in the budget was abandoned.
    #[display("no valid puzzle found after {attempts} attempts")]
    Exhausted {
        /// Number of attempts made.
        attempts: usize,
    },
}

/// Why a single attempt was abandoned.
#[derive(Debug)]
enum Rejection {
    NoTags,
    NoCategory { group_size: usize },
    Lookup(StoreError),
    EmptyName { category_id: CategoryId },
    ShortTerms { category_id: CategoryId, expected: usize, actual: usize },
    DuplicateTerms,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoTags => write!(f, "no tags sampled"),
            Self::NoCategory { group_size } => {
                write!(f, "no unclaimed category for group of {group_size}")
            }
            Self::Lookup(err) => write!(f, "lookup failed: {err}"),
            Self::EmptyName { category_id } => write!(f, "category {category_id} has no name"),
            Self::ShortTerms {
                category_id,
                expected,
                actual,
            } => write!(
                f,
                "category {category_id} returned {actual} of {expected} terms"
            ),
            Self::DuplicateTerms => write!(f, "duplicate terms across groups"),
        }
    }
}

/// Generates puzzles from a [`TermStore`].
///
/// Attempts run one after another. Each attempt samples fresh tags, claims one
/// distinct category per group (largest group first), then fetches category
/// names and terms concurrently. An attempt is abandoned when a group finds no
/// unclaimed category, when any lookup fails, or when two groups share a term.
///
/// Store failures never escape: a failed tag or category lookup counts as an
/// empty answer and a failed name or term lookup abandons the attempt. Only an
/// exhausted budget is reported, as [`GenerationError::Exhausted`].
#[derive(Debug, Clone)]
pub struct PuzzleGenerator<'a, S> {
    store: &'a S,
    max_attempts: NonZero<usize>,
    language: String,
}

impl<'a, S> PuzzleGenerator<'a, S>
where
    S: TermStore,
{
    /// Creates a generator with the default budget and language.
    #[must_use]
    pub fn new(store: &'a S) -> Self {
        Self {
            store,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            language: DEFAULT_LANGUAGE.to_owned(),
        }
    }

    /// Sets the number of attempts before giving up.
    #[must_use]
    pub fn with_max_attempts(mut self, max_attempts: NonZero<usize>) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Sets the language tags are sampled in.
    #[must_use]
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Returns the attempt budget.
    #[must_use]
    pub fn max_attempts(&self) -> NonZero<usize> {
        self.max_attempts
    }

    /// Returns the language tags are sampled in.
    #[must_use]
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Generates a puzzle for `spec`, sampling as many tags as `difficulty` asks for.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::Exhausted`] if no attempt succeeds.
    pub async fn generate(
        &self,
        spec: &GroupSpec,
        difficulty: Difficulty,
    ) -> Result<GeneratedPuzzle, GenerationError> {
        self.generate_with_num_tags(spec, difficulty.num_tags(spec.len()))
            .await
    }

    /// Generates a puzzle for `spec`, sampling `num_tags` tags per attempt.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::Exhausted`] if no attempt succeeds.
    pub async fn generate_with_num_tags(
        &self,
        spec: &GroupSpec,
        num_tags: usize,
    ) -> Result<GeneratedPuzzle, GenerationError> {
        let attempts = self.max_attempts.get();
        for attempt in 1..=attempts {
            match self.attempt(spec, num_tags).await {
                Ok((tiles, categories)) => {
                    log::debug!("generated {} tiles on attempt {attempt}", tiles.len());
                    let puzzle = GeneratedPuzzle {
                        tiles,
                        categories,
                        attempts: attempt,
                    };
                    debug_assert_eq!(puzzle.verify(spec), Ok(()));
                    return Ok(puzzle);
                }
                Err(rejection) => {
                    log::debug!("attempt {attempt}/{attempts} abandoned: {rejection}");
                }
            }
        }
        log::warn!("puzzle generation exhausted {attempts} attempts");
        Err(GenerationError::Exhausted { attempts })
    }

    async fn attempt(
        &self,
        spec: &GroupSpec,
        num_tags: usize,
    ) -> Result<(Vec<Tile>, Vec<CategoryId>), Rejection> {
        let tags = self
            .store
            .sample_tags(num_tags, &self.language)
            .await
            .unwrap_or_else(|err| {
                log::warn!("tag sampling failed: {err}");
                Vec::new()
            });
        if tags.is_empty() {
            return Err(Rejection::NoTags);
        }

        let categories = self.claim_categories(spec, &tags).await?;

        let names = future::try_join_all(
            categories
                .iter()
                .map(|&category_id| self.store.category_name(category_id)),
        );
        let terms = future::try_join_all(
            spec.groups()
                .map(|(index, size)| self.store.sample_terms(categories[index.index()], size)),
        );
        let (names, terms) = future::try_join(names, terms)
            .await
            .map_err(Rejection::Lookup)?;

        for ((&category_id, name), ((_, size), group_terms)) in
            categories.iter().zip(&names).zip(spec.groups().zip(&terms))
        {
            if name.is_empty() {
                return Err(Rejection::EmptyName { category_id });
            }
            if group_terms.len() != size {
                return Err(Rejection::ShortTerms {
                    category_id,
                    expected: size,
                    actual: group_terms.len(),
                });
            }
        }

        let mut seen = HashSet::new();
        if !terms.iter().flatten().all(|term| seen.insert(term.as_str())) {
            return Err(Rejection::DuplicateTerms);
        }

        let tiles = spec
            .groups()
            .zip(names.into_iter().zip(terms))
            .flat_map(|((group_index, group_size), (category, group_terms))| {
                group_terms
                    .into_iter()
                    .map(move |term| (group_index, group_size, category.clone(), term))
            })
            .enumerate()
            .map(|(id, (group_index, group_size, category, term))| Tile {
                id: TileId::new(id),
                term,
                category,
                group_size,
                group_index,
            })
            .collect();

        Ok((tiles, categories))
    }

    /// Claims one distinct category per group, largest group first.
    async fn claim_categories(
        &self,
        spec: &GroupSpec,
        tags: &[Tag],
    ) -> Result<Vec<CategoryId>, Rejection> {
        let mut claimed: Vec<Option<CategoryId>> = vec![None; spec.len()];
        let mut used = HashSet::new();
        for (group_index, group_size) in spec.groups().rev() {
            let candidates = self
                .store
                .find_categories(tags, group_size)
                .await
                .unwrap_or_else(|err| {
                    log::warn!("category lookup failed: {err}");
                    Vec::new()
                });
            let Some(candidate) = candidates
                .into_iter()
                .find(|candidate| !used.contains(&candidate.category_id))
            else {
                return Err(Rejection::NoCategory { group_size });
            };
            used.insert(candidate.category_id);
            claimed[group_index.index()] = Some(candidate.category_id);
        }
        Ok(claimed.into_iter().flatten().collect())
    }
}
