use std::path::Path;

use almost_core::Difficulty;
use almost_game::Round;
use almost_generator::PuzzleGenerator;
use almost_store::{CatalogError, TermCatalog, TermStore};

use crate::{config::GameConfig, error::AppError};

/// The English catalog shipped with the binary.
pub const BUNDLED_CATALOG: &str = include_str!("../../../data/catalog.en.json");

/// Loads the catalog at `path`, or the bundled one.
pub fn load_catalog(path: Option<&Path>) -> Result<TermCatalog, CatalogError> {
    match path {
        Some(path) => TermCatalog::from_path(path),
        None => TermCatalog::from_json_str(BUNDLED_CATALOG),
    }
}

/// A generator over `store` with the configured language and attempt budget.
#[must_use]
pub fn generator<'a, S>(store: &'a S, config: &GameConfig) -> PuzzleGenerator<'a, S>
where
    S: TermStore,
{
    PuzzleGenerator::new(store)
        .with_max_attempts(config.max_attempts)
        .with_language(config.language.as_str())
}

/// Generates a puzzle and starts a round on it.
pub async fn generate_round<S>(
    generator: &PuzzleGenerator<'_, S>,
    config: &GameConfig,
    difficulty: Difficulty,
) -> Result<Round, AppError>
where
    S: TermStore,
{
    let puzzle = generator.generate(&config.groups, difficulty).await?;
    log::info!(
        "generated a {difficulty} puzzle in {} attempts",
        puzzle.attempts()
    );
    Ok(Round::new(
        config.groups.clone(),
        puzzle,
        config.mistakes_allowed,
    )?)
}

#[cfg(test)]
mod tests {
    use almost_store::{MemoryTermStore, PuzzleSeed};
    use futures::executor::block_on;

    use super::*;

    #[test]
    fn test_bundled_catalog_builds_a_round() {
        let catalog = load_catalog(None).unwrap();
        assert!(catalog.len() >= 20);

        let config = GameConfig::default();
        let store = MemoryTermStore::with_seed(catalog, PuzzleSeed::from_bytes([3; 32]));
        let generator = generator(&store, &config);
        let round = block_on(generate_round(&generator, &config, Difficulty::Medium)).unwrap();

        assert_eq!(round.tiles().len(), 9);
        assert_eq!(round.mistakes_allowed(), 4);
    }

    #[test]
    fn test_missing_catalog_file_is_an_error() {
        assert!(matches!(
            load_catalog(Some(Path::new("/nonexistent/catalog.json"))),
            Err(CatalogError::Io(_))
        ));
    }
}
