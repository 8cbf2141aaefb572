use std::io;

use almost_game::GameError;
use almost_generator::GenerationError;
use almost_store::CatalogError;

use crate::config::ConfigError;

/// Anything that stops the `almost` binary.
#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum AppError {
    #[display("{_0}")]
    Config(ConfigError),
    #[display("failed to load catalog: {_0}")]
    Catalog(CatalogError),
    #[display("{_0}")]
    Game(GameError),
    #[display("{_0}")]
    Generation(GenerationError),
    #[display("I/O error: {_0}")]
    Io(io::Error),
    #[display("failed to encode output: {_0}")]
    Json(serde_json::Error),
    #[display("`{text}` is not a key=value parameter")]
    #[from(ignore)]
    InvalidParameter { text: String },
}
