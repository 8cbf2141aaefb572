use std::{fs, io, num::NonZero, path::Path, time::Duration};

use almost_core::{Difficulty, GroupSpec};
use serde::{Deserialize, Serialize};

const DEFAULT_MISTAKES_ALLOWED: NonZero<usize> = NonZero::new(4).unwrap();

/// How the board is printed.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::IsVariant,
)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    /// Rows as wide as the largest group.
    #[default]
    #[display("compact")]
    Compact,
    /// One tile per line.
    #[display("spacious")]
    Spacious,
}

/// Game settings, loaded from JSON.
///
/// Every key is optional; missing keys take their default.
///
/// ```json
/// {
///   "groups": [2, 3, 4],
///   "defaultDifficulty": "easy",
///   "mistakesAllowed": 4,
///   "layout": "compact",
///   "language": "en",
///   "maxAttempts": 30,
///   "revealDelayMs": 750
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct GameConfig {
    pub groups: GroupSpec,
    pub default_difficulty: Difficulty,
    pub mistakes_allowed: NonZero<usize>,
    pub layout: Layout,
    pub language: String,
    pub max_attempts: NonZero<usize>,
    pub reveal_delay_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            groups: GroupSpec::default(),
            default_difficulty: Difficulty::default(),
            mistakes_allowed: DEFAULT_MISTAKES_ALLOWED,
            layout: Layout::default(),
            language: almost_generator::DEFAULT_LANGUAGE.to_owned(),
            max_attempts: almost_generator::DEFAULT_MAX_ATTEMPTS,
            reveal_delay_ms: 750,
        }
    }
}

/// Configuration could not be loaded.
#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum ConfigError {
    #[display("failed to read config: {_0}")]
    Io(io::Error),
    #[display("invalid config: {_0}")]
    Parse(serde_json::Error),
}

impl GameConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path)?;
        let config = Self::from_json_str(&json)?;
        log::debug!("loaded config from {}", path.display());
        Ok(config)
    }

    #[must_use]
    pub fn reveal_delay(&self) -> Duration {
        Duration::from_millis(self.reveal_delay_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GameConfig::default();
        assert_eq!(config.groups.sizes(), &[2, 3, 4]);
        assert_eq!(config.default_difficulty, Difficulty::Easy);
        assert_eq!(config.mistakes_allowed.get(), 4);
        assert_eq!(config.layout, Layout::Compact);
        assert_eq!(config.language, "en");
        assert_eq!(config.max_attempts.get(), 30);
        assert_eq!(config.reveal_delay(), Duration::from_millis(750));

        assert_eq!(GameConfig::from_json_str("{}").unwrap(), config);
    }

    #[test]
    fn test_partial_override() {
        let config = GameConfig::from_json_str(
            r#"{ "groups": [5, 3], "defaultDifficulty": "hard", "layout": "spacious" }"#,
        )
        .unwrap();
        assert_eq!(config.groups.sizes(), &[3, 5]);
        assert_eq!(config.default_difficulty, Difficulty::Hard);
        assert!(config.layout.is_spacious());
        assert_eq!(config.mistakes_allowed.get(), 4);
    }

    #[test]
    fn test_invalid_configs_are_rejected() {
        for json in [
            r#"{ "groups": [3, 3] }"#,
            r#"{ "groups": [] }"#,
            r#"{ "groups": [0, 2] }"#,
            r#"{ "mistakesAllowed": 0 }"#,
            r#"{ "maxAttempts": 0 }"#,
            r#"{ "defaultDifficulty": "brutal" }"#,
            r#"{ "colour": "blue" }"#,
        ] {
            assert!(
                matches!(GameConfig::from_json_str(json), Err(ConfigError::Parse(_))),
                "{json} should be rejected"
            );
        }
    }
}
