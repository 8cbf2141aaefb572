//! Difficulty levels.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// How hard a generated puzzle should feel.
///
/// Difficulty controls how many tags are sampled per generation attempt. Fewer,
/// broader tags make the chosen categories overlap more, so groups are harder to
/// tell apart.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// One tag per group.
    #[default]
    #[display("easy")]
    Easy,
    /// One tag per two groups.
    #[display("medium")]
    Medium,
    /// One tag per three groups.
    #[display("hard")]
    Hard,
}

impl Difficulty {
    /// All difficulties, easiest first.
    pub const ALL: [Self; 3] = [Self::Easy, Self::Medium, Self::Hard];

    /// Returns the number of tags to sample for `group_count` groups.
    ///
    /// Never returns less than one.
    ///
    /// # Examples
    ///
    /// ```
    /// use almost_core::Difficulty;
    ///
    /// assert_eq!(Difficulty::Easy.num_tags(4), 4);
    /// assert_eq!(Difficulty::Medium.num_tags(4), 2);
    /// assert_eq!(Difficulty::Hard.num_tags(4), 1);
    /// assert_eq!(Difficulty::Hard.num_tags(1), 1);
    /// ```
    #[must_use]
    pub const fn num_tags(self, group_count: usize) -> usize {
        let n = match self {
            Self::Easy => group_count,
            Self::Medium => group_count / 2,
            Self::Hard => group_count / 3,
        };
        if n == 0 { 1 } else { n }
    }

    /// Returns the next difficulty in the easy → medium → hard → easy cycle.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Easy => Self::Medium,
            Self::Medium => Self::Hard,
            Self::Hard => Self::Easy,
        }
    }
}

/// Error returned when parsing an unknown difficulty name.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("unknown difficulty: {name:?} (expected easy, medium or hard)")]
pub struct ParseDifficultyError {
    name: String,
}

impl FromStr for Difficulty {
    type Err = ParseDifficultyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|difficulty| s.eq_ignore_ascii_case(&difficulty.to_string()))
            .ok_or_else(|| ParseDifficultyError { name: s.to_owned() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_num_tags_is_non_increasing_with_difficulty() {
        for group_count in 0..12 {
            let counts: Vec<_> = Difficulty::ALL
                .iter()
                .map(|d| d.num_tags(group_count))
                .collect();
            assert!(counts.windows(2).all(|w| w[0] >= w[1]), "{counts:?}");
            assert!(counts.iter().all(|&n| n >= 1));
        }
    }

    #[test]
    fn test_num_tags_for_three_groups() {
        assert_eq!(Difficulty::Easy.num_tags(3), 3);
        assert_eq!(Difficulty::Medium.num_tags(3), 1);
        assert_eq!(Difficulty::Hard.num_tags(3), 1);
    }

    #[test]
    fn test_next_cycles() {
        assert_eq!(Difficulty::Easy.next(), Difficulty::Medium);
        assert_eq!(Difficulty::Medium.next(), Difficulty::Hard);
        assert_eq!(Difficulty::Hard.next(), Difficulty::Easy);
    }

    #[test]
    fn test_parse() {
        assert_eq!("Hard".parse::<Difficulty>(), Ok(Difficulty::Hard));
        assert_eq!("medium".parse::<Difficulty>(), Ok(Difficulty::Medium));
        assert!("impossible".parse::<Difficulty>().is_err());
    }
}
