use std::{fmt, str::FromStr};

use rand::SeedableRng as _;
use rand_pcg::Pcg64;

/// A 256-bit seed that makes store sampling reproducible.
///
/// The text form is 64 lowercase hex digits.
///
/// # Examples
///
/// ```
/// use almost_store::PuzzleSeed;
///
/// let text = format!("{}ff", "00".repeat(31));
/// let seed: PuzzleSeed = text.parse()?;
/// assert_eq!(seed.as_bytes()[31], 0xff);
/// assert_eq!(seed.to_string().len(), 64);
/// assert_eq!(seed.to_string().parse::<PuzzleSeed>()?, seed);
/// # Ok::<(), almost_store::ParseSeedError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PuzzleSeed([u8; 32]);

impl PuzzleSeed {
    /// Creates a seed from raw bytes.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Draws a fresh seed from the thread-local generator.
    #[must_use]
    pub fn random() -> Self {
        Self(rand::random())
    }

    /// Returns the raw bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Creates a PCG generator seeded with this seed.
    #[must_use]
    pub fn rng(self) -> Pcg64 {
        Pcg64::from_seed(self.0)
    }
}

impl fmt::Display for PuzzleSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

/// Error returned when parsing a [`PuzzleSeed`] from text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ParseSeedError {
    /// The text is not exactly 64 characters long.
    #[display("seed must be 64 hex digits, got {len} characters")]
    InvalidLength {
        /// Length of the rejected text.
        len: usize,
    },
    /// The text contains a non-hex character.
    #[display("seed contains a non-hex digit at offset {offset}")]
    InvalidDigit {
        /// Byte offset of the offending character.
        offset: usize,
    },
}

impl FromStr for PuzzleSeed {
    type Err = ParseSeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 64 || !s.is_ascii() {
            return Err(ParseSeedError::InvalidLength { len: s.chars().count() });
        }
        if let Some(offset) = s.bytes().position(|b| !b.is_ascii_hexdigit()) {
            return Err(ParseSeedError::InvalidDigit { offset });
        }
        let mut bytes = [0; 32];
        for (i, byte) in bytes.iter_mut().enumerate() {
            let offset = i * 2;
            *byte = u8::from_str_radix(&s[offset..offset + 2], 16)
                .map_err(|_| ParseSeedError::InvalidDigit { offset })?;
        }
        Ok(Self(bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEED: &str = "c1d44bd6afaf8af64f126546884e19298acbdc33c3924a28136715de946ef3f1";

    #[test]
    fn test_parse_and_display() {
        let seed: PuzzleSeed = SEED.parse().unwrap();
        assert_eq!(seed.as_bytes()[0], 0xc1);
        assert_eq!(seed.as_bytes()[31], 0xf1);
        assert_eq!(seed.to_string(), SEED);
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert_eq!(
            "abc".parse::<PuzzleSeed>(),
            Err(ParseSeedError::InvalidLength { len: 3 })
        );
        let bad = format!("zz{}", &SEED[2..]);
        assert_eq!(
            bad.parse::<PuzzleSeed>(),
            Err(ParseSeedError::InvalidDigit { offset: 0 })
        );
        let signed = "+f".repeat(32);
        assert_eq!(
            signed.parse::<PuzzleSeed>(),
            Err(ParseSeedError::InvalidDigit { offset: 0 })
        );
        let late = format!("{}-1", &SEED[..62]);
        assert_eq!(
            late.parse::<PuzzleSeed>(),
            Err(ParseSeedError::InvalidDigit { offset: 62 })
        );
    }

    #[test]
    fn test_random_seeds_differ() {
        assert_ne!(PuzzleSeed::random(), PuzzleSeed::random());
    }
}
