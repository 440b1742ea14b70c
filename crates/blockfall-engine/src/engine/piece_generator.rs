use std::{fmt, str::FromStr};

use rand::{
    Rng, SeedableRng as _,
    distr::{Distribution, StandardUniform},
};
use rand_pcg::Pcg32;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::PieceKind;

/// Draws piece kinds uniformly at random.
///
/// Every spawn is an independent uniform draw from the seven kinds. There is
/// no bag system, so droughts and repeats are possible.
#[derive(Debug, Clone)]
pub struct PieceGenerator {
    rng: Pcg32,
}

impl Default for PieceGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl PieceGenerator {
    /// Creates a generator with a random seed.
    ///
    /// For a deterministic piece sequence, use [`Self::with_seed`] instead.
    #[must_use]
    pub fn new() -> Self {
        Self::with_seed(rand::rng().random())
    }

    /// Like [`Self::new`], but with a specific seed.
    #[must_use]
    pub fn with_seed(seed: PieceSeed) -> Self {
        Self {
            rng: Pcg32::from_seed(seed.0),
        }
    }

    /// Draws the next piece kind.
    pub fn next_kind(&mut self) -> PieceKind {
        self.rng.random()
    }
}

/// Seed for deterministic piece generation.
///
/// A 128-bit (16-byte) seed for the piece RNG. Two generators built from the
/// same seed produce the same sequence of kinds, enabling reproducible games
/// and deterministic tests. The textual form is a 32-character hex string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PieceSeed([u8; 16]);

/// Error from parsing a [`PieceSeed`] from text.
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("invalid seed: expected 32 hex characters")]
pub struct ParseSeedError;

impl fmt::Display for PieceSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", u128::from_be_bytes(self.0))
    }
}

impl FromStr for PieceSeed {
    type Err = ParseSeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 32 {
            return Err(ParseSeedError);
        }
        let num = u128::from_str_radix(s, 16).map_err(|_| ParseSeedError)?;
        Ok(Self(num.to_be_bytes()))
    }
}

impl Serialize for PieceSeed {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PieceSeed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Allows generating random `PieceSeed` values with `rng.random()`.
impl Distribution<PieceSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceSeed {
        let mut seed = [0; 16];
        rng.fill(&mut seed);
        PieceSeed(seed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seed_from_bytes(bytes: [u8; 16]) -> PieceSeed {
        PieceSeed(bytes)
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let seed: PieceSeed = rand::rng().random();
        let mut generator1 = PieceGenerator::with_seed(seed);
        let mut generator2 = PieceGenerator::with_seed(seed);

        for _ in 0..50 {
            assert_eq!(generator1.next_kind(), generator2.next_kind());
        }
    }

    #[test]
    fn test_every_kind_appears() {
        let mut generator = PieceGenerator::with_seed(seed_from_bytes([7; 16]));
        let mut seen = [false; PieceKind::LEN];
        for _ in 0..1000 {
            seen[generator.next_kind() as usize] = true;
        }
        assert_eq!(seen, [true; PieceKind::LEN]);
    }

    #[test]
    fn test_roundtrip_random_seed() {
        let seed: PieceSeed = rand::rng().random();
        let serialized = serde_json::to_string(&seed).unwrap();
        let deserialized: PieceSeed = serde_json::from_str(&serialized).unwrap();
        assert_eq!(seed, deserialized);
    }

    #[test]
    fn test_format_is_32_char_hex_string() {
        let seed = seed_from_bytes([
            0x01, 0x23, 0x45, 0x67, 0x89, 0xAB, 0xCD, 0xEF, 0xFE, 0xDC, 0xBA, 0x98, 0x76, 0x54,
            0x32, 0x10,
        ]);
        // Big-endian: bytes appear in order as hex pairs.
        assert_eq!(seed.to_string(), "0123456789abcdeffedcba9876543210");

        let parsed: PieceSeed = "0123456789abcdeffedcba9876543210".parse().unwrap();
        assert_eq!(parsed, seed);
    }

    #[test]
    fn test_parse_accepts_uppercase_hex() {
        let parsed: PieceSeed = "0123456789ABCDEFFEDCBA9876543210".parse().unwrap();
        assert_eq!(parsed.to_string(), "0123456789abcdeffedcba9876543210");
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        // Wrong length.
        assert!("0123456789abcdef".parse::<PieceSeed>().is_err());
        assert!("".parse::<PieceSeed>().is_err());
        // 32 characters but not hex.
        assert!(
            "ghijklmnopqrstuvwxyzghijklmnopqr"
                .parse::<PieceSeed>()
                .is_err()
        );
    }

    #[test]
    fn test_deserialize_error_mentions_seed() {
        let result: Result<PieceSeed, _> = serde_json::from_str("\"nope\"");
        let err = result.unwrap_err().to_string();
        assert!(err.contains("invalid seed"));
    }

    #[test]
    fn test_serialized_seed_preserves_sequence() {
        let original: PieceSeed = rand::rng().random();
        let serialized = serde_json::to_string(&original).unwrap();
        let restored: PieceSeed = serde_json::from_str(&serialized).unwrap();

        let mut generator1 = PieceGenerator::with_seed(original);
        let mut generator2 = PieceGenerator::with_seed(restored);
        for _ in 0..20 {
            assert_eq!(generator1.next_kind(), generator2.next_kind());
        }
    }
}
