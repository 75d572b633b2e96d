//! Deterministic record addresses.
//!
//! Records are located by hashing a list of seeds instead of consulting an
//! index. Each seed is length-prefixed so that no two seed lists share an
//! encoding.

use crate::types::{ParseKeyError, PlayerKey, decode_hex32, write_hex};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::str::FromStr;
use tracing::instrument;

/// Seed tag for game records.
pub const GAME_SEED: &[u8] = b"game";

/// Seed tag for the registry record.
pub const REGISTRY_SEED: &[u8] = b"global_state";

const DOMAIN_TAG: &[u8] = b"strictly_program::DerivedAddress";

/// Location of a record in the host's store.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Address([u8; 32]);

impl Address {
    /// Hashes `seeds` into an address.
    pub fn derive(seeds: &[&[u8]]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(DOMAIN_TAG);
        for seed in seeds {
            hasher.update((seed.len() as u32).to_le_bytes());
            hasher.update(seed);
        }
        let mut bytes = [0u8; 32];
        bytes.copy_from_slice(&hasher.finalize());
        Self(bytes)
    }

    /// Returns the raw address bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl std::fmt::Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write_hex(f, &self.0)
    }
}

impl std::fmt::Debug for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Address({})", self)
    }
}

impl FromStr for Address {
    type Err = ParseKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        decode_hex32(s).map(Self).ok_or_else(|| ParseKeyError {
            input: s.to_string(),
        })
    }
}

/// Address of the game between `player_one` and `player_two` created when
/// the registry counter read `game_count`.
#[instrument(skip(seed_tag, player_one, player_two), fields(player_one = %player_one, player_two = %player_two))]
pub fn derive_game_address(
    seed_tag: &[u8],
    player_one: &PlayerKey,
    player_two: &PlayerKey,
    game_count: u64,
) -> Address {
    let count = game_count.to_le_bytes();
    Address::derive(&[
        seed_tag,
        player_one.as_bytes().as_slice(),
        player_two.as_bytes().as_slice(),
        count.as_slice(),
    ])
}

/// Address of the registry record.
#[instrument(skip(seed_tag))]
pub fn registry_address(seed_tag: &[u8]) -> Address {
    Address::derive(&[seed_tag])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn players() -> (PlayerKey, PlayerKey) {
        (PlayerKey::from_label("alice"), PlayerKey::from_label("bob"))
    }

    #[test]
    fn test_derivation_is_deterministic() {
        let (a, b) = players();
        assert_eq!(
            derive_game_address(GAME_SEED, &a, &b, 7),
            derive_game_address(GAME_SEED, &a, &b, 7)
        );
    }

    #[test]
    fn test_every_input_matters() {
        let (a, b) = players();
        let base = derive_game_address(GAME_SEED, &a, &b, 0);
        assert_ne!(base, derive_game_address(b"other", &a, &b, 0));
        assert_ne!(base, derive_game_address(GAME_SEED, &b, &a, 0));
        assert_ne!(base, derive_game_address(GAME_SEED, &a, &a, 0));
        assert_ne!(base, derive_game_address(GAME_SEED, &a, &b, 1));
    }

    #[test]
    fn test_seed_boundaries_are_unambiguous() {
        assert_ne!(
            Address::derive(&[&b"ab"[..], &b"c"[..]]),
            Address::derive(&[&b"a"[..], &b"bc"[..]])
        );
    }

    #[test]
    fn test_registry_differs_from_games() {
        let (a, b) = players();
        assert_ne!(
            registry_address(REGISTRY_SEED),
            derive_game_address(GAME_SEED, &a, &b, 0)
        );
    }

    #[test]
    fn test_hex_round_trip() {
        let address = registry_address(REGISTRY_SEED);
        assert_eq!(address.to_string().len(), 64);
        assert_eq!(address.to_string().parse::<Address>(), Ok(address));
    }
}
