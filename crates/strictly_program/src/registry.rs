//! Global registry of created games.
//!
//! The registry is an ordinary record passed explicitly to whoever creates
//! games; there is no ambient singleton. Its counter feeds address
//! derivation, so the read and the increment belong to the same
//! transaction as the game they address.

use crate::error::{ProgramError, ProgramErrorKind, ProgramResult};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// Counter of games created so far.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GlobalRegistry {
    game_count: u64,
}

impl GlobalRegistry {
    /// Creates the registry in `slot` with a zero counter.
    ///
    /// # Errors
    ///
    /// Returns `AlreadyInitialized` when `slot` already holds a registry.
    #[instrument(skip(slot), fields(present = slot.is_some()))]
    pub fn initialize(slot: &mut Option<GlobalRegistry>) -> ProgramResult<&mut GlobalRegistry> {
        if slot.is_some() {
            warn!("Registry already initialized");
            return Err(ProgramError::new(ProgramErrorKind::AlreadyInitialized));
        }
        info!(game_count = 0, "Registry initialized");
        Ok(slot.insert(GlobalRegistry::default()))
    }

    /// Number of games created so far.
    pub fn game_count(&self) -> u64 {
        self.game_count
    }

    /// Counter value the next game will be derived from.
    pub fn next_game_count(&self) -> u64 {
        self.game_count
    }

    /// Advances the counter by one and returns the new value.
    ///
    /// # Errors
    ///
    /// Returns `CounterOverflow` if the counter is at `u64::MAX`.
    #[instrument(skip(self), fields(game_count = self.game_count))]
    pub fn increment_game_count(&mut self) -> ProgramResult<u64> {
        self.game_count = self
            .game_count
            .checked_add(1)
            .ok_or_else(|| ProgramError::new(ProgramErrorKind::CounterOverflow))?;
        debug!(game_count = self.game_count, "Counter advanced");
        Ok(self.game_count)
    }

    /// Returns the current counter and advances it, as one step.
    ///
    /// # Errors
    ///
    /// Returns `CounterOverflow` if the counter is at `u64::MAX`; the
    /// counter is unchanged in that case.
    #[instrument(skip(self))]
    pub fn claim(&mut self) -> ProgramResult<u64> {
        let claimed = self.next_game_count();
        self.increment_game_count()?;
        Ok(claimed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initialize_once() {
        let mut slot = None;
        let registry = GlobalRegistry::initialize(&mut slot).expect("first init");
        assert_eq!(registry.game_count(), 0);

        let err = GlobalRegistry::initialize(&mut slot).unwrap_err();
        assert_eq!(err.kind(), &ProgramErrorKind::AlreadyInitialized);
    }

    #[test]
    fn test_claim_is_monotonic() {
        let mut registry = GlobalRegistry::default();
        assert_eq!(registry.claim().expect("claim"), 0);
        assert_eq!(registry.claim().expect("claim"), 1);
        assert_eq!(registry.next_game_count(), 2);
    }

    #[test]
    fn test_overflow_leaves_counter_untouched() {
        let mut registry = GlobalRegistry {
            game_count: u64::MAX,
        };
        let err = registry.claim().unwrap_err();
        assert_eq!(err.kind(), &ProgramErrorKind::CounterOverflow);
        assert_eq!(registry.game_count(), u64::MAX);
    }
}
