//! First-class invariants for a game record.
//!
//! Invariants are logical properties that hold for every record reachable
//! through [`Game::setup`](crate::Game::setup) and
//! [`Game::play`](crate::Game::play). They are checked after each move in
//! debug builds and are testable on their own.

#[cfg(kani)]
mod verification;

pub mod mark_balance;
pub mod outcome_matches_board;
pub mod turn_matches_board;

pub use mark_balance::MarkBalanceInvariant;
pub use outcome_matches_board::OutcomeMatchesBoardInvariant;
pub use turn_matches_board::TurnMatchesBoardInvariant;

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// A set of invariants checked together. Implemented for tuples.
pub trait InvariantSet<S> {
    /// Checks all invariants in the set, collecting every violation.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

fn collect(violations: Vec<InvariantViolation>) -> Result<(), Vec<InvariantViolation>> {
    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}

impl<S, I1, I2, I3> InvariantSet<S> for (I1, I2, I3)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
    I3: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();
        if !I1::holds(state) {
            violations.push(InvariantViolation::new(I1::description()));
        }
        if !I2::holds(state) {
            violations.push(InvariantViolation::new(I2::description()));
        }
        if !I3::holds(state) {
            violations.push(InvariantViolation::new(I3::description()));
        }
        collect(violations)
    }
}

impl<S, I1, I2> InvariantSet<S> for (I1, I2)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();
        if !I1::holds(state) {
            violations.push(InvariantViolation::new(I1::description()));
        }
        if !I2::holds(state) {
            violations.push(InvariantViolation::new(I2::description()));
        }
        collect(violations)
    }
}

/// All game invariants as a composable set.
pub type GameInvariants = (
    MarkBalanceInvariant,
    TurnMatchesBoardInvariant,
    OutcomeMatchesBoardInvariant,
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Game, GameState, PlayerKey, SetupPolicy, Tile};

    fn players() -> (PlayerKey, PlayerKey) {
        (PlayerKey::from_label("alice"), PlayerKey::from_label("bob"))
    }

    #[test]
    fn test_invariant_set_holds_for_fresh_game() {
        let (a, b) = players();
        let game = Game::setup(a, b, SetupPolicy::strict()).expect("setup");
        assert!(GameInvariants::check_all(&game).is_ok());
    }

    #[test]
    fn test_invariant_set_holds_after_moves() {
        let (a, b) = players();
        let tiles = [Tile::new(0, 0), Tile::new(1, 1), Tile::new(0, 2)];
        let game = Game::replay(a, b, SetupPolicy::strict(), &tiles).expect("legal moves");
        assert!(GameInvariants::check_all(&game).is_ok());
    }

    #[test]
    fn test_invariant_set_reports_every_violation() {
        let (a, b) = players();
        let mut game = Game::setup(a, b, SetupPolicy::strict()).expect("setup");
        game.set_turn(5);
        game.set_state(GameState::Tie);

        let violations = GameInvariants::check_all(&game).unwrap_err();
        assert_eq!(violations.len(), 2);
        assert!(
            violations
                .iter()
                .any(|v| v.description == TurnMatchesBoardInvariant::description())
        );
    }

    #[test]
    fn test_two_invariants_as_set() {
        let (a, b) = players();
        let game = Game::setup(a, b, SetupPolicy::strict()).expect("setup");
        type TwoInvariants = (MarkBalanceInvariant, TurnMatchesBoardInvariant);
        assert!(TwoInvariants::check_all(&game).is_ok());
    }
}
