//! Contract-based validation for moves.
//!
//! Contracts formalize Hoare-style reasoning: {P} action {Q}. Preconditions
//! run on every move; postconditions run in debug builds.

use crate::action::Tile;
use crate::error::{ProgramError, ProgramErrorKind, ProgramResult};
use crate::game::Game;
use crate::invariants::{GameInvariants, InvariantSet};
use crate::types::{PlayerKey, Square};
use tracing::{instrument, warn};

// ─────────────────────────────────────────────────────────────
//  Contract Trait
// ─────────────────────────────────────────────────────────────

/// Preconditions and postconditions for a state transition.
pub trait Contract<S, A> {
    /// Checks preconditions before applying the action.
    fn pre(state: &S, action: &A) -> ProgramResult<()>;

    /// Checks postconditions after applying the action.
    fn post(before: &S, after: &S) -> ProgramResult<()>;
}

/// A signer asking to place their mark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_new::new)]
pub struct PlayAction {
    /// Who is asking.
    pub caller: PlayerKey,
    /// Where.
    pub tile: Tile,
}

// ─────────────────────────────────────────────────────────────
//  Move Preconditions
// ─────────────────────────────────────────────────────────────

/// Precondition: the game has not ended.
pub struct GameIsActive;

impl GameIsActive {
    /// Fails with `GameAlreadyOver` once the game is won or tied.
    #[instrument(skip(game))]
    pub fn check(game: &Game) -> ProgramResult<()> {
        if game.is_active() {
            Ok(())
        } else {
            Err(ProgramError::new(ProgramErrorKind::GameAlreadyOver))
        }
    }
}

/// Precondition: the caller is the player selected by turn parity.
pub struct PlayersTurn;

impl PlayersTurn {
    /// Fails with `NotPlayersTurn` for anyone else.
    #[instrument(skip(game))]
    pub fn check(action: &PlayAction, game: &Game) -> ProgramResult<()> {
        let expected = game.current_player();
        if action.caller == expected {
            Ok(())
        } else {
            Err(ProgramError::new(ProgramErrorKind::NotPlayersTurn {
                expected,
                caller: action.caller,
            }))
        }
    }
}

/// Precondition: the tile lies on the board.
pub struct TileInBounds;

impl TileInBounds {
    /// Fails with `TileOutOfBounds` outside `[0, 2]`.
    #[instrument]
    pub fn check(action: &PlayAction) -> ProgramResult<()> {
        match action.tile.cell() {
            Some(_) => Ok(()),
            None => Err(ProgramError::new(ProgramErrorKind::TileOutOfBounds {
                tile: action.tile,
            })),
        }
    }
}

/// Precondition: the tile is still empty.
pub struct TileIsEmpty;

impl TileIsEmpty {
    /// Fails with `TileAlreadySet` on an occupied cell.
    #[instrument(skip(game))]
    pub fn check(action: &PlayAction, game: &Game) -> ProgramResult<()> {
        match action.tile.cell() {
            Some((row, column)) if game.board().is_occupied(row, column) => {
                Err(ProgramError::new(ProgramErrorKind::TileAlreadySet {
                    tile: action.tile,
                }))
            }
            _ => Ok(()),
        }
    }
}

/// Composite precondition, in reporting order.
pub struct LegalPlay;

impl LegalPlay {
    /// Validates all preconditions for a move.
    #[instrument(skip(game))]
    pub fn check(action: &PlayAction, game: &Game) -> ProgramResult<()> {
        GameIsActive::check(game)?;
        PlayersTurn::check(action, game)?;
        TileInBounds::check(action)?;
        TileIsEmpty::check(action, game)?;
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────
//  Transition Postconditions
// ─────────────────────────────────────────────────────────────

/// Postcondition: earlier marks are untouched and exactly one was added.
pub struct BoardMonotonic;

impl BoardMonotonic {
    /// Compares the two boards square by square.
    #[instrument(skip(before, after))]
    pub fn holds(before: &Game, after: &Game) -> bool {
        let mut added = 0;
        for (old, new) in before.board().squares().zip(after.board().squares()) {
            match (old, new) {
                (Square::Empty, Square::Empty) => {}
                (Square::Empty, Square::Occupied(_)) => added += 1,
                (old, new) if old == new => {}
                _ => {
                    warn!(?old, ?new, "Square overwritten");
                    return false;
                }
            }
        }
        added == 1
    }
}

/// Postcondition: the turn advances by one iff the game is still active.
pub struct TurnAdvance;

impl TurnAdvance {
    /// Checks the turn delta against the resulting state.
    #[instrument(skip(before, after))]
    pub fn holds(before: &Game, after: &Game) -> bool {
        let expected = if after.is_active() {
            before.turn().checked_add(1)
        } else {
            Some(*before.turn())
        };
        let valid = expected == Some(*after.turn());
        if !valid {
            warn!(before = before.turn(), after = after.turn(), "Turn did not advance correctly");
        }
        valid
    }
}

// ─────────────────────────────────────────────────────────────
//  Play Contract (Pre + Post)
// ─────────────────────────────────────────────────────────────

/// Contract for the `play` transition.
///
/// Preconditions:
/// - Game is active
/// - Caller is on turn
/// - Tile is on the board
/// - Tile is empty
///
/// Postconditions:
/// - Board is monotonic
/// - Turn advanced correctly
/// - All game invariants hold
pub struct PlayContract;

impl Contract<Game, PlayAction> for PlayContract {
    fn pre(game: &Game, action: &PlayAction) -> ProgramResult<()> {
        LegalPlay::check(action, game)
    }

    fn post(before: &Game, after: &Game) -> ProgramResult<()> {
        let mut failures = Vec::new();
        if !BoardMonotonic::holds(before, after) {
            failures.push("Board squares are monotonic".to_string());
        }
        if !TurnAdvance::holds(before, after) {
            failures.push("Turn advances by one per non-final move".to_string());
        }
        if let Err(violations) = GameInvariants::check_all(after) {
            failures.extend(violations.into_iter().map(|v| v.description));
        }

        if failures.is_empty() {
            Ok(())
        } else {
            Err(ProgramError::new(ProgramErrorKind::InvariantViolation(
                format!("Postcondition failed: {}", failures.join("; ")),
            )))
        }
    }
}
