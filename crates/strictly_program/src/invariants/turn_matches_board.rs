//! Turn counter invariant: the turn tracks the number of marks placed.

use super::Invariant;
use crate::game::Game;

/// Invariant: an active game has `turn - 1` marks; a finished one has `turn`.
///
/// The counter stops on the final move, so a finished game's turn names
/// the move that ended it.
pub struct TurnMatchesBoardInvariant;

impl Invariant<Game> for TurnMatchesBoardInvariant {
    fn holds(game: &Game) -> bool {
        let filled = game.board().filled();
        let turn = usize::from(*game.turn());
        if turn == 0 {
            return false;
        }
        if game.is_active() {
            filled == turn - 1
        } else {
            filled == turn
        }
    }

    fn description() -> &'static str {
        "Turn counter matches the number of marks placed"
    }
}
