//! Outcome invariant: the recorded state agrees with what the board shows.

use super::Invariant;
use crate::game::Game;
use crate::rules::{Outcome, evaluate};
use crate::state::GameState;
use crate::types::Mark;

/// Invariant: `Won` iff a line exists and the winner owns its mark; `Tie`
/// iff the board is full with no line; `Active` otherwise.
pub struct OutcomeMatchesBoardInvariant;

impl Invariant<Game> for OutcomeMatchesBoardInvariant {
    fn holds(game: &Game) -> bool {
        match (game.state(), evaluate(game.board())) {
            (GameState::Active, Outcome::Undecided) => true,
            (GameState::Tie, Outcome::Tie) => true,
            (GameState::Won { winner }, Outcome::WonBy(mark)) => game
                .players()
                .iter()
                .enumerate()
                .any(|(seat, p)| p == winner && Mark::for_seat(seat) == mark),
            _ => false,
        }
    }

    fn description() -> &'static str {
        "Recorded state agrees with the board"
    }
}
