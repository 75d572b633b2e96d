//! Game rules for tic-tac-toe.
//!
//! Pure functions over a [`Board`](crate::Board). Rules are separated from
//! board storage so contracts and invariants can reuse them.

pub mod draw;
pub mod win;

pub use draw::is_full;
pub use win::{LINES, check_winner, winning_line};

use crate::types::{Board, Mark};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Result of inspecting a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// No line and at least one empty square.
    Undecided,
    /// A line of three of this mark exists.
    WonBy(Mark),
    /// Full board, no line.
    Tie,
}

/// Evaluates the board: a win takes precedence over a full board.
#[instrument(skip(board))]
pub fn evaluate(board: &Board) -> Outcome {
    if let Some(mark) = check_winner(board) {
        Outcome::WonBy(mark)
    } else if is_full(board) {
        Outcome::Tie
    } else {
        Outcome::Undecided
    }
}
