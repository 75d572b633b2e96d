//! Lifecycle state of a game.

use crate::types::PlayerKey;
use serde::{Deserialize, Serialize};

/// Current state of the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameState {
    /// The game accepts moves.
    #[default]
    Active,
    /// The board filled up with no line.
    Tie,
    /// Someone completed a line.
    Won {
        /// The player who completed it.
        winner: PlayerKey,
    },
}

impl GameState {
    /// True while moves are accepted.
    pub fn is_active(&self) -> bool {
        matches!(self, GameState::Active)
    }

    /// Returns the winner if there is one.
    pub fn winner(&self) -> Option<PlayerKey> {
        match self {
            GameState::Won { winner } => Some(*winner),
            GameState::Active | GameState::Tie => None,
        }
    }
}

impl std::fmt::Display for GameState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameState::Active => write!(f, "Active"),
            GameState::Tie => write!(f, "Tie"),
            GameState::Won { winner } => write!(f, "Won by {}", winner),
        }
    }
}
