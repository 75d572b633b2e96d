//! Move arguments and the serialized instruction set.

use crate::types::{Board, PlayerKey};
use serde::{Deserialize, Serialize};

/// Board coordinates requested by a player.
///
/// Coordinates are signed so that any request, including a negative one,
/// can reach validation and be rejected there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_new::new)]
pub struct Tile {
    /// Row (0-2).
    pub row: i32,
    /// Column (0-2).
    pub column: i32,
}

impl Tile {
    /// Returns the cell indices when the tile lies on the board.
    pub fn cell(&self) -> Option<(usize, usize)> {
        if Board::is_in_bounds(self.row, self.column) {
            Some((self.row as usize, self.column as usize))
        } else {
            None
        }
    }
}

impl std::fmt::Display for Tile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.column)
    }
}

/// A state transition requested by the host on behalf of a signer.
///
/// The signer identity travels alongside the instruction, never inside it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "instruction", rename_all = "snake_case")]
pub enum Instruction {
    /// Create the global registry.
    InitializeGlobalState,
    /// Create a game between the signer and `player_two`.
    SetupGame {
        /// Opponent of the signer.
        player_two: PlayerKey,
    },
    /// Open a set-up game for play.
    StartGame,
    /// Place the signer's mark.
    Play {
        /// Target tile.
        tile: Tile,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_in_bounds() {
        assert_eq!(Tile::new(2, 1).cell(), Some((2, 1)));
        assert_eq!(Tile::new(3, 3).cell(), None);
        assert_eq!(Tile::new(-1, 0).cell(), None);
    }

    #[test]
    fn test_instruction_wire_shape() {
        let json = serde_json::to_value(Instruction::Play {
            tile: Tile::new(0, 2),
        })
        .expect("serializable");
        assert_eq!(json["instruction"], "play");
        assert_eq!(json["tile"]["column"], 2);
    }
}
