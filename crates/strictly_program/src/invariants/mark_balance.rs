//! Mark balance invariant: X moves first, so X leads O by at most one.

use super::Invariant;
use crate::game::Game;
use crate::types::Mark;

/// Invariant: `count(X) - count(O)` is 0 or 1.
pub struct MarkBalanceInvariant;

impl Invariant<Game> for MarkBalanceInvariant {
    fn holds(game: &Game) -> bool {
        let x = game.board().count(Mark::X);
        let o = game.board().count(Mark::O);
        x == o || x == o + 1
    }

    fn description() -> &'static str {
        "X leads O by at most one mark"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Square;
    use crate::{PlayerKey, SetupPolicy, Tile};

    fn game_after(tiles: &[Tile]) -> Game {
        Game::replay(
            PlayerKey::from_label("alice"),
            PlayerKey::from_label("bob"),
            SetupPolicy::strict(),
            tiles,
        )
        .expect("legal moves")
    }

    #[test]
    fn test_empty_game_holds() {
        assert!(MarkBalanceInvariant::holds(&game_after(&[])));
    }

    #[test]
    fn test_alternating_moves_hold() {
        let game = game_after(&[Tile::new(0, 0), Tile::new(1, 1), Tile::new(2, 2)]);
        assert!(MarkBalanceInvariant::holds(&game));
    }

    #[test]
    fn test_extra_o_violates() {
        let mut game = game_after(&[Tile::new(0, 0)]);
        game.board_mut().force(2, 2, Square::Occupied(Mark::O));
        game.board_mut().force(2, 1, Square::Occupied(Mark::O));
        assert!(!MarkBalanceInvariant::holds(&game));
    }
}
