//! Kani arbitrary implementations for program types.
//!
//! These let Kani explore every value of our types during model checking.

#[cfg(kani)]
use crate::{Board, Game, GameState, Mark, PlayerKey, Square, Tile};

#[cfg(kani)]
impl kani::Arbitrary for Mark {
    fn any() -> Self {
        if kani::any() { Mark::X } else { Mark::O }
    }
}

#[cfg(kani)]
impl kani::Arbitrary for Square {
    fn any() -> Self {
        if kani::any() {
            Square::Empty
        } else {
            Square::Occupied(kani::any())
        }
    }
}

#[cfg(kani)]
impl kani::Arbitrary for Tile {
    fn any() -> Self {
        let row: i32 = kani::any();
        let column: i32 = kani::any();
        // Keep the search near the board; one step outside covers every branch.
        kani::assume((-1..=3).contains(&row) && (-1..=3).contains(&column));
        Tile::new(row, column)
    }
}

#[cfg(kani)]
impl kani::Arbitrary for PlayerKey {
    fn any() -> Self {
        PlayerKey::from_bytes(kani::any())
    }
}

#[cfg(kani)]
impl kani::Arbitrary for Board {
    fn any() -> Self {
        let mut board = Board::new();
        for row in 0..3 {
            for column in 0..3 {
                if let Square::Occupied(mark) = kani::any::<Square>() {
                    board.place(row, column, mark);
                }
            }
        }
        board
    }
}

#[cfg(kani)]
impl kani::Arbitrary for GameState {
    fn any() -> Self {
        match kani::any::<u8>() % 3 {
            0 => GameState::Active,
            1 => GameState::Tie,
            _ => GameState::Won { winner: kani::any() },
        }
    }
}

#[cfg(kani)]
impl kani::Arbitrary for Game {
    fn any() -> Self {
        let turn: u8 = kani::any();
        kani::assume((1..=9).contains(&turn));
        Game::from_parts([kani::any(), kani::any()], turn, kani::any(), kani::any())
    }
}
