//! Formal verification of invariants using the Kani model checker.
//!
//! These harnesses start from any record that satisfies the invariant set
//! (every record a sequence of legal moves can produce) and check that one
//! more move either fails without mutation or preserves every invariant.

use super::{GameInvariants, InvariantSet};
use crate::{Game, PlayerKey, Tile};

/// An arbitrary record that the invariant set accepts.
fn reachable_game() -> Game {
    let game: Game = kani::any();
    kani::assume(GameInvariants::check_all(&game).is_ok());
    game
}

/// A rejected move never mutates the record.
#[kani::proof]
#[kani::unwind(10)]
fn verify_rejected_move_is_pure() {
    let mut game = reachable_game();
    let caller: PlayerKey = kani::any();
    let tile: Tile = kani::any();

    let before = game.clone();
    if game.play(&caller, tile).is_err() {
        assert!(game == before, "rejected move mutated the game");
    }
}

/// A move by the player on turn keeps the invariant set intact.
#[kani::proof]
#[kani::unwind(10)]
fn verify_moves_preserve_invariants() {
    let mut game = reachable_game();
    let caller = game.current_player();
    let tile: Tile = kani::any();

    let _ = game.play(&caller, tile);
    assert!(
        GameInvariants::check_all(&game).is_ok(),
        "move broke an invariant"
    );
}
