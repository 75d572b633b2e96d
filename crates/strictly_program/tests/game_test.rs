//! End-to-end tests for the game state machine.

use strictly_program::{
    Board, Game, GameState, Mark, PlayerKey, ProgramErrorKind, SetupPolicy, Square, Tile,
};

fn players() -> (PlayerKey, PlayerKey) {
    (PlayerKey::from_label("player-one"), PlayerKey::from_label("player-two"))
}

fn started() -> (Game, PlayerKey, PlayerKey) {
    let (a, b) = players();
    let mut game = Game::setup(a, b, SetupPolicy::strict()).expect("distinct players");
    game.start().expect("start gate");
    (game, a, b)
}

#[test]
fn test_player_one_wins_top_row() {
    let (mut game, a, b) = started();

    let moves = [
        (a, Tile::new(0, 0), 2),
        (b, Tile::new(1, 0), 3),
        (a, Tile::new(0, 1), 4),
        (b, Tile::new(1, 1), 5),
    ];
    for (player, tile, expected_turn) in moves {
        assert_eq!(game.play(&player, tile).expect("legal move"), GameState::Active);
        assert_eq!(*game.turn(), expected_turn);
    }

    let state = game.play(&a, Tile::new(0, 2)).expect("winning move");
    assert_eq!(state, GameState::Won { winner: a });
    assert_eq!(*game.turn(), 5);
    assert_eq!(game.winner(), Some(a));
    assert_eq!(
        game.board().rows()[0],
        [Square::Occupied(Mark::X); 3]
    );
}

#[test]
fn test_game_ends_in_a_tie() {
    let (mut game, a, b) = started();

    let moves = [
        (a, Tile::new(0, 0)),
        (b, Tile::new(0, 1)),
        (a, Tile::new(0, 2)),
        (b, Tile::new(1, 1)),
        (a, Tile::new(1, 0)),
        (b, Tile::new(1, 2)),
        (a, Tile::new(2, 1)),
        (b, Tile::new(2, 0)),
    ];
    for (player, tile) in moves {
        assert_eq!(game.play(&player, tile).expect("legal move"), GameState::Active);
    }

    assert_eq!(game.play(&a, Tile::new(2, 2)).expect("final move"), GameState::Tie);
    assert_eq!(*game.turn(), 9);
    assert_eq!(game.winner(), None);
    assert_eq!(
        game.board().display(),
        "X|O|X\n-+-+-\nX|O|O\n-+-+-\nO|X|X"
    );
}

#[test]
fn test_out_of_bounds_leaves_board_empty() {
    let (mut game, a, _) = started();
    let err = game.play(&a, Tile::new(3, 3)).unwrap_err();
    assert_eq!(
        err.kind(),
        &ProgramErrorKind::TileOutOfBounds {
            tile: Tile::new(3, 3)
        }
    );
    assert!(err.to_string().contains("TileOutOfBounds"));
    assert_eq!(game.board(), &Board::new());
    assert_eq!(*game.turn(), 1);
    assert_eq!(*game.state(), GameState::Active);
}

#[test]
fn test_negative_coordinates_are_out_of_bounds() {
    let (mut game, a, _) = started();
    for tile in [Tile::new(-1, 0), Tile::new(0, -1), Tile::new(1, 3)] {
        let err = game.play(&a, tile).unwrap_err();
        assert!(matches!(err.kind(), ProgramErrorKind::TileOutOfBounds { .. }));
    }
    assert_eq!(game.board().filled(), 0);
}

#[test]
fn test_tile_already_set() {
    let (mut game, a, b) = started();
    game.play(&a, Tile::new(0, 0)).expect("legal move");
    let before = game.clone();

    let err = game.play(&b, Tile::new(0, 0)).unwrap_err();
    assert!(err.to_string().contains("TileAlreadySet"));
    assert_eq!(game, before);
}

#[test]
fn test_player_two_cannot_open() {
    let (mut game, _, b) = started();
    let err = game.play(&b, Tile::new(1, 1)).unwrap_err();
    assert!(matches!(err.kind(), ProgramErrorKind::NotPlayersTurn { .. }));
    assert_eq!(*game.turn(), 1);
}

#[test]
fn test_same_player_cannot_move_twice() {
    let (mut game, a, _) = started();
    game.play(&a, Tile::new(1, 1)).expect("legal move");
    let err = game.play(&a, Tile::new(0, 0)).unwrap_err();
    assert!(matches!(err.kind(), ProgramErrorKind::NotPlayersTurn { .. }));
}

#[test]
fn test_finished_game_is_frozen() {
    let (a, b) = players();
    let tiles = [
        Tile::new(0, 0),
        Tile::new(1, 0),
        Tile::new(1, 1),
        Tile::new(2, 0),
        Tile::new(2, 2),
    ];
    let mut game = Game::replay(a, b, SetupPolicy::strict(), &tiles).expect("diagonal win");
    assert_eq!(*game.state(), GameState::Won { winner: a });

    let frozen = game.clone();
    for player in [a, b] {
        let err = game.play(&player, Tile::new(0, 2)).unwrap_err();
        assert_eq!(err.kind(), &ProgramErrorKind::GameAlreadyOver);
    }
    assert_eq!(game, frozen);
}

#[test]
fn test_player_two_can_win() {
    let (a, b) = players();
    let tiles = [
        Tile::new(0, 0),
        Tile::new(0, 2),
        Tile::new(1, 0),
        Tile::new(1, 2),
        Tile::new(2, 1),
        Tile::new(2, 2),
    ];
    let game = Game::replay(a, b, SetupPolicy::strict(), &tiles).expect("column win");
    assert_eq!(*game.state(), GameState::Won { winner: b });
    assert_eq!(*game.turn(), 6);
}

#[test]
fn test_record_survives_serialization() {
    let (mut game, a, _) = started();
    game.play(&a, Tile::new(2, 0)).expect("legal move");

    let bytes = serde_json::to_vec(&game).expect("serializable");
    let restored: Game = serde_json::from_slice(&bytes).expect("deserializable");
    assert_eq!(restored, game);
}
