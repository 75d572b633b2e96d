//! The game state machine.
//!
//! A [`Game`] is the record the host stores under a derived address.
//! Every transition validates first and mutates second, so a rejected
//! call leaves the record exactly as it was loaded.

use crate::action::Tile;
use crate::contracts::{Contract, PlayAction, PlayContract};
use crate::error::{ProgramError, ProgramErrorKind, ProgramResult};
use crate::rules::{self, Outcome};
use crate::state::GameState;
use crate::types::{Board, Mark, PlayerKey};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// Rules applied when a game is set up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, derive_new::new)]
pub struct SetupPolicy {
    /// Whether both seats may hold the same identity.
    allow_self_play: bool,
}

impl SetupPolicy {
    /// Rejects duplicate player pairs.
    pub fn strict() -> Self {
        Self::default()
    }

    /// Accepts a player facing themselves.
    pub fn permissive() -> Self {
        Self {
            allow_self_play: true,
        }
    }

    /// Whether both seats may hold the same identity.
    pub fn allow_self_play(&self) -> bool {
        self.allow_self_play
    }
}

/// Complete game record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct Game {
    /// Seat 0 plays X on odd turns, seat 1 plays O on even turns.
    players: [PlayerKey; 2],
    /// 1-indexed move counter. Frozen once the game ends.
    turn: u8,
    /// The board.
    board: Board,
    /// Lifecycle state.
    state: GameState,
}

impl Game {
    /// Sets up a fresh game: turn 1, empty board, active.
    ///
    /// # Errors
    ///
    /// Returns `InvalidPlayers` when both seats hold the same identity and
    /// the policy forbids self-play.
    #[instrument(skip(player_one, player_two), fields(player_one = %player_one, player_two = %player_two))]
    pub fn setup(
        player_one: PlayerKey,
        player_two: PlayerKey,
        policy: SetupPolicy,
    ) -> ProgramResult<Self> {
        if player_one == player_two && !policy.allow_self_play() {
            warn!("Rejecting game against self");
            return Err(ProgramError::new(ProgramErrorKind::InvalidPlayers {
                player: player_one,
            }));
        }

        info!("Game set up");
        Ok(Self {
            players: [player_one, player_two],
            turn: 1,
            board: Board::new(),
            state: GameState::Active,
        })
    }

    /// Opens the game for play.
    ///
    /// Setup already leaves the game playable, so this is a gate with no
    /// observable effect on turn, board or state.
    #[instrument(skip(self), fields(turn = self.turn, state = %self.state))]
    pub fn start(&mut self) -> ProgramResult<()> {
        debug!("Start gate passed");
        Ok(())
    }

    /// Checks if the game is still active.
    pub fn is_active(&self) -> bool {
        self.state.is_active()
    }

    /// Seat index (0 or 1) of the player whose turn it is.
    pub fn current_player_index(&self) -> usize {
        usize::from(self.turn.saturating_sub(1)) % 2
    }

    /// Identity of the player whose turn it is.
    pub fn current_player(&self) -> PlayerKey {
        self.players[self.current_player_index()]
    }

    /// Mark placed on the current turn.
    pub fn current_mark(&self) -> Mark {
        Mark::for_seat(self.current_player_index())
    }

    /// Mark owned by `player`, if seated. Seat 0 wins when both seats match.
    pub fn mark_of(&self, player: &PlayerKey) -> Option<Mark> {
        self.players
            .iter()
            .position(|p| p == player)
            .map(Mark::for_seat)
    }

    /// Returns the winner if there is one.
    pub fn winner(&self) -> Option<PlayerKey> {
        self.state.winner()
    }

    /// Places the caller's mark at `tile`.
    ///
    /// Checks run in order: game active, caller's turn, tile in bounds,
    /// tile empty. On success the turn advances unless the move ended the
    /// game.
    ///
    /// # Errors
    ///
    /// Returns `GameAlreadyOver`, `NotPlayersTurn`, `TileOutOfBounds` or
    /// `TileAlreadySet`; the game is untouched in every error case.
    #[instrument(skip(self, caller), fields(caller = %caller, turn = self.turn, row = tile.row, column = tile.column))]
    pub fn play(&mut self, caller: &PlayerKey, tile: Tile) -> ProgramResult<GameState> {
        let action = PlayAction::new(*caller, tile);

        if let Err(err) = PlayContract::pre(self, &action) {
            warn!(error = %err.kind, "Move rejected");
            return Err(err);
        }

        let mut next = self.clone();
        next.apply(&action);

        #[cfg(debug_assertions)]
        PlayContract::post(self, &next)?;

        *self = next;
        info!(state = %self.state, turn = self.turn, "Move accepted");
        Ok(self.state)
    }

    /// Applies a validated move.
    fn apply(&mut self, action: &PlayAction) {
        let Some((row, column)) = action.tile.cell() else {
            return;
        };

        self.board.place(row, column, self.current_mark());

        match rules::evaluate(&self.board) {
            Outcome::WonBy(mark) => {
                debug!(%mark, "Line completed");
                self.state = GameState::Won {
                    winner: action.caller,
                };
            }
            Outcome::Tie => self.state = GameState::Tie,
            Outcome::Undecided => self.turn += 1,
        }
    }

    /// Sets up a game and plays `tiles` with the seats alternating.
    ///
    /// # Errors
    ///
    /// Propagates the first setup or move error.
    #[instrument(skip(player_one, player_two))]
    pub fn replay(
        player_one: PlayerKey,
        player_two: PlayerKey,
        policy: SetupPolicy,
        tiles: &[Tile],
    ) -> ProgramResult<Self> {
        let mut game = Self::setup(player_one, player_two, policy)?;
        game.start()?;
        for tile in tiles {
            let caller = game.current_player();
            game.play(&caller, *tile)?;
        }
        Ok(game)
    }

    #[cfg(test)]
    pub(crate) fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    #[cfg(test)]
    pub(crate) fn set_turn(&mut self, turn: u8) {
        self.turn = turn;
    }

    #[cfg(test)]
    pub(crate) fn set_state(&mut self, state: GameState) {
        self.state = state;
    }

    #[cfg(kani)]
    pub(crate) fn from_parts(
        players: [PlayerKey; 2],
        turn: u8,
        board: Board,
        state: GameState,
    ) -> Self {
        Self {
            players,
            turn,
            board,
            state,
        }
    }
}
