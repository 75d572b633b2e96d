//! Program error types.

use crate::action::Tile;
use crate::types::PlayerKey;
use derive_more::{Display, Error};
use tracing::instrument;

/// What went wrong while validating or applying an instruction.
///
/// Every rendered message starts with the variant name so callers can
/// surface the kind verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Display, strum::IntoStaticStr)]
pub enum ProgramErrorKind {
    /// Row or column outside `[0, 2]`.
    #[display("TileOutOfBounds: tile {tile} is outside the board")]
    TileOutOfBounds {
        /// The rejected tile.
        tile: Tile,
    },

    /// The target cell already holds a mark.
    #[display("TileAlreadySet: tile {tile} is already set")]
    TileAlreadySet {
        /// The rejected tile.
        tile: Tile,
    },

    /// The game has been won or tied.
    #[display("GameAlreadyOver: the game has already ended")]
    GameAlreadyOver,

    /// The caller is not the player selected by turn parity.
    #[display("NotPlayersTurn: expected {expected}, got {caller}")]
    NotPlayersTurn {
        /// Player whose turn it is.
        expected: PlayerKey,
        /// Player who attempted the move.
        caller: PlayerKey,
    },

    /// Both seats were given the same identity and self-play is disabled.
    #[display("InvalidPlayers: {player} cannot play against themselves")]
    InvalidPlayers {
        /// The duplicated identity.
        player: PlayerKey,
    },

    /// The registry was initialized twice.
    #[display("AlreadyInitialized: the global registry already exists")]
    AlreadyInitialized,

    /// The game counter cannot be advanced any further.
    #[display("CounterOverflow: the game counter is exhausted")]
    CounterOverflow,

    /// A postcondition failed after a transition was applied.
    #[display("InvariantViolation: {_0}")]
    InvariantViolation(String),
}

impl ProgramErrorKind {
    /// Returns the variant name, e.g. `"TileAlreadySet"`.
    pub fn name(&self) -> &'static str {
        self.into()
    }
}

/// Program error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Program error: {} at {}:{}", kind, file, line)]
pub struct ProgramError {
    /// What went wrong.
    pub kind: ProgramErrorKind,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ProgramError {
    /// Creates a new program error with caller location tracking.
    #[track_caller]
    #[instrument(skip(kind), fields(kind = kind.name()))]
    pub fn new(kind: ProgramErrorKind) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            line: loc.line(),
            file: loc.file(),
        }
    }

    /// Returns the error kind.
    pub fn kind(&self) -> &ProgramErrorKind {
        &self.kind
    }
}

impl From<ProgramErrorKind> for ProgramError {
    #[track_caller]
    fn from(kind: ProgramErrorKind) -> Self {
        Self::new(kind)
    }
}

/// Result alias used by every program operation.
pub type ProgramResult<T> = Result<T, ProgramError>;
