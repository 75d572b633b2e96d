//! Tic-tac-toe as a ledger-hosted program.
//!
//! The program never owns its state. A host loads the [`Game`] or
//! [`GlobalRegistry`] record, hands it to one transition, and writes the
//! result back only if the transition succeeded. Every transition is
//! synchronous and all-or-nothing.
//!
//! # Architecture
//!
//! - **Board**: 3x3 grid of [`Square`]s with bounds and occupancy queries
//! - **Rules**: [`evaluate`] a board into an [`Outcome`]
//! - **Game**: the state machine exposing `setup`, `start` and `play`
//! - **Registry**: the game counter, passed explicitly to setup
//! - **Address**: deterministic record locations derived from seeds
//! - **Contracts / invariants**: pre- and postconditions around `play`
//!
//! # Example
//!
//! ```
//! use strictly_program::{Game, GameState, PlayerKey, SetupPolicy, Tile};
//!
//! let alice = PlayerKey::from_label("alice");
//! let bob = PlayerKey::from_label("bob");
//! let mut game = Game::setup(alice, bob, SetupPolicy::strict())?;
//! game.start()?;
//! assert_eq!(game.play(&alice, Tile::new(1, 1))?, GameState::Active);
//! assert_eq!(*game.turn(), 2);
//! # Ok::<(), strictly_program::ProgramError>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod address;
mod contracts;
mod error;
mod game;
pub mod invariants;
mod kani_support;
pub mod rules;
mod registry;
mod state;
mod types;

pub use action::{Instruction, Tile};
pub use address::{Address, GAME_SEED, REGISTRY_SEED, derive_game_address, registry_address};
pub use contracts::{
    BoardMonotonic, Contract, GameIsActive, LegalPlay, PlayAction, PlayContract, PlayersTurn,
    TileInBounds, TileIsEmpty, TurnAdvance,
};
pub use error::{ProgramError, ProgramErrorKind, ProgramResult};
pub use game::{Game, SetupPolicy};
pub use invariants::{
    GameInvariants, Invariant, InvariantSet, InvariantViolation, MarkBalanceInvariant,
    OutcomeMatchesBoardInvariant, TurnMatchesBoardInvariant,
};
pub use registry::GlobalRegistry;
pub use rules::{Outcome, evaluate};
pub use state::GameState;
pub use types::{BOARD_SIZE, Board, Mark, ParseKeyError, PlayerKey, Square};
