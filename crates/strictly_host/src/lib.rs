//! Strictly Ledger host - the execution environment for `strictly_program`
//!
//! The program validates and applies transitions; this crate supplies what
//! a ledger would: addressed storage for records, transactions that commit
//! all-or-nothing, and identities for signers.
//!
//! # Architecture
//!
//! - **Store**: [`AccountStore`] trait and the in-memory [`MemoryStore`]
//! - **Runtime**: [`Runtime`] runs each instruction as one serialized transaction
//! - **Config**: [`HostConfig`] loaded from TOML
//! - **CLI**: argument types for the `strictly_ledger` binary
//!
//! # Example
//!
//! ```
//! use strictly_host::{HostConfig, MemoryStore, Runtime};
//! use strictly_program::{GameState, PlayerKey, Tile};
//!
//! # fn example() -> Result<(), strictly_host::HostError> {
//! let runtime = Runtime::new(MemoryStore::new(), HostConfig::default());
//! runtime.fetch_or_initialize_registry()?;
//!
//! let alice = PlayerKey::from_label("alice");
//! let bob = PlayerKey::from_label("bob");
//! let game = runtime.setup_game(&alice, &bob)?;
//! runtime.start_game(&game)?;
//! assert_eq!(runtime.play(&game, &alice, Tile::new(0, 0))?, GameState::Active);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod cli;
mod config;
mod error;
mod runtime;
mod store;

pub use config::{ConfigError, HostConfig};
pub use error::{HostError, HostErrorKind};
pub use runtime::{MatchReport, Receipt, Runtime};
pub use store::{AccountStore, MemoryStore};
