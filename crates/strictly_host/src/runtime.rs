//! Transactional runtime around the program.
//!
//! Every instruction runs as one transaction under a single lock: records
//! are loaded, the program transition runs on owned copies, and the
//! results are committed in one batch only if the transition succeeded.
//! Holding the lock across the whole transaction is what keeps two setups
//! from claiming the same counter value and two moves on the same game
//! from interleaving.

use crate::config::HostConfig;
use crate::error::{HostError, HostErrorKind};
use crate::store::AccountStore;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::Mutex;
use strictly_program::{
    Address, Game, GameState, GlobalRegistry, Instruction, PlayerKey, ProgramErrorKind, Tile,
    derive_game_address, registry_address,
};
use tracing::{debug, info, instrument, warn};

/// What a successfully executed instruction produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Receipt {
    /// The registry now exists at this address.
    RegistryInitialized(Address),
    /// A game was created at this address.
    GameCreated(Address),
    /// The game passed its start gate.
    GameStarted(Address),
    /// A move was accepted.
    Played {
        /// Game address.
        address: Address,
        /// State after the move.
        state: GameState,
    },
}

/// Outcome of [`Runtime::play_match`].
#[derive(Debug, Clone)]
pub struct MatchReport {
    /// Where the game lives.
    pub address: Address,
    /// Final stored record.
    pub game: Game,
    /// Number of moves accepted.
    pub accepted: usize,
    /// The first rejected move, if any, and why.
    pub rejected: Option<(Tile, HostError)>,
}

/// Pending reads and writes of one transaction.
struct Transaction<'a, S: AccountStore> {
    store: &'a S,
    writes: Vec<(Address, Vec<u8>)>,
}

impl<'a, S: AccountStore> Transaction<'a, S> {
    fn new(store: &'a S) -> Self {
        Self {
            store,
            writes: Vec::new(),
        }
    }

    fn load<T: DeserializeOwned>(&self, address: &Address) -> Result<Option<T>, HostError> {
        let pending = self
            .writes
            .iter()
            .rev()
            .find(|(a, _)| a == address)
            .map(|(_, data)| data.clone());
        let data = match pending {
            Some(data) => Some(data),
            None => self.store.load(address)?,
        };
        let Some(bytes) = data else {
            return Ok(None);
        };
        let record = serde_json::from_slice(&bytes)?;
        Ok(Some(record))
    }

    /// True if a record is pending or stored at `address`, whatever it holds.
    fn contains(&self, address: &Address) -> Result<bool, HostError> {
        if self.writes.iter().any(|(a, _)| a == address) {
            return Ok(true);
        }
        self.store.contains(address)
    }

    fn require<T: DeserializeOwned>(&self, address: &Address) -> Result<T, HostError> {
        self.load(address)?.ok_or_else(|| {
            HostError::new(HostErrorKind::AccountNotFound { address: *address })
        })
    }

    fn put<T: Serialize>(&mut self, address: Address, record: &T) -> Result<(), HostError> {
        self.writes.push((address, serde_json::to_vec(record)?));
        Ok(())
    }

    fn commit(self) -> Result<(), HostError> {
        self.store.commit(self.writes)
    }
}

/// Executes program instructions against an [`AccountStore`].
#[derive(Debug)]
pub struct Runtime<S: AccountStore> {
    store: S,
    config: HostConfig,
    lock: Mutex<()>,
}

impl<S: AccountStore> Runtime<S> {
    /// Creates a runtime over `store`.
    #[instrument(skip(store))]
    pub fn new(store: S, config: HostConfig) -> Self {
        info!("Creating runtime");
        Self {
            store,
            config,
            lock: Mutex::new(()),
        }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &HostConfig {
        &self.config
    }

    /// Returns the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Address of the registry record.
    pub fn registry_address(&self) -> Address {
        registry_address(self.config.registry_seed().as_bytes())
    }

    /// Address of the game between the two players created at `game_count`.
    pub fn game_address(
        &self,
        player_one: &PlayerKey,
        player_two: &PlayerKey,
        game_count: u64,
    ) -> Address {
        derive_game_address(
            self.config.game_seed().as_bytes(),
            player_one,
            player_two,
            game_count,
        )
    }

    /// Runs `f` as one transaction, committing its writes only on success.
    fn transact<T>(
        &self,
        f: impl FnOnce(&mut Transaction<'_, S>) -> Result<T, HostError>,
    ) -> Result<T, HostError> {
        let _guard = self.lock.lock().map_err(|_| {
            HostError::new(HostErrorKind::StoreUnavailable(
                "transaction lock poisoned".to_string(),
            ))
        })?;

        let mut tx = Transaction::new(&self.store);
        match f(&mut tx) {
            Ok(value) => {
                tx.commit()?;
                Ok(value)
            }
            Err(err) => {
                warn!(error = %err.kind, "Transaction aborted");
                Err(err)
            }
        }
    }

    /// Creates the registry with a zero counter.
    ///
    /// # Errors
    ///
    /// Returns the program's `AlreadyInitialized` when the registry exists.
    #[instrument(skip(self))]
    pub fn initialize_global_state(&self) -> Result<Address, HostError> {
        let address = self.registry_address();
        self.transact(|tx| {
            let mut slot: Option<GlobalRegistry> = tx.load(&address)?;
            let registry = *GlobalRegistry::initialize(&mut slot)?;
            tx.put(address, &registry)?;
            info!(address = %address, "Registry created");
            Ok(address)
        })
    }

    /// Loads the registry, creating it first if it does not exist yet.
    #[instrument(skip(self))]
    pub fn fetch_or_initialize_registry(&self) -> Result<GlobalRegistry, HostError> {
        if self.store.contains(&self.registry_address())? {
            debug!("Registry already exists, skipping initialization");
        } else {
            match self.initialize_global_state() {
                Ok(_) => {}
                // Lost a race with another initializer; the registry is there now.
                Err(err) if err.program_kind() == Some(&ProgramErrorKind::AlreadyInitialized) => {}
                Err(err) => return Err(err),
            }
        }
        self.registry()
    }

    /// Loads the registry.
    ///
    /// # Errors
    ///
    /// Returns `AccountNotFound` before initialization.
    #[instrument(skip(self))]
    pub fn registry(&self) -> Result<GlobalRegistry, HostError> {
        Transaction::new(&self.store).require(&self.registry_address())
    }

    /// Loads the game at `address`.
    ///
    /// # Errors
    ///
    /// Returns `AccountNotFound` when no game lives there.
    #[instrument(skip(self, address), fields(address = %address))]
    pub fn game(&self, address: &Address) -> Result<Game, HostError> {
        Transaction::new(&self.store).require(address)
    }

    /// Creates a game between `signer` (seat 0) and `player_two`.
    ///
    /// The counter value read here both addresses the game and is consumed
    /// by it, inside one transaction.
    #[instrument(skip(self, signer, player_two), fields(signer = %signer, player_two = %player_two))]
    pub fn setup_game(
        &self,
        signer: &PlayerKey,
        player_two: &PlayerKey,
    ) -> Result<Address, HostError> {
        let registry_address = self.registry_address();
        let policy = self.config.setup_policy();

        self.transact(|tx| {
            let mut registry: GlobalRegistry = tx.require(&registry_address)?;
            let game_count = registry.claim()?;
            let address = self.game_address(signer, player_two, game_count);

            if tx.contains(&address)? {
                return Err(HostError::new(HostErrorKind::AccountAlreadyExists {
                    address,
                }));
            }

            let game = Game::setup(*signer, *player_two, policy)?;

            tx.put(address, &game)?;
            tx.put(registry_address, &registry)?;
            info!(address = %address, game_count, "Game created");
            Ok(address)
        })
    }

    /// Passes the game at `address` through its start gate.
    #[instrument(skip(self, address), fields(address = %address))]
    pub fn start_game(&self, address: &Address) -> Result<(), HostError> {
        self.transact(|tx| {
            let mut game: Game = tx.require(address)?;
            game.start()?;
            tx.put(*address, &game)?;
            Ok(())
        })
    }

    /// Places `signer`'s mark on the game at `address`.
    #[instrument(skip(self, address, signer), fields(address = %address, signer = %signer, row = tile.row, column = tile.column))]
    pub fn play(
        &self,
        address: &Address,
        signer: &PlayerKey,
        tile: Tile,
    ) -> Result<GameState, HostError> {
        self.transact(|tx| {
            let mut game: Game = tx.require(address)?;
            let state = game.play(signer, tile)?;
            tx.put(*address, &game)?;
            Ok(state)
        })
    }

    /// Executes a serialized instruction on behalf of `signer`.
    ///
    /// `StartGame` and `Play` act on the game at `game`.
    #[instrument(skip(self, signer), fields(signer = %signer))]
    pub fn execute(
        &self,
        signer: &PlayerKey,
        game: Option<Address>,
        instruction: Instruction,
    ) -> Result<Receipt, HostError> {
        let require_game =
            || game.ok_or_else(|| HostError::new(HostErrorKind::MissingGameAccount));

        match instruction {
            Instruction::InitializeGlobalState => self
                .initialize_global_state()
                .map(Receipt::RegistryInitialized),
            Instruction::SetupGame { player_two } => self
                .setup_game(signer, &player_two)
                .map(Receipt::GameCreated),
            Instruction::StartGame => {
                let address = require_game()?;
                self.start_game(&address)?;
                Ok(Receipt::GameStarted(address))
            }
            Instruction::Play { tile } => {
                let address = require_game()?;
                let state = self.play(&address, signer, tile)?;
                Ok(Receipt::Played { address, state })
            }
        }
    }

    /// Sets up a fresh game and plays `tiles`, each signed by whoever is on
    /// turn. Stops at the first rejected move.
    #[instrument(skip(self, player_one, player_two), fields(moves = tiles.len()))]
    pub fn play_match(
        &self,
        player_one: &PlayerKey,
        player_two: &PlayerKey,
        tiles: &[Tile],
    ) -> Result<MatchReport, HostError> {
        self.fetch_or_initialize_registry()?;
        let address = self.setup_game(player_one, player_two)?;
        self.start_game(&address)?;

        let mut accepted = 0;
        let mut rejected = None;
        for tile in tiles {
            let signer = self.game(&address)?.current_player();
            match self.play(&address, &signer, *tile) {
                Ok(_) => accepted += 1,
                Err(err) if err.program_kind().is_some() => {
                    rejected = Some((*tile, err));
                    break;
                }
                Err(err) => return Err(err),
            }
        }

        Ok(MatchReport {
            address,
            game: self.game(&address)?,
            accepted,
            rejected,
        })
    }
}
