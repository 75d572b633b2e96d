//! Host error types.

use derive_more::{Display, Error};
use strictly_program::{Address, ProgramError, ProgramErrorKind};
use tracing::instrument;

/// What went wrong while executing a transaction.
#[derive(Debug, Clone, Display)]
pub enum HostErrorKind {
    /// The program rejected the transition.
    #[display("{_0}")]
    Program(ProgramError),

    /// No record lives at the address.
    #[display("AccountNotFound: no record at {address}")]
    AccountNotFound {
        /// The address looked up.
        address: Address,
    },

    /// A record already lives at an address being created.
    #[display("AccountAlreadyExists: a record already lives at {address}")]
    AccountAlreadyExists {
        /// The occupied address.
        address: Address,
    },

    /// The instruction needs a game address and none was supplied.
    #[display("MissingGameAccount: instruction requires a game address")]
    MissingGameAccount,

    /// A record could not be encoded or decoded.
    #[display("Codec: {_0}")]
    Codec(String),

    /// The store or transaction lock is unusable.
    #[display("StoreUnavailable: {_0}")]
    StoreUnavailable(String),
}

/// Host error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Host error: {} at {}:{}", kind, file, line)]
pub struct HostError {
    /// What went wrong.
    pub kind: HostErrorKind,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl HostError {
    /// Creates a new host error with caller location tracking.
    #[track_caller]
    #[instrument(skip(kind), fields(kind = %kind))]
    pub fn new(kind: HostErrorKind) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            line: loc.line(),
            file: loc.file(),
        }
    }

    /// Returns the error kind.
    pub fn kind(&self) -> &HostErrorKind {
        &self.kind
    }

    /// Returns the program's error kind when the program rejected the call.
    pub fn program_kind(&self) -> Option<&ProgramErrorKind> {
        match &self.kind {
            HostErrorKind::Program(err) => Some(err.kind()),
            _ => None,
        }
    }
}

impl From<ProgramError> for HostError {
    #[track_caller]
    fn from(err: ProgramError) -> Self {
        Self::new(HostErrorKind::Program(err))
    }
}

impl From<serde_json::Error> for HostError {
    #[track_caller]
    fn from(err: serde_json::Error) -> Self {
        Self::new(HostErrorKind::Codec(err.to_string()))
    }
}
