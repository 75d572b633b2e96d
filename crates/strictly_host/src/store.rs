//! Account storage: raw record bytes keyed by derived address.

use crate::error::{HostError, HostErrorKind};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use strictly_program::Address;
use tracing::{debug, instrument};

/// Load/store interface the runtime persists records through.
pub trait AccountStore {
    /// Reads the record at `address`, `None` when absent.
    fn load(&self, address: &Address) -> Result<Option<Vec<u8>>, HostError>;

    /// Writes every record in `writes` as one atomic batch.
    fn commit(&self, writes: Vec<(Address, Vec<u8>)>) -> Result<(), HostError>;

    /// True when a record lives at `address`.
    fn contains(&self, address: &Address) -> Result<bool, HostError> {
        Ok(self.load(address)?.is_some())
    }
}

/// In-memory account store. Clones share the same accounts.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    accounts: Arc<Mutex<HashMap<Address, Vec<u8>>>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records held.
    #[instrument(skip(self))]
    pub fn len(&self) -> Result<usize, HostError> {
        Ok(self.accounts()?.len())
    }

    /// True when no record is held.
    pub fn is_empty(&self) -> Result<bool, HostError> {
        Ok(self.len()? == 0)
    }

    fn accounts(&self) -> Result<MutexGuard<'_, HashMap<Address, Vec<u8>>>, HostError> {
        self.accounts.lock().map_err(|_| {
            HostError::new(HostErrorKind::StoreUnavailable(
                "account map lock poisoned".to_string(),
            ))
        })
    }
}

impl AccountStore for MemoryStore {
    #[instrument(skip(self, address), fields(address = %address))]
    fn load(&self, address: &Address) -> Result<Option<Vec<u8>>, HostError> {
        let record = self.accounts()?.get(address).cloned();
        debug!(found = record.is_some(), "Loaded record");
        Ok(record)
    }

    #[instrument(skip(self, writes), fields(records = writes.len()))]
    fn commit(&self, writes: Vec<(Address, Vec<u8>)>) -> Result<(), HostError> {
        let mut accounts = self.accounts()?;
        for (address, data) in writes {
            debug!(address = %address, bytes = data.len(), "Writing record");
            accounts.insert(address, data);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strictly_program::registry_address;

    #[test]
    fn test_commit_then_load() {
        let store = MemoryStore::new();
        let address = registry_address(b"test");
        assert!(!store.contains(&address).expect("store usable"));

        store
            .commit(vec![(address, b"payload".to_vec())])
            .expect("commit");
        assert_eq!(
            store.load(&address).expect("store usable"),
            Some(b"payload".to_vec())
        );
        assert_eq!(store.len().expect("store usable"), 1);
    }

    #[test]
    fn test_clones_share_accounts() {
        let store = MemoryStore::new();
        let other = store.clone();
        store
            .commit(vec![(registry_address(b"shared"), Vec::new())])
            .expect("commit");
        assert!(!other.is_empty().expect("store usable"));
    }
}
