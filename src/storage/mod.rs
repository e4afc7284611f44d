pub mod json_file;
pub mod memory;

use crate::errors::Result;

/// Key holding the JSON array of transaction records.
pub const TRANSACTIONS_KEY: &str = "transactions";
/// Key holding the next transaction id as a decimal string.
pub const CURRENT_ID_KEY: &str = "currentId";
/// Key holding the initial balance as a decimal string.
pub const INITIAL_BALANCE_KEY: &str = "initialBalance";

/// Synchronous string key-value persistence consumed by the ledger store.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// Writes several keys as one snapshot. Stores that can commit them together
    /// should override this; the default writes them one at a time.
    fn set_many(&mut self, entries: &[(&str, &str)]) -> Result<()> {
        for (key, value) in entries {
            self.set(key, value)?;
        }
        Ok(())
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn set_many(&mut self, entries: &[(&str, &str)]) -> Result<()> {
        (**self).set_many(entries)
    }
}

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;
