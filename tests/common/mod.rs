#![allow(dead_code)]

use std::{
    cell::RefCell,
    collections::HashMap,
    path::PathBuf,
    rc::Rc,
    sync::Mutex,
};

use once_cell::sync::Lazy;
use pocket_ledger::{
    errors::{LedgerError, Result},
    ledger::TransactionDraft,
    storage::KeyValueStore,
};
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Creates a unique directory that outlives the calling test.
pub fn temp_base() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    base
}

/// In-memory store whose contents survive the ledger store that wrote them.
#[derive(Clone, Default)]
pub struct SharedStore {
    entries: Rc<RefCell<HashMap<String, String>>>,
    fail_writes: Rc<RefCell<bool>>,
}

impl SharedStore {
    pub fn with(entries: &[(&str, &str)]) -> Self {
        let store = Self::default();
        for (key, value) in entries {
            store
                .entries
                .borrow_mut()
                .insert(key.to_string(), value.to_string());
        }
        store
    }

    pub fn raw(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    pub fn fail_writes(&self, fail: bool) {
        *self.fail_writes.borrow_mut() = fail;
    }
}

impl KeyValueStore for SharedStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.raw(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        if *self.fail_writes.borrow() {
            return Err(LedgerError::Persistence("disk full".into()));
        }
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

pub fn expense(title: &str, amount: &str, category: &str, date: &str) -> TransactionDraft {
    TransactionDraft::new("expense", title, amount, category).on(date)
}

pub fn income(title: &str, amount: &str, category: &str, date: &str) -> TransactionDraft {
    TransactionDraft::new("income", title, amount, category).on(date)
}
