#![doc(test(attr(deny(warnings))))]

//! Pocket Ledger records personal income and expenses, keeps an initial balance,
//! and derives totals, category breakdowns, and period reports from them.
//!
//! ```
//! use pocket_ledger::{
//!     core::{FixedClock, LedgerStore},
//!     ledger::TransactionDraft,
//!     storage::MemoryStore,
//! };
//!
//! let mut store = LedgerStore::open(MemoryStore::new(), FixedClock::at(2024, 1, 20, 9, 0));
//! store.set_initial_balance(1000).unwrap();
//! store
//!     .add_transaction(&TransactionDraft::new("expense", "Lunch", "12.50", "Food"))
//!     .unwrap();
//! assert_eq!(store.current_balance(), 987.5);
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod errors;
pub mod ledger;
pub mod storage;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Pocket Ledger tracing initialized.");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
    }
}
