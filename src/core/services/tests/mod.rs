mod summary_service_tests;

use crate::core::time::FixedClock;
use crate::ledger::{Transaction, TransactionDraft, TransactionId};

/// Builds a validated transaction without going through the store.
pub(super) fn txn(
    id: TransactionId,
    kind: &str,
    amount: f64,
    category: &str,
    date: &str,
) -> Transaction {
    let clock = FixedClock::at(2024, 6, 1, 8, 0);
    let draft = TransactionDraft::new(kind, format!("entry {id}"), amount, category).on(date);
    Transaction::create(id, &draft, &clock).expect("valid fixture")
}
