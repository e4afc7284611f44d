//! Ledger domain models: the transaction entity, its category catalog, and amount helpers.

pub mod amount;
pub mod category;
pub mod transaction;

pub use category::{categories_for, is_allowed};
pub use transaction::{
    parse_date, Transaction, TransactionDraft, TransactionId, TransactionKind, TransactionPatch,
    DATE_FORMAT,
};
