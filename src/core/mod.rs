//! Ledger store, its event plumbing, and the aggregation services it delegates to.

pub mod events;
pub mod ledger_store;
pub mod services;
pub mod time;

pub use events::{LedgerEvent, LedgerObserver, Subscription, SubscriptionId};
pub use ledger_store::{LedgerStore, SortOrder};
pub use time::{Clock, FixedClock, ManualClock, SystemClock};
