//! Publish/subscribe plumbing between the ledger store and its observers.
//!
//! Delivery is synchronous and ordered by subscription. Observers run while the
//! store is mid-operation and must not mutate the store or touch their own
//! subscription from inside the callback.

use std::{
    cell::RefCell,
    rc::{Rc, Weak},
};

use tracing::warn;

use crate::ledger::Transaction;

/// Notifications published by the ledger store after a state change.
#[derive(Debug, Clone, PartialEq)]
pub enum LedgerEvent {
    TransactionAdded(Transaction),
    TransactionUpdated(Transaction),
    TransactionDeleted(Transaction),
    BalanceChanged { initial_balance: f64 },
    StorageError(String),
}

impl LedgerEvent {
    /// Stable event name, as understood by presentation collaborators.
    pub fn name(&self) -> &'static str {
        match self {
            LedgerEvent::TransactionAdded(_) => "transactionAdded",
            LedgerEvent::TransactionUpdated(_) => "transactionUpdated",
            LedgerEvent::TransactionDeleted(_) => "transactionDeleted",
            LedgerEvent::BalanceChanged { .. } => "balanceChanged",
            LedgerEvent::StorageError(_) => "storageError",
        }
    }

    /// The transaction carried by the event, if any.
    pub fn transaction(&self) -> Option<&Transaction> {
        match self {
            LedgerEvent::TransactionAdded(txn)
            | LedgerEvent::TransactionUpdated(txn)
            | LedgerEvent::TransactionDeleted(txn) => Some(txn),
            _ => None,
        }
    }
}

/// Receives ledger events. Implemented for every `FnMut(&LedgerEvent)` closure.
pub trait LedgerObserver {
    fn on_event(&mut self, event: &LedgerEvent);
}

impl<F> LedgerObserver for F
where
    F: FnMut(&LedgerEvent),
{
    fn on_event(&mut self, event: &LedgerEvent) {
        self(event)
    }
}

pub type SubscriptionId = u64;

#[derive(Default)]
struct ObserverList {
    next_id: SubscriptionId,
    entries: Vec<(SubscriptionId, Box<dyn LedgerObserver>)>,
}

/// Ordered observer registry owned by the store.
#[derive(Default)]
pub(crate) struct Notifier {
    registry: Rc<RefCell<ObserverList>>,
}

impl Notifier {
    pub(crate) fn subscribe(&self, observer: Box<dyn LedgerObserver>) -> Subscription {
        let mut list = self.registry.borrow_mut();
        list.next_id += 1;
        let id = list.next_id;
        list.entries.push((id, observer));
        Subscription {
            id,
            registry: Rc::downgrade(&self.registry),
        }
    }

    pub(crate) fn emit(&self, event: &LedgerEvent) {
        let mut list = self.registry.borrow_mut();
        for (_, observer) in list.entries.iter_mut() {
            observer.on_event(event);
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.registry.borrow().entries.len()
    }
}

/// Handle returned by `subscribe`. Dropping it leaves the observer registered.
#[derive(Debug)]
pub struct Subscription {
    id: SubscriptionId,
    registry: Weak<RefCell<ObserverList>>,
}

impl Subscription {
    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    /// Detaches the observer. Returns `false` if it was already gone
    /// (store dropped) or if called during event delivery.
    pub fn unsubscribe(self) -> bool {
        let Some(registry) = self.registry.upgrade() else {
            return false;
        };
        let Ok(mut list) = registry.try_borrow_mut() else {
            warn!(subscription = self.id, "unsubscribe attempted during event delivery");
            return false;
        };
        let before = list.entries.len();
        list.entries.retain(|(id, _)| *id != self.id);
        list.entries.len() != before
    }
}
