//! The ledger store: owns the transaction list, id counter and initial balance,
//! mediates every mutation, persists snapshots, and notifies observers.

use std::{collections::HashSet, fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use crate::core::events::{LedgerEvent, LedgerObserver, Notifier, Subscription};
use crate::core::services::{
    BalanceSummary, CategoryShare, DateRange, PeriodReport, ReportService, SummaryService,
};
use crate::core::time::Clock;
use crate::errors::{LedgerError, Result};
use crate::ledger::{
    amount::{parse_balance, parse_decimal},
    categories_for, Transaction, TransactionDraft, TransactionId, TransactionKind,
    TransactionPatch,
};
use crate::storage::{KeyValueStore, CURRENT_ID_KEY, INITIAL_BALANCE_KEY, TRANSACTIONS_KEY};

const FIRST_ID: TransactionId = 1;

/// Display order for [`LedgerStore::sorted_transactions`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = LedgerError;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            other => Err(LedgerError::validation(format!(
                "unknown sort order `{other}` (expected asc or desc)"
            ))),
        }
    }
}

/// Single-threaded owner of ledger state.
///
/// Every mutation validates first, then updates memory, then rewrites the full
/// snapshot through the [`KeyValueStore`], then notifies observers. A failed
/// write surfaces as [`LedgerError::Persistence`] after memory has changed.
pub struct LedgerStore {
    transactions: Vec<Transaction>,
    next_id: TransactionId,
    initial_balance: f64,
    storage: Box<dyn KeyValueStore>,
    clock: Box<dyn Clock>,
    notifier: Notifier,
    load_warnings: Vec<String>,
}

impl LedgerStore {
    /// Loads state from `storage`. Unreadable keys fall back to defaults.
    pub fn open(storage: impl KeyValueStore + 'static, clock: impl Clock + 'static) -> Self {
        Self::open_with_observers(storage, clock, Vec::new())
    }

    /// Like [`LedgerStore::open`], registering `observers` before loading so they
    /// receive any `storageError` raised by the load.
    pub fn open_with_observers(
        storage: impl KeyValueStore + 'static,
        clock: impl Clock + 'static,
        observers: Vec<Box<dyn LedgerObserver>>,
    ) -> Self {
        let notifier = Notifier::default();
        for observer in observers {
            // Initial observers live as long as the store.
            let _ = notifier.subscribe(observer);
        }
        let mut store = Self {
            transactions: Vec::new(),
            next_id: FIRST_ID,
            initial_balance: 0.0,
            storage: Box::new(storage),
            clock: Box::new(clock),
            notifier,
            load_warnings: Vec::new(),
        };
        store.load();
        store
    }

    /// Registers `observer`; events are delivered in subscription order.
    pub fn subscribe(&self, observer: impl LedgerObserver + 'static) -> Subscription {
        self.notifier.subscribe(Box::new(observer))
    }

    pub fn observer_count(&self) -> usize {
        self.notifier.len()
    }

    /// Problems found while loading; empty when every key was readable.
    pub fn load_warnings(&self) -> &[String] {
        &self.load_warnings
    }

    pub fn storage(&self) -> &dyn KeyValueStore {
        self.storage.as_ref()
    }

    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    // --- mutations -------------------------------------------------------

    /// Replaces the initial balance. Accepts anything that renders as a decimal.
    pub fn set_initial_balance(&mut self, amount: impl ToString) -> Result<f64> {
        let parsed = parse_balance(&amount.to_string())?;
        self.initial_balance = parsed;
        self.persist()?;
        info!(initial_balance = parsed, "initial balance set");
        self.notifier.emit(&LedgerEvent::BalanceChanged {
            initial_balance: parsed,
        });
        Ok(parsed)
    }

    /// Validates `draft`, assigns the next id and inserts it at the front.
    pub fn add_transaction(&mut self, draft: &TransactionDraft) -> Result<Transaction> {
        let transaction = Transaction::create(self.next_id, draft, self.clock.as_ref())?;
        self.next_id += 1;
        self.transactions.insert(0, transaction.clone());
        self.persist()?;
        info!(
            id = transaction.id(),
            kind = %transaction.kind(),
            amount = transaction.amount(),
            "transaction added"
        );
        self.notifier
            .emit(&LedgerEvent::TransactionAdded(transaction.clone()));
        Ok(transaction)
    }

    /// Replaces transaction `id` with its patched copy.
    pub fn edit_transaction(
        &mut self,
        id: TransactionId,
        patch: &TransactionPatch,
    ) -> Result<Transaction> {
        let index = self.position(id)?;
        let updated = self.transactions[index].update(patch, self.clock.as_ref())?;
        self.transactions[index] = updated.clone();
        self.persist()?;
        info!(id, "transaction updated");
        self.notifier
            .emit(&LedgerEvent::TransactionUpdated(updated.clone()));
        Ok(updated)
    }

    /// Removes transaction `id`, returning the removed entry.
    pub fn delete_transaction(&mut self, id: TransactionId) -> Result<Transaction> {
        let index = self.position(id)?;
        let removed = self.transactions.remove(index);
        self.persist()?;
        info!(id, "transaction deleted");
        self.notifier
            .emit(&LedgerEvent::TransactionDeleted(removed.clone()));
        Ok(removed)
    }

    // --- queries ---------------------------------------------------------

    pub fn initial_balance(&self) -> f64 {
        self.initial_balance
    }

    /// The id the next added transaction will receive.
    pub fn next_id(&self) -> TransactionId {
        self.next_id
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// Copy of every transaction, most recently inserted first.
    pub fn all_transactions(&self) -> Vec<Transaction> {
        self.transactions.clone()
    }

    pub fn transaction(&self, id: TransactionId) -> Result<Transaction> {
        self.transactions
            .iter()
            .find(|txn| txn.id() == id)
            .cloned()
            .ok_or(LedgerError::NotFound(id))
    }

    /// Copy ordered by date in `order`; same-day entries are always newest-created first.
    pub fn sorted_transactions(&self, order: SortOrder) -> Vec<Transaction> {
        let mut sorted = self.transactions.clone();
        sorted.sort_by(|a, b| {
            let by_date = match order {
                SortOrder::Desc => b.date().cmp(&a.date()),
                SortOrder::Asc => a.date().cmp(&b.date()),
            };
            by_date.then_with(|| b.created_at().cmp(&a.created_at()))
        });
        debug!(order = %order, count = sorted.len(), "sorted transactions");
        sorted
    }

    pub fn categories(kind: TransactionKind) -> &'static [&'static str] {
        categories_for(kind)
    }

    pub fn total_expenses(&self) -> f64 {
        SummaryService::total_expenses(&self.transactions)
    }

    pub fn total_income(&self) -> f64 {
        SummaryService::total_income(&self.transactions)
    }

    pub fn current_balance(&self) -> f64 {
        SummaryService::current_balance(&self.transactions, self.initial_balance)
    }

    pub fn balance_summary(&self) -> BalanceSummary {
        SummaryService::balance_summary(&self.transactions, self.initial_balance)
    }

    pub fn category_proportions(&self, kind: TransactionKind) -> Vec<CategoryShare> {
        SummaryService::category_proportions(&self.transactions, kind)
    }

    pub fn transactions_in_range(&self, range: DateRange) -> Vec<Transaction> {
        ReportService::transactions_in_range(&self.transactions, range)
    }

    pub fn transactions_in_month(&self, year: i32, month: u32) -> Result<Vec<Transaction>> {
        Ok(self.transactions_in_range(DateRange::month(year, month)?))
    }

    pub fn date_range_report(&self, range: DateRange) -> PeriodReport {
        ReportService::date_range_report(&self.transactions, range)
    }

    pub fn monthly_report(&self, year: i32, month: u32) -> Result<PeriodReport> {
        ReportService::monthly_report(&self.transactions, year, month)
    }

    pub fn available_years(&self) -> Vec<i32> {
        ReportService::available_years(&self.transactions, self.clock.current_year())
    }

    // --- persistence -----------------------------------------------------

    fn position(&self, id: TransactionId) -> Result<usize> {
        self.transactions
            .iter()
            .position(|txn| txn.id() == id)
            .ok_or(LedgerError::NotFound(id))
    }

    fn persist(&mut self) -> Result<()> {
        let snapshot = serde_json::to_string(&self.transactions)?;
        let next_id = self.next_id.to_string();
        let initial_balance = self.initial_balance.to_string();
        let writes = [
            (TRANSACTIONS_KEY, snapshot.as_str()),
            (CURRENT_ID_KEY, next_id.as_str()),
            (INITIAL_BALANCE_KEY, initial_balance.as_str()),
        ];
        self.storage.set_many(&writes).map_err(|err| {
            error!(error = %err, "failed to save ledger");
            match err {
                err @ LedgerError::Persistence(_) => err,
                other => LedgerError::Persistence(other.to_string()),
            }
        })
    }

    fn load(&mut self) {
        let mut warnings = Vec::new();

        match self.read_transactions() {
            Ok(transactions) => self.transactions = transactions,
            Err(err) => warnings.push(format!("{TRANSACTIONS_KEY}: {err}")),
        }
        match self.read_number(CURRENT_ID_KEY, |raw| raw.trim().parse::<TransactionId>().ok()) {
            Ok(Some(id)) => self.next_id = id.max(FIRST_ID),
            Ok(None) => {}
            Err(err) => warnings.push(format!("{CURRENT_ID_KEY}: {err}")),
        }
        match self.read_number(INITIAL_BALANCE_KEY, parse_decimal) {
            Ok(Some(balance)) => self.initial_balance = balance,
            Ok(None) => {}
            Err(err) => warnings.push(format!("{INITIAL_BALANCE_KEY}: {err}")),
        }

        if let Some(max_id) = self.transactions.iter().map(Transaction::id).max() {
            if self.next_id <= max_id {
                warn!(
                    stored = self.next_id,
                    max_id, "id counter behind stored transactions; advancing"
                );
                self.next_id = max_id + 1;
            }
        }

        info!(
            transactions = self.transactions.len(),
            next_id = self.next_id,
            initial_balance = self.initial_balance,
            "ledger loaded"
        );

        if !warnings.is_empty() {
            for warning in &warnings {
                warn!(%warning, "falling back to default after load failure");
            }
            let message = format!("Failed to load data from storage ({})", warnings.join("; "));
            self.load_warnings = warnings;
            self.notifier.emit(&LedgerEvent::StorageError(message));
        }
    }

    fn read_transactions(&self) -> Result<Vec<Transaction>> {
        let Some(raw) = self.storage.get(TRANSACTIONS_KEY)? else {
            return Ok(Vec::new());
        };
        let parsed: Option<Vec<Transaction>> = serde_json::from_str(&raw)?;
        let mut seen = HashSet::new();
        parsed
            .unwrap_or_default()
            .iter()
            .map(|stored| {
                if !seen.insert(stored.id()) {
                    return Err(LedgerError::Persistence(format!(
                        "duplicate transaction id {}",
                        stored.id()
                    )));
                }
                stored.normalized()
            })
            .collect()
    }

    fn read_number<T>(&self, key: &str, parse: impl Fn(&str) -> Option<T>) -> Result<Option<T>> {
        match self.storage.get(key)? {
            None => Ok(None),
            Some(raw) => parse(&raw)
                .map(Some)
                .ok_or_else(|| LedgerError::Persistence(format!("unparsable value `{raw}`"))),
        }
    }
}

impl fmt::Debug for LedgerStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LedgerStore")
            .field("transactions", &self.transactions.len())
            .field("next_id", &self.next_id)
            .field("initial_balance", &self.initial_balance)
            .field("observers", &self.notifier.len())
            .finish()
    }
}
