use std::{fmt, str::FromStr};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::{amount, category};
use crate::core::time::Clock;
use crate::errors::{LedgerError, Result};

/// Identifier assigned by the ledger store; never reused.
pub type TransactionId = u64;

/// Calendar date format used for transaction dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    pub const ALL: [TransactionKind; 2] = [TransactionKind::Income, TransactionKind::Expense];

    pub fn as_str(self) -> &'static str {
        match self {
            TransactionKind::Income => "income",
            TransactionKind::Expense => "expense",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionKind {
    type Err = LedgerError;

    fn from_str(value: &str) -> Result<Self> {
        match value {
            "income" => Ok(TransactionKind::Income),
            "expense" => Ok(TransactionKind::Expense),
            _ => Err(LedgerError::validation("Invalid transaction type")),
        }
    }
}

/// Raw field values for a new transaction, as collected from user input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionDraft {
    pub title: String,
    pub amount: String,
    pub category: String,
    pub kind: String,
    /// `YYYY-MM-DD`; the clock's current day when absent.
    pub date: Option<String>,
}

impl TransactionDraft {
    pub fn new(
        kind: impl Into<String>,
        title: impl Into<String>,
        amount: impl ToString,
        category: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            amount: amount.to_string(),
            category: category.into(),
            kind: kind.into(),
            date: None,
        }
    }

    pub fn on(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }
}

/// Field overrides applied by [`Transaction::update`]. `None` keeps the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionPatch {
    pub title: Option<String>,
    pub amount: Option<String>,
    pub category: Option<String>,
    pub kind: Option<String>,
    pub date: Option<String>,
}

impl TransactionPatch {
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_amount(mut self, amount: impl ToString) -> Self {
        self.amount = Some(amount.to_string());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self == &TransactionPatch::default()
    }
}

/// A validated ledger entry. Instances are immutable; edits produce new values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    id: TransactionId,
    title: String,
    amount: f64,
    category: String,
    date: NaiveDate,
    #[serde(rename = "type")]
    kind: TransactionKind,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Transaction {
    /// Validates `draft` and stamps it with `id` and the clock's current time.
    pub fn create(id: TransactionId, draft: &TransactionDraft, clock: &dyn Clock) -> Result<Self> {
        let now = clock.now();
        let date = match draft.date.as_deref() {
            Some(raw) => parse_date(raw)?,
            None => clock.today(),
        };
        Self::from_fields(
            id,
            &draft.title,
            &draft.amount,
            &draft.category,
            &draft.kind,
            date,
            now,
            now,
        )
    }

    /// Returns a copy with `patch` applied and a refreshed `updated_at`.
    ///
    /// All validations run again against the merged fields; `self` is untouched.
    pub fn update(&self, patch: &TransactionPatch, clock: &dyn Clock) -> Result<Self> {
        let date = match patch.date.as_deref() {
            Some(raw) => parse_date(raw)?,
            None => self.date,
        };
        let amount = patch
            .amount
            .clone()
            .unwrap_or_else(|| self.amount.to_string());
        Self::from_fields(
            self.id,
            patch.title.as_deref().unwrap_or(&self.title),
            &amount,
            patch.category.as_deref().unwrap_or(&self.category),
            patch.kind.as_deref().unwrap_or(self.kind.as_str()),
            date,
            self.created_at,
            clock.now(),
        )
    }

    #[allow(clippy::too_many_arguments)]
    fn from_fields(
        id: TransactionId,
        title: &str,
        amount: &str,
        category: &str,
        kind: &str,
        date: NaiveDate,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Result<Self> {
        let amount = amount::parse_amount(amount)?;
        let kind: TransactionKind = kind.parse()?;
        if !category::is_allowed(kind, category) {
            return Err(LedgerError::validation(
                "Invalid category for the specified type",
            ));
        }
        let title = title.trim();
        if title.is_empty() {
            return Err(LedgerError::validation("Title must not be empty"));
        }
        Ok(Self {
            id,
            title: title.to_string(),
            amount,
            category: category.to_string(),
            date,
            kind,
            created_at,
            updated_at,
        })
    }

    /// Rebuilds a record that bypassed construction (deserialized), re-checking
    /// invariants and rounding the amount and trimming the title as construction does.
    pub(crate) fn normalized(&self) -> Result<Self> {
        Self::from_fields(
            self.id,
            &self.title,
            &self.amount.to_string(),
            &self.category,
            self.kind.as_str(),
            self.date,
            self.created_at,
            self.updated_at,
        )
    }

    pub fn id(&self) -> TransactionId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn amount(&self) -> f64 {
        self.amount
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn kind(&self) -> TransactionKind {
        self.kind
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

/// Parses a `YYYY-MM-DD` calendar date.
pub fn parse_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT)
        .map_err(|_| LedgerError::validation(format!("Invalid date `{}`", raw.trim())))
}
