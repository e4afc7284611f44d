//! Ledger-wide totals and category proportions.

use serde::Serialize;

use crate::ledger::{
    amount::{round_money, round_to, PERCENT_PLACES},
    Transaction, TransactionKind,
};

/// Share of one category within the total of a transaction kind.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryShare {
    pub category: String,
    pub amount: f64,
    pub percentage: f64,
}

/// Headline figures shown alongside the transaction list.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceSummary {
    pub initial_balance: f64,
    pub income: f64,
    pub expenses: f64,
    pub total_balance: f64,
}

/// Aggregates totals over a transaction list.
pub struct SummaryService;

impl SummaryService {
    /// Sum of amounts of the given kind, rounded to cents.
    pub fn total_for(transactions: &[Transaction], kind: TransactionKind) -> f64 {
        round_money(raw_total(transactions, kind))
    }

    pub fn total_expenses(transactions: &[Transaction]) -> f64 {
        Self::total_for(transactions, TransactionKind::Expense)
    }

    pub fn total_income(transactions: &[Transaction]) -> f64 {
        Self::total_for(transactions, TransactionKind::Income)
    }

    /// `initial + income - expenses`, rounded to cents.
    pub fn current_balance(transactions: &[Transaction], initial_balance: f64) -> f64 {
        round_money(
            initial_balance + Self::total_income(transactions) - Self::total_expenses(transactions),
        )
    }

    pub fn balance_summary(transactions: &[Transaction], initial_balance: f64) -> BalanceSummary {
        BalanceSummary {
            initial_balance,
            income: Self::total_income(transactions),
            expenses: Self::total_expenses(transactions),
            total_balance: Self::current_balance(transactions, initial_balance),
        }
    }

    /// Per-category totals for `kind`, largest first. Empty when `kind` has no entries.
    pub fn category_proportions(
        transactions: &[Transaction],
        kind: TransactionKind,
    ) -> Vec<CategoryShare> {
        let matching: Vec<&Transaction> = transactions
            .iter()
            .filter(|txn| txn.kind() == kind)
            .collect();
        let total = raw_total(transactions, kind);
        if matching.is_empty() || total <= 0.0 {
            return Vec::new();
        }

        let mut shares: Vec<CategoryShare> = group_by_category(&matching)
            .into_iter()
            .map(|group| CategoryShare {
                category: group.category,
                amount: round_money(group.amount),
                percentage: round_to(group.amount / total * 100.0, PERCENT_PLACES),
            })
            .collect();
        shares.sort_by(|a, b| b.amount.total_cmp(&a.amount));
        shares
    }
}

pub(crate) fn raw_total(transactions: &[Transaction], kind: TransactionKind) -> f64 {
    transactions
        .iter()
        .filter(|txn| txn.kind() == kind)
        .map(Transaction::amount)
        .sum()
}

/// Unrounded per-category accumulation in first-seen order.
pub(crate) struct CategoryGroup {
    pub category: String,
    pub amount: f64,
    pub count: usize,
}

pub(crate) fn group_by_category(transactions: &[&Transaction]) -> Vec<CategoryGroup> {
    let mut groups: Vec<CategoryGroup> = Vec::new();
    for txn in transactions {
        match groups.iter_mut().find(|group| group.category == txn.category()) {
            Some(group) => {
                group.amount += txn.amount();
                group.count += 1;
            }
            None => groups.push(CategoryGroup {
                category: txn.category().to_string(),
                amount: txn.amount(),
                count: 1,
            }),
        }
    }
    groups
}
