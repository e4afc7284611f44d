//! Period reports over inclusive date ranges and calendar months.

use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use super::summary_service::{group_by_category, raw_total};
use crate::errors::{LedgerError, Result};
use crate::ledger::{
    amount::{round_money, round_to, PERCENT_PLACES},
    Transaction, TransactionKind,
};

/// Inclusive calendar range. `start <= end` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if start > end {
            return Err(LedgerError::validation(format!(
                "start date {start} is after end date {end}"
            )));
        }
        Ok(Self { start, end })
    }

    /// First through last day of `month` (1-indexed) in `year`.
    pub fn month(year: i32, month: u32) -> Result<Self> {
        if !(1..=12).contains(&month) {
            return Err(LedgerError::validation(format!(
                "month must be between 1 and 12, got {month}"
            )));
        }
        let start = NaiveDate::from_ymd_opt(year, month, 1)
            .ok_or_else(|| LedgerError::validation(format!("year {year} is out of range")))?;
        let next = if month == 12 {
            NaiveDate::from_ymd_opt(year + 1, 1, 1)
        } else {
            NaiveDate::from_ymd_opt(year, month + 1, 1)
        };
        let end = next
            .and_then(|date| date.pred_opt())
            .ok_or_else(|| LedgerError::validation(format!("year {year} is out of range")))?;
        Self::new(start, end)
    }

    /// Number of calendar days covered, counting both ends. Never below 1.
    pub fn day_count(&self) -> i64 {
        ((self.end - self.start).num_days() + 1).max(1)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Per-category figures inside a period report.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryStats {
    pub category: String,
    pub amount: f64,
    pub count: usize,
    pub percentage: f64,
    pub avg_amount: f64,
}

/// Period-level totals and daily averages.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodSummary {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub day_count: i64,
    pub total_income: f64,
    pub total_expense: f64,
    pub net_income: f64,
    pub daily_avg_income: f64,
    pub daily_avg_expense: f64,
}

/// One transaction kind's slice of a period.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KindBreakdown {
    pub total: f64,
    pub categories: Vec<CategoryStats>,
    pub transactions: Vec<Transaction>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodReport {
    pub period_summary: PeriodSummary,
    pub income: KindBreakdown,
    pub expense: KindBreakdown,
}

impl PeriodReport {
    pub fn breakdown(&self, kind: TransactionKind) -> &KindBreakdown {
        match kind {
            TransactionKind::Income => &self.income,
            TransactionKind::Expense => &self.expense,
        }
    }
}

/// Builds period reports and year listings from a transaction list.
pub struct ReportService;

impl ReportService {
    /// Transactions dated inside `range`, in their stored order.
    pub fn transactions_in_range(transactions: &[Transaction], range: DateRange) -> Vec<Transaction> {
        transactions
            .iter()
            .filter(|txn| range.contains(txn.date()))
            .cloned()
            .collect()
    }

    pub fn date_range_report(transactions: &[Transaction], range: DateRange) -> PeriodReport {
        let in_range = Self::transactions_in_range(transactions, range);
        let income = breakdown(&in_range, TransactionKind::Income);
        let expense = breakdown(&in_range, TransactionKind::Expense);
        let day_count = range.day_count();

        let period_summary = PeriodSummary {
            start_date: range.start,
            end_date: range.end,
            day_count,
            total_income: income.total,
            total_expense: expense.total,
            net_income: round_money(income.total - expense.total),
            daily_avg_income: round_money(income.total / day_count as f64),
            daily_avg_expense: round_money(expense.total / day_count as f64),
        };

        PeriodReport {
            period_summary,
            income,
            expense,
        }
    }

    pub fn monthly_report(
        transactions: &[Transaction],
        year: i32,
        month: u32,
    ) -> Result<PeriodReport> {
        let range = DateRange::month(year, month)?;
        Ok(Self::date_range_report(transactions, range))
    }

    /// Contiguous years from the earliest transaction year to the latest (current year
    /// included), newest first. Without transactions: the current year and the two before it.
    pub fn available_years(transactions: &[Transaction], current_year: i32) -> Vec<i32> {
        if transactions.is_empty() {
            return vec![current_year, current_year - 1, current_year - 2];
        }
        let mut years: BTreeSet<i32> = transactions.iter().map(|txn| txn.date().year()).collect();
        years.insert(current_year);
        match (years.first(), years.last()) {
            (Some(&min), Some(&max)) => (min..=max).rev().collect(),
            _ => vec![current_year],
        }
    }
}

fn breakdown(transactions: &[Transaction], kind: TransactionKind) -> KindBreakdown {
    let matching: Vec<&Transaction> = transactions
        .iter()
        .filter(|txn| txn.kind() == kind)
        .collect();
    let total = raw_total(transactions, kind);

    let mut categories: Vec<CategoryStats> = group_by_category(&matching)
        .into_iter()
        .map(|group| CategoryStats {
            percentage: if total > 0.0 {
                round_to(group.amount / total * 100.0, PERCENT_PLACES)
            } else {
                0.0
            },
            avg_amount: round_money(group.amount / group.count as f64),
            amount: round_money(group.amount),
            count: group.count,
            category: group.category,
        })
        .collect();
    categories.sort_by(|a, b| b.amount.total_cmp(&a.amount));

    KindBreakdown {
        total: round_money(total),
        categories,
        transactions: matching.into_iter().cloned().collect(),
    }
}
