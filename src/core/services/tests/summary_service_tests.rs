use super::txn;
use crate::core::services::{CategoryShare, SummaryService};
use crate::ledger::TransactionKind;

#[test]
fn totals_split_by_kind_and_round_to_cents() {
    let list = vec![
        txn(1, "expense", 0.1, "Food", "2024-01-01"),
        txn(2, "expense", 0.2, "Food", "2024-01-02"),
        txn(3, "income", 500.0, "Salary", "2024-01-15"),
    ];
    assert_eq!(SummaryService::total_expenses(&list), 0.3);
    assert_eq!(SummaryService::total_income(&list), 500.0);
}

#[test]
fn current_balance_combines_initial_income_and_expenses() {
    let list = vec![
        txn(1, "expense", 12.5, "Food", "2024-01-10"),
        txn(2, "income", 500.0, "Salary", "2024-01-15"),
    ];
    assert_eq!(SummaryService::current_balance(&list, 1000.0), 1487.5);

    let summary = SummaryService::balance_summary(&list, 1000.0);
    assert_eq!(summary.expenses, 12.5);
    assert_eq!(summary.income, 500.0);
    assert_eq!(summary.total_balance, 1487.5);
}

#[test]
fn current_balance_may_go_negative() {
    let list = vec![txn(1, "expense", 80.0, "Entertainment", "2024-03-01")];
    assert_eq!(SummaryService::current_balance(&list, 50.0), -30.0);
}

#[test]
fn category_proportions_merge_same_category() {
    let list = vec![
        txn(1, "expense", 10.0, "Food", "2024-01-01"),
        txn(2, "expense", 30.0, "Food", "2024-01-02"),
        txn(3, "income", 99.0, "Salary", "2024-01-02"),
    ];
    let shares = SummaryService::category_proportions(&list, TransactionKind::Expense);
    assert_eq!(
        shares,
        vec![CategoryShare {
            category: "Food".into(),
            amount: 40.0,
            percentage: 100.0,
        }]
    );
}

#[test]
fn category_proportions_sorted_by_amount_and_sum_to_hundred() {
    let list = vec![
        txn(1, "expense", 10.0, "Food", "2024-01-01"),
        txn(2, "expense", 10.0, "Transportation", "2024-01-01"),
        txn(3, "expense", 10.0, "Entertainment", "2024-01-01"),
        txn(4, "expense", 25.0, "Other", "2024-01-01"),
    ];
    let shares = SummaryService::category_proportions(&list, TransactionKind::Expense);
    let names: Vec<&str> = shares.iter().map(|s| s.category.as_str()).collect();
    assert_eq!(names, vec!["Other", "Food", "Transportation", "Entertainment"]);
    assert_eq!(shares[0].percentage, 45.5);
    assert_eq!(shares[1].percentage, 18.2);

    let sum: f64 = shares.iter().map(|s| s.percentage).sum();
    let tolerance = 0.1 * shares.len() as f64;
    assert!((sum - 100.0).abs() <= tolerance, "sum was {sum}");
}

#[test]
fn category_proportions_empty_without_matching_kind() {
    let list = vec![txn(1, "expense", 10.0, "Food", "2024-01-01")];
    assert!(SummaryService::category_proportions(&list, TransactionKind::Income).is_empty());
    assert!(SummaryService::category_proportions(&[], TransactionKind::Expense).is_empty());
}
