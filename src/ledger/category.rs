//! Fixed category catalog for each transaction kind.

use super::transaction::TransactionKind;

const EXPENSE_CATEGORIES: [&str; 4] = ["Transportation", "Food", "Entertainment", "Other"];
const INCOME_CATEGORIES: [&str; 4] = ["Salary", "Investment", "Bonus", "Other"];

/// Returns the categories a transaction of `kind` may use, in display order.
pub fn categories_for(kind: TransactionKind) -> &'static [&'static str] {
    match kind {
        TransactionKind::Expense => &EXPENSE_CATEGORIES,
        TransactionKind::Income => &INCOME_CATEGORIES,
    }
}

/// Returns `true` when `category` belongs to the catalog of `kind`.
///
/// Matching is exact; `"food"` is not `"Food"`.
pub fn is_allowed(kind: TransactionKind, category: &str) -> bool {
    categories_for(kind).contains(&category)
}
