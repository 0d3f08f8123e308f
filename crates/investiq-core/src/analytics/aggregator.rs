//! Pure reductions over a user's transactions
//!
//! Every function here is total: empty input gives zero or empty output, and
//! amounts are trusted to be validated already.

use chrono::Datelike;

use crate::models::{CategoryBreakdown, TopCategory, Transaction, TransactionType};

/// Sum of `amount` over records of the given direction
pub fn sum_by_type<'a, I>(transactions: I, kind: TransactionType) -> f64
where
    I: IntoIterator<Item = &'a Transaction>,
{
    transactions
        .into_iter()
        .filter(|t| t.kind == kind)
        .map(|t| t.amount)
        .sum()
}

/// Signed sum: income adds, expense subtracts
pub fn total_balance<'a, I>(transactions: I) -> f64
where
    I: IntoIterator<Item = &'a Transaction>,
{
    transactions
        .into_iter()
        .map(|t| t.amount * t.kind.sign())
        .sum()
}

/// Records dated within `month` (1-12) of `year`, in input order
pub fn filter_by_month(transactions: &[Transaction], month: u32, year: i32) -> Vec<&Transaction> {
    transactions
        .iter()
        .filter(|t| t.transaction_date.month() == month && t.transaction_date.year() == year)
        .collect()
}

/// Expense totals grouped by category label
pub fn category_breakdown<'a, I>(transactions: I) -> CategoryBreakdown
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut breakdown = CategoryBreakdown::new();
    for tx in transactions.into_iter().filter(|t| t.is_expense()) {
        breakdown.add(tx.category_label(), tx.amount);
    }
    breakdown
}

/// Largest category; ties keep the first-inserted entry
pub fn top_category(breakdown: &CategoryBreakdown) -> Option<TopCategory> {
    let mut best: Option<(&str, f64)> = None;
    for (name, amount) in breakdown.iter() {
        match best {
            Some((_, best_amount)) if amount <= best_amount => {}
            _ => best = Some((name, amount)),
        }
    }
    best.map(|(name, amount)| TopCategory {
        name: name.to_string(),
        amount,
    })
}
