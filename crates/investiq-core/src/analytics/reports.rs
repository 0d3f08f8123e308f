//! Composite reports: monthly summary, spending trend, budget variance
//!
//! Reports that depend on "now" take `today` explicitly so the same inputs
//! always produce the same output.

use chrono::NaiveDate;

use super::aggregator::{category_breakdown, filter_by_month, sum_by_type, top_category, total_balance};
use super::YearMonth;
use crate::models::{
    Budget, BudgetVariance, FinancialSummary, MonthlySummary, Transaction, TransactionType,
    TrendPoint,
};

/// Default number of months in a spending trend
pub const DEFAULT_TREND_MONTHS: u32 = 6;

/// Income, expenses and category breakdown for one month
pub fn monthly_summary(transactions: &[Transaction], month: u32, year: i32) -> MonthlySummary {
    let in_month = filter_by_month(transactions, month, year);

    let income = sum_by_type(in_month.iter().copied(), TransactionType::Income);
    let expenses = sum_by_type(in_month.iter().copied(), TransactionType::Expense);

    MonthlySummary {
        month,
        year,
        income,
        expenses,
        net_income: income - expenses,
        transaction_count: in_month.len(),
        category_breakdown: category_breakdown(in_month.iter().copied()),
    }
}

/// Expense totals for the `months_back` months ending at `today`'s month, oldest first
pub fn spending_trend(
    transactions: &[Transaction],
    months_back: u32,
    today: NaiveDate,
) -> Vec<TrendPoint> {
    let current = YearMonth::of(today);

    (0..months_back)
        .rev()
        .map(|offset| {
            let ym = current.back(offset);
            let in_month = filter_by_month(transactions, ym.month, ym.year);
            TrendPoint {
                month: ym.month,
                year: ym.year,
                expenses: sum_by_type(in_month.iter().copied(), TransactionType::Expense),
            }
        })
        .collect()
}

/// Each budget against this month's expenses in the same category
///
/// Budget `start_date`/`end_date` are not consulted; the comparison window is
/// always the calendar month containing `today`.
pub fn budget_vs_actual(
    budgets: &[Budget],
    transactions: &[Transaction],
    today: NaiveDate,
) -> Vec<BudgetVariance> {
    let current = YearMonth::of(today);
    let month_expenses: Vec<&Transaction> = filter_by_month(transactions, current.month, current.year)
        .into_iter()
        .filter(|t| t.is_expense())
        .collect();

    budgets
        .iter()
        .map(|budget| {
            let actual_amount: f64 = month_expenses
                .iter()
                .filter(|t| t.category_name.as_deref() == Some(budget.category_name.as_str()))
                .map(|t| t.amount)
                .sum();

            BudgetVariance {
                category: budget.category_name.clone(),
                budget_amount: budget.amount,
                actual_amount,
                difference: budget.amount - actual_amount,
                percentage_used: percentage_used(actual_amount, budget.amount),
            }
        })
        .collect()
}

/// `actual / budget * 100`, or `None` for a zero budget
fn percentage_used(actual: f64, budget: f64) -> Option<f64> {
    if budget == 0.0 {
        None
    } else {
        Some(actual / budget * 100.0)
    }
}

/// All-time balance plus this month's headline figures
pub fn financial_summary(transactions: &[Transaction], today: NaiveDate) -> FinancialSummary {
    let current = YearMonth::of(today);
    let in_month = filter_by_month(transactions, current.month, current.year);

    let monthly_income = sum_by_type(in_month.iter().copied(), TransactionType::Income);
    let monthly_expenses = sum_by_type(in_month.iter().copied(), TransactionType::Expense);
    let breakdown = category_breakdown(in_month.iter().copied());

    FinancialSummary {
        total_balance: total_balance(transactions),
        monthly_income,
        monthly_expenses,
        monthly_net_income: monthly_income - monthly_expenses,
        total_transactions: transactions.len(),
        monthly_transactions: in_month.len(),
        top_spending_category: top_category(&breakdown),
        category_breakdown: breakdown,
    }
}
