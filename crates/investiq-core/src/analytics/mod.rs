//! Aggregation and reporting over one user's records
//!
//! - `aggregator` - pure reductions (totals, month filter, category grouping)
//! - `reports` - composite reports built from the aggregator
//!
//! Callers hand in records already scoped to a single user. Nothing here
//! touches the database or checks ownership.

pub mod aggregator;
pub mod reports;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

pub use aggregator::{category_breakdown, filter_by_month, sum_by_type, top_category, total_balance};
pub use reports::{budget_vs_actual, financial_summary, monthly_summary, spending_trend};

/// A calendar month
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct YearMonth {
    pub year: i32,
    /// 1-12
    pub month: u32,
}

impl YearMonth {
    /// Returns `None` unless `month` is 1-12
    pub fn new(year: i32, month: u32) -> Option<Self> {
        (1..=12).contains(&month).then_some(Self { year, month })
    }

    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// `n` months earlier, rolling back across January
    pub fn back(self, n: u32) -> Self {
        let index = self.year as i64 * 12 + (self.month as i64 - 1) - n as i64;
        Self {
            year: index.div_euclid(12) as i32,
            month: index.rem_euclid(12) as u32 + 1,
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

impl std::fmt::Display for YearMonth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}
