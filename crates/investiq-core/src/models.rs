//! Domain models for InvestIQ

use chrono::{DateTime, NaiveDate, Utc};
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

/// Label used for expense records without a category
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Direction of a transaction's money flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }

    /// Sign applied to an amount when computing a balance
    pub fn sign(&self) -> f64 {
        match self {
            Self::Income => 1.0,
            Self::Expense => -1.0,
        }
    }
}

impl std::str::FromStr for TransactionType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            _ => Err(format!("Unknown transaction type: {} (valid: income, expense)", s)),
        }
    }
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A financial event owned by one user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub user_id: String,
    /// Non-negative magnitude; direction lives in `kind`
    pub amount: f64,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub category_name: Option<String>,
    pub transaction_date: NaiveDate,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Transaction {
    /// Category label used for grouping ("Uncategorized" when missing or empty)
    pub fn category_label(&self) -> &str {
        match self.category_name.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => UNCATEGORIZED,
        }
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionType::Expense
    }
}

/// A validated transaction ready for insertion (or full replacement)
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    pub amount: f64,
    pub kind: TransactionType,
    pub category_name: Option<String>,
    pub transaction_date: NaiveDate,
    pub description: Option<String>,
}

/// A spending ceiling for one category
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Budget {
    pub id: i64,
    pub user_id: String,
    pub category_name: String,
    pub amount: f64,
    /// Caller-defined cadence label, opaque to reporting
    pub period: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A validated budget ready for insertion (or full replacement)
#[derive(Debug, Clone, PartialEq)]
pub struct NewBudget {
    pub category_name: String,
    pub amount: f64,
    pub period: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

// ============================================================================
// Report shapes
// ============================================================================

/// Expense totals per category, in order of first appearance
///
/// Serializes as a JSON object whose keys keep that order, so repeated
/// reports over the same records are byte-identical.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryBreakdown {
    entries: Vec<(String, f64)>,
}

impl CategoryBreakdown {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `amount` to `category`, appending the category if unseen
    pub fn add(&mut self, category: &str, amount: f64) {
        match self.entries.iter_mut().find(|(name, _)| name == category) {
            Some((_, total)) => *total += amount,
            None => self.entries.push((category.to_string(), amount)),
        }
    }

    pub fn get(&self, category: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(name, _)| name == category)
            .map(|(_, amount)| *amount)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|(name, amount)| (name.as_str(), *amount))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for CategoryBreakdown {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, amount) in &self.entries {
            map.serialize_entry(name, amount)?;
        }
        map.end()
    }
}

/// Highest-spend category
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopCategory {
    pub name: String,
    pub amount: f64,
}

/// Income/expense totals for one calendar month
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlySummary {
    pub month: u32,
    pub year: i32,
    pub income: f64,
    pub expenses: f64,
    pub net_income: f64,
    pub transaction_count: usize,
    pub category_breakdown: CategoryBreakdown,
}

/// One month of a spending trend series
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendPoint {
    pub month: u32,
    pub year: i32,
    pub expenses: f64,
}

/// Budget compared with the current month's spending in its category
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetVariance {
    pub category: String,
    pub budget_amount: f64,
    pub actual_amount: f64,
    pub difference: f64,
    /// `None` (JSON `null`) when the budget amount is zero: there is no
    /// ceiling to measure usage against.
    pub percentage_used: Option<f64>,
}

/// Headline figures for the assistant and dashboard
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialSummary {
    pub total_balance: f64,
    pub monthly_income: f64,
    pub monthly_expenses: f64,
    pub monthly_net_income: f64,
    pub total_transactions: usize,
    pub monthly_transactions: usize,
    pub top_spending_category: Option<TopCategory>,
    pub category_breakdown: CategoryBreakdown,
}
