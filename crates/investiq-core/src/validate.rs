//! Ingestion-boundary validation
//!
//! Request bodies arrive loosely typed (the `amount` may be a JSON number or a
//! numeric string, dates are strings). Everything is checked here so the
//! analytics code only ever sees well-formed numbers and dates.

use chrono::NaiveDate;
use serde::Deserialize;

use crate::error::{Error, Result};
use crate::models::{NewBudget, NewTransaction, TransactionType};

/// An amount as sent by clients: `12.5` or `"12.50"`
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum AmountInput {
    Number(f64),
    Text(String),
}

impl From<f64> for AmountInput {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

/// Request body for creating or replacing a transaction
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TransactionInput {
    pub amount: Option<AmountInput>,
    pub description: Option<String>,
    pub category_name: Option<String>,
    pub transaction_date: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

/// Request body for creating or replacing a budget
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BudgetInput {
    pub category_name: Option<String>,
    pub amount: Option<AmountInput>,
    pub period: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

/// Parse a non-negative, finite amount
pub fn parse_amount(field: &str, input: &AmountInput) -> Result<f64> {
    let value = match input {
        AmountInput::Number(n) => *n,
        AmountInput::Text(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| Error::validation(format!("{} must be numeric, got {:?}", field, s)))?,
    };

    if !value.is_finite() {
        return Err(Error::validation(format!("{} must be a finite number", field)));
    }
    if value < 0.0 {
        return Err(Error::validation(format!("{} must not be negative", field)));
    }
    Ok(value)
}

/// Parse a calendar date (`YYYY-MM-DD`, or an RFC 3339 timestamp whose date part is used)
pub fn parse_date(field: &str, input: &str) -> Result<NaiveDate> {
    let trimmed = input.trim();
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .or_else(|_| {
            chrono::DateTime::parse_from_rfc3339(trimmed).map(|dt| dt.date_naive())
        })
        .map_err(|_| {
            Error::validation(format!(
                "{} has invalid date {:?} (use YYYY-MM-DD)",
                field, input
            ))
        })
}

/// Trim optional free text, treating blank as absent
fn normalize_text(input: Option<String>) -> Option<String> {
    input
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn parse_optional_date(field: &str, input: Option<&str>) -> Result<Option<NaiveDate>> {
    match input.map(str::trim).filter(|s| !s.is_empty()) {
        Some(s) => parse_date(field, s).map(Some),
        None => Ok(None),
    }
}

impl TransactionInput {
    /// Validate into a storable transaction
    pub fn validate(self) -> Result<NewTransaction> {
        let amount = self
            .amount
            .as_ref()
            .ok_or_else(|| Error::validation("amount is required"))
            .and_then(|a| parse_amount("amount", a))?;

        let kind: TransactionType = self
            .kind
            .as_deref()
            .ok_or_else(|| Error::validation("type is required"))?
            .parse()
            .map_err(Error::Validation)?;

        let transaction_date = self
            .transaction_date
            .as_deref()
            .ok_or_else(|| Error::validation("transaction_date is required"))
            .and_then(|d| parse_date("transaction_date", d))?;

        Ok(NewTransaction {
            amount,
            kind,
            category_name: normalize_text(self.category_name),
            transaction_date,
            description: normalize_text(self.description),
        })
    }
}

impl BudgetInput {
    /// Validate into a storable budget
    pub fn validate(self) -> Result<NewBudget> {
        let category_name = normalize_text(self.category_name)
            .ok_or_else(|| Error::validation("category_name is required"))?;

        let amount = self
            .amount
            .as_ref()
            .ok_or_else(|| Error::validation("amount is required"))
            .and_then(|a| parse_amount("amount", a))?;

        let start_date = parse_optional_date("start_date", self.start_date.as_deref())?;
        let end_date = parse_optional_date("end_date", self.end_date.as_deref())?;

        if let (Some(start), Some(end)) = (start_date, end_date) {
            if end < start {
                return Err(Error::validation("end_date must not be before start_date"));
            }
        }

        Ok(NewBudget {
            category_name,
            amount,
            period: normalize_text(self.period),
            start_date,
            end_date,
        })
    }
}
