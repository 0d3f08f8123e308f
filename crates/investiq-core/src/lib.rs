//! InvestIQ Core Library
//!
//! Shared functionality for the InvestIQ personal finance backend:
//! - Record store (SQLite, optional SQLCipher encryption), scoped per user
//! - Ingestion validation for transaction and budget payloads
//! - Aggregation and reports (monthly summary, spending trend, budget vs actual)
//! - Rule-based assistant that templates a user's figures into advice

pub mod analytics;
pub mod assistant;
pub mod db;
pub mod error;
pub mod models;
pub mod validate;

pub use analytics::YearMonth;
pub use assistant::{FinancialSnapshot, Topic};
pub use db::{AuditEntry, Database};
pub use error::{Error, Result};
pub use validate::{AmountInput, BudgetInput, TransactionInput};
