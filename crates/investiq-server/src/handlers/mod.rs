//! HTTP request handlers organized by domain
//!
//! Each submodule contains handlers for a specific API area.

pub mod assistant;
pub mod auth;
pub mod budgets;
pub mod reports;
pub mod transactions;

// Re-export all handlers for use in router
pub use assistant::*;
pub use auth::*;
pub use budgets::*;
pub use reports::*;
pub use transactions::*;

use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::AppError;

/// Body of a successful delete
#[derive(Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// The server's local calendar date, used as "this month" by reports
pub(crate) fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Decode a JSON body, answering malformed input with a 400
pub(crate) fn parse_json<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, AppError> {
    serde_json::from_slice(bytes).map_err(|e| AppError::bad_request(&format!("Invalid JSON: {}", e)))
}
