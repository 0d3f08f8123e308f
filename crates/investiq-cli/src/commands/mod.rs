//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `assistant` - Keyword-matched financial advice (ask)
//! - `budgets` - Budget commands (list, add, delete)
//! - `core` - Core commands (init) and shared utilities (open_db)
//! - `reports` - Report generation commands
//! - `serve` - Web server command
//! - `token` - Development token minting
//! - `transactions` - Transaction commands (list, add, delete)

pub mod assistant;
pub mod budgets;
pub mod core;
pub mod reports;
pub mod serve;
pub mod token;
pub mod transactions;

// Re-export command functions for main.rs
pub use assistant::*;
pub use budgets::*;
pub use core::*;
pub use reports::*;
pub use serve::*;
pub use token::*;
pub use transactions::*;

/// Truncate a string to a maximum length, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Today in local time; the reports' notion of "current month"
pub fn today() -> chrono::NaiveDate {
    chrono::Local::now().date_naive()
}
