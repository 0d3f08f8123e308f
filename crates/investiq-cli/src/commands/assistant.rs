//! Assistant command implementation

use anyhow::Result;
use investiq_core::assistant::{self, FinancialSnapshot};
use investiq_core::db::Database;

use super::today;

pub fn cmd_ask(db: &Database, user: &str, prompt: &str) -> Result<()> {
    if prompt.trim().is_empty() {
        anyhow::bail!("Prompt must not be empty");
    }

    let transactions = db.list_transactions(user)?;
    let budgets = db.list_budgets(user)?;
    let snapshot = FinancialSnapshot::new(&transactions, &budgets);

    let topic = assistant::select_topic(prompt);
    let response = assistant::respond(prompt, &snapshot, today());

    db.log_audit(
        user,
        "ask",
        Some("assistant"),
        None,
        Some(&format!("topic={}", topic)),
    )?;

    println!("{}", response);

    Ok(())
}
