//! Transaction command implementations

use anyhow::Result;
use investiq_core::db::Database;
use investiq_core::models::TransactionType;
use investiq_core::{AmountInput, TransactionInput};

use super::truncate;

pub fn cmd_transactions_list(db: &Database, user: &str, limit: usize) -> Result<()> {
    let transactions = db.list_transactions(user)?;

    if transactions.is_empty() {
        println!("No transactions found. Record one with:");
        println!("  investiq transactions add --amount 12.50 --type expense --date 2024-03-01");
        return Ok(());
    }

    println!();
    println!("📝 Recent Transactions ({} total)", transactions.len());
    println!("   ─────────────────────────────────────────────────────────────");

    for tx in transactions.iter().take(limit) {
        let amount_str = match tx.kind {
            TransactionType::Expense => format!("\x1b[31m-${:.2}\x1b[0m", tx.amount), // Red
            TransactionType::Income => format!("\x1b[32m+${:.2}\x1b[0m", tx.amount),  // Green
        };

        println!(
            "   [{}] {} │ {:>10} │ {:<15} │ {}",
            tx.id,
            tx.transaction_date,
            amount_str,
            truncate(tx.category_label(), 15),
            truncate(tx.description.as_deref().unwrap_or(""), 35)
        );
    }

    Ok(())
}

pub fn cmd_transactions_add(
    db: &Database,
    user: &str,
    amount: &str,
    kind: &str,
    category: Option<String>,
    date: String,
    description: Option<String>,
) -> Result<()> {
    let input = TransactionInput {
        amount: Some(AmountInput::Text(amount.to_string())),
        description,
        category_name: category,
        transaction_date: Some(date),
        kind: Some(kind.to_string()),
    };
    let new_tx = input.validate()?;
    let tx = db.insert_transaction(user, &new_tx)?;

    db.log_audit(
        user,
        "create",
        Some("transaction"),
        Some(tx.id),
        Some(&format!("type={}, amount={}", tx.kind, tx.amount)),
    )?;

    println!(
        "✅ Recorded {} of ${:.2} ({}) on {} [id {}]",
        tx.kind,
        tx.amount,
        tx.category_label(),
        tx.transaction_date,
        tx.id
    );

    Ok(())
}

pub fn cmd_transactions_delete(db: &Database, user: &str, id: i64) -> Result<()> {
    if !db.delete_transaction(user, id)? {
        anyhow::bail!("Transaction {} not found", id);
    }

    db.log_audit(user, "delete", Some("transaction"), Some(id), None)?;

    println!("🗑️  Transaction {} deleted", id);

    Ok(())
}
