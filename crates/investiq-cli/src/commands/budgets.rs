//! Budget command implementations

use anyhow::Result;
use investiq_core::db::Database;
use investiq_core::{AmountInput, BudgetInput};

use super::truncate;

pub fn cmd_budgets_list(db: &Database, user: &str) -> Result<()> {
    let budgets = db.list_budgets(user)?;

    if budgets.is_empty() {
        println!("No budgets found. Create one with:");
        println!("  investiq budgets add --category Food --amount 400");
        return Ok(());
    }

    println!();
    println!("💰 Budgets");
    println!("   ─────────────────────────────────────────────────────────────");

    for budget in budgets {
        let window = match (budget.start_date, budget.end_date) {
            (Some(start), Some(end)) => format!("{} → {}", start, end),
            (Some(start), None) => format!("from {}", start),
            (None, Some(end)) => format!("until {}", end),
            (None, None) => String::new(),
        };

        println!(
            "   [{}] {:<20} │ {:>10} │ {:<8} │ {}",
            budget.id,
            truncate(&budget.category_name, 20),
            format!("${:.2}", budget.amount),
            budget.period.as_deref().unwrap_or("-"),
            window
        );
    }

    Ok(())
}

pub fn cmd_budgets_add(
    db: &Database,
    user: &str,
    category: &str,
    amount: &str,
    period: Option<String>,
    start: Option<String>,
    end: Option<String>,
) -> Result<()> {
    let input = BudgetInput {
        category_name: Some(category.to_string()),
        amount: Some(AmountInput::Text(amount.to_string())),
        period,
        start_date: start,
        end_date: end,
    };
    let new_budget = input.validate()?;
    let budget = db.insert_budget(user, &new_budget)?;

    db.log_audit(
        user,
        "create",
        Some("budget"),
        Some(budget.id),
        Some(&format!(
            "category={}, amount={}",
            budget.category_name, budget.amount
        )),
    )?;

    println!(
        "✅ Budget of ${:.2} for {} created [id {}]",
        budget.amount, budget.category_name, budget.id
    );

    Ok(())
}

pub fn cmd_budgets_delete(db: &Database, user: &str, id: i64) -> Result<()> {
    if !db.delete_budget(user, id)? {
        anyhow::bail!("Budget {} not found", id);
    }

    db.log_audit(user, "delete", Some("budget"), Some(id), None)?;

    println!("🗑️  Budget {} deleted", id);

    Ok(())
}
