//! Report command implementations

use anyhow::{anyhow, Result};
use chrono::Datelike;
use investiq_core::analytics;
use investiq_core::assistant::format_money;
use investiq_core::db::Database;
use investiq_core::YearMonth;

use super::{today, truncate};

pub fn cmd_report_summary(
    db: &Database,
    user: &str,
    month: Option<u32>,
    year: Option<i32>,
    json: bool,
) -> Result<()> {
    let now = today();
    let target = YearMonth::new(year.unwrap_or(now.year()), month.unwrap_or(now.month()))
        .ok_or_else(|| anyhow!("Month must be between 1 and 12"))?;

    let transactions = db.list_transactions_in_month(user, target.month, target.year)?;
    let summary = analytics::monthly_summary(&transactions, target.month, target.year);

    db.log_audit(
        user,
        "report",
        Some("monthly_summary"),
        None,
        Some(&target.to_string()),
    )?;

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!();
    println!("📊 Monthly Summary: {}", target);
    println!("   ─────────────────────────────────────────");
    println!("   Income:       ${:>12}", format_money(summary.income));
    println!("   Expenses:     ${:>12}", format_money(summary.expenses));
    println!("   Net:          ${:>12}", format_money(summary.net_income));
    println!("   Transactions: {:>13}", summary.transaction_count);

    if !summary.category_breakdown.is_empty() {
        println!();
        println!("   By category (expenses):");
        for (category, amount) in summary.category_breakdown.iter() {
            println!("     {:<20} ${:>12}", truncate(category, 20), format_money(amount));
        }
    }

    Ok(())
}

pub fn cmd_report_trends(db: &Database, user: &str, months: u32, json: bool) -> Result<()> {
    if months == 0 {
        anyhow::bail!("--months must be at least 1");
    }

    let transactions = db.list_transactions(user)?;
    let trend = analytics::spending_trend(&transactions, months, today());

    db.log_audit(
        user,
        "report",
        Some("spending_trends"),
        None,
        Some(&format!("months={}", months)),
    )?;

    if json {
        println!("{}", serde_json::to_string_pretty(&trend)?);
        return Ok(());
    }

    let max = trend.iter().map(|p| p.expenses).fold(0.0_f64, f64::max);

    println!();
    println!("📈 Spending Trend (last {} months)", months);
    println!("   ─────────────────────────────────────────");
    for point in &trend {
        let bar_len = if max > 0.0 {
            ((point.expenses / max) * 30.0).round() as usize
        } else {
            0
        };
        println!(
            "   {}-{:02} │ ${:>12} │ {}",
            point.year,
            point.month,
            format_money(point.expenses),
            "█".repeat(bar_len)
        );
    }

    Ok(())
}

pub fn cmd_report_budget(db: &Database, user: &str, json: bool) -> Result<()> {
    let now = today();
    let budgets = db.list_budgets(user)?;
    let transactions = db.list_transactions_in_month(user, now.month(), now.year())?;
    let report = analytics::budget_vs_actual(&budgets, &transactions, now);

    db.log_audit(
        user,
        "report",
        Some("budget_vs_actual"),
        None,
        Some(&format!("budgets={}", budgets.len())),
    )?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    if report.is_empty() {
        println!("No budgets found. Create one with:");
        println!("  investiq budgets add --category Food --amount 400");
        return Ok(());
    }

    println!();
    println!("🎯 Budget vs Actual: {}", YearMonth::of(now));
    println!("   ─────────────────────────────────────────────────────────────");
    for row in &report {
        let used = match row.percentage_used {
            Some(pct) => format!("{:.1}%", pct),
            None => "n/a".to_string(),
        };
        let marker = if row.difference < 0.0 { "⚠️ " } else { "✅" };
        println!(
            "   {} {:<18} │ ${:>10} of ${:>10} │ {:>7}",
            marker,
            truncate(&row.category, 18),
            format_money(row.actual_amount),
            format_money(row.budget_amount),
            used
        );
    }

    Ok(())
}
