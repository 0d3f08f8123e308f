//! Report handlers

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Extension, Json,
};
use chrono::Datelike;
use serde::Deserialize;

use investiq_core::analytics::{self, reports::DEFAULT_TREND_MONTHS};
use investiq_core::models::{BudgetVariance, MonthlySummary, TrendPoint};
use investiq_core::YearMonth;

use super::today;
use crate::{AppError, AppState, AuthUser};

/// Longest trend window the API will compute (ten years)
pub const MAX_TREND_MONTHS: u32 = 120;

/// Query parameters for the monthly summary
///
/// Kept as strings so a malformed value gets a JSON 400 rather than the
/// extractor's plain-text rejection.
#[derive(Debug, Deserialize)]
pub struct MonthlySummaryQuery {
    pub month: Option<String>,
    pub year: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TrendQuery {
    pub months: Option<String>,
}

fn parse_param<T: std::str::FromStr>(name: &str, value: Option<&str>) -> Result<Option<T>, AppError> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        Some(v) => v
            .parse()
            .map(Some)
            .map_err(|_| AppError::bad_request(&format!("Invalid {}: {}", name, v))),
        None => Ok(None),
    }
}

/// GET /api/reports/monthly-summary?month=&year= - Defaults to the current month
pub async fn get_monthly_summary(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Query(params): Query<MonthlySummaryQuery>,
) -> Result<Json<MonthlySummary>, AppError> {
    let now = today();
    let month: u32 = parse_param("month", params.month.as_deref())?.unwrap_or(now.month());
    let year: i32 = parse_param("year", params.year.as_deref())?.unwrap_or(now.year());

    let target = YearMonth::new(year, month)
        .ok_or_else(|| AppError::bad_request("month must be between 1 and 12"))?;

    let transactions = state
        .db
        .list_transactions_in_month(&user.user_id, target.month, target.year)?;
    let summary = analytics::monthly_summary(&transactions, target.month, target.year);

    state.db.log_audit(
        &user.user_id,
        "report",
        Some("monthly_summary"),
        None,
        Some(&target.to_string()),
    )?;

    Ok(Json(summary))
}

/// GET /api/reports/spending-trends?months=6 - Expenses per month, oldest first
pub async fn get_spending_trends(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Query(params): Query<TrendQuery>,
) -> Result<Json<Vec<TrendPoint>>, AppError> {
    let months: u32 =
        parse_param("months", params.months.as_deref())?.unwrap_or(DEFAULT_TREND_MONTHS);
    if !(1..=MAX_TREND_MONTHS).contains(&months) {
        return Err(AppError::bad_request(&format!(
            "months must be between 1 and {}",
            MAX_TREND_MONTHS
        )));
    }

    let transactions = state.db.list_transactions(&user.user_id)?;
    let trend = analytics::spending_trend(&transactions, months, today());

    state.db.log_audit(
        &user.user_id,
        "report",
        Some("spending_trends"),
        None,
        Some(&format!("months={}", months)),
    )?;

    Ok(Json(trend))
}

/// GET /api/reports/budget-vs-actual - Each budget against this month's spending
pub async fn get_budget_vs_actual(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Vec<BudgetVariance>>, AppError> {
    let now = today();
    let budgets = state.db.list_budgets(&user.user_id)?;
    let transactions = state
        .db
        .list_transactions_in_month(&user.user_id, now.month(), now.year())?;

    let report = analytics::budget_vs_actual(&budgets, &transactions, now);

    state.db.log_audit(
        &user.user_id,
        "report",
        Some("budget_vs_actual"),
        None,
        Some(&format!("budgets={}", budgets.len())),
    )?;

    Ok(Json(report))
}
