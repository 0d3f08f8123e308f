//! Assistant handlers

use std::sync::Arc;

use axum::{body::Bytes, extract::State, Extension, Json};
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use investiq_core::analytics;
use investiq_core::assistant::{self, FinancialSnapshot};
use investiq_core::models::FinancialSummary;

use super::{parse_json, today};
use crate::{AppError, AppState, AuthUser};

#[derive(Debug, Deserialize)]
pub struct InsightsRequest {
    pub message: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct InsightsResponse {
    pub response: String,
    /// Generation time; the only field that differs between identical requests
    pub timestamp: String,
}

/// POST /api/ai/insights - Canned advice for a free-text prompt
pub async fn post_insights(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    body: Bytes,
) -> Result<Json<InsightsResponse>, AppError> {
    let req: InsightsRequest = parse_json(&body)?;
    let message = req
        .message
        .ok_or_else(|| AppError::bad_request("message is required"))?;

    let transactions = state.db.list_transactions(&user.user_id)?;
    let budgets = state.db.list_budgets(&user.user_id)?;
    let snapshot = FinancialSnapshot::new(&transactions, &budgets);

    let topic = assistant::select_topic(&message);
    let response = assistant::respond(&message, &snapshot, today());

    state.db.log_audit(
        &user.user_id,
        "ask",
        Some("assistant"),
        None,
        Some(&format!("topic={}", topic)),
    )?;

    Ok(Json(InsightsResponse {
        response,
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    }))
}

/// GET /api/ai/financial-summary - Headline figures for the current month
pub async fn get_financial_summary(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<FinancialSummary>, AppError> {
    let transactions = state.db.list_transactions(&user.user_id)?;
    let summary = analytics::financial_summary(&transactions, today());

    state.db.log_audit(
        &user.user_id,
        "report",
        Some("financial_summary"),
        None,
        None,
    )?;

    Ok(Json(summary))
}
