//! Budget handlers

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};

use investiq_core::models::Budget;
use investiq_core::BudgetInput;

use super::{parse_json, MessageResponse};
use crate::{AppError, AppState, AuthUser};

/// GET /api/budgets - The caller's budgets, newest first
pub async fn list_budgets(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Vec<Budget>>, AppError> {
    let budgets = state.db.list_budgets(&user.user_id)?;

    state.db.log_audit(
        &user.user_id,
        "list",
        Some("budget"),
        None,
        Some(&format!("count={}", budgets.len())),
    )?;

    Ok(Json(budgets))
}

/// POST /api/budgets - Create a budget
pub async fn create_budget(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    body: Bytes,
) -> Result<(StatusCode, Json<Budget>), AppError> {
    let input: BudgetInput = parse_json(&body)?;
    let new_budget = input.validate()?;

    let budget = state.db.insert_budget(&user.user_id, &new_budget)?;

    state.db.log_audit(
        &user.user_id,
        "create",
        Some("budget"),
        Some(budget.id),
        Some(&format!(
            "category={}, amount={}",
            budget.category_name, budget.amount
        )),
    )?;

    Ok((StatusCode::CREATED, Json(budget)))
}

/// PUT /api/budgets/:id - Replace a budget
pub async fn update_budget(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<i64>,
    body: Bytes,
) -> Result<Json<Budget>, AppError> {
    let input: BudgetInput = parse_json(&body)?;
    let new_budget = input.validate()?;

    let budget = state
        .db
        .update_budget(&user.user_id, id, &new_budget)?
        .ok_or_else(|| AppError::not_found(&format!("Budget {} not found", id)))?;

    state
        .db
        .log_audit(&user.user_id, "update", Some("budget"), Some(id), None)?;

    Ok(Json(budget))
}

/// DELETE /api/budgets/:id - Delete a budget
pub async fn delete_budget(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<i64>,
) -> Result<Json<MessageResponse>, AppError> {
    if !state.db.delete_budget(&user.user_id, id)? {
        return Err(AppError::not_found(&format!("Budget {} not found", id)));
    }

    state
        .db
        .log_audit(&user.user_id, "delete", Some("budget"), Some(id), None)?;

    Ok(Json(MessageResponse {
        message: "Budget deleted successfully".to_string(),
    }))
}
