//! Transaction handlers

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use tracing::info;

use investiq_core::models::Transaction;
use investiq_core::TransactionInput;

use super::{parse_json, MessageResponse};
use crate::{AppError, AppState, AuthUser};

/// GET /api/transactions - The caller's transactions, newest first
pub async fn list_transactions(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Vec<Transaction>>, AppError> {
    let transactions = state.db.list_transactions(&user.user_id)?;

    state.db.log_audit(
        &user.user_id,
        "list",
        Some("transaction"),
        None,
        Some(&format!("count={}", transactions.len())),
    )?;

    Ok(Json(transactions))
}

/// POST /api/transactions - Create a transaction
pub async fn create_transaction(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    body: Bytes,
) -> Result<(StatusCode, Json<Transaction>), AppError> {
    let input: TransactionInput = parse_json(&body)?;
    let new_tx = input.validate()?;

    let tx = state.db.insert_transaction(&user.user_id, &new_tx)?;
    info!(user = %user.user_id, id = tx.id, kind = %tx.kind, "Transaction created");

    state.db.log_audit(
        &user.user_id,
        "create",
        Some("transaction"),
        Some(tx.id),
        Some(&format!("amount={}, type={}", tx.amount, tx.kind)),
    )?;

    Ok((StatusCode::CREATED, Json(tx)))
}

/// PUT /api/transactions/:id - Replace a transaction
pub async fn update_transaction(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<i64>,
    body: Bytes,
) -> Result<Json<Transaction>, AppError> {
    let input: TransactionInput = parse_json(&body)?;
    let new_tx = input.validate()?;

    let tx = state
        .db
        .update_transaction(&user.user_id, id, &new_tx)?
        .ok_or_else(|| AppError::not_found(&format!("Transaction {} not found", id)))?;

    state
        .db
        .log_audit(&user.user_id, "update", Some("transaction"), Some(id), None)?;

    Ok(Json(tx))
}

/// DELETE /api/transactions/:id - Delete a transaction
pub async fn delete_transaction(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<i64>,
) -> Result<Json<MessageResponse>, AppError> {
    if !state.db.delete_transaction(&user.user_id, id)? {
        return Err(AppError::not_found(&format!("Transaction {} not found", id)));
    }

    state
        .db
        .log_audit(&user.user_id, "delete", Some("transaction"), Some(id), None)?;

    Ok(Json(MessageResponse {
        message: "Transaction deleted successfully".to_string(),
    }))
}
