//! Service info and identity handlers

use axum::{Extension, Json};
use serde_json::{json, Value};

use crate::AuthUser;

/// GET / - Service description
pub async fn root() -> Json<Value> {
    Json(json!({
        "message": "InvestIQ API Server",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "me": "/api/me",
            "transactions": "/api/transactions",
            "budgets": "/api/budgets",
            "reports": "/api/reports",
            "ai": "/api/ai",
            "health": "/api/health"
        },
        "documentation": "This is the backend API for InvestIQ financial management application"
    }))
}

/// GET /api/health - Liveness probe (no auth)
pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "OK",
        "message": "InvestIQ API is running"
    }))
}

/// GET /api/me - The currently authenticated user
pub async fn get_me(Extension(user): Extension<AuthUser>) -> Json<AuthUser> {
    Json(user)
}
