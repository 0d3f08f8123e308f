//! Server API tests

use super::*;
use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use chrono::Datelike;
use http_body_util::BodyExt;
use investiq_core::db::Database;
use serde_json::{json, Value};
use tower::ServiceExt;

const SECRET: &str = "test-signing-secret";

fn setup_test_app() -> Router {
    let db = Database::in_memory().unwrap();
    let config = ServerConfig {
        require_auth: false,
        allowed_origins: vec![],
        ..Default::default()
    };
    create_router(db, config)
}

fn auth_config() -> ServerConfig {
    ServerConfig {
        require_auth: true,
        allowed_origins: vec![],
        jwt: JwtConfig {
            secret: Some(SECRET.to_string()),
            ..Default::default()
        },
    }
}

fn setup_auth_app() -> Router {
    create_router(Database::in_memory().unwrap(), auth_config())
}

fn token_for(user: &str) -> String {
    auth::issue_token(user, Some(&format!("{}@example.com", user)), 3600, &auth_config().jwt)
        .unwrap()
}

/// First day of the server's current month, as the handlers see it
fn this_month(day: u32) -> String {
    let today = chrono::Local::now().date_naive();
    today.with_day(day).unwrap().to_string()
}

async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> axum::response::Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(serde_json::to_string(&json).unwrap())
        }
        None => Body::empty(),
    };

    app.clone().oneshot(builder.body(body).unwrap()).await.unwrap()
}

async fn get_body_json(response: axum::response::Response) -> Value {
    let body = response.into_body();
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ========== Service Info ==========

#[tokio::test]
async fn test_root_info() {
    let app = setup_auth_app();

    let response = send(&app, "GET", "/", None, None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert_eq!(json["message"], "InvestIQ API Server");
    assert_eq!(json["endpoints"]["transactions"], "/api/transactions");
}

#[tokio::test]
async fn test_health_needs_no_token() {
    let app = setup_auth_app();

    let response = send(&app, "GET", "/api/health", None, None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert_eq!(json["status"], "OK");
}

#[tokio::test]
async fn test_security_headers() {
    let app = setup_test_app();

    let response = send(&app, "GET", "/api/health", None, None).await;
    let headers = response.headers();
    assert_eq!(headers.get("x-content-type-options").unwrap(), "nosniff");
    assert_eq!(headers.get("x-frame-options").unwrap(), "DENY");
    assert_eq!(headers.get("x-xss-protection").unwrap(), "1; mode=block");
}

// ========== Authentication ==========

#[tokio::test]
async fn test_missing_token_is_401() {
    let app = setup_auth_app();

    let response = send(&app, "GET", "/api/transactions", None, None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let json = get_body_json(response).await;
    assert_eq!(json["error"], "Access token required");
}

#[tokio::test]
async fn test_invalid_token_is_403() {
    let app = setup_auth_app();

    let response = send(&app, "GET", "/api/transactions", Some("not-a-jwt"), None).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let json = get_body_json(response).await;
    assert_eq!(json["error"], "Invalid token");
}

#[tokio::test]
async fn test_token_signed_with_other_secret_is_403() {
    let app = setup_auth_app();
    let other = JwtConfig {
        secret: Some("someone-elses-secret".to_string()),
        ..Default::default()
    };
    let token = auth::issue_token("mallory", None, 3600, &other).unwrap();

    let response = send(&app, "GET", "/api/me", Some(&token), None).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_me_with_valid_token() {
    let app = setup_auth_app();
    let token = token_for("alice");

    let response = send(&app, "GET", "/api/me", Some(&token), None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert_eq!(json["user_id"], "alice");
    assert_eq!(json["email"], "alice@example.com");
    assert_eq!(json["auth_method"], "jwt");
}

#[tokio::test]
async fn test_me_without_auth_is_local_dev() {
    let app = setup_test_app();

    let response = send(&app, "GET", "/api/me", None, None).await;
    let json = get_body_json(response).await;
    assert_eq!(json["user_id"], "local-dev");
    assert_eq!(json["auth_method"], "none");
}

// ========== Transactions ==========

#[tokio::test]
async fn test_transaction_lifecycle() {
    let app = setup_test_app();

    let response = send(
        &app,
        "POST",
        "/api/transactions",
        None,
        Some(json!({
            "amount": "42.50",
            "type": "expense",
            "category_name": "Food",
            "transaction_date": "2024-03-15",
            "description": "Groceries"
        })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = get_body_json(response).await;
    assert_eq!(created["amount"], 42.5);
    assert_eq!(created["type"], "expense");
    assert_eq!(created["user_id"], "local-dev");
    assert_eq!(created["transaction_date"], "2024-03-15");
    let id = created["id"].as_i64().unwrap();

    let response = send(
        &app,
        "PUT",
        &format!("/api/transactions/{}", id),
        None,
        Some(json!({
            "amount": 50,
            "type": "expense",
            "category_name": "Dining",
            "transaction_date": "2024-03-16"
        })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let updated = get_body_json(response).await;
    assert_eq!(updated["category_name"], "Dining");
    assert!(updated["description"].is_null());

    let response = send(&app, "GET", "/api/transactions", None, None).await;
    let list = get_body_json(response).await;
    assert_eq!(list.as_array().unwrap().len(), 1);

    let response = send(&app, "DELETE", &format!("/api/transactions/{}", id), None, None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = get_body_json(response).await;
    assert_eq!(json["message"], "Transaction deleted successfully");

    let response = send(&app, "DELETE", &format!("/api/transactions/{}", id), None, None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_transaction_validation() {
    let app = setup_test_app();

    let response = send(
        &app,
        "POST",
        "/api/transactions",
        None,
        Some(json!({"amount": "lots", "type": "expense", "transaction_date": "2024-03-15"})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = get_body_json(response).await;
    assert!(json["error"].as_str().unwrap().contains("amount"));

    let response = send(
        &app,
        "POST",
        "/api/transactions",
        None,
        Some(json!({"amount": 5, "type": "transfer", "transaction_date": "2024-03-15"})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let request = Request::builder()
        .method("POST")
        .uri("/api/transactions")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = get_body_json(response).await;
    assert!(json["error"].as_str().unwrap().starts_with("Invalid JSON"));
}

#[tokio::test]
async fn test_users_cannot_touch_each_others_records() {
    let app = setup_auth_app();
    let alice = token_for("alice");
    let bob = token_for("bob");

    let response = send(
        &app,
        "POST",
        "/api/transactions",
        Some(&alice),
        Some(json!({"amount": 10, "type": "income", "transaction_date": "2024-01-01"})),
    )
    .await;
    let id = get_body_json(response).await["id"].as_i64().unwrap();

    let response = send(&app, "GET", "/api/transactions", Some(&bob), None).await;
    assert_eq!(get_body_json(response).await, json!([]));

    let response = send(
        &app,
        "PUT",
        &format!("/api/transactions/{}", id),
        Some(&bob),
        Some(json!({"amount": 0, "type": "income", "transaction_date": "2024-01-01"})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = send(&app, "DELETE", &format!("/api/transactions/{}", id), Some(&bob), None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = send(&app, "GET", "/api/transactions", Some(&alice), None).await;
    let list = get_body_json(response).await;
    assert_eq!(list[0]["amount"], 10.0);
}

// ========== Budgets ==========

#[tokio::test]
async fn test_budget_lifecycle() {
    let app = setup_test_app();

    let response = send(
        &app,
        "POST",
        "/api/budgets",
        None,
        Some(json!({"category_name": "Food", "amount": 200, "period": "monthly"})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = get_body_json(response).await;
    assert_eq!(created["category_name"], "Food");
    let id = created["id"].as_i64().unwrap();

    let response = send(
        &app,
        "PUT",
        &format!("/api/budgets/{}", id),
        None,
        Some(json!({"category_name": "Food", "amount": "250"})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(get_body_json(response).await["amount"], 250.0);

    let response = send(&app, "DELETE", &format!("/api/budgets/{}", id), None, None).await;
    let json = get_body_json(response).await;
    assert_eq!(json["message"], "Budget deleted successfully");

    let response = send(
        &app,
        "PUT",
        &format!("/api/budgets/{}", id),
        None,
        Some(json!({"category_name": "Food", "amount": 1})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_budget_requires_category() {
    let app = setup_test_app();

    let response = send(&app, "POST", "/api/budgets", None, Some(json!({"amount": 10}))).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ========== Reports ==========

async fn seed_current_month(app: &Router) {
    for body in [
        json!({"amount": 3000, "type": "income", "category_name": "Salary", "transaction_date": this_month(1)}),
        json!({"amount": 50, "type": "expense", "category_name": "Food", "transaction_date": this_month(1)}),
        json!({"amount": 30, "type": "expense", "category_name": "Food", "transaction_date": this_month(2)}),
        json!({"amount": 900, "type": "expense", "category_name": "Rent", "transaction_date": this_month(1)}),
    ] {
        let response = send(app, "POST", "/api/transactions", None, Some(body)).await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }
    for body in [
        json!({"category_name": "Food", "amount": 200}),
        json!({"category_name": "Gifts", "amount": 0}),
    ] {
        send(app, "POST", "/api/budgets", None, Some(body)).await;
    }
}

#[tokio::test]
async fn test_monthly_summary_explicit_month() {
    let app = setup_test_app();
    send(
        &app,
        "POST",
        "/api/transactions",
        None,
        Some(json!({"amount": 12, "type": "expense", "transaction_date": "2023-02-10"})),
    )
    .await;

    let response = send(&app, "GET", "/api/reports/monthly-summary?month=2&year=2023", None, None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert_eq!(json["month"], 2);
    assert_eq!(json["year"], 2023);
    assert_eq!(json["expenses"], 12.0);
    assert_eq!(json["netIncome"], -12.0);
    assert_eq!(json["transactionCount"], 1);
    assert_eq!(json["categoryBreakdown"]["Uncategorized"], 12.0);
}

#[tokio::test]
async fn test_monthly_summary_defaults_to_current_month() {
    let app = setup_test_app();
    seed_current_month(&app).await;

    let response = send(&app, "GET", "/api/reports/monthly-summary", None, None).await;
    let json = get_body_json(response).await;
    assert_eq!(json["income"], 3000.0);
    assert_eq!(json["expenses"], 980.0);
    assert_eq!(json["categoryBreakdown"]["Food"], 80.0);
}

#[tokio::test]
async fn test_monthly_summary_rejects_bad_month() {
    let app = setup_test_app();

    let response = send(&app, "GET", "/api/reports/monthly-summary?month=13&year=2024", None, None).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = send(&app, "GET", "/api/reports/monthly-summary?month=may", None, None).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = get_body_json(response).await;
    assert!(json["error"].as_str().unwrap().contains("month"));
}

#[tokio::test]
async fn test_spending_trends() {
    let app = setup_test_app();
    seed_current_month(&app).await;

    let response = send(&app, "GET", "/api/reports/spending-trends", None, None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = get_body_json(response).await;
    let points = json.as_array().unwrap();
    assert_eq!(points.len(), 6);

    let today = chrono::Local::now().date_naive();
    let last = points.last().unwrap();
    assert_eq!(last["month"], today.month());
    assert_eq!(last["year"], today.year());
    assert_eq!(last["expenses"], 980.0);

    let response = send(&app, "GET", "/api/reports/spending-trends?months=2", None, None).await;
    assert_eq!(get_body_json(response).await.as_array().unwrap().len(), 2);

    for bad in ["0", "121", "-3", "six"] {
        let uri = format!("/api/reports/spending-trends?months={}", bad);
        let response = send(&app, "GET", &uri, None, None).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "months={}", bad);
    }
}

#[tokio::test]
async fn test_budget_vs_actual() {
    let app = setup_test_app();
    seed_current_month(&app).await;

    let response = send(&app, "GET", "/api/reports/budget-vs-actual", None, None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = get_body_json(response).await;
    let rows = json.as_array().unwrap();
    assert_eq!(rows.len(), 2);

    let food = rows.iter().find(|r| r["category"] == "Food").unwrap();
    assert_eq!(food["budgetAmount"], 200.0);
    assert_eq!(food["actualAmount"], 80.0);
    assert_eq!(food["difference"], 120.0);
    assert_eq!(food["percentageUsed"], 40.0);

    let gifts = rows.iter().find(|r| r["category"] == "Gifts").unwrap();
    assert!(gifts["percentageUsed"].is_null());
}

// ========== Assistant ==========

#[tokio::test]
async fn test_insights_budget_prompt() {
    let app = setup_test_app();
    seed_current_month(&app).await;

    let response = send(
        &app,
        "POST",
        "/api/ai/insights",
        None,
        Some(json!({"message": "What's my budget look like?"})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    let text = json["response"].as_str().unwrap();
    assert!(text.starts_with("Your current savings rate is 67.3% this month"));
    assert!(json["timestamp"].as_str().unwrap().ends_with('Z'));
}

#[tokio::test]
async fn test_insights_requires_message() {
    let app = setup_test_app();

    let response = send(&app, "POST", "/api/ai/insights", None, Some(json!({}))).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(get_body_json(response).await["error"], "message is required");
}

#[tokio::test]
async fn test_financial_summary() {
    let app = setup_test_app();
    seed_current_month(&app).await;
    send(
        &app,
        "POST",
        "/api/transactions",
        None,
        Some(json!({"amount": 500, "type": "income", "transaction_date": "2001-01-01"})),
    )
    .await;

    let response = send(&app, "GET", "/api/ai/financial-summary", None, None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert_eq!(json["totalBalance"], 2520.0);
    assert_eq!(json["monthlyIncome"], 3000.0);
    assert_eq!(json["monthlyExpenses"], 980.0);
    assert_eq!(json["monthlyNetIncome"], 2020.0);
    assert_eq!(json["totalTransactions"], 5);
    assert_eq!(json["monthlyTransactions"], 4);
    assert_eq!(json["topSpendingCategory"]["name"], "Rent");
    assert_eq!(json["categoryBreakdown"]["Food"], 80.0);
}

// ========== Error mapping ==========

#[test]
fn test_core_errors_map_to_client_statuses() {
    let err: AppError = investiq_core::Error::validation("amount is required").into();
    assert_eq!(err.status(), StatusCode::BAD_REQUEST);

    let err: AppError = investiq_core::Error::NotFound("budget 3".to_string()).into();
    assert_eq!(err.status(), StatusCode::NOT_FOUND);

    let err: AppError = investiq_core::Error::Encryption("bad key".to_string()).into();
    assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
}
