//! CLI command tests
//!
//! This module contains all tests for the CLI commands.

use chrono::Datelike;
use investiq_core::db::Database;
use investiq_core::models::TransactionType;
use investiq_server::{auth, JwtConfig};

use crate::commands::{self, truncate};

fn setup_test_db() -> Database {
    Database::in_memory().unwrap()
}

/// First day of the current month as YYYY-MM-DD
fn this_month() -> String {
    let now = commands::today();
    format!("{}-{:02}-01", now.year(), now.month())
}

fn test_jwt() -> JwtConfig {
    JwtConfig {
        secret: Some("cli-test-secret".to_string()),
        audience: auth::DEFAULT_AUDIENCE.to_string(),
    }
}

// ========== Core Command Tests ==========

#[test]
fn test_cmd_init_creates_database() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("investiq.db");

    commands::cmd_init(&path, true).unwrap();
    assert!(path.exists());

    let db = commands::open_db(&path, true).unwrap();
    assert!(db.list_transactions("alice").unwrap().is_empty());
}

#[test]
fn test_open_db_unencrypted() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("plain.db");

    let db = commands::open_db(&path, true).unwrap();
    assert_eq!(db.path(), path.to_str().unwrap());
    assert!(!db.is_encrypted());
}

// ========== Transactions Command Tests ==========

#[test]
fn test_cmd_transactions_add_and_list() {
    let db = setup_test_db();

    commands::cmd_transactions_add(
        &db,
        "alice",
        "42.50",
        "expense",
        Some("Food".to_string()),
        "2024-03-15".to_string(),
        Some("Groceries".to_string()),
    )
    .unwrap();

    let txs = db.list_transactions("alice").unwrap();
    assert_eq!(txs.len(), 1);
    assert_eq!(txs[0].amount, 42.5);
    assert_eq!(txs[0].kind, TransactionType::Expense);
    assert_eq!(txs[0].category_name.as_deref(), Some("Food"));

    assert!(commands::cmd_transactions_list(&db, "alice", 20).is_ok());
    // Other users see nothing
    assert!(db.list_transactions("bob").unwrap().is_empty());
}

#[test]
fn test_cmd_transactions_list_empty() {
    let db = setup_test_db();
    assert!(commands::cmd_transactions_list(&db, "alice", 20).is_ok());
}

#[test]
fn test_cmd_transactions_add_rejects_invalid_input() {
    let db = setup_test_db();

    let bad_type =
        commands::cmd_transactions_add(&db, "alice", "10", "transfer", None, "2024-03-15".into(), None);
    assert!(bad_type.is_err());

    let negative =
        commands::cmd_transactions_add(&db, "alice", "-5", "expense", None, "2024-03-15".into(), None);
    assert!(negative.is_err());

    let bad_date =
        commands::cmd_transactions_add(&db, "alice", "5", "expense", None, "15/03/2024".into(), None);
    assert!(bad_date.is_err());

    assert!(db.list_transactions("alice").unwrap().is_empty());
}

#[test]
fn test_cmd_transactions_delete() {
    let db = setup_test_db();
    commands::cmd_transactions_add(&db, "alice", "10", "income", None, "2024-03-01".into(), None)
        .unwrap();
    let id = db.list_transactions("alice").unwrap()[0].id;

    // Not visible to another user
    assert!(commands::cmd_transactions_delete(&db, "bob", id).is_err());
    assert_eq!(db.list_transactions("alice").unwrap().len(), 1);

    commands::cmd_transactions_delete(&db, "alice", id).unwrap();
    assert!(db.list_transactions("alice").unwrap().is_empty());

    let err = commands::cmd_transactions_delete(&db, "alice", id).unwrap_err();
    assert!(err.to_string().contains("not found"));
}

#[test]
fn test_cmd_transactions_writes_audit_log() {
    let db = setup_test_db();
    commands::cmd_transactions_add(&db, "alice", "10", "income", None, "2024-03-01".into(), None)
        .unwrap();

    let entries = db.list_audit_log("alice", 10).unwrap();
    assert!(entries
        .iter()
        .any(|e| e.action == "create" && e.entity_type.as_deref() == Some("transaction")));
}

// ========== Budgets Command Tests ==========

#[test]
fn test_cmd_budgets_add_list_delete() {
    let db = setup_test_db();

    commands::cmd_budgets_add(
        &db,
        "alice",
        "Food",
        "400",
        Some("monthly".to_string()),
        Some("2024-01-01".to_string()),
        Some("2024-12-31".to_string()),
    )
    .unwrap();

    let budgets = db.list_budgets("alice").unwrap();
    assert_eq!(budgets.len(), 1);
    assert_eq!(budgets[0].category_name, "Food");
    assert_eq!(budgets[0].amount, 400.0);

    assert!(commands::cmd_budgets_list(&db, "alice").is_ok());

    commands::cmd_budgets_delete(&db, "alice", budgets[0].id).unwrap();
    assert!(db.list_budgets("alice").unwrap().is_empty());
    assert!(commands::cmd_budgets_delete(&db, "alice", budgets[0].id).is_err());
}

#[test]
fn test_cmd_budgets_add_rejects_reversed_dates() {
    let db = setup_test_db();
    let result = commands::cmd_budgets_add(
        &db,
        "alice",
        "Food",
        "400",
        None,
        Some("2024-12-31".to_string()),
        Some("2024-01-01".to_string()),
    );
    assert!(result.is_err());
}

#[test]
fn test_cmd_budgets_add_requires_category() {
    let db = setup_test_db();
    assert!(commands::cmd_budgets_add(&db, "alice", "  ", "400", None, None, None).is_err());
}

// ========== Report Command Tests ==========

fn seed_current_month(db: &Database) {
    let date = this_month();
    commands::cmd_transactions_add(db, "alice", "3000", "income", Some("Salary".into()), date.clone(), None)
        .unwrap();
    commands::cmd_transactions_add(db, "alice", "50", "expense", Some("Food".into()), date.clone(), None)
        .unwrap();
    commands::cmd_transactions_add(db, "alice", "900", "expense", Some("Rent".into()), date, None)
        .unwrap();
    commands::cmd_budgets_add(db, "alice", "Food", "200", None, None, None).unwrap();
}

#[test]
fn test_cmd_report_summary() {
    let db = setup_test_db();
    seed_current_month(&db);

    assert!(commands::cmd_report_summary(&db, "alice", None, None, false).is_ok());
    assert!(commands::cmd_report_summary(&db, "alice", None, None, true).is_ok());
    assert!(commands::cmd_report_summary(&db, "alice", Some(1), Some(2020), false).is_ok());
}

#[test]
fn test_cmd_report_summary_invalid_month() {
    let db = setup_test_db();
    assert!(commands::cmd_report_summary(&db, "alice", Some(13), Some(2024), false).is_err());
    assert!(commands::cmd_report_summary(&db, "alice", Some(0), Some(2024), false).is_err());
}

#[test]
fn test_cmd_report_trends() {
    let db = setup_test_db();
    seed_current_month(&db);

    assert!(commands::cmd_report_trends(&db, "alice", 6, false).is_ok());
    assert!(commands::cmd_report_trends(&db, "alice", 12, true).is_ok());
    assert!(commands::cmd_report_trends(&db, "alice", 0, false).is_err());
}

#[test]
fn test_cmd_report_trends_empty_history() {
    let db = setup_test_db();
    assert!(commands::cmd_report_trends(&db, "alice", 3, false).is_ok());
}

#[test]
fn test_cmd_report_budget() {
    let db = setup_test_db();
    assert!(commands::cmd_report_budget(&db, "alice", false).is_ok());

    seed_current_month(&db);
    assert!(commands::cmd_report_budget(&db, "alice", false).is_ok());
    assert!(commands::cmd_report_budget(&db, "alice", true).is_ok());

    let entries = db.list_audit_log("alice", 50).unwrap();
    assert!(entries
        .iter()
        .any(|e| e.action == "report" && e.entity_type.as_deref() == Some("budget_vs_actual")));
}

// ========== Assistant Command Tests ==========

#[test]
fn test_cmd_ask() {
    let db = setup_test_db();
    seed_current_month(&db);

    commands::cmd_ask(&db, "alice", "How is my budget looking?").unwrap();

    let entries = db.list_audit_log("alice", 50).unwrap();
    let ask = entries.iter().find(|e| e.action == "ask").unwrap();
    assert_eq!(ask.details.as_deref(), Some("topic=budget"));
}

#[test]
fn test_cmd_ask_empty_prompt() {
    let db = setup_test_db();
    assert!(commands::cmd_ask(&db, "alice", "   ").is_err());
}

// ========== Token Command Tests ==========

#[test]
fn test_issue_dev_token_verifies() {
    let config = test_jwt();
    let token = commands::issue_dev_token("alice", Some("alice@example.com"), 600, &config).unwrap();

    let user = auth::verify_token(&token, &config).unwrap();
    assert_eq!(user.user_id, "alice");
    assert_eq!(user.email.as_deref(), Some("alice@example.com"));
}

#[test]
fn test_issue_dev_token_requires_secret() {
    let config = JwtConfig::default();
    assert!(commands::issue_dev_token("alice", None, 600, &config).is_err());
}

#[test]
fn test_issue_dev_token_requires_user() {
    assert!(commands::issue_dev_token(" ", None, 600, &test_jwt()).is_err());
}

// ========== Serve Helper Tests ==========

#[test]
fn test_parse_origins() {
    assert_eq!(
        commands::parse_origins("http://localhost:3000, https://app.example.com,,"),
        vec!["http://localhost:3000", "https://app.example.com"]
    );
    assert!(commands::parse_origins("").is_empty());
}

#[test]
fn test_server_config_no_auth() {
    assert!(!commands::server_config(true).require_auth);
    assert!(commands::server_config(false).require_auth);
}

// ========== Utility Tests ==========

#[test]
fn test_truncate() {
    assert_eq!(truncate("short", 10), "short");
    assert_eq!(truncate("a long description here", 10), "a long ...");
    assert_eq!(truncate("Café au lait", 7), "Café...");
}
