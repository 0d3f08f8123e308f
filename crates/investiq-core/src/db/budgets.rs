//! Budget operations

use rusqlite::{params, OptionalExtension};

use super::{parse_date_column, parse_datetime, Database};
use crate::error::{Error, Result};
use crate::models::{Budget, NewBudget};

const BUDGET_COLUMNS: &str = "id, user_id, category_name, amount, period, start_date, end_date, \
                              created_at, updated_at";

impl Database {
    /// Insert a budget for `user_id`, returning the stored record
    pub fn insert_budget(&self, user_id: &str, budget: &NewBudget) -> Result<Budget> {
        let conn = self.conn()?;

        conn.execute(
            r#"
            INSERT INTO budgets (user_id, category_name, amount, period, start_date, end_date)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
            params![
                user_id,
                budget.category_name,
                budget.amount,
                budget.period,
                budget.start_date.map(|d| d.to_string()),
                budget.end_date.map(|d| d.to_string()),
            ],
        )?;
        let id = conn.last_insert_rowid();
        drop(conn);

        self.get_budget(user_id, id)?
            .ok_or_else(|| Error::NotFound(format!("budget {}", id)))
    }

    /// A user's budgets, most recently created first
    pub fn list_budgets(&self, user_id: &str) -> Result<Vec<Budget>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM budgets WHERE user_id = ? ORDER BY created_at DESC, id DESC",
            BUDGET_COLUMNS
        ))?;

        let budgets = stmt
            .query_map(params![user_id], Self::row_to_budget)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(budgets)
    }

    pub fn get_budget(&self, user_id: &str, id: i64) -> Result<Option<Budget>> {
        let conn = self.conn()?;
        let budget = conn
            .query_row(
                &format!(
                    "SELECT {} FROM budgets WHERE id = ? AND user_id = ?",
                    BUDGET_COLUMNS
                ),
                params![id, user_id],
                Self::row_to_budget,
            )
            .optional()?;

        Ok(budget)
    }

    /// Replace every mutable field of a budget; `None` if not found for this user
    pub fn update_budget(&self, user_id: &str, id: i64, budget: &NewBudget) -> Result<Option<Budget>> {
        let conn = self.conn()?;
        let changed = conn.execute(
            r#"
            UPDATE budgets
            SET category_name = ?, amount = ?, period = ?, start_date = ?, end_date = ?,
                updated_at = CURRENT_TIMESTAMP
            WHERE id = ? AND user_id = ?
            "#,
            params![
                budget.category_name,
                budget.amount,
                budget.period,
                budget.start_date.map(|d| d.to_string()),
                budget.end_date.map(|d| d.to_string()),
                id,
                user_id,
            ],
        )?;
        drop(conn);

        if changed == 0 {
            return Ok(None);
        }
        self.get_budget(user_id, id)
    }

    /// Delete a budget; `false` when nothing matched
    pub fn delete_budget(&self, user_id: &str, id: i64) -> Result<bool> {
        let conn = self.conn()?;
        let deleted = conn.execute(
            "DELETE FROM budgets WHERE id = ? AND user_id = ?",
            params![id, user_id],
        )?;
        Ok(deleted > 0)
    }

    fn row_to_budget(row: &rusqlite::Row) -> rusqlite::Result<Budget> {
        let start_str: Option<String> = row.get(5)?;
        let end_str: Option<String> = row.get(6)?;
        let created_at_str: String = row.get(7)?;
        let updated_at_str: String = row.get(8)?;

        Ok(Budget {
            id: row.get(0)?,
            user_id: row.get(1)?,
            category_name: row.get(2)?,
            amount: row.get(3)?,
            period: row.get(4)?,
            start_date: start_str.map(|s| parse_date_column(5, &s)).transpose()?,
            end_date: end_str.map(|s| parse_date_column(6, &s)).transpose()?,
            created_at: parse_datetime(&created_at_str),
            updated_at: parse_datetime(&updated_at_str),
        })
    }
}
