//! Transaction operations

use chrono::{Months, NaiveDate};
use rusqlite::{params, OptionalExtension};

use super::{parse_date_column, parse_datetime, Database};
use crate::error::{Error, Result};
use crate::models::{NewTransaction, Transaction, TransactionType};

const TRANSACTION_COLUMNS: &str = "id, user_id, amount, type, category_name, transaction_date, \
                                   description, created_at, updated_at";

impl Database {
    /// Insert a transaction for `user_id`, returning the stored record
    pub fn insert_transaction(&self, user_id: &str, tx: &NewTransaction) -> Result<Transaction> {
        let conn = self.conn()?;

        conn.execute(
            r#"
            INSERT INTO transactions (user_id, amount, type, category_name, transaction_date, description)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
            params![
                user_id,
                tx.amount,
                tx.kind.as_str(),
                tx.category_name,
                tx.transaction_date.to_string(),
                tx.description,
            ],
        )?;
        let id = conn.last_insert_rowid();
        drop(conn);

        self.get_transaction(user_id, id)?
            .ok_or_else(|| Error::NotFound(format!("transaction {}", id)))
    }

    /// All of a user's transactions, newest date first
    pub fn list_transactions(&self, user_id: &str) -> Result<Vec<Transaction>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM transactions WHERE user_id = ?
             ORDER BY transaction_date DESC, id DESC",
            TRANSACTION_COLUMNS
        ))?;

        let transactions = stmt
            .query_map(params![user_id], Self::row_to_transaction)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(transactions)
    }

    /// A user's transactions dated within one calendar month
    pub fn list_transactions_in_month(
        &self,
        user_id: &str,
        month: u32,
        year: i32,
    ) -> Result<Vec<Transaction>> {
        let first = NaiveDate::from_ymd_opt(year, month, 1)
            .ok_or_else(|| Error::validation(format!("invalid month {}-{}", year, month)))?;
        let next = first
            .checked_add_months(Months::new(1))
            .ok_or_else(|| Error::validation(format!("invalid month {}-{}", year, month)))?;

        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM transactions
             WHERE user_id = ? AND transaction_date >= ? AND transaction_date < ?
             ORDER BY transaction_date DESC, id DESC",
            TRANSACTION_COLUMNS
        ))?;

        let transactions = stmt
            .query_map(
                params![user_id, first.to_string(), next.to_string()],
                Self::row_to_transaction,
            )?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(transactions)
    }

    /// Get one transaction, `None` if missing or owned by someone else
    pub fn get_transaction(&self, user_id: &str, id: i64) -> Result<Option<Transaction>> {
        let conn = self.conn()?;
        let transaction = conn
            .query_row(
                &format!(
                    "SELECT {} FROM transactions WHERE id = ? AND user_id = ?",
                    TRANSACTION_COLUMNS
                ),
                params![id, user_id],
                Self::row_to_transaction,
            )
            .optional()?;

        Ok(transaction)
    }

    /// Replace every mutable field of a transaction
    ///
    /// Returns `None` when the id does not exist for this user.
    pub fn update_transaction(
        &self,
        user_id: &str,
        id: i64,
        tx: &NewTransaction,
    ) -> Result<Option<Transaction>> {
        let conn = self.conn()?;
        let changed = conn.execute(
            r#"
            UPDATE transactions
            SET amount = ?, type = ?, category_name = ?, transaction_date = ?, description = ?,
                updated_at = CURRENT_TIMESTAMP
            WHERE id = ? AND user_id = ?
            "#,
            params![
                tx.amount,
                tx.kind.as_str(),
                tx.category_name,
                tx.transaction_date.to_string(),
                tx.description,
                id,
                user_id,
            ],
        )?;
        drop(conn);

        if changed == 0 {
            return Ok(None);
        }
        self.get_transaction(user_id, id)
    }

    /// Delete a transaction; `false` when nothing matched
    pub fn delete_transaction(&self, user_id: &str, id: i64) -> Result<bool> {
        let conn = self.conn()?;
        let deleted = conn.execute(
            "DELETE FROM transactions WHERE id = ? AND user_id = ?",
            params![id, user_id],
        )?;
        Ok(deleted > 0)
    }

    pub(crate) fn row_to_transaction(row: &rusqlite::Row) -> rusqlite::Result<Transaction> {
        let kind_str: String = row.get(3)?;
        let kind: TransactionType = kind_str.parse().map_err(|e: String| {
            rusqlite::Error::FromSqlConversionFailure(3, rusqlite::types::Type::Text, e.into())
        })?;
        let date_str: String = row.get(5)?;
        let created_at_str: String = row.get(7)?;
        let updated_at_str: String = row.get(8)?;

        Ok(Transaction {
            id: row.get(0)?,
            user_id: row.get(1)?,
            amount: row.get(2)?,
            kind,
            category_name: row.get(4)?,
            transaction_date: parse_date_column(5, &date_str)?,
            description: row.get(6)?,
            created_at: parse_datetime(&created_at_str),
            updated_at: parse_datetime(&updated_at_str),
        })
    }
}
