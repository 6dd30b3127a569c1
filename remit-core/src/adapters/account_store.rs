//! Account store - raw CRUD on the `member` table
//!
//! The store holds no connection of its own. Every operation runs on the
//! executor it is handed: a transactional context inside a unit of work, or
//! a connection factory for one-off autocommit calls.

use duckdb::{params, Connection};
use tracing::debug;

use crate::domain::result::{Error, Result};
use crate::domain::Account;
use crate::ports::Executor;

#[derive(Debug, Clone, Copy, Default)]
pub struct AccountStore;

impl AccountStore {
    pub fn new() -> Self {
        Self
    }

    /// Insert a new account, failing with `DuplicateKey` if the id is taken
    pub fn save<E>(&self, exec: &E, account: &Account) -> Result<()>
    where
        E: Executor + ?Sized,
    {
        account.validate().map_err(Error::validation)?;
        exec.with_connection(|conn| {
            if Self::exists(conn, &account.id)? {
                return Err(Error::duplicate_key(&account.id));
            }
            conn.execute(
                "INSERT INTO member (member_id, money) VALUES (?, ?)",
                params![account.id, account.balance],
            )
            .map_err(|e| map_insert_error(e, &account.id))?;
            debug!(account = %account.id, balance = account.balance, "account saved");
            Ok(())
        })
    }

    /// Load one account by id
    pub fn find_by_id<E>(&self, exec: &E, id: &str) -> Result<Account>
    where
        E: Executor + ?Sized,
    {
        exec.with_connection(|conn| {
            let found = conn.query_row(
                "SELECT member_id, money FROM member WHERE member_id = ?",
                params![id],
                row_to_account,
            );
            match found {
                Ok(account) => Ok(account),
                Err(duckdb::Error::QueryReturnedNoRows) => Err(Error::not_found(id)),
                Err(e) => Err(e.into()),
            }
        })
    }

    /// All accounts ordered by id
    pub fn find_all<E>(&self, exec: &E) -> Result<Vec<Account>>
    where
        E: Executor + ?Sized,
    {
        exec.with_connection(|conn| {
            let mut stmt = conn.prepare("SELECT member_id, money FROM member ORDER BY member_id")?;
            let accounts = stmt
                .query_map([], row_to_account)?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(accounts)
        })
    }

    /// Overwrite the balance of an existing account
    pub fn update_balance<E>(&self, exec: &E, id: &str, new_balance: i64) -> Result<()>
    where
        E: Executor + ?Sized,
    {
        exec.with_connection(|conn| {
            let changed = conn.execute(
                "UPDATE member SET money = ? WHERE member_id = ?",
                params![new_balance, id],
            )?;
            if changed == 0 {
                return Err(Error::not_found(id));
            }
            debug!(account = %id, balance = new_balance, "balance updated");
            Ok(())
        })
    }

    /// Remove an account. Deleting an absent id is not an error.
    pub fn delete<E>(&self, exec: &E, id: &str) -> Result<()>
    where
        E: Executor + ?Sized,
    {
        exec.with_connection(|conn| {
            let removed = conn.execute("DELETE FROM member WHERE member_id = ?", params![id])?;
            debug!(account = %id, removed, "account delete");
            Ok(())
        })
    }

    fn exists(conn: &Connection, id: &str) -> Result<bool> {
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM member WHERE member_id = ?",
            params![id],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }
}

fn row_to_account(row: &duckdb::Row) -> duckdb::Result<Account> {
    Ok(Account {
        id: row.get(0)?,
        balance: row.get(1)?,
    })
}

/// Best-effort mapping of a primary key violation to `DuplicateKey`
///
/// Only reached when a concurrent insert of the same id slips past the
/// existence check. DuckDB reports every failure with the same generic error
/// code, so the constraint is recognised from its `Constraint Error` message.
fn map_insert_error(err: duckdb::Error, id: &str) -> Error {
    match &err {
        duckdb::Error::DuckDBFailure(_, Some(msg)) if is_duplicate_key_message(msg) => {
            Error::duplicate_key(id)
        }
        _ => err.into(),
    }
}

fn is_duplicate_key_message(msg: &str) -> bool {
    let lower = msg.to_lowercase();
    lower.contains("constraint error") && lower.contains("duplicate key")
}
