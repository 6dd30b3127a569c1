//! Transaction runner - executes a unit of work inside one database transaction
//!
//! `run_in_transaction` begins a transaction on a fresh connection, hands the
//! work a [`TxContext`] bound to it, then commits on `Ok` or rolls back on
//! `Err`. The connection is owned by the call and released on every exit
//! path, including a panic inside the work (the transaction guard rolls back
//! on drop).

use std::sync::Arc;

use duckdb::Connection;
use tracing::{debug, info_span, warn};
use uuid::Uuid;

use crate::domain::result::Result;
use crate::ports::{ConnectionFactory, Executor};

/// The open transaction a unit of work runs in
///
/// Store calls given this context execute on the transaction's connection,
/// so they commit or roll back together.
pub struct TxContext<'a> {
    conn: &'a Connection,
    id: Uuid,
}

impl TxContext<'_> {
    /// Identifier of this transaction, for log correlation
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Raw access to the transaction's connection
    pub fn connection(&self) -> &Connection {
        self.conn
    }
}

impl Executor for TxContext<'_> {
    fn with_connection<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T>,
    {
        f(self.conn)
    }
}

/// Runs units of work transactionally
///
/// Each invocation gets its own connection and a fresh outer transaction.
/// There is no nesting and no retry.
#[derive(Clone)]
pub struct TransactionRunner {
    factory: Arc<dyn ConnectionFactory>,
}

impl TransactionRunner {
    pub fn new(factory: Arc<dyn ConnectionFactory>) -> Self {
        Self { factory }
    }

    /// Run `work` in a transaction
    ///
    /// Returns the work's value after a successful commit. If the work fails,
    /// the transaction is rolled back and the work's error is returned as is;
    /// a failing rollback is logged and does not replace it. A failing commit
    /// surfaces as a storage error.
    pub fn run_in_transaction<T, W>(&self, work: W) -> Result<T>
    where
        W: FnOnce(&TxContext<'_>) -> Result<T>,
    {
        let tx_id = Uuid::new_v4();
        let span = info_span!("transaction", %tx_id);
        let _entered = span.enter();

        let mut conn = self.factory.connect()?;
        let tx = conn.transaction()?;
        debug!("transaction started");

        let outcome = {
            let ctx = TxContext { conn: &tx, id: tx_id };
            work(&ctx)
        };

        match outcome {
            Ok(value) => {
                tx.commit()?;
                debug!("transaction committed");
                Ok(value)
            }
            Err(err) => {
                match tx.rollback() {
                    Ok(()) => debug!(error = %err, "transaction rolled back"),
                    Err(rollback_err) => warn!(
                        error = %err,
                        rollback_error = %rollback_err,
                        "rollback failed"
                    ),
                }
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::duckdb::DuckDbDataSource;
    use crate::domain::result::Error;

    fn setup() -> (Arc<DuckDbDataSource>, TransactionRunner) {
        let ds = Arc::new(DuckDbDataSource::open_in_memory().unwrap());
        ds.ensure_schema().unwrap();
        let runner = TransactionRunner::new(ds.clone());
        (ds, runner)
    }

    fn count_rows(ds: &DuckDbDataSource) -> i64 {
        ds.connect()
            .unwrap()
            .query_row("SELECT COUNT(*) FROM member", [], |row| row.get(0))
            .unwrap()
    }

    #[test]
    fn test_commit_on_ok() {
        let (ds, runner) = setup();

        let value = runner
            .run_in_transaction(|tx| {
                tx.connection()
                    .execute("INSERT INTO member VALUES ('memberA', 1)", [])?;
                Ok(42)
            })
            .unwrap();

        assert_eq!(value, 42);
        assert_eq!(count_rows(&ds), 1);
    }

    #[test]
    fn test_rollback_on_err_returns_original_error() {
        let (ds, runner) = setup();

        let err = runner
            .run_in_transaction(|tx| -> Result<()> {
                tx.connection()
                    .execute("INSERT INTO member VALUES ('memberA', 1)", [])?;
                Err(Error::rejected("stop"))
            })
            .unwrap_err();

        assert!(matches!(err, Error::TransferRejected(ref r) if r == "stop"));
        assert_eq!(count_rows(&ds), 0);
    }

    #[test]
    fn test_each_run_has_its_own_id() {
        let (_ds, runner) = setup();
        let a = runner.run_in_transaction(|tx| Ok(tx.id())).unwrap();
        let b = runner.run_in_transaction(|tx| Ok(tx.id())).unwrap();
        assert_ne!(a, b);
    }
}
