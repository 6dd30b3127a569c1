//! Connection port - where store calls get their database connection

use duckdb::Connection;

use crate::domain::result::Result;

/// Hands out database connections
///
/// This is the datasource seen by the core. Each call returns a fresh
/// connection owned by the caller; dropping it releases it.
pub trait ConnectionFactory: Send + Sync {
    fn connect(&self) -> Result<Connection>;
}

/// Something a store operation can run its SQL against
///
/// Implemented by the transactional context (statements join the open
/// transaction) and by connection factories (each call acquires its own
/// connection in autocommit mode and releases it on return).
pub trait Executor {
    fn with_connection<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T>;
}

impl Executor for dyn ConnectionFactory {
    fn with_connection<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T>,
    {
        let conn = self.connect()?;
        f(&conn)
    }
}
