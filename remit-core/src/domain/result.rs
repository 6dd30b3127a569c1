//! Result and error types for the core library

use thiserror::Error;

/// Core library error type
///
/// Every failure raised inside a unit of work is one of these. The
/// transaction runner rolls back on any variant and hands the same value
/// back to the caller.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Account not found: {0}")]
    NotFound(String),

    #[error("Duplicate key: account {0} already exists")]
    DuplicateKey(String),

    #[error("Transfer rejected: {0}")]
    TransferRejected(String),

    #[error("Insufficient funds in {id}: balance {balance}, requested {amount}")]
    InsufficientFunds { id: String, balance: i64, amount: i64 },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Storage error: {0}")]
    Storage(#[from] duckdb::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create a not found error
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound(id.into())
    }

    /// Create a duplicate key error
    pub fn duplicate_key(id: impl Into<String>) -> Self {
        Self::DuplicateKey(id.into())
    }

    /// Create a transfer rejected error
    pub fn rejected(reason: impl Into<String>) -> Self {
        Self::TransferRejected(reason.into())
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// True for failures coming from the storage engine rather than from
    /// application rules
    pub fn is_storage(&self) -> bool {
        matches!(self, Self::Storage(_))
    }
}

/// Core library result type
pub type Result<T> = std::result::Result<T, Error>;
