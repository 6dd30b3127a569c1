//! Transfer request value

use serde::{Deserialize, Serialize};

/// A request to move `amount` from one account to another. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferRequest {
    pub from_id: String,
    pub to_id: String,
    pub amount: i64,
}

impl TransferRequest {
    pub fn new(from_id: impl Into<String>, to_id: impl Into<String>, amount: i64) -> Self {
        Self {
            from_id: from_id.into(),
            to_id: to_id.into(),
            amount,
        }
    }

    /// Check the request shape before any account is read
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.from_id.trim().is_empty() || self.to_id.trim().is_empty() {
            return Err("account ids cannot be empty");
        }
        if self.from_id == self.to_id {
            return Err("cannot transfer to the same account");
        }
        if self.amount <= 0 {
            return Err("transfer amount must be positive");
        }
        Ok(())
    }
}
