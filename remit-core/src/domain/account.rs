//! Account domain model

use serde::{Deserialize, Serialize};

/// An account record: an externally assigned id and a balance in minor
/// currency units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: String,
    pub balance: i64,
}

impl Account {
    /// Create a new account with an opening balance
    pub fn new(id: impl Into<String>, balance: i64) -> Self {
        Self {
            id: id.into(),
            balance,
        }
    }

    /// Validate account data before it is first written
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.id.trim().is_empty() {
            return Err("account id cannot be empty");
        }
        if self.balance < 0 {
            return Err("opening balance cannot be negative");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_validation() {
        let mut account = Account::new("memberA", 10000);
        assert!(account.validate().is_ok());

        account.balance = -1;
        assert!(account.validate().is_err());

        account.balance = 0;
        account.id = "  ".to_string();
        assert!(account.validate().is_err());
    }
}
