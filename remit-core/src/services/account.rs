//! Account service - account administration outside of transfers
//!
//! Every call runs in autocommit mode on its own connection.

use std::sync::Arc;

use crate::adapters::account_store::AccountStore;
use crate::domain::result::Result;
use crate::domain::Account;
use crate::ports::ConnectionFactory;

pub struct AccountService {
    factory: Arc<dyn ConnectionFactory>,
    store: AccountStore,
}

impl AccountService {
    pub fn new(factory: Arc<dyn ConnectionFactory>) -> Self {
        Self {
            factory,
            store: AccountStore::new(),
        }
    }

    /// Create an account with an opening balance
    pub fn open(&self, id: &str, balance: i64) -> Result<Account> {
        let account = Account::new(id, balance);
        self.store.save(&*self.factory, &account)?;
        Ok(account)
    }

    pub fn get(&self, id: &str) -> Result<Account> {
        self.store.find_by_id(&*self.factory, id)
    }

    pub fn list(&self) -> Result<Vec<Account>> {
        self.store.find_all(&*self.factory)
    }

    /// Delete an account; closing an unknown id is a no-op
    pub fn close(&self, id: &str) -> Result<()> {
        self.store.delete(&*self.factory, id)
    }
}
