//! Transfer service - moves money between two accounts atomically

use std::sync::Arc;

use tracing::info;

use crate::adapters::account_store::AccountStore;
use crate::domain::result::{Error, Result};
use crate::domain::TransferRequest;
use crate::services::transaction::{TransactionRunner, TxContext};

/// Fault-injection hook for transfers
///
/// Returning `Some(reason)` fails the transfer with `TransferRejected` after
/// the source has been debited and before the destination is credited,
/// which exercises the rollback of the already-written debit. A rejected
/// request is never reported as `InsufficientFunds`. Production
/// wiring installs no hook.
pub trait TransferFault: Send + Sync {
    fn check(&self, request: &TransferRequest) -> Option<String>;
}

/// Rejects every transfer whose destination is one reserved account id
#[derive(Debug, Clone)]
pub struct SentinelFault {
    sentinel_id: String,
}

impl SentinelFault {
    pub fn new(sentinel_id: impl Into<String>) -> Self {
        Self {
            sentinel_id: sentinel_id.into(),
        }
    }
}

impl TransferFault for SentinelFault {
    fn check(&self, request: &TransferRequest) -> Option<String> {
        (request.to_id == self.sentinel_id)
            .then(|| format!("fault injected for destination {}", request.to_id))
    }
}

/// Service for account-to-account transfers
pub struct TransferService {
    runner: TransactionRunner,
    store: AccountStore,
    fault: Option<Arc<dyn TransferFault>>,
}

impl TransferService {
    pub fn new(runner: TransactionRunner) -> Self {
        Self {
            runner,
            store: AccountStore::new(),
            fault: None,
        }
    }

    /// Install a fault-injection hook
    pub fn with_fault(mut self, fault: Arc<dyn TransferFault>) -> Self {
        self.fault = Some(fault);
        self
    }

    /// Move `amount` from `from_id` to `to_id`
    ///
    /// Both balance writes happen in one transaction: on any failure neither
    /// is visible afterwards.
    pub fn account_transfer(&self, from_id: &str, to_id: &str, amount: i64) -> Result<()> {
        let request = TransferRequest::new(from_id, to_id, amount);
        request.validate().map_err(Error::validation)?;

        self.runner
            .run_in_transaction(|tx| self.transfer_in(tx, &request))?;

        info!(from = %from_id, to = %to_id, amount, "transfer completed");
        Ok(())
    }

    fn transfer_in(&self, tx: &TxContext<'_>, request: &TransferRequest) -> Result<()> {
        let from = self.store.find_by_id(tx, &request.from_id)?;
        let to = self.store.find_by_id(tx, &request.to_id)?;

        // A hooked transfer is always rejected, whatever the balances, so the
        // hook is consulted before the sufficiency check.
        let rejection = self.fault.as_ref().and_then(|f| f.check(request));

        if rejection.is_none() && from.balance < request.amount {
            return Err(Error::InsufficientFunds {
                id: from.id,
                balance: from.balance,
                amount: request.amount,
            });
        }
        let debited = from
            .balance
            .checked_sub(request.amount)
            .ok_or_else(|| Error::validation(format!("balance overflow on {}", from.id)))?;

        self.store.update_balance(tx, &from.id, debited)?;

        // Fault injection: the debit above is already written in this
        // transaction and must be rolled back.
        if let Some(reason) = rejection {
            return Err(Error::rejected(reason));
        }

        let credited = to
            .balance
            .checked_add(request.amount)
            .ok_or_else(|| Error::validation(format!("balance overflow on {}", to.id)))?;
        self.store.update_balance(tx, &to.id, credited)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentinel_fault_matches_destination_only() {
        let fault = SentinelFault::new("ex");

        assert!(fault
            .check(&TransferRequest::new("memberA", "ex", 10))
            .is_some());
        assert!(fault
            .check(&TransferRequest::new("ex", "memberA", 10))
            .is_none());
        assert!(fault
            .check(&TransferRequest::new("memberA", "memberB", 10))
            .is_none());
    }
}
