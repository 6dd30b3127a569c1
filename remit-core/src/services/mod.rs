//! Service layer - business logic orchestration
//!
//! Services coordinate domain logic and port interactions. Each service
//! focuses on a specific use case.

mod account;
pub mod transaction;
pub mod transfer;

pub use account::AccountService;
pub use transaction::{TransactionRunner, TxContext};
pub use transfer::{SentinelFault, TransferFault, TransferService};
