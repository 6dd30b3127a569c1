//! Core domain entities
//!
//! Pure data structures with validation logic - no I/O.

mod account;
pub mod result;
mod transfer;

pub use account::Account;
pub use transfer::TransferRequest;
