//! Adapter implementations
//!
//! Adapters implement the ports with concrete technologies:
//! - DuckDB data source for the ConnectionFactory port
//! - SQL account store running on any Executor

pub mod account_store;
pub mod duckdb;
