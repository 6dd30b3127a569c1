//! Remit Core - atomic account transfers over a relational store
//!
//! This crate follows hexagonal architecture:
//!
//! - **domain**: Core entities (Account, TransferRequest) and the error type
//! - **ports**: Trait definitions for external dependencies (ConnectionFactory, Executor)
//! - **services**: Business logic orchestration (TransactionRunner, TransferService)
//! - **adapters**: Concrete implementations (DuckDB data source, SQL account store)

pub mod adapters;
pub mod config;
pub mod domain;
pub mod migrations;
pub mod ports;
pub mod services;

use std::path::Path;
use std::sync::Arc;

use tracing::debug;

use adapters::duckdb::DuckDbDataSource;
use config::Config;
use services::{AccountService, SentinelFault, TransactionRunner, TransferService};

// Re-export commonly used types at crate root
pub use adapters::account_store::AccountStore;
pub use domain::result::{Error, Result};
pub use domain::{Account, TransferRequest};

/// Main context for remit operations
///
/// Holds the data source, configuration and the services wired on top of
/// them.
pub struct RemitContext {
    pub config: Config,
    pub data_source: Arc<DuckDbDataSource>,
    pub account_service: AccountService,
    pub transfer_service: TransferService,
}

impl RemitContext {
    /// Open the database in `remit_dir` named by its config
    pub fn new(remit_dir: &Path) -> Result<Self> {
        let config = Config::load(remit_dir)?;
        let db_path = remit_dir.join(&config.database);
        debug!(path = %db_path.display(), "opening database");
        let data_source = DuckDbDataSource::open(&db_path)?;
        Self::from_parts(config, data_source)
    }

    /// Context over a private in-memory database
    pub fn in_memory(config: Config) -> Result<Self> {
        Self::from_parts(config, DuckDbDataSource::open_in_memory()?)
    }

    fn from_parts(config: Config, data_source: DuckDbDataSource) -> Result<Self> {
        let data_source = Arc::new(data_source);
        data_source.ensure_schema()?;

        let account_service = AccountService::new(data_source.clone());
        let mut transfer_service =
            TransferService::new(TransactionRunner::new(data_source.clone()));
        if let Some(sentinel) = &config.fault_sentinel {
            debug!(sentinel = %sentinel, "fault injection enabled");
            transfer_service = transfer_service.with_fault(Arc::new(SentinelFault::new(sentinel)));
        }

        Ok(Self {
            config,
            data_source,
            account_service,
            transfer_service,
        })
    }
}
