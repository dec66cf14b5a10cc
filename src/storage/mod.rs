//! Storage layer for the stock ledger
//!
//! The ledger is persisted through the [`LedgerStore`] contract: load the whole
//! balance/movement pair, save the whole pair back. There is no incremental
//! write and no locking, so two sessions saving in turn keep only the last
//! writer's tables.

pub mod csv_codec;
pub mod csv_store;
pub mod file_io;
pub mod memory;

pub use csv_store::CsvLedgerStore;
pub use file_io::write_atomic;
pub use memory::MemoryLedgerStore;

use tracing::warn;

use crate::audit::AuditLogger;
use crate::config::{Settings, StockPaths};
use crate::error::StockError;
use crate::models::Ledger;

/// Durable tabular storage for the ledger pair
pub trait LedgerStore {
    /// Load both tables, failing with `StoreUnavailable` if they can't be read
    fn load(&self) -> Result<Ledger, StockError>;

    /// Overwrite both tables
    fn save(&self, ledger: &Ledger) -> Result<(), StockError>;

    /// Load both tables, substituting empty ones if the store is unavailable
    fn load_or_empty(&self) -> Ledger {
        match self.load() {
            Ok(ledger) => ledger,
            Err(e) => {
                warn!(error = %e, "ledger store unavailable, using empty tables");
                Ledger::new()
            }
        }
    }
}

/// Main storage coordinator: the ledger store plus the audit log
pub struct Storage {
    pub ledger: CsvLedgerStore,
    pub audit: AuditLogger,
}

impl Storage {
    /// Create a new Storage instance
    pub fn new(paths: &StockPaths, settings: &Settings) -> Result<Self, StockError> {
        paths.ensure_directories()?;

        Ok(Self {
            ledger: CsvLedgerStore::from_config(paths, settings),
            audit: AuditLogger::new(paths.audit_log()),
        })
    }

    /// Create empty ledger files where missing
    pub fn initialize(&self) -> Result<bool, StockError> {
        self.ledger.initialize()
    }

    /// Check if the ledger files exist
    pub fn is_initialized(&self) -> bool {
        self.ledger.is_initialized()
    }
}
