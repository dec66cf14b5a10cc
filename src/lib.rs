//! Stock Ledger - terminal inventory ledger with balance reconciliation
//!
//! This library keeps two tables in step: a balance table holding the
//! quantity on hand (and optionally the unit price) for each item, and an
//! append-only movement log recording every inflow and outflow. Every change
//! goes through one reconciliation engine so that each balance always equals
//! the signed sum of its movements, no balance goes negative, and item names
//! stay unique ignoring case.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (prices, balance rows, movements, the ledger)
//! - `services`: Reconciliation engine, inventory service and summary
//! - `storage`: Ledger store contract with CSV and in-memory backends
//! - `audit`: Audit logging system
//! - `export`: CSV and JSON export
//! - `cli`, `display`: Command handlers and terminal formatting
//!
//! # Example
//!
//! ```rust,ignore
//! use stock_ledger::config::{Settings, StockPaths};
//! use stock_ledger::services::InventoryService;
//! use stock_ledger::storage::Storage;
//!
//! let paths = StockPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let storage = Storage::new(&paths, &settings)?;
//!
//! let service = InventoryService::new(&storage.ledger).with_audit(&storage.audit);
//! service.receive("Widget", 10, None)?;
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod services;
pub mod storage;

pub use error::{StockError, StockResult};
