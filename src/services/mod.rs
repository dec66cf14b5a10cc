//! Service layer for the stock ledger
//!
//! `reconciliation` holds the pure rules that keep balances and movements
//! consistent; `inventory` wraps them in the load/apply/save cycle against a
//! ledger store; `summary` derives the dashboard figures.

pub mod inventory;
pub mod reconciliation;
pub mod summary;

pub use inventory::InventoryService;
pub use reconciliation::{Discrepancy, Operation};
pub use summary::Summary;
