//! Core data models for the stock ledger
//!
//! This module contains the data structures of the inventory domain:
//! balance rows, movement records, prices and the ledger pair itself.

pub mod item;
pub mod ledger;
pub mod movement;
pub mod price;

pub use item::{BalanceRow, ItemKey};
pub use ledger::Ledger;
pub use movement::{MovementKind, MovementRecord};
pub use price::{Price, PriceParseError};
