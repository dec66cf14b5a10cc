//! Export module for the stock ledger
//!
//! Provides data export in two formats:
//! - CSV: either ledger table (spreadsheet-compatible)
//! - JSON: full snapshot of both tables plus the dashboard summary

pub mod csv;
pub mod json;

pub use csv::{export_balances_csv, export_movements_csv};
pub use json::{export_full_json, import_from_json, FullExport, EXPORT_SCHEMA_VERSION};
