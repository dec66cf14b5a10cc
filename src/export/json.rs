//! JSON Export functionality
//!
//! Exports the complete ledger to JSON with schema versioning.

use std::io::Write;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{StockError, StockResult};
use crate::models::{BalanceRow, Ledger, MovementRecord};
use crate::services::reconciliation::{verify, Discrepancy};
use crate::services::Summary;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Full ledger export structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FullExport {
    /// Schema version for compatibility checking
    pub schema_version: String,

    pub exported_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: String,

    /// Dashboard figures at export time
    pub summary: Summary,

    pub balances: Vec<BalanceRow>,

    pub movements: Vec<MovementRecord>,
}

impl FullExport {
    /// Snapshot a ledger
    pub fn from_ledger(ledger: &Ledger) -> Self {
        Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            summary: Summary::from_balances(&ledger.balances),
            balances: ledger.sorted_balances().into_iter().cloned().collect(),
            movements: ledger.movements.clone(),
        }
    }

    /// Check the schema version, then report any way the exported tables
    /// fail to reconcile
    pub fn validate(&self) -> StockResult<Vec<Discrepancy>> {
        if self.schema_version != EXPORT_SCHEMA_VERSION {
            return Err(StockError::Export(format!(
                "Schema version mismatch: expected {}, got {}",
                EXPORT_SCHEMA_VERSION, self.schema_version
            )));
        }

        let ledger = Ledger::from_parts(self.balances.clone(), self.movements.clone());
        Ok(verify(&ledger))
    }
}

/// Export the full ledger to JSON
pub fn export_full_json<W: Write>(ledger: &Ledger, writer: &mut W, pretty: bool) -> StockResult<()> {
    let export = FullExport::from_ledger(ledger);

    if pretty {
        serde_json::to_writer_pretty(writer, &export)
    } else {
        serde_json::to_writer(writer, &export)
    }
    .map_err(|e| StockError::Export(e.to_string()))?;

    Ok(())
}

/// Parse a JSON export back
pub fn import_from_json(json_str: &str) -> StockResult<FullExport> {
    serde_json::from_str(json_str)
        .map_err(|e| StockError::Export(format!("Invalid export file: {}", e)))
}
