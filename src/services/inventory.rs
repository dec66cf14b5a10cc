//! Inventory service
//!
//! Runs every change as one read-modify-write cycle against the ledger store:
//! load both tables fresh, apply the operation in memory, save both tables
//! whole, then append to the audit log. Nothing is cached between calls, and
//! nothing is saved when the operation is rejected.
//!
//! There is no locking. If two sessions load the same tables and both save,
//! the second save silently replaces the first one's changes.

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::audit::{generate_diff, AuditEntry, AuditLogger, EntityType};
use crate::error::{StockError, StockResult};
use crate::models::{BalanceRow, ItemKey, Ledger, MovementRecord, Price};
use crate::storage::LedgerStore;

use super::reconciliation::{self, Discrepancy, Operation};
use super::summary::Summary;

/// Service for stock movements and item maintenance
pub struct InventoryService<'a, S: LedgerStore> {
    store: &'a S,
    audit: Option<&'a AuditLogger>,
}

impl<'a, S: LedgerStore> InventoryService<'a, S> {
    /// Create a new inventory service over a store
    pub fn new(store: &'a S) -> Self {
        Self { store, audit: None }
    }

    /// Record successful changes in an audit log
    pub fn with_audit(mut self, audit: &'a AuditLogger) -> Self {
        self.audit = Some(audit);
        self
    }

    /// Receive stock (inflow); returns the updated balance row
    pub fn receive(
        &self,
        name: &str,
        quantity: u64,
        unit_price: Option<Price>,
    ) -> StockResult<BalanceRow> {
        let op = Operation::Inflow {
            name: name.to_string(),
            quantity,
            unit_price,
        };
        let ledger = self.execute(&op)?;
        ledger
            .find(name)
            .cloned()
            .ok_or_else(|| StockError::item_not_found(name.trim()))
    }

    /// Issue stock (outflow); returns the remaining row, or `None` if it
    /// reached zero and was removed
    pub fn issue(&self, name: &str, quantity: u64) -> StockResult<Option<BalanceRow>> {
        let op = Operation::Outflow {
            name: name.to_string(),
            quantity,
        };
        let ledger = self.execute(&op)?;
        Ok(ledger.find(name).cloned())
    }

    /// Rename an item and optionally reprice it; returns the renamed row
    pub fn rename(
        &self,
        old_name: &str,
        new_name: &str,
        new_price: Option<Price>,
    ) -> StockResult<BalanceRow> {
        let op = Operation::Rename {
            old_name: old_name.to_string(),
            new_name: new_name.to_string(),
            new_price,
        };
        let ledger = self.execute(&op)?;
        ledger
            .find(new_name)
            .cloned()
            .ok_or_else(|| StockError::item_not_found(new_name.trim()))
    }

    /// Apply an operation stamped with the current time
    pub fn execute(&self, op: &Operation) -> StockResult<Ledger> {
        self.execute_at(op, Utc::now())
    }

    /// Apply an operation stamped with `at`
    ///
    /// Load and save failures surface as `StoreUnavailable`; rejected
    /// operations surface their engine error. In both cases the store is left
    /// as it was.
    pub fn execute_at(&self, op: &Operation, at: DateTime<Utc>) -> StockResult<Ledger> {
        let current = self.store.load().map_err(|e| {
            warn!(operation = %op, error = %e, "could not load ledger");
            e
        })?;

        let updated = reconciliation::apply(&current, op, at).map_err(|e| {
            warn!(operation = %op, error = %e, "operation rejected");
            e
        })?;

        self.store.save(&updated).map_err(|e| {
            warn!(operation = %op, error = %e, "could not save ledger");
            e
        })?;

        info!(
            operation = %op,
            balances = updated.balances.len(),
            movements = updated.movements.len(),
            "operation applied"
        );

        self.record_audit(op, &current, &updated);
        Ok(updated)
    }

    /// Current balances sorted by name; empty if the store is unavailable
    pub fn balances(&self) -> Vec<BalanceRow> {
        let ledger = self.store.load_or_empty();
        ledger.sorted_balances().into_iter().cloned().collect()
    }

    /// Look up one item
    pub fn find(&self, name: &str) -> Option<BalanceRow> {
        self.store.load_or_empty().find(name).cloned()
    }

    /// Movement history, oldest first, optionally for one item and limited
    /// to the most recent `limit` records
    pub fn movements(&self, item: Option<&str>, limit: Option<usize>) -> Vec<MovementRecord> {
        let ledger = self.store.load_or_empty();
        let mut movements: Vec<MovementRecord> = match item {
            Some(name) => ledger.movements_for(name).into_iter().cloned().collect(),
            None => ledger.movements,
        };

        if let Some(limit) = limit {
            let start = movements.len().saturating_sub(limit);
            movements.drain(..start);
        }

        movements
    }

    /// Dashboard figures, recomputed from the current balances
    pub fn summary(&self) -> Summary {
        Summary::from_balances(&self.store.load_or_empty().balances)
    }

    /// Verify the stored ledger reconciles
    ///
    /// Unlike the read views this needs the real tables, so an unavailable
    /// store is an error here.
    pub fn check(&self) -> StockResult<Vec<Discrepancy>> {
        let ledger = self.store.load()?;
        Ok(reconciliation::verify(&ledger))
    }

    fn record_audit(&self, op: &Operation, before: &Ledger, after: &Ledger) {
        let Some(audit) = self.audit else {
            return;
        };

        let (old_name, new_name) = match op {
            Operation::Inflow { name, .. } | Operation::Outflow { name, .. } => {
                (name.as_str(), name.as_str())
            }
            Operation::Rename {
                old_name, new_name, ..
            } => (old_name.as_str(), new_name.as_str()),
        };

        let entry = match (before.find(old_name), after.find(new_name)) {
            (None, Some(row)) => Some(AuditEntry::create(
                EntityType::Item,
                row.key().to_string(),
                Some(row.name.clone()),
                row,
            )),
            (Some(prev), Some(row)) if prev != row => {
                let diff = match (serde_json::to_value(prev), serde_json::to_value(row)) {
                    (Ok(b), Ok(a)) => generate_diff(&b, &a),
                    _ => None,
                };
                Some(AuditEntry::update(
                    EntityType::Item,
                    ItemKey::new(old_name).to_string(),
                    Some(row.name.clone()),
                    prev,
                    row,
                    diff,
                ))
            }
            (Some(prev), None) => Some(AuditEntry::delete(
                EntityType::Item,
                prev.key().to_string(),
                Some(prev.name.clone()),
                prev,
            )),
            _ => None,
        };

        if let Some(entry) = entry {
            // The ledger is already saved; a lost audit line must not fail the operation
            if let Err(e) = audit.log(&entry.with_cause(op.to_string())) {
                warn!(error = %e, "failed to write audit entry");
            }
        }
    }
}
