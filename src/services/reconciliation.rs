//! Stock ledger reconciliation
//!
//! Pure functions that apply one operation to a `Ledger` and return the
//! updated ledger. The input is only borrowed, so a failed precondition leaves
//! the caller's tables exactly as they were and nothing reaches the store.
//!
//! After every successful call, each balance row equals the signed sum of the
//! movements sharing its canonical key, and no balance is zero or negative.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};

use crate::error::{StockError, StockResult};
use crate::models::{BalanceRow, ItemKey, Ledger, MovementRecord, Price};

/// One user-submitted change to the ledger
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    Inflow {
        name: String,
        quantity: u64,
        unit_price: Option<Price>,
    },
    Outflow {
        name: String,
        quantity: u64,
    },
    Rename {
        old_name: String,
        new_name: String,
        new_price: Option<Price>,
    },
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Inflow { name, quantity, .. } => {
                write!(f, "inflow {} x {}", quantity, name.trim())
            }
            Operation::Outflow { name, quantity } => {
                write!(f, "outflow {} x {}", quantity, name.trim())
            }
            Operation::Rename {
                old_name, new_name, ..
            } => write!(f, "rename '{}' -> '{}'", old_name.trim(), new_name.trim()),
        }
    }
}

/// Apply any operation at the given time
pub fn apply(ledger: &Ledger, op: &Operation, at: DateTime<Utc>) -> StockResult<Ledger> {
    match op {
        Operation::Inflow {
            name,
            quantity,
            unit_price,
        } => apply_inflow(ledger, name, *quantity, *unit_price, at),
        Operation::Outflow { name, quantity } => apply_outflow(ledger, name, *quantity, at),
        Operation::Rename {
            old_name,
            new_name,
            new_price,
        } => rename_item(ledger, old_name, new_name, *new_price),
    }
}

/// Receive `quantity` units of an item, creating its row if needed
///
/// A supplied price overwrites the stored one. The movement records the
/// supplied price, or the stored one when none was given.
pub fn apply_inflow(
    ledger: &Ledger,
    name: &str,
    quantity: u64,
    unit_price: Option<Price>,
    at: DateTime<Utc>,
) -> StockResult<Ledger> {
    let key = require_name(name)?;
    require_quantity(quantity)?;
    if let Some(price) = unit_price {
        require_price(price)?;
    }

    let mut updated = ledger.clone();
    let movement = match updated.position(&key) {
        Some(idx) => {
            let row = &mut updated.balances[idx];
            row.quantity = row.quantity.checked_add(quantity).ok_or_else(|| {
                StockError::Validation(format!("Quantity overflow for '{}'", row.name))
            })?;
            if unit_price.is_some() {
                row.unit_price = unit_price;
            }
            MovementRecord::inflow(at, row.name.clone(), quantity, row.unit_price)
        }
        None => {
            let display = name.trim().to_string();
            updated
                .balances
                .push(BalanceRow::new(display.clone(), quantity, unit_price));
            MovementRecord::inflow(at, display, quantity, unit_price)
        }
    };

    updated.movements.push(movement);
    Ok(updated)
}

/// Issue `quantity` units of an existing item
///
/// The row is removed when it reaches zero. Issuing more than is on hand
/// fails with `InsufficientStock`.
pub fn apply_outflow(
    ledger: &Ledger,
    name: &str,
    quantity: u64,
    at: DateTime<Utc>,
) -> StockResult<Ledger> {
    let key = require_name(name)?;
    require_quantity(quantity)?;

    let idx = ledger
        .position(&key)
        .ok_or_else(|| StockError::item_not_found(name.trim()))?;
    let current = &ledger.balances[idx];

    if quantity > current.quantity {
        return Err(StockError::InsufficientStock {
            item: current.name.clone(),
            requested: quantity,
            available: current.quantity,
        });
    }

    let mut updated = ledger.clone();
    updated.movements.push(MovementRecord::outflow(
        at,
        current.name.clone(),
        quantity,
        current.unit_price,
    ));

    let remaining = current.quantity - quantity;
    if remaining == 0 {
        updated.balances.remove(idx);
    } else {
        updated.balances[idx].quantity = remaining;
    }

    Ok(updated)
}

/// Rename an item, optionally setting a new price
///
/// Every historical movement of the old name is rewritten to the new one.
/// Renaming to a different item's name (case-insensitive) fails with
/// `DuplicateName`; changing only the casing is allowed.
pub fn rename_item(
    ledger: &Ledger,
    old_name: &str,
    new_name: &str,
    new_price: Option<Price>,
) -> StockResult<Ledger> {
    let new_key = require_name(new_name)?;
    let old_key = ItemKey::new(old_name);
    if let Some(price) = new_price {
        require_price(price)?;
    }

    let idx = ledger
        .position(&old_key)
        .ok_or_else(|| StockError::item_not_found(old_name.trim()))?;

    if new_key != old_key && ledger.position(&new_key).is_some() {
        return Err(StockError::DuplicateName {
            name: new_name.trim().to_string(),
        });
    }

    let display = new_name.trim().to_string();
    let mut updated = ledger.clone();

    let row = &mut updated.balances[idx];
    row.name = display.clone();
    if new_price.is_some() {
        row.unit_price = new_price;
    }

    for movement in updated.movements.iter_mut() {
        if movement.key() == old_key {
            movement.name = display.clone();
        }
    }

    Ok(updated)
}

/// A way in which a ledger fails to reconcile
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Discrepancy {
    /// Balance differs from the signed sum of its movements
    BalanceMismatch {
        name: String,
        balance: u64,
        from_movements: i128,
    },
    /// Several balance rows share one canonical key
    DuplicateKey { key: String, rows: usize },
    /// A row with zero quantity was kept instead of removed
    ZeroBalance { name: String },
    /// Movements net to a non-zero quantity but no balance row exists
    MissingBalance { name: String, net: i128 },
}

impl fmt::Display for Discrepancy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Discrepancy::BalanceMismatch {
                name,
                balance,
                from_movements,
            } => write!(
                f,
                "'{}': balance is {} but movements sum to {}",
                name, balance, from_movements
            ),
            Discrepancy::DuplicateKey { key, rows } => {
                write!(f, "'{}': {} balance rows share this name", key, rows)
            }
            Discrepancy::ZeroBalance { name } => {
                write!(f, "'{}': zero-quantity row should have been removed", name)
            }
            Discrepancy::MissingBalance { name, net } => write!(
                f,
                "'{}': movements sum to {} but there is no balance row",
                name, net
            ),
        }
    }
}

/// Check the balance/movement invariant across the whole ledger
///
/// Returns an empty list when the ledger reconciles.
pub fn verify(ledger: &Ledger) -> Vec<Discrepancy> {
    let mut net: BTreeMap<ItemKey, (String, i128)> = BTreeMap::new();
    for movement in &ledger.movements {
        let entry = net
            .entry(movement.key())
            .or_insert_with(|| (movement.name.clone(), 0));
        entry.1 += movement.signed_quantity();
    }

    let mut rows_per_key: BTreeMap<ItemKey, usize> = BTreeMap::new();
    let mut issues = Vec::new();

    for row in &ledger.balances {
        let key = row.key();
        *rows_per_key.entry(key.clone()).or_insert(0) += 1;

        if row.quantity == 0 {
            issues.push(Discrepancy::ZeroBalance {
                name: row.name.clone(),
            });
        }

        let from_movements = net.get(&key).map(|(_, total)| *total).unwrap_or(0);
        if i128::from(row.quantity) != from_movements {
            issues.push(Discrepancy::BalanceMismatch {
                name: row.name.clone(),
                balance: row.quantity,
                from_movements,
            });
        }
    }

    for (key, rows) in &rows_per_key {
        if *rows > 1 {
            issues.push(Discrepancy::DuplicateKey {
                key: key.to_string(),
                rows: *rows,
            });
        }
    }

    for (key, (name, total)) in &net {
        if *total != 0 && !rows_per_key.contains_key(key) {
            issues.push(Discrepancy::MissingBalance {
                name: name.clone(),
                net: *total,
            });
        }
    }

    issues
}

fn require_name(name: &str) -> StockResult<ItemKey> {
    let key = ItemKey::new(name);
    if key.is_empty() {
        return Err(StockError::EmptyName);
    }
    Ok(key)
}

fn require_quantity(quantity: u64) -> StockResult<()> {
    if quantity == 0 {
        return Err(StockError::Validation(
            "Quantity must be at least 1".into(),
        ));
    }
    Ok(())
}

fn require_price(price: Price) -> StockResult<()> {
    if !price.is_positive() {
        return Err(StockError::Validation(format!(
            "Unit price must be at least 0.01, got {}",
            price
        )));
    }
    Ok(())
}
