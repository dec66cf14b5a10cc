//! The ledger value: current balances plus the movement log
//!
//! `Ledger` is a plain value threaded in and out of every engine call. It
//! holds no handle to the store it came from.

use serde::{Deserialize, Serialize};

use super::item::{BalanceRow, ItemKey};
use super::movement::MovementRecord;

/// Balances and movements, loaded and saved as a pair
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ledger {
    pub balances: Vec<BalanceRow>,
    pub movements: Vec<MovementRecord>,
}

impl Ledger {
    /// Create an empty ledger
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a ledger from already-loaded tables
    pub fn from_parts(balances: Vec<BalanceRow>, movements: Vec<MovementRecord>) -> Self {
        Self {
            balances,
            movements,
        }
    }

    /// Find the balance row for a name (case-insensitive)
    pub fn find(&self, name: &str) -> Option<&BalanceRow> {
        let key = ItemKey::new(name);
        self.balances.iter().find(|row| row.matches(&key))
    }

    /// Position of the balance row for a key
    pub(crate) fn position(&self, key: &ItemKey) -> Option<usize> {
        self.balances.iter().position(|row| row.matches(key))
    }

    /// All movements recorded for a name (case-insensitive), oldest first
    pub fn movements_for(&self, name: &str) -> Vec<&MovementRecord> {
        let key = ItemKey::new(name);
        self.movements.iter().filter(|m| m.key() == key).collect()
    }

    /// Signed sum of all movements recorded for a name
    pub fn signed_total(&self, name: &str) -> i128 {
        self.movements_for(name)
            .iter()
            .map(|m| m.signed_quantity())
            .sum()
    }

    /// Balance rows sorted by canonical key, for display and export
    pub fn sorted_balances(&self) -> Vec<&BalanceRow> {
        let mut rows: Vec<_> = self.balances.iter().collect();
        rows.sort_by_key(|row| row.key());
        rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MovementRecord;
    use chrono::Utc;

    fn sample() -> Ledger {
        let now = Utc::now();
        Ledger::from_parts(
            vec![
                BalanceRow::new("Widget", 8, None),
                BalanceRow::new("bolt", 2, None),
            ],
            vec![
                MovementRecord::inflow(now, "Widget", 10, None),
                MovementRecord::outflow(now, "widget", 2, None),
                MovementRecord::inflow(now, "bolt", 2, None),
            ],
        )
    }

    #[test]
    fn test_find_is_case_insensitive() {
        let ledger = sample();
        assert_eq!(ledger.find("WIDGET").unwrap().name, "Widget");
        assert_eq!(ledger.find(" Bolt ").unwrap().quantity, 2);
        assert!(ledger.find("nut").is_none());
    }

    #[test]
    fn test_signed_total() {
        let ledger = sample();
        assert_eq!(ledger.signed_total("Widget"), 8);
        assert_eq!(ledger.movements_for("widget").len(), 2);
        assert_eq!(ledger.signed_total("nut"), 0);
    }

    #[test]
    fn test_sorted_balances() {
        let ledger = sample();
        let names: Vec<_> = ledger.sorted_balances().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["bolt", "Widget"]);
    }
}
