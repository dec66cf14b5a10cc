//! Dashboard figures derived from the current balances
//!
//! Nothing here is stored; the summary is recomputed on every read.

use serde::{Deserialize, Serialize};

use crate::models::{BalanceRow, Price};

/// Aggregate view over the balance table
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    /// Number of distinct items on hand
    pub unique_items: usize,
    /// Sum of all quantities
    pub total_quantity: u64,
    /// Sum of quantity x unit price over priced rows
    pub total_value: Price,
    /// Rows that carry a unit price
    pub priced_items: usize,
}

impl Summary {
    pub fn from_balances(balances: &[BalanceRow]) -> Self {
        Self {
            unique_items: balances.len(),
            total_quantity: balances
                .iter()
                .fold(0u64, |acc, row| acc.saturating_add(row.quantity)),
            total_value: balances.iter().filter_map(BalanceRow::value).sum(),
            priced_items: balances.iter().filter(|r| r.unit_price.is_some()).count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_summary() {
        assert_eq!(Summary::from_balances(&[]), Summary::default());
    }

    #[test]
    fn test_summary_figures() {
        let rows = vec![
            BalanceRow::new("Widget", 15, Some(Price::from_cents(300))),
            BalanceRow::new("Bolt", 3, None),
            BalanceRow::new("Nut", 10, Some(Price::from_cents(5))),
        ];
        let summary = Summary::from_balances(&rows);

        assert_eq!(summary.unique_items, 3);
        assert_eq!(summary.total_quantity, 28);
        assert_eq!(summary.total_value, Price::from_cents(4550));
        assert_eq!(summary.priced_items, 2);
    }
}
