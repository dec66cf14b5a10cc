//! CSV Export functionality
//!
//! Writes either ledger table as delimited text with a header line, using
//! the same layout as the CSV store. Reads nothing and changes nothing.

use std::io::Write;

use crate::error::{StockError, StockResult};
use crate::models::Ledger;
use crate::storage::csv_codec::{write_balances, write_movements};

/// Export the balance table, sorted by item name
pub fn export_balances_csv<W: Write>(
    ledger: &Ledger,
    writer: &mut W,
    with_prices: bool,
) -> StockResult<()> {
    let rows: Vec<_> = ledger.sorted_balances().into_iter().cloned().collect();
    write_balances(writer, &rows, with_prices).map_err(|e| StockError::Export(e.to_string()))
}

/// Export the movement log in recorded order
pub fn export_movements_csv<W: Write>(
    ledger: &Ledger,
    writer: &mut W,
    with_prices: bool,
) -> StockResult<()> {
    write_movements(writer, &ledger.movements, with_prices)
        .map_err(|e| StockError::Export(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BalanceRow, MovementRecord, Price};
    use chrono::{TimeZone, Utc};

    fn sample_ledger() -> Ledger {
        let at = Utc.with_ymd_and_hms(2024, 5, 2, 14, 0, 0).unwrap();
        Ledger::from_parts(
            vec![
                BalanceRow::new("Widget", 15, Some(Price::from_cents(300))),
                BalanceRow::new("bolt", 2, None),
            ],
            vec![
                MovementRecord::inflow(at, "Widget", 15, Some(Price::from_cents(300))),
                MovementRecord::inflow(at, "bolt", 2, None),
            ],
        )
    }

    #[test]
    fn test_export_balances_csv() {
        let mut output = Vec::new();
        export_balances_csv(&sample_ledger(), &mut output, true).unwrap();

        let csv_string = String::from_utf8(output).unwrap();
        let lines: Vec<_> = csv_string.lines().collect();
        assert_eq!(lines, vec!["name,quantity,unit_price", "bolt,2,", "Widget,15,3.00"]);
    }

    #[test]
    fn test_export_movements_csv() {
        let mut output = Vec::new();
        export_movements_csv(&sample_ledger(), &mut output, false).unwrap();

        let csv_string = String::from_utf8(output).unwrap();
        assert!(csv_string.starts_with("timestamp,kind,name,quantity\n"));
        assert!(csv_string.contains("2024-05-02T14:00:00Z,inflow,Widget,15\n"));
        assert_eq!(csv_string.lines().count(), 3);
    }

    #[test]
    fn test_export_empty_ledger_has_header_only() {
        let mut output = Vec::new();
        export_movements_csv(&Ledger::new(), &mut output, true).unwrap();
        assert_eq!(
            String::from_utf8(output).unwrap(),
            "timestamp,kind,name,quantity,unit_price\n"
        );
    }

    #[test]
    fn test_export_does_not_modify_ledger() {
        let ledger = sample_ledger();
        let snapshot = ledger.clone();
        let mut output = Vec::new();
        export_balances_csv(&ledger, &mut output, true).unwrap();
        assert_eq!(ledger, snapshot);
    }
}
