//! CSV encoding of the two ledger tables
//!
//! Headers use the canonical column names. The `unit_price` column is only
//! written when prices are tracked, and is optional when reading.

use std::io::{Read, Write};

use chrono::SecondsFormat;

use crate::error::StockResult;
use crate::models::{BalanceRow, MovementRecord, Price};

pub const BALANCE_COLUMNS: [&str; 3] = ["name", "quantity", "unit_price"];
pub const MOVEMENT_COLUMNS: [&str; 5] = ["timestamp", "kind", "name", "quantity", "unit_price"];

fn price_field(price: Option<Price>) -> String {
    price.map(|p| p.to_string()).unwrap_or_default()
}

/// Write the balance table with a header line
pub fn write_balances<W: Write>(
    writer: W,
    rows: &[BalanceRow],
    with_prices: bool,
) -> StockResult<()> {
    let mut csv = csv::Writer::from_writer(writer);
    let columns = if with_prices { 3 } else { 2 };
    csv.write_record(&BALANCE_COLUMNS[..columns])?;

    for row in rows {
        let mut record = vec![row.name.clone(), row.quantity.to_string()];
        if with_prices {
            record.push(price_field(row.unit_price));
        }
        csv.write_record(&record)?;
    }

    csv.flush()?;
    Ok(())
}

/// Write the movement table with a header line
pub fn write_movements<W: Write>(
    writer: W,
    movements: &[MovementRecord],
    with_prices: bool,
) -> StockResult<()> {
    let mut csv = csv::Writer::from_writer(writer);
    let columns = if with_prices { 5 } else { 4 };
    csv.write_record(&MOVEMENT_COLUMNS[..columns])?;

    for movement in movements {
        let kind = match movement.kind {
            crate::models::MovementKind::Inflow => "inflow",
            crate::models::MovementKind::Outflow => "outflow",
        };
        let mut record = vec![
            movement
                .timestamp
                .to_rfc3339_opts(SecondsFormat::AutoSi, true),
            kind.to_string(),
            movement.name.clone(),
            movement.quantity.to_string(),
        ];
        if with_prices {
            record.push(price_field(movement.unit_price));
        }
        csv.write_record(&record)?;
    }

    csv.flush()?;
    Ok(())
}

/// Read a balance table, skipping fully blank lines
pub fn read_balances<R: Read>(reader: R) -> StockResult<Vec<BalanceRow>> {
    let mut csv = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut rows = Vec::new();
    for record in csv.deserialize() {
        rows.push(record?);
    }
    Ok(rows)
}

/// Read a movement table, skipping fully blank lines
pub fn read_movements<R: Read>(reader: R) -> StockResult<Vec<MovementRecord>> {
    let mut csv = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut movements = Vec::new();
    for record in csv.deserialize() {
        movements.push(record?);
    }
    Ok(movements)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MovementKind;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_balances_header_follows_price_tracking() {
        let rows = vec![BalanceRow::new("Widget", 15, Some(Price::from_cents(300)))];

        let mut with = Vec::new();
        write_balances(&mut with, &rows, true).unwrap();
        assert_eq!(
            String::from_utf8(with).unwrap(),
            "name,quantity,unit_price\nWidget,15,3.00\n"
        );

        let mut without = Vec::new();
        write_balances(&mut without, &rows, false).unwrap();
        assert_eq!(String::from_utf8(without).unwrap(), "name,quantity\nWidget,15\n");
    }

    #[test]
    fn test_names_with_commas_are_quoted() {
        let rows = vec![BalanceRow::new("Screw, 4mm", 2, None)];
        let mut out = Vec::new();
        write_balances(&mut out, &rows, true).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("\"Screw, 4mm\",2,"));

        let back = read_balances(text.as_bytes()).unwrap();
        assert_eq!(back, rows);
    }

    #[test]
    fn test_read_balances_without_price_column() {
        let rows = read_balances("name,quantity\nBolt,3\n".as_bytes()).unwrap();
        assert_eq!(rows, vec![BalanceRow::new("Bolt", 3, None)]);
    }

    #[test]
    fn test_read_balances_empty_price_is_none() {
        let rows = read_balances("name,quantity,unit_price\nBolt,3,\nNut,1,0.05\n".as_bytes())
            .unwrap();
        assert_eq!(rows[0].unit_price, None);
        assert_eq!(rows[1].unit_price, Some(Price::from_cents(5)));
    }

    #[test]
    fn test_movements_written_and_read() {
        let at = Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap();
        let movements = vec![
            MovementRecord::inflow(at, "Widget", 10, Some(Price::from_cents(250))),
            MovementRecord::outflow(at, "Widget", 4, Some(Price::from_cents(250))),
        ];

        let mut out = Vec::new();
        write_movements(&mut out, &movements, true).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("timestamp,kind,name,quantity,unit_price\n"));
        assert!(text.contains("2024-03-01T09:30:00Z,outflow,Widget,4,2.50"));

        let back = read_movements(text.as_bytes()).unwrap();
        assert_eq!(back, movements);
    }

    #[test]
    fn test_read_movements_accepts_legacy_values() {
        let text = "timestamp,kind,name,quantity\n2024-03-01 09:30:00,Entrada,Bolt,3\n2024-03-02 10:00:00,Saída,Bolt,1\n";
        let movements = read_movements(text.as_bytes()).unwrap();

        assert_eq!(movements.len(), 2);
        assert_eq!(movements[0].kind, MovementKind::Inflow);
        assert_eq!(movements[1].kind, MovementKind::Outflow);
        assert_eq!(
            movements[0].timestamp,
            Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap()
        );
    }

    #[test]
    fn test_read_legacy_sheet_headers() {
        let rows = read_balances("Item,Quantidade\nBolt,2\n".as_bytes()).unwrap();
        assert_eq!(rows, vec![BalanceRow::new("Bolt", 2, None)]);

        let text = "Timestamp,Tipo,Item,Quantidade\n2024-03-01 09:30:00,Entrada,Bolt,3\n2024-03-02 10:00:00,Saída,Bolt,1\n";
        let movements = read_movements(text.as_bytes()).unwrap();
        assert_eq!(movements.len(), 2);
        assert_eq!(movements[1].kind, MovementKind::Outflow);
        assert_eq!(movements[1].name, "Bolt");
        assert_eq!(movements[1].quantity, 1);
    }

    #[test]
    fn test_malformed_quantity_is_error() {
        assert!(read_balances("name,quantity\nBolt,lots\n".as_bytes()).is_err());
        assert!(read_balances("name,quantity\nBolt,-1\n".as_bytes()).is_err());
    }
}
