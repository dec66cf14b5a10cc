//! Balance display formatting
//!
//! Formats the balance table and the dashboard summary for terminal output.

use crate::models::BalanceRow;
use crate::services::Summary;

/// Format the balance table, with price and value columns when `with_prices`
pub fn format_balance_list(rows: &[BalanceRow], currency: &str, with_prices: bool) -> String {
    if rows.is_empty() {
        return "No items in stock.".to_string();
    }

    let name_width = rows
        .iter()
        .map(|r| r.name.chars().count())
        .max()
        .unwrap_or(4)
        .max(4);

    let price = |row: &BalanceRow| {
        row.unit_price
            .map(|p| p.format_with_symbol(currency))
            .unwrap_or_else(|| "-".to_string())
    };
    let value = |row: &BalanceRow| {
        row.value()
            .map(|p| p.format_with_symbol(currency))
            .unwrap_or_else(|| "-".to_string())
    };

    let mut output = String::new();
    if with_prices {
        output.push_str(&format!(
            "{:<name_width$}  {:>10}  {:>12}  {:>14}\n",
            "Item",
            "Quantity",
            "Unit Price",
            "Value",
            name_width = name_width,
        ));
        output.push_str(&format!(
            "{:-<name_width$}  {:->10}  {:->12}  {:->14}\n",
            "",
            "",
            "",
            "",
            name_width = name_width,
        ));
        for row in rows {
            output.push_str(&format!(
                "{:<name_width$}  {:>10}  {:>12}  {:>14}\n",
                row.name,
                row.quantity,
                price(row),
                value(row),
                name_width = name_width,
            ));
        }
    } else {
        output.push_str(&format!(
            "{:<name_width$}  {:>10}\n",
            "Item",
            "Quantity",
            name_width = name_width,
        ));
        output.push_str(&format!(
            "{:-<name_width$}  {:->10}\n",
            "",
            "",
            name_width = name_width,
        ));
        for row in rows {
            output.push_str(&format!(
                "{:<name_width$}  {:>10}\n",
                row.name,
                row.quantity,
                name_width = name_width,
            ));
        }
    }

    output
}

/// Format the dashboard figures
pub fn format_summary(summary: &Summary, currency: &str, with_prices: bool) -> String {
    let mut output = String::new();
    output.push_str(&format!("Unique items:    {}\n", summary.unique_items));
    output.push_str(&format!("Total quantity:  {}\n", summary.total_quantity));
    if with_prices {
        output.push_str(&format!(
            "Total value:     {}\n",
            summary.total_value.format_with_symbol(currency)
        ));
        let unpriced = summary.unique_items - summary.priced_items;
        if unpriced > 0 {
            output.push_str(&format!("  ({} item(s) without a unit price)\n", unpriced));
        }
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Price;

    #[test]
    fn test_empty_list() {
        assert_eq!(format_balance_list(&[], "$", true), "No items in stock.");
    }

    #[test]
    fn test_list_with_prices() {
        let rows = vec![
            BalanceRow::new("Widget", 15, Some(Price::from_cents(300))),
            BalanceRow::new("Bolt", 3, None),
        ];
        let output = format_balance_list(&rows, "$", true);

        assert!(output.contains("Unit Price"));
        assert!(output.contains("$3.00"));
        assert!(output.contains("$45.00"));
        assert_eq!(output.lines().count(), 4);
    }

    #[test]
    fn test_list_without_prices() {
        let rows = vec![BalanceRow::new("Widget", 15, Some(Price::from_cents(300)))];
        let output = format_balance_list(&rows, "$", false);

        assert!(!output.contains("Unit Price"));
        assert!(!output.contains("$3.00"));
        assert!(output.contains("15"));
    }

    #[test]
    fn test_summary() {
        let summary = Summary::from_balances(&[
            BalanceRow::new("Widget", 15, Some(Price::from_cents(300))),
            BalanceRow::new("Bolt", 3, None),
        ]);
        let output = format_summary(&summary, "R$", true);

        assert!(output.contains("Unique items:    2"));
        assert!(output.contains("Total quantity:  18"));
        assert!(output.contains("R$45.00"));
        assert!(output.contains("1 item(s) without a unit price"));
    }
}
