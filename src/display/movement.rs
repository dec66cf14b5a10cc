//! Movement history display formatting

use std::fmt::Write;

use chrono::{DateTime, SecondsFormat, Utc};

use crate::models::{MovementKind, MovementRecord};

/// Format movement records as a table, oldest first
pub fn format_movement_list(
    movements: &[MovementRecord],
    currency: &str,
    date_format: &str,
    with_prices: bool,
) -> String {
    if movements.is_empty() {
        return "No movements recorded.".to_string();
    }

    let name_width = movements
        .iter()
        .map(|m| m.name.chars().count())
        .max()
        .unwrap_or(4)
        .max(4);

    let dates: Vec<String> = movements
        .iter()
        .map(|m| format_timestamp(&m.timestamp, date_format))
        .collect();
    let date_width = dates.iter().map(|d| d.len()).max().unwrap_or(4).max(4);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<date_width$}  {:<7}  {:<name_width$}  {:>10}",
        "When",
        "Kind",
        "Item",
        "Quantity",
        date_width = date_width,
        name_width = name_width,
    ));
    if with_prices {
        output.push_str(&format!("  {:>12}", "Unit Price"));
    }
    output.push('\n');

    let rule_width = date_width + name_width + 23 + if with_prices { 14 } else { 0 };
    output.push_str(&"-".repeat(rule_width));
    output.push('\n');

    for (movement, date) in movements.iter().zip(&dates) {
        let signed = match movement.kind {
            MovementKind::Inflow => format!("+{}", movement.quantity),
            MovementKind::Outflow => format!("-{}", movement.quantity),
        };
        output.push_str(&format!(
            "{:<date_width$}  {:<7}  {:<name_width$}  {:>10}",
            date,
            movement.kind.to_string(),
            movement.name,
            signed,
            date_width = date_width,
            name_width = name_width,
        ));
        if with_prices {
            let price = movement
                .unit_price
                .map(|p| p.format_with_symbol(currency))
                .unwrap_or_else(|| "-".to_string());
            output.push_str(&format!("  {:>12}", price));
        }
        output.push('\n');
    }

    output
}

/// Render with `date_format`, or RFC 3339 if the format is not valid strftime
fn format_timestamp(timestamp: &DateTime<Utc>, date_format: &str) -> String {
    let mut out = String::new();
    match write!(out, "{}", timestamp.format(date_format)) {
        Ok(()) => out,
        Err(_) => timestamp.to_rfc3339_opts(SecondsFormat::Secs, true),
    }
}
