//! Diff generation for audit logging
//!
//! Generates human-readable diffs between before and after values.

use serde_json::Value;

/// Generate a human-readable diff between two JSON values
///
/// Only top-level field changes are listed. Returns `None` when nothing changed.
pub fn generate_diff(before: &Value, after: &Value) -> Option<String> {
    match (before, after) {
        (Value::Object(before_obj), Value::Object(after_obj)) => {
            let mut changes = Vec::new();

            for (key, before_val) in before_obj {
                match after_obj.get(key) {
                    Some(after_val) if before_val != after_val => changes.push(format!(
                        "{}: {} -> {}",
                        key,
                        format_value(before_val),
                        format_value(after_val)
                    )),
                    Some(_) => {}
                    None => changes.push(format!(
                        "{}: {} -> (removed)",
                        key,
                        format_value(before_val)
                    )),
                }
            }

            for (key, after_val) in after_obj {
                if !before_obj.contains_key(key) {
                    changes.push(format!("{}: (added) -> {}", key, format_value(after_val)));
                }
            }

            if changes.is_empty() {
                None
            } else {
                Some(changes.join(", "))
            }
        }
        _ if before != after => Some(format!(
            "{} -> {}",
            format_value(before),
            format_value(after)
        )),
        _ => None,
    }
}

/// Format a JSON value for human-readable display
fn format_value(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => {
            if s.chars().count() > 50 {
                let head: String = s.chars().take(47).collect();
                format!("\"{}...\"", head)
            } else {
                format!("\"{}\"", s)
            }
        }
        Value::Array(arr) => format!("[{} items]", arr.len()),
        Value::Object(obj) => format!("{{{} fields}}", obj.len()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_quantity_change() {
        let before = json!({"name": "Widget", "quantity": 10});
        let after = json!({"name": "Widget", "quantity": 15});

        let diff = generate_diff(&before, &after).unwrap();
        assert_eq!(diff, "quantity: 10 -> 15");
    }

    #[test]
    fn test_rename_and_price_change() {
        let before = json!({"name": "Bolt", "quantity": 3, "unit_price": "0.10"});
        let after = json!({"name": "Hex Bolt", "quantity": 3, "unit_price": "0.15"});

        let diff = generate_diff(&before, &after).unwrap();
        assert!(diff.contains("name: \"Bolt\" -> \"Hex Bolt\""));
        assert!(diff.contains("unit_price: \"0.10\" -> \"0.15\""));
        assert!(!diff.contains("quantity"));
    }

    #[test]
    fn test_field_added_and_removed() {
        let before = json!({"name": "Test", "old_field": "value"});
        let after = json!({"name": "Test", "quantity": 100});

        let diff = generate_diff(&before, &after).unwrap();
        assert!(diff.contains("old_field: \"value\" -> (removed)"));
        assert!(diff.contains("quantity: (added) -> 100"));
    }

    #[test]
    fn test_no_changes() {
        let value = json!({"name": "Test", "quantity": 100});
        assert!(generate_diff(&value, &value).is_none());
    }

    #[test]
    fn test_null_handling() {
        let before = json!({"unit_price": null});
        let after = json!({"unit_price": "2.50"});

        let diff = generate_diff(&before, &after).unwrap();
        assert!(diff.contains("unit_price: null -> \"2.50\""));
    }

    #[test]
    fn test_long_unicode_string_truncation() {
        let before = json!({"name": "ç".repeat(100)});
        let after = json!({"name": "short"});

        let diff = generate_diff(&before, &after).unwrap();
        assert!(diff.contains("...\""));
    }

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(&json!(null)), "null");
        assert_eq!(format_value(&json!(true)), "true");
        assert_eq!(format_value(&json!(42)), "42");
        assert_eq!(format_value(&json!("test")), "\"test\"");
        assert_eq!(format_value(&json!([1, 2, 3])), "[3 items]");
        assert_eq!(format_value(&json!({"a": 1, "b": 2})), "{2 fields}");
    }
}
