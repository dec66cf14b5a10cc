//! Stock item balance model
//!
//! A `BalanceRow` is the current on-hand quantity for one item. Matching is
//! always done on the canonical `ItemKey`; the row keeps the display casing
//! that was last written.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::price::Price;

/// Canonical, case-insensitive form of an item name
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ItemKey(String);

impl ItemKey {
    /// Build the key for a display name: trimmed and lowercased
    pub fn new(name: &str) -> Self {
        Self(name.trim().to_lowercase())
    }

    /// True when the name was blank
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Current balance for one stock item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceRow {
    /// Display name, as last written
    #[serde(alias = "Item")]
    pub name: String,

    /// Quantity on hand; rows reaching zero are removed from the ledger
    #[serde(alias = "Quantidade")]
    pub quantity: u64,

    /// Last known unit price
    #[serde(default)]
    pub unit_price: Option<Price>,
}

impl BalanceRow {
    /// Create a new balance row
    pub fn new(name: impl Into<String>, quantity: u64, unit_price: Option<Price>) -> Self {
        Self {
            name: name.into(),
            quantity,
            unit_price,
        }
    }

    /// Canonical key of this row's name
    pub fn key(&self) -> ItemKey {
        ItemKey::new(&self.name)
    }

    /// Check whether `name` refers to this item
    pub fn matches(&self, key: &ItemKey) -> bool {
        &self.key() == key
    }

    /// Stock value of this row (quantity x unit price), if priced
    pub fn value(&self) -> Option<Price> {
        self.unit_price.map(|p| p.times(self.quantity))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_is_trimmed_and_lowercased() {
        assert_eq!(ItemKey::new("  Widget "), ItemKey::new("widget"));
        assert_eq!(ItemKey::new("PARAFUSO").as_str(), "parafuso");
        assert!(ItemKey::new("   ").is_empty());
    }

    #[test]
    fn test_key_handles_unicode_case() {
        assert_eq!(ItemKey::new("Saída"), ItemKey::new("SAÍDA"));
    }

    #[test]
    fn test_matches() {
        let row = BalanceRow::new("Widget", 3, None);
        assert!(row.matches(&ItemKey::new("WIDGET")));
        assert!(!row.matches(&ItemKey::new("Widgets")));
    }

    #[test]
    fn test_value() {
        let priced = BalanceRow::new("Widget", 4, Some(Price::from_cents(250)));
        assert_eq!(priced.value(), Some(Price::from_cents(1000)));

        let unpriced = BalanceRow::new("Bolt", 4, None);
        assert_eq!(unpriced.value(), None);
    }
}
