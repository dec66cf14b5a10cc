//! Movement log model
//!
//! One `MovementRecord` per inflow or outflow. Records are append-only; the
//! only in-place change is the name rewrite performed by a rename.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::item::ItemKey;
use super::price::Price;

/// Direction of a stock movement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MovementKind {
    /// Stock received
    #[serde(alias = "Entrada", alias = "entrada", alias = "Inflow")]
    Inflow,
    /// Stock issued
    #[serde(alias = "Saída", alias = "saída", alias = "saida", alias = "Saida", alias = "Outflow")]
    Outflow,
}

impl fmt::Display for MovementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MovementKind::Inflow => write!(f, "Inflow"),
            MovementKind::Outflow => write!(f, "Outflow"),
        }
    }
}

/// A single entry of the movement log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovementRecord {
    #[serde(alias = "Timestamp", deserialize_with = "timestamp::deserialize")]
    pub timestamp: DateTime<Utc>,
    #[serde(alias = "Tipo")]
    pub kind: MovementKind,
    #[serde(alias = "Item")]
    pub name: String,
    #[serde(alias = "Quantidade")]
    pub quantity: u64,
    #[serde(default)]
    pub unit_price: Option<Price>,
}

impl MovementRecord {
    /// Create an inflow record
    pub fn inflow(
        timestamp: DateTime<Utc>,
        name: impl Into<String>,
        quantity: u64,
        unit_price: Option<Price>,
    ) -> Self {
        Self {
            timestamp,
            kind: MovementKind::Inflow,
            name: name.into(),
            quantity,
            unit_price,
        }
    }

    /// Create an outflow record
    pub fn outflow(
        timestamp: DateTime<Utc>,
        name: impl Into<String>,
        quantity: u64,
        unit_price: Option<Price>,
    ) -> Self {
        Self {
            timestamp,
            kind: MovementKind::Outflow,
            name: name.into(),
            quantity,
            unit_price,
        }
    }

    pub fn key(&self) -> ItemKey {
        ItemKey::new(&self.name)
    }

    /// Quantity with sign: positive for inflows, negative for outflows
    pub fn signed_quantity(&self) -> i128 {
        match self.kind {
            MovementKind::Inflow => i128::from(self.quantity),
            MovementKind::Outflow => -i128::from(self.quantity),
        }
    }
}

/// Timestamps are written as RFC 3339; older sheets used a naive
/// `YYYY-MM-DD HH:MM:SS` form, which is read as UTC.
mod timestamp {
    use chrono::{DateTime, NaiveDateTime, Utc};
    use serde::{Deserialize, Deserializer};

    const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%d %H:%M"];

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        let raw = raw.trim();

        if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
            return Ok(parsed.with_timezone(&Utc));
        }

        NAIVE_FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
            .map(|naive| naive.and_utc())
            .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {}", raw)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signed_quantity() {
        let now = Utc::now();
        assert_eq!(MovementRecord::inflow(now, "Bolt", 7, None).signed_quantity(), 7);
        assert_eq!(
            MovementRecord::outflow(now, "Bolt", 3, None).signed_quantity(),
            -3
        );
    }

    #[test]
    fn test_kind_serialization() {
        assert_eq!(
            serde_json::to_string(&MovementKind::Inflow).unwrap(),
            "\"inflow\""
        );
        let legacy: MovementKind = serde_json::from_str("\"Saída\"").unwrap();
        assert_eq!(legacy, MovementKind::Outflow);
        let legacy: MovementKind = serde_json::from_str("\"Entrada\"").unwrap();
        assert_eq!(legacy, MovementKind::Inflow);
    }

    #[test]
    fn test_timestamp_formats() {
        let json = r#"{"timestamp":"2024-03-01 09:30:00","kind":"inflow","name":"Bolt","quantity":3}"#;
        let record: MovementRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.timestamp.to_rfc3339(), "2024-03-01T09:30:00+00:00");
        assert_eq!(record.unit_price, None);

        let json = r#"{"timestamp":"2024-03-01T09:30:00-03:00","kind":"outflow","name":"Bolt","quantity":1}"#;
        let record: MovementRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.timestamp.to_rfc3339(), "2024-03-01T12:30:00+00:00");
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(MovementKind::Inflow.to_string(), "Inflow");
        assert_eq!(MovementKind::Outflow.to_string(), "Outflow");
    }
}
