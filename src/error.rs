//! Custom error types for the stock ledger
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions. Every variant is recoverable at the CLI
//! boundary: it is reported as a message and the attempted operation is
//! discarded without writing anything.

use thiserror::Error;

/// The main error type for stock ledger operations
#[derive(Error, Debug)]
pub enum StockError {
    /// Item name was blank after trimming
    #[error("Item name cannot be empty")]
    EmptyName,

    /// Outflow larger than the quantity on hand
    #[error("Insufficient stock for '{item}': requested {requested}, available {available}")]
    InsufficientStock {
        item: String,
        requested: u64,
        available: u64,
    },

    /// Rename target collides with another item (case-insensitive)
    #[error("An item named '{name}' already exists")]
    DuplicateName { name: String },

    /// The ledger store could not be read or written
    #[error("Ledger store unavailable: {0}")]
    StoreUnavailable(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Validation errors for quantities and prices
    #[error("Validation error: {0}")]
    Validation(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// CSV serialization/deserialization errors
    #[error("CSV error: {0}")]
    Csv(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),
}

impl StockError {
    /// Create a "not found" error for stock items
    pub fn item_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Item",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error (including blank names)
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::EmptyName)
    }

    /// Check if the backing store failed
    pub fn is_store_unavailable(&self) -> bool {
        matches!(self, Self::StoreUnavailable(_))
    }
}

impl From<std::io::Error> for StockError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for StockError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<csv::Error> for StockError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err.to_string())
    }
}

/// Result type alias for stock ledger operations
pub type StockResult<T> = Result<T, StockError>;
