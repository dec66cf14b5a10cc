//! Configuration module for the stock ledger
//!
//! This module provides configuration management including:
//! - XDG-compliant path resolution
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::StockPaths;
pub use settings::Settings;
