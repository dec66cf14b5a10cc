//! Display formatting for terminal output
//!
//! Provides utilities for formatting balances, movements and the dashboard
//! summary as plain-text tables.

pub mod balance;
pub mod movement;

pub use balance::{format_balance_list, format_summary};
pub use movement::format_movement_list;
