//! Audit logging for the stock ledger
//!
//! Records every successful change to a balance row, with before/after
//! values, in an append-only audit log next to the ledger files.
//!
//! # Architecture
//!
//! - `AuditEntry`: a single entry with timestamp, action, item and optional
//!   before/after values.
//! - `AuditLogger`: appends entries to the log file as line-delimited JSON
//!   (JSONL) and reads them back.
//! - `generate_diff`: builds a human-readable summary of what changed.
//!
//! # Example
//!
//! ```rust,ignore
//! use stock_ledger::audit::{AuditEntry, AuditLogger, EntityType, generate_diff};
//!
//! let logger = AuditLogger::new(paths.audit_log());
//! let diff = generate_diff(&before_json, &after_json);
//! let entry = AuditEntry::update(
//!     EntityType::Item,
//!     "widget",
//!     Some("Widget".to_string()),
//!     &before,
//!     &after,
//!     diff,
//! );
//! logger.log(&entry)?;
//! ```

mod diff;
mod entry;
mod logger;

pub use diff::generate_diff;
pub use entry::{Action, AuditEntry, EntityType};
pub use logger::AuditLogger;
