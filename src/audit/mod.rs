//! Audit logging for BankLite
//!
//! Every committed mutation is appended to `audit.log` as one JSON line.
//! The transaction history on each account is what users see; the audit log
//! is the operator's record of what the ledger did and when.
//!
//! # Example
//!
//! ```rust,ignore
//! use banklite::audit::{AuditEntry, AuditLogger};
//!
//! let logger = AuditLogger::new(paths.audit_log());
//! logger.log(&AuditEntry::deposit(&account, amount))?;
//! for entry in logger.read_recent(10)? {
//!     println!("{}", entry.format_human_readable());
//! }
//! ```

mod entry;
mod logger;

pub use entry::{AuditEntry, Operation};
pub use logger::AuditLogger;
