//! Core data models for BankLite
//!
//! This module contains the data structures of the ledger domain: accounts,
//! their identities, money amounts and transaction log entries.

pub mod account;
pub mod entry;
pub mod ids;
pub mod money;

pub use account::{Account, AccountValidationError};
pub use entry::{EntryKind, EntryParseError, LogEntry};
pub use ids::AccountId;
pub use money::{Money, MoneyParseError};
