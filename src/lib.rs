//! BankLite - a single-user ledger of bank accounts
//!
//! Accounts hold a non-negative balance and an append-only history. The
//! ledger supports deposits, withdrawals and transfers, and persists the
//! whole account collection as one JSON document after every change.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `models`: money, account ids, log entries and accounts
//! - `storage`: the `LedgerStore` seam with JSON-file and in-memory stores
//! - `services`: the `Ledger` registry and its thread-safe wrapper
//! - `audit`: append-only JSONL audit log
//! - `backup`: dated store archives, retention and restore
//! - `export`: CSV, JSON and YAML export
//! - `config`: paths and user settings
//! - `display` and `cli`: console formatting, subcommands and the menu
//! - `error`: error types
//!
//! # Example
//!
//! ```rust
//! use banklite::models::Money;
//! use banklite::services::Ledger;
//! use banklite::storage::MemoryStore;
//!
//! let mut ledger = Ledger::open(MemoryStore::new())?;
//! let alice = ledger.create_account("Alice", Money::from_major(100))?;
//! ledger.deposit_to_account(alice.id(), Money::from_major(50))?;
//! assert_eq!(ledger.total_balance(), Some(Money::from_major(150)));
//! # Ok::<(), banklite::LedgerError>(())
//! ```

pub mod audit;
pub mod backup;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod logging;
pub mod models;
pub mod services;
pub mod storage;

pub use error::{LedgerError, LedgerResult};
pub use models::{Account, AccountId, Money};
pub use services::{Ledger, SharedLedger};
