//! Service layer for BankLite
//!
//! The service layer provides the ledger's business logic on top of the
//! storage layer: validation, id assignment, staged mutations and audit.

pub mod ledger;
pub mod shared;

pub use ledger::Ledger;
pub use shared::SharedLedger;
