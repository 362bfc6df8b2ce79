//! Custom error types for BankLite
//!
//! This module defines the error hierarchy for the ledger using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

use crate::models::{AccountId, Money};

/// The main error type for BankLite operations
#[derive(Error, Debug)]
pub enum LedgerError {
    /// A non-positive amount was supplied to a balance-mutating operation
    #[error("Amount must be positive (got {0})")]
    InvalidAmount(Money),

    /// Withdrawal or transfer exceeding the available balance
    #[error("Insufficient balance in account {account}: need {needed}, have {available}")]
    InsufficientBalance {
        account: AccountId,
        needed: Money,
        available: Money,
    },

    /// Unknown account id
    #[error("Account not found: {0}")]
    AccountNotFound(AccountId),

    /// Transfer where sender and receiver are the same account
    #[error("Cannot transfer from account {0} to itself")]
    SameAccount(AccountId),

    /// Validation errors for data models
    #[error("Validation error: {0}")]
    Validation(String),

    /// Writing the store failed; in-memory state was not changed
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// The persisted store could not be read or is malformed
    #[error("Corrupt store: {0}")]
    CorruptStore(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Backup errors
    #[error("Backup error: {0}")]
    Backup(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),
}

impl LedgerError {
    /// Check if this is an "account not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::AccountNotFound(_))
    }

    /// Check if this error was caused by caller input rather than the environment
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidAmount(_)
                | Self::InsufficientBalance { .. }
                | Self::SameAccount(_)
                | Self::Validation(_)
        )
    }
}

impl From<std::io::Error> for LedgerError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for LedgerError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for BankLite operations
pub type LedgerResult<T> = Result<T, LedgerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = LedgerError::Config("test error".into());
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_not_found_error() {
        let err = LedgerError::AccountNotFound(AccountId::new(999));
        assert_eq!(err.to_string(), "Account not found: 999");
        assert!(err.is_not_found());
        assert!(!err.is_validation());
    }

    #[test]
    fn test_insufficient_balance_error() {
        let err = LedgerError::InsufficientBalance {
            account: AccountId::new(1),
            needed: Money::from_minor(20000),
            available: Money::from_minor(15000),
        };
        assert_eq!(
            err.to_string(),
            "Insufficient balance in account 1: need ₹200.00, have ₹150.00"
        );
        assert!(err.is_validation());
    }

    #[test]
    fn test_invalid_amount_error() {
        let err = LedgerError::InvalidAmount(Money::from_minor(-500));
        assert_eq!(err.to_string(), "Amount must be positive (got -₹5.00)");
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let ledger_err: LedgerError = io_err.into();
        assert!(matches!(ledger_err, LedgerError::Io(_)));
    }
}
