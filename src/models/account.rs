//! Account model
//!
//! An account holds an identity, a display name, a balance that never goes
//! negative, and an append-only history of log entries.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::entry::{EntryKind, LogEntry};
use super::ids::AccountId;
use super::money::Money;
use crate::error::{LedgerError, LedgerResult};

/// Longest accepted account name, in bytes
pub const MAX_NAME_LEN: usize = 100;

/// A ledger account
///
/// The serialized form has exactly the fields `id`, `name`, `balance` and
/// `transactions`, in that order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    id: AccountId,
    name: String,
    balance: Money,
    transactions: Vec<LogEntry>,
}

impl Account {
    /// Create an account holding `opening` and record its creation
    pub fn open(id: AccountId, name: impl Into<String>, opening: Money) -> Self {
        Self {
            id,
            name: name.into(),
            balance: opening,
            transactions: vec![LogEntry::now(EntryKind::Opened(opening))],
        }
    }

    pub fn id(&self) -> AccountId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current balance
    pub fn balance(&self) -> Money {
        self.balance
    }

    /// Full history in the order the events happened
    pub fn history(&self) -> &[LogEntry] {
        &self.transactions
    }

    /// Add `amount` to the balance
    pub fn deposit(&mut self, amount: Money) -> LedgerResult<()> {
        self.credit(amount, EntryKind::Deposited(amount))
    }

    /// Take `amount` from the balance, refusing to go below zero
    pub fn withdraw(&mut self, amount: Money) -> LedgerResult<()> {
        self.debit(amount, EntryKind::Withdrew(amount))
    }

    /// Outgoing half of a transfer
    pub(crate) fn send(&mut self, amount: Money, to: AccountId) -> LedgerResult<()> {
        self.debit(amount, EntryKind::TransferredOut { amount, to })
    }

    /// Incoming half of a transfer
    pub(crate) fn receive(&mut self, amount: Money, from: AccountId) -> LedgerResult<()> {
        self.credit(amount, EntryKind::TransferredIn { amount, from })
    }

    fn credit(&mut self, amount: Money, kind: EntryKind) -> LedgerResult<()> {
        ensure_positive(amount)?;
        self.balance = self.balance.checked_add(amount).ok_or_else(|| {
            LedgerError::Validation(format!("Balance of account {} would overflow", self.id))
        })?;
        self.transactions.push(LogEntry::now(kind));
        Ok(())
    }

    fn debit(&mut self, amount: Money, kind: EntryKind) -> LedgerResult<()> {
        ensure_positive(amount)?;
        if amount > self.balance {
            return Err(LedgerError::InsufficientBalance {
                account: self.id,
                needed: amount,
                available: self.balance,
            });
        }
        self.balance = Money::from_minor(self.balance.minor() - amount.minor());
        self.transactions.push(LogEntry::now(kind));
        Ok(())
    }

    /// Balance implied by replaying the history, `None` on overflow
    pub fn reconciled_balance(&self) -> Option<Money> {
        self.transactions
            .iter()
            .try_fold(Money::zero(), |acc, entry| acc.checked_add(entry.signed_effect()))
    }

    /// Check that the balance equals the sum of the history's effects
    pub fn verify(&self) -> Result<(), AccountValidationError> {
        match self.reconciled_balance() {
            Some(replayed) if replayed == self.balance => Ok(()),
            replayed => Err(AccountValidationError::HistoryMismatch {
                balance: self.balance,
                replayed,
            }),
        }
    }

    /// Validate identity, name and balance
    pub fn validate(&self) -> Result<(), AccountValidationError> {
        if !self.id.is_valid() {
            return Err(AccountValidationError::InvalidId);
        }

        validate_name(&self.name)?;

        if self.balance.is_negative() {
            return Err(AccountValidationError::NegativeBalance(self.balance));
        }

        Ok(())
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (#{})", self.name, self.id)
    }
}

fn ensure_positive(amount: Money) -> LedgerResult<()> {
    if amount.is_positive() {
        Ok(())
    } else {
        Err(LedgerError::InvalidAmount(amount))
    }
}

/// Check a display name without building an account
pub fn validate_name(name: &str) -> Result<(), AccountValidationError> {
    if name.trim().is_empty() {
        return Err(AccountValidationError::EmptyName);
    }

    if name.len() > MAX_NAME_LEN {
        return Err(AccountValidationError::NameTooLong(name.len()));
    }

    Ok(())
}

/// Validation errors for accounts
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountValidationError {
    InvalidId,
    EmptyName,
    NameTooLong(usize),
    NegativeBalance(Money),
    HistoryMismatch {
        balance: Money,
        replayed: Option<Money>,
    },
}

impl fmt::Display for AccountValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidId => write!(f, "Account id must be a positive integer"),
            Self::EmptyName => write!(f, "Account name cannot be empty"),
            Self::NameTooLong(len) => {
                write!(f, "Account name too long ({} bytes, max {})", len, MAX_NAME_LEN)
            }
            Self::NegativeBalance(balance) => {
                write!(f, "Account balance cannot be negative ({})", balance)
            }
            Self::HistoryMismatch {
                balance,
                replayed: Some(replayed),
            } => write!(f, "Balance {} does not match history total {}", balance, replayed),
            Self::HistoryMismatch { balance, replayed: None } => {
                write!(f, "Balance {} cannot be checked: history total overflows", balance)
            }
        }
    }
}

impl std::error::Error for AccountValidationError {}
