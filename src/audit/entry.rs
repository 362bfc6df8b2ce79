//! Audit entry data structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{Account, AccountId, Money};

/// Types of operations that are audited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Create,
    Deposit,
    Withdraw,
    Transfer,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::Create => write!(f, "CREATE"),
            Operation::Deposit => write!(f, "DEPOSIT"),
            Operation::Withdraw => write!(f, "WITHDRAW"),
            Operation::Transfer => write!(f, "TRANSFER"),
        }
    }
}

/// A single audit log entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEntry {
    /// When the operation was committed (UTC)
    pub timestamp: DateTime<Utc>,

    pub operation: Operation,

    /// Account the operation acted on (the sender for transfers)
    pub account_id: AccountId,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_name: Option<String>,

    /// Receiving account of a transfer
    #[serde(skip_serializing_if = "Option::is_none")]
    pub counterparty: Option<AccountId>,

    pub amount: Money,

    /// Balance of `account_id` after the operation
    pub balance_after: Money,
}

impl AuditEntry {
    fn for_account(operation: Operation, account: &Account, amount: Money) -> Self {
        Self {
            timestamp: Utc::now(),
            operation,
            account_id: account.id(),
            account_name: Some(account.name().to_string()),
            counterparty: None,
            amount,
            balance_after: account.balance(),
        }
    }

    pub fn create(account: &Account) -> Self {
        Self::for_account(Operation::Create, account, account.balance())
    }

    pub fn deposit(account: &Account, amount: Money) -> Self {
        Self::for_account(Operation::Deposit, account, amount)
    }

    pub fn withdraw(account: &Account, amount: Money) -> Self {
        Self::for_account(Operation::Withdraw, account, amount)
    }

    pub fn transfer(sender: &Account, receiver: AccountId, amount: Money) -> Self {
        Self {
            counterparty: Some(receiver),
            ..Self::for_account(Operation::Transfer, sender, amount)
        }
    }

    /// Format the entry for human-readable output
    pub fn format_human_readable(&self) -> String {
        let mut output = format!(
            "[{}] {} account {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            self.operation,
            self.account_id
        );

        if let Some(name) = &self.account_name {
            output.push_str(&format!(" ({})", name));
        }

        output.push_str(&format!(" amount {}", self.amount));

        if let Some(to) = self.counterparty {
            output.push_str(&format!(" to account {}", to));
        }

        output.push_str(&format!(", balance {}", self.balance_after));
        output
    }
}
