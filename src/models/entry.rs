//! Transaction log entries
//!
//! Each balance-affecting event is recorded on the account as one
//! human-readable line, e.g. `2026-10-18 09:15:02.114230 - Deposited ₹50.00`.
//! Entries are stored as plain strings but parsed into [`EntryKind`] so the
//! balance can be reconciled against the history.

use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use super::ids::AccountId;
use super::money::Money;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";
// `%.f` also accepts timestamps without a fractional part
const TIMESTAMP_PARSE_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";
const SEPARATOR: &str = " - ";

/// What happened to the account
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// Account creation with its opening balance
    Opened(Money),
    Deposited(Money),
    Withdrew(Money),
    /// Outgoing side of a transfer
    TransferredOut { amount: Money, to: AccountId },
    /// Incoming side of a transfer
    TransferredIn { amount: Money, from: AccountId },
}

impl EntryKind {
    /// The change this event applied to the account balance
    pub fn signed_effect(&self) -> Money {
        match *self {
            Self::Opened(amount) | Self::Deposited(amount) => amount,
            Self::TransferredIn { amount, .. } => amount,
            Self::Withdrew(amount) | Self::TransferredOut { amount, .. } => -amount,
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Opened(amount) => write!(f, "Account created with {}", amount),
            Self::Deposited(amount) => write!(f, "Deposited {}", amount),
            Self::Withdrew(amount) => write!(f, "Withdrew {}", amount),
            Self::TransferredOut { amount, to } => {
                write!(f, "Transferred {} to Account {}", amount, to)
            }
            Self::TransferredIn { amount, from } => {
                write!(f, "Received {} from Account {}", amount, from)
            }
        }
    }
}

impl FromStr for EntryKind {
    type Err = EntryParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unknown = || EntryParseError::UnknownDescription(s.to_string());
        let money = |text: &str| {
            Money::parse(text).map_err(|e| EntryParseError::InvalidAmount(e.to_string()))
        };
        let account = |text: &str| {
            text.parse::<AccountId>()
                .map_err(|_| EntryParseError::InvalidAccount(text.to_string()))
        };

        if let Some(rest) = s.strip_prefix("Account created with ") {
            return Ok(Self::Opened(money(rest)?));
        }
        if let Some(rest) = s.strip_prefix("Deposited ") {
            return Ok(Self::Deposited(money(rest)?));
        }
        if let Some(rest) = s.strip_prefix("Withdrew ") {
            return Ok(Self::Withdrew(money(rest)?));
        }
        if let Some(rest) = s.strip_prefix("Transferred ") {
            let (amount, to) = rest.rsplit_once(" to Account ").ok_or_else(unknown)?;
            return Ok(Self::TransferredOut {
                amount: money(amount)?,
                to: account(to)?,
            });
        }
        if let Some(rest) = s.strip_prefix("Received ") {
            let (amount, from) = rest.rsplit_once(" from Account ").ok_or_else(unknown)?;
            return Ok(Self::TransferredIn {
                amount: money(amount)?,
                from: account(from)?,
            });
        }

        Err(unknown())
    }
}

/// One immutable, timestamped line of an account's history
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub timestamp: NaiveDateTime,
    pub kind: EntryKind,
}

impl LogEntry {
    pub fn new(timestamp: NaiveDateTime, kind: EntryKind) -> Self {
        Self { timestamp, kind }
    }

    /// Create an entry stamped with the current local time
    pub fn now(kind: EntryKind) -> Self {
        Self::new(Local::now().naive_local(), kind)
    }

    pub fn signed_effect(&self) -> Money {
        self.kind.signed_effect()
    }
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}",
            self.timestamp.format(TIMESTAMP_FORMAT),
            SEPARATOR,
            self.kind
        )
    }
}

impl FromStr for LogEntry {
    type Err = EntryParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (stamp, description) = s
            .split_once(SEPARATOR)
            .ok_or_else(|| EntryParseError::MissingSeparator(s.to_string()))?;

        let timestamp = NaiveDateTime::parse_from_str(stamp.trim(), TIMESTAMP_PARSE_FORMAT)
            .map_err(|e| EntryParseError::InvalidTimestamp(format!("{}: {}", stamp, e)))?;

        Ok(Self::new(timestamp, description.trim().parse()?))
    }
}

impl Serialize for LogEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for LogEntry {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let line = String::deserialize(deserializer)?;
        line.parse().map_err(serde::de::Error::custom)
    }
}

/// Error type for log entry parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryParseError {
    MissingSeparator(String),
    InvalidTimestamp(String),
    UnknownDescription(String),
    InvalidAmount(String),
    InvalidAccount(String),
}

impl fmt::Display for EntryParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingSeparator(s) => write!(f, "Log entry has no timestamp: {}", s),
            Self::InvalidTimestamp(s) => write!(f, "Invalid log entry timestamp {}", s),
            Self::UnknownDescription(s) => write!(f, "Unrecognized log entry: {}", s),
            Self::InvalidAmount(s) => write!(f, "Invalid log entry amount: {}", s),
            Self::InvalidAccount(s) => write!(f, "Invalid account in log entry: {}", s),
        }
    }
}

impl std::error::Error for EntryParseError {}
