//! Money type for representing currency amounts
//!
//! Internally stores amounts in minor units (i64) to avoid floating-point
//! precision issues. Provides checked arithmetic and formatting.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::ops::Neg;
use std::str::FromStr;

/// Number of minor units in one major unit
pub const MINOR_PER_MAJOR: i64 = 100;

/// Default currency symbol used for display and log entries
pub const DEFAULT_SYMBOL: &str = "₹";

/// Currency symbols `parse` accepts in front of an amount
pub const KNOWN_SYMBOLS: [&str; 4] = ["₹", "$", "€", "£"];

/// Largest magnitude in minor units (2^50)
///
/// Every amount up to this bound survives the JSON number form exactly:
/// the rounding error of `minor / 100` and back stays below a quarter unit.
pub const MAX_MINOR: i64 = 1 << 50;

/// Represents a monetary amount stored as minor units (hundredths of the currency unit)
///
/// On disk the amount is written as a plain JSON number in major units
/// (`150.5`), and read back by rounding to the nearest minor unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Money(i64);

impl Money {
    /// Create a Money amount from minor units
    ///
    /// # Examples
    /// ```
    /// use banklite::models::Money;
    /// let amount = Money::from_minor(1050); // ₹10.50
    /// ```
    pub const fn from_minor(minor: i64) -> Self {
        Self(minor)
    }

    /// Create a Money amount from whole major units
    pub const fn from_major(major: i64) -> Self {
        Self(major * MINOR_PER_MAJOR)
    }

    /// Create a zero Money amount
    pub const fn zero() -> Self {
        Self(0)
    }

    /// Get the amount in minor units
    pub const fn minor(&self) -> i64 {
        self.0
    }

    /// Get the whole major units (truncated toward zero)
    pub const fn major(&self) -> i64 {
        self.0 / MINOR_PER_MAJOR
    }

    /// Get the minor portion (0-99)
    pub const fn minor_part(&self) -> i64 {
        (self.0 % MINOR_PER_MAJOR).abs()
    }

    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Largest representable amount
    pub const MAX: Self = Self(MAX_MINOR);

    /// `None` when the result leaves `-MAX..=MAX`
    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.0.checked_add(other.0).and_then(Self::bounded)
    }

    /// `None` when the result leaves `-MAX..=MAX`
    pub fn checked_sub(self, other: Self) -> Option<Self> {
        self.0.checked_sub(other.0).and_then(Self::bounded)
    }

    /// Sum `amounts`, or `None` if any partial sum leaves `-MAX..=MAX`
    pub fn checked_sum<I: IntoIterator<Item = Self>>(amounts: I) -> Option<Self> {
        amounts
            .into_iter()
            .try_fold(Self::zero(), |acc, amount| acc.checked_add(amount))
    }

    fn bounded(minor: i64) -> Option<Self> {
        (-MAX_MINOR..=MAX_MINOR).contains(&minor).then_some(Self(minor))
    }

    /// Parse a money amount from a string
    ///
    /// Accepts formats: "10.50", "-10.50", "₹10.50", "$10.50", "10", "10.5".
    /// Only one of [`KNOWN_SYMBOLS`] may precede the digits. Trailing
    /// fractional digits beyond the second must be zero, and the magnitude
    /// may not exceed [`Money::MAX`].
    pub fn parse(s: &str) -> Result<Self, MoneyParseError> {
        let invalid = || MoneyParseError::InvalidFormat(s.to_string());
        let trimmed = s.trim();

        let (mut negative, rest) = match trimmed.strip_prefix('-') {
            Some(stripped) => (true, stripped),
            None => (false, trimmed),
        };

        // Currency symbol, then a sign may still follow ("₹-5.0")
        let rest = match KNOWN_SYMBOLS.iter().find_map(|sym| rest.strip_prefix(*sym)) {
            Some(after_symbol) => match after_symbol.strip_prefix('-') {
                Some(stripped) if !negative => {
                    negative = true;
                    stripped
                }
                Some(_) => return Err(invalid()),
                None => after_symbol,
            },
            None => rest,
        };

        if rest.is_empty() {
            return Err(invalid());
        }

        let (whole, fraction) = match rest.split_once('.') {
            Some((whole, fraction)) => (whole, fraction),
            None => (rest, ""),
        };

        if whole.is_empty() && fraction.is_empty() {
            return Err(invalid());
        }
        if !whole.chars().all(|c| c.is_ascii_digit())
            || !fraction.chars().all(|c| c.is_ascii_digit())
        {
            return Err(invalid());
        }

        let major: i64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| invalid())?
        };

        let (kept, excess) = fraction.split_at(fraction.len().min(2));
        if excess.chars().any(|c| c != '0') {
            return Err(MoneyParseError::TooPrecise(s.to_string()));
        }
        let minor: i64 = match kept.len() {
            0 => 0,
            1 => kept.parse::<i64>().map_err(|_| invalid())? * 10,
            _ => kept.parse().map_err(|_| invalid())?,
        };

        major
            .checked_mul(MINOR_PER_MAJOR)
            .and_then(|m| m.checked_add(minor))
            .and_then(|total| Self::bounded(if negative { -total } else { total }))
            .ok_or_else(|| MoneyParseError::Overflow(s.to_string()))
    }

    /// Format with a currency symbol
    pub fn format_with_symbol(&self, symbol: &str) -> String {
        if self.is_negative() {
            format!("-{}{}.{:02}", symbol, self.major().abs(), self.minor_part())
        } else {
            format!("{}{}.{:02}", symbol, self.major(), self.minor_part())
        }
    }

    /// Value in major units as a float, only used for the on-disk number
    fn to_major_f64(self) -> f64 {
        self.0 as f64 / MINOR_PER_MAJOR as f64
    }

    fn from_major_f64(value: f64) -> Option<Self> {
        let minor = (value * MINOR_PER_MAJOR as f64).round();
        if minor.is_finite() && minor.abs() <= MAX_MINOR as f64 {
            Some(Self(minor as i64))
        } else {
            None
        }
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_with_symbol(DEFAULT_SYMBOL))
    }
}

impl FromStr for Money {
    type Err = MoneyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.to_major_f64())
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = f64::deserialize(deserializer)?;
        Self::from_major_f64(value)
            .ok_or_else(|| serde::de::Error::custom(format!("amount out of range: {}", value)))
    }
}

/// Error type for money parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoneyParseError {
    InvalidFormat(String),
    TooPrecise(String),
    Overflow(String),
}

impl fmt::Display for MoneyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidFormat(s) => write!(f, "Invalid money format: {}", s),
            Self::TooPrecise(s) => write!(f, "Amount has more than two decimal places: {}", s),
            Self::Overflow(s) => write!(f, "Amount is too large: {}", s),
        }
    }
}

impl std::error::Error for MoneyParseError {}
