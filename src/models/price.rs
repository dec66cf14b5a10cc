//! Price type for unit prices and stock value
//!
//! Internally stores amounts in cents (i64) to avoid floating-point precision
//! issues. Parsed input is rounded half-up to two decimals.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::ops::{Add, AddAssign};

/// A two-decimal amount stored as cents
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Price(i64);

impl Price {
    /// Create a Price from cents
    ///
    /// # Examples
    /// ```
    /// use stock_ledger::models::Price;
    /// let price = Price::from_cents(250); // 2.50
    /// assert_eq!(price.to_string(), "2.50");
    /// ```
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Create a zero amount
    pub const fn zero() -> Self {
        Self(0)
    }

    /// Get the amount in cents
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Check if the amount is at least one cent
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Value of `quantity` units at this price
    pub fn times(&self, quantity: u64) -> Self {
        let quantity = i64::try_from(quantity).unwrap_or(i64::MAX);
        Self(self.0.saturating_mul(quantity))
    }

    /// Parse a price from user or file input
    ///
    /// Accepts "2.50", "2.5", "2", "$2.50", "2,50" and "1,234.50".
    /// Digits past the second decimal are rounded half-up.
    pub fn parse(s: &str) -> Result<Self, PriceParseError> {
        let trimmed = s.trim();
        let unsigned = trimmed.strip_prefix('$').unwrap_or(trimmed).trim();

        if unsigned.starts_with('-') {
            return Err(PriceParseError::Negative(s.to_string()));
        }

        // A lone comma is a decimal separator, otherwise a thousands separator
        let normalized = if unsigned.contains('.') {
            unsigned.replace(',', "")
        } else {
            unsigned.replace(',', ".")
        };

        let (whole, frac) = normalized
            .split_once('.')
            .unwrap_or((normalized.as_str(), ""));

        let all_digits = |part: &str| part.chars().all(|c| c.is_ascii_digit());
        if (whole.is_empty() && frac.is_empty()) || !all_digits(whole) || !all_digits(frac) {
            return Err(PriceParseError::InvalidFormat(s.to_string()));
        }

        let whole: i64 = if whole.is_empty() {
            0
        } else {
            whole
                .parse()
                .map_err(|_| PriceParseError::InvalidFormat(s.to_string()))?
        };

        let digit = |i: usize| {
            frac.as_bytes()
                .get(i)
                .map(|b| i64::from(b - b'0'))
                .unwrap_or(0)
        };
        let mut cents = digit(0) * 10 + digit(1);
        if digit(2) >= 5 {
            cents += 1;
        }

        whole
            .checked_mul(100)
            .and_then(|c| c.checked_add(cents))
            .map(Self)
            .ok_or_else(|| PriceParseError::InvalidFormat(s.to_string()))
    }

    /// Format with a currency symbol
    pub fn format_with_symbol(&self, symbol: &str) -> String {
        format!("{}{}", symbol, self)
    }
}

impl Default for Price {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{}{}.{:02}", sign, abs / 100, abs % 100)
    }
}

impl Add for Price {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Price {
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl std::iter::Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Price::zero(), |acc, p| acc + p)
    }
}

// Stored as a decimal string so the CSV files stay readable in a spreadsheet
impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Price::parse(&raw).map_err(serde::de::Error::custom)
    }
}

/// Error type for price parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PriceParseError {
    InvalidFormat(String),
    Negative(String),
}

impl fmt::Display for PriceParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PriceParseError::InvalidFormat(s) => write!(f, "Invalid price format: {}", s),
            PriceParseError::Negative(s) => write!(f, "Price cannot be negative: {}", s),
        }
    }
}

impl std::error::Error for PriceParseError {}
