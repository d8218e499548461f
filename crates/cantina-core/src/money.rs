//! # Money Module
//!
//! Provides the `Money` type for handling menu prices safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In floating point:                                                     │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    A price of $4.50 is stored as 450 — exact, always.                  │
//! │    The database, validation and report all use cents.                  │
//! │    Only display formatting converts back to "4.50".                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use cantina_core::money::Money;
//!
//! // Create from cents (preferred)
//! let price = Money::from_cents(450); // $4.50
//!
//! // Parse user input from the price field
//! let typed: Money = "4.50".parse().unwrap();
//! assert_eq!(typed, price);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

// =============================================================================
// Money Type
// =============================================================================

/// A menu price in the smallest currency unit (cents).
///
/// ## Design Decisions
/// - **i64 (signed)**: matches the database column type; negativity is
///   rejected at the parsing/validation boundary instead
/// - **Single field tuple struct**: zero-cost abstraction over i64
/// - **Derives**: full serde support for JSON serialization
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use cantina_core::money::Money;
    ///
    /// let price = Money::from_cents(450); // Represents $4.50
    /// assert_eq!(price.cents(), 450);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Returns the value in cents (smallest currency unit).
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (dollars) portion.
    #[inline]
    pub const fn major_units(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit (cents) portion (always 0-99).
    #[inline]
    pub const fn minor_units(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is negative (less than zero).
    ///
    /// Negative prices never enter the store; this exists so validation can
    /// reject them with a typed error instead of a panic.
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Formats the amount as a bare decimal without the currency symbol.
    ///
    /// ## Example
    /// ```rust
    /// use cantina_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(450).to_decimal_string(), "4.50");
    /// ```
    pub fn to_decimal_string(&self) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        format!("{}{}.{:02}", sign, self.major_units().abs(), self.minor_units())
    }
}

// =============================================================================
// Parsing
// =============================================================================

/// Error produced when a price string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseMoneyError {
    /// The input was empty or whitespace.
    #[error("price is empty")]
    Empty,

    /// The input contained characters that are not part of a decimal amount.
    #[error("'{0}' is not a valid price")]
    Malformed(String),

    /// More than two decimal places were given.
    #[error("price '{0}' has more than two decimal places")]
    TooPrecise(String),

    /// The amount does not fit in the cents representation.
    #[error("price '{0}' is out of range")]
    OutOfRange(String),
}

/// Parses a user-typed price such as `"4.50"`, `"4.5"`, `"4"` or `"$4.50"`.
///
/// ## Rules
/// - An optional leading `$` is accepted (people type it into price fields)
/// - At most two decimal places; `"4.5"` means 450 cents
/// - Negative amounts are rejected here — a price field never goes below zero
///
/// ## Example
/// ```rust
/// use cantina_core::money::Money;
///
/// assert_eq!("4.50".parse::<Money>().unwrap().cents(), 450);
/// assert_eq!(" $4.5 ".parse::<Money>().unwrap().cents(), 450);
/// assert_eq!("4".parse::<Money>().unwrap().cents(), 400);
/// assert!("-1.00".parse::<Money>().is_err());
/// assert!("4.999".parse::<Money>().is_err());
/// ```
impl FromStr for Money {
    type Err = ParseMoneyError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let raw = input.trim();
        let raw = raw.strip_prefix('$').unwrap_or(raw).trim();

        if raw.is_empty() {
            return Err(ParseMoneyError::Empty);
        }
        if raw.starts_with('-') || raw.starts_with('+') {
            return Err(ParseMoneyError::Malformed(input.trim().to_string()));
        }

        let (major_str, minor_str) = match raw.split_once('.') {
            Some((major, minor)) => (major, minor),
            None => (raw, ""),
        };

        if minor_str.len() > 2 {
            return Err(ParseMoneyError::TooPrecise(raw.to_string()));
        }
        // "4." is tolerated, "." alone is not
        if major_str.is_empty() && minor_str.is_empty() {
            return Err(ParseMoneyError::Malformed(raw.to_string()));
        }

        let digits_only = |s: &str| s.chars().all(|c| c.is_ascii_digit());
        if !digits_only(major_str) || !digits_only(minor_str) {
            return Err(ParseMoneyError::Malformed(raw.to_string()));
        }

        let major: i64 = if major_str.is_empty() {
            0
        } else {
            major_str
                .parse()
                .map_err(|_| ParseMoneyError::OutOfRange(raw.to_string()))?
        };

        // Pad ".5" to 50 cents
        let minor: i64 = match minor_str.len() {
            0 => 0,
            1 => minor_str.parse::<i64>().unwrap_or(0) * 10,
            _ => minor_str.parse::<i64>().unwrap_or(0),
        };

        major
            .checked_mul(100)
            .and_then(|c| c.checked_add(minor))
            .map(Money::from_cents)
            .ok_or_else(|| ParseMoneyError::OutOfRange(raw.to_string()))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money with the currency symbol, e.g. `$4.50`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}${}.{:02}", sign, self.major_units().abs(), self.minor_units())
    }
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(450);
        assert_eq!(money.cents(), 450);
        assert_eq!(money.major_units(), 4);
        assert_eq!(money.minor_units(), 50);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(450)), "$4.50");
        assert_eq!(format!("{}", Money::from_cents(1099)), "$10.99");
        assert_eq!(format!("{}", Money::from_cents(0)), "$0.00");
        assert_eq!(format!("{}", Money::from_cents(-550)), "-$5.50");
    }

    #[test]
    fn test_decimal_string() {
        assert_eq!(Money::from_cents(450).to_decimal_string(), "4.50");
        assert_eq!(Money::from_cents(5).to_decimal_string(), "0.05");
        assert_eq!(Money::from_cents(100).to_decimal_string(), "1.00");
    }

    #[test]
    fn test_parse_whole_and_decimal() {
        assert_eq!("4".parse::<Money>().unwrap().cents(), 400);
        assert_eq!("4.5".parse::<Money>().unwrap().cents(), 450);
        assert_eq!("4.50".parse::<Money>().unwrap().cents(), 450);
        assert_eq!("0.05".parse::<Money>().unwrap().cents(), 5);
        assert_eq!(".50".parse::<Money>().unwrap().cents(), 50);
        assert_eq!("10.".parse::<Money>().unwrap().cents(), 1000);
    }

    #[test]
    fn test_parse_tolerates_symbol_and_whitespace() {
        assert_eq!(" $4.50 ".parse::<Money>().unwrap().cents(), 450);
        assert_eq!("$ 9.99".parse::<Money>().unwrap().cents(), 999);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!("".parse::<Money>(), Err(ParseMoneyError::Empty));
        assert_eq!("   ".parse::<Money>(), Err(ParseMoneyError::Empty));
        assert!(matches!("abc".parse::<Money>(), Err(ParseMoneyError::Malformed(_))));
        assert!(matches!("4,50".parse::<Money>(), Err(ParseMoneyError::Malformed(_))));
        assert!(matches!(".".parse::<Money>(), Err(ParseMoneyError::Malformed(_))));
        assert!(matches!("4.999".parse::<Money>(), Err(ParseMoneyError::TooPrecise(_))));
    }

    #[test]
    fn test_parse_rejects_signed_amounts() {
        assert!("-1.00".parse::<Money>().is_err());
        assert!("+1.00".parse::<Money>().is_err());
    }

    #[test]
    fn test_parse_rejects_overflow() {
        let huge = "9".repeat(30);
        assert!(matches!(huge.parse::<Money>(), Err(ParseMoneyError::OutOfRange(_))));
    }

    #[test]
    fn test_zero_and_checks() {
        let zero = Money::zero();
        assert!(zero.is_zero());
        assert!(!zero.is_negative());
        assert!(Money::from_cents(-1).is_negative());
    }
}
