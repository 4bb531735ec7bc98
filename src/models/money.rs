//! Money type for representing currency amounts
//!
//! Internally stores amounts in cents (i64) to avoid floating-point precision
//! issues.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Represents a monetary amount stored as cents (hundredths of the currency unit)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Create a Money amount from cents
    ///
    /// # Examples
    /// ```
    /// use ledger_cli::models::Money;
    /// let amount = Money::from_cents(1050); // 10.50
    /// assert_eq!(amount.to_string(), "10.50");
    /// ```
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    pub const fn zero() -> Self {
        Self(0)
    }

    /// Get the amount in cents
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Get the whole units portion (truncated toward zero)
    pub const fn units(&self) -> i64 {
        self.0 / 100
    }

    /// Get the cents portion (0-99)
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Parse a money amount from decimal text
    ///
    /// Accepts "10.50", "-10.50", "+10.5", "10", "10." and "-750.0", plus the
    /// exponent form a float may be written in ("1e-05", "1.5E+3"). Digits
    /// past the second decimal are rounded half away from zero. Amounts that
    /// do not fit in i64 cents are rejected.
    pub fn parse(s: &str) -> Result<Self, MoneyParseError> {
        let s = s.trim();
        let invalid = || MoneyParseError::InvalidFormat(s.to_string());
        let overflow = || MoneyParseError::Overflow(s.to_string());

        let (negative, body) = if let Some(stripped) = s.strip_prefix('-') {
            (true, stripped)
        } else {
            (false, s.strip_prefix('+').unwrap_or(s))
        };

        let (mantissa, exponent) = match body.split_once(['e', 'E']) {
            Some((mantissa, exponent)) => {
                (mantissa, exponent.parse::<i32>().map_err(|_| invalid())?)
            }
            None => (body, 0),
        };

        let (whole, fraction) = mantissa.split_once('.').unwrap_or((mantissa, ""));

        if whole.is_empty()
            || !whole.bytes().all(|b| b.is_ascii_digit())
            || !fraction.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(invalid());
        }

        // All digits as one integer, worth 10^-fraction.len() each
        let digits = format!("{}{}", whole, fraction);
        let digits = digits.trim_start_matches('0');
        let significand: i128 = if digits.is_empty() {
            0
        } else {
            digits.parse().map_err(|_| overflow())?
        };

        let scale = 2 + i64::from(exponent) - fraction.len() as i64;
        let magnitude = scale_to_cents(significand, scale).ok_or_else(overflow)?;
        let cents = if negative { -magnitude } else { magnitude };

        i64::try_from(cents).map(Self).map_err(|_| overflow())
    }
}

/// Multiply `significand` by 10^scale, rounding half away from zero
fn scale_to_cents(significand: i128, scale: i64) -> Option<i128> {
    if significand == 0 {
        return Some(0);
    }

    if scale >= 0 {
        let factor = 10i128.checked_pow(u32::try_from(scale).ok()?)?;
        return significand.checked_mul(factor);
    }

    let divisor = match u32::try_from(-scale).ok().and_then(|p| 10i128.checked_pow(p)) {
        Some(divisor) => divisor,
        // significand < 10^39 / 2, so it rounds to nothing
        None => return Some(0),
    };

    let (quotient, remainder) = (significand / divisor, significand % divisor);
    if remainder >= divisor - remainder {
        Some(quotient + 1)
    } else {
        Some(quotient)
    }
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

/// Plain decimal rendering, as written to the record file
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_negative() {
            write!(f, "-{}.{:02}", self.units().abs(), self.cents_part())
        } else {
            write!(f, "{}.{:02}", self.units(), self.cents_part())
        }
    }
}

/// Error type for money parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoneyParseError {
    InvalidFormat(String),
    Overflow(String),
}

impl fmt::Display for MoneyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoneyParseError::InvalidFormat(s) => write!(f, "Invalid money format: {}", s),
            MoneyParseError::Overflow(s) => write!(f, "Money amount out of range: {}", s),
        }
    }
}

impl std::error::Error for MoneyParseError {}
