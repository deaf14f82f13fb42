//! Money type for statement amounts
//!
//! Amounts are held as signed hundredths so that category totals add up
//! exactly. No currency is attached; the label is a display concern.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign};

/// A signed amount stored as hundredths of the currency unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Create a Money amount from hundredths
    ///
    /// # Examples
    /// ```
    /// use tally::models::Money;
    /// let amount = Money::from_cents(-4250); // -42.50
    /// assert_eq!(amount.to_string(), "-42.50");
    /// ```
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    pub const fn zero() -> Self {
        Self(0)
    }

    pub const fn cents(&self) -> i64 {
        self.0
    }

    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    pub const fn abs(&self) -> Self {
        Self(self.0.abs())
    }

    /// Parse a statement amount
    ///
    /// Accepts an optional sign and thousands separators: "2,000.00",
    /// "-42.5", "+7", "1234". Digits past the second decimal place round
    /// half away from zero, so "-0.125" is -0.13.
    pub fn parse(s: &str) -> Result<Self, MoneyParseError> {
        let original = s;
        let s: String = s.trim().chars().filter(|c| *c != ',').collect();

        let (negative, digits) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s.strip_prefix('+').unwrap_or(&s)),
        };

        let invalid = || MoneyParseError::InvalidFormat(original.trim().to_string());

        let (whole, fraction) = match digits.split_once('.') {
            Some((whole, fraction)) => (whole, fraction),
            None => (digits, ""),
        };

        if whole.is_empty() && fraction.is_empty() {
            return Err(invalid());
        }
        if !whole.chars().all(|c| c.is_ascii_digit()) || !fraction.chars().all(|c| c.is_ascii_digit())
        {
            return Err(invalid());
        }
        let units: i64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| invalid())?
        };
        let hundredths: i64 = match fraction.len() {
            0 => 0,
            1 => fraction.parse::<i64>().map_err(|_| invalid())? * 10,
            _ => fraction[..2].parse().map_err(|_| invalid())?,
        };
        let round_up = fraction.as_bytes().get(2).is_some_and(|d| *d >= b'5');

        let cents = units
            .checked_mul(100)
            .and_then(|c| c.checked_add(hundredths + i64::from(round_up)))
            .ok_or_else(invalid)?;

        Ok(Self(if negative { -cents } else { cents }))
    }

    /// Format with thousands separators, e.g. "-1,234.50"
    pub fn format_grouped(&self) -> String {
        let units = (self.0 / 100).unsigned_abs().to_string();
        let mut grouped = String::with_capacity(units.len() + units.len() / 3);
        for (i, ch) in units.chars().enumerate() {
            if i > 0 && (units.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }
        let sign = if self.is_negative() { "-" } else { "" };
        format!("{}{}.{:02}", sign, grouped, (self.0 % 100).abs())
    }

    /// Format with a trailing currency label, e.g. "2,000.00 CZK"
    pub fn format_with_label(&self, label: &str) -> String {
        if label.is_empty() {
            self.format_grouped()
        } else {
            format!("{} {}", self.format_grouped(), label)
        }
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.is_negative() { "-" } else { "" };
        write!(
            f,
            "{}{}.{:02}",
            sign,
            (self.0 / 100).abs(),
            (self.0 % 100).abs()
        )
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl<'a> std::iter::Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

/// Error type for money parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoneyParseError {
    InvalidFormat(String),
}

impl fmt::Display for MoneyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoneyParseError::InvalidFormat(s) => write!(f, "Invalid amount: '{}'", s),
        }
    }
}

impl std::error::Error for MoneyParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_statement_amounts() {
        assert_eq!(Money::parse("-42.50").unwrap().cents(), -4250);
        assert_eq!(Money::parse("2,000.00").unwrap().cents(), 200000);
        assert_eq!(Money::parse("1,234,567.8").unwrap().cents(), 123456780);
        assert_eq!(Money::parse("  15 ").unwrap().cents(), 1500);
        assert_eq!(Money::parse("+0.05").unwrap().cents(), 5);
        assert_eq!(Money::parse(".5").unwrap().cents(), 50);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(
            Money::parse("twelve"),
            Err(MoneyParseError::InvalidFormat(_))
        ));
        assert!(Money::parse("").is_err());
        assert!(Money::parse("-").is_err());
        assert!(Money::parse("1.2.3").is_err());
        assert!(Money::parse("1.0x5").is_err());
    }

    #[test]
    fn test_parse_rounds_extra_decimals() {
        assert_eq!(Money::parse("-0.125").unwrap().cents(), -13);
        assert_eq!(Money::parse("0.124").unwrap().cents(), 12);
        assert_eq!(Money::parse("1.005").unwrap().cents(), 101);
        assert_eq!(Money::parse("9.999").unwrap().cents(), 1000);
        assert_eq!(Money::parse("-2,000.00499").unwrap().cents(), -200000);
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(-4250).to_string(), "-42.50");
        assert_eq!(Money::from_cents(5).to_string(), "0.05");
        assert_eq!(Money::from_cents(-5).to_string(), "-0.05");
        assert_eq!(Money::zero().to_string(), "0.00");
    }

    #[test]
    fn test_format_grouped() {
        assert_eq!(Money::from_cents(200000).format_grouped(), "2,000.00");
        assert_eq!(Money::from_cents(-123456789).format_grouped(), "-1,234,567.89");
        assert_eq!(Money::from_cents(99999).format_grouped(), "999.99");
        assert_eq!(
            Money::from_cents(200000).format_with_label("CZK"),
            "2,000.00 CZK"
        );
        assert_eq!(Money::from_cents(100).format_with_label(""), "1.00");
    }

    #[test]
    fn test_sum() {
        let amounts = [Money::from_cents(-4250), Money::from_cents(-750)];
        let total: Money = amounts.iter().sum();
        assert_eq!(total.cents(), -5000);
    }

    #[test]
    fn test_serialization() {
        let m = Money::from_cents(-4250);
        let json = serde_json::to_string(&m).unwrap();
        assert_eq!(json, "-4250");
        assert_eq!(serde_json::from_str::<Money>(&json).unwrap(), m);
    }
}
