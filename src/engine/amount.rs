use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Amount of money held or moved by an account.
/// It is using internally an i64 counting cents in order to avoid floating point rounding error.
/// The Amount precision is two places past the decimal, extra digits are truncated when parsing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Amount {
    cents: i64,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AmountError {
    #[error("Amount parsing error: {0}")]
    Parse(String),

    #[error("Overflow error while computing Amount")]
    Overflow,

    #[error("Underflow error while computing Amount")]
    Underflow,
}

impl Amount {
    pub const ZERO: Amount = Amount { cents: 0 };

    pub fn new() -> Self {
        Amount::ZERO
    }

    pub fn from_cents(cents: i64) -> Self {
        Amount { cents }
    }

    /// Whole currency units, ex: `Amount::units(100)` is 100.00
    pub fn units(units: i64) -> Self {
        Amount {
            cents: units.saturating_mul(100),
        }
    }

    pub fn cents(&self) -> i64 {
        self.cents
    }

    pub fn is_negative(&self) -> bool {
        self.cents < 0
    }

    pub fn add(&self, other: &Amount) -> Result<Amount, AmountError> {
        match self.cents.checked_add(other.cents) {
            Some(total) => Ok(Amount { cents: total }),
            None => Err(AmountError::Overflow),
        }
    }

    pub fn sub(&self, other: &Amount) -> Result<Amount, AmountError> {
        match self.cents.checked_sub(other.cents) {
            Some(total) => Ok(Amount { cents: total }),
            None => Err(AmountError::Underflow),
        }
    }

    pub fn negate(&self) -> Result<Amount, AmountError> {
        match self.cents.checked_neg() {
            Some(cents) => Ok(Amount { cents }),
            None => Err(AmountError::Overflow),
        }
    }
}

impl FromStr for Amount {
    type Err = AmountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(AmountError::Parse(s.into()));
        }

        let (negative, digits) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s),
        };

        let (left_part, decimal_part) = match digits.split_once('.') {
            Some((left, right)) => (left, Some(right)),
            None => (digits, None),
        };

        // Checking for extra '.' and a lone sign
        if decimal_part.is_some_and(|d| d.contains('.'))
            || (left_part.is_empty() && decimal_part.is_none())
        {
            return Err(AmountError::Parse(s.into()));
        }

        let all_digits = |part: &str| part.chars().all(|c| c.is_ascii_digit());
        if !all_digits(left_part) || !decimal_part.is_none_or(all_digits) {
            return Err(AmountError::Parse(s.into()));
        }

        // Checking if integer part is empty (ex: ".05")
        let left_str = if left_part.is_empty() { "0" } else { left_part };
        let units = left_str
            .parse::<i64>()
            .map_err(|_| AmountError::Parse(s.into()))?;

        // Keep exactly 2 digits for the decimal part
        let mut dec_str: String = decimal_part.unwrap_or_default().chars().take(2).collect();
        while dec_str.len() < 2 {
            dec_str.push('0');
        }
        let fraction = dec_str
            .parse::<i64>()
            .map_err(|_| AmountError::Parse(s.into()))?;

        let cents = units
            .checked_mul(100)
            .and_then(|v| v.checked_add(fraction))
            .ok_or(AmountError::Overflow)?;

        Ok(Amount {
            cents: if negative { -cents } else { cents },
        })
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let abs_val = self.cents.unsigned_abs();
        let left_part = abs_val / 100;
        let decimal_part = abs_val % 100;

        if self.is_negative() {
            write!(f, "-{}.{:02}", left_part, decimal_part)
        } else {
            write!(f, "{}.{:02}", left_part, decimal_part)
        }
    }
}

impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
