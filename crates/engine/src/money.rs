use std::{
    fmt,
    iter::Sum,
    ops::{Add, AddAssign, Neg, Sub},
    str::FromStr,
};

use serde::{Deserialize, Serialize};

use crate::EngineError;

/// Currency sign appended to every formatted amount.
pub const TENGE_SIGN: &str = "₸";

/// Signed money amount represented as **whole tenge**.
///
/// Every monetary value in the engine (loan principal, balances, payments,
/// expense amounts) uses this type. Tenge amounts are tracked without minor
/// units, the same way the app shows them.
///
/// # Examples
///
/// ```rust
/// use engine::Money;
///
/// let amount = Money::new(15_000_000);
/// assert_eq!(amount.amount(), 15_000_000);
/// assert_eq!(amount.to_string(), "15 000 000 ₸");
/// ```
///
/// Parsing from user input (spaces and `_` are accepted as digit groupers):
///
/// ```rust
/// use engine::Money;
///
/// assert_eq!("10000".parse::<Money>().unwrap().amount(), 10_000);
/// assert_eq!("1 500 000".parse::<Money>().unwrap().amount(), 1_500_000);
/// assert!("12.5".parse::<Money>().is_err());
/// ```
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
#[repr(transparent)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    /// Creates a new amount from whole tenge.
    #[must_use]
    pub const fn new(amount: i64) -> Self {
        Self(amount)
    }

    /// Returns the raw value in tenge.
    #[must_use]
    pub const fn amount(self) -> i64 {
        self.0
    }

    /// Returns `true` if the amount is 0.
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Returns `true` if the amount is negative.
    #[must_use]
    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Saturating subtraction.
    #[must_use]
    pub const fn saturating_sub(self, rhs: Money) -> Money {
        Money(self.0.saturating_sub(rhs.0))
    }

    /// Saturating addition.
    #[must_use]
    pub const fn saturating_add(self, rhs: Money) -> Money {
        Money(self.0.saturating_add(rhs.0))
    }

    /// Restricts the amount to `[min, max]`.
    ///
    /// Unlike [`Ord::clamp`] this never panics: when `max < min` the lower
    /// bound wins.
    #[must_use]
    pub fn clamp_to(self, min: Money, max: Money) -> Money {
        Money(self.0.min(max.0).max(min.0))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let digits = self.0.unsigned_abs().to_string();

        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(' ');
            }
            grouped.push(ch);
        }

        write!(f, "{sign}{grouped} {TENGE_SIGN}")
    }
}

// Arithmetic saturates at the `i64` bounds.
impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Self::Output {
        self.saturating_add(rhs)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Money) {
        *self = self.saturating_add(rhs);
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, rhs: Money) -> Self::Output {
        self.saturating_sub(rhs)
    }
}

impl Neg for Money {
    type Output = Money;

    fn neg(self) -> Self::Output {
        Money(self.0.saturating_neg())
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::ZERO, Money::saturating_add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

impl FromStr for Money {
    type Err = EngineError;

    /// Parses a whole-tenge string.
    ///
    /// Accepts an optional leading `+`/`-`, an optional trailing `₸`, and
    /// spaces or `_` between digit groups.
    ///
    /// Validation rules:
    /// - rejects fractional amounts (`12.5`)
    /// - rejects empty/invalid strings
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let empty = || EngineError::InvalidAmount("empty amount".to_string());
        let invalid = || EngineError::InvalidAmount("invalid amount".to_string());
        let overflow = || EngineError::InvalidAmount("amount too large".to_string());

        let trimmed = s.trim();
        let trimmed = trimmed.strip_suffix(TENGE_SIGN).unwrap_or(trimmed).trim_end();
        if trimmed.is_empty() {
            return Err(empty());
        }

        let (negative, rest) = if let Some(stripped) = trimmed.strip_prefix('-') {
            (true, stripped)
        } else if let Some(stripped) = trimmed.strip_prefix('+') {
            (false, stripped)
        } else {
            (false, trimmed)
        };

        let digits: String = rest
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '_')
            .collect();
        if digits.is_empty() {
            return Err(empty());
        }
        if digits.contains(['.', ',']) {
            return Err(EngineError::InvalidAmount(
                "fractional tenge are not supported".to_string(),
            ));
        }
        if !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }

        let value: i64 = digits.parse().map_err(|_| overflow())?;
        Ok(Money(if negative { -value } else { value }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_groups_thousands() {
        assert_eq!(Money::new(0).to_string(), "0 ₸");
        assert_eq!(Money::new(999).to_string(), "999 ₸");
        assert_eq!(Money::new(1_000).to_string(), "1 000 ₸");
        assert_eq!(Money::new(450_000).to_string(), "450 000 ₸");
        assert_eq!(Money::new(15_000_000).to_string(), "15 000 000 ₸");
        assert_eq!(Money::new(-85_000).to_string(), "-85 000 ₸");
    }

    #[test]
    fn parse_accepts_groupers_and_sign() {
        assert_eq!("10000".parse::<Money>().unwrap().amount(), 10_000);
        assert_eq!("10 000".parse::<Money>().unwrap().amount(), 10_000);
        assert_eq!("10_000 ₸".parse::<Money>().unwrap().amount(), 10_000);
        assert_eq!("-500".parse::<Money>().unwrap().amount(), -500);
        assert_eq!("  +42 ".parse::<Money>().unwrap().amount(), 42);
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!("".parse::<Money>().is_err());
        assert!("-".parse::<Money>().is_err());
        assert!("12.5".parse::<Money>().is_err());
        assert!("12,5".parse::<Money>().is_err());
        assert!("abc".parse::<Money>().is_err());
        assert!("99999999999999999999".parse::<Money>().is_err());
    }

    #[test]
    fn clamp_to_prefers_lower_bound_on_inverted_range() {
        assert_eq!(
            Money::new(50).clamp_to(Money::ZERO, Money::new(-10)),
            Money::ZERO
        );
        assert_eq!(
            Money::new(50).clamp_to(Money::ZERO, Money::new(40)),
            Money::new(40)
        );
        assert_eq!(
            Money::new(-5).clamp_to(Money::ZERO, Money::new(40)),
            Money::ZERO
        );
    }

    #[test]
    fn arithmetic_saturates_instead_of_overflowing() {
        let max = Money::new(i64::MAX);

        assert_eq!(max + Money::new(1), max);
        assert_eq!(Money::new(i64::MIN) - Money::new(1), Money::new(i64::MIN));
        assert_eq!(-Money::new(i64::MIN), max);

        let total: Money = [max, Money::new(15_000_000), Money::new(5_000_000)]
            .iter()
            .sum();
        assert_eq!(total, max);

        let mut acc = max;
        acc += Money::new(27_000);
        assert_eq!(acc, max);
    }
}
