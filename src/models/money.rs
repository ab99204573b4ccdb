//! Expense amounts
//!
//! Held as a whole number of cents so that sums are exact and "same as last
//! period" can be an equality check. Serialized as a plain JSON number
//! (`12.5`), the shape the persisted expense list has always used.

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// An amount in cents; negative values are allowed
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Money(i64);

impl Money {
    /// ```
    /// use spendlog::models::Money;
    /// assert_eq!(Money::from_cents(1999).to_string(), "$19.99");
    /// ```
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Nearest-cent amount for a decimal value
    ///
    /// NaN and infinities become zero; values beyond the `i64` cent range
    /// clamp to the nearest bound.
    ///
    /// ```
    /// use spendlog::models::Money;
    /// assert_eq!(Money::from_decimal(12.5).cents(), 1250);
    /// ```
    pub fn from_decimal(value: f64) -> Self {
        if value.is_finite() {
            Self((value * 100.0).round() as i64)
        } else {
            Self(0)
        }
    }

    /// Like [`Money::from_decimal`], but `None` for non-finite values and
    /// values whose cents do not fit in an `i64`
    pub fn try_from_decimal(value: f64) -> Option<Self> {
        let cents = (value * 100.0).round();
        // i64::MAX as f64 rounds up to 2^63, which is already out of range
        let limit = i64::MAX as f64;
        (cents.is_finite() && cents >= -limit && cents < limit).then(|| Self(cents as i64))
    }

    pub const fn zero() -> Self {
        Self(0)
    }

    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Whole currency units, truncated toward zero
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Unsigned remainder below one unit, 0 to 99
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    pub fn as_decimal(&self) -> f64 {
        self.0 as f64 / 100.0
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

    pub const fn abs(&self) -> Self {
        Self(self.0.saturating_abs())
    }

    /// Mean share over `count` items, to the nearest cent (zero for none)
    pub fn average_over(&self, count: usize) -> Self {
        match count {
            0 => Self(0),
            n => Self((self.0 as f64 / n as f64).round() as i64),
        }
    }

    /// Parse user input such as `12`, `12.5`, `$12.50`, `-3` or `1,250.00`
    ///
    /// Digits past the cents place are rounded half away from zero.
    pub fn parse(input: &str) -> Result<Self, MoneyParseError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(MoneyParseError::Empty);
        }

        let (negative, unsigned) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest.trim_start()),
            None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
        };
        let digits: String = unsigned
            .strip_prefix('$')
            .unwrap_or(unsigned)
            .chars()
            .filter(|c| *c != ',' && *c != '_')
            .collect();

        let invalid = || MoneyParseError::InvalidFormat(input.trim().to_string());
        let (whole, fraction) = digits.split_once('.').unwrap_or((digits.as_str(), ""));
        let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
        if (whole.is_empty() && fraction.is_empty()) || !all_digits(whole) || !all_digits(fraction) {
            return Err(invalid());
        }

        let units: i64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| MoneyParseError::Overflow)?
        };

        let mut fraction_digits = fraction.bytes().map(|b| i64::from(b - b'0'));
        let tenths = fraction_digits.next().unwrap_or(0);
        let hundredths = fraction_digits.next().unwrap_or(0);
        let round_up = fraction_digits.next().map_or(false, |d| d >= 5);

        let cents = units
            .checked_mul(100)
            .and_then(|c| c.checked_add(tenths * 10 + hundredths + i64::from(round_up)))
            .ok_or(MoneyParseError::Overflow)?;

        Ok(Self(if negative { -cents } else { cents }))
    }

    /// Render with the given currency symbol, sign first: `-€3.05`
    pub fn format_with_symbol(&self, symbol: &str) -> String {
        format!(
            "{}{}{}.{:02}",
            if self.0 < 0 { "-" } else { "" },
            symbol,
            self.dollars().abs(),
            self.cents_part()
        )
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.format_with_symbol("$"))
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.0 % 100 == 0 {
            serializer.serialize_i64(self.0 / 100)
        } else {
            serializer.serialize_f64(self.as_decimal())
        }
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = f64::deserialize(deserializer)?;
        Self::try_from_decimal(value).ok_or_else(|| {
            serde::de::Error::custom(format!("amount {} is out of range", value))
        })
    }
}

// Arithmetic saturates at the i64 bounds instead of overflowing
macro_rules! impl_money_op {
    ($trait:ident, $method:ident, $assign_trait:ident, $assign_method:ident, $saturating:ident) => {
        impl $trait for Money {
            type Output = Money;

            fn $method(self, rhs: Money) -> Money {
                Money(self.0.$saturating(rhs.0))
            }
        }

        impl $assign_trait for Money {
            fn $assign_method(&mut self, rhs: Money) {
                self.0 = self.0.$saturating(rhs.0);
            }
        }
    };
}

impl_money_op!(Add, add, AddAssign, add_assign, saturating_add);
impl_money_op!(Sub, sub, SubAssign, sub_assign, saturating_sub);

impl Neg for Money {
    type Output = Money;

    fn neg(self) -> Money {
        Money(self.0.saturating_neg())
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Money {
        iter.copied().sum()
    }
}

/// Why an amount string was rejected
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoneyParseError {
    Empty,
    InvalidFormat(String),
    Overflow,
}

impl fmt::Display for MoneyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "no amount given"),
            Self::InvalidFormat(s) => write!(f, "'{}' is not an amount", s),
            Self::Overflow => write!(f, "amount is too large"),
        }
    }
}

impl std::error::Error for MoneyParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_decimal_rounds_to_cents() {
        assert_eq!(Money::from_decimal(10.5).cents(), 1050);
        assert_eq!(Money::from_decimal(0.1 + 0.2).cents(), 30);
        assert_eq!(Money::from_decimal(-3.25).cents(), -325);
        assert_eq!(Money::from_decimal(f64::NAN), Money::zero());
        assert_eq!(Money::from_decimal(f64::INFINITY), Money::zero());
    }

    #[test]
    fn test_formatting() {
        assert_eq!(Money::from_cents(2307).to_string(), "$23.07");
        assert_eq!(Money::zero().to_string(), "$0.00");
        assert_eq!(Money::from_cents(-2307).to_string(), "-$23.07");
        assert_eq!(Money::from_cents(-5).format_with_symbol("€"), "-€0.05");
        assert_eq!(format!("{:>8}", Money::from_cents(150)), "   $1.50");
    }

    #[test]
    fn test_operators() {
        let mut running = Money::from_cents(700);
        running += Money::from_cents(250);
        running -= Money::from_cents(1000);
        assert_eq!(running.cents(), -50);
        assert_eq!((-running).cents(), 50);
        assert_eq!((Money::from_cents(1) - Money::from_cents(3)).abs().cents(), 2);
    }

    #[test]
    fn test_parse_accepted_forms() {
        let cases = [
            ("12", 1200),
            ("12.5", 1250),
            ("$12.50", 1250),
            ("-3", -300),
            ("- $3.10", -310),
            ("+4.01", 401),
            (".75", 75),
            ("8.", 800),
            ("1,250.00", 125_000),
            ("0.125", 13),
            ("0.124", 12),
        ];
        for (input, cents) in cases {
            assert_eq!(Money::parse(input).unwrap().cents(), cents, "input {:?}", input);
        }
    }

    #[test]
    fn test_parse_rejections() {
        assert_eq!(Money::parse("   "), Err(MoneyParseError::Empty));
        assert!(matches!(Money::parse("ten"), Err(MoneyParseError::InvalidFormat(_))));
        assert!(Money::parse("1.x5").is_err());
        assert!(Money::parse(".").is_err());
        assert!(Money::parse("1.2.3").is_err());
        assert_eq!(
            Money::parse("99999999999999999999"),
            Err(MoneyParseError::Overflow)
        );
    }

    #[test]
    fn test_arithmetic_saturates_at_bounds() {
        let max = Money::from_cents(i64::MAX);
        let min = Money::from_cents(i64::MIN);

        assert_eq!(max + max, max);
        assert_eq!(min - max, min);
        assert_eq!(-min, max);
        assert_eq!(min.abs(), max);

        let mut running = max;
        running += Money::from_cents(1);
        assert_eq!(running, max);

        let total: Money = [max, max, Money::from_cents(-5)].iter().sum();
        assert_eq!(total.cents(), i64::MAX - 5);
    }

    #[test]
    fn test_try_from_decimal_range() {
        assert_eq!(Money::try_from_decimal(12.34), Some(Money::from_cents(1234)));
        assert_eq!(Money::try_from_decimal(-0.5), Some(Money::from_cents(-50)));
        assert_eq!(Money::try_from_decimal(1e17), None);
        assert_eq!(Money::try_from_decimal(-1e17), None);
        assert_eq!(Money::try_from_decimal(f64::NAN), None);
        assert_eq!(Money::from_decimal(1e17).cents(), i64::MAX);
    }

    #[test]
    fn test_out_of_range_amount_is_rejected_on_load() {
        assert!(serde_json::from_str::<Money>("1e17").is_err());
        assert!(serde_json::from_str::<Money>("-1e300").is_err());
        let large: Money = serde_json::from_str("90000000000000000").unwrap();
        assert_eq!(large.cents(), 9_000_000_000_000_000_000);
    }

    #[test]
    fn test_average_over() {
        assert_eq!(Money::from_cents(1000).average_over(3).cents(), 333);
        assert_eq!(Money::from_cents(-1000).average_over(4).cents(), -250);
        assert_eq!(Money::from_cents(1000).average_over(0), Money::zero());
    }

    #[test]
    fn test_sum_by_value_and_reference() {
        let spend = [Money::from_cents(1999), Money::from_cents(1), Money::from_cents(-500)];
        let by_ref: Money = spend.iter().sum();
        let by_value: Money = spend.into_iter().sum();
        assert_eq!(by_ref, by_value);
        assert_eq!(by_value.cents(), 1500);
    }

    #[test]
    fn test_serializes_as_decimal_number() {
        assert_eq!(serde_json::to_string(&Money::from_cents(1200)).unwrap(), "12");
        assert_eq!(serde_json::to_string(&Money::from_cents(1250)).unwrap(), "12.5");

        let from_int: Money = serde_json::from_str("18").unwrap();
        let from_float: Money = serde_json::from_str("18.25").unwrap();
        assert_eq!(from_int.cents(), 1800);
        assert_eq!(from_float.cents(), 1825);
    }
}
