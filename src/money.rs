//! Money: signed amount in integer cents.

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};
use std::str::FromStr;

use crate::error::ParseMoneyError;

/// Amount in cents.
///
/// `Money(123456)` represents $1,234.56. All arithmetic stays in integers; the only
/// way to derive an amount from a float is [`Money::from_rounded`], which rounds once.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Money(pub i64);

impl Money {
    pub const ZERO: Money = Money(0);

    /// Amount from a cent count.
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Amount from a whole number of dollars.
    pub const fn from_dollars(dollars: i64) -> Self {
        Money(dollars * 100)
    }

    /// The cent count.
    pub const fn cents(self) -> i64 {
        self.0
    }

    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }

    /// Round a cent value computed in floating point, half away from zero.
    ///
    /// Non-finite input and values outside the `i64` range saturate.
    pub fn from_rounded(cents: f64) -> Self {
        // `as` saturates and maps NaN to 0
        Money(cents.round() as i64)
    }

    /// The amount as a float, for percentage math only.
    pub fn as_f64(self) -> f64 {
        self.0 as f64
    }

    /// Parse a dollars-and-cents string such as `1234.56` or `$1234.56`.
    ///
    /// An optional leading `$` is stripped and every `.` removed; what remains
    /// must be a base-10 integer, optionally signed, and is read as cents. Input
    /// is expected to carry exactly two fraction digits: `"1000"` reads as
    /// 1000 cents ($10.00) and `"12.345"` as 12345 cents.
    pub fn parse(input: &str) -> Result<Self, ParseMoneyError> {
        let s = input.strip_prefix('$').unwrap_or(input);
        let digits: String = s.chars().filter(|&c| c != '.').collect();
        digits
            .parse::<i64>()
            .map(Money)
            .map_err(|_| ParseMoneyError::new(input))
    }

    /// `self + rhs`, or `None` if the sum leaves the `i64` cent range.
    pub const fn checked_add(self, rhs: Money) -> Option<Money> {
        match self.0.checked_add(rhs.0) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }

    /// `self - rhs`, or `None` if the difference leaves the `i64` cent range.
    pub const fn checked_sub(self, rhs: Money) -> Option<Money> {
        match self.0.checked_sub(rhs.0) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }

    /// Render as `$D.CC`, optionally grouping the dollar digits with `,`.
    ///
    /// Negative amounts put the sign before the currency symbol: `-$12.34`.
    pub fn format(self, separators: bool) -> String {
        let abs = self.0.unsigned_abs();
        let dollars = (abs / 100).to_string();
        let cents = abs % 100;
        let dollars = if separators {
            group_thousands(&dollars)
        } else {
            dollars
        };
        let sign = if self.0 < 0 { "-" } else { "" };
        format!("{sign}${dollars}.{cents:02}")
    }
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// `{}` renders `$1234.56`; `{:#}` renders `$1,234.56`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.format(f.alternate()))
    }
}

impl FromStr for Money {
    type Err = ParseMoneyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Money::parse(s)
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Money) {
        self.0 += rhs.0;
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, rhs: Money) -> Money {
        Money(self.0 - rhs.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, rhs: Money) {
        self.0 -= rhs.0;
    }
}

impl Neg for Money {
    type Output = Money;

    fn neg(self) -> Money {
        Money(-self.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Money {
        iter.copied().sum()
    }
}
