//! Fixed-point euro amounts.

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Neg, Sub};

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

use super::error::{Result, UstvaError};

/// A signed amount of euro cents.
///
/// Money is never stored as floating point. Tax splits are computed in
/// [`Decimal`] and rounded half away from zero back to whole cents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Cents(pub i64);

impl Cents {
    /// Zero cents.
    pub const ZERO: Self = Self(0);

    /// Parse a `major.minor` decimal string.
    ///
    /// A missing or short fractional part is padded with zeros, digits
    /// beyond the second fractional position are cut off (input is never
    /// rounded). Apart from one leading sign and the decimal point the text
    /// must consist of ASCII digits.
    ///
    /// ```
    /// use ustva::Cents;
    ///
    /// assert_eq!(Cents::parse("12.3").unwrap(), Cents(1230));
    /// assert_eq!(Cents::parse("12.345").unwrap(), Cents(1234));
    /// ```
    pub fn parse(text: &str) -> Result<Self> {
        let text = text.trim();
        if text.is_empty() {
            return Err(malformed(text, "empty amount"));
        }

        let (left, right) = text.split_once('.').unwrap_or((text, ""));
        let unsigned = left.strip_prefix(['-', '+']).unwrap_or(left);
        if unsigned.is_empty() && right.is_empty() {
            return Err(malformed(text, "no digits"));
        }
        if !unsigned.bytes().chain(right.bytes()).all(|b| b.is_ascii_digit()) {
            return Err(malformed(text, "not a decimal number"));
        }

        let fraction = match right.char_indices().nth(2) {
            Some((idx, _)) => right[..idx].to_string(),
            None => format!("{right:0<2}"),
        };

        let digits = format!("{left}{fraction}");
        digits
            .parse::<i64>()
            .map(Self)
            .map_err(|e| malformed(text, &format!("cannot parse '{digits}' as integer: {e}")))
    }

    /// Net part of a tax-inclusive total: `round(total / (1 + rate/100))`.
    ///
    /// A rate of zero returns the total unchanged.
    pub fn gross_from_inclusive(self, rate: u32) -> Self {
        if rate == 0 {
            return self;
        }
        let factor = Decimal::ONE + Decimal::from(rate) / dec!(100);
        round_to_cents(Decimal::from(self.0) / factor)
    }

    /// Tax on a tax-exclusive total: `round(total * rate/100)`.
    pub fn tax_from_exclusive(self, rate: u32) -> Self {
        if rate == 0 {
            return Self::ZERO;
        }
        round_to_cents(Decimal::from(self.0) * Decimal::from(rate) / dec!(100))
    }

    /// Sum of two amounts, failing instead of wrapping on overflow.
    pub fn checked_add(self, rhs: Self) -> Result<Self> {
        self.0.checked_add(rhs.0).map(Self).ok_or_else(|| {
            UstvaError::AmountOverflow(format!(
                "{} + {}",
                self.to_decimal_string(),
                rhs.to_decimal_string()
            ))
        })
    }

    /// Tax contained in a tax-inclusive total.
    pub fn tax_from_inclusive(self, rate: u32) -> Self {
        self - self.gross_from_inclusive(rate)
    }

    /// Drop the cents, rounding toward zero.
    pub fn truncate_to_euro(self) -> Self {
        Self(self.0 / 100 * 100)
    }

    /// Whether the amount is exactly zero.
    pub fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Render as `"12.34"`.
    pub fn to_decimal_string(self) -> String {
        let (sign, abs) = self.split_sign();
        format!("{sign}{}.{:02}", abs / 100, abs % 100)
    }

    /// Render the whole euros only, e.g. `"12"` for 12.34 EUR.
    pub fn to_whole_euro_string(self) -> String {
        let (sign, abs) = self.split_sign();
        let euros = abs / 100;
        if euros == 0 {
            return "0".into();
        }
        format!("{sign}{euros}")
    }

    fn split_sign(self) -> (&'static str, u64) {
        let sign = if self.0 < 0 { "-" } else { "" };
        (sign, self.0.unsigned_abs())
    }
}

fn round_to_cents(value: Decimal) -> Cents {
    let rounded = value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    // scale is 0 after rounding, so the mantissa is the integer value
    Cents(rounded.mantissa() as i64)
}

fn malformed(value: &str, reason: &str) -> UstvaError {
    UstvaError::MalformedAmount {
        value: value.into(),
        reason: reason.into(),
    }
}

impl fmt::Display for Cents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} EUR", self.to_decimal_string())
    }
}

impl Add for Cents {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Cents {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl Neg for Cents {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl Sum for Cents {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}
