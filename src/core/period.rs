use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};

use super::error::{Result, UstvaError};

/// Reporting period (Voranmeldungszeitraum) of a declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    /// A single calendar month (1–12).
    Month(u32),
    /// Consecutive months, both ends inclusive.
    MonthRange {
        /// First month of the range.
        start: u32,
        /// Last month of the range.
        end: u32,
    },
    /// Calendar quarter (1–4).
    Quarter(u32),
}

impl Period {
    /// A single month.
    pub fn month(month: u32) -> Result<Self> {
        check_month(month)?;
        Ok(Self::Month(month))
    }

    /// A month range; `end` must lie after `start`.
    pub fn month_range(start: u32, end: u32) -> Result<Self> {
        check_month(start)?;
        check_month(end)?;
        if end <= start {
            return Err(UstvaError::InvalidPeriod(format!(
                "range end {end} must be after start {start}"
            )));
        }
        Ok(Self::MonthRange { start, end })
    }

    /// A calendar quarter.
    pub fn quarter(quarter: u32) -> Result<Self> {
        if !(1..=4).contains(&quarter) {
            return Err(UstvaError::InvalidPeriod(format!(
                "quarter {quarter} is not in 1..4"
            )));
        }
        Ok(Self::Quarter(quarter))
    }

    /// Months covered by this period.
    ///
    /// A quarter built outside [`Period::quarter`] with a number of zero
    /// covers no month.
    pub fn months(&self) -> RangeInclusive<u32> {
        match *self {
            Self::Month(m) => m..=m,
            Self::MonthRange { start, end } => start..=end,
            Self::Quarter(0) => 1..=0,
            Self::Quarter(q) => (q - 1).saturating_mul(3).saturating_add(1)..=q.saturating_mul(3),
        }
    }

    /// Whether `date` falls into the period. The year is not considered.
    pub fn includes(&self, date: &NaiveDate) -> bool {
        self.months().contains(&date.month())
    }

    /// Elster `Zeitraum` code.
    ///
    /// Months are zero-padded (`"07"`), a range is identified by its end
    /// month, quarters are `"41"` to `"44"`.
    pub fn code(&self) -> String {
        match *self {
            Self::Month(m) => format!("{m:02}"),
            Self::MonthRange { end, .. } => format!("{end:02}"),
            Self::Quarter(q) => format!("4{q}"),
        }
    }
}

fn check_month(month: u32) -> Result<()> {
    if !(1..=12).contains(&month) {
        return Err(UstvaError::InvalidPeriod(format!(
            "month {month} is not in 1..12"
        )));
    }
    Ok(())
}

fn parse_number(text: &str) -> Result<u32> {
    text.trim()
        .parse()
        .map_err(|_| UstvaError::InvalidPeriod(format!("'{text}' is not a number")))
}

impl FromStr for Period {
    type Err = UstvaError;

    /// Accepts `"5"`, `"3-9"` and `"Q2"` / `"q2"`.
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if let Some(q) = s.strip_prefix(['Q', 'q']) {
            return Self::quarter(parse_number(q)?);
        }
        if let Some((start, end)) = s.split_once('-') {
            return Self::month_range(parse_number(start)?, parse_number(end)?);
        }
        Self::month(parse_number(s)?)
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.code())
    }
}
