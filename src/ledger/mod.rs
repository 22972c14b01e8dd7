//! Ledger data model of a JES bookkeeping export.
//!
//! A [`Ledger`] holds the receipts of one business year together with the
//! chart of accounts. [`AccountBook`] consolidates the account metadata and
//! [`Aggregator`] sums payments per account and reporting period.

mod accounts;
mod aggregate;
mod validate;

pub use accounts::AccountBook;
pub use aggregate::{Aggregator, SumKind};

use std::cell::OnceCell;

use chrono::{Datelike, NaiveDate};

use crate::core::{Cents, Result};

/// Bookkeeping data of one business year.
#[derive(Debug, Clone)]
pub struct Ledger {
    /// Name of the business owner ("Vorname Nachname").
    pub name: String,
    /// Free-text address as stored by the bookkeeping tool.
    pub address: String,
    /// Company name (Bezeichnung).
    pub company: String,
    /// Tax ID as stored by the bookkeeping tool.
    pub tax_id: String,
    /// First day of the business year.
    pub start: NaiveDate,
    /// Last day of the business year.
    pub end: NaiveDate,
    /// All receipts of the business year.
    pub receipts: Vec<Receipt>,
    /// Chart of accounts, grouped by account type.
    pub account_groups: Vec<AccountGroup>,
}

impl Ledger {
    /// Calendar year of the declaration.
    pub fn year(&self) -> i32 {
        self.start.year()
    }
}

/// A dated receipt (Beleg) grouping one or more payments.
#[derive(Debug, Clone)]
pub struct Receipt {
    /// Receipt number, used in debug output.
    pub number: u32,
    /// Posting date, inherited by all payments.
    pub date: NaiveDate,
    /// Unpaid receipts never enter a declaration.
    pub paid: bool,
    /// Payments booked on this receipt.
    pub payments: Vec<Payment>,
}

/// A single payment line of a receipt.
#[derive(Debug, Clone)]
pub struct Payment {
    /// Tax account for incoming payments, if any.
    pub incoming: Option<u32>,
    /// Tax account for outgoing payments, if any.
    pub outgoing: Option<u32>,
    /// Booking account.
    pub account: u32,
    /// Amount and tax handling.
    pub amount: Amount,
}

impl Payment {
    /// Whether either tax account reference equals `account`.
    pub fn references(&self, account: u32) -> bool {
        self.incoming == Some(account) || self.outgoing == Some(account)
    }

    /// Booked amount in cents.
    pub fn value(&self) -> Result<Cents> {
        self.amount.value()
    }

    /// Amount without tax for an account with the given rate.
    ///
    /// Tax-exclusive payments already are net and pass through unchanged.
    pub fn gross(&self, rate: u32) -> Result<Cents> {
        let value = self.value()?;
        Ok(match self.amount.tax {
            TaxHandling::Inclusive => value.gross_from_inclusive(rate),
            TaxHandling::Exclusive => value,
        })
    }

    /// Tax part of this payment for an account with the given rate.
    pub fn tax(&self, rate: u32) -> Result<Cents> {
        let value = self.value()?;
        Ok(match self.amount.tax {
            TaxHandling::Inclusive => value.tax_from_inclusive(rate),
            TaxHandling::Exclusive => value.tax_from_exclusive(rate),
        })
    }
}

/// Whether a booked amount contains its tax.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaxHandling {
    /// The amount includes tax (`tax="incl"`).
    Inclusive,
    /// The amount excludes tax.
    Exclusive,
}

impl TaxHandling {
    /// Parse the JES `tax` attribute; only `"incl"` means inclusive.
    pub fn from_code(code: &str) -> Self {
        match code.trim() {
            "incl" => Self::Inclusive,
            _ => Self::Exclusive,
        }
    }
}

/// Raw amount text of a payment. The value in cents is parsed on first
/// access and cached.
#[derive(Debug, Clone)]
pub struct Amount {
    /// Tax handling of the amount.
    pub tax: TaxHandling,
    raw: String,
    cents: OnceCell<Cents>,
}

impl Amount {
    /// Wrap a raw decimal string.
    pub fn new(raw: impl Into<String>, tax: TaxHandling) -> Self {
        Self {
            tax,
            raw: raw.into(),
            cents: OnceCell::new(),
        }
    }

    /// The amount text as found in the export.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Parsed value in cents.
    pub fn value(&self) -> Result<Cents> {
        if let Some(cents) = self.cents.get() {
            return Ok(*cents);
        }
        let cents = Cents::parse(&self.raw)?;
        let _ = self.cents.set(cents);
        Ok(cents)
    }
}

/// Type tag of an account group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountKind {
    /// Tax accounts, carrying rate and rounding metadata.
    Tax,
    /// Operational booking accounts.
    Booking,
    /// Any other group type; ignored.
    Other(String),
}

impl AccountKind {
    /// Parse the JES group `type` attribute.
    pub fn from_code(code: &str) -> Self {
        match code.trim() {
            "tax" => Self::Tax,
            "booking" => Self::Booking,
            other => Self::Other(other.into()),
        }
    }
}

/// A typed group of accounts.
#[derive(Debug, Clone)]
pub struct AccountGroup {
    /// Group type.
    pub kind: AccountKind,
    /// Accounts of this group.
    pub accounts: Vec<Account>,
}

/// An account of the chart of accounts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    /// Account number, unique across the ledger.
    pub number: u32,
    /// Account type as stored in the export.
    pub kind: String,
    /// Booking accounts only: postings on this account are tax postings.
    pub tax_account: bool,
    /// Rounding convention for declared amounts.
    pub rounding: Rounding,
    /// Tax rate in percent (0–100).
    pub percent: u32,
}

/// Rounding convention of a declared amount.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Rounding {
    /// Declared with cents.
    #[default]
    Standard,
    /// Declared in whole euros, rounded down.
    Down,
}

impl Rounding {
    /// Parse the JES `rounding` attribute.
    pub fn from_code(code: &str) -> Self {
        match code.trim().to_ascii_lowercase().as_str() {
            "down" | "rounddown" | "round-down" => Self::Down,
            _ => Self::Standard,
        }
    }
}
