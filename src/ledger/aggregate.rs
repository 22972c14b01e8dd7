//! Payment selection and per-account sums.

use tracing::debug;

use super::{AccountBook, Ledger, Payment, Receipt};
use crate::core::{Cents, Period, Result};

/// What to sum for an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SumKind {
    /// Net amount (Bemessungsgrundlage).
    Amount,
    /// Tax amount.
    Tax,
    /// Always zero; the entry is skipped.
    Ignored,
}

/// Sums payments of a ledger per account and reporting period.
#[derive(Debug)]
pub struct Aggregator<'a> {
    ledger: &'a Ledger,
    book: AccountBook,
}

impl<'a> Aggregator<'a> {
    /// Build the account lookup for `ledger`.
    pub fn new(ledger: &'a Ledger) -> Self {
        Self {
            ledger,
            book: AccountBook::from_groups(&ledger.account_groups),
        }
    }

    /// The underlying ledger.
    pub fn ledger(&self) -> &'a Ledger {
        self.ledger
    }

    /// The consolidated account metadata.
    pub fn book(&self) -> &AccountBook {
        &self.book
    }

    /// Payments relevant for `account` within `period`.
    ///
    /// Skips unpaid receipts, receipts outside the period and payments
    /// booked on a tax account. The iterator is lazy and scans the ledger
    /// anew on every call.
    pub fn payments(
        &self,
        account: u32,
        period: Period,
    ) -> impl Iterator<Item = (&'a Receipt, &'a Payment)> + '_ {
        self.ledger
            .receipts
            .iter()
            .filter(move |r| r.paid && period.includes(&r.date))
            .flat_map(|r| r.payments.iter().map(move |p| (r, p)))
            .filter(move |(_, p)| p.references(account) && !self.book.is_tax_account(p.account))
    }

    /// Sum of all relevant payments for `account`.
    ///
    /// Each payment is split into net and tax and rounded on its own
    /// before it is added.
    pub fn sum(&self, account: u32, kind: SumKind, period: Period) -> Result<Cents> {
        let info = self.book.account(account)?;
        if kind == SumKind::Ignored {
            return Ok(Cents::ZERO);
        }

        let mut sum = Cents::ZERO;
        for (receipt, payment) in self.payments(account, period) {
            let diff = match kind {
                SumKind::Amount => payment.gross(info.percent)?,
                SumKind::Tax => payment.tax(info.percent)?,
                SumKind::Ignored => Cents::ZERO,
            };
            debug!(
                account,
                booking_account = payment.account,
                receipt = receipt.number,
                "Kto {account:02}/{:02} (#{}): {diff}",
                payment.account,
                receipt.number,
            );
            sum = sum.checked_add(diff)?;
        }
        Ok(sum)
    }
}
