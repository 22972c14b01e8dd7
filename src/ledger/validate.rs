use std::collections::BTreeSet;

use chrono::Datelike;

use super::Ledger;
use crate::core::{Result, UstvaError};

impl Ledger {
    /// Check that the ledger can be declared with the given mapping accounts.
    ///
    /// The business year must lie within one calendar year, and every tax
    /// account referenced by a payment must be one of `known_accounts`.
    pub fn validate(&self, known_accounts: &BTreeSet<u32>) -> Result<()> {
        if self.start.year() != self.end.year() {
            return Err(UstvaError::MultiYearSpan {
                start: self.start,
                end: self.end,
            });
        }

        let unsupported = self
            .receipts
            .iter()
            .flat_map(|r| &r.payments)
            .flat_map(|p| [p.incoming, p.outgoing])
            .flatten()
            .find(|acc| *acc != 0 && !known_accounts.contains(acc));

        match unsupported {
            Some(acc) => Err(UstvaError::UnsupportedTaxAccount(acc)),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::ledger::{Amount, Payment, Receipt, TaxHandling};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn ledger(incoming: Option<u32>, outgoing: Option<u32>) -> Ledger {
        Ledger {
            name: String::new(),
            address: String::new(),
            company: String::new(),
            tax_id: String::new(),
            start: date(2024, 1, 1),
            end: date(2024, 12, 31),
            receipts: vec![Receipt {
                number: 1,
                date: date(2024, 2, 1),
                paid: true,
                payments: vec![Payment {
                    incoming,
                    outgoing,
                    account: 8400,
                    amount: Amount::new("1.00", TaxHandling::Inclusive),
                }],
            }],
            account_groups: vec![],
        }
    }

    fn known() -> BTreeSet<u32> {
        [500, 100].into_iter().collect()
    }

    #[test]
    fn accepts_known_accounts() {
        assert!(ledger(Some(500), None).validate(&known()).is_ok());
        assert!(ledger(None, Some(100)).validate(&known()).is_ok());
        assert!(ledger(None, None).validate(&known()).is_ok());
        assert!(ledger(Some(0), Some(0)).validate(&known()).is_ok());
    }

    #[test]
    fn rejects_unknown_tax_account() {
        assert!(matches!(
            ledger(Some(300), None).validate(&known()),
            Err(UstvaError::UnsupportedTaxAccount(300))
        ));
        assert!(matches!(
            ledger(Some(500), Some(301)).validate(&known()),
            Err(UstvaError::UnsupportedTaxAccount(301))
        ));
    }

    #[test]
    fn rejects_multi_year_span() {
        let mut l = ledger(None, None);
        l.start = date(2023, 7, 1);
        l.end = date(2024, 6, 30);
        assert!(matches!(
            l.validate(&known()),
            Err(UstvaError::MultiYearSpan { .. })
        ));
    }
}
