//! Consolidated account metadata.

use std::collections::{HashMap, HashSet};

use super::{Account, AccountGroup, AccountKind};
use crate::core::{Result, UstvaError};

/// Account lookup built once per ledger.
///
/// Tax-typed groups provide rate and rounding per account number. Booking
/// accounts flagged as tax accounts form the set of accounts whose postings
/// are tax remittances and never count as turnover.
#[derive(Debug, Clone, Default)]
pub struct AccountBook {
    info: HashMap<u32, Account>,
    tax_accounts: HashSet<u32>,
}

impl AccountBook {
    /// Index the given account groups.
    pub fn from_groups(groups: &[AccountGroup]) -> Self {
        let mut book = Self::default();
        for group in groups {
            match group.kind {
                AccountKind::Tax => {
                    for account in &group.accounts {
                        book.info.insert(account.number, account.clone());
                    }
                }
                AccountKind::Booking => {
                    book.tax_accounts.extend(
                        group
                            .accounts
                            .iter()
                            .filter(|a| a.tax_account)
                            .map(|a| a.number),
                    );
                }
                AccountKind::Other(_) => {}
            }
        }
        book
    }

    /// Metadata of a tax account.
    pub fn account(&self, number: u32) -> Result<&Account> {
        self.info
            .get(&number)
            .ok_or(UstvaError::UnknownAccount(number))
    }

    /// Whether postings on this booking account are tax postings.
    pub fn is_tax_account(&self, number: u32) -> bool {
        self.tax_accounts.contains(&number)
    }

    /// Number of indexed tax accounts.
    pub fn len(&self) -> usize {
        self.info.len()
    }

    /// Whether no tax account is known.
    pub fn is_empty(&self) -> bool {
        self.info.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::Rounding;

    fn account(number: u32, percent: u32, tax_account: bool) -> Account {
        Account {
            number,
            kind: String::new(),
            tax_account,
            rounding: Rounding::Standard,
            percent,
        }
    }

    fn groups() -> Vec<AccountGroup> {
        vec![
            AccountGroup {
                kind: AccountKind::Tax,
                accounts: vec![account(500, 19, false), account(510, 7, false)],
            },
            AccountGroup {
                kind: AccountKind::Booking,
                accounts: vec![account(1776, 0, true), account(8400, 19, false)],
            },
            AccountGroup {
                kind: AccountKind::Other("private".into()),
                accounts: vec![account(1800, 0, true)],
            },
        ]
    }

    #[test]
    fn indexes_tax_groups() {
        let book = AccountBook::from_groups(&groups());
        assert_eq!(book.len(), 2);
        assert_eq!(book.account(500).unwrap().percent, 19);
        assert_eq!(book.account(510).unwrap().percent, 7);
    }

    #[test]
    fn booking_accounts_are_not_indexed() {
        let book = AccountBook::from_groups(&groups());
        assert!(matches!(
            book.account(8400),
            Err(UstvaError::UnknownAccount(8400))
        ));
    }

    #[test]
    fn tax_account_set() {
        let book = AccountBook::from_groups(&groups());
        assert!(book.is_tax_account(1776));
        assert!(!book.is_tax_account(8400));
        // flagged, but in an ignored group
        assert!(!book.is_tax_account(1800));
        // tax-typed group members are not tax-account-flagged
        assert!(!book.is_tax_account(500));
    }

    #[test]
    fn empty_book() {
        let book = AccountBook::from_groups(&[]);
        assert!(book.is_empty());
        assert!(book.account(500).is_err());
    }
}
