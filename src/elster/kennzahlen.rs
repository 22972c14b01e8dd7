//! Filled fields of the UStVA form.

use std::collections::BTreeMap;
use std::collections::btree_map;

use tracing::debug;

use super::mapping::Mapping;
use crate::core::{Cents, Period, Result};
use crate::ledger::{Aggregator, Rounding};

/// Content of one field (Kennzahl) of the UStVA form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Kennzahl {
    /// Field number.
    pub code: u16,
    /// Accumulated amount.
    pub amount: Cents,
    /// Tax account of the first row that contributed to this field.
    pub account: u32,
    /// Rounding convention of that account.
    pub rounding: Rounding,
}

impl Kennzahl {
    /// XML element name, e.g. `Kz81`.
    pub fn element_name(&self) -> String {
        format!("Kz{:02}", self.code)
    }

    /// Amount as written into the declaration: whole euros for accounts
    /// that round down, euros and cents otherwise.
    pub fn amount_string(&self) -> String {
        match self.rounding {
            Rounding::Down => self.amount.to_whole_euro_string(),
            Rounding::Standard => self.amount.to_decimal_string(),
        }
    }
}

/// All non-zero fields of a declaration, ordered by field number.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Kennzahlen(BTreeMap<u16, Kennzahl>);

impl Kennzahlen {
    /// Evaluate every mapping row for `period` and collect the results.
    ///
    /// Rows targeting the same field are added up. Fields of accounts that
    /// round down are cut to whole euros once all rows are merged, and
    /// fields summing to zero are left out.
    pub fn compute(
        aggregator: &Aggregator<'_>,
        mappings: &[Mapping],
        period: Period,
    ) -> Result<Self> {
        let mut fields = Self::default();

        for m in mappings {
            let value = aggregator.sum(m.account, m.kind, period)?;
            if value.is_zero() {
                continue;
            }
            debug!(kz = m.kz, account = m.account, "Kz{:02} += {value}", m.kz);
            let rounding = aggregator.book().account(m.account)?.rounding;
            fields.add(m.kz, m.account, rounding, value)?;
        }

        fields.finish();
        Ok(fields)
    }

    /// Add `amount` to field `code`, creating it for `account` if missing.
    pub fn add(
        &mut self,
        code: u16,
        account: u32,
        rounding: Rounding,
        amount: Cents,
    ) -> Result<()> {
        match self.0.entry(code) {
            btree_map::Entry::Occupied(mut entry) => {
                let kz = entry.get_mut();
                kz.amount = kz.amount.checked_add(amount)?;
            }
            btree_map::Entry::Vacant(entry) => {
                entry.insert(Kennzahl {
                    code,
                    amount,
                    account,
                    rounding,
                });
            }
        }
        Ok(())
    }

    fn finish(&mut self) {
        for kz in self.0.values_mut() {
            if kz.rounding == Rounding::Down {
                kz.amount = kz.amount.truncate_to_euro();
            }
        }
        self.0.retain(|_, kz| !kz.amount.is_zero());
    }

    /// Field by number.
    pub fn get(&self, code: u16) -> Option<&Kennzahl> {
        self.0.get(&code)
    }

    /// Fields in ascending order.
    pub fn iter(&self) -> btree_map::Values<'_, u16, Kennzahl> {
        self.0.values()
    }

    /// Number of filled fields.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no field is filled.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'a> IntoIterator for &'a Kennzahlen {
    type Item = &'a Kennzahl;
    type IntoIter = btree_map::Values<'a, u16, Kennzahl>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
