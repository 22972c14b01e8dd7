//! JES tax accounts to Elster Kennzahlen.

use std::collections::BTreeSet;

use crate::ledger::SumKind;

/// One row of the mapping table: the sum of `kind` over `account` goes
/// into field `kz`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mapping {
    /// Elster field number (Kennzahl).
    pub kz: u16,
    /// JES tax account number.
    pub account: u32,
    /// Whether net amounts or taxes are summed.
    pub kind: SumKind,
}

const fn row(kz: u16, account: u32, kind: SumKind) -> Mapping {
    Mapping { kz, account, kind }
}

/// The mapping table, evaluated in order.
pub const MAPPINGS: &[Mapping] = &[
    // Steuerpflichtige Umsätze 19%
    row(81, 500, SumKind::Amount),
    // Steuerpflichtige Umsätze 7%
    row(83, 510, SumKind::Amount),
    // Umsätze 0%
    row(87, 520, SumKind::Amount),
    // Vorsteuer 19%
    row(66, 100, SumKind::Tax),
    // Vorsteuer 7%
    row(66, 110, SumKind::Tax),
    // §13b UStG, Umsatzsteuer
    row(46, 600, SumKind::Amount),
    row(47, 600, SumKind::Tax),
    // §13b UStG, Vorsteuer
    row(67, 200, SumKind::Tax),
    // Leistungsempfänger schuldet USt
    row(61, 610, SumKind::Amount),
];

/// Tax accounts covered by a mapping table.
pub fn known_accounts(mappings: &[Mapping]) -> BTreeSet<u32> {
    mappings.iter().map(|m| m.account).collect()
}
