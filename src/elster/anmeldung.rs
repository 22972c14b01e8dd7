//! Contents of an Elster `Anmeldungssteuern` document.

use chrono::NaiveDate;

use super::kennzahlen::Kennzahlen;
use super::mapping::{MAPPINGS, known_accounts};
use crate::config::Config;
use crate::core::{Period, Result};
use crate::ledger::{Aggregator, Ledger};

/// Elster namespace of the UStVA schema, completed by the year.
pub const USTVA_NAMESPACE_PREFIX: &str = "http://finkonsens.de/elster/elsteranmeldung/ustva/v";

/// A complete VAT pre-declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Anmeldung {
    /// Declaration year; selects the schema version.
    pub year: i32,
    /// Creation date (Erstellungsdatum).
    pub created: NaiveDate,
    /// Who prepared the data.
    pub datenlieferant: Datenlieferant,
    /// The business being declared.
    pub unternehmer: Unternehmer,
    /// The declared figures.
    pub voranmeldung: Voranmeldung,
}

/// Data supplier block. Filled with the business's own data.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Datenlieferant {
    /// Full name.
    pub name: String,
    /// Street and house number.
    pub strasse: String,
    /// Postal code.
    pub plz: String,
    /// City.
    pub ort: String,
    /// Telephone, omitted when empty.
    pub telefon: String,
    /// Email, omitted when empty.
    pub email: String,
}

/// The business (Unternehmer). Most of it is not part of JES.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Unternehmer {
    /// Company name, omitted when empty.
    pub bezeichnung: String,
    /// Last name.
    pub name: String,
    /// First name.
    pub vorname: String,
    /// Street.
    pub strasse: String,
    /// House number.
    pub hausnummer: String,
    /// House number suffix, omitted when empty.
    pub hnr_zusatz: String,
    /// City.
    pub ort: String,
    /// Postal code.
    pub plz: String,
    /// Telephone, omitted when empty.
    pub telefon: String,
    /// Email, omitted when empty.
    pub email: String,
}

/// The tax relevant part: period, tax number and filled fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Voranmeldung {
    /// Calendar year.
    pub jahr: i32,
    /// Period code, see [`Period::code`].
    pub zeitraum: String,
    /// Tax registration number.
    pub steuernummer: String,
    /// Filled fields.
    pub kennzahlen: Kennzahlen,
}

impl Anmeldung {
    /// Validate `ledger` against the built-in mapping table and compute
    /// the declaration for `period`.
    pub fn build(
        config: &Config,
        ledger: &Ledger,
        period: Period,
        created: NaiveDate,
    ) -> Result<Self> {
        ledger.validate(&known_accounts(MAPPINGS))?;
        let aggregator = Aggregator::new(ledger);
        let kennzahlen = Kennzahlen::compute(&aggregator, MAPPINGS, period)?;
        Ok(Self::assemble(config, ledger, period, created, kennzahlen))
    }

    /// Combine already computed fields with header data.
    pub fn assemble(
        config: &Config,
        ledger: &Ledger,
        period: Period,
        created: NaiveDate,
        kennzahlen: Kennzahlen,
    ) -> Self {
        Self {
            year: ledger.year(),
            created,
            datenlieferant: Datenlieferant::new(config, ledger),
            unternehmer: Unternehmer::new(config, ledger),
            voranmeldung: Voranmeldung {
                jahr: ledger.year(),
                zeitraum: period.code(),
                steuernummer: config.ustnr.clone(),
                kennzahlen,
            },
        }
    }

    /// Schema namespace for this declaration's year.
    pub fn namespace(&self) -> String {
        format!("{USTVA_NAMESPACE_PREFIX}{}", self.year)
    }
}

impl Datenlieferant {
    /// The ledger name is replaced only when the config has both names.
    pub fn new(config: &Config, ledger: &Ledger) -> Self {
        let name = if !config.name.is_empty() && !config.firstname.is_empty() {
            format!("{} {}", config.firstname, config.name)
        } else {
            ledger.name.clone()
        };

        Self {
            name,
            strasse: config.street_line(),
            plz: config.address.plz.clone(),
            ort: config.address.city.clone(),
            telefon: config.contact.telephone.clone(),
            email: config.contact.mail.clone(),
        }
    }
}

impl Unternehmer {
    /// First and last name come from the ledger name ("Vorname Nachname"),
    /// each overridden by the config when set.
    pub fn new(config: &Config, ledger: &Ledger) -> Self {
        let (first, last) = ledger
            .name
            .split_once(' ')
            .unwrap_or((ledger.name.as_str(), ""));
        let pick = |configured: &str, fallback: &str| {
            if configured.is_empty() {
                fallback.to_string()
            } else {
                configured.to_string()
            }
        };

        Self {
            bezeichnung: ledger.company.clone(),
            name: pick(&config.name, last),
            vorname: pick(&config.firstname, first),
            strasse: config.address.street.clone(),
            hausnummer: config.address.number.clone(),
            hnr_zusatz: config.address.numbersuffix.clone(),
            ort: config.address.city.clone(),
            plz: config.address.plz.clone(),
            telefon: config.contact.telephone.clone(),
            email: config.contact.mail.clone(),
        }
    }
}
