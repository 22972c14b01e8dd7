//! Elster UStVA (Umsatzsteuervoranmeldung) generation.
//!
//! Maps JES tax accounts onto the numbered fields (Kennzahlen) of the
//! German VAT pre-declaration and renders the Elster XML document.
//!
//! # Example
//!
//! ```ignore
//! use ustva::{Config, Period, elster, jes};
//!
//! let config = Config::from_file("ustva.json")?;
//! let ledger = jes::read_jes_file("2024.jes")?;
//! let period: Period = "Q2".parse()?;
//! let today = chrono::Local::now().date_naive();
//!
//! elster::write_declaration(&config, &ledger, period, today, std::io::stdout())?;
//! ```

mod anmeldung;
mod kennzahlen;
mod mapping;
mod xml;

pub use anmeldung::{
    Anmeldung, Datenlieferant, USTVA_NAMESPACE_PREFIX, Unternehmer, Voranmeldung,
};
pub use kennzahlen::{Kennzahl, Kennzahlen};
pub use mapping::{MAPPINGS, Mapping, known_accounts};
pub use xml::{XML_ENCODING, encode_latin9, to_xml_bytes, write_anmeldung};

use std::io::Write;

use chrono::NaiveDate;

use crate::config::Config;
use crate::core::{Period, Result};
use crate::ledger::Ledger;

/// Validate the ledger and compute the declaration for `period`.
pub fn build_declaration(
    config: &Config,
    ledger: &Ledger,
    period: Period,
    created: NaiveDate,
) -> Result<Anmeldung> {
    Anmeldung::build(config, ledger, period, created)
}

/// Compute the declaration and write it as ISO-8859-15 XML to `out`.
pub fn write_declaration(
    config: &Config,
    ledger: &Ledger,
    period: Period,
    created: NaiveDate,
    out: impl Write,
) -> Result<()> {
    let anmeldung = build_declaration(config, ledger, period, created)?;
    write_anmeldung(&anmeldung, out)
}
