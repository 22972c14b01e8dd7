//! Operator configuration.
//!
//! Most of the data Elster requires about the business is not part of a
//! JES export and is read from a small JSON file:
//!
//! ```json
//! {
//!     "ustnr": "2181508150",
//!     "name": "Mustermann",
//!     "firstname": "Max",
//!     "address": {
//!         "street": "Hauptstraße",
//!         "number": "1",
//!         "numbersuffix": "a",
//!         "plz": "10115",
//!         "city": "Berlin"
//!     },
//!     "contact": { "telephone": "030 123456", "mail": "max@example.org" }
//! }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::{Result, UstvaError};

/// Operator configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Tax registration number (Steuernummer) in Elster format.
    #[serde(alias = "UStNr")]
    pub ustnr: String,
    /// Last name, overrides the ledger name.
    #[serde(default, alias = "Name")]
    pub name: String,
    /// First name, overrides the ledger name.
    #[serde(default, alias = "FirstName")]
    pub firstname: String,
    /// Postal address.
    #[serde(default, alias = "Address")]
    pub address: ConfigAddress,
    /// Contact details.
    #[serde(default, alias = "Contact")]
    pub contact: ConfigContact,
}

/// Postal address of the business.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigAddress {
    /// Street name.
    #[serde(alias = "Street")]
    pub street: String,
    /// House number.
    #[serde(alias = "Number")]
    pub number: String,
    /// House number suffix, e.g. "a".
    #[serde(alias = "NumberSuffix")]
    pub numbersuffix: String,
    /// Postal code.
    #[serde(alias = "Plz")]
    pub plz: String,
    /// City.
    #[serde(alias = "City")]
    pub city: String,
}

/// Optional contact details.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigContact {
    /// Telephone number.
    #[serde(alias = "Telephone")]
    pub telephone: String,
    /// Email address.
    #[serde(alias = "Mail")]
    pub mail: String,
}

impl Config {
    /// Parse a JSON configuration.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| UstvaError::Config(e.to_string()))?;
        if config.ustnr.trim().is_empty() {
            return Err(UstvaError::Config("'ustnr' must not be empty".into()));
        }
        Ok(config)
    }

    /// Read a JSON configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| UstvaError::Config(format!("reading '{}': {e}", path.display())))?;
        Self::from_json(&json)
    }

    /// Street line as used by the data supplier block, e.g. "Hauptstraße 1a".
    pub fn street_line(&self) -> String {
        let a = &self.address;
        format!("{} {}{}", a.street, a.number, a.numbersuffix)
    }
}
