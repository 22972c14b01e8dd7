//! # ustva
//!
//! German VAT pre-declaration (Umsatzsteuervoranmeldung, UStVA) generator
//! for JES bookkeeping exports. Reads the ledger from a `.jes` archive, sums
//! the paid receipts of a reporting period per tax account and writes the
//! Elster XML document in ISO-8859-15.
//!
//! All amounts are integer cents ([`Cents`]). Tax splits are rounded half
//! away from zero on exact decimals, never floating point.
//!
//! ## Quick Start
//!
//! ```rust
//! use chrono::NaiveDate;
//! use ustva::{Config, Period, elster, jes};
//!
//! // every account referenced by the UStVA mapping must be charted
//! let accounts: String = [500, 510, 520, 100, 110, 600, 200, 610]
//!     .iter()
//!     .map(|n| format!("<account><number>{n}</number><percent>19</percent></account>"))
//!     .collect();
//!
//! let data = r#"<eur>
//!   <general>
//!     <name>Erika Mustermann</name>
//!     <businessyearrange><daterange>
//!       <start><date year="2024" month="1" day="1"/></start>
//!       <end><date year="2024" month="12" day="31"/></end>
//!     </daterange></businessyearrange>
//!   </general>
//!   <receipts>
//!     <receipt paid="true">
//!       <number>1</number>
//!       <date year="2024" month="3" day="12"/>
//!       <payment>
//!         <taxaccountincoming>500</taxaccountincoming>
//!         <account>8400</account>
//!         <amount tax="incl">119.00</amount>
//!       </payment>
//!     </receipt>
//!   </receipts>
//!   <accounts type="tax">ACCOUNTS</accounts>
//! </eur>"#
//!     .replace("ACCOUNTS", &accounts);
//!
//! let ledger = jes::from_xml_str(&data).unwrap();
//! let config = Config::from_json(r#"{"ustnr": "2181508150"}"#).unwrap();
//! let period: Period = "03".parse().unwrap();
//! let created = NaiveDate::from_ymd_opt(2024, 4, 2).unwrap();
//!
//! let anmeldung = elster::build_declaration(&config, &ledger, period, created).unwrap();
//! let kz81 = anmeldung.voranmeldung.kennzahlen.get(81).unwrap();
//! assert_eq!(kz81.amount_string(), "100.00");
//!
//! let bytes = elster::to_xml_bytes(&anmeldung).unwrap();
//! assert!(bytes.starts_with(b"<?xml version=\"1.0\" encoding=\"ISO-8859-15\""));
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `jes` (default) | Read `.jes` ZIP archives from disk |
//! | `cli` (default) | The `ustva` command-line tool |

pub mod config;
pub mod core;
pub mod elster;
pub mod jes;
pub mod ledger;

// Re-export the common types at crate root for convenience
pub use crate::core::*;
pub use config::Config;
pub use ledger::{Aggregator, Ledger};
