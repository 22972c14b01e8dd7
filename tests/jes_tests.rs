//! Reading JES archives from disk.
//!
//! Run with: `cargo test --test jes_tests`

#![cfg(feature = "jes")]

use std::io::Write;
use std::path::PathBuf;

use chrono::NaiveDate;
use ustva::elster::{self, MAPPINGS, known_accounts};
use ustva::ledger::{AccountKind, TaxHandling};
use ustva::{Cents, Config, UstvaError, jes};
use zip::write::SimpleFileOptions;

fn data_xml() -> String {
    let accounts: String = known_accounts(MAPPINGS)
        .iter()
        .map(|n| {
            let rounding = if *n == 500 { r#" rounding="down""# } else { "" };
            format!(
                r#"<account type="ust"{rounding}><number>{n}</number><percent>19</percent></account>"#
            )
        })
        .collect();

    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<eur version="3">
  <general>
    <name>Jürgen Weiß</name>
    <company>Weiß Software</company>
    <businessyearrange>
      <daterange>
        <start><date year="2024" month="1" day="1"/></start>
        <end><date year="2024" month="12" day="31"/></end>
      </daterange>
    </businessyearrange>
  </general>
  <receipts>
    <receipt paid="true">
      <number>1</number>
      <date year="2024" month="2" day="14"/>
      <payment>
        <taxaccountincoming>500</taxaccountincoming>
        <taxaccountoutgoing>0</taxaccountoutgoing>
        <account>8400</account>
        <amount tax="incl">238.00</amount>
      </payment>
    </receipt>
    <receipt paid="true">
      <number>2</number>
      <date year="2024" month="2" day="20"/>
      <payment>
        <taxaccountincoming>0</taxaccountincoming>
        <taxaccountoutgoing>100</taxaccountoutgoing>
        <account>4930</account>
        <amount tax="excl">50.00</amount>
      </payment>
    </receipt>
  </receipts>
  <accounts type="tax">{accounts}</accounts>
  <accounts type="booking">
    <account type="income"><number>8400</number><percent>19</percent></account>
  </accounts>
</eur>
"#
    )
}

/// Write a JES archive with the given entries to a fresh temp file.
fn write_archive(name: &str, entries: &[(&str, &[u8])]) -> PathBuf {
    let path = std::env::temp_dir().join(format!("ustva-{}-{name}.jes", std::process::id()));
    let file = std::fs::File::create(&path).unwrap();
    let mut zip = zip::ZipWriter::new(file);
    for (entry, content) in entries {
        zip.start_file(*entry, SimpleFileOptions::default()).unwrap();
        zip.write_all(content).unwrap();
    }
    zip.finish().unwrap();
    path
}

#[test]
fn reads_data_xml_from_archive() {
    let xml = data_xml();
    let path = write_archive(
        "read",
        &[("meta.txt", &b"JES 3"[..]), ("data.xml", xml.as_bytes())],
    );

    let ledger = jes::read_jes_file(&path).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(ledger.name, "Jürgen Weiß");
    assert_eq!(ledger.company, "Weiß Software");
    assert_eq!(ledger.year(), 2024);
    assert_eq!(ledger.receipts.len(), 2);
    assert_eq!(ledger.receipts[0].payments[0].amount.tax, TaxHandling::Inclusive);
    assert_eq!(ledger.receipts[1].payments[0].outgoing, Some(100));
    assert_eq!(ledger.account_groups[0].kind, AccountKind::Tax);
    assert_eq!(ledger.account_groups[1].kind, AccountKind::Booking);
}

#[test]
fn archive_to_declaration() {
    let xml = data_xml();
    let path = write_archive("declare", &[("data.xml", xml.as_bytes())]);
    let ledger = jes::read_jes_file(&path).unwrap();
    std::fs::remove_file(&path).ok();

    let config = Config::from_json(r#"{"ustnr": "2181508150"}"#).unwrap();
    let created = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
    let anmeldung =
        elster::build_declaration(&config, &ledger, "2".parse().unwrap(), created).unwrap();
    let kz = &anmeldung.voranmeldung.kennzahlen;

    // 238.00 incl. 19 % -> 200.00 net on a round-down account
    assert_eq!(kz.get(81).unwrap().amount, Cents(20000));
    assert_eq!(kz.get(81).unwrap().amount_string(), "200");
    // 50.00 excl. 19 % -> 9.50 input tax
    assert_eq!(kz.get(66).unwrap().amount_string(), "9.50");

    assert_eq!(anmeldung.unternehmer.vorname, "Jürgen");
    assert_eq!(anmeldung.unternehmer.name, "Weiß");
    assert_eq!(anmeldung.unternehmer.bezeichnung, "Weiß Software");
}

#[test]
fn latin9_data_xml() {
    let xml = data_xml().replace("UTF-8", "ISO-8859-15");
    let (bytes, _, had_errors) = encoding_rs::ISO_8859_15.encode(&xml);
    assert!(!had_errors);
    let path = write_archive("latin9", &[("data.xml", &*bytes)]);

    let ledger = jes::read_jes_file(&path).unwrap();
    std::fs::remove_file(&path).ok();
    assert_eq!(ledger.name, "Jürgen Weiß");
}

#[test]
fn missing_data_xml() {
    let path = write_archive("missing", &[("other.xml", &b"<eur/>"[..])]);
    let err = jes::read_jes_file(&path).unwrap_err();
    std::fs::remove_file(&path).ok();

    assert!(matches!(err, UstvaError::Archive(_)));
    assert!(err.to_string().contains("could not find data.xml"));
}

#[test]
fn not_a_zip_archive() {
    let path = std::env::temp_dir().join(format!("ustva-{}-plain.jes", std::process::id()));
    std::fs::write(&path, b"<eur/>").unwrap();
    let err = jes::read_jes_file(&path).unwrap_err();
    std::fs::remove_file(&path).ok();

    assert!(matches!(err, UstvaError::Archive(_)));
}

#[test]
fn missing_file_is_io_error() {
    let err = jes::read_jes_file("/nonexistent/ustva/2024.jes").unwrap_err();
    assert!(matches!(err, UstvaError::Io(_)));
}
