//! Serde model of JES `data.xml` and its conversion into a [`Ledger`].
//!
//! All leaf values are read as text and parsed explicitly, because the
//! export writes empty elements for unset numbers.

use chrono::NaiveDate;
use serde::Deserialize;

use crate::core::{Result, UstvaError};
use crate::ledger::{
    Account, AccountGroup, AccountKind, Amount, Ledger, Payment, Receipt, Rounding, TaxHandling,
};

#[derive(Debug, Default, Deserialize)]
struct XmlEur {
    #[serde(default)]
    general: XmlGeneral,
    #[serde(default)]
    receipts: XmlReceipts,
    #[serde(default, rename = "accounts")]
    account_groups: Vec<XmlAccountGroup>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct XmlGeneral {
    name: String,
    address: String,
    company: String,
    taxid: String,
    businessyearrange: XmlBusinessYear,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct XmlBusinessYear {
    daterange: XmlDateRange,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct XmlDateRange {
    start: XmlDateHolder,
    end: XmlDateHolder,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct XmlDateHolder {
    date: XmlDate,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct XmlDate {
    #[serde(rename = "@year")]
    year: String,
    #[serde(rename = "@month")]
    month: String,
    #[serde(rename = "@day")]
    day: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct XmlReceipts {
    #[serde(rename = "receipt")]
    receipts: Vec<XmlReceipt>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct XmlReceipt {
    #[serde(rename = "@paid")]
    paid: String,
    number: String,
    date: XmlDate,
    #[serde(rename = "payment")]
    payments: Vec<XmlPayment>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct XmlPayment {
    taxaccountincoming: String,
    taxaccountoutgoing: String,
    account: String,
    amount: XmlAmount,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct XmlAmount {
    #[serde(rename = "@tax")]
    tax: String,
    #[serde(rename = "$text")]
    value: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct XmlAccountGroup {
    #[serde(rename = "@type")]
    kind: String,
    #[serde(rename = "account")]
    accounts: Vec<XmlAccount>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct XmlAccount {
    #[serde(rename = "@type")]
    kind: String,
    #[serde(rename = "@taxaccount")]
    taxaccount: String,
    #[serde(rename = "@rounding")]
    rounding: String,
    number: String,
    percent: String,
}

/// Parse the content of a JES `data.xml`.
pub fn from_xml_str(xml: &str) -> Result<Ledger> {
    let eur: XmlEur = quick_xml::de::from_str(xml)
        .map_err(|e| UstvaError::Ledger(format!("decoding data.xml: {e}")))?;
    eur.into_ledger()
}

impl XmlEur {
    fn into_ledger(self) -> Result<Ledger> {
        let range = self.general.businessyearrange.daterange;
        let start = range.start.date.to_date("business year start")?;
        let end = range.end.date.to_date("business year end")?;

        let receipts = self
            .receipts
            .receipts
            .into_iter()
            .map(XmlReceipt::into_receipt)
            .collect::<Result<Vec<_>>>()?;

        let account_groups = self
            .account_groups
            .into_iter()
            .map(XmlAccountGroup::into_group)
            .collect::<Result<Vec<_>>>()?;

        Ok(Ledger {
            name: self.general.name.trim().to_string(),
            address: self.general.address.trim().to_string(),
            company: self.general.company.trim().to_string(),
            tax_id: self.general.taxid.trim().to_string(),
            start,
            end,
            receipts,
            account_groups,
        })
    }
}

impl XmlDate {
    fn to_date(&self, what: &str) -> Result<NaiveDate> {
        let year = parse_number(&self.year, what)?;
        let month = parse_number(&self.month, what)?;
        let day = parse_number(&self.day, what)?;
        i32::try_from(year)
            .ok()
            .and_then(|y| NaiveDate::from_ymd_opt(y, month, day))
            .ok_or_else(|| {
                UstvaError::Ledger(format!("{what}: invalid date {year}-{month}-{day}"))
            })
    }
}

impl XmlReceipt {
    fn into_receipt(self) -> Result<Receipt> {
        let number = parse_number(&self.number, "receipt number")?;
        let date = self.date.to_date(&format!("receipt {number}"))?;
        let payments = self
            .payments
            .into_iter()
            .map(|p| p.into_payment(number))
            .collect::<Result<Vec<_>>>()?;

        Ok(Receipt {
            number,
            date,
            paid: parse_bool(&self.paid),
            payments,
        })
    }
}

impl XmlPayment {
    fn into_payment(self, receipt: u32) -> Result<Payment> {
        let what = format!("payment of receipt {receipt}");
        Ok(Payment {
            incoming: parse_account_ref(&self.taxaccountincoming, &what)?,
            outgoing: parse_account_ref(&self.taxaccountoutgoing, &what)?,
            account: parse_number(&self.account, &what)?,
            amount: Amount::new(
                self.amount.value.trim(),
                TaxHandling::from_code(&self.amount.tax),
            ),
        })
    }
}

impl XmlAccountGroup {
    fn into_group(self) -> Result<AccountGroup> {
        let accounts = self
            .accounts
            .into_iter()
            .map(XmlAccount::into_account)
            .collect::<Result<Vec<_>>>()?;
        Ok(AccountGroup {
            kind: AccountKind::from_code(&self.kind),
            accounts,
        })
    }
}

impl XmlAccount {
    fn into_account(self) -> Result<Account> {
        let number = parse_number(&self.number, "account number")?;
        let percent = parse_number(&self.percent, &format!("percent of account {number}"))?;
        if percent > 100 {
            return Err(UstvaError::Ledger(format!(
                "account {number}: tax rate {percent}% is out of range"
            )));
        }

        Ok(Account {
            number,
            kind: self.kind,
            tax_account: parse_bool(&self.taxaccount),
            rounding: Rounding::from_code(&self.rounding),
            percent,
        })
    }
}

/// Empty text counts as zero.
fn parse_number(text: &str, what: &str) -> Result<u32> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(0);
    }
    text.parse()
        .map_err(|e| UstvaError::Ledger(format!("{what}: cannot parse '{text}' as number: {e}")))
}

/// Tax account reference; `0` and empty mean "not given".
fn parse_account_ref(text: &str, what: &str) -> Result<Option<u32>> {
    let number = parse_number(text, what)?;
    Ok((number != 0).then_some(number))
}

fn parse_bool(text: &str) -> bool {
    matches!(
        text.trim().to_ascii_lowercase().as_str(),
        "true" | "t" | "1"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const DATA: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<eur version="3">
  <general>
    <name>Max Mustermann</name>
    <address>Hauptstraße 1, 10115 Berlin</address>
    <company>Muster IT</company>
    <taxid>12/345/67890</taxid>
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
      <date year="2024" month="3" day="5"/>
      <description>Beratung</description>
      <payment>
        <taxaccountincoming>500</taxaccountincoming>
        <taxaccountoutgoing></taxaccountoutgoing>
        <account>8400</account>
        <amount tax="incl">119.00</amount>
      </payment>
      <note>ignored</note>
      <payment>
        <taxaccountincoming>0</taxaccountincoming>
        <taxaccountoutgoing>100</taxaccountoutgoing>
        <account>4930</account>
        <amount tax="excl">10.5</amount>
      </payment>
    </receipt>
    <receipt paid="false">
      <number>2</number>
      <date year="2024" month="4" day="1"/>
    </receipt>
  </receipts>
  <accounts type="tax">
    <account type="ust" rounding="down"><number>500</number><percent>19</percent></account>
    <account type="vst"><number>100</number><percent>19</percent></account>
  </accounts>
  <accounts type="booking">
    <account type="income" taxaccount="true"><number>1776</number><percent></percent></account>
  </accounts>
</eur>
"#;

    #[test]
    fn parses_general_data() {
        let l = from_xml_str(DATA).unwrap();
        assert_eq!(l.name, "Max Mustermann");
        assert_eq!(l.company, "Muster IT");
        assert_eq!(l.tax_id, "12/345/67890");
        assert_eq!(l.start, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(l.end, NaiveDate::from_ymd_opt(2024, 12, 31).unwrap());
        assert_eq!(l.year(), 2024);
    }

    #[test]
    fn parses_receipts_and_payments() {
        let l = from_xml_str(DATA).unwrap();
        assert_eq!(l.receipts.len(), 2);

        let r = &l.receipts[0];
        assert!(r.paid);
        assert_eq!(r.date, NaiveDate::from_ymd_opt(2024, 3, 5).unwrap());
        assert_eq!(r.payments.len(), 2);

        let p = &r.payments[0];
        assert_eq!(p.incoming, Some(500));
        assert_eq!(p.outgoing, None);
        assert_eq!(p.account, 8400);
        assert_eq!(p.amount.tax, TaxHandling::Inclusive);
        assert_eq!(p.amount.raw(), "119.00");

        let p = &r.payments[1];
        assert_eq!(p.incoming, None);
        assert_eq!(p.outgoing, Some(100));
        assert_eq!(p.amount.tax, TaxHandling::Exclusive);

        assert!(!l.receipts[1].paid);
        assert!(l.receipts[1].payments.is_empty());
    }

    #[test]
    fn parses_account_groups() {
        let l = from_xml_str(DATA).unwrap();
        assert_eq!(l.account_groups.len(), 2);

        let tax = &l.account_groups[0];
        assert_eq!(tax.kind, AccountKind::Tax);
        assert_eq!(tax.accounts[0].number, 500);
        assert_eq!(tax.accounts[0].percent, 19);
        assert_eq!(tax.accounts[0].rounding, Rounding::Down);
        assert_eq!(tax.accounts[1].rounding, Rounding::Standard);

        let booking = &l.account_groups[1];
        assert_eq!(booking.kind, AccountKind::Booking);
        assert!(booking.accounts[0].tax_account);
        assert_eq!(booking.accounts[0].percent, 0);
    }

    #[test]
    fn rejects_bad_numbers() {
        let xml = DATA.replace("<account>8400</account>", "<account>84OO</account>");
        assert!(matches!(from_xml_str(&xml), Err(UstvaError::Ledger(_))));

        let xml = DATA.replace(
            "<number>100</number><percent>19</percent>",
            "<number>100</number><percent>119</percent>",
        );
        assert!(from_xml_str(&xml).is_err());
    }

    #[test]
    fn rejects_invalid_dates() {
        let xml = DATA.replace(r#"month="3" day="5""#, r#"month="2" day="30""#);
        assert!(matches!(from_xml_str(&xml), Err(UstvaError::Ledger(_))));
    }

    #[test]
    fn rejects_non_xml() {
        assert!(from_xml_str("this is not xml").is_err());
    }

    #[test]
    fn bools() {
        assert!(parse_bool("true"));
        assert!(parse_bool(" TRUE "));
        assert!(parse_bool("1"));
        assert!(!parse_bool("false"));
        assert!(!parse_bool(""));
    }
}
