//! Elster XML rendering in ISO-8859-15.

use std::io::{Cursor, Write};

use encoding_rs::ISO_8859_15;
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

use super::anmeldung::{Anmeldung, Datenlieferant, Unternehmer, Voranmeldung};
use crate::core::{Result, UstvaError};

/// Character encoding Elster expects.
pub const XML_ENCODING: &str = "ISO-8859-15";

fn xml_io(e: std::io::Error) -> UstvaError {
    UstvaError::Xml(format!("XML write error: {e}"))
}

struct XmlWriter {
    writer: Writer<Cursor<Vec<u8>>>,
}

impl XmlWriter {
    fn new() -> Result<Self> {
        let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 4);
        writer
            .write_event(Event::Decl(BytesDecl::new(
                "1.0",
                Some(XML_ENCODING),
                Some("no"),
            )))
            .map_err(xml_io)?;
        Ok(Self { writer })
    }

    fn start_element(&mut self, name: &str) -> Result<&mut Self> {
        self.start_element_with_attrs(name, &[])
    }

    fn start_element_with_attrs(
        &mut self,
        name: &str,
        attrs: &[(&str, &str)],
    ) -> Result<&mut Self> {
        let mut elem = BytesStart::new(name);
        for (k, v) in attrs {
            elem.push_attribute((*k, *v));
        }
        self.writer
            .write_event(Event::Start(elem))
            .map_err(xml_io)?;
        Ok(self)
    }

    fn end_element(&mut self, name: &str) -> Result<&mut Self> {
        self.writer
            .write_event(Event::End(BytesEnd::new(name)))
            .map_err(xml_io)?;
        Ok(self)
    }

    fn text_element(&mut self, name: &str, text: &str) -> Result<&mut Self> {
        self.start_element(name)?;
        self.writer
            .write_event(Event::Text(BytesText::new(text)))
            .map_err(xml_io)?;
        self.end_element(name)
    }

    /// Like [`Self::text_element`], but skipped for empty text.
    fn optional_element(&mut self, name: &str, text: &str) -> Result<&mut Self> {
        if text.is_empty() {
            return Ok(self);
        }
        self.text_element(name, text)
    }

    /// Finish the document and transcode it to ISO-8859-15.
    fn into_latin9(self) -> Result<Vec<u8>> {
        let mut buf = self.writer.into_inner().into_inner();
        buf.push(b'\n');
        let text = String::from_utf8(buf)
            .map_err(|e| UstvaError::Xml(format!("XML UTF-8 error: {e}")))?;
        encode_latin9(&text)
    }
}

/// Transcode UTF-8 text to ISO-8859-15, failing on unmappable characters.
pub fn encode_latin9(text: &str) -> Result<Vec<u8>> {
    let (bytes, _, had_errors) = ISO_8859_15.encode(text);
    if had_errors {
        let offending: String = text
            .chars()
            .filter(|c| {
                let mut tmp = [0u8; 4];
                ISO_8859_15.encode(c.encode_utf8(&mut tmp)).2
            })
            .collect();
        return Err(UstvaError::EncodingFailure(format!(
            "characters {offending:?} cannot be represented in {XML_ENCODING}"
        )));
    }
    Ok(bytes.into_owned())
}

/// Render the declaration as ISO-8859-15 encoded XML.
pub fn to_xml_bytes(anmeldung: &Anmeldung) -> Result<Vec<u8>> {
    let mut w = XmlWriter::new()?;
    let year = anmeldung.year.to_string();
    let namespace = anmeldung.namespace();

    w.start_element_with_attrs(
        "Anmeldungssteuern",
        &[("xmlns", namespace.as_str()), ("version", year.as_str())],
    )?;
    w.text_element(
        "Erstellungsdatum",
        &anmeldung.created.format("%Y%m%d").to_string(),
    )?;
    write_datenlieferant(&mut w, &anmeldung.datenlieferant)?;

    w.start_element("Steuerfall")?;
    write_unternehmer(&mut w, &anmeldung.unternehmer)?;
    write_voranmeldung(&mut w, &anmeldung.voranmeldung)?;
    w.end_element("Steuerfall")?;

    w.end_element("Anmeldungssteuern")?;
    w.into_latin9()
}

/// Render the declaration into `out`.
pub fn write_anmeldung(anmeldung: &Anmeldung, mut out: impl Write) -> Result<()> {
    let bytes = to_xml_bytes(anmeldung)?;
    out.write_all(&bytes)?;
    out.flush()?;
    Ok(())
}

fn write_datenlieferant(w: &mut XmlWriter, d: &Datenlieferant) -> Result<()> {
    w.start_element("DatenLieferant")?;
    w.text_element("Name", &d.name)?;
    w.text_element("Strasse", &d.strasse)?;
    w.text_element("PLZ", &d.plz)?;
    w.text_element("Ort", &d.ort)?;
    w.optional_element("Telefon", &d.telefon)?;
    w.optional_element("Email", &d.email)?;
    w.end_element("DatenLieferant")?;
    Ok(())
}

fn write_unternehmer(w: &mut XmlWriter, u: &Unternehmer) -> Result<()> {
    w.start_element("Unternehmer")?;
    w.optional_element("Bezeichnung", &u.bezeichnung)?;
    w.text_element("Name", &u.name)?;
    w.text_element("Vorname", &u.vorname)?;
    w.text_element("Str", &u.strasse)?;
    w.text_element("Hausnummer", &u.hausnummer)?;
    w.optional_element("HNrZusatz", &u.hnr_zusatz)?;
    w.text_element("Ort", &u.ort)?;
    w.text_element("PLZ", &u.plz)?;
    w.optional_element("Telefon", &u.telefon)?;
    w.optional_element("Email", &u.email)?;
    w.end_element("Unternehmer")?;
    Ok(())
}

fn write_voranmeldung(w: &mut XmlWriter, v: &Voranmeldung) -> Result<()> {
    w.start_element("Umsatzsteuervoranmeldung")?;
    w.text_element("Jahr", &v.jahr.to_string())?;
    w.text_element("Zeitraum", &v.zeitraum)?;
    w.text_element("Steuernummer", &v.steuernummer)?;
    for kz in &v.kennzahlen {
        w.text_element(&kz.element_name(), &kz.amount_string())?;
    }
    w.end_element("Umsatzsteuervoranmeldung")?;
    Ok(())
}
