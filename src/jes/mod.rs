//! Reader for JES bookkeeping exports.
//!
//! A `.jes` file is a ZIP archive holding a single `data.xml` with the
//! general business data, all receipts and the chart of accounts.
//!
//! ```ignore
//! let ledger = ustva::jes::read_jes_file("2024.jes")?;
//! println!("{} receipts", ledger.receipts.len());
//! ```

mod xml;

pub use xml::from_xml_str;

use encoding_rs::{Encoding, UTF_8};

use crate::core::{Result, UstvaError};
use crate::ledger::Ledger;

/// Name of the ledger document inside a JES archive.
pub const DATA_XML: &str = "data.xml";

/// Parse raw `data.xml` bytes, honouring the encoding named in the XML
/// declaration. Documents without a declaration are read as UTF-8.
pub fn from_xml_bytes(bytes: &[u8]) -> Result<Ledger> {
    let encoding = declared_encoding(bytes).unwrap_or(UTF_8);
    let (text, _, had_errors) = encoding.decode(bytes);
    if had_errors {
        return Err(UstvaError::Ledger(format!(
            "data.xml is not valid {}",
            encoding.name()
        )));
    }
    from_xml_str(&text)
}

/// Open a `.jes` archive and parse its `data.xml`.
#[cfg(feature = "jes")]
pub fn read_jes_file(path: impl AsRef<std::path::Path>) -> Result<Ledger> {
    use std::io::Read;

    let path = path.as_ref();
    let file = std::fs::File::open(path)?;
    let mut archive = zip::ZipArchive::new(file)
        .map_err(|e| UstvaError::Archive(format!("{}: {e}", path.display())))?;

    let mut entry = archive.by_name(DATA_XML).map_err(|_| {
        UstvaError::Archive(format!("could not find {DATA_XML} in JES file"))
    })?;
    let mut bytes = Vec::new();
    entry.read_to_end(&mut bytes)?;

    tracing::debug!(path = %path.display(), size = bytes.len(), "read {DATA_XML}");
    from_xml_bytes(&bytes)
}

/// Encoding label from `<?xml ... encoding="..."?>`, if recognised.
fn declared_encoding(bytes: &[u8]) -> Option<&'static Encoding> {
    let head = String::from_utf8_lossy(&bytes[..bytes.len().min(256)]);
    let decl = head.strip_prefix('\u{feff}').unwrap_or(&*head);
    let decl = decl.trim_start().strip_prefix("<?xml")?;
    let decl = &decl[..decl.find("?>")?];
    let rest = &decl[decl.find("encoding")? + "encoding".len()..];
    let rest = rest.trim_start().strip_prefix('=')?.trim_start();
    let quote = rest.chars().next().filter(|c| *c == '"' || *c == '\'')?;
    let rest = &rest[1..];
    let label = &rest[..rest.find(quote)?];
    Encoding::for_label(label.trim().as_bytes())
}
