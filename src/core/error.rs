use chrono::NaiveDate;
use thiserror::Error;

/// Errors that can occur while building a VAT pre-declaration.
///
/// Every variant is fatal for the current run: a declaration is either
/// produced completely or not at all.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum UstvaError {
    /// A payment amount could not be read as a decimal number.
    #[error("malformed amount '{value}': {reason}")]
    MalformedAmount {
        /// The raw amount text.
        value: String,
        /// Why parsing failed.
        reason: String,
    },

    /// Adding up amounts exceeded the representable range.
    #[error("amount overflow: {0}")]
    AmountOverflow(String),

    /// Aggregation referenced an account missing from the ledger's tax accounts.
    #[error("no info found for account {0}")]
    UnknownAccount(u32),

    /// A payment references a tax account the mapping table does not cover.
    #[error("unsupported tax account '{0}'")]
    UnsupportedTaxAccount(u32),

    /// The ledger's business year crosses a calendar year boundary.
    #[error("ledger spans multiple years ({start} to {end}), this is not supported")]
    MultiYearSpan {
        /// First day of the business year.
        start: NaiveDate,
        /// Last day of the business year.
        end: NaiveDate,
    },

    /// Malformed or out-of-range reporting period.
    #[error("invalid period: {0}")]
    InvalidPeriod(String),

    /// Rendered text contains a character outside ISO-8859-15.
    #[error("encoding error: {0}")]
    EncodingFailure(String),

    /// The ledger data is structurally invalid.
    #[error("ledger error: {0}")]
    Ledger(String),

    /// The JES archive could not be opened or lacks `data.xml`.
    #[error("archive error: {0}")]
    Archive(String),

    /// The operator configuration could not be read.
    #[error("config error: {0}")]
    Config(String),

    /// XML generation error.
    #[error("XML error: {0}")]
    Xml(String),

    /// Underlying I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, UstvaError>;
