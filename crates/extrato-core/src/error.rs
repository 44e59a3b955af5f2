//! Error types for the extrato-core library.

use thiserror::Error;

use crate::text::Encoding;

/// Main error type for the extrato library.
#[derive(Error, Debug)]
pub enum ExtratoError {
    /// Text normalizer was asked for an encoding it does not implement.
    #[error("encoding error: {0}")]
    Encoding(#[from] EncodingError),

    /// Statement extraction error.
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),
}

/// Errors raised by the text normalizer.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum EncodingError {
    /// Only Latin-1 is implemented; anything else is refused outright.
    #[error("unsupported encoding {0:?}: only Latin-1 is implemented")]
    Unsupported(Encoding),
}

/// Errors raised while extracting statement records.
///
/// These are structural failures: the document does not match a layout the
/// patterns understand, and continuing would corrupt downstream aggregates.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ExtractionError {
    /// A mandatory field pattern did not match inside a record span.
    #[error("missing mandatory field {field} in {context}")]
    MissingField {
        field: &'static str,
        context: String,
    },

    /// A date token does not end in the expected DD/MM/YYYY layout, or an
    /// embedded activity date produced an impossible calendar date.
    #[error("malformed date token {token:?} in row {row}")]
    MalformedDate { token: String, row: usize },

    /// A delimited row does not carry the expected number of columns.
    #[error("row {row} has {found} columns, expected {expected}")]
    MalformedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// The source name of a pension statement carries no YYYY-MM period.
    #[error("no period (YYYY-MM) in source name {source_name:?}")]
    MissingPeriod { source_name: String },
}

/// Result type for the extrato library.
pub type Result<T> = std::result::Result<T, ExtratoError>;
