//! Extraction engine for Banco do Brasil statement exports.
//!
//! Three independent pipelines turn semi-structured statement text into
//! normalized tables:
//! - [`ledger`]: delimited current-account activity records
//! - [`fund`]: free-form investment-fund statement dumps
//! - [`pension`]: multi-section pension statement dumps
//!
//! They share two normalization primitives: [`text::normalize_diacritics`]
//! strips accents ahead of pattern matching, and
//! [`table::Table::normalize_currency`] coerces locale-numeric columns to
//! floating point with an all-or-nothing rule per column. Locale
//! conventions (separators, weekday names) travel in an explicit
//! [`locale::Locale`] value.
//!
//! The engine works on already-decoded text and already-parsed rows; file
//! discovery and decoding belong to the caller.

pub mod error;
pub mod fund;
pub mod ledger;
pub mod locale;
pub mod pension;
pub mod table;
pub mod text;

pub use error::{EncodingError, ExtractionError, ExtratoError, Result};
pub use fund::{segment_statements, FundStatement, RenameMap};
pub use ledger::{transform_entries, transform_ledger, LedgerEntry};
pub use locale::Locale;
pub use pension::{parse_statement, FundPosition, PensionStatement};
pub use table::{CoercionOutcome, Column, ColumnData, Table};
pub use text::{normalize_diacritics, Encoding};
