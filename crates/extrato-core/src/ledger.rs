//! Delimited current-account ledger transformation.
//!
//! Input rows come from the bank's CSV activity export: seven positional
//! columns (date, origin, description, balance date, document reference,
//! amount, plus an unused trailer). The transformer derives canonical dates
//! and partition keys, corrects posting dates from activity dates embedded
//! in the description, names weekdays, and optionally drops running-balance
//! rows.

use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;
use tracing::debug;

use crate::error::{ExtractionError, Result};
use crate::locale::Locale;
use crate::table::{ColumnData, Table};
use crate::text::{normalize_diacritics, Encoding};

/// Number of columns in the delimited export; the trailing one is discarded.
const INPUT_WIDTH: usize = 7;

lazy_static! {
    /// Embedded activity date in a description: `DD/MM` followed by
    /// whitespace and optionally a `HH:MM` time of day.
    static ref DAY_TIME: Regex = Regex::new(r"(\d{2}/\d{2})\s(\d{2}:\d{2})?").unwrap();

    /// Running-balance label. Statements render "saldo" with stray spaces
    /// inserted between the letters for visual alignment.
    static ref BALANCE_LINE: Regex = Regex::new(r"(?i)s\s*a\s*l\s*d\s*o").unwrap();
}

/// One current-account ledger row after transformation.
#[derive(Debug, Clone, Serialize)]
pub struct LedgerEntry {
    /// Canonical `YYYY-MM-DD` date. When the description embeds an activity
    /// date, that date wins over the posting date.
    pub date: String,
    pub origin: String,
    /// Lower-cased, unaccented description, ready for text search.
    pub description: String,
    /// Statement/balance date, kept as the export renders it.
    pub balance_date: String,
    /// Document reference. Kept textual even when it looks numeric.
    pub document: String,
    /// Raw locale-numeric amount string.
    pub amount: String,
    /// `YYYY-MM` partition key, always in agreement with `date`.
    pub year_month: String,
    pub month: u32,
    pub year: i32,
    /// `HH:MM` when the description carries one.
    pub time: Option<String>,
    /// Day of month from the embedded activity date; NaN when absent.
    pub day: f64,
    /// Weekday abbreviation in the source locale.
    pub weekday: &'static str,
}

/// Transform raw delimited rows into enriched, date-sorted ledger entries.
pub fn transform_entries(
    rows: &[Vec<String>],
    ignore_balance_rows: bool,
    locale: &Locale,
) -> Result<Vec<LedgerEntry>> {
    let mut entries = Vec::with_capacity(rows.len());

    for (row_idx, row) in rows.iter().enumerate() {
        if row.len() != INPUT_WIDTH {
            return Err(ExtractionError::MalformedRow {
                row: row_idx,
                expected: INPUT_WIDTH,
                found: row.len(),
            }
            .into());
        }

        let description = normalize_diacritics(&row[2].to_lowercase(), Encoding::Latin1)?;
        let (date, year, month) = canonical_date(&row[0], row_idx)?;

        entries.push(LedgerEntry {
            year_month: date[..7].to_string(),
            date,
            origin: row[1].clone(),
            description,
            balance_date: row[3].clone(),
            document: row[4].clone(),
            amount: row[5].clone(),
            month,
            year,
            time: None,
            day: f64::NAN,
            weekday: "",
        });
    }

    // Stable sort on the posting date; activity-date corrections below do
    // not re-order.
    entries.sort_by(|a, b| a.date.cmp(&b.date));

    for (idx, entry) in entries.iter_mut().enumerate() {
        if let Some(caps) = DAY_TIME.captures(&entry.description) {
            let day_month = caps[1].to_string();
            entry.time = caps.get(2).map(|m| m.as_str().to_string());
            entry.day = day_month[..2].parse().unwrap_or(f64::NAN);

            // The embedded activity date wins over the posting date; the
            // year is not printed and carries over from the posting date.
            let (day, month) = (&day_month[..2], &day_month[3..5]);
            entry.date = format!("{}-{}-{}", &entry.date[..4], month, day);
            entry.year_month = entry.date[..7].to_string();
            entry.month = month.parse().unwrap_or(entry.month);
        }

        let parsed = NaiveDate::parse_from_str(&entry.date, "%Y-%m-%d").map_err(|_| {
            ExtractionError::MalformedDate {
                token: entry.date.clone(),
                row: idx,
            }
        })?;
        entry.weekday = locale.weekday_name(parsed);
    }

    if ignore_balance_rows {
        let before = entries.len();
        entries.retain(|e| !BALANCE_LINE.is_match(&e.description));
        debug!("dropped {} balance rows of {}", before - entries.len(), before);
    }

    Ok(entries)
}

/// Transform raw delimited rows into the 12-column output table.
pub fn transform_ledger(
    rows: &[Vec<String>],
    ignore_balance_rows: bool,
    locale: &Locale,
) -> Result<Table> {
    let entries = transform_entries(rows, ignore_balance_rows, locale)?;
    Ok(entries_to_table(&entries))
}

/// Re-derive `YYYY-MM-DD` from a token ending in `DD/MM/YYYY`.
///
/// The layout is fixed width from the end of the token; anything shorter or
/// with shifted separators violates the statement structure and fails fast
/// instead of being skipped.
fn canonical_date(token: &str, row: usize) -> Result<(String, i32, u32)> {
    let malformed = || ExtractionError::MalformedDate {
        token: token.to_string(),
        row,
    };

    let trimmed = token.trim();
    let chars: Vec<char> = trimmed.chars().collect();
    if chars.len() < 10 {
        return Err(malformed().into());
    }
    let tail: String = chars[chars.len() - 10..].iter().collect();
    if !tail.is_ascii() {
        return Err(malformed().into());
    }

    let bytes = tail.as_bytes();
    if bytes[2] != b'/' || bytes[5] != b'/' {
        return Err(malformed().into());
    }
    let (day, month_s, year_s) = (&tail[..2], &tail[3..5], &tail[6..10]);
    if !day.bytes().all(|b| b.is_ascii_digit())
        || !month_s.bytes().all(|b| b.is_ascii_digit())
        || !year_s.bytes().all(|b| b.is_ascii_digit())
    {
        return Err(malformed().into());
    }

    let year: i32 = year_s.parse().map_err(|_| malformed())?;
    let month: u32 = month_s.parse().map_err(|_| malformed())?;
    if !(1..=12).contains(&month) {
        return Err(malformed().into());
    }

    Ok((format!("{year_s}-{month_s}-{day}"), year, month))
}

fn entries_to_table(entries: &[LedgerEntry]) -> Table {
    fn text<F: Fn(&LedgerEntry) -> String>(entries: &[LedgerEntry], get: F) -> ColumnData {
        ColumnData::Text(entries.iter().map(|e| Some(get(e))).collect())
    }

    let mut table = Table::new();
    table.push_column("Data", text(entries, |e| e.date.clone()));
    table.push_column("Origem", text(entries, |e| e.origin.clone()));
    table.push_column("Historico", text(entries, |e| e.description.clone()));
    table.push_column("DataBalancete", text(entries, |e| e.balance_date.clone()));
    table.push_column("Documento", text(entries, |e| e.document.clone()));
    table.push_column("Valor", text(entries, |e| e.amount.clone()));
    table.push_column("AnoMes", text(entries, |e| e.year_month.clone()));
    table.push_column(
        "Mes",
        ColumnData::Integer(entries.iter().map(|e| e.month as i64).collect()),
    );
    table.push_column(
        "Ano",
        ColumnData::Integer(entries.iter().map(|e| e.year as i64).collect()),
    );
    table.push_column(
        "Hora",
        ColumnData::Text(entries.iter().map(|e| e.time.clone()).collect()),
    );
    table.push_column(
        "Dia",
        ColumnData::Number(entries.iter().map(|e| e.day).collect()),
    );
    table.push_column("DiaSemana", text(entries, |e| e.weekday.to_string()));
    table
}
