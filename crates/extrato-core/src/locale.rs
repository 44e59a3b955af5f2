//! Source-locale conventions for numeric parsing and weekday naming.
//!
//! The bank renders numbers with `.` as thousands separator and `,` as
//! decimal separator, and abbreviates weekdays Seg through Dom. Both live in
//! an explicit [`Locale`] value threaded into the normalizers, not in
//! process-global state, so tests can hold several locales at once.

use chrono::{Datelike, NaiveDate};

/// Regex fragment capturing one monetary value as the bank prints it:
/// optional sign, dot-grouped digits, comma-separated cents.
pub const BRL_NUMBER: &str = r"(-?(?:\d{1,3}\.)?(?:\d{1,3})+(?:,\d{2}))";

/// Numeric and calendar conventions of the source documents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locale {
    /// Thousands separator of locale-numeric strings.
    pub thousands_sep: char,
    /// Decimal separator of locale-numeric strings.
    pub decimal_sep: char,
    /// Weekday abbreviations, Monday first.
    pub weekdays: [&'static str; 7],
}

impl Locale {
    /// Brazilian Portuguese conventions.
    pub fn pt_br() -> Self {
        Self {
            thousands_sep: '.',
            decimal_sep: ',',
            weekdays: ["Seg", "Ter", "Qua", "Qui", "Sex", "Sab", "Dom"],
        }
    }

    /// Parse a locale-numeric string (e.g. `1.334,56`, `-12,30`, `1200`).
    ///
    /// Thousands separators are dropped wherever they appear, the decimal
    /// separator becomes `.`, and the result is parsed as `f64`. Integer-
    /// looking strings parse too, always to a float. Returns `None` for
    /// anything that is not a number in this locale's rendering.
    pub fn parse_number(&self, s: &str) -> Option<f64> {
        let s = s.trim();
        if s.is_empty() {
            return None;
        }

        let mut delocalized = String::with_capacity(s.len());
        for (i, c) in s.chars().enumerate() {
            if c == '-' {
                if i != 0 {
                    return None;
                }
                delocalized.push('-');
            } else if c == self.thousands_sep {
                // dropped
            } else if c == self.decimal_sep {
                delocalized.push('.');
            } else if c.is_ascii_digit() {
                delocalized.push(c);
            } else {
                return None;
            }
        }

        delocalized.parse::<f64>().ok()
    }

    /// Weekday abbreviation for a date, via day-of-week index 0-6.
    pub fn weekday_name(&self, date: NaiveDate) -> &'static str {
        self.weekdays[date.weekday().num_days_from_monday() as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_grouped_decimals() {
        let locale = Locale::pt_br();
        assert_eq!(locale.parse_number("1.334,56"), Some(1334.56));
        assert_eq!(locale.parse_number("11.363,79"), Some(11363.79));
        assert_eq!(locale.parse_number("-1.375,25"), Some(-1375.25));
        assert_eq!(locale.parse_number("0,00"), Some(0.0));
    }

    #[test]
    fn integers_parse_to_floats() {
        let locale = Locale::pt_br();
        assert_eq!(locale.parse_number("1200"), Some(1200.0));
        assert_eq!(locale.parse_number("-7"), Some(-7.0));
    }

    #[test]
    fn rejects_non_numeric_text() {
        let locale = Locale::pt_br();
        assert_eq!(locale.parse_number("2016-05"), None);
        assert_eq!(locale.parse_number("31/12"), None);
        assert_eq!(locale.parse_number("14:30"), None);
        assert_eq!(locale.parse_number("saldo"), None);
        assert_eq!(locale.parse_number(""), None);
        assert_eq!(locale.parse_number("-"), None);
    }

    #[test]
    fn weekday_names_are_monday_first() {
        let locale = Locale::pt_br();
        let monday = NaiveDate::from_ymd_opt(2016, 5, 2).unwrap();
        let sunday = NaiveDate::from_ymd_opt(2016, 5, 8).unwrap();
        assert_eq!(locale.weekday_name(monday), "Seg");
        assert_eq!(locale.weekday_name(sunday), "Dom");
    }
}
