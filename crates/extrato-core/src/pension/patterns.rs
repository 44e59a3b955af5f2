//! Compiled patterns for pension-statement extraction.
//!
//! Every section line pairs a label phrase with a sub-fund qualifier and
//! prints two numbers: a unit count and a monetary value. Patterns run
//! against upper-cased, unaccented text.

use lazy_static::lazy_static;
use regex::Regex;

use crate::locale::BRL_NUMBER;

/// Sub-fund qualifiers as printed in the movement-history section.
pub const FIXED_FUND: &str = "RT FIX V FIC";
pub const COMPOSITE_FUND: &str = "RT COMPOSTO RV 20 V FIC";

fn pair(label: &str, fund: &str) -> Regex {
    Regex::new(&format!(r"{}\s+{}\s+{}\s+{}", label, fund, BRL_NUMBER, BRL_NUMBER)).unwrap()
}

lazy_static! {
    pub static ref OPENING_FIXED: Regex = pair("SALDO ANTERIOR DA PROVISAO", FIXED_FUND);
    pub static ref OPENING_COMPOSITE: Regex = pair("SALDO ANTERIOR DA PROVISAO", COMPOSITE_FUND);
    pub static ref PERIODIC_FIXED: Regex =
        pair("CONTRIBUICAO PERIODICA BRUTA APOSENTADORIA", FIXED_FUND);
    pub static ref PERIODIC_COMPOSITE: Regex =
        pair("CONTRIBUICAO PERIODICA BRUTA APOSENTADORIA", COMPOSITE_FUND);
    pub static ref EXTRAORDINARY_FIXED: Regex = pair("CONTRIBUICAO ESPORADICA BRUTA", FIXED_FUND);
    pub static ref EXTRAORDINARY_COMPOSITE: Regex =
        pair("CONTRIBUICAO ESPORADICA BRUTA", COMPOSITE_FUND);
    pub static ref CLOSING_FIXED: Regex = pair("SALDO ATUAL DA PROVISAO", FIXED_FUND);
    pub static ref CLOSING_COMPOSITE: Regex = pair("SALDO ATUAL DA PROVISAO", COMPOSITE_FUND);

    pub static ref ACCUMULATED_YIELD: Regex =
        Regex::new(&format!(r"RENDIMENTO ACUMULADO NO PER[A-Z]+:\s+{}", BRL_NUMBER)).unwrap();

    /// Spans the whole per-fund yield section; `(?s)` lets `.` cross line
    /// boundaries so one match binds both sub-fund values. Assumes the
    /// fixed fund is always listed before the composite fund; a reversed
    /// listing would silently swap the two captures.
    pub static ref FUND_YIELD: Regex = Regex::new(&format!(
        r"(?s)RENDIMENTO POR FUNDO.*{}\s+\d{{2}}\s+{}.*{}\s+\d{{2}}\s+{}",
        FIXED_FUND, BRL_NUMBER, COMPOSITE_FUND, BRL_NUMBER
    ))
    .unwrap();

    /// Reporting period embedded in the source file name.
    pub static ref PERIOD_IN_NAME: Regex = Regex::new(r"(\d{4}-\d{2})").unwrap();
}
