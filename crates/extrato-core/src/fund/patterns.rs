//! Compiled patterns for fund-statement segmentation.
//!
//! All patterns run against text that has already been upper-cased and
//! unaccented, so the label phrases are plain ASCII.

use lazy_static::lazy_static;
use regex::Regex;

use crate::locale::BRL_NUMBER;

lazy_static! {
    /// Record title: institution marker, free-form fund name, optional
    /// tax-id (CNPJ) annotation. Every occurrence starts a record span.
    pub static ref TITLE: Regex =
        Regex::new(r"BB (.*?)\s+(?:- CNPJ:)?\s+(?:\d{2}\.\d{3}\.\d{3}/\d{4}-\d{2})").unwrap();

    /// Reporting period, anchored on the date preceding the current-balance
    /// phrase.
    pub static ref PERIOD: Regex = Regex::new(r"\d{2}/(\d{2})/(\d{4})\s?SALDO ATUAL").unwrap();

    pub static ref PRIOR_BALANCE: Regex =
        Regex::new(&format!(r"SALDO ANTERIOR\s+{}", BRL_NUMBER)).unwrap();
    pub static ref CURRENT_BALANCE: Regex =
        Regex::new(&format!(r"SALDO ATUAL\s+=\s+{}", BRL_NUMBER)).unwrap();
    pub static ref GROSS_YIELD: Regex =
        Regex::new(&format!(r"RENDIMENTO BRUTO\s+\([+|-]\)\s+{}", BRL_NUMBER)).unwrap();
    pub static ref NET_YIELD: Regex =
        Regex::new(&format!(r"RENDIMENTO LIQUIDO\s+{}", BRL_NUMBER)).unwrap();
    pub static ref WITHDRAWALS: Regex =
        Regex::new(&format!(r"RESGATES\s+\(-\)\s+{}", BRL_NUMBER)).unwrap();
    pub static ref INCOME_TAX: Regex =
        Regex::new(&format!(r"IMPOSTO DE RENDA\s+\(-\)\s+{}", BRL_NUMBER)).unwrap();
    pub static ref IOF_TAX: Regex =
        Regex::new(&format!(r"IOF\s+\(-\)\s+{}", BRL_NUMBER)).unwrap();
    pub static ref CONTRIBUTIONS: Regex =
        Regex::new(&format!(r"APLICACOES\s+\(\+\)\s+{}", BRL_NUMBER)).unwrap();
}
