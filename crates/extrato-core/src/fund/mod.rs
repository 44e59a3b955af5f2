//! Free-text investment-fund statement segmentation.
//!
//! A statement dump concatenates one record per fund per reporting period.
//! Each record opens with a recurring title line (institution marker, fund
//! name, tax-id annotation); the segmenter cuts the document into spans at
//! those titles and extracts the labeled monetary fields of each span with
//! independently anchored patterns. Values stay in their raw locale-numeric
//! form until table assembly runs the currency normalizer.

mod patterns;

use regex::Regex;
use serde::Serialize;
use tracing::{debug, error};

use crate::error::{ExtractionError, Result};
use crate::locale::Locale;
use crate::table::{ColumnData, Table};
use crate::text::{normalize_diacritics, Encoding};

/// Fund renames applied during segmentation (old name → current name), so
/// records from before and after a rename aggregate under one identifier.
/// Renames are data: add entries with [`RenameMap::with`].
#[derive(Debug, Clone, Default)]
pub struct RenameMap {
    entries: Vec<(String, String)>,
}

impl RenameMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one rename.
    pub fn with(mut self, old: &str, new: &str) -> Self {
        self.entries.push((old.to_string(), new.to_string()));
        self
    }

    /// The two funds renamed in the 2016-05 statements.
    pub fn historical() -> Self {
        Self::new()
            .with("DIVIDA EXTERN MIL", "RF DIVIDA EXT MIL")
            .with("REF DI LP 250 MIL", "RF REF DI 250 MIL")
    }

    fn apply<'a>(&'a self, name: &'a str) -> &'a str {
        self.entries
            .iter()
            .find(|(old, _)| old == name)
            .map(|(_, new)| new.as_str())
            .unwrap_or(name)
    }
}

/// One reporting period of one fund, fields still in raw locale-numeric
/// form. All fields are mandatory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FundStatement {
    pub fund: String,
    /// `YYYY-MM`.
    pub period: String,
    pub prior_balance: String,
    pub current_balance: String,
    pub gross_yield: String,
    pub net_yield: String,
    pub withdrawals: String,
    pub income_tax: String,
    pub iof_tax: String,
    pub contributions: String,
}

/// Split a statement document into per-period records and extract the
/// labeled fields of each.
///
/// The whole document is upper-cased and unaccented before any matching.
/// Every title occurrence starts a record span that runs to the next
/// occurrence; the final span runs to end of document. A mandatory field
/// that fails to match aborts the whole document instead of being skipped:
/// a record missing from the output would corrupt grouped sums downstream.
pub fn segment_statements(document: &str, renames: &RenameMap) -> Result<Vec<FundStatement>> {
    let text = normalize_diacritics(&document.to_uppercase(), Encoding::Latin1)?;

    let starts: Vec<usize> = patterns::TITLE.find_iter(&text).map(|m| m.start()).collect();
    debug!("{} record spans found", starts.len());

    let mut statements = Vec::with_capacity(starts.len());
    for (i, &start) in starts.iter().enumerate() {
        let end = starts.get(i + 1).copied().unwrap_or(text.len());
        statements.push(extract_record(&text[start..end], renames)?);
    }
    Ok(statements)
}

fn extract_record(span: &str, renames: &RenameMap) -> Result<FundStatement> {
    // The span begins at a title match, so the fund name is always present.
    let fund_raw = patterns::TITLE
        .captures(span)
        .map(|caps| caps[1].trim().to_string())
        .unwrap_or_default();
    let fund = renames.apply(&fund_raw).to_string();

    let period = match patterns::PERIOD.captures(span) {
        Some(caps) => format!("{}-{}", &caps[2], &caps[1]),
        None => {
            error!("missing mandatory field Mes in record for fund {fund}");
            return Err(ExtractionError::MissingField {
                field: "Mes",
                context: fund,
            }
            .into());
        }
    };

    let context = format!("{period} {fund}");
    Ok(FundStatement {
        prior_balance: mandatory(&patterns::PRIOR_BALANCE, span, "Saldo_anterior", &context)?,
        current_balance: mandatory(&patterns::CURRENT_BALANCE, span, "Saldo_atual", &context)?,
        gross_yield: mandatory(&patterns::GROSS_YIELD, span, "Rend_bruto", &context)?,
        net_yield: mandatory(&patterns::NET_YIELD, span, "Rend_liquido", &context)?,
        withdrawals: mandatory(&patterns::WITHDRAWALS, span, "Retirada", &context)?,
        income_tax: mandatory(&patterns::INCOME_TAX, span, "IR", &context)?,
        iof_tax: mandatory(&patterns::IOF_TAX, span, "IOF", &context)?,
        contributions: mandatory(&patterns::CONTRIBUTIONS, span, "Aplicacao", &context)?,
        fund,
        period,
    })
}

fn mandatory(re: &Regex, span: &str, field: &'static str, context: &str) -> Result<String> {
    match re.captures(span) {
        Some(caps) => Ok(caps[1].to_string()),
        None => {
            error!("missing mandatory field {field} in {context}");
            Err(ExtractionError::MissingField {
                field,
                context: context.to_string(),
            }
            .into())
        }
    }
}

/// Assemble segmented statements into a table, pin the fund column first,
/// and normalize the monetary columns. The period key keeps its dash and so
/// stays textual through the numeric pass.
pub fn compile_table(statements: &[FundStatement], locale: &Locale) -> Table {
    fn text<F: Fn(&FundStatement) -> String>(statements: &[FundStatement], get: F) -> ColumnData {
        ColumnData::Text(statements.iter().map(|s| Some(get(s))).collect())
    }

    let mut table = Table::new();
    table.push_column("Mes", text(statements, |s| s.period.clone()));
    table.push_column("Fundo", text(statements, |s| s.fund.clone()));
    table.push_column("Saldo_anterior", text(statements, |s| s.prior_balance.clone()));
    table.push_column("Saldo_atual", text(statements, |s| s.current_balance.clone()));
    table.push_column("Rend_bruto", text(statements, |s| s.gross_yield.clone()));
    table.push_column("Rend_liquido", text(statements, |s| s.net_yield.clone()));
    table.push_column("Retirada", text(statements, |s| s.withdrawals.clone()));
    table.push_column("IR", text(statements, |s| s.income_tax.clone()));
    table.push_column("IOF", text(statements, |s| s.iof_tax.clone()));
    table.push_column("Aplicacao", text(statements, |s| s.contributions.clone()));

    table.move_to_front("Fundo");
    table.normalize_currency(locale);
    table
}
