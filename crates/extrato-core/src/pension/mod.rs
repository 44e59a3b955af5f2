//! Multi-section pension statement extraction.
//!
//! Unlike the fund segmenter, each pension document covers exactly one
//! reporting period, and that period is printed nowhere useful inside the
//! document; it comes from the source file name. Each named subsection
//! contributes a (units, value) pair per sub-fund. Opening and closing
//! balances and the yield figures are mandatory; contribution sections only
//! appear in periods that had contributions and are extracted match-or-skip.

mod patterns;

use regex::Regex;
use serde::Serialize;
use tracing::{debug, error};

use crate::error::{ExtractionError, Result};
use crate::locale::Locale;
use crate::table::{ColumnData, Table};
use crate::text::{normalize_diacritics, Encoding};

/// A (units, value) pair as printed for one sub-fund in one subsection,
/// both still raw locale-numeric strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FundPosition {
    pub units: String,
    pub value: String,
}

/// One pension statement document (one reporting period).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PensionStatement {
    /// `YYYY-MM`, taken from the source file name.
    pub period: String,
    pub fixed_opening: FundPosition,
    pub composite_opening: FundPosition,
    pub fixed_periodic: Option<FundPosition>,
    pub composite_periodic: Option<FundPosition>,
    pub fixed_extraordinary: Option<FundPosition>,
    pub composite_extraordinary: Option<FundPosition>,
    pub fixed_closing: FundPosition,
    pub composite_closing: FundPosition,
    pub accumulated_yield: String,
    pub fixed_yield: String,
    pub composite_yield: String,
}

/// Extract one pension statement. `source` is the file name the document
/// came from and must carry the `YYYY-MM` reporting period.
pub fn parse_statement(document: &str, source: &str) -> Result<PensionStatement> {
    let period = match patterns::PERIOD_IN_NAME.captures(source) {
        Some(caps) => caps[1].to_string(),
        None => {
            return Err(ExtractionError::MissingPeriod {
                source_name: source.to_string(),
            }
            .into());
        }
    };

    let text = normalize_diacritics(&document.to_uppercase(), Encoding::Latin1)?;
    let context = format!("{source} ({period})");

    let (fixed_yield, composite_yield) = match patterns::FUND_YIELD.captures(&text) {
        Some(caps) => (caps[1].to_string(), caps[2].to_string()),
        None => {
            error!("missing mandatory field Rend_fundo in {context}");
            return Err(ExtractionError::MissingField {
                field: "Rend_fundo",
                context,
            }
            .into());
        }
    };

    let statement = PensionStatement {
        fixed_opening: mandatory_pair(&patterns::OPENING_FIXED, &text, "FIX_SldAnt", &context)?,
        composite_opening: mandatory_pair(
            &patterns::OPENING_COMPOSITE,
            &text,
            "COMP_SldAnt",
            &context,
        )?,
        fixed_periodic: optional_pair(&patterns::PERIODIC_FIXED, &text),
        composite_periodic: optional_pair(&patterns::PERIODIC_COMPOSITE, &text),
        fixed_extraordinary: optional_pair(&patterns::EXTRAORDINARY_FIXED, &text),
        composite_extraordinary: optional_pair(&patterns::EXTRAORDINARY_COMPOSITE, &text),
        fixed_closing: mandatory_pair(&patterns::CLOSING_FIXED, &text, "FIX_SldAtual", &context)?,
        composite_closing: mandatory_pair(
            &patterns::CLOSING_COMPOSITE,
            &text,
            "COMP_SldAtual",
            &context,
        )?,
        accumulated_yield: mandatory_single(&patterns::ACCUMULATED_YIELD, &text, "Rend", &context)?,
        fixed_yield,
        composite_yield,
        period,
    };

    debug!("parsed pension statement {}", statement.period);
    Ok(statement)
}

fn mandatory_pair(
    re: &Regex,
    text: &str,
    field: &'static str,
    context: &str,
) -> Result<FundPosition> {
    match re.captures(text) {
        Some(caps) => Ok(FundPosition {
            units: caps[1].to_string(),
            value: caps[2].to_string(),
        }),
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

fn optional_pair(re: &Regex, text: &str) -> Option<FundPosition> {
    re.captures(text).map(|caps| FundPosition {
        units: caps[1].to_string(),
        value: caps[2].to_string(),
    })
}

fn mandatory_single(re: &Regex, text: &str, field: &'static str, context: &str) -> Result<String> {
    match re.captures(text) {
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

/// Assemble parsed statements into a table and normalize the numeric
/// columns. A contribution column appears only when at least one statement
/// has that section; documents without it get missing cells (NaN after
/// normalization).
pub fn compile_table(statements: &[PensionStatement], locale: &Locale) -> Table {
    let mut table = Table::new();
    if statements.is_empty() {
        return table;
    }

    pair_columns(&mut table, "FIX_SldAnt", statements, |s| {
        Some(&s.fixed_opening)
    });
    pair_columns(&mut table, "COMP_SldAnt", statements, |s| {
        Some(&s.composite_opening)
    });
    pair_columns(&mut table, "FIX_ContrPer", statements, |s| {
        s.fixed_periodic.as_ref()
    });
    pair_columns(&mut table, "COMP_ContrPer", statements, |s| {
        s.composite_periodic.as_ref()
    });
    pair_columns(&mut table, "FIX_ContrEsp", statements, |s| {
        s.fixed_extraordinary.as_ref()
    });
    pair_columns(&mut table, "COMP_ContrEsp", statements, |s| {
        s.composite_extraordinary.as_ref()
    });
    pair_columns(&mut table, "FIX_SldAtual", statements, |s| {
        Some(&s.fixed_closing)
    });
    pair_columns(&mut table, "COMP_SldAtual", statements, |s| {
        Some(&s.composite_closing)
    });

    table.push_column(
        "Rend",
        ColumnData::Text(
            statements
                .iter()
                .map(|s| Some(s.accumulated_yield.clone()))
                .collect(),
        ),
    );
    table.push_column(
        "FIX_Rend",
        ColumnData::Text(statements.iter().map(|s| Some(s.fixed_yield.clone())).collect()),
    );
    table.push_column(
        "COMP_Rend",
        ColumnData::Text(
            statements
                .iter()
                .map(|s| Some(s.composite_yield.clone()))
                .collect(),
        ),
    );
    table.push_column(
        "Mes",
        ColumnData::Text(statements.iter().map(|s| Some(s.period.clone())).collect()),
    );

    table.normalize_currency(locale);
    table
}

fn pair_columns<'a, F>(
    table: &mut Table,
    prefix: &str,
    statements: &'a [PensionStatement],
    get: F,
) where
    F: Fn(&'a PensionStatement) -> Option<&'a FundPosition>,
{
    if statements.iter().all(|s| get(s).is_none()) {
        return;
    }
    table.push_column(
        format!("{prefix}_Cts"),
        ColumnData::Text(
            statements
                .iter()
                .map(|s| get(s).map(|p| p.units.clone()))
                .collect(),
        ),
    );
    table.push_column(
        format!("{prefix}_Vlr"),
        ColumnData::Text(
            statements
                .iter()
                .map(|s| get(s).map(|p| p.value.clone()))
                .collect(),
        ),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const WITH_CONTRIBUTIONS: &str = r#"
HISTÓRICO DA MOVIMENTAÇÃO
SALDO ANTERIOR DA PROVISÃO RT FIX V FIC 1.234,56 10.100,00
SALDO ANTERIOR DA PROVISÃO RT COMPOSTO RV 20 V FIC 2.345,67 20.200,00
CONTRIBUIÇÃO PERIÓDICA BRUTA APOSENTADORIA RT FIX V FIC 12,34 500,00
CONTRIBUIÇÃO PERIÓDICA BRUTA APOSENTADORIA RT COMPOSTO RV 20 V FIC 23,45 700,00
SALDO ATUAL DA PROVISÃO RT FIX V FIC 1.246,90 10.720,00
SALDO ATUAL DA PROVISÃO RT COMPOSTO RV 20 V FIC 2.369,12 21.050,00
RENDIMENTO ACUMULADO NO PERÍODO: 270,00
RENDIMENTO POR FUNDO
FUNDO PARTICIPANTE
RT FIX V FIC 36 120,00
RT COMPOSTO RV 20 V FIC 36 150,00
"#;

    const WITHOUT_CONTRIBUTIONS: &str = r#"
HISTÓRICO DA MOVIMENTAÇÃO
SALDO ANTERIOR DA PROVISÃO RT FIX V FIC 1.234,56 10.100,00
SALDO ANTERIOR DA PROVISÃO RT COMPOSTO RV 20 V FIC 2.345,67 20.200,00
SALDO ATUAL DA PROVISÃO RT FIX V FIC 1.234,56 10.220,00
SALDO ATUAL DA PROVISÃO RT COMPOSTO RV 20 V FIC 2.345,67 20.350,00
RENDIMENTO ACUMULADO NO PERÍODO: 270,00
RENDIMENTO POR FUNDO
FUNDO PARTICIPANTE
RT FIX V FIC 36 120,00
RT COMPOSTO RV 20 V FIC 36 150,00
"#;

    #[test]
    fn parses_mandatory_sections() {
        let statement = parse_statement(WITHOUT_CONTRIBUTIONS, "brasilprev-2016-05.txt").unwrap();

        assert_eq!(statement.period, "2016-05");
        assert_eq!(
            statement.fixed_opening,
            FundPosition {
                units: "1.234,56".to_string(),
                value: "10.100,00".to_string(),
            }
        );
        assert_eq!(statement.composite_closing.value, "20.350,00");
        assert_eq!(statement.accumulated_yield, "270,00");
    }

    #[test]
    fn contribution_sections_are_match_or_skip() {
        let with = parse_statement(WITH_CONTRIBUTIONS, "2016-05.txt").unwrap();
        let without = parse_statement(WITHOUT_CONTRIBUTIONS, "2016-06.txt").unwrap();

        assert_eq!(
            with.fixed_periodic,
            Some(FundPosition {
                units: "12,34".to_string(),
                value: "500,00".to_string(),
            })
        );
        assert_eq!(without.fixed_periodic, None);
        assert_eq!(without.composite_periodic, None);
        assert_eq!(without.fixed_extraordinary, None);
        assert_eq!(without.composite_extraordinary, None);
    }

    #[test]
    fn multi_line_yield_pattern_binds_both_funds() {
        let statement = parse_statement(WITH_CONTRIBUTIONS, "2016-05.txt").unwrap();
        assert_eq!(statement.fixed_yield, "120,00");
        assert_eq!(statement.composite_yield, "150,00");
    }

    #[test]
    fn missing_closing_balance_is_fatal() {
        let truncated =
            WITHOUT_CONTRIBUTIONS.replace("SALDO ATUAL DA PROVISÃO RT FIX V FIC 1.234,56 10.220,00", "");
        let err = parse_statement(&truncated, "2016-05.txt").unwrap_err();

        match err {
            crate::error::ExtratoError::Extraction(ExtractionError::MissingField {
                field, ..
            }) => assert_eq!(field, "FIX_SldAtual"),
            other => panic!("expected MissingField, got {other:?}"),
        }
    }

    #[test]
    fn source_name_without_period_is_rejected() {
        let err = parse_statement(WITHOUT_CONTRIBUTIONS, "brasilprev.txt").unwrap_err();
        assert!(matches!(
            err,
            crate::error::ExtratoError::Extraction(ExtractionError::MissingPeriod { .. })
        ));
    }

    #[test]
    fn contribution_columns_appear_only_when_observed() {
        let with = parse_statement(WITH_CONTRIBUTIONS, "2016-05.txt").unwrap();
        let without = parse_statement(WITHOUT_CONTRIBUTIONS, "2016-06.txt").unwrap();

        let table = compile_table(&[with.clone()], &Locale::pt_br());
        assert!(table.column("FIX_ContrPer_Vlr").is_some());
        assert!(table.column("FIX_ContrEsp_Vlr").is_none());

        // Mixed book: the column exists, the document without the section
        // gets NaN cells.
        let table = compile_table(&[with, without], &Locale::pt_br());
        match &table.column("FIX_ContrPer_Vlr").unwrap().data {
            ColumnData::Number(values) => {
                assert_eq!(values[0], 500.0);
                assert!(values[1].is_nan());
            }
            other => panic!("expected numeric column, got {other:?}"),
        }
        assert!(matches!(table.column("Mes").unwrap().data, ColumnData::Text(_)));
    }
}
