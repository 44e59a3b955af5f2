//! Column-ordered tabular output and locale-numeric coercion.

use serde::Serialize;
use tracing::debug;

use crate::locale::Locale;

/// Cell data of one named column.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnData {
    /// Textual cells; `None` marks a missing value.
    Text(Vec<Option<String>>),
    /// Integer cells, used for derived keys such as year and month.
    Integer(Vec<i64>),
    /// Numeric cells; missing values are `f64::NAN`.
    Number(Vec<f64>),
}

impl ColumnData {
    fn len(&self) -> usize {
        match self {
            ColumnData::Text(cells) => cells.len(),
            ColumnData::Integer(cells) => cells.len(),
            ColumnData::Number(cells) => cells.len(),
        }
    }
}

/// A named column.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub data: ColumnData,
}

/// Per-column outcome of [`Table::normalize_currency`].
///
/// The "left as-is" case is a normal result, not a swallowed error: columns
/// that are not numeric in the source locale pass through untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CoercionOutcome {
    /// Every present cell parsed; the column is now numeric.
    Converted,
    /// At least one present cell did not parse; the column is untouched.
    LeftAsIs,
}

/// Ordered collection of equally long named columns. Row order is
/// significant and preserved by every operation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    columns: Vec<Column>,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a column. All columns of a table must agree on row count.
    pub fn push_column(&mut self, name: impl Into<String>, data: ColumnData) {
        debug_assert!(
            self.columns.is_empty() || self.columns[0].data.len() == data.len(),
            "column length mismatch"
        );
        self.columns.push(Column {
            name: name.into(),
            data,
        });
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn n_rows(&self) -> usize {
        self.columns.first().map_or(0, |c| c.data.len())
    }

    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }

    /// Move the named column to the first position, preserving the relative
    /// order of the others. Unknown names are ignored.
    pub fn move_to_front(&mut self, name: &str) {
        if let Some(idx) = self.columns.iter().position(|c| c.name == name) {
            let column = self.columns.remove(idx);
            self.columns.insert(0, column);
        }
    }

    /// Coerce every all-numeric text column to floating point.
    ///
    /// The rule is all-or-nothing per column: a column converts only if every
    /// present cell parses as a locale-numeric string, otherwise the whole
    /// column keeps its original text, numeric-looking cells included. That
    /// is what lets heterogeneous tables pass through a single pass safely.
    /// Missing cells of a converted column become NaN. Columns that are
    /// already numeric count as converted.
    pub fn normalize_currency(&mut self, locale: &Locale) -> Vec<(String, CoercionOutcome)> {
        let mut report = Vec::with_capacity(self.columns.len());

        for column in &mut self.columns {
            let outcome = match &column.data {
                ColumnData::Integer(_) | ColumnData::Number(_) => CoercionOutcome::Converted,
                ColumnData::Text(cells) => {
                    let parsed: Option<Vec<f64>> = cells
                        .iter()
                        .map(|cell| match cell {
                            Some(text) => locale.parse_number(text),
                            None => Some(f64::NAN),
                        })
                        .collect();

                    match parsed {
                        Some(values) => {
                            column.data = ColumnData::Number(values);
                            CoercionOutcome::Converted
                        }
                        None => CoercionOutcome::LeftAsIs,
                    }
                }
            };
            report.push((column.name.clone(), outcome));
        }

        debug!("currency normalization: {:?}", report);
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn text(cells: &[&str]) -> ColumnData {
        ColumnData::Text(cells.iter().map(|s| Some(s.to_string())).collect())
    }

    #[test]
    fn all_numeric_column_converts_whole() {
        let mut table = Table::new();
        table.push_column("Valor", text(&["1.334,56", "-2,50", "1200"]));
        let report = table.normalize_currency(&Locale::pt_br());

        assert_eq!(report, vec![("Valor".to_string(), CoercionOutcome::Converted)]);
        assert_eq!(
            table.column("Valor").unwrap().data,
            ColumnData::Number(vec![1334.56, -2.5, 1200.0])
        );
    }

    #[test]
    fn one_bad_cell_keeps_whole_column_textual() {
        let mut table = Table::new();
        table.push_column("Misto", text(&["1,00", "pagamento", "2,00"]));
        let report = table.normalize_currency(&Locale::pt_br());

        assert_eq!(report, vec![("Misto".to_string(), CoercionOutcome::LeftAsIs)]);
        // The numeric-looking cells stay textual too.
        assert_eq!(
            table.column("Misto").unwrap().data,
            text(&["1,00", "pagamento", "2,00"])
        );
    }

    #[test]
    fn heterogeneous_table_survives_a_single_pass() {
        let mut table = Table::new();
        table.push_column("Fundo", text(&["RF DIVIDA EXT MIL", "RF REF DI 250 MIL"]));
        table.push_column("Mes", text(&["2016-05", "2016-05"]));
        table.push_column("Saldo_atual", text(&["11.363,79", "11.364,89"]));
        table.normalize_currency(&Locale::pt_br());

        assert!(matches!(table.column("Fundo").unwrap().data, ColumnData::Text(_)));
        assert!(matches!(table.column("Mes").unwrap().data, ColumnData::Text(_)));
        assert_eq!(
            table.column("Saldo_atual").unwrap().data,
            ColumnData::Number(vec![11363.79, 11364.89])
        );
    }

    #[test]
    fn missing_cells_become_nan() {
        let mut table = Table::new();
        table.push_column(
            "FIX_ContrPer_Vlr",
            ColumnData::Text(vec![Some("1,50".to_string()), None]),
        );
        table.normalize_currency(&Locale::pt_br());

        match &table.column("FIX_ContrPer_Vlr").unwrap().data {
            ColumnData::Number(values) => {
                assert_eq!(values[0], 1.5);
                assert!(values[1].is_nan());
            }
            other => panic!("expected numeric column, got {other:?}"),
        }
    }

    #[test]
    fn move_to_front_preserves_other_order() {
        let mut table = Table::new();
        table.push_column("Mes", text(&["2016-05"]));
        table.push_column("Fundo", text(&["ACOES"]));
        table.push_column("Saldo_atual", text(&["1,00"]));
        table.move_to_front("Fundo");

        assert_eq!(table.column_names(), vec!["Fundo", "Mes", "Saldo_atual"]);
    }
}
