//! CLI subcommands and shared input/output helpers.

pub mod funds;
pub mod ledger;
pub mod pension;

use std::fs;
use std::io::Write;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use clap::ValueEnum;

use extrato_core::table::{ColumnData, Table};

/// Output format for compiled tables.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Csv,
    Json,
}

/// Read a Latin-1 encoded file. Every Latin-1 byte maps to the Unicode code
/// point of the same value, so the decode itself cannot fail.
pub fn read_latin1(path: &Path) -> Result<String> {
    let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    Ok(bytes.iter().map(|&b| b as char).collect())
}

/// Write a table to `output`, or stdout when `None`.
pub fn write_table(table: &Table, format: OutputFormat, output: Option<&Path>) -> Result<()> {
    let rendered = match format {
        OutputFormat::Csv => render_csv(table)?,
        OutputFormat::Json => render_json(table)?,
    };
    match output {
        Some(path) => {
            fs::write(path, rendered).with_context(|| format!("writing {}", path.display()))?
        }
        None => std::io::stdout().write_all(rendered.as_bytes())?,
    }
    Ok(())
}

fn render_csv(table: &Table) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(table.columns().iter().map(|c| c.name.as_str()))?;

    for row in 0..table.n_rows() {
        let record: Vec<String> = table
            .columns()
            .iter()
            .map(|column| match &column.data {
                ColumnData::Text(cells) => cells[row].clone().unwrap_or_default(),
                ColumnData::Integer(cells) => cells[row].to_string(),
                ColumnData::Number(cells) => {
                    let value = cells[row];
                    if value.is_nan() {
                        String::new()
                    } else {
                        format!("{value}")
                    }
                }
            })
            .collect();
        writer.write_record(&record)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| anyhow!("flushing csv output: {e}"))?;
    Ok(String::from_utf8(bytes)?)
}

fn render_json(table: &Table) -> Result<String> {
    let mut map = serde_json::Map::new();
    for column in table.columns() {
        let values: Vec<serde_json::Value> = match &column.data {
            ColumnData::Text(cells) => cells
                .iter()
                .map(|cell| match cell {
                    Some(text) => serde_json::Value::String(text.clone()),
                    None => serde_json::Value::Null,
                })
                .collect(),
            ColumnData::Integer(cells) => {
                cells.iter().map(|&v| serde_json::Value::from(v)).collect()
            }
            // NaN has no JSON rendering; missing numeric cells become null.
            ColumnData::Number(cells) => cells
                .iter()
                .map(|&v| {
                    serde_json::Number::from_f64(v)
                        .map(serde_json::Value::Number)
                        .unwrap_or(serde_json::Value::Null)
                })
                .collect(),
        };
        map.insert(column.name.clone(), serde_json::Value::Array(values));
    }
    Ok(serde_json::to_string_pretty(&serde_json::Value::Object(
        map,
    ))?)
}
