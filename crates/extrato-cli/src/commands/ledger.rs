//! Compile a folder of current-account CSV exports.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use glob::glob;
use tracing::{debug, info};

use extrato_core::ledger::transform_ledger;
use extrato_core::locale::Locale;

use super::{read_latin1, write_table, OutputFormat};

/// Arguments for the ledger command.
#[derive(Args)]
pub struct LedgerArgs {
    /// Folder containing the CSV exports
    dir: PathBuf,

    /// Keep running-balance rows instead of dropping them
    #[arg(long)]
    keep_balance_rows: bool,

    /// Output file (stdout when omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "csv")]
    format: OutputFormat,
}

pub fn run(args: LedgerArgs) -> Result<()> {
    let pattern = args.dir.join("*.csv");
    let mut rows = Vec::new();
    let mut n_files = 0;

    for entry in glob(&pattern.to_string_lossy()).context("invalid glob pattern")? {
        let path = entry?;
        let text = read_latin1(&path)?;

        // Each export repeats the bank's header line; skip it per file and
        // let the engine validate row widths.
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(text.as_bytes());
        for record in reader.records() {
            let record = record.with_context(|| format!("parsing {}", path.display()))?;
            rows.push(record.iter().map(str::to_string).collect::<Vec<_>>());
        }
        n_files += 1;
    }
    info!("{} CSV files found in {}", n_files, args.dir.display());

    let table = transform_ledger(&rows, !args.keep_balance_rows, &Locale::pt_br())?;
    debug!("{} rows after transformation", table.n_rows());
    write_table(&table, args.format, args.output.as_deref())
}
