//! Compile a folder of investment-fund statement dumps.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use glob::glob;
use tracing::info;

use extrato_core::fund::{compile_table, segment_statements, RenameMap};
use extrato_core::locale::Locale;

use super::{read_latin1, write_table, OutputFormat};

/// Arguments for the funds command.
#[derive(Args)]
pub struct FundsArgs {
    /// Folder containing the statement dumps
    dir: PathBuf,

    /// Output file (stdout when omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "csv")]
    format: OutputFormat,
}

pub fn run(args: FundsArgs) -> Result<()> {
    let pattern = args.dir.join("*.txt");
    let renames = RenameMap::historical();
    let mut book = Vec::new();

    for entry in glob(&pattern.to_string_lossy()).context("invalid glob pattern")? {
        let path = entry?;
        let text = read_latin1(&path)?;
        let mut statements = segment_statements(&text, &renames)
            .with_context(|| format!("processing {}", path.display()))?;
        book.append(&mut statements);
    }
    info!("{} fund records segmented from {}", book.len(), args.dir.display());

    let table = compile_table(&book, &Locale::pt_br());
    write_table(&table, args.format, args.output.as_deref())
}
